// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)

use serde::{Deserialize, Serialize};

use crate::domain::{format_time, ContentRef, ContinueWatchingEntry, MediaMeta, MediaType, ResumeDecision};
use crate::services::MountedPlayer;

// ============================================================================
// CONTINUE WATCHING DTOs
// ============================================================================

/// One card of the continue-watching row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueWatchingCardDto {
    pub content_key: String,
    pub id: String,
    pub media_type: MediaType,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    /// "Title (S1E3)" for episodes
    pub display_title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    /// Rounded, for the progress bar label
    pub progress_percent: u32,
    /// "12:05 / 1:20:00"
    pub position_label: String,
    pub current_time: f64,
    pub last_updated_at: String,
}

impl From<ContinueWatchingEntry> for ContinueWatchingCardDto {
    fn from(entry: ContinueWatchingEntry) -> Self {
        let title = entry
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "Unknown Title".to_string());
        let display_title = match (entry.content.season(), entry.content.episode()) {
            (Some(season), Some(episode)) => format!("{} (S{}E{})", title, season, episode),
            _ => title,
        };

        Self {
            content_key: entry.key().to_string(),
            id: entry.content.id().to_string(),
            media_type: entry.content.media_type(),
            season: entry.content.season(),
            episode: entry.content.episode(),
            display_title,
            poster_path: entry.poster_path,
            backdrop_path: entry.backdrop_path,
            progress_percent: entry.progress.round().clamp(0.0, 100.0) as u32,
            position_label: format!(
                "{} / {}",
                format_time(entry.current_time),
                format_time(entry.duration)
            ),
            current_time: entry.current_time,
            last_updated_at: entry.last_updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// PLAYBACK DTOs
// ============================================================================

/// Resume-or-restart question shown before the player mounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumePromptDto {
    pub content_key: String,
    pub title: String,
    pub message: String,
    pub resume_at_seconds: f64,
    pub progress_percent: u32,
}

impl ResumePromptDto {
    /// `None` when the decision is a plain restart.
    pub fn from_decision(content: &ContentRef, meta: &MediaMeta, decision: &ResumeDecision) -> Option<Self> {
        let message = decision.prompt_text()?;
        let ResumeDecision::Resume { at_seconds, percent } = *decision else {
            return None;
        };
        Some(Self {
            content_key: content.key().to_string(),
            title: meta.title.clone().unwrap_or_else(|| "Unknown Title".to_string()),
            message,
            resume_at_seconds: at_seconds,
            progress_percent: percent.round() as u32,
        })
    }
}

/// The mounted player surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerViewDto {
    pub content_key: String,
    pub title: String,
    /// "TV Show • 2008 • S1 E3"
    pub meta_line: String,
    pub embed_url: String,
    pub offset_seconds: u64,
}

impl From<MountedPlayer> for PlayerViewDto {
    fn from(player: MountedPlayer) -> Self {
        let mut meta_line = match player.content.media_type() {
            MediaType::Series => "TV Show".to_string(),
            MediaType::Movie => "Movie".to_string(),
        };
        if let Some(year) = player.meta.year.as_deref().filter(|y| !y.is_empty()) {
            meta_line.push_str(&format!(" • {}", year));
        }
        if let (Some(season), Some(episode)) = (player.content.season(), player.content.episode()) {
            meta_line.push_str(&format!(" • S{} E{}", season, episode));
        }

        Self {
            content_key: player.content.key().to_string(),
            title: player
                .meta
                .title
                .unwrap_or_else(|| "Unknown Title".to_string()),
            meta_line,
            embed_url: player.url.to_string(),
            offset_seconds: player.offset_seconds,
        }
    }
}

/// Result of an open/resume call: exactly one of the two is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackViewDto {
    pub prompt: Option<ResumePromptDto>,
    pub player: Option<PlayerViewDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProgressRecord;
    use chrono::Utc;
    use url::Url;

    #[test]
    fn test_card_for_episode() {
        let record = ProgressRecord::new(
            ContentRef::series(1399u64, Some(1), Some(3)),
            725.0,
            3600.0,
            Utc::now(),
        );
        let entry = ContinueWatchingEntry::from_record(
            &record,
            &MediaMeta {
                title: Some("Game of Thrones".to_string()),
                ..MediaMeta::default()
            },
        );

        let card = ContinueWatchingCardDto::from(entry);

        assert_eq!(card.display_title, "Game of Thrones (S1E3)");
        assert_eq!(card.content_key, "series-1399-s1e3");
        assert_eq!(card.progress_percent, 20);
        assert_eq!(card.position_label, "12:05 / 1:00:00");
    }

    #[test]
    fn test_card_without_title() {
        let record = ProgressRecord::new(ContentRef::movie(1u64), 10.0, 100.0, Utc::now());
        let card = ContinueWatchingCardDto::from(ContinueWatchingEntry::from_record(
            &record,
            &MediaMeta::default(),
        ));
        assert_eq!(card.display_title, "Unknown Title");
    }

    #[test]
    fn test_prompt_only_for_resume() {
        let movie = ContentRef::movie(42u64);
        let meta = MediaMeta::default();

        assert!(ResumePromptDto::from_decision(&movie, &meta, &ResumeDecision::Restart).is_none());

        let prompt = ResumePromptDto::from_decision(
            &movie,
            &meta,
            &ResumeDecision::Resume {
                at_seconds: 725.0,
                percent: 49.6,
            },
        )
        .unwrap();
        assert_eq!(prompt.message, "Continue watching from 12:05 (50%)?");
        assert_eq!(prompt.progress_percent, 50);
    }

    #[test]
    fn test_player_view_meta_line() {
        let player = MountedPlayer {
            content: ContentRef::series(1399u64, Some(2), Some(5)),
            meta: MediaMeta {
                title: Some("Game of Thrones".to_string()),
                year: Some("2011".to_string()),
                ..MediaMeta::default()
            },
            url: Url::parse("https://www.vidking.net/embed/tv/1399/2/5").unwrap(),
            offset_seconds: 0,
        };

        let view = PlayerViewDto::from(player);
        assert_eq!(view.meta_line, "TV Show • 2011 • S2 E5");
        assert_eq!(view.title, "Game of Thrones");
    }
}
