// src/integrations/player/embed.rs
//
// Embed URL construction for the third-party player
//
// Form: {base}/embed/movie/{id} or {base}/embed/tv/{id}/{season}/{episode},
// followed by a query string holding only non-default options.

use url::Url;

use crate::domain::{ContentRef, MediaType};
use crate::error::{AppError, AppResult};

/// Player presentation flags. `Default` is the bare player (no query).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayOptions {
    /// Accent color, with or without a leading `#`
    pub color: Option<String>,
    pub auto_play: bool,
    /// Series only
    pub next_episode: bool,
    /// Series only
    pub episode_selector: bool,
    pub muted: bool,
    pub hide_controls: bool,
}

impl DisplayOptions {
    /// What a card's play button launches with.
    pub fn for_launch() -> Self {
        Self {
            auto_play: true,
            next_episode: true,
            episode_selector: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmbedUrlBuilder {
    base: Url,
}

impl EmbedUrlBuilder {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "embed base url {} cannot carry a path",
                base_url
            )));
        }
        Ok(Self { base })
    }

    /// Builds the player URL, resuming at `floor(offset_seconds)` when that is positive.
    pub fn build(
        &self,
        content: &ContentRef,
        offset_seconds: f64,
        options: &DisplayOptions,
    ) -> AppResult<Url> {
        if content.id().is_blank() {
            return Err(AppError::MissingIdentifier(
                "content id is required to build a player url".to_string(),
            ));
        }

        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AppError::Config("embed base url cannot carry a path".to_string()))?;
            segments
                .pop_if_empty()
                .push("embed")
                .push(content.media_type().embed_segment())
                .push(content.id().as_str());
            if content.media_type() == MediaType::Series {
                segments
                    .push(&content.season().unwrap_or(1).to_string())
                    .push(&content.episode().unwrap_or(1).to_string());
            }
        }

        let params = query_params(content.media_type(), offset_seconds, options);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }
}

fn query_params(
    media_type: MediaType,
    offset_seconds: f64,
    options: &DisplayOptions,
) -> Vec<(&'static str, String)> {
    let series = media_type == MediaType::Series;
    let mut params = Vec::new();

    if let Some(color) = options.color.as_deref() {
        let hex = color.trim().trim_start_matches('#');
        if !hex.is_empty() {
            params.push(("color", hex.to_string()));
        }
    }
    if options.auto_play {
        params.push(("autoPlay", "true".to_string()));
    }
    if series && options.next_episode {
        params.push(("nextEpisode", "true".to_string()));
    }
    if series && options.episode_selector {
        params.push(("episodeSelector", "true".to_string()));
    }
    if options.muted {
        params.push(("mute", "true".to_string()));
    }
    if options.hide_controls {
        params.push(("controls", "false".to_string()));
    }
    if offset_seconds.is_finite() {
        let whole = offset_seconds.floor();
        if whole > 0.0 {
            params.push(("progress", format!("{}", whole as u64)));
        }
    }

    params
}
