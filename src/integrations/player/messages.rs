// src/integrations/player/messages.rs
//
// Embedded player message decoding
//
// ARCHITECTURE:
// - The player posts two shapes: flat `progressUpdate` and wrapped `PLAYER_EVENT`
// - Both are normalized here into one ProgressEvent
// - Origin checks and session fallback belong to the receiver service
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Pure functions only, no storage, no events

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{ContentId, ContentRef, MediaType};

const WRAPPED_TYPE: &str = "PLAYER_EVENT";
const FLAT_TYPE: &str = "progressUpdate";

/// Player event names that carry a playback position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressKind {
    TimeUpdate,
    ProgressUpdate,
    Seeked,
    Ended,
}

impl ProgressKind {
    fn from_event_name(name: &str) -> Option<Self> {
        match name {
            "timeupdate" => Some(ProgressKind::TimeUpdate),
            "progressUpdate" => Some(ProgressKind::ProgressUpdate),
            "seeked" => Some(ProgressKind::Seeked),
            "ended" => Some(ProgressKind::Ended),
            _ => None,
        }
    }
}

/// Normalized progress report, independent of the wire shape it came in.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    pub kind: ProgressKind,
    pub content_id: ContentId,
    pub media_type: Option<MediaType>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub current_time: f64,
    /// 0 when the player did not report one
    pub duration: f64,
}

impl ProgressEvent {
    /// Resolves which watchable unit this event is about.
    ///
    /// An explicit media type wins. Without one, the active session supplies
    /// the media type when it is playing the same id, and season/episode
    /// numbers carried by the message still win over the session's.
    /// Otherwise season/episode numbers imply a series and their absence a
    /// movie.
    pub fn content_ref(&self, active: Option<&ContentRef>) -> ContentRef {
        if let Some(media_type) = self.media_type {
            return ContentRef::new(self.content_id.clone(), media_type, self.season, self.episode);
        }
        if let Some(session) = active.filter(|s| s.id() == &self.content_id) {
            return ContentRef::new(
                self.content_id.clone(),
                session.media_type(),
                self.season.or(session.season()),
                self.episode.or(session.episode()),
            );
        }
        if self.season.is_some() || self.episode.is_some() {
            ContentRef::series(self.content_id.clone(), self.season, self.episode)
        } else {
            ContentRef::movie(self.content_id.clone())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerMessage {
    Progress(ProgressEvent),
    /// Recognized shape, non-progress event (play, pause, ...)
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("payload is not valid JSON")]
    NotJson,

    #[error("payload is not a player message")]
    UnrecognizedShape,

    #[error("message has no content id")]
    MissingContentId,

    #[error("currentTime is missing or not a non-negative number")]
    InvalidCurrentTime,
}

/// Position fields shared by both shapes. Every field is read leniently;
/// validation happens in `into_event`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressFields {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    tmdb_id: Value,
    #[serde(default)]
    current_time: Value,
    #[serde(default)]
    duration: Value,
    #[serde(default)]
    media_type: Value,
    #[serde(default)]
    season: Value,
    #[serde(default)]
    episode: Value,
}

impl ProgressFields {
    fn into_event(self, kind: ProgressKind) -> Result<ProgressEvent, MessageError> {
        let content_id = ContentId::from_json(&self.id)
            .or_else(|| ContentId::from_json(&self.tmdb_id))
            .ok_or(MessageError::MissingContentId)?;

        let current_time = self
            .current_time
            .as_f64()
            .filter(|t| t.is_finite() && *t >= 0.0)
            .ok_or(MessageError::InvalidCurrentTime)?;

        let duration = self
            .duration
            .as_f64()
            .filter(|d| d.is_finite() && *d >= 0.0)
            .unwrap_or(0.0);

        Ok(ProgressEvent {
            kind,
            content_id,
            media_type: self.media_type.as_str().and_then(MediaType::from_wire),
            season: episode_number(&self.season),
            episode: episode_number(&self.episode),
            current_time,
            duration,
        })
    }
}

/// Season/episode numbers arrive as numbers or numeric strings.
fn episode_number(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accepts either a JSON string (parsed first) or an already-structured value.
fn decode_layer(payload: &Value) -> Result<Value, MessageError> {
    match payload {
        Value::String(raw) => serde_json::from_str(raw).map_err(|_| MessageError::NotJson),
        other => Ok(other.clone()),
    }
}

fn fields_from(value: Value) -> Result<ProgressFields, MessageError> {
    if !value.is_object() {
        return Err(MessageError::UnrecognizedShape);
    }
    serde_json::from_value(value).map_err(|_| MessageError::UnrecognizedShape)
}

/// Decodes one message posted by the player.
pub fn parse_player_message(payload: &Value) -> Result<PlayerMessage, MessageError> {
    let message = decode_layer(payload)?;
    let discriminator = message
        .get("type")
        .and_then(Value::as_str)
        .ok_or(MessageError::UnrecognizedShape)?
        .to_string();

    match discriminator.as_str() {
        WRAPPED_TYPE => {
            let data = message
                .get("data")
                .map(decode_layer)
                .transpose()?
                .filter(Value::is_object)
                .ok_or(MessageError::UnrecognizedShape)?;
            let event_name = data
                .get("event")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            match ProgressKind::from_event_name(&event_name) {
                Some(kind) => fields_from(data)?.into_event(kind).map(PlayerMessage::Progress),
                None => Ok(PlayerMessage::Other(event_name)),
            }
        }
        FLAT_TYPE => fields_from(message)?
            .into_event(ProgressKind::ProgressUpdate)
            .map(PlayerMessage::Progress),
        _ => Ok(PlayerMessage::Other(discriminator)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn progress(payload: Value) -> ProgressEvent {
        match parse_player_message(&payload).unwrap() {
            PlayerMessage::Progress(event) => event,
            other => panic!("expected progress, got {:?}", other),
        }
    }

    #[test]
    fn test_wrapped_timeupdate() {
        let event = progress(json!({
            "type": "PLAYER_EVENT",
            "data": {
                "event": "timeupdate",
                "currentTime": 120.5,
                "duration": 3600,
                "id": "1399",
                "mediaType": "tv",
                "season": 1,
                "episode": 3
            }
        }));

        assert_eq!(event.kind, ProgressKind::TimeUpdate);
        assert_eq!(event.content_id.as_str(), "1399");
        assert_eq!(event.media_type, Some(MediaType::Series));
        assert_eq!(event.current_time, 120.5);
        assert_eq!(event.content_ref(None).key().as_str(), "series-1399-s1e3");
    }

    #[test]
    fn test_flat_progress_update_from_string_payload() {
        let raw = json!({"type": "progressUpdate", "currentTime": 30, "duration": 600, "tmdbId": 550})
            .to_string();
        let event = progress(Value::String(raw));

        assert_eq!(event.kind, ProgressKind::ProgressUpdate);
        assert_eq!(event.content_id.as_str(), "550");
        assert_eq!(event.duration, 600.0);
        assert_eq!(event.media_type, None);
    }

    #[test]
    fn test_id_wins_over_tmdb_id() {
        let event = progress(json!({"type": "progressUpdate", "currentTime": 1, "id": "a", "tmdbId": "b"}));
        assert_eq!(event.content_id.as_str(), "a");
    }

    #[test]
    fn test_wrapped_data_may_be_a_string() {
        let data = json!({"event": "seeked", "currentTime": 5, "id": 9}).to_string();
        let event = progress(json!({"type": "PLAYER_EVENT", "data": data}));
        assert_eq!(event.kind, ProgressKind::Seeked);
    }

    #[test]
    fn test_missing_duration_is_zero() {
        let event = progress(json!({"type": "progressUpdate", "currentTime": 12, "id": 1}));
        assert_eq!(event.duration, 0.0);
    }

    #[test]
    fn test_non_progress_events_are_other() {
        let msg = json!({"type": "PLAYER_EVENT", "data": {"event": "pause", "currentTime": 5, "id": 1}});
        assert_eq!(
            parse_player_message(&msg).unwrap(),
            PlayerMessage::Other("pause".to_string())
        );

        let msg = json!({"type": "ready"});
        assert_eq!(
            parse_player_message(&msg).unwrap(),
            PlayerMessage::Other("ready".to_string())
        );
    }

    #[test]
    fn test_malformed_messages_are_errors() {
        assert_eq!(
            parse_player_message(&Value::String("{oops".to_string())),
            Err(MessageError::NotJson)
        );
        assert_eq!(
            parse_player_message(&json!({"currentTime": 5})),
            Err(MessageError::UnrecognizedShape)
        );
        assert_eq!(
            parse_player_message(&json!({"type": "PLAYER_EVENT"})),
            Err(MessageError::UnrecognizedShape)
        );
        assert_eq!(
            parse_player_message(&json!({"type": "progressUpdate", "currentTime": 5})),
            Err(MessageError::MissingContentId)
        );
        assert_eq!(
            parse_player_message(&json!({"type": "progressUpdate", "currentTime": -1, "id": 1})),
            Err(MessageError::InvalidCurrentTime)
        );
        assert_eq!(
            parse_player_message(&json!({"type": "progressUpdate", "currentTime": "10", "id": 1})),
            Err(MessageError::InvalidCurrentTime)
        );
    }

    #[test]
    fn test_session_fallback_only_for_matching_id() {
        let event = progress(json!({"type": "progressUpdate", "currentTime": 30, "id": 1399}));
        let session = ContentRef::series(1399u64, Some(2), Some(5));
        let other = ContentRef::series(1u64, Some(2), Some(5));

        assert_eq!(event.content_ref(Some(&session)), session);
        assert_eq!(event.content_ref(Some(&other)).key().as_str(), "movie-1399");
        assert_eq!(event.content_ref(None).key().as_str(), "movie-1399");
    }

    #[test]
    fn test_session_fallback_keeps_episode_from_message() {
        let session = ContentRef::series(1399u64, Some(1), Some(1));
        let next = progress(json!({
            "type": "progressUpdate", "currentTime": 30, "id": 1399, "season": 1, "episode": 2
        }));
        assert_eq!(next.content_ref(Some(&session)).key().as_str(), "series-1399-s1e2");

        let episode_only = progress(json!({
            "type": "progressUpdate", "currentTime": 30, "id": 1399, "episode": 4
        }));
        assert_eq!(
            episode_only.content_ref(Some(&session)).key().as_str(),
            "series-1399-s1e4"
        );

        let movie_session = ContentRef::movie(1399u64);
        assert_eq!(
            next.content_ref(Some(&movie_session)).key().as_str(),
            "movie-1399"
        );
    }

    #[test]
    fn test_season_without_media_type_implies_series() {
        let event = progress(json!({"type": "progressUpdate", "currentTime": 30, "id": 7, "season": "2"}));
        assert_eq!(event.content_ref(None).key().as_str(), "series-7-s2e1");
    }
}
