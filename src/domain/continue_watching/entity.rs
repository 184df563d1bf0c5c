use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::content::{ContentKey, ContentRef};
use crate::domain::progress::ProgressRecord;

/// Display metadata known when playback is launched.
/// Comes from the catalog service; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

/// User-facing row of the continue-watching ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueWatchingEntry {
    pub content: ContentRef,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    pub current_time: f64,
    pub duration: f64,
    pub progress: f64,
    pub last_updated_at: DateTime<Utc>,
}

impl ContinueWatchingEntry {
    pub fn from_record(record: &ProgressRecord, meta: &MediaMeta) -> Self {
        Self {
            content: record.content.clone(),
            title: meta.title.clone(),
            poster_path: meta.poster_path.clone(),
            backdrop_path: meta.backdrop_path.clone(),
            current_time: record.current_time,
            duration: record.duration,
            progress: record.progress,
            last_updated_at: record.last_updated_at,
        }
    }

    pub fn key(&self) -> ContentKey {
        self.content.key()
    }
}
