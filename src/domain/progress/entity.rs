use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::content::{ContentKey, ContentRef};

/// Percent watched, clamped to [0, 100].
/// Unknown duration (0 or garbage) yields 0.
pub fn progress_percent(current_time: f64, duration: f64) -> f64 {
    let current_time = sanitize_seconds(current_time);
    let duration = sanitize_seconds(duration);
    if duration > 0.0 {
        (current_time / duration * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn sanitize_seconds(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw
    } else {
        0.0
    }
}

/// Persisted playback position for one ContentKey.
///
/// Overwritten on every significant update; never appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub content: ContentRef,

    /// Seconds into the media
    pub current_time: f64,

    /// Total length in seconds, 0 when unknown
    pub duration: f64,

    /// Derived percent, kept on disk for cheap ledger/resume reads
    pub progress: f64,

    pub last_updated_at: DateTime<Utc>,
}

impl ProgressRecord {
    pub fn new(content: ContentRef, current_time: f64, duration: f64, at: DateTime<Utc>) -> Self {
        let current_time = sanitize_seconds(current_time);
        let duration = sanitize_seconds(duration);
        Self {
            content,
            current_time,
            duration,
            progress: progress_percent(current_time, duration),
            last_updated_at: at,
        }
    }

    pub fn key(&self) -> ContentKey {
        self.content.key()
    }
}

/// Percentage/duration cut-offs shared by the ledger and the resume prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchThresholds {
    /// At or below this percent the item counts as unwatched
    pub started_percent: f64,
    /// At or above this percent the item counts as finished
    pub finished_percent: f64,
    /// Media this short (seconds) is never offered for resume
    pub resume_min_duration: f64,
}

impl Default for WatchThresholds {
    fn default() -> Self {
        Self {
            started_percent: 1.0,
            finished_percent: 95.0,
            resume_min_duration: 10.0,
        }
    }
}

impl WatchThresholds {
    /// 1% < percent < 95%
    pub fn is_in_progress(&self, percent: f64) -> bool {
        percent > self.started_percent && percent < self.finished_percent
    }

    pub fn is_finished(&self, percent: f64) -> bool {
        percent >= self.finished_percent
    }
}
