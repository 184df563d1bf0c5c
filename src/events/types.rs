// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ContentKey;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
}

// ============================================================================
// PROGRESS EVENTS
// ============================================================================

/// Emitted after a debounced progress write reached storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressPersisted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub content_key: ContentKey,
    pub current_time: f64,
    pub progress: f64,
}

impl ProgressPersisted {
    pub fn new(content_key: ContentKey, current_time: f64, progress: f64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            content_key,
            current_time,
            progress,
        }
    }
}

domain_event!(ProgressPersisted);

/// Emitted when the user explicitly drops saved progress for a key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressForgotten {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub content_key: ContentKey,
}

impl ProgressForgotten {
    pub fn new(content_key: ContentKey) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            content_key,
        }
    }
}

domain_event!(ProgressForgotten);

// ============================================================================
// CONTINUE WATCHING EVENTS
// ============================================================================

/// Refresh signal for anything rendering the continue-watching row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinueWatchingUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub entry_count: usize,
}

impl ContinueWatchingUpdated {
    pub fn new(entry_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            entry_count,
        }
    }
}

domain_event!(ContinueWatchingUpdated);

// ============================================================================
// PLAYBACK EVENTS
// ============================================================================

/// Emitted when the player surface is mounted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackStarted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub content_key: ContentKey,
    pub offset_seconds: u64,
}

impl PlaybackStarted {
    pub fn new(content_key: ContentKey, offset_seconds: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            content_key,
            offset_seconds,
        }
    }
}

domain_event!(PlaybackStarted);

/// Emitted when the playback view is dismissed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackClosed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub content_key: ContentKey,
}

impl PlaybackClosed {
    pub fn new(content_key: ContentKey) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            content_key,
        }
    }
}

domain_event!(PlaybackClosed);

/// Emitted for every dropped player message (debug/diagnostics only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMessageRejected {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub reason: String,
}

impl PlayerMessageRejected {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            reason: reason.into(),
        }
    }
}

domain_event!(PlayerMessageRejected);
