// src/services/progress_receiver.rs
//
// Player Message Receiver - the boundary between the player frame and the tracker
//
// CRITICAL RULES:
// - Untrusted input: wrong origin or malformed payload is dropped (debug log only)
// - Never writes storage itself; accepted reports go to the ProgressTracker
// - Every drop emits PlayerMessageRejected for diagnostics

use std::sync::{Arc, PoisonError, RwLock};

use log::debug;
use serde_json::Value;

use crate::domain::ContentRef;
use crate::events::{EventBus, PlayerMessageRejected};
use crate::integrations::player::{parse_player_message, PlayerMessage};
use crate::services::progress_tracker::{ProgressTracker, RecordOutcome};

/// What is currently mounted in the player, shared with the playback service.
#[derive(Debug, Clone, Default)]
pub struct ActiveSession {
    current: Arc<RwLock<Option<ContentRef>>>,
}

impl ActiveSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, content: ContentRef) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(content);
    }

    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn current(&self) -> Option<ContentRef> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Forwarded to the tracker
    Accepted(RecordOutcome),
    /// Valid, but not a progress report
    Ignored,
    /// Dropped; the reason is for logs only
    Rejected(String),
}

pub struct PlayerMessageReceiver {
    trusted_origin: String,
    tracker: ProgressTracker,
    session: ActiveSession,
    event_bus: Arc<EventBus>,
}

impl PlayerMessageReceiver {
    pub fn new(
        trusted_origin: impl Into<String>,
        tracker: ProgressTracker,
        session: ActiveSession,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            trusted_origin: trusted_origin.into(),
            tracker,
            session,
            event_bus,
        }
    }

    pub fn handle_message(&self, origin: &str, payload: &Value) -> MessageOutcome {
        if origin != self.trusted_origin {
            return self.reject(format!("untrusted origin {}", origin));
        }

        match parse_player_message(payload) {
            Ok(PlayerMessage::Progress(event)) => {
                let active = self.session.current();
                let content = event.content_ref(active.as_ref());
                let outcome =
                    self.tracker
                        .record_progress(&content, event.current_time, event.duration);
                MessageOutcome::Accepted(outcome)
            }
            Ok(PlayerMessage::Other(kind)) => {
                debug!("Ignoring player event {}", kind);
                MessageOutcome::Ignored
            }
            Err(e) => self.reject(e.to_string()),
        }
    }

    fn reject(&self, reason: String) -> MessageOutcome {
        debug!("Dropping player message: {}", reason);
        self.event_bus.emit(PlayerMessageRejected::new(reason.clone()));
        MessageOutcome::Rejected(reason)
    }
}
