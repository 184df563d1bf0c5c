// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod content;
pub mod continue_watching;
pub mod progress;
pub mod resume;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Content identity
pub use content::{validate_content_ref, ContentId, ContentKey, ContentRef, MediaType};

// Progress
pub use progress::{progress_percent, validate_progress_record, ProgressRecord, WatchThresholds};

// Continue watching
pub use continue_watching::{
    remove_entry, upsert_entry, ContinueWatchingEntry, MediaMeta, DEFAULT_LEDGER_CAPACITY,
};

// Resume
pub use resume::{decide_resume, format_time, ResumeDecision};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Progress {0}% is outside 0..=100")]
    ProgressOutOfRange(f64),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
