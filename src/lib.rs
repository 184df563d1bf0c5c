// src/lib.rs
// jstream-watch - watch progress and continue-watching for an embedded player
//
// Architecture:
// - Domain-centric: content identity, progress and ledger rules live in domain
// - Event-driven: services coordinate through a synchronous event bus
// - Explicit: player messages are untrusted until normalized
// - Local-first: one single-profile key-value store, nothing leaves the machine
// - Application Layer: DTOs and command adapters for the UI host

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    decide_resume,
    format_time,
    progress_percent,
    // Content identity
    ContentId,
    ContentKey,
    ContentRef,
    // Continue watching
    ContinueWatchingEntry,
    DomainError,
    MediaMeta,
    MediaType,
    // Progress
    ProgressRecord,
    // Resume
    ResumeDecision,
    WatchThresholds,
};

// ============================================================================
// PUBLIC API - Configuration & Errors
// ============================================================================

pub use config::{AppConfig, PlayerConfig, StorageConfig, TrackerConfig};
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    ContinueWatchingUpdated,
    DomainEvent,
    EventBus,
    EventLogEntry,
    PlaybackClosed,
    PlaybackStarted,
    PlayerMessageRejected,
    ProgressForgotten,
    ProgressPersisted,
};

// ============================================================================
// PUBLIC API - Storage
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

pub use repositories::{
    ContinueWatchingRepository,
    KeyValueStore,
    MemoryKeyValueStore,
    PreferencesRepository,
    ProgressRepository,
    SqliteKeyValueStore,
    StorageKeys,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    ActiveSession,
    ContinueWatchingService,
    MessageOutcome,
    MountedPlayer,
    PlaybackPhase,
    PlaybackRequest,
    PlaybackService,
    PlayerMessageReceiver,
    PreferencesService,
    ProgressTracker,
    RecordOutcome,
    ResumeService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{DisplayOptions, EmbedUrlBuilder, PlayerMessage, ProgressEvent};
