// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod continue_watching_service;
pub mod playback_service;
pub mod preferences_service;
pub mod progress_receiver;
pub mod progress_tracker;
pub mod resume_service;


pub use continue_watching_service::ContinueWatchingService;

pub use playback_service::{MountedPlayer, PlaybackPhase, PlaybackRequest, PlaybackService};

pub use preferences_service::PreferencesService;

pub use progress_receiver::{ActiveSession, MessageOutcome, PlayerMessageReceiver};

pub use progress_tracker::{ProgressTracker, RecordOutcome};

pub use resume_service::ResumeService;
