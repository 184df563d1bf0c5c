// src/application/state.rs
//
// Application state: every service, wired once.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::events::EventBus;
use crate::integrations::player::EmbedUrlBuilder;
use crate::repositories::{
    ContinueWatchingRepository, KeyValueStore, KvContinueWatchingRepository,
    KvPreferencesRepository, KvProgressRepository, PreferencesRepository, ProgressRepository,
    StorageKeys,
};
use crate::services::{
    ActiveSession, ContinueWatchingService, PlaybackService, PlayerMessageReceiver,
    PreferencesService, ProgressTracker, ResumeService,
};

/// All fields are Arc-wrapped (or cheap clones) for sharing across callers.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub progress_tracker: ProgressTracker,
    pub continue_watching_service: Arc<ContinueWatchingService>,
    pub resume_service: Arc<ResumeService>,
    pub player_receiver: Arc<PlayerMessageReceiver>,
    pub playback_service: Arc<PlaybackService>,
    pub preferences_service: Arc<PreferencesService>,
}

impl AppState {
    /// Wires repositories and services over `store`.
    pub fn build(config: &AppConfig, store: Arc<dyn KeyValueStore>) -> AppResult<Self> {
        // 1. INFRASTRUCTURE
        let event_bus = Arc::new(EventBus::new());
        let keys = StorageKeys::new(config.storage.namespace.clone());
        let embed = EmbedUrlBuilder::new(&config.player.embed_base_url)?;

        // 2. REPOSITORIES
        let progress_repo: Arc<dyn ProgressRepository> =
            Arc::new(KvProgressRepository::new(store.clone(), keys.clone()));
        let continue_watching_repo: Arc<dyn ContinueWatchingRepository> =
            Arc::new(KvContinueWatchingRepository::new(store.clone(), keys.clone()));
        let preferences_repo: Arc<dyn PreferencesRepository> =
            Arc::new(KvPreferencesRepository::new(store, keys));

        // 3. SERVICES
        let continue_watching_service = Arc::new(ContinueWatchingService::new(
            continue_watching_repo,
            event_bus.clone(),
            config.tracker.ledger_capacity,
        ));
        let progress_tracker = ProgressTracker::new(
            progress_repo.clone(),
            continue_watching_service.clone(),
            event_bus.clone(),
            config.tracker.clone(),
        );
        let resume_service = Arc::new(ResumeService::new(
            progress_repo,
            config.tracker.thresholds(),
        ));
        let session = ActiveSession::new();
        let player_receiver = Arc::new(PlayerMessageReceiver::new(
            config.player.trusted_origin.clone(),
            progress_tracker.clone(),
            session.clone(),
            event_bus.clone(),
        ));
        let playback_service = Arc::new(PlaybackService::new(
            resume_service.clone(),
            progress_tracker.clone(),
            session,
            embed,
            event_bus.clone(),
        ));
        let preferences_service = Arc::new(PreferencesService::new(preferences_repo));

        // 4. EVENT HANDLER REGISTRATION (WIRING)
        continue_watching_service.register_event_handlers();

        Ok(Self {
            event_bus,
            progress_tracker,
            continue_watching_service,
            resume_service,
            player_receiver,
            playback_service,
            preferences_service,
        })
    }
}
