// src/services/playback_service.rs
//
// Playback Service - the player surface state machine
//
//   closed ──open──> resume_prompt ──continue/restart──> playing ──close──> closed
//   closed ──open──────────────────────────────────────> playing
//   playing <──pause_view / resume_view──> paused_view
//
// CRITICAL RULES:
// - Never writes progress (the tracker does, from player messages)
// - Closing does NOT cancel pending progress writes
// - Restart does NOT clear saved progress
// - Events are emitted after the state lock is released

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::info;
use url::Url;

use crate::domain::{ContentRef, DomainError, MediaMeta, ResumeDecision};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, PlaybackClosed, PlaybackStarted};
use crate::integrations::player::{DisplayOptions, EmbedUrlBuilder};
use crate::services::progress_receiver::ActiveSession;
use crate::services::progress_tracker::ProgressTracker;
use crate::services::resume_service::ResumeService;

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackRequest {
    pub content: ContentRef,
    pub meta: MediaMeta,
    pub display: DisplayOptions,
    /// Explicit start offset; skips the resume prompt
    pub start_at: Option<f64>,
}

impl PlaybackRequest {
    pub fn new(content: ContentRef) -> Self {
        Self {
            content,
            meta: MediaMeta::default(),
            display: DisplayOptions::for_launch(),
            start_at: None,
        }
    }

    pub fn with_meta(mut self, meta: MediaMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn starting_at(mut self, offset_seconds: f64) -> Self {
        self.start_at = Some(offset_seconds);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Closed,
    ResumePrompt,
    Playing,
    PausedView,
}

/// The mounted player.
#[derive(Debug, Clone, PartialEq)]
pub struct MountedPlayer {
    pub content: ContentRef,
    pub meta: MediaMeta,
    pub url: Url,
    pub offset_seconds: u64,
}

enum Surface {
    Closed,
    ResumePrompt {
        request: PlaybackRequest,
        decision: ResumeDecision,
    },
    Playing(MountedPlayer),
    PausedView(MountedPlayer),
}

impl Surface {
    fn phase(&self) -> PlaybackPhase {
        match self {
            Surface::Closed => PlaybackPhase::Closed,
            Surface::ResumePrompt { .. } => PlaybackPhase::ResumePrompt,
            Surface::Playing(_) => PlaybackPhase::Playing,
            Surface::PausedView(_) => PlaybackPhase::PausedView,
        }
    }

    fn content(&self) -> Option<&ContentRef> {
        match self {
            Surface::Closed => None,
            Surface::ResumePrompt { request, .. } => Some(&request.content),
            Surface::Playing(player) | Surface::PausedView(player) => Some(&player.content),
        }
    }
}

pub struct PlaybackService {
    resume: Arc<ResumeService>,
    tracker: ProgressTracker,
    session: ActiveSession,
    embed: EmbedUrlBuilder,
    event_bus: Arc<EventBus>,
    surface: Mutex<Surface>,
}

impl PlaybackService {
    pub fn new(
        resume: Arc<ResumeService>,
        tracker: ProgressTracker,
        session: ActiveSession,
        embed: EmbedUrlBuilder,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            resume,
            tracker,
            session,
            embed,
            event_bus,
            surface: Mutex::new(Surface::Closed),
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.surface().phase()
    }

    pub fn mounted(&self) -> Option<MountedPlayer> {
        match &*self.surface() {
            Surface::Playing(player) | Surface::PausedView(player) => Some(player.clone()),
            _ => None,
        }
    }

    /// The decision behind the prompt currently shown, with its metadata.
    pub fn pending_prompt(&self) -> Option<(ContentRef, MediaMeta, ResumeDecision)> {
        match &*self.surface() {
            Surface::ResumePrompt { request, decision } => {
                Some((request.content.clone(), request.meta.clone(), *decision))
            }
            _ => None,
        }
    }

    /// Launches playback. Opening over an open surface closes it first.
    pub fn open(&self, request: PlaybackRequest) -> AppResult<PlaybackPhase> {
        if request.content.id().is_blank() {
            return Err(AppError::MissingIdentifier(
                "content id is required to open playback".to_string(),
            ));
        }

        if self.phase() != PlaybackPhase::Closed {
            self.close()?;
        }

        let key = request.content.key();
        self.tracker.remember_metadata(key.clone(), request.meta.clone());
        self.session.set(request.content.clone());

        if let Some(offset) = request.start_at {
            return self.mount(request, offset);
        }

        let decision = self.resume.decide(&key);
        if decision.should_prompt() {
            info!("Offering resume for {}", key);
            *self.surface() = Surface::ResumePrompt { request, decision };
            return Ok(PlaybackPhase::ResumePrompt);
        }

        self.mount(request, 0.0)
    }

    /// Accepts the prompt: mounts at the saved offset.
    pub fn resume_continue(&self) -> AppResult<PlaybackPhase> {
        let (request, decision) = self.take_prompt("resume_continue")?;
        self.mount(request, decision.offset_seconds())
    }

    /// Declines the prompt: mounts at 0. Saved progress stays as is.
    pub fn resume_restart(&self) -> AppResult<PlaybackPhase> {
        let (request, _) = self.take_prompt("resume_restart")?;
        self.mount(request, 0.0)
    }

    /// The view lost visibility. No progress is written.
    pub fn pause_view(&self) -> AppResult<PlaybackPhase> {
        let mut surface = self.surface();
        match std::mem::replace(&mut *surface, Surface::Closed) {
            Surface::Playing(player) => {
                *surface = Surface::PausedView(player);
                Ok(PlaybackPhase::PausedView)
            }
            other => {
                let phase = other.phase();
                *surface = other;
                Err(invalid_transition("pause_view", phase))
            }
        }
    }

    pub fn resume_view(&self) -> AppResult<PlaybackPhase> {
        let mut surface = self.surface();
        match std::mem::replace(&mut *surface, Surface::Closed) {
            Surface::PausedView(player) => {
                *surface = Surface::Playing(player);
                Ok(PlaybackPhase::Playing)
            }
            other => {
                let phase = other.phase();
                *surface = other;
                Err(invalid_transition("resume_view", phase))
            }
        }
    }

    /// Unmounts the player. Pending progress writes keep running.
    pub fn close(&self) -> AppResult<PlaybackPhase> {
        let closed = {
            let mut surface = self.surface();
            if let Surface::Closed = &*surface {
                return Err(invalid_transition("close", PlaybackPhase::Closed));
            }
            std::mem::replace(&mut *surface, Surface::Closed)
        };

        self.session.clear();
        if let Some(content) = closed.content() {
            info!("Playback closed for {}", content.key());
            self.event_bus.emit(PlaybackClosed::new(content.key()));
        }
        Ok(PlaybackPhase::Closed)
    }

    fn take_prompt(&self, action: &str) -> AppResult<(PlaybackRequest, ResumeDecision)> {
        let mut surface = self.surface();
        match std::mem::replace(&mut *surface, Surface::Closed) {
            Surface::ResumePrompt { request, decision } => Ok((request, decision)),
            other => {
                let phase = other.phase();
                *surface = other;
                Err(invalid_transition(action, phase))
            }
        }
    }

    fn mount(&self, request: PlaybackRequest, offset_seconds: f64) -> AppResult<PlaybackPhase> {
        let url = self
            .embed
            .build(&request.content, offset_seconds, &request.display)?;
        let offset_seconds = if offset_seconds.is_finite() && offset_seconds > 0.0 {
            offset_seconds.floor() as u64
        } else {
            0
        };
        let key = request.content.key();

        *self.surface() = Surface::Playing(MountedPlayer {
            content: request.content,
            meta: request.meta,
            url,
            offset_seconds,
        });

        info!("Playback started for {} at {}s", key, offset_seconds);
        self.event_bus.emit(PlaybackStarted::new(key, offset_seconds));
        Ok(PlaybackPhase::Playing)
    }

    fn surface(&self) -> MutexGuard<'_, Surface> {
        self.surface.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn invalid_transition(action: &str, phase: PlaybackPhase) -> AppError {
    AppError::Domain(DomainError::InvalidStateTransition(format!(
        "{} is not allowed while {:?}",
        action, phase
    )))
}
