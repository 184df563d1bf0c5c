// src/application/commands/playback_commands.rs

use crate::application::dto::{PlaybackViewDto, PlayerViewDto, ResumePromptDto};
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::{ContentRef, MediaMeta};
use crate::services::{PlaybackPhase, PlaybackRequest};

pub fn open_playback(
    state: &AppState,
    content: ContentRef,
    meta: MediaMeta,
    start_at: Option<f64>,
) -> Result<PlaybackViewDto, ErrorResponse> {
    let mut request = PlaybackRequest::new(content).with_meta(meta);
    if let Some(offset) = start_at {
        request = request.starting_at(offset);
    }

    state.playback_service.open(request)?;
    Ok(current_view(state))
}

pub fn continue_from_saved(state: &AppState) -> Result<PlaybackViewDto, ErrorResponse> {
    state.playback_service.resume_continue()?;
    Ok(current_view(state))
}

pub fn start_over(state: &AppState) -> Result<PlaybackViewDto, ErrorResponse> {
    state.playback_service.resume_restart()?;
    Ok(current_view(state))
}

pub fn set_player_visible(state: &AppState, visible: bool) -> Result<PlaybackPhase, ErrorResponse> {
    let phase = if visible {
        state.playback_service.resume_view()?
    } else {
        state.playback_service.pause_view()?
    };
    Ok(phase)
}

pub fn close_playback(state: &AppState) -> Result<(), ErrorResponse> {
    state.playback_service.close()?;
    Ok(())
}

fn current_view(state: &AppState) -> PlaybackViewDto {
    let prompt = state
        .playback_service
        .pending_prompt()
        .and_then(|(content, meta, decision)| {
            ResumePromptDto::from_decision(&content, &meta, &decision)
        });
    let player = state.playback_service.mounted().map(PlayerViewDto::from);
    PlaybackViewDto { prompt, player }
}
