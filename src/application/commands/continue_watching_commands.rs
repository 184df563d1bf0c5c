// src/application/commands/continue_watching_commands.rs

use crate::application::dto::ContinueWatchingCardDto;
use crate::application::state::AppState;
use crate::domain::ContentKey;

pub fn list_continue_watching(state: &AppState) -> Vec<ContinueWatchingCardDto> {
    state
        .continue_watching_service
        .list()
        .into_iter()
        .map(ContinueWatchingCardDto::from)
        .collect()
}

/// "Remove from continue watching": also forgets the saved position.
pub fn remove_from_continue_watching(state: &AppState, content_key: &ContentKey) {
    state.progress_tracker.forget(content_key);
}

pub fn get_hero_muted(state: &AppState) -> bool {
    state.preferences_service.hero_muted()
}

pub fn set_hero_muted(state: &AppState, muted: bool) {
    state.preferences_service.set_hero_muted(muted);
}
