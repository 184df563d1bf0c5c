// src/application/commands/player_commands.rs

use serde_json::Value;

use crate::application::state::AppState;
use crate::services::MessageOutcome;

/// Entry point for messages posted by the player frame.
pub fn receive_player_message(state: &AppState, origin: &str, payload: &Value) -> MessageOutcome {
    state.player_receiver.handle_message(origin, payload)
}

/// Teardown: write every pending position now.
pub fn flush_progress(state: &AppState) {
    state.progress_tracker.flush();
}
