// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between UI and Services
// - Commands accept plain values, return DTOs
// - Commands handle error conversion for the UI
// - Commands NEVER contain business logic

pub mod continue_watching_commands;
pub mod playback_commands;
pub mod player_commands;

pub use continue_watching_commands::*;
pub use playback_commands::*;
pub use player_commands::*;
