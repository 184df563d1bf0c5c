// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - The boundary between the UI host and the services
// - Translates between DTOs and domain entities
// - Never holds business rules

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;
