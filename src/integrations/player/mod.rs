// src/integrations/player/mod.rs
//
// Third-party embeddable player: inbound messages and outbound embed URLs.

pub mod embed;
pub mod messages;

pub use embed::{DisplayOptions, EmbedUrlBuilder};
pub use messages::{parse_player_message, MessageError, PlayerMessage, ProgressEvent, ProgressKind};
