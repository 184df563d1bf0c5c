// src/integrations/mod.rs
//
// External Integrations Module

pub mod player;

pub use player::{
    parse_player_message, DisplayOptions, EmbedUrlBuilder, MessageError, PlayerMessage,
    ProgressEvent, ProgressKind,
};
