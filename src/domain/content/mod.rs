//! Content identity.
//!
//! A `ContentRef` names one watchable unit: a movie, or one episode of a
//! series. Every progress record and ledger entry is keyed by the
//! `ContentKey` derived from it.

pub mod entity;
pub mod invariants;

pub use entity::{ContentId, ContentKey, ContentRef, MediaType};
pub use invariants::validate_content_ref;
