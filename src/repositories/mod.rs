// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - NO cross-repository calls
// - Key strings come from StorageKeys only

pub mod continue_watching_repository;
pub mod key_value_store;
pub mod preferences_repository;
pub mod progress_repository;
pub mod storage_keys;

pub use continue_watching_repository::{ContinueWatchingRepository, KvContinueWatchingRepository};
pub use key_value_store::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use preferences_repository::{KvPreferencesRepository, PreferencesRepository};
pub use progress_repository::{KvProgressRepository, ProgressRepository};
pub use storage_keys::StorageKeys;
