// src/repositories/continue_watching_repository.rs
//
// Continue-watching list persistence
//
// CRITICAL RULES:
// - The list is stored as ONE JSON array and written as one unit
// - Ordering and capacity are decided by the caller

use std::sync::Arc;

use log::debug;
use serde_json::Value;

use crate::domain::ContinueWatchingEntry;
use crate::error::{AppError, AppResult};
use crate::repositories::key_value_store::KeyValueStore;
use crate::repositories::storage_keys::StorageKeys;

#[cfg_attr(test, mockall::automock)]
pub trait ContinueWatchingRepository: Send + Sync {
    /// Stored list in stored order. Absent key reads as empty.
    fn load(&self) -> AppResult<Vec<ContinueWatchingEntry>>;
    fn save(&self, entries: &[ContinueWatchingEntry]) -> AppResult<()>;
}

pub struct KvContinueWatchingRepository {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl KvContinueWatchingRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }
}

impl ContinueWatchingRepository for KvContinueWatchingRepository {
    fn load(&self) -> AppResult<Vec<ContinueWatchingEntry>> {
        let Some(raw) = self.store.get(&self.keys.continue_watching())? else {
            return Ok(Vec::new());
        };

        let items = match serde_json::from_str::<Value>(&raw)? {
            Value::Array(items) => items,
            other => {
                return Err(AppError::Other(format!(
                    "continue-watching list is not an array (found {})",
                    json_kind(&other)
                )))
            }
        };

        let mut entries = Vec::with_capacity(items.len());
        for (idx, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<ContinueWatchingEntry>(item) {
                Ok(entry) => entries.push(entry),
                Err(e) => debug!("Skipping continue-watching item {}: {}", idx, e),
            }
        }
        Ok(entries)
    }

    fn save(&self, entries: &[ContinueWatchingEntry]) -> AppResult<()> {
        let raw = serde_json::to_string(entries)?;
        self.store.set(&self.keys.continue_watching(), &raw)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
