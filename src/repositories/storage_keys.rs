// src/repositories/storage_keys.rs
//
// Persisted key layout. The only place key strings are assembled.

use crate::domain::ContentKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    namespace: String,
}

impl StorageKeys {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// `{ns}:progress:{contentKey}`
    pub fn progress(&self, key: &ContentKey) -> String {
        format!("{}:progress:{}", self.namespace, key)
    }

    /// `{ns}:continueWatching`
    pub fn continue_watching(&self) -> String {
        format!("{}:continueWatching", self.namespace)
    }

    /// `{ns}:heroMuted`
    pub fn hero_muted(&self) -> String {
        format!("{}:heroMuted", self.namespace)
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new("app")
    }
}
