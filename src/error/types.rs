// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Contract violation at the call site (e.g. launching playback without a content id).
    #[error("Missing identifier: {0}")]
    MissingIdentifier(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Programmer errors are the only class allowed to surface to callers.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, AppError::MissingIdentifier(_))
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serializes_as_display_string() {
        let err = AppError::MissingIdentifier("content id".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Missing identifier: content id\"");
    }

    #[test]
    fn test_only_missing_identifier_is_contract_violation() {
        assert!(AppError::MissingIdentifier("id".to_string()).is_contract_violation());
        assert!(!AppError::Config("bad".to_string()).is_contract_violation());
        assert!(!AppError::Pool("closed".to_string()).is_contract_violation());
    }
}
