// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for UI
// - Never exposes internal implementation details
// - Logs errors for debugging

use log::error;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Caller passed something unusable (missing id)
    Validation,
    /// Action not allowed in the current state
    DomainError,
    Storage,
    Internal,
}

impl ErrorResponse {
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::MissingIdentifier(what) => {
                Self::new(ErrorType::Validation, "Missing identifier", Some(what))
            }

            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                "Action not allowed",
                Some(domain_error.to_string()),
            ),

            AppError::Database(_) | AppError::Pool(_) | AppError::Io(_) => {
                error!("Storage error: {}", error);
                Self::new(ErrorType::Storage, "Storage operation failed", None)
            }

            other => {
                error!("Internal error: {}", other);
                Self::new(ErrorType::Internal, "Internal error", None)
            }
        }
    }

    fn new(error_type: ErrorType, message: &str, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.to_string(),
            details,
        }
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}
