//! Application error types

use serde::Serialize;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Keychain error: {0}")]
    Keychain(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Duplicate-add conflicts are informational, not failures: the symbol is
    /// already in the watchlist, which is the desired end state.
    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }

    /// Authentication expiry requires a fresh login, never an automatic retry.
    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Auth(_))
    }
}

/// Serializable error response for the UI layer
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(err: AppError) -> Self {
        let code = match &err {
            AppError::Http(_) => "HTTP_ERROR",
            AppError::Api { .. } => "API_ERROR",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Auth(_) => "AUTH_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Keychain(_) => "KEYCHAIN_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        };

        ErrorResponse {
            code: code.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_is_classified_as_recoverable() {
        let err = AppError::Conflict("already in watchlist".to_string());
        assert!(err.is_conflict());
        assert!(!err.is_auth());
    }

    #[test]
    fn error_response_carries_code_and_message() {
        let response =
            ErrorResponse::from(AppError::Validation("display_name is empty".to_string()));
        assert_eq!(response.code, "VALIDATION_ERROR");
        assert!(response.message.contains("display_name"));
    }
}
