//! Error types for the ScholarNet engine
//!
//! Provides a comprehensive error handling system with:
//! - Distinct error types for different failure modes
//! - Error codes for caller handling
//! - A retryability predicate for transient failures

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    MissingField,
    InvalidFormat,

    // Resource errors (4xxx)
    AuthorNotFound,
    ProjectNotFound,

    // Analysis errors (5xxx)
    AnalysisTimeout,
    AnalysisInProgress,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Validation (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::MissingField => 1002,
            ErrorCode::InvalidFormat => 1003,

            // Resources (4xxx)
            ErrorCode::AuthorNotFound => 4001,
            ErrorCode::ProjectNotFound => 4002,

            // Analysis (5xxx)
            ErrorCode::AnalysisTimeout => 5001,
            ErrorCode::AnalysisInProgress => 5002,

            // Internal (9xxx)
            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Required field missing: {field}")]
    MissingField { field: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    // Resource errors
    #[error("Author not found: {id}")]
    AuthorNotFound { id: String },

    #[error("Project not found: {id}")]
    ProjectNotFound { id: String },

    // Analysis errors
    #[error("Analysis exceeded deadline of {timeout_ms}ms")]
    AnalysisTimeout { timeout_ms: u64 },

    #[error("Analysis already in progress for project {project_id}")]
    AnalysisInProgress { project_id: String },

    // Internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::MissingField { .. } => ErrorCode::MissingField,
            AppError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            AppError::AuthorNotFound { .. } => ErrorCode::AuthorNotFound,
            AppError::ProjectNotFound { .. } => ErrorCode::ProjectNotFound,
            AppError::AnalysisTimeout { .. } => ErrorCode::AnalysisTimeout,
            AppError::AnalysisInProgress { .. } => ErrorCode::AnalysisInProgress,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Check if the caller may retry the failed operation as-is
    ///
    /// Timed-out and serialized-away runs are transient; validation and
    /// internal errors are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::AnalysisTimeout { .. } | AppError::AnalysisInProgress { .. }
        )
    }

    /// Check if this error was caused by the caller's input
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation { .. }
                | AppError::MissingField { .. }
                | AppError::InvalidFormat { .. }
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field = errors.field_errors().keys().next().map(|k| k.to_string());
        AppError::Validation {
            message: errors.to_string(),
            field,
        }
    }
}
