//! Error types for advisor
//!
//! Scoring failures are deterministic conditions on the given inputs and are
//! always surfaced to the caller; nothing here is retried.

mod macros;

use std::path::Path;
use thiserror::Error;

/// Errors that can occur during advisor operations
#[derive(Error, Debug)]
pub enum AdvisorError {
    // Scoring errors
    #[error("no candidate words remain after exclusion filtering")]
    EmptyVocabulary,

    #[error("similarity score is undefined: neither article carries a comparable signal")]
    UndefinedScore,

    #[error("invalid kernel length {kernel} for text of length {text_len}")]
    InvalidKernel { kernel: usize, text_len: usize },

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Metadata errors
    #[error("article does not exist: {identifier}")]
    ArticleNotFound { identifier: String },

    #[error("malformed metadata record: {reason}")]
    MalformedRecord { reason: String },

    #[error("request to {url} failed: {reason}")]
    Http { url: String, reason: String },

    // Generic failures
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },
}

impl From<quick_xml::Error> for AdvisorError {
    fn from(err: quick_xml::Error) -> Self {
        AdvisorError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for AdvisorError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        AdvisorError::Xml(err.to_string())
    }
}

impl AdvisorError {
    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        AdvisorError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a record missing required structure
    pub fn malformed(reason: impl Into<String>) -> Self {
        AdvisorError::MalformedRecord {
            reason: reason.into(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        AdvisorError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a failed file operation on `path`
    pub fn file_operation(operation: &str, path: &Path, error: impl std::fmt::Display) -> Self {
        Self::io_operation(operation, path.display(), error)
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            AdvisorError::EmptyVocabulary => "empty_vocabulary",
            AdvisorError::UndefinedScore => "undefined_score",
            AdvisorError::InvalidKernel { .. } => "invalid_kernel",
            AdvisorError::InvalidValue { .. } => "invalid_value",
            AdvisorError::ArticleNotFound { .. } => "article_not_found",
            AdvisorError::MalformedRecord { .. } => "malformed_record",
            AdvisorError::Http { .. } => "http_error",
            AdvisorError::Toml(_) => "toml_error",
            AdvisorError::Xml(_) => "xml_error",
            AdvisorError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
        }
    }

    /// True for errors caused by the scored inputs rather than the environment
    pub fn is_scoring_error(&self) -> bool {
        matches!(
            self,
            AdvisorError::EmptyVocabulary
                | AdvisorError::UndefinedScore
                | AdvisorError::InvalidKernel { .. }
        )
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;
