//! Error types for review-core.

use thiserror::Error;

/// Result type alias using ReviewError.
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Storage operation that failed, carried inside [`ReviewError::Storage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    Save,
    Update,
    Load,
    Delete,
}

impl std::fmt::Display for StorageOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Save => "save",
            Self::Update => "update",
            Self::Load => "load",
            Self::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// Errors that can occur in the review engine.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("session error: {0}")]
    Session(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("adapter error for content type {content_type}: {message}")]
    Adapter {
        content_type: String,
        message: String,
    },

    #[error("storage error during {op}: {message}")]
    Storage { op: StorageOp, message: String },

    #[error("sync error: {0}")]
    Sync(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("timeout: {0}")]
    Timeout(String),
}

impl ReviewError {
    /// Shorthand for a storage failure on a given operation.
    pub fn storage(op: StorageOp, message: impl Into<String>) -> Self {
        Self::Storage {
            op,
            message: message.into(),
        }
    }

    /// Shorthand for an adapter failure on a given content type.
    pub fn adapter(content_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Adapter {
            content_type: content_type.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_names_operation() {
        let err = ReviewError::storage(StorageOp::Update, "connection reset");
        assert_eq!(
            err.to_string(),
            "storage error during update: connection reset"
        );
    }

    #[test]
    fn adapter_error_names_content_type() {
        let err = ReviewError::adapter("kanji", "missing character field");
        assert_eq!(
            err.to_string(),
            "adapter error for content type kanji: missing character field"
        );
    }

    #[test]
    fn session_error_display() {
        let err = ReviewError::Session("no active session".to_string());
        assert_eq!(err.to_string(), "session error: no active session");
    }
}
