//! Error types for port operations.

/// Store operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    /// Serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A stored row exists but can no longer be read back.
    #[error("Corrupt record {id}: {message}")]
    Corrupt { id: String, message: String },
}

impl RepoError {
    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Serialization error.
    pub fn serialization(message: impl ToString) -> Self {
        Self::Serialization(message.to_string())
    }

    pub fn corrupt(id: impl ToString, message: impl ToString) -> Self {
        Self::Corrupt {
            id: id.to_string(),
            message: message.to_string(),
        }
    }
}

/// Text generation failures. Callers degrade these to fallback text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextGenError {
    #[error("No API key configured")]
    MissingApiKey,
    #[error("Text generation request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
