//! Error types for the prompt library
//!
//! One error enum covers storage, validation and the JSON command boundary,
//! so every failure can be rendered as a user-facing message with a stable
//! category string.

use thiserror::Error;

/// Result type alias for prompt library operations
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Main error type for the prompt library
#[derive(Debug, Error)]
pub enum LibraryError {
    /// Command not found in registry
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// Invalid command arguments
    #[error("Invalid arguments for command '{command}': {reason}")]
    InvalidArgs { command: String, reason: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// Backing store failed or is unavailable
    #[error("Storage failure: {0}")]
    StorageFailure(#[from] sqlx::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Record rejected before reaching the store
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// External text refinement failed or timed out
    #[error("Refinement failed: {0}")]
    RefineError(String),

    /// Generic error (catch-all)
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for LibraryError {
    fn from(err: anyhow::Error) -> Self {
        LibraryError::Other(err.to_string())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::Other(err)
    }
}

impl From<&str> for LibraryError {
    fn from(err: &str) -> Self {
        LibraryError::Other(err.to_string())
    }
}

impl LibraryError {
    /// Shorthand for a validation failure
    pub fn validation(reason: impl Into<String>) -> Self {
        LibraryError::ValidationError(reason.into())
    }

    /// Shorthand for a bad command argument
    pub fn invalid_args(command: &str, reason: impl Into<String>) -> Self {
        LibraryError::InvalidArgs {
            command: command.to_string(),
            reason:  reason.into(),
        }
    }

    /// Get user-friendly error message for display by a collaborator
    pub fn user_message(&self) -> String {
        match self {
            LibraryError::CommandNotFound(cmd) => {
                format!(
                    "Command '{}' not found. Call 'commands' for the available list.",
                    cmd
                )
            },
            LibraryError::InvalidArgs { command, reason } => {
                format!("Invalid arguments for '{}': {}", command, reason)
            },
            LibraryError::StorageFailure(err) => {
                format!("Could not access the prompt library: {}", err)
            },
            LibraryError::IoError(err) => {
                format!("Could not access the prompt library: {}", err)
            },
            LibraryError::ValidationError(reason) => reason.clone(),
            _ => self.to_string(),
        }
    }

    /// Get error category for logging/telemetry
    pub fn category(&self) -> &'static str {
        match self {
            LibraryError::CommandNotFound(_) => "command",
            LibraryError::InvalidArgs { .. } => "arguments",
            LibraryError::SerdeError(_) => "serialization",
            LibraryError::StorageFailure(_) => "storage",
            LibraryError::IoError(_) => "storage",
            LibraryError::ConfigError(_) => "config",
            LibraryError::ValidationError(_) => "validation",
            LibraryError::RefineError(_) => "refine",
            LibraryError::Other(_) => "other",
        }
    }
}
