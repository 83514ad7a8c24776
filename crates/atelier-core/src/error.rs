//! Error types for the tracker library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all tracker operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Order not found for the given ID
    #[error("Order with ID {id} not found")]
    OrderNotFound { id: u64 },
    /// Order item not found for the given ID
    #[error("Item with ID {id} not found")]
    ItemNotFound { id: u64 },
    /// Service catalog entry not found for the given ID
    #[error("Service with ID {id} not found")]
    ServiceNotFound { id: u64 },
    /// An earlier service of the same order is still in flight
    #[error("Service '{service}' must be completed before this item can move")]
    SequenceBlocked { service: String },
    /// Backward stage move attempted without an operator reason
    #[error("A reason is required to move an item back to an earlier stage")]
    ReasonRequired,
    /// Terminal cancel drop attempted without operator confirmation
    #[error("Restarting a workflow via cancel requires confirmation")]
    ConfirmationRequired,
    /// Workflow id not present in the registry and not synthesizable
    #[error("Workflow '{id}' not found")]
    WorkflowNotFound { id: String },
    /// Workflow exists but carries no stages
    #[error("Workflow '{id}' has no stages configured")]
    NoStagesConfigured { id: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> TrackerError {
        TrackerError::Database {
            message: self.message,
            source,
        }
    }
}

impl TrackerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a new database error with additional context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::database(message).with_source(source)
    }

    /// Creates an input validation error for a field.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        TrackerError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True when the error is a synchronous validation rejection that left
    /// no state mutated (the caller may re-prompt and retry).
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TrackerError::SequenceBlocked { .. }
                | TrackerError::ReasonRequired
                | TrackerError::ConfirmationRequired
                | TrackerError::InvalidInput { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TrackerError::database(message).with_source(e))
    }
}

/// Specialized extension trait for configuration-related Results.
pub trait ConfigResultExt<T> {
    /// Map configuration errors with a message.
    fn config_context(self, message: &str) -> Result<T>;
}

impl<T, E> ConfigResultExt<T> for std::result::Result<T, E>
where
    E: std::fmt::Display,
{
    fn config_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TrackerError::Configuration {
            message: format!("{message}: {e}"),
        })
    }
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;
