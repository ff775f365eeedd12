//! Error types for the opbook library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::PlanId;

/// Comprehensive error type for all plan operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Store failures that do not originate from SQLite
    #[error("Storage error: {message}")]
    Storage { message: String },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: PlanId },
    /// The caller is not allowed to touch the plan
    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },
    /// An embedded action violates the plan structure rules
    #[error("Invalid action #{index}: {reason}")]
    InvalidAction { index: usize, reason: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// The raw payload is not a well-formed plan
    #[error("Failed to parse plan: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse classification of [`PlannerError`] for callers that only need to
/// know which family a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed plan content or search input
    Validation,
    /// Referenced plan does not exist
    NotFound,
    /// Ownership violation
    Forbidden,
    /// Malformed input payload
    Parse,
    /// The underlying store failed
    Persistence,
    /// Local setup problems (paths, runtime)
    Configuration,
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
    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        PlannerError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates an action validation error.
    pub fn invalid_action(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidAction {
            index,
            reason: reason.into(),
        }
    }

    /// Creates an ownership violation error.
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden {
            reason: reason.into(),
        }
    }

    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAction { .. } | Self::InvalidInput { .. } => ErrorKind::Validation,
            Self::PlanNotFound { .. } => ErrorKind::NotFound,
            Self::Forbidden { .. } => ErrorKind::Forbidden,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Database { .. } | Self::Storage { .. } => ErrorKind::Persistence,
            Self::FileSystem { .. } | Self::XdgDirectory(_) | Self::Configuration { .. } => {
                ErrorKind::Configuration
            }
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::database(message).with_source(e))
    }
}

/// Result type alias for plan operations
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups_variants() {
        assert_eq!(
            PlannerError::invalid_action(0, "skill usage required").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            PlannerError::invalid_input("orderBy")
                .with_reason("unknown sort field")
                .kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            PlannerError::PlanNotFound {
                id: PlanId::from("abc")
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            PlannerError::forbidden("cannot modify another user's plan").kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(
            PlannerError::database("boom")
                .with_source(rusqlite::Error::QueryReturnedNoRows)
                .kind(),
            ErrorKind::Persistence
        );
    }

    #[test]
    fn test_messages_are_human_readable() {
        let err = PlannerError::invalid_action(2, "invalid location format");
        assert_eq!(err.to_string(), "Invalid action #2: invalid location format");

        let err = PlannerError::forbidden("cannot delete another user's plan");
        assert_eq!(err.to_string(), "Forbidden: cannot delete another user's plan");
    }

    #[test]
    fn test_parse_error_from_serde() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PlannerError = source.into();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
