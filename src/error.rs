//! Error types for vdrive.

use thiserror::Error;

/// Common error type for vdrive.
#[derive(Error, Debug)]
pub enum VdriveError {
    /// Database error.
    ///
    /// Generic wrapper for backend failures that have no more specific
    /// classification below.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection or initialization error.
    ///
    /// Raised when the backing store cannot be opened or migrated. Fatal to
    /// the session: no store operation may be attempted afterwards.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// Identifier collision on insert.
    ///
    /// Should not occur with generated ids, but is surfaced rather than
    /// silently ignored when it does.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// The underlying medium rejected a write (quota or disk exhausted).
    #[error("storage full: {0}")]
    StorageFull(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for caller-supplied input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors, classifying the write failures the caller
// must be able to tell apart.
impl From<sqlx::Error> for VdriveError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return VdriveError::DuplicateKey(db.message().to_string());
            }
            // SQLITE_FULL
            if db.code().as_deref() == Some("13") {
                return VdriveError::StorageFull(db.message().to_string());
            }
        }
        VdriveError::Database(e.to_string())
    }
}

/// Result type alias for vdrive operations.
pub type Result<T> = std::result::Result<T, VdriveError>;
