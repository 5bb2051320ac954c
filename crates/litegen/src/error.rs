//! Error types for litegen

use rusqlite::ErrorCode;
use rusqlite::ffi;
use thiserror::Error;

/// Result type alias for litegen operations
pub type LiteResult<T> = Result<T, LiteError>;

/// Error types for statement generation and execution
#[derive(Debug, Error)]
pub enum LiteError {
    /// The database handle was closed or never opened
    #[error("Not connected: {0}")]
    NotConnected(String),

    /// Opening the database file failed
    #[error("Open error for '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },

    /// Statement preparation or execution error
    #[error("Query error: {0}")]
    Query(#[from] rusqlite::Error),

    /// Unique / primary key constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check / not-null constraint violation
    #[error("Check constraint violation: {0}")]
    CheckViolation(String),

    /// Database busy or locked by another handle
    #[error("Database busy: {0}")]
    Busy(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Malformed builder input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A flat name/value sequence had an odd number of elements
    #[error("Odd argument count: expected name/value pairs, got {0} elements")]
    OddArguments(usize),

    /// A column type tag outside the supported set
    #[error("Unknown column type: '{0}'")]
    UnknownColumnType(String),

    /// A comparison operator outside the supported set
    #[error("Unknown operator: '{0}'")]
    UnknownOperator(String),

    /// A table or column name that is not a plain SQL identifier
    #[error("Invalid identifier: {0}")]
    InvalidIdent(String),

    /// Configuration loading error
    #[error("Config error: {0}")]
    Config(String),

    /// Default path resolution is not available on this platform
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(&'static str),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LiteError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is a unique violation error
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation(_))
    }

    /// Check if the input was rejected before reaching the database
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::OddArguments(_)
                | Self::UnknownColumnType(_)
                | Self::UnknownOperator(_)
                | Self::InvalidIdent(_)
        )
    }

    /// Parse a rusqlite error into a more specific LiteError
    pub fn from_sqlite_error(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(ref failure, ref message) = err {
            let message = message.clone().unwrap_or_else(|| failure.to_string());

            match failure.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return Self::UniqueViolation(message);
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return Self::ForeignKeyViolation(message),
                ffi::SQLITE_CONSTRAINT_CHECK | ffi::SQLITE_CONSTRAINT_NOTNULL => {
                    return Self::CheckViolation(message);
                }
                _ => {}
            }

            if matches!(
                failure.code,
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked
            ) {
                return Self::Busy(message);
            }
        }
        Self::Query(err)
    }
}

impl From<toml::de::Error> for LiteError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
