// models/src/errors.rs

use std::io;
pub use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrialError {
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
    #[error("Invalid data provided: {0}")]
    InvalidData(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Transaction error: {0}")]
    TransactionError(String),
    #[error("patient with identifier {0} was not found")]
    NotFound(String),
    #[error("duplicate patient identifier {0}")]
    DuplicatePatientId(String),
    #[error("unsupported record schema version {found}, expected {expected}")]
    UnsupportedSchemaVersion { found: u32, expected: u32 },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[cfg(feature = "sled-errors")]
    #[error(transparent)]
    Sled(#[from] sled::Error),
}

impl From<serde_json::Error> for TrialError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            TrialError::DeserializationError(format!("JSON processing error: {}", err))
        } else {
            TrialError::SerializationError(format!("JSON processing error: {}", err))
        }
    }
}

/// A validation error.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A value outside the enumerated domain of a record field.
    #[error("'{value}' is not a valid {field}")]
    InvalidEnumValue { field: &'static str, value: String },
    /// A patient identifier is empty or too long.
    #[error("patient identifier has invalid length")]
    InvalidIdentifierLength,
    /// A patient identifier contains whitespace or control characters.
    #[error("patient identifier '{0}' is invalid")]
    InvalidIdentifier(String),
}

/// A type alias for a `Result` that returns a `TrialError` on failure.
pub type TrialResult<T> = Result<T, TrialError>;

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;
