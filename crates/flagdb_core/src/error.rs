//! Error types for flag database operations.

use thiserror::Error;

/// Result alias for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Errors produced while loading, reconciling, or compiling flag data.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A container or document failed to encode or decode.
    #[error("codec error: {0}")]
    Codec(#[from] flagdb_codec::CodecError),

    /// An underlying file operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A save-flag naming mode was requested on a map that cannot satisfy it.
    #[error("save flag mode {mode} is not valid on map {map}")]
    InvalidSaveFlagMode {
        /// The requested naming mode.
        mode: i32,
        /// The map the object lives on.
        map: String,
    },

    /// A map object is missing a parameter its type guarantees.
    #[error("object {object} is missing required parameter {name}")]
    MissingParameter {
        /// Identifies the offending object, usually by hash id.
        object: String,
        /// The absent parameter name.
        name: String,
    },

    /// A flag record did not match the shape its container type requires.
    #[error("malformed {flag_type} record: {message}")]
    MalformedRecord {
        /// The flag type the record was found under.
        flag_type: String,
        /// What was wrong with it.
        message: String,
    },

    /// A container member that must exist was absent.
    #[error("container member not found: {name}")]
    MissingMember {
        /// The expected member name.
        name: String,
    },

    /// A save-data container ends before its fixed trailer members.
    #[error("save data container is truncated before its trailer")]
    TruncatedSaveData,
}

impl CoreError {
    /// Creates a [`CoreError::MissingParameter`] error.
    pub fn missing_parameter(object: impl Into<String>, name: impl Into<String>) -> Self {
        Self::MissingParameter {
            object: object.into(),
            name: name.into(),
        }
    }

    /// Creates a [`CoreError::MalformedRecord`] error.
    pub fn malformed_record(flag_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            flag_type: flag_type.into(),
            message: message.into(),
        }
    }

    /// Creates a [`CoreError::MissingMember`] error.
    pub fn missing_member(name: impl Into<String>) -> Self {
        Self::MissingMember { name: name.into() }
    }
}
