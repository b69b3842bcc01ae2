//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Failed to encode a value.
    #[error("encoding failed: {message}")]
    EncodingFailed {
        /// Description of the encoding error.
        message: String,
    },

    /// Input did not start with the expected magic bytes.
    #[error("bad magic: expected {expected:?}, found {found:?}")]
    BadMagic {
        /// The magic the format requires.
        expected: [u8; 4],
        /// The bytes actually present.
        found: [u8; 4],
    },

    /// Format version in the header is not supported.
    #[error("unsupported format version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version found in the header.
        found: u16,
        /// Version this build understands.
        supported: u16,
    },

    /// The byte-order marker in the header is not a known value.
    #[error("unknown byte-order marker {found:#04x}")]
    UnknownEndianMarker {
        /// The marker byte actually present.
        found: u8,
    },

    /// A node carried a tag this format does not define.
    #[error("unknown node tag {tag:#04x}")]
    UnknownTag {
        /// The tag byte actually present.
        tag: u8,
    },

    /// Invalid UTF-8 string.
    #[error("invalid UTF-8 string")]
    InvalidUtf8,

    /// Unexpected end of input.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A claimed length exceeds the decoder's allocation ceiling.
    #[error("size limit exceeded: claimed {claimed}, max allowed {max_allowed}")]
    SizeLimitExceeded {
        /// The length the input claimed.
        claimed: u64,
        /// The maximum the decoder accepts.
        max_allowed: u64,
    },

    /// Structurally invalid input.
    #[error("invalid structure: {message}")]
    InvalidStructure {
        /// Description of the structural error.
        message: String,
    },

    /// Input had bytes left over after the root value was decoded.
    #[error("trailing bytes after document: {remaining} left over")]
    TrailingBytes {
        /// Number of undecoded bytes.
        remaining: usize,
    },
}

impl CodecError {
    /// Create an encoding failed error.
    pub fn encoding_failed(message: impl Into<String>) -> Self {
        Self::EncodingFailed {
            message: message.into(),
        }
    }

    /// Create an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}
