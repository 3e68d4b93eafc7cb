//! Error types for symbin.
//!
//! Every failure in the primitive layer and in both engines is reported as an
//! [`Error`]. No operation retries; a failure aborts the current top-level
//! serialize/deserialize call and propagates to the caller.
//!
//! Malformed booleans are deliberately absent: they are diagnostic only and
//! are reported through the logger sink and `tracing`, not as errors.

use thiserror::Error;

/// All symbin errors.
#[derive(Debug, Error)]
pub enum Error {
    /// The stream ran out before the required number of bytes was available.
    #[error("unexpected end of stream at 0x{offset:08X}: needed {needed} bytes, got {available}")]
    EndOfStream {
        /// Byte offset at which the read started
        offset: u64,
        /// Number of bytes the read required
        needed: usize,
        /// Number of bytes that were actually available
        available: usize,
    },

    /// I/O error other than running out of data
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The value's (write) or requested (read) shape has no wire encoding
    #[error("unsupported type: {type_name}")]
    UnsupportedType {
        /// Name of the offending type
        type_name: String,
    },

    /// An enum discriminant was read that maps to no variant
    #[error("invalid discriminant {value} for {type_name}")]
    InvalidEnum {
        /// Name of the enum type
        type_name: &'static str,
        /// Rendered underlying value
        value: String,
    },

    /// An array holds fewer elements than the length it is written with
    #[error("array {name} has {actual} elements, expected at least {expected}")]
    LengthMismatch {
        /// Diagnostic name of the array
        name: String,
        /// Length requested by the schema
        expected: usize,
        /// Number of elements actually present
        actual: usize,
    },

    /// A serialized length cannot be used as an element count
    #[error("invalid length: {value}")]
    InvalidLength {
        /// Rendered length value
        value: String,
    },

    /// `end_checksum` was called with no active checksum calculator
    #[error("no checksum calculation is active")]
    ChecksumNotActive,

    /// `end_checksum` was called with a different calculator type than the active one
    #[error("active checksum calculator is not a {expected}")]
    ChecksumTypeMismatch {
        /// Type that the caller asked for
        expected: &'static str,
    },
}

/// Result type for symbin operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an unsupported type error for `T`.
    pub fn unsupported<T: ?Sized>() -> Self {
        Error::UnsupportedType {
            type_name: std::any::type_name::<T>().to_string(),
        }
    }

    /// Create an unsupported type error from a type name.
    pub fn unsupported_named(type_name: impl Into<String>) -> Self {
        Error::UnsupportedType {
            type_name: type_name.into(),
        }
    }

    /// Check if the stream ran out of data.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Error::EndOfStream { .. })
    }

    /// Check if this is an unsupported type error.
    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, Error::UnsupportedType { .. })
    }

    /// Check if this error was caused by the caller misusing the API
    /// rather than by the stream contents.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedType { .. }
                | Error::LengthMismatch { .. }
                | Error::ChecksumNotActive
                | Error::ChecksumTypeMismatch { .. }
        )
    }
}
