//! Error types for JSOBS serialization and deserialization.
//!
//! Every failure the codec can hit is a distinct variant of [`Error`], so callers
//! can tell a truncated buffer from a corrupted header from a value that the
//! format cannot carry. Nothing is ever downgraded to a default value.
//!
//! ## Error Categories
//!
//! - **Encode boundary**: [`Error::UnsupportedType`], [`Error::SizeMismatch`]
//! - **Buffer access**: [`Error::OutOfRange`], [`Error::LengthOverflow`]
//! - **Frame decoding**: [`Error::UnknownTypeTag`], [`Error::InvalidWidth`],
//!   [`Error::InvalidEncoding`], [`Error::InvalidKey`], [`Error::DuplicateKey`],
//!   [`Error::TrailingBytes`]
//! - **Resource guard**: [`Error::DepthExceeded`]
//!
//! ## Examples
//!
//! ```rust
//! use serde_jsobs::{deserialize, Error};
//!
//! // Header says "Sequence of 5", but only one element follows.
//! let truncated = [0x20, 0x05, 0xF0, 0x00];
//! match deserialize(&truncated) {
//!     Err(Error::OutOfRange { .. }) => {}
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use crate::frame::Tag;
use std::fmt;
use std::string::FromUtf8Error;
use thiserror::Error;

/// Represents all possible errors that can occur during JSOBS serialization/deserialization.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input contains something the format has no frame for.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// The encoder wrote a different number of bytes than the size pass predicted.
    #[error("Size mismatch: estimated {expected} bytes, encoder wrote {written}")]
    SizeMismatch { expected: usize, written: usize },

    /// A cursor read or write ran past the end of its buffer.
    #[error("Out of range at byte {position}: requested {requested} bytes, buffer holds {len}")]
    OutOfRange {
        position: usize,
        requested: usize,
        len: usize,
    },

    /// The high nibble of a header byte names no frame kind.
    #[error("Unknown type tag 0x{0:X}")]
    UnknownTypeTag(u8),

    /// A `Text` payload is not valid UTF-8.
    #[error("Invalid text encoding: {0}")]
    InvalidEncoding(#[from] FromUtf8Error),

    /// Container nesting went past the configured limit.
    #[error("Nesting depth exceeded the limit of {max}")]
    DepthExceeded { max: usize },

    /// A width that the frame kind does not allow.
    #[error("Invalid width {width} for {tag} frame")]
    InvalidWidth { tag: Tag, width: u64 },

    /// A mapping key decoded to something other than text.
    #[error("Mapping keys must be text, found {0}")]
    InvalidKey(&'static str),

    /// A mapping frame repeats a key.
    #[error("Duplicate mapping key {0:?}")]
    DuplicateKey(String),

    /// Bytes remain after the root frame.
    #[error("{0} trailing bytes after the root frame")]
    TrailingBytes(usize),

    /// A declared length does not fit in memory addressing on this platform.
    #[error("Declared length {0} does not fit in usize")]
    LengthOverflow(u64),

    /// Custom error raised through serde.
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported type error for input the format cannot represent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jsobs::Error;
    ///
    /// let err = Error::unsupported_type("non-text mapping key");
    /// assert!(err.to_string().contains("non-text mapping key"));
    /// ```
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates an out-of-range error for a cursor access.
    pub fn out_of_range(position: usize, requested: usize, len: usize) -> Self {
        Error::OutOfRange {
            position,
            requested,
            len,
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jsobs::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = Error::out_of_range(3, 8, 5);
        assert_eq!(
            err.to_string(),
            "Out of range at byte 3: requested 8 bytes, buffer holds 5"
        );

        assert_eq!(Error::UnknownTypeTag(0x5).to_string(), "Unknown type tag 0x5");

        let err = Error::InvalidWidth {
            tag: Tag::Float,
            width: 2,
        };
        assert_eq!(err.to_string(), "Invalid width 2 for Float frame");
    }

    #[test]
    fn test_utf8_error_converts() {
        let utf8 = String::from_utf8(vec![0xFF, 0xFE]).unwrap_err();
        let err: Error = utf8.into();
        assert!(matches!(err, Error::InvalidEncoding(_)));
    }
}
