//! # serde_jsobs
//!
//! A compact, self-describing binary serialization format for tree-shaped data,
//! with a Serde front end.
//!
//! ## What is JSOBS?
//!
//! JSOBS frames every value as a one-byte header (kind + length-field width), a
//! minimal-width big-endian length, and a payload. It carries null, booleans,
//! numbers, text, raw byte buffers, sequences and text-keyed mappings, and
//! nothing else: no schema, no versioning, no compression.
//!
//! ## Key Features
//!
//! - **Exact sizing**: the output buffer is allocated once, at precisely the
//!   encoded length, by a size pass that mirrors the encoder
//! - **Minimal length fields**: 1, 2, 4 or 8 bytes, whichever is smallest
//! - **Strict decoding**: unknown tags, bad UTF-8, truncated buffers and
//!   runaway nesting are errors, never silently patched over
//! - **Serde Compatible**: any `T: Serialize` / `T: Deserialize` goes through
//!   [`to_bytes`] / [`from_bytes`]
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_jsobs = "0.1"
//! ```
//!
//! ### Values
//!
//! ```rust
//! use serde_jsobs::{deserialize, jsobs, serialize, Value};
//!
//! let value = jsobs!([1, "a", null]);
//! let bytes = serialize(&value).unwrap();
//! assert_eq!(deserialize(&bytes).unwrap(), value);
//!
//! assert_eq!(serialize(&Value::Bool(true)).unwrap(), vec![0x80, 0x01, 0x01]);
//! ```
//!
//! ### Rust types
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_jsobs::{from_bytes, to_bytes};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//! let bytes = to_bytes(&user).unwrap();
//! let back: User = from_bytes(&bytes).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ## Numbers
//!
//! Every number is framed as an 8-byte float. Integer and float types collapse
//! into [`Value::Number`] and come back as whole-number `f64`s; integers beyond
//! 2^53 lose precision.
//!
//! ## Format Specification
//!
//! See the [`format`] module for the byte layout.

pub mod cursor;
pub mod de;
pub mod error;
pub mod format;
pub mod frame;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use cursor::Cursor;
pub use de::{Decoder, ValueDeserializer};
pub use error::{Error, Result};
pub use frame::{size_class, Header, Tag};
pub use map::Map;
pub use options::{Options, DEFAULT_MAX_DEPTH};
pub use ser::{estimate, estimate_with_options, Encoder, ValueSerializer};
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serializes a [`Value`] into a freshly allocated buffer of exactly the encoded size.
///
/// # Examples
///
/// ```rust
/// use serde_jsobs::{serialize, Value};
///
/// let bytes = serialize(&Value::from("hi")).unwrap();
/// assert_eq!(bytes, vec![0x60, 0x02, 0x68, 0x69]);
/// ```
///
/// # Errors
///
/// Returns [`Error::DepthExceeded`] when containers nest deeper than
/// [`DEFAULT_MAX_DEPTH`], and [`Error::SizeMismatch`] if the encoder ever
/// disagrees with the size pass.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize(value: &Value) -> Result<Vec<u8>> {
    serialize_with_options(value, &Options::default())
}

/// Serializes a [`Value`] with custom [`Options`].
///
/// # Errors
///
/// See [`serialize`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_with_options(value: &Value, options: &Options) -> Result<Vec<u8>> {
    let expected = estimate_with_options(value, options)?;
    let mut encoder = Encoder::new(vec![0u8; expected], options);
    encoder.encode(value)?;
    let written = encoder.position();
    if written != expected {
        log::error!("encoder wrote {} bytes, size pass estimated {}", written, expected);
        return Err(Error::SizeMismatch { expected, written });
    }
    log::trace!("serialized {} value into {} bytes", value.kind(), written);
    Ok(encoder.into_inner())
}

/// Deserializes a [`Value`] from a buffer holding exactly one frame.
///
/// The returned value owns all of its text and bytes; `buf` can be dropped or
/// reused immediately.
///
/// # Examples
///
/// ```rust
/// use serde_jsobs::{deserialize, Value};
///
/// let value = deserialize(&[0x80, 0x01, 0x01]).unwrap();
/// assert_eq!(value, Value::Bool(true));
/// ```
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] on truncated input, [`Error::UnknownTypeTag`]
/// on an undefined header nibble, [`Error::InvalidEncoding`] on malformed
/// UTF-8, [`Error::DepthExceeded`] on runaway nesting and
/// [`Error::TrailingBytes`] when data follows the root frame.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn deserialize(buf: &[u8]) -> Result<Value> {
    deserialize_with_options(buf, &Options::default())
}

/// Deserializes a [`Value`] with custom [`Options`].
///
/// # Errors
///
/// See [`deserialize`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn deserialize_with_options(buf: &[u8], options: &Options) -> Result<Value> {
    let mut decoder = Decoder::new(buf, options);
    let value = decoder.decode().map_err(|err| {
        log::debug!("rejected {}-byte buffer: {}", buf.len(), err);
        err
    })?;
    match decoder.remaining() {
        0 => {
            log::trace!("deserialized {} value from {} bytes", value.kind(), buf.len());
            Ok(value)
        }
        extra => {
            log::debug!("rejected buffer with {} trailing bytes", extra);
            Err(Error::TrailingBytes(extra))
        }
    }
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_jsobs::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(value.as_mapping().and_then(|m| m.get("x")), Some(&Value::Number(1.0)));
/// ```
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] for mapping keys that are not text.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Convert a [`Value`] into any `T: Deserialize`.
///
/// # Errors
///
/// Returns an error if the value's shape does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Serialize any `T: Serialize` to JSOBS bytes.
///
/// # Examples
///
/// ```rust
/// use serde_jsobs::to_bytes;
///
/// let bytes = to_bytes(&vec![true, false]).unwrap();
/// assert_eq!(bytes, vec![0x20, 0x02, 0x80, 0x01, 0x01, 0x80, 0x01, 0x00]);
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (see [`to_value`]) or
/// cannot be encoded (see [`serialize`]).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_bytes<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    serialize(&to_value(value)?)
}

/// Deserialize an instance of type `T` from JSOBS bytes.
///
/// # Examples
///
/// ```rust
/// use serde_jsobs::from_bytes;
///
/// let flags: Vec<bool> = from_bytes(&[0x20, 0x02, 0x80, 0x01, 0x01, 0x80, 0x01, 0x00]).unwrap();
/// assert_eq!(flags, vec![true, false]);
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not a valid frame (see [`deserialize`]) or
/// do not match the shape of `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_bytes<T>(buf: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(deserialize(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        manager: Option<String>,
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: -2 };
        let bytes = to_bytes(&point).unwrap();
        let point_back: Point = from_bytes(&bytes).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            manager: None,
        };

        let bytes = to_bytes(&user).unwrap();
        let user_back: User = from_bytes(&bytes).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_serialized_length_matches_estimate() {
        let value = to_value(&vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }]).unwrap();
        let bytes = serialize(&value).unwrap();
        assert_eq!(bytes.len(), estimate(&value).unwrap());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        assert_eq!(
            deserialize(&[0xF0, 0x00, 0x00]),
            Err(Error::TrailingBytes(1))
        );
    }

    #[test]
    fn test_empty_buffer_is_out_of_range() {
        assert_eq!(deserialize(&[]), Err(Error::out_of_range(0, 1, 0)));
    }

    #[test]
    fn test_serialize_respects_depth_option() {
        let value = Value::Sequence(vec![Value::Sequence(vec![])]);
        let options = Options::new().with_max_depth(1);
        assert_eq!(
            serialize_with_options(&value, &options),
            Err(Error::DepthExceeded { max: 1 })
        );
    }
}
