//! Frame headers and length-field sizing.
//!
//! Every value on the wire is a frame: one header byte, a big-endian length
//! field whose width the header announces, then a tag-dependent payload.
//!
//! ```text
//!  7      4 3      0
//! +--------+--------+---------------------+-----------+
//! |  tag   | log2 w | length (w bytes BE) | payload.. |
//! +--------+--------+---------------------+-----------+
//! ```
//!
//! The length-field width `w` is always [`size_class`] of the length, so the
//! size pass and the encoder both go through [`Header`] and can never disagree
//! on how many bytes a header occupies.

use crate::cursor::Cursor;
use crate::{Error, Result};
use std::fmt;

/// The nine frame kinds, with their wire nibble as discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    Mapping = 0x0,
    Sequence = 0x2,
    Bytes = 0x4,
    Text = 0x6,
    Bool = 0x8,
    SignedInt = 0xA,
    UnsignedInt = 0xC,
    Float = 0xE,
    Null = 0xF,
}

impl Tag {
    /// Returns the 4-bit value stored in the high nibble of the header byte.
    #[inline]
    #[must_use]
    pub const fn nibble(self) -> u8 {
        self as u8
    }

    /// Maps a high nibble back to its tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTypeTag`] for the seven nibbles with no meaning.
    pub fn from_nibble(nibble: u8) -> Result<Self> {
        match nibble {
            0x0 => Ok(Tag::Mapping),
            0x2 => Ok(Tag::Sequence),
            0x4 => Ok(Tag::Bytes),
            0x6 => Ok(Tag::Text),
            0x8 => Ok(Tag::Bool),
            0xA => Ok(Tag::SignedInt),
            0xC => Ok(Tag::UnsignedInt),
            0xE => Ok(Tag::Float),
            0xF => Ok(Tag::Null),
            other => Err(Error::UnknownTypeTag(other)),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Returns the minimal power-of-two byte width (1, 2, 4 or 8) able to hold `n`.
///
/// Zero still needs one byte.
///
/// # Examples
///
/// ```rust
/// use serde_jsobs::frame::size_class;
///
/// assert_eq!(size_class(0), 1);
/// assert_eq!(size_class(255), 1);
/// assert_eq!(size_class(256), 2);
/// assert_eq!(size_class(65536), 4);
/// assert_eq!(size_class(1 << 32), 8);
/// ```
#[inline]
#[must_use]
pub const fn size_class(n: u64) -> usize {
    let bits = u64::BITS - n.leading_zeros();
    let bytes = if bits == 0 { 1 } else { bits.div_ceil(8) as usize };
    bytes.next_power_of_two()
}

/// A decoded or to-be-written frame header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub tag: Tag,
    pub length: u64,
}

impl Header {
    #[inline]
    #[must_use]
    pub const fn new(tag: Tag, length: u64) -> Self {
        Header { tag, length }
    }

    /// Width in bytes of this header's length field.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        size_class(self.length)
    }

    /// Total bytes this header occupies on the wire: the header byte plus the length field.
    #[inline]
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        1 + self.width()
    }

    /// The packed header byte.
    #[inline]
    #[must_use]
    pub const fn byte(&self) -> u8 {
        (self.tag.nibble() << 4) | self.width().trailing_zeros() as u8
    }

    pub fn write<B>(&self, cursor: &mut Cursor<B>) -> Result<()>
    where
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        cursor.write_u8(self.byte())?;
        cursor.write_unsigned(self.width(), self.length)
    }

    /// Reads a header byte and its length field.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownTypeTag`] on an undefined high nibble,
    /// [`Error::InvalidWidth`] when the low nibble selects a width above 8 bytes,
    /// and [`Error::OutOfRange`] when the buffer ends early.
    pub fn read<B: AsRef<[u8]>>(cursor: &mut Cursor<B>) -> Result<Self> {
        let byte = cursor.read_u8()?;
        let tag = Tag::from_nibble(byte >> 4)?;
        let exponent = byte & 0x0F;
        if exponent > 3 {
            return Err(Error::InvalidWidth {
                tag,
                width: 1u64 << exponent,
            });
        }
        let length = cursor.read_unsigned(1 << exponent)?;
        Ok(Header { tag, length })
    }
}
