//! Position-tracking view over a fixed-size byte buffer.
//!
//! [`Cursor`] reads and writes big-endian integers and floats of 1, 2, 4 or 8
//! bytes and copies raw byte ranges, advancing its position by the number of
//! bytes consumed or produced. Any access past the end of the buffer fails with
//! [`Error::OutOfRange`] and leaves the position untouched.
//!
//! Reads work over anything that is `AsRef<[u8]>`; writes additionally need
//! `AsMut<[u8]>`, so a decoder can borrow a `&[u8]` while an encoder owns a
//! `Vec<u8>` or borrows a `&mut [u8]`.
//!
//! ```rust
//! use serde_jsobs::Cursor;
//!
//! let mut cursor = Cursor::new(vec![0u8; 6]);
//! cursor.write_unsigned(2, 0x0102).unwrap();
//! cursor.write_float(4, 1.5).unwrap();
//! assert_eq!(cursor.position(), 6);
//!
//! let mut cursor = Cursor::new(cursor.into_inner());
//! assert_eq!(cursor.read_unsigned(2).unwrap(), 0x0102);
//! assert_eq!(cursor.read_float(4).unwrap(), 1.5);
//! ```

use crate::frame::Tag;
use crate::{Error, Result};

/// A byte buffer plus a read/write position starting at zero.
#[derive(Clone, Debug)]
pub struct Cursor<B> {
    buf: B,
    position: usize,
}

impl<B> Cursor<B> {
    #[must_use]
    pub const fn new(buf: B) -> Self {
        Cursor { buf, position: 0 }
    }

    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    pub fn get_ref(&self) -> &B {
        &self.buf
    }

    pub fn into_inner(self) -> B {
        self.buf
    }
}

impl<B: AsRef<[u8]>> Cursor<B> {
    /// Bytes left between the position and the end of the buffer.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.as_ref().len().saturating_sub(self.position)
    }

    fn take(&mut self, count: usize) -> Result<&[u8]> {
        let buf = self.buf.as_ref();
        let start = self.position;
        let end = start
            .checked_add(count)
            .filter(|&end| end <= buf.len())
            .ok_or_else(|| Error::out_of_range(start, count, buf.len()))?;
        self.position = end;
        Ok(&buf[start..end])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Reads an unsigned integer of `width` bytes.
    pub fn read_unsigned(&mut self, width: usize) -> Result<u64> {
        Ok(match width {
            1 => u64::from(self.read_u8()?),
            2 => u64::from(u16::from_be_bytes(self.take_array()?)),
            4 => u64::from(u32::from_be_bytes(self.take_array()?)),
            8 => u64::from_be_bytes(self.take_array()?),
            _ => return Err(invalid_width(Tag::UnsignedInt, width)),
        })
    }

    /// Reads a two's-complement signed integer of `width` bytes.
    pub fn read_signed(&mut self, width: usize) -> Result<i64> {
        Ok(match width {
            1 => i64::from(i8::from_be_bytes(self.take_array()?)),
            2 => i64::from(i16::from_be_bytes(self.take_array()?)),
            4 => i64::from(i32::from_be_bytes(self.take_array()?)),
            8 => i64::from_be_bytes(self.take_array()?),
            _ => return Err(invalid_width(Tag::SignedInt, width)),
        })
    }

    /// Reads an IEEE-754 float of 4 or 8 bytes, widened to `f64`.
    pub fn read_float(&mut self, width: usize) -> Result<f64> {
        Ok(match width {
            4 => f64::from(f32::from_be_bytes(self.take_array()?)),
            8 => f64::from_be_bytes(self.take_array()?),
            _ => return Err(invalid_width(Tag::Float, width)),
        })
    }

    /// Copies `count` bytes into a new, independently owned buffer.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        self.take(count).map(<[u8]>::to_vec)
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Cursor<B> {
    fn take_mut(&mut self, count: usize) -> Result<&mut [u8]> {
        let start = self.position;
        let buf = self.buf.as_mut();
        let len = buf.len();
        let end = start
            .checked_add(count)
            .filter(|&end| end <= len)
            .ok_or_else(|| Error::out_of_range(start, count, len))?;
        self.position = end;
        Ok(&mut buf[start..end])
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    /// Writes the low `width` bytes of `value`, big-endian.
    pub fn write_unsigned(&mut self, width: usize, value: u64) -> Result<()> {
        if !matches!(width, 1 | 2 | 4 | 8) {
            return Err(invalid_width(Tag::UnsignedInt, width));
        }
        self.write_bytes(&value.to_be_bytes()[8 - width..])
    }

    /// Writes the low `width` bytes of `value` in two's complement, big-endian.
    pub fn write_signed(&mut self, width: usize, value: i64) -> Result<()> {
        if !matches!(width, 1 | 2 | 4 | 8) {
            return Err(invalid_width(Tag::SignedInt, width));
        }
        self.write_bytes(&value.to_be_bytes()[8 - width..])
    }

    /// Writes `value` as a 4-byte (narrowed) or 8-byte IEEE-754 float.
    pub fn write_float(&mut self, width: usize, value: f64) -> Result<()> {
        match width {
            4 => self.write_bytes(&(value as f32).to_be_bytes()),
            8 => self.write_bytes(&value.to_be_bytes()),
            _ => Err(invalid_width(Tag::Float, width)),
        }
    }

    pub fn write_bytes(&mut self, source: &[u8]) -> Result<()> {
        self.take_mut(source.len())?.copy_from_slice(source);
        Ok(())
    }
}

fn invalid_width(tag: Tag, width: usize) -> Error {
    Error::InvalidWidth {
        tag,
        width: width as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsigned_is_big_endian() {
        let mut cursor = Cursor::new([0u8; 15]);
        cursor.write_unsigned(1, 0xAB).unwrap();
        cursor.write_unsigned(2, 0x0102).unwrap();
        cursor.write_unsigned(4, 0x0304_0506).unwrap();
        cursor.write_unsigned(8, 0x0708_090A_0B0C_0D0E).unwrap();
        assert_eq!(cursor.position(), 15);
        assert_eq!(
            cursor.get_ref(),
            &[0xAB, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14]
        );

        let mut cursor = Cursor::new(cursor.into_inner());
        assert_eq!(cursor.read_unsigned(1).unwrap(), 0xAB);
        assert_eq!(cursor.read_unsigned(2).unwrap(), 0x0102);
        assert_eq!(cursor.read_unsigned(4).unwrap(), 0x0304_0506);
        assert_eq!(cursor.read_unsigned(8).unwrap(), 0x0708_090A_0B0C_0D0E);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_signed_sign_extends() {
        let mut cursor = Cursor::new(vec![0u8; 15]);
        cursor.write_signed(1, -1).unwrap();
        cursor.write_signed(2, -300).unwrap();
        cursor.write_signed(4, -70_000).unwrap();
        cursor.write_signed(8, i64::MIN).unwrap();

        let mut cursor = Cursor::new(cursor.into_inner());
        assert_eq!(cursor.read_signed(1).unwrap(), -1);
        assert_eq!(cursor.read_signed(2).unwrap(), -300);
        assert_eq!(cursor.read_signed(4).unwrap(), -70_000);
        assert_eq!(cursor.read_signed(8).unwrap(), i64::MIN);
    }

    #[test]
    fn test_float_widths() {
        let mut cursor = Cursor::new(vec![0u8; 12]);
        cursor.write_float(4, 0.25).unwrap();
        cursor.write_float(8, -1234.5678).unwrap();

        let mut cursor = Cursor::new(cursor.into_inner());
        assert_eq!(cursor.read_float(4).unwrap(), 0.25);
        assert_eq!(cursor.read_float(8).unwrap(), -1234.5678);

        let mut cursor = Cursor::new([0u8; 2]);
        assert_eq!(
            cursor.read_float(2),
            Err(Error::InvalidWidth {
                tag: Tag::Float,
                width: 2
            })
        );
    }

    #[test]
    fn test_read_bytes_copies() {
        let source = vec![1u8, 2, 3, 4];
        let mut cursor = Cursor::new(source.as_slice());
        cursor.read_u8().unwrap();
        let copied = cursor.read_bytes(2).unwrap();
        drop(cursor);
        drop(source);
        assert_eq!(copied, vec![2, 3]);
    }

    #[test]
    fn test_out_of_range_leaves_position() {
        let mut cursor = Cursor::new([0u8; 3]);
        cursor.read_u8().unwrap();
        assert_eq!(cursor.read_unsigned(4), Err(Error::out_of_range(1, 4, 3)));
        assert_eq!(cursor.position(), 1);

        let mut cursor = Cursor::new([0u8; 2]);
        assert_eq!(
            cursor.write_bytes(&[1, 2, 3]),
            Err(Error::out_of_range(0, 3, 2))
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_huge_count_does_not_overflow() {
        let mut cursor = Cursor::new([0u8; 4]);
        cursor.read_u8().unwrap();
        assert!(matches!(
            cursor.read_bytes(usize::MAX),
            Err(Error::OutOfRange { .. })
        ));
    }
}
