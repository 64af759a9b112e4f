//! JSOBS deserialization.
//!
//! This module provides the [`Decoder`], a single recursive descent over a byte
//! buffer that reads one frame at a time and rebuilds the [`Value`] tree, and
//! [`ValueDeserializer`], which hands a decoded [`Value`] to any
//! `T: Deserialize`.
//!
//! ## Overview
//!
//! - **Strict tags**: an undefined header nibble is [`Error::UnknownTypeTag`],
//!   never a silent `Null`
//! - **Foreign frames**: signed and unsigned integer frames, and 4-byte floats,
//!   decode to [`Value::Number`] even though this encoder never writes them
//! - **Owned output**: `Text` and `Bytes` are copied out of the buffer, so the
//!   buffer can be dropped as soon as decoding returns
//! - **Bounded work**: nesting is capped by [`Options::max_depth`] and
//!   pre-allocation is capped by the bytes actually left in the buffer
//!
//! ## Usage
//!
//! ```rust
//! use serde_jsobs::{Decoder, Options, Value};
//!
//! // Two Bool frames back to back.
//! let buf = [0x80, 0x01, 0x01, 0x80, 0x01, 0x00];
//! let mut decoder = Decoder::new(&buf[..], &Options::new());
//! assert_eq!(decoder.decode().unwrap(), Value::Bool(true));
//! assert_eq!(decoder.decode().unwrap(), Value::Bool(false));
//! assert_eq!(decoder.remaining(), 0);
//! ```

use crate::cursor::Cursor;
use crate::frame::{Header, Tag};
use crate::options::DepthGuard;
use crate::value::whole_number;
use crate::{Error, Map, Options, Result, Value};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};

/// Smallest possible frame: a header byte plus a one-byte length.
const MIN_FRAME_LEN: usize = 2;

/// Reads framed values from a byte buffer.
#[derive(Debug)]
pub struct Decoder<B> {
    cursor: Cursor<B>,
    guard: DepthGuard,
}

impl<B: AsRef<[u8]>> Decoder<B> {
    pub fn new(buf: B, options: &Options) -> Self {
        Decoder {
            cursor: Cursor::new(buf),
            guard: DepthGuard::new(options),
        }
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    /// Reads the next frame, recursing into containers.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfRange`] when the buffer ends inside a frame
    /// - [`Error::UnknownTypeTag`] on an undefined header nibble
    /// - [`Error::InvalidWidth`] on a payload width the frame kind forbids
    /// - [`Error::InvalidEncoding`] when a `Text` payload is not UTF-8
    /// - [`Error::InvalidKey`] / [`Error::DuplicateKey`] on malformed mappings
    /// - [`Error::DepthExceeded`] past the nesting limit
    pub fn decode(&mut self) -> Result<Value> {
        self.guard.reset();
        self.frame()
    }

    fn frame(&mut self) -> Result<Value> {
        let Header { tag, length } = Header::read(&mut self.cursor)?;
        match tag {
            Tag::Sequence => {
                let count = declared_len(length)?;
                self.guard.enter()?;
                let mut items = Vec::with_capacity(self.capacity_for(count));
                for _ in 0..count {
                    items.push(self.frame()?);
                }
                self.guard.leave();
                Ok(Value::Sequence(items))
            }
            Tag::Mapping => {
                let count = declared_len(length)?;
                self.guard.enter()?;
                let mut map = Map::with_capacity(self.capacity_for(count));
                for _ in 0..count {
                    let key = match self.frame()? {
                        Value::Text(key) => key,
                        other => return Err(Error::InvalidKey(other.kind())),
                    };
                    if map.contains_key(&key) {
                        return Err(Error::DuplicateKey(key));
                    }
                    let item = self.frame()?;
                    map.insert(key, item);
                }
                self.guard.leave();
                Ok(Value::Mapping(map))
            }
            Tag::Bytes => {
                let count = declared_len(length)?;
                Ok(Value::Bytes(self.cursor.read_bytes(count)?))
            }
            Tag::Text => {
                let count = declared_len(length)?;
                let bytes = self.cursor.read_bytes(count)?;
                Ok(Value::Text(String::from_utf8(bytes)?))
            }
            Tag::SignedInt => {
                let width = payload_width(tag, length, &[1, 2, 4, 8])?;
                Ok(Value::Number(self.cursor.read_signed(width)? as f64))
            }
            Tag::UnsignedInt => {
                let width = payload_width(tag, length, &[1, 2, 4, 8])?;
                Ok(Value::Number(self.cursor.read_unsigned(width)? as f64))
            }
            Tag::Float => {
                let width = payload_width(tag, length, &[4, 8])?;
                Ok(Value::Number(self.cursor.read_float(width)?))
            }
            Tag::Bool => {
                payload_width(tag, length, &[1])?;
                Ok(Value::Bool(self.cursor.read_u8()? != 0))
            }
            Tag::Null => Ok(Value::Null),
        }
    }

    fn capacity_for(&self, count: usize) -> usize {
        count.min(self.cursor.remaining() / MIN_FRAME_LEN)
    }
}

fn declared_len(length: u64) -> Result<usize> {
    usize::try_from(length).map_err(|_| Error::LengthOverflow(length))
}

fn payload_width(tag: Tag, length: u64, allowed: &[u64]) -> Result<usize> {
    if allowed.contains(&length) {
        Ok(length as usize)
    } else {
        Err(Error::InvalidWidth { tag, width: length })
    }
}

/// Deserializes a `T: Deserialize` out of an owned [`Value`].
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    #[must_use]
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(n) => match whole_number(n) {
                Some(i) if i < 0 => visitor.visit_i64(i),
                Some(i) => visitor.visit_u64(i as u64),
                None => visitor.visit_f64(n),
            },
            Value::Text(s) => visitor.visit_string(s),
            Value::Bytes(b) => visitor.visit_byte_buf(b),
            Value::Sequence(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            Value::Mapping(map) => visitor.visit_map(MapDeserializer::new(map)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Text(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Mapping(map) => {
                let mut entries = map.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((variant, value)), None) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    _ => Err(Error::custom("Expected a mapping with a single variant key")),
                }
            }
            other => Err(Error::custom(format!(
                "Expected enum, found {}",
                other.kind()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: Map) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::Text(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::Text(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Null => Ok(()),
            _ => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Sequence(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            _ => Err(Error::custom("Expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Mapping(map) => visitor.visit_map(MapDeserializer::new(map)),
            _ => Err(Error::custom("Expected struct variant")),
        }
    }
}
