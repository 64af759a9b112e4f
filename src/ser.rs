//! JSOBS serialization.
//!
//! Encoding is two passes over the same [`Value`]: the size pass computes the
//! exact byte length without allocating, then the [`Encoder`] writes frames into
//! a buffer of precisely that length. Both passes are one structural walk over
//! the value, driven into two different sinks: a byte counter and a
//! [`Cursor`]. Header sizing comes from [`Header`] in both cases, so the
//! estimate and the written length cannot drift apart.
//!
//! ## Frame sizes
//!
//! | Value            | Bytes                                   |
//! |------------------|-----------------------------------------|
//! | `Null`           | 2                                       |
//! | `Bool`           | 3                                       |
//! | `Number`         | 10 (always an 8-byte float)             |
//! | `Text`/`Bytes`   | `1 + size_class(len) + len`             |
//! | `Sequence`       | `1 + size_class(n) + Σ items`           |
//! | `Mapping`        | `1 + size_class(n) + Σ (key + value)`   |
//!
//! ## Direct Encoder Usage
//!
//! ```rust
//! use serde_jsobs::{estimate, Encoder, Options, Value};
//!
//! let value = Value::from("hi");
//! let size = estimate(&value).unwrap();
//!
//! let mut encoder = Encoder::new(vec![0u8; size], &Options::new());
//! encoder.encode(&value).unwrap();
//! assert_eq!(encoder.position(), size);
//! assert_eq!(encoder.into_inner(), vec![0x60, 0x02, b'h', b'i']);
//! ```
//!
//! ## Serde
//!
//! [`ValueSerializer`] turns any `T: Serialize` into a [`Value`], which is how
//! [`to_bytes`](crate::to_bytes) reaches the wire.

use crate::cursor::Cursor;
use crate::frame::{Header, Tag};
use crate::options::DepthGuard;
use crate::{Error, Map, Options, Result, Value};
use serde::{ser, Serialize};

/// Receives the frames of a value in wire order.
trait Sink {
    fn header(&mut self, header: Header) -> Result<()>;
    fn bool(&mut self, value: bool) -> Result<()>;
    fn float(&mut self, value: f64) -> Result<()>;
    fn raw(&mut self, bytes: &[u8]) -> Result<()>;
}

/// Counts bytes instead of writing them.
#[derive(Debug, Default)]
struct Sizer {
    total: usize,
}

impl Sink for Sizer {
    fn header(&mut self, header: Header) -> Result<()> {
        self.total += header.encoded_len();
        Ok(())
    }

    fn bool(&mut self, _value: bool) -> Result<()> {
        self.total += 1;
        Ok(())
    }

    fn float(&mut self, _value: f64) -> Result<()> {
        self.total += 8;
        Ok(())
    }

    fn raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.total += bytes.len();
        Ok(())
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Sink for Cursor<B> {
    fn header(&mut self, header: Header) -> Result<()> {
        header.write(self)
    }

    fn bool(&mut self, value: bool) -> Result<()> {
        self.write_unsigned(1, u64::from(value))
    }

    fn float(&mut self, value: f64) -> Result<()> {
        self.write_float(8, value)
    }

    fn raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_bytes(bytes)
    }
}

fn walk<S: Sink>(value: &Value, sink: &mut S, guard: &mut DepthGuard) -> Result<()> {
    match value {
        Value::Null => sink.header(Header::new(Tag::Null, 0)),
        Value::Bool(b) => {
            sink.header(Header::new(Tag::Bool, 1))?;
            sink.bool(*b)
        }
        // Numbers never use the integer or 4-byte float frames.
        Value::Number(n) => {
            sink.header(Header::new(Tag::Float, 8))?;
            sink.float(*n)
        }
        Value::Text(s) => text(s, sink),
        Value::Bytes(bytes) => {
            sink.header(Header::new(Tag::Bytes, bytes.len() as u64))?;
            sink.raw(bytes)
        }
        Value::Sequence(items) => {
            guard.enter()?;
            sink.header(Header::new(Tag::Sequence, items.len() as u64))?;
            for item in items {
                walk(item, sink, guard)?;
            }
            guard.leave();
            Ok(())
        }
        Value::Mapping(map) => {
            guard.enter()?;
            sink.header(Header::new(Tag::Mapping, map.len() as u64))?;
            for (key, item) in map {
                text(key, sink)?;
                walk(item, sink, guard)?;
            }
            guard.leave();
            Ok(())
        }
    }
}

fn text<S: Sink>(s: &str, sink: &mut S) -> Result<()> {
    sink.header(Header::new(Tag::Text, s.len() as u64))?;
    sink.raw(s.as_bytes())
}

/// Returns the exact number of bytes [`serialize`](crate::serialize) produces for `value`.
///
/// # Examples
///
/// ```rust
/// use serde_jsobs::{estimate, Value};
///
/// assert_eq!(estimate(&Value::Bool(true)).unwrap(), 3);
/// assert_eq!(estimate(&Value::Number(1.0)).unwrap(), 10);
/// assert_eq!(estimate(&Value::Null).unwrap(), 2);
/// ```
///
/// # Errors
///
/// Returns [`Error::DepthExceeded`] when containers nest deeper than the default limit.
pub fn estimate(value: &Value) -> Result<usize> {
    estimate_with_options(value, &Options::default())
}

/// Like [`estimate`], with a caller-supplied nesting limit.
///
/// # Errors
///
/// Returns [`Error::DepthExceeded`] when containers nest deeper than `options.max_depth`.
pub fn estimate_with_options(value: &Value, options: &Options) -> Result<usize> {
    let mut sizer = Sizer::default();
    walk(value, &mut sizer, &mut DepthGuard::new(options))?;
    Ok(sizer.total)
}

/// Writes framed values into a byte buffer.
///
/// The buffer must already be large enough; size it with [`estimate`].
#[derive(Debug)]
pub struct Encoder<B> {
    cursor: Cursor<B>,
    guard: DepthGuard,
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> Encoder<B> {
    pub fn new(buf: B, options: &Options) -> Self {
        Encoder {
            cursor: Cursor::new(buf),
            guard: DepthGuard::new(options),
        }
    }

    /// Writes one value, recursing into containers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the buffer is too small and
    /// [`Error::DepthExceeded`] past the nesting limit.
    pub fn encode(&mut self, value: &Value) -> Result<()> {
        self.guard.reset();
        walk(value, &mut self.cursor, &mut self.guard)
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn into_inner(self) -> B {
        self.cursor.into_inner()
    }
}

/// Serializes any `T: Serialize` into a [`Value`].
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeTupleVariant {
    name: &'static str,
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: Map,
    current_key: Option<String>,
}

pub struct SerializeStructVariant {
    name: &'static str,
    map: Map,
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

fn tagged(variant: &'static str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(variant.to_string(), value);
    Value::Mapping(map)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::Text(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Bytes(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::Text(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(variant, to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            map: Map::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant,
            map: Map::with_capacity(len),
        })
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Sequence(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.name, Value::Sequence(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::Text(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(Error::UnsupportedType(format!(
                "mapping keys must be text, found {}",
                other.kind()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Mapping(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Mapping(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.name, Value::Mapping(self.map)))
    }
}
