//! JSOBS Wire Format
//!
//! This module documents the byte layout produced by [`serialize`](crate::serialize)
//! and accepted by [`deserialize`](crate::deserialize). The buffer is the whole
//! contract: there is no preamble, version byte or checksum.
//!
//! # Frames
//!
//! A serialized value is exactly one frame. Containers hold further frames in
//! their payload.
//!
//! ```text
//! header byte | length field (1, 2, 4 or 8 bytes) | payload
//! ```
//!
//! ## Header byte
//!
//! | Bits | Meaning |
//! |------|---------|
//! | 7-4  | Frame kind (tag) |
//! | 3-0  | `log2` of the length-field width: 0, 1, 2 or 3 |
//!
//! | Tag | Nibble | `length` means | Payload |
//! |-----|--------|----------------|---------|
//! | Mapping     | `0x0` | number of pairs    | `length` × (Text key frame, value frame) |
//! | Sequence    | `0x2` | number of elements | `length` value frames |
//! | Bytes       | `0x4` | byte count         | raw bytes |
//! | Text        | `0x6` | byte count         | UTF-8 bytes |
//! | Bool        | `0x8` | always 1           | `0x00` false, anything else true |
//! | SignedInt   | `0xA` | 1, 2, 4 or 8       | two's-complement integer |
//! | UnsignedInt | `0xC` | 1, 2, 4 or 8       | unsigned integer |
//! | Float       | `0xE` | 4 or 8             | IEEE-754 float |
//! | Null        | `0xF` | always 0           | none |
//!
//! Nibbles `0x1`, `0x3`, `0x5`, `0x7`, `0x9`, `0xB` and `0xD` are undefined and
//! rejected with [`Error::UnknownTypeTag`](crate::Error::UnknownTypeTag).
//!
//! ## Length field
//!
//! The width of the length field is [`size_class`](crate::frame::size_class) of
//! the length: the fewest bytes that hold it, rounded up to a power of two.
//!
//! | Length range              | Width |
//! |---------------------------|-------|
//! | `0 ..= 255`               | 1     |
//! | `256 ..= 65_535`          | 2     |
//! | `65_536 ..= 4_294_967_295`| 4     |
//! | larger                    | 8     |
//!
//! ## Byte order
//!
//! Every multi-byte integer and float, including the length field, is
//! big-endian.
//!
//! # What the encoder emits
//!
//! This crate only ever writes Mapping, Sequence, Bytes, Text, Bool, 8-byte
//! Float and Null frames. Numbers are always 8-byte floats, even small whole
//! numbers, so `Value::Number(1.0)` costs 10 bytes. The decoder still accepts
//! SignedInt, UnsignedInt and 4-byte Float frames written by other producers
//! and turns them into [`Value::Number`](crate::Value::Number).
//!
//! # Examples
//!
//! ```text
//! Bool(true)                   80 01 01
//! Text("hi")                   60 02 68 69
//! Sequence([])                 20 00
//! Mapping({})                  00 00
//! Null                         F0 00
//! Number(1.0)                  E0 08 3F F0 00 00 00 00 00 00
//! Sequence([Null; 300])        21 01 2C F0 00 F0 00 ...
//! Mapping({"a": true})         00 01 60 01 61 80 01 01
//! ```
//!
//! # Mappings
//!
//! - Keys are Text frames, never any other kind.
//! - Pairs are written in insertion order and decoded in wire order.
//! - A mapping frame that repeats a key is rejected on decode.
