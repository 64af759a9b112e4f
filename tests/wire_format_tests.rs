use serde_jsobs::{
    deserialize, estimate, serialize, size_class, Decoder, Error, Map, Options, Tag, Value,
};

#[test]
fn test_scalar_bool() {
    let bytes = serialize(&Value::Bool(true)).unwrap();
    assert_eq!(bytes, vec![0x80, 0x01, 0x01]);
    assert_eq!(deserialize(&bytes).unwrap(), Value::Bool(true));

    let bytes = serialize(&Value::Bool(false)).unwrap();
    assert_eq!(bytes, vec![0x80, 0x01, 0x00]);
}

#[test]
fn test_empty_containers() {
    assert_eq!(serialize(&Value::Sequence(vec![])).unwrap(), vec![0x20, 0x00]);
    assert_eq!(serialize(&Value::Mapping(Map::new())).unwrap(), vec![0x00, 0x00]);
    assert_eq!(deserialize(&[0x20, 0x00]).unwrap(), Value::Sequence(vec![]));
    assert_eq!(deserialize(&[0x00, 0x00]).unwrap(), Value::Mapping(Map::new()));
}

#[test]
fn test_text() {
    let bytes = serialize(&Value::from("hi")).unwrap();
    assert_eq!(bytes, vec![0x60, 0x02, 0x68, 0x69]);
    assert_eq!(deserialize(&bytes).unwrap(), Value::from("hi"));
}

#[test]
fn test_null() {
    assert_eq!(serialize(&Value::Null).unwrap(), vec![0xF0, 0x00]);
    assert_eq!(deserialize(&[0xF0, 0x00]).unwrap(), Value::Null);
}

#[test]
fn test_number_always_eight_byte_float() {
    let bytes = serialize(&Value::Number(1.0)).unwrap();
    assert_eq!(
        bytes,
        vec![0xE0, 0x08, 0x3F, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
    );

    for n in [0.0, -0.5, 255.0, 1e-300, f64::INFINITY] {
        assert_eq!(serialize(&Value::Number(n)).unwrap().len(), 10);
    }
}

#[test]
fn test_nan_survives() {
    let bytes = serialize(&Value::Number(f64::NAN)).unwrap();
    match deserialize(&bytes).unwrap() {
        Value::Number(n) => assert!(n.is_nan()),
        other => panic!("Expected number, got {:?}", other),
    }
}

#[test]
fn test_nested_sequence() {
    let value = Value::Sequence(vec![Value::Number(1.0), Value::from("a"), Value::Null]);
    let bytes = serialize(&value).unwrap();
    assert_eq!(bytes.len(), 2 + 10 + 3 + 2);

    let back = deserialize(&bytes).unwrap();
    let items = back.as_sequence().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0], Value::Number(1.0));
    assert_eq!(items[1], Value::Text("a".to_string()));
    assert_eq!(items[2], Value::Null);
}

#[test]
fn test_bytes_frame() {
    let value = Value::Bytes(vec![0x00, 0xFF, 0x10]);
    let bytes = serialize(&value).unwrap();
    assert_eq!(bytes, vec![0x40, 0x03, 0x00, 0xFF, 0x10]);
    assert_eq!(deserialize(&bytes).unwrap(), value);
}

#[test]
fn test_bytes_and_text_length_widths() {
    let text = Value::Text("x".repeat(256));
    let bytes = serialize(&text).unwrap();
    assert_eq!(&bytes[..3], &[0x61, 0x01, 0x00]);
    assert_eq!(bytes.len(), 1 + 2 + 256);
    assert_eq!(deserialize(&bytes).unwrap(), text);

    let blob = Value::Bytes(vec![7; 65_536]);
    let bytes = serialize(&blob).unwrap();
    assert_eq!(&bytes[..5], &[0x42, 0x00, 0x01, 0x00, 0x00]);
    assert_eq!(bytes.len(), estimate(&blob).unwrap());
    assert_eq!(deserialize(&bytes).unwrap(), blob);
}

#[test]
fn test_mapping_preserves_insertion_order() {
    let mut map = Map::new();
    map.insert("zeta".to_string(), Value::from(1));
    map.insert("alpha".to_string(), Value::from(2));
    map.insert("mid".to_string(), Value::from(3));
    let value = Value::Mapping(map);

    let back = deserialize(&serialize(&value).unwrap()).unwrap();
    let keys: Vec<_> = back.as_mapping().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    assert_eq!(back, value);
}

#[test]
fn test_mapping_length_counts_pairs() {
    let mut map = Map::new();
    map.insert("a".to_string(), Value::Null);
    map.insert("b".to_string(), Value::Null);
    let bytes = serialize(&Value::Mapping(map)).unwrap();
    assert_eq!(&bytes[..2], &[0x00, 0x02]);
}

#[test]
fn test_truncated_sequence_is_out_of_range() {
    // Sequence of length 5 with only one element present.
    let buf = [0x20, 0x05, 0x80, 0x01, 0x01];
    assert!(matches!(deserialize(&buf), Err(Error::OutOfRange { .. })));
}

#[test]
fn test_truncated_payloads() {
    assert!(matches!(
        deserialize(&[0x60, 0x05, b'a']),
        Err(Error::OutOfRange { .. })
    ));
    assert!(matches!(
        deserialize(&[0xE0, 0x08, 0x3F]),
        Err(Error::OutOfRange { .. })
    ));
    assert!(matches!(deserialize(&[0x21, 0x01]), Err(Error::OutOfRange { .. })));
}

#[test]
fn test_unknown_tags_do_not_become_null() {
    for nibble in [0x1u8, 0x3, 0x5, 0x7, 0x9, 0xB, 0xD] {
        let buf = [nibble << 4, 0x00];
        assert_eq!(deserialize(&buf), Err(Error::UnknownTypeTag(nibble)));
    }
}

#[test]
fn test_unknown_tag_nested_in_sequence() {
    let buf = [0x20, 0x02, 0xF0, 0x00, 0x30, 0x00];
    assert_eq!(deserialize(&buf), Err(Error::UnknownTypeTag(0x3)));
}

#[test]
fn test_invalid_utf8() {
    assert!(matches!(
        deserialize(&[0x60, 0x01, 0xFF]),
        Err(Error::InvalidEncoding(_))
    ));
}

#[test]
fn test_foreign_integer_frames_decode_to_numbers() {
    let buf = [
        0x20, 0x03, // sequence of 3
        0xA0, 0x01, 0x80, // i8 -128
        0xC0, 0x02, 0xFF, 0xFF, // u16 65535
        0xA0, 0x08, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE, // i64 -2
    ];
    assert_eq!(
        deserialize(&buf).unwrap(),
        Value::Sequence(vec![
            Value::Number(-128.0),
            Value::Number(65535.0),
            Value::Number(-2.0),
        ])
    );
}

#[test]
fn test_wide_length_field_for_small_length_is_accepted() {
    // Another producer may use a 2-byte length field for a short text.
    let buf = [0x61, 0x00, 0x02, b'o', b'k'];
    assert_eq!(deserialize(&buf).unwrap(), Value::from("ok"));
}

#[test]
fn test_runaway_nesting_is_depth_exceeded() {
    let depth = 10_000;
    let mut buf = Vec::with_capacity(depth * 2 + 2);
    for _ in 0..depth {
        buf.extend_from_slice(&[0x20, 0x01]);
    }
    buf.extend_from_slice(&[0xF0, 0x00]);
    assert_eq!(
        deserialize(&buf),
        Err(Error::DepthExceeded {
            max: serde_jsobs::DEFAULT_MAX_DEPTH
        })
    );
}

#[test]
fn test_decoder_reads_concatenated_frames() {
    let mut buf = serialize(&Value::from("one")).unwrap();
    buf.extend(serialize(&Value::from(2)).unwrap());

    let mut decoder = Decoder::new(buf.as_slice(), &Options::new());
    assert_eq!(decoder.decode().unwrap(), Value::from("one"));
    assert_eq!(decoder.decode().unwrap(), Value::from(2));
    assert_eq!(decoder.remaining(), 0);
    assert!(matches!(decoder.decode(), Err(Error::OutOfRange { .. })));
}

#[test]
fn test_decoded_bytes_outlive_buffer() {
    let buf = serialize(&Value::Bytes(vec![1, 2, 3])).unwrap();
    let value = deserialize(&buf).unwrap();
    drop(buf);
    assert_eq!(value.as_bytes(), Some(&[1u8, 2, 3][..]));
}

#[test]
fn test_size_class_minimality() {
    assert_eq!(size_class(0), 1);
    assert_eq!(size_class(255), 1);
    assert_eq!(size_class(256), 2);
    assert_eq!(size_class(65535), 2);
    assert_eq!(size_class(65536), 4);
    assert_eq!(size_class(4_294_967_295), 4);
    assert_eq!(size_class(4_294_967_296), 8);
}

#[test]
fn test_tag_nibbles() {
    let tags = [
        (Tag::Mapping, 0x0),
        (Tag::Sequence, 0x2),
        (Tag::Bytes, 0x4),
        (Tag::Text, 0x6),
        (Tag::Bool, 0x8),
        (Tag::SignedInt, 0xA),
        (Tag::UnsignedInt, 0xC),
        (Tag::Float, 0xE),
        (Tag::Null, 0xF),
    ];
    for (tag, nibble) in tags {
        assert_eq!(tag.nibble(), nibble);
        assert_eq!(Tag::from_nibble(nibble), Ok(tag));
    }
}
