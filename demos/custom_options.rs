//! Bounding container nesting with Options.
//!
//! Run with: cargo run --example custom_options

use serde_jsobs::{
    deserialize_with_options, serialize, serialize_with_options, Options, Value,
    DEFAULT_MAX_DEPTH,
};
use std::error::Error;

fn nested(depth: usize) -> Value {
    (0..depth).fold(Value::Null, |inner, _| Value::Sequence(vec![inner]))
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("Default max depth: {}\n", DEFAULT_MAX_DEPTH);

    let value = nested(16);
    let bytes = serialize(&value)?;
    println!("16 nested sequences encode to {} bytes", bytes.len());

    let strict = Options::new().with_max_depth(8);
    match serialize_with_options(&value, &strict) {
        Ok(_) => println!("unexpected: encoded past the limit"),
        Err(err) => println!("encode with max_depth 8: {}", err),
    }
    match deserialize_with_options(&bytes, &strict) {
        Ok(_) => println!("unexpected: decoded past the limit"),
        Err(err) => println!("decode with max_depth 8: {}", err),
    }

    let relaxed = Options::new().with_max_depth(32);
    let back = deserialize_with_options(&bytes, &relaxed)?;
    assert_eq!(back, value);
    println!("decode with max_depth 32: ok");

    Ok(())
}
