//! Printing the frame layout of a few values.
//!
//! Run with: cargo run --example wire_layout

use serde_jsobs::{estimate, jsobs, serialize, size_class, Header, Tag, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let samples = [
        jsobs!(null),
        jsobs!(true),
        jsobs!(1),
        jsobs!("hi"),
        Value::Bytes(vec![0; 300]),
        jsobs!([1, "a", null]),
        jsobs!({ "a": true }),
    ];

    for value in &samples {
        let bytes = serialize(value)?;
        let preview = &bytes[..bytes.len().min(12)];
        println!(
            "{:<8} estimate={:<4} header=0x{:02X} {:02X?}{}",
            value.kind(),
            estimate(value)?,
            bytes[0],
            preview,
            if bytes.len() > preview.len() { " ..." } else { "" }
        );
    }

    println!("\nLength field widths:");
    for length in [0u64, 255, 256, 65_535, 65_536, 1 << 32] {
        let header = Header::new(Tag::Text, length);
        println!(
            "  {:>12} -> {} byte(s), header 0x{:02X}",
            length,
            size_class(length),
            header.byte()
        );
    }

    Ok(())
}
