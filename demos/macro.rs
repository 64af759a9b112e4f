//! Using the jsobs! macro for dynamic value construction.
//!
//! Run with: cargo run --example macro

use serde_jsobs::{jsobs, serialize, Value};
use std::error::Error;

fn show(label: &str, value: &Value) -> Result<(), Box<dyn Error>> {
    println!("  {:<8} {:<32} {:02X?}", label, value.to_string(), serialize(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("Primitives:");
    show("null", &jsobs!(null))?;
    show("bool", &jsobs!(true))?;
    show("number", &jsobs!(42))?;
    show("text", &jsobs!("Hello, JSOBS!"))?;
    show("bytes", &jsobs!(vec![0xDEu8, 0xAD, 0xBE, 0xEF]))?;

    println!("\nSequences:");
    show("numbers", &jsobs!([1, 2, 3]))?;
    show("mixed", &jsobs!([1, "two", true, null]))?;

    let user = jsobs!({
        "id": 123,
        "name": "Alice",
        "email": "alice@example.com",
        "roles": ["admin", "developer"]
    });

    println!("\nMapping:\n  {}", user);
    println!("  {} bytes on the wire", serialize(&user)?.len());

    Ok(())
}
