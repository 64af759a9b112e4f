//! Working with Value for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_jsobs::{deserialize, from_value, jsobs, serialize, to_value, Value};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = jsobs!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging", "metrics"],
        "debug": true
    });

    let bytes = serialize(&config)?;
    println!("Config: {}\nEncoded: {} bytes\n", config, bytes.len());

    let decoded = deserialize(&bytes)?;
    if let Value::Mapping(obj) = &decoded {
        if let Some(host) = obj.get("host").and_then(Value::as_str) {
            println!("Accessing field 'host': {}", host);
        }

        if let Some(port) = obj.get("port").and_then(Value::as_i64) {
            println!("Accessing field 'port': {}", port);
        }

        if let Some(features) = obj.get("features").and_then(Value::as_sequence) {
            println!("Accessing field 'features': {} items\n", features.len());
        }
    }

    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let mut user_value = to_value(&user)?;
    println!("User as Value: {}", user_value);
    println!("  kind:        {}", user_value.kind());
    println!("  is_mapping:  {}", user_value.is_mapping());
    println!("  is_sequence: {}", user_value.is_sequence());

    if let Value::Mapping(map) = &mut user_value {
        map.insert("id".to_string(), Value::from(124));
    }
    let edited: User = from_value(user_value)?;
    println!("\nEdited user: {:?}", edited);

    Ok(())
}
