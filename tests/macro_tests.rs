use serde_jsobs::{deserialize, jsobs, serialize, Map, Value};

#[test]
fn test_jsobs_macro_null() {
    let value = jsobs!(null);
    assert_eq!(value, Value::Null);
}

#[test]
fn test_jsobs_macro_booleans() {
    assert_eq!(jsobs!(true), Value::Bool(true));
    assert_eq!(jsobs!(false), Value::Bool(false));
}

#[test]
fn test_jsobs_macro_numbers() {
    assert_eq!(jsobs!(42), Value::Number(42.0));
    assert_eq!(jsobs!(3.5), Value::Number(3.5));
    assert_eq!(jsobs!(-123), Value::Number(-123.0));
}

#[test]
fn test_jsobs_macro_text() {
    assert_eq!(jsobs!("hello world"), Value::Text("hello world".to_string()));
    assert_eq!(jsobs!(""), Value::Text(String::new()));
}

#[test]
fn test_jsobs_macro_bytes_expression() {
    let blob = vec![0xCAu8, 0xFE];
    assert_eq!(jsobs!(blob), Value::Bytes(vec![0xCA, 0xFE]));
}

#[test]
fn test_jsobs_macro_sequences() {
    assert_eq!(jsobs!([]), Value::Sequence(vec![]));

    let mixed = jsobs!([1, "hello", true, null]);
    assert_eq!(
        mixed,
        Value::Sequence(vec![
            Value::Number(1.0),
            Value::Text("hello".to_string()),
            Value::Bool(true),
            Value::Null,
        ])
    );
}

#[test]
fn test_jsobs_macro_nested() {
    let nested = jsobs!({
        "user": {
            "id": 123,
            "name": "Bob",
            "active": true
        },
        "tags": ["admin", "developer"],
        "count": 42
    });

    let obj = nested.as_mapping().expect("Expected mapping");
    assert_eq!(obj.len(), 3);
    let keys: Vec<_> = obj.keys().map(String::as_str).collect();
    assert_eq!(keys, ["user", "tags", "count"]);

    let user = obj.get("user").and_then(Value::as_mapping).unwrap();
    assert_eq!(user.get("id"), Some(&Value::Number(123.0)));
    assert_eq!(user.get("name"), Some(&Value::Text("Bob".to_string())));
    assert_eq!(user.get("active"), Some(&Value::Bool(true)));

    assert_eq!(
        obj.get("tags"),
        Some(&Value::Sequence(vec![Value::from("admin"), Value::from("developer")]))
    );
}

#[test]
fn test_jsobs_macro_empty_mapping() {
    assert_eq!(jsobs!({}), Value::Mapping(Map::new()));
}

#[test]
fn test_jsobs_macro_round_trips() {
    let value = jsobs!({
        "a": [1, 2, [3, {"b": null}]],
        "c": "d"
    });
    let bytes = serialize(&value).unwrap();
    assert_eq!(deserialize(&bytes).unwrap(), value);
}
