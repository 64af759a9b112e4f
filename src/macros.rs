/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// ```rust
/// use serde_jsobs::{jsobs, Value};
///
/// let value = jsobs!({
///     "name": "Alice",
///     "tags": ["rust", "binary"],
///     "active": true,
///     "manager": null
/// });
/// assert_eq!(value.as_mapping().map(|m| m.len()), Some(4));
/// ```
#[macro_export]
macro_rules! jsobs {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty sequence
    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    // Handle non-empty sequence
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::jsobs!($elem)),*])
    };

    // Handle empty mapping
    ({}) => {
        $crate::Value::Mapping($crate::Map::new())
    };

    // Handle non-empty mapping
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut mapping = $crate::Map::new();
        $(
            mapping.insert($key.to_string(), $crate::jsobs!($value));
        )*
        $crate::Value::Mapping(mapping)
    }};

    // Anything with a `From` conversion into Value
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
