/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// ```rust
/// use tyson::{json, Value};
///
/// let v = json!({ "name": "Alice", "tags": ["a", "b"], "admin": false });
/// assert_eq!(v.get("name"), Some(&Value::from("Alice")));
/// ```
#[macro_export]
macro_rules! json {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::json!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::json!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Any other expression goes through `From`.
    ($s:expr) => {
        $crate::Value::from($s)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Map, Number, Value};

    #[test]
    fn test_json_macro_primitives() {
        assert_eq!(json!(null), Value::Null);
        assert_eq!(json!(true), Value::Bool(true));
        assert_eq!(json!(42), Value::Number(Number::Integer(42)));
        assert_eq!(json!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(json!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_json_macro_nested() {
        assert_eq!(json!({}), Value::Object(Map::new()));

        let obj = json!({
            "name": "Alice",
            "scores": [1, 2]
        });
        let map = obj.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get("scores"),
            Some(&Value::Array(vec![Value::from(1), Value::from(2)]))
        );
    }
}
