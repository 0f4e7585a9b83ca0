use std::convert::TryFrom;
use tyson::{json, Map, Number, Value};

#[test]
fn test_json_macro_null() {
    let value = json!(null);
    assert_eq!(value, Value::Null);
}

#[test]
fn test_json_macro_booleans() {
    assert_eq!(json!(true), Value::Bool(true));
    assert_eq!(json!(false), Value::Bool(false));
}

#[test]
fn test_json_macro_numbers() {
    assert_eq!(json!(42), Value::Number(Number::Integer(42)));
    assert_eq!(json!(3.5), Value::Number(Number::Float(3.5)));
    assert_eq!(json!(-123), Value::Number(Number::Integer(-123)));
}

#[test]
fn test_json_macro_strings() {
    assert_eq!(json!("hello world"), Value::String("hello world".to_string()));
    assert_eq!(json!(""), Value::String(String::new()));
}

#[test]
fn test_json_macro_arrays() {
    assert_eq!(json!([]), Value::Array(vec![]));

    let mixed = json!([1, "hello", true, null]);
    assert_eq!(
        mixed,
        Value::Array(vec![
            Value::Number(Number::Integer(1)),
            Value::String("hello".to_string()),
            Value::Bool(true),
            Value::Null,
        ])
    );
}

#[test]
fn test_json_macro_objects_keep_order() {
    assert_eq!(json!({}), Value::Object(Map::new()));

    let object = json!({
        "zeta": 1,
        "alpha": {"nested": [true]},
        "mid": null
    });
    let keys: Vec<_> = object.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    assert_eq!(
        object.get("alpha").and_then(|a| a.get("nested")),
        Some(&json!([true]))
    );
}

#[test]
fn test_value_display_is_compact_json() {
    let value = json!({"name": "Bob", "tags": ["a", "b"], "none": null, "score": 2.0});
    assert_eq!(
        value.to_string(),
        r#"{"name":"Bob","tags":["a","b"],"none":null,"score":2.0}"#
    );
}

#[test]
fn test_value_accessors() {
    let null_val = json!(null);
    assert!(null_val.is_null());
    assert!(!null_val.is_bool());
    assert!(!null_val.is_number());
    assert!(!null_val.is_string());
    assert!(!null_val.is_array());
    assert!(!null_val.is_object());

    assert_eq!(json!(true).as_bool(), Some(true));
    assert_eq!(json!("hello").as_str(), Some("hello"));
    assert_eq!(json!([1, 2, 3]).as_array().map(Vec::len), Some(3));
    assert_eq!(json!(7).as_i64(), Some(7));
    assert_eq!(json!(0.5).as_f64(), Some(0.5));
}

#[test]
fn test_value_try_from() {
    assert_eq!(i64::try_from(json!(12)).unwrap(), 12);
    assert_eq!(String::try_from(json!("x")).unwrap(), "x");
    assert!(bool::try_from(json!("true")).is_err());
}
