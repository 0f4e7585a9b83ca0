//! Property-based tests for primitive round trips through their canonical
//! adapters, and for the untyped reader/writer pair.

use proptest::prelude::*;
use tyson::{from_str, to_string, Codec, Number, TypeSignature, Value};

fn roundtrip(codec: &Codec, value: &Value, signature: &TypeSignature) -> bool {
    match codec.to_string(value, signature) {
        Ok(text) => match codec.from_str(&text, signature) {
            Ok(back) => back == *value,
            Err(e) => {
                eprintln!("Read failed: {}", e);
                eprintln!("Written was: {}", text);
                false
            }
        },
        Err(e) => {
            eprintln!("Write failed: {}", e);
            false
        }
    }
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e12f64..1.0e12).prop_map(|f| Value::Number(Number::Float(f))),
        large_float().prop_map(|f| Value::Number(Number::Float(f))),
        ".*".prop_map(Value::String),
    ]
}

fn large_float() -> impl Strategy<Value = f64> {
    prop_oneof![1.0e12f64..1.0e300, -1.0e300f64..-1.0e12]
}

fn tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..6).prop_map(|members| {
                let mut map = tyson::Map::new();
                for (key, value) in members {
                    map.insert(key, value);
                }
                Value::Object(map)
            }),
        ]
    })
}

proptest! {
    #[test]
    fn prop_string(s in ".*") {
        prop_assert!(roundtrip(&Codec::default(), &Value::String(s), &TypeSignature::string()));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&Codec::default(), &Value::Bool(b), &TypeSignature::bool()));
    }

    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(&Codec::default(), &Value::from(n), &TypeSignature::i32()));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&Codec::default(), &Value::from(n), &TypeSignature::i64()));
    }

    #[test]
    fn prop_u8(n in any::<u8>()) {
        prop_assert!(roundtrip(&Codec::default(), &Value::from(n), &TypeSignature::plain("u8")));
    }

    #[test]
    fn prop_f64(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let value = Value::Number(Number::from_f64(f));
        prop_assert!(roundtrip(&Codec::default(), &value, &TypeSignature::f64()));
    }

    #[test]
    fn prop_large_float_keeps_its_type(f in large_float()) {
        let value = Value::Number(Number::Float(f));
        prop_assert_eq!(from_str(&to_string(&value).unwrap()).unwrap(), value.clone());
        prop_assert!(roundtrip(&Codec::default(), &value, &TypeSignature::any()));
        prop_assert!(roundtrip(&Codec::default(), &value, &TypeSignature::f64()));
    }

    #[test]
    fn prop_null_for_any_primitive(name in prop::sample::select(vec!["string", "bool", "i16", "f64", "char"])) {
        prop_assert!(roundtrip(&Codec::default(), &Value::Null, &TypeSignature::plain(name)));
    }

    #[test]
    fn prop_untyped_tree(value in tree()) {
        let text = to_string(&value).unwrap();
        prop_assert_eq!(from_str(&text).unwrap(), value);
    }

    #[test]
    fn prop_list_of_i64(items in prop::collection::vec(any::<i64>(), 0..20)) {
        let value = Value::Array(items.into_iter().map(Value::from).collect());
        let signature = TypeSignature::list_of(TypeSignature::i64());
        prop_assert!(roundtrip(&Codec::default(), &value, &signature));
    }
}
