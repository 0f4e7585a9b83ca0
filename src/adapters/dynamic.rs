//! The `any` adapter: any token tree to and from [`Value`].

use super::date;
use crate::adapter::{AdapterFactory, AdapterRef, TypeAdapter};
use crate::signature::names;
use crate::{JsonReader, JsonWriter, Map, Number, Registry, Result, Token, TypeSignature, Value};
use num_bigint::BigInt;
use std::sync::Arc;

/// Writes any value. Dates use `date_pattern` (RFC 3339 when `None`),
/// big integers are written as raw numbers, bit sets as `0`/`1` arrays.
pub fn write_value(out: &mut JsonWriter, value: &Value, date_pattern: Option<&str>) -> Result<()> {
    match value {
        Value::Null => out.null_value(),
        Value::Bool(b) => out.value_bool(*b),
        Value::Number(n) => out.value_number(n),
        Value::String(s) => out.value_str(s),
        Value::Array(items) => {
            out.begin_array()?;
            for item in items {
                write_value(out, item, date_pattern)?;
            }
            out.end_array()
        }
        Value::Object(map) => {
            out.begin_object()?;
            for (key, member) in map {
                out.name(key)?;
                write_value(out, member, date_pattern)?;
            }
            out.end_object()
        }
        Value::Date(dt) => out.value_str(&date::format(dt, date_pattern)?),
        Value::BigInt(b) => out.json_value(&b.to_string()),
        Value::Bits(bits) => super::bits::write_bits(out, bits),
    }
}

/// Reads the next value of any shape. Integers wider than `i64` become
/// [`Value::BigInt`].
pub fn read_value(input: &mut JsonReader<'_>) -> Result<Value> {
    match input.peek()? {
        Token::BeginArray => {
            input.begin_array()?;
            let mut items = Vec::new();
            while input.has_next()? {
                items.push(read_value(input)?);
            }
            input.end_array()?;
            Ok(Value::Array(items))
        }
        Token::BeginObject => {
            input.begin_object()?;
            let mut map = Map::new();
            while input.has_next()? {
                let name = input.next_name()?;
                let member = read_value(input)?;
                map.insert(name, member);
            }
            input.end_object()?;
            Ok(Value::Object(map))
        }
        Token::String => input.next_string().map(Value::String),
        Token::Number => {
            let literal = input.next_string()?;
            if is_integral_literal(&literal) && literal.parse::<i64>().is_err() {
                if let Ok(big) = literal.parse::<BigInt>() {
                    return Ok(Value::BigInt(big));
                }
            }
            match Number::parse(&literal) {
                Some(number) => Ok(Value::Number(number)),
                None => Err(super::mismatch(input, "NUMBER", Token::Number)),
            }
        }
        Token::Boolean => input.next_bool().map(Value::Bool),
        Token::Null => {
            input.next_null()?;
            Ok(Value::Null)
        }
        found @ (Token::Name | Token::EndArray | Token::EndObject | Token::EndDocument) => {
            Err(super::mismatch(input, "a value", found))
        }
    }
}

fn is_integral_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

pub struct DynamicAdapter {
    date_pattern: Option<String>,
}

impl TypeAdapter for DynamicAdapter {
    fn write(&self, out: &mut JsonWriter, value: &Value) -> Result<()> {
        write_value(out, value, self.date_pattern.as_deref())
    }

    fn read(&self, input: &mut JsonReader<'_>) -> Result<Value> {
        read_value(input)
    }

    fn is_null_safe(&self) -> bool {
        true
    }
}

pub struct DynamicFactory {
    adapter: AdapterRef,
}

impl DynamicFactory {
    pub fn new(date_pattern: Option<String>) -> Self {
        DynamicFactory {
            adapter: Arc::new(DynamicAdapter { date_pattern }),
        }
    }
}

impl AdapterFactory for DynamicFactory {
    fn create(&self, _: &Registry, signature: &TypeSignature) -> Result<Option<AdapterRef>> {
        let accepts = match signature {
            TypeSignature::Plain(name) => name == names::ANY,
            TypeSignature::Variable { bound: None, .. } => true,
            _ => false,
        };
        Ok(accepts.then(|| self.adapter.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{json, WriterOptions};

    fn round_trip(text: &str) -> String {
        let mut reader = JsonReader::from_str(text);
        let value = read_value(&mut reader).unwrap();
        let mut out = JsonWriter::new(WriterOptions::new());
        write_value(&mut out, &value, None).unwrap();
        out.finish().unwrap()
    }

    #[test]
    fn test_tree_round_trip() {
        let text = r#"{"a":[1,2.5,"x",true,null],"b":{"c":{}}}"#;
        assert_eq!(round_trip(text), text);
    }

    #[test]
    fn test_wide_integer_becomes_bigint() {
        let mut reader = JsonReader::from_str("123456789012345678901234567890");
        let value = read_value(&mut reader).unwrap();
        assert!(matches!(value, Value::BigInt(_)));
        assert_eq!(round_trip("123456789012345678901234567890"), "123456789012345678901234567890");
    }

    #[test]
    fn test_member_order_preserved() {
        let mut reader = JsonReader::from_str(r#"{"z":1,"a":2}"#);
        let value = read_value(&mut reader).unwrap();
        assert_eq!(value, json!({"z": 1, "a": 2}));
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
    }

    #[test]
    fn test_bits_written_as_flags() {
        let mut bits = fixedbitset::FixedBitSet::with_capacity(4);
        bits.insert(1);
        bits.insert(3);
        let mut out = JsonWriter::new(WriterOptions::new());
        write_value(&mut out, &Value::Bits(bits), None).unwrap();
        assert_eq!(out.finish().unwrap(), "[0,1,0,1]");
    }
}
