//! Adapters for text, booleans, bounded integers and floats.

use crate::adapter::{AdapterFactory, AdapterRef, TypeAdapter};
use crate::signature::names;
use crate::{Error, JsonReader, JsonWriter, Number, Registry, Result, Token, TypeSignature, Value};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Primitive {
    Str,
    Char,
    Bool,
    Integer {
        name: &'static str,
        min: i64,
        max: i64,
    },
    F32,
    F64,
}

impl Primitive {
    fn for_name(name: &str) -> Option<Self> {
        let integer = |name: &'static str, min: i64, max: i64| Primitive::Integer { name, min, max };
        Some(match name {
            names::STRING => Primitive::Str,
            names::CHAR => Primitive::Char,
            names::BOOL => Primitive::Bool,
            names::I8 => integer(names::I8, i8::MIN.into(), i8::MAX.into()),
            names::I16 => integer(names::I16, i16::MIN.into(), i16::MAX.into()),
            names::I32 => integer(names::I32, i32::MIN.into(), i32::MAX.into()),
            names::I64 => integer(names::I64, i64::MIN, i64::MAX),
            names::U8 => integer(names::U8, 0, u8::MAX.into()),
            names::U16 => integer(names::U16, 0, u16::MAX.into()),
            names::U32 => integer(names::U32, 0, u32::MAX.into()),
            names::U64 => integer(names::U64, 0, i64::MAX),
            names::F32 => Primitive::F32,
            names::F64 => Primitive::F64,
            _ => return None,
        })
    }

    fn name(&self) -> &'static str {
        match self {
            Primitive::Str => names::STRING,
            Primitive::Char => names::CHAR,
            Primitive::Bool => names::BOOL,
            Primitive::Integer { name, .. } => name,
            Primitive::F32 => names::F32,
            Primitive::F64 => names::F64,
        }
    }
}

/// Adapter for one primitive kind.
pub struct PrimitiveAdapter {
    kind: Primitive,
}

fn render_f32(value: f32) -> String {
    if value.abs() >= 1e16 {
        format!("{:e}", value)
    } else if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

impl PrimitiveAdapter {
    fn read_text(input: &mut JsonReader<'_>, expected: &str) -> Result<String> {
        match input.peek()? {
            Token::String | Token::Number => input.next_string(),
            Token::Boolean => input.next_bool().map(|b| b.to_string()),
            found => Err(super::mismatch(input, expected, found)),
        }
    }

    fn read_integer(input: &mut JsonReader<'_>, name: &str, min: i64, max: i64) -> Result<Value> {
        let (line, column) = input.peek_position();
        let path = input.path();
        let number = input.next_number()?;
        match number.as_i64() {
            Some(i) if (min..=max).contains(&i) => Ok(Value::from(i)),
            _ => Err(Error::type_mismatch(
                line,
                column,
                &path,
                name,
                &number.to_string(),
            )),
        }
    }
}

impl TypeAdapter for PrimitiveAdapter {
    fn write(&self, out: &mut JsonWriter, value: &Value) -> Result<()> {
        let mismatch = || Error::value_mismatch(self.kind.name(), value.kind_name());
        match (self.kind, value) {
            (Primitive::Str, Value::String(s)) => out.value_str(s),
            (Primitive::Char, Value::String(s)) if s.chars().count() == 1 => out.value_str(s),
            (Primitive::Bool, Value::Bool(b)) => out.value_bool(*b),
            (Primitive::Integer { min, max, .. }, Value::Number(n)) => match n.as_i64() {
                Some(i) if (min..=max).contains(&i) => out.value_i64(i),
                _ => Err(mismatch()),
            },
            (Primitive::F32, Value::Number(n)) => {
                let narrowed = n.as_f64() as f32;
                if narrowed.is_finite() {
                    out.json_value(&render_f32(narrowed))
                } else {
                    out.value_number(&Number::from_f64(f64::from(narrowed)))
                }
            }
            (Primitive::F64, Value::Number(n)) => out.value_number(&Number::from_f64(n.as_f64())),
            _ => Err(mismatch()),
        }
    }

    fn read(&self, input: &mut JsonReader<'_>) -> Result<Value> {
        match self.kind {
            Primitive::Str => Self::read_text(input, "a string").map(Value::String),
            Primitive::Char => {
                let (line, column) = input.peek_position();
                let path = input.path();
                let text = Self::read_text(input, "a character")?;
                if text.chars().count() == 1 {
                    Ok(Value::String(text))
                } else {
                    Err(Error::type_mismatch(
                        line,
                        column,
                        &path,
                        "a character",
                        &format!("\"{}\"", text),
                    ))
                }
            }
            Primitive::Bool => match input.peek()? {
                Token::String => {
                    let text = input.next_string()?;
                    Ok(Value::Bool(text.eq_ignore_ascii_case("true")))
                }
                _ => input.next_bool().map(Value::Bool),
            },
            Primitive::Integer { name, min, max } => Self::read_integer(input, name, min, max),
            Primitive::F32 => {
                let narrowed = input.next_f64()? as f32;
                Ok(Value::Number(Number::from_f64(f64::from(narrowed))))
            }
            Primitive::F64 => input.next_f64().map(|f| Value::Number(Number::from_f64(f))),
        }
    }
}

pub struct PrimitiveFactory;

impl AdapterFactory for PrimitiveFactory {
    fn create(&self, _: &Registry, signature: &TypeSignature) -> Result<Option<AdapterRef>> {
        let kind = match signature {
            TypeSignature::Plain(name) => Primitive::for_name(name),
            _ => None,
        };
        Ok(kind.map(|kind| Arc::new(PrimitiveAdapter { kind }) as AdapterRef))
    }
}
