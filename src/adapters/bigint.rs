//! Arbitrary-precision integer adapter (num-bigint).

use crate::adapter::{AdapterFactory, AdapterRef, TypeAdapter};
use crate::signature::names;
use crate::{Error, JsonReader, JsonWriter, Number, Registry, Result, Token, TypeSignature, Value};
use num_bigint::BigInt;
use std::sync::Arc;

/// Writes big integers as raw numbers; reads number or string tokens.
pub struct BigIntAdapter;

impl TypeAdapter for BigIntAdapter {
    fn write(&self, out: &mut JsonWriter, value: &Value) -> Result<()> {
        match value {
            Value::BigInt(b) => out.json_value(&b.to_string()),
            Value::Number(Number::Integer(i)) => out.value_i64(*i),
            Value::String(s) => match s.trim().parse::<BigInt>() {
                Ok(b) => out.json_value(&b.to_string()),
                Err(_) => Err(Error::value_mismatch("an integer", "string")),
            },
            other => Err(Error::value_mismatch("an integer", other.kind_name())),
        }
    }

    fn read(&self, input: &mut JsonReader<'_>) -> Result<Value> {
        match input.peek()? {
            token @ (Token::Number | Token::String) => {
                let text = input.next_string()?;
                text.trim()
                    .parse::<BigInt>()
                    .map(Value::BigInt)
                    .map_err(|_| super::mismatch(input, "an integer", token))
            }
            found => Err(super::mismatch(input, "an integer", found)),
        }
    }
}

pub struct BigIntFactory;

impl AdapterFactory for BigIntFactory {
    fn create(&self, _: &Registry, signature: &TypeSignature) -> Result<Option<AdapterRef>> {
        Ok((*signature == TypeSignature::plain(names::BIGINT))
            .then(|| Arc::new(BigIntAdapter) as AdapterRef))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, WriterOptions};

    #[test]
    fn test_reads_numbers_and_strings() {
        let big: BigInt = "98765432109876543210".parse().unwrap();
        for text in ["98765432109876543210", "\"98765432109876543210\""] {
            let mut reader = JsonReader::from_str(text);
            assert_eq!(
                BigIntAdapter.read(&mut reader).unwrap(),
                Value::BigInt(big.clone())
            );
        }
    }

    #[test]
    fn test_fraction_rejected() {
        let mut reader = JsonReader::from_str("1.5");
        let err = BigIntAdapter.read(&mut reader).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_written_as_raw_number() {
        let mut out = JsonWriter::new(WriterOptions::new());
        let big: BigInt = "-12345678901234567890".parse().unwrap();
        BigIntAdapter.write(&mut out, &Value::BigInt(big)).unwrap();
        assert_eq!(out.finish().unwrap(), "-12345678901234567890");
    }
}
