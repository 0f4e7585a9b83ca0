//! Bit-vector adapter (fixedbitset).
//!
//! A bit set is written as an array of `0`/`1` flags up to its highest set
//! bit. Reading accepts numbers (zero or non-zero), booleans and numeric
//! strings for each flag.

use crate::adapter::{AdapterFactory, AdapterRef, TypeAdapter};
use crate::signature::names;
use crate::{Error, JsonReader, JsonWriter, Registry, Result, Token, TypeSignature, Value};
use fixedbitset::FixedBitSet;
use std::sync::Arc;

/// Writes `bits` as a flag array ending at the highest set bit.
pub fn write_bits(out: &mut JsonWriter, bits: &FixedBitSet) -> Result<()> {
    out.begin_array()?;
    let end = bits.ones().last().map_or(0, |highest| highest + 1);
    for i in 0..end {
        out.value_i64(i64::from(bits.contains(i)))?;
    }
    out.end_array()
}

fn read_flag(input: &mut JsonReader<'_>) -> Result<bool> {
    match input.peek()? {
        Token::Number => Ok(input.next_i64()? != 0),
        Token::Boolean => input.next_bool(),
        Token::String => {
            let (line, column) = input.peek_position();
            let path = input.path();
            let text = input.next_string()?;
            match text.trim().parse::<i64>() {
                Ok(flag) => Ok(flag != 0),
                Err(_) => Err(Error::type_mismatch(
                    line,
                    column,
                    &path,
                    "a bit flag",
                    &format!("\"{}\"", text),
                )),
            }
        }
        found => Err(super::mismatch(input, "a bit flag", found)),
    }
}

pub struct BitSetAdapter;

impl TypeAdapter for BitSetAdapter {
    fn write(&self, out: &mut JsonWriter, value: &Value) -> Result<()> {
        match value {
            Value::Bits(bits) => write_bits(out, bits),
            other => Err(Error::value_mismatch("bitset", other.kind_name())),
        }
    }

    fn read(&self, input: &mut JsonReader<'_>) -> Result<Value> {
        input.begin_array()?;
        let mut set = Vec::new();
        let mut index = 0usize;
        while input.has_next()? {
            if read_flag(input)? {
                set.push(index);
            }
            index += 1;
        }
        input.end_array()?;
        let mut bits = FixedBitSet::with_capacity(set.last().map_or(0, |highest| highest + 1));
        bits.extend(set);
        Ok(Value::Bits(bits))
    }
}

pub struct BitSetFactory;

impl AdapterFactory for BitSetFactory {
    fn create(&self, _: &Registry, signature: &TypeSignature) -> Result<Option<AdapterRef>> {
        Ok((*signature == TypeSignature::plain(names::BITSET))
            .then(|| Arc::new(BitSetAdapter) as AdapterRef))
    }
}
