//! Arrays, lists, sets and maps.
//!
//! Element adapters come from the registry and are wrapped null-safe, so a
//! collection of records may hold nulls. A raw `list`, `set` or `map`
//! converts its elements with the `any` adapter.

use crate::adapter::{null_safe, AdapterFactory, AdapterRef, TypeAdapter};
use crate::signature::names;
use crate::{Error, JsonReader, JsonWriter, Map, Registry, Result, Token, TypeSignature, Value};
use std::sync::Arc;

/// Converts `array-of(T)`, `list<T>` and `set<T>`.
pub struct SequenceAdapter {
    element: AdapterRef,
    unique: bool,
}

impl TypeAdapter for SequenceAdapter {
    fn write(&self, out: &mut JsonWriter, value: &Value) -> Result<()> {
        let Value::Array(items) = value else {
            return Err(Error::value_mismatch("array", value.kind_name()));
        };
        out.begin_array()?;
        for item in items {
            self.element.write(out, item)?;
        }
        out.end_array()
    }

    fn read(&self, input: &mut JsonReader<'_>) -> Result<Value> {
        input.begin_array()?;
        let mut items: Vec<Value> = Vec::new();
        while input.has_next()? {
            let item = self.element.read(input)?;
            if !self.unique || !items.contains(&item) {
                items.push(item);
            }
        }
        input.end_array()?;
        Ok(Value::Array(items))
    }
}

/// Converts `map<K, V>` to and from an object keyed by the rendered key.
pub struct MapAdapter {
    key: AdapterRef,
    value: AdapterRef,
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl MapAdapter {
    fn insert(input: &JsonReader<'_>, map: &mut Map, key: Value, value: Value) -> Result<()> {
        let key = key_text(&key);
        if map.contains_key(&key) {
            let (line, column) = input.peek_position();
            return Err(Error::syntax(
                line,
                column,
                &input.path(),
                &format!("duplicate key: {}", key),
            ));
        }
        map.insert(key, value);
        Ok(())
    }
}

impl TypeAdapter for MapAdapter {
    fn write(&self, out: &mut JsonWriter, value: &Value) -> Result<()> {
        let Value::Object(map) = value else {
            return Err(Error::value_mismatch("map", value.kind_name()));
        };
        out.begin_object()?;
        for (key, member) in map {
            out.name(key)?;
            self.value.write(out, member)?;
        }
        out.end_object()
    }

    fn read(&self, input: &mut JsonReader<'_>) -> Result<Value> {
        let mut map = Map::new();
        match input.peek()? {
            Token::BeginArray => {
                input.begin_array()?;
                while input.has_next()? {
                    input.begin_array()?;
                    let key = self.key.read(input)?;
                    let value = self.value.read(input)?;
                    input.end_array()?;
                    Self::insert(input, &mut map, key, value)?;
                }
                input.end_array()?;
            }
            _ => {
                input.begin_object()?;
                while input.has_next()? {
                    input.promote_name_to_value()?;
                    let key = self.key.read(input)?;
                    let value = self.value.read(input)?;
                    Self::insert(input, &mut map, key, value)?;
                }
                input.end_object()?;
            }
        }
        Ok(Value::Object(map))
    }
}

pub struct CollectionFactory;

impl CollectionFactory {
    fn argument(signature: &TypeSignature, index: usize) -> TypeSignature {
        signature
            .args()
            .get(index)
            .cloned()
            .unwrap_or_else(TypeSignature::any)
    }

    fn element(registry: &Registry, signature: &TypeSignature) -> Result<AdapterRef> {
        registry.resolve(signature).map(null_safe)
    }
}

impl AdapterFactory for CollectionFactory {
    fn create(&self, registry: &Registry, signature: &TypeSignature) -> Result<Option<AdapterRef>> {
        if let Some(element) = signature.element() {
            return Ok(Some(Arc::new(SequenceAdapter {
                element: Self::element(registry, element)?,
                unique: false,
            })));
        }
        let arity = signature.args().len();
        let adapter: AdapterRef = if signature.is_raw(names::LIST) || signature.is_raw(names::SET) {
            if arity > 1 {
                return Err(Error::configuration(format!(
                    "{} takes one type argument",
                    signature
                )));
            }
            Arc::new(SequenceAdapter {
                element: Self::element(registry, &Self::argument(signature, 0))?,
                unique: signature.is_raw(names::SET),
            })
        } else if signature.is_raw(names::MAP) {
            if arity != 0 && arity != 2 {
                return Err(Error::configuration(format!(
                    "{} takes two type arguments",
                    signature
                )));
            }
            Arc::new(MapAdapter {
                key: registry.resolve(&Self::argument(signature, 0))?,
                value: Self::element(registry, &Self::argument(signature, 1))?,
            })
        } else {
            return Ok(None);
        };
        Ok(Some(adapter))
    }
}
