//! Catalogue enums, converted by constant name.

use crate::adapter::{AdapterFactory, AdapterRef, TypeAdapter};
use crate::{EnumDescriptor, Error, JsonReader, JsonWriter, Registry, Result, TypeSignature, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Writes a constant's serialized name; reads it back by that name or any
/// alternate. Unknown names read as `Value::Null`.
pub struct EnumAdapter {
    name: String,
    by_ident: HashMap<String, String>,
    by_name: HashMap<String, String>,
}

impl EnumAdapter {
    pub fn new(descriptor: &EnumDescriptor) -> Self {
        let mut by_ident = HashMap::new();
        let mut by_name = HashMap::new();
        for constant in &descriptor.constants {
            by_ident.insert(constant.ident.clone(), constant.name().to_string());
            for alternate in &constant.alternates {
                by_name
                    .entry(alternate.clone())
                    .or_insert_with(|| constant.ident.clone());
            }
            by_name.insert(constant.name().to_string(), constant.ident.clone());
        }
        EnumAdapter {
            name: descriptor.name.clone(),
            by_ident,
            by_name,
        }
    }
}

impl TypeAdapter for EnumAdapter {
    fn write(&self, out: &mut JsonWriter, value: &Value) -> Result<()> {
        match value.as_str().and_then(|ident| self.by_ident.get(ident)) {
            Some(name) => out.value_str(name),
            None => Err(Error::value_mismatch(
                &format!("a constant of {}", self.name),
                value.kind_name(),
            )),
        }
    }

    fn read(&self, input: &mut JsonReader<'_>) -> Result<Value> {
        let text = input.next_string()?;
        Ok(self
            .by_name
            .get(&text)
            .map_or(Value::Null, |ident| Value::String(ident.clone())))
    }
}

pub struct EnumFactory;

impl AdapterFactory for EnumFactory {
    fn create(&self, registry: &Registry, signature: &TypeSignature) -> Result<Option<AdapterRef>> {
        let TypeSignature::Plain(name) = signature else {
            return Ok(None);
        };
        Ok(registry
            .catalog()
            .enum_descriptor(name)
            .map(|descriptor| Arc::new(EnumAdapter::new(descriptor)) as AdapterRef))
    }
}
