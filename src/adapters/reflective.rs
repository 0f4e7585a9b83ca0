//! Field-by-field conversion of catalogue records.
//!
//! The factory walks a record and its ancestors once, resolving each
//! included field against the declaring context of the concrete
//! instantiation. The resulting bindings are fixed for the lifetime of the
//! adapter. Ancestor fields come first, each level in declaration order.

use super::excluder::Excluder;
use crate::adapter::{null_safe, AdapterFactory, AdapterRef, TypeAdapter};
use crate::construct::Construction;
use crate::{
    DeclaringContext, Error, JsonReader, JsonWriter, RecordDescriptor, Registry, Result, Token,
    TypeSignature, Value,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// One converted field of a record.
struct FieldBinding {
    ident: String,
    name: String,
    adapter: AdapterRef,
    serialize: bool,
    deserialize: bool,
}

pub struct ReflectiveAdapter {
    signature: TypeSignature,
    bindings: Vec<FieldBinding>,
    by_name: HashMap<String, usize>,
    construction: Construction,
}

impl TypeAdapter for ReflectiveAdapter {
    fn write(&self, out: &mut JsonWriter, value: &Value) -> Result<()> {
        let fields = match value {
            Value::Null => return out.null_value(),
            Value::Object(fields) => fields,
            other => {
                return Err(Error::value_mismatch(
                    &self.signature.to_string(),
                    other.kind_name(),
                ))
            }
        };
        out.begin_object()?;
        for binding in self.bindings.iter().filter(|binding| binding.serialize) {
            let field = fields.get(&binding.ident).unwrap_or(&Value::Null);
            if field.is_null() && !out.serialize_nulls() {
                continue;
            }
            out.name(&binding.name)?;
            binding.adapter.write(out, field)?;
        }
        out.end_object()
    }

    fn read(&self, input: &mut JsonReader<'_>) -> Result<Value> {
        match input.peek()? {
            Token::Null => {
                input.next_null()?;
                return Ok(Value::Null);
            }
            Token::BeginObject => {}
            found => return Err(super::mismatch(input, "BEGIN_OBJECT", found)),
        }
        let mut instance = self.construction.blank(&self.signature)?;
        input.begin_object()?;
        while input.has_next()? {
            let name = input.next_name()?;
            match self.by_name.get(&name).map(|&index| &self.bindings[index]) {
                Some(binding) if binding.deserialize => {
                    let value = binding.adapter.read(input)?;
                    instance.insert(binding.ident.clone(), value);
                }
                _ => input.skip_value()?,
            }
        }
        input.end_object()?;
        Ok(Value::Object(instance))
    }

    fn is_null_safe(&self) -> bool {
        true
    }
}

pub struct ReflectiveFactory {
    excluder: Arc<Excluder>,
}

impl ReflectiveFactory {
    pub fn new(excluder: Arc<Excluder>) -> Self {
        ReflectiveFactory { excluder }
    }

    /// The record and its ancestors, each with the context that binds its
    /// type parameters.
    fn levels<'c>(
        registry: &'c Registry,
        record: &'c RecordDescriptor,
        signature: &TypeSignature,
    ) -> Result<Vec<(&'c RecordDescriptor, DeclaringContext)>> {
        let mut seen = HashSet::new();
        let mut levels = Vec::new();
        let mut current = Some((record, signature.clone()));
        while let Some((record, instantiation)) = current.take() {
            if !seen.insert(record.name.as_str()) {
                return Err(Error::configuration(format!(
                    "{} inherits from itself",
                    record.name
                )));
            }
            let context = DeclaringContext::for_instantiation(&record.param_names(), &instantiation)?;
            if let Some(parent) = &record.parent {
                let parent = parent.resolve(&context)?;
                let descriptor = registry.catalog().record(parent.raw()).ok_or_else(|| {
                    Error::configuration(format!(
                        "{} extends {}, which is not a registered record",
                        record.name, parent
                    ))
                })?;
                current = Some((descriptor, parent));
            }
            levels.push((record, context));
        }
        Ok(levels)
    }

    fn bindings(
        &self,
        registry: &Registry,
        signature: &TypeSignature,
        levels: &[(&RecordDescriptor, DeclaringContext)],
    ) -> Result<(Vec<FieldBinding>, HashMap<String, usize>)> {
        let policy = &registry.options().naming_policy;
        let mut bindings = Vec::new();
        let mut by_name = HashMap::new();
        let mut idents = HashSet::new();

        for (record, context) in levels.iter().rev() {
            for field in &record.fields {
                let resolved = field.signature.resolve(context)?;
                let serialize = !self.excluder.excludes_field(&record.name, field, true)
                    && !self.excluder.excludes_type(&resolved, true);
                let deserialize = !self.excluder.excludes_field(&record.name, field, false)
                    && !self.excluder.excludes_type(&resolved, false);
                if !serialize && !deserialize {
                    continue;
                }
                if !idents.insert(field.ident.as_str()) {
                    return Err(Error::configuration(format!(
                        "{} declares field {} more than once",
                        signature, field.ident
                    )));
                }

                let name = field
                    .serialized_name
                    .clone()
                    .unwrap_or_else(|| policy.translate(&field.ident));
                let index = bindings.len();
                for alias in std::iter::once(&name).chain(&field.alternates) {
                    if by_name.insert(alias.clone(), index).is_some() {
                        return Err(Error::configuration(format!(
                            "{} declares multiple fields named {}",
                            signature, alias
                        )));
                    }
                }

                let adapter = registry.resolve(&resolved)?;
                bindings.push(FieldBinding {
                    ident: field.ident.clone(),
                    name,
                    adapter: if field.nullable { null_safe(adapter) } else { adapter },
                    serialize,
                    deserialize,
                });
            }
        }
        Ok((bindings, by_name))
    }
}

impl AdapterFactory for ReflectiveFactory {
    fn create(&self, registry: &Registry, signature: &TypeSignature) -> Result<Option<AdapterRef>> {
        if !matches!(
            signature,
            TypeSignature::Plain(_) | TypeSignature::Parameterized { .. }
        ) {
            return Ok(None);
        }
        let Some(record) = registry.catalog().record(signature.raw()) else {
            return Ok(None);
        };

        let levels = Self::levels(registry, record, signature)?;
        let (bindings, by_name) = self.bindings(registry, signature, &levels)?;
        let records: Vec<&RecordDescriptor> = levels.iter().map(|(record, _)| *record).collect();
        let construction =
            Construction::for_record(&registry.options().instance_creators, signature, &records);

        Ok(Some(Arc::new(ReflectiveAdapter {
            signature: signature.clone(),
            bindings,
            by_name,
            construction,
        })))
    }
}
