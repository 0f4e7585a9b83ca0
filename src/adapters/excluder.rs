//! Type- and field-level exclusion.
//!
//! The [`Excluder`] answers "is this left out?" for both directions. As a
//! factory it intercepts excluded types: they write as `null` and their
//! input is skipped, while the direction that is still included delegates
//! to whatever adapter would otherwise have applied.

use crate::adapter::{AdapterFactory, AdapterRef, TypeAdapter};
use crate::exclusion::{ExclusionStrategy, FieldAttributes};
use crate::{
    CodecOptions, FieldDescriptor, JsonReader, JsonWriter, Modifiers, Registry, Result,
    TypeCatalog, TypeSignature, Value,
};
use std::sync::Arc;

pub struct Excluder {
    version: Option<f64>,
    modifiers: Modifiers,
    require_expose: bool,
    catalog: TypeCatalog,
    serialization: Vec<Arc<dyn ExclusionStrategy>>,
    deserialization: Vec<Arc<dyn ExclusionStrategy>>,
}

impl Excluder {
    pub fn from_options(options: &CodecOptions) -> Self {
        Excluder {
            version: options.version,
            modifiers: options.excluded_modifiers,
            require_expose: options.exclude_fields_without_expose,
            catalog: options.catalog.clone(),
            serialization: options.serialization_exclusions.clone(),
            deserialization: options.deserialization_exclusions.clone(),
        }
    }

    fn strategies(&self, serialize: bool) -> &[Arc<dyn ExclusionStrategy>] {
        if serialize {
            &self.serialization
        } else {
            &self.deserialization
        }
    }

    /// `true` when `since`/`until` place the item outside the configured
    /// version. Without a version nothing is excluded.
    fn outside_version(&self, since: Option<f64>, until: Option<f64>) -> bool {
        let Some(version) = self.version else {
            return false;
        };
        since.map_or(false, |since| since > version) || until.map_or(false, |until| until <= version)
    }

    pub fn excludes_type(&self, signature: &TypeSignature, serialize: bool) -> bool {
        if let Some(record) = self.catalog.record(signature.raw()) {
            if self.outside_version(record.since, record.until) {
                return true;
            }
        }
        self.strategies(serialize)
            .iter()
            .any(|strategy| strategy.should_skip_type(signature))
    }

    pub fn excludes_field(&self, declaring: &str, field: &FieldDescriptor, serialize: bool) -> bool {
        if field.modifiers.intersects(self.modifiers | Modifiers::SYNTHETIC) {
            return true;
        }
        if self.outside_version(field.since, field.until) {
            return true;
        }
        if self.require_expose {
            let exposed = field.expose.map_or(false, |expose| {
                if serialize {
                    expose.serialize
                } else {
                    expose.deserialize
                }
            });
            if !exposed {
                return true;
            }
        }
        let attributes = FieldAttributes::new(declaring, field);
        self.strategies(serialize)
            .iter()
            .any(|strategy| strategy.should_skip_field(&attributes))
    }
}

/// Stands in for an excluded type in one or both directions.
struct ExcludedAdapter {
    skip_write: bool,
    skip_read: bool,
    delegate: Option<AdapterRef>,
}

impl TypeAdapter for ExcludedAdapter {
    fn write(&self, out: &mut JsonWriter, value: &Value) -> Result<()> {
        match &self.delegate {
            Some(delegate) if !self.skip_write => delegate.write(out, value),
            _ => out.null_value(),
        }
    }

    fn read(&self, input: &mut JsonReader<'_>) -> Result<Value> {
        match &self.delegate {
            Some(delegate) if !self.skip_read => delegate.read(input),
            _ => {
                input.skip_value()?;
                Ok(Value::Null)
            }
        }
    }

    fn is_null_safe(&self) -> bool {
        self.delegate.is_none()
    }
}

impl AdapterFactory for Excluder {
    fn create(&self, registry: &Registry, signature: &TypeSignature) -> Result<Option<AdapterRef>> {
        let skip_write = self.excludes_type(signature, true);
        let skip_read = self.excludes_type(signature, false);
        if !skip_write && !skip_read {
            return Ok(None);
        }
        let delegate = if skip_write && skip_read {
            None
        } else {
            Some(registry.resolve_skipping(self, signature)?)
        };
        Ok(Some(Arc::new(ExcludedAdapter {
            skip_write,
            skip_read,
            delegate,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclusion::SkipTypes;
    use crate::{RecordDescriptor, WriterOptions};

    fn field() -> FieldDescriptor {
        FieldDescriptor::new("secret", TypeSignature::string())
    }

    #[test]
    fn test_modifiers_and_synthetic() {
        let excluder = Excluder::from_options(&CodecOptions::new());
        assert!(!excluder.excludes_field("R", &field(), true));
        assert!(excluder.excludes_field("R", &field().modifiers(Modifiers::TRANSIENT), true));
        assert!(excluder.excludes_field("R", &field().modifiers(Modifiers::SYNTHETIC), false));
        assert!(!excluder.excludes_field("R", &field().modifiers(Modifiers::FINAL), true));
    }

    #[test]
    fn test_versions() {
        let excluder = Excluder::from_options(&CodecOptions::new().with_version(1.5));
        assert!(!excluder.excludes_field("R", &field().since(1.5), true));
        assert!(excluder.excludes_field("R", &field().since(2.0), true));
        assert!(excluder.excludes_field("R", &field().until(1.5), true));
        assert!(!excluder.excludes_field("R", &field().until(1.6), true));

        let unversioned = Excluder::from_options(&CodecOptions::new());
        assert!(!unversioned.excludes_field("R", &field().since(9.0), true));
    }

    #[test]
    fn test_expose_is_directional() {
        let excluder =
            Excluder::from_options(&CodecOptions::new().with_exclude_fields_without_expose(true));
        assert!(excluder.excludes_field("R", &field(), true));
        let write_only = field().expose(true, false);
        assert!(!excluder.excludes_field("R", &write_only, true));
        assert!(excluder.excludes_field("R", &write_only, false));
    }

    #[test]
    fn test_record_version_excludes_type() {
        let catalog =
            TypeCatalog::new().with_record(RecordDescriptor::new("Legacy").until(1.0));
        let excluder =
            Excluder::from_options(&CodecOptions::new().with_catalog(catalog).with_version(1.0));
        assert!(excluder.excludes_type(&TypeSignature::plain("Legacy"), true));
        assert!(!excluder.excludes_type(&TypeSignature::string(), true));
    }

    #[test]
    fn test_excluded_type_writes_null_and_skips_input() {
        let options = CodecOptions::new()
            .with_serialize_nulls(true)
            .with_exclusion_strategy(Arc::new(SkipTypes(vec!["string".to_string()])));
        let registry = Registry::new(Arc::new(options));
        let adapter = registry.resolve(&TypeSignature::string()).unwrap();

        let mut out = JsonWriter::new(WriterOptions::new());
        adapter.write(&mut out, &Value::from("hidden")).unwrap();
        assert_eq!(out.finish().unwrap(), "null");

        let mut input = JsonReader::from_str("[\"hidden\", 1]");
        input.begin_array().unwrap();
        assert_eq!(adapter.read(&mut input).unwrap(), Value::Null);
        assert_eq!(input.next_i64().unwrap(), 1);
    }

    #[test]
    fn test_one_direction_delegates() {
        let options = CodecOptions::new()
            .with_serialization_exclusion(Arc::new(SkipTypes(vec!["i32".to_string()])));
        let registry = Registry::new(Arc::new(options));
        let adapter = registry.resolve(&TypeSignature::i32()).unwrap();

        let mut input = JsonReader::from_str("7");
        assert_eq!(adapter.read(&mut input).unwrap(), Value::from(7));
    }
}
