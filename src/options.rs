//! Conversion configuration.
//!
//! [`CodecOptions`] collects every knob that influences adapter
//! construction and stream formatting. It is assembled with consuming
//! `with_*` builders and handed once to [`Codec::new`](crate::Codec::new);
//! nothing changes it afterwards.
//!
//! ## Examples
//!
//! ```rust
//! use tyson::{CodecOptions, FieldNamingPolicy, Modifiers};
//!
//! let options = CodecOptions::pretty()
//!     .with_naming_policy(FieldNamingPolicy::LowerCamelCase)
//!     .with_serialize_nulls(true)
//!     .with_version(1.1)
//!     .with_excluded_modifiers(Modifiers::STATIC);
//!
//! assert_eq!(options.indent.as_deref(), Some("  "));
//! assert!(options.serialize_nulls);
//! ```

use crate::adapter::{AdapterFactory, AdapterRef, ExactFactory, HierarchyFactory};
use crate::construct::InstanceCreator;
use crate::exclusion::ExclusionStrategy;
use crate::{FieldNamingPolicy, Modifiers, TypeCatalog, TypeSignature, WriterOptions};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The immutable configuration bundle consumed by the registry.
#[derive(Clone)]
pub struct CodecOptions {
    pub naming_policy: FieldNamingPolicy,
    /// chrono `strftime` pattern for dates; RFC 3339 when unset.
    pub date_pattern: Option<String>,
    /// Write `null` members instead of omitting them.
    pub serialize_nulls: bool,
    /// Indentation unit; compact output when unset.
    pub indent: Option<String>,
    pub lenient: bool,
    pub html_safe: bool,
    /// Permit `NaN` and the infinities in output.
    pub serialize_special_floats: bool,
    /// Current version checked against `since`/`until` markers.
    pub version: Option<f64>,
    pub exclude_fields_without_expose: bool,
    pub excluded_modifiers: Modifiers,
    pub catalog: TypeCatalog,
    pub(crate) factories: Vec<Arc<dyn AdapterFactory>>,
    pub(crate) hierarchy_factories: Vec<Arc<dyn AdapterFactory>>,
    pub(crate) serialization_exclusions: Vec<Arc<dyn ExclusionStrategy>>,
    pub(crate) deserialization_exclusions: Vec<Arc<dyn ExclusionStrategy>>,
    pub(crate) instance_creators: HashMap<String, Arc<dyn InstanceCreator>>,
}

impl Default for CodecOptions {
    fn default() -> Self {
        CodecOptions {
            naming_policy: FieldNamingPolicy::Identity,
            date_pattern: None,
            serialize_nulls: false,
            indent: None,
            lenient: false,
            html_safe: false,
            serialize_special_floats: false,
            version: None,
            exclude_fields_without_expose: false,
            excluded_modifiers: Modifiers::STATIC | Modifiers::TRANSIENT,
            catalog: TypeCatalog::new(),
            factories: Vec::new(),
            hierarchy_factories: Vec::new(),
            serialization_exclusions: Vec::new(),
            deserialization_exclusions: Vec::new(),
            instance_creators: HashMap::new(),
        }
    }
}

impl fmt::Debug for CodecOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecOptions")
            .field("naming_policy", &self.naming_policy)
            .field("date_pattern", &self.date_pattern)
            .field("serialize_nulls", &self.serialize_nulls)
            .field("indent", &self.indent)
            .field("lenient", &self.lenient)
            .field("html_safe", &self.html_safe)
            .field("serialize_special_floats", &self.serialize_special_floats)
            .field("version", &self.version)
            .field(
                "exclude_fields_without_expose",
                &self.exclude_fields_without_expose,
            )
            .field("excluded_modifiers", &self.excluded_modifiers)
            .field("factories", &self.factories.len())
            .field("hierarchy_factories", &self.hierarchy_factories.len())
            .finish_non_exhaustive()
    }
}

impl CodecOptions {
    /// Compact output, nulls omitted, strict grammar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`new`](CodecOptions::new) with two-space indentation.
    #[must_use]
    pub fn pretty() -> Self {
        Self::default().with_indent("  ")
    }

    #[must_use]
    pub fn with_naming_policy(mut self, policy: FieldNamingPolicy) -> Self {
        self.naming_policy = policy;
        self
    }

    #[must_use]
    pub fn with_date_pattern(mut self, pattern: &str) -> Self {
        self.date_pattern = Some(pattern.to_string());
        self
    }

    #[must_use]
    pub fn with_serialize_nulls(mut self, serialize_nulls: bool) -> Self {
        self.serialize_nulls = serialize_nulls;
        self
    }

    /// Sets the indentation unit; an empty string means compact output.
    #[must_use]
    pub fn with_indent(mut self, indent: &str) -> Self {
        self.indent = (!indent.is_empty()).then(|| indent.to_string());
        self
    }

    #[must_use]
    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    #[must_use]
    pub fn with_html_safe(mut self, html_safe: bool) -> Self {
        self.html_safe = html_safe;
        self
    }

    #[must_use]
    pub fn with_serialize_special_floats(mut self, allow: bool) -> Self {
        self.serialize_special_floats = allow;
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: f64) -> Self {
        self.version = Some(version);
        self
    }

    #[must_use]
    pub fn with_exclude_fields_without_expose(mut self, exclude: bool) -> Self {
        self.exclude_fields_without_expose = exclude;
        self
    }

    #[must_use]
    pub fn with_excluded_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.excluded_modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: TypeCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Appends a user factory; user factories run before the built-ins,
    /// in registration order.
    #[must_use]
    pub fn with_factory(mut self, factory: Arc<dyn AdapterFactory>) -> Self {
        self.factories.push(factory);
        self
    }

    /// Registers `adapter` for exactly `signature`.
    #[must_use]
    pub fn with_type_adapter(self, signature: TypeSignature, adapter: AdapterRef) -> Self {
        self.with_factory(Arc::new(ExactFactory::for_signature(signature, adapter)))
    }

    /// Appends a factory tried after every exact-match factory.
    #[must_use]
    pub fn with_hierarchy_factory(mut self, factory: Arc<dyn AdapterFactory>) -> Self {
        self.hierarchy_factories.push(factory);
        self
    }

    /// Registers `adapter` for the record `base` and all its descendants.
    #[must_use]
    pub fn with_hierarchy_adapter(self, base: &str, adapter: AdapterRef) -> Self {
        self.with_hierarchy_factory(Arc::new(HierarchyFactory::new(base, adapter)))
    }

    /// Applies `strategy` when writing and when reading.
    #[must_use]
    pub fn with_exclusion_strategy(mut self, strategy: Arc<dyn ExclusionStrategy>) -> Self {
        self.serialization_exclusions.push(strategy.clone());
        self.deserialization_exclusions.push(strategy);
        self
    }

    #[must_use]
    pub fn with_serialization_exclusion(mut self, strategy: Arc<dyn ExclusionStrategy>) -> Self {
        self.serialization_exclusions.push(strategy);
        self
    }

    #[must_use]
    pub fn with_deserialization_exclusion(mut self, strategy: Arc<dyn ExclusionStrategy>) -> Self {
        self.deserialization_exclusions.push(strategy);
        self
    }

    /// Supplies blank instances of the record `raw`.
    #[must_use]
    pub fn with_instance_creator(mut self, raw: &str, creator: Arc<dyn InstanceCreator>) -> Self {
        self.instance_creators.insert(raw.to_string(), creator);
        self
    }

    /// The writer configuration implied by these options.
    #[must_use]
    pub fn writer_options(&self) -> WriterOptions {
        WriterOptions {
            indent: self.indent.clone(),
            lenient: self.lenient,
            serialize_nulls: self.serialize_nulls,
            html_safe: self.html_safe,
            allow_non_finite: self.serialize_special_floats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CodecOptions::new();
        assert!(!options.serialize_nulls);
        assert!(!options.lenient);
        assert_eq!(
            options.excluded_modifiers,
            Modifiers::STATIC | Modifiers::TRANSIENT
        );
        assert!(options.indent.is_none());
    }

    #[test]
    fn test_writer_options_follow_codec_options() {
        let writer = CodecOptions::pretty()
            .with_serialize_nulls(true)
            .with_serialize_special_floats(true)
            .with_html_safe(true)
            .writer_options();
        assert_eq!(writer.indent.as_deref(), Some("  "));
        assert!(writer.serialize_nulls);
        assert!(writer.allow_non_finite);
        assert!(writer.html_safe);
        assert!(!writer.lenient);
    }
}
