//! Registered record and enum shapes.
//!
//! There is no runtime reflection to enumerate the fields of a type, so
//! every record the reflective adapter handles is described once in a
//! [`TypeCatalog`]: its type parameters, its parent, and an ordered list of
//! [`FieldDescriptor`]s.
//!
//! ```rust
//! use tyson::{FieldDescriptor, RecordDescriptor, TypeCatalog, TypeSignature};
//!
//! let catalog = TypeCatalog::new()
//!     .with_record(
//!         RecordDescriptor::new("Animal")
//!             .abstract_record()
//!             .field(FieldDescriptor::new("name", TypeSignature::string())),
//!     )
//!     .with_record(
//!         RecordDescriptor::new("Dog")
//!             .extends(TypeSignature::plain("Animal"))
//!             .field(FieldDescriptor::new("good", TypeSignature::bool())),
//!     );
//!
//! assert!(catalog.is_subtype("Dog", "Animal"));
//! assert!(!catalog.is_subtype("Animal", "Dog"));
//! ```

use crate::{TypeSignature, Value};
use bitflags::bitflags;
use std::collections::{HashMap, HashSet};

bitflags! {
    /// Declaration modifiers of a field.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        /// Belongs to the type rather than the instance.
        const STATIC = 1;
        /// Not part of the persistent state.
        const TRANSIENT = 1 << 1;
        /// Generated by tooling; never converted.
        const SYNTHETIC = 1 << 2;
        const FINAL = 1 << 3;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Modifiers::empty()
    }
}

/// Per-direction opt-in used with
/// [`CodecOptions::with_exclude_fields_without_expose`](crate::CodecOptions::with_exclude_fields_without_expose).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Expose {
    pub serialize: bool,
    pub deserialize: bool,
}

impl Default for Expose {
    fn default() -> Self {
        Expose {
            serialize: true,
            deserialize: true,
        }
    }
}

/// One declared field of a record.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub ident: String,
    pub signature: TypeSignature,
    /// Overrides the naming policy when set.
    pub serialized_name: Option<String>,
    /// Extra names accepted on read.
    pub alternates: Vec<String>,
    pub modifiers: Modifiers,
    pub nullable: bool,
    /// Value the field holds in a blank instance.
    pub default: Value,
    pub since: Option<f64>,
    pub until: Option<f64>,
    pub expose: Option<Expose>,
}

impl FieldDescriptor {
    pub fn new(ident: &str, signature: TypeSignature) -> Self {
        FieldDescriptor {
            ident: ident.to_string(),
            signature,
            serialized_name: None,
            alternates: Vec::new(),
            modifiers: Modifiers::empty(),
            nullable: true,
            default: Value::Null,
            since: None,
            until: None,
            expose: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.serialized_name = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn alternate(mut self, name: &str) -> Self {
        self.alternates.push(name.to_string());
        self
    }

    #[must_use]
    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Marks the field as never null; its adapter is not wrapped null-safe.
    #[must_use]
    pub fn non_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = value;
        self
    }

    #[must_use]
    pub fn since(mut self, version: f64) -> Self {
        self.since = Some(version);
        self
    }

    #[must_use]
    pub fn until(mut self, version: f64) -> Self {
        self.until = Some(version);
        self
    }

    #[must_use]
    pub fn expose(mut self, serialize: bool, deserialize: bool) -> Self {
        self.expose = Some(Expose {
            serialize,
            deserialize,
        });
        self
    }
}

/// A record type: ordered fields plus an optional parent.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordDescriptor {
    pub name: String,
    pub type_params: Vec<String>,
    /// Parent signature; may mention this record's type parameters.
    pub parent: Option<TypeSignature>,
    pub fields: Vec<FieldDescriptor>,
    /// No blank instance can be made without an instance creator.
    pub is_abstract: bool,
    pub since: Option<f64>,
    pub until: Option<f64>,
}

impl RecordDescriptor {
    pub fn new(name: &str) -> Self {
        RecordDescriptor {
            name: name.to_string(),
            type_params: Vec::new(),
            parent: None,
            fields: Vec::new(),
            is_abstract: false,
            since: None,
            until: None,
        }
    }

    #[must_use]
    pub fn type_param(mut self, name: &str) -> Self {
        self.type_params.push(name.to_string());
        self
    }

    #[must_use]
    pub fn extends(mut self, parent: TypeSignature) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn abstract_record(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    #[must_use]
    pub fn since(mut self, version: f64) -> Self {
        self.since = Some(version);
        self
    }

    #[must_use]
    pub fn until(mut self, version: f64) -> Self {
        self.until = Some(version);
        self
    }

    pub(crate) fn param_names(&self) -> Vec<&str> {
        self.type_params.iter().map(String::as_str).collect()
    }
}

/// One constant of an enum.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumConstant {
    pub ident: String,
    pub serialized_name: Option<String>,
    pub alternates: Vec<String>,
}

impl EnumConstant {
    pub fn new(ident: &str) -> Self {
        EnumConstant {
            ident: ident.to_string(),
            serialized_name: None,
            alternates: Vec::new(),
        }
    }

    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.serialized_name = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn alternate(mut self, name: &str) -> Self {
        self.alternates.push(name.to_string());
        self
    }

    /// The name written to the stream.
    #[must_use]
    pub fn name(&self) -> &str {
        self.serialized_name.as_deref().unwrap_or(&self.ident)
    }
}

/// An enum type: an ordered list of constants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: String,
    pub constants: Vec<EnumConstant>,
}

impl EnumDescriptor {
    pub fn new(name: &str) -> Self {
        EnumDescriptor {
            name: name.to_string(),
            constants: Vec::new(),
        }
    }

    #[must_use]
    pub fn constant(mut self, constant: EnumConstant) -> Self {
        self.constants.push(constant);
        self
    }

    /// Adds plain constants named after their identifiers.
    #[must_use]
    pub fn constants(mut self, idents: &[&str]) -> Self {
        self.constants
            .extend(idents.iter().map(|ident| EnumConstant::new(ident)));
        self
    }
}

/// All registered records and enums, keyed by raw identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeCatalog {
    records: HashMap<String, RecordDescriptor>,
    enums: HashMap<String, EnumDescriptor>,
}

impl TypeCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_record(mut self, record: RecordDescriptor) -> Self {
        self.register_record(record);
        self
    }

    #[must_use]
    pub fn with_enum(mut self, descriptor: EnumDescriptor) -> Self {
        self.register_enum(descriptor);
        self
    }

    /// Adds or replaces a record.
    pub fn register_record(&mut self, record: RecordDescriptor) {
        self.records.insert(record.name.clone(), record);
    }

    /// Adds or replaces an enum.
    pub fn register_enum(&mut self, descriptor: EnumDescriptor) {
        self.enums.insert(descriptor.name.clone(), descriptor);
    }

    #[must_use]
    pub fn record(&self, name: &str) -> Option<&RecordDescriptor> {
        self.records.get(name)
    }

    #[must_use]
    pub fn enum_descriptor(&self, name: &str) -> Option<&EnumDescriptor> {
        self.enums.get(name)
    }

    /// Returns `true` if `raw` is `base` or descends from it.
    #[must_use]
    pub fn is_subtype(&self, raw: &str, base: &str) -> bool {
        let mut seen = HashSet::new();
        let mut current = Some(raw);
        while let Some(name) = current {
            if name == base {
                return true;
            }
            if !seen.insert(name) {
                return false;
            }
            current = self
                .records
                .get(name)
                .and_then(|record| record.parent.as_ref())
                .map(TypeSignature::raw);
        }
        false
    }
}
