//! User-supplied exclusion rules.
//!
//! An [`ExclusionStrategy`] can drop whole types or single fields from
//! conversion. Strategies are registered on
//! [`CodecOptions`](crate::CodecOptions) for both directions or for one
//! direction only, and are consulted once when an adapter is built.

use crate::{FieldDescriptor, Modifiers, TypeSignature};

/// Read-only view of a field handed to exclusion strategies.
#[derive(Clone, Copy, Debug)]
pub struct FieldAttributes<'a> {
    declaring_type: &'a str,
    field: &'a FieldDescriptor,
}

impl<'a> FieldAttributes<'a> {
    pub(crate) fn new(declaring_type: &'a str, field: &'a FieldDescriptor) -> Self {
        FieldAttributes {
            declaring_type,
            field,
        }
    }

    /// The record that declares the field.
    #[must_use]
    pub fn declaring_type(&self) -> &str {
        self.declaring_type
    }

    /// The field identifier.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.field.ident
    }

    /// The declared, unresolved signature.
    #[must_use]
    pub fn declared_signature(&self) -> &TypeSignature {
        &self.field.signature
    }

    #[must_use]
    pub fn has_modifier(&self, modifiers: Modifiers) -> bool {
        self.field.modifiers.intersects(modifiers)
    }
}

/// Decides which fields and types are left out of conversion.
pub trait ExclusionStrategy: Send + Sync {
    fn should_skip_field(&self, field: &FieldAttributes<'_>) -> bool;

    fn should_skip_type(&self, signature: &TypeSignature) -> bool;
}

/// Skips fields by identifier.
pub struct SkipFieldsNamed(pub Vec<String>);

impl ExclusionStrategy for SkipFieldsNamed {
    fn should_skip_field(&self, field: &FieldAttributes<'_>) -> bool {
        self.0.iter().any(|name| name == field.name())
    }

    fn should_skip_type(&self, _: &TypeSignature) -> bool {
        false
    }
}

/// Skips every value of the listed raw types.
pub struct SkipTypes(pub Vec<String>);

impl ExclusionStrategy for SkipTypes {
    fn should_skip_field(&self, _: &FieldAttributes<'_>) -> bool {
        false
    }

    fn should_skip_type(&self, signature: &TypeSignature) -> bool {
        self.0.iter().any(|raw| signature.is_raw(raw))
    }
}
