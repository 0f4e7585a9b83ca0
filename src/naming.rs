//! Field naming policies.
//!
//! A [`FieldNamingPolicy`] maps a field identifier to the name written to
//! the stream when the field carries no explicit serialized name.
//!
//! ```rust
//! use tyson::FieldNamingPolicy;
//!
//! assert_eq!(FieldNamingPolicy::LowerCamelCase.translate("first_name"), "firstName");
//! assert_eq!(FieldNamingPolicy::LowerCaseWithDashes.translate("first_name"), "first-name");
//! ```

use heck::{ToKebabCase, ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToTitleCase, ToUpperCamelCase};
use std::fmt;
use std::sync::Arc;

/// Identifier-to-name transform applied by the reflective adapter.
#[derive(Clone, Default)]
pub enum FieldNamingPolicy {
    /// The identifier unchanged.
    #[default]
    Identity,
    /// `first_name` → `FirstName`
    UpperCamelCase,
    /// `first_name` → `First Name`
    UpperCamelCaseWithSpaces,
    /// `first_name` → `firstName`
    LowerCamelCase,
    /// `firstName` → `first_name`
    LowerCaseWithUnderscores,
    /// `first_name` → `first-name`
    LowerCaseWithDashes,
    /// `first_name` → `first.name`
    LowerCaseWithDots,
    /// `first_name` → `FIRST_NAME`
    UpperCaseWithUnderscores,
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl FieldNamingPolicy {
    /// Builds a policy from a closure.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        FieldNamingPolicy::Custom(Arc::new(f))
    }

    #[must_use]
    pub fn translate(&self, ident: &str) -> String {
        match self {
            FieldNamingPolicy::Identity => ident.to_string(),
            FieldNamingPolicy::UpperCamelCase => ident.to_upper_camel_case(),
            FieldNamingPolicy::UpperCamelCaseWithSpaces => ident.to_title_case(),
            FieldNamingPolicy::LowerCamelCase => ident.to_lower_camel_case(),
            FieldNamingPolicy::LowerCaseWithUnderscores => ident.to_snake_case(),
            FieldNamingPolicy::LowerCaseWithDashes => ident.to_kebab_case(),
            FieldNamingPolicy::LowerCaseWithDots => ident.to_snake_case().replace('_', "."),
            FieldNamingPolicy::UpperCaseWithUnderscores => ident.to_shouty_snake_case(),
            FieldNamingPolicy::Custom(f) => f(ident),
        }
    }
}

impl fmt::Debug for FieldNamingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldNamingPolicy::Identity => "Identity",
            FieldNamingPolicy::UpperCamelCase => "UpperCamelCase",
            FieldNamingPolicy::UpperCamelCaseWithSpaces => "UpperCamelCaseWithSpaces",
            FieldNamingPolicy::LowerCamelCase => "LowerCamelCase",
            FieldNamingPolicy::LowerCaseWithUnderscores => "LowerCaseWithUnderscores",
            FieldNamingPolicy::LowerCaseWithDashes => "LowerCaseWithDashes",
            FieldNamingPolicy::LowerCaseWithDots => "LowerCaseWithDots",
            FieldNamingPolicy::UpperCaseWithUnderscores => "UpperCaseWithUnderscores",
            FieldNamingPolicy::Custom(_) => "Custom",
        };
        f.write_str(name)
    }
}
