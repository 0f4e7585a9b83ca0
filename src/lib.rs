//! # tyson
//!
//! Type-adapter resolution and a streaming JSON codec.
//!
//! `tyson` converts between an in-memory value graph ([`Value`]) and JSON
//! text. Conversion of each type is delegated to a [`TypeAdapter`], looked
//! up by [`TypeSignature`] in a [`Registry`] that tries an ordered chain of
//! [`AdapterFactory`] rules and caches the first answer.
//!
//! ## Key Features
//!
//! - **Streaming**: [`JsonReader`] is a pull tokenizer and [`JsonWriter`] a
//!   push emitter; adapters talk to them directly
//! - **Strict and lenient grammars**: RFC 8259 by default, with comments,
//!   bare words, single quotes and non-finite numbers on request
//! - **Generic signatures**: `map<string, list<i32>>` resolves to adapters
//!   that know their element types; type parameters of generic records are
//!   substituted before lookup
//! - **Records by registration**: a [`TypeCatalog`] describes record fields,
//!   inheritance, aliases, versions and exclusion modifiers
//! - **Overrides**: user factories run before the built-ins and can
//!   delegate to the default with [`Registry::resolve_skipping`]
//! - **Serde bridge**: [`to_value`] and [`from_value`] connect any
//!   `Serialize`/`Deserialize` type to the value graph
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! tyson = "0.1"
//! ```
//!
//! ### Untyped values
//!
//! ```rust
//! use tyson::{from_str, json, to_string};
//!
//! let value = from_str(r#"{"name":"Ada","langs":["en","fr"]}"#).unwrap();
//! assert_eq!(value, json!({"name": "Ada", "langs": ["en", "fr"]}));
//! assert_eq!(to_string(&value).unwrap(), r#"{"name":"Ada","langs":["en","fr"]}"#);
//! ```
//!
//! ### Records
//!
//! ```rust
//! use tyson::{
//!     json, Codec, CodecOptions, FieldDescriptor, FieldNamingPolicy, RecordDescriptor,
//!     TypeCatalog, TypeSignature,
//! };
//!
//! let catalog = TypeCatalog::new().with_record(
//!     RecordDescriptor::new("User")
//!         .field(FieldDescriptor::new("user_id", TypeSignature::i64()))
//!         .field(FieldDescriptor::new("tags", TypeSignature::set_of(TypeSignature::string()))),
//! );
//! let codec = Codec::new(
//!     CodecOptions::new()
//!         .with_catalog(catalog)
//!         .with_naming_policy(FieldNamingPolicy::LowerCamelCase),
//! );
//! let user = TypeSignature::plain("User");
//!
//! let value = codec.from_str(r#"{"userId":7,"tags":["a","a","b"],"extra":0}"#, &user).unwrap();
//! assert_eq!(value, json!({"user_id": 7, "tags": ["a", "b"]}));
//! assert_eq!(codec.to_string(&value, &user).unwrap(), r#"{"userId":7,"tags":["a","b"]}"#);
//! ```
//!
//! ### Typed Rust values
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use tyson::{Codec, TypeSignature};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Reading {
//!     sensor: String,
//!     values: Vec<f64>,
//! }
//!
//! let codec = Codec::default();
//! let reading = Reading { sensor: "t1".to_string(), values: vec![1.5, 2.0] };
//! let text = codec.to_string_typed(&reading, &TypeSignature::any()).unwrap();
//! assert_eq!(text, r#"{"sensor":"t1","values":[1.5,2.0]}"#);
//!
//! let back: Reading = codec.from_str_typed(&text, &TypeSignature::any()).unwrap();
//! assert_eq!(back, reading);
//! ```
//!
//! ## Errors
//!
//! Every failure is an [`Error`]; [`Error::kind`] tells syntax errors,
//! type mismatches, unsupported types, configuration, instantiation and
//! usage errors apart. See the [`error`] module.
//!
//! ## Logging
//!
//! Adapter resolution reports through [`tracing`](https://docs.rs/tracing):
//! `debug` when a factory accepts a signature, `trace` for placeholder
//! bookkeeping, `warn` for configuration errors. No subscriber is installed
//! by the library.

pub mod adapter;
pub mod adapters;
pub mod catalog;
pub mod codec;
pub mod construct;
pub mod de;
pub mod error;
pub mod exclusion;
pub mod grammar;
pub mod macros;
pub mod map;
pub mod naming;
pub mod options;
pub mod reader;
pub mod registry;
pub mod scope;
pub mod ser;
pub mod signature;
pub mod value;
pub mod writer;

pub use adapter::{
    null_safe, AdapterFactory, AdapterRef, ExactFactory, HierarchyFactory, NullSafe, TypeAdapter,
};
pub use catalog::{
    EnumConstant, EnumDescriptor, Expose, FieldDescriptor, Modifiers, RecordDescriptor,
    TypeCatalog,
};
pub use codec::Codec;
pub use construct::InstanceCreator;
pub use de::{from_value, ValueDeserializer};
pub use error::{Error, ErrorKind, Result};
pub use exclusion::{ExclusionStrategy, FieldAttributes, SkipFieldsNamed, SkipTypes};
pub use map::Map;
pub use naming::FieldNamingPolicy;
pub use options::CodecOptions;
pub use reader::{JsonReader, Token};
pub use registry::{FutureAdapter, Registry};
pub use scope::Scope;
pub use ser::{to_value, ValueSerializer};
pub use signature::{DeclaringContext, TypeSignature};
pub use value::{Number, Value};
pub use writer::{JsonWriter, WriterOptions};

use std::io;
use std::sync::OnceLock;

/// The codec behind the crate-root functions, so their adapters stay cached
/// between calls.
fn default_codec() -> &'static Codec {
    static CODEC: OnceLock<Codec> = OnceLock::new();
    CODEC.get_or_init(Codec::default)
}

/// Writes `value` as compact JSON with default options.
///
/// Null object members are kept, so the output reproduces the value graph.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(value: &Value) -> Result<String> {
    let mut out = JsonWriter::new(WriterOptions::new());
    adapters::dynamic::write_value(&mut out, value, None)?;
    out.finish()
}

/// Writes `value` as indented JSON.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty(value: &Value) -> Result<String> {
    let mut out = JsonWriter::new(WriterOptions::pretty());
    adapters::dynamic::write_value(&mut out, value, None)?;
    out.finish()
}

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(mut writer: W, value: &Value) -> Result<()>
where
    W: io::Write,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))
}

/// Parses one strict JSON document into a [`Value`].
///
/// # Errors
///
/// Returns a syntax error for malformed or trailing input, including an
/// empty document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(text: &str) -> Result<Value> {
    default_codec().from_str(text, &TypeSignature::any())
}

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Value>
where
    R: io::Read,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&text)
}

#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(bytes: &[u8]) -> Result<Value> {
    let text = std::str::from_utf8(bytes).map_err(|e| Error::custom(e.to_string()))?;
    from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json;

    #[test]
    fn test_root_functions_share_cached_adapters() {
        assert!(std::ptr::eq(default_codec(), default_codec()));
        assert_eq!(from_str("[1,2]").unwrap(), json!([1, 2]));
        assert!(default_codec().registry().cached_len() >= 1);
        let first = default_codec().adapter(&TypeSignature::any()).unwrap();
        let second = default_codec().adapter(&TypeSignature::any()).unwrap();
        assert!(std::sync::Arc::ptr_eq(&first, &second));
    }
}
