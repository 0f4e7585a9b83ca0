//! The adapter contract.
//!
//! A [`TypeAdapter`] converts one kind of [`Value`] to and from the token
//! stream. An [`AdapterFactory`] decides whether it can build an adapter
//! for a [`TypeSignature`]; the [`Registry`] asks its factories in order
//! and caches the first answer.
//!
//! Factories only *capture* the adapters they fetch from the registry.
//! Calling `read` or `write` on them during construction is forbidden:
//! a self-referential type hands out a placeholder that is filled only once
//! the outer construction completes.
//!
//! ## Writing an override
//!
//! ```rust
//! use std::sync::Arc;
//! use tyson::{
//!     Codec, CodecOptions, JsonReader, JsonWriter, Result, TypeAdapter, TypeSignature, Value,
//! };
//!
//! /// Writes booleans as "yes" / "no".
//! struct YesNo;
//!
//! impl TypeAdapter for YesNo {
//!     fn write(&self, out: &mut JsonWriter, value: &Value) -> Result<()> {
//!         out.value_str(if value.as_bool() == Some(true) { "yes" } else { "no" })
//!     }
//!
//!     fn read(&self, input: &mut JsonReader<'_>) -> Result<Value> {
//!         Ok(Value::Bool(input.next_string()? == "yes"))
//!     }
//! }
//!
//! let options = CodecOptions::new().with_type_adapter(TypeSignature::bool(), Arc::new(YesNo));
//! let codec = Codec::new(options);
//! let text = codec.to_string(&Value::Bool(true), &TypeSignature::bool()).unwrap();
//! assert_eq!(text, "\"yes\"");
//! ```

use crate::{JsonReader, JsonWriter, Registry, Result, Token, TypeSignature, Value};
use std::sync::Arc;

/// Bidirectional converter between a value and the token stream.
pub trait TypeAdapter: Send + Sync {
    /// Writes `value` as the next value of `out`.
    fn write(&self, out: &mut JsonWriter, value: &Value) -> Result<()>;

    /// Reads the next value from `input`.
    fn read(&self, input: &mut JsonReader<'_>) -> Result<Value>;

    /// Returns `true` if this adapter already handles the null token.
    fn is_null_safe(&self) -> bool {
        false
    }
}

impl std::fmt::Debug for dyn TypeAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TypeAdapter")
    }
}

/// Shared handle to an adapter.
pub type AdapterRef = Arc<dyn TypeAdapter>;

/// A rule that may build an adapter for a signature.
pub trait AdapterFactory: Send + Sync {
    /// Builds an adapter for `signature`, or returns `Ok(None)` to decline.
    fn create(&self, registry: &Registry, signature: &TypeSignature)
        -> Result<Option<AdapterRef>>;
}

/// Intercepts the null token before the wrapped adapter sees it.
pub struct NullSafe {
    inner: AdapterRef,
}

impl TypeAdapter for NullSafe {
    fn write(&self, out: &mut JsonWriter, value: &Value) -> Result<()> {
        if value.is_null() {
            return out.null_value();
        }
        self.inner.write(out, value)
    }

    fn read(&self, input: &mut JsonReader<'_>) -> Result<Value> {
        if input.peek()? == Token::Null {
            input.next_null()?;
            return Ok(Value::Null);
        }
        self.inner.read(input)
    }

    fn is_null_safe(&self) -> bool {
        true
    }
}

/// Wraps `adapter` in [`NullSafe`] unless it already handles nulls.
pub fn null_safe(adapter: AdapterRef) -> AdapterRef {
    if adapter.is_null_safe() {
        adapter
    } else {
        Arc::new(NullSafe { inner: adapter })
    }
}

/// Applies one adapter to exactly one signature, or to every
/// instantiation of a raw identity.
pub struct ExactFactory {
    matcher: Matcher,
    adapter: AdapterRef,
}

enum Matcher {
    Signature(TypeSignature),
    Raw(String),
}

impl ExactFactory {
    pub fn for_signature(signature: TypeSignature, adapter: AdapterRef) -> Self {
        ExactFactory {
            matcher: Matcher::Signature(signature),
            adapter,
        }
    }

    pub fn for_raw(raw: &str, adapter: AdapterRef) -> Self {
        ExactFactory {
            matcher: Matcher::Raw(raw.to_string()),
            adapter,
        }
    }
}

impl AdapterFactory for ExactFactory {
    fn create(&self, _: &Registry, signature: &TypeSignature) -> Result<Option<AdapterRef>> {
        let matches = match &self.matcher {
            Matcher::Signature(expected) => expected == signature,
            Matcher::Raw(raw) => signature.is_raw(raw),
        };
        Ok(matches.then(|| self.adapter.clone()))
    }
}

/// Applies one adapter to a record type and every record that descends
/// from it in the catalogue.
pub struct HierarchyFactory {
    base: String,
    adapter: AdapterRef,
}

impl HierarchyFactory {
    pub fn new(base: &str, adapter: AdapterRef) -> Self {
        HierarchyFactory {
            base: base.to_string(),
            adapter,
        }
    }
}

impl AdapterFactory for HierarchyFactory {
    fn create(&self, registry: &Registry, signature: &TypeSignature) -> Result<Option<AdapterRef>> {
        let applies = matches!(
            signature,
            TypeSignature::Plain(_) | TypeSignature::Parameterized { .. }
        ) && registry.catalog().is_subtype(signature.raw(), &self.base);
        Ok(applies.then(|| self.adapter.clone()))
    }
}
