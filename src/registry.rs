//! Adapter resolution and caching.
//!
//! The [`Registry`] owns the ordered factory chain and a cache keyed by
//! canonical [`TypeSignature`]. Resolution follows a two-phase protocol:
//!
//! 1. Before any factory runs, a [`FutureAdapter`] placeholder is recorded
//!    for the signature. A nested request for the same signature from the
//!    same construction (a self-referential record) receives that
//!    placeholder instead of recursing forever.
//! 2. When a factory accepts, the placeholder is filled and the cache entry
//!    becomes the real adapter. Anything that captured the placeholder
//!    forwards to the filled delegate from then on.
//!
//! Placeholders are tracked per thread, and adapters built during a nested
//! request are published to the shared cache only when the outermost
//! request on that thread succeeds. Another thread therefore never sees an
//! adapter that still points at an unfilled placeholder. Two threads racing
//! on the same signature each build their own adapter; the last one to
//! publish is what the cache keeps. Both behave identically because
//! factories are pure. No lock is held while a factory runs, so factories
//! may call back into [`Registry::resolve`] freely.
//!
//! A placeholder is never shared across threads: forwarding to one that
//! another thread is still filling could run before the fill lands, so a
//! thread waiting on nothing builds its own copy instead.

use crate::adapter::{AdapterFactory, AdapterRef, TypeAdapter};
use crate::adapters;
use crate::{CodecOptions, Error, JsonReader, JsonWriter, Result, TypeCatalog, TypeSignature, Value};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use std::thread::{self, ThreadId};

/// A forward reference to an adapter that is still being built.
pub struct FutureAdapter {
    signature: TypeSignature,
    delegate: OnceLock<AdapterRef>,
}

impl FutureAdapter {
    fn new(signature: TypeSignature) -> Self {
        FutureAdapter {
            signature,
            delegate: OnceLock::new(),
        }
    }

    fn fill(&self, adapter: AdapterRef) {
        // A second fill can only come from the same finished build.
        let _ = self.delegate.set(adapter);
    }

    fn delegate(&self) -> Result<&AdapterRef> {
        self.delegate.get().ok_or_else(|| {
            Error::usage(&format!(
                "adapter for {} was used before its construction completed",
                self.signature
            ))
        })
    }

    /// Returns `true` once the real adapter is in place.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.delegate.get().is_some()
    }
}

impl TypeAdapter for FutureAdapter {
    fn write(&self, out: &mut JsonWriter, value: &Value) -> Result<()> {
        self.delegate()?.write(out, value)
    }

    fn read(&self, input: &mut JsonReader<'_>) -> Result<Value> {
        self.delegate()?.read(input)
    }

    fn is_null_safe(&self) -> bool {
        self.delegate
            .get()
            .map_or(false, |adapter| adapter.is_null_safe())
    }
}

/// Resolutions in progress on one thread.
#[derive(Default)]
struct InFlight {
    placeholders: HashMap<TypeSignature, Arc<FutureAdapter>>,
    finished: Vec<(TypeSignature, AdapterRef)>,
}

/// Ordered factory chain plus resolution cache.
pub struct Registry {
    options: Arc<CodecOptions>,
    factories: Vec<Arc<dyn AdapterFactory>>,
    cache: RwLock<HashMap<TypeSignature, AdapterRef>>,
    in_flight: Mutex<HashMap<ThreadId, InFlight>>,
}

impl Registry {
    /// Builds the chain: user exact factories, user hierarchy factories,
    /// then the built-ins.
    pub fn new(options: Arc<CodecOptions>) -> Self {
        let mut factories: Vec<Arc<dyn AdapterFactory>> = Vec::new();
        factories.extend(options.factories.iter().cloned());
        factories.extend(options.hierarchy_factories.iter().cloned());
        factories.extend(adapters::builtin_factories(&options));
        Registry {
            options,
            factories,
            cache: RwLock::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    #[must_use]
    pub fn catalog(&self) -> &TypeCatalog {
        &self.options.catalog
    }

    /// Number of published adapters in the cache.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }

    /// Returns the adapter for `signature`, building and caching it on the
    /// first request.
    pub fn resolve(&self, signature: &TypeSignature) -> Result<AdapterRef> {
        let signature = signature.canonicalize()?;
        if let Some(adapter) = self.cache.read().get(&signature) {
            return Ok(adapter.clone());
        }

        let current = thread::current().id();
        let placeholder = Arc::new(FutureAdapter::new(signature.clone()));
        let outermost = {
            let mut in_flight = self.in_flight.lock();
            let outermost = !in_flight.contains_key(&current);
            let state = in_flight.entry(current).or_default();
            if let Some((_, adapter)) = state.finished.iter().find(|(sig, _)| *sig == signature) {
                return Ok(adapter.clone());
            }
            if let Some(pending) = state.placeholders.get(&signature) {
                tracing::trace!("cycle on {}: handing out placeholder", signature);
                return Ok(pending.clone());
            }
            state.placeholders.insert(signature.clone(), placeholder.clone());
            outermost
        };
        tracing::trace!("installed placeholder for {}", signature);

        let built = self.build(&signature, None);

        let mut in_flight = self.in_flight.lock();
        match built {
            Ok(adapter) => {
                placeholder.fill(adapter.clone());
                if let Some(state) = in_flight.get_mut(&current) {
                    state.placeholders.remove(&signature);
                    state.finished.push((signature.clone(), adapter.clone()));
                }
                if outermost {
                    let finished = in_flight
                        .remove(&current)
                        .map(|state| state.finished)
                        .unwrap_or_default();
                    drop(in_flight);
                    let mut cache = self.cache.write();
                    for (sig, built) in finished {
                        cache.insert(sig, built);
                    }
                    tracing::trace!("published adapters resolved for {}", signature);
                }
                Ok(adapter)
            }
            Err(err) => {
                if outermost {
                    in_flight.remove(&current);
                } else if let Some(state) = in_flight.get_mut(&current) {
                    state.placeholders.remove(&signature);
                }
                drop(in_flight);
                if let Error::Configuration(msg) = &err {
                    tracing::warn!("cannot build adapter for {}: {}", signature, msg);
                }
                Err(err)
            }
        }
    }

    /// Walks the chain as [`resolve`](Registry::resolve) does but ignores
    /// `skip`, so an override can delegate to whatever would otherwise have
    /// applied. The result is not cached.
    pub fn resolve_skipping(
        &self,
        skip: &dyn AdapterFactory,
        signature: &TypeSignature,
    ) -> Result<AdapterRef> {
        let signature = signature.canonicalize()?;
        self.build(&signature, Some(skip))
    }

    fn build(
        &self,
        signature: &TypeSignature,
        skip: Option<&dyn AdapterFactory>,
    ) -> Result<AdapterRef> {
        for (position, factory) in self.factories.iter().enumerate() {
            if let Some(skip) = skip {
                if std::ptr::addr_eq(Arc::as_ptr(factory), skip) {
                    continue;
                }
            }
            if let Some(adapter) = factory.create(self, signature)? {
                tracing::debug!("factory #{} accepted {}", position, signature);
                return Ok(adapter);
            }
        }
        Err(Error::unsupported_type(&format!(
            "no adapter factory accepts {}",
            signature
        )))
    }
}
