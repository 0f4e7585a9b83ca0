//! Built-in adapter factories.
//!
//! [`builtin_factories`] returns them in the order the registry tries them,
//! after any user factories:
//!
//! 1. [`excluder`]: types rejected by an exclusion rule
//! 2. [`dynamic`]: the `any` type and unresolved variables
//! 3. [`primitives`]: text, booleans, bounded integers, floats
//! 4. [`bigint`], [`date`], [`bits`]: the well-known value types
//! 5. [`enums`]: catalogue enums
//! 6. [`collections`]: arrays, lists, sets, maps
//! 7. [`reflective`]: catalogue records, field by field

pub mod bigint;
pub mod bits;
pub mod collections;
pub mod date;
pub mod dynamic;
pub mod enums;
pub mod excluder;
pub mod primitives;
pub mod reflective;

use crate::adapter::AdapterFactory;
use crate::{CodecOptions, Error, JsonReader, Token};
use std::sync::Arc;

pub(crate) fn builtin_factories(options: &CodecOptions) -> Vec<Arc<dyn AdapterFactory>> {
    let excluder = Arc::new(excluder::Excluder::from_options(options));
    vec![
        excluder.clone(),
        Arc::new(dynamic::DynamicFactory::new(options.date_pattern.clone())),
        Arc::new(primitives::PrimitiveFactory),
        Arc::new(bigint::BigIntFactory),
        Arc::new(date::DateFactory::new(options.date_pattern.clone())),
        Arc::new(bits::BitSetFactory),
        Arc::new(enums::EnumFactory),
        Arc::new(collections::CollectionFactory),
        Arc::new(reflective::ReflectiveFactory::new(excluder)),
    ]
}

/// A type-mismatch error at the reader's current position.
pub(crate) fn mismatch(input: &JsonReader<'_>, expected: &str, found: Token) -> Error {
    let (line, column) = input.peek_position();
    Error::type_mismatch(line, column, &input.path(), expected, &found.to_string())
}
