//! Canonical type signatures used as adapter lookup keys.
//!
//! A [`TypeSignature`] is a small tree: a plain identity, a parameterized
//! shape (raw identity plus ordered arguments), an array of an element
//! signature, a type variable, or a wildcard. Signatures hash structurally,
//! so two signatures that print the same are the same registry key.
//!
//! Type variables only appear in *declared* signatures (record fields and
//! parent links). Before such a signature reaches the registry it is
//! [resolved](TypeSignature::resolve) against a [`DeclaringContext`] built
//! from the concrete instantiation of the enclosing record.
//!
//! ```rust
//! use tyson::{DeclaringContext, TypeSignature};
//!
//! // field `items: list<T>` inside `Page<T>`, requested as `Page<string>`
//! let declared = TypeSignature::list_of(TypeSignature::variable("T"));
//! let requested = TypeSignature::parameterized("Page", vec![TypeSignature::string()]);
//! let context = DeclaringContext::for_instantiation(&["T"], &requested).unwrap();
//!
//! let resolved = declared.resolve(&context).unwrap();
//! assert_eq!(resolved, TypeSignature::list_of(TypeSignature::string()));
//! assert_eq!(resolved.to_string(), "list<string>");
//! ```

use crate::{Error, Result};
use std::collections::HashMap;
use std::fmt;

/// Identities of the built-in value types.
pub mod names {
    pub const ANY: &str = "any";
    pub const STRING: &str = "string";
    pub const CHAR: &str = "char";
    pub const BOOL: &str = "bool";
    pub const I8: &str = "i8";
    pub const I16: &str = "i16";
    pub const I32: &str = "i32";
    pub const I64: &str = "i64";
    pub const U8: &str = "u8";
    pub const U16: &str = "u16";
    pub const U32: &str = "u32";
    pub const U64: &str = "u64";
    pub const F32: &str = "f32";
    pub const F64: &str = "f64";
    pub const BIGINT: &str = "bigint";
    pub const DATETIME: &str = "datetime";
    pub const BITSET: &str = "bitset";
    pub const LIST: &str = "list";
    pub const SET: &str = "set";
    pub const MAP: &str = "map";
}

/// A possibly generic type, as a structural tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeSignature {
    /// A concrete identity without arguments.
    Plain(String),
    /// A raw identity applied to ordered arguments.
    Parameterized {
        raw: String,
        args: Vec<TypeSignature>,
    },
    /// An array of the element signature.
    Array(Box<TypeSignature>),
    /// A type parameter, optionally bounded.
    Variable {
        name: String,
        bound: Option<Box<TypeSignature>>,
    },
    /// A wildcard argument with an upper and/or lower bound.
    Wildcard {
        upper: Option<Box<TypeSignature>>,
        lower: Option<Box<TypeSignature>>,
    },
}

impl TypeSignature {
    pub fn plain(name: &str) -> Self {
        TypeSignature::Plain(name.to_string())
    }

    pub fn parameterized(raw: &str, args: Vec<TypeSignature>) -> Self {
        TypeSignature::Parameterized {
            raw: raw.to_string(),
            args,
        }
    }

    pub fn array_of(element: TypeSignature) -> Self {
        TypeSignature::Array(Box::new(element))
    }

    pub fn variable(name: &str) -> Self {
        TypeSignature::Variable {
            name: name.to_string(),
            bound: None,
        }
    }

    pub fn bounded_variable(name: &str, bound: TypeSignature) -> Self {
        TypeSignature::Variable {
            name: name.to_string(),
            bound: Some(Box::new(bound)),
        }
    }

    /// `? extends bound`
    pub fn wildcard_extends(bound: TypeSignature) -> Self {
        TypeSignature::Wildcard {
            upper: Some(Box::new(bound)),
            lower: None,
        }
    }

    /// `? super bound`
    pub fn wildcard_super(bound: TypeSignature) -> Self {
        TypeSignature::Wildcard {
            upper: None,
            lower: Some(Box::new(bound)),
        }
    }

    /// The dynamic value type; accepts and produces any [`Value`](crate::Value).
    pub fn any() -> Self {
        Self::plain(names::ANY)
    }

    pub fn string() -> Self {
        Self::plain(names::STRING)
    }

    pub fn bool() -> Self {
        Self::plain(names::BOOL)
    }

    pub fn i32() -> Self {
        Self::plain(names::I32)
    }

    pub fn i64() -> Self {
        Self::plain(names::I64)
    }

    pub fn f64() -> Self {
        Self::plain(names::F64)
    }

    pub fn list_of(element: TypeSignature) -> Self {
        Self::parameterized(names::LIST, vec![element])
    }

    pub fn set_of(element: TypeSignature) -> Self {
        Self::parameterized(names::SET, vec![element])
    }

    pub fn map_of(key: TypeSignature, value: TypeSignature) -> Self {
        Self::parameterized(names::MAP, vec![key, value])
    }

    /// The raw identity: the name for plain and parameterized shapes, the
    /// variable name for variables, `"array"` for arrays and `"?"` for
    /// wildcards.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            TypeSignature::Plain(name) => name,
            TypeSignature::Parameterized { raw, .. } => raw,
            TypeSignature::Array(_) => "array",
            TypeSignature::Variable { name, .. } => name,
            TypeSignature::Wildcard { .. } => "?",
        }
    }

    /// The type arguments; empty unless parameterized.
    #[must_use]
    pub fn args(&self) -> &[TypeSignature] {
        match self {
            TypeSignature::Parameterized { args, .. } => args,
            _ => &[],
        }
    }

    /// The element signature of an array.
    #[must_use]
    pub fn element(&self) -> Option<&TypeSignature> {
        match self {
            TypeSignature::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Returns `true` for plain or parameterized shapes with this identity.
    #[must_use]
    pub fn is_raw(&self, name: &str) -> bool {
        matches!(
            self,
            TypeSignature::Plain(_) | TypeSignature::Parameterized { .. }
        ) && self.raw() == name
    }

    /// Returns `true` if a variable or wildcard occurs anywhere in the tree.
    #[must_use]
    pub fn has_variables(&self) -> bool {
        match self {
            TypeSignature::Plain(_) => false,
            TypeSignature::Parameterized { args, .. } => args.iter().any(Self::has_variables),
            TypeSignature::Array(element) => element.has_variables(),
            TypeSignature::Variable { .. } | TypeSignature::Wildcard { .. } => true,
        }
    }

    /// Applies the structural collapse rules:
    ///
    /// - a parameterized shape with no arguments becomes plain;
    /// - a wildcard becomes its single bound, and is an error otherwise;
    /// - a bounded variable becomes its bound;
    /// - arrays and arguments are canonicalized recursively.
    pub fn canonicalize(&self) -> Result<TypeSignature> {
        match self {
            TypeSignature::Plain(_) => Ok(self.clone()),
            TypeSignature::Parameterized { raw, args } => {
                if args.is_empty() {
                    return Ok(TypeSignature::Plain(raw.clone()));
                }
                let args = args
                    .iter()
                    .map(Self::canonicalize)
                    .collect::<Result<Vec<_>>>()?;
                Ok(TypeSignature::Parameterized {
                    raw: raw.clone(),
                    args,
                })
            }
            TypeSignature::Array(element) => Ok(Self::array_of(element.canonicalize()?)),
            TypeSignature::Variable { bound: Some(bound), .. } => bound.canonicalize(),
            TypeSignature::Variable { .. } => Ok(self.clone()),
            TypeSignature::Wildcard { upper, lower } => match (upper, lower) {
                (Some(bound), None) | (None, Some(bound)) => bound.canonicalize(),
                _ => Err(Error::configuration(format!(
                    "wildcard {} has no single resolvable bound",
                    self
                ))),
            },
        }
    }

    /// Substitutes every type variable through `context` and canonicalizes
    /// the result. An unbound variable falls back to its bound, then to
    /// [`TypeSignature::any`].
    pub fn resolve(&self, context: &DeclaringContext) -> Result<TypeSignature> {
        self.substitute(context)?.canonicalize()
    }

    fn substitute(&self, context: &DeclaringContext) -> Result<TypeSignature> {
        match self {
            TypeSignature::Plain(_) => Ok(self.clone()),
            TypeSignature::Parameterized { raw, args } => Ok(TypeSignature::Parameterized {
                raw: raw.clone(),
                args: args
                    .iter()
                    .map(|arg| arg.substitute(context))
                    .collect::<Result<Vec<_>>>()?,
            }),
            TypeSignature::Array(element) => Ok(Self::array_of(element.substitute(context)?)),
            TypeSignature::Variable { name, bound } => match context.get(name) {
                Some(bound_to) => Ok(bound_to.clone()),
                None => match bound {
                    Some(b) => b.substitute(context),
                    None => Ok(Self::any()),
                },
            },
            TypeSignature::Wildcard { upper, lower } => Ok(TypeSignature::Wildcard {
                upper: match upper {
                    Some(b) => Some(Box::new(b.substitute(context)?)),
                    None => None,
                },
                lower: match lower {
                    Some(b) => Some(Box::new(b.substitute(context)?)),
                    None => None,
                },
            }),
        }
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSignature::Plain(name) => f.write_str(name),
            TypeSignature::Parameterized { raw, args } => {
                write!(f, "{}<", raw)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
            TypeSignature::Array(element) => write!(f, "{}[]", element),
            TypeSignature::Variable { name, bound: None } => f.write_str(name),
            TypeSignature::Variable {
                name,
                bound: Some(bound),
            } => write!(f, "{} extends {}", name, bound),
            TypeSignature::Wildcard { upper, lower } => {
                f.write_str("?")?;
                if let Some(upper) = upper {
                    write!(f, " extends {}", upper)?;
                }
                if let Some(lower) = lower {
                    write!(f, " super {}", lower)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for TypeSignature {
    fn from(name: &str) -> Self {
        TypeSignature::plain(name)
    }
}

/// Bindings from type-variable names to concrete signatures.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclaringContext {
    bindings: HashMap<String, TypeSignature>,
}

impl DeclaringContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the declared `params` of a generic record to the arguments of
    /// a concrete instantiation. A raw (argument-less) instantiation binds
    /// nothing; an arity mismatch is a configuration error.
    pub fn for_instantiation(params: &[&str], instantiation: &TypeSignature) -> Result<Self> {
        let mut context = DeclaringContext::new();
        let args = instantiation.args();
        if args.is_empty() {
            return Ok(context);
        }
        if args.len() != params.len() {
            return Err(Error::configuration(format!(
                "{} expects {} type argument(s), got {}",
                instantiation.raw(),
                params.len(),
                args.len()
            )));
        }
        for (param, arg) in params.iter().zip(args) {
            context.bind(param, arg.clone());
        }
        Ok(context)
    }

    pub fn bind(&mut self, name: &str, signature: TypeSignature) {
        self.bindings.insert(name.to_string(), signature);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeSignature> {
        self.bindings.get(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
