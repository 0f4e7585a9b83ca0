//! Error types for adapter resolution and stream conversion.
//!
//! Every failure surfaces as one [`Error`] value whose [`ErrorKind`] tells
//! the caller which category it belongs to:
//!
//! - **Syntax**: the character stream violates the grammar (malformed token,
//!   premature end of input). Carries the line, column and JSON path.
//! - **Type mismatch**: the current token cannot satisfy the requested
//!   accessor (e.g. `next_bool` on a string).
//! - **Unsupported type**: no factory in the chain accepts a signature.
//! - **Configuration**: duplicate serialized names, unresolvable wildcard
//!   bounds. Raised while an adapter is built, never during a conversion.
//! - **Instantiation**: no blank instance can be produced for a record.
//! - **Usage**: the caller broke a reader/writer ordering rule.
//!
//! ## Examples
//!
//! ```rust
//! use tyson::{from_str, ErrorKind};
//!
//! let err = from_str("[1, 2").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Syntax);
//! assert!(err.to_string().contains("line 1"));
//! ```

use std::fmt;
use thiserror::Error;

/// The inspectable category of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    TypeMismatch,
    UnsupportedType,
    Configuration,
    Instantiation,
    Usage,
    Io,
    Custom,
}

/// Represents all possible errors raised by readers, writers, adapters and
/// the registry.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Grammar violation at a lexical position
    #[error("Syntax error at line {line}, column {column}, path {path}: {msg}")]
    Syntax {
        line: usize,
        column: usize,
        path: String,
        msg: String,
    },

    /// The current token does not satisfy the requested accessor
    #[error("Type mismatch at line {line}, column {column}, path {path}: expected {expected}, found {found}")]
    TypeMismatch {
        line: usize,
        column: usize,
        path: String,
        expected: String,
        found: String,
    },

    /// A value handed to an adapter does not have the adapter's shape
    #[error("Type mismatch: expected {expected}, found {found}")]
    ValueMismatch { expected: String, found: String },

    /// No factory accepted the signature
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Invalid adapter configuration detected at build time
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No blank instance could be constructed
    #[error("Instantiation error: {0}")]
    Instantiation(String),

    /// A reader or writer operation was called out of order
    #[error("Usage error: {0}")]
    Usage(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error at the given position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tyson::Error;
    ///
    /// let err = Error::syntax(10, 5, "$.a", "unexpected character");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, column: usize, path: &str, msg: &str) -> Self {
        Error::Syntax {
            line,
            column,
            path: path.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tyson::Error;
    ///
    /// let err = Error::type_mismatch(5, 10, "$", "BOOLEAN", "STRING");
    /// assert!(err.to_string().contains("expected BOOLEAN"));
    /// ```
    pub fn type_mismatch(
        line: usize,
        column: usize,
        path: &str,
        expected: &str,
        found: &str,
    ) -> Self {
        Error::TypeMismatch {
            line,
            column,
            path: path.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a type mismatch error for a value being written.
    pub fn value_mismatch(expected: &str, found: &str) -> Self {
        Error::ValueMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a configuration error.
    pub fn configuration<T: fmt::Display>(msg: T) -> Self {
        Error::Configuration(msg.to_string())
    }

    /// Creates an instantiation error.
    pub fn instantiation<T: fmt::Display>(msg: T) -> Self {
        Error::Instantiation(msg.to_string())
    }

    /// Creates a usage error.
    pub fn usage(msg: &str) -> Self {
        Error::Usage(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::Syntax { .. } => ErrorKind::Syntax,
            Error::TypeMismatch { .. } | Error::ValueMismatch { .. } => ErrorKind::TypeMismatch,
            Error::UnsupportedType(_) => ErrorKind::UnsupportedType,
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::Instantiation(_) => ErrorKind::Instantiation,
            Error::Usage(_) => ErrorKind::Usage,
            Error::Custom(_) => ErrorKind::Custom,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
