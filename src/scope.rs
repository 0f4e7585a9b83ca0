//! Structural nesting frames shared by [`JsonReader`](crate::JsonReader) and
//! [`JsonWriter`](crate::JsonWriter).
//!
//! Both sides keep a stack of [`Scope`]s. A value may only appear directly
//! under a document, an array, or an object whose name has just been
//! consumed ([`Scope::DanglingName`]); a name may only appear under an
//! object awaiting one.

use std::fmt;

/// One level of structural nesting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    /// Top level, nothing consumed yet.
    EmptyDocument,
    /// Top level after at least one value.
    NonEmptyDocument,
    /// Inside `[` before the first element.
    EmptyArray,
    /// Inside `[` after at least one element.
    NonEmptyArray,
    /// Inside `{` awaiting the first name.
    EmptyObject,
    /// Inside `{` awaiting a subsequent name.
    NonEmptyObject,
    /// Inside `{` after a name, awaiting its value.
    DanglingName,
    /// The stream was closed.
    Closed,
}

impl Scope {
    /// Returns `true` for frames directly inside an array.
    #[must_use]
    pub const fn is_array(self) -> bool {
        matches!(self, Scope::EmptyArray | Scope::NonEmptyArray)
    }

    /// Returns `true` for frames directly inside an object.
    #[must_use]
    pub const fn is_object(self) -> bool {
        matches!(
            self,
            Scope::EmptyObject | Scope::NonEmptyObject | Scope::DanglingName
        )
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scope::EmptyDocument => "empty document",
            Scope::NonEmptyDocument => "document",
            Scope::EmptyArray | Scope::NonEmptyArray => "array",
            Scope::EmptyObject | Scope::NonEmptyObject => "object awaiting a name",
            Scope::DanglingName => "object awaiting a value",
            Scope::Closed => "closed stream",
        };
        f.write_str(name)
    }
}

/// A scope plus the bookkeeping needed to render a JSON path.
#[derive(Clone, Debug)]
pub(crate) struct Frame {
    pub(crate) scope: Scope,
    pub(crate) name: Option<String>,
    pub(crate) index: usize,
}

impl Frame {
    pub(crate) const fn new(scope: Scope) -> Self {
        Frame {
            scope,
            name: None,
            index: 0,
        }
    }
}

/// Renders `$`, `$.name`, `$[3].name` style paths for a frame stack.
pub(crate) fn render_path(frames: &[Frame]) -> String {
    let mut path = String::from("$");
    for frame in frames {
        match frame.scope {
            Scope::EmptyArray | Scope::NonEmptyArray => {
                path.push('[');
                path.push_str(&frame.index.to_string());
                path.push(']');
            }
            Scope::EmptyObject | Scope::NonEmptyObject | Scope::DanglingName => {
                path.push('.');
                if let Some(name) = &frame.name {
                    path.push_str(name);
                }
            }
            _ => {}
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_path() {
        let mut array = Frame::new(Scope::NonEmptyArray);
        array.index = 2;
        let mut object = Frame::new(Scope::DanglingName);
        object.name = Some("id".to_string());
        let frames = vec![Frame::new(Scope::NonEmptyDocument), array, object];
        assert_eq!(render_path(&frames), "$[2].id");
    }
}
