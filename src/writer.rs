//! Push-style JSON emitter.
//!
//! [`JsonWriter`] mirrors [`JsonReader`](crate::JsonReader): it keeps the
//! same [`Scope`] stack and rejects any call sequence that would produce a
//! malformed document. Formatting is fixed at construction through
//! [`WriterOptions`].
//!
//! ## Examples
//!
//! ```rust
//! use tyson::{JsonWriter, WriterOptions};
//!
//! let mut writer = JsonWriter::new(WriterOptions::new());
//! writer.begin_object().unwrap();
//! writer.name("foo").unwrap();
//! writer.value_i64(1).unwrap();
//! writer.name("bar").unwrap();
//! writer.value_str("two").unwrap();
//! writer.end_object().unwrap();
//! assert_eq!(writer.finish().unwrap(), r#"{"foo":1,"bar":"two"}"#);
//! ```

use crate::scope::Scope;
use crate::{Error, Number, Result};

/// Formatting knobs for a [`JsonWriter`].
///
/// # Examples
///
/// ```rust
/// use tyson::WriterOptions;
///
/// let options = WriterOptions::new().with_indent("  ").with_html_safe(true);
/// assert_eq!(options.indent.as_deref(), Some("  "));
/// assert!(options.serialize_nulls);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriterOptions {
    /// Indentation unit; `None` writes compact output.
    pub indent: Option<String>,
    /// Permits several top-level values and non-finite numbers.
    pub lenient: bool,
    /// When `false`, a null member value is dropped together with its name.
    pub serialize_nulls: bool,
    /// Escapes `<`, `>`, `&`, `=`, `'` and `/` for embedding in HTML.
    pub html_safe: bool,
    /// Permits `NaN` and the infinities outside lenient mode.
    pub allow_non_finite: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        WriterOptions {
            indent: None,
            lenient: false,
            serialize_nulls: true,
            html_safe: false,
            allow_non_finite: false,
        }
    }
}

impl WriterOptions {
    /// Compact, strict output that keeps null members.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Two-space indented output.
    #[must_use]
    pub fn pretty() -> Self {
        Self::default().with_indent("  ")
    }

    #[must_use]
    pub fn with_indent(mut self, indent: &str) -> Self {
        self.indent = if indent.is_empty() {
            None
        } else {
            Some(indent.to_string())
        };
        self
    }

    #[must_use]
    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    #[must_use]
    pub fn with_serialize_nulls(mut self, serialize_nulls: bool) -> Self {
        self.serialize_nulls = serialize_nulls;
        self
    }

    #[must_use]
    pub fn with_html_safe(mut self, html_safe: bool) -> Self {
        self.html_safe = html_safe;
        self
    }

    #[must_use]
    pub fn with_allow_non_finite(mut self, allow: bool) -> Self {
        self.allow_non_finite = allow;
        self
    }
}

/// The streaming emitter. Output accumulates in memory until
/// [`finish`](JsonWriter::finish).
pub struct JsonWriter {
    output: String,
    options: WriterOptions,
    stack: Vec<Scope>,
    deferred_name: Option<String>,
}

impl JsonWriter {
    pub fn new(options: WriterOptions) -> Self {
        JsonWriter {
            output: String::new(),
            options,
            stack: vec![Scope::EmptyDocument],
            deferred_name: None,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &WriterOptions {
        &self.options
    }

    #[must_use]
    pub const fn serialize_nulls(&self) -> bool {
        self.options.serialize_nulls
    }

    #[must_use]
    pub const fn is_lenient(&self) -> bool {
        self.options.lenient
    }

    /// Current nesting depth; `0` at the document level.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    fn top(&self) -> Scope {
        self.stack.last().copied().unwrap_or(Scope::Closed)
    }

    fn replace_top(&mut self, scope: Scope) {
        if let Some(top) = self.stack.last_mut() {
            *top = scope;
        }
    }

    fn newline(&mut self) {
        if let Some(indent) = &self.options.indent {
            self.output.push('\n');
            for _ in 1..self.stack.len() {
                self.output.push_str(indent);
            }
        }
    }

    pub fn begin_array(&mut self) -> Result<()> {
        self.open(Scope::EmptyArray, '[')
    }

    pub fn end_array(&mut self) -> Result<()> {
        self.close(Scope::EmptyArray, Scope::NonEmptyArray, ']')
    }

    pub fn begin_object(&mut self) -> Result<()> {
        self.open(Scope::EmptyObject, '{')
    }

    pub fn end_object(&mut self) -> Result<()> {
        self.close(Scope::EmptyObject, Scope::NonEmptyObject, '}')
    }

    fn open(&mut self, scope: Scope, bracket: char) -> Result<()> {
        self.write_deferred_name()?;
        self.before_value()?;
        self.stack.push(scope);
        self.output.push(bracket);
        Ok(())
    }

    fn close(&mut self, empty: Scope, non_empty: Scope, bracket: char) -> Result<()> {
        let context = self.top();
        if context != empty && context != non_empty {
            return Err(Error::usage(&format!(
                "Nesting problem: cannot close '{}' inside {}",
                bracket, context
            )));
        }
        if let Some(name) = &self.deferred_name {
            return Err(Error::usage(&format!("Dangling name: {}", name)));
        }
        self.stack.pop();
        if context == non_empty {
            self.newline();
        }
        self.output.push(bracket);
        Ok(())
    }

    /// Records a member name; it is written together with the next value.
    pub fn name(&mut self, name: &str) -> Result<()> {
        if self.deferred_name.is_some() {
            return Err(Error::usage("Already wrote a name, expecting a value"));
        }
        match self.top() {
            Scope::EmptyObject | Scope::NonEmptyObject => {
                self.deferred_name = Some(name.to_string());
                Ok(())
            }
            Scope::Closed => Err(Error::usage("JsonWriter is closed")),
            other => Err(Error::usage(&format!(
                "Nesting problem: a name cannot be written inside {}",
                other
            ))),
        }
    }

    fn write_deferred_name(&mut self) -> Result<()> {
        if let Some(name) = self.deferred_name.take() {
            match self.top() {
                Scope::NonEmptyObject => self.output.push(','),
                Scope::EmptyObject => {}
                other => {
                    return Err(Error::usage(&format!(
                        "Nesting problem: a name cannot be written inside {}",
                        other
                    )))
                }
            }
            self.newline();
            self.replace_top(Scope::DanglingName);
            self.write_quoted(&name);
        }
        Ok(())
    }

    fn before_value(&mut self) -> Result<()> {
        match self.top() {
            Scope::NonEmptyDocument => {
                if !self.options.lenient {
                    return Err(Error::usage("JSON must have only one top-level value"));
                }
                self.newline();
            }
            Scope::EmptyDocument => self.replace_top(Scope::NonEmptyDocument),
            Scope::EmptyArray => {
                self.replace_top(Scope::NonEmptyArray);
                self.newline();
            }
            Scope::NonEmptyArray => {
                self.output.push(',');
                self.newline();
            }
            Scope::DanglingName => {
                self.output
                    .push_str(if self.options.indent.is_some() { ": " } else { ":" });
                self.replace_top(Scope::NonEmptyObject);
            }
            Scope::Closed => return Err(Error::usage("JsonWriter is closed")),
            Scope::EmptyObject | Scope::NonEmptyObject => {
                return Err(Error::usage("Nesting problem: expected a name, not a value"))
            }
        }
        Ok(())
    }

    fn write_quoted(&mut self, text: &str) {
        self.output.push('"');
        for ch in text.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{0008}' => self.output.push_str("\\b"),
                '\u{000C}' => self.output.push_str("\\f"),
                '\u{2028}' | '\u{2029}' => {
                    self.output.push_str(&format!("\\u{:04x}", ch as u32));
                }
                c if (c as u32) < 0x20 => {
                    self.output.push_str(&format!("\\u{:04x}", c as u32));
                }
                '/' if self.options.html_safe => self.output.push_str("\\/"),
                '<' | '>' | '&' | '=' | '\'' if self.options.html_safe => {
                    self.output.push_str(&format!("\\u{:04x}", ch as u32));
                }
                c => self.output.push(c),
            }
        }
        self.output.push('"');
    }

    fn raw_value(&mut self, text: &str) -> Result<()> {
        self.write_deferred_name()?;
        self.before_value()?;
        self.output.push_str(text);
        Ok(())
    }

    pub fn value_str(&mut self, value: &str) -> Result<()> {
        self.write_deferred_name()?;
        self.before_value()?;
        self.write_quoted(value);
        Ok(())
    }

    pub fn value_bool(&mut self, value: bool) -> Result<()> {
        self.raw_value(if value { "true" } else { "false" })
    }

    pub fn value_i64(&mut self, value: i64) -> Result<()> {
        self.raw_value(&value.to_string())
    }

    pub fn value_f64(&mut self, value: f64) -> Result<()> {
        self.value_number(&Number::from_f64(value))
    }

    /// Writes a number; `NaN` and the infinities need lenient mode or
    /// [`WriterOptions::allow_non_finite`].
    pub fn value_number(&mut self, value: &Number) -> Result<()> {
        if value.is_special() && !(self.options.lenient || self.options.allow_non_finite) {
            return Err(Error::usage(&format!(
                "Numeric values must be finite, but was {}",
                value
            )));
        }
        self.raw_value(&value.to_string())
    }

    /// Writes pre-rendered text verbatim as a value.
    pub fn json_value(&mut self, raw: &str) -> Result<()> {
        if raw.is_empty() {
            return Err(Error::usage("Raw JSON value must not be empty"));
        }
        self.raw_value(raw)
    }

    /// Writes `null`. Outside arrays, with null serialization disabled, the
    /// pending member name is dropped instead.
    pub fn null_value(&mut self) -> Result<()> {
        if self.deferred_name.is_some() && !self.options.serialize_nulls {
            self.deferred_name = None;
            return Ok(());
        }
        self.raw_value("null")
    }

    /// Completes the document and returns the text.
    pub fn finish(self) -> Result<String> {
        if self.deferred_name.is_some()
            || self.stack.len() != 1
            || self.top() != Scope::NonEmptyDocument
        {
            return Err(Error::usage("Incomplete document"));
        }
        Ok(self.output)
    }
}
