//! The conversion facade.
//!
//! A [`Codec`] owns one immutable [`CodecOptions`] bundle and the
//! [`Registry`] built from it. It is cheap to share between threads and
//! should be created once and reused: adapters are built on first use and
//! cached for every later conversion.
//!
//! ## Examples
//!
//! ```rust
//! use tyson::{json, Codec, CodecOptions, FieldDescriptor, RecordDescriptor, TypeCatalog, TypeSignature};
//!
//! let catalog = TypeCatalog::new().with_record(
//!     RecordDescriptor::new("Point")
//!         .field(FieldDescriptor::new("foo", TypeSignature::i32()))
//!         .field(FieldDescriptor::new("bar", TypeSignature::i32())),
//! );
//! let codec = Codec::new(CodecOptions::new().with_catalog(catalog));
//! let point = TypeSignature::plain("Point");
//!
//! let text = codec.to_string(&json!({"foo": 1, "bar": 2}), &point).unwrap();
//! assert_eq!(text, r#"{"foo":1,"bar":2}"#);
//! assert_eq!(codec.from_str(&text, &point).unwrap(), json!({"foo": 1, "bar": 2}));
//! ```

use crate::adapter::{null_safe, AdapterRef};
use crate::{
    CodecOptions, Error, JsonReader, JsonWriter, Registry, Result, Token, TypeSignature, Value,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;
use std::sync::Arc;

/// Converts values to and from text through the adapter registry.
pub struct Codec {
    registry: Registry,
}

impl Codec {
    pub fn new(options: CodecOptions) -> Self {
        Codec {
            registry: Registry::new(Arc::new(options)),
        }
    }

    #[must_use]
    pub fn options(&self) -> &CodecOptions {
        self.registry.options()
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The null-safe adapter for `signature`.
    pub fn adapter(&self, signature: &TypeSignature) -> Result<AdapterRef> {
        self.registry.resolve(signature).map(null_safe)
    }

    /// A writer configured from the codec options.
    #[must_use]
    pub fn new_writer(&self) -> JsonWriter {
        JsonWriter::new(self.options().writer_options())
    }

    /// A reader over `input` using the configured grammar.
    #[must_use]
    pub fn new_reader<'de>(&self, input: &'de str) -> JsonReader<'de> {
        JsonReader::from_str(input).with_lenient(self.options().lenient)
    }

    /// Writes `value` as the next value of `out`.
    pub fn write(&self, out: &mut JsonWriter, value: &Value, signature: &TypeSignature) -> Result<()> {
        self.adapter(signature)?.write(out, value)
    }

    /// Reads the next value of `input`.
    pub fn read(&self, input: &mut JsonReader<'_>, signature: &TypeSignature) -> Result<Value> {
        self.adapter(signature)?.read(input)
    }

    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn to_string(&self, value: &Value, signature: &TypeSignature) -> Result<String> {
        let adapter = self.adapter(signature)?;
        let mut out = self.new_writer();
        adapter.write(&mut out, value)?;
        out.finish()
    }

    /// Reads one complete document. Trailing content is a syntax error.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn from_str(&self, text: &str, signature: &TypeSignature) -> Result<Value> {
        let adapter = self.adapter(signature)?;
        let mut input = self.new_reader(text);
        let value = adapter.read(&mut input)?;
        if input.peek()? != Token::EndDocument {
            let (line, column) = input.peek_position();
            return Err(Error::syntax(
                line,
                column,
                &input.path(),
                "JSON document was not fully consumed",
            ));
        }
        Ok(value)
    }

    pub fn to_writer<W>(&self, mut writer: W, value: &Value, signature: &TypeSignature) -> Result<()>
    where
        W: io::Write,
    {
        let text = self.to_string(value, signature)?;
        writer
            .write_all(text.as_bytes())
            .map_err(|e| Error::io(&e.to_string()))
    }

    pub fn from_reader<R>(&self, mut reader: R, signature: &TypeSignature) -> Result<Value>
    where
        R: io::Read,
    {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| Error::io(&e.to_string()))?;
        self.from_str(&text, signature)
    }

    /// Serializes `value` through serde, then writes it with the adapter
    /// for `signature`.
    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn to_string_typed<T>(&self, value: &T, signature: &TypeSignature) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        self.to_string(&crate::to_value(value)?, signature)
    }

    #[must_use = "this returns the result of the operation, errors must be handled"]
    pub fn from_str_typed<T>(&self, text: &str, signature: &TypeSignature) -> Result<T>
    where
        T: DeserializeOwned,
    {
        crate::from_value(self.from_str(text, signature)?)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Codec::new(CodecOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{json, ErrorKind};

    #[test]
    fn test_top_level_null() {
        let codec = Codec::default();
        let sig = TypeSignature::i32();
        assert_eq!(codec.to_string(&Value::Null, &sig).unwrap(), "null");
        assert_eq!(codec.from_str("null", &sig).unwrap(), Value::Null);
    }

    #[test]
    fn test_trailing_content_rejected() {
        let codec = Codec::default();
        let err = codec.from_str("1 2", &TypeSignature::i32()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        let err = Codec::new(CodecOptions::new().with_lenient(true))
            .from_str("1 2", &TypeSignature::i32())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_empty_input_is_syntax_error() {
        let err = Codec::default()
            .from_str("  ", &TypeSignature::any())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_writer_and_reader_round_trip() {
        let codec = Codec::default();
        let sig = TypeSignature::list_of(TypeSignature::string());
        let mut sink = Vec::new();
        codec.to_writer(&mut sink, &json!(["a", "b"]), &sig).unwrap();
        assert_eq!(sink, br#"["a","b"]"#);
        assert_eq!(codec.from_reader(&sink[..], &sig).unwrap(), json!(["a", "b"]));
    }

    #[test]
    fn test_pretty_output() {
        let codec = Codec::new(CodecOptions::pretty());
        let text = codec
            .to_string(&json!({"a": [1]}), &TypeSignature::any())
            .unwrap();
        assert_eq!(text, "{\n  \"a\": [\n    1\n  ]\n}");
    }
}
