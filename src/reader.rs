//! Pull-style JSON tokenizer.
//!
//! [`JsonReader`] walks a character source one token at a time. Callers
//! [`peek`](JsonReader::peek) at the next [`Token`] and consume it with the
//! matching operation; every structural step is validated against a stack
//! of [`Scope`] frames.
//!
//! ## Grammar
//!
//! The strict grammar is RFC 8259 JSON. With [`JsonReader::with_lenient`]
//! the reader also accepts single-quoted strings, unquoted names and string
//! values, `NaN`/`Infinity`/`-Infinity`, `;` as a separator, `=` and `=>`
//! as name separators, `//`, `#` and `/* */` comments, and several
//! top-level values in one stream. See the [`grammar`](crate::grammar)
//! module for the full rules.
//!
//! ## Usage
//!
//! ```rust
//! use tyson::{JsonReader, Token};
//!
//! let mut reader = JsonReader::from_str(r#"{"id": 7, "tags": ["a"]}"#);
//! reader.begin_object().unwrap();
//! assert_eq!(reader.next_name().unwrap(), "id");
//! assert_eq!(reader.next_i64().unwrap(), 7);
//! assert_eq!(reader.next_name().unwrap(), "tags");
//! reader.skip_value().unwrap();
//! reader.end_object().unwrap();
//! assert_eq!(reader.peek().unwrap(), Token::EndDocument);
//! ```

use crate::scope::{render_path, Frame, Scope};
use crate::{Error, Number, Result};
use std::fmt;

/// The kind of the next lexical unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    BeginArray,
    EndArray,
    BeginObject,
    EndObject,
    Name,
    String,
    Number,
    Boolean,
    Null,
    EndDocument,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Token::BeginArray => "BEGIN_ARRAY",
            Token::EndArray => "END_ARRAY",
            Token::BeginObject => "BEGIN_OBJECT",
            Token::EndObject => "END_OBJECT",
            Token::Name => "NAME",
            Token::String => "STRING",
            Token::Number => "NUMBER",
            Token::Boolean => "BOOLEAN",
            Token::Null => "NULL",
            Token::EndDocument => "END_DOCUMENT",
        };
        f.write_str(name)
    }
}

/// A token that has been lexed but not yet consumed.
#[derive(Clone, Debug, PartialEq)]
enum Peeked {
    BeginObject,
    EndObject,
    BeginArray,
    EndArray,
    True,
    False,
    Null,
    Str(String),
    Number(String),
    Name(String),
    Eof,
}

impl Peeked {
    const fn token(&self) -> Token {
        match self {
            Peeked::BeginObject => Token::BeginObject,
            Peeked::EndObject => Token::EndObject,
            Peeked::BeginArray => Token::BeginArray,
            Peeked::EndArray => Token::EndArray,
            Peeked::True | Peeked::False => Token::Boolean,
            Peeked::Null => Token::Null,
            Peeked::Str(_) => Token::String,
            Peeked::Number(_) => Token::Number,
            Peeked::Name(_) => Token::Name,
            Peeked::Eof => Token::EndDocument,
        }
    }
}

/// The streaming tokenizer.
pub struct JsonReader<'de> {
    input: &'de str,
    position: usize,
    line: usize,
    column: usize,
    lenient: bool,
    stack: Vec<Frame>,
    peeked: Option<Peeked>,
}

impl<'de> JsonReader<'de> {
    /// Creates a strict reader over `input`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        JsonReader {
            input,
            position: 0,
            line: 1,
            column: 1,
            lenient: false,
            stack: vec![Frame::new(Scope::EmptyDocument)],
            peeked: None,
        }
    }

    /// Switches between the strict and the lenient grammar.
    #[must_use]
    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Returns `true` if the lenient grammar is active.
    #[must_use]
    pub const fn is_lenient(&self) -> bool {
        self.lenient
    }

    /// Current nesting depth; `0` at the document level.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len().saturating_sub(1)
    }

    /// The JSON path of the current position, e.g. `$.items[2].name`.
    #[must_use]
    pub fn path(&self) -> String {
        render_path(&self.stack)
    }

    /// The 1-based line and column of the next unread character.
    #[must_use]
    pub const fn peek_position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    // ---------------------------------------------------------------------
    // Character level

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_second_char(&self) -> Option<char> {
        let mut chars = self.input[self.position..].chars();
        chars.next();
        chars.next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.input[self.position..].chars().next()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Skips whitespace (and comments in lenient mode), returning the next
    /// significant character without consuming it.
    fn peek_non_whitespace(&mut self) -> Result<Option<char>> {
        loop {
            match self.peek_char() {
                Some(' ' | '\t' | '\n' | '\r') => {
                    self.next_char();
                }
                Some('/') if self.lenient => match self.peek_second_char() {
                    Some('*') => {
                        self.next_char();
                        self.next_char();
                        self.skip_block_comment()?;
                    }
                    Some('/') => self.skip_to_end_of_line(),
                    _ => return Ok(Some('/')),
                },
                Some('#') if self.lenient => self.skip_to_end_of_line(),
                other => return Ok(other),
            }
        }
    }

    fn require_non_whitespace(&mut self, context: &str) -> Result<char> {
        match self.peek_non_whitespace()? {
            Some(c) => Ok(c),
            None => Err(self.syntax_error(&format!("End of input while reading {}", context))),
        }
    }

    fn skip_block_comment(&mut self) -> Result<()> {
        loop {
            match self.next_char() {
                Some('*') if self.peek_char() == Some('/') => {
                    self.next_char();
                    return Ok(());
                }
                Some(_) => {}
                None => return Err(self.syntax_error("Unterminated comment")),
            }
        }
    }

    fn skip_to_end_of_line(&mut self) {
        while let Some(ch) = self.next_char() {
            if ch == '\n' {
                break;
            }
        }
    }

    fn check_lenient(&self, what: &str) -> Result<()> {
        if self.lenient {
            Ok(())
        } else {
            Err(self.syntax_error(&format!("{} is only accepted by the lenient grammar", what)))
        }
    }

    fn syntax_error(&self, msg: &str) -> Error {
        Error::syntax(self.line, self.column, &self.path(), msg)
    }

    fn mismatch(&self, expected: &str, found: &str) -> Error {
        Error::type_mismatch(self.line, self.column, &self.path(), expected, found)
    }

    fn set_top(&mut self, scope: Scope) {
        if let Some(top) = self.stack.last_mut() {
            top.scope = scope;
        }
    }

    fn top_scope(&self) -> Scope {
        self.stack.last().map_or(Scope::Closed, |f| f.scope)
    }

    // ---------------------------------------------------------------------
    // Lexing

    fn do_peek(&mut self) -> Result<Peeked> {
        let peek_scope = self.top_scope();
        match peek_scope {
            Scope::EmptyArray => self.set_top(Scope::NonEmptyArray),
            Scope::NonEmptyArray => match self.require_non_whitespace("an array")? {
                ']' => {
                    self.next_char();
                    return Ok(Peeked::EndArray);
                }
                ',' => {
                    self.next_char();
                }
                ';' => {
                    self.check_lenient("';' as a separator")?;
                    self.next_char();
                }
                _ => return Err(self.syntax_error("Unterminated array")),
            },
            Scope::EmptyObject | Scope::NonEmptyObject => {
                self.set_top(Scope::DanglingName);
                if peek_scope == Scope::NonEmptyObject {
                    match self.require_non_whitespace("an object")? {
                        '}' => {
                            self.next_char();
                            return Ok(Peeked::EndObject);
                        }
                        ',' => {
                            self.next_char();
                        }
                        ';' => {
                            self.check_lenient("';' as a separator")?;
                            self.next_char();
                        }
                        _ => return Err(self.syntax_error("Unterminated object")),
                    }
                }
                return self.read_name(peek_scope);
            }
            Scope::DanglingName => {
                self.set_top(Scope::NonEmptyObject);
                match self.require_non_whitespace("an object")? {
                    ':' => {
                        self.next_char();
                    }
                    '=' => {
                        self.check_lenient("'=' as a name separator")?;
                        self.next_char();
                        if self.peek_char() == Some('>') {
                            self.next_char();
                        }
                    }
                    _ => return Err(self.syntax_error("Expected ':'")),
                }
            }
            Scope::EmptyDocument => self.set_top(Scope::NonEmptyDocument),
            Scope::NonEmptyDocument => match self.peek_non_whitespace()? {
                None => return Ok(Peeked::Eof),
                Some(_) => self.check_lenient("More than one top-level value")?,
            },
            Scope::Closed => return Err(Error::usage("JsonReader is closed")),
        }

        match self.require_non_whitespace("a value")? {
            ']' if peek_scope == Scope::EmptyArray => {
                self.next_char();
                Ok(Peeked::EndArray)
            }
            '"' => {
                self.next_char();
                Ok(Peeked::Str(self.read_quoted('"')?))
            }
            '\'' => {
                self.check_lenient("A single-quoted string")?;
                self.next_char();
                Ok(Peeked::Str(self.read_quoted('\'')?))
            }
            '[' => {
                self.next_char();
                Ok(Peeked::BeginArray)
            }
            '{' => {
                self.next_char();
                Ok(Peeked::BeginObject)
            }
            _ => self.read_literal(),
        }
    }

    fn read_name(&mut self, peek_scope: Scope) -> Result<Peeked> {
        match self.require_non_whitespace("an object")? {
            '"' => {
                self.next_char();
                Ok(Peeked::Name(self.read_quoted('"')?))
            }
            '\'' => {
                self.check_lenient("A single-quoted name")?;
                self.next_char();
                Ok(Peeked::Name(self.read_quoted('\'')?))
            }
            '}' if peek_scope != Scope::NonEmptyObject => {
                self.next_char();
                Ok(Peeked::EndObject)
            }
            c if is_literal(c) => {
                self.check_lenient("An unquoted name")?;
                let start = self.position;
                while matches!(self.peek_char(), Some(c) if is_literal(c)) {
                    self.next_char();
                }
                Ok(Peeked::Name(self.input[start..self.position].to_string()))
            }
            _ => Err(self.syntax_error("Expected name")),
        }
    }

    /// Reads a bare word: keyword, number, or (lenient) unquoted string.
    fn read_literal(&mut self) -> Result<Peeked> {
        let start = self.position;
        while matches!(self.peek_char(), Some(c) if is_literal(c)) {
            self.next_char();
        }
        let input = self.input;
        let text = &input[start..self.position];
        if text.is_empty() {
            return Err(self.syntax_error("Expected value"));
        }

        let keyword = |word: &str| {
            if self.lenient {
                text.eq_ignore_ascii_case(word)
            } else {
                text == word
            }
        };
        if keyword("true") {
            return Ok(Peeked::True);
        }
        if keyword("false") {
            return Ok(Peeked::False);
        }
        if keyword("null") {
            return Ok(Peeked::Null);
        }
        if is_strict_number(text) {
            return Ok(Peeked::Number(text.to_string()));
        }
        if self.lenient {
            if matches!(text, "NaN" | "Infinity" | "-Infinity") {
                return Ok(Peeked::Number(text.to_string()));
            }
            return Ok(Peeked::Str(text.to_string()));
        }
        Err(self.syntax_error(&format!("Malformed token '{}'", text)))
    }

    fn read_quoted(&mut self, quote: char) -> Result<String> {
        let mut result = String::new();
        loop {
            match self.next_char() {
                Some(ch) if ch == quote => return Ok(result),
                Some('\\') => {
                    let ch = self.read_escape()?;
                    result.push(ch);
                }
                Some(ch) => result.push(ch),
                None => return Err(self.syntax_error("Unterminated string")),
            }
        }
    }

    fn read_escape(&mut self) -> Result<char> {
        match self.next_char() {
            Some('"') => Ok('"'),
            Some('\'') => Ok('\''),
            Some('\\') => Ok('\\'),
            Some('/') => Ok('/'),
            Some('b') => Ok('\u{0008}'),
            Some('f') => Ok('\u{000C}'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('t') => Ok('\t'),
            Some('u') => {
                let high = self.read_hex4()?;
                if (0xD800..0xDC00).contains(&high) {
                    // Surrogate pair: a low half must follow.
                    if self.peek_char() == Some('\\') && self.peek_second_char() == Some('u') {
                        self.next_char();
                        self.next_char();
                        let low = self.read_hex4()?;
                        if (0xDC00..0xE000).contains(&low) {
                            let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                            return char::from_u32(code)
                                .ok_or_else(|| self.syntax_error("Invalid unicode code point"));
                        }
                    }
                    return Err(self.syntax_error("Unpaired surrogate in unicode escape"));
                }
                char::from_u32(high).ok_or_else(|| self.syntax_error("Invalid unicode code point"))
            }
            Some(_) => Err(self.syntax_error("Invalid escape sequence")),
            None => Err(self.syntax_error("Unterminated escape sequence")),
        }
    }

    fn read_hex4(&mut self) -> Result<u32> {
        let mut code = 0u32;
        for _ in 0..4 {
            match self.next_char().and_then(|c| c.to_digit(16)) {
                Some(digit) => code = (code << 4) | digit,
                None => {
                    return Err(self.syntax_error(
                        "Invalid unicode escape sequence (expected 4 hex digits)",
                    ))
                }
            }
        }
        Ok(code)
    }

    // ---------------------------------------------------------------------
    // Token level

    /// Returns the kind of the next token without consuming it.
    pub fn peek(&mut self) -> Result<Token> {
        Ok(self.peeked()?.token())
    }

    fn peeked(&mut self) -> Result<&Peeked> {
        if self.peeked.is_none() {
            let next = self.do_peek()?;
            self.peeked = Some(next);
        }
        match &self.peeked {
            Some(p) => Ok(p),
            None => Err(Error::usage("no token available")),
        }
    }

    /// Consumes and returns the next token, discarding its payload.
    pub fn advance(&mut self) -> Result<Token> {
        let token = self.peek()?;
        match token {
            Token::BeginArray => self.begin_array()?,
            Token::EndArray => self.end_array()?,
            Token::BeginObject => self.begin_object()?,
            Token::EndObject => self.end_object()?,
            Token::Name => {
                self.next_name()?;
            }
            Token::String | Token::Number => {
                self.next_string()?;
            }
            Token::Boolean => {
                self.next_bool()?;
            }
            Token::Null => self.next_null()?,
            Token::EndDocument => {}
        }
        Ok(token)
    }

    fn value_consumed(&mut self) {
        self.peeked = None;
        if let Some(top) = self.stack.last_mut() {
            if top.scope.is_array() {
                top.index += 1;
            }
        }
    }

    fn expect(&mut self, wanted: Token) -> Result<()> {
        let found = self.peek()?;
        if found == wanted {
            Ok(())
        } else {
            Err(self.mismatch(&wanted.to_string(), &found.to_string()))
        }
    }

    /// Consumes `[` and enters an array scope.
    pub fn begin_array(&mut self) -> Result<()> {
        self.expect(Token::BeginArray)?;
        self.peeked = None;
        self.stack.push(Frame::new(Scope::EmptyArray));
        Ok(())
    }

    /// Consumes `]` and leaves the array scope.
    pub fn end_array(&mut self) -> Result<()> {
        self.expect(Token::EndArray)?;
        self.stack.pop();
        self.value_consumed();
        Ok(())
    }

    /// Consumes `{` and enters an object scope.
    pub fn begin_object(&mut self) -> Result<()> {
        self.expect(Token::BeginObject)?;
        self.peeked = None;
        self.stack.push(Frame::new(Scope::EmptyObject));
        Ok(())
    }

    /// Consumes `}` and leaves the object scope.
    pub fn end_object(&mut self) -> Result<()> {
        self.expect(Token::EndObject)?;
        self.stack.pop();
        self.value_consumed();
        Ok(())
    }

    /// Returns `true` if the current array or object has another element.
    pub fn has_next(&mut self) -> Result<bool> {
        let token = self.peek()?;
        Ok(!matches!(
            token,
            Token::EndArray | Token::EndObject | Token::EndDocument
        ))
    }

    /// Consumes a member name.
    pub fn next_name(&mut self) -> Result<String> {
        match self.peeked.take().map_or_else(|| self.do_peek(), Ok)? {
            Peeked::Name(name) => {
                if let Some(top) = self.stack.last_mut() {
                    top.name = Some(name.clone());
                }
                Ok(name)
            }
            other => {
                let found = other.token();
                self.peeked = Some(other);
                Err(self.mismatch("NAME", &found.to_string()))
            }
        }
    }

    /// Consumes a string. A number token yields its literal text.
    pub fn next_string(&mut self) -> Result<String> {
        match self.peeked.take().map_or_else(|| self.do_peek(), Ok)? {
            Peeked::Str(s) | Peeked::Number(s) => {
                self.value_consumed();
                Ok(s)
            }
            other => {
                let found = other.token();
                self.peeked = Some(other);
                Err(self.mismatch("STRING", &found.to_string()))
            }
        }
    }

    /// Consumes a boolean literal.
    pub fn next_bool(&mut self) -> Result<bool> {
        let value = match self.peeked()? {
            Peeked::True => true,
            Peeked::False => false,
            other => {
                let found = other.token().to_string();
                return Err(self.mismatch("BOOLEAN", &found));
            }
        };
        self.value_consumed();
        Ok(value)
    }

    /// Consumes a `null` literal.
    pub fn next_null(&mut self) -> Result<()> {
        self.expect(Token::Null)?;
        self.value_consumed();
        Ok(())
    }

    /// Consumes a number. String tokens are parsed as numbers; non-finite
    /// values are rejected unless the reader is lenient.
    pub fn next_number(&mut self) -> Result<Number> {
        let parsed = match self.peeked()? {
            Peeked::Number(text) => Number::parse(text).ok_or_else(|| text.clone()),
            Peeked::Str(text) => Number::parse(text.trim()).ok_or_else(|| text.clone()),
            other => {
                let found = other.token().to_string();
                return Err(self.mismatch("NUMBER", &found));
            }
        };
        let number = match parsed {
            Ok(number) => number,
            Err(text) => return Err(self.mismatch("NUMBER", &format!("STRING \"{}\"", text))),
        };
        if number.is_special() && !self.lenient {
            return Err(self.syntax_error(&format!(
                "JSON forbids NaN and infinities: {}",
                number
            )));
        }
        self.value_consumed();
        Ok(number)
    }

    /// Consumes an integral number.
    pub fn next_i64(&mut self) -> Result<i64> {
        let (line, column, path) = (self.line, self.column, self.path());
        let number = self.next_number()?;
        number.as_i64().ok_or_else(|| {
            Error::type_mismatch(line, column, &path, "an integer", &number.to_string())
        })
    }

    /// Consumes a number as `f64`.
    pub fn next_f64(&mut self) -> Result<f64> {
        self.next_number().map(|n| n.as_f64())
    }

    /// Consumes and discards one complete value of any shape.
    pub fn skip_value(&mut self) -> Result<()> {
        let mut depth = 0usize;
        loop {
            match self.peek()? {
                Token::BeginArray => {
                    self.begin_array()?;
                    depth += 1;
                }
                Token::BeginObject => {
                    self.begin_object()?;
                    depth += 1;
                }
                Token::EndArray => {
                    if depth == 0 {
                        return Err(self.mismatch("a value", "END_ARRAY"));
                    }
                    self.end_array()?;
                    depth -= 1;
                }
                Token::EndObject => {
                    if depth == 0 {
                        return Err(self.mismatch("a value", "END_OBJECT"));
                    }
                    self.end_object()?;
                    depth -= 1;
                }
                Token::Name => {
                    self.next_name()?;
                    continue;
                }
                Token::EndDocument => {
                    return Err(self.syntax_error("End of input while skipping a value"));
                }
                Token::String | Token::Number | Token::Boolean | Token::Null => {
                    self.peeked = None;
                    self.value_consumed();
                }
            }
            if depth == 0 {
                return Ok(());
            }
        }
    }

    /// Turns a pending member name into a string value so that a key
    /// adapter can read it with the ordinary value accessors.
    pub fn promote_name_to_value(&mut self) -> Result<()> {
        match self.peeked.take().map_or_else(|| self.do_peek(), Ok)? {
            Peeked::Name(name) => {
                if let Some(top) = self.stack.last_mut() {
                    top.name = Some(name.clone());
                }
                self.peeked = Some(Peeked::Str(name));
                Ok(())
            }
            other => {
                let found = other.token();
                self.peeked = Some(other);
                Err(self.mismatch("NAME", &found.to_string()))
            }
        }
    }

    /// Closes the reader; further operations are usage errors.
    pub fn close(&mut self) {
        self.peeked = None;
        self.stack.clear();
        self.stack.push(Frame::new(Scope::Closed));
    }
}

/// Characters that may appear in a bare word.
fn is_literal(c: char) -> bool {
    !matches!(
        c,
        '/' | '\\'
            | ';'
            | '#'
            | '='
            | '{'
            | '}'
            | '['
            | ']'
            | ':'
            | ','
            | '"'
            | '\''
            | ' '
            | '\t'
            | '\u{000C}'
            | '\r'
            | '\n'
    )
}

/// Matches `-?(0|[1-9]\d*)(\.\d+)?([eE][+-]?\d+)?`.
fn is_strict_number(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i - start
    };

    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            digits(&mut i);
        }
        _ => return false,
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        if digits(&mut i) == 0 {
            return false;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if digits(&mut i) == 0 {
            return false;
        }
    }
    i == bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn strict(input: &str) -> JsonReader<'_> {
        JsonReader::from_str(input)
    }

    fn lenient(input: &str) -> JsonReader<'_> {
        JsonReader::from_str(input).with_lenient(true)
    }

    #[test]
    fn test_strict_number_grammar() {
        for ok in ["0", "-0", "12", "1.5", "-3.25e10", "1E+2", "7e-3"] {
            assert!(is_strict_number(ok), "{ok}");
        }
        for bad in ["01", "1.", ".5", "+1", "1e", "--1", "0x10", "NaN", ""] {
            assert!(!is_strict_number(bad), "{bad}");
        }
    }

    #[test]
    fn test_object_and_array_walk() {
        let mut reader = strict(r#"{"a": [1, 2.5, true, null, "x"], "b": {}}"#);
        reader.begin_object().unwrap();
        assert_eq!(reader.next_name().unwrap(), "a");
        reader.begin_array().unwrap();
        assert_eq!(reader.next_i64().unwrap(), 1);
        assert_eq!(reader.next_f64().unwrap(), 2.5);
        assert!(reader.next_bool().unwrap());
        reader.next_null().unwrap();
        assert_eq!(reader.next_string().unwrap(), "x");
        assert!(!reader.has_next().unwrap());
        reader.end_array().unwrap();
        assert_eq!(reader.next_name().unwrap(), "b");
        reader.begin_object().unwrap();
        assert!(!reader.has_next().unwrap());
        reader.end_object().unwrap();
        reader.end_object().unwrap();
        assert_eq!(reader.peek().unwrap(), Token::EndDocument);
    }

    #[test]
    fn test_escapes_and_surrogates() {
        let mut reader = strict(r#""a\"b\\c\/d\né😀""#);
        assert_eq!(reader.next_string().unwrap(), "a\"b\\c/d\né😀");
    }

    #[test]
    fn test_unterminated_string_is_syntax_error() {
        let err = strict("\"abc").next_string().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_premature_end_is_syntax_error() {
        let mut reader = strict("[1,");
        reader.begin_array().unwrap();
        reader.next_i64().unwrap();
        assert_eq!(reader.peek().unwrap_err().kind(), ErrorKind::Syntax);

        assert_eq!(strict("").peek().unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_accessor_mismatch() {
        let mut reader = strict("[\"abc\"]");
        reader.begin_array().unwrap();
        let err = reader.next_bool().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(err.to_string().contains("$[0]"));
        let err = reader.begin_object().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(reader.next_string().unwrap(), "abc");
    }

    #[test]
    fn test_string_to_number_conversion() {
        let mut reader = strict(r#"["12", "x"]"#);
        reader.begin_array().unwrap();
        assert_eq!(reader.next_i64().unwrap(), 12);
        assert_eq!(
            reader.next_number().unwrap_err().kind(),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn test_fraction_is_not_an_integer() {
        let err = strict("1.5").next_i64().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_lenient_only_tokens() {
        let inputs = [
            "NaN",
            "'single'",
            "bare",
            "[1;2]",
            "{a: 1}",
            "{\"a\" = 1}",
            "// c\n1",
            "1 2",
        ];
        for input in inputs {
            let mut reader = strict(input);
            let err = reader.skip_value().and_then(|_| reader.peek().map(|_| ()));
            assert_eq!(
                err.map_err(|e| e.kind()),
                Err(ErrorKind::Syntax),
                "strict accepted {input}"
            );

            let mut reader = lenient(input);
            reader.skip_value().unwrap();
        }
    }

    #[test]
    fn test_lenient_values() {
        let mut reader = lenient("{name: 'Ann'; age => 4, score: -Infinity /* c */ # tail\n}");
        reader.begin_object().unwrap();
        assert_eq!(reader.next_name().unwrap(), "name");
        assert_eq!(reader.next_string().unwrap(), "Ann");
        assert_eq!(reader.next_name().unwrap(), "age");
        assert_eq!(reader.next_i64().unwrap(), 4);
        assert_eq!(reader.next_name().unwrap(), "score");
        assert_eq!(reader.next_number().unwrap(), Number::NegativeInfinity);
        reader.end_object().unwrap();
    }

    #[test]
    fn test_quoted_nan_rejected_when_strict() {
        let err = strict("\"NaN\"").next_number().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert_eq!(lenient("\"NaN\"").next_number().unwrap(), Number::NaN);
    }

    #[test]
    fn test_multiple_top_level_values_lenient() {
        let mut reader = lenient("1 [2] {}");
        assert_eq!(reader.next_i64().unwrap(), 1);
        reader.skip_value().unwrap();
        reader.skip_value().unwrap();
        assert_eq!(reader.peek().unwrap(), Token::EndDocument);
    }

    #[test]
    fn test_skip_value_nested() {
        let mut reader = strict(r#"{"skip": {"x": [1, {"y": 2}]}, "keep": 3}"#);
        reader.begin_object().unwrap();
        reader.next_name().unwrap();
        reader.skip_value().unwrap();
        assert_eq!(reader.next_name().unwrap(), "keep");
        assert_eq!(reader.next_i64().unwrap(), 3);
    }

    #[test]
    fn test_path_tracking() {
        let mut reader = strict(r#"{"a": [10, 20]}"#);
        reader.begin_object().unwrap();
        reader.next_name().unwrap();
        reader.begin_array().unwrap();
        reader.next_i64().unwrap();
        assert_eq!(reader.path(), "$.a[1]");
    }

    #[test]
    fn test_promote_name_to_value() {
        let mut reader = strict(r#"{"42": true}"#);
        reader.begin_object().unwrap();
        reader.promote_name_to_value().unwrap();
        assert_eq!(reader.next_i64().unwrap(), 42);
        assert!(reader.next_bool().unwrap());
        reader.end_object().unwrap();
    }

    #[test]
    fn test_trailing_comma_rejected() {
        let mut reader = strict("[1,]");
        reader.begin_array().unwrap();
        reader.next_i64().unwrap();
        assert_eq!(reader.peek().unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test]
    fn test_closed_reader_is_usage_error() {
        let mut reader = strict("1");
        reader.close();
        assert_eq!(reader.peek().unwrap_err().kind(), ErrorKind::Usage);
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 2000;
        let input = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        let mut reader = strict(&input);
        reader.skip_value().unwrap();
        assert_eq!(reader.peek().unwrap(), Token::EndDocument);
    }
}
