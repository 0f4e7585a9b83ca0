//! Date-time adapter (chrono).
//!
//! Dates are written as text: the configured `strftime` pattern when one is
//! set, RFC 3339 otherwise. Reading accepts the pattern, RFC 3339, or a
//! number of epoch milliseconds.

use crate::adapter::{AdapterFactory, AdapterRef, TypeAdapter};
use crate::signature::names;
use crate::{Error, JsonReader, JsonWriter, Registry, Result, Token, TypeSignature, Value};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use std::fmt::Write;
use std::sync::Arc;

/// Renders `dt` with `pattern`, or as RFC 3339 when `pattern` is `None`.
pub fn format(dt: &DateTime<Utc>, pattern: Option<&str>) -> Result<String> {
    match pattern {
        None => Ok(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        Some(pattern) => {
            let mut text = String::new();
            write!(text, "{}", dt.format(pattern))
                .map_err(|_| Error::configuration(format!("invalid date pattern '{}'", pattern)))?;
            Ok(text)
        }
    }
}

/// Parses `text` with `pattern` first, then as RFC 3339.
pub fn parse(text: &str, pattern: Option<&str>) -> Option<DateTime<Utc>> {
    if let Some(pattern) = pattern {
        if let Ok(dt) = DateTime::parse_from_str(text, pattern) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(naive.and_utc());
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, pattern) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(Error::configuration(format!(
            "invalid date pattern '{}'",
            pattern
        )));
    }
    Ok(())
}

pub struct DateAdapter {
    pattern: Option<String>,
}

impl TypeAdapter for DateAdapter {
    fn write(&self, out: &mut JsonWriter, value: &Value) -> Result<()> {
        match value {
            Value::Date(dt) => out.value_str(&format(dt, self.pattern.as_deref())?),
            other => Err(Error::value_mismatch("date", other.kind_name())),
        }
    }

    fn read(&self, input: &mut JsonReader<'_>) -> Result<Value> {
        match input.peek()? {
            Token::Number => {
                let millis = input.next_i64()?;
                Utc.timestamp_millis_opt(millis)
                    .single()
                    .map(Value::Date)
                    .ok_or_else(|| super::mismatch(input, "epoch milliseconds", Token::Number))
            }
            Token::String => {
                let text = input.next_string()?;
                match parse(&text, self.pattern.as_deref()) {
                    Some(dt) => Ok(Value::Date(dt)),
                    None => {
                        let (line, column) = input.peek_position();
                        Err(Error::syntax(
                            line,
                            column,
                            &input.path(),
                            &format!("failed parsing '{}' as a date", text),
                        ))
                    }
                }
            }
            found => Err(super::mismatch(input, "a date", found)),
        }
    }
}

pub struct DateFactory {
    pattern: Option<String>,
}

impl DateFactory {
    pub fn new(pattern: Option<String>) -> Self {
        DateFactory { pattern }
    }
}

impl AdapterFactory for DateFactory {
    fn create(&self, _: &Registry, signature: &TypeSignature) -> Result<Option<AdapterRef>> {
        if *signature != TypeSignature::plain(names::DATETIME) {
            return Ok(None);
        }
        if let Some(pattern) = &self.pattern {
            validate_pattern(pattern)?;
        }
        Ok(Some(Arc::new(DateAdapter {
            pattern: self.pattern.clone(),
        })))
    }
}
