//! Accepted grammar
//!
//! This module documents the text grammar read by [`JsonReader`](crate::JsonReader)
//! and produced by [`JsonWriter`](crate::JsonWriter).
//!
//! # Strict grammar
//!
//! Strict mode is RFC 8259 JSON with a single top-level value:
//!
//! ```text
//! value  = object | array | string | number | "true" | "false" | "null"
//! object = "{" [ string ":" value *( "," string ":" value ) ] "}"
//! array  = "[" [ value *( "," value ) ] "]"
//! number = [ "-" ] ( "0" | [1-9] *digit ) [ "." 1*digit ] [ ( "e" | "E" ) [ "+" | "-" ] 1*digit ]
//! ```
//!
//! Strings are double-quoted and use the standard escapes (`\"`, `\\`, `\/`,
//! `\b`, `\f`, `\n`, `\r`, `\t`, `\uXXXX`). Surrogate pairs written as two
//! `\u` escapes decode to one character.
//!
//! # Lenient grammar
//!
//! [`JsonReader::with_lenient`](crate::JsonReader::with_lenient) enables:
//!
//! | Extension | Example |
//! |-----------|---------|
//! | Unquoted names and string values | `{name: Alice}` |
//! | Single-quoted strings | `['a', 'b']` |
//! | Non-finite numbers | `[NaN, Infinity, -Infinity]` |
//! | `;` wherever `,` is accepted | `[1; 2]` |
//! | `=` or `=>` as name separator | `{a = 1, b => 2}` |
//! | Comments | `// line`, `# line`, `/* block */` |
//! | Case-insensitive keywords | `TRUE`, `Null` |
//! | Several top-level values | `1 2 [3]` |
//!
//! A bare word ends at whitespace or at one of `{ } [ ] : , ; = # / \`.
//! Every extension is a syntax error in strict mode.
//!
//! # Output
//!
//! The writer emits strict JSON. Compact output has no whitespace; with an
//! indent set, each member and element goes on its own line and names are
//! followed by `": "`.
//!
//! | Option | Effect |
//! |--------|--------|
//! | `serialize_nulls = false` | members whose value is `null` are dropped |
//! | `html_safe` | `<`, `>`, `&`, `=`, `'` become `\u003c`-style escapes; `/` becomes `\/` |
//! | `allow_non_finite` | `NaN` and the infinities are written as bare words |
//! | `lenient` | several top-level values; non-finite numbers |
//!
//! # Well-known types
//!
//! | Signature | Text form |
//! |-----------|-----------|
//! | `datetime` | configured `strftime` pattern, RFC 3339 otherwise; epoch millis on input |
//! | `bigint` | raw number; a numeric string on input |
//! | `bitset` | `[0,1,1]` up to the highest set bit; `true`/`false` or `"1"`/`"0"` on input |
//! | enums | the constant's serialized name |
//! | `map<K, V>` | object keyed by the rendered key, or an array of `[key, value]` pairs on input |
//!
//! # Errors
//!
//! Every syntax and type-mismatch error carries the line, column and the
//! path of the value being read, for example `$.users[2].name`.

// Documentation only.
