//! JSON encoder — converts a [`Value`] into JSON text.
//!
//! There is one canonical layout and no pretty-printing:
//!
//! - Arrays: `[1, 2, 3]`, empty `[]`
//! - Objects: `{"a": 1, "b": 2}`, empty `{}`, entries in insertion order
//! - Strings: `"`, `\`, `/` and control characters escaped; everything else,
//!   including non-ASCII, passes through unchanged
//! - Floats: Rust's shortest round-trip form, which always contains a `.` or
//!   an exponent, so a float never re-decodes as an integer
//!
//! # Example
//! ```
//! use strictjson::{encode, Map, Value};
//!
//! let mut map = Map::new();
//! map.insert("tags".to_string(), Value::Array(vec![Value::Int(1), "a/b".into()]));
//! assert_eq!(encode(&Value::Object(map)).unwrap(), r#"{"tags": [1, "a\/b"]}"#);
//! ```

use std::fmt::Write;

use serde::Serialize;

use crate::error::{Result, SerializeError};
use crate::value::{Map, Value};

/// Encode a value as JSON text in canonical layout.
///
/// Fails only for floats that have no JSON form (NaN, ±infinity).
pub fn encode(value: &Value) -> Result<String, SerializeError> {
    let mut out = String::new();
    encode_into(value, &mut out)?;
    Ok(out)
}

/// Encode a value, appending to `out`.
///
/// On error `out` may hold a partial encoding.
pub fn encode_into(value: &Value, out: &mut String) -> Result<(), SerializeError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Float(f) => encode_float(*f, out)?,
        Value::Str(s) => encode_string(s, out),
        Value::Array(items) => encode_array(items, out)?,
        Value::Object(map) => encode_object(map, out)?,
    }
    Ok(())
}

/// Serialize any host value through the [`Value`] model, then encode it.
///
/// ```
/// use std::collections::BTreeMap;
///
/// let mut scores = BTreeMap::new();
/// scores.insert("alice", vec![95, 87]);
/// assert_eq!(strictjson::to_string(&scores).unwrap(), r#"{"alice": [95, 87]}"#);
/// ```
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String, SerializeError> {
    encode(&crate::bridge::to_value(value)?)
}

/// `Debug` formatting is the shortest text that parses back to the same
/// `f64`, and always keeps a `.0` or exponent on integral values.
fn encode_float(f: f64, out: &mut String) -> Result<(), SerializeError> {
    if !f.is_finite() {
        return Err(SerializeError::UnsupportedType(format!(
            "non-finite float {f}"
        )));
    }
    let _ = write!(out, "{f:?}");
    Ok(())
}

fn encode_array(items: &[Value], out: &mut String) -> Result<(), SerializeError> {
    out.push('[');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        encode_into(item, out)?;
    }
    out.push(']');
    Ok(())
}

fn encode_object(map: &Map, out: &mut String) -> Result<(), SerializeError> {
    out.push('{');
    for (i, (key, value)) in map.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        encode_string(key, out);
        out.push_str(": ");
        encode_into(value, out)?;
    }
    out.push('}');
    Ok(())
}

/// Quote and escape a string, one character at a time.
fn encode_string(s: &str, out: &mut String) {
    out.reserve(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' => out.push_str("\\/"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
