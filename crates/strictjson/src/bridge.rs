//! Bridging between host Rust types and the [`Value`] model.
//!
//! Host values go through `serde_json::Value` (ordered, thanks to the
//! `preserve_order` feature) and are then narrowed into [`Value`]. Anything
//! the model cannot hold is rejected here, so the encoder never sees it:
//!
//! - map keys with no string form → [`SerializeError::InvalidKeyType`]
//! - integers outside `i64` → [`SerializeError::UnsupportedType`]
//!
//! `serde_json` writes non-finite floats as `null`, and so does this bridge.

use serde::Serialize;

use crate::error::SerializeError;
use crate::value::{Map, Value};

/// Convert any `Serialize` host value into a [`Value`].
///
/// ```
/// use serde::Serialize;
/// use strictjson::{to_value, Value};
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: f64 }
///
/// let v = to_value(&Point { x: 1, y: 2.5 }).unwrap();
/// assert_eq!(v.get("x"), Some(&Value::Int(1)));
/// assert_eq!(v.get("y"), Some(&Value::Float(2.5)));
/// ```
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, SerializeError> {
    let json = serde_json::to_value(value).map_err(classify)?;
    Value::try_from(json)
}

/// Map a `serde_json` serialization error onto our error kinds.
fn classify(err: serde_json::Error) -> SerializeError {
    let message = err.to_string();
    if message.starts_with("key must be") {
        SerializeError::InvalidKeyType(message)
    } else {
        SerializeError::Custom(message)
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = SerializeError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        Ok(match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => number(&n)?,
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            serde_json::Value::Object(entries) => {
                let mut map = Map::with_capacity(entries.len());
                for (key, item) in entries {
                    map.insert(key, Value::try_from(item)?);
                }
                Value::Object(map)
            }
        })
    }
}

/// `serde_json` keeps integers and floats apart the same way we do, so the
/// classification carries over unchanged.
fn number(n: &serde_json::Number) -> Result<Value, SerializeError> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::Int(i));
    }
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            return Ok(Value::Float(f));
        }
    }
    Err(SerializeError::UnsupportedType(format!(
        "integer {n} (outside the i64 range)"
    )))
}
