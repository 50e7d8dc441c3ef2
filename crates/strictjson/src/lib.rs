//! # strictjson
//!
//! Self-contained, strict JSON codec: text in, [`Value`] out, and back.
//!
//! The decoder accepts exactly the JSON grammar (no comments, no trailing
//! commas) and classifies number literals by their lexical shape: `5` is an
//! [`Value::Int`], `5.0` and `5e0` are [`Value::Float`]. Objects keep their
//! keys in first-seen order; a duplicate key updates the earlier entry in
//! place. The encoder writes a single canonical layout.
//!
//! ## Quick start
//!
//! ```rust
//! use strictjson::{decode, encode, Value};
//!
//! let value = decode(r#" {"a": 1, "b": [true, 2.5], "a": 3} "#).unwrap();
//! assert_eq!(value.get("a"), Some(&Value::Int(3)));
//!
//! let text = encode(&value).unwrap();
//! assert_eq!(text, r#"{"a": 3, "b": [true, 2.5]}"#);
//! assert_eq!(decode(&text).unwrap(), value);
//! ```
//!
//! ## Modules
//!
//! - [`value`] — `Value` model and ordered `Map`
//! - [`decoder`] — JSON text → `Value` (ordered-alternative productions)
//! - [`encoder`] — `Value` → JSON text
//! - [`bridge`] — any `serde::Serialize` host value → `Value`
//! - [`limits`] — decoder nesting limit
//! - [`error`] — `ParseError` / `SerializeError`

pub mod bridge;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod limits;
pub mod value;

pub use bridge::to_value;
pub use decoder::{decode, decode_slice, Decoder};
pub use encoder::{encode, encode_into, to_string};
pub use error::{ParseError, SerializeError};
pub use limits::Limits;
pub use value::{Map, Value};
