//! Error types for JSON encoding and decoding.
//!
//! Decoding failures are always *hard* errors by the time they reach the
//! caller: a production that merely did not match never surfaces here, it
//! only shows up as [`ParseError::EmptyOrUnparseable`] when no alternative
//! matched at the top level.

use thiserror::Error;

/// Errors that can occur while decoding JSON text.
///
/// Every variant carries the byte offset into the input at which the
/// violation was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// End of input reached before the closing `"` of a string literal.
    #[error("unterminated string literal starting at byte {offset}")]
    UnterminatedString { offset: usize },

    /// A `\` inside a string that does not begin a recognized escape.
    #[error("invalid backslash sequence at byte {offset}")]
    InvalidEscape { offset: usize },

    /// A raw character below U+0020 inside a string literal.
    #[error("unescaped control character U+{code:04X} at byte {offset}")]
    UnescapedControlCharacter { offset: usize, code: u32 },

    /// An array element was required (after `[` or `,`) but none was found.
    #[error("expected array element at byte {offset}")]
    ExpectedElement { offset: usize },

    /// An object key was required but the input is not a string literal.
    #[error("expected object key at byte {offset}")]
    ExpectedKey { offset: usize },

    /// The `:` separating an object key from its value is missing.
    #[error("expected ':' after object key at byte {offset}")]
    ExpectedColon { offset: usize },

    /// An object key is not followed by a value.
    #[error("expected object value at byte {offset}")]
    ExpectedValue { offset: usize },

    /// An array is missing its closing `]`.
    #[error("expected ',' or ']' in array at byte {offset}")]
    UnclosedArray { offset: usize },

    /// An object is missing its closing `}`.
    #[error("expected ',' or '}}' in object at byte {offset}")]
    UnclosedObject { offset: usize },

    /// A numeric literal does not fit the value model (`i64` or finite `f64`).
    #[error("number literal `{literal}` at byte {offset} is out of range")]
    NumberOutOfRange { offset: usize, literal: String },

    /// Arrays/objects nested deeper than the configured limit.
    #[error("nesting depth exceeds limit of {limit} at byte {offset}")]
    NestingTooDeep { offset: usize, limit: usize },

    /// Non-whitespace input remains after a complete value.
    #[error("trailing garbage at byte {offset}")]
    TrailingGarbage { offset: usize },

    /// No value production matched at the start of the input.
    #[error("cannot parse input at byte {offset}")]
    EmptyOrUnparseable { offset: usize },

    /// The raw bytes handed to the decoder are not valid UTF-8.
    #[error("input is not valid UTF-8 (first invalid byte at {offset})")]
    InvalidUtf8 { offset: usize },
}

impl ParseError {
    /// Byte offset into the input where the error was detected.
    pub fn offset(&self) -> usize {
        match *self {
            ParseError::UnterminatedString { offset }
            | ParseError::InvalidEscape { offset }
            | ParseError::UnescapedControlCharacter { offset, .. }
            | ParseError::ExpectedElement { offset }
            | ParseError::ExpectedKey { offset }
            | ParseError::ExpectedColon { offset }
            | ParseError::ExpectedValue { offset }
            | ParseError::UnclosedArray { offset }
            | ParseError::UnclosedObject { offset }
            | ParseError::NumberOutOfRange { offset, .. }
            | ParseError::NestingTooDeep { offset, .. }
            | ParseError::TrailingGarbage { offset }
            | ParseError::EmptyOrUnparseable { offset }
            | ParseError::InvalidUtf8 { offset } => offset,
        }
    }

    /// Short, stable name of the error kind (used in logs and reports).
    pub fn kind(&self) -> &'static str {
        match self {
            ParseError::UnterminatedString { .. } => "unterminated_string",
            ParseError::InvalidEscape { .. } => "invalid_escape",
            ParseError::UnescapedControlCharacter { .. } => "unescaped_control_character",
            ParseError::ExpectedElement { .. } => "expected_element",
            ParseError::ExpectedKey { .. } => "expected_key",
            ParseError::ExpectedColon { .. } => "expected_colon",
            ParseError::ExpectedValue { .. } => "expected_value",
            ParseError::UnclosedArray { .. } => "unclosed_array",
            ParseError::UnclosedObject { .. } => "unclosed_object",
            ParseError::NumberOutOfRange { .. } => "number_out_of_range",
            ParseError::NestingTooDeep { .. } => "nesting_too_deep",
            ParseError::TrailingGarbage { .. } => "trailing_garbage",
            ParseError::EmptyOrUnparseable { .. } => "empty_or_unparseable",
            ParseError::InvalidUtf8 { .. } => "invalid_utf8",
        }
    }
}

/// Errors that can occur while encoding a value as JSON text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializeError {
    /// The value has no JSON representation (non-finite float, out-of-range
    /// host integer, ...).
    #[error("cannot serialize {0}")]
    UnsupportedType(String),

    /// A host map key has no string form.
    #[error("invalid map key: {0}")]
    InvalidKeyType(String),

    /// Any other failure reported while serializing a host value.
    #[error("{0}")]
    Custom(String),
}

/// Convenience alias used throughout strictjson.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;
