//! JSON decoder — converts JSON text into a [`Value`].
//!
//! The grammar is a family of production functions sharing one contract:
//!
//! - `Ok(None)` — soft non-match. The input does not start with this
//!   construct; the caller may try the next alternative.
//! - `Ok(Some(Parsed { value, consumed }))` — match. `consumed` is the number
//!   of bytes recognized from the given offset.
//! - `Err(_)` — hard error. The production committed (e.g. saw an opening
//!   `"`) and the input is malformed. Propagates straight to the caller of
//!   [`decode`]; nothing retries it.
//!
//! Productions are pure functions of `(source, offset, depth)`. The only
//! state is the offset the caller threads through, which only moves forward.
//!
//! # Key design decisions
//!
//! - **Ordered alternatives**: the value production tries string, number,
//!   array, object, `true`, `false`, `null` in that order via `first_match`.
//! - **Number sub-parts are soft**: a `.` without digits, or an `e` without
//!   digits, just ends the literal. The integer part stands on its own and the
//!   leftover characters are reported by whoever reads next.
//! - **Lexical classification**: a fraction or exponent makes the literal a
//!   [`Value::Float`], otherwise it is a [`Value::Int`]. Out-of-range literals
//!   are a hard error, never a silent promotion.
//! - **`\uXXXX`** decodes to a UTF-16 code unit. A high/low pair forms one
//!   character; a lone surrogate becomes U+FFFD because a Rust `String` cannot
//!   hold it.

use tracing::{debug, trace};

use crate::error::{ParseError, Result};
use crate::limits::Limits;
use crate::value::{Map, Value};

/// Insignificant whitespace between tokens.
const WHITESPACE: &[u8] = b" \t\n\r";

/// Two-character escapes and the character each one stands for.
const SHORT_ESCAPES: [(u8, char); 8] = [
    (b'"', '"'),
    (b'\\', '\\'),
    (b'/', '/'),
    (b'b', '\u{08}'),
    (b'f', '\u{0c}'),
    (b'n', '\n'),
    (b'r', '\r'),
    (b't', '\t'),
];

/// A successful match.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Parsed<T> {
    pub value: T,
    /// Bytes consumed from the production's start offset.
    pub consumed: usize,
}

impl<T> Parsed<T> {
    fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            consumed: self.consumed,
        }
    }
}

/// What every production returns. `Ok(None)` is the soft non-match.
pub(crate) type Outcome<T> = Result<Option<Parsed<T>>>;

/// A production: `(grammar, offset, depth) -> Outcome`.
type Production<T> = fn(&Grammar<'_>, usize, usize) -> Outcome<T>;

/// Alternatives of the value production, in the order they are tried.
const VALUE_ALTERNATIVES: [Production<Value>; 7] = [
    string_value,
    number,
    array,
    object,
    true_literal,
    false_literal,
    null_literal,
];

/// The input being decoded plus the limits in force.
pub(crate) struct Grammar<'a> {
    source: &'a str,
    limits: Limits,
}

impl<'a> Grammar<'a> {
    fn new(source: &'a str, limits: Limits) -> Self {
        Self { source, limits }
    }

    /// Remaining input from `at`. `at` is always on a char boundary.
    fn rest(&self, at: usize) -> &'a str {
        &self.source[at..]
    }

    /// Skip whitespace starting at `at`, returning the new offset.
    fn skip_whitespace(&self, at: usize) -> usize {
        at + whitespace_len(self.rest(at))
    }

    /// Open one level of array/object nesting.
    fn enter(&self, at: usize, depth: usize) -> Result<usize> {
        let depth = depth.saturating_add(1);
        if depth > self.limits.max_depth {
            return Err(ParseError::NestingTooDeep {
                offset: at,
                limit: self.limits.max_depth,
            });
        }
        Ok(depth)
    }
}

/// Decoder with explicit [`Limits`].
///
/// ```
/// use strictjson::{Decoder, Limits, Value};
///
/// let decoder = Decoder::new(Limits::default().with_max_depth(1));
/// assert_eq!(decoder.decode("[1]").unwrap(), Value::Array(vec![Value::Int(1)]));
/// assert!(decoder.decode("[[1]]").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    limits: Limits,
}

impl Decoder {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Decode a complete JSON text. Surrounding whitespace is allowed;
    /// anything else after the value is [`ParseError::TrailingGarbage`].
    pub fn decode(&self, input: &str) -> Result<Value> {
        trace!(len = input.len(), "decoding JSON text");
        let result = self.decode_text(input);
        if let Err(err) = &result {
            debug!(kind = err.kind(), offset = err.offset(), "decode failed");
        }
        result
    }

    /// Decode raw bytes, which must be UTF-8.
    pub fn decode_slice(&self, input: &[u8]) -> Result<Value> {
        let text = std::str::from_utf8(input).map_err(|err| {
            debug!(offset = err.valid_up_to(), "input is not valid UTF-8");
            ParseError::InvalidUtf8 {
                offset: err.valid_up_to(),
            }
        })?;
        self.decode(text)
    }

    fn decode_text(&self, input: &str) -> Result<Value> {
        let grammar = Grammar::new(input, self.limits);
        let Some(parsed) = value(&grammar, 0, 0)? else {
            return Err(ParseError::EmptyOrUnparseable {
                offset: whitespace_len(input),
            });
        };
        if parsed.consumed != input.len() {
            return Err(ParseError::TrailingGarbage {
                offset: parsed.consumed,
            });
        }
        Ok(parsed.value)
    }
}

/// Decode JSON text into a [`Value`] with default [`Limits`].
///
/// ```
/// use strictjson::{decode, Value};
///
/// assert_eq!(decode("5").unwrap(), Value::Int(5));
/// assert_eq!(decode("5.0").unwrap(), Value::Float(5.0));
/// assert!(decode("\"abc").is_err());
/// ```
pub fn decode(input: &str) -> Result<Value> {
    Decoder::default().decode(input)
}

/// Decode UTF-8 bytes into a [`Value`] with default [`Limits`].
pub fn decode_slice(input: &[u8]) -> Result<Value> {
    Decoder::default().decode_slice(input)
}

/// Try each production in order and return the first match.
///
/// Hard errors short-circuit: a later alternative is never tried once an
/// earlier one has failed hard.
fn first_match<T>(
    grammar: &Grammar<'_>,
    at: usize,
    depth: usize,
    alternatives: &[Production<T>],
) -> Outcome<T> {
    for production in alternatives {
        if let Some(parsed) = production(grammar, at, depth)? {
            return Ok(Some(parsed));
        }
    }
    Ok(None)
}

/// A value with optional whitespace on both sides.
fn value(grammar: &Grammar<'_>, at: usize, depth: usize) -> Outcome<Value> {
    let start = grammar.skip_whitespace(at);
    let Some(parsed) = first_match(grammar, start, depth, &VALUE_ALTERNATIVES)? else {
        return Ok(None);
    };
    let end = grammar.skip_whitespace(start + parsed.consumed);
    Ok(Some(Parsed {
        value: parsed.value,
        consumed: end - at,
    }))
}

fn string_value(grammar: &Grammar<'_>, at: usize, depth: usize) -> Outcome<Value> {
    Ok(string(grammar, at, depth)?.map(|parsed| parsed.map(Value::Str)))
}

/// A string literal. Commits on the opening `"`.
fn string(grammar: &Grammar<'_>, at: usize, _depth: usize) -> Outcome<String> {
    let rest = grammar.rest(at);
    if !rest.starts_with('"') {
        return Ok(None);
    }

    let mut out = Utf16Builder::default();
    let mut pos = 1;
    loop {
        let Some(c) = rest[pos..].chars().next() else {
            return Err(ParseError::UnterminatedString { offset: at });
        };
        match c {
            '"' => {
                pos += 1;
                break;
            }
            '\\' => match escape(&rest[pos..], &mut out) {
                Some(n) => pos += n,
                None => return Err(ParseError::InvalidEscape { offset: at + pos }),
            },
            c if (c as u32) < 0x20 => {
                return Err(ParseError::UnescapedControlCharacter {
                    offset: at + pos,
                    code: c as u32,
                });
            }
            c => {
                out.push_char(c);
                pos += c.len_utf8();
            }
        }
    }

    Ok(Some(Parsed {
        value: out.finish(),
        consumed: pos,
    }))
}

/// An escape sequence starting at a `\`. Returns the bytes consumed, or
/// `None` when it is neither a short escape nor a full `\uXXXX`.
fn escape(rest: &str, out: &mut Utf16Builder) -> Option<usize> {
    let bytes = rest.as_bytes();
    let marker = *bytes.get(1)?;

    if let Some(&(_, c)) = SHORT_ESCAPES.iter().find(|(m, _)| *m == marker) {
        out.push_char(c);
        return Some(2);
    }

    if marker == b'u' {
        let hex = bytes.get(2..6)?;
        if !hex.iter().all(u8::is_ascii_hexdigit) {
            return None;
        }
        // The four bytes are ASCII, so this slice is on char boundaries.
        let unit = u16::from_str_radix(&rest[2..6], 16).ok()?;
        out.push_unit(unit);
        return Some(6);
    }

    None
}

/// A number literal. Never commits before the first digit.
fn number(grammar: &Grammar<'_>, at: usize, _depth: usize) -> Outcome<Value> {
    let rest = grammar.rest(at);
    let mut pos = prefix_len(rest, "-");

    let zero = prefix_len(&rest[pos..], "0");
    if zero > 0 {
        pos += zero;
    } else {
        let digits = digits_len(&rest[pos..]);
        if digits == 0 {
            return Ok(None);
        }
        pos += digits;
    }

    let fraction = fraction_len(&rest[pos..]);
    pos += fraction;
    let exponent = exponent_len(&rest[pos..]);
    pos += exponent;

    let literal = &rest[..pos];
    let out_of_range = || ParseError::NumberOutOfRange {
        offset: at,
        literal: literal.to_string(),
    };

    let value = if fraction > 0 || exponent > 0 {
        match literal.parse::<f64>() {
            Ok(f) if f.is_finite() => Value::Float(f),
            _ => return Err(out_of_range()),
        }
    } else {
        Value::Int(literal.parse::<i64>().map_err(|_| out_of_range())?)
    };

    Ok(Some(Parsed {
        value,
        consumed: pos,
    }))
}

/// `.` followed by one or more digits, or nothing at all.
fn fraction_len(rest: &str) -> usize {
    if !rest.starts_with('.') {
        return 0;
    }
    match digits_len(&rest[1..]) {
        0 => 0,
        n => 1 + n,
    }
}

/// `e`/`E`, at most one sign, then one or more digits, or nothing at all.
fn exponent_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let markers = bytes.iter().take_while(|&&b| matches!(b, b'e' | b'E')).count();
    if markers != 1 {
        return 0;
    }
    let signs = bytes[1..]
        .iter()
        .take_while(|&&b| matches!(b, b'+' | b'-'))
        .count();
    if signs > 1 {
        return 0;
    }
    match digits_len(&rest[1 + signs..]) {
        0 => 0,
        n => 1 + signs + n,
    }
}

/// An array. Commits on the opening `[`.
fn array(grammar: &Grammar<'_>, at: usize, depth: usize) -> Outcome<Value> {
    if !grammar.rest(at).starts_with('[') {
        return Ok(None);
    }
    let depth = grammar.enter(at, depth)?;
    let mut items = Vec::new();
    let mut pos = grammar.skip_whitespace(at + 1);

    if grammar.rest(pos).starts_with(']') {
        return Ok(Some(Parsed {
            value: Value::Array(items),
            consumed: pos + 1 - at,
        }));
    }

    loop {
        let Some(item) = value(grammar, pos, depth)? else {
            return Err(ParseError::ExpectedElement {
                offset: grammar.skip_whitespace(pos),
            });
        };
        items.push(item.value);
        pos += item.consumed;
        if !grammar.rest(pos).starts_with(',') {
            break;
        }
        pos += 1;
    }

    pos = grammar.skip_whitespace(pos);
    if !grammar.rest(pos).starts_with(']') {
        return Err(ParseError::UnclosedArray { offset: pos });
    }
    Ok(Some(Parsed {
        value: Value::Array(items),
        consumed: pos + 1 - at,
    }))
}

/// An object. Commits on the opening `{`. Duplicate keys overwrite the
/// earlier value without moving the key.
fn object(grammar: &Grammar<'_>, at: usize, depth: usize) -> Outcome<Value> {
    if !grammar.rest(at).starts_with('{') {
        return Ok(None);
    }
    let depth = grammar.enter(at, depth)?;
    let mut map = Map::new();
    let mut pos = grammar.skip_whitespace(at + 1);

    if grammar.rest(pos).starts_with('}') {
        return Ok(Some(Parsed {
            value: Value::Object(map),
            consumed: pos + 1 - at,
        }));
    }

    loop {
        pos = grammar.skip_whitespace(pos);
        let Some(key) = string(grammar, pos, depth)? else {
            return Err(ParseError::ExpectedKey { offset: pos });
        };
        pos = grammar.skip_whitespace(pos + key.consumed);

        if !grammar.rest(pos).starts_with(':') {
            return Err(ParseError::ExpectedColon { offset: pos });
        }
        pos += 1;

        let Some(item) = value(grammar, pos, depth)? else {
            return Err(ParseError::ExpectedValue {
                offset: grammar.skip_whitespace(pos),
            });
        };
        pos += item.consumed;
        map.insert(key.value, item.value);

        pos = grammar.skip_whitespace(pos);
        if !grammar.rest(pos).starts_with(',') {
            break;
        }
        pos += 1;
    }

    pos = grammar.skip_whitespace(pos);
    if !grammar.rest(pos).starts_with('}') {
        return Err(ParseError::UnclosedObject { offset: pos });
    }
    Ok(Some(Parsed {
        value: Value::Object(map),
        consumed: pos + 1 - at,
    }))
}

fn true_literal(grammar: &Grammar<'_>, at: usize, _depth: usize) -> Outcome<Value> {
    Ok(literal(grammar, at, "true", Value::Bool(true)))
}

fn false_literal(grammar: &Grammar<'_>, at: usize, _depth: usize) -> Outcome<Value> {
    Ok(literal(grammar, at, "false", Value::Bool(false)))
}

fn null_literal(grammar: &Grammar<'_>, at: usize, _depth: usize) -> Outcome<Value> {
    Ok(literal(grammar, at, "null", Value::Null))
}

/// Exact-prefix match of a keyword.
fn literal(grammar: &Grammar<'_>, at: usize, keyword: &str, value: Value) -> Option<Parsed<Value>> {
    match prefix_len(grammar.rest(at), keyword) {
        0 => None,
        consumed => Some(Parsed { value, consumed }),
    }
}

/// `lit.len()` if `rest` starts with `lit`, else 0.
fn prefix_len(rest: &str, lit: &str) -> usize {
    if rest.starts_with(lit) {
        lit.len()
    } else {
        0
    }
}

fn digits_len(rest: &str) -> usize {
    rest.bytes().take_while(u8::is_ascii_digit).count()
}

fn whitespace_len(rest: &str) -> usize {
    rest.bytes().take_while(|b| WHITESPACE.contains(b)).count()
}

/// Accumulates string content from literal chars and UTF-16 code units.
#[derive(Default)]
struct Utf16Builder {
    out: String,
    high: Option<u16>,
}

impl Utf16Builder {
    fn push_char(&mut self, c: char) {
        self.flush_high();
        self.out.push(c);
    }

    fn push_unit(&mut self, unit: u16) {
        match unit {
            0xD800..=0xDBFF => {
                self.flush_high();
                self.high = Some(unit);
            }
            0xDC00..=0xDFFF => match self.high.take() {
                Some(high) => {
                    let code = 0x10000
                        + ((u32::from(high) - 0xD800) << 10)
                        + (u32::from(unit) - 0xDC00);
                    self.out
                        .push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
                None => self.out.push(char::REPLACEMENT_CHARACTER),
            },
            _ => {
                self.flush_high();
                self.out
                    .push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        }
    }

    fn flush_high(&mut self) {
        if self.high.take().is_some() {
            self.out.push(char::REPLACEMENT_CHARACTER);
        }
    }

    fn finish(mut self) -> String {
        self.flush_high();
        self.out
    }
}
