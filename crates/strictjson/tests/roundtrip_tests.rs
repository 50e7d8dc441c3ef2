use strictjson::{decode, encode, Map, Value};

/// Assert that decode(encode(v)) == v.
fn assert_roundtrip(value: Value) {
    let text = encode(&value).expect("encode failed");
    let back = decode(&text).expect("decode failed");
    assert_eq!(
        back, value,
        "Roundtrip failed:\n  value: {value:?}\n  text:  {text}\n  back:  {back:?}"
    );
}

/// Assert that encode(decode(text)) reproduces `text` exactly.
fn assert_canonical(text: &str) {
    let value = decode(text).expect("decode failed");
    assert_eq!(encode(&value).unwrap(), text);
}

fn ints_and_strs(ints: &[i64], strs: &[&str]) -> Value {
    ints.iter()
        .map(|&n| Value::Int(n))
        .chain(strs.iter().map(|&s| Value::from(s)))
        .collect()
}

// ============================================================================
// Literal cases
// ============================================================================

#[test]
fn roundtrip_literals() {
    assert_roundtrip(Value::Null);
    assert_roundtrip(Value::Bool(true));
    assert_roundtrip(Value::Bool(false));
}

#[test]
fn roundtrip_strings() {
    assert_roundtrip(Value::from(""));
    assert_roundtrip(Value::from("fo\"oo\n"));
    assert_roundtrip(Value::from("tab\tslash/back\\ctl\u{1}\u{1f}"));
    assert_roundtrip(Value::from("\u{4f60}\u{597d} \u{1F600}"));
}

#[test]
fn roundtrip_numbers() {
    assert_roundtrip(Value::Int(0));
    assert_roundtrip(Value::Int(123));
    assert_roundtrip(Value::Int(-123));
    assert_roundtrip(Value::Int(i64::MAX));
    assert_roundtrip(Value::Int(i64::MIN));
    assert_roundtrip(Value::Float(0.123));
    assert_roundtrip(Value::Float(5.0));
    assert_roundtrip(Value::Float(1e300));
    assert_roundtrip(Value::Float(f64::MIN_POSITIVE));
}

#[test]
fn roundtrip_arrays_of_growing_arity() {
    assert_roundtrip(Value::Array(vec![]));
    assert_roundtrip(ints_and_strs(&[1], &[]));
    assert_roundtrip(ints_and_strs(&[1, 2], &[]));
    assert_roundtrip(ints_and_strs(&[1, 2, 3], &[]));
    assert_roundtrip(ints_and_strs(&[1, 2, 3], &["a"]));
    assert_roundtrip(ints_and_strs(&[1, 2, 3], &["a", "b"]));
    assert_roundtrip(ints_and_strs(&[1, 2, 3], &["a", "b", "c"]));
}

#[test]
fn roundtrip_objects() {
    let mut map = Map::new();
    assert_roundtrip(Value::Object(map.clone()));

    map.insert("gg".to_string(), Value::Array(vec!["foo".into(), 123.into(), "bar".into()]));
    map.insert("aa".to_string(), Value::Array(vec![]));
    assert_roundtrip(Value::Object(map));
}

#[test]
fn int_and_float_do_not_collapse() {
    let text = encode(&Value::Float(5.0)).unwrap();
    assert!(decode(&text).unwrap().is_float());
    let text = encode(&Value::Int(5)).unwrap();
    assert!(decode(&text).unwrap().is_int());
}

// ============================================================================
// Canonical layout
// ============================================================================

#[test]
fn canonical_text_is_a_fixed_point() {
    assert_canonical("null");
    assert_canonical("[1, 2.5, \"x\"]");
    assert_canonical(r#"{"z": {}, "a": [[], {"k": false}]}"#);
    assert_canonical(r#""a\/b\u0001""#);
}

#[test]
fn whitespace_is_normalized() {
    let value = decode("\n\t{ \"a\" :[1,2] ,\"b\":{ } }\r\n").unwrap();
    assert_eq!(encode(&value).unwrap(), r#"{"a": [1, 2], "b": {}}"#);
}

#[test]
fn duplicate_key_keeps_first_position() {
    let value = decode(r#"{"a":1,"b":2,"a":3}"#).unwrap();

    let mut expected = Map::new();
    expected.insert("a".to_string(), Value::Int(1));
    expected.insert("b".to_string(), Value::Int(2));
    expected.insert("a".to_string(), Value::Int(3));
    assert_eq!(value, Value::Object(expected));

    assert_eq!(encode(&value).unwrap(), r#"{"a": 3, "b": 2}"#);
}

#[test]
fn short_escapes_become_canonical() {
    let value = decode(r#""\u0041\/\u000a""#).unwrap();
    assert_eq!(value, Value::from("A/\n"));
    assert_eq!(encode(&value).unwrap(), r#""A\/\n""#);
}
