use strictjson::{encode, to_string, Map, SerializeError, Value};

fn enc(value: &Value) -> String {
    encode(value).expect("encode failed")
}

// ============================================================================
// Primitives
// ============================================================================

#[test]
fn encode_literals() {
    assert_eq!(enc(&Value::Null), "null");
    assert_eq!(enc(&Value::Bool(true)), "true");
    assert_eq!(enc(&Value::Bool(false)), "false");
}

#[test]
fn encode_integers() {
    assert_eq!(enc(&Value::Int(0)), "0");
    assert_eq!(enc(&Value::Int(123)), "123");
    assert_eq!(enc(&Value::Int(-123)), "-123");
    assert_eq!(enc(&Value::Int(i64::MIN)), "-9223372036854775808");
}

#[test]
fn encode_floats() {
    assert_eq!(enc(&Value::Float(0.123)), "0.123");
    assert_eq!(enc(&Value::Float(5.0)), "5.0");
    assert_eq!(enc(&Value::Float(-0.0)), "-0.0");
    assert_eq!(enc(&Value::Float(1e-7)), "1e-7");
}

#[test]
fn encode_non_finite_float_fails() {
    for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert!(matches!(
            encode(&Value::Float(f)),
            Err(SerializeError::UnsupportedType(_))
        ));
    }
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn encode_plain_string() {
    assert_eq!(enc(&Value::from("")), r#""""#);
    assert_eq!(enc(&Value::from("hello")), r#""hello""#);
}

#[test]
fn encode_newline_as_two_char_escape() {
    assert_eq!(enc(&Value::from("\n")), r#""\n""#);
}

#[test]
fn encode_solidus_is_escaped() {
    assert_eq!(enc(&Value::from("a/b")), r#""a\/b""#);
}

#[test]
fn encode_quote_and_newline() {
    assert_eq!(enc(&Value::from("fo\"oo\n")), r#""fo\"oo\n""#);
}

#[test]
fn encode_control_characters_as_hex() {
    assert_eq!(enc(&Value::from("\u{0}\u{1b}")), r#""\u0000\u001b""#);
}

#[test]
fn encode_unicode_unescaped() {
    assert_eq!(enc(&Value::from("\u{4f60}\u{597d} \u{1F600}")), "\"\u{4f60}\u{597d} \u{1F600}\"");
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn encode_arrays() {
    assert_eq!(enc(&Value::Array(vec![])), "[]");
    assert_eq!(enc(&Value::Array(vec![Value::Int(1)])), "[1]");
    assert_eq!(
        enc(&Value::Array(vec![
            Value::Int(1),
            Value::from("a"),
            Value::Array(vec![]),
        ])),
        r#"[1, "a", []]"#
    );
}

#[test]
fn encode_objects_in_insertion_order() {
    assert_eq!(enc(&Value::Object(Map::new())), "{}");

    let mut map = Map::new();
    map.insert("gg".to_string(), Value::Array(vec!["foo".into(), 123.into(), "bar".into()]));
    map.insert("aa".to_string(), Value::Array(vec![]));
    assert_eq!(
        enc(&Value::Object(map)),
        r#"{"gg": ["foo", 123, "bar"], "aa": []}"#
    );
}

#[test]
fn encode_escapes_keys() {
    let mut map = Map::new();
    map.insert("a\"b/c".to_string(), Value::Null);
    assert_eq!(enc(&Value::Object(map)), r#"{"a\"b\/c": null}"#);
}

#[test]
fn encode_nested_failure_propagates() {
    let mut map = Map::new();
    map.insert("x".to_string(), Value::Array(vec![Value::Float(f64::NAN)]));
    assert!(encode(&Value::Object(map)).is_err());
}

// ============================================================================
// Host values
// ============================================================================

#[test]
fn to_string_serializes_host_values() {
    #[derive(serde::Serialize)]
    struct Row<'a> {
        id: u32,
        name: &'a str,
        score: Option<f64>,
    }

    let rows = vec![
        Row { id: 1, name: "a", score: Some(1.5) },
        Row { id: 2, name: "b/c", score: None },
    ];
    assert_eq!(
        to_string(&rows).unwrap(),
        r#"[{"id": 1, "name": "a", "score": 1.5}, {"id": 2, "name": "b\/c", "score": null}]"#
    );
}

#[test]
fn to_string_rejects_non_string_keys() {
    let mut map = std::collections::BTreeMap::new();
    map.insert((1, 2), "tuple key");
    assert!(matches!(
        to_string(&map),
        Err(SerializeError::InvalidKeyType(_))
    ));
}

#[test]
fn to_string_rejects_out_of_range_integers() {
    assert!(matches!(
        to_string(&[u64::MAX]),
        Err(SerializeError::UnsupportedType(_))
    ));
}
