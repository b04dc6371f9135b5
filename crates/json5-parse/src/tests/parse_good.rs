use rstest::rstest;

use crate::{Map, ParserOptions, Value, parse, parse_with_options};

fn obj<const N: usize>(members: [(&str, Value); N]) -> Value {
    Value::Object(
        members
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<Map>(),
    )
}

#[rstest]
#[case("null", Value::Null)]
#[case("  true ", Value::Boolean(true))]
#[case("\n\tfalse\r\n", Value::Boolean(false))]
#[case("0", Value::Integer(0))]
#[case("-0", Value::Integer(0))]
#[case("42", Value::Integer(42))]
#[case("-12", Value::Integer(-12))]
#[case("9223372036854775807", Value::Integer(i64::MAX))]
#[case("0.2", Value::Float(0.2))]
#[case("1e2", Value::Float(100.0))]
#[case("12.04e4", Value::Float(120_400.0))]
#[case("-1.5E-3", Value::Float(-0.0015))]
#[case("0e0", Value::Float(0.0))]
#[case("1.0", Value::Float(1.0))]
#[case("12.566", Value::Float(12.566))]
#[case("3.14e8", Value::Float(314_000_000.0))]
#[case(r#""foo""#, Value::String("foo".into()))]
#[case("// comment\nnull", Value::Null)]
#[case("/* c */ null", Value::Null)]
#[case(r#""""#, Value::String(String::new()))]
fn scalars(#[case] src: &str, #[case] expected: Value) {
    super::init_tracing();
    assert_eq!(parse(src).unwrap(), expected);
}

#[test]
fn integers_and_floats_stay_distinct() {
    assert_eq!(parse("1").unwrap(), Value::Integer(1));
    assert_eq!(parse("1.0").unwrap(), Value::Float(1.0));
    assert_ne!(parse("1").unwrap(), parse("1.0").unwrap());
}

#[test]
fn nested_composites() {
    let v = parse(r#"{"a": [1, {"b": null}], "c": {}, "d": []}"#).unwrap();
    assert_eq!(
        v,
        obj([
            (
                "a",
                Value::Array(vec![Value::Integer(1), obj([("b", Value::Null)])])
            ),
            ("c", obj([])),
            ("d", Value::Array(vec![])),
        ])
    );
}

#[test]
fn nesting_shapes() {
    assert_eq!(
        parse("[[[1,2,3]]]").unwrap(),
        Value::Array(vec![Value::Array(vec![Value::Array(vec![
            Value::Integer(1),
            Value::Integer(2),
            Value::Integer(3),
        ])])])
    );
    assert_eq!(
        parse(r#"{"a":{"b":{"c":3}}}"#).unwrap(),
        obj([("a", obj([("b", obj([("c", Value::Integer(3))]))]))])
    );
}

#[test]
fn stacks_stay_in_step_through_every_transition() {
    // Each dispatch re-checks the stack invariants in test builds.
    let src = r#"[{"a": [{}, []], "b": {"c": [1, {"d": null},]}}, [[{"e": "f"}]], 2,]"#;
    assert_eq!(
        parse(src).unwrap().to_string(),
        r#"[{"a":[{},[]],"b":{"c":[1,{"d":null}]}},[[{"e":"f"}]],2]"#
    );
}

#[test]
fn arrays_of_arrays() {
    let v = parse("[[], [[]], [1, [2, [3]]]]").unwrap();
    assert_eq!(v.to_string(), "[[],[[]],[1,[2,[3]]]]");
}

#[test]
fn comments_everywhere() {
    let src = r#"
        // leading
        /* block */ {
            "a" /* before colon */ : // after colon
                1 /* after value */ ,
            /** doc **/ "b": [ /* empty slot */ 2 // two
            ]
        } // trailing
    "#;
    assert_eq!(
        parse(src).unwrap(),
        obj([("a", Value::Integer(1)), ("b", Value::Array(vec![Value::Integer(2)]))])
    );
}

#[rstest]
#[case("[1,]", "[1]")]
#[case("[1, 2, ]", "[1,2]")]
#[case(r#"{"a": 1,}"#, r#"{"a":1}"#)]
#[case(r#"{"a": [true,], }"#, r#"{"a":[true]}"#)]
fn trailing_commas(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(parse(src).unwrap().to_string(), expected);
}

#[test]
fn string_escapes() {
    let v = parse(r#"["\"", "\\", "\/", "\b\f\n\r\t", "a/b"]"#).unwrap();
    assert_eq!(
        v,
        Value::Array(vec![
            "\"".into(),
            "\\".into(),
            "/".into(),
            "\u{8}\u{c}\n\r\t".into(),
            "a/b".into(),
        ])
    );
}

#[test]
fn raw_control_characters_by_default() {
    assert_eq!(
        parse("\"line\nbreak\"").unwrap(),
        Value::String("line\nbreak".into())
    );
}

#[test]
fn non_ascii_strings() {
    let v = parse("{\"gr\u{fc}\u{df}e\": \"\u{1F600} caf\u{e9}\"}").unwrap();
    assert_eq!(
        v.get("gr\u{fc}\u{df}e").and_then(Value::as_str),
        Some("\u{1F600} caf\u{e9}")
    );
}

#[test]
fn member_order_is_preserved() {
    let v = parse(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
    let keys: Vec<_> = v.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn duplicate_keys_keep_the_last_value() {
    let v = parse(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
    assert_eq!(v.to_string(), r#"{"a":3,"b":2}"#);
}

#[test]
fn empty_and_odd_keys() {
    let v = parse(r#"{"": 0, " ": 1, "{": 2, "null": 3}"#).unwrap();
    assert_eq!(v.as_object().map(Map::len), Some(4));
    assert_eq!(v.get(""), Some(&Value::Integer(0)));
    assert_eq!(v.get("{"), Some(&Value::Integer(2)));
}

#[test]
fn byte_input() {
    assert_eq!(parse(b"[true]").unwrap(), Value::Array(vec![true.into()]));
    assert_eq!(parse(&b"1".to_vec()).unwrap(), Value::Integer(1));
}

#[test]
fn deep_nesting_within_limit() {
    const DEPTH: usize = 2_000;
    let src = format!("{}{}", "[".repeat(DEPTH), "]".repeat(DEPTH));
    let options = ParserOptions {
        max_depth: DEPTH,
        ..ParserOptions::default()
    };

    let mut v = &parse_with_options(&src, options).unwrap();
    let mut depth = 1;
    while let Some([inner]) = v.as_array().map(Vec::as_slice) {
        v = inner;
        depth += 1;
    }
    assert_eq!(depth, DEPTH);
    assert_eq!(v, &Value::Array(vec![]));
}

#[test]
fn default_depth_limit_is_inclusive() {
    let src = format!("{}{}", "[".repeat(128), "]".repeat(128));
    assert!(parse(&src).is_ok());
}

#[test]
fn unicode_escapes_when_enabled() {
    let options = ParserOptions {
        unicode_escapes: true,
        ..ParserOptions::default()
    };
    let src = r#"{"k\u0065y": "\ud83d\ude00"}"#;
    let v = parse_with_options(src, options).unwrap();
    assert_eq!(v.get("key").and_then(Value::as_str), Some("\u{1F600}"));
}

#[test]
fn from_str() {
    let v: Value = "[null]".parse().unwrap();
    assert_eq!(v, Value::Array(vec![Value::Null]));
    assert!("[".parse::<Value>().is_err());
}
