//! Tests for the decorator, literal and delimited-string decoders.

use assayer::{
    decode_comma_separated, decode_delimited, decode_literal, decode_literal_union,
    decode_string, decode_union, matching_literal, matching_literal_union, nullable, nullish,
    optional,
};
use assayer::{Decode, DecodeOptions, Decoder, Nullish, Value};
use serde_json::json;

#[test]
fn test_optional_decorator_on_array() {
    let decoder = optional(Decode::array(Decode::number()));
    assert_eq!(
        decoder.decode_value(&Value::from(vec![1, 2, 3])).unwrap(),
        Some(vec![1.0, 2.0, 3.0])
    );
    assert_eq!(decoder.decode(None).unwrap(), None);
}

#[test]
fn test_nullable_decorator_on_union() {
    let text = Decode::string().shared();
    let decoder = nullable(decode_union(move |_: Option<&Value>| Some(text.clone())));
    assert_eq!(decoder.decode_value(&Value::Null).unwrap(), None);
    assert_eq!(decoder.decode_value(&Value::from("a")).unwrap(), Some("a".to_string()));
}

#[test]
fn test_nullish_decorator_inside_object() {
    let decoder = Decode::object("Note", |props| props.get("body", nullish(Decode::string())));
    assert_eq!(
        decoder.decode_value(&Value::from(json!({}))).unwrap(),
        Nullish::Absent
    );
    assert_eq!(
        decoder.decode_value(&Value::from(json!({"body": null}))).unwrap(),
        Nullish::Null
    );
}

#[test]
fn test_literal_of_each_kind() {
    assert_eq!(decode_literal("ok").decode_value(&Value::from("ok")).unwrap(), "ok");
    assert_eq!(decode_literal(2.5).decode_value(&Value::from(2.5)).unwrap(), 2.5);
    assert!(decode_literal(false).decode_value(&Value::from(false)).is_ok());
    assert_eq!(
        decode_literal("ok")
            .decode_value(&Value::from("OK"))
            .unwrap_err()
            .to_string(),
        "Value provided does not match literal"
    );
}

#[test]
fn test_literal_union_as_enum() {
    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Level {
        Low,
        High,
    }

    let decoder = decode_literal_union(["low", "high"]).map(|text| match text {
        "low" => Level::Low,
        _ => Level::High,
    });
    assert_eq!(decoder.decode_value(&Value::from("high")).unwrap(), Level::High);
    assert_eq!(
        decoder.decode_value(&Value::from("mid")).unwrap_err().to_string(),
        "Provided value was not in the list of possible literals"
    );
}

#[test]
fn test_matching_literal_with_forced_decoder() {
    let decoder = matching_literal("42".to_string(), decode_string(DecodeOptions::forced()));
    assert_eq!(decoder.decode_value(&Value::from(42)).unwrap(), "42");
    assert!(decoder.decode_value(&Value::from(43)).is_err());

    let decoder = matching_literal_union(
        ["1".to_string(), "2".to_string()],
        decode_string(DecodeOptions::forced()),
    );
    assert_eq!(decoder.decode_value(&Value::from(2)).unwrap(), "2");
    assert!(decoder.decode_value(&Value::from(3)).is_err());
}

#[test]
fn test_comma_separated_strings() {
    let decoder = decode_comma_separated();
    assert_eq!(
        decoder.decode_value(&Value::from("a,b,c")).unwrap(),
        vec!["a", "b", "c"]
    );
    assert_eq!(
        decoder.decode_value(&Value::from(1)).unwrap_err().to_string(),
        "Input is not a string"
    );
}

#[test]
fn test_custom_delimiter_in_object() {
    let decoder = Decode::object("Route", |props| props.get("path", decode_delimited('/')));
    let value = Value::from(json!({"path": "api/v1/users"}));
    assert_eq!(decoder.decode_value(&value).unwrap(), vec!["api", "v1", "users"]);
}
