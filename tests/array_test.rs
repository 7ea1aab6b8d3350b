//! Tests for array decoding in partial and all-or-nothing modes.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use assayer::{decode_array, decode_number, from_fn};
use assayer::{
    Decode, DecodeArrayOptions, DecodeError, DecodeOptions, Decoder, Error, ErrorCollector,
    ErrorSink, Value,
};
use stillwater::Validation;

fn even() -> impl Decoder<Output = f64> + Clone {
    from_fn(|value: Option<&Value>| {
        let n = Decode::number().decode(value)?;
        if n % 2.0 == 0.0 {
            Ok(n)
        } else {
            Err(DecodeError::new(format!("{} is odd", n)).into())
        }
    })
}

fn numbers(values: &[i32]) -> Value {
    Value::from(values.to_vec())
}

#[test]
fn test_partial_mode_keeps_successes_in_order() {
    let decoder = decode_array(even(), DecodeArrayOptions::new());
    assert_eq!(
        decoder.decode_value(&numbers(&[1, 2, 3, 4])).unwrap(),
        vec![2.0, 4.0]
    );
}

#[test]
fn test_each_failure_reaches_the_collector_once() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let collector = ErrorCollector::new(move |error: DecodeError| {
        sink.lock().unwrap().push(error.to_string());
    });

    let decoder = decode_array(even(), DecodeArrayOptions::new().collect_errors(collector));
    decoder.decode_value(&numbers(&[1, 2, 3, 4])).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["1 is odd", "3 is odd"]);
}

#[test]
fn test_require_all_fails_on_any_element() {
    let decoder = decode_array(even(), DecodeArrayOptions::new().require_all());
    let error = decoder.decode_value(&numbers(&[2, 4, 5, 6])).unwrap_err();
    assert_eq!(error.to_string(), "5 is odd");

    assert_eq!(
        decoder.decode_value(&numbers(&[2, 4])).unwrap(),
        vec![2.0, 4.0]
    );
}

#[test]
fn test_require_all_does_not_call_collector() {
    let sink = ErrorSink::new();
    let decoder = decode_array(
        even(),
        DecodeArrayOptions::new().require_all().collect_errors(sink.collector()),
    );
    assert!(decoder.decode_value(&numbers(&[1])).is_err());
    assert!(sink.is_empty());
}

#[test]
fn test_unexpected_failure_propagates_in_partial_mode() {
    let decoder = decode_array(
        from_fn(|value: Option<&Value>| match value {
            Some(Value::Number(n)) if *n > 2.0 => Err(Error::unexpected("index out of range")),
            _ => Decode::number().decode(value),
        }),
        DecodeArrayOptions::new(),
    );
    let error = decoder.decode_value(&numbers(&[1, 2, 3])).unwrap_err();
    assert!(!error.is_decode_error());
    assert_eq!(error.to_string(), "index out of range");
}

#[test]
fn test_any_finite_iterable_matches_plain_sequence() {
    let decoder = decode_array(even(), DecodeArrayOptions::new());
    let plain = decoder.decode_value(&numbers(&[1, 2, 3, 4])).unwrap();

    let deque: VecDeque<Value> = (1..=4).map(Value::from).collect();
    assert_eq!(decoder.decode_iter(deque).unwrap(), plain);

    let chained = [1, 2].into_iter().chain([3, 4]).map(Value::from);
    assert_eq!(decoder.decode_iter(chained).unwrap(), plain);
}

#[test]
fn test_string_input_is_iterated() {
    let digits = decode_array(
        decode_number(DecodeOptions::forced()),
        DecodeArrayOptions::new(),
    );
    assert_eq!(
        digits.decode_value(&Value::from("1a3")).unwrap(),
        vec![1.0, 3.0]
    );
}

#[test]
fn test_non_iterables_are_rejected() {
    let decoder = Decode::array(Decode::number());
    for value in [Value::from(1), Value::from(true), Value::from(serde_json::json!({}))] {
        assert_eq!(
            decoder.decode_value(&value).unwrap_err().to_string(),
            "Not an array or iterable"
        );
    }
}

#[test]
fn test_forced_array_still_needs_iterable() {
    let decoder = decode_array(Decode::number(), DecodeArrayOptions::new().force());
    assert_eq!(
        decoder.decode(None).unwrap_err().to_string(),
        "Not an array or iterable"
    );
}

#[test]
fn test_nested_arrays() {
    let matrix = Decode::array(decode_array(Decode::number(), DecodeArrayOptions::new().require_all()));
    let value = Value::from(serde_json::json!([[1, 2], [3, "x"], [4]]));
    assert_eq!(
        matrix.decode_value(&value).unwrap(),
        vec![vec![1.0, 2.0], vec![4.0]]
    );
}

#[test]
fn test_accumulating_mode_collects_everything() {
    let decoder = decode_array(even(), DecodeArrayOptions::new());

    match decoder.decode_accumulating(&numbers(&[1, 3, 5, 6])).unwrap() {
        Validation::Failure(errors) => {
            let messages: Vec<_> = errors.iter().map(|e| e.to_string()).collect();
            assert_eq!(messages, vec!["1 is odd", "3 is odd", "5 is odd"]);
        }
        Validation::Success(_) => panic!("Expected failure"),
    }

    match decoder.decode_accumulating(&Value::from(1)).unwrap() {
        Validation::Failure(errors) => {
            let messages: Vec<_> = errors.iter().map(|e| e.message()).collect();
            assert_eq!(messages, vec!["Not an array or iterable"]);
        }
        Validation::Success(_) => panic!("Expected failure"),
    }
}

#[test]
fn test_empty_array() {
    let decoder = decode_array(even(), DecodeArrayOptions::new().require_all());
    assert!(decoder.decode_value(&Value::from(Vec::<Value>::new())).unwrap().is_empty());
}
