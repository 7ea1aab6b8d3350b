//! Tests for error trails read back off decode failures.

use assayer::{Decode, DecodePath, Decoder, PathSegment, Value};
use serde_json::json;

#[test]
fn test_leaf_error_has_empty_path() {
    let error = Decode::number().decode_value(&Value::from("x")).unwrap_err();
    assert!(error.as_decode_error().unwrap().path().is_root());
}

#[test]
fn test_three_level_trail() {
    let city = Decode::object("Address", |props| props.get("city", Decode::string()));
    let address = Decode::object("Customer", move |props| props.get("address", &city));
    let order = Decode::object("Order", move |props| props.get("customer", &address));

    let value = Value::from(json!({"customer": {"address": {"city": null}}}));
    let error = order.decode_value(&value).unwrap_err();
    let path = error.as_decode_error().unwrap().path();

    assert_eq!(path.len(), 3);
    assert_eq!(
        path.to_string(),
        "Order.customer > Customer.address > Address.city"
    );
    assert_eq!(path.property_path(), "customer.address.city");
    assert_eq!(path.last().map(|s| s.entity.as_str()), Some("Address"));
}

#[test]
fn test_path_built_by_hand_matches_recovered_path() {
    let inner = Decode::object("B", |props| props.get("y", Decode::number()));
    let outer = Decode::object("A", move |props| props.get("x", &inner));
    let error = outer
        .decode_value(&Value::from(json!({"x": {"y": false}})))
        .unwrap_err();

    let expected = DecodePath::root()
        .push(PathSegment::new("A", "x"))
        .push(PathSegment::new("B", "y"));
    assert_eq!(error.as_decode_error().unwrap().path(), expected);
}
