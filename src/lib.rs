//! # Assayer
//!
//! Decoder combinators that turn loosely-typed input into strongly-typed
//! values, reporting exactly where and why decoding failed.
//!
//! ## Overview
//!
//! Input arrives as a [`Value`]: the shapes JSON can express, plus dates.
//! A [`Decoder`] turns a value into a typed output or an [`Error`]. Leaf
//! decoders handle numbers, strings, booleans and dates, optionally coercing
//! ("forcing") mismatched input. Composite decoders handle arrays, records and
//! unions by delegating to other decoders.
//!
//! Absent input (`None`) and explicit null (`Some(&Value::Null)`) are kept
//! apart. [`DecodeOptions`] decides whether a decoder lets them through, and
//! the output type follows: an optional number decoder produces
//! `Option<f64>`.
//!
//! When an object decoder fails, each enclosing record wraps the error with
//! its own `Entity.property`, so the final message reads as the whole trail.
//!
//! ## Core Types
//!
//! - [`Value`]: loosely-typed input
//! - [`Decoder`]: the decoding trait, with [`from_fn`] for closures
//! - [`DecodeOptions`] / [`DecodeArrayOptions`]: presence, coercion and array settings
//! - [`DecodeError`]: a chained failure; [`Error`] adds unexpected failures
//! - [`Decode`]: entry point for default decoders
//!
//! ## Example
//!
//! ```rust
//! use assayer::{decode_array, decode_date, decode_object, from_json};
//! use assayer::{Decode, DecodeArrayOptions, DecodeOptions, Decoder, Value};
//! use chrono::{DateTime, Utc};
//!
//! #[derive(Debug)]
//! struct Order {
//!     id: String,
//!     placed: DateTime<Utc>,
//!     quantities: Vec<f64>,
//! }
//!
//! let order = decode_object(
//!     "Order",
//!     |props| {
//!         Ok(Order {
//!             id: props.get("id", Decode::string())?,
//!             placed: props.get("placed", decode_date(DecodeOptions::forced()))?,
//!             quantities: props.get(
//!                 "quantities",
//!                 decode_array(Decode::number(), DecodeArrayOptions::new().require_all()),
//!             )?,
//!         })
//!     },
//!     DecodeOptions::new(),
//! );
//!
//! let json = from_json(order, DecodeOptions::new());
//!
//! let text = r#"{"id": "A-1", "placed": "2024-05-01T12:00:00Z", "quantities": [1, 2]}"#;
//! let decoded = json.decode_value(&Value::from(text)).unwrap();
//! assert_eq!(decoded.quantities, vec![1.0, 2.0]);
//!
//! let bad = r#"{"id": "A-1", "placed": "2024-05-01T12:00:00Z", "quantities": [1, "x"]}"#;
//! let error = json.decode_value(&Value::from(bad)).unwrap_err();
//! assert!(error.to_string().contains("Error in Order.quantities"));
//! ```

mod coerce;
pub mod decoder;
pub mod error;
pub mod json;
pub mod options;
pub mod path;
mod presence;
pub mod value;

pub use decoder::{
    decode_array, decode_boolean, decode_comma_separated, decode_date, decode_delimited,
    decode_literal, decode_literal_union, decode_number, decode_object, decode_string,
    decode_union, from_fn, matching_literal, matching_literal_union, nullable, nullish, optional,
    ArrayDecoder, BooleanDecoder, DateDecoder, Decode, Decoder, DelimitedDecoder, FnDecoder,
    LiteralDecoder, LiteralUnionDecoder, Map, MatchingLiteral, MatchingLiteralUnion,
    NullableDecoder, NullishDecoder, NumberDecoder, ObjectDecoder, OptionalDecoder, Properties,
    SharedDecoder, StringDecoder, UnionDecoder,
};
pub use error::{DecodeError, DecodeErrors, Error};
pub use json::{decode_json, from_json, JsonDecoder};
pub use options::{
    DecodeArrayOptions, DecodeOptions, ErrorCollector, ErrorSink, Nullable, Nullish, Optional,
    OptionalNullable, Required, Shape,
};
pub use path::{DecodePath, PathSegment};
pub use presence::check_presence;
pub use value::{Record, Value};

/// Type alias for accumulated decoding results using DecodeErrors
pub type ValidationResult<T> = stillwater::Validation<T, DecodeErrors>;
