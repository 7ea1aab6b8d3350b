//! Decoder definitions.
//!
//! This module provides the [`Decoder`] trait, the leaf decoders for numbers,
//! strings, booleans and dates, and the composite decoders for arrays, objects
//! and unions. Composite decoders take other decoders as parameters, so a
//! decoder for a nested structure is built the same way the structure is.
//!
//! # Example
//!
//! ```rust
//! use assayer::{decode_array, Decode, DecodeArrayOptions, Decoder, Value};
//! use serde_json::json;
//!
//! let scores = decode_array(Decode::number(), DecodeArrayOptions::new().require_all());
//!
//! let value = Value::from(json!([1, 2.5, 3]));
//! assert_eq!(scores.decode_value(&value).unwrap(), vec![1.0, 2.5, 3.0]);
//! ```

mod array;
mod boolean;
mod combinators;
mod date;
mod delimited;
mod literal;
mod number;
mod object;
mod string;
mod traits;
mod union;

pub use array::{decode_array, ArrayDecoder};
pub use boolean::{decode_boolean, BooleanDecoder};
pub use combinators::{nullable, nullish, optional, NullableDecoder, NullishDecoder, OptionalDecoder};
pub use date::{decode_date, DateDecoder};
pub use delimited::{decode_comma_separated, decode_delimited, DelimitedDecoder};
pub use literal::{
    decode_literal, decode_literal_union, matching_literal, matching_literal_union,
    LiteralDecoder, LiteralUnionDecoder, MatchingLiteral, MatchingLiteralUnion,
};
pub use number::{decode_number, NumberDecoder};
pub use object::{decode_object, ObjectDecoder, Properties};
pub use string::{decode_string, StringDecoder};
pub use traits::{from_fn, Decoder, FnDecoder, Map, SharedDecoder};
pub use union::{decode_union, UnionDecoder};

use crate::error::Error;
use crate::options::{DecodeArrayOptions, DecodeOptions};

/// Entry point for creating decoders with default options.
///
/// Every factory here is strict: input must be present, non-null and of the
/// expected type. Use the `decode_*` functions with [`DecodeOptions`] for
/// optional, nullable or forced variants.
///
/// # Example
///
/// ```rust
/// use assayer::{Decode, Decoder, Value};
///
/// assert_eq!(Decode::string().decode_value(&Value::from("hi")).unwrap(), "hi");
/// assert!(Decode::boolean().decode_value(&Value::from("true")).is_err());
/// ```
pub struct Decode;

impl Decode {
    /// Creates a strict number decoder.
    pub fn number() -> NumberDecoder {
        decode_number(DecodeOptions::new())
    }

    /// Creates a strict string decoder.
    pub fn string() -> StringDecoder {
        decode_string(DecodeOptions::new())
    }

    /// Creates a strict boolean decoder.
    pub fn boolean() -> BooleanDecoder {
        decode_boolean(DecodeOptions::new())
    }

    /// Creates a strict date decoder.
    ///
    /// Only [`Value::Date`](crate::Value::Date) input is accepted; use
    /// `decode_date(DecodeOptions::forced())` to parse text or timestamps.
    pub fn date() -> DateDecoder {
        decode_date(DecodeOptions::new())
    }

    /// Creates an array decoder in partial mode.
    ///
    /// Elements that fail to decode are dropped from the output.
    pub fn array<D: Decoder>(item: D) -> ArrayDecoder<D> {
        decode_array(item, DecodeArrayOptions::new())
    }

    /// Creates a strict object decoder.
    ///
    /// # Example
    ///
    /// ```rust
    /// use assayer::{Decode, Decoder, Value};
    /// use serde_json::json;
    ///
    /// let name = Decode::object("Pet", |props| props.get("name", Decode::string()));
    ///
    /// let value = Value::from(json!({"name": "Rex"}));
    /// assert_eq!(name.decode_value(&value).unwrap(), "Rex");
    /// assert!(name.decode_value(&Value::Null).is_err());
    /// ```
    pub fn object<T, F>(entity: impl Into<String>, assemble: F) -> ObjectDecoder<F, T>
    where
        F: Fn(&Properties<'_>) -> Result<T, Error> + Send + Sync,
    {
        decode_object(entity, assemble, DecodeOptions::new())
    }
}
