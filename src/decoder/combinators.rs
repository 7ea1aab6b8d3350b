//! Decorators that let absent or null input through any decoder.
//!
//! These wrap an existing decoder instead of configuring it, which is useful
//! for decoders that take no [`DecodeOptions`](crate::DecodeOptions), such as
//! union or literal decoders.

use crate::error::Error;
use crate::options::Nullish;
use crate::value::Value;

use super::Decoder;

/// Passes absent input through as `None`, see [`optional`].
#[derive(Debug, Clone, Copy)]
pub struct OptionalDecoder<D> {
    inner: D,
}

/// Passes null input through as `None`, see [`nullable`].
#[derive(Debug, Clone, Copy)]
pub struct NullableDecoder<D> {
    inner: D,
}

/// Passes absent and null input through, see [`nullish`].
#[derive(Debug, Clone, Copy)]
pub struct NullishDecoder<D> {
    inner: D,
}

/// Wraps `decoder` so that absent input yields `None`.
///
/// Null and every other input are handed to `decoder`.
///
/// # Example
///
/// ```rust
/// use assayer::{optional, Decode, Decoder, Value};
///
/// let decoder = optional(Decode::number());
/// assert_eq!(decoder.decode(None).unwrap(), None);
/// assert_eq!(decoder.decode_value(&Value::from(1)).unwrap(), Some(1.0));
/// assert!(decoder.decode_value(&Value::Null).is_err());
/// ```
pub fn optional<D: Decoder>(decoder: D) -> OptionalDecoder<D> {
    OptionalDecoder { inner: decoder }
}

/// Wraps `decoder` so that null input yields `None`.
pub fn nullable<D: Decoder>(decoder: D) -> NullableDecoder<D> {
    NullableDecoder { inner: decoder }
}

/// Wraps `decoder` so that absent and null input are passed through.
pub fn nullish<D: Decoder>(decoder: D) -> NullishDecoder<D> {
    NullishDecoder { inner: decoder }
}

impl<D: Decoder> Decoder for OptionalDecoder<D> {
    type Output = Option<D::Output>;

    fn decode(&self, value: Option<&Value>) -> Result<Self::Output, Error> {
        match value {
            None => Ok(None),
            present => self.inner.decode(present).map(Some),
        }
    }
}

impl<D: Decoder> Decoder for NullableDecoder<D> {
    type Output = Option<D::Output>;

    fn decode(&self, value: Option<&Value>) -> Result<Self::Output, Error> {
        match value {
            Some(Value::Null) => Ok(None),
            other => self.inner.decode(other).map(Some),
        }
    }
}

impl<D: Decoder> Decoder for NullishDecoder<D> {
    type Output = Nullish<D::Output>;

    fn decode(&self, value: Option<&Value>) -> Result<Self::Output, Error> {
        match value {
            None => Ok(Nullish::Absent),
            Some(Value::Null) => Ok(Nullish::Null),
            present => self.inner.decode(present).map(Nullish::Present),
        }
    }
}
