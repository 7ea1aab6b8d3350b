//! Array decoding with partial-failure collection.
//!
//! This module provides [`ArrayDecoder`]. In the default partial mode an
//! element that fails to decode is dropped from the output and its error is
//! handed to the configured [`ErrorCollector`](crate::ErrorCollector); with
//! `require_all` the first element failure fails the whole array.

use std::borrow::Cow;

use stillwater::Validation;

use crate::error::{DecodeError, DecodeErrors, Error};
use crate::options::{DecodeArrayOptions, Required, Shape};
use crate::presence::check_presence;
use crate::value::Value;
use crate::ValidationResult;

use super::Decoder;

pub(crate) const NOT_ITERABLE: &str = "Not an array or iterable";

/// A decoder producing `Vec<T>` from a sequence of values.
///
/// Accepted inputs are [`Value::Array`] and strings, which are iterated by
/// character. Any other Rust iterable of values can be decoded through
/// [`decode_iter`](ArrayDecoder::decode_iter).
///
/// # Example
///
/// ```rust
/// use assayer::{decode_array, DecodeArrayOptions, Decode, Decoder, Value};
///
/// let values = Value::from(vec![Value::from(1), Value::from("two"), Value::from(3)]);
///
/// let partial = decode_array(Decode::number(), DecodeArrayOptions::new());
/// assert_eq!(partial.decode_value(&values).unwrap(), vec![1.0, 3.0]);
///
/// let strict = decode_array(Decode::number(), DecodeArrayOptions::new().require_all());
/// assert!(strict.decode_value(&values).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ArrayDecoder<D, S = Required> {
    item: D,
    options: DecodeArrayOptions<S>,
}

/// Creates an array decoder applying `item` to each element.
pub fn decode_array<D: Decoder, S: Shape>(
    item: D,
    options: DecodeArrayOptions<S>,
) -> ArrayDecoder<D, S> {
    ArrayDecoder { item, options }
}

impl<D: Decoder, S: Shape> ArrayDecoder<D, S> {
    pub fn item_decoder(&self) -> &D {
        &self.item
    }

    pub fn options(&self) -> &DecodeArrayOptions<S> {
        &self.options
    }

    /// Decodes the elements of any Rust iterable, collected eagerly.
    ///
    /// ```rust
    /// use assayer::{decode_array, DecodeArrayOptions, Decode, Value};
    ///
    /// let decoder = decode_array(Decode::number(), DecodeArrayOptions::new());
    /// let numbers = decoder.decode_iter((1..=3).map(Value::from)).unwrap();
    /// assert_eq!(numbers, vec![1.0, 2.0, 3.0]);
    /// ```
    pub fn decode_iter<I>(&self, items: I) -> Result<S::Out<Vec<D::Output>>, Error>
    where
        I: IntoIterator<Item = Value>,
    {
        let items: Vec<Value> = items.into_iter().collect();
        self.decode_items(&items).map(S::present)
    }

    /// Decodes every element and reports all element failures together.
    ///
    /// Unlike [`decode`](Decoder::decode), nothing is dropped silently: the
    /// result is either every element decoded, or the full list of element
    /// errors. Unexpected failures still abort with `Err`.
    ///
    /// ```rust
    /// use assayer::{decode_array, DecodeArrayOptions, Decode, Value};
    /// use stillwater::Validation;
    ///
    /// let decoder = decode_array(Decode::number(), DecodeArrayOptions::new());
    /// let input = Value::from(vec![Value::from("a"), Value::from(2), Value::from("c")]);
    ///
    /// match decoder.decode_accumulating(&input).unwrap() {
    ///     Validation::Failure(errors) => assert_eq!(errors.len(), 2),
    ///     Validation::Success(_) => panic!("expected failure"),
    /// }
    /// ```
    pub fn decode_accumulating(
        &self,
        value: &Value,
    ) -> Result<ValidationResult<S::Out<Vec<D::Output>>>, Error> {
        let base = self.options.base();
        match check_presence::<Vec<D::Output>, S>(Some(value), base) {
            Ok(Some(out)) => return Ok(Validation::Success(out)),
            Ok(None) => {}
            Err(error) => return Ok(Validation::Failure(DecodeErrors::single(error))),
        }

        let items = match iterable_items(Some(value)) {
            Ok(items) => items,
            Err(error) => return Ok(Validation::Failure(DecodeErrors::single(error))),
        };

        let mut decoded = Vec::with_capacity(items.len());
        let mut errors = Vec::new();
        for item in items.iter() {
            match self.item.decode(Some(item)) {
                Ok(output) => decoded.push(output),
                Err(Error::Decode(error)) => errors.push(error),
                Err(unexpected) => return Err(unexpected),
            }
        }

        Ok(match DecodeErrors::from_vec(errors) {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(S::present(decoded)),
        })
    }

    fn decode_items(&self, items: &[Value]) -> Result<Vec<D::Output>, Error> {
        let mut decoded = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.item.decode(Some(item)) {
                Ok(output) => decoded.push(output),
                Err(Error::Decode(error)) if !self.options.requires_all() => {
                    tracing::debug!("array_element_skipped: index={}, error={}", index, error);
                    if let Some(collector) = self.options.error_collector() {
                        collector.collect(error);
                    }
                }
                Err(error) => return Err(error),
            }
        }
        Ok(decoded)
    }
}

impl<D: Decoder, S: Shape> Decoder for ArrayDecoder<D, S> {
    type Output = S::Out<Vec<D::Output>>;

    fn decode(&self, value: Option<&Value>) -> Result<Self::Output, Error> {
        if let Some(out) = check_presence::<Vec<D::Output>, S>(value, self.options.base())? {
            return Ok(out);
        }

        let items = iterable_items(value)?;
        self.decode_items(&items).map(S::present)
    }
}

/// The elements of an iterable input, or an error for anything else.
fn iterable_items(value: Option<&Value>) -> Result<Cow<'_, [Value]>, DecodeError> {
    match value {
        Some(Value::Array(items)) => Ok(Cow::Borrowed(items.as_slice())),
        Some(Value::String(s)) => Ok(Cow::Owned(
            s.chars().map(|c| Value::String(c.to_string())).collect(),
        )),
        _ => Err(DecodeError::new(NOT_ITERABLE)),
    }
}
