//! Number decoding.
//!
//! This module provides [`NumberDecoder`], which accepts numeric values and,
//! when forced, reads a number off the front of textual input.

use crate::coerce;
use crate::error::{DecodeError, Error};
use crate::options::{DecodeOptions, Required, Shape};
use crate::presence::check_presence;
use crate::value::Value;

use super::Decoder;

pub(crate) const NOT_A_NUMBER: &str = "Not a valid number";

/// A decoder producing `f64`.
///
/// Numeric input passes unchanged (NaN and infinities included). With
/// `force`, strings and arrays are read the way `parseFloat` reads them:
/// leading whitespace is skipped and anything after the numeric prefix is
/// ignored.
///
/// # Example
///
/// ```rust
/// use assayer::{decode_number, DecodeOptions, Decoder, Value};
///
/// let forced = decode_number(DecodeOptions::forced());
/// assert_eq!(forced.decode_value(&Value::from("  12.5 apples")).unwrap(), 12.5);
/// assert!(forced.decode_value(&Value::from(true)).is_err());
///
/// let strict = decode_number(DecodeOptions::new());
/// assert!(strict.decode_value(&Value::from("12")).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberDecoder<S = Required> {
    options: DecodeOptions<S>,
}

impl<S: Shape> NumberDecoder<S> {
    pub fn new(options: DecodeOptions<S>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions<S> {
        &self.options
    }
}

/// Creates a number decoder.
pub fn decode_number<S: Shape>(options: DecodeOptions<S>) -> NumberDecoder<S> {
    NumberDecoder::new(options)
}

impl<S: Shape> Decoder for NumberDecoder<S> {
    type Output = S::Out<f64>;

    fn decode(&self, value: Option<&Value>) -> Result<Self::Output, Error> {
        if let Some(out) = check_presence::<f64, S>(value, &self.options)? {
            return Ok(out);
        }

        match value {
            Some(Value::Number(n)) => Ok(S::present(*n)),
            other if self.options.is_forced() => coerce::number(other)
                .map(S::present)
                .ok_or_else(|| DecodeError::new(NOT_A_NUMBER).into()),
            _ => Err(DecodeError::new(NOT_A_NUMBER).into()),
        }
    }
}
