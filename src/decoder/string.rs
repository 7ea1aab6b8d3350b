//! String decoding.

use crate::error::{DecodeError, Error};
use crate::options::{DecodeOptions, Required, Shape};
use crate::presence::check_presence;
use crate::value::{format_date, Value};

use super::Decoder;

pub(crate) const NOT_A_STRING: &str = "Not a valid string";

/// A decoder producing `String`.
///
/// With `force` every input converts: dates become ISO-8601 text with
/// millisecond precision (a signed six-digit year outside `0000..=9999`), an
/// absent input becomes `"undefined"`, and the rest use their generic text
/// form (`null`, `true`, `1.5`, `a,b`, JSON for objects). Numbers from `1e21`
/// up and below `1e-6` are written in exponent form (`1e+21`). A forced
/// string decoder therefore never fails.
///
/// # Example
///
/// ```rust
/// use assayer::{decode_string, DecodeOptions, Decoder, Value};
///
/// let forced = decode_string(DecodeOptions::forced());
/// assert_eq!(forced.decode_value(&Value::from(42)).unwrap(), "42");
/// assert_eq!(forced.decode(None).unwrap(), "undefined");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StringDecoder<S = Required> {
    options: DecodeOptions<S>,
}

impl<S: Shape> StringDecoder<S> {
    pub fn new(options: DecodeOptions<S>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions<S> {
        &self.options
    }
}

/// Creates a string decoder.
pub fn decode_string<S: Shape>(options: DecodeOptions<S>) -> StringDecoder<S> {
    StringDecoder::new(options)
}

impl<S: Shape> Decoder for StringDecoder<S> {
    type Output = S::Out<String>;

    fn decode(&self, value: Option<&Value>) -> Result<Self::Output, Error> {
        if let Some(out) = check_presence::<String, S>(value, &self.options)? {
            return Ok(out);
        }

        let text = match value {
            Some(Value::String(s)) => s.clone(),
            _ if !self.options.is_forced() => return Err(DecodeError::new(NOT_A_STRING).into()),
            None => "undefined".to_string(),
            Some(Value::Date(date)) => format_date(date),
            Some(other) => other.coerce_to_string(),
        };
        Ok(S::present(text))
    }
}
