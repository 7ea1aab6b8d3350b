//! Boolean decoding.

use crate::coerce;
use crate::error::{DecodeError, Error};
use crate::options::{DecodeOptions, Required, Shape};
use crate::presence::check_presence;
use crate::value::Value;

use super::Decoder;

pub(crate) const NOT_A_BOOLEAN: &str = "Not a valid boolean";

/// A decoder producing `bool`.
///
/// With `force`, the lower-cased text form `"true"` reads as `true`,
/// `"false"` and `"0"` read as `false`, and anything else falls back to
/// truthiness. Only absent input, null, `false`, zero, NaN and the empty
/// string are falsy, so `"no"`, `[]` and `{}` all read as `true`.
///
/// # Example
///
/// ```rust
/// use assayer::{decode_boolean, DecodeOptions, Decoder, Value};
///
/// let forced = decode_boolean(DecodeOptions::forced());
/// assert!(forced.decode_value(&Value::from("TRUE")).unwrap());
/// assert!(!forced.decode_value(&Value::from("0")).unwrap());
/// assert!(forced.decode_value(&Value::from("no")).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanDecoder<S = Required> {
    options: DecodeOptions<S>,
}

impl<S: Shape> BooleanDecoder<S> {
    pub fn new(options: DecodeOptions<S>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions<S> {
        &self.options
    }
}

/// Creates a boolean decoder.
pub fn decode_boolean<S: Shape>(options: DecodeOptions<S>) -> BooleanDecoder<S> {
    BooleanDecoder::new(options)
}

impl<S: Shape> Decoder for BooleanDecoder<S> {
    type Output = S::Out<bool>;

    fn decode(&self, value: Option<&Value>) -> Result<Self::Output, Error> {
        if let Some(out) = check_presence::<bool, S>(value, &self.options)? {
            return Ok(out);
        }

        match value {
            Some(Value::Bool(b)) => Ok(S::present(*b)),
            other if self.options.is_forced() => Ok(S::present(coerce::boolean(other))),
            _ => Err(DecodeError::new(NOT_A_BOOLEAN).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strict_booleans_only() {
        let decoder = decode_boolean(DecodeOptions::new());
        assert!(decoder.decode_value(&Value::from(true)).unwrap());
        assert!(!decoder.decode_value(&Value::from(false)).unwrap());
        assert_eq!(
            decoder.decode_value(&Value::from("true")).unwrap_err().to_string(),
            NOT_A_BOOLEAN
        );
    }

    #[test]
    fn test_forced_text_values() {
        let decoder = decode_boolean(DecodeOptions::forced());
        assert!(decoder.decode_value(&Value::from("True")).unwrap());
        assert!(!decoder.decode_value(&Value::from("FALSE")).unwrap());
        assert!(!decoder.decode_value(&Value::from(0)).unwrap());
        assert!(!decoder.decode_value(&Value::from("")).unwrap());
    }

    #[test]
    fn test_forced_truthiness_is_permissive() {
        let decoder = decode_boolean(DecodeOptions::forced());
        assert!(decoder.decode_value(&Value::from("off")).unwrap());
        assert!(decoder.decode_value(&Value::from(json!({}))).unwrap());
        assert!(decoder.decode_value(&Value::from(json!([]))).unwrap());
        assert!(decoder.decode_value(&Value::from(-1)).unwrap());
    }

    #[test]
    fn test_forced_absent_and_null_are_false() {
        let decoder = decode_boolean(DecodeOptions::forced());
        assert!(!decoder.decode(None).unwrap());
        assert!(!decoder.decode_value(&Value::Null).unwrap());
    }
}
