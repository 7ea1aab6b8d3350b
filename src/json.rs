//! Decoding straight from JSON text.
//!
//! [`JsonDecoder`] parses its string input with `serde_json` and hands the
//! result to another decoder. Failures of either step are reported under a
//! `Can't parse input json` error.

use std::borrow::Cow;

use crate::decoder::Decoder;
use crate::error::{DecodeError, Error};
use crate::options::{DecodeOptions, Required, Shape};
use crate::presence::check_presence;
use crate::value::Value;

pub(crate) const CANT_PARSE_JSON: &str = "Can't parse input json";

/// A decoder reading JSON text, see [`from_json`].
#[derive(Debug, Clone)]
pub struct JsonDecoder<D, S = Required> {
    decoder: D,
    options: DecodeOptions<S>,
}

/// Wraps `decoder` so that it reads JSON text instead of a parsed value.
///
/// The input must be a string; with `force` any other value is turned into
/// its text form first. Presence options apply to the raw input.
///
/// # Example
///
/// ```rust
/// use assayer::{from_json, Decode, DecodeOptions, Decoder, Value};
///
/// let names = from_json(Decode::array(Decode::string()), DecodeOptions::new());
///
/// let decoded = names.decode_value(&Value::from(r#"["ada", "grace"]"#)).unwrap();
/// assert_eq!(decoded, vec!["ada", "grace"]);
///
/// let error = names.decode_value(&Value::from("[1,")).unwrap_err();
/// assert!(error.to_string().starts_with("Can't parse input json: "));
/// ```
pub fn from_json<D: Decoder, S: Shape>(decoder: D, options: DecodeOptions<S>) -> JsonDecoder<D, S> {
    JsonDecoder { decoder, options }
}

/// Parses `text` and decodes the result with `decoder`.
///
/// ```rust
/// use assayer::{decode_json, Decode};
///
/// assert_eq!(decode_json("true", Decode::boolean()).unwrap(), true);
/// assert!(decode_json("\"true\"", Decode::boolean()).is_err());
/// ```
pub fn decode_json<D: Decoder>(text: &str, decoder: D) -> Result<D::Output, Error> {
    from_json(decoder, DecodeOptions::new()).decode_str(text)
}

impl<D: Decoder, S: Shape> JsonDecoder<D, S> {
    pub fn inner(&self) -> &D {
        &self.decoder
    }

    pub fn options(&self) -> &DecodeOptions<S> {
        &self.options
    }

    /// Parses and decodes `text` directly.
    pub fn decode_str(&self, text: &str) -> Result<S::Out<D::Output>, Error> {
        self.parse_and_decode(text).map(S::present)
    }

    fn parse_and_decode(&self, text: &str) -> Result<D::Output, Error> {
        let parsed: serde_json::Value = serde_json::from_str(text).map_err(|error| {
            tracing::debug!("json_parse_failed: line={}, column={}", error.line(), error.column());
            DecodeError::new(format!("{}: {}", CANT_PARSE_JSON, error))
        })?;

        match self.decoder.decode(Some(&Value::from(parsed))) {
            Ok(output) => Ok(output),
            Err(Error::Decode(inner)) => Err(DecodeError::with_inner(CANT_PARSE_JSON, inner).into()),
            Err(Error::Unexpected(cause)) => {
                Err(DecodeError::new(format!("{}: {}", CANT_PARSE_JSON, cause)).into())
            }
        }
    }
}

impl<D: Decoder, S: Shape> Decoder for JsonDecoder<D, S> {
    type Output = S::Out<D::Output>;

    fn decode(&self, value: Option<&Value>) -> Result<Self::Output, Error> {
        if let Some(out) = check_presence::<D::Output, S>(value, &self.options)? {
            return Ok(out);
        }

        let text = match value {
            Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
            Some(other) if self.options.is_forced() => Cow::Owned(other.coerce_to_string()),
            None if self.options.is_forced() => Cow::Borrowed("undefined"),
            other => {
                let kind = other.map_or("absent", Value::type_name);
                let message = format!("{}: expected a string, got {}", CANT_PARSE_JSON, kind);
                return Err(DecodeError::new(message).into());
            }
        };

        self.decode_str(&text)
    }
}
