//! Delimiter-separated string decoding.

use crate::error::{DecodeError, Error};
use crate::value::Value;

use super::Decoder;

pub(crate) const NOT_A_STRING_INPUT: &str = "Input is not a string";

/// Splits a string input into its delimiter-separated parts.
///
/// Parts are not trimmed and empty parts are kept, so `""` decodes to `[""]`
/// and `"a,,b"` to `["a", "", "b"]`.
///
/// # Example
///
/// ```rust
/// use assayer::{decode_comma_separated, decode_delimited, Decoder, Value};
///
/// let tags = decode_comma_separated();
/// assert_eq!(tags.decode_value(&Value::from("red,green")).unwrap(), vec!["red", "green"]);
///
/// let path = decode_delimited('/');
/// assert_eq!(path.decode_value(&Value::from("usr/lib")).unwrap(), vec!["usr", "lib"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimitedDecoder {
    delimiter: char,
}

impl DelimitedDecoder {
    pub fn delimiter(&self) -> char {
        self.delimiter
    }
}

/// Creates a decoder splitting strings on `,`.
pub fn decode_comma_separated() -> DelimitedDecoder {
    decode_delimited(',')
}

/// Creates a decoder splitting strings on `delimiter`.
pub fn decode_delimited(delimiter: char) -> DelimitedDecoder {
    DelimitedDecoder { delimiter }
}

impl Decoder for DelimitedDecoder {
    type Output = Vec<String>;

    fn decode(&self, value: Option<&Value>) -> Result<Vec<String>, Error> {
        match value {
            Some(Value::String(s)) => Ok(s.split(self.delimiter).map(str::to_string).collect()),
            _ => Err(DecodeError::new(NOT_A_STRING_INPUT).into()),
        }
    }
}
