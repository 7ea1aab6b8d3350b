//! Date decoding.
//!
//! This module provides [`DateDecoder`]. Without `force` it only accepts
//! [`Value::Date`]; with `force` it converts numbers (epoch milliseconds),
//! textual dates, and as a last resort an integer prefix read as epoch
//! milliseconds.

use chrono::{DateTime, Utc};

use crate::coerce;
use crate::error::{DecodeError, Error};
use crate::options::{DecodeOptions, Required, Shape};
use crate::presence::check_presence;
use crate::value::Value;

use super::Decoder;

pub(crate) const NOT_A_DATE: &str = "Not a Date object";
pub(crate) const INVALID_DATE: &str = "Not a valid ISO or timestamp date";

/// A decoder producing `DateTime<Utc>`.
///
/// Forced conversion rules:
///
/// - numbers are epoch milliseconds, fractions truncated, valid within
///   ±8.64e15 ms;
/// - null reads as the epoch and booleans as 0 or 1 ms;
/// - text is parsed as RFC 3339, ISO date or date-time (read as UTC when no
///   offset is given), `YYYY`, `YYYY-MM`, RFC 2822 or the
///   `Wed Jan 01 2020 00:00:00 GMT+0000` form;
/// - text that fails all of those is re-read as an integer prefix of epoch
///   milliseconds, so `"1577836800000"` is 2020-01-01.
///
/// # Example
///
/// ```rust
/// use assayer::{decode_date, DecodeOptions, Decoder, Value};
///
/// let forced = decode_date(DecodeOptions::forced());
/// let date = forced.decode_value(&Value::from("2020-01-01T00:00:00Z")).unwrap();
/// assert_eq!(date.timestamp_millis(), 1_577_836_800_000);
///
/// let same = forced.decode_value(&Value::from(1_577_836_800_000_i64)).unwrap();
/// assert_eq!(date, same);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DateDecoder<S = Required> {
    options: DecodeOptions<S>,
}

impl<S: Shape> DateDecoder<S> {
    pub fn new(options: DecodeOptions<S>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions<S> {
        &self.options
    }
}

/// Creates a date decoder.
pub fn decode_date<S: Shape>(options: DecodeOptions<S>) -> DateDecoder<S> {
    DateDecoder::new(options)
}

impl<S: Shape> Decoder for DateDecoder<S> {
    type Output = S::Out<DateTime<Utc>>;

    fn decode(&self, value: Option<&Value>) -> Result<Self::Output, Error> {
        if let Some(out) = check_presence::<DateTime<Utc>, S>(value, &self.options)? {
            return Ok(out);
        }

        match value {
            Some(Value::Date(date)) => Ok(S::present(*date)),
            other if self.options.is_forced() => coerce::date(other)
                .map(S::present)
                .ok_or_else(|| DecodeError::new(INVALID_DATE).into()),
            _ => Err(DecodeError::new(NOT_A_DATE).into()),
        }
    }
}
