//! Best-effort conversions used by forced decoders.
//!
//! These mirror the loose conversions of dynamically-typed runtimes:
//! float parsing accepts a numeric prefix and ignores trailing garbage, date
//! parsing falls back to an epoch-millisecond integer prefix, and booleans
//! fall back to truthiness.

use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

use crate::value::Value;

/// Largest distance from the epoch, in milliseconds, a date may have.
pub(crate) const MAX_DATE_MILLIS: f64 = 8.64e15;

fn float_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([+-]?)(Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
            .expect("float prefix pattern is valid")
    })
}

fn int_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*([+-]?[0-9]+)").expect("int prefix pattern is valid"))
}

fn year_month() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]{4})(?:-([0-9]{2}))?$").expect("year pattern is valid"))
}

fn expanded_year() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^([+-][0-9]{4,6})-([0-9]{2})-([0-9]{2})T([0-9]{2}):([0-9]{2})(?::([0-9]{2})(?:\.([0-9]+))?)?(Z|[+-][0-9]{2}:[0-9]{2})$",
        )
        .expect("expanded year pattern is valid")
    })
}

fn parenthetical() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("parenthetical pattern is valid"))
}

/// Parses the longest leading float literal of `text`.
///
/// Returns `None` when `text` does not start (after whitespace) with a number.
pub(crate) fn parse_float_prefix(text: &str) -> Option<f64> {
    let captures = float_prefix().captures(text)?;
    let negative = &captures[1] == "-";
    let magnitude = match &captures[2] {
        "Infinity" => f64::INFINITY,
        digits => digits.parse::<f64>().ok()?,
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// Parses the leading base-10 integer of `text`.
pub(crate) fn parse_int_prefix(text: &str) -> Option<f64> {
    let captures = int_prefix().captures(text)?;
    captures[1].parse::<f64>().ok()
}

/// Numeric value of a loose input, when one can be read from its text.
///
/// Only strings and arrays (through their joined text form) qualify;
/// booleans, dates, objects, null and absent input never do.
pub(crate) fn number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => Some(*n),
        Value::String(s) => parse_float_prefix(s),
        array @ Value::Array(_) => parse_float_prefix(&array.coerce_to_string()),
        _ => None,
    }
    .filter(|n| !n.is_nan())
}

/// Truthiness: absent, null, `false`, zero, NaN and `""` are false.
pub(crate) fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => *n != 0.0 && !n.is_nan(),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Date(_) | Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Loose boolean reading of any input.
pub(crate) fn boolean(value: Option<&Value>) -> bool {
    let text = value.map_or_else(|| "undefined".to_string(), Value::coerce_to_string);
    match text.to_lowercase().as_str() {
        "true" => true,
        "false" | "0" => false,
        _ => truthy(value),
    }
}

/// Converts epoch milliseconds to a date, truncating any fraction.
///
/// Returns `None` outside the ±8.64e15 ms range, beyond the years the
/// calendar can represent, or for non-finite input.
pub(crate) fn date_from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() || millis.abs() > MAX_DATE_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
}

/// Parses a textual date in one of the commonly produced formats.
///
/// Date-times without an offset are read as UTC.
pub(crate) fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }

    if let Some(date) = parse_expanded_year(text) {
        return Some(date);
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(day) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
    }

    if let Some(captures) = year_month().captures(text) {
        let year = captures[1].parse::<i32>().ok()?;
        let month = match captures.get(2) {
            Some(month) => month.as_str().parse::<u32>().ok()?,
            None => 1,
        };
        return NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive));
    }

    if let Ok(date) = DateTime::parse_from_rfc2822(text) {
        return Some(date.with_timezone(&Utc));
    }

    // `Wed Jan 01 2020 00:00:00 GMT+0000 (Coordinated Universal Time)`
    let stripped = parenthetical().replace(text, "");
    DateTime::parse_from_str(&stripped, "%a %b %d %Y %H:%M:%S GMT%z")
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// Reads an ISO date-time with a signed year (`+012000-01-01T00:00:00.000Z`).
fn parse_expanded_year(text: &str) -> Option<DateTime<Utc>> {
    let captures = expanded_year().captures(text)?;
    let field = |index: usize| captures.get(index).map(|m| m.as_str());
    let number = |index: usize| field(index).map_or(Some(0), |digits| digits.parse::<u32>().ok());

    let year = captures[1].parse::<i32>().ok()?;
    let nanos = match field(7) {
        // keep nanosecond precision, pad the rest
        Some(digits) => format!("{:0<9}", &digits[..digits.len().min(9)]).parse::<u32>().ok()?,
        None => 0,
    };
    let naive = NaiveDate::from_ymd_opt(year, number(2)?, number(3)?)?
        .and_hms_nano_opt(number(4)?, number(5)?, number(6)?, nanos)?;

    let offset_seconds = match &captures[8] {
        "Z" => 0,
        offset => {
            let sign = if offset.starts_with('-') { -1 } else { 1 };
            let hours = offset[1..3].parse::<i32>().ok()?;
            let minutes = offset[4..6].parse::<i32>().ok()?;
            sign * (hours * 3600 + minutes * 60)
        }
    };
    FixedOffset::east_opt(offset_seconds)?
        .from_local_datetime(&naive)
        .single()
        .map(|date| date.with_timezone(&Utc))
}

/// Loose date reading of any input.
pub(crate) fn date(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::Null => date_from_millis(0.0),
        Value::Bool(b) => date_from_millis(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => date_from_millis(*n),
        Value::Date(d) => Some(*d),
        other => {
            let text = other.coerce_to_string();
            parse_date(&text).or_else(|| parse_int_prefix(&text).and_then(date_from_millis))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_float_prefix() {
        assert_eq!(parse_float_prefix("42"), Some(42.0));
        assert_eq!(parse_float_prefix("  -3.5e2xyz"), Some(-350.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("7."), Some(7.0));
        assert_eq!(parse_float_prefix("-Infinity and beyond"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("."), None);
    }

    #[test]
    fn test_int_prefix() {
        assert_eq!(parse_int_prefix("1577836800000"), Some(1_577_836_800_000.0));
        assert_eq!(parse_int_prefix(" -12.9"), Some(-12.0));
        assert_eq!(parse_int_prefix("x1"), None);
    }

    #[test]
    fn test_number_only_reads_text() {
        assert_eq!(number(Some(&Value::from("12px"))), Some(12.0));
        assert_eq!(number(Some(&Value::from(vec![3, 4]))), Some(3.0));
        assert_eq!(number(Some(&Value::from(true))), None);
        assert_eq!(number(Some(&Value::Null)), None);
        assert_eq!(number(None), None);
        assert_eq!(number(Some(&Value::Date(ymd(2020, 1, 1)))), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(!truthy(None));
        assert!(!truthy(Some(&Value::Number(f64::NAN))));
        assert!(!truthy(Some(&Value::from(""))));
        assert!(truthy(Some(&Value::from(Vec::<Value>::new()))));
        assert!(truthy(Some(&Value::from("no"))));
    }

    #[test]
    fn test_boolean_text_then_truthiness() {
        assert!(boolean(Some(&Value::from("TRUE"))));
        assert!(!boolean(Some(&Value::from("False"))));
        assert!(!boolean(Some(&Value::from("0"))));
        assert!(!boolean(Some(&Value::from(vec![0]))));
        assert!(boolean(Some(&Value::from("yes"))));
        assert!(boolean(Some(&Value::from(2))));
        assert!(!boolean(None));
    }

    #[test]
    fn test_date_from_millis_range() {
        assert_eq!(date_from_millis(0.0), Some(ymd(1970, 1, 1)));
        assert_eq!(
            date_from_millis(1.9).map(|d| d.timestamp_millis()),
            Some(1)
        );
        assert!(date_from_millis(1e15).is_some());
        assert!(date_from_millis(8.64e15 + 1.0).is_none());
        assert!(date_from_millis(f64::NAN).is_none());
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2020-01-01T00:00:00.000Z"), Some(ymd(2020, 1, 1)));
        assert_eq!(parse_date("2020-01-01T02:00:00+02:00"), Some(ymd(2020, 1, 1)));
        assert_eq!(parse_date("2020-01-01T00:00"), Some(ymd(2020, 1, 1)));
        assert_eq!(parse_date("2020-01-01 00:00:00"), Some(ymd(2020, 1, 1)));
        assert_eq!(parse_date("2020-01-01"), Some(ymd(2020, 1, 1)));
        assert_eq!(parse_date("2020-03"), Some(ymd(2020, 3, 1)));
        assert_eq!(parse_date("2020"), Some(ymd(2020, 1, 1)));
        assert_eq!(parse_date("Wed, 01 Jan 2020 00:00:00 GMT"), Some(ymd(2020, 1, 1)));
        assert_eq!(
            parse_date("Wed Jan 01 2020 00:00:00 GMT+0000 (Coordinated Universal Time)"),
            Some(ymd(2020, 1, 1))
        );
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("+002020-01-01T00:00:00.000Z"), Some(ymd(2020, 1, 1)));
        assert_eq!(parse_date("1577836800000"), None);
    }

    #[test]
    fn test_parse_expanded_years() {
        assert_eq!(parse_date("+012000-01-01T00:00:00.000Z"), Some(ymd(12000, 1, 1)));
        assert_eq!(parse_date("-000050-01-01T00:00:00.000Z"), Some(ymd(-50, 1, 1)));
        assert_eq!(parse_date("+12000-01-01T00:00:00.000Z"), Some(ymd(12000, 1, 1)));
        assert_eq!(parse_date("-0050-01-01T00:00Z"), Some(ymd(-50, 1, 1)));
        assert_eq!(
            parse_date("+012000-01-01T02:30:00.250+02:30").map(|d| d.timestamp_millis()),
            Some(ymd(12000, 1, 1).timestamp_millis() + 250)
        );
        assert_eq!(parse_date("+012000-13-01T00:00:00Z"), None);
    }

    #[test]
    fn test_expanded_year_is_not_read_as_millis() {
        let far = ymd(12000, 1, 1);
        assert_eq!(date(Some(&Value::from("+012000-01-01T00:00:00.000Z"))), Some(far));
        assert_eq!(
            date(Some(&Value::from("-000050-06-15T12:00:00.000Z"))),
            Utc.with_ymd_and_hms(-50, 6, 15, 12, 0, 0).single()
        );
    }

    #[test]
    fn test_date_falls_back_to_millis_prefix() {
        assert_eq!(
            date(Some(&Value::from("1577836800000"))),
            Some(ymd(2020, 1, 1))
        );
        assert_eq!(date(Some(&Value::Null)), Some(ymd(1970, 1, 1)));
        assert_eq!(date(Some(&Value::from(true))).map(|d| d.timestamp_millis()), Some(1));
        assert_eq!(date(Some(&Value::from("garbage"))), None);
        assert_eq!(date(None), None);
    }
}
