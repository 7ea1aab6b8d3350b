//! The shared absent/null gate every decoder runs first.

use crate::error::DecodeError;
use crate::options::{DecodeOptions, Shape};
use crate::value::Value;

pub(crate) const REQUIRED_FIELD_MISSING: &str = "Required field missing";
pub(crate) const NULL_WITHOUT_NULLABLE: &str = "Null value without nullable option";

/// Decides whether `value` short-circuits before type validation.
///
/// Returns `Ok(Some(out))` when the input is absent or null and the shape
/// passes it through, `Ok(None)` when the caller should go on and validate
/// (or coerce) the input, and an error when the input is absent or null and
/// neither the shape nor `force` allow it.
///
/// # Example
///
/// ```rust
/// use assayer::{check_presence, DecodeOptions, Value};
///
/// let options = DecodeOptions::new().optional();
/// assert_eq!(check_presence::<f64, _>(None, &options).unwrap(), Some(None));
/// assert_eq!(check_presence::<f64, _>(Some(&Value::from(1)), &options).unwrap(), None);
/// assert!(check_presence::<f64, _>(Some(&Value::Null), &options).is_err());
/// ```
pub fn check_presence<T, S: Shape>(
    value: Option<&Value>,
    options: &DecodeOptions<S>,
) -> Result<Option<S::Out<T>>, DecodeError> {
    match value {
        None => match S::absent() {
            Some(out) => Ok(Some(out)),
            None if options.is_forced() => Ok(None),
            None => Err(DecodeError::new(REQUIRED_FIELD_MISSING)),
        },
        Some(Value::Null) => match S::null() {
            Some(out) => Ok(Some(out)),
            None if options.is_forced() => Ok(None),
            None => Err(DecodeError::new(NULL_WITHOUT_NULLABLE)),
        },
        Some(_) => Ok(None),
    }
}
