//! Discriminated-union decoding.

use std::marker::PhantomData;

use crate::error::{DecodeError, Error};
use crate::value::Value;

use super::Decoder;

pub(crate) const NON_EXHAUSTIVE: &str = "Non-exhaustive type check";

/// Dispatches to the decoder a caller-supplied discriminator selects.
///
/// The union decoder does not inspect the input itself. The discriminator
/// looks at the raw input and returns the decoder to use, or `None` when no
/// candidate applies. Candidates must share an output type; use an enum and
/// [`Decoder::map`] to join differently-typed branches.
///
/// # Example
///
/// ```rust
/// use assayer::{decode_union, Decode, Decoder, SharedDecoder, Value};
///
/// #[derive(Debug, PartialEq)]
/// enum Id {
///     Numeric(f64),
///     Named(String),
/// }
///
/// let numeric: SharedDecoder<Id> = Decode::number().map(Id::Numeric).shared();
/// let named: SharedDecoder<Id> = Decode::string().map(Id::Named).shared();
///
/// let id = decode_union(move |value: Option<&Value>| match value {
///     Some(Value::Number(_)) => Some(numeric.clone()),
///     Some(Value::String(_)) => Some(named.clone()),
///     _ => None,
/// });
///
/// assert_eq!(id.decode_value(&Value::from(7)).unwrap(), Id::Numeric(7.0));
/// assert_eq!(id.decode_value(&Value::from("x")).unwrap(), Id::Named("x".into()));
/// assert!(id.decode_value(&Value::from(true)).is_err());
/// ```
pub struct UnionDecoder<F, D> {
    discriminate: F,
    _candidate: PhantomData<fn() -> D>,
}

/// Creates a union decoder from a discriminator function.
pub fn decode_union<F, D>(discriminate: F) -> UnionDecoder<F, D>
where
    F: Fn(Option<&Value>) -> Option<D> + Send + Sync,
    D: Decoder,
{
    UnionDecoder {
        discriminate,
        _candidate: PhantomData,
    }
}

impl<F, D> Decoder for UnionDecoder<F, D>
where
    F: Fn(Option<&Value>) -> Option<D> + Send + Sync,
    D: Decoder,
{
    type Output = D::Output;

    fn decode(&self, value: Option<&Value>) -> Result<Self::Output, Error> {
        match (self.discriminate)(value) {
            Some(decoder) => {
                tracing::trace!(
                    "union_dispatch: input={}",
                    value.map_or("absent", crate::value::Value::type_name)
                );
                decoder.decode(value)
            }
            None => {
                tracing::debug!(
                    "union_no_match: input={}",
                    value.map_or("absent", crate::value::Value::type_name)
                );
                Err(DecodeError::new(NON_EXHAUSTIVE).into())
            }
        }
    }
}

impl<F: Clone, D> Clone for UnionDecoder<F, D> {
    fn clone(&self) -> Self {
        Self {
            discriminate: self.discriminate.clone(),
            _candidate: PhantomData,
        }
    }
}
