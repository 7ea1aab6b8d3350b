//! Literal and enumerated-value decoders.
//!
//! [`decode_literal`] and [`decode_literal_union`] compare the raw input
//! against the expected values. [`matching_literal`] and
//! [`matching_literal_union`] run a decoder first and compare its output, so
//! forced coercion can apply before the comparison.

use crate::error::{DecodeError, Error};
use crate::value::Value;

use super::Decoder;

pub(crate) const LITERAL_MISMATCH: &str = "Value provided does not match literal";
pub(crate) const NOT_IN_LITERALS: &str = "Provided value was not in the list of possible literals";

/// Accepts exactly one value, see [`decode_literal`].
#[derive(Debug, Clone)]
pub struct LiteralDecoder<T> {
    literal: T,
    expected: Value,
}

/// Accepts one of several values, see [`decode_literal_union`].
#[derive(Debug, Clone)]
pub struct LiteralUnionDecoder<T> {
    literals: Vec<(T, Value)>,
}

/// Accepts the output of a decoder when it equals a literal.
#[derive(Debug, Clone)]
pub struct MatchingLiteral<T, D> {
    literal: T,
    decoder: D,
}

/// Accepts the output of a decoder when it is one of several literals.
#[derive(Debug, Clone)]
pub struct MatchingLiteralUnion<T, D> {
    literals: Vec<T>,
    decoder: D,
}

/// Accepts input equal to `literal` and returns `literal`.
///
/// # Example
///
/// ```rust
/// use assayer::{decode_literal, Decoder, Value};
///
/// let version = decode_literal("v2");
/// assert_eq!(version.decode_value(&Value::from("v2")).unwrap(), "v2");
/// assert!(version.decode_value(&Value::from("v1")).is_err());
/// ```
pub fn decode_literal<T>(literal: T) -> LiteralDecoder<T>
where
    T: Clone + Into<Value> + Send + Sync,
{
    let expected = literal.clone().into();
    LiteralDecoder { literal, expected }
}

/// Accepts input equal to any of `literals` and returns the matching one.
///
/// # Example
///
/// ```rust
/// use assayer::{decode_literal_union, Decoder, Value};
///
/// let level = decode_literal_union(["debug", "info", "warn"]);
/// assert_eq!(level.decode_value(&Value::from("info")).unwrap(), "info");
/// assert!(level.decode_value(&Value::from("trace")).is_err());
/// ```
pub fn decode_literal_union<T, I>(literals: I) -> LiteralUnionDecoder<T>
where
    T: Clone + Into<Value> + Send + Sync,
    I: IntoIterator<Item = T>,
{
    let literals = literals
        .into_iter()
        .map(|literal| {
            let expected = literal.clone().into();
            (literal, expected)
        })
        .collect();
    LiteralUnionDecoder { literals }
}

/// Runs `decoder` and accepts its output only when it equals `literal`.
pub fn matching_literal<T, D>(literal: T, decoder: D) -> MatchingLiteral<T, D>
where
    D: Decoder,
    D::Output: PartialEq<T>,
    T: Clone + Send + Sync,
{
    MatchingLiteral { literal, decoder }
}

/// Runs `decoder` and accepts its output only when it is one of `literals`.
///
/// ```rust
/// use assayer::{matching_literal_union, decode_number, DecodeOptions, Decoder, Value};
///
/// let port = matching_literal_union([80.0, 443.0], decode_number(DecodeOptions::forced()));
/// assert_eq!(port.decode_value(&Value::from("443")).unwrap(), 443.0);
/// assert!(port.decode_value(&Value::from("8080")).is_err());
/// ```
pub fn matching_literal_union<T, D, I>(literals: I, decoder: D) -> MatchingLiteralUnion<T, D>
where
    D: Decoder,
    D::Output: PartialEq<T>,
    T: Clone + Send + Sync,
    I: IntoIterator<Item = T>,
{
    MatchingLiteralUnion {
        literals: literals.into_iter().collect(),
        decoder,
    }
}

impl<T> Decoder for LiteralDecoder<T>
where
    T: Clone + Send + Sync,
{
    type Output = T;

    fn decode(&self, value: Option<&Value>) -> Result<T, Error> {
        match value {
            Some(input) if *input == self.expected => Ok(self.literal.clone()),
            _ => Err(DecodeError::new(LITERAL_MISMATCH).into()),
        }
    }
}

impl<T> Decoder for LiteralUnionDecoder<T>
where
    T: Clone + Send + Sync,
{
    type Output = T;

    fn decode(&self, value: Option<&Value>) -> Result<T, Error> {
        let input = value.ok_or_else(|| DecodeError::new(NOT_IN_LITERALS))?;
        self.literals
            .iter()
            .find(|(_, expected)| expected == input)
            .map(|(literal, _)| literal.clone())
            .ok_or_else(|| DecodeError::new(NOT_IN_LITERALS).into())
    }
}

impl<T, D> Decoder for MatchingLiteral<T, D>
where
    D: Decoder,
    D::Output: PartialEq<T>,
    T: Clone + Send + Sync,
{
    type Output = T;

    fn decode(&self, value: Option<&Value>) -> Result<T, Error> {
        let decoded = self.decoder.decode(value)?;
        if decoded == self.literal {
            Ok(self.literal.clone())
        } else {
            Err(DecodeError::new(LITERAL_MISMATCH).into())
        }
    }
}

impl<T, D> Decoder for MatchingLiteralUnion<T, D>
where
    D: Decoder,
    D::Output: PartialEq<T>,
    T: Clone + Send + Sync,
{
    type Output = T;

    fn decode(&self, value: Option<&Value>) -> Result<T, Error> {
        let decoded = self.decoder.decode(value)?;
        self.literals
            .iter()
            .find(|literal| decoded == **literal)
            .cloned()
            .ok_or_else(|| DecodeError::new(NOT_IN_LITERALS).into())
    }
}
