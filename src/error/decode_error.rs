//! Decode error types.
//!
//! This module provides [`DecodeError`] for a single chained failure,
//! [`DecodeErrors`] for accumulating several of them, and the [`Error`]
//! enum returned by every decoder.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::{DecodePath, PathSegment};

/// A decoding failure with an optional inner cause.
///
/// Each wrapping layer adds context (usually an `Entity.property` location) in
/// front of the error it wraps, so the chain reads from the outermost property
/// down to the original validation failure. Displaying the error renders the
/// whole chain:
///
/// ```rust
/// use assayer::DecodeError;
///
/// let root = DecodeError::new("Not a valid number");
/// let wrapped = DecodeError::with_inner("Error in User.age", root);
///
/// assert_eq!(wrapped.to_string(), "Error in User.age. Inner error: Not a valid number");
/// assert_eq!(wrapped.root_cause().message(), "Not a valid number");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    message: String,
    inner: Option<Box<DecodeError>>,
    location: Option<PathSegment>,
}

impl DecodeError {
    /// Creates a root error with no inner cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            inner: None,
            location: None,
        }
    }

    /// Creates an error wrapping `inner` as its cause.
    pub fn with_inner(message: impl Into<String>, inner: DecodeError) -> Self {
        Self {
            message: message.into(),
            inner: Some(Box::new(inner)),
            location: None,
        }
    }

    /// Records the property this layer of the chain refers to.
    pub fn at(mut self, entity: impl Into<String>, property: impl Into<String>) -> Self {
        self.location = Some(PathSegment::new(entity, property));
        self
    }

    /// This layer's own message, without the inner chain.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn inner(&self) -> Option<&DecodeError> {
        self.inner.as_deref()
    }

    pub fn location(&self) -> Option<&PathSegment> {
        self.location.as_ref()
    }

    /// Iterates the chain from this error down to the root cause.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// The innermost error of the chain.
    pub fn root_cause(&self) -> &DecodeError {
        let mut current = self;
        while let Some(inner) = current.inner() {
            current = inner;
        }
        current
    }

    /// Number of errors in the chain, including this one.
    pub fn depth(&self) -> usize {
        self.chain().count()
    }

    /// The `Entity.property` trail recorded along the chain, outermost first.
    pub fn path(&self) -> DecodePath {
        self.chain()
            .filter_map(|error| error.location.clone())
            .fold(DecodePath::root(), |path, segment| path.push(segment))
    }

    /// Returns true when `error` is a [`DecodeError`], however it was boxed.
    pub fn is_decode_error(error: &(dyn std::error::Error + 'static)) -> bool {
        error.downcast_ref::<DecodeError>().is_some()
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(inner) = &self.inner {
            write!(f, ". Inner error: {}", inner)?;
        }
        Ok(())
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner
            .as_deref()
            .map(|inner| inner as &(dyn std::error::Error + 'static))
    }
}

/// Iterator over a [`DecodeError`] chain, outermost first.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a DecodeError>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a DecodeError;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.inner();
        Some(current)
    }
}

/// The failure type returned by decoders.
///
/// `Decode` means the input was invalid. `Unexpected` means something else
/// broke, typically inside a caller-supplied decoder or extractor; array
/// decoders never swallow it and object decoders report it as an unknown
/// error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("{0}")]
    Unexpected(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wraps an arbitrary error.
    ///
    /// A boxed [`DecodeError`] is recognized and kept as [`Error::Decode`].
    ///
    /// ```rust
    /// use assayer::{DecodeError, Error};
    ///
    /// assert!(!Error::unexpected("disk on fire").is_decode_error());
    /// assert!(Error::unexpected(DecodeError::new("bad input")).is_decode_error());
    /// ```
    pub fn unexpected(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        let boxed: Box<dyn std::error::Error + Send + Sync> = error.into();
        match boxed.downcast::<DecodeError>() {
            Ok(decode) => Error::Decode(*decode),
            Err(other) => Error::Unexpected(other),
        }
    }

    pub fn is_decode_error(&self) -> bool {
        matches!(self, Error::Decode(_))
    }

    pub fn as_decode_error(&self) -> Option<&DecodeError> {
        match self {
            Error::Decode(error) => Some(error),
            Error::Unexpected(_) => None,
        }
    }

    pub fn into_decode_error(self) -> Option<DecodeError> {
        match self {
            Error::Decode(error) => Some(error),
            Error::Unexpected(_) => None,
        }
    }
}

/// A non-empty collection of decode errors.
///
/// Used when decoding keeps going after a failure and reports everything at
/// the end, see [`ArrayDecoder::decode_accumulating`](crate::ArrayDecoder::decode_accumulating).
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeErrors(NonEmptyVec<DecodeError>);

impl DecodeErrors {
    pub fn single(error: DecodeError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Returns `None` when `errors` is empty.
    pub fn from_vec(errors: Vec<DecodeError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecodeError> {
        self.0.iter()
    }

    /// Errors whose trail passes through `entity`.
    pub fn in_entity(&self, entity: &str) -> Vec<&DecodeError> {
        self.0
            .iter()
            .filter(|error| error.path().segments().any(|s| s.entity == entity))
            .collect()
    }
}

impl Semigroup for DecodeErrors {
    fn combine(self, other: Self) -> Self {
        DecodeErrors(self.0.combine(other.0))
    }
}

/// One line per error, prefixed with its trail when it has one.
impl Display for DecodeErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.len() == 1 { "error" } else { "errors" };
        write!(f, "{} decode {}", self.len(), noun)?;
        for error in self.iter() {
            let path = error.path();
            if path.is_root() {
                write!(f, "\n- {}", error)?;
            } else {
                write!(f, "\n- [{}] {}", path, error)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for DecodeErrors {}

impl IntoIterator for DecodeErrors {
    type Item = DecodeError;
    type IntoIter = std::vec::IntoIter<DecodeError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}
