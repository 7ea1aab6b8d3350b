//! Decoder configuration.
//!
//! [`DecodeOptions`] carries the three presence/coercion flags. The
//! `optional` and `nullable` flags live in the type as a [`Shape`] marker, so
//! a decoder that may pass an absent or null input through has an output type
//! able to hold that case:
//!
//! | options                          | output for `T`  |
//! |----------------------------------|-----------------|
//! | `DecodeOptions::new()`           | `T`             |
//! | `.optional()`                    | `Option<T>`     |
//! | `.nullable()`                    | `Option<T>`     |
//! | `.optional().nullable()`         | `Nullish<T>`    |
//!
//! `force` is an ordinary runtime flag.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{DecodeError, DecodeErrors};

/// Type-level setting of the `optional` and `nullable` flags.
///
/// A shape decides how pass-through values appear in a decoder's output.
/// Implemented by [`Required`], [`Optional`], [`Nullable`] and
/// [`OptionalNullable`].
pub trait Shape: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// Output type wrapping a decoded `T`.
    type Out<T>;

    const OPTIONAL: bool;
    const NULLABLE: bool;

    /// Wraps a decoded value.
    fn present<T>(value: T) -> Self::Out<T>;

    /// Output for an absent input, when the shape allows one.
    fn absent<T>() -> Option<Self::Out<T>>;

    /// Output for a null input, when the shape allows one.
    fn null<T>() -> Option<Self::Out<T>>;
}

/// Neither absent nor null input is accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Required;

/// Absent input is passed through as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Optional;

/// Null input is passed through as `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nullable;

/// Absent and null input are both passed through, see [`Nullish`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OptionalNullable;

impl Shape for Required {
    type Out<T> = T;

    const OPTIONAL: bool = false;
    const NULLABLE: bool = false;

    fn present<T>(value: T) -> Self::Out<T> {
        value
    }

    fn absent<T>() -> Option<Self::Out<T>> {
        None
    }

    fn null<T>() -> Option<Self::Out<T>> {
        None
    }
}

impl Shape for Optional {
    type Out<T> = Option<T>;

    const OPTIONAL: bool = true;
    const NULLABLE: bool = false;

    fn present<T>(value: T) -> Self::Out<T> {
        Some(value)
    }

    fn absent<T>() -> Option<Self::Out<T>> {
        Some(None)
    }

    fn null<T>() -> Option<Self::Out<T>> {
        None
    }
}

impl Shape for Nullable {
    type Out<T> = Option<T>;

    const OPTIONAL: bool = false;
    const NULLABLE: bool = true;

    fn present<T>(value: T) -> Self::Out<T> {
        Some(value)
    }

    fn absent<T>() -> Option<Self::Out<T>> {
        None
    }

    fn null<T>() -> Option<Self::Out<T>> {
        Some(None)
    }
}

impl Shape for OptionalNullable {
    type Out<T> = Nullish<T>;

    const OPTIONAL: bool = true;
    const NULLABLE: bool = true;

    fn present<T>(value: T) -> Self::Out<T> {
        Nullish::Present(value)
    }

    fn absent<T>() -> Option<Self::Out<T>> {
        Some(Nullish::Absent)
    }

    fn null<T>() -> Option<Self::Out<T>> {
        Some(Nullish::Null)
    }
}

/// A decoded value that may also have been absent or null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Nullish<T> {
    /// The input was not provided.
    #[default]
    Absent,
    /// The input was an explicit null.
    Null,
    Present(T),
}

impl<T> Nullish<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Nullish::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Nullish::Null)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Nullish::Present(_))
    }

    /// Collapses absent and null into `None`.
    pub fn present(self) -> Option<T> {
        match self {
            Nullish::Present(value) => Some(value),
            Nullish::Absent | Nullish::Null => None,
        }
    }

    pub fn as_ref(&self) -> Nullish<&T> {
        match self {
            Nullish::Absent => Nullish::Absent,
            Nullish::Null => Nullish::Null,
            Nullish::Present(value) => Nullish::Present(value),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Nullish<U> {
        match self {
            Nullish::Absent => Nullish::Absent,
            Nullish::Null => Nullish::Null,
            Nullish::Present(value) => Nullish::Present(f(value)),
        }
    }
}

/// Presence and coercion settings for a decoder.
///
/// # Example
///
/// ```rust
/// use assayer::{decode_number, DecodeOptions, Decoder, Value};
///
/// let strict = decode_number(DecodeOptions::new());
/// assert!(strict.decode(None).is_err());
///
/// let lenient = decode_number(DecodeOptions::new().optional().force());
/// assert_eq!(lenient.decode(None).unwrap(), None);
/// assert_eq!(lenient.decode_value(&Value::from("4.5kg")).unwrap(), Some(4.5));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions<S = Required> {
    force: bool,
    shape: S,
}

impl DecodeOptions<Required> {
    /// Strict options: input must be present, non-null and of the right type.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `DecodeOptions::new().force()`.
    pub fn forced() -> Self {
        Self::new().force()
    }

    /// Accepts absent input, passing it through as `None`.
    pub fn optional(self) -> DecodeOptions<Optional> {
        DecodeOptions {
            force: self.force,
            shape: Optional,
        }
    }

    /// Accepts null input, passing it through as `None`.
    pub fn nullable(self) -> DecodeOptions<Nullable> {
        DecodeOptions {
            force: self.force,
            shape: Nullable,
        }
    }

    /// Accepts both absent and null input, see [`Nullish`].
    pub fn nullish(self) -> DecodeOptions<OptionalNullable> {
        DecodeOptions {
            force: self.force,
            shape: OptionalNullable,
        }
    }
}

impl DecodeOptions<Optional> {
    pub fn nullable(self) -> DecodeOptions<OptionalNullable> {
        DecodeOptions {
            force: self.force,
            shape: OptionalNullable,
        }
    }
}

impl DecodeOptions<Nullable> {
    pub fn optional(self) -> DecodeOptions<OptionalNullable> {
        DecodeOptions {
            force: self.force,
            shape: OptionalNullable,
        }
    }
}

impl<S: Shape> DecodeOptions<S> {
    /// Attempts best-effort coercion instead of failing on a type mismatch.
    ///
    /// Forced decoders also try to coerce absent or null input that the
    /// shape does not pass through.
    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    pub fn is_optional(&self) -> bool {
        S::OPTIONAL
    }

    pub fn is_nullable(&self) -> bool {
        S::NULLABLE
    }

    pub fn is_forced(&self) -> bool {
        self.force
    }
}

/// Callback receiving each per-item error an array decoder swallows.
#[derive(Clone)]
pub struct ErrorCollector(Arc<dyn Fn(DecodeError) + Send + Sync>);

impl ErrorCollector {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(DecodeError) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub(crate) fn collect(&self, error: DecodeError) {
        (self.0)(error)
    }
}

impl fmt::Debug for ErrorCollector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ErrorCollector")
    }
}

/// A shared buffer that [`ErrorCollector`]s can push into.
///
/// # Example
///
/// ```rust
/// use assayer::{decode_array, DecodeArrayOptions, Decode, Decoder, ErrorSink, Value};
///
/// let sink = ErrorSink::new();
/// let decoder = decode_array(
///     Decode::number(),
///     DecodeArrayOptions::new().collect_errors(sink.collector()),
/// );
///
/// let numbers = decoder.decode_value(&Value::from(vec![Value::from(1), Value::from("x")])).unwrap();
/// assert_eq!(numbers, vec![1.0]);
/// assert_eq!(sink.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ErrorSink {
    errors: Arc<Mutex<Vec<DecodeError>>>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a collector appending to this sink.
    pub fn collector(&self) -> ErrorCollector {
        let errors = Arc::clone(&self.errors);
        ErrorCollector::new(move |error| errors.lock().push(error))
    }

    pub fn len(&self) -> usize {
        self.errors.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.lock().is_empty()
    }

    /// Snapshot of the errors collected so far.
    pub fn errors(&self) -> Vec<DecodeError> {
        self.errors.lock().clone()
    }

    /// Drains the sink, returning `None` when nothing was collected.
    pub fn take(&self) -> Option<DecodeErrors> {
        let drained = std::mem::take(&mut *self.errors.lock());
        DecodeErrors::from_vec(drained)
    }
}

/// Options for [`decode_array`](crate::decode_array).
///
/// `require_all` defaults to `false`: elements that fail to decode are
/// dropped from the output (and handed to the collector, if any).
#[derive(Debug, Clone, Default)]
pub struct DecodeArrayOptions<S = Required> {
    base: DecodeOptions<S>,
    require_all: bool,
    error_collector: Option<ErrorCollector>,
}

impl DecodeArrayOptions<Required> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn optional(self) -> DecodeArrayOptions<Optional> {
        let base = self.base.optional();
        self.reshape(base)
    }

    pub fn nullable(self) -> DecodeArrayOptions<Nullable> {
        let base = self.base.nullable();
        self.reshape(base)
    }

    pub fn nullish(self) -> DecodeArrayOptions<OptionalNullable> {
        let base = self.base.nullish();
        self.reshape(base)
    }
}

impl DecodeArrayOptions<Optional> {
    pub fn nullable(self) -> DecodeArrayOptions<OptionalNullable> {
        let base = self.base.nullable();
        self.reshape(base)
    }
}

impl DecodeArrayOptions<Nullable> {
    pub fn optional(self) -> DecodeArrayOptions<OptionalNullable> {
        let base = self.base.optional();
        self.reshape(base)
    }
}

impl<S: Shape> DecodeArrayOptions<S> {
    pub fn force(mut self) -> Self {
        self.base = self.base.force();
        self
    }

    /// Fails the whole array when any element fails.
    pub fn require_all(mut self) -> Self {
        self.require_all = true;
        self
    }

    /// Sends every swallowed element error to `collector`.
    pub fn collect_errors(mut self, collector: ErrorCollector) -> Self {
        self.error_collector = Some(collector);
        self
    }

    pub fn base(&self) -> &DecodeOptions<S> {
        &self.base
    }

    pub fn requires_all(&self) -> bool {
        self.require_all
    }

    pub fn error_collector(&self) -> Option<&ErrorCollector> {
        self.error_collector.as_ref()
    }

    fn reshape<T: Shape>(self, base: DecodeOptions<T>) -> DecodeArrayOptions<T> {
        DecodeArrayOptions {
            base,
            require_all: self.require_all,
            error_collector: self.error_collector,
        }
    }
}

impl<S: Shape> From<DecodeOptions<S>> for DecodeArrayOptions<S> {
    fn from(base: DecodeOptions<S>) -> Self {
        Self {
            base,
            require_all: false,
            error_collector: None,
        }
    }
}
