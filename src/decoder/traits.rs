//! The [`Decoder`] trait and its generic adapters.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::Error;
use crate::value::Value;

/// A function from a loose input value to a typed output.
///
/// The input is `None` when the value was not provided at all and
/// `Some(&Value::Null)` when it was an explicit null; decoders built with
/// [`DecodeOptions`](crate::DecodeOptions) treat the two differently.
///
/// Decoders are stateless and `Send + Sync`, so one decoder can be built once
/// and used from many threads. They compose: the array, object and union
/// decoders all take other decoders as parameters.
///
/// # Example
///
/// ```rust
/// use assayer::{from_fn, Decode, Decoder, DecodeError, Value};
///
/// let even = from_fn(|value| {
///     let n = Decode::number().decode(value)?;
///     if n % 2.0 == 0.0 {
///         Ok(n)
///     } else {
///         Err(DecodeError::new("Not an even number").into())
///     }
/// });
///
/// assert_eq!(even.decode_value(&Value::from(4)).unwrap(), 4.0);
/// assert!(even.decode_value(&Value::from(3)).is_err());
///
/// let label = even.map(|n| format!("#{}", n));
/// assert_eq!(label.decode_value(&Value::from(8)).unwrap(), "#8");
/// ```
pub trait Decoder: Send + Sync {
    /// The type produced by a successful decode.
    type Output;

    /// Decodes `value`, which is `None` when the input was not provided.
    fn decode(&self, value: Option<&Value>) -> Result<Self::Output, Error>;

    /// Decodes a value that is known to be present.
    fn decode_value(&self, value: &Value) -> Result<Self::Output, Error> {
        self.decode(Some(value))
    }

    /// Post-processes the decoded output with `f`.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U + Send + Sync,
    {
        Map { decoder: self, f }
    }

    /// Erases this decoder into a cheaply clonable [`SharedDecoder`].
    fn shared(self) -> SharedDecoder<Self::Output>
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

/// A type-erased decoder that can be cloned and shared between threads.
pub type SharedDecoder<T> = Arc<dyn Decoder<Output = T>>;

impl<D: Decoder + ?Sized> Decoder for &D {
    type Output = D::Output;

    fn decode(&self, value: Option<&Value>) -> Result<Self::Output, Error> {
        (**self).decode(value)
    }
}

impl<D: Decoder + ?Sized> Decoder for Box<D> {
    type Output = D::Output;

    fn decode(&self, value: Option<&Value>) -> Result<Self::Output, Error> {
        (**self).decode(value)
    }
}

impl<D: Decoder + ?Sized> Decoder for Arc<D> {
    type Output = D::Output;

    fn decode(&self, value: Option<&Value>) -> Result<Self::Output, Error> {
        (**self).decode(value)
    }
}

/// Decoder backed by a closure, see [`from_fn`].
pub struct FnDecoder<F, T> {
    f: F,
    _output: PhantomData<fn() -> T>,
}

/// Turns a closure into a [`Decoder`].
pub fn from_fn<F, T>(f: F) -> FnDecoder<F, T>
where
    F: Fn(Option<&Value>) -> Result<T, Error> + Send + Sync,
{
    FnDecoder {
        f,
        _output: PhantomData,
    }
}

impl<F, T> Decoder for FnDecoder<F, T>
where
    F: Fn(Option<&Value>) -> Result<T, Error> + Send + Sync,
{
    type Output = T;

    fn decode(&self, value: Option<&Value>) -> Result<T, Error> {
        (self.f)(value)
    }
}

impl<F: Clone, T> Clone for FnDecoder<F, T> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _output: PhantomData,
        }
    }
}

/// Decoder returned by [`Decoder::map`].
#[derive(Clone)]
pub struct Map<D, F> {
    decoder: D,
    f: F,
}

impl<D, F, U> Decoder for Map<D, F>
where
    D: Decoder,
    F: Fn(D::Output) -> U + Send + Sync,
{
    type Output = U;

    fn decode(&self, value: Option<&Value>) -> Result<U, Error> {
        self.decoder.decode(value).map(&self.f)
    }
}
