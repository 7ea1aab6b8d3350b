//! Error types for decoding failures.
//!
//! [`DecodeError`] is the single "input was invalid" kind, chained from the
//! outermost context to the root cause. [`Error`] is what decoders return: it
//! also carries unexpected failures raised by caller-supplied code so they are
//! never mistaken for invalid input.

mod decode_error;

pub use decode_error::{Chain, DecodeError, DecodeErrors, Error};
