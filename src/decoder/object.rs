//! Object decoding with per-property error trails.
//!
//! An [`ObjectDecoder`] does not describe its fields up front. It hands a
//! [`Properties`] accessor to a caller-supplied assemble function, which pulls
//! each property through its own decoder. Every property failure is wrapped
//! with the `Entity.property` it happened in, so a failure three objects deep
//! reports the whole trail:
//!
//! ```text
//! Error in Order.customer. Data: {...}. Inner error: Error in Customer.email. Data: {...}. Inner error: Not a valid string
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::error::{DecodeError, Error};
use crate::options::{DecodeOptions, Required, Shape};
use crate::presence::check_presence;
use crate::value::{lookup_path, record_to_json, Record, Value};

use super::Decoder;

/// A decoder for record-shaped input, see [`decode_object`].
pub struct ObjectDecoder<F, T, S = Required> {
    entity: String,
    assemble: F,
    options: DecodeOptions<S>,
    _output: PhantomData<fn() -> T>,
}

/// Creates an object decoder.
///
/// `entity` names the record in error messages. `assemble` receives a
/// [`Properties`] accessor for the input record and builds the output.
///
/// # Example
///
/// ```rust
/// use assayer::{decode_object, Decode, DecodeOptions, Decoder, Value};
/// use serde_json::json;
///
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: f64,
///     y: f64,
/// }
///
/// let point = decode_object(
///     "Point",
///     |props| {
///         Ok(Point {
///             x: props.get("x", Decode::number())?,
///             y: props.get("y", Decode::number())?,
///         })
///     },
///     DecodeOptions::new(),
/// );
///
/// let value = Value::from(json!({"x": 1, "y": 2}));
/// assert_eq!(point.decode_value(&value).unwrap(), Point { x: 1.0, y: 2.0 });
///
/// let error = point.decode_value(&Value::from(json!({"x": 1}))).unwrap_err();
/// assert!(error.to_string().starts_with("Error in Point.y."));
/// ```
pub fn decode_object<T, F, S>(
    entity: impl Into<String>,
    assemble: F,
    options: DecodeOptions<S>,
) -> ObjectDecoder<F, T, S>
where
    F: Fn(&Properties<'_>) -> Result<T, Error> + Send + Sync,
    S: Shape,
{
    ObjectDecoder {
        entity: entity.into(),
        assemble,
        options,
        _output: PhantomData,
    }
}

impl<F, T, S: Shape> ObjectDecoder<F, T, S> {
    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn options(&self) -> &DecodeOptions<S> {
        &self.options
    }
}

impl<F, T, S> Decoder for ObjectDecoder<F, T, S>
where
    F: Fn(&Properties<'_>) -> Result<T, Error> + Send + Sync,
    S: Shape,
{
    type Output = S::Out<T>;

    fn decode(&self, value: Option<&Value>) -> Result<Self::Output, Error> {
        match check_presence::<T, S>(value, &self.options) {
            Ok(Some(out)) => return Ok(out),
            Ok(None) => {}
            Err(error) => {
                let message = format!("Can't decode {}", self.entity);
                return Err(DecodeError::with_inner(message, error).into());
            }
        }

        let record = match value {
            Some(Value::Object(record)) => record,
            _ => {
                let message = format!("Can't convert input {} to object", self.entity);
                return Err(DecodeError::new(message).into());
            }
        };

        let properties = Properties {
            entity: &self.entity,
            record,
        };
        (self.assemble)(&properties).map(S::present)
    }
}

impl<F: Clone, T, S: Clone> Clone for ObjectDecoder<F, T, S> {
    fn clone(&self) -> Self {
        Self {
            entity: self.entity.clone(),
            assemble: self.assemble.clone(),
            options: self.options.clone(),
            _output: PhantomData,
        }
    }
}

impl<F, T, S: fmt::Debug> fmt::Debug for ObjectDecoder<F, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectDecoder")
            .field("entity", &self.entity)
            .field("options", &self.options)
            .finish()
    }
}

/// Property accessor handed to an object decoder's assemble function.
///
/// It borrows the input record and only lives for one decode call.
#[derive(Debug, Clone, Copy)]
pub struct Properties<'a> {
    entity: &'a str,
    record: &'a Record,
}

impl<'a> Properties<'a> {
    /// Name of the entity being decoded.
    pub fn entity(&self) -> &'a str {
        self.entity
    }

    /// The raw input record.
    pub fn record(&self) -> &'a Record {
        self.record
    }

    /// Decodes the property `name` with `decoder`.
    ///
    /// `name` may be a dotted path (`address.city`) into nested records; an
    /// exact key match wins over the dotted walk. A missing property is
    /// handed to the decoder as absent input.
    pub fn get<D: Decoder>(&self, name: &str, decoder: D) -> Result<D::Output, Error> {
        decoder
            .decode(lookup_path(self.record, name))
            .map_err(|error| self.annotate(name, error))
    }

    /// Decodes the value `getter` extracts from the record.
    ///
    /// `name` is only used to label failures. A getter returning `Ok(None)`
    /// reports the value as absent; a getter failure is labelled like a
    /// decoder failure.
    ///
    /// ```rust
    /// use assayer::{decode_object, Decode, DecodeOptions, Decoder, Value};
    /// use serde_json::json;
    ///
    /// let full_name = decode_object(
    ///     "Person",
    ///     |props| {
    ///         props.get_with("fullName", Decode::string(), |record| {
    ///             let first = record.get("first").and_then(Value::as_str).unwrap_or_default();
    ///             let last = record.get("last").and_then(Value::as_str).unwrap_or_default();
    ///             Ok(Some(Value::from(format!("{} {}", first, last))))
    ///         })
    ///     },
    ///     DecodeOptions::new(),
    /// );
    ///
    /// let value = Value::from(json!({"first": "Ada", "last": "Lovelace"}));
    /// assert_eq!(full_name.decode_value(&value).unwrap(), "Ada Lovelace");
    /// ```
    pub fn get_with<D, G>(&self, name: &str, decoder: D, getter: G) -> Result<D::Output, Error>
    where
        D: Decoder,
        G: FnOnce(&Record) -> Result<Option<Value>, Error>,
    {
        getter(self.record)
            .and_then(|value| decoder.decode(value.as_ref()))
            .map_err(|error| self.annotate(name, error))
    }

    fn annotate(&self, name: &str, error: Error) -> Error {
        let data = record_to_json(self.record);
        let annotated = match error {
            Error::Decode(inner) => {
                tracing::trace!("property_failed: entity={}, property={}", self.entity, name);
                let message = format!("Error in {}.{}. Data: {}", self.entity, name, data);
                DecodeError::with_inner(message, inner)
            }
            Error::Unexpected(cause) => DecodeError::new(format!(
                "Unknown error in {}.{}. Data: {}. Error: {}",
                self.entity, name, data, cause
            )),
        };
        annotated.at(self.entity, name).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{decode_number, decode_string, from_fn, Decode};
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Address {
        city: String,
        zip: f64,
    }

    #[derive(Debug, PartialEq)]
    struct User {
        name: String,
        address: Address,
    }

    fn address() -> impl Decoder<Output = Address> {
        decode_object(
            "Address",
            |props| {
                Ok(Address {
                    city: props.get("city", Decode::string())?,
                    zip: props.get("zip", Decode::number())?,
                })
            },
            DecodeOptions::new(),
        )
    }

    fn user() -> impl Decoder<Output = User> {
        decode_object(
            "User",
            |props| {
                Ok(User {
                    name: props.get("name", Decode::string())?,
                    address: props.get("address", address())?,
                })
            },
            DecodeOptions::new(),
        )
    }

    #[test]
    fn test_nested_decode() {
        let value = Value::from(json!({
            "name": "Ada",
            "address": {"city": "London", "zip": 1815}
        }));
        let decoded = user().decode_value(&value).unwrap();
        assert_eq!(decoded.address.city, "London");
        assert_eq!(decoded.address.zip, 1815.0);
    }

    #[test]
    fn test_nested_failure_chains_both_entities() {
        let value = Value::from(json!({
            "name": "Ada",
            "address": {"city": "London", "zip": "SW1"}
        }));
        let error = user().decode_value(&value).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("User.address"));
        assert!(message.contains("Address.zip"));
        assert!(message.ends_with("Inner error: Not a valid number"));

        let path = error.as_decode_error().unwrap().path();
        assert_eq!(path.property_path(), "address.zip");
    }

    #[test]
    fn test_data_is_serialized_input() {
        let value = Value::from(json!({"city": 3}));
        let error = address().decode_value(&value).unwrap_err();
        assert!(error
            .to_string()
            .starts_with(r#"Error in Address.city. Data: {"city":3}. Inner error: "#));
    }

    #[test]
    fn test_non_object_input() {
        for value in [Value::from(vec![1]), Value::from("x"), Value::from(1)] {
            let error = address().decode_value(&value).unwrap_err();
            assert_eq!(error.to_string(), "Can't convert input Address to object");
        }
    }

    #[test]
    fn test_presence_failure_names_entity() {
        let error = address().decode(None).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Can't decode Address. Inner error: Required field missing"
        );
    }

    #[test]
    fn test_optional_object_passes_absent() {
        let decoder = decode_object(
            "Tag",
            |props| props.get("label", decode_string(DecodeOptions::new())),
            DecodeOptions::new().optional(),
        );
        assert_eq!(decoder.decode(None).unwrap(), None);
    }

    #[test]
    fn test_dotted_path_lookup() {
        let decoder = decode_object(
            "User",
            |props| props.get("address.zip", decode_number(DecodeOptions::new())),
            DecodeOptions::new(),
        );
        let value = Value::from(json!({"address": {"zip": 12}}));
        assert_eq!(decoder.decode_value(&value).unwrap(), 12.0);
    }

    #[test]
    fn test_unexpected_error_is_reported_as_unknown() {
        let failing = from_fn(|_: Option<&Value>| -> Result<f64, Error> {
            Err(Error::unexpected("socket closed"))
        });
        let decoder = decode_object("Job", move |props| props.get("id", &failing), DecodeOptions::new());
        let error = decoder.decode_value(&Value::from(json!({"id": 1}))).unwrap_err();
        assert!(error.is_decode_error());
        assert_eq!(
            error.to_string(),
            r#"Unknown error in Job.id. Data: {"id":1}. Error: socket closed"#
        );
    }

    #[test]
    fn test_getter_failure_is_annotated() {
        let decoder = decode_object(
            "Job",
            |props| {
                props.get_with("id", Decode::number(), |_| {
                    Err(DecodeError::new("No id field").into())
                })
            },
            DecodeOptions::new(),
        );
        let error = decoder.decode_value(&Value::from(json!({}))).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Error in Job.id. Data: {}. Inner error: No id field"
        );
    }
}
