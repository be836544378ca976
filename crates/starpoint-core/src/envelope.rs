//! The `{data, error}` result envelope returned by every operation.

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::Error;

/// Normalized error payload.
///
/// Bodies returned by the Starpoint service are passed through verbatim: the
/// `error_message` field is lifted out and every other field is kept in
/// [`details`](Self::details).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error_message: String,
    /// Any additional fields of a passthrough service body.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ErrorResponse {
    /// Creates an error response carrying only a message.
    pub fn new(error_message: impl Into<String>) -> Self {
        Self {
            error_message: error_message.into(),
            details: Map::new(),
        }
    }

    /// Builds the error payload for a non-success service response.
    ///
    /// A JSON object is passed through field for field. If it has no string
    /// `error_message`, one is synthesized from the status and a non-string
    /// value is kept as `original_error_message`. Any other body is
    /// attached under `body` next to the synthesized message.
    pub fn from_service_body(status: u16, body: Option<Value>) -> Self {
        let fallback = format!("Request failed with status code {status}");

        match body {
            Some(Value::Object(mut details)) => {
                let error_message = match details.remove("error_message") {
                    Some(Value::String(message)) => message,
                    Some(other) => {
                        details.insert("original_error_message".to_owned(), other);
                        fallback
                    }
                    None => fallback,
                };
                Self {
                    error_message,
                    details,
                }
            }
            Some(Value::Null) | None => Self::new(fallback),
            Some(body) => Self::new(fallback).with_detail("body", body),
        }
    }

    /// Adds a detail field.
    pub fn with_detail(mut self, key: impl Into<String>, value: Value) -> Self {
        self.details.insert(key.into(), value);
        self
    }
}

impl From<&Error> for ErrorResponse {
    fn from(error: &Error) -> Self {
        Self::new(error.user_message())
    }
}

impl From<Error> for ErrorResponse {
    fn from(error: Error) -> Self {
        Self::from(&error)
    }
}

/// Discriminated success/error envelope.
///
/// Serializes as `{"data": T, "error": null}` or `{"data": null, "error": E}`.
/// Deserializing an envelope where both or neither side is set fails.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T, E = ErrorResponse> {
    /// The operation succeeded.
    Data(T),
    /// The operation failed.
    Error(E),
}

impl<T, E> ApiResult<T, E> {
    /// Returns `true` if the envelope carries data.
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    /// Returns `true` if the envelope carries an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns the success payload, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(data) => Some(data),
            Self::Error(_) => None,
        }
    }

    /// Returns the error payload, if any.
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Data(_) => None,
            Self::Error(error) => Some(error),
        }
    }

    /// Converts the envelope into a standard [`Result`].
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Data(data) => Ok(data),
            Self::Error(error) => Err(error),
        }
    }

    /// Maps the success payload.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U, E> {
        match self {
            Self::Data(data) => ApiResult::Data(f(data)),
            Self::Error(error) => ApiResult::Error(error),
        }
    }
}

impl<T> ApiResult<T> {
    /// Builds an error envelope from a local failure.
    pub fn from_error(error: impl Into<Error>) -> Self {
        Self::Error(ErrorResponse::from(error.into()))
    }

    /// Decodes a success body into the payload type.
    ///
    /// A body that does not match `T` yields an error envelope.
    pub fn from_body(body: Value) -> Self
    where
        T: DeserializeOwned,
    {
        match serde_json::from_value(body) {
            Ok(data) => Self::Data(data),
            Err(err) => Self::from_error(err),
        }
    }
}

impl<T, E> From<Result<T, E>> for ApiResult<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::Data(data),
            Err(error) => Self::Error(error),
        }
    }
}

impl<T: Serialize, E: Serialize> Serialize for ApiResult<T, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ApiResult", 2)?;
        match self {
            Self::Data(data) => {
                state.serialize_field("data", data)?;
                state.serialize_field("error", &None::<E>)?;
            }
            Self::Error(error) => {
                state.serialize_field("data", &None::<T>)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct RawEnvelope<T, E> {
    data: Option<T>,
    error: Option<E>,
}

impl<'de, T, E> Deserialize<'de> for ApiResult<T, E>
where
    T: Deserialize<'de>,
    E: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEnvelope::<T, E>::deserialize(deserializer)?;
        match (raw.data, raw.error) {
            (Some(data), None) => Ok(Self::Data(data)),
            (None, Some(error)) => Ok(Self::Error(error)),
            (Some(_), Some(_)) => Err(D::Error::custom(
                "envelope carries both data and error",
            )),
            (None, None) => Err(D::Error::custom(
                "envelope carries neither data nor error",
            )),
        }
    }
}
