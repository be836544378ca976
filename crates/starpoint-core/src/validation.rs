//! Pre-flight validation failures.
//!
//! Every variant carries a distinct, constant message. Validation runs before
//! any network call is made.

use thiserror::Error;

use crate::error::{Error, ErrorKind};

/// Message used when a collection is created without a name.
pub const CREATE_COLLECTION_MISSING_NAME_ERROR: &str =
    "Please provide a name for the collection you want to create.";

/// Message used when a collection is created without a dimensionality.
pub const CREATE_COLLECTION_MISSING_DIMENSIONALITY_ERROR: &str =
    "Please provide a dimensionality for the collection you want to create.";

/// Message used when a collection is created with a dimensionality of zero or less.
pub const CREATE_COLLECTION_DIMENSIONALITY_LTE_ZERO_ERROR: &str =
    "Dimensionality must be greater than 0.";

/// Message used when a collection id is required but missing.
pub const MISSING_COLLECTION_ID_ERROR: &str = "Please provide a collection_id in your request.";

/// Message used when neither a collection id nor a collection name is given.
pub const NO_COLLECTION_VALUE_ERROR: &str =
    "Please provide at least one value for either collection_id or collection_name.";

/// Message used when both a collection id and a collection name are given.
pub const MULTI_COLLECTION_VALUE_ERROR: &str =
    "Please only provide either collection_id or collection_name in your request.";

/// Message used when no host is configured.
pub const NO_HOST_ERROR: &str = "No host value provided. A host must be provided.";

/// Message used when neither an OpenAI key nor a key file is given.
pub const NO_API_KEY_VALUE_ERROR: &str = "Please provide at least one value for either api_key or filepath where the api key lives.";

/// Message used when both an OpenAI key and a key file are given.
pub const MULTI_API_KEY_VALUE_ERROR: &str =
    "Please only provide either api_key or filepath with the api_key in your initialization.";

/// Message used when the OpenAI key file does not exist.
pub const NO_API_KEY_FILE_ERROR: &str = "The provided filepath for the API key is not a valid file.";

/// A request failed local validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The collection name is missing or empty.
    #[error("{}", CREATE_COLLECTION_MISSING_NAME_ERROR)]
    MissingName,
    /// The collection dimensionality is missing.
    #[error("{}", CREATE_COLLECTION_MISSING_DIMENSIONALITY_ERROR)]
    MissingDimensionality,
    /// The collection dimensionality is zero or negative.
    #[error("{}", CREATE_COLLECTION_DIMENSIONALITY_LTE_ZERO_ERROR)]
    NonPositiveDimensionality,
    /// The collection id is missing or empty.
    #[error("{}", MISSING_COLLECTION_ID_ERROR)]
    MissingCollectionId,
    /// Neither `collection_id` nor `collection_name` was given.
    #[error("{}", NO_COLLECTION_VALUE_ERROR)]
    NoCollectionValue,
    /// Both `collection_id` and `collection_name` were given.
    #[error("{}", MULTI_COLLECTION_VALUE_ERROR)]
    MultipleCollectionValues,
    /// No host was configured.
    #[error("{}", NO_HOST_ERROR)]
    NoHost,
    /// The host is not an http(s) URL.
    #[error("Provided host {0} is not a valid url format.")]
    InvalidHost(String),
    /// Neither an API key nor a key file was given.
    #[error("{}", NO_API_KEY_VALUE_ERROR)]
    NoApiKeyValue,
    /// Both an API key and a key file were given.
    #[error("{}", MULTI_API_KEY_VALUE_ERROR)]
    MultipleApiKeyValues,
    /// The API key file path does not point to a file.
    #[error("{}", NO_API_KEY_FILE_ERROR)]
    NoApiKeyFile,
}

impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Self {
        let message = error.to_string();
        Error::from_source(ErrorKind::InvalidInput, error).with_message(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_distinct() {
        let messages = [
            ValidationError::MissingName.to_string(),
            ValidationError::MissingDimensionality.to_string(),
            ValidationError::NonPositiveDimensionality.to_string(),
            ValidationError::MissingCollectionId.to_string(),
        ];

        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_into_error() {
        let error = Error::from(ValidationError::MissingName);
        assert_eq!(error.kind, ErrorKind::InvalidInput);
        assert_eq!(
            error.message.as_deref(),
            Some(CREATE_COLLECTION_MISSING_NAME_ERROR)
        );
    }

    #[test]
    fn test_invalid_host_message() {
        let error = ValidationError::InvalidHost("asdf".to_string());
        assert_eq!(
            error.to_string(),
            "Provided host asdf is not a valid url format."
        );
    }
}
