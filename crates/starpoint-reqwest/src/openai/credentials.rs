//! Resolution of the OpenAI API key.

use std::path::PathBuf;

use starpoint_core::ValidationError;
use starpoint_core::openai::InitOpenAiRequest;

use crate::Result;

/// Where the OpenAI API key comes from.
#[derive(Clone)]
pub enum OpenAiCredentials {
    /// The key itself.
    ApiKey(String),
    /// A file whose trimmed contents are the key.
    KeyFile(PathBuf),
}

impl std::fmt::Debug for OpenAiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(..)"),
            Self::KeyFile(path) => f.debug_tuple("KeyFile").field(path).finish(),
        }
    }
}

impl OpenAiCredentials {
    /// Create API key credentials
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(key.into())
    }

    /// Create key file credentials
    pub fn key_file(path: impl Into<PathBuf>) -> Self {
        Self::KeyFile(path.into())
    }

    /// Returns the API key, reading the key file if necessary.
    pub fn resolve(&self) -> Result<String> {
        match self {
            Self::ApiKey(key) => Ok(key.clone()),
            Self::KeyFile(path) => {
                if !path.is_file() {
                    return Err(ValidationError::NoApiKeyFile.into());
                }
                Ok(std::fs::read_to_string(path)?.trim().to_owned())
            }
        }
    }
}

impl TryFrom<&InitOpenAiRequest> for OpenAiCredentials {
    type Error = ValidationError;

    /// A present key wins, even an empty one, unless a non-empty key is
    /// paired with a non-empty key file. The file is only used when no key
    /// was given at all.
    fn try_from(request: &InitOpenAiRequest) -> std::result::Result<Self, Self::Error> {
        let has_file = request
            .openai_key_filepath
            .as_ref()
            .is_some_and(|path| !path.as_os_str().is_empty());

        match (&request.openai_key, &request.openai_key_filepath) {
            (Some(key), _) if !key.is_empty() && has_file => {
                Err(ValidationError::MultipleApiKeyValues)
            }
            (Some(key), _) => Ok(Self::api_key(key.clone())),
            (None, Some(path)) => Ok(Self::key_file(path.clone())),
            (None, None) => Err(ValidationError::NoApiKeyValue),
        }
    }
}
