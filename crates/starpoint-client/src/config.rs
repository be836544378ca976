//! Client configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use starpoint_reqwest::{EMBEDDING_URL, READER_URL, ReqwestConfig, WRITER_URL};
use uuid::Uuid;

/// Configuration of a [`Client`](crate::Client).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ClientConfig {
    /// Starpoint API key
    #[cfg_attr(feature = "config", arg(long = "api-key", env = "STARPOINT_API_KEY"))]
    pub api_key: Uuid,

    /// Host of the reader endpoints
    #[cfg_attr(
        feature = "config",
        arg(long = "reader-host", env = "STARPOINT_READER_HOST", default_value = READER_URL)
    )]
    #[serde(default = "default_reader_host")]
    pub reader_host: String,

    /// Host of the writer endpoints
    #[cfg_attr(
        feature = "config",
        arg(long = "writer-host", env = "STARPOINT_WRITER_HOST", default_value = WRITER_URL)
    )]
    #[serde(default = "default_writer_host")]
    pub writer_host: String,

    /// Host of the embedding endpoint
    #[cfg_attr(
        feature = "config",
        arg(long = "embedding-host", env = "STARPOINT_EMBEDDING_HOST", default_value = EMBEDDING_URL)
    )]
    #[serde(default = "default_embedding_host")]
    pub embedding_host: String,

    /// OpenAI API key used for build-and-insert
    #[cfg_attr(
        feature = "config",
        arg(long = "openai-api-key", env = "OPENAI_API_KEY", hide_env_values = true)
    )]
    #[serde(default, skip_serializing)]
    pub openai_api_key: Option<String>,

    /// HTTP client settings
    #[cfg_attr(feature = "config", command(flatten))]
    #[serde(default)]
    pub http: ReqwestConfig,
}

fn default_reader_host() -> String {
    READER_URL.to_owned()
}

fn default_writer_host() -> String {
    WRITER_URL.to_owned()
}

fn default_embedding_host() -> String {
    EMBEDDING_URL.to_owned()
}

impl ClientConfig {
    /// Creates a configuration for the public Starpoint hosts.
    pub fn new(api_key: Uuid) -> Self {
        Self {
            api_key,
            reader_host: default_reader_host(),
            writer_host: default_writer_host(),
            embedding_host: default_embedding_host(),
            openai_api_key: None,
            http: ReqwestConfig::default(),
        }
    }

    /// Sets the reader host.
    #[must_use]
    pub fn with_reader_host(mut self, host: impl Into<String>) -> Self {
        self.reader_host = host.into();
        self
    }

    /// Sets the writer host.
    #[must_use]
    pub fn with_writer_host(mut self, host: impl Into<String>) -> Self {
        self.writer_host = host.into();
        self
    }

    /// Sets the embedding host.
    #[must_use]
    pub fn with_embedding_host(mut self, host: impl Into<String>) -> Self {
        self.embedding_host = host.into();
        self
    }

    /// Sets the OpenAI API key.
    #[must_use]
    pub fn with_openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    /// Sets the HTTP client settings.
    #[must_use]
    pub fn with_http(mut self, http: ReqwestConfig) -> Self {
        self.http = http;
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_defaults_to_public_hosts() {
        let config = ClientConfig::new(Uuid::nil());
        assert_eq!(config.reader_host, READER_URL);
        assert_eq!(config.writer_host, WRITER_URL);
        assert_eq!(config.embedding_host, EMBEDDING_URL);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ClientConfig = serde_json::from_value(json!({
            "api_key": "7ad4a34b-8a2f-4b3c-9c2c-6a0e2c0d4b11",
            "writer_host": "http://localhost:8000"
        }))
        .unwrap();

        assert_eq!(config.writer_host, "http://localhost:8000");
        assert_eq!(config.reader_host, READER_URL);
        assert_eq!(config.http.http_timeout, 30);
    }

    #[test]
    fn test_openai_key_not_serialized() {
        let config = ClientConfig::new(Uuid::nil()).with_openai_api_key("sk-test");
        let value = serde_json::to_value(&config).unwrap();
        assert!(value.get("openai_api_key").is_none());
    }
}
