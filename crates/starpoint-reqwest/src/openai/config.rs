//! OpenAI client configuration.

use std::time::Duration;

use derive_builder::Builder;
use url::Url;

use crate::{Error, Result};

/// Base URL of the public OpenAI API.
pub const OPENAI_API_URL: &str = "https://api.openai.com";

/// Configuration for the OpenAI embeddings client.
#[derive(Debug, Clone, Builder)]
#[builder(
    name = "OpenAiBuilder",
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate_config")
)]
pub struct OpenAiConfig {
    /// Base URL for the OpenAI API
    #[builder(setter(custom), default = "OpenAiConfig::default_base_url()")]
    pub base_url: Url,
    /// Request timeout duration
    #[builder(default = "Duration::from_secs(60)")]
    pub timeout: Duration,
    /// User agent string for requests
    #[builder(default = "OpenAiConfig::default_user_agent()")]
    pub user_agent: String,
    /// Organization header, if the key belongs to several organizations
    #[builder(default)]
    pub organization: Option<String>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout: Duration::from_secs(60),
            user_agent: Self::default_user_agent(),
            organization: None,
        }
    }
}

impl OpenAiConfig {
    /// Create a new configuration builder
    pub fn builder() -> OpenAiBuilder {
        OpenAiBuilder::default()
    }

    /// Returns the embeddings endpoint under the base URL.
    pub fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.base_url.as_str().trim_end_matches('/'))
    }

    fn default_base_url() -> Url {
        OPENAI_API_URL.parse().expect("Valid default URL")
    }

    fn default_user_agent() -> String {
        format!("starpoint-rs/{}", env!("CARGO_PKG_VERSION"))
    }
}

impl OpenAiBuilder {
    /// Set the base URL for the OpenAI API
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        let parsed: Url = url
            .parse()
            .map_err(|_| starpoint_core::ValidationError::InvalidHost(url.to_owned()))
            .map_err(Error::from)?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    fn validate_config(&self) -> std::result::Result<(), String> {
        if let Some(timeout) = &self.timeout
            && timeout.is_zero()
        {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OpenAiConfig::default();
        assert_eq!(config.base_url.as_str(), "https://api.openai.com/");
        assert_eq!(config.embeddings_url(), "https://api.openai.com/v1/embeddings");
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_config_builder() {
        let config = OpenAiConfig::builder()
            .with_base_url("http://localhost:8080/")
            .expect("Valid URL")
            .with_timeout(Duration::from_secs(5))
            .with_organization("org-1")
            .build()
            .expect("Valid config");

        assert_eq!(config.embeddings_url(), "http://localhost:8080/v1/embeddings");
        assert_eq!(config.organization.as_deref(), Some("org-1"));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(OpenAiConfig::builder().with_base_url("not-a-valid-url").is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let result = OpenAiConfig::builder()
            .with_timeout(Duration::from_secs(0))
            .build();
        assert!(result.is_err());
    }
}
