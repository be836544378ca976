//! Connection settings shared by the reader, writer and embedding hosts.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use reqwest::header::HeaderName;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Default whole-request timeout: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the Starpoint API key.
pub const API_KEY_HEADER: &str = "x-starpoint-key";

/// How the HTTP client reaches and authenticates against Starpoint hosts.
///
/// A zero `http_timeout` falls back to [`DEFAULT_TIMEOUT_SECS`]. Deployments
/// behind a gateway that renames the key header can override
/// `api_key_header`, and hosts without a `GET /` greeting can be bound with
/// `skip_health_check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ReqwestConfig {
    /// Whole-request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "HTTP_TIMEOUT", default_value = "30")
    )]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,

    /// Timeout in seconds for establishing a connection
    #[cfg_attr(
        feature = "config",
        arg(long = "connect-timeout", env = "STARPOINT_CONNECT_TIMEOUT")
    )]
    #[serde(default)]
    pub connect_timeout: Option<u64>,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Header name the API key is sent under
    #[cfg_attr(
        feature = "config",
        arg(long = "api-key-header", env = "STARPOINT_API_KEY_HEADER", default_value = API_KEY_HEADER)
    )]
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,

    /// Bind hosts without checking their greeting
    #[cfg_attr(
        feature = "config",
        arg(long = "skip-health-check", env = "STARPOINT_SKIP_HEALTH_CHECK")
    )]
    #[serde(default)]
    pub skip_health_check: bool,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_api_key_header() -> String {
    API_KEY_HEADER.to_owned()
}

impl Default for ReqwestConfig {
    fn default() -> Self {
        Self {
            http_timeout: default_timeout_secs(),
            connect_timeout: None,
            user_agent: None,
            api_key_header: default_api_key_header(),
            skip_health_check: false,
        }
    }
}

impl ReqwestConfig {
    /// Timeout applied to every request.
    pub fn request_timeout(&self) -> Duration {
        match self.http_timeout {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    /// Connect timeout, if one is configured and non-zero.
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// User agent sent to Starpoint, `starpoint-rs/<version>` unless set.
    pub fn user_agent(&self) -> String {
        match &self.user_agent {
            Some(agent) if !agent.is_empty() => agent.clone(),
            _ => format!("starpoint-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Parses the configured API key header name.
    ///
    /// Header names are case-insensitive and normalized to lowercase.
    pub fn api_key_header(&self) -> Result<HeaderName> {
        Ok(HeaderName::from_bytes(
            self.api_key_header.trim().to_ascii_lowercase().as_bytes(),
        )?)
    }

    /// Sets the whole-request timeout in seconds.
    #[must_use]
    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.http_timeout = secs;
        self
    }

    /// Sets the connect timeout in seconds.
    #[must_use]
    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout = Some(secs);
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sends the API key under a different header name.
    #[must_use]
    pub fn with_api_key_header(mut self, header: impl Into<String>) -> Self {
        self.api_key_header = header.into();
        self
    }

    /// Binds hosts without calling `GET /` first.
    #[must_use]
    pub fn without_health_check(mut self) -> Self {
        self.skip_health_check = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_defaults_target_public_hosts() {
        let config = ReqwestConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), None);
        assert_eq!(config.api_key_header().unwrap().as_str(), API_KEY_HEADER);
        assert!(!config.skip_health_check);
        assert!(config.user_agent().starts_with("starpoint-rs/"));
    }

    #[test]
    fn test_zero_timeouts_fall_back() {
        let config = ReqwestConfig::default()
            .with_request_timeout(0)
            .with_connect_timeout(0);
        assert_eq!(
            config.request_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(config.connect_timeout(), None);
    }

    #[test]
    fn test_api_key_header_normalized() {
        let config = ReqwestConfig::default().with_api_key_header(" X-Gateway-Key ");
        assert_eq!(config.api_key_header().unwrap().as_str(), "x-gateway-key");
    }

    #[test]
    fn test_invalid_api_key_header() {
        let config = ReqwestConfig::default().with_api_key_header("bad header");
        assert!(matches!(config.api_key_header(), Err(Error::HeaderName(_))));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ReqwestConfig =
            serde_json::from_str(r#"{"connect_timeout":5,"skip_health_check":true}"#).unwrap();
        assert_eq!(config.http_timeout, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.connect_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.api_key_header, API_KEY_HEADER);
        assert!(config.skip_health_check);
    }

    #[test]
    fn test_empty_user_agent_uses_default() {
        let config = ReqwestConfig::default().with_user_agent("");
        assert!(config.user_agent().starts_with("starpoint-rs/"));

        let config = ReqwestConfig::default().with_user_agent("custom-agent/1.0");
        assert_eq!(config.user_agent(), "custom-agent/1.0");
    }
}
