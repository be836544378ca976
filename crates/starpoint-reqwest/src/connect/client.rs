//! Shared reqwest client for Starpoint hosts.

use std::sync::Arc;

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use uuid::Uuid;

use super::ReqwestConfig;
use crate::transport::HostTransport;
use crate::{Error, Result};

/// Tracing target for reqwest client operations.
pub const TRACING_TARGET: &str = "starpoint_reqwest::client";

/// Inner client that holds the HTTP client and configuration.
struct ReqwestClientInner {
    http: Client,
    config: ReqwestConfig,
}

/// Reqwest-based HTTP client authenticated against Starpoint.
///
/// Every request carries the API key header (`x-starpoint-key` unless
/// configured otherwise) and a JSON content type. One client is shared by the reader, writer and embedding hosts;
/// cloning only bumps a reference count.
///
/// # Examples
///
/// ```rust,ignore
/// use starpoint_reqwest::{ReqwestClient, ReqwestConfig, WRITER_URL};
///
/// let client = ReqwestClient::new(api_key, ReqwestConfig::default())?;
/// let writer = client.connect(WRITER_URL).await?;
/// ```
#[derive(Clone)]
pub struct ReqwestClient {
    inner: Arc<ReqwestClientInner>,
}

impl std::fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestClient {
    /// Creates a new reqwest client with the given API key and configuration.
    pub fn new(api_key: Uuid, config: ReqwestConfig) -> Result<Self> {
        let timeout = config.request_timeout();
        let user_agent = config.user_agent();
        let key_header = config.api_key_header()?;

        tracing::debug!(
            target: TRACING_TARGET,
            timeout_ms = timeout.as_millis(),
            user_agent = %user_agent,
            api_key_header = %key_header,
            "Creating reqwest client"
        );

        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(&api_key.to_string())?;
        key.set_sensitive(true);
        headers.insert(key_header, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .default_headers(headers);
        if let Some(connect_timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(connect_timeout);
        }
        let http = builder.build().map_err(Error::from)?;

        tracing::info!(
            target: TRACING_TARGET,
            "Reqwest client created successfully"
        );

        Ok(Self {
            inner: Arc::new(ReqwestClientInner { http, config }),
        })
    }

    /// Gets the underlying HTTP client.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &ReqwestConfig {
        &self.inner.config
    }

    /// Binds the client to a host without contacting it.
    pub fn bind(&self, host: &str) -> Result<HostTransport> {
        HostTransport::new(self.clone(), host)
    }

    /// Binds the client to a host and verifies the host answers.
    ///
    /// Fails if the host cannot be reached or answers with a non-success
    /// status. An unexpected greeting only logs a warning. With
    /// `skip_health_check` set this is the same as [`bind`](Self::bind).
    pub async fn connect(&self, host: &str) -> starpoint_core::Result<HostTransport> {
        let transport = self.bind(host)?;
        if self.inner.config.skip_health_check {
            tracing::debug!(
                target: TRACING_TARGET,
                host = %transport.host(),
                "Skipping host health check"
            );
        } else {
            transport.verify().await?;
        }
        Ok(transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::API_KEY_HEADER;

    #[test]
    fn test_client_creation() {
        let client = ReqwestClient::new(Uuid::new_v4(), ReqwestConfig::default()).unwrap();
        assert!(client.config().user_agent.is_none());
    }

    #[test]
    fn test_invalid_key_header_rejected() {
        let config = ReqwestConfig::default().with_api_key_header("x key");
        assert!(matches!(
            ReqwestClient::new(Uuid::new_v4(), config),
            Err(Error::HeaderName(_))
        ));
    }

    #[tokio::test]
    async fn test_custom_key_header_sent() {
        let api_key = Uuid::new_v4();
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("x-gateway-key", api_key.to_string().as_str())
            .match_header(API_KEY_HEADER, mockito::Matcher::Missing)
            .with_body("hello.")
            .create_async()
            .await;

        let config = ReqwestConfig::default().with_api_key_header("X-Gateway-Key");
        let client = ReqwestClient::new(api_key, config).unwrap();
        client.connect(&server.url()).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_skip_health_check() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .with_status(503)
            .expect(0)
            .create_async()
            .await;

        let config = ReqwestConfig::default().without_health_check();
        let client = ReqwestClient::new(Uuid::new_v4(), config).unwrap();
        let transport = client.connect(&server.url()).await.unwrap();
        assert_eq!(transport.host(), server.url());
        mock.assert_async().await;

        let client = ReqwestClient::new(Uuid::new_v4(), ReqwestConfig::default()).unwrap();
        assert!(client.connect(&server.url()).await.is_err());
    }

    #[test]
    fn test_bind_rejects_invalid_host() {
        let client = ReqwestClient::new(Uuid::new_v4(), ReqwestConfig::default()).unwrap();
        assert!(client.bind("").is_err());
        assert!(client.bind("www.example.com").is_err());
        assert_eq!(
            client.bind("https://writer.starpoint.ai/").unwrap().host(),
            "https://writer.starpoint.ai"
        );
    }
}
