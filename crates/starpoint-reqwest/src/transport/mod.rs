//! [`Transport`] implementation bound to a single Starpoint host.

use std::time::Instant;

use serde_json::{Map, Value};
use starpoint_core::transport::{Method, Transport, TransportError, TransportRequest};
use starpoint_core::{ServiceHealth, ServiceStatus, TransportService};

use crate::connect::{ReqwestClient, validate_host};
use crate::Error;

/// Tracing target for transport operations.
pub const TRACING_TARGET: &str = "starpoint_reqwest::transport";

/// HTTP transport for one validated Starpoint host.
#[derive(Debug, Clone)]
pub struct HostTransport {
    client: ReqwestClient,
    host: String,
}

impl HostTransport {
    /// Validates `host` and binds `client` to it.
    pub fn new(client: ReqwestClient, host: &str) -> crate::Result<Self> {
        let host = validate_host(host)?;
        Ok(Self { client, host })
    }

    /// Returns the validated host, without a trailing slash.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Converts this transport into a [`TransportService`].
    pub fn into_service(self) -> TransportService {
        TransportService::new(self)
    }

    /// Checks the host's health and fails only if it is unhealthy.
    pub async fn verify(&self) -> starpoint_core::Result<ServiceHealth> {
        let health = self.health_check().await?;
        match health.status {
            ServiceStatus::Healthy => Ok(health),
            ServiceStatus::Degraded => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    host = %self.host,
                    message = health.message.as_deref().unwrap_or_default(),
                    "Host may not be able to serve requests"
                );
                Ok(health)
            }
            ServiceStatus::Unhealthy => Err(starpoint_core::Error::configuration()
                .with_message(health.message.unwrap_or_default())),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path)
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Parses a response body; non-JSON text is kept as a JSON string.
fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned())))
}

fn request_error(error: Error) -> TransportError {
    TransportError::Request(error.into())
}

#[async_trait::async_trait]
impl Transport for HostTransport {
    async fn send(&self, request: TransportRequest) -> Result<Value, TransportError> {
        let url = self.url(&request.path);

        tracing::debug!(
            target: TRACING_TARGET,
            method = %request.method,
            url = %url,
            "Sending request"
        );

        let mut builder = self
            .client
            .http()
            .request(to_reqwest_method(request.method), &url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| request_error(Error::from(e)))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| request_error(Error::from(e)))?;
        let body = parse_body(&text);

        if status.is_success() {
            tracing::debug!(
                target: TRACING_TARGET,
                status = status.as_u16(),
                url = %url,
                "Request completed"
            );
            return Ok(body.unwrap_or_else(|| Value::Object(Map::new())));
        }

        tracing::error!(
            target: TRACING_TARGET,
            status = status.as_u16(),
            url = %url,
            body = %text,
            "Request failed"
        );
        Err(TransportError::response(status.as_u16(), body))
    }

    async fn health_check(&self) -> starpoint_core::Result<ServiceHealth> {
        let started = Instant::now();
        let response = self
            .client
            .http()
            .get(&self.host)
            .send()
            .await
            .map_err(Error::from)?;
        let status = response.status();
        let text = response.text().await.map_err(Error::from)?;
        let elapsed = started.elapsed();

        let health = if status.is_success() {
            ServiceHealth::from_greeting(&text)
        } else {
            ServiceHealth::unhealthy(format!(
                "Host cannot be validated, response from host {}: {}",
                self.host, text
            ))
        };

        tracing::debug!(
            target: TRACING_TARGET,
            host = %self.host,
            status = ?health.status,
            elapsed_ms = elapsed.as_millis(),
            "Health check completed"
        );

        Ok(health.with_response_time(elapsed))
    }
}
