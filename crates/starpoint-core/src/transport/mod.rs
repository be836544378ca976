//! Transport abstraction between operations and the HTTP layer.
//!
//! Operations describe a call as a [`TransportRequest`]; a [`Transport`]
//! performs it. Failures are split into responses from the service and local
//! failures so that service error bodies can be passed through verbatim.

mod service;

use serde::Serialize;
use serde_json::Value;
use strum::{AsRefStr, Display, IntoStaticStr};
use thiserror::Error;

pub use self::service::TransportService;
use crate::envelope::ErrorResponse;
use crate::{Error, Result, ServiceHealth};

/// Tracing target for transport operations.
pub const TRACING_TARGET: &str = "starpoint_core::transport";

/// HTTP methods used by Starpoint operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, IntoStaticStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

/// A single outbound call: method, path relative to the host, and JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the transport's host, starting with `/`.
    pub path: String,
    /// JSON payload, if any. `DELETE` requests carry their payload here too.
    pub body: Option<Value>,
}

impl TransportRequest {
    /// Creates a request without a body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// Creates a `POST` request with a JSON body.
    pub fn post(path: impl Into<String>, body: &impl Serialize) -> Result<Self> {
        Self::new(Method::Post, path).with_json(body)
    }

    /// Creates a `PATCH` request with a JSON body.
    pub fn patch(path: impl Into<String>, body: &impl Serialize) -> Result<Self> {
        Self::new(Method::Patch, path).with_json(body)
    }

    /// Creates a `DELETE` request with a JSON body.
    pub fn delete(path: impl Into<String>, body: &impl Serialize) -> Result<Self> {
        Self::new(Method::Delete, path).with_json(body)
    }

    /// Serializes `body` as the request payload.
    pub fn with_json(mut self, body: &impl Serialize) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Failure of a transport call.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The service answered with a non-success status.
    #[error("Request failed with status code {status}")]
    Response {
        /// HTTP status code.
        status: u16,
        /// Parsed JSON body, if the service sent one.
        body: Option<Value>,
    },
    /// The call failed before a response was received.
    #[error(transparent)]
    Request(#[from] Error),
}

impl TransportError {
    /// Creates a service response failure.
    pub fn response(status: u16, body: Option<Value>) -> Self {
        Self::Response { status, body }
    }

    /// Returns `true` if the failure came from the remote service.
    pub fn is_response(&self) -> bool {
        matches!(self, Self::Response { .. })
    }

    /// Normalizes the failure into the envelope's error payload.
    pub fn into_error_response(self) -> ErrorResponse {
        match self {
            Self::Response { status, body } => ErrorResponse::from_service_body(status, body),
            Self::Request(error) => ErrorResponse::from(error),
        }
    }
}

/// Core trait for sending requests to a Starpoint host.
///
/// Implement this trait to plug in a different HTTP stack or a test double.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request and returns the decoded JSON body of a 2xx response.
    ///
    /// An empty success body is returned as an empty JSON object.
    async fn send(&self, request: TransportRequest) -> Result<Value, TransportError>;

    /// Performs a health check on the host.
    async fn health_check(&self) -> Result<ServiceHealth>;
}
