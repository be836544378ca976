//! Shared handle over a [`Transport`] implementation.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{TRACING_TARGET, Transport, TransportError, TransportRequest};
use crate::envelope::ApiResult;
use crate::{Result, ServiceHealth};

/// Cloneable, type-erased transport used by every operation.
///
/// Each operation is bound to one `TransportService`, which stands in for a
/// pre-configured HTTP client. Cloning only bumps a reference count.
#[derive(Clone)]
pub struct TransportService {
    inner: Arc<dyn Transport>,
}

impl fmt::Debug for TransportService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportService").finish_non_exhaustive()
    }
}

impl TransportService {
    /// Wraps a transport implementation.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            inner: Arc::new(transport),
        }
    }

    /// Wraps an already shared transport implementation.
    pub fn from_arc(transport: Arc<dyn Transport>) -> Self {
        Self { inner: transport }
    }

    /// Sends a request without normalizing the outcome.
    pub async fn send(&self, request: TransportRequest) -> Result<Value, TransportError> {
        self.inner.send(request).await
    }

    /// Sends a request and maps the outcome into an envelope.
    ///
    /// Never fails: service error bodies are passed through and local
    /// failures become a synthesized `error_message`.
    pub async fn call<T: DeserializeOwned>(&self, request: TransportRequest) -> ApiResult<T> {
        let method = request.method;
        let path = request.path.clone();

        tracing::debug!(
            target: TRACING_TARGET,
            method = %method,
            path = %path,
            "Sending request"
        );

        match self.inner.send(request).await {
            Ok(body) => ApiResult::from_body(body),
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    method = %method,
                    path = %path,
                    error = %err,
                    "Request failed"
                );
                ApiResult::Error(err.into_error_response())
            }
        }
    }

    /// Performs a health check on the underlying transport.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        self.inner.health_check().await
    }
}

impl<T: Transport + 'static> From<Arc<T>> for TransportService {
    fn from(transport: Arc<T>) -> Self {
        Self { inner: transport }
    }
}
