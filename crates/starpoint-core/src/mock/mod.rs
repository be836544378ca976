//! Test doubles for the transport and embedding provider traits.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! starpoint-core = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use starpoint_core::mock::MockTransport;
//!
//! let transport = MockTransport::new()
//!     .with_response(json!({"id": "c1", "name": "x", "dimensionality": 3}));
//! let service = transport.clone().into_service();
//! // ... run an operation ...
//! assert_eq!(transport.call_count(), 1);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Value, json};

use crate::openai::{
    CreateEmbeddingRequest, CreateEmbeddingResponse, EmbeddingData, EmbeddingProvider,
    EmbeddingService, EmbeddingUsage,
};
use crate::transport::{Transport, TransportError, TransportRequest, TransportService};
use crate::{Error, Result, ServiceHealth};

type Scripted = Result<Value, TransportError>;

#[derive(Default)]
struct MockTransportState {
    responses: VecDeque<Scripted>,
    requests: Vec<TransportRequest>,
}

/// Transport that replays scripted outcomes and records every request.
///
/// When the script runs out, calls succeed with an empty JSON object.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockTransportState>>,
}

impl MockTransport {
    /// Creates a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockTransportState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queues a successful response body.
    pub fn with_response(self, body: Value) -> Self {
        self.state().responses.push_back(Ok(body));
        self
    }

    /// Queues a non-success response from the service.
    pub fn with_service_error(self, status: u16, body: Option<Value>) -> Self {
        self.state()
            .responses
            .push_back(Err(TransportError::response(status, body)));
        self
    }

    /// Queues a local failure.
    pub fn with_request_error(self, error: Error) -> Self {
        self.state()
            .responses
            .push_back(Err(TransportError::Request(error)));
        self
    }

    /// Returns every request sent so far.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.state().requests.clone()
    }

    /// Returns the number of requests sent so far.
    pub fn call_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Wraps a clone of this transport into a [`TransportService`].
    pub fn into_service(self) -> TransportService {
        TransportService::new(self)
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<Value, TransportError> {
        let mut state = self.state();
        state.requests.push(request);
        state.responses.pop_front().unwrap_or_else(|| Ok(json!({})))
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        Ok(ServiceHealth::healthy())
    }
}

#[derive(Default)]
struct MockProviderState {
    requests: Vec<CreateEmbeddingRequest>,
    failure: Option<String>,
    empty: bool,
}

/// Embedding provider that returns deterministic vectors.
///
/// Item `i` gets a vector of `dimensions` values all equal to `i + 1`. The
/// data is returned in reverse order so callers have to sort by index.
#[derive(Clone)]
pub struct MockEmbeddingProvider {
    dimensions: usize,
    state: Arc<Mutex<MockProviderState>>,
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::new(3)
    }
}

impl MockEmbeddingProvider {
    /// Creates a provider producing vectors of the given size.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            state: Arc::default(),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockProviderState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Makes every call fail with the given message.
    pub fn failing(self, message: impl Into<String>) -> Self {
        self.state().failure = Some(message.into());
        self
    }

    /// Makes every call return no embedding data.
    pub fn empty(self) -> Self {
        self.state().empty = true;
        self
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<CreateEmbeddingRequest> {
        self.state().requests.clone()
    }

    /// Wraps a clone of this provider into an [`EmbeddingService`].
    pub fn into_service(self) -> EmbeddingService {
        EmbeddingService::new(self)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn create_embedding(
        &self,
        request: &CreateEmbeddingRequest,
    ) -> Result<CreateEmbeddingResponse> {
        let mut state = self.state();
        state.requests.push(request.clone());

        if let Some(message) = &state.failure {
            return Err(Error::external_error().with_message(message.clone()));
        }

        let count = if state.empty { 0 } else { request.input.len() };
        let data = (0..count)
            .rev()
            .map(|index| EmbeddingData {
                object: "embedding".to_owned(),
                index,
                embedding: vec![(index + 1) as f32; self.dimensions],
            })
            .collect();

        Ok(CreateEmbeddingResponse {
            object: "list".to_owned(),
            model: request.model.clone(),
            data,
            usage: EmbeddingUsage {
                prompt_tokens: count as u32,
                total_tokens: count as u32,
            },
        })
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        Ok(ServiceHealth::healthy())
    }
}
