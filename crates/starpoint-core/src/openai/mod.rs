//! Embedding-provider abstractions.
//!
//! Describes the two-stage workflow of asking an external provider for
//! embeddings and inserting the vectors into a Starpoint collection. The
//! HTTP implementation lives in `starpoint-reqwest`; orchestration lives in
//! `starpoint-client`.

mod request;
mod response;

use std::fmt;
use std::sync::Arc;

pub use request::{
    BuildAndInsertEmbeddingsFromOpenAiRequest, BuildAndInsertEmbeddingsRequest,
    CreateEmbeddingRequest, DEFAULT_OPENAI_MODEL, EmbeddingInput, InitOpenAiRequest,
};
pub use response::{
    BuildAndInsertEmbeddingsFromOpenAiResponse, CreateEmbeddingResponse, EmbeddingData,
    EmbeddingUsage, InitOpenAiResponse,
};

use crate::{Result, ServiceHealth};

/// Tracing target for embedding provider operations.
pub const TRACING_TARGET: &str = "starpoint_core::openai";

/// Core trait for embedding providers.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Creates embeddings for the request's input.
    async fn create_embedding(
        &self,
        request: &CreateEmbeddingRequest,
    ) -> Result<CreateEmbeddingResponse>;

    /// Performs a health check on the provider.
    async fn health_check(&self) -> Result<ServiceHealth>;
}

/// Cloneable, type-erased embedding provider.
#[derive(Clone)]
pub struct EmbeddingService {
    inner: Arc<dyn EmbeddingProvider>,
}

impl fmt::Debug for EmbeddingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingService").finish_non_exhaustive()
    }
}

impl EmbeddingService {
    /// Wraps a provider implementation.
    pub fn new(provider: impl EmbeddingProvider + 'static) -> Self {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Creates embeddings through the wrapped provider.
    pub async fn create_embedding(
        &self,
        request: &CreateEmbeddingRequest,
    ) -> Result<CreateEmbeddingResponse> {
        tracing::debug!(
            target: TRACING_TARGET,
            model = %request.model,
            items = request.input.len(),
            "Creating embeddings"
        );
        self.inner.create_embedding(request).await
    }

    /// Performs a health check on the wrapped provider.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        self.inner.health_check().await
    }
}
