//! Embedding content with OpenAI and inserting it into a collection.

use starpoint_core::openai::{
    BuildAndInsertEmbeddingsFromOpenAiRequest, BuildAndInsertEmbeddingsFromOpenAiResponse,
    BuildAndInsertEmbeddingsRequest, EmbeddingService,
};
use starpoint_core::{ApiResult, ErrorResponse};

use crate::writer::DocumentWriter;

/// Tracing target for the build-and-insert workflow.
pub const TRACING_TARGET: &str = "starpoint_client::openai";

/// Two-stage workflow: one provider call, then one column insert.
#[derive(Debug, Clone)]
pub struct EmbeddingPipeline {
    provider: EmbeddingService,
    writer: DocumentWriter,
}

impl EmbeddingPipeline {
    /// Combines an embedding provider with a document writer.
    pub fn new(provider: EmbeddingService, writer: DocumentWriter) -> Self {
        Self { provider, writer }
    }

    /// Returns the embedding provider.
    pub fn provider(&self) -> &EmbeddingService {
        &self.provider
    }

    /// Embeds the input and inserts one document per embedding.
    ///
    /// Without custom metadata each document gets `{"input": <item>}`. A
    /// failed insert is reported inside `starpoint_response`; the provider
    /// response is returned either way.
    pub async fn build_and_insert_embeddings_from_openai(
        &self,
        request: BuildAndInsertEmbeddingsFromOpenAiRequest,
    ) -> ApiResult<BuildAndInsertEmbeddingsFromOpenAiResponse> {
        let openai_response = match self
            .provider
            .create_embedding(&request.to_embedding_request())
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    model = %request.model,
                    error = %err,
                    "Embedding provider call failed"
                );
                return ApiResult::Error(ErrorResponse::from(err));
            }
        };

        if openai_response.data.is_empty() {
            tracing::warn!(
                target: TRACING_TARGET,
                model = %request.model,
                "No embeddings returned, nothing was inserted"
            );
            return ApiResult::Data(BuildAndInsertEmbeddingsFromOpenAiResponse {
                openai_response,
                starpoint_response: None,
            });
        }

        let metadatas = request
            .document_metadata
            .unwrap_or_else(|| request.input_data.default_metadata());
        let embeddings = openai_response.sorted_embeddings();

        let starpoint_response = self
            .writer
            .column_insert(embeddings, metadatas, request.collection)
            .await;

        if let ApiResult::Error(err) = &starpoint_response {
            tracing::warn!(
                target: TRACING_TARGET,
                error = %err.error_message,
                "Inserting embeddings failed"
            );
        }

        ApiResult::Data(BuildAndInsertEmbeddingsFromOpenAiResponse {
            openai_response,
            starpoint_response: Some(starpoint_response),
        })
    }

    /// Same as [`build_and_insert_embeddings_from_openai`] with the default
    /// model and no custom metadata.
    ///
    /// [`build_and_insert_embeddings_from_openai`]: Self::build_and_insert_embeddings_from_openai
    pub async fn build_and_insert_embeddings(
        &self,
        request: BuildAndInsertEmbeddingsRequest,
    ) -> ApiResult<BuildAndInsertEmbeddingsFromOpenAiResponse> {
        self.build_and_insert_embeddings_from_openai(request.into())
            .await
    }
}
