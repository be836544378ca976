//! Starpoint-hosted embedding operations.

use starpoint_core::types::{
    EmbedItem, EmbedItemsRequest, EmbedResponse, EmbedTextsRequest, EmbeddingModel, Metadata,
};
use starpoint_core::{ApiResult, EMBED_PATH, TransportRequest, TransportService};

/// Tracing target for embedding operations.
pub const TRACING_TARGET: &str = "starpoint_client::embedding";

/// Embeds texts with the models hosted on the embedding host.
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    transport: TransportService,
}

impl EmbeddingClient {
    /// Binds the client to a transport.
    pub fn new(transport: TransportService) -> Self {
        Self { transport }
    }

    /// Embeds plain texts.
    pub async fn embed(
        &self,
        text: Vec<String>,
        model: EmbeddingModel,
    ) -> ApiResult<EmbedResponse> {
        tracing::debug!(
            target: TRACING_TARGET,
            model = %model,
            texts = text.len(),
            "Embedding texts"
        );

        let request = EmbedTextsRequest { text, model };
        match TransportRequest::post(EMBED_PATH, &request) {
            Ok(request) => self.transport.call(request).await,
            Err(err) => ApiResult::from_error(err),
        }
    }

    /// Embeds items, returning each item's metadata with its embedding.
    pub async fn embed_items(
        &self,
        items: Vec<EmbedItem>,
        model: EmbeddingModel,
    ) -> ApiResult<EmbedResponse> {
        tracing::debug!(
            target: TRACING_TARGET,
            model = %model,
            items = items.len(),
            "Embedding items"
        );

        let request = EmbedItemsRequest { items, model };
        match TransportRequest::post(EMBED_PATH, &request) {
            Ok(request) => self.transport.call(request).await,
            Err(err) => ApiResult::from_error(err),
        }
    }

    /// Pairs texts with metadata positionally and embeds them.
    ///
    /// Columns of different lengths are truncated to the shorter one.
    pub async fn embed_and_join_metadata(
        &self,
        text: Vec<String>,
        metadatas: Vec<Metadata>,
        model: EmbeddingModel,
    ) -> ApiResult<EmbedResponse> {
        if text.len() != metadatas.len() {
            tracing::warn!(
                target: TRACING_TARGET,
                texts = text.len(),
                metadatas = metadatas.len(),
                "Column lengths differ, extra values will be dropped"
            );
        }

        let items = text
            .into_iter()
            .zip(metadatas)
            .map(|(text, metadata)| EmbedItem { text, metadata })
            .collect();
        self.embed_items(items, model).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use starpoint_core::mock::MockTransport;

    use super::*;

    #[tokio::test]
    async fn test_embed_texts() {
        let transport = MockTransport::new().with_response(json!({
            "results": [{"text": "hi", "embedding": [0.1, 0.2]}]
        }));
        let client = EmbeddingClient::new(transport.clone().into_service());

        let result = client
            .embed(vec!["hi".to_string()], EmbeddingModel::MiniLm)
            .await;

        assert_eq!(result.data().unwrap().results[0].embedding, vec![0.1, 0.2]);
        let requests = transport.requests();
        assert_eq!(requests[0].path, EMBED_PATH);
        assert_eq!(
            requests[0].body,
            Some(json!({"text": ["hi"], "model": "MiniLm"}))
        );
    }

    #[tokio::test]
    async fn test_embed_and_join_metadata() {
        let transport = MockTransport::new();
        let client = EmbeddingClient::new(transport.clone().into_service());

        let mut metadata = Metadata::new();
        metadata.insert("label".into(), json!("greeting"));

        let result = client
            .embed_and_join_metadata(
                vec!["hi".to_string(), "dropped".to_string()],
                vec![metadata],
                EmbeddingModel::MiniLm,
            )
            .await;

        assert!(result.is_data());
        assert_eq!(
            transport.requests()[0].body,
            Some(json!({
                "items": [{"text": "hi", "metadata": {"label": "greeting"}}],
                "model": "MiniLm"
            }))
        );
    }
}
