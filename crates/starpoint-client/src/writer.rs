//! Document write operations.

use starpoint_core::types::{
    CollectionSelector, DeleteDocumentsRequest, DeleteResponse, Document, InsertDocumentsRequest,
    InsertResponse, Metadata, UpdateDocumentsRequest, UpdateResponse,
};
use starpoint_core::{ApiResult, DOCUMENTS_PATH, TransportRequest, TransportService};

/// Tracing target for document write operations.
pub const TRACING_TARGET: &str = "starpoint_client::writer";

/// Inserts, updates and deletes documents on the writer host.
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    transport: TransportService,
}

impl DocumentWriter {
    /// Binds the writer to a transport.
    pub fn new(transport: TransportService) -> Self {
        Self { transport }
    }

    /// Inserts documents with `POST /api/v1/documents`.
    pub async fn insert(&self, request: InsertDocumentsRequest) -> ApiResult<InsertResponse> {
        tracing::debug!(
            target: TRACING_TARGET,
            collection = ?request.collection,
            documents = request.documents.len(),
            "Inserting documents"
        );

        match TransportRequest::post(DOCUMENTS_PATH, &request) {
            Ok(request) => self.transport.call(request).await,
            Err(err) => ApiResult::from_error(err),
        }
    }

    /// Replaces document metadata with `PATCH /api/v1/documents`.
    pub async fn update(&self, request: UpdateDocumentsRequest) -> ApiResult<UpdateResponse> {
        tracing::debug!(
            target: TRACING_TARGET,
            collection = ?request.collection,
            documents = request.documents.len(),
            "Updating documents"
        );

        match TransportRequest::patch(DOCUMENTS_PATH, &request) {
            Ok(request) => self.transport.call(request).await,
            Err(err) => ApiResult::from_error(err),
        }
    }

    /// Deletes documents by id with `DELETE /api/v1/documents`.
    pub async fn delete(&self, request: DeleteDocumentsRequest) -> ApiResult<DeleteResponse> {
        tracing::debug!(
            target: TRACING_TARGET,
            collection = ?request.collection,
            documents = request.documents.len(),
            "Deleting documents"
        );

        match TransportRequest::delete(DOCUMENTS_PATH, &request) {
            Ok(request) => self.transport.call(request).await,
            Err(err) => ApiResult::from_error(err),
        }
    }

    /// Pairs embeddings with metadata positionally and inserts them.
    ///
    /// Columns of different lengths are truncated to the shorter one.
    pub async fn column_insert(
        &self,
        embeddings: Vec<Vec<f32>>,
        metadatas: Vec<Metadata>,
        collection: CollectionSelector,
    ) -> ApiResult<InsertResponse> {
        if embeddings.len() != metadatas.len() {
            tracing::warn!(
                target: TRACING_TARGET,
                embeddings = embeddings.len(),
                metadatas = metadatas.len(),
                "Column lengths differ, extra values will be dropped"
            );
        }

        let request = InsertDocumentsRequest {
            collection,
            documents: Document::zip_columns(embeddings, metadatas),
        };
        self.insert(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use starpoint_core::Method;
    use starpoint_core::mock::MockTransport;
    use starpoint_core::types::DocumentUpdate;

    use super::*;

    fn metadata(value: serde_json::Value) -> Metadata {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("metadata must be an object"),
        }
    }

    #[tokio::test]
    async fn test_insert_posts_documents() {
        let transport = MockTransport::new().with_response(json!({
            "collection_id": "c1",
            "documents": [{"id": "d1"}]
        }));
        let writer = DocumentWriter::new(transport.clone().into_service());

        let request = InsertDocumentsRequest {
            collection: CollectionSelector::name("docs"),
            documents: vec![Document::new(vec![0.5, 1.5], metadata(json!({"a": 1})))],
        };
        let result = writer.insert(request).await;

        assert_eq!(result.data().unwrap().documents[0].id, "d1");
        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].path, DOCUMENTS_PATH);
        assert_eq!(
            requests[0].body,
            Some(json!({
                "collection_name": "docs",
                "documents": [{"embedding": [0.5, 1.5], "metadata": {"a": 1}}]
            }))
        );
    }

    #[tokio::test]
    async fn test_update_uses_patch() {
        let transport = MockTransport::new();
        let writer = DocumentWriter::new(transport.clone().into_service());

        let request = UpdateDocumentsRequest {
            collection: CollectionSelector::id("c1"),
            documents: vec![DocumentUpdate {
                id: "d1".into(),
                metadata: metadata(json!({"b": 2})),
            }],
        };
        assert!(writer.update(request).await.is_data());
        assert_eq!(transport.requests()[0].method, Method::Patch);
    }

    #[tokio::test]
    async fn test_delete_sends_ids_in_body() {
        let transport = MockTransport::new();
        let writer = DocumentWriter::new(transport.clone().into_service());

        let request = DeleteDocumentsRequest {
            collection: CollectionSelector::id("c1"),
            documents: vec!["d1".into(), "d2".into()],
        };
        assert!(writer.delete(request).await.is_data());

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Delete);
        assert_eq!(
            requests[0].body,
            Some(json!({"collection_id": "c1", "documents": ["d1", "d2"]}))
        );
    }

    #[tokio::test]
    async fn test_column_insert_truncates_to_shorter_column() {
        let transport = MockTransport::new();
        let writer = DocumentWriter::new(transport.clone().into_service());

        let result = writer
            .column_insert(
                vec![vec![1.0], vec![2.0], vec![3.0]],
                vec![metadata(json!({"n": 1})), metadata(json!({"n": 2}))],
                CollectionSelector::id("c1"),
            )
            .await;

        assert!(result.is_data());
        let body = transport.requests()[0].body.clone().unwrap();
        assert_eq!(body["documents"].as_array().unwrap().len(), 2);
        assert_eq!(body["documents"][1], json!({"embedding": [2.0], "metadata": {"n": 2}}));
    }

    #[tokio::test]
    async fn test_insert_service_error() {
        let transport = MockTransport::new()
            .with_service_error(404, Some(json!({"error_message": "collection not found"})));
        let writer = DocumentWriter::new(transport.into_service());

        let request = InsertDocumentsRequest {
            collection: CollectionSelector::name("missing"),
            documents: Vec::new(),
        };
        let result = writer.insert(request).await;

        assert_eq!(result.error().unwrap().error_message, "collection not found");
    }
}
