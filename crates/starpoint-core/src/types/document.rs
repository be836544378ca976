//! Document insert, update and delete contracts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::CollectionSelector;

/// Free-form document metadata.
pub type Metadata = Map<String, Value>;

/// A vector together with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The embedding vector.
    pub embedding: Vec<f32>,
    /// Metadata stored alongside the vector.
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    /// Creates a document.
    pub fn new(embedding: Vec<f32>, metadata: Metadata) -> Self {
        Self {
            embedding,
            metadata,
        }
    }

    /// Pairs embeddings with metadata positionally.
    ///
    /// The result is as long as the shorter column.
    pub fn zip_columns(
        embeddings: impl IntoIterator<Item = Vec<f32>>,
        metadatas: impl IntoIterator<Item = Metadata>,
    ) -> Vec<Self> {
        embeddings
            .into_iter()
            .zip(metadatas)
            .map(|(embedding, metadata)| Self::new(embedding, metadata))
            .collect()
    }
}

/// New metadata for an existing document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentUpdate {
    /// Id of the document to update.
    pub id: String,
    /// Replacement metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

/// Request to insert documents into a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertDocumentsRequest {
    /// Target collection.
    #[serde(flatten)]
    pub collection: CollectionSelector,
    /// Documents to insert.
    pub documents: Vec<Document>,
}

/// Request to update documents of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDocumentsRequest {
    /// Target collection.
    #[serde(flatten)]
    pub collection: CollectionSelector,
    /// Documents to update.
    pub documents: Vec<DocumentUpdate>,
}

/// Request to remove documents from a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteDocumentsRequest {
    /// Target collection.
    #[serde(flatten)]
    pub collection: CollectionSelector,
    /// Ids of the documents to remove.
    pub documents: Vec<String>,
}

/// Reference to a document returned by the writer endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentRef {
    /// Document id.
    pub id: String,
    /// Any other fields returned by the service.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body returned by the document endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsResponse {
    /// Collection the documents belong to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    /// Documents affected by the operation.
    pub documents: Vec<DocumentRef>,
    /// Any other fields returned by the service.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body returned after inserting documents.
pub type InsertResponse = DocumentsResponse;

/// Body returned after updating documents.
pub type UpdateResponse = DocumentsResponse;

/// Body returned after deleting documents.
pub type DeleteResponse = DocumentsResponse;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn metadata(label: &str) -> Metadata {
        let mut map = Metadata::new();
        map.insert("label".into(), json!(label));
        map
    }

    #[test]
    fn test_zip_columns_truncates() {
        let documents = Document::zip_columns(
            vec![vec![0.1, 0.2], vec![0.3, 0.4], vec![0.5, 0.6]],
            vec![metadata("a"), metadata("b")],
        );

        assert_eq!(documents.len(), 2);
        assert_eq!(documents[1].embedding, vec![0.3, 0.4]);
        assert_eq!(documents[1].metadata, metadata("b"));
    }

    #[test]
    fn test_insert_request_body() {
        let request = InsertDocumentsRequest {
            collection: CollectionSelector::name("docs"),
            documents: vec![Document::new(vec![1.0], metadata("a"))],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "collection_name": "docs",
                "documents": [{"embedding": [1.0], "metadata": {"label": "a"}}]
            })
        );
    }

    #[test]
    fn test_delete_request_roundtrip_from_wire() {
        let request: DeleteDocumentsRequest =
            serde_json::from_value(json!({"collection_id": "c1", "documents": ["d1"]})).unwrap();

        assert_eq!(request.collection, CollectionSelector::id("c1"));
        assert_eq!(request.documents, vec!["d1".to_string()]);
    }

    #[test]
    fn test_documents_response_defaults() {
        let response: DocumentsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.documents.is_empty());
        assert!(response.collection_id.is_none());
    }
}
