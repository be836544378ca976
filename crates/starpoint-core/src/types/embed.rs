//! Contracts of the Starpoint embedding endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display};

use super::Metadata;

/// Embedding models hosted by Starpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(Serialize, Deserialize, AsRefStr, Display)]
pub enum EmbeddingModel {
    /// MiniLM sentence transformer.
    #[default]
    #[serde(rename = "MiniLm")]
    #[strum(serialize = "MiniLm")]
    MiniLm,
}

/// A text paired with the metadata to join onto its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedItem {
    /// Text to embed.
    pub text: String,
    /// Metadata returned alongside the embedding.
    #[serde(default)]
    pub metadata: Metadata,
}

/// Request embedding plain texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedTextsRequest {
    /// Texts to embed.
    pub text: Vec<String>,
    /// Model to embed with.
    pub model: EmbeddingModel,
}

/// Request embedding items that carry metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedItemsRequest {
    /// Items to embed.
    pub items: Vec<EmbedItem>,
    /// Model to embed with.
    pub model: EmbeddingModel,
}

/// One embedded text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddedItem {
    /// The embedded text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// The embedding vector.
    pub embedding: Vec<f32>,
    /// Metadata joined onto the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body returned by the embedding endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedResponse {
    /// Embedded texts in request order.
    pub results: Vec<EmbeddedItem>,
    /// Any other fields returned by the service.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_model_wire_name() {
        assert_eq!(
            serde_json::to_value(EmbeddingModel::MiniLm).unwrap(),
            json!("MiniLm")
        );
        assert_eq!(EmbeddingModel::MiniLm.to_string(), "MiniLm");
    }

    #[test]
    fn test_items_request_body() {
        let request = EmbedItemsRequest {
            items: vec![EmbedItem {
                text: "hello".into(),
                metadata: Metadata::new(),
            }],
            model: EmbeddingModel::MiniLm,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"items": [{"text": "hello", "metadata": {}}], "model": "MiniLm"})
        );
    }
}
