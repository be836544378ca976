//! Response types for building embeddings through OpenAI.

use serde::{Deserialize, Serialize};

use crate::envelope::ApiResult;
use crate::types::InsertResponse;

/// Body returned by the OpenAI embeddings endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateEmbeddingResponse {
    /// Object type, `list`.
    pub object: String,
    /// Model that produced the embeddings.
    pub model: String,
    /// One entry per input item, not necessarily in input order.
    pub data: Vec<EmbeddingData>,
    /// Token usage.
    pub usage: EmbeddingUsage,
}

impl CreateEmbeddingResponse {
    /// Returns the embedding vectors ordered by their input index.
    pub fn sorted_embeddings(&self) -> Vec<Vec<f32>> {
        let mut data: Vec<&EmbeddingData> = self.data.iter().collect();
        data.sort_by_key(|d| d.index);
        data.into_iter().map(|d| d.embedding.clone()).collect()
    }
}

/// A single embedding returned by OpenAI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingData {
    /// Object type, `embedding`.
    pub object: String,
    /// Position of the corresponding input item.
    pub index: usize,
    /// The embedding vector.
    pub embedding: Vec<f32>,
}

/// Token usage reported by OpenAI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingUsage {
    /// Tokens in the input.
    pub prompt_tokens: u32,
    /// Tokens billed.
    pub total_tokens: u32,
}

/// Outcome of initializing OpenAI support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitOpenAiResponse {
    /// Whether the provider is now ready.
    pub success: bool,
}

/// Both halves of a build-and-insert call.
///
/// `starpoint_response` is `None` when OpenAI returned no embeddings, so
/// nothing was inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildAndInsertEmbeddingsFromOpenAiResponse {
    /// Raw response of the embedding provider.
    pub openai_response: CreateEmbeddingResponse,
    /// Outcome of the insert into Starpoint.
    pub starpoint_response: Option<ApiResult<InsertResponse>>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_sorted_embeddings() {
        let response: CreateEmbeddingResponse = serde_json::from_value(json!({
            "object": "list",
            "model": "text-embedding-ada-002",
            "data": [
                {"object": "embedding", "index": 1, "embedding": [0.2]},
                {"object": "embedding", "index": 0, "embedding": [0.1]}
            ],
            "usage": {"prompt_tokens": 2, "total_tokens": 2}
        }))
        .unwrap();

        assert_eq!(response.sorted_embeddings(), vec![vec![0.1], vec![0.2]]);
        assert_eq!(response.usage.total_tokens, 2);
    }

    #[test]
    fn test_response_without_insert() {
        let response = BuildAndInsertEmbeddingsFromOpenAiResponse {
            openai_response: CreateEmbeddingResponse::default(),
            starpoint_response: None,
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["starpoint_response"], json!(null));
    }
}
