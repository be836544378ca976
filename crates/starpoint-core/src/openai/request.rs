//! Request types for building embeddings through OpenAI.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::types::{CollectionSelector, Metadata};

/// Model used when no model is given explicitly.
pub const DEFAULT_OPENAI_MODEL: &str = "text-embedding-ada-002";

/// Input accepted by the OpenAI embeddings endpoint.
///
/// Each item of a list input yields one embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    /// A single text.
    Text(String),
    /// Several texts.
    Texts(Vec<String>),
    /// A single pre-tokenized input.
    Tokens(Vec<u32>),
    /// Several pre-tokenized inputs.
    TokenLists(Vec<Vec<u32>>),
}

impl EmbeddingInput {
    /// Returns how many embeddings this input produces.
    pub fn len(&self) -> usize {
        match self {
            Self::Text(_) | Self::Tokens(_) => 1,
            Self::Texts(texts) => texts.len(),
            Self::TokenLists(lists) => lists.len(),
        }
    }

    /// Returns `true` if the input produces no embeddings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Metadata used when the caller supplies none: `{"input": <item>}` per item.
    pub fn default_metadata(&self) -> Vec<Metadata> {
        let items: Vec<Value> = match self {
            Self::Text(text) => vec![json!(text)],
            Self::Texts(texts) => texts.iter().map(|t| json!(t)).collect(),
            Self::Tokens(tokens) => vec![json!(tokens)],
            Self::TokenLists(lists) => lists.iter().map(|l| json!(l)).collect(),
        };

        items
            .into_iter()
            .map(|item| {
                let mut metadata = Metadata::new();
                metadata.insert("input".to_owned(), item);
                metadata
            })
            .collect()
    }
}

impl From<&str> for EmbeddingInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for EmbeddingInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for EmbeddingInput {
    fn from(texts: Vec<String>) -> Self {
        Self::Texts(texts)
    }
}

/// Body sent to the OpenAI embeddings endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEmbeddingRequest {
    /// Embedding model id.
    pub model: String,
    /// Content to embed.
    pub input: EmbeddingInput,
    /// End-user identifier forwarded to OpenAI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl CreateEmbeddingRequest {
    /// Creates a request for the given model and input.
    pub fn new(model: impl Into<String>, input: impl Into<EmbeddingInput>) -> Self {
        Self {
            model: model.into(),
            input: input.into(),
            user: None,
        }
    }

    /// Sets the end-user identifier.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

/// Credentials used to initialize OpenAI support.
///
/// Exactly one of the two fields must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitOpenAiRequest {
    /// OpenAI API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_key: Option<String>,
    /// Path to a file containing the OpenAI API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_key_filepath: Option<PathBuf>,
}

impl InitOpenAiRequest {
    /// Initializes from a key.
    pub fn from_key(key: impl Into<String>) -> Self {
        Self {
            openai_key: Some(key.into()),
            openai_key_filepath: None,
        }
    }

    /// Initializes from a key file.
    pub fn from_key_file(path: impl Into<PathBuf>) -> Self {
        Self {
            openai_key: None,
            openai_key_filepath: Some(path.into()),
        }
    }
}

/// Request to embed content with the default model and insert it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildAndInsertEmbeddingsRequest {
    /// Target collection.
    #[serde(flatten)]
    pub collection: CollectionSelector,
    /// Content to embed.
    pub input_data: EmbeddingInput,
}

/// Request to embed content with an OpenAI model and insert it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildAndInsertEmbeddingsFromOpenAiRequest {
    /// Target collection.
    #[serde(flatten)]
    pub collection: CollectionSelector,
    /// OpenAI embedding model id.
    pub model: String,
    /// Content to embed.
    pub input_data: EmbeddingInput,
    /// Metadata for each embedded item, in input order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_metadata: Option<Vec<Metadata>>,
    /// End-user identifier forwarded to OpenAI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_user: Option<String>,
}

impl BuildAndInsertEmbeddingsFromOpenAiRequest {
    /// Creates a request without custom metadata or user tag.
    pub fn new(
        collection: CollectionSelector,
        model: impl Into<String>,
        input_data: impl Into<EmbeddingInput>,
    ) -> Self {
        Self {
            collection,
            model: model.into(),
            input_data: input_data.into(),
            document_metadata: None,
            openai_user: None,
        }
    }

    /// Sets per-item document metadata.
    pub fn with_document_metadata(mut self, metadata: Vec<Metadata>) -> Self {
        self.document_metadata = Some(metadata);
        self
    }

    /// Sets the OpenAI end-user identifier.
    pub fn with_openai_user(mut self, user: impl Into<String>) -> Self {
        self.openai_user = Some(user.into());
        self
    }

    /// Builds the body sent to OpenAI.
    pub fn to_embedding_request(&self) -> CreateEmbeddingRequest {
        CreateEmbeddingRequest {
            model: self.model.clone(),
            input: self.input_data.clone(),
            user: self.openai_user.clone(),
        }
    }
}

impl From<BuildAndInsertEmbeddingsRequest> for BuildAndInsertEmbeddingsFromOpenAiRequest {
    fn from(request: BuildAndInsertEmbeddingsRequest) -> Self {
        Self::new(request.collection, DEFAULT_OPENAI_MODEL, request.input_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_untagged_forms() {
        let input: EmbeddingInput = serde_json::from_value(json!("hello")).unwrap();
        assert_eq!(input, EmbeddingInput::Text("hello".into()));

        let input: EmbeddingInput = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(input.len(), 2);

        let input: EmbeddingInput = serde_json::from_value(json!([1, 2, 3])).unwrap();
        assert_eq!(input, EmbeddingInput::Tokens(vec![1, 2, 3]));

        let input: EmbeddingInput = serde_json::from_value(json!([[1], [2]])).unwrap();
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn test_default_metadata() {
        let metadata = EmbeddingInput::Texts(vec!["a".into(), "b".into()]).default_metadata();
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata[1].get("input"), Some(&json!("b")));

        let metadata = EmbeddingInput::Tokens(vec![1, 2]).default_metadata();
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata[0].get("input"), Some(&json!([1, 2])));
    }

    #[test]
    fn test_default_model_conversion() {
        let request = BuildAndInsertEmbeddingsRequest {
            collection: CollectionSelector::name("docs"),
            input_data: "hello".into(),
        };

        let request = BuildAndInsertEmbeddingsFromOpenAiRequest::from(request);
        assert_eq!(request.model, DEFAULT_OPENAI_MODEL);
        assert!(request.document_metadata.is_none());
    }

    #[test]
    fn test_embedding_request_body() {
        let request = BuildAndInsertEmbeddingsFromOpenAiRequest::new(
            CollectionSelector::id("c1"),
            "text-embedding-3-small",
            "hello",
        )
        .with_openai_user("user-1");

        assert_eq!(
            serde_json::to_value(request.to_embedding_request()).unwrap(),
            json!({"model": "text-embedding-3-small", "input": "hello", "user": "user-1"})
        );
    }
}
