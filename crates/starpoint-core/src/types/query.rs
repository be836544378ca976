//! Query and schema inference contracts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::CollectionSelector;

/// Query against a collection by SQL, by similarity to an embedding, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Target collection.
    #[serde(flatten)]
    pub collection: CollectionSelector,
    /// Raw SQL to run against the collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    /// Embedding to rank documents against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_embedding: Option<Vec<f32>>,
    /// Values for parameterized SQL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<Value>>,
}

impl QueryRequest {
    /// Creates an empty query for a collection.
    pub fn new(collection: CollectionSelector) -> Self {
        Self {
            collection,
            sql: None,
            query_embedding: None,
            params: None,
        }
    }

    /// Sets the SQL statement.
    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    /// Sets the query embedding.
    pub fn with_query_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.query_embedding = Some(embedding);
        self
    }

    /// Sets the SQL parameters.
    pub fn with_params(mut self, params: Vec<Value>) -> Self {
        self.params = Some(params);
        self
    }
}

/// Body returned by a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryResponse {
    /// Collection that was queried.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    /// Number of rows returned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_count: Option<u64>,
    /// SQL that was executed, as reported by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    /// Result rows.
    pub results: Vec<Map<String, Value>>,
    /// Any other fields returned by the service.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request to infer the schema of a collection's metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferSchemaRequest {
    /// Target collection.
    #[serde(flatten)]
    pub collection: CollectionSelector,
}

impl InferSchemaRequest {
    /// Creates a schema inference request.
    pub fn new(collection: CollectionSelector) -> Self {
        Self { collection }
    }
}

/// Inferred column types and nullability, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferredSchema {
    /// Column name to inferred type.
    pub types: Map<String, Value>,
    /// Column name to nullability.
    pub nullability: Map<String, Value>,
}

/// Body returned by schema inference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferSchemaResponse {
    /// The inferred schema.
    pub inferred_schema: InferredSchema,
    /// Any other fields returned by the service.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
