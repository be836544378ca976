//! Collection lifecycle requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validation::ValidationError;

/// Request to create a named, fixed-dimensionality collection.
///
/// `dimensionality` is optional so that a missing value can be told apart
/// from a non-positive one during validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateCollectionRequest {
    /// Collection name. Empty means missing.
    #[serde(default)]
    pub name: String,
    /// Number of dimensions of every vector in the collection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensionality: Option<i64>,
    /// Optional collection metadata forwarded as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl CreateCollectionRequest {
    /// Creates a request with a name and dimensionality.
    pub fn new(name: impl Into<String>, dimensionality: i64) -> Self {
        Self {
            name: name.into(),
            dimensionality: Some(dimensionality),
            metadata: None,
        }
    }

    /// Sets the collection metadata.
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Checks the request. The first failing check wins: name, then
    /// dimensionality presence, then dimensionality sign.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        match self.dimensionality {
            None => Err(ValidationError::MissingDimensionality),
            Some(d) if d <= 0 => Err(ValidationError::NonPositiveDimensionality),
            Some(_) => Ok(()),
        }
    }
}

/// Body returned after creating a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateCollectionResponse {
    /// Id assigned by the service.
    pub id: String,
    /// Collection name.
    pub name: String,
    /// Collection dimensionality.
    pub dimensionality: i64,
    /// Any other fields returned by the service.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request to delete a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteCollectionRequest {
    /// Id of the collection to delete. Empty means missing.
    #[serde(default)]
    pub collection_id: String,
}

impl DeleteCollectionRequest {
    /// Creates a delete request for the given collection id.
    pub fn new(collection_id: impl Into<String>) -> Self {
        Self {
            collection_id: collection_id.into(),
        }
    }

    /// Checks that a collection id is present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.collection_id.is_empty() {
            return Err(ValidationError::MissingCollectionId);
        }
        Ok(())
    }
}

/// Body returned after deleting a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteCollectionResponse {
    /// Id of the deleted collection, when the service reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Any other fields returned by the service.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_validate_order() {
        let request = CreateCollectionRequest {
            name: String::new(),
            dimensionality: Some(0),
            metadata: None,
        };
        assert_eq!(request.validate(), Err(ValidationError::MissingName));

        let request = CreateCollectionRequest {
            name: "x".into(),
            dimensionality: None,
            metadata: None,
        };
        assert_eq!(request.validate(), Err(ValidationError::MissingDimensionality));

        for dimensionality in [0, -1] {
            let request = CreateCollectionRequest::new("x", dimensionality);
            assert_eq!(
                request.validate(),
                Err(ValidationError::NonPositiveDimensionality)
            );
        }

        assert!(CreateCollectionRequest::new("x", 3).validate().is_ok());
    }

    #[test]
    fn test_create_request_from_json_with_null_dimensionality() {
        let request: CreateCollectionRequest =
            serde_json::from_value(json!({"name": "x", "dimensionality": null})).unwrap();
        assert_eq!(request.dimensionality, None);
    }

    #[test]
    fn test_create_request_body() {
        let value = serde_json::to_value(CreateCollectionRequest::new("x", 3)).unwrap();
        assert_eq!(value, json!({"name": "x", "dimensionality": 3}));
    }

    #[test]
    fn test_delete_request_validate() {
        assert_eq!(
            DeleteCollectionRequest::default().validate(),
            Err(ValidationError::MissingCollectionId)
        );
        assert!(DeleteCollectionRequest::new("c1").validate().is_ok());
    }

    #[test]
    fn test_create_response_keeps_unknown_fields() {
        let response: CreateCollectionResponse = serde_json::from_value(
            json!({"id": "c1", "name": "x", "dimensionality": 3, "created_at": "now"}),
        )
        .unwrap();

        assert_eq!(response.id, "c1");
        assert_eq!(response.extra.get("created_at"), Some(&json!("now")));
    }
}
