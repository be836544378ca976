//! Reference to a collection by id or by name.

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

/// Identifies the target collection of a document or query request.
///
/// Flattened into request bodies as either `collection_id` or
/// `collection_name`. Exactly one is present on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSelector", into = "RawSelector")]
pub enum CollectionSelector {
    /// Select the collection by its id.
    Id(String),
    /// Select the collection by its name.
    Name(String),
}

impl CollectionSelector {
    /// Selects a collection by id.
    pub fn id(collection_id: impl Into<String>) -> Self {
        Self::Id(collection_id.into())
    }

    /// Selects a collection by name.
    pub fn name(collection_name: impl Into<String>) -> Self {
        Self::Name(collection_name.into())
    }

    /// Builds a selector from optional id and name, requiring exactly one.
    ///
    /// Empty strings count as absent.
    pub fn from_parts(
        collection_id: Option<String>,
        collection_name: Option<String>,
    ) -> Result<Self, ValidationError> {
        let collection_id = collection_id.filter(|s| !s.is_empty());
        let collection_name = collection_name.filter(|s| !s.is_empty());

        match (collection_id, collection_name) {
            (Some(id), None) => Ok(Self::Id(id)),
            (None, Some(name)) => Ok(Self::Name(name)),
            (None, None) => Err(ValidationError::NoCollectionValue),
            (Some(_), Some(_)) => Err(ValidationError::MultipleCollectionValues),
        }
    }

    /// Returns the collection id, if selected by id.
    pub fn collection_id(&self) -> Option<&str> {
        match self {
            Self::Id(id) => Some(id),
            Self::Name(_) => None,
        }
    }

    /// Returns the collection name, if selected by name.
    pub fn collection_name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Name(name) => Some(name),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    collection_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    collection_name: Option<String>,
}

impl TryFrom<RawSelector> for CollectionSelector {
    type Error = ValidationError;

    fn try_from(raw: RawSelector) -> Result<Self, Self::Error> {
        Self::from_parts(raw.collection_id, raw.collection_name)
    }
}

impl From<CollectionSelector> for RawSelector {
    fn from(selector: CollectionSelector) -> Self {
        match selector {
            CollectionSelector::Id(id) => Self {
                collection_id: Some(id),
                collection_name: None,
            },
            CollectionSelector::Name(name) => Self {
                collection_id: None,
                collection_name: Some(name),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_parts_requires_exactly_one() {
        assert_eq!(
            CollectionSelector::from_parts(None, None),
            Err(ValidationError::NoCollectionValue)
        );
        assert_eq!(
            CollectionSelector::from_parts(Some("c1".into()), Some("docs".into())),
            Err(ValidationError::MultipleCollectionValues)
        );
        assert_eq!(
            CollectionSelector::from_parts(Some(String::new()), Some("docs".into())),
            Ok(CollectionSelector::name("docs"))
        );
    }

    #[test]
    fn test_serializes_single_key() {
        let value = serde_json::to_value(CollectionSelector::id("c1")).unwrap();
        assert_eq!(value, json!({"collection_id": "c1"}));

        let value = serde_json::to_value(CollectionSelector::name("docs")).unwrap();
        assert_eq!(value, json!({"collection_name": "docs"}));
    }

    #[test]
    fn test_deserialize_reports_missing_selector() {
        let err = serde_json::from_value::<CollectionSelector>(json!({})).unwrap_err();
        assert!(err.to_string().contains("collection_id or collection_name"));
    }

    #[test]
    fn test_accessors() {
        let selector = CollectionSelector::id("c1");
        assert_eq!(selector.collection_id(), Some("c1"));
        assert_eq!(selector.collection_name(), None);
    }
}
