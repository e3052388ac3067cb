//! Entity records as stored in the memory index

use serde::{Deserialize, Serialize};

use super::{Attributes, Scalar, INFERRED_ATTRIBUTE, UNKNOWN_TYPE};

/// Entity in the memory index. Identity for deduplication is `(name, type)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    #[serde(
        rename = "type",
        alias = "entityType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl Entity {
    /// Create a new entity with no attributes
    pub fn new(id: impl Into<String>, name: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entity_type: Some(entity_type.into()),
            attributes: Attributes::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Category tag, falling back to `"unknown"`
    pub fn type_or_unknown(&self) -> &str {
        match self.entity_type.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => UNKNOWN_TYPE,
        }
    }

    /// Whether the entity was synthesized rather than extracted
    pub fn is_inferred(&self) -> bool {
        self.attributes
            .get(INFERRED_ATTRIBUTE)
            .and_then(Scalar::as_bool)
            .unwrap_or(false)
    }
}
