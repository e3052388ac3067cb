//! Relationship records between entities

use serde::{Deserialize, Serialize};

/// Strength used when a relationship carries none
pub const DEFAULT_STRENGTH: f64 = 0.5;

/// Directed, typed connection between two entities (by id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(alias = "from")]
    pub source: String,
    #[serde(alias = "to")]
    pub target: String,
    #[serde(rename = "type", alias = "relationType")]
    pub relationship_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
}

impl Relationship {
    /// Create a new relationship with default label and strength
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        relationship_type: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            relationship_type: relationship_type.into(),
            label: None,
            strength: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = Some(strength);
        self
    }

    /// Display label, defaulting to the relationship type
    pub fn label_or_type(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.relationship_type)
    }

    /// Strength clamped to `[0, 1]`; missing or non-finite values become 0.5
    pub fn effective_strength(&self) -> f64 {
        match self.strength {
            Some(s) if s.is_finite() => s.clamp(0.0, 1.0),
            _ => DEFAULT_STRENGTH,
        }
    }
}
