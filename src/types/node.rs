//! Render-ready graph nodes

use serde::{Deserialize, Serialize};

use super::{Attributes, Scalar, INFERRED_ATTRIBUTE};

/// Node derived from one entity (or one dedup group of entities)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub attributes: Attributes,
    pub color: String,
    pub degree: usize,
    pub size: f64,
    /// Set by the layout engine; `None` until layout runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl GraphNode {
    pub fn is_inferred(&self) -> bool {
        self.attributes
            .get(INFERRED_ATTRIBUTE)
            .and_then(Scalar::as_bool)
            .unwrap_or(false)
    }

    pub fn position(&self) -> Option<(f64, f64)> {
        self.x.zip(self.y)
    }
}
