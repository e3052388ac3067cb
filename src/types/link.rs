//! Render-ready graph links

use serde::{Deserialize, Serialize};

/// Link between two canonical node ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub link_type: String,
    pub label: String,
    pub strength: f64,
    pub color: String,
    pub width: f64,
}

impl GraphLink {
    /// Identity used for parallel-edge collapsing
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.source, &self.target, &self.link_type)
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Whether `id` is one of the endpoints
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }
}
