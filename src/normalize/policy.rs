//! Visual policy: colors, node sizes and link widths
//!
//! One table owned by the normalizer and shared by every view, so colors
//! for a type never drift between renderings.

use std::collections::HashMap;

/// Color for node types missing from the palette
pub const NEUTRAL_NODE_COLOR: &str = "#9e9e9e";

/// Color for link types missing from the palette
pub const NEUTRAL_LINK_COLOR: &str = "#b0b0b0";

const NODE_PALETTE: &[(&str, &str)] = &[
    ("person", "#4e79a7"),
    ("organization", "#f28e2b"),
    ("org", "#f28e2b"),
    ("company", "#f28e2b"),
    ("location", "#59a14f"),
    ("place", "#59a14f"),
    ("event", "#e15759"),
    ("concept", "#76b7b2"),
    ("topic", "#76b7b2"),
    ("product", "#edc948"),
    ("technology", "#b07aa1"),
    ("document", "#ff9da7"),
    ("project", "#9c755f"),
    ("module", "#9c755f"),
    ("feature", "#86bcb6"),
    ("bug", "#d37295"),
    ("decision", "#a0cbe8"),
    ("requirement", "#8cd17d"),
    ("memory", "#bab0ac"),
];

const LINK_PALETTE: &[(&str, &str)] = &[
    ("alias_of", "#d3d3d3"),
    ("works_at", "#f28e2b"),
    ("works_for", "#f28e2b"),
    ("located_in", "#59a14f"),
    ("part_of", "#9c755f"),
    ("contains", "#9c755f"),
    ("depends_on", "#b07aa1"),
    ("related_to", "#76b7b2"),
    ("relates_to", "#76b7b2"),
    ("knows", "#4e79a7"),
    ("mentions", "#edc948"),
];

/// Pure lookup policy for the visual attributes of nodes and links
#[derive(Debug, Clone)]
pub struct VisualPolicy {
    node_colors: HashMap<String, String>,
    link_colors: HashMap<String, String>,
    pub min_node_size: f64,
    pub max_node_size: f64,
    pub size_per_degree: f64,
    pub min_link_width: f64,
    pub max_link_width: f64,
}

impl Default for VisualPolicy {
    fn default() -> Self {
        Self {
            node_colors: to_map(NODE_PALETTE),
            link_colors: to_map(LINK_PALETTE),
            min_node_size: 4.0,
            max_node_size: 20.0,
            size_per_degree: 3.0,
            min_link_width: 1.0,
            max_link_width: 4.0,
        }
    }
}

impl VisualPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override or add a node color for a type (case-insensitive)
    pub fn with_node_color(mut self, node_type: &str, color: impl Into<String>) -> Self {
        self.node_colors.insert(node_type.to_lowercase(), color.into());
        self
    }

    pub fn with_link_color(mut self, link_type: &str, color: impl Into<String>) -> Self {
        self.link_colors.insert(link_type.to_lowercase(), color.into());
        self
    }

    /// Color for a node type. Total: unknown types get the neutral color.
    pub fn node_color(&self, node_type: &str) -> &str {
        self.node_colors
            .get(&node_type.to_lowercase())
            .map(String::as_str)
            .unwrap_or(NEUTRAL_NODE_COLOR)
    }

    /// Color for a link type. Total: unknown types get the neutral color.
    pub fn link_color(&self, link_type: &str) -> &str {
        self.link_colors
            .get(&link_type.to_lowercase())
            .map(String::as_str)
            .unwrap_or(NEUTRAL_LINK_COLOR)
    }

    /// Node size, monotonic in degree and clamped to `[min, max]`
    pub fn node_size(&self, degree: usize) -> f64 {
        (self.min_node_size + self.size_per_degree * (degree as f64).sqrt())
            .clamp(self.min_node_size, self.max_node_size)
    }

    /// Link width from a strength in `[0, 1]`
    pub fn link_width(&self, strength: f64) -> f64 {
        let strength = if strength.is_finite() {
            strength.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.min_link_width + (self.max_link_width - self.min_link_width) * strength
    }
}

fn to_map(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
