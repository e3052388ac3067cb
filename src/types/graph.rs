//! Graph container types

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{Entity, GraphLink, GraphNode, Relationship};

/// Raw payload as fetched from the memory index
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GraphPayload {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default, alias = "relations")]
    pub relationships: Vec<Relationship>,
}

impl GraphPayload {
    /// Create an empty payload
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a payload with entities and relationships
    pub fn with_data(entities: Vec<Entity>, relationships: Vec<Relationship>) -> Self {
        Self {
            entities,
            relationships,
        }
    }

    /// Check if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relationships.is_empty()
    }

    /// Get the number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get the number of relationships
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }
}

/// Render-ready graph: the output of every pipeline stage
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub links: Vec<GraphLink>,
}

impl GraphData {
    pub fn new(nodes: Vec<GraphNode>, links: Vec<GraphLink>) -> Self {
        Self { nodes, links }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Per-type counts for nodes and links
    pub fn stats(&self) -> GraphStats {
        let mut node_types: BTreeMap<&str, usize> = BTreeMap::new();
        for node in &self.nodes {
            *node_types.entry(node.node_type.as_str()).or_insert(0) += 1;
        }

        let mut link_types: BTreeMap<&str, usize> = BTreeMap::new();
        for link in &self.links {
            *link_types.entry(link.link_type.as_str()).or_insert(0) += 1;
        }

        GraphStats {
            node_count: self.nodes.len(),
            link_count: self.links.len(),
            node_types: TypeCount::from_map(node_types),
            link_types: TypeCount::from_map(link_types),
        }
    }
}

/// Summary counts of a published graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphStats {
    pub node_count: usize,
    pub link_count: usize,
    pub node_types: Vec<TypeCount>,
    pub link_types: Vec<TypeCount>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub type_name: String,
    pub count: usize,
}

impl TypeCount {
    fn from_map(map: BTreeMap<&str, usize>) -> Vec<TypeCount> {
        map.into_iter()
            .map(|(type_name, count)| TypeCount {
                type_name: type_name.to_string(),
                count,
            })
            .collect()
    }
}
