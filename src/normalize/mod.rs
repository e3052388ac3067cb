//! Entity Normalizer
//!
//! Maps raw entities and relationships to typed graph nodes and links and
//! assigns visual attributes through a [`VisualPolicy`].

mod policy;

pub use policy::{VisualPolicy, NEUTRAL_LINK_COLOR, NEUTRAL_NODE_COLOR};

use std::collections::HashSet;

use tracing::debug;

use crate::pipeline::collapse_links;
use crate::types::{Entity, GraphData, GraphLink, GraphNode, Relationship};

/// Convert entities and relationships into graph nodes and links.
///
/// Relationships to unknown ids are dropped. Repeated entity ids keep the
/// first occurrence. Self-loops and parallel links with the same
/// `(source, target, type)` are removed here so every later stage starts
/// from a clean link set.
pub fn normalize(
    entities: &[Entity],
    relationships: &[Relationship],
    policy: &VisualPolicy,
) -> GraphData {
    let mut seen: HashSet<&str> = HashSet::with_capacity(entities.len());
    let mut nodes = Vec::with_capacity(entities.len());

    for entity in entities {
        if !seen.insert(entity.id.as_str()) {
            debug!(id = %entity.id, "Skipping repeated entity id");
            continue;
        }
        nodes.push(to_node(entity, policy));
    }

    let links: Vec<GraphLink> = relationships
        .iter()
        .filter(|rel| seen.contains(rel.source.as_str()) && seen.contains(rel.target.as_str()))
        .map(|rel| to_link(rel, policy))
        .collect();

    let dangling = relationships.len() - links.len();
    if dangling > 0 {
        debug!(dangling, "Dropped relationships with unknown endpoints");
    }

    GraphData::new(nodes, collapse_links(links))
}

fn to_node(entity: &Entity, policy: &VisualPolicy) -> GraphNode {
    let node_type = entity.type_or_unknown().to_string();
    GraphNode {
        id: entity.id.clone(),
        name: entity.name.clone(),
        color: policy.node_color(&node_type).to_string(),
        node_type,
        attributes: entity.attributes.clone(),
        degree: 0,
        size: policy.node_size(0),
        x: None,
        y: None,
    }
}

fn to_link(rel: &Relationship, policy: &VisualPolicy) -> GraphLink {
    let strength = rel.effective_strength();
    GraphLink {
        source: rel.source.clone(),
        target: rel.target.clone(),
        link_type: rel.relationship_type.clone(),
        label: rel.label_or_type().to_string(),
        strength,
        color: policy.link_color(&rel.relationship_type).to_string(),
        width: policy.link_width(strength),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities() -> Vec<Entity> {
        vec![
            Entity::new("p1", "Alice", "person"),
            Entity::new("o1", "Acme", "org"),
            Entity {
                id: "x1".to_string(),
                name: "Mystery".to_string(),
                entity_type: None,
                attributes: Default::default(),
            },
        ]
    }

    #[test]
    fn test_one_node_per_entity() {
        let data = normalize(&entities(), &[], &VisualPolicy::default());
        assert_eq!(data.nodes.len(), 3);
        assert_eq!(data.nodes[0].id, "p1");
        assert_eq!(data.nodes[2].node_type, "unknown");
        assert_eq!(data.nodes[2].color, NEUTRAL_NODE_COLOR);
        assert!(data.nodes.iter().all(|n| n.x.is_none() && n.y.is_none()));
    }

    #[test]
    fn test_dangling_relationships_dropped() {
        let rels = vec![
            Relationship::new("p1", "o1", "works_at"),
            Relationship::new("p1", "ghost", "knows"),
            Relationship::new("ghost", "o1", "owns"),
        ];
        let data = normalize(&entities(), &rels, &VisualPolicy::default());
        assert_eq!(data.links.len(), 1);
        assert_eq!(data.links[0].label, "works_at");
        assert_eq!(data.links[0].width, 2.5);
    }

    #[test]
    fn test_self_loops_and_parallel_links_removed() {
        let rels = vec![
            Relationship::new("p1", "p1", "knows"),
            Relationship::new("p1", "o1", "works_at").with_label("first"),
            Relationship::new("p1", "o1", "works_at").with_label("second"),
            Relationship::new("p1", "o1", "owns"),
        ];
        let data = normalize(&entities(), &rels, &VisualPolicy::default());
        assert_eq!(data.links.len(), 2);
        assert_eq!(data.links[0].label, "first");
    }

    #[test]
    fn test_repeated_entity_id_keeps_first() {
        let mut list = entities();
        list.push(Entity::new("p1", "Alice Again", "person"));
        let data = normalize(&list, &[], &VisualPolicy::default());
        assert_eq!(data.nodes.len(), 3);
        assert_eq!(data.nodes[0].name, "Alice");
    }

    #[test]
    fn test_empty_input() {
        let data = normalize(&[], &[], &VisualPolicy::default());
        assert!(data.is_empty());
        assert!(data.links.is_empty());
    }
}
