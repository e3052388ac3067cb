//! Deduplicator
//!
//! Merges nodes sharing `(name, type)` into the first-seen node of the
//! group and rewrites links through the resulting id map.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::types::{GraphData, GraphLink, GraphNode};

/// Merge duplicate nodes. Idempotent: a second pass finds no duplicates and
/// no links left to collapse.
pub fn deduplicate(data: &GraphData) -> GraphData {
    let id_map = identity_map(data);

    let mut nodes: Vec<GraphNode> = Vec::new();
    let mut slot: HashMap<&str, usize> = HashMap::new();
    for node in &data.nodes {
        let canonical = id_map.get(node.id.as_str()).copied().unwrap_or(node.id.as_str());
        match slot.get(canonical) {
            Some(&idx) => {
                nodes[idx]
                    .attributes
                    .extend(node.attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            None => {
                slot.insert(canonical, nodes.len());
                nodes.push(node.clone());
            }
        }
    }

    let links: Vec<GraphLink> = data
        .links
        .iter()
        .filter_map(|link| {
            let source = *id_map.get(link.source.as_str())?;
            let target = *id_map.get(link.target.as_str())?;
            Some(GraphLink {
                source: source.to_string(),
                target: target.to_string(),
                ..link.clone()
            })
        })
        .collect();

    let merged = data.nodes.len() - nodes.len();
    if merged > 0 {
        debug!(merged, "Merged duplicate nodes");
    }

    GraphData::new(nodes, collapse_links(links))
}

/// `original id -> canonical id` for every node, not just duplicates
pub fn identity_map(data: &GraphData) -> HashMap<&str, &str> {
    let mut canonical_by_key: HashMap<(&str, &str), &str> = HashMap::new();
    let mut id_map = HashMap::with_capacity(data.nodes.len());

    for node in &data.nodes {
        let key = (node.name.as_str(), node.node_type.as_str());
        let canonical = *canonical_by_key.entry(key).or_insert(node.id.as_str());
        id_map.entry(node.id.as_str()).or_insert(canonical);
    }
    id_map
}

/// Drop self-loops and keep only the first link of each
/// `(source, target, type)` triple, preserving order.
pub fn collapse_links(links: Vec<GraphLink>) -> Vec<GraphLink> {
    let mut seen: HashSet<(String, String, String)> = HashSet::with_capacity(links.len());
    links
        .into_iter()
        .filter(|link| !link.is_self_loop())
        .filter(|link| {
            seen.insert((
                link.source.clone(),
                link.target.clone(),
                link.link_type.clone(),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize, VisualPolicy};
    use crate::types::{Entity, Relationship, Scalar};

    fn build(entities: Vec<Entity>, rels: Vec<Relationship>) -> GraphData {
        normalize(&entities, &rels, &VisualPolicy::default())
    }

    #[test]
    fn test_alias_pair_collapses_to_single_node() {
        let data = build(
            vec![Entity::new("a1", "Acme", "org"), Entity::new("a2", "Acme", "org")],
            vec![Relationship::new("a1", "a2", "alias_of")],
        );
        let out = deduplicate(&data);
        assert_eq!(out.nodes.len(), 1);
        assert_eq!(out.nodes[0].id, "a1");
        assert!(out.links.is_empty());
    }

    #[test]
    fn test_same_name_different_type_kept_apart() {
        let data = build(
            vec![Entity::new("j1", "Jaguar", "animal"), Entity::new("j2", "Jaguar", "company")],
            vec![],
        );
        assert_eq!(deduplicate(&data).nodes.len(), 2);
    }

    #[test]
    fn test_attributes_merged_later_wins() {
        let data = build(
            vec![
                Entity::new("a1", "Acme", "org")
                    .with_attribute("city", "Paris")
                    .with_attribute("size", 10.0),
                Entity::new("a2", "Acme", "org").with_attribute("size", 20.0),
                Entity::new("a3", "Acme", "org").with_attribute("ceo", "Bo"),
            ],
            vec![],
        );
        let out = deduplicate(&data);
        let attrs = &out.nodes[0].attributes;
        assert_eq!(attrs.get("city"), Some(&Scalar::from("Paris")));
        assert_eq!(attrs.get("size"), Some(&Scalar::Number(20.0)));
        assert_eq!(attrs.get("ceo"), Some(&Scalar::from("Bo")));
    }

    #[test]
    fn test_links_rewritten_and_collapsed() {
        let data = build(
            vec![
                Entity::new("p1", "Alice", "person"),
                Entity::new("a1", "Acme", "org"),
                Entity::new("a2", "Acme", "org"),
            ],
            vec![
                Relationship::new("p1", "a2", "works_at").with_label("first"),
                Relationship::new("p1", "a1", "works_at").with_label("second"),
                Relationship::new("a2", "p1", "employs"),
            ],
        );
        let out = deduplicate(&data);
        assert_eq!(out.nodes.len(), 2);
        assert_eq!(out.links.len(), 2);
        assert_eq!(out.links[0].source, "p1");
        assert_eq!(out.links[0].target, "a1");
        assert_eq!(out.links[0].label, "first");
        assert_eq!(out.links[1].source, "a1");
    }

    #[test]
    fn test_identity_map_is_total() {
        let data = build(
            vec![
                Entity::new("x", "X", "t"),
                Entity::new("y", "X", "t"),
                Entity::new("z", "Z", "t"),
            ],
            vec![],
        );
        let map = identity_map(&data);
        assert_eq!(map.len(), 3);
        assert_eq!(map["x"], "x");
        assert_eq!(map["y"], "x");
        assert_eq!(map["z"], "z");
    }

    #[test]
    fn test_idempotent() {
        let data = build(
            vec![
                Entity::new("a1", "Acme", "org").with_attribute("k", 1.0),
                Entity::new("p1", "Alice", "person"),
                Entity::new("a2", "Acme", "org").with_attribute("k", 2.0),
                Entity::new("p2", "Alice", "person"),
            ],
            vec![
                Relationship::new("p1", "a1", "works_at"),
                Relationship::new("p2", "a2", "works_at"),
                Relationship::new("p2", "p1", "same_as"),
            ],
        );
        let once = deduplicate(&data);
        let twice = deduplicate(&once);
        assert_eq!(once, twice);
        assert_eq!(once.nodes.len(), 2);
        assert_eq!(once.links.len(), 1);
    }

    #[test]
    fn test_collapse_links_keeps_first() {
        let mk = |label: &str, link_type: &str| GraphLink {
            source: "a".into(),
            target: "b".into(),
            link_type: link_type.into(),
            label: label.into(),
            strength: 0.5,
            color: String::new(),
            width: 1.0,
        };
        let links = collapse_links(vec![mk("one", "t"), mk("two", "t"), mk("three", "u")]);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].label, "one");
        assert_eq!(links[1].label, "three");
    }
}
