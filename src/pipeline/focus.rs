//! Focus extractor: 1-hop induced subgraph around one node

use std::collections::HashSet;

use tracing::debug;

use crate::types::{GraphData, GraphLink};

/// `{id}` plus every node sharing a link with it
pub fn neighborhood<'a>(links: &'a [GraphLink], id: &'a str) -> HashSet<&'a str> {
    let mut set: HashSet<&str> = HashSet::new();
    set.insert(id);
    for link in links {
        if link.source == id {
            set.insert(link.target.as_str());
        } else if link.target == id {
            set.insert(link.source.as_str());
        }
    }
    set
}

/// Restrict `data` to the focus node and its direct neighbors.
///
/// `None` is the identity. An id missing from `data` (filtered out or never
/// present) degrades to the unfocused graph instead of an empty one.
pub fn focus(data: &GraphData, focus_id: Option<&str>) -> GraphData {
    let Some(id) = focus_id else {
        return data.clone();
    };
    if !data.contains_node(id) {
        debug!(focus = id, "Focus node not in graph, showing unfocused view");
        return data.clone();
    }

    let keep = neighborhood(&data.links, id);
    let nodes = data
        .nodes
        .iter()
        .filter(|node| keep.contains(node.id.as_str()))
        .cloned()
        .collect();
    let links = data
        .links
        .iter()
        .filter(|link| keep.contains(link.source.as_str()) && keep.contains(link.target.as_str()))
        .cloned()
        .collect();

    GraphData::new(nodes, links)
}
