//! Connectivity filter: orphan and inferred-node visibility

use std::collections::HashSet;

use tracing::debug;

use crate::types::{GraphData, GraphLink, GraphNode};

/// Ids of nodes with at least one incident link
pub fn connected_ids(links: &[GraphLink]) -> HashSet<&str> {
    links
        .iter()
        .flat_map(|link| [link.source.as_str(), link.target.as_str()])
        .collect()
}

/// Remove nodes without incident links unless `keep_orphans` is set.
///
/// Links are untouched: an orphan has no links by definition.
pub fn filter_orphans(nodes: &[GraphNode], links: &[GraphLink], keep_orphans: bool) -> Vec<GraphNode> {
    if keep_orphans {
        return nodes.to_vec();
    }
    let connected = connected_ids(links);
    let kept: Vec<GraphNode> = nodes
        .iter()
        .filter(|node| connected.contains(node.id.as_str()))
        .cloned()
        .collect();

    if kept.len() < nodes.len() {
        debug!(removed = nodes.len() - kept.len(), "Filtered orphan nodes");
    }
    kept
}

/// Hide nodes flagged `inferred: true` together with every link touching
/// them. Unlike orphans, inferred nodes may be well connected.
pub fn filter_inferred(data: &GraphData, show_inferred: bool) -> GraphData {
    if show_inferred {
        return data.clone();
    }
    let nodes: Vec<GraphNode> = data
        .nodes
        .iter()
        .filter(|node| !node.is_inferred())
        .cloned()
        .collect();
    let links = retain_links(&nodes, &data.links);
    GraphData::new(nodes, links)
}

/// Links whose endpoints are both in `nodes`
pub fn retain_links(nodes: &[GraphNode], links: &[GraphLink]) -> Vec<GraphLink> {
    let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    links
        .iter()
        .filter(|link| ids.contains(link.source.as_str()) && ids.contains(link.target.as_str()))
        .cloned()
        .collect()
}
