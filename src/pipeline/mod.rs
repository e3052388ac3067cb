//! Graph pipeline
//!
//! payload → normalize → deduplicate (optional) → inferred / orphan filter
//! → focus (optional) → degree & size → layout.
//!
//! Every stage takes its input by reference and returns a fresh
//! collection; nothing is shared between the filtered and unfiltered views.

mod dedup;
mod filter;
mod focus;

pub use dedup::{collapse_links, deduplicate, identity_map};
pub use filter::{connected_ids, filter_inferred, filter_orphans, retain_links};
pub use focus::{focus, neighborhood};

use std::collections::HashMap;

use tracing::debug;

use crate::layout::{apply_layout, SeedPositions};
use crate::normalize::{normalize, VisualPolicy};
use crate::types::{GraphData, GraphPayload};
use crate::view::ViewSettings;

/// Run every stage for one payload and one set of toggles.
///
/// Pure: the same payload, settings and seeds always produce the same
/// graph. Never fails; an empty payload yields an empty graph.
pub fn run_pipeline(
    payload: &GraphPayload,
    settings: &ViewSettings,
    policy: &VisualPolicy,
    seeds: &SeedPositions,
) -> GraphData {
    let normalized = normalize(&payload.entities, &payload.relationships, policy);

    let merged = if settings.deduplicate {
        deduplicate(&normalized)
    } else {
        normalized
    };

    let visible = filter_inferred(&merged, settings.show_inferred);
    let nodes = filter_orphans(&visible.nodes, &visible.links, settings.show_orphans);
    let filtered = GraphData::new(nodes, visible.links);

    let focused = focus(&filtered, settings.focus_id.as_deref());

    let mut graph = assign_degrees(focused, policy);
    apply_layout(&mut graph, settings.layout_type, &settings.params, seeds);

    debug!(
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        layout = %settings.layout_type,
        "Pipeline finished"
    );
    graph
}

/// Count incident links per node in the final link set and size nodes
/// accordingly. Links with a missing endpoint are dropped first.
pub fn assign_degrees(data: GraphData, policy: &VisualPolicy) -> GraphData {
    let GraphData { mut nodes, links } = data;
    let links = retain_links(&nodes, &links);

    let mut degree: HashMap<&str, usize> = HashMap::new();
    for link in &links {
        *degree.entry(link.source.as_str()).or_insert(0) += 1;
        *degree.entry(link.target.as_str()).or_insert(0) += 1;
    }

    for node in nodes.iter_mut() {
        node.degree = degree.get(node.id.as_str()).copied().unwrap_or(0);
        node.size = policy.node_size(node.degree);
    }

    GraphData::new(nodes, links)
}
