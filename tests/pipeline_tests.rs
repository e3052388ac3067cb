//! Integration tests for the graph pipeline and layouts

use std::collections::HashSet;

use memory_graph_view::layout::{
    circular_layout, compute_layout, simulate, LayoutParams, LayoutType, SeedPositions,
};
use memory_graph_view::pipeline::{deduplicate, filter_orphans, focus, neighborhood};
use memory_graph_view::types::{Entity, GraphData, GraphPayload, Relationship};
use memory_graph_view::{normalize, run_pipeline, ViewSettings, VisualPolicy};

fn sample_payload() -> GraphPayload {
    GraphPayload::with_data(
        vec![
            Entity::new("alice", "Alice", "person"),
            Entity::new("bob", "Bob", "person"),
            Entity::new("acme1", "Acme", "org"),
            Entity::new("acme2", "Acme", "org"),
            Entity::new("hanoi", "Hanoi", "place"),
            Entity::new("guess", "Guess", "person").with_attribute("inferred", true),
            Entity::new("lone", "Lone", "concept"),
        ],
        vec![
            Relationship::new("alice", "acme1", "works_at"),
            Relationship::new("bob", "acme2", "works_at"),
            Relationship::new("acme1", "acme2", "alias_of"),
            Relationship::new("acme2", "hanoi", "located_in"),
            Relationship::new("guess", "alice", "knows"),
            Relationship::new("alice", "alice", "self"),
            Relationship::new("bob", "ghost", "knows"),
        ],
    )
}

fn normalized() -> GraphData {
    let payload = sample_payload();
    normalize(&payload.entities, &payload.relationships, &VisualPolicy::default())
}

fn assert_well_formed(graph: &GraphData) {
    let ids = graph.node_ids();
    assert_eq!(ids.len(), graph.nodes.len(), "node ids must be unique");
    for link in &graph.links {
        assert!(ids.contains(link.source.as_str()), "dangling source {}", link.source);
        assert!(ids.contains(link.target.as_str()), "dangling target {}", link.target);
        assert!(!link.is_self_loop());
    }
    let mut triples = HashSet::new();
    for link in &graph.links {
        assert!(triples.insert(link.key()), "parallel link {:?}", link.key());
    }
}

#[test]
fn test_normalized_graph_is_well_formed() {
    let graph = normalized();
    assert_eq!(graph.nodes.len(), 7);
    // self-loop and the link to "ghost" are gone
    assert_eq!(graph.links.len(), 5);
    assert_well_formed(&graph);
}

#[test]
fn test_dedup_idempotent() {
    let once = deduplicate(&normalized());
    let twice = deduplicate(&once);
    assert_eq!(once, twice);
    assert_well_formed(&once);
}

#[test]
fn test_alias_pair_becomes_single_node() {
    let graph = normalize(
        &[Entity::new("a1", "Acme", "org"), Entity::new("a2", "Acme", "org")],
        &[Relationship::new("a1", "a2", "alias_of")],
        &VisualPolicy::default(),
    );
    let merged = deduplicate(&graph);
    assert_eq!(merged.nodes.len(), 1);
    assert!(merged.links.is_empty());
}

#[test]
fn test_orphan_filter_keeps_connected_pair() {
    let graph = normalize(
        &[
            Entity::new("n1", "One", "t"),
            Entity::new("n2", "Two", "t"),
            Entity::new("n3", "Three", "t"),
        ],
        &[Relationship::new("n1", "n2", "r")],
        &VisualPolicy::default(),
    );
    let kept = filter_orphans(&graph.nodes, &graph.links, false);
    let ids: Vec<&str> = kept.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["n1", "n2"]);

    let all = filter_orphans(&graph.nodes, &graph.links, true);
    assert_eq!(all.len(), 3);
}

#[test]
fn test_focus_is_sound() {
    let graph = deduplicate(&normalized());
    for node in &graph.nodes {
        let focused = focus(&graph, Some(node.id.as_str()));
        let allowed = neighborhood(&graph.links, node.id.as_str());

        assert!(focused.contains_node(&node.id));
        for n in &focused.nodes {
            assert!(allowed.contains(n.id.as_str()));
        }
        for link in &focused.links {
            assert!(allowed.contains(link.source.as_str()));
            assert!(allowed.contains(link.target.as_str()));
        }
        assert_well_formed(&focused);
    }
}

#[test]
fn test_pipeline_invariants_across_toggles() {
    let payload = sample_payload();
    for deduplicate in [false, true] {
        for show_orphans in [false, true] {
            for show_inferred in [false, true] {
                let settings = ViewSettings {
                    deduplicate,
                    show_orphans,
                    show_inferred,
                    layout_type: LayoutType::Circular,
                    ..ViewSettings::default()
                };
                let graph = run_pipeline(
                    &payload,
                    &settings,
                    &VisualPolicy::default(),
                    &SeedPositions::new(),
                );
                assert_well_formed(&graph);
                assert!(graph.nodes.iter().all(|n| n.x.is_some() && n.y.is_some()));
                assert_eq!(graph.contains_node("lone"), show_orphans);
                assert_eq!(graph.contains_node("guess"), show_inferred);
                assert_eq!(graph.contains_node("acme2"), !deduplicate);
            }
        }
    }
}

#[test]
fn test_hidden_inferred_node_orphans_its_neighbor() {
    let payload = GraphPayload::with_data(
        vec![
            Entity::new("a", "A", "t"),
            Entity::new("b", "B", "t").with_attribute("inferred", true),
        ],
        vec![Relationship::new("a", "b", "r")],
    );
    let settings = ViewSettings {
        show_inferred: false,
        ..ViewSettings::default()
    };
    let graph = run_pipeline(&payload, &settings, &VisualPolicy::default(), &SeedPositions::new());
    assert!(graph.is_empty());
}

#[test]
fn test_circular_four_nodes() {
    let params = LayoutParams {
        spacing: 100.0,
        ..LayoutParams::default()
    };
    let positions = circular_layout(4, &params);
    assert!((positions[0].x - 200.0).abs() < 1e-9);
    assert!((positions[0].y - 200.0).abs() < 1e-9);
    assert!((positions[2].x - 0.0).abs() < 1e-9);
    assert!((positions[2].y - 200.0).abs() < 1e-9);
}

fn ring_with_chords() -> GraphData {
    let entities: Vec<Entity> = (0..10)
        .map(|i| Entity::new(format!("n{}", i), format!("Node {}", i), "t"))
        .collect();
    let mut relationships: Vec<Relationship> = (0..10)
        .map(|i| Relationship::new(format!("n{}", i), format!("n{}", (i + 1) % 10), "next"))
        .collect();
    relationships.push(Relationship::new("n0", "n5", "chord"));
    relationships.push(Relationship::new("n2", "n7", "chord"));
    normalize(&entities, &relationships, &VisualPolicy::default())
}

#[test]
fn test_force_layout_deterministic() {
    let graph = ring_with_chords();
    assert_eq!(graph.links.len(), 12);

    let params = LayoutParams::default();
    let first = simulate(&graph, &params, &SeedPositions::new());
    let second = simulate(&graph, &params, &SeedPositions::new());

    assert_eq!(first.positions.len(), 10);
    for (a, b) in first.positions.iter().zip(&second.positions) {
        assert!((a.x - b.x).abs() < 1e-6);
        assert!((a.y - b.y).abs() < 1e-6);
    }
}

#[test]
fn test_every_layout_positions_every_node() {
    let graph = ring_with_chords();
    let params = LayoutParams::default();
    for layout in [LayoutType::Force, LayoutType::Hierarchical, LayoutType::Circular] {
        let positions = compute_layout(&graph, layout, &params, &SeedPositions::new());
        assert_eq!(positions.len(), graph.nodes.len(), "{}", layout);
        assert!(positions.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }
}

#[test]
fn test_empty_payload_yields_empty_graph() {
    for layout in [LayoutType::Force, LayoutType::Hierarchical, LayoutType::Circular] {
        let settings = ViewSettings {
            layout_type: layout,
            focus_id: Some("anything".to_string()),
            ..ViewSettings::default()
        };
        let graph = run_pipeline(
            &GraphPayload::default(),
            &settings,
            &VisualPolicy::default(),
            &SeedPositions::new(),
        );
        assert!(graph.is_empty());
        assert!(graph.links.is_empty());
    }
}
