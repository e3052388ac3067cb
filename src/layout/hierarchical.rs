//! BFS-leveled hierarchy

use std::collections::{HashMap, VecDeque};

use crate::types::GraphData;

use super::{LayoutParams, Position};

/// BFS level of every node, index-aligned with `data.nodes`.
///
/// Roots are nodes with no incoming link. Nodes still unreached after the
/// roots are exhausted (cycles) seed further searches in input order.
pub fn bfs_levels(data: &GraphData) -> Vec<usize> {
    let n = data.nodes.len();
    let index: HashMap<&str, usize> = data
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.as_str(), i))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut has_incoming = vec![false; n];
    for link in &data.links {
        if let (Some(&s), Some(&t)) = (
            index.get(link.source.as_str()),
            index.get(link.target.as_str()),
        ) {
            children[s].push(t);
            has_incoming[t] = true;
        }
    }

    let mut level: Vec<Option<usize>> = vec![None; n];
    let mut queue = VecDeque::new();

    for i in 0..n {
        if !has_incoming[i] {
            level[i] = Some(0);
            queue.push_back(i);
        }
    }
    drain(&mut queue, &children, &mut level);

    for i in 0..n {
        if level[i].is_none() {
            level[i] = Some(0);
            queue.push_back(i);
            drain(&mut queue, &children, &mut level);
        }
    }

    level.into_iter().map(|l| l.unwrap_or(0)).collect()
}

fn drain(queue: &mut VecDeque<usize>, children: &[Vec<usize>], level: &mut [Option<usize>]) {
    while let Some(current) = queue.pop_front() {
        let next = level[current].unwrap_or(0) + 1;
        for &child in &children[current] {
            if level[child].is_none() {
                level[child] = Some(next);
                queue.push_back(child);
            }
        }
    }
}

/// `y = level * vertical_spacing`, `x = ordinal_in_level * horizontal_spacing`
/// where the ordinal follows input order within each level.
pub fn hierarchical_layout(data: &GraphData, params: &LayoutParams) -> Vec<Position> {
    let levels = bfs_levels(data);
    let mut next_ordinal: HashMap<usize, usize> = HashMap::new();

    levels
        .iter()
        .map(|&level| {
            let ordinal = next_ordinal.entry(level).or_insert(0);
            let pos = Position::new(
                *ordinal as f64 * params.horizontal_spacing,
                level as f64 * params.vertical_spacing,
            );
            *ordinal += 1;
            pos
        })
        .collect()
}
