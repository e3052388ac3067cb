//! Layout Engine
//!
//! Computes 2-D coordinates for a filtered graph under one of three
//! strategies. Every strategy is deterministic for a fixed graph, fixed
//! parameters and (for `force`) fixed seed positions.

mod circular;
mod force;
mod hierarchical;

pub use circular::circular_layout;
pub use force::{force_layout, simulate, ForceOutcome};
pub use hierarchical::{bfs_levels, hierarchical_layout};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GraphViewError;
use crate::types::GraphData;

/// Previously published positions keyed by node id
pub type SeedPositions = HashMap<String, Position>;

/// Selectable layout strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    #[default]
    Force,
    Hierarchical,
    Circular,
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutType::Force => "force",
            LayoutType::Hierarchical => "hierarchical",
            LayoutType::Circular => "circular",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for LayoutType {
    type Err = GraphViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "force" => Ok(LayoutType::Force),
            "hierarchical" | "tree" => Ok(LayoutType::Hierarchical),
            "circular" | "circle" => Ok(LayoutType::Circular),
            other => Err(GraphViewError::InvalidSetting(format!(
                "unknown layout type '{}'",
                other
            ))),
        }
    }
}

/// A 2-D point
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Tunable layout parameters.
///
/// Force parameters are clamped into their working ranges by
/// [`LayoutParams::normalized`] before a simulation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Circular layout spacing; the circle radius is `2 * spacing`
    pub spacing: f64,
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    /// Repulsion between every node pair, negative means repel
    pub force_strength: f64,
    /// Rest length of link springs
    pub link_distance: f64,
    /// Pull toward the viewport center, `0` spreads freely
    pub center_force: f64,
    pub iterations: usize,
    /// Seed for randomized initial placement
    pub seed: u64,
    pub width: f64,
    pub height: f64,
    /// Extra gap kept between node discs
    pub collision_padding: f64,
}

pub const FORCE_STRENGTH_RANGE: (f64, f64) = (-2000.0, -100.0);
pub const LINK_DISTANCE_RANGE: (f64, f64) = (50.0, 800.0);
pub const MAX_ITERATIONS: usize = 1000;

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            spacing: 100.0,
            horizontal_spacing: 150.0,
            vertical_spacing: 100.0,
            force_strength: -300.0,
            link_distance: 150.0,
            center_force: 0.05,
            iterations: 300,
            seed: 42,
            width: 800.0,
            height: 600.0,
            collision_padding: 2.0,
        }
    }
}

impl LayoutParams {
    /// Copy with every force parameter clamped into its working range
    pub fn normalized(&self) -> Self {
        let defaults = LayoutParams::default();
        Self {
            force_strength: clamp_or(self.force_strength, FORCE_STRENGTH_RANGE, defaults.force_strength),
            link_distance: clamp_or(self.link_distance, LINK_DISTANCE_RANGE, defaults.link_distance),
            center_force: clamp_or(self.center_force, (0.0, 1.0), defaults.center_force),
            iterations: self.iterations.clamp(1, MAX_ITERATIONS),
            collision_padding: clamp_or(self.collision_padding, (0.0, 100.0), defaults.collision_padding),
            ..self.clone()
        }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }
}

fn clamp_or(value: f64, (lo, hi): (f64, f64), fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        fallback
    }
}

/// Positions for every node of `data`, index-aligned with `data.nodes`
pub fn compute_layout(
    data: &GraphData,
    layout_type: LayoutType,
    params: &LayoutParams,
    seeds: &SeedPositions,
) -> Vec<Position> {
    match layout_type {
        LayoutType::Force => force_layout(data, params, seeds),
        LayoutType::Hierarchical => hierarchical_layout(data, params),
        LayoutType::Circular => circular_layout(data.nodes.len(), params),
    }
}

/// Run a layout and write the coordinates onto the nodes
pub fn apply_layout(
    data: &mut GraphData,
    layout_type: LayoutType,
    params: &LayoutParams,
    seeds: &SeedPositions,
) {
    let positions = compute_layout(data, layout_type, params, seeds);
    for (node, pos) in data.nodes.iter_mut().zip(positions) {
        node.x = Some(pos.x);
        node.y = Some(pos.y);
    }
}
