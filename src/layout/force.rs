//! Force-directed layout
//!
//! A velocity-based simulation with a decaying `alpha` ("temperature"):
//! every tick applies link springs, pairwise repulsion, centering and
//! collision, then integrates with velocity damping. `alpha` decays from 1
//! to `ALPHA_MIN` over the first two thirds of the iteration budget. The
//! remaining ticks apply no forces and only bleed off velocity, so the
//! simulation settles inside the budget however many pairs push on a node.
//!
//! There is no wall-clock or unseeded randomness anywhere in here: initial
//! positions come from the seed map or from `StdRng::seed_from_u64`.

use std::collections::HashMap;
use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::types::GraphData;

use super::{LayoutParams, Position, SeedPositions};

const ALPHA_MIN: f64 = 0.001;
/// Fraction of velocity kept after each tick
const VELOCITY_RETENTION: f64 = 0.6;
/// Max per-tick displacement below which the layout counts as settled
pub const VELOCITY_EPSILON: f64 = 0.01;
const COLLISION_STRENGTH: f64 = 0.7;
const MIN_DISTANCE_SQ: f64 = 1.0;

/// Result of a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct ForceOutcome {
    pub positions: Vec<Position>,
    /// Ticks actually executed
    pub iterations: usize,
    /// Whether the max velocity dropped below `VELOCITY_EPSILON`
    pub converged: bool,
}

/// Force layout positions, index-aligned with `data.nodes`
pub fn force_layout(data: &GraphData, params: &LayoutParams, seeds: &SeedPositions) -> Vec<Position> {
    simulate(data, params, seeds).positions
}

/// Run the simulation. Oscillating graphs are not an error: whatever
/// positions exist when the budget runs out are returned.
pub fn simulate(data: &GraphData, params: &LayoutParams, seeds: &SeedPositions) -> ForceOutcome {
    let params = params.normalized();
    let n = data.nodes.len();

    match n {
        0 => {
            return ForceOutcome {
                positions: Vec::new(),
                iterations: 0,
                converged: true,
            }
        }
        1 => {
            return ForceOutcome {
                positions: vec![params.center()],
                iterations: 0,
                converged: true,
            }
        }
        _ => {}
    }

    let index: HashMap<&str, usize> = data
        .nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.as_str(), i))
        .collect();

    let edges: Vec<(usize, usize)> = data
        .links
        .iter()
        .filter_map(|link| {
            let s = *index.get(link.source.as_str())?;
            let t = *index.get(link.target.as_str())?;
            (s != t).then_some((s, t))
        })
        .collect();

    let springs = Springs::new(n, &edges);
    let radii: Vec<f64> = data
        .nodes
        .iter()
        .map(|node| node.size.max(0.0) + params.collision_padding)
        .collect();

    let mut positions = initial_positions(data, &edges, &params, seeds);
    let mut velocities = vec![Position::default(); n];

    let active_ticks = heating_ticks(params.iterations);
    let alpha_decay = 1.0 - ALPHA_MIN.powf(1.0 / active_ticks as f64);
    let mut alpha = 1.0;
    let mut iterations = 0;
    let mut converged = false;

    for tick in 0..params.iterations {
        iterations += 1;

        if tick < active_ticks {
            alpha -= alpha * alpha_decay;
            apply_forces(&positions, &mut velocities, &springs, &radii, &params, alpha);
        }

        let mut max_speed: f64 = 0.0;
        for (p, v) in positions.iter_mut().zip(velocities.iter_mut()) {
            v.x *= VELOCITY_RETENTION;
            v.y *= VELOCITY_RETENTION;
            p.x += v.x;
            p.y += v.y;
            max_speed = max_speed.max((v.x * v.x + v.y * v.y).sqrt());
        }

        if max_speed < VELOCITY_EPSILON {
            converged = true;
            break;
        }
    }

    debug!(nodes = n, links = edges.len(), iterations, converged, "Force simulation finished");

    ForceOutcome {
        positions,
        iterations,
        converged,
    }
}

/// Ticks during which forces act; `alpha` reaches `ALPHA_MIN` on the last
/// of them. Never the whole budget when it has more than one tick.
fn heating_ticks(iterations: usize) -> usize {
    (iterations * 2 / 3).max(1)
}

/// One tick of springs, repulsion, centering and collision into `velocities`
fn apply_forces(
    positions: &[Position],
    velocities: &mut [Position],
    springs: &Springs<'_>,
    radii: &[f64],
    params: &LayoutParams,
    alpha: f64,
) {
    springs.apply(positions, velocities, params.link_distance, alpha);

    let repulsion = repulsion(positions, params.force_strength, alpha);
    for (v, (fx, fy)) in velocities.iter_mut().zip(repulsion) {
        v.x += fx;
        v.y += fy;
    }

    if params.center_force > 0.0 {
        let center = params.center();
        let k = params.center_force * alpha;
        for (v, p) in velocities.iter_mut().zip(positions) {
            v.x += (center.x - p.x) * k;
            v.y += (center.y - p.y) * k;
        }
    }

    collide(positions, velocities, radii);
}

/// Link spring coefficients, precomputed from node degrees
struct Springs<'a> {
    edges: &'a [(usize, usize)],
    strength: Vec<f64>,
    bias: Vec<f64>,
}

impl<'a> Springs<'a> {
    fn new(n: usize, edges: &'a [(usize, usize)]) -> Self {
        let mut count = vec![0usize; n];
        for &(s, t) in edges {
            count[s] += 1;
            count[t] += 1;
        }

        // Hubs get softer springs so they are not dragged by every neighbor
        let strength = edges
            .iter()
            .map(|&(s, t)| 1.0 / count[s].min(count[t]).max(1) as f64)
            .collect();
        let bias = edges
            .iter()
            .map(|&(s, t)| count[s] as f64 / (count[s] + count[t]) as f64)
            .collect();

        Self {
            edges,
            strength,
            bias,
        }
    }

    fn apply(&self, positions: &[Position], velocities: &mut [Position], distance: f64, alpha: f64) {
        for (e, &(s, t)) in self.edges.iter().enumerate() {
            let mut dx = positions[t].x + velocities[t].x - positions[s].x - velocities[s].x;
            let dy = positions[t].y + velocities[t].y - positions[s].y - velocities[s].y;
            if dx == 0.0 && dy == 0.0 {
                dx = jiggle(t, s);
            }
            let l = (dx * dx + dy * dy).sqrt();
            let k = (l - distance) / l * alpha * self.strength[e];
            let (fx, fy) = (dx * k, dy * k);
            let b = self.bias[e];

            velocities[t].x -= fx * b;
            velocities[t].y -= fy * b;
            velocities[s].x += fx * (1.0 - b);
            velocities[s].y += fy * (1.0 - b);
        }
    }
}

/// Velocity change from pairwise repulsion. `strength` is negative; the
/// coefficient falls off with the squared distance.
///
/// Each node sums over all others in index order, so the parallel result
/// is identical to a sequential one.
fn repulsion(positions: &[Position], strength: f64, alpha: f64) -> Vec<(f64, f64)> {
    positions
        .par_iter()
        .enumerate()
        .map(|(i, p)| {
            let (mut fx, mut fy) = (0.0, 0.0);
            for (j, q) in positions.iter().enumerate() {
                if i == j {
                    continue;
                }
                let mut dx = q.x - p.x;
                let dy = q.y - p.y;
                if dx == 0.0 && dy == 0.0 {
                    dx = jiggle(j, i);
                }
                let l = (dx * dx + dy * dy).max(MIN_DISTANCE_SQ);
                let w = strength * alpha / l;
                fx += dx * w;
                fy += dy * w;
            }
            (fx, fy)
        })
        .collect()
}

/// Push apart node discs that overlap after this tick's velocity
fn collide(positions: &[Position], velocities: &mut [Position], radii: &[f64]) {
    let n = positions.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let r = radii[i] + radii[j];
            let mut dx = positions[i].x + velocities[i].x - positions[j].x - velocities[j].x;
            let dy = positions[i].y + velocities[i].y - positions[j].y - velocities[j].y;
            let l2 = dx * dx + dy * dy;
            if l2 >= r * r {
                continue;
            }
            if dx == 0.0 && dy == 0.0 {
                dx = jiggle(i, j);
            }
            let l = (dx * dx + dy * dy).sqrt();
            let k = (r - l) / l * COLLISION_STRENGTH;
            let (ri2, rj2) = (radii[i] * radii[i], radii[j] * radii[j]);
            let wi = if ri2 + rj2 > 0.0 { rj2 / (ri2 + rj2) } else { 0.5 };

            velocities[i].x += dx * k * wi;
            velocities[i].y += dy * k * wi;
            velocities[j].x -= dx * k * (1.0 - wi);
            velocities[j].y -= dy * k * (1.0 - wi);
        }
    }
}

/// Deterministic tie-breaker for coincident points; antisymmetric in its
/// arguments so the two nodes separate in opposite directions.
fn jiggle(a: usize, b: usize) -> f64 {
    if a >= b {
        0.5
    } else {
        -0.5
    }
}

/// Seeds where available. A new node with a seeded neighbor starts near that
/// neighbor; the rest are scattered around the viewport center.
fn initial_positions(
    data: &GraphData,
    edges: &[(usize, usize)],
    params: &LayoutParams,
    seeds: &SeedPositions,
) -> Vec<Position> {
    let n = data.nodes.len();
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut positions: Vec<Option<Position>> = data
        .nodes
        .iter()
        .map(|node| {
            seeds
                .get(&node.id)
                .copied()
                .filter(|p| p.x.is_finite() && p.y.is_finite())
        })
        .collect();
    let seeded = positions.clone();

    let mut anchor: Vec<Option<usize>> = vec![None; n];
    for &(s, t) in edges {
        if seeded[s].is_none() && seeded[t].is_some() && anchor[s].is_none() {
            anchor[s] = Some(t);
        }
        if seeded[t].is_none() && seeded[s].is_some() && anchor[t].is_none() {
            anchor[t] = Some(s);
        }
    }

    let center = params.center();
    let spread = params.link_distance * (n as f64).sqrt() * 0.5;

    for i in 0..n {
        if positions[i].is_some() {
            continue;
        }
        let angle = rng.gen::<f64>() * TAU;
        let pos = match anchor[i].and_then(|a| seeded[a]) {
            Some(near) => {
                let r = params.link_distance * (0.5 + 0.5 * rng.gen::<f64>());
                Position::new(near.x + r * angle.cos(), near.y + r * angle.sin())
            }
            None => {
                let r = spread * rng.gen::<f64>().sqrt();
                Position::new(center.x + r * angle.cos(), center.y + r * angle.sin())
            }
        };
        positions[i] = Some(pos);
    }

    positions.into_iter().map(|p| p.unwrap_or(center)).collect()
}
