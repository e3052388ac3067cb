//! Circular placement

use std::f64::consts::TAU;

use super::{LayoutParams, Position};

/// Place `n` nodes on a circle of radius `r = 2 * spacing` centered at
/// `(r, r)`.
///
/// Node `i` sits at angle `i * 2π / n`. The first node anchors the center
/// of the ring; its angle-zero slot on the rim stays empty so every other
/// node keeps its `i * 2π / n` angle regardless of which node is first.
pub fn circular_layout(n: usize, params: &LayoutParams) -> Vec<Position> {
    let r = params.spacing * 2.0;
    let center = Position::new(r, r);

    (0..n)
        .map(|i| {
            if i == 0 {
                return center;
            }
            let angle = i as f64 * TAU / n as f64;
            Position::new(center.x + r * angle.cos(), center.y + r * angle.sin())
        })
        .collect()
}
