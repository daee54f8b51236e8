// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clamping corner radii so that rounded corners fit their edges.
//!
//! A rounded corner is drawn by backing off from the vertex along both adjacent edges and joining
//! the two tangent points with an arc. Two corners share each edge, so neither may take more than
//! half of it.

use crate::geometry::distance;
use crate::kurbo::{Point, Vec2};

/// The radius a corner at `p` may use along the edge `p -> q`.
///
/// This is `fixed_radius`, unless the edge is too short to fit two such corners, in which case it
/// is half the edge length.
pub fn edge_radius(p: Point, q: Point, fixed_radius: f64) -> f64 {
    let length = distance(p, q);
    if length <= fixed_radius * 2.0 {
        length / 2.0
    } else {
        fixed_radius
    }
}

/// The radius of the rounded corner at `corner`, clamped against both adjacent edges.
pub fn corner_radius(before: Point, corner: Point, after: Point, fixed_radius: f64) -> f64 {
    edge_radius(corner, before, fixed_radius).min(edge_radius(corner, after, fixed_radius))
}

/// The offset from a corner towards the next point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// Offset from the start of the edge to the tangent point of its corner.
    pub step: Vec2,
    /// Whether a straight segment remains between the two tangent points on the edge.
    ///
    /// When this is false, the corners at both ends of the edge meet at its midpoint.
    pub draw_segment: bool,
}

/// Compute the offset of length `radius` from `a` towards `b`.
///
/// If the edge is no longer than two radii, the offset is half the edge and no straight segment
/// remains.
pub fn step(a: Point, b: Point, radius: f64) -> Step {
    let delta = b - a;
    let length = delta.hypot();
    if length <= radius * 2.0 {
        Step {
            step: delta / 2.0,
            draw_segment: false,
        }
    } else {
        Step {
            step: delta * (radius / length),
            draw_segment: true,
        }
    }
}
