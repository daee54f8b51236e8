// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compiling curve points into a shape path.

use crate::codec::parse_curve_points;
use crate::corner::{corner_radius, step, Step};
use crate::{CurveMode, CurvePoint, Error, Frame, ParsedCurvePoint, ShapePath};

/// Compile persisted curve points into a closed path in absolute coordinates.
///
/// Every straight corner is rounded by `fixed_radius`, clamped so that it takes at most half of
/// each adjacent edge. The per-point [`CurvePoint::corner_radius`] is not consulted.
///
/// Returns [`Error::EmptyPath`] for an empty list, or the first error from decoding the points.
pub fn compile_path(
    points: &[CurvePoint],
    frame: &Frame,
    fixed_radius: f64,
) -> Result<ShapePath, Error> {
    let points = parse_curve_points(points, frame)?;
    compile_parsed_path(&points, fixed_radius)
}

/// Compile curve points which are already in absolute coordinates.
///
/// See [`compile_path`].
pub fn compile_parsed_path(
    points: &[ParsedCurvePoint],
    fixed_radius: f64,
) -> Result<ShapePath, Error> {
    if points.is_empty() {
        return Err(Error::EmptyPath);
    }
    let len = points.len();
    // Each point is visited together with its neighbours, wrapping around the end of the list.
    let window = |i: usize| (&points[i], &points[(i + 1) % len], &points[(i + 2) % len]);

    let mut path = ShapePath::with_capacity(len * 2 + 2);

    // Start where the wrap-around window's segment ends rather than at `current.point + offset`.
    // The last window then draws that segment without retracing it, and the subpath ends exactly
    // where it began.
    let (prev, current, next) = window(len - 1);
    if next.curve_mode == CurveMode::Straight {
        let radius = corner_radius(prev.point, current.point, next.point, fixed_radius);
        let Step { step: offset, .. } = step(current.point, next.point, radius);
        path.move_to(next.point - offset);
    } else {
        path.move_to(next.point);
    }

    for i in 0..len {
        let (prev, current, next) = window(i);
        match next.curve_mode {
            CurveMode::Straight => {
                let radius = corner_radius(prev.point, current.point, next.point, fixed_radius);
                let Step {
                    step: offset,
                    draw_segment,
                } = step(current.point, next.point, radius);
                // Per-point radii aren't used, so a corner is rounded when its clamped radius is.
                if radius > 0.0 {
                    path.arc_to(current.point, current.point + offset, radius);
                } else {
                    path.line_to(current.point + offset);
                }
                if draw_segment {
                    path.line_to(next.point - offset);
                }
            }
            CurveMode::Mirrored | CurveMode::Asymmetric | CurveMode::Disconnected => {
                path.cubic_to(current.curve_to, next.curve_from, next.point);
            }
        }
    }

    path.close();
    Ok(path)
}
