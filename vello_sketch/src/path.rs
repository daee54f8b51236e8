// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compiled shape paths.

use crate::geometry::distance;
use crate::kurbo::{Arc, BezPath, PathEl, Point, Rect, Shape, Vec2};

/// Threshold below which the sine between two edges is treated as zero, as in Skia's `arcTo`.
const NEARLY_ZERO_SIN: f64 = 1.0 / 4096.0;

/// Gaps smaller than this are closed by snapping instead of emitting a line segment.
const NEARLY_ZERO_LENGTH: f64 = 1e-9;

/// A single path construction command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    /// A circular arc of `radius` tangent to the line from the current point to `corner` and to
    /// the line from `corner` to `to`, preceded by a line to the first tangent point.
    ///
    /// This has the semantics of Skia's `arcTo(x1, y1, x2, y2, radius)`. The arc ends on the
    /// second line, which is not necessarily at `to`.
    ArcTo {
        corner: Point,
        to: Point,
        radius: f64,
    },
    Close,
}

/// A path made of [`PathCommand`]s.
///
/// Paths produced by [`compile_path`](crate::compile_path) are always a single closed subpath.
/// The fill rule is left to the caller.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapePath {
    commands: Vec<PathCommand>,
}

impl ShapePath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty path with room for `capacity` commands.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity),
        }
    }

    pub fn move_to(&mut self, point: Point) {
        self.commands.push(PathCommand::MoveTo(point));
    }

    pub fn line_to(&mut self, point: Point) {
        self.commands.push(PathCommand::LineTo(point));
    }

    pub fn cubic_to(&mut self, c1: Point, c2: Point, point: Point) {
        self.commands.push(PathCommand::CubicTo(c1, c2, point));
    }

    /// Append a tangent arc. See [`PathCommand::ArcTo`].
    pub fn arc_to(&mut self, corner: Point, to: Point, radius: f64) {
        self.commands
            .push(PathCommand::ArcTo { corner, to, radius });
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Whether the path ends with [`PathCommand::Close`].
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// The point of the first move.
    pub fn start_point(&self) -> Option<Point> {
        self.commands.iter().find_map(|command| match command {
            PathCommand::MoveTo(point) => Some(*point),
            _ => None,
        })
    }

    /// The pen position after the last drawing command, before any final close.
    pub fn end_point(&self) -> Option<Point> {
        let commands = match self.commands.split_last() {
            Some((PathCommand::Close, rest)) => rest,
            _ => &self.commands[..],
        };
        let mut start = None;
        let mut current = None;
        for command in commands {
            match *command {
                PathCommand::MoveTo(point) => {
                    start = Some(point);
                    current = Some(point);
                }
                PathCommand::LineTo(point) | PathCommand::CubicTo(_, _, point) => {
                    current = Some(point);
                }
                PathCommand::ArcTo { corner, to, radius } => {
                    let from = current.or(start).unwrap_or(Point::ZERO);
                    current = Some(match TangentArc::new(from, corner, to, radius) {
                        TangentArc::Line(point) => point,
                        TangentArc::Arc { end, .. } => end,
                    });
                }
                PathCommand::Close => current = start,
            }
        }
        current
    }

    /// Convert the path into a [`BezPath`].
    ///
    /// Tangent arcs are flattened into cubic Beziers within `tolerance`. Zero-length lines are
    /// dropped, and a subpath whose last point is within a tiny distance of its start is closed
    /// exactly, so that strokers don't see a degenerate closing segment.
    pub fn to_bez_path(&self, tolerance: f64) -> BezPath {
        let mut elements = Vec::with_capacity(self.commands.len() * 2);
        let mut start = Point::ZERO;
        let mut current = Point::ZERO;
        let mut open = false;
        for command in &self.commands {
            if !open && !matches!(command, PathCommand::MoveTo(_) | PathCommand::Close) {
                // Drawing after a close continues from the start of the previous subpath.
                elements.push(PathEl::MoveTo(start));
                current = start;
                open = true;
            }
            match *command {
                PathCommand::MoveTo(point) => {
                    elements.push(PathEl::MoveTo(point));
                    start = point;
                    current = point;
                    open = true;
                }
                PathCommand::LineTo(point) => {
                    if point != current {
                        elements.push(PathEl::LineTo(point));
                        current = point;
                    }
                }
                PathCommand::CubicTo(c1, c2, point) => {
                    elements.push(PathEl::CurveTo(c1, c2, point));
                    current = point;
                }
                PathCommand::ArcTo { corner, to, radius } => {
                    match TangentArc::new(current, corner, to, radius) {
                        TangentArc::Line(point) => {
                            if point != current {
                                elements.push(PathEl::LineTo(point));
                                current = point;
                            }
                        }
                        TangentArc::Arc {
                            start: arc_start,
                            end,
                            arc,
                        } => {
                            if distance(current, arc_start) > NEARLY_ZERO_LENGTH {
                                elements.push(PathEl::LineTo(arc_start));
                            }
                            elements.extend(arc.append_iter(tolerance));
                            if let Some(last) = elements.last_mut() {
                                set_end_point(last, end);
                            }
                            current = end;
                        }
                    }
                }
                PathCommand::Close => {
                    if !open {
                        continue;
                    }
                    if current != start && distance(current, start) <= NEARLY_ZERO_LENGTH {
                        if let Some(last) = elements.last_mut() {
                            set_end_point(last, start);
                        }
                    }
                    elements.push(PathEl::ClosePath);
                    current = start;
                    open = false;
                }
            }
        }
        BezPath::from_vec(elements)
    }

    /// The bounding box of the path, with arcs flattened within `tolerance`.
    pub fn bounding_box(&self, tolerance: f64) -> Rect {
        self.to_bez_path(tolerance).bounding_box()
    }
}

fn set_end_point(element: &mut PathEl, point: Point) {
    match element {
        PathEl::LineTo(end) | PathEl::QuadTo(_, end) | PathEl::CurveTo(_, _, end) => *end = point,
        PathEl::MoveTo(_) | PathEl::ClosePath => {}
    }
}

/// The geometry of a tangent arc, resolved against the current point.
enum TangentArc {
    /// The arc is degenerate and collapses to a line to the corner.
    Line(Point),
    Arc { start: Point, end: Point, arc: Arc },
}

impl TangentArc {
    fn new(current: Point, corner: Point, to: Point, radius: f64) -> Self {
        if radius == 0.0 {
            return Self::Line(corner);
        }
        let before = corner - current;
        let after = to - corner;
        let (before_length, after_length) = (before.hypot(), after.hypot());
        if before_length == 0.0 || after_length == 0.0 {
            return Self::Line(corner);
        }
        let before = before / before_length;
        let after = after / after_length;
        let cos = before.dot(after);
        let sin = before.cross(after);
        if sin.abs() <= NEARLY_ZERO_SIN {
            // The edges are collinear, so there is no corner to round.
            return Self::Line(corner);
        }
        // Distance from the corner to both tangent points.
        let tangent_distance = (radius * (1.0 - cos) / sin).abs();
        let start = corner - before * tangent_distance;
        let end = corner + after * tangent_distance;
        let turn = sin.signum();
        let center = start + Vec2::new(-before.y, before.x) * (radius * turn);
        let arc = Arc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle: (start - center).atan2(),
            sweep_angle: cos.clamp(-1.0, 1.0).acos() * turn,
            x_rotation: 0.0,
        };
        Self::Arc { start, end, arc }
    }
}
