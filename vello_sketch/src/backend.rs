// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stroking and boolean operations on paths.

use std::panic::{catch_unwind, AssertUnwindSafe};

use flo_curves::bezier::path::{
    path_add, path_intersect, path_remove_interior_points, path_sub, SimpleBezierPath,
};
use flo_curves::Coord2;
use log::warn;

use crate::kurbo::{self, BezPath, Join, ParamCurve, PathEl, Point, Shape, Stroke, StrokeOpts};

/// A boolean operation between two filled paths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathOp {
    /// The area covered by either path.
    Union,
    /// The area covered by both paths.
    Intersect,
    /// The area covered by the first path but not the second.
    Difference,
}

/// The geometry operations needed to derive border paths.
///
/// Both operations return `None` when they can't produce a result, usually because the input was
/// degenerate. Callers are expected to recover from this.
///
/// Paths returned by a backend must fill the same area under the nonzero and the even-odd fill
/// rules, so they can be drawn with either.
pub trait PathBackend {
    /// Convert `path` into the outline of its stroke at `width`.
    fn stroke(&self, path: &BezPath, width: f64) -> Option<BezPath>;

    /// Combine two filled paths.
    fn op(&self, a: &BezPath, b: &BezPath, op: PathOp) -> Option<BezPath>;
}

/// A [`PathBackend`] built on kurbo's stroker and the boolean operations of `flo_curves`.
///
/// kurbo's stroke outlines overlap themselves at inner joins and only fill correctly under the
/// nonzero rule, while the boolean operations of `flo_curves` treat their inputs as even-odd.
/// Stroke outlines are therefore resolved to their nonzero area first. Holes in every returned
/// path are wound opposite to the contour around them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvesBackend {
    /// Tolerance for approximating offset curves.
    pub tolerance: f64,
    /// Distance below which `flo_curves` considers two points to be the same.
    pub accuracy: f64,
    /// The join style used when stroking.
    pub join: Join,
    /// The miter limit used when stroking with [`Join::Miter`].
    pub miter_limit: f64,
}

impl Default for CurvesBackend {
    fn default() -> Self {
        Self {
            tolerance: 0.1,
            accuracy: 0.01,
            join: Join::Miter,
            miter_limit: 4.0,
        }
    }
}

impl PathBackend for CurvesBackend {
    fn stroke(&self, path: &BezPath, width: f64) -> Option<BezPath> {
        if !width.is_finite() || width < 0.0 {
            warn!("Refusing to stroke a path with width {width}");
            return None;
        }
        if path.elements().is_empty() {
            return None;
        }
        if !is_finite(path) {
            warn!("A path contains NaN or infinite coordinates, not stroking it.");
            return None;
        }
        let style = Stroke::new(width)
            .with_join(self.join)
            .with_miter_limit(self.miter_limit);
        let stroked = kurbo::stroke(
            path.elements().iter().copied(),
            &style,
            &StrokeOpts::default(),
            self.tolerance,
        );
        if !is_finite(&stroked) {
            return None;
        }
        let outline = to_curves(&stroked);
        let accuracy = self.accuracy;
        let resolved = catch_curves(|| path_remove_interior_points(&outline, accuracy));
        let Some(resolved) = resolved else {
            warn!("Resolving the outline of a stroke panicked.");
            return None;
        };
        let resolved = from_curves(&resolved);
        is_finite(&resolved).then_some(resolved)
    }

    fn op(&self, a: &BezPath, b: &BezPath, op: PathOp) -> Option<BezPath> {
        if !is_finite(a) || !is_finite(b) {
            warn!("A path contains NaN or infinite coordinates, skipping {op:?}.");
            return None;
        }
        let a = to_curves(a);
        let b = to_curves(b);
        let accuracy = self.accuracy;
        let Some(paths) = catch_curves(|| match op {
            PathOp::Union => path_add(&a, &b, accuracy),
            PathOp::Intersect => path_intersect(&a, &b, accuracy),
            PathOp::Difference => path_sub(&a, &b, accuracy),
        }) else {
            warn!("Path operation {op:?} panicked.");
            return None;
        };
        let path = from_curves(&paths);
        is_finite(&path).then_some(path)
    }
}

/// Run a `flo_curves` operation, returning `None` if it panics.
///
/// Intersection finding can panic on some degenerate curves.
fn catch_curves(
    operation: impl FnOnce() -> Vec<SimpleBezierPath>,
) -> Option<Vec<SimpleBezierPath>> {
    catch_unwind(AssertUnwindSafe(operation)).ok()
}

fn is_finite(path: &BezPath) -> bool {
    let finite = |p: &Point| p.x.is_finite() && p.y.is_finite();
    path.elements().iter().all(|el| match el {
        PathEl::MoveTo(p) | PathEl::LineTo(p) => finite(p),
        PathEl::QuadTo(p1, p2) => finite(p1) && finite(p2),
        PathEl::CurveTo(p1, p2, p3) => finite(p1) && finite(p2) && finite(p3),
        PathEl::ClosePath => true,
    })
}

fn coord(p: Point) -> Coord2 {
    Coord2(p.x, p.y)
}

/// Collects the closed subpaths of a kurbo path as cubic-only `flo_curves` paths.
#[derive(Default)]
struct CurvesBuilder {
    paths: Vec<SimpleBezierPath>,
    curves: Vec<(Coord2, Coord2, Coord2)>,
    start: Option<Point>,
    current: Point,
}

impl CurvesBuilder {
    fn move_to(&mut self, p: Point) {
        self.finish();
        self.start = Some(p);
        self.current = p;
    }

    fn line_to(&mut self, p: Point) {
        if p == self.current {
            return;
        }
        let p0 = self.current;
        self.curve_to(p0.lerp(p, 1.0 / 3.0), p0.lerp(p, 2.0 / 3.0), p);
    }

    fn quad_to(&mut self, p1: Point, p2: Point) {
        let p0 = self.current;
        self.curve_to(p0.lerp(p1, 2.0 / 3.0), p2.lerp(p1, 2.0 / 3.0), p2);
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.start.get_or_insert(self.current);
        self.curves.push((coord(p1), coord(p2), coord(p3)));
        self.current = p3;
    }

    /// Close the current subpath, leaving the pen at its start.
    fn finish(&mut self) {
        let Some(start) = self.start.take() else {
            return;
        };
        if !self.curves.is_empty() {
            if self.current != start {
                let p0 = self.current;
                self.curves.push((
                    coord(p0.lerp(start, 1.0 / 3.0)),
                    coord(p0.lerp(start, 2.0 / 3.0)),
                    coord(start),
                ));
            }
            self.paths.push((coord(start), std::mem::take(&mut self.curves)));
        }
        self.current = start;
    }
}

fn to_curves(path: &BezPath) -> Vec<SimpleBezierPath> {
    let mut builder = CurvesBuilder::default();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p),
            PathEl::LineTo(p) => builder.line_to(p),
            PathEl::QuadTo(p1, p2) => builder.quad_to(p1, p2),
            PathEl::CurveTo(p1, p2, p3) => builder.curve_to(p1, p2, p3),
            PathEl::ClosePath => builder.finish(),
        }
    }
    builder.finish();
    builder.paths
}

fn contour((start, curves): &SimpleBezierPath) -> BezPath {
    let point = |c: &Coord2| Point::new(c.0, c.1);
    let mut path = BezPath::new();
    path.move_to(point(start));
    for (p1, p2, p3) in curves {
        path.curve_to(point(p1), point(p2), point(p3));
    }
    path.close_path();
    path
}

/// Convert `flo_curves` contours back into a kurbo path.
///
/// The contours don't cross each other but come back wound in arbitrary directions. A contour
/// nested inside an odd number of others is a hole: it gets a negative area and every other
/// contour a positive one, so the path fills the same area under both fill rules.
fn from_curves(paths: &[SimpleBezierPath]) -> BezPath {
    let contours: Vec<BezPath> = paths
        .iter()
        .filter(|(_, curves)| !curves.is_empty())
        .map(contour)
        .collect();
    let mut path = BezPath::new();
    for (i, contour) in contours.iter().enumerate() {
        let Some(sample) = contour.segments().next().map(|seg| seg.eval(0.5)) else {
            continue;
        };
        let depth = contours
            .iter()
            .enumerate()
            .filter(|&(j, other)| j != i && other.winding(sample) != 0)
            .count();
        let is_hole = depth % 2 == 1;
        if (contour.area() < 0.0) == is_hole {
            path.extend(contour.iter());
        } else {
            path.extend(contour.reverse_subpaths().iter());
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::{from_curves, to_curves, CurvesBackend, PathBackend, PathOp};
    use crate::kurbo::{BezPath, ParamCurve, PathEl, Point, Rect, Shape};

    fn square(x: f64, y: f64, size: f64) -> BezPath {
        Rect::new(x, y, x + size, y + size).to_path(0.1)
    }

    fn area(path: &BezPath) -> f64 {
        path.area().abs()
    }

    #[test]
    fn conversion_closes_subpaths() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 0.0));
        path.quad_to((10.0, 10.0), (0.0, 10.0));
        let curves = to_curves(&path);
        assert_eq!(curves.len(), 1);
        // The repeated point is dropped and a closing segment is added.
        assert_eq!(curves[0].1.len(), 3);
        let back = from_curves(&curves);
        assert_eq!(back.elements().first(), Some(&PathEl::MoveTo(Point::ZERO)));
        assert_eq!(back.elements().last(), Some(&PathEl::ClosePath));
        let end = back.segments().last().unwrap().end();
        assert_eq!(end, Point::ZERO);
    }

    #[test]
    fn conversion_keeps_subpaths_apart() {
        let mut path = square(0.0, 0.0, 10.0);
        path.extend(square(20.0, 0.0, 10.0));
        // A subpath that never moves the pen is skipped.
        path.move_to((50.0, 50.0));
        path.close_path();
        assert_eq!(to_curves(&path).len(), 2);
    }

    #[test]
    fn stroke_rejects_bad_input() {
        let backend = CurvesBackend::default();
        let path = square(0.0, 0.0, 10.0);
        assert!(backend.stroke(&path, -1.0).is_none());
        assert!(backend.stroke(&path, f64::NAN).is_none());
        assert!(backend.stroke(&BezPath::new(), 1.0).is_none());

        let mut nan = BezPath::new();
        nan.move_to((0.0, 0.0));
        nan.line_to((f64::NAN, 10.0));
        nan.close_path();
        assert!(backend.stroke(&nan, 1.0).is_none());
        assert!(backend.op(&nan, &path, PathOp::Union).is_none());
    }

    #[test]
    fn stroke_area() {
        let backend = CurvesBackend::default();
        let stroked = backend.stroke(&square(0.0, 0.0, 100.0), 10.0).unwrap();
        // Miter joins keep the outer corners sharp.
        let bounds = stroked.bounding_box();
        assert!((bounds.x0 + 5.0).abs() < 0.05 && (bounds.y0 + 5.0).abs() < 0.05);
        assert!((bounds.x1 - 105.0).abs() < 0.05 && (bounds.y1 - 105.0).abs() < 0.05);
        // The outer contour is 110 wide and the hole 90 wide.
        let expected = 110.0 * 110.0 - 90.0 * 90.0;
        assert!((stroked.area() - expected).abs() < 1.0, "{}", stroked.area());
        // The stroker overlaps itself next to the corners. They are filled exactly once.
        for point in [(2.0, 2.0), (98.0, 2.0), (98.0, 98.0), (2.0, 98.0), (50.0, -3.0)] {
            assert_eq!(stroked.winding(point.into()), 1, "{point:?}");
        }
        assert_eq!(stroked.winding(Point::new(50.0, 50.0)), 0);
    }

    #[test]
    fn holes_are_wound_against_their_outline() {
        // Three nested squares, all wound the same way.
        let paths = to_curves(&{
            let mut path = square(0.0, 0.0, 30.0);
            path.extend(square(10.0, 10.0, 10.0));
            path.extend(square(12.0, 12.0, 6.0));
            path
        });
        let path = from_curves(&paths);
        assert_eq!(path.winding(Point::new(5.0, 5.0)), 1);
        assert_eq!(path.winding(Point::new(11.0, 11.0)), 0);
        assert_eq!(path.winding(Point::new(15.0, 15.0)), 1);
        assert!((path.area() - (900.0 - 100.0 + 36.0)).abs() < 1e-6);

        let reversed = from_curves(&to_curves(&square(0.0, 0.0, 30.0).reverse_subpaths()));
        assert!((reversed.area() - 900.0).abs() < 1e-6);
    }

    #[test]
    fn boolean_operations() {
        let backend = CurvesBackend::default();
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        let union = backend.op(&a, &b, PathOp::Union).unwrap();
        let intersect = backend.op(&a, &b, PathOp::Intersect).unwrap();
        let difference = backend.op(&a, &b, PathOp::Difference).unwrap();
        assert!((area(&union) - 175.0).abs() < 0.5, "{}", area(&union));
        assert!((area(&intersect) - 25.0).abs() < 0.5, "{}", area(&intersect));
        assert!((area(&difference) - 75.0).abs() < 0.5, "{}", area(&difference));

        let bounds = intersect.bounding_box();
        assert!((bounds.x0 - 5.0).abs() < 0.05 && (bounds.x1 - 10.0).abs() < 0.05);
    }
}
