// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Border placement on round and sharp shapes, using the default path backend.
//!
//! Areas are measured by sampling the fill of each path on a grid. Border paths are checked under
//! both fill rules, since they may be drawn with either.

use std::f64::consts::PI;

use vello_sketch::kurbo::{BezPath, Point, Shape, Vec2};
use vello_sketch::peniko::Fill;
use vello_sketch::{
    compile_path, try_stroked_path, Border, BorderPosition, CurvePoint, CurvesBackend, Error, Frame,
};

const TOLERANCE: f64 = 0.01;
const GRID_STEP: f64 = 0.5;
const CENTER: Point = Point::new(50.0, 50.0);

/// A circle of radius 50 centered on (50, 50): a square with fully rounded corners.
fn circle() -> BezPath {
    let points: Vec<CurvePoint> = ["{0, 0}", "{1, 0}", "{1, 1}", "{0, 1}"]
        .into_iter()
        .map(CurvePoint::straight)
        .collect();
    compile_path(&points, &Frame::new(0.0, 0.0, 100.0, 100.0), 50.0)
        .unwrap()
        .to_bez_path(TOLERANCE)
}

/// A 100 by 100 square with sharp corners.
fn square() -> BezPath {
    let points: Vec<CurvePoint> = ["{0, 0}", "{1, 0}", "{1, 1}", "{0, 1}"]
        .into_iter()
        .map(CurvePoint::straight)
        .collect();
    compile_path(&points, &Frame::new(0.0, 0.0, 100.0, 100.0), 0.0)
        .unwrap()
        .to_bez_path(TOLERANCE)
}

fn backend() -> CurvesBackend {
    CurvesBackend {
        tolerance: TOLERANCE,
        ..Default::default()
    }
}

fn fills(path: &BezPath, point: Point, fill: Fill) -> bool {
    let winding = path.winding(point);
    match fill {
        Fill::NonZero => winding != 0,
        Fill::EvenOdd => winding.rem_euclid(2) == 1,
    }
}

/// Whether `point` is filled under both fill rules. Panics if the rules disagree.
fn contains(path: &BezPath, point: Point) -> bool {
    let nonzero = fills(path, point, Fill::NonZero);
    assert_eq!(
        nonzero,
        fills(path, point, Fill::EvenOdd),
        "fill rules disagree at {point:?}"
    );
    nonzero
}

fn sampled_area(path: &BezPath, fill: Fill) -> f64 {
    let bounds = path.bounding_box();
    let mut count = 0_u32;
    let mut y = bounds.y0.floor() + GRID_STEP / 2.0;
    while y < bounds.y1 {
        let mut x = bounds.x0.floor() + GRID_STEP / 2.0;
        while x < bounds.x1 {
            if fills(path, Point::new(x, y), fill) {
                count += 1;
            }
            x += GRID_STEP;
        }
        y += GRID_STEP;
    }
    f64::from(count) * GRID_STEP * GRID_STEP
}

fn assert_area_within(path: &BezPath, expected: f64, tolerance: f64) {
    for fill in [Fill::NonZero, Fill::EvenOdd] {
        let area = sampled_area(path, fill);
        assert!(
            (area - expected).abs() < expected * tolerance,
            "{fill:?} area {area}, expected {expected}"
        );
    }
}

fn assert_area(path: &BezPath, expected: f64) {
    assert_area_within(path, expected, 0.03);
}

fn at_radius(radius: f64, angle: f64) -> Point {
    CENTER + radius * Vec2::from_angle(angle)
}

#[test]
fn compiled_circle() {
    let circle = circle();
    assert_area(&circle, PI * 50.0 * 50.0);
    assert!(contains(&circle, CENTER));
}

#[test]
fn center_border_straddles_the_outline() {
    let border = Border::new(10.0, BorderPosition::Center).path(&backend(), &circle());
    assert_area(&border, PI * (55.0 * 55.0 - 45.0 * 45.0));
    for angle in [0.3, 1.9, 4.0] {
        assert!(contains(&border, at_radius(47.0, angle)));
        assert!(contains(&border, at_radius(53.0, angle)));
        assert!(!contains(&border, at_radius(43.0, angle)));
        assert!(!contains(&border, at_radius(57.0, angle)));
    }
}

#[test]
fn inside_border_stays_within_the_fill() {
    let circle = circle();
    let border = Border::new(10.0, BorderPosition::Inside).path(&backend(), &circle);
    assert_area(&border, PI * (50.0 * 50.0 - 40.0 * 40.0));
    for angle in [0.3, 1.9, 4.0] {
        assert!(contains(&border, at_radius(45.0, angle)));
        assert!(!contains(&border, at_radius(35.0, angle)));
        assert!(!contains(&border, at_radius(55.0, angle)));
    }
    assert!(!contains(&border, CENTER));
}

#[test]
fn outside_border_stays_outside_the_fill() {
    let circle = circle();
    let border = Border::new(10.0, BorderPosition::Outside).path(&backend(), &circle);
    assert_area(&border, PI * (60.0 * 60.0 - 50.0 * 50.0));
    for angle in [0.3, 1.9, 4.0] {
        assert!(contains(&border, at_radius(55.0, angle)));
        assert!(!contains(&border, at_radius(45.0, angle)));
        assert!(!contains(&border, at_radius(65.0, angle)));
    }
}

#[test]
fn sharp_center_border() {
    let border = Border::new(10.0, BorderPosition::Center).path(&backend(), &square());
    assert_area_within(&border, 110.0 * 110.0 - 90.0 * 90.0, 0.01);
    // Miter joins reach the corners of the outer square.
    assert!(contains(&border, Point::new(-4.0, -4.0)));
    assert!(contains(&border, Point::new(104.0, 104.0)));
    // Inner joins.
    assert!(contains(&border, Point::new(3.0, 3.0)));
    assert!(contains(&border, Point::new(97.0, 3.0)));
    assert!(!contains(&border, Point::new(6.0, 6.0)));
    assert!(!contains(&border, CENTER));
}

#[test]
fn sharp_inside_border() {
    let border = Border::new(10.0, BorderPosition::Inside).path(&backend(), &square());
    assert_area_within(&border, 100.0 * 100.0 - 80.0 * 80.0, 0.01);
    for corner in [(1.0, 1.0), (99.0, 1.0), (99.0, 99.0), (1.0, 99.0)] {
        assert!(contains(&border, corner.into()), "{corner:?}");
    }
    assert!(contains(&border, Point::new(9.0, 9.0)));
    assert!(!contains(&border, Point::new(11.0, 11.0)));
    assert!(!contains(&border, Point::new(-1.0, 50.0)));
    assert!(!contains(&border, CENTER));
}

#[test]
fn sharp_outside_border() {
    let border = Border::new(10.0, BorderPosition::Outside).path(&backend(), &square());
    assert_area_within(&border, 120.0 * 120.0 - 100.0 * 100.0, 0.01);
    for corner in [(-9.0, -9.0), (109.0, -9.0), (109.0, 109.0), (-9.0, 109.0)] {
        assert!(contains(&border, corner.into()), "{corner:?}");
    }
    assert!(!contains(&border, Point::new(1.0, 1.0)));
    assert!(!contains(&border, Point::new(-11.0, 50.0)));
    assert!(!contains(&border, CENTER));
}

#[test]
fn degenerate_paths_fall_back() {
    // An empty path can't be stroked, so the lenient API returns it unchanged.
    let empty = BezPath::new();
    let border = Border::new(4.0, BorderPosition::Inside).path(&backend(), &empty);
    assert!(border.elements().is_empty());

    let error = try_stroked_path(&backend(), &empty, 4.0, None);
    assert_eq!(error, Err(Error::StrokeFailed));
}
