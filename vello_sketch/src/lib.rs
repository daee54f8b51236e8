// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry for Sketch-compatible vector shapes.
//!
//! A Sketch shape is stored as an ordered list of [`CurvePoint`]s in coordinates normalized to the
//! shape's [`Frame`]. This crate turns that description into something a 2D renderer can draw:
//!
//! - [`compile_path`] produces a [`ShapePath`]: a single closed subpath of lines, cubic Beziers
//!   and tangent arcs for rounded corners. [`ShapePath::to_bez_path`] realizes it as a
//!   [`kurbo::BezPath`] which can be handed to Vello or any other kurbo consumer.
//! - [`stroked_border_path`] derives the fill geometry of an inside, center or outside border by
//!   stroking and combining paths through a [`PathBackend`].
//! - [`ShapeGradient::to_paint`] maps a gradient defined in the unit square into a shape's frame,
//!   resolving angular gradients whose stops don't cover the full sweep.
//!
//! # Example
//!
//! ```
//! use vello_sketch::{compile_path, CurvePoint, Frame, DEFAULT_TOLERANCE};
//!
//! let corners = ["{0, 0}", "{1, 0}", "{1, 1}", "{0, 1}"];
//! let points: Vec<CurvePoint> = corners
//!     .iter()
//!     .map(|point| CurvePoint::straight(*point))
//!     .collect();
//! let frame = Frame::new(10.0, 10.0, 100.0, 50.0);
//!
//! let path = compile_path(&points, &frame, 8.0).unwrap();
//! let bez = path.to_bez_path(DEFAULT_TOLERANCE);
//! assert!(!bez.elements().is_empty());
//! ```
//!
//! # Features
//!
//! - `serde` (enabled by default): (de)serialize [`CurvePoint`]s using the field names and curve
//!   mode integers of the Sketch document format.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

mod backend;
mod border;
mod cache;
mod codec;
mod compile;
mod corner;
mod error;
mod geometry;
mod gradient;
mod path;

pub use backend::{CurvesBackend, PathBackend, PathOp};
pub use border::{stroked_border_path, stroked_path, try_stroked_path, Border, BorderPosition};
pub use cache::{PathCache, PathKey};
pub use codec::{
    parse_curve_point, parse_curve_points, parse_point, stringify_point, unparse_curve_point,
    CurveMode, CurvePoint, ParsedCurvePoint,
};
pub use compile::{compile_parsed_path, compile_path};
pub use corner::{corner_radius, edge_radius, step, Step};
pub use error::Error;
pub use geometry::{distance, Frame};
pub use gradient::{
    gradient_transform, pad_stops, resolve_angular_stops, AngularStops, GradientPaint,
    GradientStop, GradientType, ShapeGradient,
};
pub use path::{PathCommand, ShapePath};

pub use peniko;
pub use peniko::kurbo;

/// Tolerance used when converting arcs to Bezier segments, matching the tolerance Vello uses for
/// shape path elements.
pub const DEFAULT_TOLERANCE: f64 = 0.1;
