// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deriving the fill geometry of shape borders.
//!
//! A stroke is always centered on its path. To draw a border entirely inside or outside a shape,
//! the path is stroked at twice the border thickness and the half that falls on the wrong side of
//! the shape is cut away with a boolean operation against the shape itself.

use log::warn;

use crate::kurbo::BezPath;
use crate::{Error, PathBackend, PathOp};

/// Where a border sits relative to the outline of its shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BorderPosition {
    /// Straddling the outline, half inside and half outside.
    #[default]
    Center,
    /// Entirely within the filled area.
    Inside,
    /// Entirely outside the filled area.
    Outside,
}

/// A border drawn along the outline of a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    pub thickness: f64,
    pub position: BorderPosition,
}

impl Border {
    pub fn new(thickness: f64, position: BorderPosition) -> Self {
        Self {
            thickness,
            position,
        }
    }

    /// The area to fill to draw this border around `path`.
    ///
    /// See [`stroked_border_path`].
    pub fn path<B: PathBackend + ?Sized>(&self, backend: &B, path: &BezPath) -> BezPath {
        stroked_border_path(backend, path, self.thickness, self.position)
    }
}

/// Stroke `path` at `width`, then combine the stroke outline with `path` itself using `op`.
///
/// On failure the error is returned together with the best path available at that point.
fn stroke_and_combine<B: PathBackend + ?Sized>(
    backend: &B,
    path: &BezPath,
    width: f64,
    op: Option<PathOp>,
) -> Result<BezPath, (Error, BezPath)> {
    // A zero width stroke adds nothing to the shape.
    if width == 0.0 && op == Some(PathOp::Union) {
        return Ok(path.clone());
    }
    let Some(stroked) = backend.stroke(path, width) else {
        return Err((Error::StrokeFailed, path.clone()));
    };
    let Some(op) = op else {
        return Ok(stroked);
    };
    match backend.op(&stroked, path, op) {
        Some(combined) => Ok(combined),
        None => Err((Error::PathOpFailed(op), stroked)),
    }
}

/// Stroke `path` at `width` and optionally combine the outline with the original path.
///
/// The boolean operation has the stroke outline as its first operand and `path` as its second, so
/// [`PathOp::Difference`] keeps the part of the stroke outside `path`.
///
/// Unlike [`stroked_path`], failures are reported instead of recovered from.
pub fn try_stroked_path<B: PathBackend + ?Sized>(
    backend: &B,
    path: &BezPath,
    width: f64,
    op: Option<PathOp>,
) -> Result<BezPath, Error> {
    stroke_and_combine(backend, path, width, op).map_err(|(error, _)| error)
}

/// Stroke `path` at `width` and optionally combine the outline with the original path.
///
/// This never fails. If stroking fails, a copy of `path` is returned. If the boolean operation
/// fails, the uncombined stroke outline is returned. Both cases are logged as warnings.
pub fn stroked_path<B: PathBackend + ?Sized>(
    backend: &B,
    path: &BezPath,
    width: f64,
    op: Option<PathOp>,
) -> BezPath {
    stroke_and_combine(backend, path, width, op).unwrap_or_else(|(error, fallback)| {
        warn!("{error}, drawing the border from the closest available path.");
        fallback
    })
}

/// The area to fill to draw a border of `width` at `position` around `path`.
///
/// With a conforming [`PathBackend`] the result can be filled with either fill rule.
pub fn stroked_border_path<B: PathBackend + ?Sized>(
    backend: &B,
    path: &BezPath,
    width: f64,
    position: BorderPosition,
) -> BezPath {
    match position {
        BorderPosition::Center => stroked_path(backend, path, width, None),
        BorderPosition::Inside => stroked_path(backend, path, width * 2.0, Some(PathOp::Intersect)),
        BorderPosition::Outside => {
            stroked_path(backend, path, width * 2.0, Some(PathOp::Difference))
        }
    }
}
