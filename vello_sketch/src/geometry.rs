// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangles in the `x, y, width, height` form used by Sketch documents.

use crate::kurbo::{Affine, Point, Rect, Size};

/// The frame of a shape.
///
/// Unlike [`Rect`], a frame is stored as an origin and a size, which is how Sketch persists
/// layer frames. The size may be negative while a frame is being built, but frames passed to the
/// path compiler or the gradient mapper are expected to be normalized.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    /// The frame of the unit square.
    pub const UNIT: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Create a new frame.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create the frame spanned by two corner points, in any order.
    ///
    /// The result always has a non-negative size.
    pub fn from_points(p0: Point, p1: Point) -> Self {
        Self {
            x: p0.x.min(p1.x),
            y: p0.y.min(p1.y),
            width: (p1.x - p0.x).abs(),
            height: (p1.y - p0.y).abs(),
        }
    }

    /// Move a negative width or height into the origin, so that the frame covers the same area
    /// with a non-negative size.
    #[must_use]
    pub fn normalize(self) -> Self {
        Self::from_points(
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y + self.height),
        )
    }

    /// The origin of the frame.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The size of the frame.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The `min_x, min_y, max_x, max_y` bounds of the frame.
    pub fn bounds(&self) -> Rect {
        let frame = self.normalize();
        Rect::new(
            frame.x,
            frame.y,
            frame.x + frame.width,
            frame.y + frame.height,
        )
    }

    /// Shrink the frame by `dx` on the left and right and `dy` on the top and bottom.
    ///
    /// Negative values grow the frame. The result isn't normalized, so insetting by more than half
    /// the size gives a negative size.
    #[must_use]
    pub fn inset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width - dx * 2.0,
            height: self.height - dy * 2.0,
        }
    }

    /// Transform the frame by transforming its two bounding corners.
    ///
    /// This is only correct for transforms made of translation and scale. For a rotation or a
    /// skew, the result spans the two transformed corners, which isn't the bounding box of the
    /// transformed rectangle.
    #[must_use]
    pub fn transform(&self, affine: Affine) -> Self {
        let bounds = self.bounds();
        Self::from_points(
            affine * Point::new(bounds.x0, bounds.y0),
            affine * Point::new(bounds.x1, bounds.y1),
        )
    }

    /// Map a point from the frame's normalized `0..1` space into absolute space.
    pub fn scale_point(&self, normalized: Point) -> Point {
        Point::new(
            self.x + normalized.x * self.width,
            self.y + normalized.y * self.height,
        )
    }

    /// Map an absolute point into the frame's normalized `0..1` space.
    ///
    /// This is the inverse of [`Frame::scale_point`]. A frame with a zero width or height has no
    /// normalized space, and the result contains infinities or NaN.
    pub fn unscale_point(&self, absolute: Point) -> Point {
        Point::new(
            (absolute.x - self.x) / self.width,
            (absolute.y - self.y) / self.height,
        )
    }
}

impl From<Rect> for Frame {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }
}

impl From<Frame> for Rect {
    fn from(frame: Frame) -> Self {
        Self::new(
            frame.x,
            frame.y,
            frame.x + frame.width,
            frame.y + frame.height,
        )
    }
}

/// The Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}
