// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping gradients from the unit square into a shape's frame.
//!
//! Sketch stores gradient geometry in the `0..1` space of the shape's frame, so the same gradient
//! follows the shape as it is resized. The gradient is built in that space and drawn with a local
//! matrix which maps it onto the frame.

use std::f64::consts::TAU;

use peniko::{Color, ColorStop, Gradient};

use crate::kurbo::{Affine, Point};
use crate::{Error, Frame};

/// The shape of a gradient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GradientType {
    #[default]
    Linear,
    Radial,
    /// A sweep around the center of the frame.
    Angular,
}

/// A color at a position along a gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position in `0..=1`.
    pub position: f64,
    pub color: Color,
}

impl GradientStop {
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

impl From<GradientStop> for ColorStop {
    fn from(stop: GradientStop) -> Self {
        Self {
            offset: stop.position as f32,
            color: stop.color,
        }
    }
}

/// A gradient in the normalized space of a shape's frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeGradient {
    pub kind: GradientType,
    /// Start point of a linear gradient, or center of a radial one.
    pub from: Point,
    /// End point of a linear gradient, or a point on the edge of a radial one.
    pub to: Point,
    /// Stops sorted by position.
    pub stops: Vec<GradientStop>,
}

/// A gradient brush and the local matrix to draw it with.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientPaint {
    pub gradient: Gradient,
    /// The brush transform, mapping the unit square onto the shape's frame.
    pub transform: Affine,
}

/// Stops of an angular gradient which cover the whole sweep.
#[derive(Clone, Debug, PartialEq)]
pub struct AngularStops {
    pub stops: Vec<GradientStop>,
    /// Rotation of the sweep in radians, compensating for stops shifted towards `0`.
    pub rotation: f64,
}

/// The matrix mapping the unit square onto `frame`.
pub fn gradient_transform(frame: &Frame) -> Affine {
    Affine::translate((frame.x, frame.y)) * Affine::scale_non_uniform(frame.width, frame.height)
}

/// Make sure the stops of an angular gradient start at `0` and end at `1`.
///
/// A missing boundary stop repeats the color of the stop nearest to it. If neither boundary is
/// present, the stops are shifted to start at `0` and the first color is repeated at `1`. The
/// shift is returned as a rotation of the whole gradient.
///
/// Stops are expected to be sorted by position and are not sorted here.
pub fn resolve_angular_stops(stops: &[GradientStop]) -> Result<AngularStops, Error> {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Err(Error::EmptyGradient);
    };
    let (first, last) = (*first, *last);
    let mut resolved = Vec::with_capacity(stops.len() + 1);
    let mut rotation = 0.0;
    match (first.position == 0.0, last.position == 1.0) {
        (true, true) => resolved.extend_from_slice(stops),
        (true, false) => {
            resolved.extend_from_slice(stops);
            resolved.push(GradientStop::new(1.0, last.color));
        }
        (false, true) => {
            resolved.push(GradientStop::new(0.0, first.color));
            resolved.extend_from_slice(stops);
        }
        (false, false) => {
            resolved.extend(
                stops
                    .iter()
                    .map(|stop| GradientStop::new(stop.position - first.position, stop.color)),
            );
            resolved.push(GradientStop::new(1.0, first.color));
            rotation = first.position * TAU;
        }
    }
    Ok(AngularStops {
        stops: resolved,
        rotation,
    })
}

/// Make sure the stops of a linear or radial gradient start at `0` and end at `1`.
///
/// A missing boundary stop repeats the nearest color, matching the padded extend mode.
pub fn pad_stops(stops: &[GradientStop]) -> Result<Vec<GradientStop>, Error> {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Err(Error::EmptyGradient);
    };
    let mut padded = Vec::with_capacity(stops.len() + 2);
    if first.position > 0.0 {
        padded.push(GradientStop::new(0.0, first.color));
    }
    padded.extend_from_slice(stops);
    if last.position < 1.0 {
        padded.push(GradientStop::new(1.0, last.color));
    }
    Ok(padded)
}

impl ShapeGradient {
    pub fn new(kind: GradientType, from: Point, to: Point, stops: Vec<GradientStop>) -> Self {
        Self {
            kind,
            from,
            to,
            stops,
        }
    }

    /// Build the brush for drawing this gradient in a shape occupying `frame`.
    ///
    /// Linear and radial stops are completed with [`pad_stops`], angular stops with
    /// [`resolve_angular_stops`].
    pub fn to_paint(&self, frame: &Frame) -> Result<GradientPaint, Error> {
        let transform = gradient_transform(frame);
        let paint = match self.kind {
            GradientType::Linear => GradientPaint {
                gradient: Gradient::new_linear(self.from, self.to)
                    .with_stops(color_stops(&pad_stops(&self.stops)?).as_slice()),
                transform,
            },
            GradientType::Radial => {
                let radius = (self.to - self.from).hypot() as f32;
                GradientPaint {
                    gradient: Gradient::new_radial(self.from, radius)
                        .with_stops(color_stops(&pad_stops(&self.stops)?).as_slice()),
                    transform,
                }
            }
            GradientType::Angular => {
                let AngularStops { stops, rotation } = resolve_angular_stops(&self.stops)?;
                let center = Point::new(0.5, 0.5);
                GradientPaint {
                    gradient: Gradient::new_sweep(center, 0.0, std::f32::consts::TAU)
                        .with_stops(color_stops(&stops).as_slice()),
                    transform: transform * Affine::rotate_about(rotation, center),
                }
            }
        };
        Ok(paint)
    }
}

fn color_stops(stops: &[GradientStop]) -> Vec<ColorStop> {
    stops.iter().copied().map(ColorStop::from).collect()
}
