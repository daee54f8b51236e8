// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion between persisted curve points and absolute geometry.
//!
//! Sketch stores each point of a shape as a string `"{x, y}"`, normalized to the frame of the
//! layer that owns it. The two Bezier handles are stored with their names swapped relative to the
//! direction of travel: the handle leading into a point is stored as `curveTo`, and the handle
//! leaving it as `curveFrom`. [`parse_curve_point`] and [`unparse_curve_point`] undo and redo
//! that swap, so [`ParsedCurvePoint::curve_to`] is the control point used when leaving a point,
//! and [`ParsedCurvePoint::curve_from`] the control point used when arriving at it.

use crate::kurbo::Point;
use crate::{Error, Frame};

/// How the handles of a curve point are edited, and whether the segment into it is curved.
///
/// For path compilation only the distinction between [`CurveMode::Straight`] and the other modes
/// matters: any non-straight point is reached with a cubic Bezier through the explicit handles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u8", into = "u8")
)]
pub enum CurveMode {
    #[default]
    Straight,
    Mirrored,
    Asymmetric,
    Disconnected,
}

impl TryFrom<u8> for CurveMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Straight),
            2 => Ok(Self::Mirrored),
            3 => Ok(Self::Asymmetric),
            4 => Ok(Self::Disconnected),
            _ => Err(Error::UnknownCurveMode(value)),
        }
    }
}

impl From<CurveMode> for u8 {
    fn from(mode: CurveMode) -> Self {
        match mode {
            CurveMode::Straight => 1,
            CurveMode::Mirrored => 2,
            CurveMode::Asymmetric => 3,
            CurveMode::Disconnected => 4,
        }
    }
}

/// A curve point as persisted in a Sketch document.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CurvePoint {
    /// The anchor point, as `"{x, y}"` in frame-normalized space.
    pub point: String,
    /// The outgoing handle.
    pub curve_from: String,
    /// The incoming handle.
    pub curve_to: String,
    pub curve_mode: CurveMode,
    /// Requested rounding of this corner.
    ///
    /// The path compiler currently rounds every corner of a shape by the same shape-level radius,
    /// so this value is carried through but not used for compilation.
    pub corner_radius: f64,
    pub has_curve_from: bool,
    pub has_curve_to: bool,
}

impl CurvePoint {
    /// A straight, sharp corner at the given persisted point, with both handles on the anchor.
    pub fn straight(point: &str) -> Self {
        Self {
            point: point.to_owned(),
            curve_from: point.to_owned(),
            curve_to: point.to_owned(),
            curve_mode: CurveMode::Straight,
            corner_radius: 0.0,
            has_curve_from: false,
            has_curve_to: false,
        }
    }
}

/// A curve point in absolute coordinates.
///
/// The handles are swapped relative to [`CurvePoint`]: `curve_to` here comes from the persisted
/// `curve_from`, and the other way around.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParsedCurvePoint {
    pub point: Point,
    /// The control point used when arriving at this point.
    pub curve_from: Point,
    /// The control point used when leaving this point.
    pub curve_to: Point,
    pub curve_mode: CurveMode,
    pub corner_radius: f64,
    pub has_curve_from: bool,
    pub has_curve_to: bool,
}

/// Parse a point persisted as `"{x, y}"`.
///
/// Whitespace around the braces and the numbers is ignored.
pub fn parse_point(value: &str) -> Result<Point, Error> {
    let malformed = || Error::MalformedPoint(value.to_owned());
    let inner = value
        .trim()
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(malformed)?;
    let (x, y) = inner.split_once(',').ok_or_else(malformed)?;
    let x = x.trim().parse::<f64>().map_err(|_| malformed())?;
    let y = y.trim().parse::<f64>().map_err(|_| malformed())?;
    Ok(Point::new(x, y))
}

/// Format a point as `"{x, y}"`.
///
/// Coordinates are written with the shortest representation that parses back to the same value.
pub fn stringify_point(point: Point) -> String {
    format!("{{{}, {}}}", point.x, point.y)
}

/// Decode a persisted curve point into absolute coordinates within `frame`.
pub fn parse_curve_point(
    curve_point: &CurvePoint,
    frame: &Frame,
) -> Result<ParsedCurvePoint, Error> {
    Ok(ParsedCurvePoint {
        point: frame.scale_point(parse_point(&curve_point.point)?),
        curve_from: frame.scale_point(parse_point(&curve_point.curve_to)?),
        curve_to: frame.scale_point(parse_point(&curve_point.curve_from)?),
        curve_mode: curve_point.curve_mode,
        corner_radius: curve_point.corner_radius,
        has_curve_from: curve_point.has_curve_from,
        has_curve_to: curve_point.has_curve_to,
    })
}

/// Decode a list of persisted curve points, failing on the first malformed one.
pub fn parse_curve_points(
    curve_points: &[CurvePoint],
    frame: &Frame,
) -> Result<Vec<ParsedCurvePoint>, Error> {
    curve_points
        .iter()
        .map(|curve_point| parse_curve_point(curve_point, frame))
        .collect()
}

/// Encode an absolute curve point back into its persisted form relative to `frame`.
///
/// This is the inverse of [`parse_curve_point`].
pub fn unparse_curve_point(parsed: &ParsedCurvePoint, frame: &Frame) -> CurvePoint {
    CurvePoint {
        point: stringify_point(frame.unscale_point(parsed.point)),
        curve_from: stringify_point(frame.unscale_point(parsed.curve_to)),
        curve_to: stringify_point(frame.unscale_point(parsed.curve_from)),
        curve_mode: parsed.curve_mode,
        corner_radius: parsed.corner_radius,
        has_curve_from: parsed.has_curve_from,
        has_curve_to: parsed.has_curve_to,
    }
}
