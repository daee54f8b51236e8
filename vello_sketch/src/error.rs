// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

use crate::PathOp;

/// Errors that can occur while compiling Sketch geometry.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A persisted point wasn't of the form `{x, y}`.
    #[error("Couldn't parse point from {0:?}")]
    MalformedPoint(String),
    /// A persisted curve mode wasn't one of the Sketch curve mode values.
    #[error("Unknown curve mode {0}")]
    UnknownCurveMode(u8),
    /// A shape path was compiled from an empty list of points.
    #[error("Can't compile a path without any curve points")]
    EmptyPath,
    /// A gradient paint was requested for a gradient without stops.
    #[error("Can't build a gradient without any color stops")]
    EmptyGradient,
    /// The path backend couldn't stroke a path.
    ///
    /// This usually means the path was degenerate.
    #[error("Couldn't stroke path")]
    StrokeFailed,
    /// The path backend couldn't combine two paths.
    #[error("Path operation {0:?} failed")]
    PathOpFailed(PathOp),
}
