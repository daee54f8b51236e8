// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reusing compiled paths across frames.

use std::collections::hash_map::{DefaultHasher, Entry};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use log::debug;

use crate::{compile_path, CurvePoint, Error, Frame, ShapePath};

/// Number of [`PathCache::maintain`] calls an entry survives without being used.
const MAX_ENTRY_AGE: u64 = 2;

/// The inputs a compiled path depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PathKey {
    points_hash: u64,
    frame: [u64; 4],
    fixed_radius: u64,
}

impl PathKey {
    pub fn new(points: &[CurvePoint], frame: &Frame, fixed_radius: f64) -> Self {
        let mut hasher = DefaultHasher::new();
        points.len().hash(&mut hasher);
        for point in points {
            point.point.hash(&mut hasher);
            point.curve_from.hash(&mut hasher);
            point.curve_to.hash(&mut hasher);
            u8::from(point.curve_mode).hash(&mut hasher);
            point.corner_radius.to_bits().hash(&mut hasher);
            point.has_curve_from.hash(&mut hasher);
            point.has_curve_to.hash(&mut hasher);
        }
        Self {
            points_hash: hasher.finish(),
            frame: [
                frame.x.to_bits(),
                frame.y.to_bits(),
                frame.width.to_bits(),
                frame.height.to_bits(),
            ],
            fixed_radius: fixed_radius.to_bits(),
        }
    }
}

/// A cache of compiled shape paths.
///
/// Call [`PathCache::maintain`] once per frame to drop the paths that are no longer drawn.
#[derive(Debug, Default)]
pub struct PathCache {
    epoch: u64,
    map: HashMap<PathKey, (ShapePath, u64)>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the next epoch, evicting paths that haven't been used recently.
    pub fn maintain(&mut self) {
        self.epoch += 1;
        let before = self.map.len();
        let epoch = self.epoch;
        self.map
            .retain(|_key, (_path, last_used)| *last_used + MAX_ENTRY_AGE >= epoch);
        let evicted = before - self.map.len();
        if evicted > 0 {
            debug!("Evicted {evicted} cached paths, {} remain", self.map.len());
        }
    }

    /// Return the path compiled from these inputs, compiling it if it isn't cached.
    ///
    /// Errors are returned as from [`compile_path`] and nothing is cached for them.
    pub fn get_or_compile(
        &mut self,
        points: &[CurvePoint],
        frame: &Frame,
        fixed_radius: f64,
    ) -> Result<&ShapePath, Error> {
        let key = PathKey::new(points, frame, fixed_radius);
        let epoch = self.epoch;
        match self.map.entry(key) {
            Entry::Occupied(entry) => {
                let (path, last_used) = entry.into_mut();
                *last_used = epoch;
                Ok(path)
            }
            Entry::Vacant(entry) => {
                let path = compile_path(points, frame, fixed_radius)?;
                let (path, _) = entry.insert((path, epoch));
                Ok(path)
            }
        }
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
