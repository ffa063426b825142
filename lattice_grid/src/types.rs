// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell coordinates and the entity-side cell tag.

use core::cell::Cell;

use glam::DVec3;

/// Integer coordinate of a cubic grid cell.
///
/// Keys order by `x`, then `y`, then `z` (the derived lexicographic order);
/// two keys are equal iff all three components match. This total order is
/// what the cell map sorts by and what positional access walks in reverse.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    /// Cell coordinate along x.
    pub x: i64,
    /// Cell coordinate along y.
    pub y: i64,
    /// Cell coordinate along z.
    pub z: i64,
}

impl CellKey {
    /// Create a key from explicit cell coordinates.
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// The key of the cell covering `position` at the given cell size.
    ///
    /// Each coordinate maps by `floor(coordinate / cell_size)`, so negative
    /// positions snap toward negative infinity rather than toward zero.
    pub fn at(position: DVec3, cell_size: f64) -> Self {
        debug_assert!(cell_size > 0.0, "cell size must be positive");
        let scaled = (position / cell_size).floor();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Cell coordinates are intentionally 64-bit; the cast saturates at the i64 range."
        )]
        let (x, y, z) = (scaled.x as i64, scaled.y as i64, scaled.z as i64);
        Self::new(x, y, z)
    }
}

/// The back-reference a tracked entity carries.
///
/// Embed one in each entity type and hand it out through
/// [`GridEntity::cell_tag`](crate::GridEntity::cell_tag). The grid writes the
/// entity's current [`CellKey`] here on insert and clears it when the entity
/// leaves, so removal works from the entity alone without the caller
/// repeating the key. Callers may read the tag but only the grid writes it.
///
/// An entity can be tracked by at most one cell at a time; inserting it again
/// overwrites the tag, and keeping the older membership alive is a caller
/// error the grid does not detect.
#[derive(Debug, Default)]
pub struct CellTag(Cell<Option<CellKey>>);

impl CellTag {
    /// Create an empty (untracked) tag.
    pub const fn new() -> Self {
        Self(Cell::new(None))
    }

    /// The key of the cell currently tracking the entity, if any.
    pub fn get(&self) -> Option<CellKey> {
        self.0.get()
    }

    /// Whether a grid currently tracks the entity.
    pub fn is_tracked(&self) -> bool {
        self.0.get().is_some()
    }

    pub(crate) fn write(&self, key: Option<CellKey>) {
        self.0.set(key);
    }
}
