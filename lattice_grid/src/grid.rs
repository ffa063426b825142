// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The cell grid: an ordered map from cell keys to entity buckets.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use glam::DVec3;
use lattice_array::RefArray;

use crate::entity::GridEntity;
use crate::error::GridError;
use crate::types::CellKey;

/// Fraction of the cell size added to each side of a neighbor-query box so
/// candidates sitting exactly on a cell boundary are not missed to rounding.
const EDGE_EPSILON: f64 = 1e-6;

/// One live cell: its key and the entities currently assigned to it.
///
/// Buckets exist iff they have at least one member; the last removal (or an
/// explicit [`CellGrid::remove_cell`]) destroys the bucket.
pub struct CellBucket<E> {
    key: CellKey,
    members: RefArray<Rc<E>>,
}

impl<E> CellBucket<E> {
    fn new(key: CellKey) -> Self {
        Self {
            key,
            members: RefArray::new(),
        }
    }

    /// The key of the cell this bucket belongs to.
    pub const fn key(&self) -> CellKey {
        self.key
    }

    /// The entities currently assigned to this cell.
    pub fn members(&self) -> &RefArray<Rc<E>> {
        &self.members
    }

    /// Number of member entities.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the bucket has no members. Never true for a bucket observed
    /// through the grid.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<E> fmt::Debug for CellBucket<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellBucket")
            .field("key", &self.key)
            .field("members", &self.members.len())
            .finish()
    }
}

/// An ordered spatial index over integer 3D cell coordinates.
///
/// Cells are cubes of fixed edge length, identified by [`CellKey`]s ordered
/// x, then y, then z. Each live cell holds a bucket of entity references;
/// inserting under a new key creates the cell and removing the last member
/// destroys it. Positional access ([`cell_at`](Self::cell_at)) walks cells in
/// descending key order through a lazily rebuilt snapshot, and
/// [`neighbors_within`](Self::neighbors_within) gathers entities around a
/// point by probing the covered cell lattice and filtering by true Euclidean
/// distance.
///
/// All mutators take `&mut self`; the grid has no internal locking and is
/// meant for single-threaded simulation loops.
pub struct CellGrid<E: GridEntity> {
    cells: BTreeMap<CellKey, CellBucket<E>>,
    entry_count: usize,
    cell_size: f64,
    /// Live keys in descending order; `None` means a mutation invalidated it.
    unrolled: Option<Vec<CellKey>>,
}

impl<E: GridEntity> CellGrid<E> {
    /// Create an empty grid with the given cell edge length.
    ///
    /// `cell_size` is fixed for the grid's lifetime: keys are derived from it,
    /// so changing it while entities are inserted would leave every existing
    /// key stale. There is no supported way to do so.
    pub fn new(cell_size: f64) -> Self {
        debug_assert!(cell_size > 0.0, "cell size must be positive");
        Self {
            cells: BTreeMap::new(),
            entry_count: 0,
            cell_size,
            unrolled: None,
        }
    }

    /// The fixed cell edge length.
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of live cells.
    ///
    /// This is the grid's "length", distinct from [`entry_count`](Self::entry_count):
    /// a grid holding one cell of five entities has a cell count of 1.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Total entity memberships. An entity inserted under two keys counts
    /// twice.
    pub const fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Whether no cells are live.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The key of the cell covering `position` at this grid's cell size.
    pub fn key_at(&self, position: DVec3) -> CellKey {
        CellKey::at(position, self.cell_size)
    }

    /// Insert `entity` into the cell at `key`, creating the cell if needed.
    ///
    /// Writes `key` into the entity's tag, overwriting any previous value;
    /// the grid does not check whether the entity is already tracked
    /// elsewhere, so inserting the same entity under a second key leaves a
    /// duplicate membership the tag no longer points at (a caller error).
    ///
    /// On allocation failure the grid and the entity's tag are unchanged.
    pub fn insert(&mut self, key: CellKey, entity: Rc<E>) -> Result<(), GridError> {
        let prev = entity.cell_tag().get();
        entity.cell_tag().write(Some(key));

        let created = !self.cells.contains_key(&key);
        let bucket = self
            .cells
            .entry(key)
            .or_insert_with(|| CellBucket::new(key));
        let slot = bucket.members.len();
        if let Err(err) = bucket.members.resize(slot + 1) {
            if created {
                self.cells.remove(&key);
            }
            entity.cell_tag().write(prev);
            return Err(err.into());
        }
        bucket.members.set(slot, entity)?;
        self.entry_count += 1;
        self.unrolled = None;
        Ok(())
    }

    /// Whether a cell exists at `key`. O(log cells).
    pub fn contains_key(&self, key: CellKey) -> bool {
        self.cells.contains_key(&key)
    }

    /// Remove the whole cell at `key`, evicting every member.
    ///
    /// Clears each evicted entity's tag. Fails with
    /// [`GridError::UnknownCell`] when no cell exists at `key`.
    pub fn remove_cell(&mut self, key: CellKey) -> Result<(), GridError> {
        let bucket = self
            .cells
            .remove(&key)
            .ok_or(GridError::UnknownCell(key))?;
        self.entry_count -= bucket.members.len();
        for member in bucket.members.iter() {
            member.cell_tag().write(None);
        }
        self.unrolled = None;
        Ok(())
    }

    /// Remove `entity` from the cell its tag names.
    ///
    /// Exactly the first identity match is removed, so an entity inserted
    /// twice under the same key keeps one membership. The cell is destroyed
    /// when it empties.
    ///
    /// Fails with [`GridError::Untagged`] when the entity carries no tag,
    /// [`GridError::UnknownCell`] when the tagged cell no longer exists, and
    /// [`GridError::StaleTag`] when the tagged cell does not contain the
    /// entity.
    pub fn remove(&mut self, entity: &Rc<E>) -> Result<(), GridError> {
        let key = entity.cell_tag().get().ok_or(GridError::Untagged)?;
        let bucket = self
            .cells
            .get_mut(&key)
            .ok_or(GridError::UnknownCell(key))?;
        let index = bucket.members.find(entity).ok_or(GridError::StaleTag(key))?;

        entity.cell_tag().write(None);
        bucket.members.swap_remove(index)?;
        self.entry_count -= 1;
        if bucket.members.is_empty() {
            self.cells.remove(&key);
        }
        self.unrolled = None;
        Ok(())
    }

    /// The bucket at position `ordinal` in descending key order.
    ///
    /// The underlying snapshot is rebuilt lazily after any mutation, so
    /// ordinals are stable between mutations but not across them. Fails with
    /// [`GridError::OrdinalOutOfRange`] outside `[0, cell_count())`.
    pub fn cell_at(&mut self, ordinal: usize) -> Result<&CellBucket<E>, GridError> {
        let cells = self.cells.len();
        if ordinal >= cells {
            return Err(GridError::OrdinalOutOfRange { ordinal, cells });
        }
        let key = self.unroll()[ordinal];
        let bucket = self.cells.get(&key);
        debug_assert!(
            bucket.is_some(),
            "cache entry must resolve to a live cell"
        );
        bucket.ok_or(GridError::Inconsistent)
    }

    /// Iterate buckets in descending key order.
    pub fn iter(&self) -> impl Iterator<Item = &CellBucket<E>> {
        self.cells.values().rev()
    }

    /// Entities within `radius` of `center`, as a fresh array.
    ///
    /// See [`neighbors_within_into`](Self::neighbors_within_into).
    pub fn neighbors_within(
        &self,
        center: DVec3,
        radius: f64,
    ) -> Result<RefArray<Rc<E>>, GridError> {
        let mut out = RefArray::new();
        self.neighbors_within_into(center, radius, &mut out)?;
        Ok(out)
    }

    /// Append entities within `radius` of `center` to `out`.
    ///
    /// Probes every cell covered by the box `[center - radius, center + radius]`
    /// (expanded by a small fraction of the cell size against boundary
    /// rounding) and keeps each candidate whose distance to `center`, less
    /// the candidate's own radius, is at most `radius`. A candidate that is a
    /// member of more than one probed cell appears once per membership; the
    /// grid does not deduplicate.
    pub fn neighbors_within_into(
        &self,
        center: DVec3,
        radius: f64,
        out: &mut RefArray<Rc<E>>,
    ) -> Result<(), GridError> {
        let pad = DVec3::splat(radius + self.cell_size * EDGE_EPSILON);
        let lo = self.key_at(center - pad);
        let hi = self.key_at(center + pad);
        for x in lo.x..=hi.x {
            for y in lo.y..=hi.y {
                for z in lo.z..=hi.z {
                    let Some(bucket) = self.cells.get(&CellKey::new(x, y, z)) else {
                        continue;
                    };
                    for candidate in bucket.members.iter() {
                        let distance = candidate.position().distance(center) - candidate.radius();
                        if distance <= radius {
                            out.push(candidate.clone())?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn unroll(&mut self) -> &[CellKey] {
        self.unrolled
            .get_or_insert_with(|| self.cells.keys().rev().copied().collect())
    }
}

impl<E: GridEntity> fmt::Debug for CellGrid<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellGrid")
            .field("cell_size", &self.cell_size)
            .field("cells", &self.cells.len())
            .field("entries", &self.entry_count)
            .field("cache_dirty", &self.unrolled.is_none())
            .finish_non_exhaustive()
    }
}
