// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lattice Grid: an ordered 3D cell index for broad-phase proximity queries.
//!
//! Lattice Grid maps integer cell coordinates to buckets of entity references
//! so real-time simulations can answer "what is near this point" without
//! scanning every object.
//!
//! - Space is cut into cubes of a fixed edge length; a [`CellKey`] names one
//!   cube and cells come into being on first insert and vanish on last
//!   removal.
//! - Entities are shared references ([`Rc`](alloc::rc::Rc)) implementing
//!   [`GridEntity`]: a position, an optional radius, and a [`CellTag`] the
//!   grid uses as a back-reference so removal needs only the entity.
//! - [`CellGrid::cell_at`] gives positional access over cells in descending
//!   key order through a lazily rebuilt snapshot.
//! - [`CellGrid::neighbors_within`] walks the cells covered by a query box
//!   and filters candidates by true Euclidean distance.
//!
//! Buckets and query results use [`RefArray`](lattice_array::RefArray), the
//! chunk-allocated reference array from [`lattice_array`].
//!
//! # Example
//!
//! ```rust
//! use glam::DVec3;
//! use lattice_grid::{CellGrid, CellKey, CellTag, GridEntity};
//! use std::rc::Rc;
//!
//! struct Ship {
//!     position: DVec3,
//!     tag: CellTag,
//! }
//!
//! impl GridEntity for Ship {
//!     fn position(&self) -> DVec3 {
//!         self.position
//!     }
//!     fn cell_tag(&self) -> &CellTag {
//!         &self.tag
//!     }
//! }
//!
//! let mut grid: CellGrid<Ship> = CellGrid::new(10.0);
//! let ship = Rc::new(Ship {
//!     position: DVec3::new(5.0, 5.0, 5.0),
//!     tag: CellTag::new(),
//! });
//!
//! // The caller derives the key from the position.
//! let key = grid.key_at(ship.position);
//! grid.insert(key, ship.clone()).unwrap();
//! assert!(grid.contains_key(CellKey::new(0, 0, 0)));
//!
//! let near = grid.neighbors_within(DVec3::new(4.0, 4.0, 4.0), 3.0).unwrap();
//! assert_eq!(near.len(), 1);
//!
//! // Removal works from the entity alone.
//! grid.remove(&ship).unwrap();
//! assert_eq!(grid.cell_count(), 0);
//! ```
//!
//! # Threading
//!
//! The grid is a single-threaded structure: every mutator takes `&mut self`
//! and there is no internal locking, so the exclusive-access rules of the
//! borrow checker are the whole concurrency story.

#![no_std]

extern crate alloc;

pub mod entity;
pub mod error;
pub mod grid;
pub mod types;

pub use entity::GridEntity;
pub use error::GridError;
pub use grid::{CellBucket, CellGrid};
pub use types::{CellKey, CellTag};
