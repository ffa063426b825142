// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The entity capability trait consumed by the grid.

use glam::DVec3;

use crate::types::CellTag;

/// Capabilities the grid requires of tracked entities.
///
/// Entities are shared references whose lifetime the caller manages; the grid
/// only reads positions and radii during neighbor queries and uses the
/// [`CellTag`] to find an entity's cell again on removal. Because the
/// capabilities are trait bounds, an entity that cannot satisfy them fails to
/// compile rather than failing at insert time.
pub trait GridEntity {
    /// World-space position, read while filtering neighbor candidates.
    fn position(&self) -> DVec3;

    /// Collision radius, subtracted from the center distance before the
    /// query-radius comparison. The default treats the entity as a point.
    fn radius(&self) -> f64 {
        0.0
    }

    /// The tag slot the grid uses to find this entity again.
    ///
    /// Return a reference to a [`CellTag`] the entity owns. Sharing one tag
    /// between entities corrupts removal and is a caller error.
    fn cell_tag(&self) -> &CellTag;
}
