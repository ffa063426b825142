// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for grid operations.

use core::fmt;

use lattice_array::ArrayError;

use crate::types::CellKey;

/// Errors reported by [`CellGrid`](crate::CellGrid) operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// No cell exists at the given key.
    UnknownCell(CellKey),
    /// The entity carries no cell tag; no grid is tracking it.
    Untagged,
    /// The entity's tag names a cell that does not contain it.
    StaleTag(CellKey),
    /// Positional access outside the live cell range.
    OrdinalOutOfRange {
        /// The requested ordinal.
        ordinal: usize,
        /// Number of live cells at the time of the call.
        cells: usize,
    },
    /// Backing storage could not grow.
    OutOfMemory,
    /// The flattened cell cache disagrees with the cell map.
    ///
    /// This is a programming-invariant violation, not a recoverable
    /// condition; debug builds assert before returning it.
    Inconsistent,
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCell(k) => {
                write!(f, "no cell at key ({}, {}, {})", k.x, k.y, k.z)
            }
            Self::Untagged => write!(f, "entity is not tracked by the grid (no cell tag)"),
            Self::StaleTag(k) => {
                write!(
                    f,
                    "entity tagged with cell ({}, {}, {}) but not a member of it",
                    k.x, k.y, k.z
                )
            }
            Self::OrdinalOutOfRange { ordinal, cells } => {
                write!(f, "cell ordinal {ordinal} not in range ({cells} cells)")
            }
            Self::OutOfMemory => write!(f, "insufficient free memory"),
            Self::Inconsistent => write!(f, "cell cache does not match the cell map"),
        }
    }
}

impl core::error::Error for GridError {}

impl From<ArrayError> for GridError {
    fn from(err: ArrayError) -> Self {
        match err {
            ArrayError::OutOfMemory => Self::OutOfMemory,
            // Any other array failure escaping the grid's own bookkeeping
            // means the grid indexed its buckets wrongly.
            _ => Self::Inconsistent,
        }
    }
}
