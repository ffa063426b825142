// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Lattice Grid: insert, radius query, and removal by entity.

use std::rc::Rc;

use glam::DVec3;
use lattice_grid::{CellGrid, CellTag, GridEntity};

struct Asteroid {
    position: DVec3,
    radius: f64,
    tag: CellTag,
}

impl GridEntity for Asteroid {
    fn position(&self) -> DVec3 {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn cell_tag(&self) -> &CellTag {
        &self.tag
    }
}

fn main() {
    let mut grid: CellGrid<Asteroid> = CellGrid::new(100.0);

    // Scatter a few asteroids and file each under its covering cell.
    let mut asteroids = Vec::new();
    for i in 0..10 {
        let a = Rc::new(Asteroid {
            position: DVec3::new(i as f64 * 40.0, 0.0, 0.0),
            radius: 5.0,
            tag: CellTag::new(),
        });
        grid.insert(grid.key_at(a.position), a.clone()).unwrap();
        asteroids.push(a);
    }
    println!("{grid:?}");

    // Broad-phase candidates around a point.
    let near = grid.neighbors_within(DVec3::new(100.0, 0.0, 0.0), 50.0).unwrap();
    println!("within 50 of x=100: {} candidates", near.len());

    // Cells in descending key order.
    for bucket in grid.iter() {
        println!("cell {:?}: {} members", bucket.key(), bucket.len());
    }

    // Removal needs only the entity; its tag remembers the cell.
    grid.remove(&asteroids[0]).unwrap();
    println!("after removal: {} cells, {} entries", grid.cell_count(), grid.entry_count());
}
