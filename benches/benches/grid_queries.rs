// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::DVec3;
use lattice_array::RefArray;
use lattice_grid::{CellGrid, CellTag, GridEntity};

struct Mote {
    position: DVec3,
    radius: f64,
    tag: CellTag,
}

impl GridEntity for Mote {
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

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_motes(count: usize, extent: f64) -> Vec<Rc<Mote>> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(Rc::new(Mote {
            position: DVec3::new(
                rng.next_f64() * extent,
                rng.next_f64() * extent,
                rng.next_f64() * extent,
            ),
            radius: rng.next_f64() * 2.0,
            tag: CellTag::new(),
        }));
    }
    out
}

fn populated(motes: &[Rc<Mote>], cell_size: f64) -> CellGrid<Mote> {
    let mut grid = CellGrid::new(cell_size);
    for m in motes {
        grid.insert(grid.key_at(m.position), m.clone()).unwrap();
    }
    grid
}

fn bench_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");
    for &n in &[1_000usize, 10_000] {
        let motes = gen_motes(n, 1_000.0);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("insert_remove_n{}", n), |b| {
            b.iter_batched(
                || motes.clone(),
                |motes| {
                    let mut grid: CellGrid<Mote> = CellGrid::new(25.0);
                    for m in &motes {
                        let _ = grid.insert(grid.key_at(m.position), m.clone());
                    }
                    for m in &motes {
                        let _ = grid.remove(m);
                    }
                    black_box(grid.cell_count());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbors");
    for &n in &[1_000usize, 10_000] {
        let motes = gen_motes(n, 1_000.0);
        let grid = populated(&motes, 25.0);
        let mut rng = Rng::new(0xBADC_F00D_1234_5678);
        let centers: Vec<DVec3> = (0..64)
            .map(|_| {
                DVec3::new(
                    rng.next_f64() * 1_000.0,
                    rng.next_f64() * 1_000.0,
                    rng.next_f64() * 1_000.0,
                )
            })
            .collect();
        group.throughput(Throughput::Elements(centers.len() as u64));
        group.bench_function(format!("radius50_n{}", n), |b| {
            b.iter(|| {
                let mut hits = 0usize;
                for &center in &centers {
                    let near = grid.neighbors_within(center, 50.0).unwrap();
                    hits += near.len();
                }
                black_box(hits);
            })
        });
    }
    group.finish();
}

fn bench_positional_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("positional");
    let motes = gen_motes(10_000, 1_000.0);
    group.bench_function("rebuild_and_walk", |b| {
        b.iter_batched(
            || populated(&motes, 25.0),
            |mut grid| {
                let mut members = 0usize;
                for ordinal in 0..grid.cell_count() {
                    members += grid.cell_at(ordinal).unwrap().len();
                }
                black_box(members);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_array_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("array");
    let motes = gen_motes(10_000, 1_000.0);
    group.throughput(Throughput::Elements(motes.len() as u64));
    group.bench_function("push_swap_remove", |b| {
        b.iter(|| {
            let mut arr = RefArray::new();
            for m in &motes {
                arr.push(m.clone()).unwrap();
            }
            while !arr.is_empty() {
                let _ = arr.swap_remove(0);
            }
            black_box(arr.capacity());
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_insert_remove,
    bench_neighbors,
    bench_positional_rebuild,
    bench_array_churn
);
criterion_main!(benches);
