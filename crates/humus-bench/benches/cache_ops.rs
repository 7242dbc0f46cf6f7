//! Criterion benchmarks for the coincidence and transfer-restriction
//! caches.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use humus_bench::{reference_profile, stone_layout};
use humus_core::{BoxIndex, VolumeObjectIndex};
use humus_grid::Face;
use humus_scoreboard::{Scoreboard, VolumeObjectCoordinator};

const STONES: u32 = 20;

fn setup() -> (Scoreboard, VolumeObjectCoordinator) {
    let config = reference_profile();
    let mut sb = Scoreboard::new(&config).unwrap();
    let mut volumes = VolumeObjectCoordinator::new();
    for stone in stone_layout(&config, 5, STONES, 42) {
        volumes.register_volume_object(stone.boxed()).unwrap();
    }
    volumes.use_scoreboard(&mut sb).unwrap();
    (sb, volumes)
}

/// Benchmark: Background proportion for every box on a fresh scoreboard,
/// so each query fills the cache for its box.
fn bench_coincidence_cold(c: &mut Criterion) {
    let (_, volumes) = setup();

    c.bench_function("coincidence_cold_96k", |b| {
        b.iter_batched(
            || Scoreboard::new(&reference_profile()).unwrap(),
            |mut sb| {
                for i in 0..sb.box_count() {
                    let p = sb
                        .coincident_proportion(BoxIndex(i), VolumeObjectIndex::BACKGROUND, Some(&volumes))
                        .unwrap();
                    black_box(p);
                }
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

/// Benchmark: Every object's proportion for every box, cache already
/// populated.
fn bench_coincidence_warm(c: &mut Criterion) {
    let (mut sb, volumes) = setup();
    for i in 0..sb.box_count() {
        sb.coincident_proportion(BoxIndex(i), VolumeObjectIndex::BACKGROUND, Some(&volumes))
            .unwrap();
    }

    c.bench_function("coincidence_warm_96k", |b| {
        b.iter(|| {
            for i in 0..sb.box_count() {
                for o in 0..=STONES {
                    let p = sb
                        .coincident_proportion(BoxIndex(i), VolumeObjectIndex(o), Some(&volumes))
                        .unwrap();
                    black_box(p);
                }
            }
        });
    });
}

/// Benchmark: Restriction across the positive-X face of every box,
/// cache already populated.
fn bench_restriction_warm(c: &mut Criterion) {
    let (mut sb, volumes) = setup();
    let pairs: Vec<(BoxIndex, BoxIndex)> = (0..sb.box_count())
        .map(|i| {
            let (to, _) = sb.neighbour(BoxIndex(i), Face::PosX).unwrap().unwrap();
            (BoxIndex(i), to)
        })
        .collect();
    for &(from, to) in &pairs {
        sb.transfer_restriction(from, to, Face::PosX, Some(&volumes))
            .unwrap();
    }

    c.bench_function("restriction_warm_96k", |b| {
        b.iter(|| {
            for &(from, to) in &pairs {
                let r = sb
                    .transfer_restriction(from, to, Face::PosX, Some(&volumes))
                    .unwrap();
                black_box(r.transfer_factor());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_coincidence_cold,
    bench_coincidence_warm,
    bench_restriction_warm
);
criterion_main!(benches);
