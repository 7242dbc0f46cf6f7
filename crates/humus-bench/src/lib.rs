//! Benchmark profiles and utilities for the Humus soil-grid engine.
//!
//! Provides pre-built [`ScoreboardConfig`] profiles and deterministic
//! volume-object layouts for benchmarking:
//!
//! - [`reference_profile`]: 40x40x60 soil column (96K boxes), layers
//!   thickening with depth
//! - [`stress_profile`]: 100x100x100 column (1M boxes)
//! - [`stone_layout`]: non-overlapping cuboid stones placed from a seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashSet;

use humus_core::Stratum;
use humus_grid::WrapConfig;
use humus_scoreboard::ScoreboardConfig;
use humus_test_utils::{fixtures, Cuboid};

/// Depth boundaries for `layers` layers, the first `top` thick and each
/// following one 5% thicker.
pub fn graded_depths(layers: u32, top: f64) -> Vec<f64> {
    let mut z = Vec::with_capacity(layers as usize + 1);
    let mut depth = 0.0;
    let mut width = top;
    z.push(depth);
    for _ in 0..layers {
        depth += width;
        width *= 1.05;
        z.push(depth);
    }
    z
}

/// Build the reference benchmark profile: 40x40x60 boxes under a
/// 20 x 20 surface, periodic in X and Y.
pub fn reference_profile() -> ScoreboardConfig {
    ScoreboardConfig::new(
        Stratum::Soil,
        fixtures::uniform_boundaries(0.0, 20.0, 40),
        fixtures::uniform_boundaries(0.0, 20.0, 40),
        graded_depths(60, 0.1),
    )
    .with_wrap(WrapConfig::XY)
}

/// Build the stress benchmark profile: 100x100x100 boxes.
///
/// Same surface as [`reference_profile`] at roughly 10x the box count.
pub fn stress_profile() -> ScoreboardConfig {
    ScoreboardConfig::new(
        Stratum::Soil,
        fixtures::uniform_boundaries(0.0, 20.0, 100),
        fixtures::uniform_boundaries(0.0, 20.0, 100),
        graded_depths(100, 0.05),
    )
    .with_wrap(WrapConfig::XY)
}

/// Place `count` stones on distinct cells of a `lattice`^3 grid laid
/// over the profile's domain.
///
/// Each stone spans the middle 80% of its lattice cell along every
/// axis, so no two stones touch. Indices run from 1 in placement order.
/// The layout is a pure function of `seed`.
pub fn stone_layout(
    config: &ScoreboardConfig,
    lattice: u32,
    count: u32,
    seed: u64,
) -> Vec<Cuboid> {
    let l = lattice.max(1) as u64;
    let cells = l * l * l;
    let count = (count as u64).min(cells);

    let span = |b: &[f64]| (b[0], (b[b.len() - 1] - b[0]) / l as f64);
    let (x0, sx) = span(&config.x);
    let (y0, sy) = span(&config.y);
    let (z0, sz) = span(&config.z);

    let mut occupied = HashSet::with_capacity(count as usize);
    let mut stones = Vec::with_capacity(count as usize);
    for i in 0..count {
        let mut slot = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(i.wrapping_mul(1442695040888963407))
            % cells;
        while !occupied.insert(slot) {
            slot = (slot + 1) % cells;
        }
        let (cx, cy, cz) = (slot % l, (slot / l) % l, slot / (l * l));
        let start = |origin: f64, step: f64, c: u64| origin + step * (c as f64 + 0.1);
        let min = (start(x0, sx, cx), start(y0, sy, cy), start(z0, sz, cz));
        let max = (min.0 + 0.8 * sx, min.1 + 0.8 * sy, min.2 + 0.8 * sz);
        stones.push(Cuboid::new(i as u32 + 1, min, max));
    }
    stones
}
