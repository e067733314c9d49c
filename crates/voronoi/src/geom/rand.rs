//! Random site sets (distinct integer grid points + replay tokens).
//!
//! Purpose
//! - Provide a small, deterministic sampler of distinct sites inside a
//!   `width × height` grid, used by the CLI, benches and randomized tests.
//!
//! Model
//! - Draw `(x, y)` uniformly in `[0, width) × [0, height)` and reject repeats
//!   until `count` distinct points are collected.
//! - The result is returned sorted by `(x, y)`, ready for `diagram::build`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::{Point, COORD_LIMIT};

/// Grid sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct GridCfg {
    pub count: usize,
    pub width: i64,
    pub height: i64,
}

impl Default for GridCfg {
    fn default() -> Self {
        // The reference driver uses a fixed 1250 × 1250 canvas.
        Self {
            count: 1000,
            width: 1250,
            height: 1250,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { seed, index: 0 }
    }

    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw `cfg.count` distinct sites, sorted by `(x, y)`.
///
/// Returns `None` if the grid is empty, exceeds the coordinate limit, or holds
/// fewer than `count` cells.
pub fn sample_sites(cfg: GridCfg, tok: ReplayToken) -> Option<Vec<Point>> {
    if cfg.width <= 0 || cfg.height <= 0 || cfg.width > COORD_LIMIT || cfg.height > COORD_LIMIT {
        return None;
    }
    let cells = (cfg.width as u128) * (cfg.height as u128);
    if (cfg.count as u128) > cells {
        return None;
    }
    let mut rng = tok.to_std_rng();
    let mut out = BTreeSet::new();
    while out.len() < cfg.count {
        let x = rng.gen_range(0..cfg.width);
        let y = rng.gen_range(0..cfg.height);
        out.insert(Point::new(x, y));
    }
    Some(out.into_iter().collect())
}
