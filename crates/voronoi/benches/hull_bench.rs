//! Criterion benchmarks for the hull merge against the monotone-chain baseline.
//! Focus sizes: n in {100, 1_000, 10_000} points split at the median.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use voronoi::hull::baseline::convex_hull;
use voronoi::prelude::*;

/// Points on a noisy circle, sorted: most of them are hull vertices.
fn ring(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pts: Vec<Point> = (0..n)
        .map(|_| {
            let theta: f64 = rng.gen::<f64>() * std::f64::consts::TAU;
            let r = 1.0e6 * rng.gen_range(0.999..1.0);
            Point::new((r * theta.cos()) as i64, (r * theta.sin()) as i64)
        })
        .collect();
    pts.sort();
    pts.dedup();
    pts
}

fn halves(pts: &[Point]) -> (Hull, Hull) {
    let mid = pts.len() / 2;
    let left: Vec<SiteId> = (0..mid).map(SiteId).collect();
    let right: Vec<SiteId> = (mid..pts.len()).map(SiteId).collect();
    (
        Hull::of_sites(&left, pts).unwrap(),
        Hull::of_sites(&right, pts).unwrap(),
    )
}

fn bench_hull(c: &mut Criterion) {
    let mut group = c.benchmark_group("hull");
    for &n in &[100usize, 1_000, 10_000] {
        let pts = ring(n, 7);
        group.bench_with_input(BenchmarkId::new("merge", n), &pts, |b, pts| {
            b.iter_batched(
                || halves(pts),
                |(mut left, right)| left.merge(&right, &pts[..]).unwrap(),
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("monotone_chain", n), &pts, |b, pts| {
            b.iter(|| convex_hull(pts))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hull);
criterion_main!(benches);
