//! Build the diagram of a reproducible random site set and print its counts.
//!
//! Usage:
//!   cargo run -p voronoi --example random_diagram -- [count] [seed]
//!
//! Defaults mirror the classic driver: 1000 sites on a 1250 × 1250 grid.

use voronoi::geom::rand::{sample_sites, GridCfg, ReplayToken};
use voronoi::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let count = args.next().and_then(|s| s.parse().ok()).unwrap_or(1000);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);
    let grid = GridCfg {
        count,
        ..GridCfg::default()
    };
    let Some(sites) = sample_sites(grid, ReplayToken::new(seed)) else {
        eprintln!("{count} sites do not fit a {}x{} grid", grid.width, grid.height);
        return;
    };
    let bounds = Bounds::from_size(grid.width as f64, grid.height as f64);
    let d = match build(&sites, bounds, &VoronoiCfg::default()) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("build failed: {e}");
            return;
        }
    };
    let open = d.edges().iter().filter(|e| e.is_open()).count();
    println!(
        "sites={} edges={} open={} vertices={} hull={} check={:?}",
        d.len(),
        d.edges().len(),
        open,
        d.vertices().len(),
        d.hull().len(),
        d.check()
    );
    for s in d.segments().iter().take(5) {
        println!(
            "edge {:>4}: sites ({}, {})  ({:.2}, {:.2}) -> ({:.2}, {:.2})",
            s.edge.0, s.sites.0 .0, s.sites.1 .0, s.from.x, s.from.y, s.to.x, s.to.y
        );
    }
}
