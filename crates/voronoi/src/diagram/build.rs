//! Divide driver: recursive split, base cases, merge + stitch bottom-up.

use tracing::{debug, trace};

use super::stitch::stitch;
use super::types::{Diagram, Edge, EdgeArena, SiteView};
use crate::error::VoronoiError;
use crate::geom::{Bounds, Point, Site, SiteId, Tolerance, VoronoiCfg};
use crate::hull::Hull;
use crate::input::validate_sites;

/// Hull and private edge arena of a solved sub-range.
struct Partial {
    hull: Hull,
    arena: EdgeArena,
}

/// Voronoi diagram of `points`, which must be sorted by `(x, y)` and distinct
/// (see `input::prepare_sites`). `bounds` only affects clipping for consumers.
pub fn build(points: &[Point], bounds: Bounds, cfg: &VoronoiCfg) -> Result<Diagram, VoronoiError> {
    cfg.validate()?;
    bounds.validate()?;
    validate_sites(points)?;
    let tol = Tolerance::for_points(points, cfg.eps);
    let mut sites: Vec<Site> = points.iter().copied().map(Site::new).collect();
    let Partial { hull, arena } = divide(&mut sites, 0, tol, cfg)?;
    debug!(
        sites = sites.len(),
        edges = arena.live_count(),
        hull = hull.len(),
        "diagram built"
    );
    Ok(Diagram::from_parts(sites, arena, hull, bounds, tol))
}

fn divide(sites: &mut [Site], base: usize, tol: Tolerance, cfg: &VoronoiCfg) -> Result<Partial, VoronoiError> {
    match sites.len() {
        0 => Err(VoronoiError::EmptyInput),
        1 => Ok(Partial {
            hull: Hull::single(SiteId(base)),
            arena: EdgeArena::default(),
        }),
        2 => {
            let a = (SiteId(base), sites[0].pos);
            let b = (SiteId(base + 1), sites[1].pos);
            let mut arena = EdgeArena::default();
            let id = arena.push(Edge::full(a, b));
            sites[0].attach(id);
            sites[1].attach(id);
            Ok(Partial {
                hull: Hull::pair(a, b),
                arena,
            })
        }
        n => {
            let mid = n / 2;
            let (lo, hi) = sites.split_at_mut(mid);
            let (left, right) = join(
                n >= cfg.parallel_threshold,
                || divide(lo, base, tol, cfg),
                || divide(hi, base + mid, tol, cfg),
            );
            let (mut left, right) = (left?, right?);

            let offset = left.arena.append(right.arena);
            for s in &mut sites[mid..] {
                s.rebase(offset);
            }
            let mut view = SiteView::new(sites, base);
            let report = left
                .hull
                .merge(&right.hull, &view)
                .ok_or(VoronoiError::MissingBridge)?;
            trace!(
                base,
                n,
                lower = ?report.lower,
                upper = ?report.upper,
                "hulls merged"
            );
            let stats = stitch(&mut view, &mut left.arena, &report, tol)?;
            trace!(
                base,
                n,
                steps = stats.steps,
                added = stats.added,
                trimmed = stats.trimmed,
                retired = stats.retired,
                "stitched"
            );
            Ok(left)
        }
    }
}

#[cfg(feature = "parallel")]
fn join<A, B, RA, RB>(parallel: bool, a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    if parallel {
        rayon::join(a, b)
    } else {
        (a(), b())
    }
}

#[cfg(not(feature = "parallel"))]
fn join<A, B, RA, RB>(_parallel: bool, a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA,
    B: FnOnce() -> RB,
{
    (a(), b())
}
