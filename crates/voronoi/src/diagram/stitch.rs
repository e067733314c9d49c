//! Bisector sweep between two partial diagrams.
//!
//! Model
//! - The chain starts at infinity on the bisector of the lower bridge and
//!   walks along `rot90(r - l)`, i.e. into the merged hull. Each step finds
//!   where the current bisector first leaves the cell of the current left site
//!   `l` or right site `r`, ends the segment there and moves to the neighbour
//!   across the crossed edge.
//! - A cell is the intersection of the half-planes of its edges, so the exit
//!   is the nearest crossing with the line of an edge whose other site the
//!   walk approaches (`lead > 0`, exact). Crossing parameters are real-valued
//!   and compared with the absolute tolerance.
//! - The chain may leave and re-enter a cell, so sites and edges can be met
//!   more than once. Only the edge crossed at the current start point is
//!   skipped; a repeated `(l, r)` pair means the walk is going in circles.
//! - When both sides leave their cells at the same point the left side
//!   advances first; the right side follows with a zero-length step.
//! - Crossed edges are trimmed after the walk, so every query during the walk
//!   sees the geometry of the two input diagrams. An edge crossed twice keeps
//!   the piece between the two cuts.
//! - The walk ends on the bisector of the upper bridge with a ray to infinity.
//!
//! Cleanup after the walk
//! - An edge of a chain site the walk never crossed lies wholly on one side of
//!   the chain; it is retired when an interior point is closer to one of the
//!   site's partners (opposite-side sites it was paired with).

use std::collections::{BTreeMap, HashSet};

use nalgebra::Vector2;
use tracing::{trace, warn};

use super::types::{Edge, EdgeArena, EdgeId, SiteView};
use crate::error::VoronoiError;
use crate::geom::{cross, lead, Bisector, Point, SiteId, SitePositions, Tolerance};
use crate::hull::{MergeReport, Side};

/// Counters of one stitch, for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct StitchReport {
    pub steps: usize,
    pub added: usize,
    pub trimmed: usize,
    pub retired: usize,
}

#[derive(Clone, Copy, Debug)]
struct Crossing {
    edge: EdgeId,
    other: SiteId,
    /// Parameter on the chain bisector.
    t: f64,
    /// Parameter on the crossed edge.
    s: f64,
}

/// Part of a crossed edge that survives, as a parameter range.
#[derive(Clone, Copy, Debug)]
struct Keep {
    lo: f64,
    hi: f64,
}

/// Stitch the chain between the left and right sites of `view`, whose edges
/// all live in `arena`.
pub(crate) fn stitch(
    view: &mut SiteView<'_>,
    arena: &mut EdgeArena,
    merge: &MergeReport,
    tol: Tolerance,
) -> Result<StitchReport, VoronoiError> {
    // every chain step joins a distinct Delaunay pair across the split
    let limit = 3 * view.len() + 3;
    sweep(view, arena, merge, tol, limit)
}

fn sweep(
    view: &mut SiteView<'_>,
    arena: &mut EdgeArena,
    merge: &MergeReport,
    tol: Tolerance,
    limit: usize,
) -> Result<StitchReport, VoronoiError> {
    let (Some(&l0), Some(&r0)) = (merge.removed_left.first(), merge.removed_right.first()) else {
        return Err(VoronoiError::MissingBridge);
    };
    let upper = (merge.upper.left, merge.upper.right);
    let (mut l, mut r) = (l0, r0);

    let mut start: Option<Vector2<f64>> = None;
    let mut at_start: Option<EdgeId> = None;
    let mut crossed: HashSet<EdgeId> = HashSet::new();
    let mut joined: HashSet<(SiteId, SiteId)> = HashSet::from([(l, r)]);
    let mut partners: BTreeMap<SiteId, Vec<SiteId>> = BTreeMap::new();
    let mut pending: Vec<Edge> = Vec::new();
    let mut keep: BTreeMap<EdgeId, Keep> = BTreeMap::new();
    let mut report = StitchReport::default();

    loop {
        report.steps += 1;
        if report.steps > limit {
            return Err(VoronoiError::IterationLimit { limit });
        }
        let (pl, pr) = (view.position(l), view.position(r));
        let line = Bisector::of(pl, pr);
        let t_from = start.map_or(f64::NEG_INFINITY, |p| line.param_of(p));
        pair(&mut partners, l, r);
        let ray = Edge {
            sites: (l, r),
            line,
            t_start: t_from,
            t_end: f64::INFINITY,
        };

        if (l, r) == upper {
            pending.push(ray);
            break;
        }

        let walk = Walk {
            line: &line,
            l: pl,
            r: pr,
            t_from,
            tol: tol.abs,
            skip: at_start,
        };
        let hit_l = walk.exit(view, arena, l, Side::Left);
        let hit_r = walk.exit(view, arena, r, Side::Right);
        let (c, side) = match (hit_l, hit_r) {
            (None, None) => {
                // both hulls topped out: close the chain with a ray
                warn!(l = l.0, r = r.0, "sweep ended below the upper bridge");
                pending.push(ray);
                break;
            }
            (Some(a), Some(b)) if a.t <= b.t + tol.abs => (a, Side::Left),
            (Some(a), None) => (a, Side::Left),
            (_, Some(b)) => (b, Side::Right),
        };
        trace!(l = l.0, r = r.0, t_from, t_hit = c.t, ?side, "chain segment");

        if c.t - t_from > tol.abs {
            pending.push(Edge {
                t_end: c.t,
                ..ray
            });
        }

        let (own, opposite) = match side {
            Side::Left => (pl, pr),
            Side::Right => (pr, pl),
        };
        let cut = kept_part(arena.get(c.edge), &c, view, own, opposite);
        keep.entry(c.edge)
            .and_modify(|k| {
                k.lo = k.lo.max(cut.lo);
                k.hi = k.hi.min(cut.hi);
            })
            .or_insert(cut);
        crossed.insert(c.edge);

        match side {
            Side::Left => l = c.other,
            Side::Right => r = c.other,
        }
        if !joined.insert((l, r)) {
            return Err(VoronoiError::SweepStalled { left: l, right: r });
        }
        at_start = Some(c.edge);
        start = Some(line.at(c.t));
    }

    // Uncrossed edges that ended up in a partner's territory.
    for (&s, opposite) in &partners {
        let ps = view.position(s);
        let handles: Vec<EdgeId> = view.site(s).edges().to_vec();
        for id in handles {
            if crossed.contains(&id) || !arena.is_live(id) {
                continue;
            }
            let q = arena.get(id).interior_point(tol.reach);
            if opposite
                .iter()
                .any(|&o| side_of(q, ps, view.position(o)) < -tol.abs)
            {
                retire(view, arena, id);
                report.retired += 1;
            }
        }
    }

    for (id, k) in keep {
        if !arena.is_live(id) {
            continue;
        }
        if k.hi - k.lo <= tol.abs {
            retire(view, arena, id);
            report.retired += 1;
            continue;
        }
        let old = *arena.get(id);
        let new = arena.push(old.restricted(k.lo, k.hi));
        arena.retire(id);
        view.site_mut(old.sites.0).replace(id, new);
        view.site_mut(old.sites.1).replace(id, new);
        report.trimmed += 1;
    }

    for e in pending {
        let (a, b) = e.sites;
        let id = arena.push(e);
        view.site_mut(a).attach(id);
        view.site_mut(b).attach(id);
        report.added += 1;
    }
    Ok(report)
}

/// Geometry of the current chain step.
struct Walk<'a> {
    line: &'a Bisector,
    l: Point,
    r: Point,
    t_from: f64,
    tol: f64,
    /// Edge crossed at the start point of this step.
    skip: Option<EdgeId>,
}

impl Walk<'_> {
    /// Where the chain leaves `cur`'s cell at or after `t_from`.
    ///
    /// Several edges can meet the chain within tolerance of each other (a
    /// vertex shared by cocircular sites). The walk then continues to the tied
    /// site that leaves every other tied site behind the next bisector.
    fn exit(&self, view: &SiteView<'_>, arena: &EdgeArena, cur: SiteId, side: Side) -> Option<Crossing> {
        let pc = view.position(cur);
        let mut found: Vec<Crossing> = Vec::new();
        for &id in view.site(cur).edges() {
            if self.skip == Some(id) || !arena.is_live(id) {
                continue;
            }
            let edge = arena.get(id);
            let Some(other) = edge.other(cur) else {
                continue;
            };
            if lead(self.l, self.r, pc, view.position(other)) <= 0 {
                continue;
            }
            let Some((t, s)) = self.line.intersect(&edge.line) else {
                continue;
            };
            if t < self.t_from - self.tol {
                continue;
            }
            found.push(Crossing {
                edge: id,
                other,
                t,
                s,
            });
        }
        let t_min = found.iter().map(|c| c.t).fold(f64::INFINITY, f64::min);
        found.retain(|c| c.t <= t_min + self.tol);
        if found.len() < 2 {
            return found.pop();
        }
        // behind(o, c): c stays behind the bisector the walk takes after
        // stepping onto o
        let behind = |o: Point, c: Point| match side {
            Side::Left => cross(o, self.r, c) <= 0,
            Side::Right => cross(self.l, o, c) <= 0,
        };
        found
            .iter()
            .copied()
            .find(|a| {
                let pa = view.position(a.other);
                found
                    .iter()
                    .all(|b| b.edge == a.edge || behind(pa, view.position(b.other)))
            })
            .or_else(|| found.iter().copied().min_by(|a, b| a.t.total_cmp(&b.t)))
    }
}

/// Part of the crossed edge on the side of `own` (the chain site whose cell
/// the edge bounds) rather than `opposite`.
fn kept_part(edge: &Edge, c: &Crossing, view: &SiteView<'_>, own: Point, opposite: Point) -> Keep {
    let (a, b) = (view.position(edge.sites.0), view.position(edge.sites.1));
    // integer direction of the edge line: rot90(b - a)
    let (dx, dy) = (-((b.y - a.y) as i128), (b.x - a.x) as i128);
    let (wx, wy) = ((own.x - opposite.x) as i128, (own.y - opposite.y) as i128);
    let s = c.s.clamp(edge.t_start, edge.t_end);
    if dx * wx + dy * wy > 0 {
        Keep {
            lo: s,
            hi: edge.t_end,
        }
    } else {
        Keep {
            lo: edge.t_start,
            hi: s,
        }
    }
}

/// Signed distance of `q` from the bisector of `(s, o)`, positive on `s`'s side.
fn side_of(q: Vector2<f64>, s: Point, o: Point) -> f64 {
    let (ps, po) = (s.to_vec(), o.to_vec());
    let w = ps - po;
    (q - (ps + po) * 0.5).dot(&w) / w.norm()
}

fn pair(partners: &mut BTreeMap<SiteId, Vec<SiteId>>, l: SiteId, r: SiteId) {
    for (a, b) in [(l, r), (r, l)] {
        let list = partners.entry(a).or_default();
        if !list.contains(&b) {
            list.push(b);
        }
    }
}

fn retire(view: &mut SiteView<'_>, arena: &mut EdgeArena, id: EdgeId) {
    let (a, b) = arena.get(id).sites;
    view.site_mut(a).detach(id);
    view.site_mut(b).detach(id);
    arena.retire(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Site;
    use crate::hull::Bridge;

    /// Left sites surrounding a right site: the chain around the right site
    /// closes on itself. The last left site has no edges and is never reached.
    fn ring_around_right_site() -> (Vec<Site>, EdgeArena, MergeReport) {
        let (a, b, d, f, c) = (
            Point::new(0, -10),
            Point::new(9, 5),
            Point::new(-9, 5),
            Point::new(-40, 0),
            Point::new(0, 0),
        );
        let mut sites: Vec<Site> = [a, b, d, f, c].into_iter().map(Site::new).collect();
        let mut arena = EdgeArena::default();
        for (i, j) in [(0, 2), (2, 1), (1, 0)] {
            let id = arena.push(Edge::full((SiteId(i), sites[i].pos), (SiteId(j), sites[j].pos)));
            sites[i].attach(id);
            sites[j].attach(id);
        }
        let report = MergeReport {
            removed_left: vec![SiteId(0), SiteId(3)],
            removed_right: vec![SiteId(4)],
            lower: Bridge {
                left: SiteId(0),
                right: SiteId(4),
            },
            upper: Bridge {
                left: SiteId(3),
                right: SiteId(4),
            },
        };
        (sites, arena, report)
    }

    fn tol() -> Tolerance {
        Tolerance {
            abs: 1e-9,
            reach: 50.0,
        }
    }

    #[test]
    fn walking_in_circles_stalls() {
        let (mut sites, mut arena, report) = ring_around_right_site();
        let mut view = SiteView::new(&mut sites, 0);
        assert_eq!(
            stitch(&mut view, &mut arena, &report, tol()),
            Err(VoronoiError::SweepStalled {
                left: SiteId(0),
                right: SiteId(4)
            })
        );
    }

    #[test]
    fn step_budget_is_enforced() {
        let (mut sites, mut arena, report) = ring_around_right_site();
        let mut view = SiteView::new(&mut sites, 0);
        assert_eq!(
            sweep(&mut view, &mut arena, &report, tol(), 2),
            Err(VoronoiError::IterationLimit { limit: 2 })
        );
    }

    #[test]
    fn empty_frame_is_a_missing_bridge() {
        let (mut sites, mut arena, mut report) = ring_around_right_site();
        report.removed_right.clear();
        let mut view = SiteView::new(&mut sites, 0);
        assert_eq!(
            stitch(&mut view, &mut arena, &report, tol()),
            Err(VoronoiError::MissingBridge)
        );
    }

    #[test]
    fn unreached_bridge_closes_with_a_ray() {
        // Square halves with the upper bridge pointing at a pair the walk
        // never joins: the chain still ends in a ray.
        let pts = [Point::new(0, 0), Point::new(0, 10), Point::new(10, 0), Point::new(10, 10)];
        let mut sites: Vec<Site> = pts.iter().copied().map(Site::new).collect();
        let mut arena = EdgeArena::default();
        for (i, j) in [(0, 1), (2, 3)] {
            let id = arena.push(Edge::full((SiteId(i), pts[i]), (SiteId(j), pts[j])));
            sites[i].attach(id);
            sites[j].attach(id);
        }
        let report = MergeReport {
            removed_left: vec![SiteId(0), SiteId(1)],
            removed_right: vec![SiteId(2), SiteId(3)],
            lower: Bridge {
                left: SiteId(0),
                right: SiteId(2),
            },
            upper: Bridge {
                left: SiteId(0),
                right: SiteId(3),
            },
        };
        let mut view = SiteView::new(&mut sites, 0);
        let stats = stitch(&mut view, &mut arena, &report, tol()).unwrap();
        assert!(stats.added >= 1);
        let last = arena.iter_live().last().map(|(_, e)| *e).unwrap();
        assert!(last.t_end.is_infinite());
    }
}
