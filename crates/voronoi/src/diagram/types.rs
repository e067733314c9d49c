//! Edges, the edge arena and the finished diagram.

use nalgebra::Vector2;

use crate::geom::{Bisector, Bounds, Point, Site, SiteId, SitePositions, Tolerance};
use crate::hull::Hull;

/// Handle of an edge; dense in a finished `Diagram`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

/// Piece of the bisector of two sites, `line.at(t)` for `t ∈ [t_start, t_end]`.
///
/// Either bound may be infinite (open toward infinity). Edges are never
/// mutated in place: a trim publishes a restricted copy under a new handle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub sites: (SiteId, SiteId),
    pub line: Bisector,
    pub t_start: f64,
    pub t_end: f64,
}

impl Edge {
    /// Whole bisector of two sites.
    pub fn full(a: (SiteId, Point), b: (SiteId, Point)) -> Self {
        Self {
            sites: (a.0, b.0),
            line: Bisector::of(a.1, b.1),
            t_start: f64::NEG_INFINITY,
            t_end: f64::INFINITY,
        }
    }

    #[inline]
    pub fn start(&self) -> Option<Vector2<f64>> {
        self.t_start.is_finite().then(|| self.line.at(self.t_start))
    }

    #[inline]
    pub fn end(&self) -> Option<Vector2<f64>> {
        self.t_end.is_finite().then(|| self.line.at(self.t_end))
    }

    /// At least one end runs off to infinity.
    #[inline]
    pub fn is_open(&self) -> bool {
        !(self.t_start.is_finite() && self.t_end.is_finite())
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.t_end - self.t_start
    }

    #[inline]
    pub fn touches(&self, s: SiteId) -> bool {
        self.sites.0 == s || self.sites.1 == s
    }

    /// The site across the edge from `s`, if `s` is one of its sites.
    #[inline]
    pub fn other(&self, s: SiteId) -> Option<SiteId> {
        if self.sites.0 == s {
            Some(self.sites.1)
        } else if self.sites.1 == s {
            Some(self.sites.0)
        } else {
            None
        }
    }

    /// A point strictly inside the edge: the midpoint of a finite edge, `reach`
    /// away from the finite end of a ray, the anchor of a full line.
    pub fn interior_point(&self, reach: f64) -> Vector2<f64> {
        match (self.t_start.is_finite(), self.t_end.is_finite()) {
            (true, true) => self.line.at(0.5 * (self.t_start + self.t_end)),
            (true, false) => self.line.at(self.t_start + reach),
            (false, true) => self.line.at(self.t_end - reach),
            (false, false) => self.line.anchor,
        }
    }

    /// Finite segment of the edge inside `bounds`, if any.
    #[inline]
    pub fn clipped(&self, bounds: &Bounds) -> Option<(Vector2<f64>, Vector2<f64>)> {
        self.line.clip(self.t_start, self.t_end, bounds)
    }

    #[inline]
    pub(crate) fn restricted(&self, t_start: f64, t_end: f64) -> Self {
        Self {
            t_start,
            t_end,
            ..*self
        }
    }
}

/// Edge clipped to the diagram bounds, as handed to consumers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub edge: EdgeId,
    pub sites: (SiteId, SiteId),
    pub from: Vector2<f64>,
    pub to: Vector2<f64>,
}

/// Sole owner of the edges of a (partial) diagram.
///
/// Retired edges keep their slot so handles stay stable until the final
/// compaction in `Diagram::from_parts`.
#[derive(Clone, Debug, Default)]
pub(crate) struct EdgeArena {
    edges: Vec<Edge>,
    live: Vec<bool>,
    n_live: usize,
}

impl EdgeArena {
    pub fn push(&mut self, e: Edge) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(e);
        self.live.push(true);
        self.n_live += 1;
        id
    }

    #[inline]
    pub fn get(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    #[inline]
    pub fn is_live(&self, id: EdgeId) -> bool {
        self.live.get(id.0).copied().unwrap_or(false)
    }

    pub fn retire(&mut self, id: EdgeId) {
        if self.is_live(id) {
            self.live[id.0] = false;
            self.n_live -= 1;
        }
    }

    /// Move every edge of `other` behind ours; returns the handle offset the
    /// owners of `other`'s handles must add.
    pub fn append(&mut self, other: EdgeArena) -> usize {
        let offset = self.edges.len();
        self.edges.extend(other.edges);
        self.live.extend(other.live);
        self.n_live += other.n_live;
        offset
    }

    pub fn iter_live(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|&(i, _)| self.live[i])
            .map(|(i, e)| (EdgeId(i), e))
    }

    #[inline]
    pub fn live_count(&self) -> usize {
        self.n_live
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }
}

/// Mutable window on the sites of one sub-problem. Site ids are global, the
/// window starts at id `base`.
pub(crate) struct SiteView<'a> {
    sites: &'a mut [Site],
    base: usize,
}

impl<'a> SiteView<'a> {
    pub fn new(sites: &'a mut [Site], base: usize) -> Self {
        Self { sites, base }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn site(&self, id: SiteId) -> &Site {
        &self.sites[id.0 - self.base]
    }

    #[inline]
    pub fn site_mut(&mut self, id: SiteId) -> &mut Site {
        &mut self.sites[id.0 - self.base]
    }
}

impl SitePositions for SiteView<'_> {
    #[inline]
    fn position(&self, id: SiteId) -> Point {
        self.site(id).pos
    }
}

/// Finished Voronoi diagram.
///
/// Every edge is listed by exactly its two sites; `EdgeId`s index `edges()`.
#[derive(Clone, Debug)]
pub struct Diagram {
    pub(crate) sites: Vec<Site>,
    pub(crate) edges: Vec<Edge>,
    hull: Hull,
    bounds: Bounds,
    tol: Tolerance,
}

impl Diagram {
    /// Compact the arena to its live edges and remap the site handles. A
    /// handle to a retired edge becomes dangling (out of range) and is
    /// reported by `check`.
    pub(crate) fn from_parts(
        mut sites: Vec<Site>,
        arena: EdgeArena,
        hull: Hull,
        bounds: Bounds,
        tol: Tolerance,
    ) -> Self {
        let mut remap = vec![usize::MAX; arena.len()];
        let mut edges = Vec::with_capacity(arena.live_count());
        for (id, e) in arena.iter_live() {
            remap[id.0] = edges.len();
            edges.push(*e);
        }
        for s in &mut sites {
            for h in &mut s.edges {
                h.0 = remap.get(h.0).copied().unwrap_or(usize::MAX);
            }
        }
        Self {
            sites,
            edges,
            hull,
            bounds,
            tol,
        }
    }

    #[inline]
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    #[inline]
    pub fn site(&self, id: SiteId) -> &Site {
        &self.sites[id.0]
    }

    /// Number of sites.
    #[inline]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// Edges bounding the cell of `id`.
    pub fn incident(&self, id: SiteId) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.sites[id.0]
            .edges()
            .iter()
            .filter_map(move |&h| self.edges.get(h.0).map(|e| (h, e)))
    }

    /// Sites sharing an edge with `id`.
    pub fn neighbours(&self, id: SiteId) -> Vec<SiteId> {
        let mut out: Vec<SiteId> = self.incident(id).filter_map(|(_, e)| e.other(id)).collect();
        out.sort();
        out
    }

    /// Convex hull of all sites.
    #[inline]
    pub fn hull(&self) -> &Hull {
        &self.hull
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn tolerance(&self) -> Tolerance {
        self.tol
    }

    /// Every edge clipped to the bounds; edges missing the box are skipped.
    pub fn segments(&self) -> Vec<Segment> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| {
                let (from, to) = e.clipped(&self.bounds)?;
                Some(Segment {
                    edge: EdgeId(i),
                    sites: e.sites,
                    from,
                    to,
                })
            })
            .collect()
    }

    /// Distinct finite edge endpoints (merged within tolerance), sorted by x.
    pub fn vertices(&self) -> Vec<Vector2<f64>> {
        let mut pts: Vec<Vector2<f64>> = self
            .edges
            .iter()
            .flat_map(|e| [e.start(), e.end()])
            .flatten()
            .collect();
        pts.sort_by(|a, b| a.x.total_cmp(&b.x));
        let eps = 16.0 * self.tol.abs;
        let mut out: Vec<Vector2<f64>> = Vec::with_capacity(pts.len() / 2);
        for p in pts {
            let dup = out
                .iter()
                .rev()
                .take_while(|q| p.x - q.x <= eps)
                .any(|q| (p - q).norm() <= eps);
            if !dup {
                out.push(p);
            }
        }
        out
    }

    /// Brute-force nearest site (smallest id on ties).
    pub fn nearest_site(&self, p: Vector2<f64>) -> Option<SiteId> {
        let mut best: Option<(f64, SiteId)> = None;
        for (i, s) in self.sites.iter().enumerate() {
            let d = (s.pos.to_vec() - p).norm_squared();
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, SiteId(i)));
            }
        }
        best.map(|(_, id)| id)
    }
}
