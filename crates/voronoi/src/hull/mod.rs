//! Convex hulls of contiguous site ranges.
//!
//! Purpose
//! - `Hull`: strict convex boundary as a clockwise cycle of site ids starting
//!   at the lowest (then leftmost) site. Hulls reference sites, never own them.
//! - `Hull::merge`: fuse two hulls of adjacent site ranges with a Graham scan
//!   and report the removed points and the two bridges the stitcher needs.
//! - `baseline`: Andrew's monotone chain over raw points, the reference the
//!   merge is validated against.
//!
//! Representation
//! - A plain `Vec<SiteId>` with modular `next`/`prev` walks; every merge
//!   replaces the hull wholesale.

pub mod baseline;
mod merge;

pub use merge::{Bridge, MergeReport, Side};

use crate::geom::{Point, SiteId, SitePositions};

/// Clockwise strict convex hull, `points[0]` is the lowest-then-leftmost site.
///
/// Invariants:
/// - No three consecutive points are collinear.
/// - Two points form a degenerate "segment" hull; one point is a single site.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hull {
    points: Vec<SiteId>,
}

impl Hull {
    /// Hull of a single site.
    #[inline]
    pub fn single(id: SiteId) -> Self {
        Self { points: vec![id] }
    }

    /// Hull of two distinct sites, lowest (then leftmost) first.
    pub fn pair(a: (SiteId, Point), b: (SiteId, Point)) -> Self {
        let points = if b.1.bottom_key() < a.1.bottom_key() {
            vec![b.0, a.0]
        } else {
            vec![a.0, b.0]
        };
        Self { points }
    }

    /// Strict hull of an arbitrary set of sites, via the baseline hull.
    pub fn of_sites<P: SitePositions + ?Sized>(ids: &[SiteId], pos: &P) -> Option<Self> {
        let pts: Vec<Point> = ids.iter().map(|&id| pos.position(id)).collect();
        let ring = baseline::clockwise_from_bottom(&pts)?;
        let mut points: Vec<SiteId> = Vec::with_capacity(ring.len());
        for p in ring {
            let k = pts.iter().position(|&q| q == p)?;
            points.push(ids[k]);
        }
        Some(Self { points })
    }

    #[inline]
    pub(crate) fn from_clockwise(points: Vec<SiteId>) -> Self {
        debug_assert!(!points.is_empty());
        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[SiteId] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Lowest (then leftmost) site.
    #[inline]
    pub fn bottom(&self) -> SiteId {
        self.points[0]
    }

    /// Index of the clockwise successor of position `i`.
    #[inline]
    pub fn next(&self, i: usize) -> usize {
        (i + 1) % self.points.len()
    }

    /// Index of the clockwise predecessor of position `i`.
    #[inline]
    pub fn prev(&self, i: usize) -> usize {
        (i + self.points.len() - 1) % self.points.len()
    }

    /// Directed clockwise boundary edges. A two-point hull yields both
    /// directions of its segment; a single site yields nothing.
    pub fn edges(&self) -> impl Iterator<Item = (SiteId, SiteId)> + '_ {
        let n = if self.points.len() < 2 {
            0
        } else {
            self.points.len()
        };
        (0..n).map(move |i| (self.points[i], self.points[self.next(i)]))
    }

    #[inline]
    pub fn contains(&self, id: SiteId) -> bool {
        self.points.contains(&id)
    }
}

#[cfg(test)]
mod tests;
