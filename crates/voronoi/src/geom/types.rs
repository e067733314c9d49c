//! Basic types: sites, handles, bounds and tolerances.

use nalgebra::Vector2;

use crate::diagram::EdgeId;
use crate::error::VoronoiError;

/// Largest accepted absolute coordinate. Keeps every exact predicate well
/// inside `i128` and every midpoint exactly representable in `f64`.
pub const COORD_LIMIT: i64 = 1 << 30;

/// Integer site coordinates. `Ord` is lexicographic `(x, y)`, the input order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_vec(self) -> Vector2<f64> {
        Vector2::new(self.x as f64, self.y as f64)
    }

    /// Key for "lowest, then leftmost".
    #[inline]
    pub fn bottom_key(self) -> (i64, i64) {
        (self.y, self.x)
    }
}

/// Index of a site in the sorted input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteId(pub usize);

/// An input point plus handles of the edges bounding its cell.
///
/// The collection is unordered and only complete once the top-level merge has
/// finished.
#[derive(Clone, Debug)]
pub struct Site {
    pub pos: Point,
    pub(crate) edges: Vec<EdgeId>,
}

impl Site {
    #[inline]
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            edges: Vec::new(),
        }
    }

    /// Handles of the incident edges.
    #[inline]
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    #[inline]
    pub(crate) fn attach(&mut self, e: EdgeId) {
        self.edges.push(e);
    }

    #[inline]
    pub(crate) fn detach(&mut self, e: EdgeId) {
        self.edges.retain(|&x| x != e);
    }

    #[inline]
    pub(crate) fn replace(&mut self, old: EdgeId, new: EdgeId) {
        for x in &mut self.edges {
            if *x == old {
                *x = new;
            }
        }
    }

    /// Shift every handle after the owning arena was appended to another one.
    #[inline]
    pub(crate) fn rebase(&mut self, offset: usize) {
        for x in &mut self.edges {
            x.0 += offset;
        }
    }
}

/// Position lookup by site id. Hull merging only needs coordinates, so it is
/// written against this seam rather than a concrete site container.
pub trait SitePositions {
    fn position(&self, id: SiteId) -> Point;
}

impl SitePositions for [Point] {
    #[inline]
    fn position(&self, id: SiteId) -> Point {
        self[id.0]
    }
}

impl SitePositions for [Site] {
    #[inline]
    fn position(&self, id: SiteId) -> Point {
        self[id.0].pos
    }
}

/// Axis-aligned clip box used to turn open edges into finite segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl Bounds {
    /// Box `[0, width] × [0, height]`.
    #[inline]
    pub fn from_size(width: f64, height: f64) -> Self {
        Self {
            min: Vector2::zeros(),
            max: Vector2::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn validate(&self) -> Result<(), VoronoiError> {
        let (w, h) = (self.width(), self.height());
        if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
            return Err(VoronoiError::InvalidBounds {
                width: w,
                height: h,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn contains_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        p.x >= self.min.x - eps
            && p.x <= self.max.x + eps
            && p.y >= self.min.y - eps
            && p.y <= self.max.y + eps
    }
}

/// Build configuration.
#[derive(Clone, Copy, Debug)]
pub struct VoronoiCfg {
    /// Relative tolerance; multiplied by the site extent for absolute checks.
    pub eps: f64,
    /// Sub-problems at least this large recurse in parallel (`parallel` feature).
    pub parallel_threshold: usize,
}

impl Default for VoronoiCfg {
    fn default() -> Self {
        Self {
            eps: 1e-9,
            parallel_threshold: 4096,
        }
    }
}

impl VoronoiCfg {
    pub fn validate(&self) -> Result<(), VoronoiError> {
        if !self.eps.is_finite() || self.eps <= 0.0 || self.eps >= 1e-3 {
            return Err(VoronoiError::InvalidTolerance { eps: self.eps });
        }
        Ok(())
    }
}

/// Absolute tolerances derived from a configuration and a concrete site set.
#[derive(Clone, Copy, Debug)]
pub struct Tolerance {
    /// Distance/parameter slack.
    pub abs: f64,
    /// Typical length of the problem; used to pick interior points on rays.
    pub reach: f64,
}

impl Tolerance {
    pub fn for_points(points: &[Point], eps: f64) -> Self {
        let mut lo = (i64::MAX, i64::MAX);
        let mut hi = (i64::MIN, i64::MIN);
        for p in points {
            lo = (lo.0.min(p.x), lo.1.min(p.y));
            hi = (hi.0.max(p.x), hi.1.max(p.y));
        }
        let extent = if points.is_empty() {
            1.0
        } else {
            ((hi.0 - lo.0).max(hi.1 - lo.1) as f64).max(1.0)
        };
        Self {
            abs: eps * extent,
            reach: extent,
        }
    }
}
