//! Exact integer predicates and the polar sort key.

use std::cmp::Ordering;

use super::types::Point;

/// Angles closer than this are ordered by the exact cross product instead.
const ANGLE_EPS: f64 = 1e-9;

/// Twice the signed area of `(o, a, b)`; positive for a counter-clockwise turn.
#[inline]
pub fn cross(o: Point, a: Point, b: Point) -> i128 {
    let (ax, ay) = ((a.x - o.x) as i128, (a.y - o.y) as i128);
    let (bx, by) = ((b.x - o.x) as i128, (b.y - o.y) as i128);
    ax * by - ay * bx
}

#[inline]
pub fn dist2(a: Point, b: Point) -> i128 {
    let (dx, dy) = ((b.x - a.x) as i128, (b.y - a.y) as i128);
    dx * dx + dy * dy
}

/// `p` lies on the closed segment `[a, b]`.
#[inline]
pub fn on_segment(a: Point, b: Point, p: Point) -> bool {
    if cross(a, b, p) != 0 {
        return false;
    }
    let dot = (p.x - a.x) as i128 * (p.x - b.x) as i128 + (p.y - a.y) as i128 * (p.y - b.y) as i128;
    dot <= 0
}

/// How far `to` lies ahead of `from` along the walk direction of the bisector
/// of `(l, r)`, i.e. `rot90(r - l) · (to - from)`.
///
/// Positive means a point moving along the bisector gets relatively closer to
/// `to` than to `from`.
#[inline]
pub fn lead(l: Point, r: Point, from: Point, to: Point) -> i128 {
    let (dx, dy) = (-((r.y - l.y) as i128), (r.x - l.x) as i128);
    dx * (to.x - from.x) as i128 + dy * (to.y - from.y) as i128
}

/// Precomputed ordering key of a point around a fixed origin.
///
/// The origin is the lowest-then-leftmost point, so every offset lies in the
/// half-open upper half-plane and angles are in `[0, π)`.
#[derive(Clone, Copy, Debug)]
pub struct PolarKey {
    angle: f64,
    dx: i64,
    dy: i64,
    dist2: i128,
}

impl PolarKey {
    pub fn new(origin: Point, p: Point) -> Self {
        let (dx, dy) = (p.x - origin.x, p.y - origin.y);
        Self {
            angle: (dy as f64).atan2(dx as f64),
            dx,
            dy,
            dist2: dist2(origin, p),
        }
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Ascending angle, then ascending distance.
    pub fn order(&self, other: &Self) -> Ordering {
        if (self.angle - other.angle).abs() > ANGLE_EPS {
            return self
                .angle
                .partial_cmp(&other.angle)
                .unwrap_or(Ordering::Equal);
        }
        let c = self.dx as i128 * other.dy as i128 - self.dy as i128 * other.dx as i128;
        match c.cmp(&0) {
            Ordering::Greater => Ordering::Less,
            Ordering::Less => Ordering::Greater,
            Ordering::Equal => self.dist2.cmp(&other.dist2),
        }
    }
}
