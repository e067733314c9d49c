//! Perpendicular bisectors and their slope/intercept form.

use nalgebra::Vector2;

use super::types::{Bounds, Point};

/// Direction pairs with a smaller sine are treated as parallel.
const PARALLEL_EPS: f64 = 1e-12;

/// Closed-form equation of a line, with the axis-parallel cases split out so no
/// caller ever divides by a zero run or rise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LineEq {
    /// `x = x0`.
    Vertical { x: f64 },
    /// `y = y0`.
    Horizontal { y: f64 },
    /// `y = slope · x + intercept`, `slope != 0`.
    Sloped { slope: f64, intercept: f64 },
}

impl LineEq {
    #[inline]
    pub fn y_at(&self, x: f64) -> Option<f64> {
        match *self {
            LineEq::Vertical { .. } => None,
            LineEq::Horizontal { y } => Some(y),
            LineEq::Sloped { slope, intercept } => Some(slope * x + intercept),
        }
    }

    #[inline]
    pub fn x_at(&self, y: f64) -> Option<f64> {
        match *self {
            LineEq::Vertical { x } => Some(x),
            LineEq::Horizontal { .. } => None,
            LineEq::Sloped { slope, intercept } => Some((y - intercept) / slope),
        }
    }
}

/// Perpendicular bisector of two sites as `anchor + t · dir`.
///
/// Invariants:
/// - `anchor` is the midpoint of the two sites (exact for integer sites).
/// - `dir` is the unit vector of `b - a` rotated by +90°.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bisector {
    pub anchor: Vector2<f64>,
    pub dir: Vector2<f64>,
    pub eq: LineEq,
}

impl Bisector {
    /// Bisector of distinct sites `a` and `b`.
    pub fn of(a: Point, b: Point) -> Self {
        debug_assert_ne!(a, b, "bisector of coincident sites");
        let anchor = (a.to_vec() + b.to_vec()) * 0.5;
        let (run, rise) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
        let d = Vector2::new(-rise, run);
        let dir = d / d.norm();
        let eq = if a.y == b.y {
            // horizontal pair, vertical bisector
            LineEq::Vertical { x: anchor.x }
        } else if a.x == b.x {
            LineEq::Horizontal { y: anchor.y }
        } else {
            let slope = -run / rise;
            LineEq::Sloped {
                slope,
                intercept: anchor.y - slope * anchor.x,
            }
        };
        Self { anchor, dir, eq }
    }

    #[inline]
    pub fn at(&self, t: f64) -> Vector2<f64> {
        self.anchor + self.dir * t
    }

    /// Parameter of the orthogonal projection of `p` onto the line.
    #[inline]
    pub fn param_of(&self, p: Vector2<f64>) -> f64 {
        (p - self.anchor).dot(&self.dir)
    }

    /// Parameters `(t_self, t_other)` of the crossing point, or `None` for
    /// (near-)parallel lines.
    pub fn intersect(&self, other: &Bisector) -> Option<(f64, f64)> {
        let denom = perp(self.dir, other.dir);
        if denom.abs() < PARALLEL_EPS {
            return None;
        }
        let w = other.anchor - self.anchor;
        Some((perp(w, other.dir) / denom, perp(w, self.dir) / denom))
    }

    /// Clip the parameter range `[t0, t1]` (either end may be infinite) to
    /// `bounds` (Liang–Barsky). `None` if nothing is left.
    pub fn clip(&self, t0: f64, t1: f64, bounds: &Bounds) -> Option<(Vector2<f64>, Vector2<f64>)> {
        let mut lo = t0;
        let mut hi = t1;
        for k in 0..2 {
            let (a, d) = (self.anchor[k], self.dir[k]);
            let (mn, mx) = (bounds.min[k], bounds.max[k]);
            if d.abs() < 1e-15 {
                if a < mn || a > mx {
                    return None;
                }
                continue;
            }
            let (mut ta, mut tb) = ((mn - a) / d, (mx - a) / d);
            if ta > tb {
                std::mem::swap(&mut ta, &mut tb);
            }
            lo = lo.max(ta);
            hi = hi.min(tb);
        }
        if lo > hi {
            None
        } else {
            Some((self.at(lo), self.at(hi)))
        }
    }
}

#[inline]
fn perp(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}
