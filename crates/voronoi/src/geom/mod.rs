//! Geometric primitives for the divide-and-conquer construction.
//!
//! Purpose
//! - Integer sites (`Point`) so hull turns and crossing tests are exact.
//! - Real-valued bisector lines (`Bisector`) for edge geometry, with a cached
//!   slope/intercept form that special-cases vertical and horizontal lines.
//! - A single tolerance policy (`VoronoiCfg::eps` scaled by the site extent).
//!
//! Conventions
//! - Site order is lexicographic `(x, y)`; `SiteId` is the index in that order.
//! - The bisector of `(a, b)` runs along `b - a` rotated by +90°.

mod line;
mod predicates;
pub mod rand;
mod types;

pub use line::{Bisector, LineEq};
pub use predicates::{cross, dist2, lead, on_segment, PolarKey};
pub use types::{
    Bounds, Point, Site, SiteId, SitePositions, Tolerance, VoronoiCfg, COORD_LIMIT,
};
