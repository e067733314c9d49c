//! Errors raised while validating input or constructing a diagram.
//!
//! Construction never degrades: any failure aborts the whole build and no
//! partial diagram is returned.

use thiserror::Error;

use crate::geom::SiteId;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum VoronoiError {
    #[error("empty site set")]
    EmptyInput,

    #[error("too many sites: {count} (supported: 1..={max})")]
    TooManySites { count: usize, max: usize },

    #[error("duplicate site at ({x}, {y})")]
    DuplicateSite { x: i64, y: i64 },

    #[error("site ({x}, {y}) exceeds the coordinate limit ±{limit}")]
    CoordinateOutOfRange { x: i64, y: i64, limit: i64 },

    #[error("sites are not sorted by (x, y) at index {index}")]
    NotSorted { index: usize },

    #[error("invalid bounds: width {width}, height {height}")]
    InvalidBounds { width: f64, height: f64 },

    #[error("invalid tolerance {eps}")]
    InvalidTolerance { eps: f64 },

    /// Two hulls that were expected to be adjacent produced no bridge.
    #[error("hull merge found no bridge between the halves")]
    MissingBridge,

    /// The sweep joined the same pair of sites twice.
    #[error("bisector sweep stalled: sites ({}, {}) joined twice", left.0, right.0)]
    SweepStalled { left: SiteId, right: SiteId },

    #[error("bisector sweep exceeded {limit} steps")]
    IterationLimit { limit: usize },
}
