//! Voronoi construction (divide driver + stitcher) and the finished diagram.
//!
//! Purpose
//! - `build`: recursive divide-and-conquer over a sorted site slice.
//! - `Diagram`: sites with incident edge handles, dense edge list, hull,
//!   clipping to bounds and an invariant checker.
//!
//! Ownership
//! - Edges live in an arena and are referenced by `EdgeId`. Sub-problems own
//!   private arenas; a merge appends the right arena to the left one and
//!   shifts the right sites' handles.
//! - Edges are immutable once published: a trim pushes a restricted copy and
//!   retires the original.
//!
//! Conventions
//! - An edge's sites are ordered `(a, b)`; its line runs along `rot90(b - a)`.
//! - Sweep comparisons use `Tolerance::abs` (relative `eps` times site extent).

mod build;
mod check;
mod stitch;
mod types;

pub use build::build;
pub use check::InvariantViolation;
pub use types::{Diagram, Edge, EdgeId, Segment};
