//! Divide-and-conquer planar Voronoi diagrams.
//!
//! Sites are split by their (x, y) order, the halves are solved recursively and
//! fused bottom-up: the two convex hulls are merged (Graham scan over the union)
//! and a chain of perpendicular bisectors is stitched between the two partial
//! diagrams, trimming or retiring the edges the chain invalidates.
//!
//! Layout
//! - `geom`: integer sites, bisector lines, exact predicates, random sites.
//! - `hull`: clockwise hulls, hull merge with bridge reporting, baseline hull.
//! - `diagram`: edge arena, stitcher, divide driver, finished `Diagram`.
//! - `input`: validation and sorting of raw site lists.
//!
//! Quick use
//! ```
//! use voronoi::prelude::*;
//!
//! let sites = prepare_sites([Point::new(0, 0), Point::new(10, 0)]).unwrap();
//! let d = build(&sites, Bounds::from_size(20.0, 20.0), &VoronoiCfg::default()).unwrap();
//! assert_eq!(d.edges().len(), 1);
//! ```

pub mod diagram;
pub mod error;
pub mod geom;
pub mod hull;
pub mod input;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use diagram::{build, Diagram, Edge, EdgeId};
pub use error::VoronoiError;
pub use geom::{Bounds, Point, Site, SiteId, VoronoiCfg};
pub use hull::Hull;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::diagram::{build, Diagram, Edge, EdgeId, InvariantViolation, Segment};
    pub use crate::error::VoronoiError;
    pub use crate::geom::rand::{sample_sites, GridCfg, ReplayToken};
    pub use crate::geom::{Bisector, Bounds, LineEq, Point, Site, SiteId, VoronoiCfg};
    pub use crate::hull::{Bridge, Hull, MergeReport};
    pub use crate::input::{prepare_sites, validate_sites, MAX_SITES};
    pub use nalgebra::Vector2 as Vec2;
}
