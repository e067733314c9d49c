//! Structural invariant checker for finished diagrams.

use std::cmp::Ordering;
use std::collections::HashSet;

use thiserror::Error;

use super::types::{Diagram, EdgeId};
use crate::geom::SiteId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("edge {} separates site {} from itself", edge.0, site.0)]
    DegenerateEdge { edge: EdgeId, site: SiteId },

    #[error("edge {} references unknown site {}", edge.0, site.0)]
    UnknownSite { edge: EdgeId, site: SiteId },

    #[error("edge {} has an empty parameter range", edge.0)]
    EmptyRange { edge: EdgeId },

    #[error("sites {} and {} share more than one edge", a.0, b.0)]
    DuplicatePair { a: SiteId, b: SiteId },

    #[error("site {} holds a handle to retired edge {}", site.0, edge.0)]
    DanglingHandle { site: SiteId, edge: EdgeId },

    #[error("site {} lists edge {} which does not border it", site.0, edge.0)]
    ForeignHandle { site: SiteId, edge: EdgeId },

    #[error("site {} lists edge {} twice", site.0, edge.0)]
    RepeatedHandle { site: SiteId, edge: EdgeId },

    #[error("edge {} is missing from site {}", edge.0, site.0)]
    MissingHandle { edge: EdgeId, site: SiteId },
}

impl Diagram {
    /// Verify the site/edge graph:
    /// - every edge has two distinct, known sites and a non-empty range;
    /// - a site pair has at most one edge;
    /// - every handle is live, borders its site and is listed once;
    /// - every edge is listed by both of its sites.
    pub fn check(&self) -> Result<(), InvariantViolation> {
        let n = self.sites.len();
        let mut pairs = HashSet::with_capacity(self.edges.len());
        for (i, e) in self.edges.iter().enumerate() {
            let edge = EdgeId(i);
            let (a, b) = e.sites;
            if a == b {
                return Err(InvariantViolation::DegenerateEdge { edge, site: a });
            }
            for site in [a, b] {
                if site.0 >= n {
                    return Err(InvariantViolation::UnknownSite { edge, site });
                }
            }
            if e.t_start.partial_cmp(&e.t_end) != Some(Ordering::Less) {
                return Err(InvariantViolation::EmptyRange { edge });
            }
            let key = if a < b { (a, b) } else { (b, a) };
            if !pairs.insert(key) {
                return Err(InvariantViolation::DuplicatePair { a: key.0, b: key.1 });
            }
        }

        for (i, s) in self.sites.iter().enumerate() {
            let site = SiteId(i);
            let mut listed = HashSet::with_capacity(s.edges().len());
            for &edge in s.edges() {
                let Some(e) = self.edges.get(edge.0) else {
                    return Err(InvariantViolation::DanglingHandle { site, edge });
                };
                if !e.touches(site) {
                    return Err(InvariantViolation::ForeignHandle { site, edge });
                }
                if !listed.insert(edge) {
                    return Err(InvariantViolation::RepeatedHandle { site, edge });
                }
            }
        }

        for (i, e) in self.edges.iter().enumerate() {
            let edge = EdgeId(i);
            for site in [e.sites.0, e.sites.1] {
                if !self.sites[site.0].edges().contains(&edge) {
                    return Err(InvariantViolation::MissingHandle { edge, site });
                }
            }
        }
        Ok(())
    }
}
