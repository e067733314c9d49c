//! Hull merge: Graham scan over the union of two adjacent hulls.
//!
//! Model
//! - Origin = lowest (then leftmost) of the two bottoms. Every other point gets
//!   a `PolarKey` once, before sorting; nothing in the ordering depends on state
//!   that changes later.
//! - A point popped by the scan is recorded on the side it came from. Sides are
//!   told apart by site id: ids follow the `(x, y)` input order, so every left
//!   id is smaller than the smallest right id. Unlike an x-coordinate cut this
//!   also separates ranges that share an x value.
//! - Bridges are the two hull edges joining the sides. A bridge endpoint is
//!   refined to the innermost input-hull point on the bridge segment, so on
//!   collinear tangents the bridge still joins Voronoi neighbours.

use std::collections::HashSet;

use crate::geom::{cross, dist2, on_segment, PolarKey, SiteId, SitePositions};

use super::Hull;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Pair of sites (one per side) where the merged hull crosses between sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bridge {
    pub left: SiteId,
    pub right: SiteId,
}

/// What the stitcher needs from a merge.
///
/// Each removed list is framed by its side's bridge sites: the first element
/// is the lower bridge site, the last the upper one (a single element when both
/// bridges share it). In between are the points the scan dropped from the
/// boundary that lie on the side's hull between the two bridge sites, bottom
/// to top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeReport {
    pub removed_left: Vec<SiteId>,
    pub removed_right: Vec<SiteId>,
    pub lower: Bridge,
    pub upper: Bridge,
}

impl Hull {
    /// Replace `self` (the left hull) by the hull of `self ∪ right`.
    ///
    /// Pre: every site of `self` precedes every site of `right` in `(x, y)`
    /// order and site ids follow that order. Returns `None` (leaving `self`
    /// untouched) if the result has no bridge, which only happens when the
    /// precondition is violated.
    pub fn merge<P: SitePositions + ?Sized>(&mut self, right: &Hull, pos: &P) -> Option<MergeReport> {
        let boundary = right.points.iter().copied().min()?;
        let side = |id: SiteId| {
            if id < boundary {
                Side::Left
            } else {
                Side::Right
            }
        };

        let (lb, rb) = (self.bottom(), right.bottom());
        let origin = if pos.position(rb).bottom_key() < pos.position(lb).bottom_key() {
            rb
        } else {
            lb
        };
        let o = pos.position(origin);
        let mut keyed: Vec<(PolarKey, SiteId)> = self
            .points
            .iter()
            .chain(right.points.iter())
            .copied()
            .filter(|&id| id != origin)
            .map(|id| (PolarKey::new(o, pos.position(id)), id))
            .collect();
        keyed.sort_by(|a, b| a.0.order(&b.0));

        let mut stack: Vec<SiteId> = Vec::with_capacity(keyed.len() + 1);
        stack.push(origin);
        let mut popped_left = Vec::new();
        let mut popped_right = Vec::new();
        for &(_, id) in &keyed {
            let p = pos.position(id);
            while stack.len() >= 2 {
                let a = stack[stack.len() - 2];
                let b = stack[stack.len() - 1];
                if cross(pos.position(a), pos.position(b), p) > 0 {
                    break;
                }
                stack.pop();
                match side(b) {
                    Side::Left => popped_left.push(b),
                    Side::Right => popped_right.push(b),
                }
            }
            stack.push(id);
        }

        // Scan order is counter-clockwise; store clockwise from the origin.
        let mut cw = Vec::with_capacity(stack.len());
        cw.push(stack[0]);
        cw.extend(stack[1..].iter().rev());
        let merged = Hull::from_clockwise(cw);

        let mut lower = None;
        let mut upper = None;
        for (a, b) in merged.edges() {
            match (side(a), side(b)) {
                (Side::Right, Side::Left) => lower = Some(Bridge { left: b, right: a }),
                (Side::Left, Side::Right) => upper = Some(Bridge { left: a, right: b }),
                _ => {}
            }
        }
        let lower = refine(lower?, &self.points, &right.points, pos);
        let upper = refine(upper?, &self.points, &right.points, pos);

        // The left hull faces the right one on its counter-clockwise run from
        // the lower bridge, the right hull on its clockwise run.
        let removed_left = framed(self, lower.left, upper.left, &popped_left, Hull::prev)?;
        let removed_right = framed(right, lower.right, upper.right, &popped_right, Hull::next)?;

        *self = merged;
        Some(MergeReport {
            removed_left,
            removed_right,
            lower,
            upper,
        })
    }
}

/// Move each endpoint to the point of its input hull that lies on the bridge
/// segment closest to the other side.
fn refine<P: SitePositions + ?Sized>(b: Bridge, left: &[SiteId], right: &[SiteId], pos: &P) -> Bridge {
    let (l, r) = (pos.position(b.left), pos.position(b.right));
    let inner_left = left
        .iter()
        .copied()
        .filter(|&id| on_segment(l, r, pos.position(id)))
        .min_by_key(|&id| dist2(pos.position(id), r))
        .unwrap_or(b.left);
    let inner_right = right
        .iter()
        .copied()
        .filter(|&id| on_segment(l, r, pos.position(id)))
        .min_by_key(|&id| dist2(pos.position(id), l))
        .unwrap_or(b.right);
    Bridge {
        left: inner_left,
        right: inner_right,
    }
}

/// `lower`, the popped points met walking `ring` from `lower` to `upper`, then
/// `upper`. `None` if either bridge site is not on `ring`.
fn framed(
    ring: &Hull,
    lower: SiteId,
    upper: SiteId,
    popped: &[SiteId],
    step: fn(&Hull, usize) -> usize,
) -> Option<Vec<SiteId>> {
    let popped: HashSet<SiteId> = popped.iter().copied().collect();
    let start = ring.points.iter().position(|&id| id == lower)?;
    let mut out = vec![lower];
    let mut i = start;
    while ring.points[i] != upper {
        i = step(ring, i);
        if i == start {
            return None;
        }
        let id = ring.points[i];
        if id != upper && popped.contains(&id) {
            out.push(id);
        }
    }
    if upper != lower {
        out.push(upper);
    }
    Some(out)
}
