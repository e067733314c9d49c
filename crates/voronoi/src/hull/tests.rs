use super::*;
use crate::geom::{Point, SiteId};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

fn ids(v: &[usize]) -> Vec<SiteId> {
    v.iter().map(|&i| SiteId(i)).collect()
}

fn hull_of(range: std::ops::Range<usize>, pts: &[Point]) -> Hull {
    let ids: Vec<SiteId> = range.map(SiteId).collect();
    Hull::of_sites(&ids, pts).expect("non-empty range")
}

/// Merge `pts[..k]` with `pts[k..]` and check the result against the baseline.
fn merge_matches_baseline(pts: &[Point], k: usize) -> MergeReport {
    let mut left = hull_of(0..k, pts);
    let right = hull_of(k..pts.len(), pts);
    let (left_before, right_before) = (left.clone(), right.clone());
    let report = left.merge(&right, pts).expect("bridges exist");
    assert_eq!(left, hull_of(0..pts.len(), pts));

    // framing and side membership
    let boundary = SiteId(k);
    for (list, lower, upper) in [
        (&report.removed_left, report.lower.left, report.upper.left),
        (&report.removed_right, report.lower.right, report.upper.right),
    ] {
        assert_eq!(list.first(), Some(&lower));
        assert_eq!(list.last(), Some(&upper));
        let mut sorted = list.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), list.len(), "repeated entry in {list:?}");
    }
    assert!(report.removed_left.iter().all(|&id| id < boundary));
    assert!(report.removed_right.iter().all(|&id| id >= boundary));
    assert!(left_before.contains(report.lower.left) && left_before.contains(report.upper.left));
    assert!(right_before.contains(report.lower.right) && right_before.contains(report.upper.right));

    // entries between the frames came from the input hulls and left the boundary
    for list in [&report.removed_left, &report.removed_right] {
        if list.len() > 2 {
            for &id in &list[1..list.len() - 1] {
                assert!(left_before.contains(id) || right_before.contains(id));
                assert!(!left.contains(id), "{id:?} is still on the hull");
            }
        }
    }
    report
}

#[test]
fn square_from_two_pairs() {
    let pts = [Point::new(0, 0), Point::new(0, 10), Point::new(10, 0), Point::new(10, 10)];
    let mut left = Hull::pair((SiteId(0), pts[0]), (SiteId(1), pts[1]));
    let right = Hull::pair((SiteId(2), pts[2]), (SiteId(3), pts[3]));
    let r = left.merge(&right, &pts[..]).unwrap();
    assert_eq!(left.points(), &ids(&[0, 1, 3, 2])[..]);
    assert_eq!(r.lower, Bridge { left: SiteId(0), right: SiteId(2) });
    assert_eq!(r.upper, Bridge { left: SiteId(1), right: SiteId(3) });
    assert_eq!(r.removed_left, ids(&[0, 1]));
    assert_eq!(r.removed_right, ids(&[2, 3]));
}

#[test]
fn pair_hull_starts_at_bottom() {
    let h = Hull::pair((SiteId(0), Point::new(0, 9)), (SiteId(1), Point::new(4, 2)));
    assert_eq!(h.bottom(), SiteId(1));
    assert_eq!(h.edges().count(), 2);
    assert_eq!(Hull::single(SiteId(5)).edges().count(), 0);
}

#[test]
fn vertical_collinear_bridge_joins_neighbours() {
    let pts = [Point::new(0, 0), Point::new(0, 10), Point::new(0, 20)];
    let mut left = Hull::single(SiteId(0));
    let right = Hull::pair((SiteId(1), pts[1]), (SiteId(2), pts[2]));
    let r = left.merge(&right, &pts[..]).unwrap();
    assert_eq!(left.points(), &ids(&[0, 2])[..]);
    let bridge = Bridge { left: SiteId(0), right: SiteId(1) };
    assert_eq!(r.lower, bridge);
    assert_eq!(r.upper, bridge);
    assert_eq!(r.removed_left, ids(&[0]));
    assert_eq!(r.removed_right, ids(&[1]));
}

#[test]
fn horizontal_collinear_halves() {
    let pts = [Point::new(0, 0), Point::new(5, 0), Point::new(10, 0), Point::new(15, 0)];
    let r = merge_matches_baseline(&pts, 2);
    let bridge = Bridge { left: SiteId(1), right: SiteId(2) };
    assert_eq!(r.lower, bridge);
    assert_eq!(r.upper, bridge);
    assert_eq!(r.removed_left, ids(&[1]));
    assert_eq!(r.removed_right, ids(&[2]));
}

#[test]
fn shared_x_split() {
    // Both halves contain x = 5; the split still separates by id.
    let pts = [Point::new(0, 3), Point::new(5, 0), Point::new(5, 8), Point::new(9, 4)];
    let r = merge_matches_baseline(&pts, 2);
    assert_eq!(r.lower, Bridge { left: SiteId(1), right: SiteId(3) });
    assert_eq!(r.upper, Bridge { left: SiteId(0), right: SiteId(2) });
}

#[test]
fn interior_points_are_reported_between_bridges() {
    // The left hull's right-most vertex ends up inside the union.
    let pts = [
        Point::new(0, 0),
        Point::new(0, 20),
        Point::new(8, 10),
        Point::new(10, -5),
        Point::new(10, 25),
    ];
    let r = merge_matches_baseline(&pts, 3);
    assert_eq!(r.lower, Bridge { left: SiteId(0), right: SiteId(3) });
    assert_eq!(r.upper, Bridge { left: SiteId(1), right: SiteId(4) });
    assert!(r.removed_left.contains(&SiteId(2)));
    assert_eq!(r.removed_left.len(), 3);
}

#[test]
fn random_merges_match_baseline() {
    let mut rng = StdRng::seed_from_u64(7);
    for round in 0..200 {
        let n = rng.gen_range(2..400);
        let span = if round % 2 == 0 { 1_000_000 } else { 30 };
        let mut set = BTreeSet::new();
        while set.len() < n {
            set.insert(Point::new(rng.gen_range(0..span), rng.gen_range(0..span)));
        }
        let pts: Vec<Point> = set.into_iter().collect();
        let k = rng.gen_range(1..pts.len());
        merge_matches_baseline(&pts, k);
    }
}

#[test]
fn shared_bridge_site_frames_alone() {
    // Both bridges end at (10, 0); (7, 1) drops inside without lying between them.
    let pts = [
        Point::new(0, 0),
        Point::new(0, 1),
        Point::new(0, 2),
        Point::new(0, 3),
        Point::new(6, 23),
        Point::new(7, 1),
        Point::new(10, 0),
    ];
    let r = merge_matches_baseline(&pts, 5);
    assert_eq!(r.lower, Bridge { left: SiteId(0), right: SiteId(6) });
    assert_eq!(r.upper, Bridge { left: SiteId(4), right: SiteId(6) });
    assert_eq!(r.removed_right, ids(&[6]));
    assert_eq!(r.removed_left, ids(&[0, 4]));
}

#[test]
fn large_merges_match_baseline() {
    let mut rng = StdRng::seed_from_u64(19);
    for n in [1000, 1800, 2500, 4000] {
        let mut set = BTreeSet::new();
        while set.len() < n {
            set.insert(Point::new(rng.gen_range(0..50_000), rng.gen_range(0..50_000)));
        }
        let pts: Vec<Point> = set.into_iter().collect();
        let k = rng.gen_range(n / 4..3 * n / 4);
        merge_matches_baseline(&pts, k);
    }
}

proptest! {
    #[test]
    fn merge_is_the_union_hull(
        raw in prop::collection::vec((0i64..24, 0i64..24), 2..80),
        cut in 0.0f64..1.0,
    ) {
        let set: BTreeSet<Point> = raw.into_iter().map(|(x, y)| Point::new(x, y)).collect();
        let pts: Vec<Point> = set.into_iter().collect();
        prop_assume!(pts.len() >= 2);
        let k = 1 + ((pts.len() - 1) as f64 * cut) as usize;
        let k = k.min(pts.len() - 1);
        merge_matches_baseline(&pts, k);
    }
}
