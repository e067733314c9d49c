//! Andrew's monotone chain over raw points (exact integer turns).
//!
//! Used as the independent reference for `Hull::merge` and for building hulls
//! of arbitrary site sets in tests and benches.

use crate::geom::{cross, Point};

/// Strict convex hull in counter-clockwise order, starting at the
/// lexicographically smallest point. Duplicates are ignored; collinear
/// boundary points are dropped.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts: Vec<Point> = points.to_vec();
    pts.sort();
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<Point> = Vec::with_capacity(pts.len());
    for &p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0 {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<Point> = Vec::with_capacity(pts.len());
    for &p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0 {
            upper.pop();
        }
        upper.push(p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    hull
}

/// Strict hull in the `Hull` convention: clockwise, starting at the lowest
/// (then leftmost) point. `None` for an empty input.
pub fn clockwise_from_bottom(points: &[Point]) -> Option<Vec<Point>> {
    let mut ccw = convex_hull(points);
    let k = ccw
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| p.bottom_key())
        .map(|(i, _)| i)?;
    ccw.rotate_left(k);
    let mut cw = Vec::with_capacity(ccw.len());
    cw.push(ccw[0]);
    cw.extend(ccw[1..].iter().rev());
    Some(cw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i64, y: i64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn square_with_interior_and_edge_points() {
        let pts = [p(0, 0), p(10, 0), p(10, 10), p(0, 10), p(5, 5), p(5, 0)];
        assert_eq!(convex_hull(&pts), vec![p(0, 0), p(10, 0), p(10, 10), p(0, 10)]);
        assert_eq!(
            clockwise_from_bottom(&pts).unwrap(),
            vec![p(0, 0), p(0, 10), p(10, 10), p(10, 0)]
        );
    }

    #[test]
    fn collinear_input_keeps_extremes() {
        let pts = [p(0, 0), p(0, 5), p(0, 10), p(0, 20)];
        assert_eq!(clockwise_from_bottom(&pts).unwrap(), vec![p(0, 0), p(0, 20)]);
    }

    #[test]
    fn bottom_start_breaks_ties_leftmost() {
        let pts = [p(5, 0), p(0, 0), p(3, 4)];
        let cw = clockwise_from_bottom(&pts).unwrap();
        assert_eq!(cw[0], p(0, 0));
        assert_eq!(cw, vec![p(0, 0), p(3, 4), p(5, 0)]);
    }
}
