//! Input validation and preparation of raw site lists.

use crate::error::VoronoiError;
use crate::geom::{Point, COORD_LIMIT};

/// Largest accepted site count.
pub const MAX_SITES: usize = 1_000_000;

/// Check that `points` is a valid `build` input: `1..=MAX_SITES` sites within
/// `±COORD_LIMIT`, strictly increasing in `(x, y)` (so no duplicates).
pub fn validate_sites(points: &[Point]) -> Result<(), VoronoiError> {
    if points.is_empty() {
        return Err(VoronoiError::EmptyInput);
    }
    if points.len() > MAX_SITES {
        return Err(VoronoiError::TooManySites {
            count: points.len(),
            max: MAX_SITES,
        });
    }
    for (i, p) in points.iter().enumerate() {
        if p.x.abs() > COORD_LIMIT || p.y.abs() > COORD_LIMIT {
            return Err(VoronoiError::CoordinateOutOfRange {
                x: p.x,
                y: p.y,
                limit: COORD_LIMIT,
            });
        }
        if i > 0 {
            let prev = points[i - 1];
            if prev == *p {
                return Err(VoronoiError::DuplicateSite { x: p.x, y: p.y });
            }
            if prev > *p {
                return Err(VoronoiError::NotSorted { index: i });
            }
        }
    }
    Ok(())
}

/// Sort raw points by `(x, y)` and validate them. Duplicates are rejected,
/// not merged.
pub fn prepare_sites<I>(points: I) -> Result<Vec<Point>, VoronoiError>
where
    I: IntoIterator<Item = Point>,
{
    let mut pts: Vec<Point> = points.into_iter().collect();
    pts.sort_unstable();
    validate_sites(&pts)?;
    Ok(pts)
}
