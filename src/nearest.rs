//! Nearest-point lookup on an ordered reference sequence.
//!
//! A linear scan is deliberate: the reference sequences are small (hundreds
//! to low thousands of points) and queries are infrequent, so a spatial
//! index would not pay for itself.

use crate::math::Point3;
use thiserror::Error;

/// Errors from nearest-point queries.
#[derive(Debug, Error, PartialEq)]
pub enum NearestError {
    /// The reference sequence contains no points.
    #[error("nearest-point query against an empty sequence")]
    EmptySequence,
}

/// Find the sequence element with the smallest Euclidean distance to `query`.
///
/// Comparison is strict `<`, so ties keep the first-found minimum and the
/// result is deterministic for a given point order. Returns the winning
/// index and the point itself.
pub fn nearest(query: &Point3, points: &[Point3]) -> Result<(usize, Point3), NearestError> {
    let first = points.first().ok_or(NearestError::EmptySequence)?;

    let mut best = 0;
    let mut best_dist = (query - first).norm();
    for (i, p) in points.iter().enumerate().skip(1) {
        let dist = (query - p).norm();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    Ok((best, points[best]))
}
