//! Best-fit plane extraction from a point cloud.
//!
//! The fitted normal serves as the camera's "up" reference for an entire
//! flythrough, so it is computed once over the full path trace rather than
//! per step.

use crate::math::{Matrix3, Point3, Vector3, RANK_TOL};
use thiserror::Error;

/// Errors from plane fitting.
#[derive(Debug, Error, PartialEq)]
pub enum FitError {
    /// Fewer points than dimensions; no plane is determined.
    #[error("plane fit needs at least 3 points, got {0}")]
    DegenerateFit(usize),
    /// The points are collinear (or coincident); any vector in the scatter
    /// matrix's null space would pass for a normal, so the caller must pick
    /// a deterministic fallback itself.
    #[error("points are collinear; the plane normal is ill-defined")]
    AmbiguousNormal,
}

/// A fitted plane: the cloud centroid and a unit normal minimizing
/// orthogonal distance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneFit {
    pub centroid: Point3,
    pub normal: Vector3,
}

impl PlaneFit {
    /// Signed distance from `p` to the plane (positive on the normal side).
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&(p - self.centroid))
    }
}

/// Fit a plane to `points` by eigen-decomposition of the scatter matrix.
///
/// Centers the cloud at its mean, forms the 3×3 scatter matrix `X·Xᵗ`, and
/// returns the eigenvector of the smallest eigenvalue as the normal.
pub fn fit(points: &[Point3]) -> Result<PlaneFit, FitError> {
    if points.len() < 3 {
        return Err(FitError::DegenerateFit(points.len()));
    }

    let mut centroid = Vector3::zeros();
    for p in points {
        centroid += p.coords;
    }
    centroid /= points.len() as f64;

    let mut scatter = Matrix3::zeros();
    for p in points {
        let centered = p.coords - centroid;
        scatter += centered * centered.transpose();
    }

    let eigen = scatter.symmetric_eigen();
    let mut order = [0, 1, 2];
    order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));
    let [min_i, mid_i, max_i] = order;

    // Rank test: a proper plane spans two directions, so the middle
    // eigenvalue must be significant relative to the largest. Collinear
    // clouds have rank 1 and coincident clouds rank 0; in both cases the
    // normal direction is decided by floating-point noise, which must be
    // reported instead of returned.
    let max_val = eigen.eigenvalues[max_i];
    if max_val <= 0.0 || eigen.eigenvalues[mid_i] / max_val < RANK_TOL {
        return Err(FitError::AmbiguousNormal);
    }

    let normal: Vector3 = eigen.eigenvectors.column(min_i).into_owned();
    Ok(PlaneFit {
        centroid: Point3::from(centroid),
        normal: normal.normalize(),
    })
}
