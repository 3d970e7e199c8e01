//! Linear algebra type aliases and geometric tolerances.

pub type Point3 = nalgebra::Point3<f64>;
pub type Vector3 = nalgebra::Vector3<f64>;
pub type Matrix3 = nalgebra::Matrix3<f64>;
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Geometric tolerance for point coincidence and zero-length tests
/// (distance in world units).
pub const TOLERANCE: f64 = 1e-9;

/// Relative eigenvalue threshold for rank tests in plane fitting.
pub const RANK_TOL: f64 = 1e-8;
