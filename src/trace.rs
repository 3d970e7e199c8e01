//! The arc-length-regular path trace and its two producers.

use crate::math::Point3;
use crate::resample::{CurveResampler, ResampleError};
use crate::spline::{SplineError, SplinePathBuilder};
use thiserror::Error;

/// Errors from path-trace construction, from either producer.
#[derive(Debug, Error, PartialEq)]
pub enum TraceError {
    #[error(transparent)]
    Spline(#[from] SplineError),
    #[error(transparent)]
    Resample(#[from] ResampleError),
}

/// An ordered sequence of 3D points with consecutive spacing equal to a
/// fixed step length, except for a short closing segment at the end.
///
/// Immutable after construction. Recomputing a path (say after the control
/// points moved) produces a brand-new trace; there is no incremental update.
#[derive(Clone, Debug, PartialEq)]
pub struct PathTrace {
    points: Vec<Point3>,
    step_length: f64,
    forced_steps: usize,
}

impl PathTrace {
    pub(crate) fn new(points: Vec<Point3>, step_length: f64, forced_steps: usize) -> Self {
        Self {
            points,
            step_length,
            forced_steps,
        }
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Point3> {
        self.points.get(index)
    }

    pub fn first(&self) -> Option<&Point3> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point3> {
        self.points.last()
    }

    /// The world-space spacing the trace was generated at.
    pub fn step_length(&self) -> f64 {
        self.step_length
    }

    /// How many points were accepted through the step solver's iteration
    /// cap instead of full convergence. Zero for resampled traces. Nonzero
    /// values flag pathological control-point spacing; the trace is still
    /// usable but its spacing guarantee is weakened at those steps.
    pub fn forced_steps(&self) -> usize {
        self.forced_steps
    }
}

/// Where a path comes from: sparse control points to interpolate, or an
/// already-continuous curve to resample.
///
/// The choice of interpolation strategy is dispatched here, once, at
/// construction entry; nothing downstream branches on the source kind.
#[derive(Clone, Copy, Debug)]
pub enum PathSource<'a> {
    /// Sparse user-placed control points, Hermite-interpolated.
    ControlPoints(&'a [Point3]),
    /// Dense samples of an existing curve, resampled at constant arc length.
    DenseCurve(&'a [Point3]),
}

impl PathSource<'_> {
    /// Produce the arc-length-regular trace for this source.
    pub fn trace(&self, step_length: f64, closed: bool) -> Result<PathTrace, TraceError> {
        match self {
            PathSource::ControlPoints(points) => {
                let builder = SplinePathBuilder {
                    step_length,
                    closed,
                };
                Ok(builder.build(points)?)
            }
            PathSource::DenseCurve(samples) => {
                let resampler = CurveResampler {
                    step_length,
                    closed,
                };
                Ok(resampler.resample(samples)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_to_the_spline_builder() {
        let pts = [Point3::origin(), Point3::new(4.0, 0.0, 0.0)];
        let trace = PathSource::ControlPoints(&pts).trace(1.0, false).unwrap();
        assert_eq!(trace.first(), Some(&pts[0]));
        assert_eq!(trace.last(), Some(&pts[1]));
    }

    #[test]
    fn dispatches_to_the_resampler() {
        let pts: Vec<Point3> = (0..11).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        let trace = PathSource::DenseCurve(&pts).trace(2.0, false).unwrap();
        assert_eq!(trace.len(), 6);
        assert_eq!(trace.forced_steps(), 0);
    }

    #[test]
    fn source_errors_pass_through() {
        let one = [Point3::origin()];
        assert!(matches!(
            PathSource::ControlPoints(&one).trace(1.0, false),
            Err(TraceError::Spline(SplineError::InsufficientControlPoints(1)))
        ));
        assert!(matches!(
            PathSource::DenseCurve(&[]).trace(1.0, false),
            Err(TraceError::Resample(ResampleError::EmptyCurve))
        ));
    }
}
