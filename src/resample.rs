//! Constant-arc-length resampling of an existing dense curve.
//!
//! Used when the path source is already continuous (a centerline, a stored
//! curve) rather than a sparse control-point set: no interpolation is
//! needed, only a walk along the existing polyline emitting a point every
//! fixed world length.

use crate::math::{Point3, TOLERANCE};
use crate::trace::PathTrace;
use thiserror::Error;

/// Errors from curve resampling.
#[derive(Debug, Error, PartialEq)]
pub enum ResampleError {
    /// No samples to resample.
    #[error("cannot resample an empty curve")]
    EmptyCurve,
}

/// Resamples a dense polyline at constant arc-length spacing.
#[derive(Clone, Copy, Debug)]
pub struct CurveResampler {
    /// World-space spacing between emitted points.
    pub step_length: f64,
    /// Walk the wrap segment from the last sample back to the first.
    pub closed: bool,
}

impl Default for CurveResampler {
    fn default() -> Self {
        Self {
            step_length: 0.5,
            closed: false,
        }
    }
}

impl CurveResampler {
    /// Walk `samples` accumulating arc length and emit a point every
    /// `step_length` world units.
    ///
    /// Open curves always emit the final sample, closing the trace with a
    /// short remainder segment; closed curves walk the wrap segment without
    /// duplicating the start point. A single-sample curve yields a
    /// single-point trace.
    pub fn resample(&self, samples: &[Point3]) -> Result<PathTrace, ResampleError> {
        assert!(
            self.step_length > 0.0,
            "step length must be positive, got {}",
            self.step_length
        );
        let first = *samples.first().ok_or(ResampleError::EmptyCurve)?;

        let mut points = vec![first];
        let mut prev = first;
        // Arc length already walked since the last emitted point.
        let mut carry = 0.0;

        let wrap = usize::from(self.closed);
        for k in 1..samples.len() + wrap {
            let next = samples[k % samples.len()];
            let seg = next - prev;
            let seg_len = seg.norm();
            if seg_len <= TOLERANCE {
                prev = next;
                continue;
            }
            let dir = seg / seg_len;

            let mut walked = 0.0;
            while carry + (seg_len - walked) >= self.step_length {
                walked += self.step_length - carry;
                points.push(prev + dir * walked);
                carry = 0.0;
            }
            carry += seg_len - walked;
            prev = next;
        }

        if self.closed {
            // An evenly dividing perimeter lands the final emission exactly
            // on the start; drop the duplicate.
            if points.len() > 1 && (points[points.len() - 1] - points[0]).norm() <= TOLERANCE {
                points.pop();
            }
        } else {
            let last = samples[samples.len() - 1];
            if (points[points.len() - 1] - last).norm() > TOLERANCE {
                points.push(last);
            }
        }

        Ok(PathTrace::new(points, self.step_length, 0))
    }
}
