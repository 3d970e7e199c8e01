//! Per-step camera frames along a path trace.
//!
//! The camera at step `i` sits on `trace[i]` and looks at `trace[i + 1]`.
//! Its up reference is the single best-fit plane normal of the whole trace,
//! re-orthogonalized against the local forward direction, so the basis
//! stays right-handed and orthonormal even where the normal is not
//! perpendicular to the path.

use crate::math::{Matrix3, Matrix4, Point3, Vector3, TOLERANCE};
use crate::trace::PathTrace;
use thiserror::Error;

/// Errors from camera-frame construction.
#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    /// `step + 1` runs past the end of the trace; a look-at point needs a
    /// following sample.
    #[error("step {step} out of range for a trace of {len} points")]
    IndexOutOfRange { step: usize, len: usize },
    /// The local forward direction is parallel to the plane normal, or the
    /// trace repeats a point; the caller must supply another up reference.
    #[error("camera frame is degenerate at step {step}")]
    DegenerateFrame { step: usize },
}

/// A camera pose at one trace step: position, look-at target, and a
/// right-handed orthonormal basis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraFrame {
    pub position: Point3,
    pub focal: Point3,
    pub right: Vector3,
    pub up: Vector3,
    pub forward: Vector3,
}

impl CameraFrame {
    /// Homogeneous camera transform: columns X, Y, Z are right, up,
    /// forward, with the position as translation. Suitable for driving a
    /// scene-graph transform node directly.
    pub fn to_matrix(&self) -> Matrix4 {
        let rot = Matrix3::from_columns(&[self.right, self.up, self.forward]);
        let mut m = rot.to_homogeneous();
        m.m14 = self.position.x;
        m.m24 = self.position.y;
        m.m34 = self.position.z;
        m
    }
}

/// Serves camera frames for any step of a trace, against one plane normal
/// fixed for the whole flythrough.
///
/// Frames are recomputed per request; only the trace and the normal are
/// held, so concurrent reads for different steps are safe.
pub struct CameraFrameTrack<'a> {
    trace: &'a PathTrace,
    plane_normal: Vector3,
}

impl<'a> CameraFrameTrack<'a> {
    pub fn new(trace: &'a PathTrace, plane_normal: Vector3) -> Self {
        Self {
            trace,
            plane_normal,
        }
    }

    /// Number of addressable steps: one less than the trace length, since
    /// the final point only serves as a look-at target.
    pub fn steps(&self) -> usize {
        self.trace.len().saturating_sub(1)
    }

    /// Build the frame at `step`.
    ///
    /// forward = normalize(focal − position), right = normalize(normal ×
    /// forward), up = forward × right. The recross for `up` guarantees
    /// orthonormality even though the supplied normal is generally not
    /// orthogonal to the local forward.
    pub fn frame_at(&self, step: usize) -> Result<CameraFrame, FrameError> {
        let len = self.trace.len();
        if step + 1 >= len {
            return Err(FrameError::IndexOutOfRange { step, len });
        }
        let position = self.trace.points()[step];
        let focal = self.trace.points()[step + 1];

        let gaze = focal - position;
        let gaze_len = gaze.norm();
        if gaze_len <= TOLERANCE {
            return Err(FrameError::DegenerateFrame { step });
        }
        let forward = gaze / gaze_len;

        let right = self.plane_normal.cross(&forward);
        let right_len = right.norm();
        if right_len <= TOLERANCE {
            return Err(FrameError::DegenerateFrame { step });
        }
        let right = right / right_len;
        let up = forward.cross(&right);

        Ok(CameraFrame {
            position,
            focal,
            right,
            up,
            forward,
        })
    }
}
