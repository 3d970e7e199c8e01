//! Arc-length-regular camera trajectories with scalar sonification lookup.
//!
//! `flytrace` turns a sparse set of 3D control points (or an existing dense
//! curve) into a smooth path trace with constant world-space spacing, fits a
//! single reference plane to the trace, serves right-handed camera frames
//! along it, and maps positions to rescaled scalar values sampled along a
//! separate reference centerline.
//!
//! Everything is synchronous and pure: no I/O, no shared mutable state.
//! Recomputing a path yields a brand-new trace/plane pair.
//!
//! # Example
//! ```
//! use flytrace::frame::CameraFrameTrack;
//! use flytrace::math::Point3;
//! use flytrace::plane;
//! use flytrace::trace::PathSource;
//!
//! let fiducials = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 0.0, 0.0),
//!     Point3::new(10.0, 10.0, 0.0),
//! ];
//! let trace = PathSource::ControlPoints(&fiducials).trace(1.0, false)?;
//! let fit = plane::fit(trace.points())?;
//! let track = CameraFrameTrack::new(&trace, fit.normal);
//! let first = track.frame_at(0)?;
//! assert!(first.forward.x > 0.9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod flythrough;
pub mod frame;
pub mod math;
pub mod metric;
pub mod nearest;
pub mod plane;
pub mod resample;
pub mod spline;
pub mod trace;

pub use flythrough::{Flythrough, TransportMessage};
pub use frame::{CameraFrame, CameraFrameTrack, FrameError};
pub use metric::{MetricProfile, MetricScale, MetricTransform, ProfileError};
pub use nearest::NearestError;
pub use plane::{FitError, PlaneFit};
pub use resample::{CurveResampler, ResampleError};
pub use spline::{SplineError, SplinePathBuilder};
pub use trace::{PathSource, PathTrace, TraceError};
