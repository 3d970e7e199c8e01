//! Hermite spline path construction with arc-length-constant stepping.
//!
//! Control points are interpolated with a Catmull-Rom-style cubic Hermite
//! spline and walked in fixed world-length steps. The parametric increment
//! realizing one world-length step varies with local curvature, so each
//! step solves for it by fixed-point iteration, seeded with the increment
//! that realized the previous step.

use crate::math::{Point3, Vector3, TOLERANCE};
use crate::trace::PathTrace;
use log::{debug, warn};
use thiserror::Error;

/// Iteration cap for a single step solve. Hitting it accepts the last
/// candidate with zero remainder; every such acceptance is counted in
/// [`PathTrace::forced_steps`].
const MAX_STEP_ITERATIONS: usize = 500;

/// Relative tolerance on the desired/achieved chord-length ratio.
const RATIO_TOL: f64 = 0.05;

/// Parametric increments below this can no longer make progress.
const DT_UNDERFLOW: f64 = 1e-8;

/// Remainders below this fraction of the step length are absorbed into the
/// boundary point instead of solved; targeting them would underflow `dt`.
const MIN_REMAINDER_FRACTION: f64 = 1e-6;

/// Errors from spline path construction.
#[derive(Debug, Error, PartialEq)]
pub enum SplineError {
    /// Interpolation needs at least one segment.
    #[error("spline interpolation needs at least 2 control points, got {0}")]
    InsufficientControlPoints(usize),
    /// The step solver's parametric increment underflowed; reported instead
    /// of silently emitting a wrong point.
    #[error("arc-length step solver underflowed on segment {segment}")]
    StepConvergenceFailure { segment: usize },
}

// Cubic Hermite basis.
#[inline]
fn h00(t: f64) -> f64 {
    2.0 * t * t * t - 3.0 * t * t + 1.0
}
#[inline]
fn h10(t: f64) -> f64 {
    t * t * t - 2.0 * t * t + t
}
#[inline]
fn h01(t: f64) -> f64 {
    -2.0 * t * t * t + 3.0 * t * t
}
#[inline]
fn h11(t: f64) -> f64 {
    t * t * t - t * t
}

/// Per-point tangents: the average of the adjacent forward differences at
/// interior points, the single adjacent difference at the endpoints. For a
/// closed loop every point is interior, with neighbors taken cyclically.
fn tangents(points: &[Point3], closed: bool) -> Vec<Vector3> {
    let n = points.len();
    let mut m = Vec::with_capacity(n);
    if closed {
        let forward: Vec<Vector3> = (0..n).map(|i| points[(i + 1) % n] - points[i]).collect();
        for i in 0..n {
            m.push((forward[(i + n - 1) % n] + forward[i]) / 2.0);
        }
    } else {
        let forward: Vec<Vector3> = (0..n - 1).map(|i| points[i + 1] - points[i]).collect();
        m.push(forward[0]);
        for i in 1..n - 1 {
            m.push((forward[i - 1] + forward[i]) / 2.0);
        }
        m.push(forward[n - 2]);
    }
    m
}

/// The interpolant: control points plus derived tangents.
struct Spline {
    points: Vec<Point3>,
    tangents: Vec<Vector3>,
    closed: bool,
}

impl Spline {
    fn segments(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    /// Hermite evaluation on segment `i` at local parameter `t`.
    ///
    /// `t` may run past 1.0 during step solving; the cubic extrapolates.
    fn point_at(&self, i: usize, t: f64) -> Point3 {
        let j = (i + 1) % self.points.len();
        let p = h00(t) * self.points[i].coords
            + h10(t) * self.tangents[i]
            + h01(t) * self.points[j].coords
            + h11(t) * self.tangents[j];
        Point3::from(p)
    }
}

/// One accepted arc-length step.
struct Step {
    /// Parametric coordinate after the step, clamped to the segment end.
    t: f64,
    point: Point3,
    /// World length left unconsumed when the step ran past the segment end.
    remainder: f64,
    /// The solve hit the iteration cap and accepted its last candidate.
    forced: bool,
}

/// Carries the parametric-increment estimate across successive steps.
///
/// Curvature varies smoothly along a segment, so the increment that
/// realized the previous step is a good seed for the next solve; most
/// steps then converge within a couple of iterations.
struct StepSolver {
    dt: f64,
}

impl StepSolver {
    fn new(step_length: f64) -> Self {
        Self { dt: step_length }
    }

    /// Advance from `(segment, t)` until the chord from `prev` to the new
    /// point has length `target`, within [`RATIO_TOL`].
    fn step(
        &mut self,
        spline: &Spline,
        segment: usize,
        t: f64,
        prev: &Point3,
        target: f64,
    ) -> Result<Step, SplineError> {
        let mut count = 0;
        let (t1, candidate) = loop {
            let t1 = t + self.dt;
            let candidate = spline.point_at(segment, t1);
            let dist = (candidate - prev).norm();

            // Zero-norm chord (duplicate control points): the ratio is
            // undefined, accept the candidate unchanged.
            if dist <= TOLERANCE {
                break (t1, candidate);
            }

            let ratio = target / dist;
            self.dt *= ratio;
            if self.dt < DT_UNDERFLOW {
                return Err(SplineError::StepConvergenceFailure { segment });
            }
            count += 1;
            if count > MAX_STEP_ITERATIONS {
                warn!(
                    "step solve hit the {MAX_STEP_ITERATIONS}-iteration cap on segment \
                     {segment}; accepting the last candidate"
                );
                return Ok(Step {
                    t: t1,
                    point: candidate,
                    remainder: 0.0,
                    forced: true,
                });
            }
            if (1.0 - ratio).abs() <= RATIO_TOL {
                break (t1, candidate);
            }
        };

        if t1 > 1.0 {
            // Ran past the segment end: clamp to the boundary and report the
            // world length not yet consumed, so the caller can continue into
            // the next segment without breaking the spacing.
            let boundary = spline.point_at(segment, 1.0);
            let remainder = (boundary - candidate).norm();
            return Ok(Step {
                t: 1.0,
                point: boundary,
                remainder,
                forced: false,
            });
        }
        Ok(Step {
            t: t1,
            point: candidate,
            remainder: 0.0,
            forced: false,
        })
    }
}

/// Builds an arc-length-regular [`PathTrace`] from sparse control points.
#[derive(Clone, Copy, Debug)]
pub struct SplinePathBuilder {
    /// Desired world-space spacing between consecutive trace points.
    pub step_length: f64,
    /// Treat the control polygon as a closed loop.
    pub closed: bool,
}

impl Default for SplinePathBuilder {
    fn default() -> Self {
        Self {
            step_length: 0.5,
            closed: false,
        }
    }
}

impl SplinePathBuilder {
    /// Interpolate `control_points` and walk the spline in steps of
    /// `step_length` world units.
    ///
    /// The trace starts exactly at the first control point and its final
    /// point covers the last control point; when a step crosses a segment
    /// boundary, the leftover length becomes the target of a fresh step at
    /// the start of the next segment, keeping spacing continuous across
    /// boundaries.
    pub fn build(&self, control_points: &[Point3]) -> Result<PathTrace, SplineError> {
        assert!(
            self.step_length > 0.0,
            "step length must be positive, got {}",
            self.step_length
        );
        let n = control_points.len();
        if n < 2 {
            return Err(SplineError::InsufficientControlPoints(n));
        }

        let spline = Spline {
            points: control_points.to_vec(),
            tangents: tangents(control_points, self.closed),
            closed: self.closed,
        };
        let segments = spline.segments();

        let mut path = vec![control_points[0]];
        let mut solver = StepSolver::new(self.step_length);
        let mut forced_steps = 0;
        let mut segment = 0;
        let mut t = 0.0;

        while segment < segments {
            let prev = path[path.len() - 1];
            let mut step = solver.step(&spline, segment, t, &prev, self.step_length)?;
            if step.forced {
                forced_steps += 1;
            }
            t = step.t;

            // Crossing a boundary leaves part of the step unconsumed;
            // restart at the next segment with the remainder as the target.
            // Control points spaced closer than the step length can cross
            // several segments in a single step.
            while t >= 1.0 && segment < segments {
                segment += 1;
                t = 0.0;
                if segment >= segments
                    || step.remainder <= self.step_length * MIN_REMAINDER_FRACTION
                {
                    break;
                }
                let boundary = step.point;
                step = solver.step(&spline, segment, 0.0, &boundary, step.remainder)?;
                if step.forced {
                    forced_steps += 1;
                }
                t = step.t;
            }
            path.push(step.point);
        }

        debug!(
            "spline path: {} control points -> {} trace points ({} forced)",
            n,
            path.len(),
            forced_steps
        );
        Ok(PathTrace::new(path, self.step_length, forced_steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hermite_basis_interpolates_endpoints() {
        assert_relative_eq!(h00(0.0), 1.0);
        assert_relative_eq!(h01(0.0), 0.0);
        assert_relative_eq!(h00(1.0), 0.0);
        assert_relative_eq!(h01(1.0), 1.0);
        assert_relative_eq!(h10(0.0), 0.0);
        assert_relative_eq!(h10(1.0), 0.0);
        assert_relative_eq!(h11(0.0), 0.0);
        assert_relative_eq!(h11(1.0), 0.0);
    }

    #[test]
    fn tangent_set_matches_point_count() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        assert_eq!(tangents(&pts, false).len(), pts.len());
        assert_eq!(tangents(&pts, true).len(), pts.len());
    }

    #[test]
    fn endpoint_tangents_are_single_forward_differences() {
        let pts = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
        ];
        let m = tangents(&pts, false);
        assert_relative_eq!(m[0], Vector3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(m[2], Vector3::new(0.0, 2.0, 0.0));
        // Interior: average of the two adjacent forward differences.
        assert_relative_eq!(m[1], Vector3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn too_few_control_points() {
        let builder = SplinePathBuilder::default();
        assert_eq!(
            builder.build(&[Point3::origin()]),
            Err(SplineError::InsufficientControlPoints(1))
        );
    }

    #[test]
    fn two_point_path_is_valid() {
        let builder = SplinePathBuilder {
            step_length: 1.0,
            closed: false,
        };
        let pts = [Point3::origin(), Point3::new(5.0, 0.0, 0.0)];
        let trace = builder.build(&pts).unwrap();
        assert_eq!(trace.first(), Some(&pts[0]));
        assert_relative_eq!(*trace.last().unwrap(), pts[1], epsilon = 1e-9);
        // Five unit steps plus the start; float drift at the segment end may
        // add one short closing point.
        assert!(trace.len() == 6 || trace.len() == 7, "len {}", trace.len());
    }

    #[test]
    fn duplicate_control_points_do_not_divide_by_zero() {
        let builder = SplinePathBuilder {
            step_length: 0.5,
            closed: false,
        };
        let p = Point3::new(1.0, 2.0, 3.0);
        let trace = builder.build(&[p, p]).unwrap();
        assert!(!trace.is_empty());
        for q in trace.points() {
            assert_relative_eq!(*q, p, epsilon = 1e-9);
        }
    }

    #[test]
    fn straight_line_spacing_is_regular() {
        let builder = SplinePathBuilder {
            step_length: 1.0,
            closed: false,
        };
        let pts = [Point3::origin(), Point3::new(10.0, 0.0, 0.0)];
        let trace = builder.build(&pts).unwrap();
        let chords: Vec<f64> = trace
            .points()
            .windows(2)
            .map(|w| (w[1] - w[0]).norm())
            .collect();
        for &d in &chords[..chords.len() - 1] {
            assert!((d - 1.0).abs() <= 0.06, "spacing {d} outside tolerance");
        }
        // The closing remainder may be shorter.
        assert!(*chords.last().unwrap() <= 1.06);
    }

    #[test]
    fn closed_loop_returns_to_the_start() {
        let builder = SplinePathBuilder {
            step_length: 0.5,
            closed: true,
        };
        let pts = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 4.0, 0.0),
            Point3::new(0.0, 4.0, 0.0),
        ];
        let trace = builder.build(&pts).unwrap();
        assert_eq!(trace.first(), Some(&pts[0]));
        assert_relative_eq!(*trace.last().unwrap(), pts[0], epsilon = 1e-9);
        // A closed square of side 4 walked at 0.5 gives on the order of
        // perimeter / step points; the spline bulges, so allow slack.
        assert!(trace.len() > 30);
    }
}
