//! Mapping spatial positions to rescaled scalar values.
//!
//! A `MetricProfile` pairs a reference point sequence (typically a vessel
//! or airway centerline) with a parallel scalar array, rescales the scalars
//! into a target interval once at construction, and answers queries by
//! nearest-point lookup.

use crate::math::Point3;
use crate::nearest::{self, NearestError};
use thiserror::Error;

/// Errors from profile construction and lookup.
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    /// The reference points and the scalar samples must be parallel arrays.
    #[error("reference sequence has {points} points but {scalars} scalar samples")]
    LengthMismatch { points: usize, scalars: usize },
    /// All scalar samples are equal; the affine rescale is undefined and the
    /// caller must supply a constant fallback.
    #[error("scalar samples are constant; rescaling is undefined")]
    DegenerateRange,
    #[error(transparent)]
    Nearest(#[from] NearestError),
}

/// How raw scalar samples are read before rescaling.
///
/// Radius-derived metrics want larger values mapped to lower outputs (a
/// wider airway sounds a lower pitch); `Inverted` names that flip as
/// `pivot − raw` instead of hiding it in the sampling code.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum MetricTransform {
    #[default]
    Raw,
    Inverted {
        pivot: f64,
    },
}

impl MetricTransform {
    fn apply(&self, raw: f64) -> f64 {
        match self {
            MetricTransform::Raw => raw,
            MetricTransform::Inverted { pivot } => pivot - raw,
        }
    }
}

/// Target interval for rescaled scalars.
///
/// The default `[-12, 12]` spans two octaves of semitones around a center
/// pitch, matching what the audio side expects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MetricScale {
    pub lo: f64,
    pub hi: f64,
}

impl Default for MetricScale {
    fn default() -> Self {
        Self { lo: -12.0, hi: 12.0 }
    }
}

/// A reference point sequence with a parallel, rescaled scalar table.
///
/// Built once per reference curve and read-only afterwards; changing the
/// inputs means building a new profile.
#[derive(Clone, Debug)]
pub struct MetricProfile {
    points: Vec<Point3>,
    values: Vec<f64>,
    raw_range: (f64, f64),
    scale: MetricScale,
}

impl MetricProfile {
    /// Pair `points` with `raw_scalars` and precompute the rescaled table.
    ///
    /// The rescale is affine:
    /// `out = lo + (raw − raw_min) · (hi − lo) / (raw_max − raw_min)`,
    /// with the extrema taken after `transform` is applied.
    pub fn build(
        points: Vec<Point3>,
        raw_scalars: &[f64],
        transform: MetricTransform,
        scale: MetricScale,
    ) -> Result<Self, ProfileError> {
        if points.len() != raw_scalars.len() {
            return Err(ProfileError::LengthMismatch {
                points: points.len(),
                scalars: raw_scalars.len(),
            });
        }
        if points.is_empty() {
            return Err(NearestError::EmptySequence.into());
        }

        let transformed: Vec<f64> = raw_scalars.iter().map(|&r| transform.apply(r)).collect();
        let raw_min = transformed.iter().copied().fold(f64::INFINITY, f64::min);
        let raw_max = transformed.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if raw_max == raw_min {
            return Err(ProfileError::DegenerateRange);
        }

        let gain = (scale.hi - scale.lo) / (raw_max - raw_min);
        let values = transformed
            .iter()
            .map(|&v| scale.lo + (v - raw_min) * gain)
            .collect();

        Ok(Self {
            points,
            values,
            raw_range: (raw_min, raw_max),
            scale,
        })
    }

    /// Rescaled value at the reference point nearest to `query`.
    pub fn value_near(&self, query: &Point3) -> Result<f64, ProfileError> {
        let (index, _) = nearest::nearest(query, &self.points)?;
        Ok(self.values[index])
    }

    /// Rescaled value at a known reference index.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Extrema of the (transformed) raw samples the rescale was derived from.
    pub fn raw_range(&self) -> (f64, f64) {
        self.raw_range
    }

    pub fn scale(&self) -> MetricScale {
        self.scale
    }
}
