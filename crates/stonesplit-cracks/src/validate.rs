//! Geometric and statistical acceptance test for traced cracks.

use serde::{Deserialize, Serialize};
use stonesplit_core::{ensure_finite_non_negative, ensure_unit_interval, ParamError};

use crate::crack::Crack;

/// Acceptance thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationParams {
    pub min_points: usize,
    /// Minimum length as a fraction of `min(width, height)`.
    pub min_length_fraction: f32,
    /// Minimum mean edge magnitude.
    pub min_strength: f32,
    pub min_linearity: f32,
}

impl Default for ValidationParams {
    fn default() -> Self {
        Self {
            min_points: 20,
            min_length_fraction: 0.10,
            min_strength: 100.0,
            min_linearity: 0.7,
        }
    }
}

impl ValidationParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        ensure_finite_non_negative("validation.min_length_fraction", self.min_length_fraction)?;
        ensure_finite_non_negative("validation.min_strength", self.min_strength)?;
        ensure_unit_interval("validation.min_linearity", self.min_linearity)?;
        Ok(())
    }
}

/// Why a crack was rejected. Checks run in declaration order and the first
/// failing one is reported.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum CrackRejection {
    #[error("too few points ({points} < {min})")]
    TooFewPoints { points: usize, min: usize },
    #[error("too short ({length:.1} < {min:.1} px)")]
    TooShort { length: f32, min: f32 },
    #[error("too weak (mean magnitude {strength:.1} < {min:.1})")]
    TooWeak { strength: f32, min: f32 },
    #[error("not linear enough ({linearity:.3} < {min:.3})")]
    NotLinear { linearity: f32, min: f32 },
}

/// Check one crack traced from a `width × height` image.
pub fn validate_crack(
    crack: &Crack,
    width: usize,
    height: usize,
    params: &ValidationParams,
) -> Result<(), CrackRejection> {
    if crack.len() < params.min_points {
        return Err(CrackRejection::TooFewPoints {
            points: crack.len(),
            min: params.min_points,
        });
    }

    let min_length = width.min(height) as f32 * params.min_length_fraction;
    if crack.length < min_length {
        return Err(CrackRejection::TooShort {
            length: crack.length,
            min: min_length,
        });
    }

    if crack.strength < params.min_strength {
        return Err(CrackRejection::TooWeak {
            strength: crack.strength,
            min: params.min_strength,
        });
    }

    let linearity = crack.linearity();
    if linearity < params.min_linearity {
        return Err(CrackRejection::NotLinear {
            linearity,
            min: params.min_linearity,
        });
    }

    Ok(())
}

#[inline]
pub fn is_valid_crack(crack: &Crack, width: usize, height: usize, params: &ValidationParams) -> bool {
    validate_crack(crack, width, height, params).is_ok()
}

/// Per-reason rejection counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionCounts {
    pub too_few_points: usize,
    pub too_short: usize,
    pub too_weak: usize,
    pub not_linear: usize,
}

impl RejectionCounts {
    pub fn record(&mut self, rejection: &CrackRejection) {
        match rejection {
            CrackRejection::TooFewPoints { .. } => self.too_few_points += 1,
            CrackRejection::TooShort { .. } => self.too_short += 1,
            CrackRejection::TooWeak { .. } => self.too_weak += 1,
            CrackRejection::NotLinear { .. } => self.not_linear += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.too_few_points + self.too_short + self.too_weak + self.not_linear
    }
}
