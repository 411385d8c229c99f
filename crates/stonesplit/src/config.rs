//! Pipeline configuration and the two named presets.

use serde::{Deserialize, Serialize};
use stonesplit_core::{ensure_at_least_one, ParamError};
use stonesplit_cracks::{CrackDetectorParams, EdgeParams, TraceParams, ValidationParams};
use stonesplit_wedge::WedgePlanParams;

/// Named parameter sets.
///
/// `Sensitive` finds fainter and shorter cracks; `Strict` keeps only strong,
/// straight ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    Sensitive,
    #[default]
    Strict,
}

/// Every tunable of the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub edges: EdgeParams,
    #[serde(default)]
    pub trace: TraceParams,
    pub validation: ValidationParams,
    /// Validated cracks kept, in seed order.
    pub max_cracks: usize,
    #[serde(default)]
    pub wedge: WedgePlanParams,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl AnalyzerConfig {
    pub fn sensitive() -> Self {
        Self {
            edges: EdgeParams {
                threshold: 25.0,
                ..EdgeParams::default()
            },
            trace: TraceParams::default(),
            validation: ValidationParams {
                min_points: 10,
                min_length_fraction: 0.05,
                min_strength: 50.0,
                min_linearity: 0.5,
            },
            max_cracks: 15,
            wedge: WedgePlanParams::default(),
        }
    }

    pub fn strict() -> Self {
        Self {
            edges: EdgeParams {
                threshold: 50.0,
                ..EdgeParams::default()
            },
            trace: TraceParams::default(),
            validation: ValidationParams {
                min_points: 20,
                min_length_fraction: 0.10,
                min_strength: 100.0,
                min_linearity: 0.7,
            },
            max_cracks: 10,
            wedge: WedgePlanParams::default(),
        }
    }

    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Sensitive => Self::sensitive(),
            Preset::Strict => Self::strict(),
        }
    }

    /// Check every stage; the first offending field is reported.
    pub fn validate(&self) -> Result<(), ParamError> {
        self.edges.validate()?;
        self.trace.validate()?;
        self.validation.validate()?;
        ensure_at_least_one("max_cracks", self.max_cracks)?;
        self.wedge.validate()?;
        Ok(())
    }

    /// Parameters of the crack half of the pipeline.
    pub fn crack_params(&self) -> CrackDetectorParams {
        CrackDetectorParams {
            edges: self.edges.clone(),
            trace: self.trace.clone(),
            validation: self.validation.clone(),
            max_cracks: self.max_cracks,
        }
    }
}
