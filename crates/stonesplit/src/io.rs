//! JSON job configuration and report helpers.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use stonesplit_cracks::{EdgeParams, TraceParams, ValidationParams};
use stonesplit_wedge::WedgePlanParams;

use crate::config::{AnalyzerConfig, Preset};
use crate::pipeline::AnalysisResult;
use crate::scale::AnalysisScale;

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "image")]
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

fn default_max_analysis_width() -> Option<u32> {
    Some(600)
}

/// One analysis job: an image, a preset and optional per-stage overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeJobConfig {
    pub image_path: String,
    #[serde(default)]
    pub preset: Preset,
    #[serde(default)]
    pub output_path: Option<String>,
    /// Images wider than this are shrunk before analysis. `null` disables.
    #[serde(default = "default_max_analysis_width")]
    pub max_analysis_width: Option<u32>,
    #[serde(default)]
    pub edges: Option<EdgeParams>,
    #[serde(default)]
    pub trace: Option<TraceParams>,
    #[serde(default)]
    pub validation: Option<ValidationParams>,
    #[serde(default)]
    pub max_cracks: Option<usize>,
    #[serde(default)]
    pub wedge: Option<WedgePlanParams>,
}

impl AnalyzeJobConfig {
    /// Job for `image_path` with the default preset and no overrides.
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            preset: Preset::default(),
            output_path: None,
            max_analysis_width: default_max_analysis_width(),
            edges: None,
            trace: None,
            validation: None,
            max_cracks: None,
            wedge: None,
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("stonesplit_report.json"))
    }

    /// Preset parameters with this job's overrides applied. Not validated.
    pub fn build_config(&self) -> AnalyzerConfig {
        let mut config = AnalyzerConfig::from_preset(self.preset);
        if let Some(edges) = self.edges.clone() {
            config.edges = edges;
        }
        if let Some(trace) = self.trace.clone() {
            config.trace = trace;
        }
        if let Some(validation) = self.validation.clone() {
            config.validation = validation;
        }
        if let Some(max_cracks) = self.max_cracks {
            config.max_cracks = max_cracks;
        }
        if let Some(wedge) = self.wedge.clone() {
            config.wedge = wedge;
        }
        config
    }
}

/// Everything a caller needs to render or archive one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub image_path: String,
    pub image_width: u32,
    pub image_height: u32,
    pub analysis_width: u32,
    pub analysis_height: u32,
    /// Multiply analysis coordinates by this to land on source pixels.
    #[serde(default)]
    pub scale: AnalysisScale,
    pub config: AnalyzerConfig,
    #[serde(default)]
    pub result: Option<AnalysisResult>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalysisReport {
    /// Report shell for an image of the given size, before analysis.
    pub fn new(image_path: impl Into<String>, size: (u32, u32), config: AnalyzerConfig) -> Self {
        Self {
            image_path: image_path.into(),
            image_width: size.0,
            image_height: size.1,
            analysis_width: size.0,
            analysis_height: size.1,
            scale: AnalysisScale::IDENTITY,
            config,
            result: None,
            error: None,
        }
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_job_uses_strict_preset() {
        let job: AnalyzeJobConfig = serde_json::from_str(r#"{ "image_path": "rock.png" }"#).unwrap();
        assert_eq!(job.preset, Preset::Strict);
        assert_eq!(job.max_analysis_width, Some(600));
        assert_eq!(job.build_config(), AnalyzerConfig::strict());
        assert_eq!(job.output_path(), PathBuf::from("stonesplit_report.json"));
    }

    #[test]
    fn overrides_replace_whole_stages() {
        let raw = r#"{
            "image_path": "rock.png",
            "preset": "sensitive",
            "max_analysis_width": null,
            "max_cracks": 3,
            "wedge": { "min_spacing": 50.0, "max_points": 4 }
        }"#;
        let job: AnalyzeJobConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(job.max_analysis_width, None);
        let cfg = job.build_config();
        assert_eq!(cfg.edges.threshold, 25.0);
        assert_eq!(cfg.max_cracks, 3);
        assert_eq!(cfg.wedge.min_spacing, 50.0);
        assert_eq!(cfg.wedge.max_points, 4);
        assert_eq!(cfg.wedge.intersection_threshold, 10.0);
    }

    #[test]
    fn job_and_report_survive_disk() {
        let dir = tempfile::tempdir().unwrap();
        let job_path = dir.path().join("job.json");
        let mut job = AnalyzeJobConfig::new("rock.png");
        job.output_path = Some("out.json".into());
        job.write_json(&job_path).unwrap();
        assert_eq!(AnalyzeJobConfig::load_json(&job_path).unwrap(), job);

        let report_path = dir.path().join("report.json");
        let mut report = AnalysisReport::new("rock.png", (800, 600), job.build_config());
        report.error = Some("decode failed".into());
        report.write_json(&report_path).unwrap();
        let back = AnalysisReport::load_json(&report_path).unwrap();
        assert_eq!(back.image_width, 800);
        assert_eq!(back.error.as_deref(), Some("decode failed"));
        assert!(back.result.is_none());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AnalyzeJobConfig::load_json("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }
}
