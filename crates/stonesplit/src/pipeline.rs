//! End-to-end analysis of one RGBA buffer.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use stonesplit_core::RgbaImageView;
use stonesplit_cracks::{Crack, CrackDetector, RejectionCounts, TraceStats};
use stonesplit_wedge::{PlanSummary, WedgeCandidate, WedgePlanner};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::config::AnalyzerConfig;
use crate::error::{check_view, AnalyzeError};

/// Counters describing how the result was reached.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionStats {
    /// Traced groups offered to validation.
    pub candidates: usize,
    pub rejections: RejectionCounts,
    pub trace: TraceStats,
    /// Crack samples offered to the wedge layout.
    pub sampled_points: usize,
    /// Intersections offered to the wedge layout.
    pub intersections: usize,
}

/// Output of one analysis.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub cracks: Vec<Crack>,
    pub wedge_plan: Vec<WedgeCandidate>,
    /// A tracing ceiling cut a crack or the whole scan short.
    pub truncated: bool,
    pub stats: DetectionStats,
    pub summary: PlanSummary,
}

/// A validated configuration bound to its stage objects.
///
/// Holds no per-image state; one analyzer can serve any number of images,
/// from any number of threads.
#[derive(Clone, Debug)]
pub struct StoneAnalyzer {
    config: AnalyzerConfig,
    detector: CrackDetector,
    planner: WedgePlanner,
}

impl StoneAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self, AnalyzeError> {
        config.validate()?;
        Ok(Self {
            detector: CrackDetector::new(config.crack_params()),
            planner: WedgePlanner::new(config.wedge.clone()),
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, image), fields(width = image.width, height = image.height))
    )]
    pub fn analyze(&self, image: &RgbaImageView<'_>) -> Result<AnalysisResult, AnalyzeError> {
        check_view(image)?;

        let detection = self.detector.detect(image);
        let truncated = detection.truncated();
        if truncated {
            warn!(
                "crack tracing hit a resource ceiling on a {}x{} image; results are partial",
                image.width, image.height
            );
        }

        let plan = self.planner.plan(&detection.cracks);
        let summary = plan.summary(detection.cracks.len());
        info!(
            "{} cracks, {} wedge points ({} high, {} medium, {} low)",
            summary.crack_count,
            plan.len(),
            summary.high_priority,
            summary.medium_priority,
            summary.low_priority
        );
        debug!("recommended splits: {}", summary.recommended_splits);

        Ok(AnalysisResult {
            stats: DetectionStats {
                candidates: detection.candidates,
                rejections: detection.rejections,
                trace: detection.trace,
                sampled_points: plan.sampled,
                intersections: plan.intersections,
            },
            cracks: detection.cracks,
            wedge_plan: plan.points,
            truncated,
            summary,
        })
    }

    /// Analyze a raw interleaved RGBA8 buffer.
    pub fn analyze_rgba(
        &self,
        width: usize,
        height: usize,
        pixels: &[u8],
    ) -> Result<AnalysisResult, AnalyzeError> {
        self.analyze(&RgbaImageView::new(width, height, pixels))
    }
}

/// One-shot analysis: validate `config`, then run every stage on `image`.
pub fn analyze(
    image: &RgbaImageView<'_>,
    config: &AnalyzerConfig,
) -> Result<AnalysisResult, AnalyzeError> {
    StoneAnalyzer::new(config.clone())?.analyze(image)
}
