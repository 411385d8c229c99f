use log::debug;
use serde::{Deserialize, Serialize};
use stonesplit_core::{ensure_at_least_one, ParamError, RgbaImageView, ScalarMap};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::crack::Crack;
use crate::edges::{detect_edges, EdgeParams};
use crate::trace::{trace_cracks, TraceParams, TraceStats};
use crate::validate::{validate_crack, RejectionCounts, ValidationParams};

/// Configuration of the crack half of the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrackDetectorParams {
    pub edges: EdgeParams,
    #[serde(default)]
    pub trace: TraceParams,
    pub validation: ValidationParams,
    /// Validated cracks kept, in seed order.
    pub max_cracks: usize,
}

impl Default for CrackDetectorParams {
    fn default() -> Self {
        Self {
            edges: EdgeParams::default(),
            trace: TraceParams::default(),
            validation: ValidationParams::default(),
            max_cracks: 10,
        }
    }
}

impl CrackDetectorParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        self.edges.validate()?;
        self.trace.validate()?;
        self.validation.validate()?;
        ensure_at_least_one("max_cracks", self.max_cracks)?;
        Ok(())
    }
}

/// Output of a crack detection run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CrackDetection {
    /// Accepted cracks in seed order, at most `max_cracks`.
    pub cracks: Vec<Crack>,
    /// Groups that survived the noise filter and were offered to validation.
    pub candidates: usize,
    pub rejections: RejectionCounts,
    pub trace: TraceStats,
}

impl CrackDetection {
    /// Whether a tracing ceiling cut the scan or any crack short.
    pub fn truncated(&self) -> bool {
        self.trace.truncated()
    }
}

/// Edge map → bounded tracing → validation.
#[derive(Clone, Debug)]
pub struct CrackDetector {
    params: CrackDetectorParams,
}

impl CrackDetector {
    /// Create a detector. Parameters are checked by the caller via
    /// [`CrackDetectorParams::validate`].
    pub fn new(params: CrackDetectorParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &CrackDetectorParams {
        &self.params
    }

    /// Grayscale, optional blur and thresholded Sobel magnitude.
    pub fn edge_map(&self, image: &RgbaImageView<'_>) -> ScalarMap {
        detect_edges(image, &self.params.edges)
    }

    /// Full crack detection on an RGBA buffer.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, image), fields(width = image.width, height = image.height))
    )]
    pub fn detect(&self, image: &RgbaImageView<'_>) -> CrackDetection {
        let edges = self.edge_map(image);
        debug!(
            "edge map: {} of {} pixels above threshold {}",
            edges.count_nonzero(),
            edges.len(),
            self.params.edges.threshold
        );
        self.detect_from_edges(&edges)
    }

    /// Trace and validate an already computed edge map.
    pub fn detect_from_edges(&self, edges: &ScalarMap) -> CrackDetection {
        let traced = trace_cracks(edges, &self.params.trace);
        let candidates = traced.cracks.len();

        let mut cracks = Vec::new();
        let mut rejections = RejectionCounts::default();
        for crack in traced.cracks {
            match validate_crack(&crack, edges.width, edges.height, &self.params.validation) {
                Ok(()) => {
                    cracks.push(crack);
                    if cracks.len() >= self.params.max_cracks {
                        break;
                    }
                }
                Err(rejection) => {
                    debug!(
                        "rejected crack of {} points starting at ({}, {}): {rejection}",
                        crack.len(),
                        crack.points[0].x,
                        crack.points[0].y
                    );
                    rejections.record(&rejection);
                }
            }
        }

        debug!(
            "{} of {candidates} candidates accepted ({} rejected)",
            cracks.len(),
            rejections.total()
        );

        CrackDetection {
            cracks,
            candidates,
            rejections,
            trace: traced.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stonesplit_core::PixelPoint;

    fn ridge_map(w: usize, h: usize, rows: &[usize], magnitude: u8) -> ScalarMap {
        let mut map = ScalarMap::new(w, h);
        for &y in rows {
            for x in 2..w - 2 {
                map.set(x, y, magnitude);
            }
        }
        map
    }

    #[test]
    fn crack_cap_keeps_the_first_seeds() {
        let rows: Vec<usize> = (0..6).map(|i| 4 + 6 * i).collect();
        let edges = ridge_map(80, 40, &rows, 180);
        let params = CrackDetectorParams {
            max_cracks: 4,
            ..CrackDetectorParams::default()
        };
        let det = CrackDetector::new(params).detect_from_edges(&edges);
        assert_eq!(det.candidates, 6);
        assert_eq!(det.cracks.len(), 4);
        let first_rows: Vec<i32> = det.cracks.iter().map(|c| c.points[0].y).collect();
        assert_eq!(first_rows, vec![4, 10, 16, 22]);
        assert_eq!(det.cracks[0].points[0], PixelPoint::new(2, 4));
    }

    #[test]
    fn weak_ridges_are_rejected_and_counted() {
        let edges = ridge_map(80, 20, &[5, 12], 60);
        let det = CrackDetector::new(CrackDetectorParams::default()).detect_from_edges(&edges);
        assert!(det.cracks.is_empty());
        assert_eq!(det.rejections.too_weak, 2);
        assert!(!det.truncated());
    }

    #[test]
    fn zero_crack_cap_is_invalid() {
        let params = CrackDetectorParams {
            max_cracks: 0,
            ..CrackDetectorParams::default()
        };
        assert_eq!(params.validate().unwrap_err().name, "max_cracks");
    }
}
