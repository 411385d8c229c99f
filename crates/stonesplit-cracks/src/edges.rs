//! Sobel gradient magnitude with a hard threshold.
//!
//! Output pixels keep their magnitude (clamped to 255, truncated to an
//! integer) when it exceeds `threshold`, and are zero otherwise. The map is
//! therefore graded, not binary: surviving values later become crack
//! strength.

use serde::{Deserialize, Serialize};
use stonesplit_core::{ensure_finite_non_negative, ParamError, RgbaImageView, ScalarMap};

use crate::preprocess::preprocess;

type Kernel3 = [[i32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Which pixels the Sobel pass evaluates relative to the input's frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FramePolicy {
    /// Only pixels whose 3×3 window lies inside the convolved region of the
    /// input. A uniform image yields an all-zero edge map.
    #[default]
    SkipUnconvolved,
    /// Every pixel except the outermost row/column, reading the zeroed blur
    /// frame as data. Produces a full-strength ring one pixel inside the
    /// border of any non-black image.
    ZeroBorder,
}

/// Edge detector configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeParams {
    /// Apply the 3×3 Gaussian before the gradient.
    pub blur_enabled: bool,
    /// Magnitudes `<= threshold` are zeroed.
    pub threshold: f32,
    #[serde(default)]
    pub frame_policy: FramePolicy,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            blur_enabled: true,
            threshold: 50.0,
            frame_policy: FramePolicy::default(),
        }
    }
}

impl EdgeParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        ensure_finite_non_negative("edges.threshold", self.threshold)
    }
}

/// Apply both Sobel kernels to `src` and keep magnitudes above the threshold.
pub fn sobel_edge_map(src: &ScalarMap, threshold: f32, policy: FramePolicy) -> ScalarMap {
    let (w, h) = (src.width, src.height);
    let start = match policy {
        FramePolicy::SkipUnconvolved => src.frame + 1,
        FramePolicy::ZeroBorder => 1,
    };
    let mut out = ScalarMap::with_frame(w, h, start);
    if w < 2 * start + 1 || h < 2 * start + 1 {
        return out;
    }

    let threshold = threshold as f64;
    for y in start..h - start {
        let rows = [src.row(y - 1), src.row(y), src.row(y + 1)];
        for x in start..w - start {
            let mut gx = 0i32;
            let mut gy = 0i32;
            for (ky, row) in rows.iter().enumerate() {
                let (kx_row, ky_row) = (&SOBEL_KERNEL_X[ky], &SOBEL_KERNEL_Y[ky]);
                for k in 0..3 {
                    let v = row[x + k - 1] as i32;
                    gx += v * kx_row[k];
                    gy += v * ky_row[k];
                }
            }
            let magnitude = ((gx * gx + gy * gy) as f64).sqrt();
            if magnitude > threshold {
                out.data[y * w + x] = magnitude.min(255.0) as u8;
            }
        }
    }
    out
}

/// Preprocess an RGBA buffer and compute its edge map.
pub fn detect_edges(src: &RgbaImageView<'_>, params: &EdgeParams) -> ScalarMap {
    let smoothed = preprocess(src, params.blur_enabled);
    sobel_edge_map(&smoothed, params.threshold, params.frame_policy)
}
