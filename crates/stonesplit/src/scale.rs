use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Mapping from analysis pixels back to the source image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisScale {
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Default for AnalysisScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AnalysisScale {
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
    };

    pub fn between(source: (u32, u32), analysis: (u32, u32)) -> Self {
        Self {
            scale_x: source.0 as f32 / analysis.0.max(1) as f32,
            scale_y: source.1 as f32 / analysis.1.max(1) as f32,
        }
    }

    #[inline]
    pub fn to_source(&self, p: Point2<f32>) -> Point2<f32> {
        Point2::new(p.x * self.scale_x, p.y * self.scale_y)
    }
}

/// Size at which an image is analysed: images wider than `max_width` are
/// shrunk to that width with `height = floor(h * max_width / w)`, never below
/// one row.
pub fn analysis_dimensions(width: u32, height: u32, max_width: Option<u32>) -> (u32, u32) {
    match max_width {
        Some(max_w) if max_w > 0 && width > max_w => {
            let h = (height as u64 * max_w as u64 / width as u64).max(1);
            (max_w, h as u32)
        }
        _ => (width, height),
    }
}
