//! Helpers for `image::RgbaImage` inputs.

use std::borrow::Cow;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use log::debug;
use stonesplit_core::RgbaImageView;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::config::AnalyzerConfig;
use crate::error::AnalyzeError;
use crate::io::IoError;
use crate::pipeline::{AnalysisResult, StoneAnalyzer};
use crate::scale::{analysis_dimensions, AnalysisScale};

/// How an `image` input is prepared before the pipeline runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageAnalysisOptions {
    /// Shrink wider images to this width. `None` analyses at full size.
    pub max_analysis_width: Option<u32>,
}

impl Default for ImageAnalysisOptions {
    fn default() -> Self {
        Self {
            max_analysis_width: Some(600),
        }
    }
}

/// Pipeline output plus the geometry needed to draw it on the source image.
#[derive(Clone, Debug)]
pub struct ImageAnalysis {
    pub result: AnalysisResult,
    pub analysis_width: u32,
    pub analysis_height: u32,
    pub scale: AnalysisScale,
}

/// Borrow an `image::RgbaImage` as the pipeline's view type.
pub fn rgba_view(img: &RgbaImage) -> RgbaImageView<'_> {
    RgbaImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Decode any supported format into RGBA8.
pub fn load_rgba(path: impl AsRef<Path>) -> Result<RgbaImage, IoError> {
    Ok(image::open(path)?.to_rgba8())
}

/// Shrink `img` to the analysis size, borrowing it when no resize is needed.
pub fn downscale_for_analysis(img: &RgbaImage, max_width: Option<u32>) -> Cow<'_, RgbaImage> {
    let (w, h) = analysis_dimensions(img.width(), img.height(), max_width);
    if (w, h) == img.dimensions() {
        Cow::Borrowed(img)
    } else {
        debug!(
            "downscaling {}x{} to {w}x{h} for analysis",
            img.width(),
            img.height()
        );
        Cow::Owned(imageops::resize(img, w, h, FilterType::Triangle))
    }
}

/// Downscale if requested, then run the full pipeline.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, config, opts), fields(width = img.width(), height = img.height()))
)]
pub fn analyze_image(
    img: &RgbaImage,
    config: &AnalyzerConfig,
    opts: &ImageAnalysisOptions,
) -> Result<ImageAnalysis, AnalyzeError> {
    let analyzer = StoneAnalyzer::new(config.clone())?;
    let work = downscale_for_analysis(img, opts.max_analysis_width);
    let result = analyzer.analyze(&rgba_view(&work))?;
    Ok(ImageAnalysis {
        result,
        analysis_width: work.width(),
        analysis_height: work.height(),
        scale: AnalysisScale::between(img.dimensions(), work.dimensions()),
    })
}

/// [`analyze_image`] with the strict preset and the default 600 px cap.
pub fn analyze_image_default(img: &RgbaImage) -> Result<ImageAnalysis, AnalyzeError> {
    analyze_image(
        img,
        &AnalyzerConfig::default(),
        &ImageAnalysisOptions::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn small_images_are_borrowed() {
        let img = RgbaImage::from_pixel(40, 30, Rgba([128, 128, 128, 255]));
        assert!(matches!(downscale_for_analysis(&img, Some(600)), Cow::Borrowed(_)));
        let big = RgbaImage::from_pixel(1200, 90, Rgba([128, 128, 128, 255]));
        let small = downscale_for_analysis(&big, Some(600));
        assert_eq!(small.dimensions(), (600, 45));
    }

    #[test]
    fn uniform_image_has_nothing_to_split() {
        let img = RgbaImage::from_pixel(1000, 500, Rgba([90, 90, 90, 255]));
        let out = analyze_image_default(&img).unwrap();
        assert_eq!((out.analysis_width, out.analysis_height), (600, 300));
        assert!(out.result.cracks.is_empty());
        assert!(out.result.wedge_plan.is_empty());
        assert!((out.scale.scale_x - 1000.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn empty_image_is_invalid_input() {
        let img = RgbaImage::new(0, 0);
        let err = analyze_image_default(&img).unwrap_err();
        assert!(matches!(err, AnalyzeError::InvalidInput(_)));
    }
}
