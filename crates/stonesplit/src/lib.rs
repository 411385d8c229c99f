//! Crack detection and wedge placement planning for stone splitting.
//!
//! This crate ties the stage crates together:
//! - [`AnalyzerConfig`] with the `sensitive` and `strict` presets,
//! - [`StoneAnalyzer`] / [`analyze`] running grayscale → blur → Sobel →
//!   bounded tracing → validation → wedge planning on one RGBA buffer,
//! - JSON job configs and reports ([`io`]),
//! - (feature `image`) helpers that load, downscale and analyse
//!   `image::RgbaImage` values ([`detect`]),
//! - deterministic fixture painters and a seeded generator ([`synth`]).
//!
//! ## Quickstart
//!
//! ```
//! use stonesplit::{analyze, AnalyzerConfig, RgbaImageView};
//! use stonesplit::synth::{paint_diagonal_band, uniform_rgba};
//!
//! # fn main() -> Result<(), stonesplit::AnalyzeError> {
//! let mut pixels = uniform_rgba(64, 64, [200, 200, 200]);
//! paint_diagonal_band(&mut pixels, 64, 5, 50, 8, [0, 0, 0]);
//!
//! let view = RgbaImageView::new(64, 64, &pixels);
//! let result = analyze(&view, &AnalyzerConfig::sensitive())?;
//! assert_eq!(result.cracks.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `stonesplit::core`: image views, pixel geometry, parameter errors, logger.
//! - `stonesplit::cracks`: edge detection, tracing and validation.
//! - `stonesplit::wedge`: candidate sampling, intersections, greedy layout.

pub use stonesplit_core as core;
pub use stonesplit_cracks as cracks;
pub use stonesplit_wedge as wedge;

mod config;
mod error;
pub mod io;
mod pipeline;
mod scale;
pub mod synth;

#[cfg(feature = "image")]
pub mod detect;

pub use config::{AnalyzerConfig, Preset};
pub use error::{check_view, AnalyzeError, InputError};
pub use io::{AnalysisReport, AnalyzeJobConfig, IoError};
pub use pipeline::{analyze, AnalysisResult, DetectionStats, StoneAnalyzer};
pub use scale::{analysis_dimensions, AnalysisScale};

pub use stonesplit_core::{ParamError, PixelPoint, RgbaImageView};
pub use stonesplit_cracks::{Crack, CrackRejection, FramePolicy, TraceStats};
pub use stonesplit_wedge::{PlanSummary, PriorityTier, WedgeCandidate, WedgeKind, WedgePriority};
