//! Core types and utilities for stone fracture analysis.
//!
//! This crate is intentionally small: pixel buffer views, the single-channel
//! `ScalarMap` used by every filtering stage, integer pixel geometry, and the
//! parameter validation error shared by the stage crates. It knows nothing
//! about cracks or wedges.

mod geom;
mod image;
mod logger;
mod params;

pub use geom::{polyline_length, PixelPoint};
pub use image::{RgbaImageView, ScalarMap, RGBA_CHANNELS};
pub use params::{
    ensure_at_least_one, ensure_finite_non_negative, ensure_positive, ensure_unit_interval,
    ParamError,
};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
