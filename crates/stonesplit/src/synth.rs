//! Synthetic RGBA fixtures for tests, examples and benchmarks.
//!
//! The drawing helpers are deterministic. [`synth_stone`] (feature `synth`)
//! adds seeded grain and random fracture strokes; it never feeds the
//! detection path of a real analysis.

use nalgebra::Point2;
use stonesplit_core::RGBA_CHANNELS;

#[cfg(feature = "synth")]
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Opaque `width × height` RGBA buffer filled with `rgb`.
pub fn uniform_rgba(width: usize, height: usize, rgb: [u8; 3]) -> Vec<u8> {
    let mut px = Vec::with_capacity(width * height * RGBA_CHANNELS);
    for _ in 0..width * height {
        px.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
    }
    px
}

/// Set the colour of one pixel, ignoring coordinates outside the image.
pub fn paint_pixel(pixels: &mut [u8], width: usize, x: i64, y: i64, rgb: [u8; 3]) {
    if x < 0 || y < 0 || x as usize >= width {
        return;
    }
    let o = (y as usize * width + x as usize) * RGBA_CHANNELS;
    if let Some(px) = pixels.get_mut(o..o + 3) {
        px.copy_from_slice(&rgb);
    }
}

/// Paint every pixel within `half_width` of the segment `from → to`.
pub fn paint_stroke(
    pixels: &mut [u8],
    width: usize,
    height: usize,
    from: Point2<f32>,
    to: Point2<f32>,
    half_width: f32,
    rgb: [u8; 3],
) {
    let pad = half_width.ceil() + 1.0;
    let x0 = (from.x.min(to.x) - pad).floor().max(0.0) as usize;
    let y0 = (from.y.min(to.y) - pad).floor().max(0.0) as usize;
    let x1 = ((from.x.max(to.x) + pad).ceil().max(0.0) as usize).min(width);
    let y1 = ((from.y.max(to.y) + pad).ceil().max(0.0) as usize).min(height);

    let d = to - from;
    let len2 = d.norm_squared();
    for y in y0..y1 {
        for x in x0..x1 {
            let p = Point2::new(x as f32, y as f32);
            let t = if len2 > 0.0 {
                ((p - from).dot(&d) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            if nalgebra::distance(&p, &(from + d * t)) <= half_width {
                paint_pixel(pixels, width, x as i64, y as i64, rgb);
            }
        }
    }
}

/// Dark staircase band along the main diagonal: on rows `start..=end`, the
/// `thickness` pixels starting at column `row` are set to `rgb`.
///
/// Its lower-left boundary is a clean single-pixel diagonal edge, the kind
/// of straight fracture the detector is tuned for.
pub fn paint_diagonal_band(
    pixels: &mut [u8],
    width: usize,
    start: usize,
    end: usize,
    thickness: usize,
    rgb: [u8; 3],
) {
    for row in start..=end {
        for x in row..(row + thickness).min(width) {
            paint_pixel(pixels, width, x as i64, row as i64, rgb);
        }
    }
}

/// Knobs of [`synth_stone`].
#[cfg(feature = "synth")]
#[derive(Clone, Debug, PartialEq)]
pub struct SynthParams {
    pub width: usize,
    pub height: usize,
    /// Mean gray level of the stone.
    pub base: u8,
    /// Per-pixel uniform noise amplitude.
    pub grain: u8,
    pub strokes: usize,
    /// Gray level of fracture strokes.
    pub stroke_level: u8,
    pub max_half_width: f32,
}

#[cfg(feature = "synth")]
impl Default for SynthParams {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            base: 170,
            grain: 6,
            strokes: 4,
            stroke_level: 35,
            max_half_width: 2.5,
        }
    }
}

/// A synthesized stone surface and the strokes painted on it.
#[cfg(feature = "synth")]
#[derive(Clone, Debug)]
pub struct SynthStone {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
    pub strokes: Vec<(Point2<f32>, Point2<f32>)>,
}

/// Grainy gray surface with random dark strokes. Identical seeds give
/// identical buffers.
#[cfg(feature = "synth")]
pub fn synth_stone(params: &SynthParams, seed: u64) -> SynthStone {
    let mut rng = StdRng::seed_from_u64(seed);
    let (w, h) = (params.width, params.height);

    let mut pixels = Vec::with_capacity(w * h * RGBA_CHANNELS);
    let grain = params.grain as i16;
    for _ in 0..w * h {
        let n = if grain > 0 {
            rng.gen_range(-grain..=grain)
        } else {
            0
        };
        let v = (params.base as i16 + n).clamp(0, 255) as u8;
        pixels.extend_from_slice(&[v, v, v.saturating_sub(8), 255]);
    }

    let level = params.stroke_level;
    let mut strokes = Vec::with_capacity(params.strokes);
    for _ in 0..params.strokes {
        let a = Point2::new(
            rng.gen_range(0.0..w.max(1) as f32),
            rng.gen_range(0.0..h.max(1) as f32),
        );
        let b = Point2::new(
            rng.gen_range(0.0..w.max(1) as f32),
            rng.gen_range(0.0..h.max(1) as f32),
        );
        let half_width = rng.gen_range(0.5..=params.max_half_width.max(0.5));
        paint_stroke(&mut pixels, w, h, a, b, half_width, [level, level, level]);
        strokes.push((a, b));
    }

    SynthStone {
        width: w,
        height: h,
        pixels,
        strokes,
    }
}
