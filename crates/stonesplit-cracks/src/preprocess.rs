//! Grayscale conversion and 3×3 Gaussian smoothing.

use stonesplit_core::{RgbaImageView, ScalarMap};

const GAUSS_KERNEL: [u32; 9] = [1, 2, 1, 2, 4, 2, 1, 2, 1];
const GAUSS_SUM: u32 = 16;

/// Luma of one RGB triple, rounded half-up. Alpha is ignored.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let v = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    (v + 0.5).floor().min(255.0) as u8
}

/// `gray = 0.299 R + 0.587 G + 0.114 B` per pixel.
pub fn to_grayscale(src: &RgbaImageView<'_>) -> ScalarMap {
    let mut out = ScalarMap::new(src.width, src.height);
    for (idx, dst) in out.data.iter_mut().enumerate() {
        let [r, g, b, _] = src.rgba_at(idx);
        *dst = luma(r, g, b);
    }
    out
}

/// Binomial 3×3 blur (`[1 2 1; 2 4 2; 1 2 1] / 16`), rounded half-up.
///
/// Row/column 0 and the last row/column are not convolved and stay zero;
/// the returned map reports a frame of 1.
pub fn gaussian_blur_3x3(src: &ScalarMap) -> ScalarMap {
    let (w, h) = (src.width, src.height);
    let mut out = ScalarMap::with_frame(w, h, 1);
    if w < 3 || h < 3 {
        return out;
    }

    for y in 1..h - 1 {
        let rows = [src.row(y - 1), src.row(y), src.row(y + 1)];
        for x in 1..w - 1 {
            let mut sum = 0u32;
            for (ky, row) in rows.iter().enumerate() {
                let k = &GAUSS_KERNEL[ky * 3..ky * 3 + 3];
                sum += row[x - 1] as u32 * k[0] + row[x] as u32 * k[1] + row[x + 1] as u32 * k[2];
            }
            out.data[y * w + x] = ((sum + GAUSS_SUM / 2) / GAUSS_SUM) as u8;
        }
    }
    out
}

/// Grayscale followed by the optional blur.
pub fn preprocess(src: &RgbaImageView<'_>, blur_enabled: bool) -> ScalarMap {
    let gray = to_grayscale(src);
    if blur_enabled {
        gaussian_blur_3x3(&gray)
    } else {
        gray
    }
}
