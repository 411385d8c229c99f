/// Number of interleaved samples per pixel in an [`RgbaImageView`].
pub const RGBA_CHANNELS: usize = 4;

/// Borrowed interleaved RGBA8 buffer, row-major, `len = width * height * 4`.
///
/// The view does not check its own consistency; the pipeline entry point
/// validates dimensions against the buffer length before any stage runs.
#[derive(Clone, Copy, Debug)]
pub struct RgbaImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

impl<'a> RgbaImageView<'a> {
    #[inline]
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// `(r, g, b, a)` at pixel index `idx` (row-major).
    #[inline]
    pub fn rgba_at(&self, idx: usize) -> [u8; 4] {
        let o = idx * RGBA_CHANNELS;
        [
            self.data[o],
            self.data[o + 1],
            self.data[o + 2],
            self.data[o + 3],
        ]
    }
}

/// Single-channel 8-bit intensity grid.
///
/// Used for the grayscale, blurred and edge-magnitude stages. `frame` is the
/// number of rows/columns on every side that the producing stage left
/// unconvolved (zero for grayscale, one after a 3×3 filter). Frame pixels are
/// always zero for filtered maps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScalarMap {
    pub width: usize,
    pub height: usize,
    pub frame: usize,
    pub data: Vec<u8>, // row-major, len = w*h
}

impl ScalarMap {
    /// All-zero map with no frame.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_frame(width, height, 0)
    }

    pub fn with_frame(width: usize, height: usize, frame: usize) -> Self {
        Self {
            width,
            height,
            frame,
            data: vec![0; width * height],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Value at signed coordinates, `None` outside the grid.
    #[inline]
    pub fn get_checked(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.data[y as usize * self.width + x as usize])
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.width + x] = v;
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Number of strictly positive samples.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0).count()
    }
}
