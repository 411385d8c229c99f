//! Crack detection on stone surface images.
//!
//! Pipeline:
//! 1. Grayscale (`0.299 R + 0.587 G + 0.114 B`) and an optional 3×3 Gaussian.
//! 2. Sobel magnitude with a hard threshold; survivors keep their magnitude.
//! 3. Row-major seeded, LIFO, 8-connected flood fill with hard ceilings on
//!    crack size, stack depth and total visited pixels.
//! 4. Validation on point count, length, mean magnitude and linearity, then
//!    a cap on the number of cracks kept.
//!
//! Everything is synchronous and allocation-local; a [`CrackDetector`] holds
//! only its parameters and can be shared across threads.

mod crack;
mod detector;
pub mod edges;
pub mod preprocess;
pub mod trace;
pub mod validate;

pub use crack::Crack;
pub use detector::{CrackDetection, CrackDetector, CrackDetectorParams};
pub use edges::{detect_edges, sobel_edge_map, EdgeParams, FramePolicy};
pub use preprocess::{gaussian_blur_3x3, preprocess, to_grayscale};
pub use trace::{trace_cracks, TraceOutput, TraceParams, TraceStats};
pub use validate::{
    is_valid_crack, validate_crack, CrackRejection, RejectionCounts, ValidationParams,
};
