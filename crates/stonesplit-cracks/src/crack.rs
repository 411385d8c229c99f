use serde::{Deserialize, Serialize};
use stonesplit_core::{polyline_length, PixelPoint};

/// A traced group of connected edge pixels.
///
/// `points` are in flood-fill visitation order, not geometric order, and the
/// derived `length` and `direction` depend on that order: `length` sums the
/// hops between consecutive visits and `direction` points from the first to
/// the last visited pixel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crack {
    pub points: Vec<PixelPoint>,
    pub length: f32,
    /// Radians in (-π, π]; zero for fewer than two points.
    pub direction: f32,
    /// Mean edge magnitude over `points`.
    pub strength: f32,
}

impl Crack {
    /// Build a crack from its traversal and the summed edge magnitude.
    pub fn from_traversal(points: Vec<PixelPoint>, magnitude_sum: u64) -> Self {
        let n = points.len();
        let strength = if n == 0 {
            0.0
        } else {
            (magnitude_sum as f64 / n as f64) as f32
        };
        let (length, direction) = match (points.first(), points.last()) {
            (Some(first), Some(last)) if n > 1 => (polyline_length(&points), first.angle_to(last)),
            _ => (0.0, 0.0),
        };
        Self {
            points,
            length,
            direction,
            strength,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Straight-line distance between the first and last traversed points.
    pub fn chord(&self) -> f32 {
        match (self.points.first(), self.points.last()) {
            (Some(a), Some(b)) => a.distance(b),
            _ => 0.0,
        }
    }

    /// `min(chord / length, 1)`, defined as 1 for fewer than three points.
    ///
    /// Always in `[0, 1]`.
    pub fn linearity(&self) -> f32 {
        if self.points.len() < 3 || self.length <= 0.0 {
            return 1.0;
        }
        (self.chord() / self.length).clamp(0.0, 1.0)
    }
}
