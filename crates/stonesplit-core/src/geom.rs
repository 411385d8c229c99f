use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Integer pixel coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(&self, other: &PixelPoint) -> f32 {
        let dx = (other.x - self.x) as f32;
        let dy = (other.y - self.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle of the vector `self -> other`, radians in (-π, π].
    #[inline]
    pub fn angle_to(&self, other: &PixelPoint) -> f32 {
        let dx = (other.x - self.x) as f32;
        let dy = (other.y - self.y) as f32;
        dy.atan2(dx)
    }

    #[inline]
    pub fn midpoint(&self, other: &PixelPoint) -> Point2<f32> {
        Point2::new(
            (self.x + other.x) as f32 * 0.5,
            (self.y + other.y) as f32 * 0.5,
        )
    }

    #[inline]
    pub fn to_point2(self) -> Point2<f32> {
        Point2::new(self.x as f32, self.y as f32)
    }
}

/// Sum of consecutive Euclidean distances, in sequence order.
pub fn polyline_length(points: &[PixelPoint]) -> f32 {
    points.windows(2).map(|w| w[0].distance(&w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn polyline_length_follows_sequence_order() {
        let ordered = [
            PixelPoint::new(0, 0),
            PixelPoint::new(1, 0),
            PixelPoint::new(2, 0),
        ];
        let shuffled = [
            PixelPoint::new(0, 0),
            PixelPoint::new(2, 0),
            PixelPoint::new(1, 0),
        ];
        assert_relative_eq!(polyline_length(&ordered), 2.0);
        assert_relative_eq!(polyline_length(&shuffled), 3.0);
        assert_relative_eq!(polyline_length(&ordered[..1]), 0.0);
    }

    #[test]
    fn midpoint_keeps_half_pixels() {
        let m = PixelPoint::new(21, 30).midpoint(&PixelPoint::new(30, 26));
        assert_relative_eq!(m.x, 25.5);
        assert_relative_eq!(m.y, 28.0);
    }
}
