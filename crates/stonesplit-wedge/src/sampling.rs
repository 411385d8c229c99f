//! Candidate points sampled along individual cracks.

use stonesplit_cracks::Crack;

use crate::candidate::WedgeCandidate;

/// Score shared by every sample of `crack`:
/// `min(strength / 255 + 0.3·[length > 200] + 0.2·[strength > 150], 1)`.
pub fn point_priority(crack: &Crack) -> f32 {
    let mut priority = crack.strength / 255.0;
    if crack.length > 200.0 {
        priority += 0.3;
    }
    if crack.strength > 150.0 {
        priority += 0.2;
    }
    priority.min(1.0)
}

/// Every `max(n / samples, 1)`-th traversal point of `crack`, starting at the
/// first one. Cracks with fewer than `samples` points contribute every point.
pub fn sample_crack(crack: &Crack, samples: usize) -> Vec<WedgeCandidate> {
    let stride = (crack.len() / samples.max(1)).max(1);
    let priority = point_priority(crack);
    crack
        .points
        .iter()
        .step_by(stride)
        .map(|p| WedgeCandidate::crack_point(p.to_point2(), priority, crack.direction))
        .collect()
}

/// Samples of every crack at least `min_length` long, in crack order.
pub fn sample_cracks(cracks: &[Crack], min_length: f32, samples: usize) -> Vec<WedgeCandidate> {
    cracks
        .iter()
        .filter(|c| c.length >= min_length)
        .flat_map(|c| sample_crack(c, samples))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use stonesplit_core::PixelPoint;

    fn horizontal(n: i32, strength: u64) -> Crack {
        let points = (0..n).map(|x| PixelPoint::new(x, 7)).collect();
        Crack::from_traversal(points, strength * n as u64)
    }

    #[test]
    fn priority_bonuses() {
        // 120 / 255, no bonus.
        assert_relative_eq!(point_priority(&horizontal(60, 120)), 120.0 / 255.0);
        // Long crack bonus only.
        assert_relative_eq!(
            point_priority(&horizontal(250, 102)),
            0.4 + 0.3,
            epsilon = 1e-6
        );
        // Strength bonus saturates.
        assert_relative_eq!(point_priority(&horizontal(60, 240)), 1.0);
        // 150 sits on the bound and gets no bonus.
        assert_relative_eq!(point_priority(&horizontal(60, 150)), 150.0 / 255.0);
    }

    #[test]
    fn stride_walks_traversal_order() {
        let crack = horizontal(61, 200);
        let samples = sample_crack(&crack, 5);
        let xs: Vec<f32> = samples.iter().map(|c| c.position.x).collect();
        assert_eq!(xs, vec![0.0, 12.0, 24.0, 36.0, 48.0, 60.0]);
        assert!(samples.iter().all(|c| c.angle == Some(0.0)));
    }

    #[test]
    fn short_cracks_keep_a_unit_stride() {
        let crack = horizontal(3, 200);
        assert_eq!(sample_crack(&crack, 5).len(), 3);
    }

    #[test]
    fn cracks_below_min_length_are_skipped() {
        // Lengths 49 and 50.
        let cracks = [horizontal(50, 200), horizontal(51, 200)];
        let samples = sample_cracks(&cracks, 50.0, 5);
        assert_eq!(samples.len(), 6);
    }
}
