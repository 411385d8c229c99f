use serde::{Deserialize, Serialize};

use crate::candidate::{PriorityTier, WedgeCandidate};

/// Headline numbers for a finished analysis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub crack_count: usize,
    pub high_priority: usize,
    pub medium_priority: usize,
    pub low_priority: usize,
    /// `max(2, ceil(points / 2))`.
    pub recommended_splits: usize,
}

impl PlanSummary {
    pub fn new(crack_count: usize, points: &[WedgeCandidate]) -> Self {
        let mut summary = Self {
            crack_count,
            recommended_splits: points.len().div_ceil(2).max(2),
            ..Self::default()
        };
        for p in points {
            match p.tier() {
                PriorityTier::High => summary.high_priority += 1,
                PriorityTier::Medium => summary.medium_priority += 1,
                PriorityTier::Low => summary.low_priority += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    fn sample(score: f32) -> WedgeCandidate {
        WedgeCandidate::crack_point(Point2::new(0.0, 0.0), score, 0.0)
    }

    #[test]
    fn counts_tiers_and_splits() {
        let points = vec![
            WedgeCandidate::intersection(Point2::new(5.0, 5.0), 1.0),
            sample(0.9),
            sample(0.5),
            sample(0.2),
            sample(0.3),
        ];
        let s = PlanSummary::new(3, &points);
        assert_eq!(s.crack_count, 3);
        assert_eq!(s.high_priority, 2);
        assert_eq!(s.medium_priority, 1);
        assert_eq!(s.low_priority, 2);
        assert_eq!(s.recommended_splits, 3);
    }

    #[test]
    fn at_least_two_splits() {
        assert_eq!(PlanSummary::new(0, &[]).recommended_splits, 2);
        assert_eq!(PlanSummary::new(1, &[sample(0.5)]).recommended_splits, 2);
    }
}
