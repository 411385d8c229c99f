use log::debug;
use serde::{Deserialize, Serialize};
use stonesplit_core::{ensure_at_least_one, ensure_finite_non_negative, ensure_positive, ParamError};
use stonesplit_cracks::Crack;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::candidate::WedgeCandidate;
use crate::intersections::find_intersections;
use crate::layout::greedy_layout;
use crate::sampling::sample_cracks;
use crate::summary::PlanSummary;

/// Wedge planning parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WedgePlanParams {
    /// Cracks shorter than this contribute no samples.
    pub min_crack_length: f32,
    /// Divisor of the point count giving the sampling stride.
    pub samples_per_crack: usize,
    /// Point pairs strictly closer than this form an intersection.
    pub intersection_threshold: f32,
    /// Minimum distance between accepted wedge points.
    pub min_spacing: f32,
    pub max_points: usize,
}

impl Default for WedgePlanParams {
    fn default() -> Self {
        Self {
            min_crack_length: 50.0,
            samples_per_crack: 5,
            intersection_threshold: 10.0,
            min_spacing: 80.0,
            max_points: 8,
        }
    }
}

impl WedgePlanParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        ensure_finite_non_negative("wedge.min_crack_length", self.min_crack_length)?;
        ensure_at_least_one("wedge.samples_per_crack", self.samples_per_crack)?;
        ensure_positive("wedge.intersection_threshold", self.intersection_threshold)?;
        ensure_finite_non_negative("wedge.min_spacing", self.min_spacing)?;
        ensure_at_least_one("wedge.max_points", self.max_points)?;
        Ok(())
    }
}

/// Final placement plus candidate counts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WedgePlan {
    /// Accepted points in selection order.
    pub points: Vec<WedgeCandidate>,
    /// Crack samples offered to the layout.
    pub sampled: usize,
    /// Intersections offered to the layout.
    pub intersections: usize,
}

impl WedgePlan {
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn summary(&self, crack_count: usize) -> PlanSummary {
        PlanSummary::new(crack_count, &self.points)
    }
}

/// Sampling → intersections → greedy layout.
#[derive(Clone, Debug, Default)]
pub struct WedgePlanner {
    params: WedgePlanParams,
}

impl WedgePlanner {
    pub fn new(params: WedgePlanParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &WedgePlanParams {
        &self.params
    }

    /// All candidates in generation order: samples by crack, then
    /// intersections by crack pair.
    pub fn candidates(&self, cracks: &[Crack]) -> (Vec<WedgeCandidate>, usize) {
        let p = &self.params;
        let mut candidates = sample_cracks(cracks, p.min_crack_length, p.samples_per_crack);
        let sampled = candidates.len();
        candidates.extend(find_intersections(cracks, p.intersection_threshold));
        (candidates, sampled)
    }

    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, cracks), fields(cracks = cracks.len()))
    )]
    pub fn plan(&self, cracks: &[Crack]) -> WedgePlan {
        let (candidates, sampled) = self.candidates(cracks);
        let intersections = candidates.len() - sampled;
        let points = greedy_layout(candidates, self.params.min_spacing, self.params.max_points);
        debug!(
            "wedge plan: {} points from {sampled} samples and {intersections} intersections",
            points.len()
        );
        WedgePlan {
            points,
            sampled,
            intersections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{WedgeKind, WedgePriority};
    use approx::assert_relative_eq;
    use stonesplit_core::PixelPoint;

    fn crack(points: impl IntoIterator<Item = (i32, i32)>, strength: u64) -> Crack {
        let points: Vec<_> = points.into_iter().map(|(x, y)| PixelPoint::new(x, y)).collect();
        let n = points.len() as u64;
        Crack::from_traversal(points, strength * n)
    }

    fn cross() -> Vec<Crack> {
        vec![
            crack((0..=60).map(|x| (x, 30)), 220),
            crack((0..=60).map(|y| (30, y)), 220),
        ]
    }

    #[test]
    fn crossing_cracks_plan_a_single_intersection() {
        let plan = WedgePlanner::default().plan(&cross());
        assert_eq!(plan.sampled, 12);
        assert_eq!(plan.intersections, 1);
        assert_eq!(plan.len(), 1);
        let p = &plan.points[0];
        assert_eq!(p.kind, WedgeKind::Intersection);
        assert_relative_eq!(p.position.x, 25.5);
        assert_relative_eq!(p.position.y, 28.0);
    }

    #[test]
    fn intersection_precedes_saturated_samples() {
        let planner = WedgePlanner::new(WedgePlanParams {
            min_spacing: 20.0,
            ..WedgePlanParams::default()
        });
        let (candidates, sampled) = planner.candidates(&cross());
        assert!(candidates[..sampled]
            .iter()
            .all(|c| c.priority == WedgePriority::Score(1.0)));

        let plan = planner.plan(&cross());
        assert_eq!(plan.points[0].kind, WedgeKind::Intersection);
        assert!(plan.points[1..].iter().all(|c| c.kind == WedgeKind::CrackPoint));
        for (i, a) in plan.points.iter().enumerate() {
            for b in &plan.points[i + 1..] {
                assert!(a.distance_to(b) >= 20.0);
            }
        }
    }

    #[test]
    fn no_cracks_no_plan() {
        let plan = WedgePlanner::default().plan(&[]);
        assert!(plan.is_empty());
        assert_eq!(plan.sampled, 0);
    }

    #[test]
    fn invalid_params_are_named() {
        let zero_points = WedgePlanParams {
            max_points: 0,
            ..WedgePlanParams::default()
        };
        assert_eq!(zero_points.validate().unwrap_err().name, "wedge.max_points");
        let negative_spacing = WedgePlanParams {
            min_spacing: -1.0,
            ..WedgePlanParams::default()
        };
        assert_eq!(negative_spacing.validate().unwrap_err().name, "wedge.min_spacing");
        assert!(WedgePlanParams::default().validate().is_ok());
    }
}
