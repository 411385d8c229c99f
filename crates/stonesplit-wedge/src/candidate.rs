use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Where a candidate came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WedgeKind {
    CrackPoint,
    Intersection,
}

/// Placement priority: a score in `[0, 1]` or the `High` sentinel that
/// outranks every score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WedgePriority {
    High,
    Score(f32),
}

impl WedgePriority {
    /// Sort key, descending means more important. `High` maps to +∞.
    #[inline]
    pub fn rank(&self) -> f32 {
        match *self {
            WedgePriority::High => f32::INFINITY,
            WedgePriority::Score(s) => s,
        }
    }
}

/// Display tier consumed by renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    High,
    Medium,
    Low,
}

/// A possible wedge insertion point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WedgeCandidate {
    /// Pixel coordinates in the analysed image. Intersections may land on
    /// half pixels.
    pub position: Point2<f32>,
    pub priority: WedgePriority,
    pub kind: WedgeKind,
    /// Direction of the parent crack, radians. Absent for intersections.
    pub angle: Option<f32>,
    /// Distance between the two crack points an intersection was built from.
    pub pair_distance: Option<f32>,
}

impl WedgeCandidate {
    pub fn crack_point(position: Point2<f32>, score: f32, angle: f32) -> Self {
        Self {
            position,
            priority: WedgePriority::Score(score),
            kind: WedgeKind::CrackPoint,
            angle: Some(angle),
            pair_distance: None,
        }
    }

    pub fn intersection(position: Point2<f32>, pair_distance: f32) -> Self {
        Self {
            position,
            priority: WedgePriority::High,
            kind: WedgeKind::Intersection,
            angle: None,
            pair_distance: Some(pair_distance),
        }
    }

    #[inline]
    pub fn distance_to(&self, other: &WedgeCandidate) -> f32 {
        nalgebra::distance(&self.position, &other.position)
    }

    /// `Intersection` or score > 0.7 is high, score > 0.4 medium, the rest low.
    pub fn tier(&self) -> PriorityTier {
        if self.kind == WedgeKind::Intersection {
            return PriorityTier::High;
        }
        match self.priority {
            WedgePriority::High => PriorityTier::High,
            WedgePriority::Score(s) if s > 0.7 => PriorityTier::High,
            WedgePriority::Score(s) if s > 0.4 => PriorityTier::Medium,
            WedgePriority::Score(_) => PriorityTier::Low,
        }
    }
}
