//! Wedge placement planning.
//!
//! Given validated cracks, candidates are generated in a fixed order:
//! evenly strided samples along each sufficiently long crack, then one
//! intersection per crack pair that passes within the threshold distance.
//! A greedy pass then picks the highest ranked candidates subject to a
//! minimum mutual distance, with intersections always first.
//!
//! ```
//! use stonesplit_core::PixelPoint;
//! use stonesplit_cracks::Crack;
//! use stonesplit_wedge::{WedgeKind, WedgePlanner};
//!
//! let line = |f: fn(i32) -> (i32, i32)| {
//!     let pts: Vec<_> = (0..=60).map(f).map(|(x, y)| PixelPoint::new(x, y)).collect();
//!     let n = pts.len() as u64;
//!     Crack::from_traversal(pts, 200 * n)
//! };
//! let cracks = [line(|t| (t, 30)), line(|t| (30, t))];
//! let plan = WedgePlanner::default().plan(&cracks);
//! assert_eq!(plan.points[0].kind, WedgeKind::Intersection);
//! ```

mod candidate;
mod intersections;
mod layout;
mod planner;
mod sampling;
mod summary;

pub use candidate::{PriorityTier, WedgeCandidate, WedgeKind, WedgePriority};
pub use intersections::{crack_intersection, find_intersections};
pub use layout::greedy_layout;
pub use planner::{WedgePlan, WedgePlanParams, WedgePlanner};
pub use sampling::{point_priority, sample_crack, sample_cracks};
pub use summary::PlanSummary;
