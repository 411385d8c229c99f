//! Pairwise crack intersection search.
//!
//! For each unordered pair of cracks the first point pair (in traversal order
//! of the first crack, then the second) closer than the threshold yields one
//! intersection at its midpoint. The search is exhaustive; pairs whose
//! bounding boxes, grown by the threshold, do not overlap are skipped since
//! no point pair can qualify.

use stonesplit_core::PixelPoint;
use stonesplit_cracks::Crack;

use crate::candidate::WedgeCandidate;

#[derive(Clone, Copy, Debug)]
struct Bounds {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
}

impl Bounds {
    fn of(points: &[PixelPoint]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(points.iter().fold(init, |b, p| Self {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    fn within(&self, other: &Bounds, margin: f32) -> bool {
        let gap_x = (other.min_x - self.max_x).max(self.min_x - other.max_x).max(0) as f32;
        let gap_y = (other.min_y - self.max_y).max(self.min_y - other.max_y).max(0) as f32;
        gap_x < margin && gap_y < margin
    }
}

/// First point pair of `a` × `b` with distance strictly below `threshold`.
pub fn crack_intersection(a: &Crack, b: &Crack, threshold: f32) -> Option<WedgeCandidate> {
    a.points.iter().find_map(|p| {
        b.points.iter().find_map(|q| {
            let d = p.distance(q);
            (d < threshold).then(|| WedgeCandidate::intersection(p.midpoint(q), d))
        })
    })
}

/// At most one intersection per unordered crack pair, ordered by `(i, j)`.
pub fn find_intersections(cracks: &[Crack], threshold: f32) -> Vec<WedgeCandidate> {
    let bounds: Vec<Option<Bounds>> = cracks.iter().map(|c| Bounds::of(&c.points)).collect();
    let mut out = Vec::new();
    for i in 0..cracks.len() {
        for j in (i + 1)..cracks.len() {
            let (Some(bi), Some(bj)) = (bounds[i], bounds[j]) else {
                continue;
            };
            if !bi.within(&bj, threshold) {
                continue;
            }
            if let Some(hit) = crack_intersection(&cracks[i], &cracks[j], threshold) {
                out.push(hit);
            }
        }
    }
    out
}
