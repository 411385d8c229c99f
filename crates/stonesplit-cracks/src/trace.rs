//! Bounded 8-connected flood fill over an edge map.
//!
//! Seeds are taken in row-major order. Each seed runs an iterative LIFO fill
//! over an explicit stack; a visited arena indexed by row-major offset is
//! shared by every fill of the scan. Neighbours are pushed in the order
//! `(-1,-1) (0,-1) (1,-1) (-1,0) (1,0) (-1,1) (0,1) (1,1)`, so the fill
//! follows down-right first. Point order, and with it crack length and
//! direction, is a function of this discipline.
//!
//! Three ceilings bound the work:
//! - a crack stops growing at `max_points_per_crack` points,
//! - no neighbours are pushed while the stack holds `max_stack_depth`
//!   entries or more (wide structures get split or clipped),
//! - the scan aborts once more than `max_visited` pixels were visited.
//!
//! Hitting any of them is recorded in [`TraceStats`], never an error.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use stonesplit_core::{ensure_at_least_one, ParamError, PixelPoint, ScalarMap};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::crack::Crack;

const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Flood-fill limits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceParams {
    /// Groups with this many points or fewer are discarded as noise.
    pub min_traced_points: usize,
    pub max_points_per_crack: usize,
    pub max_stack_depth: usize,
    pub max_visited: usize,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            min_traced_points: 20,
            max_points_per_crack: 1000,
            max_stack_depth: 500,
            max_visited: 100_000,
        }
    }
}

impl TraceParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        ensure_at_least_one("trace.max_points_per_crack", self.max_points_per_crack)?;
        ensure_at_least_one("trace.max_stack_depth", self.max_stack_depth)?;
        ensure_at_least_one("trace.max_visited", self.max_visited)?;
        Ok(())
    }
}

/// Counters collected during one scan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStats {
    /// Fills started (one per unvisited edge pixel met in scan order).
    pub seeds: usize,
    pub visited: usize,
    /// Fills dropped for having too few points.
    pub discarded_noise: usize,
    /// Fills stopped at the per-crack point cap with work left on the stack.
    pub point_cap_hits: usize,
    /// Visits whose neighbours were not pushed because the stack was full.
    pub stack_throttle_events: usize,
    /// The scan stopped early on the visited-pixel ceiling.
    pub visited_cap_hit: bool,
}

impl TraceStats {
    /// Whether any ceiling cut a crack or the scan short.
    pub fn truncated(&self) -> bool {
        self.visited_cap_hit || self.point_cap_hits > 0 || self.stack_throttle_events > 0
    }
}

/// Cracks in seed order plus scan counters.
#[derive(Clone, Debug, Default)]
pub struct TraceOutput {
    pub cracks: Vec<Crack>,
    pub stats: TraceStats,
}

/// Reusable buffers for tracing one edge map.
struct TraceWorkspace<'a> {
    edges: &'a ScalarMap,
    params: &'a TraceParams,
    visited: Vec<bool>,
    stack: Vec<PixelPoint>,
    stats: TraceStats,
}

enum FillEnd {
    Drained,
    PointCap,
    VisitedCap,
}

impl<'a> TraceWorkspace<'a> {
    fn new(edges: &'a ScalarMap, params: &'a TraceParams) -> Self {
        Self {
            edges,
            params,
            visited: vec![false; edges.len()],
            stack: Vec::with_capacity(params.max_stack_depth + NEIGHBOR_OFFSETS.len()),
            stats: TraceStats::default(),
        }
    }

    fn fill_from(&mut self, seed: PixelPoint) -> (Crack, FillEnd) {
        let w = self.edges.width;
        let mut points = Vec::new();
        let mut magnitude_sum = 0u64;

        self.stack.clear();
        self.stack.push(seed);

        let end = loop {
            if points.len() >= self.params.max_points_per_crack {
                break if self.stack.is_empty() {
                    FillEnd::Drained
                } else {
                    FillEnd::PointCap
                };
            }
            let Some(p) = self.stack.pop() else {
                break FillEnd::Drained;
            };
            let Some(magnitude) = self.edges.get_checked(p.x, p.y) else {
                continue;
            };
            let idx = p.y as usize * w + p.x as usize;
            if self.visited[idx] || magnitude == 0 {
                continue;
            }
            if self.stats.visited > self.params.max_visited {
                break FillEnd::VisitedCap;
            }

            self.visited[idx] = true;
            self.stats.visited += 1;
            points.push(p);
            magnitude_sum += magnitude as u64;

            if self.stack.len() < self.params.max_stack_depth {
                self.stack.extend(
                    NEIGHBOR_OFFSETS
                        .iter()
                        .map(|&(dx, dy)| PixelPoint::new(p.x + dx, p.y + dy)),
                );
            } else {
                self.stats.stack_throttle_events += 1;
            }
        };

        (Crack::from_traversal(points, magnitude_sum), end)
    }
}

/// Group the edge map into cracks.
///
/// Returns every group with more than `min_traced_points` points, in seed
/// order. No geometric validation happens here.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(edges, params), fields(width = edges.width, height = edges.height))
)]
pub fn trace_cracks(edges: &ScalarMap, params: &TraceParams) -> TraceOutput {
    let mut ws = TraceWorkspace::new(edges, params);
    let mut cracks = Vec::new();

    'scan: for y in 0..edges.height {
        for x in 0..edges.width {
            let idx = y * edges.width + x;
            if edges.data[idx] == 0 || ws.visited[idx] {
                continue;
            }

            ws.stats.seeds += 1;
            let (crack, end) = ws.fill_from(PixelPoint::new(x as i32, y as i32));
            if crack.len() > params.min_traced_points {
                cracks.push(crack);
            } else {
                ws.stats.discarded_noise += 1;
            }

            match end {
                FillEnd::Drained => {}
                FillEnd::PointCap => ws.stats.point_cap_hits += 1,
                FillEnd::VisitedCap => {
                    ws.stats.visited_cap_hit = true;
                    warn!(
                        "visited-pixel ceiling ({}) reached at ({x}, {y}); scan aborted",
                        params.max_visited
                    );
                    break 'scan;
                }
            }
        }
    }

    debug!(
        "traced {} groups from {} seeds ({} visited, {} noise, {} capped, {} throttled)",
        cracks.len(),
        ws.stats.seeds,
        ws.stats.visited,
        ws.stats.discarded_noise,
        ws.stats.point_cap_hits,
        ws.stats.stack_throttle_events
    );

    TraceOutput {
        cracks,
        stats: ws.stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn map_with(w: usize, h: usize, pixels: &[(usize, usize, u8)]) -> ScalarMap {
        let mut map = ScalarMap::new(w, h);
        for &(x, y, v) in pixels {
            map.set(x, y, v);
        }
        map
    }

    fn loose() -> TraceParams {
        TraceParams {
            min_traced_points: 0,
            ..TraceParams::default()
        }
    }

    #[test]
    fn diagonal_ridge_is_traced_end_to_end() {
        let ridge: Vec<_> = (5..=50).map(|t| (t, t, 200u8)).collect();
        let edges = map_with(64, 64, &ridge);
        let out = trace_cracks(&edges, &TraceParams::default());

        assert_eq!(out.cracks.len(), 1);
        let crack = &out.cracks[0];
        assert_eq!(crack.len(), 46);
        assert_eq!(crack.points[0], PixelPoint::new(5, 5));
        assert_eq!(crack.points[45], PixelPoint::new(50, 50));
        assert_relative_eq!(crack.direction, 45f32.atan2(45.0), epsilon = 1e-6);
        assert_relative_eq!(crack.length, 45.0 * 2f32.sqrt(), epsilon = 1e-3);
        assert_relative_eq!(crack.strength, 200.0);
        assert_relative_eq!(crack.linearity(), 1.0, epsilon = 1e-5);
        assert!(!out.stats.truncated());
    }

    #[test]
    fn lifo_order_prefers_down_right() {
        // Plus-shaped blob seeded at its top pixel.
        let edges = map_with(
            5,
            5,
            &[(2, 1, 9), (1, 2, 9), (2, 2, 9), (3, 2, 9), (2, 3, 9)],
        );
        let out = trace_cracks(&edges, &loose());
        let order: Vec<(i32, i32)> = out.cracks[0].points.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(order, vec![(2, 1), (3, 2), (2, 3), (2, 2), (1, 2)]);
    }

    #[test]
    fn small_groups_are_noise() {
        let line: Vec<_> = (0..20).map(|x| (x, 3, 80u8)).collect();
        let edges = map_with(30, 8, &line);
        let out = trace_cracks(&edges, &TraceParams::default());
        assert!(out.cracks.is_empty());
        assert_eq!(out.stats.seeds, 1);
        assert_eq!(out.stats.discarded_noise, 1);
        assert_eq!(out.stats.visited, 20);
    }

    #[test]
    fn point_cap_splits_long_structures() {
        let line: Vec<_> = (0..30).map(|x| (x, 0, 60u8)).collect();
        let edges = map_with(30, 1, &line);
        let params = TraceParams {
            min_traced_points: 0,
            max_points_per_crack: 10,
            ..TraceParams::default()
        };
        let out = trace_cracks(&edges, &params);
        assert_eq!(out.cracks.len(), 3);
        assert!(out.cracks.iter().all(|c| c.len() == 10));
        assert!(out.stats.point_cap_hits >= 2);
        assert!(out.stats.truncated());
    }

    #[test]
    fn visited_ceiling_aborts_the_scan() {
        let mut pixels = Vec::new();
        for y in [1usize, 4, 7] {
            for x in 0..25 {
                pixels.push((x, y, 70u8));
            }
        }
        let edges = map_with(25, 9, &pixels);
        let params = TraceParams {
            min_traced_points: 0,
            max_visited: 30,
            ..TraceParams::default()
        };
        let out = trace_cracks(&edges, &params);
        assert!(out.stats.visited_cap_hit);
        assert!(out.stats.truncated());
        // The visit that found the ceiling exceeded is not recorded.
        assert_eq!(out.stats.visited, 31);
        assert_eq!(out.cracks.len(), 2);
        assert_eq!(out.cracks[0].len(), 25);
        assert_eq!(out.cracks[1].len(), 6);
    }

    #[test]
    fn stack_ceiling_throttles_growth() {
        let mut pixels = Vec::new();
        for y in 0..12 {
            for x in 0..12 {
                pixels.push((x, y, 120u8));
            }
        }
        let edges = map_with(12, 12, &pixels);
        let params = TraceParams {
            min_traced_points: 0,
            max_stack_depth: 8,
            ..TraceParams::default()
        };
        let out = trace_cracks(&edges, &params);
        assert!(out.stats.stack_throttle_events > 0);
        assert!(out.stats.truncated());
        let total: usize = out.cracks.iter().map(Crack::len).sum();
        assert_eq!(total, 144);
    }

    #[test]
    fn empty_map_yields_nothing() {
        let edges = ScalarMap::new(16, 16);
        let out = trace_cracks(&edges, &TraceParams::default());
        assert!(out.cracks.is_empty());
        assert_eq!(out.stats, TraceStats::default());
    }
}
