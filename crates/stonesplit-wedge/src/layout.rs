use crate::candidate::WedgeCandidate;

/// Greedy minimum-separation selection.
///
/// Candidates are stably sorted by descending rank, so the `High` sentinel
/// comes first and equal ranks keep generation order. Each candidate is
/// accepted when it lies at least `min_spacing` from every accepted point;
/// selection stops after `max_points`. Not optimal in general.
pub fn greedy_layout(
    mut candidates: Vec<WedgeCandidate>,
    min_spacing: f32,
    max_points: usize,
) -> Vec<WedgeCandidate> {
    candidates.sort_by(|a, b| b.priority.rank().total_cmp(&a.priority.rank()));

    let mut accepted: Vec<WedgeCandidate> = Vec::with_capacity(max_points.min(candidates.len()));
    for cand in candidates {
        if accepted.len() >= max_points {
            break;
        }
        if accepted.iter().all(|p| p.distance_to(&cand) >= min_spacing) {
            accepted.push(cand);
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::WedgeKind;
    use nalgebra::Point2;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sample(x: f32, score: f32) -> WedgeCandidate {
        WedgeCandidate::crack_point(Point2::new(x, 0.0), score, 0.0)
    }

    fn xs(plan: &[WedgeCandidate]) -> Vec<f32> {
        plan.iter().map(|c| c.position.x).collect()
    }

    fn mixed() -> Vec<WedgeCandidate> {
        vec![
            sample(0.0, 0.5),
            sample(50.0, 0.9),
            sample(200.0, 0.9),
            WedgeCandidate::intersection(Point2::new(100.0, 0.0), 4.0),
        ]
    }

    #[test]
    fn intersections_lead_and_spacing_is_enforced() {
        let plan = greedy_layout(mixed(), 80.0, 8);
        assert_eq!(plan[0].kind, WedgeKind::Intersection);
        // 50 is within 80 of the intersection at 100.
        assert_eq!(xs(&plan), vec![100.0, 200.0, 0.0]);
    }

    #[test]
    fn stops_at_max_points() {
        let plan = greedy_layout(mixed(), 80.0, 2);
        assert_eq!(xs(&plan), vec![100.0, 200.0]);
    }

    #[test]
    fn exact_spacing_is_accepted() {
        let plan = greedy_layout(vec![sample(0.0, 0.6), sample(80.0, 0.6)], 80.0, 8);
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn ties_keep_generation_order() {
        let cands = vec![sample(10.0, 0.6), sample(0.0, 0.6), sample(500.0, 0.6)];
        let plan = greedy_layout(cands, 80.0, 8);
        assert_eq!(xs(&plan), vec![10.0, 500.0]);
    }

    #[test]
    fn empty_input_gives_empty_plan() {
        assert!(greedy_layout(Vec::new(), 80.0, 8).is_empty());
    }

    #[test]
    fn random_candidates_respect_cap_and_spacing() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..50 {
            let n = rng.gen_range(0..120);
            let cands: Vec<_> = (0..n)
                .map(|_| {
                    let pos = Point2::new(rng.gen_range(0.0..640.0), rng.gen_range(0.0..480.0));
                    if rng.gen_bool(0.1) {
                        WedgeCandidate::intersection(pos, rng.gen_range(0.0..10.0))
                    } else {
                        WedgeCandidate::crack_point(pos, rng.gen_range(0.0..=1.0), 0.0)
                    }
                })
                .collect();
            let spacing = rng.gen_range(10.0..120.0);
            let max_points = rng.gen_range(1..12);
            let plan = greedy_layout(cands, spacing, max_points);

            assert!(plan.len() <= max_points);
            for (i, a) in plan.iter().enumerate() {
                for b in &plan[i + 1..] {
                    assert!(a.distance_to(b) >= spacing);
                }
            }
            let first_score = plan.iter().position(|c| c.kind == WedgeKind::CrackPoint);
            if let Some(k) = first_score {
                assert!(plan[k..].iter().all(|c| c.kind == WedgeKind::CrackPoint));
            }
        }
    }
}
