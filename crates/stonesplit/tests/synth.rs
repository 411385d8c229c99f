#![cfg(feature = "synth")]

use stonesplit::synth::{synth_stone, SynthParams};
use stonesplit::{analyze, AnalyzerConfig, RgbaImageView, WedgeKind};

fn check_invariants(config: &AnalyzerConfig, seed: u64) {
    let stone = synth_stone(&SynthParams::default(), seed);
    let view = RgbaImageView::new(stone.width, stone.height, &stone.pixels);
    let result = analyze(&view, config).unwrap();

    assert!(result.cracks.len() <= config.max_cracks);
    for crack in &result.cracks {
        assert!(!crack.points.is_empty());
        assert!(crack.points.len() <= config.trace.max_points_per_crack);
        let lin = crack.linearity();
        assert!((0.0..=1.0).contains(&lin), "linearity {lin} for seed {seed}");
        assert!(lin >= config.validation.min_linearity);
    }

    let plan = &result.wedge_plan;
    assert!(plan.len() <= config.wedge.max_points);
    for (i, a) in plan.iter().enumerate() {
        for b in &plan[i + 1..] {
            assert!(
                a.distance_to(b) >= config.wedge.min_spacing,
                "seed {seed}: points closer than {}",
                config.wedge.min_spacing
            );
        }
    }
    if let Some(k) = plan.iter().position(|c| c.kind == WedgeKind::CrackPoint) {
        assert!(plan[k..].iter().all(|c| c.kind == WedgeKind::CrackPoint));
    }

    let again = analyze(&view, config).unwrap();
    assert_eq!(result, again, "seed {seed} is not deterministic");
}

#[test]
fn presets_hold_plan_invariants_on_synthetic_stone() {
    for seed in 0..8 {
        check_invariants(&AnalyzerConfig::sensitive(), seed);
        check_invariants(&AnalyzerConfig::strict(), seed);
    }
}

#[test]
fn tight_spacing_and_cap_still_hold() {
    let mut config = AnalyzerConfig::sensitive();
    config.wedge.min_spacing = 15.0;
    config.wedge.max_points = 3;
    for seed in 100..106 {
        check_invariants(&config, seed);
    }
}
