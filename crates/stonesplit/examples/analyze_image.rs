//! Analyze one image with the sensitive preset and print the plan.
//!
//! ```text
//! cargo run -p stonesplit --example analyze_image -- path/to/stone.jpg [report.json]
//! ```

use std::{env, path::PathBuf};

use stonesplit::detect::{analyze_image, load_rgba, ImageAnalysisOptions};
use stonesplit::{AnalysisReport, AnalyzerConfig};

#[cfg(not(feature = "tracing"))]
use log::{info, LevelFilter};
#[cfg(feature = "tracing")]
use tracing::info;
#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(not(feature = "tracing"))]
    stonesplit::core::init_with_level(LevelFilter::Info)?;
    #[cfg(feature = "tracing")]
    {
        let _ = LogTracer::init();
        stonesplit::core::init_tracing(false);
    }

    let mut args = env::args().skip(1);
    let image_path = args
        .next()
        .map(PathBuf::from)
        .ok_or("usage: analyze_image <IMAGE> [REPORT]")?;
    let report_path = args.next().map(PathBuf::from);

    let img = load_rgba(&image_path)?;
    let config = AnalyzerConfig::sensitive();
    let analysis = analyze_image(&img, &config, &ImageAnalysisOptions::default())?;
    info!(
        "analysed at {}x{} (scale {:.3} x {:.3})",
        analysis.analysis_width,
        analysis.analysis_height,
        analysis.scale.scale_x,
        analysis.scale.scale_y
    );

    for (i, crack) in analysis.result.cracks.iter().enumerate() {
        println!(
            "crack {i}: {} points, length {:.1}, direction {:.3} rad, strength {:.1}, linearity {:.3}",
            crack.points.len(),
            crack.length,
            crack.direction,
            crack.strength,
            crack.linearity()
        );
    }
    for p in &analysis.result.wedge_plan {
        let src = analysis.scale.to_source(p.position);
        println!(
            "wedge at ({:.1}, {:.1}) {:?} {:?}",
            src.x,
            src.y,
            p.kind,
            p.tier()
        );
    }
    println!(
        "recommended splits: {}",
        analysis.result.summary.recommended_splits
    );

    if let Some(path) = report_path {
        let mut report = AnalysisReport::new(
            image_path.to_string_lossy(),
            img.dimensions(),
            config,
        );
        report.analysis_width = analysis.analysis_width;
        report.analysis_height = analysis.analysis_height;
        report.scale = analysis.scale;
        report.result = Some(analysis.result);
        report.write_json(&path)?;
        println!("report written to {}", path.display());
    }

    Ok(())
}
