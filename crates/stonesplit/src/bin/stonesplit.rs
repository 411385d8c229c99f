use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::info;
use stonesplit::detect::{analyze_image, load_rgba, ImageAnalysisOptions};
use stonesplit::{AnalysisReport, AnalyzeError, AnalyzeJobConfig, IoError, Preset};

#[cfg(not(feature = "tracing"))]
use log::LevelFilter;
#[cfg(not(feature = "tracing"))]
use std::str::FromStr;

#[cfg(feature = "tracing")]
use tracing_log::LogTracer;

#[derive(Parser, Debug)]
#[command(name = "stonesplit", version)]
#[command(about = "Detect cracks in stone surface photos and plan wedge placement")]
struct Cli {
    /// Log level for diagnostics on stderr (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one image and write a JSON report.
    Analyze(AnalyzeArgs),
    /// Write a starter job config.
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Input image. Overrides `image_path` from `--config`.
    image: Option<PathBuf>,
    /// Parameter preset. Overrides the preset from `--config`.
    #[arg(long, value_enum)]
    preset: Option<Preset>,
    /// JSON job config with optional per-stage overrides.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Report path (default: from the config, else `stonesplit_report.json`).
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Shrink wider images to this width before analysis.
    #[arg(long, conflicts_with = "full_res")]
    max_width: Option<u32>,
    /// Analyze at full source resolution.
    #[arg(long)]
    full_res: bool,
}

#[derive(Args, Debug)]
struct InitConfigArgs {
    /// Where to write the config.
    path: PathBuf,
    #[arg(long, default_value = "stone.jpg")]
    image: String,
    #[arg(long, value_enum, default_value_t = Preset::Strict)]
    preset: Preset,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("no input image: pass IMAGE or a --config with `image_path`")]
    MissingImage,
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),
    #[error(transparent)]
    Logger(#[from] log::SetLoggerError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging(&cli.log_level) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    let outcome = match cli.cmd {
        Command::Analyze(args) => run_analyze(args),
        Command::InitConfig(args) => run_init_config(args),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(level: &str) -> Result<(), CliError> {
    let level = LevelFilter::from_str(level).unwrap_or(LevelFilter::Warn);
    stonesplit::core::init_with_level(level)?;
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(_level: &str) -> Result<(), CliError> {
    let _ = LogTracer::init();
    stonesplit::core::init_tracing(false);
    Ok(())
}

fn resolve_job(args: &AnalyzeArgs) -> Result<AnalyzeJobConfig, CliError> {
    let mut job = match (&args.config, &args.image) {
        (Some(path), _) => AnalyzeJobConfig::load_json(path)?,
        (None, Some(image)) => AnalyzeJobConfig::new(image.to_string_lossy()),
        (None, None) => return Err(CliError::MissingImage),
    };
    if let Some(image) = &args.image {
        job.image_path = image.to_string_lossy().into_owned();
    }
    if job.image_path.is_empty() {
        return Err(CliError::MissingImage);
    }
    if let Some(preset) = args.preset {
        job.preset = preset;
    }
    if let Some(output) = &args.output {
        job.output_path = Some(output.to_string_lossy().into_owned());
    }
    if args.full_res {
        job.max_analysis_width = None;
    } else if let Some(w) = args.max_width {
        job.max_analysis_width = Some(w);
    }
    Ok(job)
}

fn run_analyze(args: AnalyzeArgs) -> Result<(), CliError> {
    let job = resolve_job(&args)?;
    let config = job.build_config();
    config.validate().map_err(AnalyzeError::from)?;

    let img = load_rgba(&job.image_path)?;
    info!("loaded {} ({}x{})", job.image_path, img.width(), img.height());

    let opts = ImageAnalysisOptions {
        max_analysis_width: job.max_analysis_width,
    };
    let analysis = analyze_image(&img, &config, &opts)?;

    let mut report = AnalysisReport::new(job.image_path.clone(), img.dimensions(), config);
    report.analysis_width = analysis.analysis_width;
    report.analysis_height = analysis.analysis_height;
    report.scale = analysis.scale;

    let s = analysis.result.summary;
    let points = analysis.result.wedge_plan.len();
    let truncated = analysis.result.truncated;
    report.result = Some(analysis.result);

    let output = job.output_path();
    report.write_json(&output)?;

    println!(
        "cracks: {}, wedge points: {points} (high {}, medium {}, low {}), recommended splits: {}{}",
        s.crack_count,
        s.high_priority,
        s.medium_priority,
        s.low_priority,
        s.recommended_splits,
        if truncated { ", truncated" } else { "" }
    );
    println!("report: {}", output.display());
    Ok(())
}

fn run_init_config(args: InitConfigArgs) -> Result<(), CliError> {
    let mut job = AnalyzeJobConfig::new(args.image);
    job.preset = args.preset;
    job.write_json(&args.path)?;
    println!("wrote {}", args.path.display());
    Ok(())
}
