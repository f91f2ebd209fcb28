use std::path::PathBuf;

use agelapse_core::erase::{eraser_from_config, EraserKind};
use agelapse_core::pipeline::{Pipeline, RunConfig};
use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use tracing::warn;

use crate::open::open_path;
use crate::progress::BarReporter;
use crate::summary::{print_batch_report, print_run_summary};

#[derive(Clone, Copy, ValueEnum)]
pub enum EraserArg {
    BorderKey,
    Command,
}

impl From<EraserArg> for EraserKind {
    fn from(arg: EraserArg) -> Self {
        match arg {
            EraserArg::BorderKey => EraserKind::BorderKey,
            EraserArg::Command => EraserKind::Command,
        }
    }
}

#[derive(Args)]
pub struct RunArgs {
    /// Root folder holding the sample folders
    pub root: PathBuf,

    /// Run config file (TOML); flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Background-erasure passes per frame
    #[arg(long)]
    pub cycles: Option<usize>,

    /// Skip video assembly
    #[arg(long)]
    pub no_film: bool,

    /// Video frame rate (frames per second)
    #[arg(long)]
    pub frame_rate: Option<u32>,

    /// Open the sample logs when done
    #[arg(long)]
    pub open_logs: bool,

    /// Smallest contour area (px²) taken as the sample outline
    #[arg(long)]
    pub min_area: Option<f64>,

    /// Raw frame extension
    #[arg(long)]
    pub extension: Option<String>,

    /// Background eraser
    #[arg(long, value_enum)]
    pub eraser: Option<EraserArg>,

    /// Only process sample folders with these names
    #[arg(long, num_args = 1..)]
    pub only: Vec<String>,

    /// Process frames one at a time
    #[arg(long)]
    pub sequential: bool,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let mut config: RunConfig = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid run config")?
    } else {
        RunConfig::default()
    };
    apply_overrides(&mut config, args);
    config.validate().context("Invalid run config")?;

    let eraser = eraser_from_config(&config.eraser);
    print_run_summary(&config, eraser.name());

    let pipeline = Pipeline::new(config, eraser);
    let reporter = BarReporter::new();
    let report = pipeline
        .run(&reporter)
        .with_context(|| format!("Failed to process {}", args.root.display()))?;
    reporter.finish();

    print_batch_report(&report);

    if pipeline.config().open_logs {
        for log in report.log_paths() {
            if let Err(e) = open_path(&log) {
                warn!(path = %log.display(), error = %e, "Could not open log");
            }
        }
    }

    let failed = report.failed_count();
    if failed > 0 {
        bail!("{failed} of {} sample(s) failed", report.samples.len());
    }
    Ok(())
}

fn apply_overrides(config: &mut RunConfig, args: &RunArgs) {
    config.root = args.root.clone();
    if let Some(cycles) = args.cycles {
        config.cycles = cycles;
    }
    if args.no_film {
        config.film = false;
    }
    if let Some(rate) = args.frame_rate {
        config.frame_rate = rate;
    }
    if args.open_logs {
        config.open_logs = true;
    }
    if let Some(area) = args.min_area {
        config.alignment.min_contour_area = area;
    }
    if let Some(ref ext) = args.extension {
        config.input_extension = ext.clone();
    }
    if let Some(kind) = args.eraser {
        config.eraser.kind = kind.into();
    }
    if !args.only.is_empty() {
        config.only_samples = args.only.clone();
    }
    if args.sequential {
        config.parallel = false;
    }
}
