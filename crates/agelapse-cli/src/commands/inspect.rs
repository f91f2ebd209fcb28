use std::path::PathBuf;

use agelapse_core::io::discover::{discover_samples, folder_name, list_frames, sort_frames};
use agelapse_core::io::timeline::{load_timeline, locate_timeline};
use agelapse_core::pipeline::RunConfig;
use anyhow::{Context, Result};
use clap::Args;
use console::Style;

#[derive(Args)]
pub struct InspectArgs {
    /// Root folder holding the sample folders
    pub root: PathBuf,

    /// Raw frame extension
    #[arg(long, default_value = "jpg")]
    pub extension: String,

    /// Timeline file name without extension
    #[arg(long, default_value = "Timeline")]
    pub timeline: String,
}

pub fn run(args: &InspectArgs) -> Result<()> {
    let defaults = RunConfig::default();
    let folders = discover_samples(&args.root, &args.extension, &defaults.output_dir_name, &[])
        .with_context(|| format!("Failed to scan {}", args.root.display()))?;

    let ok = Style::new().green();
    let bad = Style::new().red();
    let dim = Style::new().dim();

    println!("Samples:     {}", folders.len());
    for folder in &folders {
        let names = list_frames(folder, &args.extension)?;
        let count = names.len();
        let (names, mode) = sort_frames(names);

        println!();
        println!("{}", Style::new().bold().apply_to(folder_name(folder)));
        println!("  Folder:    {}", folder.display());
        println!("  Frames:    {count} ({mode} order)");
        if let (Some(first), Some(last)) = (names.first(), names.last()) {
            println!("  Range:     {} .. {}", dim.apply_to(first), dim.apply_to(last));
        }

        let timeline = locate_timeline(folder, &args.timeline)
            .and_then(|path| load_timeline(&path, defaults.timeline.rounding));
        match timeline {
            Ok(t) => match t.check_covers(count) {
                Ok(()) => println!(
                    "  Timeline:  {} ({} rows)",
                    ok.apply_to(t.path.display()),
                    t.len()
                ),
                Err(e) => println!("  Timeline:  {}", bad.apply_to(e)),
            },
            Err(e) => println!("  Timeline:  {}", bad.apply_to(e)),
        }
    }

    Ok(())
}
