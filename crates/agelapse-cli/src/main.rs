mod commands;
mod open;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "agelapse", about = "Registration, cropping and filming of ageing photo series")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every sample folder under a root
    Run(commands::run::RunArgs),
    /// Print or save the default configuration as TOML
    Config(commands::config::ConfigArgs),
    /// Show discovered samples, frame order and timelines without processing
    Inspect(commands::inspect::InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
    }
}
