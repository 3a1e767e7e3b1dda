//! Paywall CLI - build documentation sites with gated page variants
//!
//! - `build` runs the full site build with the Gate Transform installed
//! - `inspect` shows the page inventory the hooks produce, without writing a site

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod output;

use commands::{build, inspect};
use output::print_error;

/// Paywall CLI application
#[derive(Parser)]
#[command(name = "paywall")]
#[command(about = "Build documentation sites with paywalled page variants", long_about = None)]
#[command(version)]
struct Cli {
    /// Site configuration file
    #[arg(short = 'f', long = "config-file", env = "PAYWALL_CONFIG", default_value = "mkdocs.yml", global = true)]
    config_file: PathBuf,

    /// Parent directory for the scratch copy (system temp dir by default)
    #[arg(long, env = "PAYWALL_SCRATCH_DIR", global = true)]
    scratch_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Build the site with gated variants of every page
    Build(build::BuildArgs),

    /// Print the page inventory after URL normalization
    Inspect(inspect::InspectArgs),
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let scratch_dir = cli.scratch_dir.as_deref();
    match cli.command {
        Commands::Build(args) => build::execute(args, &cli.config_file, scratch_dir)
            .with_context(|| format!("build failed for {}", cli.config_file.display())),
        Commands::Inspect(args) => inspect::execute(args, &cli.config_file, scratch_dir)
            .with_context(|| format!("inspect failed for {}", cli.config_file.display())),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
