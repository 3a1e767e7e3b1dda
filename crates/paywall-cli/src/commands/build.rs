//! `paywall build`

use std::path::{Path, PathBuf};

use clap::Args;
use colored::*;
use paywall_site::SiteBuilder;
use tracing::info;

use super::{gate_for, load_config};
use crate::error::CliResult;
use crate::output::{print_info, print_success};

/// Arguments for `paywall build`
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Output directory, overriding `site_dir` from the configuration
    #[arg(short = 'd', long = "site-dir")]
    pub site_dir: Option<PathBuf>,
}

/// Run a full gated build.
pub fn execute(args: BuildArgs, config_file: &Path, scratch_dir: Option<&Path>) -> CliResult<()> {
    let mut config = load_config(config_file)?;
    if let Some(site_dir) = args.site_dir {
        config.site_dir = site_dir;
    }
    info!(config = %config_file.display(), site_dir = %config.site_dir.display(), "Building site");

    let mut gate = gate_for(&config, scratch_dir)?;
    let report = SiteBuilder::new(config).build(&mut gate)?;

    let stats = gate.stats();
    print_success(&format!(
        "Built {} pages into {}",
        report.pages.len(),
        report.site_dir.display().to_string().bold()
    ));
    print_info(&format!(
        "{} gated pages ({} clipped, {} without a paragraph break), {} static files",
        stats.pages_gated,
        stats.pages_clipped,
        stats.clip_fallbacks,
        report.static_files_copied
    ));
    Ok(())
}
