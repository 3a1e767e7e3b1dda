//! `paywall inspect`

use std::path::Path;

use clap::Args;
use paywall_gate::DocFile;
use paywall_site::SiteBuilder;
use serde::Serialize;
use tabled::Tabled;

use super::{gate_for, load_config};
use crate::error::CliResult;
use crate::output::{print_output, OutputFormat};

/// Arguments for `paywall inspect`
#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Output format (table, json, yaml)
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// One row of the page inventory.
#[derive(Debug, Serialize, Tabled)]
pub struct InventoryRow {
    #[tabled(rename = "Source")]
    pub source: String,
    #[tabled(rename = "URL")]
    pub url: String,
    #[tabled(rename = "Destination")]
    pub destination: String,
    #[tabled(rename = "Gated")]
    pub gated: bool,
}

impl InventoryRow {
    fn new(file: &DocFile, prefix: &str) -> Self {
        Self {
            source: file.src_path.clone(),
            url: file.url.clone(),
            destination: file.dest_path.clone(),
            gated: file.is_gated(prefix),
        }
    }
}

/// Run the hooks through file normalization and print the page inventory.
pub fn execute(args: InspectArgs, config_file: &Path, scratch_dir: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_file)?;
    let mut gate = gate_for(&config, scratch_dir)?;
    let prepared = SiteBuilder::new(config).prepare(&mut gate)?;

    let prefix = gate.gated_prefix().to_string();
    // Dropping the transform removes the scratch copy.
    drop(gate);

    let rows: Vec<InventoryRow> = prepared
        .files
        .documentation_pages()
        .map(|file| InventoryRow::new(file, &prefix))
        .collect();
    print_output(&rows, args.output)
}
