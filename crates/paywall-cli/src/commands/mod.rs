//! Subcommand implementations

pub mod build;
pub mod inspect;

use std::path::Path;

use paywall_gate::{GateConfig, GateTransform};
use paywall_site::SiteConfig;

use crate::error::{CliError, CliResult};

/// Load `mkdocs.yml`, distinguishing a missing file from a broken one.
pub(crate) fn load_config(path: &Path) -> CliResult<SiteConfig> {
    if !path.is_file() {
        return Err(CliError::ConfigNotFound(path.to_path_buf()));
    }
    Ok(SiteConfig::load(path)?)
}

/// One Gate Transform per invocation.
pub(crate) fn gate_for(config: &SiteConfig, scratch_dir: Option<&Path>) -> CliResult<GateTransform> {
    let gate_config = match scratch_dir {
        Some(dir) => GateConfig::default().with_scratch_parent(dir),
        None => GateConfig::default(),
    };
    Ok(GateTransform::new(gate_config, config.paywall_options()?)?)
}
