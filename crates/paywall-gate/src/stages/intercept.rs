use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::{BuildConfig, GateConfig};
use crate::context::GateContext;
use crate::error::{GateError, GateResult};

/// Stage 1: Config Interceptor
///
/// Checks the theme against the allow-list, records the original docs dir
/// and points the build at a freshly created scratch directory. The theme is
/// checked before anything touches the filesystem.
pub struct ConfigInterceptor {
    supported_themes: Vec<String>,
    scratch_prefix: String,
    scratch_parent: Option<PathBuf>,
}

impl ConfigInterceptor {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            supported_themes: config.supported_themes.clone(),
            scratch_prefix: config.scratch_prefix.clone(),
            scratch_parent: config.scratch_parent.clone(),
        }
    }

    pub fn intercept(
        &self,
        context: &mut GateContext,
        mut config: BuildConfig,
    ) -> GateResult<BuildConfig> {
        if !self.supported_themes.iter().any(|t| *t == config.theme) {
            return Err(GateError::UnsupportedTheme {
                theme: config.theme,
                supported: self.supported_themes.clone(),
            });
        }

        let mut builder = tempfile::Builder::new();
        builder.prefix(&self.scratch_prefix);
        let scratch = match &self.scratch_parent {
            Some(parent) => builder
                .tempdir_in(parent)
                .map_err(|e| GateError::io(parent, e))?,
            None => builder
                .tempdir()
                .map_err(|e| GateError::io(std::env::temp_dir(), e))?,
        };
        debug!(scratch = %scratch.path().display(), "Created scratch directory");

        context.source_docs_dir = Some(config.docs_dir.clone());
        context.attach_scratch(scratch);
        let scratch_docs = context.scratch_docs_dir()?.to_path_buf();

        info!(
            theme = %config.theme,
            source = %config.docs_dir.display(),
            scratch = %scratch_docs.display(),
            "Docs dir redirected to scratch"
        );
        config.docs_dir = scratch_docs;
        Ok(config)
    }
}
