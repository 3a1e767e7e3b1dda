use tracing::{debug, info};

use crate::config::{BuildConfig, GateConfig, PaywallOptions};
use crate::context::{GateContext, GateStats, Phase};
use crate::error::{GateError, GateResult};
use crate::files::{Files, Page};
use crate::nav::Navigation;
use crate::stages::{
    ConfigInterceptor, ContentClipper, NavigationFilter, ScratchCleaner, TreeDuplicator,
    UrlNormalizer,
};
use crate::traits::BuildHooks;

/// The Gate Transform, one instance per build invocation.
///
/// Owns the stages and the explicit [`GateContext`]. Each hook checks the
/// current [`Phase`] first, so a hook called twice or out of sequence fails
/// instead of silently redoing work.
pub struct GateTransform {
    config: GateConfig,
    context: GateContext,
    interceptor: ConfigInterceptor,
    duplicator: TreeDuplicator,
    normalizer: UrlNormalizer,
    nav_filter: NavigationFilter,
    clipper: ContentClipper,
    cleaner: ScratchCleaner,
}

impl GateTransform {
    /// Create a transform, rejecting a malformed gated prefix.
    pub fn new(config: GateConfig, options: PaywallOptions) -> GateResult<Self> {
        config.validate()?;
        let prefix = config.gated_prefix.clone();
        Ok(Self {
            interceptor: ConfigInterceptor::new(&config),
            duplicator: TreeDuplicator::new(prefix.clone()),
            normalizer: UrlNormalizer::new(prefix.clone()),
            nav_filter: NavigationFilter::new(prefix.clone()),
            clipper: ContentClipper::new(prefix),
            cleaner: ScratchCleaner::new(),
            context: GateContext::new(options),
            config,
        })
    }

    pub fn gated_prefix(&self) -> &str {
        &self.config.gated_prefix
    }

    /// Per-build state, read-only.
    pub fn context(&self) -> &GateContext {
        &self.context
    }

    pub fn phase(&self) -> Phase {
        self.context.phase
    }

    pub fn options(&self) -> &PaywallOptions {
        &self.context.options
    }

    pub fn stats(&self) -> &GateStats {
        &self.context.stats
    }
}

impl BuildHooks for GateTransform {
    fn on_config(&mut self, config: BuildConfig) -> GateResult<BuildConfig> {
        // Checked without advancing so a rejected theme leaves the phase alone.
        if self.context.phase != Phase::Created {
            return Err(GateError::OutOfOrder {
                hook: "on_config",
                phase: self.context.phase,
            });
        }
        let config = self.interceptor.intercept(&mut self.context, config)?;
        self.context.phase = Phase::Configured;
        Ok(config)
    }

    fn on_pre_build(&mut self) -> GateResult<()> {
        self.context
            .advance("on_pre_build", &[Phase::Configured], Phase::Duplicated)?;
        self.context.stats.files_duplicated = self.duplicator.duplicate(&self.context)?;
        Ok(())
    }

    fn on_files(&mut self, files: Files) -> GateResult<Files> {
        self.context
            .advance("on_files", &[Phase::Duplicated], Phase::FilesNormalized)?;
        let (files, rewritten) = self.normalizer.normalize(files);
        self.context.stats.pages_gated = rewritten;
        info!(
            files = files.len(),
            gated_pages = rewritten,
            "Gated page URLs normalized"
        );
        Ok(files)
    }

    fn on_nav(&mut self, nav: Navigation) -> GateResult<Navigation> {
        self.context
            .advance("on_nav", &[Phase::FilesNormalized], Phase::NavFiltered)?;
        let (filtered, removed) = self.nav_filter.filter(&nav);
        self.context.stats.nav_entries_removed = removed;
        info!(removed, "Gated entries removed from navigation");
        Ok(filtered)
    }

    fn on_page_content(&mut self, html: String, page: &Page) -> GateResult<String> {
        self.context.advance(
            "on_page_content",
            &[Phase::NavFiltered, Phase::Rendering],
            Phase::Rendering,
        )?;
        match self.clipper.clip(&html, page) {
            Some(clipped) => {
                if clipped.truncated {
                    self.context.stats.pages_clipped += 1;
                } else {
                    self.context.stats.clip_fallbacks += 1;
                }
                Ok(clipped.html)
            }
            None => Ok(html),
        }
    }

    fn on_post_build(&mut self) -> GateResult<()> {
        self.context.advance(
            "on_post_build",
            &[Phase::NavFiltered, Phase::Rendering],
            Phase::Finished,
        )?;
        self.cleaner.clean(&mut self.context)?;
        let stats = &self.context.stats;
        debug!(?stats, "Gate transform finished");
        info!(
            gated_pages = stats.pages_gated,
            clipped = stats.pages_clipped,
            fallbacks = stats.clip_fallbacks,
            "Paywall build complete"
        );
        Ok(())
    }
}
