use crate::config::BuildConfig;
use crate::error::GateResult;
use crate::files::{Files, Page};
use crate::nav::Navigation;

/// Lifecycle callbacks a host build pipeline drives.
///
/// The host calls them once per build in this order:
/// `on_config` → `on_pre_build` → `on_files` → `on_nav` →
/// `on_page_content` (once per page, any order) → `on_post_build`.
pub trait BuildHooks {
    /// Inspect and rewrite the build configuration before anything is read.
    fn on_config(&mut self, config: BuildConfig) -> GateResult<BuildConfig>;

    /// Filesystem preparation before the host discovers files.
    fn on_pre_build(&mut self) -> GateResult<()>;

    /// Rewrite the discovered file inventory.
    fn on_files(&mut self, files: Files) -> GateResult<Files>;

    /// Rewrite the assembled navigation.
    fn on_nav(&mut self, nav: Navigation) -> GateResult<Navigation>;

    /// Transform one page's rendered markup.
    fn on_page_content(&mut self, html: String, page: &Page) -> GateResult<String>;

    /// Cleanup after a successful build.
    fn on_post_build(&mut self) -> GateResult<()>;
}
