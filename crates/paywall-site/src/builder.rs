//! Site build driver.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use paywall_gate::{BuildConfig, BuildHooks, Files, Page};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::SiteConfig;
use crate::discover::discover_files;
use crate::error::{SiteError, SiteResult};
use crate::navigation::assemble_navigation;
use crate::render::{MarkdownRenderer, PageRenderer};
use crate::theme::{ThemeShell, TOGGLE_SCRIPT, TOGGLE_SCRIPT_PATH};

/// State after the hooks have seen the configuration and the file inventory.
#[derive(Debug, Clone)]
pub struct PreparedBuild {
    /// Configuration as rewritten by `on_config`
    pub config: BuildConfig,
    /// Inventory as rewritten by `on_files`
    pub files: Files,
}

/// One page written to the site directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenPage {
    pub src_path: String,
    pub url: String,
    pub dest_path: String,
}

/// Summary of a finished build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub site_dir: PathBuf,
    pub pages: Vec<WrittenPage>,
    pub static_files_copied: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Drives one build through the hooks in their fixed order.
pub struct SiteBuilder<R = MarkdownRenderer> {
    config: SiteConfig,
    renderer: R,
}

impl SiteBuilder<MarkdownRenderer> {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            renderer: MarkdownRenderer::new(),
        }
    }
}

impl<R: PageRenderer> SiteBuilder<R> {
    /// Swap the markup renderer.
    pub fn with_renderer<T: PageRenderer>(self, renderer: T) -> SiteBuilder<T> {
        SiteBuilder {
            config: self.config,
            renderer,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Run `on_config`, `on_pre_build`, discovery and `on_files`.
    pub fn prepare<H: BuildHooks>(&self, hooks: &mut H) -> SiteResult<PreparedBuild> {
        let config = hooks.on_config(self.config.to_build_config())?;
        debug!(docs_dir = %config.docs_dir.display(), "Configuration accepted");
        hooks.on_pre_build()?;
        let files = discover_files(&config.docs_dir, config.use_directory_urls)?;
        let files = hooks.on_files(files)?;
        Ok(PreparedBuild { config, files })
    }

    /// Full build, writing every page and static file into the site dir.
    ///
    /// Gated pages are written at their prefixed destination path. The site
    /// dir is written into, not cleared.
    pub fn build<H: BuildHooks>(&self, hooks: &mut H) -> SiteResult<BuildReport> {
        let started_at = Utc::now();
        // Parsed up front so a bad config fails before any hook runs.
        let nav_spec = self.config.nav_spec()?;
        let options = self.config.paywall_options()?;

        let PreparedBuild { config, files } = self.prepare(hooks)?;

        let nav = assemble_navigation(nav_spec.as_deref(), &files);
        let nav = hooks.on_nav(nav)?;

        let site_dir = config.site_dir.clone();
        fs::create_dir_all(&site_dir).map_err(|e| SiteError::io(&site_dir, e))?;
        let shell = ThemeShell::new(&self.config.site_name, options.show_toggle_button);

        let mut pages = Vec::new();
        for file in files.documentation_pages() {
            let markdown = fs::read_to_string(&file.abs_src_path)
                .map_err(|e| SiteError::io(&file.abs_src_path, e))?;
            let rendered = self.renderer.render(&markdown);
            let page = Page {
                file: file.clone(),
                title: rendered.title,
            };
            let content = hooks.on_page_content(rendered.html, &page)?;
            let document = shell.wrap(&page, &content, &nav);
            write_output(&site_dir.join(&file.dest_path), document.as_bytes())?;
            debug!(src = %file.src_path, dest = %file.dest_path, "Page written");
            pages.push(WrittenPage {
                src_path: file.src_path.clone(),
                url: file.url.clone(),
                dest_path: file.dest_path.clone(),
            });
        }

        let mut static_files_copied = 0;
        for file in files.static_files() {
            let target = site_dir.join(&file.dest_path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
            }
            fs::copy(&file.abs_src_path, &target).map_err(|e| SiteError::io(&target, e))?;
            static_files_copied += 1;
        }
        if shell.show_toggle_button() && files.get(TOGGLE_SCRIPT_PATH).is_none() {
            write_output(&site_dir.join(TOGGLE_SCRIPT_PATH), TOGGLE_SCRIPT.as_bytes())?;
        }

        hooks.on_post_build()?;

        let finished_at = Utc::now();
        info!(
            pages = pages.len(),
            static_files = static_files_copied,
            site_dir = %site_dir.display(),
            elapsed_ms = (finished_at - started_at).num_milliseconds(),
            "Site built"
        );
        Ok(BuildReport {
            site_dir,
            pages,
            static_files_copied,
            started_at,
            finished_at,
        })
    }
}

fn write_output(path: &Path, contents: &[u8]) -> SiteResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| SiteError::io(path, e))
}

#[cfg(test)]
mod tests {
    use paywall_gate::{GateResult, Navigation};

    use super::*;
    use crate::render::Rendered;

    /// Records hook calls without changing anything.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl BuildHooks for Recorder {
        fn on_config(&mut self, config: BuildConfig) -> GateResult<BuildConfig> {
            self.calls.push("config".into());
            Ok(config)
        }

        fn on_pre_build(&mut self) -> GateResult<()> {
            self.calls.push("pre_build".into());
            Ok(())
        }

        fn on_files(&mut self, files: Files) -> GateResult<Files> {
            self.calls.push("files".into());
            Ok(files)
        }

        fn on_nav(&mut self, nav: Navigation) -> GateResult<Navigation> {
            self.calls.push("nav".into());
            Ok(nav)
        }

        fn on_page_content(&mut self, html: String, page: &Page) -> GateResult<String> {
            self.calls.push(format!("page:{}", page.src_path()));
            Ok(html)
        }

        fn on_post_build(&mut self) -> GateResult<()> {
            self.calls.push("post_build".into());
            Ok(())
        }
    }

    struct Verbatim;

    impl PageRenderer for Verbatim {
        fn render(&self, markdown: &str) -> Rendered {
            Rendered {
                html: markdown.to_string(),
                title: None,
            }
        }
    }

    fn site(root: &Path) -> SiteConfig {
        let docs = root.join("docs");
        fs::create_dir_all(docs.join("img")).unwrap();
        fs::write(docs.join("index.md"), "# Home\n\nWelcome.").unwrap();
        fs::write(docs.join("guide.md"), "# Guide\n\nSteps.").unwrap();
        fs::write(docs.join("img/logo.png"), "png").unwrap();
        SiteConfig {
            docs_dir: docs,
            site_dir: root.join("site"),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn hooks_run_in_order() {
        let root = tempfile::tempdir().unwrap();
        let mut hooks = Recorder::default();

        let report = SiteBuilder::new(site(root.path()))
            .build(&mut hooks)
            .unwrap();

        assert_eq!(
            hooks.calls,
            vec![
                "config",
                "pre_build",
                "files",
                "nav",
                "page:guide.md",
                "page:index.md",
                "post_build"
            ]
        );
        assert_eq!(report.pages.len(), 2);
        assert_eq!(report.static_files_copied, 1);
        assert!(report.finished_at >= report.started_at);
    }

    #[test]
    fn writes_pages_and_static_files() {
        let root = tempfile::tempdir().unwrap();
        SiteBuilder::new(site(root.path()))
            .build(&mut Recorder::default())
            .unwrap();

        let site = root.path().join("site");
        let guide = fs::read_to_string(site.join("guide/index.html")).unwrap();
        assert!(guide.contains("<p>Steps.</p>"));
        assert!(guide.contains("<title>Guide - Documentation</title>"));
        assert!(site.join("index.html").is_file());
        assert!(site.join("img/logo.png").is_file());
        assert!(!site.join(TOGGLE_SCRIPT_PATH).exists());
    }

    #[test]
    fn custom_renderer_is_used() {
        let root = tempfile::tempdir().unwrap();
        SiteBuilder::new(site(root.path()))
            .with_renderer(Verbatim)
            .build(&mut Recorder::default())
            .unwrap();

        let guide = fs::read_to_string(root.path().join("site/guide/index.html")).unwrap();
        assert!(guide.contains("# Guide"));
    }

    #[test]
    fn toggle_script_written_when_enabled() {
        let root = tempfile::tempdir().unwrap();
        let mut config = site(root.path());
        config.plugins = vec![serde_yaml::from_str("paywall: {show_toggle_button: true}").unwrap()];

        SiteBuilder::new(config)
            .build(&mut Recorder::default())
            .unwrap();

        let script = fs::read_to_string(root.path().join("site").join(TOGGLE_SCRIPT_PATH)).unwrap();
        assert!(script.contains("DEBUG_SEND_PAYWALL"));
    }

    #[test]
    fn bad_nav_fails_before_hooks() {
        let root = tempfile::tempdir().unwrap();
        let mut config = site(root.path());
        config.nav = Some(serde_yaml::Value::String("index.md".into()));
        let mut hooks = Recorder::default();

        let err = SiteBuilder::new(config).build(&mut hooks).unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
        assert!(hooks.calls.is_empty());
    }
}
