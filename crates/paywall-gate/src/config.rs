//! Gate and build configuration.
//!
//! [`GateConfig`] holds the construction-time constants of one transform.
//! [`BuildConfig`] is the slice of host configuration the hooks read and rewrite.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{GateError, GateResult};

/// Reserved directory name under which the gated mirror lives.
pub const DEFAULT_GATED_PREFIX: &str = "paywall";

/// Prefix of the per-build scratch directory name.
pub const DEFAULT_SCRATCH_PREFIX: &str = "mkdocs-paywall-plugin-";

/// Themes whose rendered markup the clipper knows how to cut.
pub const SUPPORTED_THEMES: &[&str] = &["material"];

/// Construction-time configuration for a [`GateTransform`](crate::GateTransform).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GateConfig {
    /// Directory name of the gated mirror (default: `paywall`)
    pub gated_prefix: String,
    /// Theme allow-list (default: [`SUPPORTED_THEMES`])
    pub supported_themes: Vec<String>,
    /// Scratch directory name prefix (default: [`DEFAULT_SCRATCH_PREFIX`])
    pub scratch_prefix: String,
    /// Where scratch directories are created; `None` means the system temp dir
    pub scratch_parent: Option<PathBuf>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            gated_prefix: DEFAULT_GATED_PREFIX.to_string(),
            supported_themes: SUPPORTED_THEMES.iter().map(|t| t.to_string()).collect(),
            scratch_prefix: DEFAULT_SCRATCH_PREFIX.to_string(),
            scratch_parent: None,
        }
    }
}

impl GateConfig {
    /// Override the scratch parent directory.
    pub fn with_scratch_parent(mut self, parent: impl Into<PathBuf>) -> Self {
        self.scratch_parent = Some(parent.into());
        self
    }

    /// Override the theme allow-list.
    pub fn with_supported_themes<I, S>(mut self, themes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_themes = themes.into_iter().map(Into::into).collect();
        self
    }

    /// Check that the gated prefix is one plain path segment.
    pub fn validate(&self) -> GateResult<()> {
        let prefix = self.gated_prefix.as_str();
        let plain = !prefix.is_empty()
            && prefix != "."
            && prefix != ".."
            && !prefix.contains(['/', '\\']);
        if plain {
            Ok(())
        } else {
            Err(GateError::InvalidPrefix(prefix.to_string()))
        }
    }

    pub fn is_supported_theme(&self, theme: &str) -> bool {
        self.supported_themes.iter().any(|t| t == theme)
    }
}

/// Build configuration as seen by the hooks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Selected rendering theme name
    pub theme: String,
    /// Documentation source root; rewritten to the scratch root by `on_config`
    pub docs_dir: PathBuf,
    /// Output directory of the rendered site
    pub site_dir: PathBuf,
    /// mkdocs-style directory URLs (`guide.md` → `guide/`)
    pub use_directory_urls: bool,
}

impl BuildConfig {
    pub fn new(theme: impl Into<String>, docs_dir: impl Into<PathBuf>) -> Self {
        Self {
            theme: theme.into(),
            docs_dir: docs_dir.into(),
            site_dir: PathBuf::from("site"),
            use_directory_urls: true,
        }
    }
}

/// Plugin options supplied through the host config.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaywallOptions {
    /// Show the paywall debug toggle in the rendered theme.
    ///
    /// Carried through the transform but only consumed by the host theme.
    pub show_toggle_button: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_paywall_prefix_and_material() {
        let config = GateConfig::default();
        assert_eq!(config.gated_prefix, "paywall");
        assert!(config.is_supported_theme("material"));
        assert!(!config.is_supported_theme("mkdocs"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_prefix_is_rejected() {
        let config = GateConfig {
            gated_prefix: "gated/deep".into(),
            ..GateConfig::default()
        };
        assert!(matches!(config.validate(), Err(GateError::InvalidPrefix(_))));
    }

    #[test]
    fn empty_and_dot_prefixes_are_rejected() {
        for prefix in ["", ".", ".."] {
            let config = GateConfig {
                gated_prefix: prefix.into(),
                ..GateConfig::default()
            };
            assert!(config.validate().is_err(), "prefix {prefix:?} accepted");
        }
    }

    #[test]
    fn options_default_hides_toggle() {
        let opts: PaywallOptions = serde_json::from_str("{}").unwrap();
        assert!(!opts.show_toggle_button);
    }
}
