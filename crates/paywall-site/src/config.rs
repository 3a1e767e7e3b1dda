//! Site configuration loaded from `mkdocs.yml`.

use std::fs;
use std::path::{Path, PathBuf};

use paywall_gate::{BuildConfig, PaywallOptions};
use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;

use crate::error::{SiteError, SiteResult};

/// Plugin names that enable the paywall in the `plugins` list.
const PLUGIN_NAMES: &[&str] = &["paywall", "mkdocs-paywall"];

/// `theme:` accepts a bare name or a mapping with a `name` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThemeSetting {
    Name(String),
    Detailed { name: String },
}

impl ThemeSetting {
    pub fn name(&self) -> &str {
        match self {
            ThemeSetting::Name(name) | ThemeSetting::Detailed { name } => name,
        }
    }
}

impl Default for ThemeSetting {
    fn default() -> Self {
        ThemeSetting::Name("mkdocs".to_string())
    }
}

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title
    pub site_name: String,

    /// Documentation source directory
    pub docs_dir: PathBuf,

    /// Output directory
    pub site_dir: PathBuf,

    /// Rendering theme
    pub theme: ThemeSetting,

    /// `guide.md` → `guide/` when set, `guide.html` otherwise
    pub use_directory_urls: bool,

    /// Explicit navigation in mkdocs syntax; auto-generated when absent
    pub nav: Option<YamlValue>,

    /// Plugin list: bare names or single-key mappings carrying options
    pub plugins: Vec<YamlValue>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "Documentation".to_string(),
            docs_dir: PathBuf::from("docs"),
            site_dir: PathBuf::from("site"),
            theme: ThemeSetting::default(),
            use_directory_urls: true,
            nav: None,
            plugins: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from file.
    ///
    /// Relative `docs_dir` and `site_dir` resolve against the file's directory.
    pub fn load(path: &Path) -> SiteResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;
        let mut config = Self::from_yaml_str(&contents).map_err(|source| SiteError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.docs_dir = base.join(&config.docs_dir);
        config.site_dir = base.join(&config.site_dir);
        Ok(config)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    /// Slice handed to the build hooks.
    pub fn to_build_config(&self) -> BuildConfig {
        BuildConfig {
            theme: self.theme.name().to_string(),
            docs_dir: self.docs_dir.clone(),
            site_dir: self.site_dir.clone(),
            use_directory_urls: self.use_directory_urls,
        }
    }

    /// Paywall plugin options from the `plugins` list; defaults when the
    /// plugin is listed bare or not at all.
    pub fn paywall_options(&self) -> SiteResult<PaywallOptions> {
        for plugin in &self.plugins {
            match plugin {
                YamlValue::Mapping(map) => {
                    for (key, value) in map {
                        let Some(name) = key.as_str() else { continue };
                        if !PLUGIN_NAMES.contains(&name) {
                            continue;
                        }
                        if value.is_null() {
                            return Ok(PaywallOptions::default());
                        }
                        return serde_yaml::from_value(value.clone()).map_err(|e| {
                            SiteError::Config(format!("invalid {name} plugin options: {e}"))
                        });
                    }
                }
                YamlValue::String(name) if PLUGIN_NAMES.contains(&name.as_str()) => {
                    return Ok(PaywallOptions::default());
                }
                _ => {}
            }
        }
        Ok(PaywallOptions::default())
    }

    /// Parsed `nav`, if configured.
    pub fn nav_spec(&self) -> SiteResult<Option<Vec<NavSpec>>> {
        self.nav.as_ref().map(NavSpec::parse_list).transpose()
    }
}

/// One entry of a configured navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavSpec {
    Page { title: Option<String>, path: String },
    Section { title: String, children: Vec<NavSpec> },
    Link { title: String, url: String },
}

impl NavSpec {
    /// Parse an mkdocs `nav` sequence.
    pub fn parse_list(node: &YamlValue) -> SiteResult<Vec<NavSpec>> {
        let YamlValue::Sequence(seq) = node else {
            return Err(SiteError::Config("`nav` must be a list".into()));
        };
        seq.iter().map(Self::parse_entry).collect()
    }

    fn parse_entry(node: &YamlValue) -> SiteResult<NavSpec> {
        match node {
            YamlValue::String(path) => Ok(Self::leaf(None, path)),
            YamlValue::Mapping(map) if map.len() == 1 => {
                let Some((key, value)) = map.iter().next() else {
                    return Err(SiteError::Config("empty nav entry".into()));
                };
                let title = key
                    .as_str()
                    .ok_or_else(|| SiteError::Config("nav titles must be strings".into()))?
                    .to_string();
                match value {
                    YamlValue::String(target) => Ok(Self::leaf(Some(title), target)),
                    YamlValue::Sequence(_) => Ok(NavSpec::Section {
                        title,
                        children: Self::parse_list(value)?,
                    }),
                    _ => Err(SiteError::Config(format!(
                        "nav entry {title:?} must map to a path or a list"
                    ))),
                }
            }
            _ => Err(SiteError::Config(
                "nav entries must be a path or a single-key mapping".into(),
            )),
        }
    }

    fn leaf(title: Option<String>, target: &str) -> NavSpec {
        if target.contains("://") {
            NavSpec::Link {
                title: title.unwrap_or_else(|| target.to_string()),
                url: target.to_string(),
            }
        } else {
            NavSpec::Page {
                title,
                path: target.trim_start_matches("./").to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
site_name: Dokknet Example
theme:
  name: material
  palette: indigo
nav:
  - Home: index.md
  - Guides:
      - guides/setup.md
      - Deploy: guides/deploy.md
  - GitHub: https://github.com/dokknet
plugins:
  - search
  - paywall:
      show_toggle_button: true
"#;

    #[test]
    fn parses_mkdocs_sample() {
        let config = SiteConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.site_name, "Dokknet Example");
        assert_eq!(config.theme.name(), "material");
        assert_eq!(config.docs_dir, PathBuf::from("docs"));
        assert!(config.use_directory_urls);
        assert!(config.paywall_options().unwrap().show_toggle_button);
    }

    #[test]
    fn theme_may_be_a_bare_name() {
        let config = SiteConfig::from_yaml_str("theme: readthedocs").unwrap();
        assert_eq!(config.to_build_config().theme, "readthedocs");
    }

    #[test]
    fn bare_plugin_name_uses_default_options() {
        let config = SiteConfig::from_yaml_str("plugins: [search, paywall]").unwrap();
        assert!(!config.paywall_options().unwrap().show_toggle_button);
    }

    #[test]
    fn invalid_plugin_options_are_reported() {
        let config =
            SiteConfig::from_yaml_str("plugins:\n  - paywall:\n      show_toggle_button: maybe\n")
                .unwrap();
        assert!(matches!(config.paywall_options(), Err(SiteError::Config(_))));
    }

    #[test]
    fn nav_spec_handles_pages_sections_and_links() {
        let config = SiteConfig::from_yaml_str(SAMPLE).unwrap();
        let nav = config.nav_spec().unwrap().unwrap();
        assert_eq!(
            nav,
            vec![
                NavSpec::Page {
                    title: Some("Home".into()),
                    path: "index.md".into()
                },
                NavSpec::Section {
                    title: "Guides".into(),
                    children: vec![
                        NavSpec::Page {
                            title: None,
                            path: "guides/setup.md".into()
                        },
                        NavSpec::Page {
                            title: Some("Deploy".into()),
                            path: "guides/deploy.md".into()
                        },
                    ],
                },
                NavSpec::Link {
                    title: "GitHub".into(),
                    url: "https://github.com/dokknet".into()
                },
            ]
        );
    }

    #[test]
    fn nav_must_be_a_list() {
        let config = SiteConfig::from_yaml_str("nav: index.md").unwrap();
        assert!(config.nav_spec().is_err());
    }

    #[test]
    fn load_resolves_dirs_against_config_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mkdocs.yml");
        fs::write(&path, "site_name: X\ntheme: material\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.docs_dir, dir.path().join("docs"));
        assert_eq!(config.site_dir, dir.path().join("site"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = SiteConfig::load(Path::new("/nonexistent/mkdocs.yml")).unwrap_err();
        assert!(matches!(err, SiteError::Io { .. }));
    }
}
