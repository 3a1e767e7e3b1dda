//! Host adapter for the paywall Gate Transform.
//!
//! A deliberately small static documentation build: it loads an
//! `mkdocs.yml`-style configuration, discovers files, assembles navigation,
//! renders a markdown subset and writes the site. Its only job beyond that is
//! to call [`BuildHooks`](paywall_gate::BuildHooks) in the documented order:
//!
//! ```text
//! on_config → on_pre_build → discover → on_files → assemble nav → on_nav
//!   → (render → on_page_content → write) per page → copy static → on_post_build
//! ```
//!
//! Gated pages keep their prefixed destination path, so the site holds
//! `guide/index.html` and `paywall/guide/index.html`, while links inside both
//! are computed from the shared public URL. The edge picks the variant by
//! path prefix.

pub mod builder;
pub mod config;
pub mod discover;
pub mod error;
pub mod navigation;
pub mod render;
pub mod theme;

pub use builder::{BuildReport, PreparedBuild, SiteBuilder, WrittenPage};
pub use config::{NavSpec, SiteConfig, ThemeSetting};
pub use discover::{discover_files, page_locations};
pub use error::{SiteError, SiteResult};
pub use navigation::assemble_navigation;
pub use render::{MarkdownRenderer, PageRenderer, Rendered};
pub use theme::{ThemeShell, TOGGLE_ELEMENT_ID, TOGGLE_SCRIPT_PATH};
