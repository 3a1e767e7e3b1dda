//! Gate Transform: build-time duplication and content gating for documentation sites.
//!
//! A subset of pages is shown truncated to unauthenticated visitors while the
//! full page stays available behind a distinct path prefix. This crate prepares
//! both static variants; deciding which one a visitor receives happens at the edge.
//!
//! ## Invariants
//!
//! - For every original page `P` there is exactly one gated page `G` with
//!   `G.src_path == "<prefix>/" + P.src_path` and, after normalization,
//!   `G.url == P.url`.
//! - Source paths are never rewritten; only public URLs are.
//! - Non-gated pages pass through the clipper untouched.
//! - The filtered navigation contains no gated entry at any depth and keeps
//!   the order and nesting of everything else.
//!
//! ## Hook Sequence
//!
//! 1. **Config Interceptor**: theme allow-list check, docs dir redirected to scratch
//! 2. **Tree Duplicator**: docs copied twice into scratch (plain and under the prefix)
//! 3. **URL Normalizer**: gated URLs stripped of the prefix segment
//! 4. **Navigation Filter**: gated entries removed from the menu tree
//! 5. **Content Clipper**: gated pages cut after the first paragraph, notice appended
//! 6. **Scratch Cleaner**: scratch dir removed after a successful build
//!
//! The host drives these through [`BuildHooks`]; [`GateTransform`] carries the
//! per-build state in an explicit [`GateContext`] and rejects hooks invoked
//! out of order.

pub mod clip;
pub mod config;
pub mod context;
pub mod error;
pub mod files;
pub mod gate;
pub mod nav;
pub mod stages;
pub mod traits;
pub mod tree;

pub use clip::{clip_html, Clipped, PARAGRAPH_CLOSE, PAYWALL_NOTICE};
pub use config::{
    BuildConfig, GateConfig, PaywallOptions, DEFAULT_GATED_PREFIX, DEFAULT_SCRATCH_PREFIX,
    SUPPORTED_THEMES,
};
pub use context::{GateContext, GateStats, Phase};
pub use error::{GateError, GateResult};
pub use files::{is_gated_path, is_markdown_path, strip_gated_prefix, DocFile, Files, Page};
pub use gate::GateTransform;
pub use nav::{filter_navigation, is_gated_item, NavItem, NavLink, NavPage, NavSection, Navigation};
pub use stages::{
    ConfigInterceptor, ContentClipper, NavigationFilter, ScratchCleaner, TreeDuplicator,
    UrlNormalizer,
};
pub use traits::BuildHooks;
pub use tree::copy_tree;
