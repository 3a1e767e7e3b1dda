use tracing::{debug, warn};

use crate::clip::{clip_html, Clipped};
use crate::files::{is_gated_path, Page};

/// Stage 5: Content Clipper
///
/// Gated pages are cut after their first paragraph and get the paywall
/// notice appended. Everything else passes through byte for byte. Holds no
/// cross-page state, so pages may be clipped in any order.
pub struct ContentClipper {
    gated_prefix: String,
}

impl ContentClipper {
    pub fn new(gated_prefix: impl Into<String>) -> Self {
        Self {
            gated_prefix: gated_prefix.into(),
        }
    }

    /// `None` for pages outside the gated mirror.
    pub fn clip(&self, html: &str, page: &Page) -> Option<Clipped> {
        if !is_gated_path(page.src_path(), &self.gated_prefix) {
            return None;
        }
        let clipped = clip_html(html);
        if clipped.truncated {
            debug!(src = %page.src_path(), "Clipped gated page");
        } else {
            warn!(
                src = %page.src_path(),
                "No paragraph boundary in gated page, notice appended to full content"
            );
        }
        Some(clipped)
    }
}
