use tracing::debug;

use crate::files::{strip_gated_prefix, Files};

/// Stage 3: URL Normalizer
///
/// Gives every gated documentation page the URL of its original counterpart.
/// Only URLs change; source and destination paths keep the prefix so later
/// stages and the edge can still tell the variants apart. The resulting URL
/// collisions are intentional.
pub struct UrlNormalizer {
    gated_prefix: String,
}

impl UrlNormalizer {
    pub fn new(gated_prefix: impl Into<String>) -> Self {
        Self {
            gated_prefix: gated_prefix.into(),
        }
    }

    /// Returns the rewritten inventory and the number of pages touched.
    pub fn normalize(&self, mut files: Files) -> (Files, usize) {
        let mut rewritten = 0;
        for file in files.documentation_pages_mut() {
            if !file.is_gated(&self.gated_prefix) {
                continue;
            }
            let url = strip_gated_prefix(&file.url, &self.gated_prefix);
            debug!(src = %file.src_path, from = %file.url, to = %url, "Normalized gated URL");
            file.url = url;
            rewritten += 1;
        }
        (files, rewritten)
    }
}
