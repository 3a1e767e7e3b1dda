use tracing::debug;

use crate::nav::{filter_navigation, Navigation};

/// Stage 4: Navigation Filter
///
/// Keeps the menu visitor-facing: no gated entry survives at any depth.
pub struct NavigationFilter {
    gated_prefix: String,
}

impl NavigationFilter {
    pub fn new(gated_prefix: impl Into<String>) -> Self {
        Self {
            gated_prefix: gated_prefix.into(),
        }
    }

    /// Returns a freshly built navigation and the number of removed entries.
    pub fn filter(&self, nav: &Navigation) -> (Navigation, usize) {
        let (filtered, removed) = filter_navigation(nav, &self.gated_prefix);
        debug!(
            before = nav.item_count(),
            after = filtered.item_count(),
            removed,
            "Filtered navigation"
        );
        (filtered, removed)
    }
}
