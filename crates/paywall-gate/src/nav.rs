//! Navigation model and the gated-entry filter.

use serde::{Deserialize, Serialize};

use crate::files::is_gated_path;

/// A page reference in the navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavPage {
    /// Explicit title, if the nav or the page provides one
    pub title: Option<String>,
    pub src_path: String,
    pub url: String,
}

impl NavPage {
    pub fn new(title: Option<String>, src_path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title,
            src_path: src_path.into(),
            url: url.into(),
        }
    }

    /// Explicit title if set, else the source path.
    pub fn derived_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.src_path)
    }
}

/// A named group of child items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    pub title: String,
    pub children: Vec<NavItem>,
}

/// An external link in the navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub title: String,
    pub url: String,
}

/// One node of the menu tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavItem {
    Page(NavPage),
    Section(NavSection),
    Link(NavLink),
}

impl NavItem {
    pub fn title(&self) -> &str {
        match self {
            NavItem::Page(page) => page.derived_title(),
            NavItem::Section(section) => &section.title,
            NavItem::Link(link) => &link.title,
        }
    }
}

/// Assembled navigation: the menu tree plus the flat page list in reading order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub items: Vec<NavItem>,
    pub pages: Vec<NavPage>,
}

impl Navigation {
    pub fn new(items: Vec<NavItem>, pages: Vec<NavPage>) -> Self {
        Self { items, pages }
    }

    /// Total number of items in the tree, sections included.
    pub fn item_count(&self) -> usize {
        fn count(items: &[NavItem]) -> usize {
            items
                .iter()
                .map(|item| match item {
                    NavItem::Section(section) => 1 + count(&section.children),
                    _ => 1,
                })
                .sum()
        }
        count(&self.items)
    }
}

/// Should this item be removed from the visitor-facing navigation?
///
/// Gated when it references a page under the prefix, or when its derived
/// title starts with the prefix (case-insensitive). The title check catches
/// sections generated from the gated directory, which carry no page.
pub fn is_gated_item(item: &NavItem, prefix: &str) -> bool {
    let page_gated = matches!(item, NavItem::Page(page) if is_gated_path(&page.src_path, prefix));
    page_gated || title_starts_with(item.title(), prefix)
}

fn title_starts_with(title: &str, prefix: &str) -> bool {
    title.to_lowercase().starts_with(&prefix.to_lowercase())
}

/// Build a new navigation with every gated entry removed at every depth.
///
/// Order and nesting of surviving entries are preserved. The input is not
/// touched. Returns the filtered navigation and the number of removed entries.
pub fn filter_navigation(nav: &Navigation, prefix: &str) -> (Navigation, usize) {
    let mut removed = 0;
    let items = filter_items(&nav.items, prefix, &mut removed);
    let pages: Vec<NavPage> = nav
        .pages
        .iter()
        .filter(|page| !is_gated_path(&page.src_path, prefix))
        .cloned()
        .collect();
    removed += nav.pages.len() - pages.len();
    (Navigation::new(items, pages), removed)
}

fn filter_items(items: &[NavItem], prefix: &str, removed: &mut usize) -> Vec<NavItem> {
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        if is_gated_item(item, prefix) {
            *removed += 1;
            continue;
        }
        match item {
            NavItem::Section(section) => kept.push(NavItem::Section(NavSection {
                title: section.title.clone(),
                children: filter_items(&section.children, prefix, removed),
            })),
            other => kept.push(other.clone()),
        }
    }
    kept
}
