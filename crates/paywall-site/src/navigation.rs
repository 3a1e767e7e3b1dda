//! Navigation assembly, from the configured `nav` or the directory tree.

use std::collections::BTreeMap;

use paywall_gate::{DocFile, Files, NavItem, NavLink, NavPage, NavSection, Navigation};
use tracing::{debug, warn};

use crate::config::NavSpec;

/// Assemble the navigation for a build.
///
/// A configured nav is followed as written; entries pointing at files that
/// were not discovered are skipped with a warning. Without one, the nav
/// mirrors the docs tree: index page first, then pages, then one section per
/// subdirectory. The flat page list is the depth-first reading order.
pub fn assemble_navigation(configured: Option<&[NavSpec]>, files: &Files) -> Navigation {
    let items = match configured {
        Some(entries) => from_nav_spec(entries, files),
        None => auto_items(files),
    };
    let mut pages = Vec::new();
    collect_pages(&items, &mut pages);
    debug!(items = items.len(), pages = pages.len(), "Navigation assembled");
    Navigation::new(items, pages)
}

fn from_nav_spec(entries: &[NavSpec], files: &Files) -> Vec<NavItem> {
    entries
        .iter()
        .filter_map(|entry| match entry {
            NavSpec::Page { title, path } => match files.get(path) {
                Some(file) => Some(NavItem::Page(NavPage::new(
                    title.clone(),
                    &file.src_path,
                    &file.url,
                ))),
                None => {
                    warn!(path = %path, "Nav entry references a missing file");
                    None
                }
            },
            NavSpec::Section { title, children } => Some(NavItem::Section(NavSection {
                title: title.clone(),
                children: from_nav_spec(children, files),
            })),
            NavSpec::Link { title, url } => Some(NavItem::Link(NavLink {
                title: title.clone(),
                url: url.clone(),
            })),
        })
        .collect()
}

#[derive(Default)]
struct DirNode<'a> {
    index: Option<&'a DocFile>,
    pages: Vec<&'a DocFile>,
    dirs: BTreeMap<&'a str, DirNode<'a>>,
}

fn auto_items(files: &Files) -> Vec<NavItem> {
    let mut root = DirNode::default();
    for file in files.documentation_pages() {
        let mut node = &mut root;
        let mut segments: Vec<&str> = file.src_path.split('/').collect();
        let name = segments.pop().unwrap_or_default();
        for segment in segments {
            node = node.dirs.entry(segment).or_default();
        }
        if is_index_name(name) && node.index.is_none() {
            node.index = Some(file);
        } else {
            node.pages.push(file);
        }
    }
    node_items(&root, None)
}

fn node_items(node: &DirNode<'_>, section_title: Option<&str>) -> Vec<NavItem> {
    let mut items = Vec::new();
    if let Some(index) = node.index {
        let title = section_title.unwrap_or("Home");
        items.push(NavItem::Page(NavPage::new(
            Some(title.to_string()),
            &index.src_path,
            &index.url,
        )));
    }
    for file in &node.pages {
        items.push(NavItem::Page(NavPage::new(
            Some(title_case(file_stem(&file.src_path))),
            &file.src_path,
            &file.url,
        )));
    }
    for (name, child) in &node.dirs {
        let title = title_case(name);
        items.push(NavItem::Section(NavSection {
            children: node_items(child, Some(&title)),
            title,
        }));
    }
    items
}

fn collect_pages(items: &[NavItem], out: &mut Vec<NavPage>) {
    for item in items {
        match item {
            NavItem::Page(page) => out.push(page.clone()),
            NavItem::Section(section) => collect_pages(&section.children, out),
            NavItem::Link(_) => {}
        }
    }
}

fn is_index_name(name: &str) -> bool {
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    stem == "index" || stem.eq_ignore_ascii_case("readme")
}

fn file_stem(src_path: &str) -> &str {
    let name = src_path.rsplit('/').next().unwrap_or(src_path);
    name.rsplit_once('.').map_or(name, |(stem, _)| stem)
}

/// `getting-started` → `Getting Started`
fn title_case(name: &str) -> String {
    name.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
