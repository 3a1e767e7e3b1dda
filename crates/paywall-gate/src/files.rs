//! File inventory types.
//!
//! Source and destination paths use `/` separators regardless of platform,
//! matching the host's inventory.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkdn", "mkd"];

/// Does the file name carry a markdown extension?
pub fn is_markdown_path(path: &str) -> bool {
    path.rsplit_once('.')
        .map(|(_, ext)| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Does `src_path` lie under the gated prefix directory?
///
/// Compared by whole path segment, so `paywalled.md` is not gated.
pub fn is_gated_path(src_path: &str, prefix: &str) -> bool {
    match src_path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Remove the leading gated prefix segment from a public URL.
///
/// `paywall/guide/` becomes `guide/`, `paywall/` becomes the empty (root)
/// URL. URLs outside the prefix come back unchanged. A leading `/` is kept.
pub fn strip_gated_prefix(url: &str, prefix: &str) -> String {
    let (lead, body) = match url.strip_prefix('/') {
        Some(body) => ("/", body),
        None => ("", url),
    };
    match body.strip_prefix(prefix) {
        Some("") => lead.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{}{}", lead, &rest[1..]),
        _ => url.to_string(),
    }
}

/// One file discovered in the documentation source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocFile {
    /// Path relative to the docs root (stable, never rewritten)
    pub src_path: String,
    /// Output path relative to the site dir
    pub dest_path: String,
    /// Public URL relative to the site root (rewritten for gated pages)
    pub url: String,
    /// Absolute path of the source file
    pub abs_src_path: PathBuf,
}

impl DocFile {
    /// Is this a renderable markdown page rather than a static asset?
    pub fn is_documentation_page(&self) -> bool {
        is_markdown_path(&self.src_path)
    }

    pub fn is_gated(&self, prefix: &str) -> bool {
        is_gated_path(&self.src_path, prefix)
    }
}

/// Ordered file inventory produced by discovery.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Files {
    files: Vec<DocFile>,
}

impl Files {
    pub fn new(files: Vec<DocFile>) -> Self {
        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocFile> {
        self.files.iter()
    }

    /// Markdown pages only.
    pub fn documentation_pages(&self) -> impl Iterator<Item = &DocFile> {
        self.files.iter().filter(|f| f.is_documentation_page())
    }

    pub fn documentation_pages_mut(&mut self) -> impl Iterator<Item = &mut DocFile> {
        self.files.iter_mut().filter(|f| f.is_documentation_page())
    }

    /// Non-markdown files copied verbatim into the site.
    pub fn static_files(&self) -> impl Iterator<Item = &DocFile> {
        self.files.iter().filter(|f| !f.is_documentation_page())
    }

    pub fn get(&self, src_path: &str) -> Option<&DocFile> {
        self.files.iter().find(|f| f.src_path == src_path)
    }
}

impl FromIterator<DocFile> for Files {
    fn from_iter<T: IntoIterator<Item = DocFile>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A page being rendered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub file: DocFile,
    /// Title from the nav or the first heading, if known
    pub title: Option<String>,
}

impl Page {
    pub fn new(file: DocFile) -> Self {
        Self { file, title: None }
    }

    pub fn src_path(&self) -> &str {
        &self.file.src_path
    }

    pub fn url(&self) -> &str {
        &self.file.url
    }
}
