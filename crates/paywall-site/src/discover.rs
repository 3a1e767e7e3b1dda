//! File discovery under the docs directory.

use std::path::Path;

use paywall_gate::{DocFile, Files};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::{SiteError, SiteResult};

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkdn", "mkd"];

/// Destination path and public URL for a source path.
///
/// Markdown pages become HTML: `index.md` and `README.md` stand for their
/// directory, and with directory URLs every other page gets its own folder
/// (`a/b.md` → `a/b/index.html`, URL `a/b/`). Static files keep their path.
pub fn page_locations(src_path: &str, use_directory_urls: bool) -> (String, String) {
    let Some(stem) = markdown_stem(src_path) else {
        return (src_path.to_string(), src_path.to_string());
    };

    let (dir, name) = match stem.rsplit_once('/') {
        Some((dir, name)) => (format!("{dir}/"), name),
        None => (String::new(), stem),
    };
    let is_index = name == "index" || name.eq_ignore_ascii_case("readme");

    if is_index {
        let dest = format!("{dir}index.html");
        let url = if use_directory_urls { dir } else { dest.clone() };
        (dest, url)
    } else if use_directory_urls {
        let url = format!("{dir}{name}/");
        (format!("{url}index.html"), url)
    } else {
        let dest = format!("{dir}{name}.html");
        (dest.clone(), dest)
    }
}

fn markdown_stem(src_path: &str) -> Option<&str> {
    let (stem, ext) = src_path.rsplit_once('.')?;
    MARKDOWN_EXTENSIONS
        .iter()
        .any(|known| ext.eq_ignore_ascii_case(known))
        .then_some(stem)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

/// Walk `docs_dir` and build the file inventory, sorted by source path.
///
/// Hidden files and directories are skipped.
pub fn discover_files(docs_dir: &Path, use_directory_urls: bool) -> SiteResult<Files> {
    if !docs_dir.is_dir() {
        return Err(SiteError::Config(format!(
            "docs directory {} does not exist",
            docs_dir.display()
        )));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(docs_dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(docs_dir) else {
            continue;
        };
        let src_path = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let (dest_path, url) = page_locations(&src_path, use_directory_urls);
        files.push(DocFile {
            src_path,
            dest_path,
            url,
            abs_src_path: entry.path().to_path_buf(),
        });
    }
    files.sort_by(|a, b| a.src_path.cmp(&b.src_path));

    debug!(count = files.len(), docs_dir = %docs_dir.display(), "Discovered files");
    Ok(Files::new(files))
}
