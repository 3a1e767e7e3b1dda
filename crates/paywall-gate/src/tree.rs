//! Recursive directory copy.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use crate::error::{GateError, GateResult};

/// Copy the directory tree at `from` to `to`, returning the number of files copied.
///
/// `to` must not exist yet; an existing destination is never merged into.
/// Symlinks are followed and their targets copied as regular files.
pub fn copy_tree(from: &Path, to: &Path) -> GateResult<usize> {
    if !from.is_dir() {
        return Err(GateError::SourceMissing(from.to_path_buf()));
    }
    if to.exists() {
        return Err(GateError::DestinationExists(to.to_path_buf()));
    }

    let from_abs = fs::canonicalize(from).map_err(|e| GateError::io(from, e))?;
    let to_abs = absolute_destination(to)?;
    if to_abs.starts_with(&from_abs) {
        return Err(GateError::DestinationInsideSource {
            from: from_abs,
            to: to_abs,
        });
    }

    let mut copied = 0;
    for entry in WalkDir::new(&from_abs).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(&from_abs) else {
            continue;
        };
        let target = to.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| GateError::io(&target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| GateError::io(&target, e))?;
            trace!(src = %entry.path().display(), dest = %target.display(), "Copied file");
            copied += 1;
        }
    }

    Ok(copied)
}

// Creates the parent so it can be canonicalized; `to` itself stays absent.
fn absolute_destination(to: &Path) -> GateResult<PathBuf> {
    let name = to
        .file_name()
        .ok_or_else(|| GateError::DestinationExists(to.to_path_buf()))?;
    let parent = match to.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| GateError::io(&parent, e))?;
    let parent = fs::canonicalize(&parent).map_err(|e| GateError::io(&parent, e))?;
    Ok(parent.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn copies_nested_tree() {
        let src = tempfile::tempdir().unwrap();
        write(src.path(), "index.md", "# Home");
        write(src.path(), "guide/setup.md", "# Setup");
        write(src.path(), "img/logo.png", "png");
        let dest = tempfile::tempdir().unwrap();
        let to = dest.path().join("docs");

        let copied = copy_tree(src.path(), &to).unwrap();

        assert_eq!(copied, 3);
        assert_eq!(fs::read_to_string(to.join("guide/setup.md")).unwrap(), "# Setup");
        assert!(to.join("img/logo.png").is_file());
    }

    #[test]
    fn empty_directories_are_kept() {
        let src = tempfile::tempdir().unwrap();
        fs::create_dir_all(src.path().join("drafts")).unwrap();
        let dest = tempfile::tempdir().unwrap();
        let to = dest.path().join("docs");

        assert_eq!(copy_tree(src.path(), &to).unwrap(), 0);
        assert!(to.join("drafts").is_dir());
    }

    #[test]
    fn missing_source_fails() {
        let dest = tempfile::tempdir().unwrap();
        let err = copy_tree(&dest.path().join("nope"), &dest.path().join("out")).unwrap_err();
        assert!(matches!(err, GateError::SourceMissing(_)));
    }

    #[test]
    fn existing_destination_is_not_merged() {
        let src = tempfile::tempdir().unwrap();
        write(src.path(), "index.md", "# Home");
        let dest = tempfile::tempdir().unwrap();

        let err = copy_tree(src.path(), dest.path()).unwrap_err();
        assert!(matches!(err, GateError::DestinationExists(_)));
    }

    #[test]
    fn destination_inside_source_is_rejected() {
        let src = tempfile::tempdir().unwrap();
        write(src.path(), "index.md", "# Home");

        let err = copy_tree(src.path(), &src.path().join("mirror")).unwrap_err();
        assert!(matches!(err, GateError::DestinationInsideSource { .. }));
    }
}
