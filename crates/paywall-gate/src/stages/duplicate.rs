use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::context::GateContext;
use crate::error::{GateError, GateResult};
use crate::files::is_markdown_path;
use crate::tree::copy_tree;

/// Stage 2: Tree Duplicator
///
/// Copies the original docs into the scratch docs root, then a second time
/// under `<scratch docs>/<prefix>`. Must run before the host reads any file.
pub struct TreeDuplicator {
    gated_prefix: String,
}

impl TreeDuplicator {
    pub fn new(gated_prefix: impl Into<String>) -> Self {
        Self {
            gated_prefix: gated_prefix.into(),
        }
    }

    /// Returns the number of files in one copy of the tree.
    pub fn duplicate(&self, context: &GateContext) -> GateResult<usize> {
        let source = context.source_docs_dir()?;
        let scratch_docs = context.scratch_docs_dir()?;

        if !source.is_dir() {
            return Err(GateError::SourceMissing(source.to_path_buf()));
        }
        if let Some(collision) = self.prefix_collision(source)? {
            return Err(GateError::GatedPrefixCollision(collision));
        }

        let copied = copy_tree(source, scratch_docs)?;
        let mirror = scratch_docs.join(&self.gated_prefix);
        let mirrored = copy_tree(source, &mirror)?;
        debug_assert_eq!(copied, mirrored);

        info!(
            files = copied,
            source = %source.display(),
            mirror = %mirror.display(),
            "Docs duplicated into gated mirror"
        );
        Ok(copied)
    }

    /// A top-level entry named like the prefix, or a page such as
    /// `paywall.md` whose public URL would land on the mirror's index.
    fn prefix_collision(&self, source: &Path) -> GateResult<Option<PathBuf>> {
        let entry = source.join(&self.gated_prefix);
        if entry.symlink_metadata().is_ok() {
            return Ok(Some(entry));
        }
        for entry in fs::read_dir(source).map_err(|e| GateError::io(source, e))? {
            let entry = entry.map_err(|e| GateError::io(source, e))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
            if stem == self.gated_prefix && is_markdown_path(name) {
                return Ok(Some(entry.path()));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::config::{BuildConfig, GateConfig, PaywallOptions};
    use crate::stages::ConfigInterceptor;

    fn configured(source: &Path, scratch_parent: &Path) -> GateContext {
        let mut ctx = GateContext::new(PaywallOptions::default());
        ConfigInterceptor::new(&GateConfig::default().with_scratch_parent(scratch_parent))
            .intercept(&mut ctx, BuildConfig::new("material", source))
            .unwrap();
        ctx
    }

    #[test]
    fn produces_plain_and_gated_copies() {
        let source = tempfile::tempdir().unwrap();
        fs::write(source.path().join("index.md"), "# Home").unwrap();
        fs::write(source.path().join("guide.md"), "# Guide").unwrap();
        let parent = tempfile::tempdir().unwrap();
        let ctx = configured(source.path(), parent.path());

        let copied = TreeDuplicator::new("paywall").duplicate(&ctx).unwrap();

        let docs = ctx.scratch_docs_dir().unwrap();
        assert_eq!(copied, 2);
        for rel in ["index.md", "guide.md", "paywall/index.md", "paywall/guide.md"] {
            assert!(docs.join(rel).is_file(), "missing {rel}");
        }
        assert!(!docs.join("paywall/paywall").exists());
    }

    #[test]
    fn existing_prefix_directory_is_a_collision() {
        let source = tempfile::tempdir().unwrap();
        fs::create_dir_all(source.path().join("paywall")).unwrap();
        fs::write(source.path().join("paywall/secret.md"), "# Secret").unwrap();
        let parent = tempfile::tempdir().unwrap();
        let ctx = configured(source.path(), parent.path());

        let err = TreeDuplicator::new("paywall").duplicate(&ctx).unwrap_err();
        assert!(matches!(err, GateError::GatedPrefixCollision(_)));
        assert!(!ctx.scratch_docs_dir().unwrap().exists());
    }

    #[test]
    fn page_named_like_prefix_is_a_collision() {
        for name in ["paywall.md", "paywall.markdown"] {
            let source = tempfile::tempdir().unwrap();
            fs::write(source.path().join("index.md"), "# Home").unwrap();
            fs::write(source.path().join(name), "# Pricing").unwrap();
            let parent = tempfile::tempdir().unwrap();
            let ctx = configured(source.path(), parent.path());

            let err = TreeDuplicator::new("paywall").duplicate(&ctx).unwrap_err();
            match err {
                GateError::GatedPrefixCollision(path) => {
                    assert_eq!(path, source.path().join(name));
                }
                other => panic!("unexpected error for {name}: {other}"),
            }
            assert!(!ctx.scratch_docs_dir().unwrap().exists());
        }
    }

    #[test]
    fn similar_names_are_not_collisions() {
        let source = tempfile::tempdir().unwrap();
        fs::write(source.path().join("paywalled.md"), "# Close").unwrap();
        fs::write(source.path().join("paywall.png"), "png").unwrap();
        fs::create_dir_all(source.path().join("guides")).unwrap();
        fs::write(source.path().join("guides/paywall.md"), "# Nested").unwrap();
        let parent = tempfile::tempdir().unwrap();
        let ctx = configured(source.path(), parent.path());

        let copied = TreeDuplicator::new("paywall").duplicate(&ctx).unwrap();
        assert_eq!(copied, 3);
    }

    #[test]
    fn missing_source_fails_loudly() {
        let parent = tempfile::tempdir().unwrap();
        let ctx = configured(&parent.path().join("no-docs"), parent.path());

        let err = TreeDuplicator::new("paywall").duplicate(&ctx).unwrap_err();
        assert!(matches!(err, GateError::SourceMissing(_)));
    }

    #[test]
    fn unconfigured_context_is_rejected() {
        let ctx = GateContext::new(PaywallOptions::default());
        let err = TreeDuplicator::new("paywall").duplicate(&ctx).unwrap_err();
        assert!(matches!(err, GateError::NotConfigured));
    }
}
