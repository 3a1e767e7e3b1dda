use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::TempDir;

use crate::config::PaywallOptions;
use crate::error::{GateError, GateResult};

/// Lifecycle phase of one build invocation.
///
/// Phases only move forward. Each hook is legal in a fixed set of phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Created,
    Configured,
    Duplicated,
    FilesNormalized,
    NavFiltered,
    Rendering,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Created => "created",
            Phase::Configured => "configured",
            Phase::Duplicated => "duplicated",
            Phase::FilesNormalized => "files_normalized",
            Phase::NavFiltered => "nav_filtered",
            Phase::Rendering => "rendering",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Counters accumulated over one build.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateStats {
    /// Files copied per tree copy
    pub files_duplicated: usize,
    /// Documentation pages whose URL was normalized
    pub pages_gated: usize,
    /// Gated pages cut at a paragraph boundary
    pub pages_clipped: usize,
    /// Gated pages with no paragraph boundary (notice appended to full content)
    pub clip_fallbacks: usize,
    /// Navigation entries removed (tree items plus flat page list)
    pub nav_entries_removed: usize,
}

/// Explicit per-build state passed through the hook sequence.
///
/// Owns the scratch directory for the lifetime of one build. Dropping the
/// context removes the directory as well, so only a killed process leaks it.
pub struct GateContext {
    /// Current lifecycle phase
    pub phase: Phase,
    /// The docs dir from the original configuration (set by `on_config`)
    pub source_docs_dir: Option<PathBuf>,
    /// Plugin options from the host configuration
    pub options: PaywallOptions,
    /// Counters for reporting
    pub stats: GateStats,
    scratch: Option<TempDir>,
    scratch_docs_dir: Option<PathBuf>,
}

impl GateContext {
    pub fn new(options: PaywallOptions) -> Self {
        Self {
            phase: Phase::Created,
            source_docs_dir: None,
            options,
            stats: GateStats::default(),
            scratch: None,
            scratch_docs_dir: None,
        }
    }

    /// Move to `next` if the current phase is one of `allowed`.
    pub fn advance(&mut self, hook: &'static str, allowed: &[Phase], next: Phase) -> GateResult<()> {
        if !allowed.contains(&self.phase) {
            return Err(GateError::OutOfOrder {
                hook,
                phase: self.phase,
            });
        }
        self.phase = next;
        Ok(())
    }

    /// Take ownership of a freshly created scratch directory.
    pub(crate) fn attach_scratch(&mut self, scratch: TempDir) {
        self.scratch_docs_dir = Some(scratch.path().join("docs"));
        self.scratch = Some(scratch);
    }

    /// Release the scratch directory handle for removal.
    pub(crate) fn detach_scratch(&mut self) -> Option<TempDir> {
        self.scratch_docs_dir = None;
        self.scratch.take()
    }

    /// Root of the scratch directory, if one is held.
    pub fn scratch_root(&self) -> Option<&Path> {
        self.scratch.as_ref().map(TempDir::path)
    }

    /// Docs root inside the scratch directory.
    pub fn scratch_docs_dir(&self) -> GateResult<&Path> {
        self.scratch_docs_dir
            .as_deref()
            .ok_or(GateError::NotConfigured)
    }

    /// Original docs root recorded by `on_config`.
    pub fn source_docs_dir(&self) -> GateResult<&Path> {
        self.source_docs_dir
            .as_deref()
            .ok_or(GateError::NotConfigured)
    }
}

impl fmt::Debug for GateContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateContext")
            .field("phase", &self.phase)
            .field("source_docs_dir", &self.source_docs_dir)
            .field("scratch_docs_dir", &self.scratch_docs_dir)
            .field("options", &self.options)
            .field("stats", &self.stats)
            .finish()
    }
}
