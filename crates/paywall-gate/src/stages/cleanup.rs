use tracing::info;

use crate::context::GateContext;
use crate::error::{GateError, GateResult};

/// Stage 6: Scratch Cleaner
///
/// Removes the scratch directory once the build has succeeded. A build that
/// aborts never gets here; the context's drop removes the directory instead,
/// and a killed process leaves it for temp-dir housekeeping.
#[derive(Default)]
pub struct ScratchCleaner;

impl ScratchCleaner {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(&self, context: &mut GateContext) -> GateResult<()> {
        let Some(scratch) = context.detach_scratch() else {
            return Ok(());
        };
        let root = scratch.path().to_path_buf();
        scratch.close().map_err(|e| GateError::io(&root, e))?;
        info!(scratch = %root.display(), "Removed scratch directory");
        Ok(())
    }
}
