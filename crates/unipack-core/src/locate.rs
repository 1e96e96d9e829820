use std::path::PathBuf;

use crate::registry::ToolId;

/// Availability probe for candidate tools. A missing binary is an
/// expected condition here, not an error: the dispatcher consumes the
/// `None` and moves to the next candidate.
pub trait ToolLocator {
    fn locate(&self, tool: ToolId) -> Option<PathBuf>;
}

/// PATH lookup via `which`.
pub struct WhichLocator;

impl ToolLocator for WhichLocator {
    fn locate(&self, tool: ToolId) -> Option<PathBuf> {
        which::which(tool.program()).ok()
    }
}
