use crate::error::Result;
use std::path::PathBuf;

/// Locates an executable of the Java toolchain (`java`, `jlink`, `jpackage`, ...).
pub trait ToolLocator {
    /// Fails with [`StageError::ToolNotFound`](crate::StageError::ToolNotFound).
    fn locate(&self, tool: &str) -> Result<PathBuf>;
}
