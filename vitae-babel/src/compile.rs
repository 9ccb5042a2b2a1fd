//! Document compiler seam
//!
//! Compiling LaTeX into a PDF is delegated to an external program. The PDF format only
//! sees this trait; the `lualatex` implementation lives in `tools`.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Compiles a source file on disk and returns the path of the produced artifact.
///
/// Implementations must not change the working directory of the calling process.
pub trait DocumentCompiler: Send + Sync {
    fn name(&self) -> &str;

    fn compile(&self, source: &Path) -> Result<PathBuf>;
}
