//! PDF export built on top of the LaTeX serializer + an external compiler.
//!
//! The document is rendered to LaTeX with [LatexFormat], written to a build directory and
//! compiled there. The compiler runs with that directory as its working directory; the
//! calling process never changes its own.
//!
//! # Options
//!
//! - `build-dir`: persistent directory for the `.tex` source and compiler output. Without
//!   it a temporary directory is used and removed afterwards.
//! - `jobname`: base name of the generated files (default `cv`).
//! - `reuse`: when the source in `build-dir` is identical to the freshly rendered one and
//!   its PDF exists, return that PDF without recompiling.

use crate::compile::DocumentCompiler;
use crate::document::Document;
use crate::error::{Result, VitaeError};
use crate::format::{parse_bool_flag, Format, SerializedDocument};
use crate::formats::latex::LatexFormat;
use crate::tools::LatexCompiler;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use tracing::{debug, info};

const DEFAULT_JOBNAME: &str = "cv";

/// Format implementation that compiles the LaTeX output into a PDF.
pub struct PdfFormat {
    latex: LatexFormat,
    compiler: Box<dyn DocumentCompiler>,
}

impl Default for PdfFormat {
    fn default() -> Self {
        Self::new(LatexFormat::default(), LatexCompiler::default())
    }
}

impl PdfFormat {
    pub fn new(latex: LatexFormat, compiler: impl DocumentCompiler + 'static) -> Self {
        Self {
            latex,
            compiler: Box::new(compiler),
        }
    }

    fn compile_in(&self, dir: &Path, settings: &BuildSettings, source: &str) -> Result<Vec<u8>> {
        fs::create_dir_all(dir).map_err(|e| {
            VitaeError::Io(format!(
                "cannot create build directory '{}': {e}",
                dir.display()
            ))
        })?;

        let tex_path = dir.join(format!("{}.tex", settings.jobname));
        let pdf_path = dir.join(format!("{}.pdf", settings.jobname));

        if settings.reuse && pdf_path.is_file() {
            let previous = fs::read_to_string(&tex_path).ok();
            if previous.as_deref() == Some(source) {
                info!(pdf = %pdf_path.display(), "LaTeX source unchanged, reusing compiled PDF");
                return read_artifact(&pdf_path);
            }
        }

        if pdf_path.exists() {
            fs::remove_file(&pdf_path).map_err(|e| {
                VitaeError::Io(format!("cannot remove stale '{}': {e}", pdf_path.display()))
            })?;
        }
        fs::write(&tex_path, source).map_err(|e| {
            VitaeError::Io(format!("cannot write '{}': {e}", tex_path.display()))
        })?;

        debug!(compiler = self.compiler.name(), source = %tex_path.display(), "compiling");
        let artifact = self.compiler.compile(&tex_path)?;
        read_artifact(&artifact)
    }
}

impl Format for PdfFormat {
    fn name(&self) -> &str {
        "pdf"
    }

    fn description(&self) -> &str {
        "PDF compiled from the LaTeX output"
    }

    fn file_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn serialize(&self, _doc: &Document) -> Result<String> {
        Err(VitaeError::NotSupported(
            "PDF serialization produces binary output".to_string(),
        ))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument> {
        let settings = BuildSettings::from_options(options)?;
        let source = self.latex.serialize(doc)?;

        let pdf = match &settings.build_dir {
            Some(dir) => self.compile_in(dir, &settings, &source)?,
            None => {
                let temp_dir = tempdir()
                    .map_err(|e| VitaeError::Io(format!("temp dir error: {e}")))?;
                self.compile_in(temp_dir.path(), &settings, &source)?
            }
        };

        Ok(SerializedDocument::Binary(pdf))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct BuildSettings {
    build_dir: Option<PathBuf>,
    jobname: String,
    reuse: bool,
}

impl BuildSettings {
    fn from_options(options: &HashMap<String, String>) -> Result<Self> {
        for key in options.keys() {
            if !matches!(key.as_str(), "build-dir" | "jobname" | "reuse") {
                return Err(VitaeError::NotSupported(format!(
                    "format 'pdf' does not support option '{key}'"
                )));
            }
        }

        let jobname = options
            .get("jobname")
            .filter(|name| !name.is_empty())
            .cloned()
            .unwrap_or_else(|| DEFAULT_JOBNAME.to_string());
        if jobname.contains(['/', '\\']) {
            return Err(VitaeError::NotSupported(format!(
                "jobname '{jobname}' must be a bare file name"
            )));
        }

        Ok(Self {
            build_dir: options.get("build-dir").map(PathBuf::from),
            jobname,
            reuse: parse_bool_flag(options, "reuse", false)?,
        })
    }
}

fn read_artifact(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| VitaeError::Io(format!("cannot read '{}': {e}", path.display())))
}
