//! External programs: pandoc for LaTeX fragments, lualatex for PDFs.
//!
//! Both are located lazily, at first use, so that formats which never shell out (HTML)
//! work on machines without a TeX installation. An environment variable pointing at the
//! binary takes precedence over a `PATH` lookup of the configured command name.

use crate::compile::DocumentCompiler;
use crate::error::{Result, VitaeError};
use crate::transform::TextTransformer;
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;
use which::which;

/// Overrides the pandoc binary.
pub const CONVERTER_ENV: &str = "VITAE_PANDOC_BIN";
/// Overrides the LaTeX compiler binary.
pub const COMPILER_ENV: &str = "VITAE_LATEX_BIN";

/// Resolve `command` to an executable, honoring the `env_var` override.
pub fn resolve_binary(command: &str, env_var: &str) -> Result<PathBuf> {
    if let Some(path) = env::var_os(env_var) {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    which(command).map_err(|e| {
        VitaeError::ExternalTool(format!(
            "unable to locate '{command}' ({e}); install it or set {env_var}"
        ))
    })
}

/// Markdown → LaTeX fragments through `pandoc --to latex`.
#[derive(Debug, Clone)]
pub struct PandocLatex {
    command: String,
}

impl PandocLatex {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for PandocLatex {
    fn default() -> Self {
        Self::new("pandoc")
    }
}

impl TextTransformer for PandocLatex {
    fn name(&self) -> &str {
        "pandoc"
    }

    fn transform(&self, fragment: &str) -> Result<String> {
        let binary = resolve_binary(&self.command, CONVERTER_ENV)?;
        debug!(binary = %binary.display(), bytes = fragment.len(), "converting fragment");

        let mut child = Command::new(&binary)
            .args(["--from", "markdown", "--to", "latex"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                VitaeError::ExternalTool(format!(
                    "failed to launch {} ({}): {e}",
                    self.command,
                    binary.display()
                ))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(fragment.as_bytes()).map_err(|e| {
                VitaeError::ExternalTool(format!("failed to feed {}: {e}", self.command))
            })?;
        }

        let output = child.wait_with_output().map_err(|e| {
            VitaeError::ExternalTool(format!("failed to wait for {}: {e}", self.command))
        })?;

        if !output.status.success() {
            return Err(VitaeError::ExternalTool(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|e| {
            VitaeError::ExternalTool(format!("{} produced non UTF-8 output: {e}", self.command))
        })
    }
}

/// Compiles LaTeX with `lualatex`, inside the directory that holds the source.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    command: String,
}

impl LatexCompiler {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for LatexCompiler {
    fn default() -> Self {
        Self::new("lualatex")
    }
}

impl DocumentCompiler for LatexCompiler {
    fn name(&self) -> &str {
        &self.command
    }

    fn compile(&self, source: &Path) -> Result<PathBuf> {
        let binary = resolve_binary(&self.command, COMPILER_ENV)?;
        let file_name = source.file_name().ok_or_else(|| {
            VitaeError::Io(format!("'{}' is not a file path", source.display()))
        })?;
        let workdir = match source.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        debug!(
            binary = %binary.display(),
            workdir = %workdir.display(),
            "compiling document"
        );

        let status = Command::new(&binary)
            .arg("-interaction=nonstopmode")
            .arg("-halt-on-error")
            .arg(file_name)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| {
                VitaeError::ExternalTool(format!(
                    "failed to launch {} ({}): {e}",
                    self.command,
                    binary.display()
                ))
            })?;

        let log = source.with_extension("log");
        if !status.success() {
            return Err(VitaeError::ExternalTool(format!(
                "{} exited with {status}; see {}",
                self.command,
                log.display()
            )));
        }

        let artifact = source.with_extension("pdf");
        if !artifact.is_file() {
            return Err(VitaeError::ExternalTool(format!(
                "{} finished but produced no {}; see {}",
                self.command,
                artifact.display(),
                log.display()
            )));
        }
        Ok(artifact)
    }
}
