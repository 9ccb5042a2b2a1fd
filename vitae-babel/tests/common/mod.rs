//! Shared fixtures: stub transformers and compilers that never leave the process.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use vitae_babel::compile::DocumentCompiler;
use vitae_babel::error::{Result, VitaeError};
use vitae_babel::transform::TextTransformer;
use vitae_babel::Document;

pub const SAMPLE: &str = r#"[Experience, [[Acme Corp], ["2020-2022", Did things.]], Skills, [Rust]]"#;

/// `SAMPLE` with a metadata record and a double hyphen in the date range.
pub const PROFILE: &str = r#"[{name: Ada Lovelace, email: ada@example.org}, Experience, [[Acme Corp], ["2020--2022", Did things.]], Skills, [Rust]]"#;

pub fn document(source: &str) -> Document {
    Document::from_yaml_str(source).unwrap()
}

/// Returns every fragment unchanged and remembers what it was given.
#[derive(Clone, Default)]
pub struct Recorder {
    seen: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl TextTransformer for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn transform(&self, fragment: &str) -> Result<String> {
        self.seen.lock().unwrap().push(fragment.to_string());
        Ok(fragment.to_string())
    }
}

pub struct Failing;

impl TextTransformer for Failing {
    fn name(&self) -> &str {
        "failing"
    }

    fn transform(&self, _fragment: &str) -> Result<String> {
        Err(VitaeError::ExternalTool("converter exited with status 1".to_string()))
    }
}

/// Writes a fake PDF next to the source and counts invocations.
#[derive(Clone, Default)]
pub struct StubCompiler {
    runs: Arc<Mutex<Vec<PathBuf>>>,
}

impl StubCompiler {
    pub fn runs(&self) -> usize {
        self.runs.lock().unwrap().len()
    }
}

impl DocumentCompiler for StubCompiler {
    fn name(&self) -> &str {
        "stub"
    }

    fn compile(&self, source: &Path) -> Result<PathBuf> {
        self.runs.lock().unwrap().push(source.to_path_buf());
        let pdf = source.with_extension("pdf");
        let tex = fs::read_to_string(source).map_err(|e| VitaeError::Io(e.to_string()))?;
        fs::write(&pdf, format!("%PDF-stub {}", tex.len()))
            .map_err(|e| VitaeError::Io(e.to_string()))?;
        Ok(pdf)
    }
}

pub struct FailingCompiler;

impl DocumentCompiler for FailingCompiler {
    fn name(&self) -> &str {
        "failing"
    }

    fn compile(&self, source: &Path) -> Result<PathBuf> {
        Err(VitaeError::ExternalTool(format!(
            "compilation of '{}' failed",
            source.display()
        )))
    }
}
