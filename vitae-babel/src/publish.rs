//! Document publishing pipeline.
//!
//! Bridges the format registry and file I/O: select a format, serialize, and write the
//! result to its final location. Binary output (PDF) is always written to the requested
//! path, whatever directory the compiler worked in.

use crate::document::Document;
use crate::error::{Result, VitaeError};
use crate::format::SerializedDocument;
use crate::registry::FormatRegistry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Specifies how to publish a document.
///
/// ```ignore
/// let spec = PublishSpec::new(&document, "pdf")
///     .with_output_path("cv.pdf")
///     .with_option("build-dir", ".cv");
/// ```
///
/// Without an output path, text formats return in-memory content. Binary formats require
/// an explicit output path.
#[derive(Debug)]
pub struct PublishSpec<'a> {
    pub document: &'a Document,
    /// Target format name (e.g., "latex", "html", "pdf").
    pub format: &'a str,
    pub output: Option<PathBuf>,
    /// Format-specific options.
    pub options: HashMap<String, String>,
}

impl<'a> PublishSpec<'a> {
    pub fn new(document: &'a Document, format: &'a str) -> Self {
        Self {
            document,
            format,
            output: None,
            options: HashMap::new(),
        }
    }

    /// Sets the output file path. If provided, content is written to disk.
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn with_options(mut self, options: HashMap<String, String>) -> Self {
        self.options.extend(options);
        self
    }
}

/// The output from a successful publish operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    /// Content held in memory (for text formats without an output path).
    InMemory(String),
    /// Path to the written file (when output path was specified).
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub artifact: PublishArtifact,
}

/// Publishes a document as described by a [PublishSpec].
///
/// # Errors
///
/// Fails when the format is unknown, serialization fails, the file cannot be written, or
/// a binary format is requested without an output path. Nothing is written on failure.
pub fn publish(registry: &FormatRegistry, spec: PublishSpec<'_>) -> Result<PublishResult> {
    let serialized = registry.serialize_with_options(spec.document, spec.format, &spec.options)?;
    match serialized {
        SerializedDocument::Text(text) => write_or_return_text(text, spec.output),
        SerializedDocument::Binary(bytes) => write_binary(bytes, spec.output),
    }
}

fn write_or_return_text(text: String, output: Option<PathBuf>) -> Result<PublishResult> {
    match output {
        Some(path) => write_to_path(path, text.into_bytes()).map(|path| PublishResult {
            artifact: PublishArtifact::File(path),
        }),
        None => Ok(PublishResult {
            artifact: PublishArtifact::InMemory(text),
        }),
    }
}

fn write_binary(bytes: Vec<u8>, output: Option<PathBuf>) -> Result<PublishResult> {
    let path = output.ok_or_else(|| {
        VitaeError::NotSupported("binary formats require an explicit output path".to_string())
    })?;
    write_to_path(path, bytes).map(|path| PublishResult {
        artifact: PublishArtifact::File(path),
    })
}

fn write_to_path(path: PathBuf, bytes: Vec<u8>) -> Result<PathBuf> {
    fs::write(&path, &bytes)
        .map_err(|err| VitaeError::Io(format!("cannot write '{}': {err}", path.display())))?;
    info!(output = %path.display(), bytes = bytes.len(), "wrote output");
    Ok(path)
}
