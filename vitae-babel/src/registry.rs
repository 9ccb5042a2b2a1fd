//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name.

use crate::document::Document;
use crate::error::{Result, VitaeError};
use crate::format::{Format, SerializedDocument};
use std::collections::HashMap;

/// External programs used by the LaTeX and PDF formats.
///
/// Commands are resolved on `PATH` when a format needs them, so a registry can be built on
/// machines that lack them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Markdown to LaTeX fragment converter
    pub converter: String,
    /// LaTeX to PDF compiler
    pub compiler: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            converter: "pandoc".to_string(),
            compiler: "lualatex".to_string(),
        }
    }
}

/// Registry of output formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let html = registry.serialize(&document, "html")?;
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| VitaeError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Extension used for files generated by a format.
    pub fn output_extension(&self, format: &str) -> Result<String> {
        let fmt = self.get(format)?;
        Ok(fmt
            .file_extensions()
            .first()
            .map_or_else(|| format.to_string(), |ext| ext.to_string()))
    }

    /// Serialize a document using the specified format
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String> {
        let empty = HashMap::new();
        match self.serialize_with_options(doc, format, &empty)? {
            SerializedDocument::Text(text) => Ok(text),
            SerializedDocument::Binary(_) => Err(VitaeError::NotSupported(format!(
                "format '{format}' produced binary output when text was expected"
            ))),
        }
    }

    /// Serialize a document using the specified format and options
    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument> {
        self.get(format)?.serialize_with_options(doc, options)
    }

    /// Create a registry with the built-in formats and the default toolchain
    pub fn with_defaults() -> Self {
        Self::with_toolchain(&Toolchain::default())
    }

    /// Create a registry with the built-in formats, running the given external programs
    pub fn with_toolchain(toolchain: &Toolchain) -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::html::HtmlFormat::default());

        #[cfg(feature = "native-export")]
        {
            use crate::formats::{LatexFormat, PdfFormat};
            use crate::tools::{LatexCompiler, PandocLatex};

            registry.register(LatexFormat::new(PandocLatex::new(&toolchain.converter)));
            registry.register(PdfFormat::new(
                LatexFormat::new(PandocLatex::new(&toolchain.converter)),
                LatexCompiler::new(&toolchain.compiler),
            ));
        }
        #[cfg(not(feature = "native-export"))]
        let _ = toolchain;

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
