//! Format trait definition
//!
//! Every output target implements [Format]. The trait provides a uniform interface for
//! turning a [Document] into the bytes that end up on disk.

use crate::document::Document;
use crate::error::{Result, VitaeError};
use std::collections::HashMap;

/// Serialized output produced by a [`Format`] implementation.
#[derive(Debug)]
pub enum SerializedDocument {
    /// UTF-8 text output (LaTeX, HTML)
    Text(String),
    /// Binary output (PDF)
    Binary(Vec<u8>),
}

/// Trait for output formats
///
/// # Examples
///
/// ```ignore
/// struct PlainFormat;
///
/// impl Format for PlainFormat {
///     fn name(&self) -> &str {
///         "plain"
///     }
///
///     fn serialize(&self, doc: &Document) -> Result<String> {
///         Ok(format!("{} leaves", doc.tree.leaf_count()))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "latex", "pdf", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    ///
    /// The first extension is the one used for generated files.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Serialize a Document into text
    fn serialize(&self, doc: &Document) -> Result<String>;

    /// Serialize a Document, optionally using extra parameters.
    ///
    /// Formats that only emit textual output can rely on the default implementation,
    /// which delegates to [`Format::serialize`]. Binary formats should override this
    /// method to return [`SerializedDocument::Binary`].
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument> {
        if options.is_empty() {
            self.serialize(doc).map(SerializedDocument::Text)
        } else {
            Err(VitaeError::NotSupported(format!(
                "format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}

/// Interpret a boolean option; a present but empty value counts as `true`.
#[cfg_attr(not(feature = "native-export"), allow(dead_code))]
pub(crate) fn parse_bool_flag(
    options: &HashMap<String, String>,
    key: &str,
    default: bool,
) -> Result<bool> {
    if let Some(value) = options.get(key) {
        if value.is_empty() {
            return Ok(true);
        }
        match value.to_lowercase().as_str() {
            "true" | "1" | "yes" | "y" => Ok(true),
            "false" | "0" | "no" | "n" => Ok(false),
            other => Err(VitaeError::NotSupported(format!(
                "invalid boolean value '{other}' for option '{key}'"
            ))),
        }
    } else {
        Ok(default)
    }
}
