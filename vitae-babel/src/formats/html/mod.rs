//! HTML format
//!
//! Produces a single self-contained page: the built-in stylesheet is embedded in a
//! `<style>` tag and the CV lives in one `<div class="cv">` container.
//!
//! # Element Mapping
//!
//! | Outline element   | HTML                                                                  |
//! |-------------------|-----------------------------------------------------------------------|
//! | Root              | `<div class="cv">`, optional `<header class="cv-header">`             |
//! | Table group       | `<table class="cv-group">`, title in `<th rowspan=N class="cv-primary-group">` |
//! | Row               | `<td class="cv-secondary-group"><em>label</em></td>` + content cell   |
//! | Row entry         | `<td class="cv-content-cell">`, one `<tr>` per entry                  |
//! | Paragraph group   | `<section class="cv-group cv-plain">` + `<h2>` + content              |
//! | Top-level leaf    | `<div class="cv-text">`                                               |
//!
//! The group heading spans all lines of its table: `N` is the number of leaves below the
//! group. Entries after the first one of a row get their own line with an empty label
//! cell, so a row reads as one visual block.
//!
//! Leaf text goes through the markdown converter once per entry (no line splitting).
//! After assembly every `--` becomes an en dash.
//!
//! # Options
//!
//! - `css-path`: file whose contents are appended to the built-in stylesheet

pub mod serializer;

use crate::document::Document;
use crate::error::{Result, VitaeError};
use crate::format::{Format, SerializedDocument};
use crate::transform::{MarkdownToHtml, TextTransformer};
use std::collections::HashMap;
use std::fs;

pub use serializer::{render_markup, render_markup_with_options, HtmlOptions};

/// Format implementation for HTML
pub struct HtmlFormat {
    converter: Box<dyn TextTransformer>,
    options: HtmlOptions,
}

impl Default for HtmlFormat {
    fn default() -> Self {
        Self::new(MarkdownToHtml)
    }
}

impl HtmlFormat {
    pub fn new(converter: impl TextTransformer + 'static) -> Self {
        Self {
            converter: Box::new(converter),
            options: HtmlOptions::default(),
        }
    }

    pub fn with_options(mut self, options: HtmlOptions) -> Self {
        self.options = options;
        self
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Self-contained HTML page with embedded CSS"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn serialize(&self, doc: &Document) -> Result<String> {
        render_markup_with_options(
            &doc.tree,
            &doc.metadata,
            self.converter.as_ref(),
            &self.options,
        )
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument> {
        let mut html_options = self.options.clone();

        for (key, value) in options {
            match key.as_str() {
                "css-path" => {
                    let css = fs::read_to_string(value).map_err(|e| {
                        VitaeError::Io(format!("cannot read stylesheet '{value}': {e}"))
                    })?;
                    html_options = html_options.with_custom_css(css);
                }
                other => {
                    return Err(VitaeError::NotSupported(format!(
                        "format 'html' does not support option '{other}'"
                    )))
                }
            }
        }

        render_markup_with_options(
            &doc.tree,
            &doc.metadata,
            self.converter.as_ref(),
            &html_options,
        )
        .map(SerializedDocument::Text)
    }
}
