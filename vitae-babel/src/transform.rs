//! Fragment transformers
//!
//! Renderers never emit leaf text directly. Every fragment goes through exactly one
//! [TextTransformer] for the target format, which turns the markdown-flavored source text
//! into an inline fragment of that format. Keeping the converter behind a trait lets the
//! renderers stay pure functions of (tree, metadata, transformer) and lets tests swap in a
//! stub.
//!
//! - [MarkdownToHtml]: in-process markdown → HTML via `comrak`
//! - `tools::PandocLatex`: markdown → LaTeX via a `pandoc` subprocess

use crate::error::Result;
use comrak::{markdown_to_html, ComrakOptions};

/// Converts one source fragment into a fragment of the target format.
pub trait TextTransformer: Send + Sync {
    /// Short name used in logs and error messages
    fn name(&self) -> &str;

    fn transform(&self, fragment: &str) -> Result<String>;
}

/// Markdown → HTML fragments using comrak.
///
/// Raw HTML in the source (e.g. `<br>`) is passed through, and smart punctuation stays off
/// so that dash handling is left to the document-level pass of the HTML renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownToHtml;

impl TextTransformer for MarkdownToHtml {
    fn name(&self) -> &str {
        "comrak"
    }

    fn transform(&self, fragment: &str) -> Result<String> {
        Ok(markdown_to_html(fragment, &default_comrak_options()))
    }
}

fn default_comrak_options() -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options.extension.autolink = true;
    options.extension.superscript = true;
    options.render.unsafe_ = true;
    options
}
