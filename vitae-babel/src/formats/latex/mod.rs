//! LaTeX format
//!
//! Produces a standalone `article` document. Each top-level group becomes an unnumbered
//! section; tabular groups use a two-column `tabular` with a thin rule between the row
//! labels and their entries.
//!
//! # Element Mapping
//!
//! | Outline element   | LaTeX                                                     |
//! |-------------------|-----------------------------------------------------------|
//! | Root              | preamble + metadata header ... `\end{document}`           |
//! | Group title       | `\section*{title}` + `\hrule` (title used verbatim)       |
//! | Table group       | `\begin{tabular}{L!{\VRule}R}` ... `\end{tabular}`        |
//! | Row               | `\textit{label} & entry \newline entry \\`                |
//! | Paragraph group   | `\smallskip` + converted text                             |
//! | Top-level leaf    | converted text                                            |
//!
//! Leaf text is converted by the configured [TextTransformer] (pandoc in production),
//! one call per `<br>`-separated line.

pub mod serializer;

use crate::document::Document;
use crate::error::Result;
use crate::format::Format;
use crate::transform::TextTransformer;

pub use serializer::{render_body, render_typeset};

/// Format implementation for LaTeX source
pub struct LatexFormat {
    converter: Box<dyn TextTransformer>,
}

impl LatexFormat {
    pub fn new(converter: impl TextTransformer + 'static) -> Self {
        Self {
            converter: Box::new(converter),
        }
    }

    pub fn converter(&self) -> &dyn TextTransformer {
        self.converter.as_ref()
    }
}

#[cfg(feature = "native-export")]
impl Default for LatexFormat {
    fn default() -> Self {
        Self::new(crate::tools::PandocLatex::default())
    }
}

impl Format for LatexFormat {
    fn name(&self) -> &str {
        "latex"
    }

    fn description(&self) -> &str {
        "LaTeX source, fragments converted with pandoc"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tex", "latex"]
    }

    fn serialize(&self, doc: &Document) -> Result<String> {
        render_typeset(&doc.tree, &doc.metadata, self.converter())
    }
}
