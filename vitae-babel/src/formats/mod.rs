//! Format implementations
//!
//! This module contains the output formats a CV document can be rendered to.

pub mod common;
pub mod html;
pub mod latex;
#[cfg(feature = "native-export")]
pub mod pdf;
pub mod treeviz;

pub use html::{HtmlFormat, HtmlOptions};
pub use latex::LatexFormat;
#[cfg(feature = "native-export")]
pub use pdf::PdfFormat;
