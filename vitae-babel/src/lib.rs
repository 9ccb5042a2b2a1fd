//! Outline model and renderers for YAML-authored CVs
//!
//!     A CV is written as a nested YAML list: labels, each optionally followed by the list of
//!     their children. This crate turns that list into a typed tree and renders it to LaTeX,
//!     PDF or a self-contained HTML page.
//!
//!     This is a pure lib: it powers vitae-cli but is shell agnostic. Nothing here prints to
//!     stdout, reads configuration files or exits the process. External programs (pandoc,
//!     lualatex) are reached through traits, with their subprocess implementations behind
//!     the `native-export` feature.
//!
//! Architecture
//!
//!     YAML ──► Tree ──► Outline ──► renderer ──► bytes
//!                                     ▲
//!                         TextTransformer (per leaf)
//!
//!     - [tree]: the generic node tree, decoded once from the alternating label/children list.
//!     - [outline]: the depth-classified view renderers consume (sections, rows, entries).
//!       Shape errors are detected here, before any output is produced.
//!     - [transform]: converts leaf fragments (markdown) into the target markup.
//!     - [formats]: one module per output format, each implementing [Format], plus the
//!       treeviz debug views.
//!     - [registry] and [publish]: format lookup and the write-to-disk step.
//!     - [cache]: content hashes used to skip regeneration of unchanged inputs.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── tree.rs                 # Node / Tree and the list decoder
//!     ├── document.rs             # metadata record + tree
//!     ├── outline.rs              # section / group / row classification
//!     ├── transform.rs            # TextTransformer trait, comrak transformer
//!     ├── compile.rs              # DocumentCompiler trait
//!     ├── tools.rs                # pandoc / lualatex subprocesses
//!     ├── cache.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs
//!     ├── publish.rs
//!     └── formats
//!         ├── latex
//!         ├── html
//!         ├── pdf
//!         └── treeviz
//!
//! Testing
//!     tests
//!     └── <format>
//!         └── <testname>.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so these are
//!     included from tests/lib.rs.
//!
//! Rendering Rules
//!
//!     A top-level branch is a group. If its first child is a leaf, the group is a heading
//!     and a paragraph. Otherwise it is a two-column table whose rows are the group's
//!     children: the row label on the left, the row's leaves stacked on the right.
//!     Anything nested deeper than that is rejected.
//!
pub mod cache;
pub mod compile;
pub mod document;
pub mod error;
pub mod format;
pub mod formats;
pub mod outline;
pub mod publish;
pub mod registry;
#[cfg(feature = "native-export")]
pub mod tools;
pub mod transform;
pub mod tree;

pub use document::{Document, Metadata};
pub use error::VitaeError;
pub use format::{Format, SerializedDocument};
pub use formats::html::render_markup;
pub use formats::latex::render_typeset;
pub use registry::{FormatRegistry, Toolchain};
pub use tree::{Node, Tree};
