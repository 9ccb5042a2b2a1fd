//! Error types for building and rendering CV documents

use thiserror::Error;

/// Errors that can occur while building, rendering or publishing a document.
///
/// Every variant is fatal to a single invocation: callers never receive a
/// partially rendered document alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VitaeError {
    /// The input violates the alternating label/children list shape
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// The tree is well formed but violates a depth or homogeneity rule of the renderers
    #[error("unsupported shape: {0}")]
    UnsupportedShape(String),
    /// A fragment converter or the document compiler is missing or failed
    #[error("external tool error: {0}")]
    ExternalTool(String),
    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(String),
    /// Format not found in registry
    #[error("format '{0}' not found")]
    FormatNotFound(String),
    /// The format cannot honor the requested operation or option
    #[error("operation not supported: {0}")]
    NotSupported(String),
}

pub type Result<T> = std::result::Result<T, VitaeError>;
