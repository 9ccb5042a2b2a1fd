//! CLI-specific transforms
//!
//! Debug views of a parsed CV, selected with `vitae inspect <path> [transform]`.
//! Each transform is a stage + format combination:
//!
//! - `tree-treeviz`: the node tree as decoded from the YAML list
//! - `tree-json`: metadata and node tree as JSON
//! - `outline-treeviz`: groups, rows and entries as the renderers classify them

use serde_json::json;
use vitae_babel::formats::treeviz::{to_outline_treeviz_str, to_treeviz_str};
use vitae_babel::Document;

/// All available CLI transforms (stage + format combinations)
pub const AVAILABLE_TRANSFORMS: &[&str] = &["tree-treeviz", "tree-json", "outline-treeviz"];

/// Transform used when none is given on the command line.
pub const DEFAULT_TRANSFORM: &str = "tree-treeviz";

/// Execute a named transform on a YAML source.
pub fn execute_transform(source: &str, transform_name: &str) -> Result<String, String> {
    let doc = Document::from_yaml_str(source).map_err(|e| e.to_string())?;

    match transform_name {
        "tree-treeviz" => Ok(to_treeviz_str(&doc)),
        "outline-treeviz" => to_outline_treeviz_str(&doc).map_err(|e| e.to_string()),
        "tree-json" => {
            let value = json!({
                "metadata": doc.metadata,
                "leaves": doc.tree.leaf_count(),
                "tree": doc.tree,
            });
            serde_json::to_string_pretty(&value)
                .map(|text| format!("{text}\n"))
                .map_err(|e| format!("JSON serialization failed: {e}"))
        }
        other => Err(format!("Unknown transform: {other}")),
    }
}
