//! Input documents
//!
//! A CV source file is a YAML list. Its first entry may be a mapping holding the author's
//! [Metadata]; every other entry belongs to the outline decoded by [crate::tree].

use crate::cache::content_hash;
use crate::error::{Result, VitaeError};
use crate::tree::Tree;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Author details used verbatim in document headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    pub name: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.website.is_none() && self.github.is_none()
    }
}

/// A parsed CV: metadata plus the outline tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub metadata: Metadata,
    pub tree: Tree,
}

impl Document {
    pub fn new(metadata: Metadata, tree: Tree) -> Self {
        Self { metadata, tree }
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(source)
            .map_err(|e| VitaeError::MalformedInput(format!("invalid YAML: {e}")))?;

        let entries = match value {
            Value::Sequence(entries) => entries,
            _ => {
                return Err(VitaeError::MalformedInput(
                    "the document must be a YAML list".to_string(),
                ))
            }
        };

        let (metadata, outline) = match entries.split_first() {
            Some((record @ Value::Mapping(_), rest)) => {
                let metadata = serde_yaml::from_value(record.clone()).map_err(|e| {
                    VitaeError::MalformedInput(format!("invalid metadata record: {e}"))
                })?;
                (metadata, rest)
            }
            _ => (Metadata::default(), entries.as_slice()),
        };

        Ok(Self::new(metadata, Tree::from_entries(outline)?))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            VitaeError::Io(format!("cannot read '{}': {e}", path.display()))
        })?;
        Self::from_yaml_str(&source)
    }

    /// Hash of everything that influences rendering.
    pub fn hashsum(&self) -> String {
        let fields = [
            &self.metadata.name,
            &self.metadata.email,
            &self.metadata.website,
            &self.metadata.github,
        ]
        .iter()
        .map(|field| field.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join("\u{1f}");
        content_hash(format!("{fields}\u{1e}{}", self.tree.hashsum()).as_bytes())
    }
}
