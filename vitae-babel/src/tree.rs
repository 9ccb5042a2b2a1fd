//! Generic outline tree
//!
//!     The input outline is a list whose entries alternate between a label and an optional
//!     nested list holding that label's children:
//!
//!         - Experience
//!         - - Acme Corp
//!           - - 2020-2022
//!             - Did things.
//!         - Skills
//!
//!     [build] decodes such a list into [Node]s with a single left-to-right cursor. A label
//!     followed by a nested list becomes a [Branch]; a label followed by another label (or by
//!     the end of the list) becomes a leaf. The cursor advances by one or two entries per
//!     node, so decoding always terminates.
//!
//!     Children are never empty: an empty nested list is rejected instead of producing a
//!     branch without children, so "has children" and "is a branch" are the same question.
//!
//!     A label is normally a plain string. The flow shorthand `- [Acme Corp]`, a list holding
//!     exactly one string, is accepted in label position as well.

use crate::cache::content_hash;
use crate::error::{Result, VitaeError};
use serde::Serialize;
use serde_yaml::Value;

/// A node of the outline: either a leaf holding content or a labeled group of children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Leaf { content: String },
    Branch(Branch),
}

/// An interior node. The children sequence is guaranteed to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    label: String,
    children: Vec<Node>,
}

impl Branch {
    /// Create a branch, rejecting an empty child list.
    pub fn new(label: impl Into<String>, children: Vec<Node>) -> Result<Self> {
        let label = label.into();
        if children.is_empty() {
            return Err(VitaeError::MalformedInput(format!(
                "'{label}' is followed by an empty nested list"
            )));
        }
        Ok(Self { label, children })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The first child; always present.
    pub fn first(&self) -> &Node {
        &self.children[0]
    }
}

impl Node {
    pub fn leaf(content: impl Into<String>) -> Self {
        Node::Leaf {
            content: content.into(),
        }
    }

    pub fn branch(label: impl Into<String>, children: Vec<Node>) -> Result<Self> {
        Branch::new(label, children).map(Node::Branch)
    }

    /// The leaf content or the branch label.
    pub fn content(&self) -> &str {
        match self {
            Node::Leaf { content } => content,
            Node::Branch(branch) => &branch.label,
        }
    }

    /// Children of a branch, `None` for a leaf.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Leaf { .. } => None,
            Node::Branch(branch) => Some(&branch.children),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Number of leaves below (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Branch(branch) => branch.children.iter().map(Node::leaf_count).sum(),
        }
    }

    /// Structural SHA-256 hash of this node's content and all of its descendants.
    pub fn hashsum(&self) -> String {
        structural_hash(self.content(), self.children().unwrap_or(&[]))
    }
}

/// The synthetic root of an outline. It has no content of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tree {
    children: Vec<Node>,
}

impl Tree {
    /// Decode a top-level outline list into a tree.
    pub fn from_entries(entries: &[Value]) -> Result<Self> {
        Self::from_nodes(build(entries)?)
    }

    pub fn from_nodes(children: Vec<Node>) -> Result<Self> {
        if children.is_empty() {
            return Err(VitaeError::MalformedInput(
                "the outline has no entries".to_string(),
            ));
        }
        Ok(Self { children })
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn leaf_count(&self) -> usize {
        self.children.iter().map(Node::leaf_count).sum()
    }

    pub fn hashsum(&self) -> String {
        structural_hash("", &self.children)
    }
}

fn structural_hash(content: &str, children: &[Node]) -> String {
    let joined = children
        .iter()
        .map(Node::hashsum)
        .collect::<Vec<_>>()
        .join("-");
    content_hash(format!("{content}{{{joined}}}").as_bytes())
}

/// Decode an alternating label/children list into a sequence of nodes.
pub fn build(entries: &[Value]) -> Result<Vec<Node>> {
    let mut path = Vec::new();
    decode(entries, &mut path)
}

fn decode(entries: &[Value], path: &mut Vec<usize>) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();
    let mut i = 0;

    while i < entries.len() {
        path.push(i);
        let label = label_at(&entries[i]).ok_or_else(|| {
            VitaeError::MalformedInput(format!(
                "expected a label at {}, found {}",
                format_path(path),
                describe(&entries[i])
            ))
        })?;
        path.pop();

        match entries.get(i + 1) {
            None | Some(Value::String(_)) => {
                nodes.push(Node::leaf(label));
                i += 1;
            }
            Some(Value::Sequence(children)) => {
                path.push(i + 1);
                if children.is_empty() {
                    return Err(VitaeError::MalformedInput(format!(
                        "'{label}' is followed by an empty nested list at {}",
                        format_path(path)
                    )));
                }
                let children = decode(children, path)?;
                path.pop();
                nodes.push(Node::branch(label, children)?);
                i += 2;
            }
            Some(other) => {
                path.push(i + 1);
                return Err(VitaeError::MalformedInput(format!(
                    "expected a label or a nested list at {}, found {}",
                    format_path(path),
                    describe(other)
                )));
            }
        }
    }

    Ok(nodes)
}

fn label_at(value: &Value) -> Option<String> {
    match value {
        Value::String(label) => Some(label.clone()),
        Value::Sequence(items) => match items.as_slice() {
            [Value::String(label)] => Some(label.clone()),
            _ => None,
        },
        _ => None,
    }
}

fn format_path(path: &[usize]) -> String {
    path.iter().map(|i| format!("[{i}]")).collect()
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty value",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number (quote it to use it as text)",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a nested list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
