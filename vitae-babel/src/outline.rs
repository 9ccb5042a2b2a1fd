//! Depth-classified view of a [Tree]
//!
//! Renderers only understand three levels: top-level sections, the rows of a tabular
//! group, and the leaf entries of a row. [Outline::from_tree] assigns each node its role
//! once, so renderers never count depths and deeper nesting cannot reach them.
//!
//! A group is tabular when its first child has children of its own, and a plain paragraph
//! when its first child is a leaf. Siblings must agree with the first child; a group that
//! mixes rows and plain entries is rejected rather than rendered half-way.

use crate::error::{Result, VitaeError};
use crate::tree::{Branch, Node, Tree};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    pub sections: Vec<Section>,
}

/// A top-level entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// A top-level leaf, rendered as a bare fragment
    Text(String),
    Group(Group),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub title: String,
    pub body: GroupBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupBody {
    /// Heading followed by one paragraph
    Paragraph(String),
    /// Heading followed by a two-column table
    Table(Vec<Row>),
}

/// One labeled line of a tabular group. `entries` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub entries: Vec<String>,
}

impl Group {
    /// Number of table lines the group occupies.
    pub fn leaf_count(&self) -> usize {
        match &self.body {
            GroupBody::Paragraph(_) => 1,
            GroupBody::Table(rows) => rows.iter().map(|row| row.entries.len()).sum(),
        }
    }
}

impl Outline {
    pub fn from_tree(tree: &Tree) -> Result<Self> {
        let sections = tree
            .children()
            .iter()
            .map(classify_section)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { sections })
    }
}

fn classify_section(node: &Node) -> Result<Section> {
    match node {
        Node::Leaf { content } => Ok(Section::Text(content.clone())),
        Node::Branch(branch) => Ok(Section::Group(Group {
            title: branch.label().to_string(),
            body: classify_body(branch)?,
        })),
    }
}

fn classify_body(group: &Branch) -> Result<GroupBody> {
    if group.first().is_leaf() {
        if let Some(row) = group.children().iter().find(|child| !child.is_leaf()) {
            return Err(VitaeError::UnsupportedShape(format!(
                "group '{}' starts with plain text but '{}' has nested entries",
                group.label(),
                row.content()
            )));
        }
        let dropped = group.children().len() - 1;
        if dropped > 0 {
            warn!(
                group = group.label(),
                dropped, "plain group renders only its first entry"
            );
        }
        return Ok(GroupBody::Paragraph(group.first().content().to_string()));
    }

    group
        .children()
        .iter()
        .map(|child| classify_row(group.label(), child))
        .collect::<Result<Vec<_>>>()
        .map(GroupBody::Table)
}

fn classify_row(group: &str, node: &Node) -> Result<Row> {
    let Node::Branch(row) = node else {
        return Err(VitaeError::UnsupportedShape(format!(
            "group '{group}' starts with a table row but '{}' has no nested entries",
            node.content()
        )));
    };

    let entries = row
        .children()
        .iter()
        .map(|entry| match entry {
            Node::Leaf { content } => Ok(content.clone()),
            Node::Branch(deeper) => Err(VitaeError::UnsupportedShape(format!(
                "entry '{}' of row '{}' in group '{group}' nests more than three levels deep",
                deeper.label(),
                row.label()
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Row {
        label: row.label().to_string(),
        entries,
    })
}
