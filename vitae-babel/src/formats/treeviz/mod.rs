//! Treeviz formatter for CV trees
//!
//! Treeviz is a visual representation of the node tree, one node per line. It encodes
//! nesting with box-drawing connectors and labels each node with an icon:
//!
//!   ⧉ Document (3 leaves)
//!   ├─ § Experience
//!   │ └─ § Acme Corp
//!   │   ├─ ¶ 2020-2022
//!   │   └─ ¶ Did things.
//!   └─ § Skills
//!     └─ ¶ Rust
//!
//! Labels are truncated to 30 characters and line breaks are shown as `↵`.
//!
//! Icons
//!     Document: ⧉
//!     Branch: §
//!     Leaf: ¶
//!
//! [to_outline_treeviz_str] draws the classified view instead: groups, rows and entries,
//! as the renderers see them.

use crate::document::Document;
use crate::error::Result;
use crate::outline::{GroupBody, Outline, Section};
use crate::tree::Node;

const MAX_LABEL: usize = 30;

pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Branch" | "Group" => "§",
        "Leaf" | "Paragraph" | "Text" => "¶",
        "Row" => "☰",
        "Entry" => "•",
        _ => "○",
    }
}

fn display_label(text: &str) -> String {
    let flat = text.trim().replace('\n', "↵");
    if flat.chars().count() > MAX_LABEL {
        let mut short: String = flat.chars().take(MAX_LABEL - 1).collect();
        short.push('…');
        short
    } else {
        flat
    }
}

fn connector(is_last: bool) -> (&'static str, &'static str) {
    if is_last {
        ("└─", "  ")
    } else {
        ("├─", "│ ")
    }
}

fn format_node(node: &Node, prefix: &str, is_last: bool, output: &mut String) {
    let (branch, indent) = connector(is_last);
    match node {
        Node::Leaf { content } => {
            output.push_str(&format!(
                "{prefix}{branch} {} {}\n",
                get_icon("Leaf"),
                display_label(content)
            ));
        }
        Node::Branch(inner) => {
            output.push_str(&format!(
                "{prefix}{branch} {} {}\n",
                get_icon("Branch"),
                display_label(inner.label())
            ));
            let child_prefix = format!("{prefix}{indent}");
            format_children(inner.children(), &child_prefix, output);
        }
    }
}

fn format_children(children: &[Node], prefix: &str, output: &mut String) {
    let count = children.len();
    for (i, child) in children.iter().enumerate() {
        format_node(child, prefix, i == count - 1, output);
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let mut output = format!(
        "{} Document ({} leaves)\n",
        get_icon("Document"),
        doc.tree.leaf_count()
    );
    format_children(doc.tree.children(), "", &mut output);
    output
}

/// Draw the classified outline of a document.
///
/// Fails the same way the renderers do when the tree has a shape they cannot render.
pub fn to_outline_treeviz_str(doc: &Document) -> Result<String> {
    let outline = Outline::from_tree(&doc.tree)?;
    let mut output = format!(
        "{} Outline ({} sections)\n",
        get_icon("Document"),
        outline.sections.len()
    );

    let count = outline.sections.len();
    for (i, section) in outline.sections.iter().enumerate() {
        let (branch, indent) = connector(i == count - 1);
        match section {
            Section::Text(content) => output.push_str(&format!(
                "{branch} {} {}\n",
                get_icon("Text"),
                display_label(content)
            )),
            Section::Group(group) => {
                output.push_str(&format!(
                    "{branch} {} {} [{} lines]\n",
                    get_icon("Group"),
                    display_label(&group.title),
                    group.leaf_count()
                ));
                match &group.body {
                    GroupBody::Paragraph(content) => output.push_str(&format!(
                        "{indent}└─ {} {}\n",
                        get_icon("Paragraph"),
                        display_label(content)
                    )),
                    GroupBody::Table(rows) => {
                        for (r, row) in rows.iter().enumerate() {
                            let (row_branch, row_indent) = connector(r == rows.len() - 1);
                            output.push_str(&format!(
                                "{indent}{row_branch} {} {}\n",
                                get_icon("Row"),
                                display_label(&row.label)
                            ));
                            for (e, entry) in row.entries.iter().enumerate() {
                                let (entry_branch, _) = connector(e == row.entries.len() - 1);
                                output.push_str(&format!(
                                    "{indent}{row_indent}{entry_branch} {} {}\n",
                                    get_icon("Entry"),
                                    display_label(entry)
                                ));
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(output)
}
