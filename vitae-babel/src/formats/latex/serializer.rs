//! LaTeX serialization
//!
//! Pipeline: Tree → Outline → LaTeX body → preamble/postamble wrap

use crate::document::Metadata;
use crate::error::Result;
use crate::formats::common::{fill_template, link_parts};
use crate::outline::{Group, GroupBody, Outline, Row, Section};
use crate::transform::TextTransformer;
use crate::tree::Tree;

const PREAMBLE: &str = include_str!("../../../templates/preamble.tex");
const POSTAMBLE: &str = "\n\\end{document}\n";

/// Separator between converted lines of one fragment.
const FORCED_NEWLINE: &str = " \\newline ";
/// Explicit line-break marker inside content strings.
const LINE_MARKER: &str = "<br>";

/// Render a complete LaTeX document.
pub fn render_typeset(
    tree: &Tree,
    metadata: &Metadata,
    transformer: &dyn TextTransformer,
) -> Result<String> {
    let outline = Outline::from_tree(tree)?;
    let body = render_body(&outline, transformer)?;
    let header = render_header(metadata);
    let preamble = fill_template(PREAMBLE, &[("header", header.as_str())]);
    Ok(format!("{preamble}{body}{POSTAMBLE}"))
}

/// Render the sections of an outline, without preamble.
pub fn render_body(outline: &Outline, transformer: &dyn TextTransformer) -> Result<String> {
    let sections = outline
        .sections
        .iter()
        .map(|section| render_section(section, transformer))
        .collect::<Result<Vec<_>>>()?;
    Ok(sections.join("\n"))
}

fn render_section(section: &Section, transformer: &dyn TextTransformer) -> Result<String> {
    match section {
        Section::Text(content) => Ok(format!("{}\n", convert(content, transformer)?)),
        Section::Group(group) => render_group(group, transformer),
    }
}

fn render_group(group: &Group, transformer: &dyn TextTransformer) -> Result<String> {
    let mut output = format!(
        "\\section*{{{}}}\n\\vspace{{-0.8em}}\n\\hrule\n",
        group.title
    );

    match &group.body {
        GroupBody::Paragraph(content) => {
            output.push_str("\\smallskip\n");
            output.push_str(&convert(content, transformer)?);
            output.push('\n');
        }
        GroupBody::Table(rows) => {
            output.push_str("\\begin{tabular}{L!{\\VRule}R}\n");
            for row in rows {
                output.push_str(&render_row(row, transformer)?);
            }
            output.push_str("\\end{tabular}\n\\filbreak\n");
        }
    }

    Ok(output)
}

fn render_row(row: &Row, transformer: &dyn TextTransformer) -> Result<String> {
    let entries = row
        .entries
        .iter()
        .map(|entry| convert(entry, transformer))
        .collect::<Result<Vec<_>>>()?;
    Ok(format!(
        "\\textit{{{}}} & {} \\\\\n",
        convert(&row.label, transformer)?,
        entries.join(FORCED_NEWLINE)
    ))
}

/// Convert leaf content line by line.
///
/// Blank-line paragraph breaks gain extra vertical space, then the content is split on
/// `<br>` and each line is converted on its own.
fn convert(content: &str, transformer: &dyn TextTransformer) -> Result<String> {
    let spaced = content.replace("\n\n", "\n\n\\vspace{0.5em}");
    let lines = spaced
        .split(LINE_MARKER)
        .map(|line| transformer.transform(line).map(|out| out.trim().to_string()))
        .collect::<Result<Vec<_>>>()?;
    Ok(lines.join(FORCED_NEWLINE))
}

fn render_header(metadata: &Metadata) -> String {
    if metadata.is_empty() {
        return String::new();
    }

    let mut header = String::from("\\begin{center}\n");
    if let Some(name) = &metadata.name {
        header.push_str(&format!(
            "    {{\\scshape\\Huge {name}}}\n    \\smallskip\n    \\smallskip\n\n"
        ));
    }
    header.push_str("    \\hrule\n\n    \\vspace*{0.2cm}\n\n");

    let mut contacts = Vec::new();
    if let Some(email) = &metadata.email {
        contacts.push(format!("\\textbf{{Email:}} \\href{{mailto:{email}}}{{{email}}}"));
    }
    if let Some(website) = &metadata.website {
        let (url, shown) = link_parts(website, "");
        contacts.push(format!("\\textbf{{Website:}} \\href{{{url}}}{{{shown}}}"));
    }
    if let Some(github) = &metadata.github {
        let (url, shown) = link_parts(github, "github.com/");
        contacts.push(format!("\\textbf{{GitHub:}} \\href{{{url}}}{{{shown}}}"));
    }
    if !contacts.is_empty() {
        header.push_str(&format!(
            "    {{\\large\n    {}\n    }}\n\n",
            contacts.join(" \\hfill\n    ")
        ));
    }

    header.push_str("    \\vspace*{0.1cm}\n\\end{center}\n");
    header
}
