//! HTML serialization
//!
//! Pipeline: Tree → Outline → `<div class="cv">` container → en-dash pass → page shell

use crate::document::Metadata;
use crate::error::Result;
use crate::formats::common::{fill_template, link_parts};
use crate::outline::{Group, GroupBody, Outline, Row, Section};
use crate::transform::TextTransformer;
use crate::tree::Tree;

const PAGE: &str = include_str!("../../../templates/page.html");
const BASE_CSS: &str = include_str!("../../../css/cv.css");
const DEFAULT_TITLE: &str = "Curriculum Vitae";
/// Explicit line-break marker inside content strings.
const LINE_MARKER: &str = "<br>";

/// Options for HTML serialization
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Optional custom CSS appended after the built-in stylesheet
    pub custom_css: Option<String>,
}

impl HtmlOptions {
    pub fn with_custom_css(mut self, css: String) -> Self {
        self.custom_css = Some(css);
        self
    }
}

/// Render a complete HTML page with the default title and stylesheet.
pub fn render_markup(tree: &Tree, transformer: &dyn TextTransformer) -> Result<String> {
    render_markup_with_options(
        tree,
        &Metadata::default(),
        transformer,
        &HtmlOptions::default(),
    )
}

/// Render a complete HTML page.
///
/// Every `--` in the assembled document (title and container) becomes an en dash. The
/// substitution runs once, after all fragments are in place, and never touches the
/// stylesheet.
pub fn render_markup_with_options(
    tree: &Tree,
    metadata: &Metadata,
    transformer: &dyn TextTransformer,
    options: &HtmlOptions,
) -> Result<String> {
    let outline = Outline::from_tree(tree)?;

    let mut container = String::from("<div class=\"cv\">\n");
    container.push_str(&render_header(metadata));
    for section in &outline.sections {
        container.push_str(&render_section(section, transformer)?);
    }
    container.push_str("</div>");

    let title = en_dashes(&html_escape(metadata.name.as_deref().unwrap_or(DEFAULT_TITLE)));
    let body = en_dashes(&container);
    let style = match &options.custom_css {
        Some(css) => format!("{BASE_CSS}\n{css}"),
        None => BASE_CSS.to_string(),
    };

    Ok(fill_template(
        PAGE,
        &[
            ("title", title.as_str()),
            ("style", style.as_str()),
            ("body", body.as_str()),
        ],
    ))
}

fn en_dashes(text: &str) -> String {
    text.replace("--", "\u{2013}")
}

fn render_header(metadata: &Metadata) -> String {
    if metadata.is_empty() {
        return String::new();
    }

    let mut header = String::from("<header class=\"cv-header\">\n");
    if let Some(name) = &metadata.name {
        header.push_str(&format!("<h1>{}</h1>\n", html_escape(name)));
    }

    let mut contacts = Vec::new();
    if let Some(email) = &metadata.email {
        let email = html_escape(email);
        contacts.push(format!(
            "<span><strong>Email:</strong> <a href=\"mailto:{email}\">{email}</a></span>"
        ));
    }
    if let Some(website) = &metadata.website {
        let (url, shown) = link_parts(website, "");
        contacts.push(format!(
            "<span><strong>Website:</strong> <a href=\"{}\">{}</a></span>",
            html_escape(&url),
            html_escape(&shown)
        ));
    }
    if let Some(github) = &metadata.github {
        let (url, shown) = link_parts(github, "github.com/");
        contacts.push(format!(
            "<span><strong>GitHub:</strong> <a href=\"{}\">{}</a></span>",
            html_escape(&url),
            html_escape(&shown)
        ));
    }
    if !contacts.is_empty() {
        header.push_str("<div class=\"cv-contact\">\n");
        for contact in contacts {
            header.push_str(&contact);
            header.push('\n');
        }
        header.push_str("</div>\n");
    }

    header.push_str("</header>\n");
    header
}

fn render_section(section: &Section, transformer: &dyn TextTransformer) -> Result<String> {
    match section {
        Section::Text(content) => Ok(format!(
            "<div class=\"cv-text\">\n{}\n</div>\n",
            transformer.transform(content)?.trim_end()
        )),
        Section::Group(group) => render_group(group, transformer),
    }
}

fn render_group(group: &Group, transformer: &dyn TextTransformer) -> Result<String> {
    let title = html_escape(&group.title);

    match &group.body {
        GroupBody::Paragraph(content) => Ok(format!(
            "<section class=\"cv-group cv-plain\">\n\
             <h2 class=\"cv-primary-group\">{title}</h2>\n\
             <div class=\"cv-content-cell\">\n{}\n</div>\n\
             </section>\n",
            transformer.transform(content)?.trim_end()
        )),
        GroupBody::Table(rows) => {
            let mut output = String::from("<table class=\"cv-group\">\n");
            let mut heading = Some(format!(
                "<th rowspan=\"{}\" class=\"cv-primary-group\">{title}</th>\n",
                group.leaf_count()
            ));
            for row in rows {
                render_row(row, &mut heading, transformer, &mut output)?;
            }
            output.push_str("</table>\n");
            Ok(output)
        }
    }
}

/// Emit one `<tr>` per entry. The first line of the row carries the label; `heading` is
/// consumed by the very first line of the group.
fn render_row(
    row: &Row,
    heading: &mut Option<String>,
    transformer: &dyn TextTransformer,
    output: &mut String,
) -> Result<()> {
    for (index, entry) in row.entries.iter().enumerate() {
        output.push_str("<tr>\n");
        if let Some(cell) = heading.take() {
            output.push_str(&cell);
        }
        if index == 0 {
            output.push_str(&format!(
                "<td class=\"cv-secondary-group\"><em>{}</em></td>\n",
                label_markup(&row.label)
            ));
        } else {
            output.push_str("<td class=\"cv-secondary-group\"></td>\n");
        }
        output.push_str(&format!(
            "<td class=\"cv-content-cell\">\n{}\n</td>\n",
            transformer.transform(entry)?.trim_end()
        ));
        output.push_str("</tr>\n");
    }
    Ok(())
}

/// Row labels are plain text: escaped, with `<br>` markers kept as line breaks.
fn label_markup(label: &str) -> String {
    label
        .split(LINE_MARKER)
        .map(html_escape)
        .collect::<Vec<_>>()
        .join(LINE_MARKER)
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
