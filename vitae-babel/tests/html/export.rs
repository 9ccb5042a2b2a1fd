//! Export tests for the HTML format (Tree → HTML)
//!
//! These tests check the structure of the generated page. Most use the recording stub so
//! that the content cells hold the raw fragments.

use crate::common::{document, Recorder, PROFILE, SAMPLE};
use insta::assert_snapshot;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use tempfile::tempdir;
use vitae_babel::format::{Format, SerializedDocument};
use vitae_babel::formats::html::{render_markup, HtmlFormat};
use vitae_babel::VitaeError;

/// The `<div class="cv">` container of a page, without the shell and stylesheet.
fn container(html: &str) -> &str {
    html.split_once("<body>\n")
        .and_then(|(_, rest)| rest.split_once("\n</body>"))
        .map(|(body, _)| body)
        .unwrap()
}

fn html_with_stub(source: &str) -> (String, Recorder) {
    let recorder = Recorder::default();
    let doc = document(source);
    let html = render_markup(&doc.tree, &recorder).unwrap();
    (html, recorder)
}

#[test]
fn test_page_shell() {
    let (html, _) = html_with_stub(SAMPLE);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Curriculum Vitae</title>"));
    assert!(html.contains("<div class=\"cv\">"));
    assert!(html.contains(".cv-primary-group"));
    assert!(!html.contains("{{"));
}

#[test]
fn test_table_group_structure() {
    let (html, _) = html_with_stub(SAMPLE);

    assert!(html.contains("<table class=\"cv-group\">"));
    assert!(html.contains("<th rowspan=\"2\" class=\"cv-primary-group\">Experience</th>"));
    assert!(html.contains("<td class=\"cv-secondary-group\"><em>Acme Corp</em></td>"));
    assert!(html.contains("<td class=\"cv-content-cell\">\n2020-2022\n</td>"));
    assert!(html.contains("<td class=\"cv-content-cell\">\nDid things.\n</td>"));
}

#[test]
fn test_plain_group_structure() {
    let (html, _) = html_with_stub(SAMPLE);

    assert!(html.contains("<section class=\"cv-group cv-plain\">"));
    assert!(html.contains("<h2 class=\"cv-primary-group\">Skills</h2>"));
}

#[test]
fn test_rowspan_matches_leaf_count() {
    let source = "[Experience, [[Acme], [a, b], [Beta], [c]], Skills, [Rust]]";
    let doc = document(source);
    let (html, _) = html_with_stub(source);

    let rowspan = Regex::new(r#"<th rowspan="(\d+)""#).unwrap();
    let spans: Vec<usize> = rowspan
        .captures_iter(&html)
        .map(|caps| caps[1].parse().unwrap())
        .collect();
    assert_eq!(spans, vec![3]);
    assert_eq!(doc.tree.children()[0].leaf_count(), 3);

    let rows = Regex::new(r"<tr>").unwrap();
    assert_eq!(rows.find_iter(&html).count(), 3);
    // Only the first line of each row carries the label.
    assert_eq!(html.matches("<td class=\"cv-secondary-group\"></td>").count(), 1);
}

#[test]
fn test_en_dashes_replace_double_hyphens_after_conversion() {
    let (html, recorder) = html_with_stub("[Experience, [[Acme Corp], [Senior--Engineer]]]");

    assert_eq!(recorder.seen(), vec!["Senior--Engineer"]);
    assert!(html.contains("Senior\u{2013}Engineer"));
    assert!(!html.contains("--"));
}

#[test]
fn test_labels_and_titles_are_escaped() {
    let (html, recorder) = html_with_stub("[Q&A, [[R&D], [Built <things>]]]");

    assert!(html.contains(">Q&amp;A</th>"));
    assert!(html.contains("<em>R&amp;D</em>"));
    assert_eq!(recorder.seen(), vec!["Built <things>"]);
}

#[test]
fn test_plain_group_renders_first_entry_only() {
    let (html, recorder) = html_with_stub("[About, [first, second]]");

    assert!(html.contains("first"));
    assert!(!html.contains("second"));
    assert_eq!(recorder.calls(), 1);
}

#[test]
fn test_markdown_is_converted() {
    let doc = document("[About, [Built **compilers**.]]");
    let html = HtmlFormat::default().serialize(&doc).unwrap();

    assert!(html.contains("<strong>compilers</strong>"));
}

#[test]
fn test_metadata_header_and_title() {
    let doc = document("- name: Ada Lovelace\n  github: ada\n- About\n- - Mathematician.\n");
    let html = HtmlFormat::new(Recorder::default()).serialize(&doc).unwrap();

    assert!(html.contains("<title>Ada Lovelace</title>"));
    assert!(html.contains("<h1>Ada Lovelace</h1>"));
    assert!(html.contains("<a href=\"https://github.com/ada\">github.com/ada</a>"));
}

#[test]
fn test_custom_css_is_appended() {
    let dir = tempdir().unwrap();
    let css_path = dir.path().join("extra.css");
    fs::write(&css_path, ".cv { max-width: 40rem; }").unwrap();

    let mut options = HashMap::new();
    options.insert("css-path".to_string(), css_path.display().to_string());
    let doc = document(SAMPLE);
    let output = HtmlFormat::new(Recorder::default())
        .serialize_with_options(&doc, &options)
        .unwrap();

    match output {
        SerializedDocument::Text(html) => {
            let base = html.find(".cv-primary-group").unwrap();
            let custom = html.find(".cv { max-width: 40rem; }").unwrap();
            assert!(base < custom);
        }
        SerializedDocument::Binary(_) => panic!("expected text output"),
    }
}

#[test]
fn test_unknown_option_is_rejected() {
    let mut options = HashMap::new();
    options.insert("theme".to_string(), "dark".to_string());
    let result = HtmlFormat::default().serialize_with_options(&document(SAMPLE), &options);
    assert!(matches!(result, Err(VitaeError::NotSupported(_))));
}

#[test]
fn test_profile_snapshot() {
    let doc = document(PROFILE);
    let html = HtmlFormat::new(Recorder::default()).serialize(&doc).unwrap();

    assert!(html.contains("<title>Ada Lovelace</title>"));
    assert_snapshot!(container(&html), @r###"
    <div class="cv">
    <header class="cv-header">
    <h1>Ada Lovelace</h1>
    <div class="cv-contact">
    <span><strong>Email:</strong> <a href="mailto:ada@example.org">ada@example.org</a></span>
    </div>
    </header>
    <table class="cv-group">
    <tr>
    <th rowspan="2" class="cv-primary-group">Experience</th>
    <td class="cv-secondary-group"><em>Acme Corp</em></td>
    <td class="cv-content-cell">
    2020–2022
    </td>
    </tr>
    <tr>
    <td class="cv-secondary-group"></td>
    <td class="cv-content-cell">
    Did things.
    </td>
    </tr>
    </table>
    <section class="cv-group cv-plain">
    <h2 class="cv-primary-group">Skills</h2>
    <div class="cv-content-cell">
    Rust
    </div>
    </section>
    </div>
    "###);
}

#[test]
fn test_rendering_is_deterministic() {
    let doc = document(PROFILE);
    let format = HtmlFormat::new(Recorder::default());
    assert_eq!(format.serialize(&doc).unwrap(), format.serialize(&doc).unwrap());
}

#[test]
fn test_line_markers_in_labels_become_breaks() {
    let (html, _) = html_with_stub("[Experience, [[Acme<br>Labs & Co], [Built things.]]]");
    assert!(html.contains("<em>Acme<br>Labs &amp; Co</em>"));
}
