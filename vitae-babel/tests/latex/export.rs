//! Export tests for the LaTeX format (Tree → LaTeX)
//!
//! Leaf text goes through a recording stub so that the expected output is independent of
//! pandoc.

use crate::common::{document, Failing, Recorder, PROFILE, SAMPLE};
use insta::assert_snapshot;
use vitae_babel::format::Format;
use vitae_babel::formats::latex::{render_body, render_typeset, LatexFormat};
use vitae_babel::outline::Outline;
use vitae_babel::{Metadata, VitaeError};

fn body(source: &str, recorder: &Recorder) -> String {
    let doc = document(source);
    render_body(&Outline::from_tree(&doc.tree).unwrap(), recorder).unwrap()
}

#[test]
fn test_table_and_paragraph_groups() {
    let latex = body(SAMPLE, &Recorder::default());

    let expected = "\
\\section*{Experience}
\\vspace{-0.8em}
\\hrule
\\begin{tabular}{L!{\\VRule}R}
\\textit{Acme Corp} & 2020-2022 \\newline Did things. \\\\
\\end{tabular}
\\filbreak

\\section*{Skills}
\\vspace{-0.8em}
\\hrule
\\smallskip
Rust
";
    assert_eq!(latex, expected);
}

#[test]
fn test_top_level_leaf_is_bare_text() {
    let latex = body("[Open to relocation.]", &Recorder::default());
    assert_eq!(latex, "Open to relocation.\n");
}

#[test]
fn test_line_markers_are_converted_separately() {
    let recorder = Recorder::default();
    let latex = body("[About, [First line<br>Second line]]", &recorder);

    assert_eq!(recorder.seen(), vec!["First line", "Second line"]);
    assert!(latex.contains("First line \\newline Second line"));
}

#[test]
fn test_paragraph_breaks_gain_vertical_space() {
    let recorder = Recorder::default();
    let latex = body("[About, [\"One.\\n\\nTwo.\"]]", &recorder);

    assert_eq!(recorder.seen(), vec!["One.\n\n\\vspace{0.5em}Two."]);
    assert!(latex.contains("One.\n\n\\vspace{0.5em}Two."));
}

#[test]
fn test_labels_are_converted_and_titles_are_verbatim() {
    let recorder = Recorder::default();
    body(SAMPLE, &recorder);

    let seen = recorder.seen();
    assert!(seen.contains(&"Acme Corp".to_string()));
    assert!(!seen.contains(&"Experience".to_string()));
    assert!(!seen.contains(&"Skills".to_string()));
}

#[test]
fn test_document_is_wrapped_in_preamble() {
    let doc = document(SAMPLE);
    let latex = render_typeset(&doc.tree, &Metadata::default(), &Recorder::default()).unwrap();

    assert!(latex.starts_with("\\documentclass"));
    assert!(latex.contains("\\begin{document}"));
    assert!(latex.ends_with("\\end{document}\n"));
    assert!(!latex.contains("{{header}}"));
    assert!(!latex.contains("\\begin{center}"));
}

#[test]
fn test_metadata_header() {
    let doc = document(
        "- name: Ada Lovelace\n  email: ada@example.org\n- Summary\n- - Mathematician.\n",
    );
    let format = LatexFormat::new(Recorder::default());
    let latex = format.serialize(&doc).unwrap();

    assert!(latex.contains("{\\scshape\\Huge Ada Lovelace}"));
    assert!(latex.contains("\\href{mailto:ada@example.org}{ada@example.org}"));
    assert!(latex.contains("Mathematician."));
}

#[test]
fn test_rendering_is_deterministic() {
    let doc = document(SAMPLE);
    let format = LatexFormat::new(Recorder::default());
    assert_eq!(format.serialize(&doc).unwrap(), format.serialize(&doc).unwrap());
}

#[test]
fn test_deep_nesting_is_rejected_before_conversion() {
    let recorder = Recorder::default();
    let doc = document("[Experience, [Acme, [Team, [Project]]]]");
    let result = render_typeset(&doc.tree, &doc.metadata, &recorder);

    assert!(matches!(result, Err(VitaeError::UnsupportedShape(_))));
    assert_eq!(recorder.calls(), 0);
}

#[test]
fn test_mixed_group_is_rejected() {
    let doc = document("[Experience, [Acme, [\"2020\"], Freelance]]");
    let format = LatexFormat::new(Recorder::default());
    assert!(matches!(
        format.serialize(&doc),
        Err(VitaeError::UnsupportedShape(_))
    ));
}

#[test]
fn test_converter_failure_aborts_rendering() {
    let doc = document(SAMPLE);
    let format = LatexFormat::new(Failing);
    assert!(matches!(
        format.serialize(&doc),
        Err(VitaeError::ExternalTool(_))
    ));
}

#[test]
fn test_profile_snapshot() {
    let doc = document(PROFILE);
    let latex = render_typeset(&doc.tree, &doc.metadata, &Recorder::default()).unwrap();
    let (preamble, rest) = latex.split_once("\\begin{document}\n").unwrap();

    assert!(preamble.starts_with("\\documentclass"));
    assert_snapshot!(rest, @r###"
    \begin{center}
        {\scshape\Huge Ada Lovelace}
        \smallskip
        \smallskip

        \hrule

        \vspace*{0.2cm}

        {\large
        \textbf{Email:} \href{mailto:ada@example.org}{ada@example.org}
        }

        \vspace*{0.1cm}
    \end{center}

    \renewcommand{\arraystretch}{1.5}

    \hypersetup{
         colorlinks = true,
         linkcolor = gray,
         anchorcolor = gray,
         citecolor = gray,
         filecolor = gray,
         urlcolor = gray
    }

    \section*{Experience}
    \vspace{-0.8em}
    \hrule
    \begin{tabular}{L!{\VRule}R}
    \textit{Acme Corp} & 2020--2022 \newline Did things. \\
    \end{tabular}
    \filbreak

    \section*{Skills}
    \vspace{-0.8em}
    \hrule
    \smallskip
    Rust

    \end{document}
    "###);
}

#[test]
fn test_line_markers_in_labels_become_newlines() {
    let latex = body("[Experience, [[Acme<br>Labs], [Built things.]]]", &Recorder::default());
    assert!(latex.contains("\\textit{Acme \\newline Labs} & Built things. \\\\"));
}
