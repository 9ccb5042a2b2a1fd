//! PDF export tests with an in-process compiler stub.

use crate::common::{document, FailingCompiler, Recorder, StubCompiler, SAMPLE};
use std::collections::HashMap;
use std::fs;
use tempfile::tempdir;
use vitae_babel::format::{Format, SerializedDocument};
use vitae_babel::formats::{LatexFormat, PdfFormat};
use vitae_babel::VitaeError;

fn options(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn binary(output: SerializedDocument) -> Vec<u8> {
    match output {
        SerializedDocument::Binary(bytes) => bytes,
        SerializedDocument::Text(_) => panic!("Expected binary PDF output"),
    }
}

#[test]
fn test_compiles_in_temporary_directory() {
    let compiler = StubCompiler::default();
    let format = PdfFormat::new(LatexFormat::new(Recorder::default()), compiler.clone());

    let bytes = binary(
        format
            .serialize_with_options(&document(SAMPLE), &HashMap::new())
            .unwrap(),
    );
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(compiler.runs(), 1);
}

#[test]
fn test_build_directory_keeps_source() {
    let dir = tempdir().unwrap();
    let build = dir.path().join("build");
    let format = PdfFormat::new(LatexFormat::new(Recorder::default()), StubCompiler::default());

    format
        .serialize_with_options(
            &document(SAMPLE),
            &options(&[("build-dir", build.to_str().unwrap()), ("jobname", "resume")]),
        )
        .unwrap();

    let tex = fs::read_to_string(build.join("resume.tex")).unwrap();
    assert!(tex.contains("\\section*{Experience}"));
    assert!(build.join("resume.pdf").is_file());
}

#[test]
fn test_unchanged_source_reuses_pdf() {
    let dir = tempdir().unwrap();
    let build = dir.path().to_str().unwrap().to_string();
    let compiler = StubCompiler::default();
    let format = PdfFormat::new(LatexFormat::new(Recorder::default()), compiler.clone());
    let opts = options(&[("build-dir", build.as_str()), ("reuse", "true")]);

    let first = binary(format.serialize_with_options(&document(SAMPLE), &opts).unwrap());
    let second = binary(format.serialize_with_options(&document(SAMPLE), &opts).unwrap());
    assert_eq!(first, second);
    assert_eq!(compiler.runs(), 1);

    let changed = document("[Skills, [Rust, Go]]");
    format.serialize_with_options(&changed, &opts).unwrap();
    assert_eq!(compiler.runs(), 2);
}

#[test]
fn test_without_reuse_always_compiles() {
    let dir = tempdir().unwrap();
    let build = dir.path().to_str().unwrap().to_string();
    let compiler = StubCompiler::default();
    let format = PdfFormat::new(LatexFormat::new(Recorder::default()), compiler.clone());
    let opts = options(&[("build-dir", build.as_str())]);

    format.serialize_with_options(&document(SAMPLE), &opts).unwrap();
    format.serialize_with_options(&document(SAMPLE), &opts).unwrap();
    assert_eq!(compiler.runs(), 2);
}

#[test]
fn test_failed_compilation_leaves_no_stale_pdf() {
    let dir = tempdir().unwrap();
    let stale = dir.path().join("cv.pdf");
    fs::write(&stale, "%PDF-old").unwrap();

    let format = PdfFormat::new(LatexFormat::new(Recorder::default()), FailingCompiler);
    let result = format.serialize_with_options(
        &document(SAMPLE),
        &options(&[("build-dir", dir.path().to_str().unwrap())]),
    );

    assert!(matches!(result, Err(VitaeError::ExternalTool(_))));
    assert!(!stale.exists());
}

#[test]
fn test_text_serialization_is_not_supported() {
    let format = PdfFormat::new(LatexFormat::new(Recorder::default()), StubCompiler::default());
    assert!(matches!(
        format.serialize(&document(SAMPLE)),
        Err(VitaeError::NotSupported(_))
    ));
}
