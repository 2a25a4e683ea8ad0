//! Packaging tests (Document → .docx container)

use mdox_babel::transforms::markdown_to_docx;
use mdox_babel::{assemble, pack, scan, RenderOptions};
use std::io::{Cursor, Read};
use std::path::PathBuf;

fn kitchensink() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("kitchensink.md");
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    let mut part = archive
        .by_name(name)
        .unwrap_or_else(|e| panic!("missing part {name}: {e}"));
    let mut text = String::new();
    part.read_to_string(&mut text).expect("utf-8 part");
    text
}

#[test]
fn test_kitchensink_document_part() {
    let bytes = markdown_to_docx(&kitchensink(), "Field Guide", &RenderOptions::default()).unwrap();
    let document = read_part(&bytes, "word/document.xml");

    for expected in [
        "Field Guide",
        "Table of Contents",
        "Mermaid Diagram: Sequence Diagram",
        "Stage Matrix",
        "Key Tasks:",
        r#"<w:pStyle w:val="Heading1"/>"#,
        r#"<w:pStyle w:val="Heading3"/>"#,
        r#"<w:pStyle w:val="Quote"/>"#,
        r#"<w:pStyle w:val="ListParagraph"/>"#,
        r#"<w:tblHeader/>"#,
    ] {
        assert!(document.contains(expected), "document.xml lacks {expected}");
    }

    // orphan markers never reach the document
    assert!(!document.contains("**"));
}

#[test]
fn test_kitchensink_numbering_part() {
    let bytes = markdown_to_docx(&kitchensink(), "", &RenderOptions::default()).unwrap();
    let numbering = read_part(&bytes, "word/numbering.xml");
    // bullet instance plus one instance per separated numbered list
    assert_eq!(numbering.matches("<w:num ").count(), 3);
    assert!(numbering.contains(r#"<w:numFmt w:val="lowerLetter"/>"#));
}

#[test]
fn test_nested_bullet_keeps_numbered_list_counting() {
    let bytes = markdown_to_docx(
        "1. first\n    - detail\n2. second",
        "",
        &RenderOptions::default(),
    )
    .unwrap();
    let numbering = read_part(&bytes, "word/numbering.xml");
    assert_eq!(numbering.matches("<w:num ").count(), 2);

    let document = read_part(&bytes, "word/document.xml");
    assert_eq!(document.matches(r#"<w:numId w:val="2"/>"#).count(), 2);
    assert!(!document.contains(r#"<w:numId w:val="3"/>"#));
}

#[test]
fn test_title_metadata() {
    let bytes = pack(&assemble(&scan("text"), "Quarterly Report")).unwrap();
    let core = read_part(&bytes, "docProps/core.xml");
    assert!(core.contains("<dc:title>Quarterly Report</dc:title>"));

    let untitled = pack(&assemble(&[], "")).unwrap();
    assert!(read_part(&untitled, "docProps/core.xml").contains("Untitled Document"));
}

#[test]
fn test_fonts_reach_styles_part() {
    let options = RenderOptions {
        body_font: "Georgia".to_string(),
        code_font: "Fira Code".to_string(),
        ..RenderOptions::default()
    };
    let bytes = markdown_to_docx("text", "", &options).unwrap();
    let styles = read_part(&bytes, "word/styles.xml");
    assert!(styles.contains(r#"w:ascii="Georgia""#));
    assert!(styles.contains(r#"w:ascii="Fira Code""#));
}

#[test]
fn test_content_types_list_all_parts() {
    let bytes = pack(&assemble(&[], "")).unwrap();
    let types = read_part(&bytes, "[Content_Types].xml");
    for part in [
        "/word/document.xml",
        "/word/styles.xml",
        "/word/numbering.xml",
        "/word/settings.xml",
        "/docProps/core.xml",
    ] {
        assert!(types.contains(part), "content types lack {part}");
    }
}
