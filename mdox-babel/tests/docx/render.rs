//! Rendering tests (Blocks → Elements → Document)

use mdox_babel::formats::docx::code::{diagram_label, render_code};
use mdox_babel::formats::docx::elements::{Element, Paragraph, Table};
use mdox_babel::formats::docx::mapper::ElementMapper;
use mdox_babel::{assemble, assemble_with_options, scan, PageSize, RenderOptions};

fn first_table(elements: &[Element]) -> &Table {
    elements
        .iter()
        .find_map(|element| match element {
            Element::Table(table) => Some(table),
            _ => None,
        })
        .expect("a table element")
}

fn last_row_lines(table: &Table) -> Vec<String> {
    let row = table.rows.last().expect("at least one row");
    row.cells[0].paragraphs.iter().map(Paragraph::text).collect()
}

#[test]
fn test_code_box_lines_follow_content_split() {
    let options = RenderOptions::default();
    for content in ["x = 1\nprint(x)", "one", "a\n\n\nb", "  indented\n\ttabbed", "trailing\n"] {
        let elements = render_code("text", content, &options);
        let expected: Vec<String> = content.split('\n').map(str::to_string).collect();
        assert_eq!(last_row_lines(first_table(&elements)), expected, "{content:?}");
    }
}

#[test]
fn test_code_box_never_empty() {
    let options = RenderOptions::default();
    let elements = render_code("", "", &options);
    assert_eq!(last_row_lines(first_table(&elements)), vec![String::new()]);
}

#[test]
fn test_python_fence_renders_header_and_two_lines() {
    let blocks = scan("```python\nx = 1\nprint(x)\n```");
    let options = RenderOptions::default();
    let mut mapper = ElementMapper::new(&options);
    let elements = mapper.map(&blocks[0], true);
    let table = first_table(&elements);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].cells[0].paragraphs[0].text(), "python");
    assert_eq!(last_row_lines(table), vec!["x = 1", "print(x)"]);
}

#[test]
fn test_mermaid_fence_renders_flowchart_container() {
    let blocks = scan("```mermaid\ngraph TD\nA-->B\n```");
    let options = RenderOptions::default();
    let mut mapper = ElementMapper::new(&options);
    let elements = mapper.map(&blocks[0], true);
    let table = first_table(&elements);
    assert_eq!(table.rows.len(), 3);
    assert_eq!(
        table.rows[0].cells[0].paragraphs[0].text(),
        "Mermaid Diagram: Flowchart"
    );
    assert_eq!(last_row_lines(table), vec!["graph TD", "A-->B"]);
}

#[test]
fn test_diagram_label_skips_leading_blank_lines() {
    assert_eq!(diagram_label("\n\n   GANTT\n  title x"), "Gantt Chart");
    assert_eq!(diagram_label("%% comment\ngraph LR"), "Diagram");
}

#[test]
fn test_custom_diagram_language() {
    let options = RenderOptions {
        diagram_language: "diagram".to_string(),
        ..RenderOptions::default()
    };
    assert_eq!(first_table(&render_code("diagram", "pie", &options)).rows.len(), 3);
    // with another marker configured, mermaid is an ordinary code box
    assert_eq!(first_table(&render_code("mermaid", "pie", &options)).rows.len(), 2);
}

#[test]
fn test_empty_document_has_only_scaffold() {
    let document = assemble(&scan(""), "");
    assert_eq!(document.title, "Untitled Document");
    assert_eq!(document.body.len(), 5);
    assert!(matches!(document.body[3], Element::TableOfContents(_)));
}

#[test]
fn test_chapter_headings_break_pages_after_first_block() {
    let source = "## Chapter 1\n\ntext\n\n## Chapter 2\n\n## Appendix\n";
    let document = assemble(&scan(source), "Book");
    let breaks = document
        .body
        .iter()
        .filter(|element| matches!(element, Element::Paragraph(p) if p.has_page_break()))
        .count();
    // two in the front matter, one before "Chapter 2"
    assert_eq!(breaks, 3);
}

#[test]
fn test_table_width_tracks_page_size() {
    let blocks = scan("| a | b |\n|---|---|\n| 1 | 2 |");
    let letter = assemble(&blocks, "");
    let a4 = assemble_with_options(
        &blocks,
        "",
        &RenderOptions {
            page_size: PageSize::A4,
            ..RenderOptions::default()
        },
    );
    assert_eq!(first_table(&letter.body).column_widths, vec![4680, 4680]);
    assert_eq!(first_table(&a4.body).column_widths, vec![4513, 4513]);
}
