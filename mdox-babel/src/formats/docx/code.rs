//! Code and diagram-source boxes
//!
//! A fenced block becomes a one-column table so the background and border
//! stay attached to the text across page breaks. Diagram sources are not
//! rendered to pictures; they get a labelled container around the source.

use super::elements::{Alignment, Element, Paragraph, Run, Table, TableCell, TableRow};
use super::mapper::inline_runs;
use super::styles::CODE;
use super::RenderOptions;

const HEADER_FILL: &str = "2B2B2B";
const HEADER_TEXT: &str = "F0F0F0";
const BODY_FILL: &str = "F5F5F5";
const BORDER: &str = "D0D0D0";

const DIAGRAM_HEADER_FILL: &str = "DCE8F7";
const DIAGRAM_HEADER_TEXT: &str = "1F4E79";
const DIAGRAM_NOTE_FILL: &str = "FFF8E1";
const DIAGRAM_BORDER: &str = "9DB7D5";

/// Diagram kinds, matched in order as a prefix of the first source line.
const DIAGRAM_KINDS: &[(&str, &str)] = &[
    ("graph", "Flowchart"),
    ("flowchart", "Flowchart"),
    ("sequencediagram", "Sequence Diagram"),
    ("classdiagram", "Class Diagram"),
    ("erdiagram", "Entity Relationship Diagram"),
    ("gantt", "Gantt Chart"),
    ("pie", "Pie Chart"),
    ("statediagram", "State Diagram"),
    ("journey", "User Journey"),
    ("mindmap", "Mind Map"),
    ("timeline", "Timeline"),
];

const GENERIC_DIAGRAM: &str = "Diagram";

/// Render one fenced block.
pub fn render_code(lang: &str, content: &str, options: &RenderOptions) -> Vec<Element> {
    if is_diagram(lang, options) {
        render_diagram(content, options)
    } else {
        render_code_box(lang, content, options)
    }
}

/// An empty configured language marks nothing as a diagram.
pub fn is_diagram(lang: &str, options: &RenderOptions) -> bool {
    let marker = options.diagram_language.trim();
    !marker.is_empty() && lang.trim().eq_ignore_ascii_case(marker)
}

/// Label for a diagram source, from its first non-empty line.
pub fn diagram_label(source: &str) -> &'static str {
    let Some(first) = source.lines().map(str::trim).find(|line| !line.is_empty()) else {
        return GENERIC_DIAGRAM;
    };
    let first = first.to_lowercase();
    DIAGRAM_KINDS
        .iter()
        .find(|(keyword, _)| first.starts_with(keyword))
        .map(|(_, label)| *label)
        .unwrap_or(GENERIC_DIAGRAM)
}

/// Header text of a diagram container, e.g. "Mermaid Diagram: Flowchart".
pub fn diagram_heading(label: &str, options: &RenderOptions) -> String {
    let language = options.diagram_language.trim();
    let mut chars = language.chars();
    match chars.next() {
        Some(first) => format!("{}{} Diagram: {label}", first.to_uppercase(), chars.as_str()),
        None => format!("Diagram: {label}"),
    }
}

/// Lines shown in a box. Never empty.
pub fn content_lines(content: &str) -> Vec<&str> {
    if content.trim().is_empty() {
        vec![""]
    } else {
        content.split('\n').collect()
    }
}

fn render_code_box(lang: &str, content: &str, options: &RenderOptions) -> Vec<Element> {
    let width = options.section().usable_width();
    let lang = lang.trim();
    let mut table = Table::new(vec![width]).border_color(BORDER);

    if !lang.is_empty() {
        let label = Paragraph::new().style(CODE).spacing(40, 40).keep_next().add_run(
            Run::new(lang)
                .bold(true)
                .font(options.code_font.clone())
                .color(HEADER_TEXT),
        );
        table = table.add_row(TableRow::new(vec![TableCell::new(width)
            .shading(HEADER_FILL)
            .add_paragraph(label)]));
    }

    let body = TableCell::new(width)
        .shading(BODY_FILL)
        .add_paragraphs(source_paragraphs(content, options));
    table = table.add_row(TableRow::new(vec![body]));

    vec![table.into(), Paragraph::new().into()]
}

fn render_diagram(content: &str, options: &RenderOptions) -> Vec<Element> {
    let width = options.section().usable_width();
    let label = diagram_label(content);
    tracing::debug!(label, "rendering diagram source");

    let header = Paragraph::new()
        .align(Alignment::Left)
        .spacing(60, 60)
        .keep_next()
        .add_run(
        Run::new(diagram_heading(label, options))
            .bold(true)
            .color(DIAGRAM_HEADER_TEXT),
    );
    let note = Paragraph::new().spacing(40, 40).add_runs(
        inline_runs(&options.diagram_note, options)
            .into_iter()
            .map(|run| run.italic(true).size(options.code_size * 2)),
    );

    let table = Table::new(vec![width])
        .border_color(DIAGRAM_BORDER)
        .add_row(TableRow::new(vec![TableCell::new(width)
            .shading(DIAGRAM_HEADER_FILL)
            .add_paragraph(header)]))
        .add_row(TableRow::new(vec![TableCell::new(width)
            .shading(DIAGRAM_NOTE_FILL)
            .add_paragraph(note)]))
        .add_row(TableRow::new(vec![TableCell::new(width)
            .shading(BODY_FILL)
            .add_paragraphs(source_paragraphs(content, options))]));

    vec![table.into(), Paragraph::new().into()]
}

fn source_paragraphs(content: &str, options: &RenderOptions) -> Vec<Paragraph> {
    content_lines(content)
        .into_iter()
        .map(|line| {
            Paragraph::new()
                .style(CODE)
                .add_run(Run::new(line).font(options.code_font.clone()))
        })
        .collect()
}
