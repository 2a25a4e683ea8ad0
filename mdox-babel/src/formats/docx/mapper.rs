//! Block → element mapping
//!
//! One call per block. Code blocks go to [`super::code`]; everything else is
//! handled here. Inline emphasis is resolved for every text field.

use super::code::render_code;
use super::elements::{Alignment, Border, Element, Paragraph, Run, Table, TableCell, TableRow};
use super::styles::{
    heading_style, BODY, BULLET_LEVELS, BULLET_NUM_ID, FIRST_NUMBERED_NUM_ID, LIST,
    NUMBERED_LEVELS, QUOTE,
};
use super::RenderOptions;
use crate::formats::markdown::inline::format_inline;
use crate::ir::blocks::{Block, ListItem};
use crate::ir::runs::StyledRun;
use once_cell::sync::Lazy;
use regex::Regex;

static CHAPTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^chapter\s+\d+").unwrap());

const QUOTE_ACCENT: &str = "4472C4";
const RULE_COLOR: &str = "A6A6A6";
const TABLE_HEADER_FILL: &str = "D9E2F3";
const CODE_SPAN_COLOR: &str = "C7254E";

/// Convert inline-formatted text into document runs.
pub fn inline_runs(text: &str, options: &RenderOptions) -> Vec<Run> {
    format_inline(text)
        .iter()
        .map(|styled| styled_run(styled, options))
        .collect()
}

fn styled_run(styled: &StyledRun, options: &RenderOptions) -> Run {
    let run = Run::new(styled.text.clone())
        .bold(styled.bold)
        .italic(styled.italic);
    if styled.code {
        run.font(options.code_font.clone()).color(CODE_SPAN_COLOR)
    } else {
        run
    }
}

/// Maps blocks to elements for one document.
///
/// Numbering restarts at 1 only when a non-list block comes between two
/// numbered lists; a numbered list split by a nested bullet list keeps
/// counting. Each restart takes a fresh numbering instance, so the mapper
/// keeps a count that the assembler reads back when declaring numbering.
/// Create one mapper per document.
pub struct ElementMapper<'a> {
    options: &'a RenderOptions,
    numbered_lists: usize,
    /// Instance of the numbered list in the current run of list blocks.
    open_num_id: Option<usize>,
}

impl<'a> ElementMapper<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            numbered_lists: 0,
            open_num_id: None,
        }
    }

    /// Number of numbering instances handed out so far.
    pub fn numbered_list_count(&self) -> usize {
        self.numbered_lists
    }

    pub fn map(&mut self, block: &Block, is_first: bool) -> Vec<Element> {
        if !matches!(block, Block::BulletList { .. } | Block::NumberedList { .. }) {
            self.open_num_id = None;
        }
        match block {
            Block::Heading { level, text } => self.heading(*level, text, is_first),
            Block::Paragraph { text } => vec![Paragraph::new()
                .style(BODY)
                .add_runs(inline_runs(text, self.options))
                .into()],
            Block::Code { lang, content } => render_code(lang, content, self.options),
            Block::BulletList { items } => self.list(items, BULLET_NUM_ID, BULLET_LEVELS),
            Block::NumberedList { items } => {
                let num_id = self.numbered_num_id();
                self.list(items, num_id, NUMBERED_LEVELS)
            }
            Block::Blockquote { text } => vec![Paragraph::new()
                .style(QUOTE)
                .border(Border::left(QUOTE_ACCENT, 24, 8))
                .add_runs(inline_runs(text, self.options))
                .into()],
            Block::Table { headers, rows } => self.table(headers, rows),
            Block::Hr => vec![Paragraph::new()
                .spacing(120, 120)
                .border(Border::bottom(RULE_COLOR, 6, 1))
                .into()],
        }
    }

    fn numbered_num_id(&mut self) -> usize {
        if let Some(num_id) = self.open_num_id {
            return num_id;
        }
        let num_id = FIRST_NUMBERED_NUM_ID + self.numbered_lists;
        self.numbered_lists += 1;
        self.open_num_id = Some(num_id);
        num_id
    }

    fn heading(&self, level: usize, text: &str, is_first: bool) -> Vec<Element> {
        let mut elements = Vec::new();
        if level == 2 && !is_first && CHAPTER.is_match(text.trim()) {
            elements.push(Paragraph::page_break().into());
        }
        elements.push(
            Paragraph::new()
                .style(heading_style(level))
                .add_runs(inline_runs(text, self.options))
                .into(),
        );
        elements
    }

    fn list(&self, items: &[ListItem], num_id: usize, levels: usize) -> Vec<Element> {
        items
            .iter()
            .map(|item| {
                Paragraph::new()
                    .style(LIST)
                    .numbering(num_id, item.level.min(levels - 1))
                    .add_runs(inline_runs(&item.text, self.options))
                    .into()
            })
            .collect()
    }

    fn table(&self, headers: &[String], rows: &[Vec<String>]) -> Vec<Element> {
        let usable = self.options.section().usable_width();
        let column = usable / headers.len().max(1);

        let header_cells = headers
            .iter()
            .map(|header| {
                TableCell::new(column).shading(TABLE_HEADER_FILL).add_paragraph(
                    Paragraph::new().align(Alignment::Center).add_runs(
                        inline_runs(header, self.options)
                            .into_iter()
                            .map(|run| run.bold(true)),
                    ),
                )
            })
            .collect();

        let mut table = Table::new(vec![column; headers.len().max(1)])
            .add_row(TableRow::new(header_cells).header());
        for row in rows {
            let cells = row
                .iter()
                .map(|cell| {
                    TableCell::new(column)
                        .add_paragraph(Paragraph::new().add_runs(inline_runs(cell, self.options)))
                })
                .collect();
            table = table.add_row(TableRow::new(cells));
        }

        vec![table.into(), Paragraph::new().into()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::docx::elements::BorderSide;
    use crate::formats::markdown::scan;

    fn paragraph(element: &Element) -> &Paragraph {
        match element {
            Element::Paragraph(paragraph) => paragraph,
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    fn heading(level: usize, text: &str) -> Block {
        Block::Heading {
            level,
            text: text.to_string(),
        }
    }

    #[test]
    fn headings_use_tier_styles() {
        let options = RenderOptions::default();
        let mut mapper = ElementMapper::new(&options);
        let out = mapper.map(&heading(5, "Deep **bold**"), false);
        assert_eq!(out.len(), 1);
        let p = paragraph(&out[0]);
        assert_eq!(p.style.as_deref(), Some("Heading3"));
        assert_eq!(p.text(), "Deep bold");
        assert!(p.runs[1].bold);
    }

    #[test]
    fn chapter_heading_breaks_page_unless_first() {
        let options = RenderOptions::default();
        let mut mapper = ElementMapper::new(&options);

        let out = mapper.map(&heading(2, "Chapter 3: Results"), false);
        assert_eq!(out.len(), 2);
        assert!(paragraph(&out[0]).has_page_break());

        let first = mapper.map(&heading(2, "chapter 1"), true);
        assert_eq!(first.len(), 1);

        let level_one = mapper.map(&heading(1, "Chapter 2"), false);
        assert_eq!(level_one.len(), 1);

        let no_number = mapper.map(&heading(2, "Chapter One"), false);
        assert_eq!(no_number.len(), 1);
    }

    #[test]
    fn list_levels_are_clamped() {
        let options = RenderOptions::default();
        let mut mapper = ElementMapper::new(&options);
        let items = vec![ListItem::new("a", 0), ListItem::new("b", 5)];

        let bullets = mapper.map(&Block::BulletList { items: items.clone() }, false);
        let refs: Vec<_> = bullets
            .iter()
            .map(|e| paragraph(e).numbering.unwrap())
            .map(|n| (n.num_id, n.level))
            .collect();
        assert_eq!(refs, vec![(BULLET_NUM_ID, 0), (BULLET_NUM_ID, 2)]);

        let numbered = mapper.map(&Block::NumberedList { items }, false);
        let levels: Vec<_> = numbered
            .iter()
            .map(|e| paragraph(e).numbering.unwrap().level)
            .collect();
        assert_eq!(levels, vec![0, 1]);
    }

    #[test]
    fn separated_numbered_lists_get_their_own_instance() {
        let options = RenderOptions::default();
        let mut mapper = ElementMapper::new(&options);
        let list = Block::NumberedList {
            items: vec![ListItem::new("one", 0)],
        };
        let between = Block::Paragraph {
            text: "between".to_string(),
        };

        let first = mapper.map(&list, false);
        mapper.map(&between, false);
        let second = mapper.map(&list, false);
        assert_eq!(paragraph(&first[0]).numbering.unwrap().num_id, 2);
        assert_eq!(paragraph(&second[0]).numbering.unwrap().num_id, 3);
        assert_eq!(mapper.numbered_list_count(), 2);
    }

    #[test]
    fn nested_bullets_do_not_restart_numbering() {
        let options = RenderOptions::default();
        let mut mapper = ElementMapper::new(&options);
        let refs: Vec<(String, usize)> = scan("1. first\n    - detail\n2. second")
            .iter()
            .flat_map(|block| mapper.map(block, false))
            .map(|e| {
                let p = paragraph(&e);
                (p.text(), p.numbering.unwrap().num_id)
            })
            .collect();

        assert_eq!(
            refs,
            vec![
                ("first".to_string(), 2),
                ("detail".to_string(), BULLET_NUM_ID),
                ("second".to_string(), 2),
            ]
        );
        assert_eq!(mapper.numbered_list_count(), 1);
    }

    #[test]
    fn blockquote_has_left_border() {
        let options = RenderOptions::default();
        let mut mapper = ElementMapper::new(&options);
        let out = mapper.map(
            &Block::Blockquote {
                text: "quoted".to_string(),
            },
            false,
        );
        let p = paragraph(&out[0]);
        assert_eq!(p.style.as_deref(), Some(QUOTE));
        assert_eq!(p.border.as_ref().map(|b| b.side), Some(BorderSide::Left));
    }

    #[test]
    fn table_splits_usable_width_evenly() {
        let options = RenderOptions::default();
        let mut mapper = ElementMapper::new(&options);
        let block = Block::Table {
            headers: vec!["A".into(), "B".into(), "C".into()],
            rows: vec![vec!["1".into(), "2".into()]],
        };
        let out = mapper.map(&block, false);
        assert_eq!(out.len(), 2);
        let Element::Table(table) = &out[0] else {
            panic!("expected table");
        };
        assert_eq!(table.column_widths, vec![3120; 3]);
        assert!(table.rows[0].header);
        assert!(table.rows[0].cells[0].paragraphs[0].runs[0].bold);
        assert_eq!(
            table.rows[0].cells[0].paragraphs[0].alignment,
            Some(Alignment::Center)
        );
        // short rows are kept as they are
        assert_eq!(table.rows[1].cells.len(), 2);
        assert_eq!(paragraph(&out[1]).text(), "");
    }

    #[test]
    fn table_without_headers_does_not_divide_by_zero() {
        let options = RenderOptions::default();
        let mut mapper = ElementMapper::new(&options);
        let out = mapper.map(
            &Block::Table {
                headers: vec![],
                rows: vec![],
            },
            false,
        );
        let Element::Table(table) = &out[0] else {
            panic!("expected table");
        };
        assert_eq!(table.column_widths, vec![9360]);
    }

    #[test]
    fn rule_is_bottom_bordered_empty_paragraph() {
        let options = RenderOptions::default();
        let mut mapper = ElementMapper::new(&options);
        let out = mapper.map(&Block::Hr, false);
        let p = paragraph(&out[0]);
        assert!(p.runs.is_empty());
        assert!(p.border.is_some());
    }

    #[test]
    fn code_spans_use_code_font() {
        let options = RenderOptions::default();
        let runs = inline_runs("call `f()` now", &options);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1].font.as_deref(), Some(options.code_font.as_str()));
        assert!(runs[0].font.is_none());
    }
}
