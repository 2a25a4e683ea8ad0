//! In-memory word-processing elements
//!
//! These are the low-level units the mapper produces and the package writer
//! consumes. They are built with chained setters and never inspected by the
//! rendering code after construction.
//!
//! Units follow WordprocessingML: lengths in twips (1/20 pt), font sizes in
//! half-points, border widths in eighths of a point, colours as `RRGGBB`.

use super::styles::{NumberingDefinitions, StyleSheet};

/// A contiguous piece of text with one formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub font: Option<String>,
    /// Half-points.
    pub size: Option<usize>,
    pub color: Option<String>,
    pub page_break: bool,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// A run holding only a hard page break.
    pub fn page_break() -> Self {
        Self {
            page_break: true,
            ..Self::default()
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn size(mut self, half_points: usize) -> Self {
        self.size = Some(half_points);
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderSide {
    Left,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Border {
    pub side: BorderSide,
    pub color: String,
    /// Eighths of a point.
    pub size: usize,
    /// Points between border and text.
    pub space: usize,
}

impl Border {
    pub fn left(color: impl Into<String>, size: usize, space: usize) -> Self {
        Self {
            side: BorderSide::Left,
            color: color.into(),
            size,
            space,
        }
    }

    pub fn bottom(color: impl Into<String>, size: usize, space: usize) -> Self {
        Self {
            side: BorderSide::Bottom,
            color: color.into(),
            size,
            space,
        }
    }
}

/// Reference to a numbering instance declared in [`NumberingDefinitions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingRef {
    pub num_id: usize,
    pub level: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub style: Option<String>,
    pub runs: Vec<Run>,
    pub alignment: Option<Alignment>,
    pub numbering: Option<NumberingRef>,
    pub border: Option<Border>,
    /// Twips before and after.
    pub spacing: Option<(usize, usize)>,
    pub keep_next: bool,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty paragraph whose only content is a page break.
    pub fn page_break() -> Self {
        Self::new().add_run(Run::page_break())
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn add_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    pub fn add_runs(mut self, runs: impl IntoIterator<Item = Run>) -> Self {
        self.runs.extend(runs);
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn numbering(mut self, num_id: usize, level: usize) -> Self {
        self.numbering = Some(NumberingRef { num_id, level });
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn spacing(mut self, before: usize, after: usize) -> Self {
        self.spacing = Some((before, after));
        self
    }

    pub fn keep_next(mut self) -> Self {
        self.keep_next = true;
        self
    }

    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn has_page_break(&self) -> bool {
        self.runs.iter().any(|run| run.page_break)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCell {
    pub paragraphs: Vec<Paragraph>,
    pub shading: Option<String>,
    /// Twips.
    pub width: usize,
}

impl TableCell {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn add_paragraph(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    pub fn add_paragraphs(mut self, paragraphs: impl IntoIterator<Item = Paragraph>) -> Self {
        self.paragraphs.extend(paragraphs);
        self
    }

    pub fn shading(mut self, fill: impl Into<String>) -> Self {
        self.shading = Some(fill.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    /// Repeated at the top of each page the table spans.
    pub header: bool,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            header: false,
        }
    }

    pub fn header(mut self) -> Self {
        self.header = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Twips, one entry per grid column.
    pub column_widths: Vec<usize>,
    pub rows: Vec<TableRow>,
    pub border_color: String,
}

impl Table {
    pub fn new(column_widths: Vec<usize>) -> Self {
        Self {
            column_widths,
            rows: Vec::new(),
            border_color: "BFBFBF".to_string(),
        }
    }

    pub fn add_row(mut self, row: TableRow) -> Self {
        self.rows.push(row);
        self
    }

    pub fn border_color(mut self, color: impl Into<String>) -> Self {
        self.border_color = color.into();
        self
    }

    pub fn width(&self) -> usize {
        self.column_widths.iter().sum()
    }
}

/// Table-of-contents field. The entries are filled in by the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOfContents {
    /// Highest heading level listed.
    pub levels: usize,
    pub placeholder: String,
}

impl TableOfContents {
    pub fn new(levels: usize) -> Self {
        Self {
            levels: levels.clamp(1, 9),
            placeholder: "Right-click and choose Update Field to build the table of contents."
                .to_string(),
        }
    }

    pub fn instruction(&self) -> String {
        format!(" TOC \\o \"1-{}\" \\h \\z \\u ", self.levels)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Paragraph(Paragraph),
    Table(Table),
    TableOfContents(TableOfContents),
}

impl From<Paragraph> for Element {
    fn from(paragraph: Paragraph) -> Self {
        Element::Paragraph(paragraph)
    }
}

impl From<Table> for Element {
    fn from(table: Table) -> Self {
        Element::Table(table)
    }
}

impl From<TableOfContents> for Element {
    fn from(toc: TableOfContents) -> Self {
        Element::TableOfContents(toc)
    }
}

/// Page geometry of the single document section, in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub page_width: usize,
    pub page_height: usize,
    pub margin_top: usize,
    pub margin_right: usize,
    pub margin_bottom: usize,
    pub margin_left: usize,
}

impl Section {
    pub fn new(page_width: usize, page_height: usize, margin: usize) -> Self {
        Self {
            page_width,
            page_height,
            margin_top: margin,
            margin_right: margin,
            margin_bottom: margin,
            margin_left: margin,
        }
    }

    /// Width available to body content between the side margins.
    pub fn usable_width(&self) -> usize {
        self.page_width
            .saturating_sub(self.margin_left + self.margin_right)
    }
}

/// A complete document, ready to be packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub section: Section,
    pub styles: StyleSheet,
    pub numbering: NumberingDefinitions,
    pub body: Vec<Element>,
}
