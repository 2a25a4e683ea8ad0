//! Structural blocks extracted from Markdown source.

use serde::Serialize;

/// One structural unit found in the source text, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// `level` equals the number of leading `#` markers (1..=6).
    Heading { level: usize, text: String },
    /// Lines folded into one logical line, joined with single spaces.
    Paragraph { text: String },
    /// Verbatim fence body. `content` is empty for an empty fence.
    Code { lang: String, content: String },
    BulletList { items: Vec<ListItem> },
    NumberedList { items: Vec<ListItem> },
    /// Quoted lines joined with spaces, markers stripped.
    Blockquote { text: String },
    /// Rows are not validated against the header count.
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Hr,
}

impl Block {
    /// Short node name, used by the inspection views and log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "Heading",
            Block::Paragraph { .. } => "Paragraph",
            Block::Code { .. } => "Code",
            Block::BulletList { .. } => "BulletList",
            Block::NumberedList { .. } => "NumberedList",
            Block::Blockquote { .. } => "Blockquote",
            Block::Table { .. } => "Table",
            Block::Hr => "Hr",
        }
    }
}

/// A list entry. Nesting is carried only by `level`, derived from indentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub text: String,
    pub level: usize,
}

impl ListItem {
    pub fn new(text: impl Into<String>, level: usize) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}
