//! Docx format implementation
//!
//! Export only. Blocks are mapped to word-processing elements, assembled into
//! one [`Document`] with a title page and table of contents, and packed into
//! an Office Open XML container.
//!
//! # Pipeline
//!
//! ```text
//! [Block] --mapper/code--> [Element] --assembler--> Document --writer--> bytes
//! ```
//!
//! The mapper and assembler never fail: malformed input degrades into some
//! output. Only packing can fail (XML or zip I/O).
//!
//! # Element Mapping Table
//!
//! | Block          | Element(s)                                                   |
//! |----------------|--------------------------------------------------------------|
//! | `Heading`      | Heading1..Heading3 paragraph; `Chapter N` at level 2 breaks the page first |
//! | `Paragraph`    | BodyText paragraph                                           |
//! | `Code`         | One-column box table, or a three-row diagram container       |
//! | `BulletList`   | ListParagraph per item, bullet numbering, 3 levels           |
//! | `NumberedList` | ListParagraph per item, own restarting numbering, 2 levels   |
//! | `Blockquote`   | Quote paragraph with a left accent border                    |
//! | `Table`        | Shaded header row plus data rows, then a spacer paragraph    |
//! | `Hr`           | Empty paragraph with a bottom border                         |
//!
//! # Options
//!
//! `serialize_with_options` accepts `title`. Layout (page size, fonts,
//! labels) is fixed per [`DocxFormat`] instance through [`RenderOptions`].

pub mod assembler;
pub mod code;
pub mod elements;
pub mod mapper;
pub mod styles;
pub mod writer;

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::ir::blocks::Block;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use assembler::{assemble, assemble_with_options};
pub use elements::{Document, Element, Section};
pub use writer::pack;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    Letter,
    A4,
}

impl PageSize {
    /// Width and height in twips.
    pub fn dimensions(&self) -> (usize, usize) {
        match self {
            PageSize::Letter => (12240, 15840),
            PageSize::A4 => (11906, 16838),
        }
    }
}

impl std::str::FromStr for PageSize {
    type Err = FormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "letter" => Ok(PageSize::Letter),
            "a4" => Ok(PageSize::A4),
            other => Err(FormatError::ParseError(format!(
                "Unknown page size '{other}' (expected 'letter' or 'a4')"
            ))),
        }
    }
}

/// Layout and labelling used while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub default_title: String,
    pub toc_title: String,
    pub toc_levels: usize,
    pub page_size: PageSize,
    /// Twips, applied to all four sides.
    pub margin: usize,
    pub body_font: String,
    pub code_font: String,
    /// Points.
    pub body_size: usize,
    /// Points.
    pub code_size: usize,
    /// Fence language that marks a diagram source.
    pub diagram_language: String,
    pub diagram_note: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            default_title: "Untitled Document".to_string(),
            toc_title: "Table of Contents".to_string(),
            toc_levels: 3,
            page_size: PageSize::Letter,
            margin: 1440,
            body_font: "Calibri".to_string(),
            code_font: "Consolas".to_string(),
            body_size: 11,
            code_size: 9,
            diagram_language: "mermaid".to_string(),
            diagram_note: "Diagram source is shown below. Paste it into a Mermaid renderer to view it."
                .to_string(),
        }
    }
}

impl RenderOptions {
    pub fn section(&self) -> Section {
        let (width, height) = self.page_size.dimensions();
        Section::new(width, height, self.margin)
    }
}

/// Render blocks straight to `.docx` bytes.
pub fn to_docx(blocks: &[Block], title: &str, options: &RenderOptions) -> Result<Vec<u8>, FormatError> {
    let document = assemble_with_options(blocks, title, options);
    pack(&document)
}

/// Format implementation for docx
#[derive(Default)]
pub struct DocxFormat {
    options: RenderOptions,
}

impl DocxFormat {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl Format for DocxFormat {
    fn name(&self) -> &str {
        "docx"
    }

    fn description(&self) -> &str {
        "Word document (Office Open XML)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, _blocks: &[Block]) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(
            "Docx serialization produces binary output".to_string(),
        ))
    }

    fn serialize_with_options(
        &self,
        blocks: &[Block],
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        for key in options.keys().filter(|key| key.as_str() != "title") {
            tracing::debug!(key = key.as_str(), "ignoring unknown docx option");
        }
        let title = options.get("title").map(String::as_str).unwrap_or("");
        to_docx(blocks, title, &self.options).map(SerializedDocument::Binary)
    }
}
