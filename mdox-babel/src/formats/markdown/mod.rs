//! Markdown format implementation
//!
//! Import only: Markdown text is scanned into the flat [`Block`] sequence that
//! every output format consumes. Only a fixed dialect is recognised; this is
//! deliberately not a CommonMark parser.
//!
//! # Library Choice
//!
//! The dialect is small and its priority rules matter more than CommonMark coverage,
//! so the scanner is a hand-written line pass with `regex` patterns for the
//! line shapes, instead of a full Markdown crate.
//!
//! # Element Mapping Table
//!
//! | Markdown             | Block                  | Notes                                              |
//! |----------------------|------------------------|----------------------------------------------------|
//! | `#`..`######` text   | `Heading`              | Level is the marker count                          |
//! | ```` ```lang ````    | `Code`                 | Body kept verbatim, blank lines included           |
//! | `> text`             | `Blockquote`           | Consecutive quoted lines joined with spaces        |
//! | `\| a \| b \|`       | `Table`                | Second row is the separator and is dropped         |
//! | `- item`, `* item`   | `BulletList`           | Level = leading columns / 4                        |
//! | `1. item`            | `NumberedList`         | Level = leading columns / 4                        |
//! | `---`, `***`, `___`  | `Hr`                   |                                                    |
//! | anything else        | `Paragraph`            | Lines trimmed and joined with single spaces        |
//!
//! Inline emphasis is resolved later, per text field, by [`inline::format_inline`].
//!
//! # Lossy Conversions
//!
//! - Line breaks inside paragraphs and quotes are folded into spaces.
//! - List nesting is reduced to an indentation level; continuation paragraphs
//!   inside list items end the list.
//! - Links, images, HTML and setext headings are plain text.

pub mod inline;
pub mod parser;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::blocks::Block;

pub use parser::scan;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown subset (headings, lists, tables, fences, quotes)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Vec<Block>, FormatError> {
        Ok(parser::scan(source))
    }
}
