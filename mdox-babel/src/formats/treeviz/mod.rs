//! Treeviz formatter for scanned blocks
//!
//! Treeviz is a visual representation of the block sequence, meant for
//! checking what the scanner made of a file before it is rendered. Blocks are
//! flat, so the tree is shallow: the document, its blocks, and list items
//! (plus code lines and table rows in full mode).
//!
//! Each line is:
//! <prefix><connector> <icon> <label> (label truncated to 40 characters)
//!
//! Example:
//!
//!   ⧉ Document (3 blocks)
//!   ├─ § H1 Title
//!   ├─ ☰ 2 items
//!   │ ├─ • top
//!   │ └─ • nested (level 1)
//!   └─ ⎯ rule

use super::icons::get_icon;
use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::ir::blocks::Block;
use std::collections::HashMap;

const LABEL_WIDTH: usize = 40;

fn truncate(text: &str) -> String {
    if text.chars().count() <= LABEL_WIDTH {
        text.to_string()
    } else {
        let head: String = text.chars().take(LABEL_WIDTH - 1).collect();
        format!("{head}…")
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

fn block_label(block: &Block) -> String {
    match block {
        Block::Heading { level, text } => format!("H{level} {}", truncate(text)),
        Block::Paragraph { text } | Block::Blockquote { text } => truncate(text),
        Block::Code { lang, content } => {
            let lang = if lang.is_empty() { "plain" } else { lang.as_str() };
            format!("{lang} ({})", plural(content.lines().count(), "line"))
        }
        Block::BulletList { items } | Block::NumberedList { items } => {
            plural(items.len(), "item")
        }
        Block::Table { headers, rows } => {
            format!("{} ({})", truncate(&headers.join(" | ")), plural(rows.len(), "row"))
        }
        Block::Hr => "rule".to_string(),
    }
}

/// Child lines of a block as (icon kind, label) pairs.
fn block_children(block: &Block, full: bool) -> Vec<(&'static str, String)> {
    match block {
        Block::BulletList { items } | Block::NumberedList { items } => items
            .iter()
            .map(|item| {
                let label = if item.level > 0 {
                    format!("{} (level {})", truncate(&item.text), item.level)
                } else {
                    truncate(&item.text)
                };
                ("ListItem", label)
            })
            .collect(),
        Block::Code { content, .. } if full => content
            .lines()
            .map(|line| ("CodeLine", truncate(line)))
            .collect(),
        Block::Table { rows, .. } if full => rows
            .iter()
            .map(|row| ("TableRow", truncate(&row.join(" | "))))
            .collect(),
        _ => Vec::new(),
    }
}

fn format_block(block: &Block, is_last: bool, full: bool) -> String {
    let connector = if is_last { "└─" } else { "├─" };
    let mut output = format!(
        "{connector} {} {}\n",
        get_icon(block.kind()),
        block_label(block)
    );

    let child_prefix = if is_last { "  " } else { "│ " };
    let children = block_children(block, full);
    for (index, (kind, label)) in children.iter().enumerate() {
        let connector = if index == children.len() - 1 {
            "└─"
        } else {
            "├─"
        };
        output.push_str(&format!(
            "{child_prefix}{connector} {} {label}\n",
            get_icon(kind)
        ));
    }
    output
}

pub fn to_treeviz_str(blocks: &[Block]) -> String {
    to_treeviz_str_with_params(blocks, &HashMap::new())
}

/// Convert blocks to a treeviz string with optional parameters
///
/// # Parameters
///
/// - `"full"`: when `"true"`, code lines and table data rows are listed as
///   children of their block.
pub fn to_treeviz_str_with_params(blocks: &[Block], params: &HashMap<String, String>) -> String {
    let full = params
        .get("full")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);

    let mut output = format!(
        "{} Document ({})\n",
        get_icon("Document"),
        plural(blocks.len(), "block")
    );
    for (index, block) in blocks.iter().enumerate() {
        output.push_str(&format_block(block, index == blocks.len() - 1, full));
    }
    output
}

/// Format implementation for treeviz format
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree of scanned blocks with Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, blocks: &[Block]) -> Result<String, FormatError> {
        Ok(to_treeviz_str(blocks))
    }

    fn serialize_with_options(
        &self,
        blocks: &[Block],
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        Ok(SerializedDocument::Text(to_treeviz_str_with_params(
            blocks, options,
        )))
    }
}
