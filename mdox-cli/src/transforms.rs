//! CLI-specific transforms
//!
//! Views of what the scanner made of a Markdown file, used by `mdox inspect`
//! to debug a conversion before looking at the rendered document.
//!
//! - `blocks-treeviz`: block tree with Unicode icons (default)
//! - `blocks-json`: the block sequence as JSON
//! - `runs-json`: the inline runs of every text-bearing block
//!
//! ## Extra Parameters
//!
//! - `full`: when "true", `blocks-treeviz` also lists code lines and table rows.
//!
//! Example: `mdox inspect notes.md --extra-full`

use mdox_babel::formats::treeviz::to_treeviz_str_with_params;
use mdox_babel::{format_inline, scan, Block, FormatRegistry};
use serde_json::{json, Value};
use std::collections::HashMap;

/// All available CLI transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["blocks-treeviz", "blocks-json", "runs-json"];

pub const DEFAULT_TRANSFORM: &str = "blocks-treeviz";

/// Execute a named transform on Markdown source with optional extra parameters
///
/// # Examples
///
/// ```ignore
/// let params = HashMap::new();
/// let output = execute_transform("# Title\n", "blocks-json", &params)?;
/// ```
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let blocks = scan(source);

    match transform_name {
        "blocks-treeviz" => Ok(to_treeviz_str_with_params(&blocks, extra_params)),
        "blocks-json" => FormatRegistry::default()
            .serialize(&blocks, "json")
            .map_err(|e| format!("Transform failed: {e}")),
        "runs-json" => serde_json::to_string_pretty(&runs_to_json(&blocks))
            .map_err(|e| format!("JSON serialization failed: {e}")),
        _ => Err(format!(
            "Unknown transform: {transform_name}. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}

/// Texts of a block that go through the inline formatter when rendered.
fn inline_texts(block: &Block) -> Vec<&str> {
    match block {
        Block::Heading { text, .. } | Block::Paragraph { text } | Block::Blockquote { text } => {
            vec![text.as_str()]
        }
        Block::BulletList { items } | Block::NumberedList { items } => {
            items.iter().map(|item| item.text.as_str()).collect()
        }
        Block::Table { headers, rows } => headers
            .iter()
            .chain(rows.iter().flatten())
            .map(String::as_str)
            .collect(),
        Block::Code { .. } | Block::Hr => Vec::new(),
    }
}

fn runs_to_json(blocks: &[Block]) -> Value {
    let entries: Vec<Value> = blocks
        .iter()
        .enumerate()
        .filter_map(|(index, block)| {
            let texts = inline_texts(block);
            if texts.is_empty() {
                return None;
            }
            let runs: Vec<Value> = texts
                .into_iter()
                .map(|text| json!({ "source": text, "runs": format_inline(text) }))
                .collect();
            Some(json!({ "block": index, "type": block.kind(), "texts": runs }))
        })
        .collect();
    Value::Array(entries)
}
