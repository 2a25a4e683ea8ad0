//! Block scanning (Markdown → Blocks)
//!
//! A single left-to-right pass over the source lines. At each line index the
//! rules in [`RULES`] are tried in order and the first match consumes one block.
//! Blank lines between blocks are skipped before dispatch.
//!
//! The scanner is permissive: an unterminated fence runs to the end of input,
//! ragged table rows are kept as they are, and a line that stops looking like
//! a list item simply ends the list. It never fails.

use crate::ir::blocks::{Block, ListItem};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(\S.*)$").unwrap());
static BULLET_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)[-*+]\s+(.*)$").unwrap());
static NUMBERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\s*)\d+\.\s+(.*)$").unwrap());
static RULE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:-{3,}|\*{3,}|_{3,})\s*$").unwrap());

const FENCE: &str = "```";
const QUOTE: char = '>';
const PIPE: char = '|';

/// Columns of indentation that make up one nesting level.
const INDENT_WIDTH: usize = 4;

/// A block rule: a predicate on the line at the cursor and the consumer that
/// builds the block when it matches. Consumers always advance past `start`.
pub struct Rule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    consume: fn(&[&str], usize) -> (Block, usize),
}

/// Block rules in priority order. The paragraph rule is last and matches any
/// non-blank line.
pub static RULES: &[Rule] = &[
    Rule {
        name: "heading",
        matches: is_heading,
        consume: consume_heading,
    },
    Rule {
        name: "code",
        matches: is_fence,
        consume: consume_code,
    },
    Rule {
        name: "blockquote",
        matches: is_quote,
        consume: consume_blockquote,
    },
    Rule {
        name: "table",
        matches: is_table_row,
        consume: consume_table,
    },
    Rule {
        name: "bullet_list",
        matches: is_bullet_item,
        consume: consume_bullet_list,
    },
    Rule {
        name: "numbered_list",
        matches: is_numbered_item,
        consume: consume_numbered_list,
    },
    Rule {
        name: "hr",
        matches: is_rule_line,
        consume: consume_hr,
    },
    Rule {
        name: "paragraph",
        matches: is_not_blank,
        consume: consume_paragraph,
    },
];

/// Scan Markdown text into an ordered sequence of blocks.
pub fn scan(text: &str) -> Vec<Block> {
    let lines: Vec<&str> = text.lines().collect();
    let mut blocks = Vec::new();
    let mut index = 0;

    while index < lines.len() {
        let line = lines[index];
        if line.trim().is_empty() {
            index += 1;
            continue;
        }

        let rule = rule_for(line);
        let (block, next) = (rule.consume)(&lines, index);
        debug_assert!(next > index, "rule '{}' did not advance", rule.name);
        blocks.push(block);
        index = next.max(index + 1);
    }

    tracing::debug!(
        lines = lines.len(),
        blocks = blocks.len(),
        kinds = ?kind_counts(&blocks),
        "scanned markdown"
    );
    blocks
}

/// Number of blocks of each kind, keyed by [`Block::kind`].
pub fn kind_counts(blocks: &[Block]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for block in blocks {
        *counts.entry(block.kind()).or_insert(0) += 1;
    }
    counts
}

/// Name of the rule that would claim `line` at a block boundary, or `"blank"`.
pub fn classify_line(line: &str) -> &'static str {
    if line.trim().is_empty() {
        "blank"
    } else {
        rule_for(line).name
    }
}

fn rule_for(line: &str) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| (rule.matches)(line))
        .unwrap_or(&RULES[RULES.len() - 1])
}

/// True when `line` would open any block other than a paragraph.
fn starts_block(line: &str) -> bool {
    RULES[..RULES.len() - 1]
        .iter()
        .any(|rule| (rule.matches)(line))
}

fn is_heading(line: &str) -> bool {
    HEADING.is_match(line)
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}

fn is_quote(line: &str) -> bool {
    line.trim_start().starts_with(QUOTE)
}

fn is_table_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() > 1 && trimmed.starts_with(PIPE) && trimmed.ends_with(PIPE)
}

fn is_bullet_item(line: &str) -> bool {
    BULLET_ITEM.is_match(line)
}

fn is_numbered_item(line: &str) -> bool {
    NUMBERED_ITEM.is_match(line)
}

fn is_rule_line(line: &str) -> bool {
    RULE_LINE.is_match(line)
}

fn is_not_blank(line: &str) -> bool {
    !line.trim().is_empty()
}

fn consume_heading(lines: &[&str], start: usize) -> (Block, usize) {
    let block = match HEADING.captures(lines[start]) {
        Some(caps) => Block::Heading {
            level: caps[1].len(),
            text: caps[2].trim_end().to_string(),
        },
        None => Block::Paragraph {
            text: lines[start].trim().to_string(),
        },
    };
    (block, start + 1)
}

fn consume_code(lines: &[&str], start: usize) -> (Block, usize) {
    let opening = lines[start].trim_start();
    let lang = opening[FENCE.len()..].trim().to_string();

    let mut body = Vec::new();
    let mut index = start + 1;
    let mut closed = false;
    while index < lines.len() {
        if lines[index].trim().starts_with(FENCE) {
            closed = true;
            index += 1;
            break;
        }
        body.push(lines[index]);
        index += 1;
    }

    if !closed {
        tracing::warn!(line = start + 1, "code fence is never closed; reading to end of input");
    }

    let block = Block::Code {
        lang,
        content: body.join("\n"),
    };
    (block, index)
}

fn consume_blockquote(lines: &[&str], start: usize) -> (Block, usize) {
    let mut parts = Vec::new();
    let mut index = start;
    while index < lines.len() && is_quote(lines[index]) {
        let stripped = &lines[index].trim_start()[QUOTE.len_utf8()..];
        parts.push(stripped.strip_prefix(' ').unwrap_or(stripped));
        index += 1;
    }

    let block = Block::Blockquote {
        text: parts.join(" ").trim().to_string(),
    };
    (block, index)
}

fn consume_table(lines: &[&str], start: usize) -> (Block, usize) {
    let mut index = start;
    while index < lines.len() && is_table_row(lines[index]) {
        index += 1;
    }

    let table_lines = &lines[start..index];
    let headers = split_row(table_lines[0]);
    // The second line is the separator row; it is dropped without being checked.
    let rows: Vec<Vec<String>> = table_lines.iter().skip(2).map(|l| split_row(l)).collect();

    if rows.iter().any(|row| row.len() != headers.len()) {
        tracing::warn!(
            line = start + 1,
            columns = headers.len(),
            "table has rows whose cell count differs from the header"
        );
    }

    (Block::Table { headers, rows }, index)
}

fn split_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix(PIPE).unwrap_or(trimmed);
    let inner = inner.strip_suffix(PIPE).unwrap_or(inner);
    inner.split(PIPE).map(|cell| cell.trim().to_string()).collect()
}

fn consume_bullet_list(lines: &[&str], start: usize) -> (Block, usize) {
    let (items, next) = consume_list(lines, start, &BULLET_ITEM);
    (Block::BulletList { items }, next)
}

fn consume_numbered_list(lines: &[&str], start: usize) -> (Block, usize) {
    let (items, next) = consume_list(lines, start, &NUMBERED_ITEM);
    (Block::NumberedList { items }, next)
}

/// Collect consecutive items matching `pattern`. A single blank line is
/// skipped when the line right after it is still an item.
fn consume_list(lines: &[&str], start: usize, pattern: &Regex) -> (Vec<ListItem>, usize) {
    let mut items = Vec::new();
    let mut index = start;

    while index < lines.len() {
        let line = lines[index];
        if let Some(caps) = pattern.captures(line) {
            let level = indent_width(&caps[1]) / INDENT_WIDTH;
            items.push(ListItem::new(caps[2].trim(), level));
            index += 1;
            continue;
        }

        let continues = line.trim().is_empty()
            && lines
                .get(index + 1)
                .is_some_and(|next| pattern.is_match(next));
        if continues {
            index += 1;
            continue;
        }
        break;
    }

    (items, index)
}

/// Indentation columns: a tab counts as a full nesting step.
fn indent_width(whitespace: &str) -> usize {
    whitespace
        .chars()
        .map(|c| if c == '\t' { INDENT_WIDTH } else { 1 })
        .sum()
}

fn consume_hr(_lines: &[&str], start: usize) -> (Block, usize) {
    (Block::Hr, start + 1)
}

fn consume_paragraph(lines: &[&str], start: usize) -> (Block, usize) {
    let mut parts = vec![lines[start].trim()];
    let mut index = start + 1;
    while index < lines.len() {
        let line = lines[index];
        if line.trim().is_empty() || starts_block(line) {
            break;
        }
        parts.push(line.trim());
        index += 1;
    }

    let block = Block::Paragraph {
        text: parts.join(" "),
    };
    (block, index)
}
