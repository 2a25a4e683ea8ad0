//! Scanner tests (Markdown → Blocks)

use mdox_babel::formats::markdown::parser::classify_line;
use mdox_babel::{scan, Block, ListItem};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

fn heading(level: usize, text: &str) -> Block {
    Block::Heading {
        level,
        text: text.to_string(),
    }
}

fn paragraph(text: &str) -> Block {
    Block::Paragraph {
        text: text.to_string(),
    }
}

#[test]
fn test_heading_then_paragraph() {
    assert_eq!(
        scan("# Title\n\nHello world."),
        vec![heading(1, "Title"), paragraph("Hello world.")]
    );
}

#[test]
fn test_fenced_code_with_language() {
    assert_eq!(
        scan("```python\nx = 1\nprint(x)\n```"),
        vec![Block::Code {
            lang: "python".to_string(),
            content: "x = 1\nprint(x)".to_string(),
        }]
    );
}

#[test]
fn test_diagram_fence_is_plain_code_block() {
    assert_eq!(
        scan("```mermaid\ngraph TD\nA-->B\n```"),
        vec![Block::Code {
            lang: "mermaid".to_string(),
            content: "graph TD\nA-->B".to_string(),
        }]
    );
}

#[test]
fn test_table_drops_separator_row() {
    assert_eq!(
        scan("| A | B |\n|---|---|\n| 1 | 2 |"),
        vec![Block::Table {
            headers: vec!["A".to_string(), "B".to_string()],
            rows: vec![vec!["1".to_string(), "2".to_string()]],
        }]
    );
}

#[test]
fn test_nested_bullets_levels() {
    assert_eq!(
        scan("- top\n    - nested\n        - deeper"),
        vec![Block::BulletList {
            items: vec![
                ListItem::new("top", 0),
                ListItem::new("nested", 1),
                ListItem::new("deeper", 2),
            ],
        }]
    );
}

#[test]
fn test_empty_input() {
    assert!(scan("").is_empty());
    assert!(scan("\n\n   \n").is_empty());
}

#[test]
fn test_heading_level_equals_marker_count() {
    for level in 1..=6 {
        let source = format!("{} Heading", "#".repeat(level));
        assert_eq!(scan(&source), vec![heading(level, "Heading")]);
    }
    // seven markers are not a heading
    assert_eq!(scan("####### Deep"), vec![paragraph("####### Deep")]);
}

#[test]
fn test_list_levels_are_not_clamped() {
    let source = (0..6)
        .map(|depth| format!("{}- item{depth}", " ".repeat(depth * 4)))
        .collect::<Vec<_>>()
        .join("\n");
    let Block::BulletList { items } = &scan(&source)[0] else {
        panic!("expected bullet list");
    };
    let levels: Vec<_> = items.iter().map(|item| item.level).collect();
    assert_eq!(levels, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_partial_indent_rounds_down() {
    let Block::NumberedList { items } = &scan("1. a\n   2. b\n       3. c")[0] else {
        panic!("expected numbered list");
    };
    let levels: Vec<_> = items.iter().map(|item| item.level).collect();
    assert_eq!(levels, vec![0, 0, 1]);
}

#[test]
fn test_single_blank_line_inside_list_is_skipped() {
    assert_eq!(
        scan("- a\n\n- b\n\n\n- c"),
        vec![
            Block::BulletList {
                items: vec![ListItem::new("a", 0), ListItem::new("b", 0)],
            },
            Block::BulletList {
                items: vec![ListItem::new("c", 0)],
            },
        ]
    );
}

#[test]
fn test_bullet_and_numbered_lists_do_not_merge() {
    let blocks = scan("- a\n1. b");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].kind(), "BulletList");
    assert_eq!(blocks[1].kind(), "NumberedList");
}

#[test]
fn test_unterminated_fence_runs_to_end() {
    assert_eq!(
        scan("```rust\nfn main() {}\n\n# not a heading"),
        vec![Block::Code {
            lang: "rust".to_string(),
            content: "fn main() {}\n\n# not a heading".to_string(),
        }]
    );
}

#[test]
fn test_empty_fence_has_empty_content() {
    assert_eq!(
        scan("```\n```"),
        vec![Block::Code {
            lang: String::new(),
            content: String::new(),
        }]
    );
}

#[test]
fn test_ragged_table_is_kept() {
    let blocks = scan("| a | b | c |\n|---|\n| 1 |\n| 1 | 2 | 3 | 4 |");
    let Block::Table { headers, rows } = &blocks[0] else {
        panic!("expected table");
    };
    assert_eq!(headers.len(), 3);
    assert_eq!(rows.iter().map(Vec::len).collect::<Vec<_>>(), vec![1, 4]);
}

#[test]
fn test_header_only_table() {
    assert_eq!(
        scan("| only |"),
        vec![Block::Table {
            headers: vec!["only".to_string()],
            rows: vec![],
        }]
    );
}

#[test]
fn test_blockquote_lines_are_joined() {
    assert_eq!(
        scan("> first\n>second\n> third"),
        vec![Block::Blockquote {
            text: "first second third".to_string(),
        }]
    );
}

#[test]
fn test_paragraph_folds_lines_and_stops_at_blocks() {
    assert_eq!(
        scan("  one\ntwo  \nthree\n# Head"),
        vec![paragraph("one two three"), heading(1, "Head")]
    );
    assert_eq!(
        scan("text\n- item"),
        vec![
            paragraph("text"),
            Block::BulletList {
                items: vec![ListItem::new("item", 0)],
            },
        ]
    );
}

#[test]
fn test_rules_of_each_kind() {
    assert_eq!(scan("---\n***\n___"), vec![Block::Hr, Block::Hr, Block::Hr]);
    // two dashes are not a rule
    assert_eq!(scan("--"), vec![paragraph("--")]);
}

#[test]
fn test_classify_line_follows_priority() {
    assert_eq!(classify_line(""), "blank");
    assert_eq!(classify_line("## x"), "heading");
    assert_eq!(classify_line("```"), "code");
    assert_eq!(classify_line("> q"), "blockquote");
    assert_eq!(classify_line("| a |"), "table");
    assert_eq!(classify_line("* a"), "bullet_list");
    assert_eq!(classify_line("12. a"), "numbered_list");
    assert_eq!(classify_line("***"), "hr");
    assert_eq!(classify_line("#hashtag"), "paragraph");
}

#[test]
fn test_every_line_is_consumed_once() {
    // Each non-blank line contributes its text to exactly one block.
    let source = fixture("kitchensink.md");
    let json = serde_json::to_string(&scan(&source)).unwrap();
    for word in ["Foundations", "Verify checksums", "Compile", "twice", "Duration", "CI-->>Dev"] {
        assert_eq!(json.matches(word).count(), 1, "{word} should appear once");
    }
}

#[test]
fn test_kitchensink_block_sequence() {
    let blocks = scan(&fixture("kitchensink.md"));
    let kinds: Vec<_> = blocks.iter().map(Block::kind).collect();
    assert_eq!(
        kinds,
        vec![
            "Heading",
            "Paragraph",
            "Heading",
            "Paragraph",
            "BulletList",
            "NumberedList",
            "Blockquote",
            "Heading",
            "Table",
            "Code",
            "Heading",
            "Code",
            "Hr",
            "Code",
            "Heading",
            "NumberedList",
        ]
    );

    assert_eq!(
        blocks[1],
        paragraph(
            "This guide covers the **essential** parts of a pipeline, with *examples* \
             and a few `inline commands` along the way."
        )
    );
    assert_eq!(
        blocks[4],
        Block::BulletList {
            items: vec![
                ListItem::new("**Key Tasks:**", 0),
                ListItem::new("Fetch sources", 0),
                ListItem::new("Verify checksums", 1),
                ListItem::new("Cache results", 2),
            ],
        }
    );
    assert_eq!(
        blocks[9],
        Block::Code {
            lang: "bash".to_string(),
            content: "make build\n\tmake test".to_string(),
        }
    );
    assert_eq!(blocks[14], heading(4, "Closing Notes"));
}
