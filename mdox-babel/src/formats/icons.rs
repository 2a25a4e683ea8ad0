//! Shared icon mapping for tree visualization
//!
//! One glyph per block kind so the treeviz output can be scanned quickly.

/// Get the Unicode icon for a block kind (see [`crate::ir::blocks::Block::kind`])
pub fn get_icon(kind: &str) -> &'static str {
    match kind {
        "Document" => "⧉",
        "Heading" => "§",
        "Paragraph" => "¶",
        "Code" => "𝒱",
        "CodeLine" => "↵",
        "BulletList" => "☰",
        "NumberedList" => "№",
        "ListItem" => "•",
        "Blockquote" => "\"",
        "Table" => "▦",
        "TableRow" => "▤",
        "Hr" => "⎯",
        _ => "○",
    }
}
