//! JSON view of the block sequence
//!
//! Each block is an object tagged with `"type"` (snake_case variant name).
//! Useful for diffing scanner output and feeding other tools.

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::blocks::Block;

/// Format implementation for JSON
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Scanned blocks as pretty-printed JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, blocks: &[Block]) -> Result<String, FormatError> {
        serde_json::to_string_pretty(blocks)
            .map(|json| json + "\n")
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
