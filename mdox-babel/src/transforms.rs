//! One-call pipelines
//!
//! Thin functions chaining scan → assemble → pack, for callers that do not
//! need the registry.

use crate::error::FormatError;
use crate::formats::docx::{assemble_with_options, pack, RenderOptions};
use crate::formats::markdown::scan;

/// Convert Markdown source to `.docx` bytes.
///
/// An empty `title` falls back to `options.default_title`.
///
/// # Example
///
/// ```ignore
/// use mdox_babel::{transforms::markdown_to_docx, RenderOptions};
///
/// let bytes = markdown_to_docx("# Hello\n", "Greeting", &RenderOptions::default())?;
/// std::fs::write("hello.docx", bytes)?;
/// ```
pub fn markdown_to_docx(
    source: &str,
    title: &str,
    options: &RenderOptions,
) -> Result<Vec<u8>, FormatError> {
    let blocks = scan(source);
    let document = assemble_with_options(&blocks, title, options);
    pack(&document)
}
