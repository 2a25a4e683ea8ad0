//! Format implementations
//!
//! Markdown is the only input format. Docx is the real output; json and
//! treeviz are inspection views of the scanned blocks.

pub mod docx;
pub mod icons;
pub mod json;
pub mod markdown;
pub mod treeviz;

pub use docx::{DocxFormat, PageSize, RenderOptions};
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use treeviz::TreevizFormat;
