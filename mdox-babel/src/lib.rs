//! Markdown to docx conversion for mdox
//!
//!     This crate turns a constrained Markdown dialect into a paginated, styled Word document
//!     with a title page and a table of contents.
//!
//!     This is a pure lib, that is, it powers mdox-cli but is shell agnostic: no code here
//!     should suppose a shell environment, be it printing, env vars or touching the filesystem.
//!     Bytes come in as `&str` and go out as `Vec<u8>`.
//!
//! Architecture
//!
//!     The conversion is two stages over a flat intermediate representation (./ir):
//!
//!         text --scan--> [Block] --map + assemble--> Document --pack--> .docx bytes
//!
//!     - Scanning (./formats/markdown/parser.rs) is a single pass over lines with a fixed
//!       priority list of rules. The first rule that matches a line consumes the block.
//!     - Inline emphasis (./formats/markdown/inline.rs) splits text into styled runs.
//!     - Mapping (./formats/docx/mapper.rs, ./formats/docx/code.rs) turns each block into
//!       word-processing elements.
//!     - Assembly (./formats/docx/assembler.rs) adds the front matter and attaches page
//!       geometry, styles and numbering.
//!     - Packing (./formats/docx/writer.rs) writes the OOXML parts into a zip container.
//!
//!     Only packing can fail. Malformed Markdown never errors; it degrades into best-effort
//!     output (unterminated fences run to the end, ragged tables are kept ragged).
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── transforms.rs           # One-call pipelines
//!     ├── formats
//!     │   ├── markdown            # Block scanner + inline formatter (import)
//!     │   ├── docx                # Elements, mapper, assembler, writer (export)
//!     │   ├── json                # Block dump (inspection)
//!     │   └── treeviz             # Block tree (inspection)
//!     ├── ir                      # Blocks and styled runs
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── <format>
//!         ├── <testname>.rs
//!         └── fixtures
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Library Choices
//!
//!     There is no established docx writer crate in our stack, so the element model is ours and the
//!     package is written with quick-xml (escaping, well-formedness) and zip (container).
//!
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod transforms;

pub mod ir;

pub use error::FormatError;
pub use format::{Format, SerializedDocument};
pub use formats::docx::{assemble, assemble_with_options, pack, Document, PageSize, RenderOptions};
pub use formats::markdown::inline::format_inline;
pub use formats::markdown::scan;
pub use ir::blocks::{Block, ListItem};
pub use ir::runs::StyledRun;
pub use registry::FormatRegistry;
