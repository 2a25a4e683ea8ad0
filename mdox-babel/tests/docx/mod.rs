//! Docx format tests
//!
//! Rendering (blocks → elements) and packaging (document → zip parts).

mod package;
mod render;
