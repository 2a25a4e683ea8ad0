//! Document assembly
//!
//! Front matter (title page and table of contents) followed by the mapped
//! body, attached to one section with the style sheet and numbering the body
//! refers to.

use super::elements::{Alignment, Document, Element, Paragraph, Run, TableOfContents};
use super::mapper::ElementMapper;
use super::styles::{NumberingDefinitions, StyleSheet, TITLE, TOC_HEADING};
use super::RenderOptions;
use crate::ir::blocks::Block;

/// Number of elements placed before the first mapped block.
pub const FRONT_MATTER_LEN: usize = 5;

/// Assemble a document with default render options.
pub fn assemble(blocks: &[Block], title: &str) -> Document {
    assemble_with_options(blocks, title, &RenderOptions::default())
}

pub fn assemble_with_options(blocks: &[Block], title: &str, options: &RenderOptions) -> Document {
    let title = match title.trim() {
        "" => options.default_title.clone(),
        given => given.to_string(),
    };

    let mut body = front_matter(&title, options);

    let mut mapper = ElementMapper::new(options);
    for (index, block) in blocks.iter().enumerate() {
        body.extend(mapper.map(block, index == 0));
    }

    tracing::debug!(
        blocks = blocks.len(),
        elements = body.len(),
        "assembled document"
    );

    Document {
        title,
        section: options.section(),
        styles: StyleSheet::standard(options),
        numbering: NumberingDefinitions::standard(mapper.numbered_list_count()),
        body,
    }
}

fn front_matter(title: &str, options: &RenderOptions) -> Vec<Element> {
    vec![
        Paragraph::new()
            .style(TITLE)
            .align(Alignment::Center)
            .add_run(Run::new(title))
            .into(),
        Paragraph::page_break().into(),
        Paragraph::new()
            .style(TOC_HEADING)
            .align(Alignment::Center)
            .add_run(Run::new(options.toc_title.clone()).bold(true))
            .into(),
        TableOfContents::new(options.toc_levels).into(),
        Paragraph::page_break().into(),
    ]
}
