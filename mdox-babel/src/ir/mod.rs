//! Intermediate Representation (IR)
//!
//! The IR sits between the Markdown source and every output format. It is a
//! flat, ordered sequence of [`blocks::Block`] values (no block ever owns
//! another block) plus the [`runs::StyledRun`] unit produced when inline
//! emphasis is resolved.

pub mod blocks;
pub mod runs;
