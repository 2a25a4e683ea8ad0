//! Markdown format tests
//!
//! Scanner and inline formatter behaviour seen through the public API.

mod inline;
mod scan;
