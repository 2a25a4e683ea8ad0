//! Inline emphasis (text → styled runs)
//!
//! Three span kinds are recognised, in priority order: `**bold**`, `*italic*`
//! (never across a line break) and `` `code` ``. They are matched with one
//! combined pattern so spans never overlap or nest.

use crate::ir::runs::StyledRun;
use once_cell::sync::Lazy;
use regex::Regex;

static INLINE_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*|\*([^*\n]+?)\*|`([^`]+?)`").unwrap());

/// Split `text` into styled runs.
///
/// Text between spans is kept verbatim. In the trailing segment, after the
/// last recognised span, orphan `**` and `*` markers are removed, which cleans
/// up list items such as `**Key Tasks:` whose closing marker went missing.
///
/// Never returns an empty vector: empty input yields one empty plain run.
pub fn format_inline(text: &str) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    let mut last = 0;

    for caps in INLINE_SPAN.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            runs.push(StyledRun::plain(&text[last..whole.start()]));
        }

        if let Some(bold) = caps.get(1) {
            runs.push(StyledRun::bold(bold.as_str()));
        } else if let Some(italic) = caps.get(2) {
            runs.push(StyledRun::italic(italic.as_str()));
        } else if let Some(code) = caps.get(3) {
            runs.push(StyledRun::code(code.as_str()));
        }
        last = whole.end();
    }

    let tail = text[last..].replace("**", "").replace('*', "");
    if !tail.is_empty() {
        runs.push(StyledRun::plain(tail));
    }

    if runs.is_empty() {
        runs.push(StyledRun::plain(""));
    }
    runs
}
