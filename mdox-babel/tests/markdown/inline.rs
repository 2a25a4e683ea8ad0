//! Inline formatter tests (text → styled runs)

use mdox_babel::{format_inline, StyledRun};
use pretty_assertions::assert_eq;

#[test]
fn test_spans_do_not_nest() {
    // the bold span wins; the inner asterisks stay literal text
    assert_eq!(
        format_inline("**a *b* c**"),
        vec![StyledRun::bold("a *b* c")]
    );
}

#[test]
fn test_code_span_before_bold_keeps_order() {
    assert_eq!(
        format_inline("`x` and **y**"),
        vec![
            StyledRun::code("x"),
            StyledRun::plain(" and "),
            StyledRun::bold("y"),
        ]
    );
}

#[test]
fn test_markers_after_last_span_are_stripped() {
    assert_eq!(
        format_inline("see **six** * end"),
        vec![
            StyledRun::plain("see "),
            StyledRun::bold("six"),
            StyledRun::plain("  end"),
        ]
    );
}

#[test]
fn test_list_item_with_orphan_bold_marker() {
    assert_eq!(
        format_inline("**Key Tasks:"),
        vec![StyledRun::plain("Key Tasks:")]
    );
}

#[test]
fn test_runs_are_never_empty() {
    for text in ["", "**", "*", "***"] {
        let runs = format_inline(text);
        assert!(!runs.is_empty(), "{text:?} produced no runs");
    }
}
