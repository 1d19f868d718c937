//! Cursor-relative Markdown formatting commands.
//!
//! Pure text rewrites: each command takes the source and a byte-range
//! selection and returns the rewritten source with the new selection.
//! Wrapping commands toggle — applying bold to an already-bold selection
//! removes the markers. Line commands rewrite every line the selection
//! touches.

use std::ops::Range;

use crate::{EditError, Result};

/// A formatting command applied at the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Strikethrough,
    InlineCode,
    /// Set the selected lines to an ATX heading of this level (1-6).
    Heading(u8),
    Blockquote,
    BulletList,
    NumberedList,
    TaskItem,
    /// Wrap the selection as link text with a placeholder target.
    Link,
    /// Wrap the selection as image alt text with a placeholder source.
    Image,
    HorizontalRule,
    /// Fence the selected lines as a code block.
    CodeBlock,
    /// Insert an empty table skeleton in place of the selection.
    Table { rows: usize, cols: usize },
}

/// The rewritten text and where the selection lands in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOutcome {
    pub text: String,
    pub selection: Range<usize>,
}

/// Marker state detected around a selection, for toolbar highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormattingState {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub inline_code: bool,
}

/// Apply a formatting command to `text` at `selection`.
pub fn apply_format(
    text: &str,
    selection: Range<usize>,
    command: &FormatCommand,
) -> Result<FormatOutcome> {
    check_selection(text, &selection)?;

    match command {
        FormatCommand::Bold => Ok(toggle_wrap(text, selection, "**")),
        FormatCommand::Italic => Ok(toggle_wrap(text, selection, "*")),
        FormatCommand::Strikethrough => Ok(toggle_wrap(text, selection, "~~")),
        FormatCommand::InlineCode => Ok(toggle_wrap(text, selection, "`")),

        FormatCommand::Heading(level) => {
            if !(1..=6).contains(level) {
                return Err(EditError::HeadingLevelOutOfRange(*level));
            }
            Ok(set_heading(text, selection, *level as usize))
        }

        FormatCommand::Blockquote => Ok(toggle_line_prefix(text, selection, "> ")),
        FormatCommand::BulletList => Ok(toggle_line_prefix(text, selection, "- ")),
        FormatCommand::TaskItem => Ok(toggle_line_prefix(text, selection, "- [ ] ")),
        FormatCommand::NumberedList => Ok(number_lines(text, selection)),

        FormatCommand::Link => Ok(wrap_target(text, selection, "[", "](url)")),
        FormatCommand::Image => Ok(wrap_target(text, selection, "![", "](path)")),

        FormatCommand::HorizontalRule => Ok(insert_block(text, selection, "---")),
        FormatCommand::CodeBlock => Ok(fence_lines(text, selection)),

        FormatCommand::Table { rows, cols } => {
            if *rows == 0 || *cols == 0 {
                return Err(EditError::DegenerateTable);
            }
            Ok(insert_block(text, selection, &table_skeleton(*rows, *cols)))
        }
    }
}

/// Detect marker state around a selection. Advisory only, so malformed
/// selections report the default state instead of failing.
pub fn detect_state(text: &str, selection: Range<usize>) -> FormattingState {
    if check_selection(text, &selection).is_err() {
        return FormattingState::default();
    }

    let wrapped = |marker: &str| is_wrapped(text, &selection, marker);
    let bold = wrapped("**") || wrapped("__");

    FormattingState {
        bold,
        italic: !bold && (wrapped("*") || wrapped("_")),
        strikethrough: wrapped("~~"),
        inline_code: wrapped("`"),
    }
}

fn check_selection(text: &str, selection: &Range<usize>) -> Result<()> {
    if selection.start > selection.end || selection.end > text.len() {
        return Err(EditError::SelectionOutOfBounds {
            start: selection.start,
            end: selection.end,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(selection.start) || !text.is_char_boundary(selection.end) {
        return Err(EditError::SelectionNotOnCharBoundary);
    }
    Ok(())
}

fn is_wrapped(text: &str, selection: &Range<usize>, marker: &str) -> bool {
    let selected = &text[selection.clone()];
    let before = &text[..selection.start];
    let after = &text[selection.end..];

    (before.ends_with(marker) && after.starts_with(marker))
        || (selected.len() >= 2 * marker.len()
            && selected.starts_with(marker)
            && selected.ends_with(marker))
}

fn toggle_wrap(text: &str, selection: Range<usize>, marker: &str) -> FormatOutcome {
    let selected = &text[selection.clone()];
    let before = &text[..selection.start];
    let after = &text[selection.end..];
    let len = marker.len();

    if before.ends_with(marker) && after.starts_with(marker) {
        // markers sit just outside the selection: drop them
        let start = selection.start - len;
        FormatOutcome {
            text: format!("{}{}{}", &before[..before.len() - len], selected, &after[len..]),
            selection: start..start + selected.len(),
        }
    } else if selected.len() >= 2 * len && selected.starts_with(marker) && selected.ends_with(marker)
    {
        // markers are part of the selection: drop them
        let inner = &selected[len..selected.len() - len];
        FormatOutcome {
            text: format!("{before}{inner}{after}"),
            selection: selection.start..selection.start + inner.len(),
        }
    } else {
        let start = selection.start + len;
        FormatOutcome {
            text: format!("{before}{marker}{selected}{marker}{after}"),
            selection: start..start + selected.len(),
        }
    }
}

/// The full-line span covering a selection.
fn line_span(text: &str, selection: &Range<usize>) -> Range<usize> {
    let start = text[..selection.start]
        .rfind('\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    let end = text[selection.end..]
        .find('\n')
        .map(|i| selection.end + i)
        .unwrap_or(text.len());
    start..end
}

fn splice(text: &str, span: Range<usize>, replacement: &str) -> FormatOutcome {
    FormatOutcome {
        text: format!("{}{}{}", &text[..span.start], replacement, &text[span.end..]),
        selection: span.start..span.start + replacement.len(),
    }
}

fn set_heading(text: &str, selection: Range<usize>, level: usize) -> FormatOutcome {
    let span = line_span(text, &selection);
    let marker = "#".repeat(level);
    let rewritten: Vec<String> = text[span.clone()]
        .split('\n')
        .map(|line| {
            let bare = line.trim_start_matches('#').trim_start();
            format!("{marker} {bare}")
        })
        .collect();
    splice(text, span, &rewritten.join("\n"))
}

fn toggle_line_prefix(text: &str, selection: Range<usize>, prefix: &str) -> FormatOutcome {
    let span = line_span(text, &selection);
    let lines: Vec<&str> = text[span.clone()].split('\n').collect();
    let all_prefixed = lines.iter().all(|line| line.starts_with(prefix));

    let rewritten: Vec<String> = lines
        .iter()
        .map(|line| {
            if all_prefixed {
                line.strip_prefix(prefix).unwrap_or(line).to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect();
    splice(text, span, &rewritten.join("\n"))
}

fn number_lines(text: &str, selection: Range<usize>) -> FormatOutcome {
    let span = line_span(text, &selection);
    let rewritten: Vec<String> = text[span.clone()]
        .split('\n')
        .enumerate()
        .map(|(index, line)| format!("{}. {line}", index + 1))
        .collect();
    splice(text, span, &rewritten.join("\n"))
}

fn wrap_target(text: &str, selection: Range<usize>, open: &str, close: &str) -> FormatOutcome {
    let replacement = format!("{open}{}{close}", &text[selection.clone()]);
    splice(text, selection, &replacement)
}

fn insert_block(text: &str, selection: Range<usize>, block: &str) -> FormatOutcome {
    splice(text, selection, &format!("\n\n{block}\n\n"))
}

fn fence_lines(text: &str, selection: Range<usize>) -> FormatOutcome {
    let span = line_span(text, &selection);
    let replacement = format!("```\n{}\n```", &text[span.clone()]);
    splice(text, span, &replacement)
}

fn table_skeleton(rows: usize, cols: usize) -> String {
    let headers: Vec<String> = (1..=cols).map(|c| format!("Column {c}")).collect();

    let mut lines = Vec::new();
    lines.push(format!("| {} |", headers.join(" | ")));
    lines.push(format!("| {} |", vec!["---"; cols].join(" | ")));
    for _ in 0..rows {
        lines.push(format!("| {} |", vec![" "; cols].join(" | ")));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_wraps_selection() {
        let out = apply_format("make this loud", 5..9, &FormatCommand::Bold).unwrap();
        assert_eq!(out.text, "make **this** loud");
        assert_eq!(out.selection, 7..11);
    }

    #[test]
    fn test_bold_toggles_off() {
        let out = apply_format("make **this** loud", 7..11, &FormatCommand::Bold).unwrap();
        assert_eq!(out.text, "make this loud");
        assert_eq!(out.selection, 5..9);
    }

    #[test]
    fn test_bold_toggles_off_when_markers_inside_selection() {
        let out = apply_format("make **this** loud", 5..13, &FormatCommand::Bold).unwrap();
        assert_eq!(out.text, "make this loud");
    }

    #[test]
    fn test_italic_and_strikethrough_and_code() {
        assert_eq!(
            apply_format("x", 0..1, &FormatCommand::Italic).unwrap().text,
            "*x*"
        );
        assert_eq!(
            apply_format("x", 0..1, &FormatCommand::Strikethrough).unwrap().text,
            "~~x~~"
        );
        assert_eq!(
            apply_format("x", 0..1, &FormatCommand::InlineCode).unwrap().text,
            "`x`"
        );
    }

    #[test]
    fn test_heading_replaces_existing_marker() {
        let out = apply_format("## Old heading", 4..4, &FormatCommand::Heading(1)).unwrap();
        assert_eq!(out.text, "# Old heading");
    }

    #[test]
    fn test_heading_level_out_of_range() {
        assert_eq!(
            apply_format("x", 0..0, &FormatCommand::Heading(7)),
            Err(EditError::HeadingLevelOutOfRange(7))
        );
    }

    #[test]
    fn test_blockquote_covers_touched_lines() {
        let out = apply_format("one\ntwo\nthree", 5..9, &FormatCommand::Blockquote).unwrap();
        assert_eq!(out.text, "one\n> two\n> three");
    }

    #[test]
    fn test_bullet_list_toggles() {
        let quoted = apply_format("a\nb", 0..3, &FormatCommand::BulletList).unwrap();
        assert_eq!(quoted.text, "- a\n- b");

        let back = apply_format(&quoted.text, 0..quoted.text.len(), &FormatCommand::BulletList)
            .unwrap();
        assert_eq!(back.text, "a\nb");
    }

    #[test]
    fn test_numbered_list() {
        let out = apply_format("a\nb\nc", 0..5, &FormatCommand::NumberedList).unwrap();
        assert_eq!(out.text, "1. a\n2. b\n3. c");
    }

    #[test]
    fn test_task_item() {
        let out = apply_format("chore", 0..5, &FormatCommand::TaskItem).unwrap();
        assert_eq!(out.text, "- [ ] chore");
    }

    #[test]
    fn test_link_and_image() {
        assert_eq!(
            apply_format("here", 0..4, &FormatCommand::Link).unwrap().text,
            "[here](url)"
        );
        assert_eq!(
            apply_format("pic", 0..3, &FormatCommand::Image).unwrap().text,
            "![pic](path)"
        );
    }

    #[test]
    fn test_horizontal_rule_insertion() {
        let out = apply_format("ab", 1..1, &FormatCommand::HorizontalRule).unwrap();
        assert_eq!(out.text, "a\n\n---\n\nb");
    }

    #[test]
    fn test_code_block_fences_lines() {
        let out = apply_format("let x = 1;", 0..0, &FormatCommand::CodeBlock).unwrap();
        assert_eq!(out.text, "```\nlet x = 1;\n```");
    }

    #[test]
    fn test_table_skeleton() {
        let out = apply_format("", 0..0, &FormatCommand::Table { rows: 2, cols: 2 }).unwrap();
        assert!(out.text.contains("| Column 1 | Column 2 |"));
        assert!(out.text.contains("| --- | --- |"));
        assert_eq!(out.text.matches("|   |   |").count(), 2);
    }

    #[test]
    fn test_degenerate_table_rejected() {
        assert_eq!(
            apply_format("", 0..0, &FormatCommand::Table { rows: 0, cols: 3 }),
            Err(EditError::DegenerateTable)
        );
    }

    #[test]
    fn test_selection_out_of_bounds() {
        assert_eq!(
            apply_format("ab", 1..9, &FormatCommand::Bold),
            Err(EditError::SelectionOutOfBounds {
                start: 1,
                end: 9,
                len: 2
            })
        );
    }

    #[test]
    fn test_selection_off_char_boundary() {
        // é is two bytes; offset 1 splits it
        assert_eq!(
            apply_format("é", 0..1, &FormatCommand::Bold),
            Err(EditError::SelectionNotOnCharBoundary)
        );
    }

    #[test]
    fn test_detect_state() {
        let state = detect_state("make **this** loud", 7..11);
        assert!(state.bold);
        assert!(!state.italic);

        let state = detect_state("an *em* word", 4..6);
        assert!(state.italic);
        assert!(!state.bold);

        assert_eq!(detect_state("plain", 0..5), FormattingState::default());
    }
}
