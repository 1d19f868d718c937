//! Inline span substitutions for the Markdown to HTML direction.
//!
//! A fixed-order, single-pass substitution pipeline over an immutable
//! string. The order is semantic: triple markers run before bold so that
//! `***x***` is not misread as `**` plus a stray `*`, and italics run after
//! bold so bold markers are already consumed. Code-span contents are not
//! protected from later rules — marker characters left inside a span are
//! still rewritten downstream. That fragility is part of the contract and
//! round-trip behavior, not something to correct here.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entity::escape_html;

static CODE_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]*)\)").unwrap());
static BOLD_ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").unwrap());
static BOLD_STARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static BOLD_UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.+?)__").unwrap());
static ITALIC_STAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*").unwrap());
static ITALIC_UNDERSCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_(.+?)_").unwrap());
static STRIKETHROUGH: Lazy<Regex> = Lazy::new(|| Regex::new(r"~~(.+?)~~").unwrap());

/// Convert the inline Markdown spans of one block of text to HTML.
///
/// The input is HTML-escaped first; the substitutions then insert real tags.
/// Total and stateless — every input produces some deterministic output.
pub fn process_spans(text: &str) -> String {
    let mut out = escape_html(text);

    out = CODE_SPAN.replace_all(&out, "<code>$1</code>").into_owned();
    out = IMAGE
        .replace_all(&out, r#"<img src="$2" alt="$1">"#)
        .into_owned();
    out = LINK
        .replace_all(&out, r#"<a href="$2">$1</a>"#)
        .into_owned();
    out = BOLD_ITALIC
        .replace_all(&out, "<em><strong>$1</strong></em>")
        .into_owned();
    out = BOLD_STARS.replace_all(&out, "<strong>$1</strong>").into_owned();
    out = BOLD_UNDERSCORES
        .replace_all(&out, "<strong>$1</strong>")
        .into_owned();
    out = ITALIC_STAR.replace_all(&out, "<em>$1</em>").into_owned();
    out = ITALIC_UNDERSCORE.replace_all(&out, "<em>$1</em>").into_owned();
    out = STRIKETHROUGH.replace_all(&out, "<del>$1</del>").into_owned();

    out
}
