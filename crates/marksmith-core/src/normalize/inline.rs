//! Inline rewrites and fallback cleanup for the HTML to Markdown direction.
//!
//! Mirror image of the forward inline pipeline, plus the unconditional
//! fallback: whatever no rule recognized is tag-stripped and entity-decoded
//! so the output is always plain Markdown text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::entity::decode_entities;
use crate::strip::strip_tags;

static IMAGE_SRC_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<img\b[^>]*?src="([^"]*)"[^>]*?alt="([^"]*)"[^>]*?>"#).unwrap()
});
static IMAGE_ALT_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<img\b[^>]*?alt="([^"]*)"[^>]*?src="([^"]*)"[^>]*?>"#).unwrap()
});
static ANCHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)<a\b[^>]*?href="([^"]*)"[^>]*>(.*?)</a>"#).unwrap());
static EMPHASIS_STRONG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:em|i)\b[^>]*><(?:strong|b)\b[^>]*>(.*?)</(?:strong|b)></(?:em|i)>")
        .unwrap()
});
static STRONG_EMPHASIS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(?:strong|b)\b[^>]*><(?:em|i)\b[^>]*>(.*?)</(?:em|i)></(?:strong|b)>")
        .unwrap()
});
static STRONG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<strong\b[^>]*>(.*?)</strong>").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<b\b[^>]*>(.*?)</b>").unwrap());
static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<em\b[^>]*>(.*?)</em>").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<i\b[^>]*>(.*?)</i>").unwrap());
static STRIKE_DEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<del\b[^>]*>(.*?)</del>").unwrap());
static STRIKE_S: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<s\b[^>]*>(.*?)</s>").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<code\b[^>]*>(.*?)</code>").unwrap());
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"<br\s*/?>").unwrap());

/// Rewrite inline tags to Markdown spans, then strip, decode, and tidy.
/// Runs after the block pass.
pub fn rewrite_spans(html: &str) -> String {
    let mut out = html.to_string();

    out = IMAGE_SRC_FIRST.replace_all(&out, "![$2]($1)").into_owned();
    out = IMAGE_ALT_FIRST.replace_all(&out, "![$1]($2)").into_owned();
    out = ANCHOR.replace_all(&out, "[$2]($1)").into_owned();
    out = EMPHASIS_STRONG.replace_all(&out, "***$1***").into_owned();
    out = STRONG_EMPHASIS.replace_all(&out, "***$1***").into_owned();
    out = STRONG.replace_all(&out, "**$1**").into_owned();
    out = BOLD.replace_all(&out, "**$1**").into_owned();
    out = EMPHASIS.replace_all(&out, "*$1*").into_owned();
    out = ITALIC.replace_all(&out, "*$1*").into_owned();
    out = STRIKE_DEL.replace_all(&out, "~~$1~~").into_owned();
    out = STRIKE_S.replace_all(&out, "~~$1~~").into_owned();
    out = CODE.replace_all(&out, "`$1`").into_owned();
    out = LINE_BREAK.replace_all(&out, "\n").into_owned();

    out = strip_tags(&out);
    out = decode_entities(&out);

    collapse_newlines(&out).trim().to_string()
}

/// Collapse three or more consecutive newlines to exactly two.
fn collapse_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0;

    for c in text.chars() {
        if c == '\n' {
            run += 1;
            if run <= 2 {
                out.push(c);
            }
        } else {
            run = 0;
            out.push(c);
        }
    }

    out
}
