//! Plain-text extraction from HTML fragments and heading-anchor slugs.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Remove every angle-bracket-delimited tag, concatenating the inner text.
///
/// Used to extract heading text for slugs and to flatten arbitrary HTML to
/// plain text in the reverse converter's fallback path.
pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

/// Derive a URL/anchor-safe identifier from heading text.
///
/// Lower-cases, drops every character that is not a word character,
/// whitespace, or hyphen, then replaces spaces with hyphens. Ids are derived
/// purely from the text, so two headings with the same wording produce the
/// same id.
pub fn slug(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    kept.replace(' ', "-")
}
