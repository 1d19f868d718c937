//! Escaping and decoding of HTML character references.
//!
//! Only the five HTML-significant characters and a small fixed set of named
//! references are handled. The decoder is shared with collaborators outside
//! full conversion (the plain-text exporter uses it together with
//! [`strip_tags`](crate::strip_tags)).

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Named character references recognized by [`decode_entities`].
///
/// Iteration order is decode order: `&amp;` sits last so decoding never
/// manufactures new references out of its own output, which keeps the
/// decode idempotent on text already free of the recognized entities.
static NAMED_REFERENCES: Lazy<IndexMap<&'static str, &'static str>> = Lazy::new(|| {
    IndexMap::from([
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&apos;", "'"),
        ("&#39;", "'"),
        ("&nbsp;", " "),
        ("&amp;", "&"),
    ])
});

/// Escape the five HTML-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }

    result
}

/// Decode the fixed set of named character references back to plain text.
pub fn decode_entities(text: &str) -> String {
    let mut result = text.to_string();

    for (reference, replacement) in NAMED_REFERENCES.iter() {
        if result.contains(reference) {
            result = result.replace(reference, replacement);
        }
    }

    result
}
