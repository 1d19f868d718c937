//! HTML to Markdown normalization.
//!
//! The reverse direction of the engine: edits made on the rich-text surface
//! arrive as raw HTML and are rewritten back into canonical Markdown. Two
//! ordered substitution passes run over the whole text — block patterns
//! first, then inline patterns with residual tag stripping and entity
//! decoding as the fallback for anything unrecognized.

mod block;
mod inline;

/// Normalize an HTML fragment to Markdown.
///
/// Total: any input produces some deterministic output, degrading to
/// flattened plain text when no pattern matches. Null-equivalent input
/// (empty or whitespace-only) normalizes to the empty string.
pub fn normalize(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    inline::rewrite_spans(&block::rewrite_blocks(html))
}
