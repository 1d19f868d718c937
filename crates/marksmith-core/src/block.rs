//! Transient block model produced by the line scanner.
//!
//! No persistent syntax tree exists in the engine: these values live only
//! for the duration of one [`render_fragment`](crate::render_fragment) call
//! and are rebuilt from scratch every time. There is no caching and no
//! incremental update.

/// Column alignment parsed from a table separator cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A block-level construct recognized in the source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// ATX heading; `id` is derived purely from the raw text and is not
    /// deduplicated — equal headings collide silently.
    Heading {
        level: u8,
        text: String,
        id: String,
    },

    /// Consecutive non-blank lines matching no other construct.
    Paragraph { lines: Vec<String> },

    /// Fenced code block; lines are raw source, escaped only at emission.
    CodeBlock {
        language: Option<String>,
        lines: Vec<String>,
    },

    /// Dequoted inner text; re-enters the block pipeline on emission.
    Blockquote { inner: String },

    /// `- ` / `* ` / `+ ` items.
    BulletList { items: Vec<String> },

    /// `1. `-style items; display numbering is always 1..N, the source
    /// numerals are discarded.
    NumberedList { items: Vec<String> },

    /// `- [ ]` / `- [x]` items with their checked state.
    TaskList { items: Vec<(bool, String)> },

    /// Pipe table. Row cell counts are kept as-is even when they differ
    /// from the header's column count.
    Table {
        headers: Vec<String>,
        alignments: Vec<Alignment>,
        rows: Vec<Vec<String>>,
    },

    /// Horizontal rule.
    Rule,
}
