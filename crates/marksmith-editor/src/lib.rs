//! # marksmith-editor
//!
//! Editor-side collaborators around the `marksmith-core` conversion engine:
//! the document/dirty-state tracker, text statistics and the plain-text
//! exporter, and cursor-relative Markdown formatting commands.
//!
//! Reading and writing bytes stays with the caller — nothing in this crate
//! touches the file system.

mod document;
mod formatting;
mod stats;

pub use document::Document;
pub use formatting::{
    apply_format, detect_state, FormatCommand, FormatOutcome, FormattingState,
};
pub use stats::{plain_text, TextStats};

/// Error type for editing operations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("selection {start}..{end} is outside the document (length {len})")]
    SelectionOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("selection does not fall on character boundaries")]
    SelectionNotOnCharBoundary,

    #[error("heading level {0} is out of range 1-6")]
    HeadingLevelOutOfRange(u8),

    #[error("a table needs at least one row and one column")]
    DegenerateTable,
}

pub type Result<T> = std::result::Result<T, EditError>;
