//! # marksmith-core
//!
//! Bidirectional Markdown ⇄ HTML conversion engine for the marksmith
//! desktop editor.
//!
//! The forward direction renders Markdown to an HTML fragment for the live
//! preview; the reverse direction normalizes HTML produced by the rich-text
//! editing surface back into canonical Markdown source. Both directions are
//! substitution pipelines over immutable strings — there is no parse tree,
//! no caching, and no state between calls.
//!
//! # Architecture
//!
//! ```text
//! Markdown ──block assembler──▶ ┌───────────────┐
//!              (inline spans)   │ HTML fragment │ ──page wrapper──▶ full page
//!                               └───────────────┘
//!                                      │
//!            block normalizer ◀────────┘
//!            inline normalizer
//!                   │
//!                   ▼
//!               Markdown
//! ```
//!
//! Every entry point is a pure, total function: any input string, however
//! malformed, produces some deterministic output string. Because nothing is
//! shared or mutated, concurrent calls from independent threads need no
//! locking.
//!
//! # Example
//!
//! ```rust
//! use marksmith_core::{normalize, render_fragment};
//!
//! let html = render_fragment("# Hello\n\nSome **bold** text.");
//! assert!(html.contains("<h1 id=\"hello\">Hello</h1>"));
//!
//! let markdown = normalize(&html);
//! assert!(markdown.contains("**bold**"));
//! ```

mod assemble;
mod block;
mod entity;
mod inline;
mod normalize;
mod page;
mod strip;

pub use assemble::render_fragment;
pub use block::{Alignment, Block};
pub use entity::{decode_entities, escape_html};
pub use normalize::normalize;
pub use page::{render_page, PageOptions};
pub use strip::{slug, strip_tags};
