//! Document state tracking around the conversion engine.

use std::path::{Path, PathBuf};

use marksmith_core::{normalize, render_fragment, render_page, PageOptions};

/// The Markdown source buffer with its backing path and dirty flag.
///
/// Owns no engine state — the engine is stateless — and does no file I/O;
/// reading and writing bytes stays with the caller.
#[derive(Debug, Clone, Default)]
pub struct Document {
    content: String,
    path: Option<PathBuf>,
    dirty: bool,
}

impl Document {
    /// An empty, unsaved document.
    pub fn new() -> Self {
        Self::default()
    }

    /// A document seeded from existing text, considered clean.
    pub fn from_text(text: &str) -> Self {
        Self {
            content: text.to_string(),
            path: None,
            dirty: false,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// File stem of the backing path, or "Untitled" for unsaved documents.
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Replace the source buffer, marking the document dirty when the text
    /// actually changed.
    pub fn replace_content(&mut self, text: &str) {
        if self.content != text {
            self.content = text.to_string();
            self.dirty = true;
        }
    }

    /// Fold edits made on the rich-text surface back into the source: the
    /// surface's HTML is normalized to Markdown and replaces the buffer.
    pub fn apply_surface_html(&mut self, html: &str) {
        let markdown = normalize(html);
        self.replace_content(&markdown);
    }

    /// HTML fragment of the current buffer, for embedding in a host view.
    pub fn preview_fragment(&self) -> String {
        render_fragment(&self.content)
    }

    /// Complete editable preview page for the rich-text surface.
    pub fn preview_page(&self, dark_theme: bool) -> String {
        render_page(
            &self.content,
            &PageOptions {
                dark_theme,
                editable_surface: true,
                title: self.display_name(),
            },
        )
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_is_clean_and_untitled() {
        let doc = Document::new();
        assert!(!doc.is_dirty());
        assert_eq!(doc.display_name(), "Untitled");
        assert_eq!(doc.content(), "");
    }

    #[test]
    fn test_display_name_from_path() {
        let mut doc = Document::new();
        doc.set_path("/home/me/notes/ideas.md");
        assert_eq!(doc.display_name(), "ideas");
    }

    #[test]
    fn test_replace_content_marks_dirty() {
        let mut doc = Document::from_text("# Old");
        doc.replace_content("# New");
        assert!(doc.is_dirty());

        doc.mark_saved();
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_replace_with_identical_content_stays_clean() {
        let mut doc = Document::from_text("# Same");
        doc.replace_content("# Same");
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_apply_surface_html_normalizes() {
        let mut doc = Document::from_text("# Title");
        doc.apply_surface_html("<h1 id=\"title\">Title</h1>\n<p><strong>added</strong></p>");
        assert_eq!(doc.content(), "# Title\n\n**added**");
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_surface_round_trip_keeps_document_clean() {
        let mut doc = Document::from_text("- one\n- two");
        let html = doc.preview_fragment();
        doc.apply_surface_html(&html);
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_preview_page_uses_display_name() {
        let mut doc = Document::from_text("text");
        doc.set_path("draft.md");
        let page = doc.preview_page(false);
        assert!(page.contains("<title>draft</title>"));
        assert!(page.contains("contenteditable"));
    }
}
