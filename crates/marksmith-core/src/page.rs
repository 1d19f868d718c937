//! Full-page HTML rendering around the fragment renderer.

use crate::assemble::render_fragment;
use crate::entity::escape_html;

const LIGHT_STYLE: &str = "\
body{margin:0;background:#ffffff;color:#24292f;}\
main{max-width:48rem;margin:0 auto;padding:2rem 1.5rem;\
font-family:-apple-system,'Segoe UI',Roboto,sans-serif;line-height:1.6;}\
h1,h2{border-bottom:1px solid #d8dee4;padding-bottom:.3em;}\
pre{background:#f6f8fa;padding:1em;border-radius:6px;overflow-x:auto;}\
code{font-family:ui-monospace,'Cascadia Mono',monospace;font-size:.92em;}\
blockquote{margin:0;padding-left:1em;border-left:.25em solid #d0d7de;color:#57606a;}\
table{border-collapse:collapse;}th,td{border:1px solid #d0d7de;padding:.4em .8em;}\
a{color:#0969da;}hr{border:0;border-top:2px solid #d8dee4;}\
main:focus{outline:none;}";

const DARK_STYLE: &str = "\
body{margin:0;background:#0d1117;color:#e6edf3;}\
main{max-width:48rem;margin:0 auto;padding:2rem 1.5rem;\
font-family:-apple-system,'Segoe UI',Roboto,sans-serif;line-height:1.6;}\
h1,h2{border-bottom:1px solid #30363d;padding-bottom:.3em;}\
pre{background:#161b22;padding:1em;border-radius:6px;overflow-x:auto;}\
code{font-family:ui-monospace,'Cascadia Mono',monospace;font-size:.92em;}\
blockquote{margin:0;padding-left:1em;border-left:.25em solid #30363d;color:#8b949e;}\
table{border-collapse:collapse;}th,td{border:1px solid #30363d;padding:.4em .8em;}\
a{color:#58a6ff;}hr{border:0;border-top:2px solid #30363d;}\
main:focus{outline:none;}";

/// Presentation options for [`render_page`].
#[derive(Debug, Clone)]
pub struct PageOptions {
    /// Use the dark stylesheet instead of the light one.
    pub dark_theme: bool,

    /// Mark the content container `contenteditable` so the page can serve
    /// as the rich-text editing surface.
    pub editable_surface: bool,

    /// Document title, HTML-escaped wherever it appears.
    pub title: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            dark_theme: false,
            editable_surface: false,
            title: "Untitled".to_string(),
        }
    }
}

/// Wrap [`render_fragment`]'s output in a complete styled HTML document.
pub fn render_page(markdown: &str, options: &PageOptions) -> String {
    let title = escape_html(&options.title);
    let style = if options.dark_theme {
        DARK_STYLE
    } else {
        LIGHT_STYLE
    };
    let editable = if options.editable_surface {
        " contenteditable=\"true\""
    } else {
        ""
    };

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>{style}</style>\n\
         </head>\n\
         <body>\n\
         <main id=\"content\"{editable}>\n\
         {fragment}\n\
         </main>\n\
         </body>\n\
         </html>\n",
        fragment = render_fragment(markdown),
    )
}
