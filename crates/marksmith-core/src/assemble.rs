//! Line-oriented block assembly for the Markdown to HTML direction.
//!
//! The scanner walks the source lines with a cursor, recognizing one block
//! construct per step (first match wins) and advancing a variable number of
//! lines. Recognized blocks are emitted as HTML in source order. Blockquotes
//! re-enter [`render_fragment`] on their dequoted inner text — the only
//! recursion in the engine.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{Alignment, Block};
use crate::entity::escape_html;
use crate::inline::process_spans;
use crate::strip::slug;

static HEADING_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6}) (.*)$").unwrap());
static NUMBERED_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\. ").unwrap());

/// Render a Markdown string to an HTML fragment.
///
/// Total: any input, including empty or malformed text, produces some
/// deterministic fragment. Empty and blank input produce an empty fragment.
pub fn render_fragment(markdown: &str) -> String {
    let source = markdown.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = source.lines().collect();

    let rendered: Vec<String> = scan_blocks(&lines).iter().map(emit_block).collect();
    rendered.join("\n")
}

fn scan_blocks(lines: &[&str]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.trim().is_empty() {
            i += 1;
        } else if is_rule_line(line) {
            blocks.push(Block::Rule);
            i += 1;
        } else if line.trim_start().starts_with("```") {
            let (block, next) = scan_code_block(lines, i);
            blocks.push(block);
            i = next;
        } else if let Some(caps) = HEADING_START.captures(line) {
            let text = caps[2].trim().to_string();
            blocks.push(Block::Heading {
                level: caps[1].len() as u8,
                id: slug(&text),
                text,
            });
            i += 1;
        } else if line.starts_with('>') {
            let (block, next) = scan_blockquote(lines, i);
            blocks.push(block);
            i = next;
        } else if is_bullet_line(line) {
            let mut items = Vec::new();
            while i < lines.len() && is_bullet_line(lines[i]) {
                items.push(lines[i][2..].to_string());
                i += 1;
            }
            blocks.push(Block::BulletList { items });
        } else if NUMBERED_START.is_match(line) {
            let mut items = Vec::new();
            while i < lines.len() && NUMBERED_START.is_match(lines[i]) {
                let text = lines[i].splitn(2, ". ").nth(1).unwrap_or("");
                items.push(text.to_string());
                i += 1;
            }
            blocks.push(Block::NumberedList { items });
        } else if is_table_start(lines, i) {
            let (block, next) = scan_table(lines, i);
            blocks.push(block);
            i = next;
        } else if is_task_line(line) {
            let mut items = Vec::new();
            while i < lines.len() && is_task_line(lines[i]) {
                items.push(scan_task_item(lines[i]));
                i += 1;
            }
            blocks.push(Block::TaskList { items });
        } else {
            let mut para = Vec::new();
            while i < lines.len() && !lines[i].trim().is_empty() && !starts_block(lines, i) {
                para.push(lines[i].to_string());
                i += 1;
            }
            blocks.push(Block::Paragraph { lines: para });
        }
    }

    blocks
}

/// Trimmed length >= 3, composed of one marker character (`-`, `*` or `_`)
/// optionally interspersed with spaces, with at least 3 marker occurrences.
fn is_rule_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.len() < 3 {
        return false;
    }

    ['-', '*', '_'].iter().any(|&marker| {
        trimmed.chars().filter(|&c| c == marker).count() >= 3
            && trimmed.chars().all(|c| c == marker || c == ' ')
    })
}

fn is_task_line(line: &str) -> bool {
    line.starts_with("- [")
}

fn is_bullet_line(line: &str) -> bool {
    !is_task_line(line)
        && (line.starts_with("- ") || line.starts_with("* ") || line.starts_with("+ "))
}

fn is_separator_line(line: &str) -> bool {
    if !line.contains('|') {
        return false;
    }

    let cells = split_row(line);
    !cells.is_empty()
        && cells.iter().all(|cell| {
            !cell.is_empty()
                && cell.contains('-')
                && cell.chars().all(|c| c == '-' || c == ':')
        })
}

/// Tables are the one construct needing lookahead: a line containing a pipe
/// only opens a table when the next line is a separator row.
fn is_table_start(lines: &[&str], i: usize) -> bool {
    lines[i].contains('|') && i + 1 < lines.len() && is_separator_line(lines[i + 1])
}

/// Whether any non-paragraph construct begins at this cursor position;
/// paragraphs consume lines until one does.
fn starts_block(lines: &[&str], i: usize) -> bool {
    let line = lines[i];
    is_rule_line(line)
        || line.trim_start().starts_with("```")
        || HEADING_START.is_match(line)
        || line.starts_with('>')
        || is_bullet_line(line)
        || NUMBERED_START.is_match(line)
        || is_table_start(lines, i)
        || is_task_line(line)
}

fn scan_code_block(lines: &[&str], start: usize) -> (Block, usize) {
    let opener = lines[start].trim_start();
    let token = opener[3..].trim();
    let language = if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    };

    let mut body = Vec::new();
    let mut i = start + 1;
    while i < lines.len() && !lines[i].trim_start().starts_with("```") {
        body.push(lines[i].to_string());
        i += 1;
    }
    if i < lines.len() {
        // skip the closing fence
        i += 1;
    }

    (
        Block::CodeBlock {
            language,
            lines: body,
        },
        i,
    )
}

fn scan_blockquote(lines: &[&str], start: usize) -> (Block, usize) {
    let mut inner = Vec::new();
    let mut i = start;

    while i < lines.len() && lines[i].starts_with('>') {
        // strip the marker and at most one following space
        let stripped = &lines[i][1..];
        inner.push(stripped.strip_prefix(' ').unwrap_or(stripped));
        i += 1;
    }

    (
        Block::Blockquote {
            inner: inner.join("\n"),
        },
        i,
    )
}

fn scan_task_item(line: &str) -> (bool, String) {
    let checked = line.starts_with("- [x]") || line.starts_with("- [X]");
    let rest = line.splitn(2, ']').nth(1).unwrap_or("");
    let text = rest.strip_prefix(' ').unwrap_or(rest);
    (checked, text.to_string())
}

fn scan_table(lines: &[&str], start: usize) -> (Block, usize) {
    let headers = split_row(lines[start]);
    let alignments = split_row(lines[start + 1])
        .iter()
        .map(|cell| parse_alignment(cell))
        .collect();

    let mut rows = Vec::new();
    let mut i = start + 2;
    while i < lines.len() && lines[i].contains('|') {
        rows.push(split_row(lines[i]));
        i += 1;
    }

    (
        Block::Table {
            headers,
            alignments,
            rows,
        },
        i,
    )
}

fn split_row(line: &str) -> Vec<String> {
    let mut trimmed = line.trim();
    trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    trimmed.split('|').map(|cell| cell.trim().to_string()).collect()
}

fn parse_alignment(cell: &str) -> Alignment {
    let leading = cell.starts_with(':');
    let trailing = cell.ends_with(':');
    if leading && trailing {
        Alignment::Center
    } else if trailing {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

fn emit_block(block: &Block) -> String {
    match block {
        Block::Heading { level, text, id } => {
            format!("<h{level} id=\"{id}\">{}</h{level}>", process_spans(text))
        }

        Block::Paragraph { lines } => {
            let content = process_spans(&lines.join("\n")).replace('\n', "<br>");
            format!("<p>{content}</p>")
        }

        Block::CodeBlock { language, lines } => {
            let escaped: Vec<String> = lines.iter().map(|line| escape_html(line)).collect();
            let code = escaped.join("\n");
            match language {
                Some(lang) => {
                    format!("<pre><code class=\"language-{lang}\">{code}</code></pre>")
                }
                None => format!("<pre><code>{code}</code></pre>"),
            }
        }

        Block::Blockquote { inner } => {
            format!("<blockquote>\n{}\n</blockquote>", render_fragment(inner))
        }

        Block::BulletList { items } => emit_list("<ul>", "</ul>", items),

        Block::NumberedList { items } => emit_list("<ol>", "</ol>", items),

        Block::TaskList { items } => {
            let mut out = String::from("<ul class=\"task-list\">\n");
            for (checked, text) in items {
                let state = if *checked { " checked" } else { "" };
                out.push_str("<li class=\"task-list-item\">");
                out.push_str(&format!("<input type=\"checkbox\"{state} disabled> "));
                out.push_str(&process_spans(text));
                out.push_str("</li>\n");
            }
            out.push_str("</ul>");
            out
        }

        Block::Table {
            headers,
            alignments,
            rows,
        } => emit_table(headers, alignments, rows),

        Block::Rule => "<hr>".to_string(),
    }
}

fn emit_list(open: &str, close: &str, items: &[String]) -> String {
    let mut out = String::from(open);
    out.push('\n');
    for item in items {
        out.push_str(&format!("<li>{}</li>\n", process_spans(item)));
    }
    out.push_str(close);
    out
}

fn emit_table(headers: &[String], alignments: &[Alignment], rows: &[Vec<String>]) -> String {
    let mut out = String::from("<table>\n<thead>\n<tr>");
    for (idx, header) in headers.iter().enumerate() {
        out.push_str(&format!(
            "<th{}>{}</th>",
            style_attr(alignments.get(idx)),
            process_spans(header)
        ));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    // rows keep their own cell counts, however they compare to the header's
    for row in rows {
        out.push_str("<tr>");
        for (idx, cell) in row.iter().enumerate() {
            out.push_str(&format!(
                "<td{}>{}</td>",
                style_attr(alignments.get(idx)),
                process_spans(cell)
            ));
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>");
    out
}

fn style_attr(alignment: Option<&Alignment>) -> &'static str {
    match alignment {
        Some(Alignment::Center) => " style=\"text-align:center\"",
        Some(Alignment::Right) => " style=\"text-align:right\"",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(render_fragment(""), "");
        assert_eq!(render_fragment("   \n\n  "), "");
    }

    #[test]
    fn test_plain_text_becomes_paragraph() {
        assert_eq!(render_fragment("hello world"), "<p>hello world</p>");
    }

    #[test]
    fn test_paragraph_escapes_html() {
        assert_eq!(render_fragment("a < b"), "<p>a &lt; b</p>");
    }

    #[test]
    fn test_paragraph_internal_newlines_become_breaks() {
        assert_eq!(
            render_fragment("first line\nsecond line"),
            "<p>first line<br>second line</p>"
        );
    }

    #[test]
    fn test_heading_with_slug_id() {
        assert_eq!(
            render_fragment("# Hello"),
            "<h1 id=\"hello\">Hello</h1>"
        );
        assert_eq!(
            render_fragment("### My Heading!"),
            "<h3 id=\"my-heading\">My Heading!</h3>"
        );
    }

    #[test]
    fn test_seven_hashes_is_not_a_heading() {
        assert_eq!(
            render_fragment("####### nope"),
            "<p>####### nope</p>"
        );
    }

    #[test]
    fn test_duplicate_heading_ids_collide() {
        let html = render_fragment("# Notes\n\n# Notes");
        assert_eq!(html.matches("id=\"notes\"").count(), 2);
    }

    #[test]
    fn test_horizontal_rules() {
        assert_eq!(render_fragment("---"), "<hr>");
        assert_eq!(render_fragment("* * *"), "<hr>");
        assert_eq!(render_fragment("___"), "<hr>");
        // two markers are not enough
        assert_eq!(render_fragment("--"), "<p>--</p>");
    }

    #[test]
    fn test_fenced_code_block() {
        let html = render_fragment("```rust\nlet x = 1;\n```");
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">let x = 1;</code></pre>"
        );
    }

    #[test]
    fn test_fenced_code_without_language() {
        assert_eq!(
            render_fragment("```\ncode\n```"),
            "<pre><code>code</code></pre>"
        );
    }

    #[test]
    fn test_code_block_is_escaped_not_inline_processed() {
        let html = render_fragment("```\n**<b>**\n```");
        assert_eq!(html, "<pre><code>**&lt;b&gt;**</code></pre>");
    }

    #[test]
    fn test_unclosed_fence_runs_to_end_of_input() {
        assert_eq!(
            render_fragment("```\ndangling"),
            "<pre><code>dangling</code></pre>"
        );
    }

    #[test]
    fn test_blockquote_recurses() {
        assert_eq!(
            render_fragment("> # Quoted\n> text"),
            "<blockquote>\n<h1 id=\"quoted\">Quoted</h1>\n<p>text</p>\n</blockquote>"
        );
    }

    #[test]
    fn test_blockquote_strips_one_space_after_marker() {
        assert_eq!(
            render_fragment(">  indented"),
            "<blockquote>\n<p> indented</p>\n</blockquote>"
        );
    }

    #[test]
    fn test_bullet_list() {
        assert_eq!(
            render_fragment("- one\n- two"),
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>"
        );
        assert_eq!(
            render_fragment("* a\n+ b"),
            "<ul>\n<li>a</li>\n<li>b</li>\n</ul>"
        );
    }

    #[test]
    fn test_numbered_list_renumbers() {
        // source ordinals are discarded; output order is positional
        assert_eq!(
            render_fragment("7. first\n3. second"),
            "<ol>\n<li>first</li>\n<li>second</li>\n</ol>"
        );
    }

    #[test]
    fn test_task_list() {
        let html = render_fragment("- [x] done\n- [ ] open");
        assert_eq!(
            html,
            "<ul class=\"task-list\">\n\
             <li class=\"task-list-item\"><input type=\"checkbox\" checked disabled> done</li>\n\
             <li class=\"task-list-item\"><input type=\"checkbox\" disabled> open</li>\n\
             </ul>"
        );
    }

    #[test]
    fn test_task_list_uppercase_x() {
        let html = render_fragment("- [X] shouting");
        assert!(html.contains("checked"));
    }

    #[test]
    fn test_task_lines_interrupt_bullet_list() {
        let html = render_fragment("- plain\n- [ ] boxed");
        assert!(html.contains("<ul>\n<li>plain</li>\n</ul>"));
        assert!(html.contains("task-list"));
    }

    #[test]
    fn test_separator_cell_alignment() {
        assert_eq!(parse_alignment(":---:"), Alignment::Center);
        assert_eq!(parse_alignment("---:"), Alignment::Right);
        assert_eq!(parse_alignment("---"), Alignment::Left);
        assert_eq!(parse_alignment(":---"), Alignment::Left);
    }

    #[test]
    fn test_table_with_alignments() {
        let html = render_fragment("| L | C | R |\n| --- | :---: | ---: |\n| a | b | c |");
        assert!(html.contains("<th>L</th>"));
        assert!(html.contains("<th style=\"text-align:center\">C</th>"));
        assert!(html.contains("<th style=\"text-align:right\">R</th>"));
        assert!(html.contains("<td>a</td>"));
        assert!(html.contains("<td style=\"text-align:center\">b</td>"));
    }

    #[test]
    fn test_table_requires_separator_lookahead() {
        // a lone pipe line with no separator under it is just a paragraph
        assert_eq!(
            render_fragment("a | b"),
            "<p>a | b</p>"
        );
    }

    #[test]
    fn test_table_rows_keep_their_cell_counts() {
        let html = render_fragment("| A | B |\n| --- | --- |\n| only |");
        assert!(html.contains("<tr><td>only</td></tr>"));
    }

    #[test]
    fn test_paragraph_stops_at_block_starter() {
        let html = render_fragment("text\n# Head");
        assert_eq!(html, "<p>text</p>\n<h1 id=\"head\">Head</h1>");
    }

    #[test]
    fn test_block_order_matches_source_order() {
        let html = render_fragment("# A\n\npara\n\n---");
        let a = html.find("<h1").unwrap();
        let p = html.find("<p>").unwrap();
        let hr = html.find("<hr>").unwrap();
        assert!(a < p && p < hr);
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(
            render_fragment("# Hi\r\ntext"),
            "<h1 id=\"hi\">Hi</h1>\n<p>text</p>"
        );
    }

    #[test]
    fn test_inline_spans_inside_blocks() {
        assert_eq!(
            render_fragment("- **bold** item"),
            "<ul>\n<li><strong>bold</strong> item</li>\n</ul>"
        );
    }
}
