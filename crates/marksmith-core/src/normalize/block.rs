//! Block-level rewrites for the HTML to Markdown direction.
//!
//! Ordered pattern substitutions over the whole text. Code blocks go first
//! so their contents are re-embedded before any other rule can touch them;
//! task lists go before plain bullet lists so the task-list marker class is
//! still present when the generic `<ul>` rule runs; paragraphs go last.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::entity::decode_entities;
use crate::strip::strip_tags;

static FENCED_WITH_LANGUAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<pre><code class="language-([^"]*)">(.*?)</code></pre>"#).unwrap()
});
static FENCED_PLAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<pre><code[^>]*>(.*?)</code></pre>").unwrap());
static HEADINGS: Lazy<Vec<Regex>> = Lazy::new(|| {
    (1..=6)
        .map(|level| Regex::new(&format!(r"(?s)<h{level}[^>]*>(.*?)</h{level}>")).unwrap())
        .collect()
});
static BLOCKQUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<blockquote[^>]*>(.*?)</blockquote>").unwrap());
static TASK_LIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<ul[^>]*class="[^"]*task-list[^"]*"[^>]*>(.*?)</ul>"#).unwrap()
});
static BULLET_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<ul[^>]*>(.*?)</ul>").unwrap());
static NUMBERED_LIST: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<ol[^>]*>(.*?)</ol>").unwrap());
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<li[^>]*>(.*?)</li>").unwrap());
static CHECKED_CONTROL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<input[^>]*\bchecked\b[^>]*>").unwrap());
static CHECKBOX_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\[[xX ]?\]\s*").unwrap());
static TABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<table[^>]*>(.*?)</table>").unwrap());
static TABLE_HEAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<thead[^>]*>(.*?)</thead>").unwrap());
static TABLE_BODY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<tbody[^>]*>(.*?)</tbody>").unwrap());
static TABLE_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<tr[^>]*>(.*?)</tr>").unwrap());
static TABLE_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<t[hd][^>]*>(.*?)</t[hd]>").unwrap());
static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<hr\s*/?>").unwrap());
static PARAGRAPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<p\b[^>]*>(.*?)</p>").unwrap());

/// Rewrite every recognized HTML block pattern into Markdown block syntax,
/// in fixed order. Runs before the inline pass.
pub fn rewrite_blocks(html: &str) -> String {
    let mut out = html.to_string();
    out = rewrite_code_blocks(&out);
    out = rewrite_headings(&out);
    out = rewrite_blockquotes(&out);
    out = rewrite_task_lists(&out);
    out = rewrite_bullet_lists(&out);
    out = rewrite_numbered_lists(&out);
    out = rewrite_tables(&out);
    out = HORIZONTAL_RULE.replace_all(&out, "\n\n---\n\n").into_owned();
    out = rewrite_paragraphs(&out);
    out
}

fn rewrite_code_blocks(html: &str) -> String {
    let pass = FENCED_WITH_LANGUAGE.replace_all(html, |caps: &Captures| {
        let code = decode_entities(&strip_tags(&caps[2]));
        format!("\n\n```{}\n{}\n```\n\n", &caps[1], code)
    });

    FENCED_PLAIN
        .replace_all(&pass, |caps: &Captures| {
            let code = decode_entities(&strip_tags(&caps[1]));
            format!("\n\n```\n{code}\n```\n\n")
        })
        .into_owned()
}

fn rewrite_headings(html: &str) -> String {
    let mut out = html.to_string();

    // deepest level first so <h1> never matches inside an already-written marker
    for level in (1..=6).rev() {
        let marker = "#".repeat(level);
        out = HEADINGS[level - 1]
            .replace_all(&out, |caps: &Captures| {
                format!("\n\n{} {}\n\n", marker, strip_tags(&caps[1]).trim())
            })
            .into_owned();
    }

    out
}

fn rewrite_blockquotes(html: &str) -> String {
    BLOCKQUOTE
        .replace_all(html, |caps: &Captures| {
            // nested structure inside a quote flattens to plain text
            let flattened = strip_tags(&caps[1]);
            let quoted: Vec<String> = flattened
                .trim()
                .lines()
                .map(|line| format!("> {line}"))
                .collect();
            format!("\n\n{}\n\n", quoted.join("\n"))
        })
        .into_owned()
}

fn rewrite_task_lists(html: &str) -> String {
    TASK_LIST
        .replace_all(html, |caps: &Captures| {
            let mut lines = Vec::new();
            for item in LIST_ITEM.captures_iter(&caps[1]) {
                let marker = if CHECKED_CONTROL.is_match(&item[1]) {
                    "- [x] "
                } else {
                    "- [ ] "
                };
                let text = strip_tags(&item[1]);
                let text = CHECKBOX_TEXT.replace(text.trim(), "");
                lines.push(format!("{marker}{text}"));
            }
            format!("\n\n{}\n\n", lines.join("\n"))
        })
        .into_owned()
}

fn rewrite_bullet_lists(html: &str) -> String {
    BULLET_LIST
        .replace_all(html, |caps: &Captures| {
            let lines: Vec<String> = LIST_ITEM
                .captures_iter(&caps[1])
                .map(|item| format!("- {}", item[1].trim()))
                .collect();
            format!("\n\n{}\n\n", lines.join("\n"))
        })
        .into_owned()
}

fn rewrite_numbered_lists(html: &str) -> String {
    NUMBERED_LIST
        .replace_all(html, |caps: &Captures| {
            // renumbered sequentially whatever the source attributes said
            let lines: Vec<String> = LIST_ITEM
                .captures_iter(&caps[1])
                .enumerate()
                .map(|(index, item)| format!("{}. {}", index + 1, item[1].trim()))
                .collect();
            format!("\n\n{}\n\n", lines.join("\n"))
        })
        .into_owned()
}

fn rewrite_tables(html: &str) -> String {
    TABLE
        .replace_all(html, |caps: &Captures| rewrite_one_table(&caps[1]))
        .into_owned()
}

fn rewrite_one_table(table: &str) -> String {
    let all_rows: Vec<String> = TABLE_ROW
        .captures_iter(table)
        .map(|row| row[1].to_string())
        .collect();
    if all_rows.is_empty() {
        return String::new();
    }

    let (headers, body_rows) = match TABLE_HEAD.captures(table) {
        Some(head) => {
            let header_row = TABLE_ROW
                .captures(&head[1])
                .map(|row| row[1].to_string())
                .unwrap_or_default();

            // Body rows come from the body section when one exists; rows
            // outside it are skipped. Without a body section, iteration
            // falls back to every row in the table, the header's included.
            let body: Vec<String> = match TABLE_BODY.captures(table) {
                Some(body) => TABLE_ROW
                    .captures_iter(&body[1])
                    .map(|row| row[1].to_string())
                    .collect(),
                None => all_rows.clone(),
            };

            (split_cells(&header_row), body)
        }
        None => (split_cells(&all_rows[0]), all_rows[1..].to_vec()),
    };

    if headers.is_empty() {
        return String::new();
    }

    let mut lines = Vec::new();
    lines.push(format!("| {} |", headers.join(" | ")));
    lines.push(format!("| {} |", vec!["---"; headers.len()].join(" | ")));
    for row in &body_rows {
        let cells = split_cells(row);
        if !cells.is_empty() {
            lines.push(format!("| {} |", cells.join(" | ")));
        }
    }

    format!("\n\n{}\n\n", lines.join("\n"))
}

fn split_cells(row: &str) -> Vec<String> {
    TABLE_CELL
        .captures_iter(row)
        .map(|cell| cell[1].trim().to_string())
        .collect()
}

fn rewrite_paragraphs(html: &str) -> String {
    PARAGRAPH
        .replace_all(html, |caps: &Captures| format!("\n\n{}\n\n", caps[1].trim()))
        .into_owned()
}
