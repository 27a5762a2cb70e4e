//! Release commit message format
//!
//! Plain text: no links, `Header:` section headings, ` - ` list items, and
//! greedy word wrap. The result is appended to the `chore: release <version>`
//! subject, hence the two leading newlines.

use super::ChangelogMessage;

/// Wrap limit for ordinary paragraphs.
const WRAP_COLUMN: usize = 78;
/// Wrap limit for bullet lines, including the bullet prefix.
const BULLET_WRAP_COLUMN: usize = 75;
const BULLET_PREFIX: &str = " - ";
const BULLET_INDENT: &str = "   ";

/// Plain-text changelog for the release commit body.
#[derive(Debug, Default)]
pub struct CommitMessage;

impl ChangelogMessage for CommitMessage {
    fn section_header(&self, lines: &mut Vec<String>, header: &str) {
        lines.push(format!("{header}:"));
        lines.push(String::new());
    }

    fn list_item(&self, line_markup: &str) -> String {
        format!("{BULLET_PREFIX}{line_markup}")
    }

    fn post_process(&self, lines: Vec<String>) -> String {
        let joined = lines.join("\n");
        let trimmed = joined.trim();

        let wrapped: Vec<String> = trimmed.split("\n\n").map(wrap_paragraph).collect();
        let text = wrapped.join("\n\n");
        if text.is_empty() {
            text
        } else {
            format!("\n\n{text}")
        }
    }
}

/// Wrap one paragraph; bullet paragraphs wrap each line with a hanging indent
/// matching the bullet prefix width.
fn wrap_paragraph(para: &str) -> String {
    if para.starts_with(BULLET_PREFIX) {
        let wrapped: Vec<String> = para
            .split('\n')
            .map(|line| {
                let content = line.get(BULLET_PREFIX.len()..).unwrap_or("");
                wrap_at(BULLET_WRAP_COLUMN, content, BULLET_PREFIX, BULLET_INDENT)
            })
            .collect();
        return wrapped.join("\n");
    }
    wrap_at(WRAP_COLUMN, para, "", "")
}

/// Greedy word wrap: append a word when the line stays within `limit`,
/// otherwise flush and continue on an indented line.
fn wrap_at(limit: usize, para: &str, first_line: &str, next_lines: &str) -> String {
    let mut result = String::new();
    let mut line = first_line.to_string();
    let mut line_is_dirty = false;

    for word in para.trim().split(' ') {
        if word.is_empty() {
            continue;
        }
        line_is_dirty = true;

        let space = if !line.is_empty() && !line.ends_with(' ') {
            " "
        } else {
            ""
        };
        if line.len() + space.len() + word.len() <= limit {
            line.push_str(space);
            line.push_str(word);
            continue;
        }
        result.push_str(&line);
        result.push('\n');
        line = format!("{next_lines}{word}");
    }

    if line_is_dirty {
        result.push_str(&line);
    }
    result
}
