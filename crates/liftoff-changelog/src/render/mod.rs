//! Multi-format changelog rendering
//!
//! One shared driver walks the aggregated changelog in section order; the
//! [`ChangelogMessage`] trait supplies the format-specific leaves (markup for
//! headings, scopes, hashes and issues, plus post-processing). Three formats
//! exist: the `CHANGELOG.md` entry, the hosting release body, and the plain
//! release commit message.

mod commit_message;
mod file_update;
mod release;

pub use commit_message::CommitMessage;
pub use file_update::FileUpdate;
pub use release::ReleaseBody;

use tracing::debug;

use crate::classify::{section_title, BREAKING_CHANGE, KNOWN_SECTIONS};
use crate::commit::{normalize_whitespace, CommitLink};
use crate::log::ChangeLog;

use std::collections::BTreeMap;

/// Compare link between two tags on the hosting platform.
pub fn compare_link(base_url: &str, prev_tag: &str, cur_tag: &str) -> String {
    format!("{base_url}/compare/{prev_tag}...{cur_tag}")
}

/// A changelog output format.
///
/// Default implementations render the plain-text flavor; the markdown formats
/// override the markup hooks.
pub trait ChangelogMessage {
    /// Lines emitted before any section.
    fn intro_lines(&self) -> Vec<String> {
        Vec::new()
    }

    /// Emit a section heading.
    fn section_header(&self, lines: &mut Vec<String>, header: &str) {
        lines.push(format!("### {header}"));
        lines.push(String::new());
    }

    /// Markup for one issue token.
    fn issue_link(&self, reference: &str) -> String {
        reference.to_string()
    }

    /// Markup for a non-empty scope prefix.
    fn scope_text(&self, scope: &str) -> String {
        if scope.is_empty() {
            String::new()
        } else {
            format!("{scope}: ")
        }
    }

    /// Markup for the abbreviated commit hash.
    fn short_hash_link(&self, link: &CommitLink) -> String {
        link.short_hash.clone()
    }

    /// Wrap one rendered commit line into a list item.
    fn list_item(&self, line_markup: &str) -> String {
        format!("- {line_markup}")
    }

    /// Lines emitted after all sections.
    fn outro_lines(&self, _lines: &mut Vec<String>) {}

    /// Final assembly of the output text.
    fn post_process(&self, lines: Vec<String>) -> String {
        lines.join("\n")
    }

    /// Render one commit as a list item:
    /// `<scope>: <summary> (<hash>)<references>`. Outside the breaking bucket
    /// a breaking commit gets `breaking` prepended to its scope list.
    fn link_str(&self, link: &CommitLink, show_breaking: bool) -> String {
        let mut scope = link.scope.clone();
        if show_breaking && link.is_breaking {
            scope = if scope.is_empty() {
                "breaking".to_string()
            } else {
                format!("breaking, {scope}")
            };
        }
        let scope = self.scope_text(&scope);

        let mut refs = String::new();
        for (kind, issues) in link.references.iter() {
            let issue_links: Vec<String> = issues
                .iter()
                .filter(|issue| !issue.is_empty())
                .map(|issue| self.issue_link(issue))
                .collect();
            if issue_links.is_empty() {
                continue;
            }
            refs.push_str(&format!(", {kind} "));
            match issue_links.split_last() {
                Some((last, [])) => refs.push_str(last),
                Some((last, listed)) => {
                    refs.push_str(&format!("{} and {last}", listed.join(", ")));
                }
                None => {}
            }
        }

        self.list_item(&format!(
            "{scope}{} ({}){refs}",
            link.summary,
            self.short_hash_link(link)
        ))
    }

    /// Render a section's commits grouped by scope, scopes in lexicographic
    /// order (empty scope first), insertion order within a scope.
    fn show_links(&self, links: &[CommitLink], show_breaking: bool) -> Vec<String> {
        let mut by_scope: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for link in links {
            by_scope
                .entry(link.scope.as_str())
                .or_default()
                .push(self.link_str(link, show_breaking));
        }

        let mut result: Vec<String> = by_scope.into_values().flatten().collect();
        if !result.is_empty() {
            result.push(String::new());
        }
        result
    }

    /// Walk the changelog in render order and assemble the full text.
    fn format_changelog(&self, log: &ChangeLog) -> String {
        let mut lines = self.intro_lines();
        let mut breaking: Vec<String> = Vec::new();

        for section in &KNOWN_SECTIONS {
            let Some(links) = log.get(section.key) else {
                continue;
            };
            let show_breaking = section.key != BREAKING_CHANGE;

            self.section_header(&mut lines, section.header);
            lines.extend(self.show_links(links, show_breaking));
            breaking.extend(find_breaking_notes(links));
        }

        for (key, links) in log.other_sections() {
            self.section_header(&mut lines, section_title(key));
            lines.extend(self.show_links(links, true));
            breaking.extend(find_breaking_notes(links));
        }

        if !breaking.is_empty() {
            self.section_header(&mut lines, "BREAKING CHANGES");
            lines.extend(breaking);
        }

        self.outro_lines(&mut lines);

        let text = self.post_process(lines);
        debug!(output_len = text.len(), "changelog rendered");
        text
    }
}

/// Breaking-change paragraphs of a section, each normalized to a single line
/// followed by a blank one. Never filtered by visibility settings.
fn find_breaking_notes(links: &[CommitLink]) -> Vec<String> {
    let mut notes = Vec::new();
    for link in links {
        let Some(message) = &link.breaking_message else {
            continue;
        };
        for para in message {
            let text = normalize_whitespace(para);
            if !text.is_empty() {
                notes.push(text);
                notes.push(String::new());
            }
        }
    }
    notes
}
