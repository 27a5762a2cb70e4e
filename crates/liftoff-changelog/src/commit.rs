//! Conventional commit parsing
//!
//! Accepts the `type(scope)!: summary` header syntax with `refs`/`closes`/
//! `fixes` footers and an optional `BREAKING CHANGE` body marker. Parsing is
//! deliberately strict about the header (`": "` separator, non-empty type):
//! anything else is not an error, the commit simply does not make it into the
//! changelog.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

/// Collapse whitespace runs to single spaces and trim.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Issue references collected from footer lines, keyed by reference kind
/// (`references`, `closes`, `fixes`) in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct References(Vec<(String, Vec<String>)>);

impl References {
    /// Prepend `items` to the list for `kind`, creating the kind on first use.
    ///
    /// Footers are scanned bottom-up, so prepending restores original file
    /// order within a kind.
    pub fn prepend(&mut self, kind: &str, mut items: Vec<String>) {
        match self.0.iter_mut().find(|(name, _)| name == kind) {
            Some((_, existing)) => {
                items.append(existing);
                *existing = items;
            }
            None => self.0.push((kind.to_string(), items)),
        }
    }

    /// Iterate kinds in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(kind, items)| (kind.as_str(), items.as_slice()))
    }

    /// Items for one kind, if present.
    pub fn get(&self, kind: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|(name, _)| name == kind)
            .map(|(_, items)| items.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One parsed commit. Either fully constructed or rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Category token from the header, e.g. `feat`
    pub commit_type: String,
    /// Sub-area named in parentheses after the type; empty if absent
    pub scope: String,
    /// One-line description following the header
    pub summary: String,
    /// Full commit identifier
    pub hash: String,
    /// Abbreviated commit identifier
    pub short_hash: String,
    /// Header had a `!` marker or the body carries a breaking-change note
    pub is_breaking: bool,
    /// Paragraphs after the `BREAKING CHANGE` marker; `None` when the marker
    /// is absent, which is distinct from an empty note
    pub breaking_message: Option<Vec<String>>,
    /// Issue references from the footer
    pub references: References,
}

/// A commit as it appears in an aggregated changelog section, with its scope
/// already corrected. Derived once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitLink {
    pub scope: String,
    pub summary: String,
    pub hash: String,
    pub short_hash: String,
    pub is_breaking: bool,
    pub breaking_message: Option<Vec<String>>,
    pub references: References,
}

impl CommitLink {
    /// Project a commit into a section under the given display scope.
    pub fn new(commit: &Commit, scope: &str) -> Self {
        Self {
            scope: scope.to_string(),
            summary: commit.summary.clone(),
            hash: commit.hash.clone(),
            short_hash: commit.short_hash.clone(),
            is_breaking: commit.is_breaking,
            breaking_message: commit.breaking_message.clone(),
            references: commit.references.clone(),
        }
    }
}

fn reference_kind(name: &str) -> Option<&'static str> {
    match name {
        "refs" => Some("references"),
        "closes" => Some("closes"),
        "fixes" => Some("fixes"),
        _ => None,
    }
}

/// Parse one raw commit message into a [`Commit`], or `None` when the message
/// does not follow the `type: summary` convention.
pub fn parse_commit(hash: &str, short_hash: &str, message: &str) -> Option<Commit> {
    // The padding guarantees a body exists even without a blank line.
    let padded = format!("{message}\n\n");
    let (subject, body) = padded.split_once("\n\n")?;

    let (encoded, summary) = subject.split_once(": ")?;
    let mut encoded = encoded.trim();
    let has_marker = encoded.ends_with('!');
    if has_marker {
        encoded = encoded[..encoded.len() - 1].trim_end();
    }

    let (commit_type, scope) = match encoded.split_once('(') {
        None => (encoded, ""),
        Some((commit_type, rest)) => {
            // The scope runs up to the last closing parenthesis.
            let scope = rest.rfind(')').map(|pos| &rest[..pos]).unwrap_or("");
            (commit_type, scope)
        }
    };
    let commit_type = commit_type.trim();
    if commit_type.is_empty() {
        return None;
    }

    // Footer: a contiguous trailing run of `key: value` lines, scanned bottom
    // up. Blank lines inside the footer are dropped without terminating the
    // scan; the first non-blank line that is not a `key: value` pair does.
    let mut lines: Vec<&str> = body.trim_end().split('\n').collect();
    let mut references = References::default();
    while let Some(last) = lines.last().copied() {
        let footer_line = last.trim();
        if footer_line.is_empty() {
            lines.pop();
            continue;
        }
        let Some((name, value)) = footer_line.split_once(": ") else {
            break;
        };
        lines.pop();
        if let Some(kind) = reference_kind(&name.trim().to_lowercase()) {
            let items = value.split(',').map(|item| item.trim().to_string()).collect();
            references.prepend(kind, items);
        }
    }

    let remaining = lines.join("\n");
    let breaking_message = remaining.trim().split_once("BREAKING CHANGE").map(|(_, note)| {
        note.trim_start_matches(':')
            .trim()
            .split("\n\n")
            .map(normalize_whitespace)
            .collect::<Vec<_>>()
    });

    Some(Commit {
        commit_type: commit_type.to_string(),
        scope: scope.trim().to_string(),
        summary: summary.to_string(),
        hash: hash.to_string(),
        short_hash: short_hash.to_string(),
        is_breaking: has_marker || breaking_message.is_some(),
        breaking_message,
        references,
    })
}
