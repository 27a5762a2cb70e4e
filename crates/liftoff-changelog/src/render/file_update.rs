//! `CHANGELOG.md` entry format

use super::release::{bold_scope, hash_link, issue_link};
use super::{compare_link, ChangelogMessage};
use crate::commit::CommitLink;

/// Markdown block prepended to the changelog file: a version heading with the
/// compare link and release date, followed by the same markup as the release
/// body but without the trailing full-changelog line.
pub struct FileUpdate {
    pub github_link: String,
    pub cur_tag: String,
    pub prev_tag: String,
    /// Release date, `YYYY-MM-DD`
    pub commit_date: String,
}

impl FileUpdate {
    pub fn new(
        github_link: impl Into<String>,
        cur_tag: impl Into<String>,
        prev_tag: impl Into<String>,
        commit_date: impl Into<String>,
    ) -> Self {
        Self {
            github_link: github_link.into(),
            cur_tag: cur_tag.into(),
            prev_tag: prev_tag.into(),
            commit_date: commit_date.into(),
        }
    }
}

impl ChangelogMessage for FileUpdate {
    fn intro_lines(&self) -> Vec<String> {
        let version = self.cur_tag.strip_prefix('v').unwrap_or(&self.cur_tag);
        let compare = compare_link(&self.github_link, &self.prev_tag, &self.cur_tag);
        vec![
            format!("## [{version}]({compare}) ({})", self.commit_date),
            String::new(),
        ]
    }

    fn scope_text(&self, scope: &str) -> String {
        bold_scope(scope)
    }

    fn short_hash_link(&self, link: &CommitLink) -> String {
        hash_link(&self.github_link, link)
    }

    fn issue_link(&self, reference: &str) -> String {
        issue_link(&self.github_link, reference)
    }
}
