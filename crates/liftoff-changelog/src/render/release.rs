//! Hosting-platform release body

use super::{compare_link, ChangelogMessage};
use crate::commit::CommitLink;

/// Markdown body for a hosted release: bold scopes, linked hashes and issues,
/// and a trailing full-changelog compare link.
pub struct ReleaseBody {
    pub github_link: String,
    pub cur_tag: String,
    pub prev_tag: String,
}

impl ReleaseBody {
    pub fn new(
        github_link: impl Into<String>,
        cur_tag: impl Into<String>,
        prev_tag: impl Into<String>,
    ) -> Self {
        Self {
            github_link: github_link.into(),
            cur_tag: cur_tag.into(),
            prev_tag: prev_tag.into(),
        }
    }
}

/// Bold markup for a non-empty scope prefix.
pub(super) fn bold_scope(scope: &str) -> String {
    if scope.is_empty() {
        String::new()
    } else {
        format!("**{scope}**: ")
    }
}

/// Markdown link from the short hash to the commit view.
pub(super) fn hash_link(base_url: &str, link: &CommitLink) -> String {
    format!("[{}]({base_url}/commit/{})", link.short_hash, link.hash)
}

/// Turn `#123`-shaped tokens into issue links; leave anything else alone.
pub(super) fn issue_link(base_url: &str, reference: &str) -> String {
    if let Some(number) = reference.strip_prefix('#') {
        if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) {
            return format!("[{reference}]({base_url}/issues/{number})");
        }
    }
    reference.to_string()
}

impl ChangelogMessage for ReleaseBody {
    fn scope_text(&self, scope: &str) -> String {
        bold_scope(scope)
    }

    fn short_hash_link(&self, link: &CommitLink) -> String {
        hash_link(&self.github_link, link)
    }

    fn issue_link(&self, reference: &str) -> String {
        issue_link(&self.github_link, reference)
    }

    fn outro_lines(&self, lines: &mut Vec<String>) {
        let compare = compare_link(&self.github_link, &self.prev_tag, &self.cur_tag);
        lines.push(format!("**Full Changelog**: {compare}"));
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::sample_log;
    use super::*;
    use crate::log::ChangeLog;

    const BASE: &str = "https://github.com/example/scanner";

    #[test]
    fn test_empty_log_is_compare_link_only() {
        let body = ReleaseBody::new(BASE, "v1.2.4", "v1.2.3");
        let text = body.format_changelog(&ChangeLog::default());
        assert_eq!(
            text,
            "**Full Changelog**: https://github.com/example/scanner/compare/v1.2.3...v1.2.4"
        );
    }

    #[test]
    fn test_release_body_markup() {
        let log = sample_log(&["fix(parser): handle tabs\n\ncloses: #42"], false);
        let body = ReleaseBody::new(BASE, "v1.2.4", "v1.2.3");
        let text = body.format_changelog(&log);

        assert!(text.contains("### Bug Fixes"));
        assert!(text.contains(
            "- **parser**: handle tabs ([0000000](https://github.com/example/scanner/commit/"
        ));
        assert!(text.contains("closes [#42](https://github.com/example/scanner/issues/42)"));
        assert!(text.ends_with(
            "**Full Changelog**: https://github.com/example/scanner/compare/v1.2.3...v1.2.4"
        ));
    }

    #[test]
    fn test_non_issue_tokens_stay_plain() {
        assert_eq!(issue_link(BASE, "GH-12"), "GH-12");
        assert_eq!(issue_link(BASE, "#12a"), "#12a");
        assert_eq!(
            issue_link(BASE, "#12"),
            "[#12](https://github.com/example/scanner/issues/12)"
        );
    }
}
