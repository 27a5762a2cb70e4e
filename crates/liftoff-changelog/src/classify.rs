//! Commit classification and severity
//!
//! Maps parsed commits to changelog sections and severity levels, and
//! aggregates a commit batch into a [`ChangeLog`] plus its overall level.

use std::collections::HashMap;

use liftoff_core::Level;
use tracing::debug;

use crate::commit::{Commit, CommitLink};
use crate::log::ChangeLog;

/// Bucket for breaking commits whose own section is not displayed.
pub const BREAKING_CHANGE: &str = "BREAKING_CHANGE";

/// A displayed section: its key in the changelog map and its heading.
#[derive(Debug, Clone, Copy)]
pub struct Section {
    pub key: &'static str,
    pub header: &'static str,
}

/// Sections always rendered first, in this order.
pub const KNOWN_SECTIONS: [Section; 3] = [
    Section {
        key: BREAKING_CHANGE,
        header: "Breaking",
    },
    Section {
        key: "feat",
        header: "New Features",
    },
    Section {
        key: "fix",
        header: "Bug Fixes",
    },
];

/// Whether a section key belongs to the always-shown set.
pub fn is_known_section(key: &str) -> bool {
    KNOWN_SECTIONS.iter().any(|section| section.key == key)
}

/// Headings for sections only shown under `take_all`.
pub fn section_title(key: &str) -> &str {
    match key {
        "assets" => "Assets",
        "build" => "Build System",
        "chore" => "Chores",
        "ci" => "Continuous Integration",
        "perf" => "Performance Improvements",
        "refactor" => "Code Refactoring",
        "revert" => "Reverts",
        "style" => "Code Style",
        "test" => "Tests",
        other => other,
    }
}

/// Commit types folded into another section.
fn alias(commit_type: &str) -> &str {
    match commit_type {
        "docs" => "fix",
        other => other,
    }
}

fn level_of(commit_type: &str) -> Level {
    match commit_type {
        "feat" => Level::Feature,
        "fix" => Level::Patch,
        _ => Level::Benign,
    }
}

/// Severity of one commit plus the scope to display for it.
///
/// Breaking commits are labeled with their type rather than their scope, so a
/// cross-cutting `ci!` or `style!` change reads as such in the breaking
/// bucket. Aliased types (`docs`) keep their original type as the scope label.
fn level_and_scope(commit: &Commit) -> (Level, &str) {
    if commit.is_breaking {
        return (Level::Breaking, &commit.commit_type);
    }
    let aliased = alias(&commit.commit_type);
    if aliased != commit.commit_type {
        (level_of(aliased), &commit.commit_type)
    } else {
        (level_of(aliased), &commit.scope)
    }
}

/// Group classified commits into a changelog and compute the batch severity.
///
/// Commits are expected newest-first, straight from the log query. Release
/// commits (`chore: release ...`) and commits tagged `(no-log)` are dropped
/// outright, even under `take_all`. Non-breaking commits from sections outside
/// the known set are hidden unless `take_all` is set; breaking ones land in
/// the [`BREAKING_CHANGE`] bucket no matter what.
pub fn collect_log(
    commits: &[Commit],
    scope_fix: &HashMap<String, String>,
    take_all: bool,
) -> (ChangeLog, Level) {
    let mut changes = ChangeLog::default();
    let mut level = Level::Benign;

    for commit in commits {
        // Hide even from --all
        if commit.commit_type == "chore" && commit.summary.starts_with("release ") {
            continue;
        }
        if commit.summary.contains("(no-log)") {
            continue;
        }

        let (commit_level, raw_scope) = level_and_scope(commit);
        let mut section = alias(&commit.commit_type);
        let hidden = !is_known_section(section);

        if hidden && !commit.is_breaking && !take_all {
            continue;
        }
        if hidden && commit.is_breaking {
            section = BREAKING_CHANGE;
        }

        if commit_level > level {
            level = commit_level;
        }

        let scope = scope_fix
            .get(raw_scope)
            .map(String::as_str)
            .unwrap_or(raw_scope);
        changes.push(section, CommitLink::new(commit, scope));
    }

    debug!(
        sections = changes.section_count(),
        level = ?level,
        "collected changelog"
    );
    (changes, level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::parse_commit;

    fn commit(message: &str) -> Commit {
        parse_commit("0123456789abcdef", "0123456", message).unwrap()
    }

    fn collect(messages: &[&str], take_all: bool) -> (ChangeLog, Level) {
        let commits: Vec<Commit> = messages.iter().map(|m| commit(m)).collect();
        collect_log(&commits, &HashMap::new(), take_all)
    }

    #[test]
    fn test_feat_and_fix_levels() {
        let (log, level) = collect(&["feat: a", "fix: b"], false);
        assert_eq!(level, Level::Feature);
        assert_eq!(log.get("feat").unwrap().len(), 1);
        assert_eq!(log.get("fix").unwrap().len(), 1);
    }

    #[test]
    fn test_fix_alone_is_patch() {
        let (_, level) = collect(&["fix: apply better solution"], false);
        assert_eq!(level, Level::Patch);
    }

    #[test]
    fn test_docs_alias_to_fix_with_type_as_scope() {
        let (log, level) = collect(&["docs: clarify install steps"], false);
        assert_eq!(level, Level::Patch);
        let links = log.get("fix").unwrap();
        assert_eq!(links[0].scope, "docs");
    }

    #[test]
    fn test_unknown_section_hidden_without_take_all() {
        let (log, level) = collect(&["style(sass): update the theme"], false);
        assert!(log.is_empty());
        assert_eq!(level, Level::Benign);

        let (log, level) = collect(&["style(sass): update the theme"], true);
        assert_eq!(level, Level::Benign);
        assert_eq!(log.get("style").unwrap()[0].scope, "sass");
    }

    #[test]
    fn test_breaking_known_type_stays_in_section() {
        let (log, level) = collect(&["feat!: new version coming in"], false);
        assert_eq!(level, Level::Breaking);
        assert!(log.get(BREAKING_CHANGE).is_none());
        let links = log.get("feat").unwrap();
        assert!(links[0].is_breaking);
        // Breaking commits are labeled with their type.
        assert_eq!(links[0].scope, "feat");
    }

    #[test]
    fn test_breaking_unknown_type_forced_into_bucket() {
        for take_all in [false, true] {
            let (log, level) = collect(&["ci!: pin runner image"], take_all);
            assert_eq!(level, Level::Breaking);
            let links = log.get(BREAKING_CHANGE).unwrap();
            assert_eq!(links[0].scope, "ci");
        }
    }

    #[test]
    fn test_release_and_no_log_commits_dropped() {
        let (log, level) = collect(
            &["chore: release 1.2.3", "fix: tidy up (no-log)"],
            true,
        );
        assert!(log.is_empty());
        assert_eq!(level, Level::Benign);
    }

    #[test]
    fn test_scope_fix_applied() {
        let scope_fix = HashMap::from([("sass".to_string(), "theme".to_string())]);
        let commits = vec![commit("feat(sass): restyle tooltips")];
        let (log, _) = collect_log(&commits, &scope_fix, false);
        assert_eq!(log.get("feat").unwrap()[0].scope, "theme");
    }

    #[test]
    fn test_batch_level_is_maximum() {
        let (_, level) = collect(&["fix: a", "feat: b", "chore: c"], false);
        assert_eq!(level, Level::Feature);
    }

    #[test]
    fn test_section_titles() {
        assert_eq!(section_title("style"), "Code Style");
        assert_eq!(section_title("perf"), "Performance Improvements");
        assert_eq!(section_title("weird"), "weird");
    }
}
