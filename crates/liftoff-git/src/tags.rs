//! Tag operations and release-window selection

use chrono::{TimeZone, Utc};
use git2::Oid;
use tracing::{debug, info, instrument};

use liftoff_core::error::{GitError, VersionError};
use liftoff_core::version::parse_components;

use crate::log::LogWindow;
use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// All tag names in the repository.
    #[instrument(skip(self))]
    pub fn tag_names(&self) -> Result<Vec<String>> {
        let names = self.repo.tag_names(None)?;
        Ok(names.iter().flatten().map(str::to_string).collect())
    }

    /// The commit a tag (annotated or lightweight) points at.
    pub(crate) fn tag_commit_id(&self, tag: &str) -> Result<Oid> {
        let reference = self
            .repo
            .find_reference(&format!("refs/tags/{tag}"))
            .map_err(|_| GitError::TagNotFound(tag.to_string()))?;
        Ok(reference.peel_to_commit()?.id())
    }

    /// Author date of the tagged commit, `YYYY-MM-DD`; today when the tag
    /// cannot be resolved (it usually does not exist yet at render time).
    #[instrument(skip(self))]
    pub fn tag_date(&self, tag: &str) -> String {
        let timestamp = self
            .tag_commit_id(tag)
            .and_then(|oid| Ok(self.repo.find_commit(oid)?.author().when().seconds()))
            .ok()
            .and_then(|seconds| Utc.timestamp_opt(seconds, 0).single())
            .unwrap_or_else(Utc::now);
        timestamp.format("%Y-%m-%d").to_string()
    }

    /// Create an annotated tag on HEAD.
    pub fn annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        if self.repo.find_reference(&format!("refs/tags/{name}")).is_ok() {
            return Err(GitError::TagExists(name.to_string()));
        }
        let head = self.head_commit()?;
        let sig = self.repo.signature()?;
        self.repo.tag(name, head.as_object(), &sig, message, false)?;
        info!(name, "created annotated tag");
        Ok(())
    }
}

/// Stability portion of a tag's sort key: a final release sorts above any
/// pre-release suffix of the same numeric core.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Stability {
    Pre(String),
    Final,
}

type VersionKey = (u64, u64, u64, Stability);

fn version_key(version: &str) -> Option<VersionKey> {
    let (components, stability) = parse_components(version).ok()?;
    let stability = if stability.is_empty() {
        Stability::Final
    } else {
        Stability::Pre(stability)
    };
    Some((components[0], components[1], components[2], stability))
}

/// Pick the commit window for the next release.
///
/// Among `v`-prefixed tags, find the highest one not exceeding the current
/// version; the window spans from it to the next-newer tag, or to HEAD when
/// it is the newest. With no such tag the whole history is in scope. Tags
/// that do not parse as versions are ignored.
pub fn release_window(
    tags: &[String],
    current_version: &str,
) -> std::result::Result<LogWindow, VersionError> {
    let mut versions: Vec<(VersionKey, &str)> = tags
        .iter()
        .filter_map(|tag| {
            let key = version_key(tag.strip_prefix('v')?)?;
            Some((key, tag.as_str()))
        })
        .collect();
    versions.sort();
    versions.reverse();

    let current = version_key(current_version).ok_or_else(|| {
        VersionError::InvalidFormat(current_version.to_string())
    })?;

    for (index, (key, tag)) in versions.iter().enumerate() {
        if *key > current {
            continue;
        }
        let window = if index > 0 {
            LogWindow::Between {
                older: tag.to_string(),
                newer: versions[index - 1].1.to_string(),
            }
        } else {
            LogWindow::Since(tag.to_string())
        };
        debug!(window = ?window, "selected release window");
        return Ok(window);
    }

    debug!("no tag at or below current version, using full history");
    Ok(LogWindow::All)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use std::path::Path;
    use tempfile::TempDir;

    pub(crate) fn init_repo() -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        {
            let sig = Signature::now("Test", "test@example.com").unwrap();
            let tree_id = repo.index().unwrap().write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "chore: init", &tree, &[])
                .unwrap();
        }
        (temp, repo)
    }

    pub(crate) fn commit_file(repo: &Repository, name: &str, message: &str) -> git2::Oid {
        let workdir = repo.workdir().unwrap();
        std::fs::write(workdir.join(name), "content").unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().unwrap().peel_to_commit().unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])
            .unwrap()
    }

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_window_current_is_newest() {
        let window = release_window(&tags(&["v1.0.0", "v1.1.0"]), "1.1.0").unwrap();
        assert_eq!(window, LogWindow::Since("v1.1.0".to_string()));
    }

    #[test]
    fn test_window_between_tags() {
        let window = release_window(&tags(&["v1.0.0", "v1.1.0", "v1.2.0"]), "1.1.0").unwrap();
        assert_eq!(
            window,
            LogWindow::Between {
                older: "v1.1.0".to_string(),
                newer: "v1.2.0".to_string(),
            }
        );
    }

    #[test]
    fn test_window_no_matching_tag() {
        let window = release_window(&tags(&["v2.0.0"]), "1.0.0").unwrap();
        assert_eq!(window, LogWindow::All);
        let window = release_window(&[], "1.0.0").unwrap();
        assert_eq!(window, LogWindow::All);
    }

    #[test]
    fn test_final_release_sorts_above_rc() {
        // 1.2.0 final is "higher" than 1.2.0-rc.1, so from a final version
        // the rc tag is not the window start.
        let window =
            release_window(&tags(&["v1.2.0-rc.1", "v1.2.0", "v1.1.0"]), "1.2.0").unwrap();
        assert_eq!(window, LogWindow::Since("v1.2.0".to_string()));
    }

    #[test]
    fn test_non_version_tags_ignored() {
        let window = release_window(&tags(&["nightly", "v1.0.0", "vNext"]), "1.0.0").unwrap();
        assert_eq!(window, LogWindow::Since("v1.0.0".to_string()));
    }

    #[test]
    fn test_bad_current_version_is_an_error() {
        assert!(release_window(&tags(&["v1.0.0"]), "one.two").is_err());
    }

    #[test]
    fn test_tag_date_and_annotated_tag() {
        let (_temp, repo) = init_repo();
        commit_file(&repo, "a.txt", "fix: first");

        let git_repo = GitRepo::open(repo.workdir().unwrap()).unwrap();
        git_repo.annotated_tag("v1.0.0", "release 1.0.0").unwrap();

        let today = Utc::now().format("%Y-%m-%d").to_string();
        assert_eq!(git_repo.tag_date("v1.0.0"), today);
        // Unknown tags fall back to today as well.
        assert_eq!(git_repo.tag_date("v9.9.9"), today);

        assert!(matches!(
            git_repo.annotated_tag("v1.0.0", "again"),
            Err(GitError::TagExists(_))
        ));
        assert_eq!(git_repo.tag_names().unwrap(), vec!["v1.0.0".to_string()]);
    }
}
