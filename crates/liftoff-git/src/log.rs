//! Commit log retrieval
//!
//! Produces the raw commit tuples the changelog compiler consumes, newest
//! first, for a release window.

use git2::Sort;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};

/// Which slice of history feeds the changelog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogWindow {
    /// Full history, for projects without a matching release tag yet
    All,
    /// Everything after a tag up to HEAD
    Since(String),
    /// Between two tags, exclusive of the older one
    Between { older: String, newer: String },
}

/// One commit as delivered to the changelog compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCommit {
    pub hash: String,
    pub short_hash: String,
    pub message: String,
}

impl GitRepo {
    /// Commits inside the window, newest first.
    #[instrument(skip(self))]
    pub fn commit_range(&self, window: &LogWindow) -> Result<Vec<RawCommit>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        match window {
            LogWindow::All => {
                revwalk.push(self.head_commit()?.id())?;
            }
            LogWindow::Since(tag) => {
                revwalk.push(self.head_commit()?.id())?;
                revwalk.hide(self.tag_commit_id(tag)?)?;
            }
            LogWindow::Between { older, newer } => {
                revwalk.push(self.tag_commit_id(newer)?)?;
                revwalk.hide(self.tag_commit_id(older)?)?;
            }
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            let short_hash = commit
                .as_object()
                .short_id()?
                .as_str()
                .unwrap_or_default()
                .to_string();
            commits.push(RawCommit {
                hash: oid.to_string(),
                short_hash,
                message: commit.message().unwrap_or_default().trim().to_string(),
            });
        }

        debug!(window = ?window, count = commits.len(), "collected commit range");
        Ok(commits)
    }
}
