//! Git repository handle

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::info;

use liftoff_core::error::GitError;

pub type Result<T> = std::result::Result<T, GitError>;

/// Repository handle the release flow works through. Wraps `git2` so the
/// rest of the workspace never touches raw `git2` types.
pub struct GitRepo {
    pub(crate) repo: Repository,
    path: PathBuf,
}

fn open_error(path: &Path, error: git2::Error) -> GitError {
    if error.code() == git2::ErrorCode::NotFound {
        GitError::RepositoryNotFound(path.to_path_buf())
    } else {
        GitError::OpenFailed(error.to_string())
    }
}

impl GitRepo {
    /// Open the repository rooted exactly at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path).map_err(|e| open_error(path, e))?;
        Ok(Self {
            repo,
            path: path.to_path_buf(),
        })
    }

    /// Walk up from `start_path` until a repository is found.
    pub fn discover(start_path: &Path) -> Result<Self> {
        let repo = Repository::discover(start_path).map_err(|e| open_error(start_path, e))?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        info!(path = %path.display(), "discovered git repository");
        Ok(Self { repo, path })
    }

    /// Working tree root, or the gitdir for a bare repository.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn head_commit(&self) -> Result<git2::Commit<'_>> {
        Ok(self.repo.head()?.peel_to_commit()?)
    }
}
