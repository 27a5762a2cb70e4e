//! Working-tree write-backs for the release commit

use std::path::Path;

use tracing::info;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Stage files, given as paths relative to the working tree root.
    pub fn stage(&self, files: &[&Path]) -> Result<()> {
        let mut index = self.repo.index()?;
        for file in files {
            index.add_path(file)?;
        }
        index.write()?;
        Ok(())
    }

    /// Commit the staged index on HEAD.
    pub fn commit(&self, message: &str) -> Result<()> {
        let sig = self.repo.signature()?;
        let tree_id = self.repo.index()?.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent = self.head_commit()?;
        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])?;
        info!(subject = message.lines().next().unwrap_or(""), "created commit");
        Ok(())
    }
}
