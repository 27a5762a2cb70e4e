//! Changelog preview command

use std::path::Path;

use anyhow::Context;
use clap::{Args, ValueEnum};

use liftoff_changelog::{ChangelogMessage, CommitMessage, FileUpdate, ReleaseBody};
use liftoff_git::GitRepo;

use super::gather;

/// Which rendering of the changelog to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// The `CHANGELOG.md` entry
    File,
    /// The hosting-platform release body
    Release,
    /// The release commit message body
    Commit,
}

/// Print the changelog for the upcoming release without changing anything.
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Include commits that would normally be hidden from the changelog
    #[arg(long)]
    pub all: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::File)]
    pub format: Format,
}

impl ChangelogCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let repo = GitRepo::discover(&std::env::current_dir()?)?;
        let root = repo.path().to_path_buf();
        self.run_in(&root)
    }

    pub fn run_in(&self, root: &Path) -> anyhow::Result<()> {
        let rendered = self.render(root)?;
        println!("{rendered}");
        Ok(())
    }

    fn render(&self, root: &Path) -> anyhow::Result<String> {
        let ctx = gather(root, self.all)?;

        let github = ctx
            .project
            .github
            .clone()
            .context("project url in gradle.properties does not name a repository")?;
        let base_url = github.url();

        let prev_tag = ctx.project.tag_name();
        let next_tag = liftoff_core::version::next_version(
            &ctx.project.version.to_string(),
            None,
            None,
            ctx.level,
        )?;

        let rendered = match self.format {
            Format::File => {
                let date = ctx.repo.tag_date(&next_tag);
                FileUpdate::new(&base_url, &next_tag, &prev_tag, date).format_changelog(&ctx.log)
            }
            Format::Release => {
                ReleaseBody::new(&base_url, &next_tag, &prev_tag).format_changelog(&ctx.log)
            }
            Format::Commit => CommitMessage.format_changelog(&ctx.log),
        };
        Ok(rendered)
    }
}
