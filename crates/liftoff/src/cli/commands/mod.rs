//! CLI commands

pub mod changelog;
pub mod release;

pub use changelog::ChangelogCommand;
pub use release::ReleaseCommand;

use std::path::Path;

use anyhow::Context;
use tracing::debug;

use liftoff_changelog::{collect_log, parse_commit, ChangeLog, Commit};
use liftoff_core::config::load_config_or_default;
use liftoff_core::{Level, Project, PropertiesFile};
use liftoff_git::{release_window, GitRepo};

/// File holding the project version.
pub const VERSION_FILE: &str = "gradle.properties";
/// The changelog file maintained by the release command.
pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

/// Everything both commands need: repository, project identity, and the
/// aggregated changelog for the upcoming release window.
pub(crate) struct ReleaseContext {
    pub repo: GitRepo,
    pub properties: PropertiesFile,
    pub project: Project,
    pub log: ChangeLog,
    pub level: Level,
}

/// Collect the release context for the project rooted at `root`.
pub(crate) fn gather(root: &Path, take_all_flag: bool) -> anyhow::Result<ReleaseContext> {
    let repo = GitRepo::open(root)?;
    let (config, _) = load_config_or_default(root);
    let take_all = take_all_flag || config.take_all;

    let properties = PropertiesFile::load(&root.join(VERSION_FILE))
        .with_context(|| format!("reading {VERSION_FILE}"))?;
    let project = Project::from_properties(&properties)?;

    let window = release_window(&repo.tag_names()?, &project.version.to_string())?;
    let raw_commits = repo.commit_range(&window)?;
    let commits: Vec<Commit> = raw_commits
        .iter()
        .filter_map(|raw| parse_commit(&raw.hash, &raw.short_hash, &raw.message))
        .collect();
    debug!(
        raw = raw_commits.len(),
        parsed = commits.len(),
        "parsed commit range"
    );

    let (log, level) = collect_log(&commits, &config.scope_fix, take_all);

    Ok(ReleaseContext {
        repo,
        properties,
        project,
        log,
        level,
    })
}
