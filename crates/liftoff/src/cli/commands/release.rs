//! Release command: changelog, version bump, commit and tag

use std::path::Path;

use anyhow::Context;
use clap::Args;
use tracing::info;

use liftoff_changelog::{ChangelogMessage, CommitMessage, FileUpdate, ReleaseBody};
use liftoff_core::Level;
use liftoff_git::GitRepo;

use super::{gather, CHANGELOG_FILE, VERSION_FILE};

/// Cut a release from the commits since the last tag.
#[derive(Debug, Args)]
pub struct ReleaseCommand {
    /// Include commits that would normally be hidden from the changelog
    #[arg(long)]
    pub all: bool,

    /// Override the computed severity level
    #[arg(long, value_parser = parse_forced_level)]
    pub force: Option<Level>,

    /// Set the stability suffix of the next version (empty clears it)
    #[arg(long)]
    pub stability: Option<String>,

    /// Compute and print everything without touching the repository
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, also print the rendered changelog entry
    #[arg(long, requires = "dry_run")]
    pub show_changelog: bool,
}

/// Parse a `--force` argument into a severity level.
fn parse_forced_level(name: &str) -> Result<Level, String> {
    Level::from_forced_name(name).ok_or_else(|| {
        format!("expected one of: {}", Level::FORCED_NAMES.join(", "))
    })
}

impl ReleaseCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let repo = GitRepo::discover(&std::env::current_dir()?)?;
        let root = repo.path().to_path_buf();
        self.run_in(&root)
    }

    /// Run the release against the project rooted at `root`.
    pub fn run_in(&self, root: &Path) -> anyhow::Result<()> {
        let ctx = gather(root, self.all)?;

        let github = ctx
            .project
            .github
            .clone()
            .context("project url in gradle.properties does not name a repository")?;
        let base_url = github.url();

        let current = ctx.project.version.to_string();
        let prev_tag = ctx.project.tag_name();
        if ctx.log.is_empty() && self.force.is_none() && self.stability.is_none() {
            anyhow::bail!("no release-relevant commits since {prev_tag}");
        }
        let next_tag = liftoff_core::version::next_version(
            &current,
            self.force,
            self.stability.as_deref(),
            ctx.level,
        )?;
        let next_version = next_tag.strip_prefix('v').unwrap_or(&next_tag).to_string();
        info!(%current, next = %next_version, level = ?ctx.level, "computed next version");

        let subject = format!("release {next_version}");
        let body = CommitMessage.format_changelog(&ctx.log);
        let commit_message = format!("chore: {subject}{body}");

        if self.dry_run {
            println!("would release {next_tag} from {prev_tag}");
            println!();
            println!("{commit_message}");
            if self.show_changelog {
                let date = ctx.repo.tag_date(&next_tag);
                let entry =
                    FileUpdate::new(&base_url, &next_tag, &prev_tag, date).format_changelog(&ctx.log);
                println!();
                println!("{entry}");
            }
            return Ok(());
        }

        let date = ctx.repo.tag_date(&next_tag);
        let entry = FileUpdate::new(&base_url, &next_tag, &prev_tag, date).format_changelog(&ctx.log);
        let changelog_path = root.join(CHANGELOG_FILE);
        let existing = std::fs::read_to_string(&changelog_path).unwrap_or_default();
        std::fs::write(&changelog_path, liftoff_changelog::insert_entry(&existing, &entry))
            .with_context(|| format!("writing {CHANGELOG_FILE}"))?;

        ctx.properties.set_version(&next_version)?;

        ctx.repo
            .stage(&[Path::new(VERSION_FILE), Path::new(CHANGELOG_FILE)])?;
        ctx.repo.commit(&commit_message)?;
        ctx.repo.annotated_tag(&next_tag, &subject)?;

        let release_body = ReleaseBody::new(&base_url, &next_tag, &prev_tag).format_changelog(&ctx.log);
        println!("{release_body}");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use tempfile::TempDir;

    const PROPERTIES: &str = "\
org.gradle.jvmargs = -Xmx1G

mod_version = 1.2.3
archives_base_name = scanner
url = https://github.com/example/scanner
";

    fn commit_all(repo: &Repository, message: &str) {
        let mut index = repo.index().unwrap();
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let parent = repo.head().ok().map(|head| head.peel_to_commit().unwrap());
        let parents: Vec<_> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap();
    }

    fn init_project() -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        std::fs::write(temp.path().join(VERSION_FILE), PROPERTIES).unwrap();
        std::fs::write(
            temp.path().join(CHANGELOG_FILE),
            "# Changelog\n\n## [1.2.3] (2024-01-01)\n\n- old entry\n",
        )
        .unwrap();
        commit_all(&repo, "chore: init");
        (temp, repo)
    }

    fn touch_and_commit(repo: &Repository, name: &str, message: &str) {
        std::fs::write(repo.workdir().unwrap().join(name), "content").unwrap();
        commit_all(repo, message);
    }

    #[test]
    fn test_release_bumps_tags_and_updates_files() {
        let (temp, repo) = init_project();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let head = repo.head().unwrap().peel_to_commit().unwrap();
        repo.tag("v1.2.3", head.as_object(), &sig, "release 1.2.3", false)
            .unwrap();

        touch_and_commit(&repo, "overlay.rs", "feat: add overlay");
        touch_and_commit(&repo, "parser.rs", "fix(parser): handle tabs\n\nRefs: #42");

        let cmd = ReleaseCommand {
            all: false,
            force: None,
            stability: None,
            dry_run: false,
            show_changelog: false,
        };
        cmd.run_in(temp.path()).unwrap();

        let properties = std::fs::read_to_string(temp.path().join(VERSION_FILE)).unwrap();
        assert!(properties.contains("mod_version = 1.3.0"));

        let changelog = std::fs::read_to_string(temp.path().join(CHANGELOG_FILE)).unwrap();
        assert!(changelog.starts_with("# Changelog\n\n## [1.3.0]"));
        assert!(changelog.contains("### New Features"));
        assert!(changelog.contains("add overlay"));
        assert!(changelog.contains("[#42](https://github.com/example/scanner/issues/42)"));
        assert!(changelog.contains("## [1.2.3] (2024-01-01)"));

        let head = repo.head().unwrap().peel_to_commit().unwrap();
        let message = head.message().unwrap();
        assert!(message.starts_with("chore: release 1.3.0\n\n"));
        assert!(message.contains("New Features:"));
        assert!(message.contains(" - add overlay"));

        assert!(repo.find_reference("refs/tags/v1.3.0").is_ok());
    }

    #[test]
    fn test_dry_run_changes_nothing() {
        let (temp, repo) = init_project();
        touch_and_commit(&repo, "overlay.rs", "feat: add overlay");

        let cmd = ReleaseCommand {
            all: false,
            force: None,
            stability: None,
            dry_run: true,
            show_changelog: false,
        };
        cmd.run_in(temp.path()).unwrap();

        let properties = std::fs::read_to_string(temp.path().join(VERSION_FILE)).unwrap();
        assert!(properties.contains("mod_version = 1.2.3"));
        assert!(repo.find_reference("refs/tags/v1.3.0").is_err());
    }

    #[test]
    fn test_forced_breaking_release() {
        let (temp, repo) = init_project();
        touch_and_commit(&repo, "parser.rs", "fix: handle tabs");

        let cmd = ReleaseCommand {
            all: false,
            force: Some(Level::Breaking),
            stability: None,
            dry_run: false,
            show_changelog: false,
        };
        cmd.run_in(temp.path()).unwrap();

        let properties = std::fs::read_to_string(temp.path().join(VERSION_FILE)).unwrap();
        assert!(properties.contains("mod_version = 2.0.0"));
        assert!(repo.find_reference("refs/tags/v2.0.0").is_ok());
    }

    #[test]
    fn test_parse_forced_level() {
        assert_eq!(parse_forced_level("feat").unwrap(), Level::Feature);
        assert_eq!(parse_forced_level("breaking").unwrap(), Level::Breaking);
        assert!(parse_forced_level("bogus").is_err());
    }
}
