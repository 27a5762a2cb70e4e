//! Command-line surface

pub mod commands;

use clap::{Parser, Subcommand};

use commands::{ChangelogCommand, ReleaseCommand};

/// Liftoff - compiles commit logs into changelogs and cuts releases
#[derive(Debug, Parser)]
#[command(name = "liftoff")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log what is happening at each step
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run as if started in this directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Cut a release: update the changelog and version file, commit, tag
    Release(ReleaseCommand),

    /// Preview the changelog for the commits since the last release
    Changelog(ChangelogCommand),
}

impl Cli {
    pub fn execute(self) -> anyhow::Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Release(ref cmd) => cmd.execute(),
            Commands::Changelog(ref cmd) => cmd.execute(),
        }
    }
}
