//! Error types shared across the workspace
//!
//! One enum per domain, rolled up into [`LiftoffError`] so callers that do
//! not care about the domain can hold a single type.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LiftoffError>;

/// Any error the release flow can produce.
#[derive(Debug, Error)]
pub enum LiftoffError {
    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Problems with a semantic version string. These indicate a corrupt version
/// file and are always surfaced, never swallowed.
#[derive(Debug, Error)]
pub enum VersionError {
    #[error("invalid version '{version}': component '{component}' is not a number")]
    InvalidComponent { version: String, component: String },

    #[error("invalid version format: '{0}'")]
    InvalidFormat(String),
}

#[derive(Debug, Error)]
pub enum GitError {
    #[error("no git repository at {0}")]
    RepositoryNotFound(PathBuf),

    #[error("could not open repository: {0}")]
    OpenFailed(String),

    #[error("tag '{0}' already exists")]
    TagExists(String),

    #[error("tag '{0}' not found")]
    TagNotFound(String),

    #[error(transparent)]
    Git2(#[from] git2::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("property '{0}' is missing from {1}")]
    MissingProperty(String, PathBuf),

    #[error("io error reading configuration: {0}")]
    Io(#[from] std::io::Error),
}
