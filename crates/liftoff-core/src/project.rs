//! Project identity derived from the properties file

use crate::error::ConfigError;
use crate::properties::PropertiesFile;
use crate::version::Version;

/// Hosting coordinates of the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubInfo {
    pub owner: String,
    pub repo: String,
}

impl GithubInfo {
    /// Repository page URL, used as the base for commit and compare links.
    pub fn url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }

    /// Derive owner/repo from a project URL, if it has enough path segments.
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
        let mut segments = path.split('/').skip(1).filter(|s| !s.is_empty());
        let owner = segments.next()?;
        let repo = segments.next()?;
        Some(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

/// The released project: package name, current version and hosting info.
#[derive(Debug, Clone)]
pub struct Project {
    pub package_root: String,
    pub version: Version,
    pub github: Option<GithubInfo>,
}

impl Project {
    /// Build the project model from a parsed properties file.
    pub fn from_properties(properties: &PropertiesFile) -> Result<Self, ConfigError> {
        let version = properties.version()?;
        let package_root = properties.archives_base_name.clone().unwrap_or_default();
        let github = properties
            .url
            .as_deref()
            .and_then(GithubInfo::from_url);

        Ok(Self {
            package_root,
            version,
            github,
        })
    }

    /// Tag name for the current version, e.g. `v1.2.3`.
    pub fn tag_name(&self) -> String {
        format!("v{}", self.version)
    }

    /// Base name of release artifacts.
    pub fn archive_name(&self) -> String {
        format!("{}-{}", self.package_root, self.version)
    }
}
