//! Release configuration
//!
//! Optional `liftoff.toml` in the project root. Everything has a default, so
//! projects without a config file get the stock behavior.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

/// Config file name searched for in the project root.
pub const CONFIG_FILE: &str = "liftoff.toml";

/// Settings for changelog collection and rendering.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Scope rename table applied to every displayed scope.
    pub scope_fix: HashMap<String, String>,
    /// Show sections beyond feat/fix/breaking without asking on each run.
    pub take_all: bool,
}

impl ReleaseConfig {
    /// Load configuration from a directory.
    pub fn load(dir: &Path) -> Result<(Self, PathBuf), ConfigError> {
        let path = dir.join(CONFIG_FILE);
        let text = std::fs::read_to_string(&path)?;
        let config = toml::from_str(&text)?;
        debug!(path = %path.display(), "loaded release config");
        Ok((config, path))
    }
}

/// Load configuration, falling back to defaults when no file exists.
pub fn load_config_or_default(dir: &Path) -> (ReleaseConfig, Option<PathBuf>) {
    match ReleaseConfig::load(dir) {
        Ok((config, path)) => (config, Some(path)),
        Err(_) => (ReleaseConfig::default(), None),
    }
}
