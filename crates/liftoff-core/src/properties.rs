//! Version-file properties
//!
//! The project version lives in a `gradle.properties`-style file of
//! `name = value` lines. Each declaration keeps the byte offset of its value
//! so the release flow can patch the version in place without rewriting (or
//! reformatting) the rest of the file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::ConfigError;
use crate::version::Version;

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"=\s+").expect("Invalid regex"));

/// A property value together with its byte offset in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub value: String,
    pub offset: usize,
}

impl Span {
    pub fn new(value: impl Into<String>, offset: usize) -> Self {
        Self {
            value: value.into(),
            offset,
        }
    }
}

/// A single `name = value` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    pub name: String,
    pub value: String,
    pub offset: usize,
}

/// Parsed properties file with the declarations the release flow cares about
/// promoted to named fields; everything else lands in `extras`.
#[derive(Debug, Clone)]
pub struct PropertiesFile {
    path: PathBuf,
    /// Full project version, e.g. `1.2.3-rc.1`
    pub mod_version: Option<Span>,
    /// Base name for built archives
    pub archives_base_name: Option<String>,
    /// Project homepage, expected to point at the hosting platform
    pub url: Option<String>,
    /// Remaining declarations, by name
    pub extras: HashMap<String, String>,
}

/// Extract `name = value` declarations with value offsets from raw text.
///
/// Lines without a `= ` assignment are ignored; this intentionally skips
/// comments and blank lines without modelling them.
pub fn parse_decls(text: &str) -> Vec<Decl> {
    let mut decls = Vec::new();
    let mut offset = 0;
    for line in text.split('\n') {
        if let Some(found) = ASSIGNMENT.find(line) {
            let name = line[..found.start()].trim().to_string();
            let value = line[found.end()..].trim().to_string();
            decls.push(Decl {
                name,
                value,
                offset: offset + found.end(),
            });
        }
        offset += line.len() + 1;
    }
    decls
}

/// Replace the span's current value with `new_value` in `text`.
pub fn splice(text: &str, span: &Span, new_value: &str) -> String {
    let mut patched = String::with_capacity(text.len() + new_value.len());
    patched.push_str(&text[..span.offset]);
    patched.push_str(new_value);
    patched.push_str(&text[span.offset + span.value.len()..]);
    patched
}

impl PropertiesFile {
    /// Load and parse a properties file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_text(path, &text))
    }

    /// Parse already-read text; `path` is kept for patching and diagnostics.
    pub fn from_text(path: &Path, text: &str) -> Self {
        let mut result = Self {
            path: path.to_path_buf(),
            mod_version: None,
            archives_base_name: None,
            url: None,
            extras: HashMap::new(),
        };

        for decl in parse_decls(text) {
            match decl.name.as_str() {
                "mod_version" => result.mod_version = Some(Span::new(decl.value, decl.offset)),
                "archives_base_name" => result.archives_base_name = Some(decl.value),
                "url" => result.url = Some(decl.value),
                _ => {
                    result.extras.insert(decl.name, decl.value);
                }
            }
        }

        debug!(path = %path.display(), extras = result.extras.len(), "parsed properties file");
        result
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The project version split into core and stability spans.
    pub fn version(&self) -> Result<Version, ConfigError> {
        let mod_version = self.mod_version.as_ref().ok_or_else(|| {
            ConfigError::MissingProperty("mod_version".to_string(), self.path.clone())
        })?;

        let core_value = mod_version
            .value
            .split_once('-')
            .map(|(core, _)| core)
            .unwrap_or(&mod_version.value);
        let stability_value = &mod_version.value[core_value.len()..];

        Ok(Version {
            core: Span::new(core_value, mod_version.offset),
            stability: Span::new(stability_value, mod_version.offset + core_value.len()),
        })
    }

    /// Patch one span of the file in place.
    pub fn patch(&self, span: &Span, new_value: &str) -> Result<(), ConfigError> {
        let text = std::fs::read_to_string(&self.path)?;
        std::fs::write(&self.path, splice(&text, span, new_value))?;
        Ok(())
    }

    /// Rewrite the stored version to `new_version` (without any `v` prefix).
    ///
    /// The core is patched first; offsets shift when its width changes, so the
    /// file is re-read before the stability suffix is patched.
    pub fn set_version(&self, new_version: &str) -> Result<(), ConfigError> {
        let new_core = new_version
            .split_once('-')
            .map(|(core, _)| core)
            .unwrap_or(new_version);
        let new_stability = &new_version[new_core.len()..];

        self.patch(&self.version()?.core, new_core)?;

        let reloaded = Self::load(&self.path)?;
        let version = reloaded.version()?;
        if !new_stability.is_empty() {
            reloaded.patch(&version.stability, new_stability)?;
        } else if !version.stability.value.is_empty() {
            reloaded.patch(&version.stability, "")?;
        }
        Ok(())
    }
}
