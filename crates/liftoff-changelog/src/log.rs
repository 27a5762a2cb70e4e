//! Aggregated changelog
//!
//! Sections keyed by category token. Rendering iterates known sections first
//! in their fixed order, then everything else lexicographically; within a
//! section the renderer groups commits by scope, preserving the chronological
//! order the log query delivered.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::is_known_section;
use crate::commit::CommitLink;

/// Mapping from section key to its commits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeLog {
    sections: BTreeMap<String, Vec<CommitLink>>,
}

impl ChangeLog {
    /// Append a commit to a section, creating the section on first use.
    pub fn push(&mut self, section: &str, link: CommitLink) {
        self.sections.entry(section.to_string()).or_default().push(link);
    }

    /// Commits of one section, if present.
    pub fn get(&self, section: &str) -> Option<&[CommitLink]> {
        self.sections.get(section).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Sections outside the known set, in lexicographic key order.
    pub fn other_sections(&self) -> impl Iterator<Item = (&str, &[CommitLink])> {
        self.sections
            .iter()
            .filter(|(key, _)| !is_known_section(key))
            .map(|(key, links)| (key.as_str(), links.as_slice()))
    }
}
