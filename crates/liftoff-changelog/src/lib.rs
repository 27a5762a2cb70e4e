//! Liftoff Changelog - the commit-log-to-changelog compiler
//!
//! Parses conventional-commit messages into structured records, classifies
//! them into sections and severity levels, aggregates them into a changelog,
//! and renders the result into the three textual artifacts a release needs:
//! the `CHANGELOG.md` entry, the hosting-platform release body, and the
//! release commit message.
//!
//! Everything in this crate is a pure transformation over in-memory strings;
//! commit retrieval and file writes live elsewhere.

pub mod classify;
pub mod commit;
pub mod file;
pub mod log;
pub mod render;

pub use classify::{collect_log, section_title, BREAKING_CHANGE};
pub use commit::{parse_commit, Commit, CommitLink, References};
pub use file::{extract_release_notes, insert_entry};
pub use log::ChangeLog;
pub use render::{ChangelogMessage, CommitMessage, FileUpdate, ReleaseBody};
