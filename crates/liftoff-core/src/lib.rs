//! Liftoff Core - shared types for release management
//!
//! Severity levels, semantic version handling, project/properties model and
//! release configuration used by the changelog and git crates.

pub mod config;
pub mod error;
pub mod level;
pub mod project;
pub mod properties;
pub mod version;

pub use config::ReleaseConfig;
pub use error::{LiftoffError, Result};
pub use level::Level;
pub use project::{GithubInfo, Project};
pub use properties::{PropertiesFile, Span};
pub use version::Version;
