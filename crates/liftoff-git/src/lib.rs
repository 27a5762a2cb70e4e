//! Liftoff Git - repository collaborators for the release flow
//!
//! Thin `git2` wrappers that hand the changelog compiler plain data: raw
//! commits for a release window, tag lists, tag dates. Also the write-backs
//! the release command needs (staging, the release commit, the annotated
//! tag).

pub mod log;
pub mod repository;
pub mod tags;
pub mod workdir;

pub use log::{LogWindow, RawCommit};
pub use repository::GitRepo;
pub use tags::release_window;
