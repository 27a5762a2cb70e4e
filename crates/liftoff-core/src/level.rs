//! Severity levels for classified commits
//!
//! A commit batch carries the maximum level of its visible commits; the level
//! decides which version component is bumped.

/// How severe a change is, from "nothing worth a release" up to a breaking
/// change. The order of the variants is load-bearing: `Ord` drives both the
/// batch maximum and the bump index computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// No release-relevant change
    Benign,
    /// Pre-release stability adjustment only
    Stability,
    /// Bug-fix level change
    Patch,
    /// Backwards-compatible feature
    Feature,
    /// Breaking change
    Breaking,
}

impl Level {
    /// Names accepted by the `--force` CLI flag, mapped to levels.
    ///
    /// `stability` is special-cased by the release orchestrator: it forces an
    /// `-rc.N` suffix rather than a numeric bump.
    pub fn from_forced_name(name: &str) -> Option<Level> {
        match name {
            "patch" | "fix" => Some(Level::Patch),
            "minor" | "feat" | "feature" => Some(Level::Feature),
            "major" | "breaking" | "release" => Some(Level::Breaking),
            "stability" => Some(Level::Stability),
            _ => None,
        }
    }

    /// All names accepted by [`Level::from_forced_name`], for CLI help.
    pub const FORCED_NAMES: &'static [&'static str] = &[
        "patch",
        "fix",
        "minor",
        "feat",
        "feature",
        "major",
        "breaking",
        "release",
        "stability",
    ];

    /// Zero-based ordinal, `Benign == 0` through `Breaking == 4`.
    pub fn ordinal(self) -> usize {
        self as usize
    }
}
