//! Semantic version parsing and bumping
//!
//! Versions here are deliberately more lenient than strict SemVer: the core is
//! any dot-separated run of non-negative integers (padded to three
//! components), optionally followed by a `-stability` suffix. Non-numeric
//! components are a hard error, since they indicate a corrupt version file.

use crate::error::VersionError;
use crate::level::Level;
use crate::properties::Span;

/// A version as it appears in the properties file: the numeric core and the
/// stability suffix, each coupled with its byte span for in-place patching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    /// Dot-separated numeric core, e.g. `1.2.3`
    pub core: Span,
    /// Stability suffix including the leading `-`, or empty
    pub stability: Span,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.core.value, self.stability.value)
    }
}

/// Split a version string into numeric components (zero-padded to three) and
/// its stability suffix (without the leading `-`).
pub fn parse_components(version: &str) -> Result<(Vec<u64>, String), VersionError> {
    let (core, stability) = match version.split_once('-') {
        Some((core, stability)) => (core, stability.to_string()),
        None => (version, String::new()),
    };

    let mut components = Vec::new();
    for part in core.split('.') {
        let value = part
            .parse::<u64>()
            .map_err(|_| VersionError::InvalidComponent {
                version: version.to_string(),
                component: part.to_string(),
            })?;
        components.push(value);
    }
    while components.len() < 3 {
        components.push(0);
    }

    Ok((components, stability))
}

/// Compute the next numeric core for the given severity level.
///
/// Levels at or below [`Level::Stability`] leave the core unchanged. Otherwise
/// the bumped component index counts down from the most significant one:
/// `Breaking` bumps major, `Feature` minor, `Patch` patch. Components less
/// significant than the bumped one are reset to zero. The output always has
/// exactly three components; any stability suffix on the input is dropped.
pub fn bump(version: &str, level: Level) -> Result<String, VersionError> {
    let (mut components, _) = parse_components(version)?;

    if level > Level::Stability {
        let index = Level::Breaking.ordinal() - level.ordinal();
        components[index] += 1;
        for component in components.iter_mut().skip(index + 1) {
            *component = 0;
        }
    }

    let core: Vec<String> = components
        .iter()
        .take(3)
        .map(|component| component.to_string())
        .collect();
    Ok(core.join("."))
}

/// Compose the next release tag from the current version, the level derived
/// from the commit log, and the operator's overrides.
///
/// - `forced` replaces the computed level, except `Stability`, which instead
///   starts or advances an `-rc.N` suffix.
/// - `stability` replaces the suffix outright (leading dashes are optional).
/// - Without forcing, a current `-rc.*` suffix means this release finalizes a
///   candidate: the suffix is cleared and the numeric core stays put.
pub fn next_version(
    current: &str,
    forced: Option<Level>,
    stability: Option<&str>,
    level: Level,
) -> Result<String, VersionError> {
    let mut level = level;
    let mut force_stability = false;
    if let Some(forced) = forced {
        force_stability = forced == Level::Stability;
        if !force_stability {
            level = forced;
        }
    }

    let mut next_stability = current
        .split_once('-')
        .map(|(_, suffix)| format!("-{suffix}"))
        .unwrap_or_default();
    if let Some(requested) = stability {
        let requested = requested.trim_start_matches('-');
        next_stability = if requested.is_empty() {
            String::new()
        } else {
            format!("-{requested}")
        };
    }

    if force_stability {
        if next_stability.is_empty() {
            next_stability = "-rc.1".to_string();
        } else {
            next_stability = advance_stability(&next_stability)?;
            level = Level::Benign;
        }
    } else if next_stability.starts_with("-rc.") {
        next_stability.clear();
        level = Level::Benign;
    }

    Ok(format!("v{}{}", bump(current, level)?, next_stability))
}

/// Advance the iteration counter of a stability suffix: `-rc.1` becomes
/// `-rc.2`, a suffix without a counter gains `.2`.
fn advance_stability(suffix: &str) -> Result<String, VersionError> {
    match suffix.split_once('.') {
        None => Ok(format!("{suffix}.2")),
        Some((name, iteration)) => {
            let iteration =
                iteration
                    .parse::<u64>()
                    .map_err(|_| VersionError::InvalidFormat(suffix.to_string()))?;
            Ok(format!("{name}.{}", iteration + 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_feature() {
        assert_eq!(bump("1.99.99", Level::Feature).unwrap(), "1.100.0");
    }

    #[test]
    fn test_bump_pads_missing_components() {
        assert_eq!(bump("4.5", Level::Breaking).unwrap(), "5.0.0");
        assert_eq!(bump("4", Level::Patch).unwrap(), "4.0.1");
    }

    #[test]
    fn test_bump_drops_stability() {
        assert_eq!(bump("1.2.3-rc.1", Level::Patch).unwrap(), "1.2.4");
    }

    #[test]
    fn test_bump_benign_and_stability_unchanged() {
        assert_eq!(bump("1.2.3", Level::Benign).unwrap(), "1.2.3");
        assert_eq!(bump("1.2.3", Level::Stability).unwrap(), "1.2.3");
    }

    #[test]
    fn test_bump_keeps_three_components() {
        assert_eq!(bump("1.2.3.4", Level::Patch).unwrap(), "1.2.4");
    }

    #[test]
    fn test_bump_monotonic_in_level() {
        let levels = [
            Level::Benign,
            Level::Stability,
            Level::Patch,
            Level::Feature,
            Level::Breaking,
        ];
        let bumped: Vec<_> = levels
            .iter()
            .map(|level| parse_components(&bump("2.7.1", *level).unwrap()).unwrap().0)
            .collect();
        for pair in bumped.windows(2) {
            assert!(pair[0] <= pair[1], "{:?} > {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_bump_rejects_non_numeric() {
        assert!(matches!(
            bump("1.x.3", Level::Patch),
            Err(VersionError::InvalidComponent { .. })
        ));
    }

    #[test]
    fn test_next_version_plain() {
        assert_eq!(
            next_version("1.2.3", None, None, Level::Feature).unwrap(),
            "v1.3.0"
        );
    }

    #[test]
    fn test_next_version_finalizes_rc() {
        // Releasing from an rc clears the suffix without a numeric bump.
        assert_eq!(
            next_version("1.3.0-rc.2", None, None, Level::Feature).unwrap(),
            "v1.3.0"
        );
    }

    #[test]
    fn test_next_version_forced_stability_starts_rc() {
        assert_eq!(
            next_version("1.2.3", Some(Level::Stability), None, Level::Feature).unwrap(),
            "v1.3.0-rc.1"
        );
    }

    #[test]
    fn test_next_version_forced_stability_advances_rc() {
        assert_eq!(
            next_version("1.3.0-rc.1", Some(Level::Stability), None, Level::Feature).unwrap(),
            "v1.3.0-rc.2"
        );
    }

    #[test]
    fn test_next_version_explicit_stability() {
        assert_eq!(
            next_version("1.2.3", None, Some("beta"), Level::Patch).unwrap(),
            "v1.2.4-beta"
        );
        assert_eq!(
            next_version("1.2.3-beta", None, Some(""), Level::Patch).unwrap(),
            "v1.2.4"
        );
    }

    #[test]
    fn test_next_version_forced_level() {
        assert_eq!(
            next_version("1.2.3", Some(Level::Breaking), None, Level::Patch).unwrap(),
            "v2.0.0"
        );
    }
}
