//! Changelog file surgery
//!
//! Pure text transforms over `CHANGELOG.md`: inserting a freshly rendered
//! entry after the preamble, and pulling an existing entry back out when a
//! release is published from an already-written changelog. Reading and
//! writing the file belongs to the caller.

/// Insert a rendered entry right after the file preamble (everything before
/// the first `"## "` heading), leaving existing entries untouched.
pub fn insert_entry(existing: &str, entry: &str) -> String {
    match existing.split_once("\n## ") {
        Some((preamble, rest)) => format!("{preamble}\n{entry}\n## {rest}"),
        None => format!("{existing}\n{entry}"),
    }
}

/// Extract the body of the `## [<version>]` entry from a changelog file.
///
/// Nested headings inside the entry are demoted to bold lines, matching the
/// release body's typography. Returns `None` when the entry is missing or
/// empty.
pub fn extract_release_notes(changelog: &str, version: &str) -> Option<String> {
    let h2_prefix = "## [";
    let current_prefix = format!("## [{version}]");

    let mut collecting = false;
    let mut lines: Vec<String> = Vec::new();
    for line in changelog.lines() {
        let line = line.trim_end();
        let is_h2 = line.starts_with(h2_prefix);
        if !is_h2 && collecting {
            if line.starts_with('#') {
                let heading = line.trim_start_matches(['#', ' ', '\t']).trim();
                lines.push(format!("**{heading}**"));
            } else {
                lines.push(line.to_string());
            }
            continue;
        }
        collecting = line.starts_with(&current_prefix);
    }

    let text = lines.join("\n").trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
