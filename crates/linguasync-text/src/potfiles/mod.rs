//! Parsing of `POTFILES.in` source manifests.
//!
//! The syntax mirrors the file lists accepted by `xgettext --files-from`:
//! one path per line, lines starting with `#` are comments, trailing blanks
//! are insignificant and leading blanks are kept.

use std::collections::BTreeSet;
use std::path::Path;

use crate::document::LineDocument;
use crate::error::TextError;

/// Parses manifest text into its entries.
///
/// Blank lines are kept as empty strings so the result lines up with the
/// input; [`manifest_paths`] drops them.
///
/// # Example
///
/// ```
/// use linguasync_text::potfiles::parse_manifest;
///
/// let entries = parse_manifest("# comment\nsrc/a.c  \n\nsrc/b.c\n");
/// assert_eq!(entries, ["src/a.c", "", "src/b.c"]);
/// ```
#[must_use]
pub fn parse_manifest(text: &str) -> Vec<String> {
    text.split_inclusive('\n')
        .filter(|line| !line.starts_with('#'))
        .map(|line| {
            line.strip_suffix('\n')
                .unwrap_or(line)
                .trim_end_matches([' ', '\t', '\r'])
                .to_owned()
        })
        .collect()
}

/// Reads and parses the manifest at `path`.
///
/// # Errors
///
/// Returns a [`TextError`] if the file cannot be read or is not UTF-8.
pub fn read_manifest(path: &Path) -> Result<Vec<String>, TextError> {
    let document = LineDocument::read(path)?;
    Ok(parse_manifest(&document.to_text()))
}

/// Normalises manifest entries into repository-relative paths.
///
/// Each non-blank entry is joined to `directory` (empty for the repository
/// root) and cleaned with [`cleanup_path`]. Duplicates collapse.
#[must_use]
pub fn manifest_paths(entries: &[String], directory: &str) -> BTreeSet<String> {
    entries
        .iter()
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            if directory.is_empty() {
                cleanup_path(entry)
            } else {
                cleanup_path(&format!("{directory}/{entry}"))
            }
        })
        .collect()
}

/// Lexically normalises a slash-separated path and strips leading slashes.
///
/// `.` components and duplicate separators vanish, `..` cancels the
/// preceding component. A `..` that would climb above the start is kept so
/// later resolution can reject the path.
///
/// ```
/// use linguasync_text::potfiles::cleanup_path;
///
/// assert_eq!(cleanup_path("./src//lib/../main.c"), "src/main.c");
/// assert_eq!(cleanup_path("/abs/file.c"), "abs/file.c");
/// assert_eq!(cleanup_path("../outside.c"), "../outside.c");
/// ```
#[must_use]
pub fn cleanup_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else {
                    parts.push("..");
                }
            }
            component => parts.push(component),
        }
    }
    parts.join("/")
}

#[cfg(test)]
mod tests;
