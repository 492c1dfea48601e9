//! Reconciliation of `LINGUAS` files.
//!
//! A `LINGUAS` file lists one language code per line; blank lines and
//! `#` comments may appear anywhere. Older projects keep every code on a
//! single space-separated line, which is preserved as such.

use std::collections::BTreeSet;

use crate::document::Reconciliation;

/// Returns the language code carried by a line, or an empty string for blank
/// and comment-only lines.
#[must_use]
pub fn code_token(line: &str) -> &str {
    line.split_once('#').map_or(line, |(code, _comment)| code).trim()
}

/// Reconciles `lines` so the codes they list equal `desired`.
///
/// Lines naming a desired code stay where they are, lines naming codes no
/// longer desired are removed, and missing codes are appended in sorted
/// order. Comment and blank lines are never touched. When a line holds
/// several space-separated codes the file is treated as a single-line list:
/// that line is rewritten to the sorted outstanding codes and scanning stops.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use linguasync_text::linguas::reconcile;
///
/// let desired: BTreeSet<String> = ["de", "es", "fr"].into_iter().map(String::from).collect();
/// let result = reconcile(vec![String::from("en fr de\n")], &desired);
/// assert!(result.changed());
/// assert_eq!(result.lines(), ["de es fr\n"]);
/// ```
#[must_use]
pub fn reconcile(mut lines: Vec<String>, desired: &BTreeSet<String>) -> Reconciliation {
    let mut outstanding: BTreeSet<&str> = desired.iter().map(String::as_str).collect();
    let mut removals: Vec<usize> = Vec::new();
    let mut single_line: Option<usize> = None;

    for (index, line) in lines.iter().enumerate() {
        let code = code_token(line);
        if code.is_empty() {
            continue;
        }
        if code.contains(' ') {
            single_line = Some(index);
            break;
        }
        if !outstanding.remove(code) {
            removals.push(index);
        }
    }

    let mut changed = false;

    if let Some(index) = single_line {
        let expected = outstanding.iter().copied().collect::<Vec<_>>().join(" ");
        if let Some(line) = lines.get_mut(index) {
            if code_token(line) != expected {
                *line = format!("{expected}\n");
                changed = true;
            }
        }
        outstanding.clear();
    }

    if !removals.is_empty() {
        for index in removals.into_iter().rev() {
            lines.remove(index);
        }
        changed = true;
    }

    if !outstanding.is_empty() {
        terminate_last_line(&mut lines);
        lines.extend(outstanding.into_iter().map(|code| format!("{code}\n")));
        changed = true;
    }

    Reconciliation::new(changed, lines)
}

/// Ensures appended lines do not merge into an unterminated final line.
fn terminate_last_line(lines: &mut [String]) {
    if let Some(last) = lines.last_mut() {
        if !last.ends_with('\n') {
            last.push('\n');
        }
    }
}

#[cfg(test)]
mod tests;
