//! Rewriting of `KEY="value"` assignments in shell-like configuration files.
//!
//! Autotools projects list their languages in `configure`, `configure.in` or
//! `configure.ac` as `ALL_LINGUAS="de fr"`. Only the assignment line is
//! replaced; everything else, commented-out assignments included, is left
//! untouched.

use std::collections::BTreeSet;

use crate::document::Reconciliation;

/// Key of the language list assignment in autotools `configure` scripts.
pub const ALL_LINGUAS: &str = "ALL_LINGUAS";

/// Editor for one quoted shell assignment.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use linguasync_text::assignment::KeyedAssignment;
///
/// let editor = KeyedAssignment::all_linguas();
/// let codes: BTreeSet<String> = ["fr", "de"].into_iter().map(String::from).collect();
/// assert_eq!(editor.expected_line(&codes), "ALL_LINGUAS=\"de fr\"\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedAssignment {
    key: String,
    prefix: String,
}

impl KeyedAssignment {
    /// Creates an editor for `key`.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let prefix = format!("{key}=\"");
        Self { key, prefix }
    }

    /// Creates the `ALL_LINGUAS` editor.
    #[must_use]
    pub fn all_linguas() -> Self {
        Self::new(ALL_LINGUAS)
    }

    /// Returns the assignment key.
    #[must_use]
    pub const fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Returns the literal `KEY="` prefix identifying assignment lines.
    #[must_use]
    pub const fn prefix(&self) -> &str {
        self.prefix.as_str()
    }

    /// Renders the canonical assignment line for `codes`.
    #[must_use]
    pub fn expected_line(&self, codes: &BTreeSet<String>) -> String {
        let joined = codes
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        format!("{}{joined}\"\n", self.prefix)
    }

    /// Rewrites every assignment line that differs from the canonical one.
    #[must_use]
    pub fn reconcile(&self, mut lines: Vec<String>, codes: &BTreeSet<String>) -> Reconciliation {
        let expected = self.expected_line(codes);
        let mut changed = false;

        for line in &mut lines {
            let stripped = line.trim();
            if stripped.starts_with('#') || !stripped.starts_with(self.prefix.as_str()) {
                continue;
            }
            if *line != expected {
                line.clone_from(&expected);
                changed = true;
            }
        }

        Reconciliation::new(changed, lines)
    }

    /// Returns `true` when `content` is UTF-8 text containing the prefix.
    #[must_use]
    pub fn is_eligible(&self, content: &[u8]) -> bool {
        std::str::from_utf8(content).is_ok_and(|text| text.contains(self.prefix.as_str()))
    }
}
