//! Contributor lines in the header comment of PO catalogues.
//!
//! gettext catalogues open with a block of translator comments such as
//!
//! ```text
//! # German translation for demo.
//! # Jane Doe <jane@example.com>, 2023.
//! #
//! msgid ""
//! ```
//!
//! [`update_contributor`] records that an author touched the catalogue in a
//! given year, either by extending their existing line or by adding a new
//! one next to the other contributors.

use crate::document::Reconciliation;

const PLACEHOLDER: &str = "FIRST AUTHOR <EMAIL@ADDRESS>, YEAR.";

/// Name and optional e-mail address of a catalogue contributor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contributor {
    name: String,
    email: Option<String>,
}

impl Contributor {
    /// Creates a contributor.
    #[must_use]
    pub fn new(name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            name: name.into(),
            email,
        }
    }

    /// Parses a commit author string such as `Jane Doe <jane@example.com>`.
    ///
    /// ```
    /// use linguasync_text::contributors::Contributor;
    ///
    /// let author = Contributor::parse("Jane Doe <jane@example.com>");
    /// assert_eq!(author.name(), "Jane Doe");
    /// assert_eq!(author.email(), Some("jane@example.com"));
    /// assert_eq!(Contributor::parse("Jane").email(), None);
    /// ```
    #[must_use]
    pub fn parse(author: &str) -> Self {
        match author.split_once('<') {
            Some((name, email)) => Self::new(
                name.trim(),
                Some(email.trim().trim_end_matches('>').to_owned()),
            ),
            None => Self::new(author.trim(), None),
        }
    }

    /// Returns the contributor name.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the contributor e-mail, if known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn line(&self, year: i32) -> String {
        match &self.email {
            Some(email) => format!("# {} <{email}>, {year}.\n", self.name),
            None => format!("# {}, {year}.\n", self.name),
        }
    }

    fn matches(&self, body: &str) -> bool {
        body.contains(self.name.as_str())
            && self.email.as_deref().is_none_or(|email| body.contains(email))
    }
}

/// Records `contributor` for `year` in the catalogue header comments.
///
/// Catalogues without a header entry (a leading `msgid ""`) are left alone.
#[must_use]
pub fn update_contributor(
    mut lines: Vec<String>,
    contributor: &Contributor,
    year: i32,
) -> Reconciliation {
    if !has_header_entry(&lines) {
        return Reconciliation::new(false, lines);
    }

    let block_end = lines
        .iter()
        .position(|line| !is_translator_comment(line))
        .unwrap_or(lines.len());

    let mut placeholder: Option<usize> = None;
    let mut last_author: Option<usize> = None;
    let mut existing: Option<usize> = None;
    for (index, line) in lines.iter().enumerate().take(block_end) {
        let body = comment_body(line);
        if body == PLACEHOLDER {
            placeholder = Some(index);
        } else if is_author_line(body) {
            last_author = Some(index);
            if existing.is_none() && contributor.matches(body) {
                existing = Some(index);
            }
        }
    }

    let year_text = year.to_string();
    if let Some(index) = existing {
        let Some(line) = lines.get_mut(index) else {
            return Reconciliation::new(false, lines);
        };
        let body = comment_body(line);
        if body.contains(year_text.as_str()) {
            return Reconciliation::new(false, lines);
        }
        *line = format!("# {}, {year_text}.\n", body.trim_end_matches('.'));
        return Reconciliation::new(true, lines);
    }

    let new_line = contributor.line(year);
    if let Some(index) = placeholder {
        if let Some(line) = lines.get_mut(index) {
            *line = new_line;
        }
    } else if let Some(index) = last_author {
        lines.insert(index + 1, new_line);
    } else {
        let mut insert_at = block_end;
        while insert_at > 0
            && lines
                .get(insert_at - 1)
                .is_some_and(|line| comment_body(line).is_empty())
        {
            insert_at -= 1;
        }
        lines.insert(insert_at, new_line);
    }
    Reconciliation::new(true, lines)
}

fn has_header_entry(lines: &[String]) -> bool {
    lines
        .iter()
        .find(|line| line.starts_with("msgid "))
        .is_some_and(|line| line.trim_end() == "msgid \"\"")
}

fn is_translator_comment(line: &str) -> bool {
    let rest = line.strip_prefix('#');
    rest.is_some_and(|text| text.is_empty() || text.starts_with([' ', '\n', '\r']))
}

fn comment_body(line: &str) -> &str {
    line.strip_prefix('#').unwrap_or(line).trim()
}

/// Mirrors the `<user@host> ... YYYY` shape of contributor lines.
fn is_author_line(body: &str) -> bool {
    let Some((_, after_open)) = body.split_once('<') else {
        return false;
    };
    let Some((address, rest)) = after_open.split_once('>') else {
        return false;
    };
    address.contains('@') && !address.contains(char::is_whitespace) && has_year(rest)
}

fn has_year(text: &str) -> bool {
    let mut run = 0_usize;
    for character in text.chars() {
        if character.is_ascii_digit() {
            run += 1;
            if run == 4 {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}
