//! Material comparison of generated gettext templates.
//!
//! `xgettext` and `msgmerge` stamp every output with a
//! `POT-Creation-Date` header, so two runs over identical sources never
//! produce identical files. Two templates are materially different only when
//! they differ in some other line.

use std::fs;
use std::path::Path;

use crate::error::TextError;

const CREATION_DATE_PREFIX: &[u8] = b"\"POT-Creation-Date: ";
const CREATION_DATE_SUFFIX: &[u8] = b"\\n\"\n";

/// Returns `true` for a quoted `POT-Creation-Date` header line.
#[must_use]
pub fn is_pot_creation_date(line: Option<&[u8]>) -> bool {
    line.is_some_and(|bytes| {
        bytes.starts_with(CREATION_DATE_PREFIX) && bytes.ends_with(CREATION_DATE_SUFFIX)
    })
}

/// Compares two templates line by line, ignoring creation dates.
///
/// Lines are compared as raw bytes, so catalogues in any encoding compare
/// exactly as stored.
///
/// ```
/// use linguasync_text::pot_diff::materially_different;
///
/// let old = "msgid \"\"\n\"POT-Creation-Date: 2024-01-01 10:00+0000\\n\"\n";
/// let new = "msgid \"\"\n\"POT-Creation-Date: 2025-06-30 12:00+0000\\n\"\n";
/// assert!(!materially_different(old.as_bytes(), new.as_bytes()));
/// ```
#[must_use]
pub fn materially_different(left: &[u8], right: &[u8]) -> bool {
    let mut left_lines = left.split_inclusive(|byte| *byte == b'\n');
    let mut right_lines = right.split_inclusive(|byte| *byte == b'\n');
    loop {
        let left_line = left_lines.next();
        let right_line = right_lines.next();
        if left_line.is_none() && right_line.is_none() {
            return false;
        }
        if left_line != right_line
            && !(is_pot_creation_date(left_line) && is_pot_creation_date(right_line))
        {
            return true;
        }
    }
}

/// Compares two template files byte for byte, see [`materially_different`].
///
/// # Errors
///
/// Returns [`TextError::Read`] if either file cannot be read.
pub fn files_materially_different(left: &Path, right: &Path) -> Result<bool, TextError> {
    let read = |path: &Path| {
        fs::read(path).map_err(|source| TextError::Read {
            path: path.to_path_buf(),
            source,
        })
    };
    Ok(materially_different(&read(left)?, &read(right)?))
}
