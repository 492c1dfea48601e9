//! In-memory line documents and reconciliation results.

use std::fs;
use std::io::Write as IoWrite;
use std::path::Path;

use crate::error::TextError;

/// Ordered raw lines of a text file, each keeping its trailing newline.
///
/// Splitting and joining are lossless: `LineDocument::parse(text).to_text()`
/// always reproduces `text` byte for byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineDocument {
    lines: Vec<String>,
}

impl LineDocument {
    /// Splits text into lines, keeping line terminators attached.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_owned).collect(),
        }
    }

    /// Wraps already split lines.
    #[must_use]
    pub const fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Reads and splits a UTF-8 text file.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Read`] if the file cannot be read and
    /// [`TextError::Decode`] if it is not valid UTF-8.
    pub fn read(path: &Path) -> Result<Self, TextError> {
        let bytes = fs::read(path).map_err(|source| TextError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|source| TextError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Returns the lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the document, returning its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Joins the lines back into text.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }

    /// Writes the document through a temporary file in the target directory
    /// that is renamed over `path` once fully written.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Write`] if the temporary file cannot be created,
    /// written, or renamed.
    pub fn write(&self, path: &Path) -> Result<(), TextError> {
        write_atomically(path, self.to_text().as_bytes())
    }
}

/// Outcome of reconciling a document against a desired state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    changed: bool,
    lines: Vec<String>,
}

impl Reconciliation {
    /// Creates a reconciliation result.
    #[must_use]
    pub const fn new(changed: bool, lines: Vec<String>) -> Self {
        Self { changed, lines }
    }

    /// Returns `true` when the resulting lines differ from the input.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.changed
    }

    /// Returns the resulting lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Joins the resulting lines into text.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }

    /// Converts the result into a document.
    #[must_use]
    pub fn into_document(self) -> LineDocument {
        LineDocument::from_lines(self.lines)
    }

    /// Writes the resulting lines to `path` when they changed.
    ///
    /// Returns whether a write happened.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Write`] if writing fails.
    pub fn write_if_changed(self, path: &Path) -> Result<bool, TextError> {
        if !self.changed {
            return Ok(false);
        }
        self.into_document().write(path)?;
        Ok(true)
    }
}

/// Replaces `path` with `content` via a same-directory temporary file.
///
/// Existing permissions are carried over to the replacement.
///
/// # Errors
///
/// Returns [`TextError::Write`] when any filesystem step fails.
pub fn write_atomically(path: &Path, content: &[u8]) -> Result<(), TextError> {
    let write_error = |source| TextError::Write {
        path: path.to_path_buf(),
        source,
    };
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(write_error)?;
    temp_file.write_all(content).map_err(write_error)?;
    temp_file.flush().map_err(write_error)?;
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp_file.path(), metadata.permissions()).map_err(write_error)?;
    }
    temp_file
        .persist(path)
        .map_err(|err| write_error(err.error))?;
    Ok(())
}
