//! Repository path templates such as `{{ filename|stripext }}.mo`.
//!
//! A template is literal text with `{{ variable|filter|filter }}`
//! placeholders. Variables come from the translation being processed and
//! filters transform a path string:
//!
//! | filter      | effect                                  |
//! |-------------|-----------------------------------------|
//! | `stripext`  | drops the extension of the last segment |
//! | `dirname`   | drops the last segment                  |
//! | `parentdir` | drops the first segment                 |
//!
//! Templates are parsed once when settings are validated, so rendering can
//! only fail on a missing variable.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors raised while parsing or rendering a path template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A `{{` has no matching `}}`.
    #[error("unterminated placeholder at byte {offset}")]
    Unterminated {
        /// Byte offset of the opening braces.
        offset: usize,
    },
    /// A placeholder names no variable.
    #[error("empty placeholder at byte {offset}")]
    EmptyPlaceholder {
        /// Byte offset of the opening braces.
        offset: usize,
    },
    /// The variable is not offered for path templates.
    #[error("unknown variable '{name}'")]
    UnknownVariable {
        /// Variable name.
        name: String,
    },
    /// The filter does not exist.
    #[error("unknown filter '{name}'")]
    UnknownFilter {
        /// Filter name.
        name: String,
    },
    /// The variable was not supplied at render time.
    #[error("no value for variable '{name}'")]
    MissingValue {
        /// Variable name.
        name: String,
    },
}

/// Variables available to path templates.
pub const VARIABLES: [&str; 2] = ["filename", "language_code"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Filter {
    StripExt,
    DirName,
    ParentDir,
}

impl Filter {
    fn parse(name: &str) -> Result<Self, TemplateError> {
        match name {
            "stripext" => Ok(Self::StripExt),
            "dirname" => Ok(Self::DirName),
            "parentdir" => Ok(Self::ParentDir),
            other => Err(TemplateError::UnknownFilter {
                name: other.to_owned(),
            }),
        }
    }

    fn apply(self, value: &str) -> String {
        match self {
            Self::StripExt => strip_extension(value).to_owned(),
            Self::DirName => value
                .rsplit_once('/')
                .map_or_else(String::new, |(dir, _)| dir.to_owned()),
            Self::ParentDir => value
                .split_once('/')
                .map_or(value, |(_, rest)| rest)
                .to_owned(),
        }
    }
}

fn strip_extension(value: &str) -> &str {
    let name_start = value.rfind('/').map_or(0, |index| index + 1);
    match value.get(name_start..).and_then(|name| name.rfind('.')) {
        // A leading dot marks a hidden file, not an extension.
        Some(0) | None => value,
        Some(dot) => value.get(..name_start + dot).unwrap_or(value),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder { variable: String, filters: Vec<Filter> },
}

/// A parsed path template.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use linguasync_addons::template::PathTemplate;
///
/// let template = PathTemplate::parse("{{ filename|stripext }}.mo")?;
/// let vars = BTreeMap::from([("filename", "po/de.po"), ("language_code", "de")]);
/// assert_eq!(template.render(&vars)?, "po/de.mo");
/// # Ok::<(), linguasync_addons::template::TemplateError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parses `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] for malformed placeholders, unknown
    /// variables and unknown filters.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;
        while let Some((literal, after_open)) = rest.split_once("{{") {
            let open = offset + literal.len();
            if !literal.is_empty() {
                segments.push(Segment::Literal(literal.to_owned()));
            }
            let (inner, after_close) = after_open
                .split_once("}}")
                .ok_or(TemplateError::Unterminated { offset: open })?;
            segments.push(parse_placeholder(inner, open)?);
            offset = open + inner.len() + 4;
            rest = after_close;
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_owned()));
        }
        Ok(Self {
            source: source.to_owned(),
            segments,
        })
    }

    /// Returns the template text.
    #[must_use]
    pub const fn source(&self) -> &str {
        self.source.as_str()
    }

    /// Renders the template with the given variables.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingValue`] when a referenced variable is
    /// absent from `vars`.
    pub fn render(&self, vars: &BTreeMap<&str, &str>) -> Result<String, TemplateError> {
        let mut rendered = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Placeholder { variable, filters } => {
                    let value = vars.get(variable.as_str()).ok_or_else(|| {
                        TemplateError::MissingValue {
                            name: variable.clone(),
                        }
                    })?;
                    let value = filters
                        .iter()
                        .fold((*value).to_owned(), |acc, filter| filter.apply(&acc));
                    rendered.push_str(&value);
                }
            }
        }
        Ok(rendered)
    }
}

fn parse_placeholder(inner: &str, offset: usize) -> Result<Segment, TemplateError> {
    let mut parts = inner.split('|').map(str::trim);
    let variable = parts
        .next()
        .filter(|name| !name.is_empty())
        .ok_or(TemplateError::EmptyPlaceholder { offset })?;
    if !VARIABLES.contains(&variable) {
        return Err(TemplateError::UnknownVariable {
            name: variable.to_owned(),
        });
    }
    let filters = parts.map(Filter::parse).collect::<Result<Vec<_>, _>>()?;
    Ok(Segment::Placeholder {
        variable: variable.to_owned(),
        filters,
    })
}

#[cfg(test)]
mod tests;
