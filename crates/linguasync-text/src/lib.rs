//! Line-oriented editors for gettext translation trees.
//!
//! The `linguasync-text` crate holds the pure text algorithms used by the
//! synchronisation addons. Every editor operates on a [`LineDocument`], the
//! ordered list of raw lines read from a file (trailing newlines included),
//! and returns a [`Reconciliation`] describing whether anything changed.
//! A reconciliation that reports no change guarantees the caller has nothing
//! to write.
//!
//! - [`linguas`] reconciles a `LINGUAS` file against a set of language codes.
//! - [`assignment`] rewrites a `KEY="value"` line such as `ALL_LINGUAS`.
//! - [`potfiles`] parses a `POTFILES.in` manifest into repository paths.
//! - [`pot_diff`] compares generated templates, ignoring the creation date.
//! - [`contributors`] maintains the contributor lines of a PO header.
//!
//! ```
//! use std::collections::BTreeSet;
//! use linguasync_text::{LineDocument, linguas};
//!
//! let document = LineDocument::parse("# languages\nde\n");
//! let desired: BTreeSet<String> = ["de", "fr"].into_iter().map(String::from).collect();
//! let result = linguas::reconcile(document.into_lines(), &desired);
//! assert!(result.changed());
//! assert_eq!(result.to_text(), "# languages\nde\nfr\n");
//! ```

pub mod assignment;
pub mod contributors;
mod document;
mod error;
pub mod linguas;
pub mod pot_diff;
pub mod potfiles;

pub use self::document::{LineDocument, Reconciliation, write_atomically};
pub use self::error::TextError;
