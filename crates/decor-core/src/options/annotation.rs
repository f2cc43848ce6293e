//! Annotations attached to option tokens.

use std::fmt;

/// A comment attached to one token of an option line.
///
/// The index is signed and unchecked: an index that does not name a token
/// (negative, or past the last token) is still a valid annotation and is
/// drawn past the end of the line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    index: isize,
    comment: String,
}

impl Annotation {
    /// Create an annotation for the token at `index`.
    pub fn new(index: isize, comment: impl Into<String>) -> Self {
        Self {
            index,
            comment: comment.into(),
        }
    }

    /// Get the token index this annotation points at.
    pub fn index(&self) -> isize {
        self.index
    }

    /// Get the comment text.
    pub fn comment(&self) -> &str {
        &self.comment
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.index, self.comment)
    }
}
