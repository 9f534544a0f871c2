//! Dotted field paths.

use std::fmt;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// A path into a document, split from a dotted key such as `repository.owner.login`.
///
/// Splitting is literal: empty segments are kept, so `"a..b"` has three
/// segments and `""` has one empty segment.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Split a dotted key into segments.
    pub fn parse(key: &str) -> Self {
        Self {
            segments: key.split(PATH_SEPARATOR).map(str::to_owned).collect(),
        }
    }

    /// Build a path from already-split segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Split into the parent segments and the final segment.
    pub fn split_last(&self) -> Option<(&String, &[String])> {
        self.segments.split_last()
    }
}

impl fmt::Debug for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldPath({})", self)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
