//! Labels attached to vertices and edges.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A membership-only tag on a vertex or an edge.
///
/// Each vertex and edge carries a duplicate-free set of labels. Labels have no
/// associated value; use attributes for key/value data.
///
/// # Example
///
/// ```
/// use vert_core::Label;
///
/// let label = Label::new("person");
/// assert_eq!(label.as_str(), "person");
///
/// let label: Label = "company".into();
/// assert_eq!(label.to_string(), "company");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Create a new label.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the label name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Label {
    #[inline]
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
