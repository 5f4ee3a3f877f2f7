//! Error types for `vert`.
//!
//! This module provides the [`enum@Error`] type returned by every graph
//! operation.

use thiserror::Error;
use vert_core::{EdgeId, Label, VertexId};
use vert_graph::{GraphError, GraphId};

/// Errors that can occur when using a `vert` graph.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying store failed.
    #[error("graph store error: {0}")]
    Graph(#[from] GraphError),

    /// A vertex was not found when required.
    #[error("vertex not found: {0}")]
    VertexNotFound(VertexId),

    /// An edge was not found when required.
    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// A label was not attached where it was required.
    #[error("label not found: {0}")]
    LabelNotFound(Label),

    /// An attribute key was not set where it was required.
    #[error("attribute not found: {0:?}")]
    AttributeNotFound(String),

    /// A handle created by one graph was passed to another.
    #[error("handle belongs to {found}, not {expected}")]
    ForeignHandle {
        /// The graph the operation was invoked on.
        expected: GraphId,
        /// The graph the handle came from.
        found: GraphId,
    },
}

impl Error {
    /// Returns `true` for the strict-operation not-found variants, including
    /// those reported by the store itself.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        match self {
            Self::Graph(e) => e.is_not_found(),
            Self::VertexNotFound(_)
            | Self::EdgeNotFound(_)
            | Self::LabelNotFound(_)
            | Self::AttributeNotFound(_) => true,
            Self::ForeignHandle { .. } => false,
        }
    }
}

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(Error::VertexNotFound(VertexId::from(1)).is_not_found());
        assert!(Error::AttributeNotFound("k".into()).is_not_found());
        assert!(!Error::Graph(GraphError::Closed).is_not_found());
        assert!(!Error::ForeignHandle { expected: GraphId::next(), found: GraphId::next() }
            .is_not_found());
    }

    #[test]
    fn test_display() {
        let err = Error::LabelNotFound(Label::new("red"));
        assert_eq!(err.to_string(), "label not found: red");
    }
}
