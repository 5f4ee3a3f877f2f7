//! Error types for graph store operations.

use thiserror::Error;
use vert_core::{CoreError, EdgeId, VertexId};
use vert_storage::StorageError;

/// Errors that can occur in graph store operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A vertex was not found.
    #[error("vertex not found: {0}")]
    VertexNotFound(VertexId),

    /// An edge was not found.
    #[error("edge not found: {0}")]
    EdgeNotFound(EdgeId),

    /// The store was used after it was closed.
    #[error("graph store is closed")]
    Closed,

    /// An encoding or decoding error occurred.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// A storage backend error occurred.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Data corruption detected in storage.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl GraphError {
    /// Returns `true` if the error is a missing vertex or edge.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::VertexNotFound(_) | Self::EdgeNotFound(_))
    }
}

impl From<CoreError> for GraphError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Encoding(msg) => Self::Encoding(msg),
            // Keys are only decoded from what the store wrote itself
            CoreError::InvalidKey { key, reason } => {
                Self::DataCorruption(format!("invalid key {key}: {reason}"))
            }
        }
    }
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
