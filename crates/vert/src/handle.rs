//! Vertex and edge handles, and the references graph operations accept.
//!
//! A handle is an identifier bound to the graph that produced it. Operations
//! take either a bare identifier or a handle through [`VertexRef`] and
//! [`EdgeRef`]; a handle from another graph is rejected with
//! [`Error::ForeignHandle`].

use std::fmt;

use vert_core::{EdgeId, VertexId};
use vert_graph::GraphId;

use crate::error::{Error, Result};

/// A vertex identifier bound to its graph.
///
/// Holding a handle does not keep the vertex alive; the vertex may be
/// discarded while handles to it remain.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexHandle {
    graph: GraphId,
    id: VertexId,
}

impl VertexHandle {
    pub(crate) const fn new(graph: GraphId, id: VertexId) -> Self {
        Self { graph, id }
    }

    /// The graph this handle belongs to.
    #[must_use]
    pub const fn graph(&self) -> GraphId {
        self.graph
    }

    /// The vertex identifier.
    #[must_use]
    pub const fn id(&self) -> &VertexId {
        &self.id
    }

    /// Unwrap the vertex identifier.
    #[must_use]
    pub fn into_id(self) -> VertexId {
        self.id
    }
}

impl fmt::Display for VertexHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.graph, self.id)
    }
}

/// An edge identifier bound to its graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeHandle {
    graph: GraphId,
    id: EdgeId,
}

impl EdgeHandle {
    pub(crate) const fn new(graph: GraphId, id: EdgeId) -> Self {
        Self { graph, id }
    }

    /// The graph this handle belongs to.
    #[must_use]
    pub const fn graph(&self) -> GraphId {
        self.graph
    }

    /// The edge identifier.
    #[must_use]
    pub const fn id(&self) -> &EdgeId {
        &self.id
    }

    /// Unwrap the edge identifier.
    #[must_use]
    pub fn into_id(self) -> EdgeId {
        self.id
    }

    /// A handle to the vertex the edge leaves.
    #[must_use]
    pub fn source(&self) -> VertexHandle {
        VertexHandle::new(self.graph, self.id.source.clone())
    }

    /// A handle to the vertex the edge enters.
    #[must_use]
    pub fn sink(&self) -> VertexHandle {
        VertexHandle::new(self.graph, self.id.sink.clone())
    }
}

impl fmt::Display for EdgeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.graph, self.id)
    }
}

/// Either a bare vertex identifier or a handle to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VertexRef {
    /// A bare identifier, valid in any graph.
    Id(VertexId),
    /// A handle, valid only in the graph that produced it.
    Handle(VertexHandle),
}

impl VertexRef {
    /// Resolve to an identifier for use in the graph `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForeignHandle`] for a handle from another graph.
    pub fn resolve(self, owner: GraphId) -> Result<VertexId> {
        match self {
            Self::Id(id) => Ok(id),
            Self::Handle(handle) if handle.graph == owner => Ok(handle.id),
            Self::Handle(handle) => {
                Err(Error::ForeignHandle { expected: owner, found: handle.graph })
            }
        }
    }
}

impl From<VertexId> for VertexRef {
    fn from(id: VertexId) -> Self {
        Self::Id(id)
    }
}

impl From<&VertexId> for VertexRef {
    fn from(id: &VertexId) -> Self {
        Self::Id(id.clone())
    }
}

impl From<VertexHandle> for VertexRef {
    fn from(handle: VertexHandle) -> Self {
        Self::Handle(handle)
    }
}

impl From<&VertexHandle> for VertexRef {
    fn from(handle: &VertexHandle) -> Self {
        Self::Handle(handle.clone())
    }
}

impl From<i64> for VertexRef {
    fn from(id: i64) -> Self {
        Self::Id(id.into())
    }
}

impl From<i32> for VertexRef {
    fn from(id: i32) -> Self {
        Self::Id(id.into())
    }
}

impl From<&str> for VertexRef {
    fn from(id: &str) -> Self {
        Self::Id(id.into())
    }
}

impl From<String> for VertexRef {
    fn from(id: String) -> Self {
        Self::Id(id.into())
    }
}

impl From<Vec<u8>> for VertexRef {
    fn from(id: Vec<u8>) -> Self {
        Self::Id(id.into())
    }
}

/// Either a bare edge identifier or a handle to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeRef {
    /// A bare identifier, valid in any graph.
    Id(EdgeId),
    /// A handle, valid only in the graph that produced it.
    Handle(EdgeHandle),
}

impl EdgeRef {
    /// Resolve to an identifier for use in the graph `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForeignHandle`] for a handle from another graph.
    pub fn resolve(self, owner: GraphId) -> Result<EdgeId> {
        match self {
            Self::Id(id) => Ok(id),
            Self::Handle(handle) if handle.graph == owner => Ok(handle.id),
            Self::Handle(handle) => {
                Err(Error::ForeignHandle { expected: owner, found: handle.graph })
            }
        }
    }
}

impl From<EdgeId> for EdgeRef {
    fn from(id: EdgeId) -> Self {
        Self::Id(id)
    }
}

impl From<&EdgeId> for EdgeRef {
    fn from(id: &EdgeId) -> Self {
        Self::Id(id.clone())
    }
}

impl From<EdgeHandle> for EdgeRef {
    fn from(handle: EdgeHandle) -> Self {
        Self::Handle(handle)
    }
}

impl From<&EdgeHandle> for EdgeRef {
    fn from(handle: &EdgeHandle) -> Self {
        Self::Handle(handle.clone())
    }
}

impl<A: Into<VertexId>, B: Into<VertexId>> From<(A, B)> for EdgeRef {
    fn from((source, sink): (A, B)) -> Self {
        Self::Id(EdgeId::new(source, sink))
    }
}
