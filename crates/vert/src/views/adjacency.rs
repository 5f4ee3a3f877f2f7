//! Inbound and outbound edge views of one vertex.

use vert_core::{EdgeId, VertexId};
use vert_graph::{GraphId, GraphStore};

use super::{lift, Iter};
use crate::error::Result;
use crate::handle::{EdgeHandle, EdgeRef, VertexRef};

/// The edges that enter one vertex.
///
/// # Example
///
/// ```
/// use vert::Graph;
///
/// let mut graph = Graph::in_memory();
/// graph.add_edge("a", "c")?;
/// graph.add_edge("b", "c")?;
///
/// let inbound = graph.inbound("c")?;
/// assert_eq!(inbound.len()?, 2);
/// assert!(inbound.contains(("a", "c"))?);
/// assert!(inbound.edge_from("b")?.is_some());
/// # Ok::<(), vert::Error>(())
/// ```
pub struct InboundEdges<'g, S> {
    store: &'g S,
    graph: GraphId,
    vid: VertexId,
}

impl<'g, S: GraphStore> InboundEdges<'g, S> {
    pub(crate) fn new(store: &'g S, vid: VertexId) -> Self {
        Self { store, graph: store.owner(), vid }
    }

    /// The vertex the edges enter.
    #[must_use]
    pub const fn vertex(&self) -> &VertexId {
        &self.vid
    }

    /// Whether `edge` exists and enters this vertex.
    ///
    /// # Errors
    ///
    /// Returns an error for a foreign handle or if the store cannot be read.
    pub fn contains(&self, edge: impl Into<EdgeRef>) -> Result<bool> {
        let eid = edge.into().resolve(self.graph)?;
        if eid.sink != self.vid {
            return Ok(false);
        }
        Ok(self.store.has_edge(&eid)?)
    }

    /// Every edge entering this vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn iter(&self) -> Result<Iter<'g, EdgeHandle>> {
        let store: &'g S = self.store;
        let graph = self.graph;
        let sink = self.vid.clone();
        Ok(lift(store.iter_sources(Some(&self.vid))?, move |source| {
            EdgeHandle::new(graph, EdgeId::new(source, sink.clone()))
        }))
    }

    /// The number of edges entering this vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn len(&self) -> Result<usize> {
        Ok(self.store.count_sources(Some(&self.vid))?)
    }

    /// Whether no edge enters this vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(!self.store.has_source(&self.vid)?)
    }

    /// The edge from `source` into this vertex, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error for a foreign handle or if the store cannot be read.
    pub fn edge_from(&self, source: impl Into<VertexRef>) -> Result<Option<EdgeHandle>> {
        let eid = EdgeId::new(source.into().resolve(self.graph)?, self.vid.clone());
        Ok(self.store.has_edge(&eid)?.then(|| EdgeHandle::new(self.graph, eid)))
    }
}

/// The edges that leave one vertex.
pub struct OutboundEdges<'g, S> {
    store: &'g S,
    graph: GraphId,
    vid: VertexId,
}

impl<'g, S: GraphStore> OutboundEdges<'g, S> {
    pub(crate) fn new(store: &'g S, vid: VertexId) -> Self {
        Self { store, graph: store.owner(), vid }
    }

    /// The vertex the edges leave.
    #[must_use]
    pub const fn vertex(&self) -> &VertexId {
        &self.vid
    }

    /// Whether `edge` exists and leaves this vertex.
    ///
    /// # Errors
    ///
    /// Returns an error for a foreign handle or if the store cannot be read.
    pub fn contains(&self, edge: impl Into<EdgeRef>) -> Result<bool> {
        let eid = edge.into().resolve(self.graph)?;
        if eid.source != self.vid {
            return Ok(false);
        }
        Ok(self.store.has_edge(&eid)?)
    }

    /// Every edge leaving this vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn iter(&self) -> Result<Iter<'g, EdgeHandle>> {
        let store: &'g S = self.store;
        let graph = self.graph;
        let source = self.vid.clone();
        Ok(lift(store.iter_sinks(Some(&self.vid))?, move |sink| {
            EdgeHandle::new(graph, EdgeId::new(source.clone(), sink))
        }))
    }

    /// The number of edges leaving this vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn len(&self) -> Result<usize> {
        Ok(self.store.count_sinks(Some(&self.vid))?)
    }

    /// Whether no edge leaves this vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(!self.store.has_sink(&self.vid)?)
    }

    /// The edge from this vertex into `sink`, if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error for a foreign handle or if the store cannot be read.
    pub fn edge_to(&self, sink: impl Into<VertexRef>) -> Result<Option<EdgeHandle>> {
        let eid = EdgeId::new(self.vid.clone(), sink.into().resolve(self.graph)?);
        Ok(self.store.has_edge(&eid)?.then(|| EdgeHandle::new(self.graph, eid)))
    }
}
