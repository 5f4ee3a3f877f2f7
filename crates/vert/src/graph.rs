//! The graph handle.
//!
//! This module provides [`Graph`], the entry point for working with a graph
//! regardless of where its store keeps the data.
//!
//! # Examples
//!
//! ```
//! use vert::{AttributeMap, Graph, LabelSet};
//!
//! let mut graph = Graph::in_memory();
//!
//! let knows = graph.add_edge("alice", "bob")?;
//! graph.edge_labels(&knows)?.add("knows")?;
//! graph.vertex_data(knows.source())?.insert("name", "Alice")?;
//!
//! assert_eq!(graph.vertex_count()?, 2);
//! assert_eq!(graph.outbound("alice")?.len()?, 1);
//!
//! graph.remove_vertex("bob")?;
//! assert_eq!(graph.edge_count()?, 0);
//! assert!(graph.remove_vertex("bob").is_err());
//! # Ok::<(), vert::Error>(())
//! ```

use std::path::Path;

use vert_core::{EdgeId, VertexId};
use vert_graph::persistent::{CacheStats, PersistentGraphStore};
use vert_graph::{GraphId, GraphStore, MemoryGraphStore};
use vert_storage::backends::RedbEngine;
use vert_storage::StorageEngine;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::handle::{EdgeHandle, EdgeRef, VertexHandle, VertexRef};
use crate::views::{
    lift, EdgeData, EdgeLabels, InboundEdges, Iter, OutboundEdges, VertexData, VertexLabels,
};

/// A graph held entirely in process memory.
pub type MemoryGraph = Graph<MemoryGraphStore>;

/// A graph persisted in a storage engine, redb by default.
pub type PersistentGraph<E = RedbEngine> = Graph<PersistentGraphStore<E>>;

/// A directed graph of labelled vertices and edges with attributes.
///
/// `Graph` turns object-level operations into calls on its [`GraphStore`].
/// It adds the strict operations the store leaves out: `remove_*` fails with
/// a not-found error where `discard_*` quietly does nothing.
///
/// Vertices and edges are named by identifiers or by the handles the graph
/// returns. A handle from a different graph is rejected with
/// [`Error::ForeignHandle`].
#[derive(Debug)]
pub struct Graph<S = MemoryGraphStore> {
    store: S,
}

impl Graph<MemoryGraphStore> {
    /// Create an empty graph in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(MemoryGraphStore::new(GraphId::next()))
    }
}

impl Default for Graph<MemoryGraphStore> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl Graph<PersistentGraphStore<RedbEngine>> {
    /// Open or create a graph in a database file, with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(Config::new(path.as_ref()))
    }

    /// Open a graph with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened, or if it is missing
    /// and `create_if_missing` is off.
    pub fn open_with_config(config: Config) -> Result<Self> {
        let store =
            PersistentGraphStore::open(&config.path, GraphId::next(), config.store_config())?;
        Ok(Self::from_store(store))
    }
}

impl<E: StorageEngine> Graph<PersistentGraphStore<E>> {
    /// Write every cached record back to the storage engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be written.
    pub fn flush(&mut self) -> Result<()> {
        Ok(self.store.flush()?)
    }

    /// Counters of the store's write-back caches.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.store.cache_stats()
    }
}

impl<S: GraphStore> Graph<S> {
    /// Wrap an existing store.
    ///
    /// The graph takes the store's owner token as its own identity.
    #[must_use]
    pub fn from_store(store: S) -> Self {
        Self { store }
    }

    /// The identity token of this graph.
    #[must_use]
    pub fn id(&self) -> GraphId {
        self.store.owner()
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Unwrap the underlying store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Whether the store can still be used.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.store.is_open()
    }

    /// Close the store. Closing twice does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if pending writes cannot be completed.
    pub fn close(&mut self) -> Result<()> {
        Ok(self.store.close()?)
    }

    fn vertex_id(&self, vertex: impl Into<VertexRef>) -> Result<VertexId> {
        vertex.into().resolve(self.id())
    }

    fn edge_id(&self, edge: impl Into<EdgeRef>) -> Result<EdgeId> {
        edge.into().resolve(self.id())
    }

    // ------------------------------------------------------------------
    // Vertices
    // ------------------------------------------------------------------

    /// A handle to `vertex`, whether or not it exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForeignHandle`] for a handle from another graph.
    pub fn vertex(&self, vertex: impl Into<VertexRef>) -> Result<VertexHandle> {
        Ok(VertexHandle::new(self.id(), self.vertex_id(vertex)?))
    }

    /// Add a vertex if it is not present and return its handle.
    ///
    /// # Errors
    ///
    /// Returns an error for a foreign handle or if the store cannot be
    /// written.
    pub fn add_vertex(&mut self, vertex: impl Into<VertexRef>) -> Result<VertexHandle> {
        let vid = self.vertex_id(vertex)?;
        self.store.add_vertex(&vid)?;
        Ok(VertexHandle::new(self.id(), vid))
    }

    /// Whether the vertex exists.
    ///
    /// # Errors
    ///
    /// Returns an error for a foreign handle or if the store cannot be read.
    pub fn contains_vertex(&self, vertex: impl Into<VertexRef>) -> Result<bool> {
        Ok(self.store.has_vertex(&self.vertex_id(vertex)?)?)
    }

    /// Remove a vertex that must exist, together with its edges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VertexNotFound`] if the vertex does not exist.
    pub fn remove_vertex(&mut self, vertex: impl Into<VertexRef>) -> Result<()> {
        let vid = self.vertex_id(vertex)?;
        if self.store.discard_vertex(&vid)? {
            Ok(())
        } else {
            Err(Error::VertexNotFound(vid))
        }
    }

    /// Remove a vertex and its edges if it exists. Returns whether it did.
    ///
    /// # Errors
    ///
    /// Returns an error for a foreign handle or if the store cannot be
    /// written.
    pub fn discard_vertex(&mut self, vertex: impl Into<VertexRef>) -> Result<bool> {
        let vid = self.vertex_id(vertex)?;
        Ok(self.store.discard_vertex(&vid)?)
    }

    /// The number of vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn vertex_count(&self) -> Result<usize> {
        Ok(self.store.count_vertices()?)
    }

    /// Every vertex, in store order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn vertices(&self) -> Result<Iter<'_, VertexHandle>> {
        let graph = self.id();
        Ok(lift(self.store.iter_vertices()?, move |vid| VertexHandle::new(graph, vid)))
    }

    /// Every vertex with at least one outbound edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn sources(&self) -> Result<Iter<'_, VertexHandle>> {
        let graph = self.id();
        Ok(lift(self.store.iter_sources(None)?, move |vid| VertexHandle::new(graph, vid)))
    }

    /// Every vertex with at least one inbound edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn sinks(&self) -> Result<Iter<'_, VertexHandle>> {
        let graph = self.id();
        Ok(lift(self.store.iter_sinks(None)?, move |vid| VertexHandle::new(graph, vid)))
    }

    /// The labels of a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForeignHandle`] for a handle from another graph.
    pub fn vertex_labels(&mut self, vertex: impl Into<VertexRef>) -> Result<VertexLabels<'_, S>> {
        let vid = self.vertex_id(vertex)?;
        Ok(VertexLabels::new(&mut self.store, vid))
    }

    /// The attributes of a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForeignHandle`] for a handle from another graph.
    pub fn vertex_data(&mut self, vertex: impl Into<VertexRef>) -> Result<VertexData<'_, S>> {
        let vid = self.vertex_id(vertex)?;
        Ok(VertexData::new(&mut self.store, vid))
    }

    /// The edges entering a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForeignHandle`] for a handle from another graph.
    pub fn inbound(&self, vertex: impl Into<VertexRef>) -> Result<InboundEdges<'_, S>> {
        Ok(InboundEdges::new(&self.store, self.vertex_id(vertex)?))
    }

    /// The edges leaving a vertex.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForeignHandle`] for a handle from another graph.
    pub fn outbound(&self, vertex: impl Into<VertexRef>) -> Result<OutboundEdges<'_, S>> {
        Ok(OutboundEdges::new(&self.store, self.vertex_id(vertex)?))
    }

    // ------------------------------------------------------------------
    // Edges
    // ------------------------------------------------------------------

    /// A handle to `edge`, whether or not it exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForeignHandle`] for a handle from another graph.
    pub fn edge(&self, edge: impl Into<EdgeRef>) -> Result<EdgeHandle> {
        Ok(EdgeHandle::new(self.id(), self.edge_id(edge)?))
    }

    /// Add the edge from `source` to `sink`, creating missing endpoints, and
    /// return its handle.
    ///
    /// # Errors
    ///
    /// Returns an error for a foreign handle or if the store cannot be
    /// written.
    pub fn add_edge(
        &mut self,
        source: impl Into<VertexRef>,
        sink: impl Into<VertexRef>,
    ) -> Result<EdgeHandle> {
        let eid = EdgeId::new(self.vertex_id(source)?, self.vertex_id(sink)?);
        self.insert_edge(eid)
    }

    /// Add an edge given as one identifier or handle.
    ///
    /// # Errors
    ///
    /// Returns an error for a foreign handle or if the store cannot be
    /// written.
    pub fn insert_edge(&mut self, edge: impl Into<EdgeRef>) -> Result<EdgeHandle> {
        let eid = self.edge_id(edge)?;
        self.store.add_edge(&eid)?;
        Ok(EdgeHandle::new(self.id(), eid))
    }

    /// Whether the edge exists.
    ///
    /// # Errors
    ///
    /// Returns an error for a foreign handle or if the store cannot be read.
    pub fn contains_edge(&self, edge: impl Into<EdgeRef>) -> Result<bool> {
        Ok(self.store.has_edge(&self.edge_id(edge)?)?)
    }

    /// Remove an edge that must exist. Its endpoints stay.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EdgeNotFound`] if the edge does not exist.
    pub fn remove_edge(&mut self, edge: impl Into<EdgeRef>) -> Result<()> {
        let eid = self.edge_id(edge)?;
        if self.store.discard_edge(&eid, None)? {
            Ok(())
        } else {
            Err(Error::EdgeNotFound(eid))
        }
    }

    /// Remove an edge if it exists. Returns whether it did.
    ///
    /// # Errors
    ///
    /// Returns an error for a foreign handle or if the store cannot be
    /// written.
    pub fn discard_edge(&mut self, edge: impl Into<EdgeRef>) -> Result<bool> {
        let eid = self.edge_id(edge)?;
        Ok(self.store.discard_edge(&eid, None)?)
    }

    /// The number of edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn edge_count(&self) -> Result<usize> {
        Ok(self.store.count_edges()?)
    }

    /// Every edge, in store order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn edges(&self) -> Result<Iter<'_, EdgeHandle>> {
        let graph = self.id();
        Ok(lift(self.store.iter_edges()?, move |eid| EdgeHandle::new(graph, eid)))
    }

    /// The labels of an edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForeignHandle`] for a handle from another graph.
    pub fn edge_labels(&mut self, edge: impl Into<EdgeRef>) -> Result<EdgeLabels<'_, S>> {
        let eid = self.edge_id(edge)?;
        Ok(EdgeLabels::new(&mut self.store, eid))
    }

    /// The attributes of an edge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ForeignHandle`] for a handle from another graph.
    pub fn edge_data(&mut self, edge: impl Into<EdgeRef>) -> Result<EdgeData<'_, S>> {
        let eid = self.edge_id(edge)?;
        Ok(EdgeData::new(&mut self.store, eid))
    }
}
