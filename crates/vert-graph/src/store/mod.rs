//! The contract every graph store backend satisfies.
//!
//! A [`GraphStore`] holds the vertices and directed edges of one graph, each
//! with a set of labels and a map of attributes. Backends differ only in
//! where that state lives:
//!
//! - [`MemoryGraphStore`] - adjacency sets in process memory
//! - [`PersistentGraphStore`](crate::persistent::PersistentGraphStore) -
//!   records in a key-value [`StorageEngine`](vert_storage::StorageEngine)
//!   behind a write-back cache
//!
//! # Soft and strict operations
//!
//! Every operation here is "soft": `has_*`, `count_*` and `iter_*` report
//! absence as `false`, zero or an empty sequence, and `discard_*` is a no-op
//! for something that is not there. Strict removal that fails on a missing
//! item is layered on top by callers using the returned `bool`.
//!
//! # Implicit creation
//!
//! Any write that targets a vertex or edge creates it first: adding an edge
//! adds its endpoints, and adding a label or setting an attribute adds its
//! owner.

mod error;
mod memory;
mod owner;

pub use error::{GraphError, GraphResult};
pub use memory::MemoryGraphStore;
pub use owner::GraphId;

use vert_core::{EdgeId, Label, Value, VertexId};

/// A lazy sequence produced by a store.
///
/// Items are results so a backend can report a storage failure that happens
/// partway through a scan.
pub type StoreIter<'a, T> = Box<dyn Iterator<Item = GraphResult<T>> + 'a>;

/// Build a [`StoreIter`] over values that are already in hand.
pub(crate) fn owned_iter<'a, T, I>(items: I) -> StoreIter<'a, T>
where
    T: 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
{
    Box::new(items.into_iter().map(Ok))
}

/// Storage backend for the vertices and directed edges of one graph.
pub trait GraphStore {
    /// The token of the graph this store was built for.
    fn owner(&self) -> GraphId;

    /// Whether the store can still be used.
    fn is_open(&self) -> bool {
        true
    }

    /// Shut the store down, leaving any persistent state consistent.
    ///
    /// Closing an already closed store does nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if pending state cannot be written out.
    fn close(&mut self) -> GraphResult<()> {
        Ok(())
    }

    // ------------------------------------------------------------------
    // Vertices and edges
    // ------------------------------------------------------------------

    /// The number of vertices.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn count_vertices(&self) -> GraphResult<usize>;

    /// The number of edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn count_edges(&self) -> GraphResult<usize>;

    /// Every vertex ID, in backend-defined order.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan cannot be started.
    fn iter_vertices(&self) -> GraphResult<StoreIter<'_, VertexId>>;

    /// Every edge ID, in backend-defined order.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan cannot be started.
    fn iter_edges(&self) -> GraphResult<StoreIter<'_, EdgeId>>;

    /// Whether `vid` is a vertex of the graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn has_vertex(&self, vid: &VertexId) -> GraphResult<bool>;

    /// Whether `eid` is an edge of the graph.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn has_edge(&self, eid: &EdgeId) -> GraphResult<bool>;

    /// Add a vertex. Does nothing if it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn add_vertex(&mut self, vid: &VertexId) -> GraphResult<()>;

    /// Add an edge, adding its source and sink first if they are missing.
    /// Does nothing if the edge already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn add_edge(&mut self, eid: &EdgeId) -> GraphResult<()>;

    /// Remove a vertex together with every edge into or out of it, and all
    /// labels and attributes of those.
    ///
    /// Returns `false` without changing anything if the vertex is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails. A failure partway through
    /// leaves the incident edges removed so far removed.
    fn discard_vertex(&mut self, vid: &VertexId) -> GraphResult<bool>;

    /// Remove an edge and its labels and attributes.
    ///
    /// The edge itself and the edge count are always updated: afterwards
    /// `has_edge` is `false`, `iter_edges` skips it and a second discard
    /// returns `false`. Only the adjacency of the endpoint equal to `ignore`
    /// is left untouched, so its `has_sink`/`iter_sinks` (for an ignored
    /// source) or `has_source`/`iter_sources` (for an ignored sink) still
    /// report the edge's other end until the caller drops that vertex.
    /// [`discard_vertex`](Self::discard_vertex) passes the vertex it is
    /// removing so that vertex's own adjacency is not rewritten once per
    /// incident edge.
    ///
    /// Returns `false` if the edge is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn discard_edge(&mut self, eid: &EdgeId, ignore: Option<&VertexId>) -> GraphResult<bool>;

    // ------------------------------------------------------------------
    // Adjacency
    // ------------------------------------------------------------------

    /// Whether `sink` has at least one inbound edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn has_source(&self, sink: &VertexId) -> GraphResult<bool>;

    /// Whether `source` has at least one outbound edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn has_sink(&self, source: &VertexId) -> GraphResult<bool>;

    /// The sources of the edges into `sink`.
    ///
    /// With no vertex given, every vertex that is the source of at least one
    /// edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn iter_sources(&self, sink: Option<&VertexId>) -> GraphResult<StoreIter<'_, VertexId>>;

    /// The sinks of the edges out of `source`.
    ///
    /// With no vertex given, every vertex that is the sink of at least one
    /// edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn iter_sinks(&self, source: Option<&VertexId>) -> GraphResult<StoreIter<'_, VertexId>>;

    /// The number of items [`iter_sources`](Self::iter_sources) would yield.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn count_sources(&self, sink: Option<&VertexId>) -> GraphResult<usize>;

    /// The number of items [`iter_sinks`](Self::iter_sinks) would yield.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn count_sinks(&self, source: Option<&VertexId>) -> GraphResult<usize>;

    // ------------------------------------------------------------------
    // Labels
    // ------------------------------------------------------------------

    /// Add a label to a vertex, creating the vertex if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn add_vertex_label(&mut self, vid: &VertexId, label: &Label) -> GraphResult<()>;

    /// Whether the vertex carries the label.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn has_vertex_label(&self, vid: &VertexId, label: &Label) -> GraphResult<bool>;

    /// Remove a label from a vertex. Returns whether it was there.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn discard_vertex_label(&mut self, vid: &VertexId, label: &Label) -> GraphResult<bool>;

    /// The labels of a vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn iter_vertex_labels(&self, vid: &VertexId) -> GraphResult<StoreIter<'_, Label>>;

    /// The number of labels on a vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn count_vertex_labels(&self, vid: &VertexId) -> GraphResult<usize>;

    /// Add a label to an edge, creating the edge if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn add_edge_label(&mut self, eid: &EdgeId, label: &Label) -> GraphResult<()>;

    /// Whether the edge carries the label.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn has_edge_label(&self, eid: &EdgeId, label: &Label) -> GraphResult<bool>;

    /// Remove a label from an edge. Returns whether it was there.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn discard_edge_label(&mut self, eid: &EdgeId, label: &Label) -> GraphResult<bool>;

    /// The labels of an edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn iter_edge_labels(&self, eid: &EdgeId) -> GraphResult<StoreIter<'_, Label>>;

    /// The number of labels on an edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn count_edge_labels(&self, eid: &EdgeId) -> GraphResult<usize>;

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    /// The value stored under `key` on a vertex, or `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_vertex_data(&self, vid: &VertexId, key: &str) -> GraphResult<Option<Value>>;

    /// Store a value under `key` on a vertex, creating the vertex if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails, or if a persistent backend
    /// cannot encode the value.
    fn set_vertex_data(&mut self, vid: &VertexId, key: &str, value: Value) -> GraphResult<()>;

    /// Whether a vertex has a value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn has_vertex_data(&self, vid: &VertexId, key: &str) -> GraphResult<bool>;

    /// Remove the value under `key` from a vertex. Returns whether it was there.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn discard_vertex_data(&mut self, vid: &VertexId, key: &str) -> GraphResult<bool>;

    /// The attribute keys of a vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn iter_vertex_data_keys(&self, vid: &VertexId) -> GraphResult<StoreIter<'_, String>>;

    /// The number of attributes on a vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn count_vertex_data_keys(&self, vid: &VertexId) -> GraphResult<usize>;

    /// The value stored under `key` on an edge, or `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_edge_data(&self, eid: &EdgeId, key: &str) -> GraphResult<Option<Value>>;

    /// Store a value under `key` on an edge, creating the edge if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails, or if a persistent backend
    /// cannot encode the value.
    fn set_edge_data(&mut self, eid: &EdgeId, key: &str, value: Value) -> GraphResult<()>;

    /// Whether an edge has a value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn has_edge_data(&self, eid: &EdgeId, key: &str) -> GraphResult<bool>;

    /// Remove the value under `key` from an edge. Returns whether it was there.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn discard_edge_data(&mut self, eid: &EdgeId, key: &str) -> GraphResult<bool>;

    /// The attribute keys of an edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn iter_edge_data_keys(&self, eid: &EdgeId) -> GraphResult<StoreIter<'_, String>>;

    /// The number of attributes on an edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn count_edge_data_keys(&self, eid: &EdgeId) -> GraphResult<usize>;
}
