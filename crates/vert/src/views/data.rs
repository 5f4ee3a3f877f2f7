//! Attribute views.

use vert_core::{EdgeId, Value, VertexId};
use vert_graph::GraphStore;

use super::{lift, AttributeMap, Iter};
use crate::error::Result;

/// The attributes of one vertex.
///
/// # Example
///
/// ```
/// use vert::{AttributeMap, Graph, Value};
///
/// let mut graph = Graph::in_memory();
/// let mut data = graph.vertex_data("alice")?;
/// data.insert("age", 30i64)?;
///
/// assert_eq!(data.get("age")?, Some(Value::Int(30)));
/// assert_eq!(data.get("email")?, None);
/// assert!(data.get_strict("email").is_err());
/// # Ok::<(), vert::Error>(())
/// ```
pub struct VertexData<'g, S> {
    store: &'g mut S,
    vid: VertexId,
}

impl<'g, S: GraphStore> VertexData<'g, S> {
    pub(crate) fn new(store: &'g mut S, vid: VertexId) -> Self {
        Self { store, vid }
    }

    /// The vertex whose attributes these are.
    #[must_use]
    pub const fn vertex(&self) -> &VertexId {
        &self.vid
    }
}

impl<S: GraphStore> AttributeMap for VertexData<'_, S> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.store.get_vertex_data(&self.vid, key)?)
    }

    fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.store.has_vertex_data(&self.vid, key)?)
    }

    fn insert(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        Ok(self.store.set_vertex_data(&self.vid, key, value.into())?)
    }

    fn discard(&mut self, key: &str) -> Result<bool> {
        Ok(self.store.discard_vertex_data(&self.vid, key)?)
    }

    fn keys(&self) -> Result<Iter<'_, String>> {
        Ok(lift(self.store.iter_vertex_data_keys(&self.vid)?, |key| key))
    }

    fn len(&self) -> Result<usize> {
        Ok(self.store.count_vertex_data_keys(&self.vid)?)
    }
}

/// The attributes of one edge.
pub struct EdgeData<'g, S> {
    store: &'g mut S,
    eid: EdgeId,
}

impl<'g, S: GraphStore> EdgeData<'g, S> {
    pub(crate) fn new(store: &'g mut S, eid: EdgeId) -> Self {
        Self { store, eid }
    }

    /// The edge whose attributes these are.
    #[must_use]
    pub const fn edge(&self) -> &EdgeId {
        &self.eid
    }
}

impl<S: GraphStore> AttributeMap for EdgeData<'_, S> {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.store.get_edge_data(&self.eid, key)?)
    }

    fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.store.has_edge_data(&self.eid, key)?)
    }

    fn insert(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        Ok(self.store.set_edge_data(&self.eid, key, value.into())?)
    }

    fn discard(&mut self, key: &str) -> Result<bool> {
        Ok(self.store.discard_edge_data(&self.eid, key)?)
    }

    fn keys(&self) -> Result<Iter<'_, String>> {
        Ok(lift(self.store.iter_edge_data_keys(&self.eid)?, |key| key))
    }

    fn len(&self) -> Result<usize> {
        Ok(self.store.count_edge_data_keys(&self.eid)?)
    }
}
