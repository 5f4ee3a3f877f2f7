//! Label views.

use vert_core::{EdgeId, Label, VertexId};
use vert_graph::GraphStore;

use super::{lift, Iter, LabelSet};
use crate::error::Result;

/// The labels of one vertex.
///
/// # Example
///
/// ```
/// use vert::{Graph, LabelSet};
///
/// let mut graph = Graph::in_memory();
/// let mut labels = graph.vertex_labels("alice")?;
/// labels.add("person")?;
/// assert!(labels.contains(&"person".into())?);
/// assert!(labels.remove(&"robot".into()).is_err());
/// # Ok::<(), vert::Error>(())
/// ```
pub struct VertexLabels<'g, S> {
    store: &'g mut S,
    vid: VertexId,
}

impl<'g, S: GraphStore> VertexLabels<'g, S> {
    pub(crate) fn new(store: &'g mut S, vid: VertexId) -> Self {
        Self { store, vid }
    }

    /// The vertex whose labels these are.
    #[must_use]
    pub const fn vertex(&self) -> &VertexId {
        &self.vid
    }
}

impl<S: GraphStore> LabelSet for VertexLabels<'_, S> {
    fn contains(&self, label: &Label) -> Result<bool> {
        Ok(self.store.has_vertex_label(&self.vid, label)?)
    }

    fn iter(&self) -> Result<Iter<'_, Label>> {
        Ok(lift(self.store.iter_vertex_labels(&self.vid)?, |label| label))
    }

    fn len(&self) -> Result<usize> {
        Ok(self.store.count_vertex_labels(&self.vid)?)
    }

    fn add(&mut self, label: impl Into<Label>) -> Result<()> {
        Ok(self.store.add_vertex_label(&self.vid, &label.into())?)
    }

    fn discard(&mut self, label: &Label) -> Result<bool> {
        Ok(self.store.discard_vertex_label(&self.vid, label)?)
    }
}

/// The labels of one edge.
pub struct EdgeLabels<'g, S> {
    store: &'g mut S,
    eid: EdgeId,
}

impl<'g, S: GraphStore> EdgeLabels<'g, S> {
    pub(crate) fn new(store: &'g mut S, eid: EdgeId) -> Self {
        Self { store, eid }
    }

    /// The edge whose labels these are.
    #[must_use]
    pub const fn edge(&self) -> &EdgeId {
        &self.eid
    }
}

impl<S: GraphStore> LabelSet for EdgeLabels<'_, S> {
    fn contains(&self, label: &Label) -> Result<bool> {
        Ok(self.store.has_edge_label(&self.eid, label)?)
    }

    fn iter(&self) -> Result<Iter<'_, Label>> {
        Ok(lift(self.store.iter_edge_labels(&self.eid)?, |label| label))
    }

    fn len(&self) -> Result<usize> {
        Ok(self.store.count_edge_labels(&self.eid)?)
    }

    fn add(&mut self, label: impl Into<Label>) -> Result<()> {
        Ok(self.store.add_edge_label(&self.eid, &label.into())?)
    }

    fn discard(&mut self, label: &Label) -> Result<bool> {
        Ok(self.store.discard_edge_label(&self.eid, label)?)
    }
}
