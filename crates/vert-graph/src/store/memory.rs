//! In-memory graph store built on adjacency sets.

use std::collections::{HashMap, HashSet};

use vert_core::{EdgeId, Label, Value, VertexId};

use super::{owned_iter, GraphId, GraphResult, GraphStore, StoreIter};

/// A non-persistent graph store designed for sparse graphs.
///
/// Every vertex has an entry in both the forward (vertex to sinks) and the
/// backward (vertex to sources) adjacency maps, so the forward map doubles as
/// the vertex set. Edge existence and the edge count come from a separate
/// edge set that `ignore` in [`discard_edge`](GraphStore::discard_edge)
/// never skips. Label and attribute maps only hold entries for owners that
/// have at least one label or attribute; emptied entries are pruned at once.
///
/// All point operations are O(1) amortized; removing a vertex is O(degree).
///
/// # Example
///
/// ```
/// use vert_core::{EdgeId, VertexId};
/// use vert_graph::{GraphId, GraphStore, MemoryGraphStore};
///
/// let mut store = MemoryGraphStore::new(GraphId::next());
/// store.add_edge(&EdgeId::new("a", "b"))?;
///
/// assert_eq!(store.count_vertices()?, 2);
/// assert_eq!(store.count_sinks(Some(&VertexId::from("a")))?, 1);
/// # Ok::<(), vert_graph::GraphError>(())
/// ```
#[derive(Debug)]
pub struct MemoryGraphStore {
    owner: GraphId,
    forward: HashMap<VertexId, HashSet<VertexId>>,
    backward: HashMap<VertexId, HashSet<VertexId>>,
    vertex_labels: HashMap<VertexId, HashSet<Label>>,
    edge_labels: HashMap<EdgeId, HashSet<Label>>,
    vertex_data: HashMap<VertexId, HashMap<String, Value>>,
    edge_data: HashMap<EdgeId, HashMap<String, Value>>,
    edges: HashSet<EdgeId>,
}

impl MemoryGraphStore {
    /// Create an empty store for the graph identified by `owner`.
    #[must_use]
    pub fn new(owner: GraphId) -> Self {
        Self {
            owner,
            forward: HashMap::new(),
            backward: HashMap::new(),
            vertex_labels: HashMap::new(),
            edge_labels: HashMap::new(),
            vertex_data: HashMap::new(),
            edge_data: HashMap::new(),
            edges: HashSet::new(),
        }
    }

}

/// Remove `item` from the set stored under `owner`, dropping the set once
/// it is empty.
fn discard_pruned<K, T>(map: &mut HashMap<K, HashSet<T>>, owner: &K, item: &T) -> bool
where
    K: Eq + std::hash::Hash,
    T: Eq + std::hash::Hash,
{
    let Some(items) = map.get_mut(owner) else {
        return false;
    };
    let removed = items.remove(item);
    if items.is_empty() {
        map.remove(owner);
    }
    removed
}

/// Remove `key` from the attribute map stored under `owner`, dropping the map
/// once it is empty.
fn discard_data_pruned<K>(map: &mut HashMap<K, HashMap<String, Value>>, owner: &K, key: &str) -> bool
where
    K: Eq + std::hash::Hash,
{
    let Some(data) = map.get_mut(owner) else {
        return false;
    };
    let removed = data.remove(key).is_some();
    if data.is_empty() {
        map.remove(owner);
    }
    removed
}

impl GraphStore for MemoryGraphStore {
    fn owner(&self) -> GraphId {
        self.owner
    }

    fn count_vertices(&self) -> GraphResult<usize> {
        Ok(self.forward.len())
    }

    fn count_edges(&self) -> GraphResult<usize> {
        Ok(self.edges.len())
    }

    fn iter_vertices(&self) -> GraphResult<StoreIter<'_, VertexId>> {
        Ok(owned_iter(self.forward.keys().cloned()))
    }

    fn iter_edges(&self) -> GraphResult<StoreIter<'_, EdgeId>> {
        Ok(owned_iter(self.edges.iter().cloned()))
    }

    fn has_vertex(&self, vid: &VertexId) -> GraphResult<bool> {
        Ok(self.forward.contains_key(vid))
    }

    fn has_edge(&self, eid: &EdgeId) -> GraphResult<bool> {
        Ok(self.edges.contains(eid))
    }

    fn add_vertex(&mut self, vid: &VertexId) -> GraphResult<()> {
        if !self.forward.contains_key(vid) {
            self.forward.insert(vid.clone(), HashSet::new());
            self.backward.insert(vid.clone(), HashSet::new());
        }
        Ok(())
    }

    fn add_edge(&mut self, eid: &EdgeId) -> GraphResult<()> {
        if self.edges.contains(eid) {
            return Ok(());
        }
        self.add_vertex(&eid.source)?;
        self.add_vertex(&eid.sink)?;
        self.forward.entry(eid.source.clone()).or_default().insert(eid.sink.clone());
        self.backward.entry(eid.sink.clone()).or_default().insert(eid.source.clone());
        self.edges.insert(eid.clone());
        Ok(())
    }

    fn discard_vertex(&mut self, vid: &VertexId) -> GraphResult<bool> {
        let (Some(sinks), Some(sources)) = (self.forward.get(vid), self.backward.get(vid)) else {
            return Ok(false);
        };
        // discard_edge mutates the neighbours' sets, so walk copies
        let sinks: Vec<VertexId> = sinks.iter().cloned().collect();
        let sources: Vec<VertexId> = sources.iter().filter(|s| *s != vid).cloned().collect();

        for sink in sinks {
            self.discard_edge(&EdgeId::new(vid.clone(), sink), Some(vid))?;
        }
        for source in sources {
            self.discard_edge(&EdgeId::new(source, vid.clone()), Some(vid))?;
        }

        self.vertex_labels.remove(vid);
        self.vertex_data.remove(vid);
        self.forward.remove(vid);
        self.backward.remove(vid);
        Ok(true)
    }

    fn discard_edge(&mut self, eid: &EdgeId, ignore: Option<&VertexId>) -> GraphResult<bool> {
        if !self.edges.remove(eid) {
            return Ok(false);
        }

        self.edge_labels.remove(eid);
        self.edge_data.remove(eid);

        if ignore != Some(&eid.source) {
            if let Some(sinks) = self.forward.get_mut(&eid.source) {
                sinks.remove(&eid.sink);
            }
        }
        if ignore != Some(&eid.sink) {
            if let Some(sources) = self.backward.get_mut(&eid.sink) {
                sources.remove(&eid.source);
            }
        }

        Ok(true)
    }

    fn has_source(&self, sink: &VertexId) -> GraphResult<bool> {
        Ok(self.backward.get(sink).is_some_and(|sources| !sources.is_empty()))
    }

    fn has_sink(&self, source: &VertexId) -> GraphResult<bool> {
        Ok(self.forward.get(source).is_some_and(|sinks| !sinks.is_empty()))
    }

    fn iter_sources(&self, sink: Option<&VertexId>) -> GraphResult<StoreIter<'_, VertexId>> {
        Ok(match sink {
            None => owned_iter(
                self.forward.iter().filter(|(_, sinks)| !sinks.is_empty()).map(|(v, _)| v.clone()),
            ),
            Some(sink) => owned_iter(self.backward.get(sink).into_iter().flatten().cloned()),
        })
    }

    fn iter_sinks(&self, source: Option<&VertexId>) -> GraphResult<StoreIter<'_, VertexId>> {
        Ok(match source {
            None => owned_iter(
                self.backward
                    .iter()
                    .filter(|(_, sources)| !sources.is_empty())
                    .map(|(v, _)| v.clone()),
            ),
            Some(source) => owned_iter(self.forward.get(source).into_iter().flatten().cloned()),
        })
    }

    fn count_sources(&self, sink: Option<&VertexId>) -> GraphResult<usize> {
        Ok(match sink {
            None => self.forward.values().filter(|sinks| !sinks.is_empty()).count(),
            Some(sink) => self.backward.get(sink).map_or(0, HashSet::len),
        })
    }

    fn count_sinks(&self, source: Option<&VertexId>) -> GraphResult<usize> {
        Ok(match source {
            None => self.backward.values().filter(|sources| !sources.is_empty()).count(),
            Some(source) => self.forward.get(source).map_or(0, HashSet::len),
        })
    }

    fn add_vertex_label(&mut self, vid: &VertexId, label: &Label) -> GraphResult<()> {
        self.add_vertex(vid)?;
        self.vertex_labels.entry(vid.clone()).or_default().insert(label.clone());
        Ok(())
    }

    fn has_vertex_label(&self, vid: &VertexId, label: &Label) -> GraphResult<bool> {
        Ok(self.vertex_labels.get(vid).is_some_and(|labels| labels.contains(label)))
    }

    fn discard_vertex_label(&mut self, vid: &VertexId, label: &Label) -> GraphResult<bool> {
        Ok(discard_pruned(&mut self.vertex_labels, vid, label))
    }

    fn iter_vertex_labels(&self, vid: &VertexId) -> GraphResult<StoreIter<'_, Label>> {
        Ok(owned_iter(self.vertex_labels.get(vid).into_iter().flatten().cloned()))
    }

    fn count_vertex_labels(&self, vid: &VertexId) -> GraphResult<usize> {
        Ok(self.vertex_labels.get(vid).map_or(0, HashSet::len))
    }

    fn add_edge_label(&mut self, eid: &EdgeId, label: &Label) -> GraphResult<()> {
        self.add_edge(eid)?;
        self.edge_labels.entry(eid.clone()).or_default().insert(label.clone());
        Ok(())
    }

    fn has_edge_label(&self, eid: &EdgeId, label: &Label) -> GraphResult<bool> {
        Ok(self.edge_labels.get(eid).is_some_and(|labels| labels.contains(label)))
    }

    fn discard_edge_label(&mut self, eid: &EdgeId, label: &Label) -> GraphResult<bool> {
        Ok(discard_pruned(&mut self.edge_labels, eid, label))
    }

    fn iter_edge_labels(&self, eid: &EdgeId) -> GraphResult<StoreIter<'_, Label>> {
        Ok(owned_iter(self.edge_labels.get(eid).into_iter().flatten().cloned()))
    }

    fn count_edge_labels(&self, eid: &EdgeId) -> GraphResult<usize> {
        Ok(self.edge_labels.get(eid).map_or(0, HashSet::len))
    }

    fn get_vertex_data(&self, vid: &VertexId, key: &str) -> GraphResult<Option<Value>> {
        Ok(self.vertex_data.get(vid).and_then(|data| data.get(key)).cloned())
    }

    fn set_vertex_data(&mut self, vid: &VertexId, key: &str, value: Value) -> GraphResult<()> {
        self.add_vertex(vid)?;
        self.vertex_data.entry(vid.clone()).or_default().insert(key.to_owned(), value);
        Ok(())
    }

    fn has_vertex_data(&self, vid: &VertexId, key: &str) -> GraphResult<bool> {
        Ok(self.vertex_data.get(vid).is_some_and(|data| data.contains_key(key)))
    }

    fn discard_vertex_data(&mut self, vid: &VertexId, key: &str) -> GraphResult<bool> {
        Ok(discard_data_pruned(&mut self.vertex_data, vid, key))
    }

    fn iter_vertex_data_keys(&self, vid: &VertexId) -> GraphResult<StoreIter<'_, String>> {
        Ok(owned_iter(self.vertex_data.get(vid).into_iter().flat_map(|data| data.keys().cloned())))
    }

    fn count_vertex_data_keys(&self, vid: &VertexId) -> GraphResult<usize> {
        Ok(self.vertex_data.get(vid).map_or(0, HashMap::len))
    }

    fn get_edge_data(&self, eid: &EdgeId, key: &str) -> GraphResult<Option<Value>> {
        Ok(self.edge_data.get(eid).and_then(|data| data.get(key)).cloned())
    }

    fn set_edge_data(&mut self, eid: &EdgeId, key: &str, value: Value) -> GraphResult<()> {
        self.add_edge(eid)?;
        self.edge_data.entry(eid.clone()).or_default().insert(key.to_owned(), value);
        Ok(())
    }

    fn has_edge_data(&self, eid: &EdgeId, key: &str) -> GraphResult<bool> {
        Ok(self.edge_data.get(eid).is_some_and(|data| data.contains_key(key)))
    }

    fn discard_edge_data(&mut self, eid: &EdgeId, key: &str) -> GraphResult<bool> {
        Ok(discard_data_pruned(&mut self.edge_data, eid, key))
    }

    fn iter_edge_data_keys(&self, eid: &EdgeId) -> GraphResult<StoreIter<'_, String>> {
        Ok(owned_iter(self.edge_data.get(eid).into_iter().flat_map(|data| data.keys().cloned())))
    }

    fn count_edge_data_keys(&self, eid: &EdgeId) -> GraphResult<usize> {
        Ok(self.edge_data.get(eid).map_or(0, HashMap::len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryGraphStore {
        MemoryGraphStore::new(GraphId::next())
    }

    #[test]
    fn test_adjacency_stays_symmetric() {
        let mut store = store();
        store.add_edge(&EdgeId::new(1, 2)).expect("add");
        store.add_edge(&EdgeId::new(2, 3)).expect("add");
        store.discard_edge(&EdgeId::new(1, 2), None).expect("discard");

        for (vertex, sinks) in &store.forward {
            for sink in sinks {
                assert!(store.backward[sink].contains(vertex));
            }
        }
        for (vertex, sources) in &store.backward {
            for source in sources {
                assert!(store.forward[source].contains(vertex));
            }
        }
    }

    #[test]
    fn test_empty_label_and_data_maps_are_pruned() {
        let mut store = store();
        let v = VertexId::from("x");
        store.add_vertex_label(&v, &Label::new("red")).expect("label");
        store.set_vertex_data(&v, "k", Value::Int(1)).expect("data");

        assert!(store.discard_vertex_label(&v, &Label::new("red")).expect("discard"));
        assert!(store.discard_vertex_data(&v, "k").expect("discard"));

        assert!(store.vertex_labels.is_empty());
        assert!(store.vertex_data.is_empty());
        assert!(store.has_vertex(&v).expect("has"));
    }

    #[test]
    fn test_discard_vertex_with_self_loop() {
        let mut store = store();
        let v = VertexId::from(7);
        store.add_edge(&EdgeId::new(7, 7)).expect("add");
        store.add_edge(&EdgeId::new(7, 8)).expect("add");
        store.add_edge(&EdgeId::new(9, 7)).expect("add");
        assert_eq!(store.count_edges().expect("count"), 3);

        assert!(store.discard_vertex(&v).expect("discard"));
        assert_eq!(store.count_edges().expect("count"), 0);
        assert_eq!(store.count_vertices().expect("count"), 2);
        assert!(!store.has_source(&VertexId::from(8)).expect("has"));
        assert!(!store.has_sink(&VertexId::from(9)).expect("has"));
    }

    #[test]
    fn test_edge_state_dies_with_edge() {
        let mut store = store();
        let e = EdgeId::new("a", "b");
        store.add_edge_label(&e, &Label::new("knows")).expect("label");
        store.set_edge_data(&e, "since", Value::Int(2017)).expect("data");

        store.discard_vertex(&VertexId::from("a")).expect("discard");
        assert!(store.edge_labels.is_empty());
        assert!(store.edge_data.is_empty());

        // Re-adding the edge starts from a clean slate
        store.add_edge(&e).expect("add");
        assert_eq!(store.count_edge_labels(&e).expect("count"), 0);
        assert_eq!(store.get_edge_data(&e, "since").expect("get"), None);
    }

    #[test]
    fn test_ignored_discard_removes_the_edge_once() {
        let mut store = store();
        let e = EdgeId::new("a", "b");
        store.add_edge(&e).expect("add");

        assert!(store.discard_edge(&e, Some(&VertexId::from("a"))).expect("discard"));
        assert!(!store.has_edge(&e).expect("has"));
        assert_eq!(store.count_edges().expect("count"), 0);

        assert!(!store.discard_edge(&e, None).expect("discard"));
        assert_eq!(store.count_edges().expect("count"), 0);
        assert_eq!(store.iter_edges().expect("iter").count(), 0);
    }
}
