//! Graph store backed by a key-value storage engine.

use std::cell::RefCell;
use std::fmt;
use std::path::Path;

use tracing::{debug, info, warn};
use vert_core::encoding::keys::{decode_count, encode_count, EDGE_COUNT_KEY, VERTEX_COUNT_KEY};
use vert_core::encoding::{Decoder, EdgeRecord, Encoder, VertexRecord};
use vert_core::{EdgeId, Label, Value, VertexId};
use vert_storage::backends::RedbEngine;
use vert_storage::{StorageEngine, Transaction};

use super::cache::{CacheStats, RecordCache};
use super::config::PersistentConfig;
use super::keys::{RecordKey, GRAPH_TABLE};
use super::scan::{KeyScan, SCAN_BATCH_SIZE};
use crate::store::{owned_iter, GraphError, GraphId, GraphResult, GraphStore, StoreIter};

/// A graph store that keeps its records in a [`StorageEngine`].
///
/// Vertex and edge records are cached in two independent write-back caches.
/// Writes land in the cache and reach the engine when the record is evicted,
/// when a full scan needs it, or on [`flush`](Self::flush) and
/// [`close`](GraphStore::close). A cache size of zero writes through.
///
/// The two global counters are written straight to the engine on every
/// change. Record writes and counter writes are separate transactions, so a
/// crash between them can leave the counters out of step with the records.
///
/// # Lifecycle
///
/// The store holds its engine until it is closed. Closing writes every cached
/// record back and releases the engine; afterwards every operation fails with
/// [`GraphError::Closed`]. Dropping an open store closes it. To share an engine
/// with other code, hand the store an `Arc` of it: closing the store then only
/// releases the store's own handle. [`into_engine`](Self::into_engine) flushes
/// and hands the engine back instead of releasing it.
///
/// # Example
///
/// ```
/// use vert_core::{EdgeId, VertexId};
/// use vert_graph::persistent::{PersistentConfig, PersistentGraphStore};
/// use vert_graph::{GraphId, GraphStore};
///
/// let mut store = PersistentGraphStore::in_memory(GraphId::next(), PersistentConfig::default())?;
/// store.add_edge(&EdgeId::new("a", "b"))?;
/// store.set_vertex_data(&VertexId::from("a"), "name", "Alice".into())?;
///
/// store.flush()?;
/// assert_eq!(store.count_vertices()?, 2);
///
/// store.close()?;
/// assert!(store.count_vertices().is_err());
/// # Ok::<(), vert_graph::GraphError>(())
/// ```
pub struct PersistentGraphStore<E: StorageEngine> {
    /// `None` once the store is closed.
    engine: Option<E>,
    owner: GraphId,
    vertices: RefCell<RecordCache<VertexId, VertexRecord>>,
    edges: RefCell<RecordCache<EdgeId, EdgeRecord>>,
}

impl PersistentGraphStore<RedbEngine> {
    /// Open (creating it if allowed) a redb database file and build a store
    /// on it. The store owns the database and releases it on close.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`] if the database cannot be opened.
    pub fn open(
        path: impl AsRef<Path>,
        owner: GraphId,
        config: PersistentConfig,
    ) -> GraphResult<Self> {
        let path = path.as_ref();
        let engine = RedbEngine::open_with_config(path, config.redb_config())?;
        info!(path = %path.display(), %owner, "opened persistent graph store");
        Ok(Self::with_engine(engine, owner, config))
    }

    /// Build a store on a fresh in-memory redb database.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Storage`] if the database cannot be created.
    pub fn in_memory(owner: GraphId, config: PersistentConfig) -> GraphResult<Self> {
        Ok(Self::with_engine(RedbEngine::in_memory()?, owner, config))
    }
}

impl<E: StorageEngine> PersistentGraphStore<E> {
    /// Build a store on an engine supplied by the caller.
    #[must_use]
    pub fn with_engine(engine: E, owner: GraphId, config: PersistentConfig) -> Self {
        Self {
            engine: Some(engine),
            owner,
            vertices: RefCell::new(RecordCache::new(config.vertex_cache_size)),
            edges: RefCell::new(RecordCache::new(config.edge_cache_size)),
        }
    }

    /// The vertex cache capacity.
    pub fn vertex_cache_size(&self) -> usize {
        self.vertices.borrow().capacity()
    }

    /// The edge cache capacity.
    pub fn edge_cache_size(&self) -> usize {
        self.edges.borrow().capacity()
    }

    /// Change the vertex cache capacity, evicting down to it at once.
    ///
    /// # Errors
    ///
    /// Returns an error if an evicted dirty record cannot be written back.
    pub fn set_vertex_cache_size(&mut self, size: usize) -> GraphResult<()> {
        let engine = self.engine()?;
        let mut cache = self.vertices.borrow_mut();
        cache.set_capacity(size);
        enforce_capacity(engine, &mut cache)
    }

    /// Change the edge cache capacity, evicting down to it at once.
    ///
    /// # Errors
    ///
    /// Returns an error if an evicted dirty record cannot be written back.
    pub fn set_edge_cache_size(&mut self, size: usize) -> GraphResult<()> {
        let engine = self.engine()?;
        let mut cache = self.edges.borrow_mut();
        cache.set_capacity(size);
        enforce_capacity(engine, &mut cache)
    }

    /// Combined counters of both record caches.
    pub fn cache_stats(&self) -> CacheStats {
        self.vertex_cache_stats().merged(self.edge_cache_stats())
    }

    /// Counters of the vertex record cache.
    pub fn vertex_cache_stats(&self) -> CacheStats {
        self.vertices.borrow().stats()
    }

    /// Counters of the edge record cache.
    pub fn edge_cache_stats(&self) -> CacheStats {
        self.edges.borrow().stats()
    }

    /// Write every cached record back, oldest first, and empty both caches.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Closed`] on a closed store, or an error if the
    /// records cannot be written. On failure the caches are left intact.
    pub fn flush(&mut self) -> GraphResult<()> {
        let engine = self.engine()?;
        let vertices = drain_cache(engine, &mut self.vertices.borrow_mut())?;
        let edges = drain_cache(engine, &mut self.edges.borrow_mut())?;
        engine.flush()?;
        debug!(vertices, edges, "flushed record caches");
        Ok(())
    }

    /// Flush and hand back the engine without releasing it.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Closed`] if the store was already closed, or an
    /// error if the flush fails.
    pub fn into_engine(mut self) -> GraphResult<E> {
        self.flush()?;
        self.engine.take().ok_or(GraphError::Closed)
    }

    fn engine(&self) -> GraphResult<&E> {
        self.engine.as_ref().ok_or(GraphError::Closed)
    }

    // ------------------------------------------------------------------
    // Record access through the caches
    // ------------------------------------------------------------------

    fn load<K, V>(&self, cache: &RefCell<RecordCache<K, V>>, key: &K) -> GraphResult<Option<V>>
    where
        K: RecordKey,
        V: Encoder + Decoder + Clone,
    {
        let engine = self.engine()?;
        let mut cache = cache.borrow_mut();
        if !cache.is_enabled() {
            return fetch_record(engine, key);
        }
        if let Some(value) = cache.get(key) {
            return Ok(Some(value.clone()));
        }
        let Some(value) = fetch_record::<E, K, V>(engine, key)? else {
            return Ok(None);
        };
        cache.insert(key.clone(), value.clone(), false);
        enforce_capacity(engine, &mut cache)?;
        Ok(Some(value))
    }

    fn save<K, V>(&self, cache: &RefCell<RecordCache<K, V>>, key: K, value: V) -> GraphResult<()>
    where
        K: RecordKey,
        V: Encoder + Decoder + Clone,
    {
        let engine = self.engine()?;
        let mut cache = cache.borrow_mut();
        if !cache.is_enabled() {
            return put_records(engine, [(&key, &value)]);
        }
        cache.insert(key, value, true);
        enforce_capacity(engine, &mut cache)
    }

    fn exists<K, V>(&self, cache: &RefCell<RecordCache<K, V>>, key: &K) -> GraphResult<bool>
    where
        K: RecordKey,
    {
        let engine = self.engine()?;
        if cache.borrow().contains(key) {
            return Ok(true);
        }
        let tx = engine.begin_read()?;
        Ok(tx.contains(GRAPH_TABLE, &key.to_key()?)?)
    }

    /// Purge a record from its cache and delete it from the engine at once.
    fn erase<K, V>(&self, cache: &RefCell<RecordCache<K, V>>, key: &K) -> GraphResult<bool>
    where
        K: RecordKey,
    {
        let engine = self.engine()?;
        let cached = cache.borrow_mut().remove(key);
        let mut tx = engine.begin_write()?;
        let deleted = tx.delete(GRAPH_TABLE, &key.to_key()?)?;
        tx.commit()?;
        Ok(cached || deleted)
    }

    /// Write back every dirty record of one kind, keeping them cached.
    fn write_back<K, V>(&self, cache: &RefCell<RecordCache<K, V>>) -> GraphResult<()>
    where
        K: RecordKey,
        V: Encoder + Decoder + Clone,
    {
        let engine = self.engine()?;
        let mut cache = cache.borrow_mut();
        let dirty = cache.dirty_keys();
        if dirty.is_empty() {
            return Ok(());
        }
        put_records(engine, dirty.iter().filter_map(|key| cache.peek(key).map(|v| (key, v))))?;
        cache.mark_clean(&dirty);
        debug!(records = dirty.len(), "wrote back dirty records before scan");
        Ok(())
    }

    /// Read a record for a scan: the cached copy if there is one, otherwise
    /// straight from the engine. Neither path touches the cache or its stats.
    fn peek<K, V>(&self, cache: &RefCell<RecordCache<K, V>>, key: &K) -> GraphResult<Option<V>>
    where
        K: RecordKey,
        V: Decoder + Clone,
    {
        let engine = self.engine()?;
        if let Some(value) = cache.borrow().peek(key) {
            return Ok(Some(value.clone()));
        }
        fetch_record(engine, key)
    }

    fn scan<K, V>(&self, cache: &RefCell<RecordCache<K, V>>) -> GraphResult<KeyScan<'_, E, K>>
    where
        K: RecordKey,
        V: Encoder + Decoder + Clone,
    {
        self.write_back(cache)?;
        Ok(KeyScan::new(self.engine()?, SCAN_BATCH_SIZE))
    }

    fn vertex(&self, vid: &VertexId) -> GraphResult<Option<VertexRecord>> {
        self.load(&self.vertices, vid)
    }

    fn edge(&self, eid: &EdgeId) -> GraphResult<Option<EdgeRecord>> {
        self.load(&self.edges, eid)
    }

    /// Vertices whose record passes `keep`, in key order.
    fn filter_vertices<F>(&self, keep: F) -> GraphResult<StoreIter<'_, VertexId>>
    where
        F: Fn(&VertexRecord) -> bool + 'static,
    {
        let scan = self.scan::<VertexId, VertexRecord>(&self.vertices)?;
        Ok(Box::new(scan.filter_map(move |vid| {
            let vid = match vid {
                Ok(vid) => vid,
                Err(e) => return Some(Err(e)),
            };
            match self.peek(&self.vertices, &vid) {
                Ok(Some(record)) if keep(&record) => Some(Ok(vid)),
                Ok(_) => None,
                Err(e) => Some(Err(e)),
            }
        })))
    }

    // ------------------------------------------------------------------
    // Counters
    // ------------------------------------------------------------------

    fn read_count(&self, key: &[u8]) -> GraphResult<usize> {
        let tx = self.engine()?.begin_read()?;
        let count = match tx.get(GRAPH_TABLE, key)? {
            Some(bytes) => decode_count(&bytes)?,
            None => 0,
        };
        usize::try_from(count)
            .map_err(|_| GraphError::DataCorruption(format!("counter out of range: {count}")))
    }

    fn adjust_count(&self, key: &[u8], increment: bool) -> GraphResult<()> {
        let mut tx = self.engine()?.begin_write()?;
        let current = match tx.get(GRAPH_TABLE, key)? {
            Some(bytes) => decode_count(&bytes)?,
            None => 0,
        };
        let next = if increment { current.checked_add(1) } else { current.checked_sub(1) };
        let next = next.ok_or_else(|| {
            GraphError::DataCorruption(format!(
                "counter {} would leave range from {current}",
                String::from_utf8_lossy(key)
            ))
        })?;
        tx.put(GRAPH_TABLE, key, &encode_count(next))?;
        tx.commit()?;
        Ok(())
    }
}

/// Read and decode one record straight from the engine.
fn fetch_record<E, K, V>(engine: &E, key: &K) -> GraphResult<Option<V>>
where
    E: StorageEngine,
    K: RecordKey,
    V: Decoder,
{
    let tx = engine.begin_read()?;
    match tx.get(GRAPH_TABLE, &key.to_key()?)? {
        Some(bytes) => Ok(Some(V::decode(&bytes)?)),
        None => Ok(None),
    }
}

/// Encode and write records in one transaction.
fn put_records<'r, E, K, V, I>(engine: &E, records: I) -> GraphResult<()>
where
    E: StorageEngine,
    K: RecordKey + 'r,
    V: Encoder + 'r,
    I: IntoIterator<Item = (&'r K, &'r V)>,
{
    let mut tx = engine.begin_write()?;
    for (key, value) in records {
        tx.put(GRAPH_TABLE, &key.to_key()?, &value.encode()?)?;
    }
    tx.commit()?;
    Ok(())
}

/// Evict least recently touched records until the cache fits its capacity,
/// writing each dirty one back before it is dropped.
fn enforce_capacity<E, K, V>(engine: &E, cache: &mut RecordCache<K, V>) -> GraphResult<()>
where
    E: StorageEngine,
    K: RecordKey,
    V: Encoder,
{
    while cache.is_over_capacity() {
        let written_back = match cache.oldest() {
            Some((key, value, true)) => {
                put_records(engine, [(key, value)])?;
                debug!(%key, "evicted dirty record");
                true
            }
            Some(_) => false,
            None => break,
        };
        cache.evict_oldest(written_back);
    }
    Ok(())
}

/// Write back every dirty record oldest first, then empty the cache.
/// Returns the number of records written.
fn drain_cache<E, K, V>(engine: &E, cache: &mut RecordCache<K, V>) -> GraphResult<usize>
where
    E: StorageEngine,
    K: RecordKey,
    V: Encoder,
{
    let dirty: Vec<(&K, &V)> =
        cache.iter_by_age().filter(|(_, _, dirty)| *dirty).map(|(k, v, _)| (k, v)).collect();
    let written = dirty.len();
    if written > 0 {
        put_records(engine, dirty)?;
    }
    cache.clear_written();
    Ok(written)
}

fn check_representable(key: &str, value: &Value) -> GraphResult<()> {
    if value.is_representable() {
        Ok(())
    } else {
        Err(GraphError::Encoding(format!(
            "attribute {key:?} holds a {} with no textual form",
            value.type_name()
        )))
    }
}

impl<E: StorageEngine> GraphStore for PersistentGraphStore<E> {
    fn owner(&self) -> GraphId {
        self.owner
    }

    fn is_open(&self) -> bool {
        self.engine.is_some()
    }

    fn close(&mut self) -> GraphResult<()> {
        if self.engine.is_none() {
            return Ok(());
        }
        self.flush()?;
        self.engine = None;
        info!(owner = %self.owner, "closed persistent graph store");
        Ok(())
    }

    fn count_vertices(&self) -> GraphResult<usize> {
        self.read_count(VERTEX_COUNT_KEY)
    }

    fn count_edges(&self) -> GraphResult<usize> {
        self.read_count(EDGE_COUNT_KEY)
    }

    fn iter_vertices(&self) -> GraphResult<StoreIter<'_, VertexId>> {
        Ok(Box::new(self.scan::<VertexId, VertexRecord>(&self.vertices)?))
    }

    fn iter_edges(&self) -> GraphResult<StoreIter<'_, EdgeId>> {
        Ok(Box::new(self.scan::<EdgeId, EdgeRecord>(&self.edges)?))
    }

    fn has_vertex(&self, vid: &VertexId) -> GraphResult<bool> {
        self.exists(&self.vertices, vid)
    }

    fn has_edge(&self, eid: &EdgeId) -> GraphResult<bool> {
        self.exists(&self.edges, eid)
    }

    fn add_vertex(&mut self, vid: &VertexId) -> GraphResult<()> {
        if self.has_vertex(vid)? {
            return Ok(());
        }
        self.save(&self.vertices, vid.clone(), VertexRecord::default())?;
        self.adjust_count(VERTEX_COUNT_KEY, true)
    }

    fn add_edge(&mut self, eid: &EdgeId) -> GraphResult<()> {
        if self.has_edge(eid)? {
            return Ok(());
        }
        self.add_vertex(&eid.source)?;
        self.add_vertex(&eid.sink)?;

        self.save(&self.edges, eid.clone(), EdgeRecord::default())?;

        let mut source = self.vertex(&eid.source)?.unwrap_or_default();
        source.sinks.insert(eid.sink.clone());
        self.save(&self.vertices, eid.source.clone(), source)?;

        // Read after the source write so a loop edge sees both halves
        let mut sink = self.vertex(&eid.sink)?.unwrap_or_default();
        sink.sources.insert(eid.source.clone());
        self.save(&self.vertices, eid.sink.clone(), sink)?;

        self.adjust_count(EDGE_COUNT_KEY, true)
    }

    fn discard_vertex(&mut self, vid: &VertexId) -> GraphResult<bool> {
        let Some(record) = self.vertex(vid)? else {
            return Ok(false);
        };

        for sink in &record.sinks {
            self.discard_edge(&EdgeId::new(vid.clone(), sink.clone()), Some(vid))?;
        }
        // A loop edge was already removed with the sinks
        for source in record.sources.iter().filter(|s| *s != vid) {
            self.discard_edge(&EdgeId::new(source.clone(), vid.clone()), Some(vid))?;
        }

        self.erase(&self.vertices, vid)?;
        self.adjust_count(VERTEX_COUNT_KEY, false)?;
        Ok(true)
    }

    fn discard_edge(&mut self, eid: &EdgeId, ignore: Option<&VertexId>) -> GraphResult<bool> {
        if !self.has_edge(eid)? {
            return Ok(false);
        }

        if ignore != Some(&eid.source) {
            if let Some(mut source) = self.vertex(&eid.source)? {
                source.sinks.remove(&eid.sink);
                self.save(&self.vertices, eid.source.clone(), source)?;
            }
        }
        if ignore != Some(&eid.sink) {
            if let Some(mut sink) = self.vertex(&eid.sink)? {
                sink.sources.remove(&eid.source);
                self.save(&self.vertices, eid.sink.clone(), sink)?;
            }
        }

        self.erase(&self.edges, eid)?;
        self.adjust_count(EDGE_COUNT_KEY, false)?;
        Ok(true)
    }

    fn has_source(&self, sink: &VertexId) -> GraphResult<bool> {
        Ok(self.vertex(sink)?.is_some_and(|record| !record.sources.is_empty()))
    }

    fn has_sink(&self, source: &VertexId) -> GraphResult<bool> {
        Ok(self.vertex(source)?.is_some_and(|record| !record.sinks.is_empty()))
    }

    fn iter_sources(&self, sink: Option<&VertexId>) -> GraphResult<StoreIter<'_, VertexId>> {
        match sink {
            None => self.filter_vertices(|record| !record.sinks.is_empty()),
            Some(sink) => {
                let sources = self.vertex(sink)?.map(|record| record.sources).unwrap_or_default();
                Ok(owned_iter(sources))
            }
        }
    }

    fn iter_sinks(&self, source: Option<&VertexId>) -> GraphResult<StoreIter<'_, VertexId>> {
        match source {
            None => self.filter_vertices(|record| !record.sources.is_empty()),
            Some(source) => {
                let sinks = self.vertex(source)?.map(|record| record.sinks).unwrap_or_default();
                Ok(owned_iter(sinks))
            }
        }
    }

    fn count_sources(&self, sink: Option<&VertexId>) -> GraphResult<usize> {
        match sink {
            None => self.iter_sources(None)?.try_fold(0, |n, vid| vid.map(|_| n + 1)),
            Some(sink) => Ok(self.vertex(sink)?.map_or(0, |record| record.sources.len())),
        }
    }

    fn count_sinks(&self, source: Option<&VertexId>) -> GraphResult<usize> {
        match source {
            None => self.iter_sinks(None)?.try_fold(0, |n, vid| vid.map(|_| n + 1)),
            Some(source) => Ok(self.vertex(source)?.map_or(0, |record| record.sinks.len())),
        }
    }

    fn add_vertex_label(&mut self, vid: &VertexId, label: &Label) -> GraphResult<()> {
        self.add_vertex(vid)?;
        let mut record = self.vertex(vid)?.unwrap_or_default();
        if record.labels.insert(label.clone()) {
            self.save(&self.vertices, vid.clone(), record)?;
        }
        Ok(())
    }

    fn has_vertex_label(&self, vid: &VertexId, label: &Label) -> GraphResult<bool> {
        Ok(self.vertex(vid)?.is_some_and(|record| record.labels.contains(label)))
    }

    fn discard_vertex_label(&mut self, vid: &VertexId, label: &Label) -> GraphResult<bool> {
        let Some(mut record) = self.vertex(vid)? else {
            return Ok(false);
        };
        if !record.labels.remove(label) {
            return Ok(false);
        }
        self.save(&self.vertices, vid.clone(), record)?;
        Ok(true)
    }

    fn iter_vertex_labels(&self, vid: &VertexId) -> GraphResult<StoreIter<'_, Label>> {
        let labels = self.vertex(vid)?.map(|record| record.labels).unwrap_or_default();
        Ok(owned_iter(labels))
    }

    fn count_vertex_labels(&self, vid: &VertexId) -> GraphResult<usize> {
        Ok(self.vertex(vid)?.map_or(0, |record| record.labels.len()))
    }

    fn add_edge_label(&mut self, eid: &EdgeId, label: &Label) -> GraphResult<()> {
        self.add_edge(eid)?;
        let mut record = self.edge(eid)?.unwrap_or_default();
        if record.labels.insert(label.clone()) {
            self.save(&self.edges, eid.clone(), record)?;
        }
        Ok(())
    }

    fn has_edge_label(&self, eid: &EdgeId, label: &Label) -> GraphResult<bool> {
        Ok(self.edge(eid)?.is_some_and(|record| record.labels.contains(label)))
    }

    fn discard_edge_label(&mut self, eid: &EdgeId, label: &Label) -> GraphResult<bool> {
        let Some(mut record) = self.edge(eid)? else {
            return Ok(false);
        };
        if !record.labels.remove(label) {
            return Ok(false);
        }
        self.save(&self.edges, eid.clone(), record)?;
        Ok(true)
    }

    fn iter_edge_labels(&self, eid: &EdgeId) -> GraphResult<StoreIter<'_, Label>> {
        let labels = self.edge(eid)?.map(|record| record.labels).unwrap_or_default();
        Ok(owned_iter(labels))
    }

    fn count_edge_labels(&self, eid: &EdgeId) -> GraphResult<usize> {
        Ok(self.edge(eid)?.map_or(0, |record| record.labels.len()))
    }

    fn get_vertex_data(&self, vid: &VertexId, key: &str) -> GraphResult<Option<Value>> {
        Ok(self.vertex(vid)?.and_then(|mut record| record.data.remove(key)))
    }

    fn set_vertex_data(&mut self, vid: &VertexId, key: &str, value: Value) -> GraphResult<()> {
        check_representable(key, &value)?;
        self.add_vertex(vid)?;
        let mut record = self.vertex(vid)?.unwrap_or_default();
        record.data.insert(key.to_owned(), value);
        self.save(&self.vertices, vid.clone(), record)
    }

    fn has_vertex_data(&self, vid: &VertexId, key: &str) -> GraphResult<bool> {
        Ok(self.vertex(vid)?.is_some_and(|record| record.data.contains_key(key)))
    }

    fn discard_vertex_data(&mut self, vid: &VertexId, key: &str) -> GraphResult<bool> {
        let Some(mut record) = self.vertex(vid)? else {
            return Ok(false);
        };
        if record.data.remove(key).is_none() {
            return Ok(false);
        }
        self.save(&self.vertices, vid.clone(), record)?;
        Ok(true)
    }

    fn iter_vertex_data_keys(&self, vid: &VertexId) -> GraphResult<StoreIter<'_, String>> {
        let data = self.vertex(vid)?.map(|record| record.data).unwrap_or_default();
        Ok(owned_iter(data.into_keys()))
    }

    fn count_vertex_data_keys(&self, vid: &VertexId) -> GraphResult<usize> {
        Ok(self.vertex(vid)?.map_or(0, |record| record.data.len()))
    }

    fn get_edge_data(&self, eid: &EdgeId, key: &str) -> GraphResult<Option<Value>> {
        Ok(self.edge(eid)?.and_then(|mut record| record.data.remove(key)))
    }

    fn set_edge_data(&mut self, eid: &EdgeId, key: &str, value: Value) -> GraphResult<()> {
        check_representable(key, &value)?;
        self.add_edge(eid)?;
        let mut record = self.edge(eid)?.unwrap_or_default();
        record.data.insert(key.to_owned(), value);
        self.save(&self.edges, eid.clone(), record)
    }

    fn has_edge_data(&self, eid: &EdgeId, key: &str) -> GraphResult<bool> {
        Ok(self.edge(eid)?.is_some_and(|record| record.data.contains_key(key)))
    }

    fn discard_edge_data(&mut self, eid: &EdgeId, key: &str) -> GraphResult<bool> {
        let Some(mut record) = self.edge(eid)? else {
            return Ok(false);
        };
        if record.data.remove(key).is_none() {
            return Ok(false);
        }
        self.save(&self.edges, eid.clone(), record)?;
        Ok(true)
    }

    fn iter_edge_data_keys(&self, eid: &EdgeId) -> GraphResult<StoreIter<'_, String>> {
        let data = self.edge(eid)?.map(|record| record.data).unwrap_or_default();
        Ok(owned_iter(data.into_keys()))
    }

    fn count_edge_data_keys(&self, eid: &EdgeId) -> GraphResult<usize> {
        Ok(self.edge(eid)?.map_or(0, |record| record.data.len()))
    }
}

impl<E: StorageEngine> fmt::Debug for PersistentGraphStore<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentGraphStore")
            .field("owner", &self.owner)
            .field("open", &self.is_open())
            .field("vertex_cache_size", &self.vertex_cache_size())
            .field("edge_cache_size", &self.edge_cache_size())
            .finish_non_exhaustive()
    }
}

impl<E: StorageEngine> Drop for PersistentGraphStore<E> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(owner = %self.owner, error = %e, "failed to close graph store on drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(cache_size: usize) -> PersistentGraphStore<RedbEngine> {
        PersistentGraphStore::in_memory(
            GraphId::next(),
            PersistentConfig::new().cache_size(cache_size),
        )
        .expect("in-memory store")
    }

    fn raw_get(store: &PersistentGraphStore<RedbEngine>, key: &[u8]) -> Option<Vec<u8>> {
        let tx = store.engine().expect("open").begin_read().expect("begin read");
        tx.get(GRAPH_TABLE, key).expect("get")
    }

    #[test]
    fn test_counters_are_decimal_text_in_the_engine() {
        let mut store = store(16);
        store.add_edge(&EdgeId::new("a", "b")).expect("add");

        // Counters bypass the cache
        assert_eq!(raw_get(&store, VERTEX_COUNT_KEY), Some(b"2".to_vec()));
        assert_eq!(raw_get(&store, EDGE_COUNT_KEY), Some(b"1".to_vec()));
    }

    #[test]
    fn test_writes_stay_cached_until_flush() {
        let mut store = store(16);
        let v = VertexId::from("a");
        store.add_vertex(&v).expect("add");
        let key = v.to_key().expect("key");
        assert_eq!(raw_get(&store, &key), None);

        store.flush().expect("flush");
        assert_eq!(raw_get(&store, &key), Some(b"[[],{},[],[]]".to_vec()));
        assert_eq!(store.vertices.borrow().len(), 0);
    }

    #[test]
    fn test_zero_cache_writes_through() {
        let mut store = store(0);
        let v = VertexId::from(1);
        store.add_vertex_label(&v, &Label::new("red")).expect("label");
        assert_eq!(raw_get(&store, b"v1"), Some(b"[[\"red\"],{},[],[]]".to_vec()));
        assert_eq!(store.cache_stats(), CacheStats::default());
    }

    #[test]
    fn test_delete_bypasses_cache() {
        let mut store = store(16);
        let v = VertexId::from("gone");
        store.add_vertex(&v).expect("add");
        store.flush().expect("flush");
        assert!(store.has_vertex(&v).expect("has"));

        assert!(store.discard_vertex(&v).expect("discard"));
        assert_eq!(raw_get(&store, b"v\"gone\""), None);
        assert!(!store.vertices.borrow().contains(&v));
    }

    #[test]
    fn test_eviction_writes_back_dirty_record() {
        let mut store = store(1);
        let a = VertexId::from("a");
        store.set_vertex_data(&a, "k", Value::Int(1)).expect("set");
        store.add_vertex(&VertexId::from("b")).expect("add");

        // "a" was pushed out by "b" and had to be written first
        assert!(raw_get(&store, b"v\"a\"").is_some());
        assert_eq!(store.get_vertex_data(&a, "k").expect("get"), Some(Value::Int(1)));
        assert!(store.vertex_cache_stats().evictions >= 1);
        assert!(store.vertex_cache_stats().write_backs >= 1);
    }

    #[test]
    fn test_scan_writes_back_but_keeps_records_cached() {
        let mut store = store(16);
        store.add_vertex(&VertexId::from(1)).expect("add");
        store.add_vertex(&VertexId::from(2)).expect("add");

        let mut ids: Vec<VertexId> =
            store.iter_vertices().expect("iter").collect::<GraphResult<_>>().expect("scan");
        ids.sort();
        assert_eq!(ids, vec![VertexId::from(1), VertexId::from(2)]);

        let cache = store.vertices.borrow();
        assert_eq!(cache.len(), 2);
        assert!(cache.dirty_keys().is_empty());
    }

    #[test]
    fn test_source_and_sink_scans_leave_the_cache_alone() {
        let mut store = store(2);
        for i in 0..4 {
            store.add_edge(&EdgeId::new(i, i + 1)).expect("add");
        }
        store.flush().expect("flush");
        let (a, b) = (VertexId::from(0), VertexId::from(1));
        assert!(store.has_sink(&a).expect("warm"));
        assert!(store.has_source(&b).expect("warm"));
        let before = store.vertex_cache_stats();

        assert_eq!(store.count_sources(None).expect("sources"), 4);
        assert_eq!(store.count_sinks(None).expect("sinks"), 4);
        let mut sources: Vec<VertexId> =
            store.iter_sources(None).expect("iter").collect::<GraphResult<_>>().expect("scan");
        sources.sort();
        assert_eq!(sources, (0..4).map(VertexId::from).collect::<Vec<_>>());

        let after = store.vertex_cache_stats();
        assert_eq!(after.hits, before.hits);
        assert_eq!(after.misses, before.misses);
        assert_eq!(after.evictions, before.evictions);
        let cache = store.vertices.borrow();
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&a));
        assert!(cache.contains(&b));
    }

    #[test]
    fn test_non_finite_value_is_rejected_up_front() {
        let mut store = store(16);
        let v = VertexId::from("x");
        let err = store.set_vertex_data(&v, "bad", Value::Float(f64::NAN)).expect_err("NaN");
        assert!(matches!(err, GraphError::Encoding(_)));
        assert!(!store.has_vertex(&v).expect("has"));
    }

    #[test]
    fn test_into_engine_keeps_data() {
        let mut store = store(16);
        store.add_edge(&EdgeId::new(1, 2)).expect("add");
        let engine = store.into_engine().expect("into engine");

        let reopened =
            PersistentGraphStore::with_engine(engine, GraphId::next(), PersistentConfig::default());
        assert!(reopened.has_edge(&EdgeId::new(1, 2)).expect("has"));
        assert_eq!(reopened.count_vertices().expect("count"), 2);
    }
}
