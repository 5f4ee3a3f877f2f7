//! Batched key scans over the backing store.

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::ops::Bound;

use vert_core::encoding::keys::prefix_range;
use vert_storage::{Cursor, StorageEngine, Transaction};

use super::keys::{RecordKey, GRAPH_TABLE};
use crate::store::{GraphError, GraphResult};

/// Number of keys fetched per read transaction.
pub(crate) const SCAN_BATCH_SIZE: usize = 256;

/// Streams the IDs of every record of one kind.
///
/// Each refill opens a short read transaction and resumes just past the last
/// key it returned, so no transaction stays open between `next` calls and at
/// most one batch of keys is held in memory.
pub(crate) struct KeyScan<'a, E, K> {
    engine: &'a E,
    next_start: Vec<u8>,
    end: Vec<u8>,
    buffer: VecDeque<Vec<u8>>,
    exhausted: bool,
    batch_size: usize,
    _key: PhantomData<K>,
}

impl<'a, E, K> KeyScan<'a, E, K>
where
    E: StorageEngine,
    K: RecordKey,
{
    pub(crate) fn new(engine: &'a E, batch_size: usize) -> Self {
        let (start, end) = prefix_range(K::TAG);
        Self {
            engine,
            next_start: start,
            end,
            buffer: VecDeque::new(),
            exhausted: false,
            batch_size: batch_size.max(1),
            _key: PhantomData,
        }
    }

    fn refill(&mut self) -> GraphResult<()> {
        let tx = self.engine.begin_read()?;
        let mut cursor = tx.range(
            GRAPH_TABLE,
            Bound::Included(self.next_start.as_slice()),
            Bound::Excluded(self.end.as_slice()),
        )?;

        while self.buffer.len() < self.batch_size {
            match cursor.next()? {
                Some((key, _)) => self.buffer.push_back(key),
                None => {
                    self.exhausted = true;
                    break;
                }
            }
        }

        if let Some(last) = self.buffer.back() {
            let mut resume = last.clone();
            resume.push(0x00);
            self.next_start = resume;
        }
        Ok(())
    }
}

impl<E, K> Iterator for KeyScan<'_, E, K>
where
    E: StorageEngine,
    K: RecordKey,
{
    type Item = GraphResult<K>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.is_empty() && !self.exhausted {
            if let Err(e) = self.refill() {
                self.exhausted = true;
                return Some(Err(e));
            }
        }
        let key = self.buffer.pop_front()?;
        Some(K::from_key(&key).map_err(GraphError::from))
    }
}
