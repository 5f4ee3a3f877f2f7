//! Redb transaction implementation.
//!
//! This module provides the `RedbTransaction` type which implements the
//! `Transaction` trait for both read-only and read-write transactions.
//!
//! # Memory-Efficient Cursors
//!
//! The cursor loads entries in batches (default 1000 entries), fetching the
//! next batch on demand as it advances, so a scan never materializes a whole
//! table.

use std::ops::Bound;

use redb::{ReadTransaction, ReadableTable, WriteTransaction};

use crate::engine::{Cursor, CursorResult, KeyValue, StorageError, Transaction};

use super::tables::{
    decode_key, encode_key, successor, table_end_key, table_start_key, DATA_TABLE,
};

/// Default batch size for cursor operations.
const DEFAULT_BATCH_SIZE: usize = 1000;

/// A transaction for the Redb storage engine.
///
/// Wraps both read-only and read-write Redb transactions behind the
/// `Transaction` trait.
#[allow(clippy::large_enum_variant)]
pub enum RedbTransaction {
    /// A read-only transaction.
    Read(ReadTransaction),
    /// A read-write transaction.
    Write(WriteTransaction),
}

impl RedbTransaction {
    /// Create a new read-only transaction.
    pub const fn new_read(tx: ReadTransaction) -> Self {
        Self::Read(tx)
    }

    /// Create a new read-write transaction.
    pub const fn new_write(tx: WriteTransaction) -> Self {
        Self::Write(tx)
    }

    /// Fetch up to `limit` entries with physical keys in `[start, end)`.
    ///
    /// Returned keys have the table prefix stripped.
    fn fetch_batch(
        &self,
        start: &[u8],
        end: &[u8],
        limit: usize,
    ) -> Result<Vec<KeyValue>, StorageError> {
        if start >= end {
            return Ok(Vec::new());
        }

        match self {
            Self::Read(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => scan_table(&t, start, end, limit),
                // No data table means no data, which is not an error
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(Vec::new()),
                Err(e) => Err(StorageError::Internal(e.to_string())),
            },
            Self::Write(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => scan_table(&t, start, end, limit),
                Err(e) => Err(StorageError::Internal(e.to_string())),
            },
        }
    }
}

fn read_value<T>(table: &T, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    table
        .get(key)
        .map(|value| value.map(|v| v.value().to_vec()))
        .map_err(|e| StorageError::Internal(e.to_string()))
}

fn scan_table<T>(
    table: &T,
    start: &[u8],
    end: &[u8],
    limit: usize,
) -> Result<Vec<KeyValue>, StorageError>
where
    T: ReadableTable<&'static [u8], &'static [u8]>,
{
    let range = table.range(start..end).map_err(|e| StorageError::Internal(e.to_string()))?;

    let mut entries = Vec::with_capacity(limit.min(1024));
    for result in range {
        if entries.len() >= limit {
            break;
        }
        let (k, v) = result.map_err(|e| StorageError::Internal(e.to_string()))?;
        if let Some((_, original_key)) = decode_key(k.value()) {
            entries.push((original_key.to_vec(), v.value().to_vec()));
        }
    }
    Ok(entries)
}

impl Transaction for RedbTransaction {
    type Cursor<'a>
        = RedbCursor<'a>
    where
        Self: 'a;

    fn get(&self, table: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        let encoded_key = encode_key(table, key);

        match self {
            Self::Read(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => read_value(&t, &encoded_key),
                Err(redb::TableError::TableDoesNotExist(_)) => Ok(None),
                Err(e) => Err(StorageError::Internal(e.to_string())),
            },
            Self::Write(tx) => match tx.open_table(DATA_TABLE) {
                Ok(t) => read_value(&t, &encoded_key),
                Err(e) => Err(StorageError::Internal(e.to_string())),
            },
        }
    }

    fn put(&mut self, table: &str, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        match self {
            Self::Read(_) => Err(StorageError::ReadOnly),
            Self::Write(tx) => {
                let encoded_key = encode_key(table, key);
                let mut t =
                    tx.open_table(DATA_TABLE).map_err(|e| StorageError::Internal(e.to_string()))?;
                t.insert(encoded_key.as_slice(), value)
                    .map_err(|e| StorageError::Internal(e.to_string()))?;
                Ok(())
            }
        }
    }

    fn delete(&mut self, table: &str, key: &[u8]) -> Result<bool, StorageError> {
        match self {
            Self::Read(_) => Err(StorageError::ReadOnly),
            Self::Write(tx) => {
                let encoded_key = encode_key(table, key);
                let mut t =
                    tx.open_table(DATA_TABLE).map_err(|e| StorageError::Internal(e.to_string()))?;
                let removed = t
                    .remove(encoded_key.as_slice())
                    .map_err(|e| StorageError::Internal(e.to_string()))?;
                Ok(removed.is_some())
            }
        }
    }

    fn range(
        &self,
        table: &str,
        start: Bound<&[u8]>,
        end: Bound<&[u8]>,
    ) -> Result<Self::Cursor<'_>, StorageError> {
        let start = match start {
            Bound::Included(k) => encode_key(table, k),
            Bound::Excluded(k) => successor(encode_key(table, k)),
            Bound::Unbounded => table_start_key(table),
        };
        let end = match end {
            Bound::Included(k) => successor(encode_key(table, k)),
            Bound::Excluded(k) => encode_key(table, k),
            Bound::Unbounded => table_end_key(table),
        };
        Ok(RedbCursor::new(self, table, start, end, DEFAULT_BATCH_SIZE))
    }

    fn commit(self) -> Result<(), StorageError> {
        match self {
            // Read transactions don't need explicit commit
            Self::Read(_) => Ok(()),
            Self::Write(tx) => tx.commit().map_err(|e| StorageError::Transaction(e.to_string())),
        }
    }

    fn rollback(self) -> Result<(), StorageError> {
        match self {
            Self::Read(_) => Ok(()),
            Self::Write(tx) => tx.abort().map_err(|e| StorageError::Transaction(e.to_string())),
        }
    }

    fn is_read_only(&self) -> bool {
        matches!(self, Self::Read(_))
    }
}

/// A forward cursor over one logical table of a Redb transaction.
///
/// At any time the cursor holds at most `batch_size` entries in memory, plus
/// the current entry. Each refill resumes just after the last key it saw.
pub struct RedbCursor<'a> {
    tx: &'a RedbTransaction,
    /// Physical key prefix of the logical table.
    prefix: Vec<u8>,
    /// Inclusive physical lower bound.
    start: Vec<u8>,
    /// Exclusive physical upper bound.
    end: Vec<u8>,
    batch: Vec<KeyValue>,
    position: Option<usize>,
    batch_size: usize,
    /// Whether entries may follow the current batch.
    has_more: bool,
    current_entry: Option<KeyValue>,
}

impl<'a> RedbCursor<'a> {
    /// Create an unpositioned cursor over physical keys in `[start, end)`.
    fn new(
        tx: &'a RedbTransaction,
        table: &str,
        start: Vec<u8>,
        end: Vec<u8>,
        batch_size: usize,
    ) -> Self {
        Self {
            tx,
            prefix: table_start_key(table),
            start,
            end,
            batch: Vec::new(),
            position: None,
            batch_size: batch_size.max(1),
            has_more: true,
            current_entry: None,
        }
    }

    /// Replace the batch with entries starting at physical key `from`, and
    /// position on its first entry.
    fn load_from(&mut self, from: &[u8]) -> CursorResult {
        self.batch = self.tx.fetch_batch(from, &self.end, self.batch_size)?;
        self.has_more = self.batch.len() >= self.batch_size;
        self.position = if self.batch.is_empty() { None } else { Some(0) };
        self.update_current();
        Ok(self.current_entry.clone())
    }

    fn update_current(&mut self) {
        self.current_entry = self.position.and_then(|pos| self.batch.get(pos).cloned());
    }

    fn physical_key(&self, key: &[u8]) -> Vec<u8> {
        let mut physical = self.prefix.clone();
        physical.extend_from_slice(key);
        physical
    }
}

impl Cursor for RedbCursor<'_> {
    fn seek(&mut self, key: &[u8]) -> CursorResult {
        let target = self.physical_key(key);
        let from = if target > self.start { target } else { self.start.clone() };
        self.load_from(&from)
    }

    fn seek_first(&mut self) -> CursorResult {
        let from = self.start.clone();
        self.load_from(&from)
    }

    fn next(&mut self) -> CursorResult {
        let Some(pos) = self.position else {
            // Unpositioned cursors start from the first entry
            if self.batch.is_empty() && self.has_more {
                return self.seek_first();
            }
            return Ok(None);
        };

        if pos + 1 < self.batch.len() {
            self.position = Some(pos + 1);
            self.update_current();
            return Ok(self.current_entry.clone());
        }

        if self.has_more {
            if let Some((last, _)) = self.batch.last() {
                let from = successor(self.physical_key(last));
                return self.load_from(&from);
            }
        }

        self.position = None;
        self.current_entry = None;
        self.batch.clear();
        self.has_more = false;
        Ok(None)
    }

    fn current(&self) -> Option<(&[u8], &[u8])> {
        self.current_entry.as_ref().map(|(k, v)| (k.as_slice(), v.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::RedbEngine;
    use crate::engine::StorageEngine;

    fn engine_with(keys: &[&[u8]]) -> RedbEngine {
        let engine = RedbEngine::in_memory().expect("in-memory db");
        let mut tx = engine.begin_write().expect("begin write");
        for key in keys {
            tx.put("t", key, b"x").expect("put");
        }
        tx.commit().expect("commit");
        engine
    }

    fn collect(cursor: &mut RedbCursor<'_>) -> Vec<Vec<u8>> {
        let mut keys = Vec::new();
        while let Some((k, _)) = cursor.next().expect("next") {
            keys.push(k);
        }
        keys
    }

    #[test]
    fn test_small_batches_cover_the_range() {
        let engine = engine_with(&[b"a", b"b", b"c", b"d", b"e"]);
        let tx = engine.begin_read().expect("begin read");
        let mut cursor = RedbCursor::new(&tx, "t", table_start_key("t"), table_end_key("t"), 2);

        let expected: Vec<Vec<u8>> = [b"a", b"b", b"c", b"d", b"e"].iter().map(|k| k.to_vec()).collect();
        assert_eq!(collect(&mut cursor), expected);
        // Exhausted cursors stay exhausted
        assert_eq!(cursor.next().expect("next"), None);
        assert!(cursor.current().is_none());
    }

    #[test]
    fn test_seek_respects_lower_bound() {
        let engine = engine_with(&[b"a", b"b", b"c"]);
        let tx = engine.begin_read().expect("begin read");
        let mut cursor = tx
            .range("t", Bound::Included(b"b".as_slice()), Bound::Unbounded)
            .expect("range");

        let first = cursor.seek(b"a").expect("seek");
        assert_eq!(first.map(|(k, _)| k), Some(b"b".to_vec()));
        assert_eq!(cursor.current().map(|(k, _)| k.to_vec()), Some(b"b".to_vec()));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let engine = engine_with(&[b"a", b"b"]);
        let tx = engine.begin_read().expect("begin read");
        let mut cursor = tx
            .range("t", Bound::Included(b"b".as_slice()), Bound::Excluded(b"a".as_slice()))
            .expect("range");
        assert_eq!(cursor.next().expect("next"), None);
    }

    #[test]
    fn test_write_through_read_transaction_fails() {
        let engine = engine_with(&[]);
        let mut tx = engine.begin_read().expect("begin read");
        assert!(tx.put("t", b"k", b"v").expect_err("read-only").is_read_only());
        assert!(tx.delete("t", b"k").expect_err("read-only").is_read_only());
    }
}
