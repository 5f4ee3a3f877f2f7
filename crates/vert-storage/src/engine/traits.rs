//! The key-value interface persistent graph stores are written against.
//!
//! A backend supplies three pieces:
//!
//! - [`StorageEngine`] opens transactions on a database it owns
//! - [`Transaction`] reads and writes byte pairs in named logical tables
//! - [`Cursor`] walks one table in ascending key order
//!
//! Transactions and cursors are generic associated types, so callers stay
//! monomorphic over the backend.

use std::ops::Bound;
use std::sync::Arc;

use super::StorageError;

/// A key and its value, both owned.
pub type KeyValue = (Vec<u8>, Vec<u8>);

/// What a cursor move yields: the entry it landed on, or `None` past the end.
pub type CursorResult = Result<Option<KeyValue>, StorageError>;

/// An ordered byte-keyed database that hands out transactions.
///
/// Engines are `Send + Sync` so one can sit behind an [`Arc`] and be used by
/// several owners. A graph store only ever holds one transaction at a time,
/// but concurrent read transactions must be allowed.
///
/// ```ignore
/// fn store_vertex<E: StorageEngine>(engine: &E) -> Result<bool, StorageError> {
///     let mut tx = engine.begin_write()?;
///     tx.put("graph", b"v\"a\"", b"[[],{},[],[]]")?;
///     tx.commit()?;
///
///     engine.begin_read()?.contains("graph", b"v\"a\"")
/// }
/// ```
pub trait StorageEngine: Send + Sync {
    /// Transaction handed out by [`begin_read`](Self::begin_read) and
    /// [`begin_write`](Self::begin_write).
    type Transaction<'a>: Transaction
    where
        Self: 'a;

    /// Start a snapshot read.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transaction`] if the backend refuses.
    fn begin_read(&self) -> Result<Self::Transaction<'_>, StorageError>;

    /// Start a write. Its changes are visible to later transactions only
    /// after [`Transaction::commit`].
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transaction`] if the backend refuses.
    fn begin_write(&self) -> Result<Self::Transaction<'_>, StorageError>;

    /// Push committed data to durable media.
    ///
    /// Backends that are durable on commit keep this default no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if syncing fails.
    fn flush(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Point and range access to logical tables inside one transaction.
///
/// A table springs into existence on its first write; reading a table that
/// was never written is the same as reading an empty one. Dropping a write
/// transaction without committing abandons it.
pub trait Transaction {
    /// Cursor handed out by [`range`](Self::range).
    type Cursor<'a>: Cursor
    where
        Self: 'a;

    /// The value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, table: &str, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError>;

    /// Whether a value is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn contains(&self, table: &str, key: &[u8]) -> Result<bool, StorageError> {
        Ok(self.get(table, key)?.is_some())
    }

    /// Store `value` under `key`, overwriting what was there.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ReadOnly`] inside a read transaction.
    fn put(&mut self, table: &str, key: &[u8], value: &[u8]) -> Result<(), StorageError>;

    /// Remove `key`. Returns whether it was present.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ReadOnly`] inside a read transaction.
    fn delete(&mut self, table: &str, key: &[u8]) -> Result<bool, StorageError>;

    /// A cursor over the whole table.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn cursor(&self, table: &str) -> Result<Self::Cursor<'_>, StorageError> {
        self.range(table, Bound::Unbounded, Bound::Unbounded)
    }

    /// A cursor over the keys of `table` between `start` and `end`.
    ///
    /// An empty or inverted range yields nothing. Scanning every vertex key:
    ///
    /// ```ignore
    /// let cursor = tx.range(
    ///     "graph",
    ///     Bound::Included(b"v".as_slice()),
    ///     Bound::Excluded(b"w".as_slice()),
    /// )?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn range(
        &self,
        table: &str,
        start: Bound<&[u8]>,
        end: Bound<&[u8]>,
    ) -> Result<Self::Cursor<'_>, StorageError>;

    /// Make the transaction's writes visible and durable.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transaction`] if the backend cannot commit.
    fn commit(self) -> Result<(), StorageError>;

    /// Throw the transaction's writes away.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Transaction`] if the backend cannot abort.
    fn rollback(self) -> Result<(), StorageError>;

    /// Whether writes are refused.
    fn is_read_only(&self) -> bool;
}

/// A forward walk over the keys of one table range.
///
/// A fresh cursor sits before its first entry; the first [`next`](Self::next)
/// lands on it.
///
/// ```ignore
/// let mut cursor = tx.cursor("graph")?;
/// cursor.seek(b"e")?;
/// while let Some((key, _)) = cursor.current().map(|(k, v)| (k.to_vec(), v.to_vec())) {
///     // ...
///     cursor.next()?;
/// }
/// ```
pub trait Cursor {
    /// Land on the first key at or after `key`, clamped to the range.
    fn seek(&mut self, key: &[u8]) -> CursorResult;

    /// Land on the first key of the range.
    fn seek_first(&mut self) -> CursorResult;

    /// Step to the following key.
    fn next(&mut self) -> CursorResult;

    /// The entry the cursor sits on, without moving.
    ///
    /// `None` before the first move and once the range is exhausted.
    fn current(&self) -> Option<(&[u8], &[u8])>;
}

// Sharing an engine: a graph store built on an `Arc` clone releases only its
// own clone when it closes.
impl<E: StorageEngine> StorageEngine for Arc<E> {
    type Transaction<'a>
        = E::Transaction<'a>
    where
        Self: 'a;

    fn begin_read(&self) -> Result<Self::Transaction<'_>, StorageError> {
        (**self).begin_read()
    }

    fn begin_write(&self) -> Result<Self::Transaction<'_>, StorageError> {
        (**self).begin_write()
    }

    fn flush(&self) -> Result<(), StorageError> {
        (**self).flush()
    }
}
