//! [`StorageEngine`] on a redb database, file-backed or in memory.

use std::path::Path;

use redb::Database;
use tracing::debug;

use crate::engine::{StorageEngine, StorageError};

use super::transaction::RedbTransaction;

/// Options applied when a redb database is opened.
#[derive(Debug, Clone, Copy)]
pub struct RedbConfig {
    /// Bytes of page cache; redb picks when unset.
    pub cache_size: Option<usize>,

    /// Create the database file when it does not exist yet.
    pub create_if_missing: bool,
}

impl Default for RedbConfig {
    fn default() -> Self {
        Self { cache_size: None, create_if_missing: true }
    }
}

impl RedbConfig {
    /// Defaults: redb's own cache size, create missing files.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes of page cache redb may use.
    #[must_use]
    pub const fn cache_size(mut self, size: usize) -> Self {
        self.cache_size = Some(size);
        self
    }

    /// Whether a missing file is created or reported.
    #[must_use]
    pub const fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }
}

/// One redb database. Every logical table lives in a single physical table.
///
/// # Example
///
/// ```ignore
/// use vert_storage::backends::RedbEngine;
///
/// let engine = RedbEngine::open("graph.redb")?;
///
/// let mut tx = engine.begin_write()?;
/// tx.put("graph", b"v1", b"[[],{},[],[]]")?;
/// tx.commit()?;
/// ```
pub struct RedbEngine {
    db: Database,
}

impl RedbEngine {
    /// Open the database at `path`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be opened or created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::open_with_config(path, RedbConfig::default())
    }

    /// Open the database at `path` with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be opened, or if
    /// the file is missing and `create_if_missing` is off.
    pub fn open_with_config(
        path: impl AsRef<Path>,
        config: RedbConfig,
    ) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let mut builder = Database::builder();

        if let Some(cache_size) = config.cache_size {
            builder.set_cache_size(cache_size);
        }

        let db = if config.create_if_missing {
            builder.create(path)
        } else {
            builder.open(path)
        }
        .map_err(|e| StorageError::Open(format!("{}: {e}", path.display())))?;

        debug!(path = %path.display(), cache_size = ?config.cache_size, "opened redb database");

        Ok(Self { db })
    }

    /// A database that lives only as long as the engine.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let db = Database::builder()
            .create_with_backend(redb::backends::InMemoryBackend::new())
            .map_err(|e| StorageError::Open(e.to_string()))?;

        Ok(Self { db })
    }

    /// The wrapped redb handle.
    pub const fn inner(&self) -> &Database {
        &self.db
    }
}

impl StorageEngine for RedbEngine {
    type Transaction<'a> = RedbTransaction;

    fn begin_read(&self) -> Result<Self::Transaction<'_>, StorageError> {
        let tx = self.db.begin_read().map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(RedbTransaction::new_read(tx))
    }

    fn begin_write(&self) -> Result<Self::Transaction<'_>, StorageError> {
        let tx = self.db.begin_write().map_err(|e| StorageError::Transaction(e.to_string()))?;
        Ok(RedbTransaction::new_write(tx))
    }

    // Commits are durable in redb, so the default no-op flush is enough.
}
