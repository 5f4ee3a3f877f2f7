//! Configuration for persistent graph stores.

use vert_storage::backends::RedbConfig;

/// Default number of records each cache holds.
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// Configuration options for a [`PersistentGraphStore`](super::PersistentGraphStore).
///
/// # Example
///
/// ```
/// use vert_graph::persistent::PersistentConfig;
///
/// let config = PersistentConfig::new()
///     .vertex_cache_size(4096)
///     .edge_cache_size(0); // write edges straight through
///
/// assert_eq!(config.vertex_cache_size, 4096);
/// assert_eq!(config.edge_cache_size, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistentConfig {
    /// Maximum number of vertex records kept in the write-back cache.
    /// Zero disables vertex caching.
    pub vertex_cache_size: usize,

    /// Maximum number of edge records kept in the write-back cache.
    /// Zero disables edge caching.
    pub edge_cache_size: usize,

    /// Page cache size in bytes for the redb database.
    /// If not set, uses redb's default.
    pub redb_cache_size: Option<usize>,

    /// Create the database file when it does not exist yet.
    pub create_if_missing: bool,
}

impl Default for PersistentConfig {
    fn default() -> Self {
        Self {
            vertex_cache_size: DEFAULT_CACHE_SIZE,
            edge_cache_size: DEFAULT_CACHE_SIZE,
            redb_cache_size: None,
            create_if_missing: true,
        }
    }
}

impl PersistentConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vertex cache capacity.
    #[must_use]
    pub const fn vertex_cache_size(mut self, size: usize) -> Self {
        self.vertex_cache_size = size;
        self
    }

    /// Set the edge cache capacity.
    #[must_use]
    pub const fn edge_cache_size(mut self, size: usize) -> Self {
        self.edge_cache_size = size;
        self
    }

    /// Set both cache capacities at once.
    #[must_use]
    pub const fn cache_size(self, size: usize) -> Self {
        self.vertex_cache_size(size).edge_cache_size(size)
    }

    /// Set the redb page cache size.
    #[must_use]
    pub const fn redb_cache_size(mut self, size: usize) -> Self {
        self.redb_cache_size = Some(size);
        self
    }

    /// Set whether a missing database file is created or reported as an error.
    #[must_use]
    pub const fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// The storage engine configuration derived from this one.
    #[must_use]
    pub fn redb_config(&self) -> RedbConfig {
        let config = RedbConfig::new().create_if_missing(self.create_if_missing);
        match self.redb_cache_size {
            Some(size) => config.cache_size(size),
            None => config,
        }
    }
}
