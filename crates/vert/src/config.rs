//! Graph configuration.

use std::path::PathBuf;

use vert_graph::persistent::{PersistentConfig, DEFAULT_CACHE_SIZE};

/// Configuration options for opening a persistent graph.
///
/// # Example
///
/// ```
/// use vert::Config;
///
/// let config = Config::new("social.redb").create_if_missing(false).cache_size(256);
/// assert_eq!(config.vertex_cache_size, 256);
/// assert_eq!(config.edge_cache_size, 256);
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the database file.
    pub path: PathBuf,
    /// Whether to create the database if it doesn't exist.
    pub create_if_missing: bool,
    /// Vertex records held in the write-back cache. Zero disables it.
    pub vertex_cache_size: usize,
    /// Edge records held in the write-back cache. Zero disables it.
    pub edge_cache_size: usize,
}

impl Config {
    /// Create a new configuration with the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_if_missing: true,
            vertex_cache_size: DEFAULT_CACHE_SIZE,
            edge_cache_size: DEFAULT_CACHE_SIZE,
        }
    }

    /// Set whether to create the database if it doesn't exist.
    #[must_use]
    pub const fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
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

    /// Set both cache capacities.
    #[must_use]
    pub const fn cache_size(self, size: usize) -> Self {
        self.vertex_cache_size(size).edge_cache_size(size)
    }

    pub(crate) fn store_config(&self) -> PersistentConfig {
        PersistentConfig::new()
            .vertex_cache_size(self.vertex_cache_size)
            .edge_cache_size(self.edge_cache_size)
            .create_if_missing(self.create_if_missing)
    }
}
