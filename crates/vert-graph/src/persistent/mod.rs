//! Persistent graph store over a key-value storage engine.
//!
//! [`PersistentGraphStore`] keeps one record per vertex and per edge in a
//! single logical table of a [`StorageEngine`](vert_storage::StorageEngine),
//! plus two counters. Records are reached through two bounded write-back
//! caches, one for vertices and one for edges, sized by [`PersistentConfig`].
//!
//! # Key Layout
//!
//! See [`vert_core::encoding::keys`] for the byte layout of record and
//! counter keys.

mod cache;
mod config;
mod keys;
mod scan;
mod store;

pub use cache::CacheStats;
pub use config::{PersistentConfig, DEFAULT_CACHE_SIZE};
pub use store::PersistentGraphStore;
