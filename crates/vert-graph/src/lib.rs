//! `vert` Graph
//!
//! This crate provides the storage contract for `vert` graphs and its two
//! backends.
//!
//! # Overview
//!
//! - [`GraphStore`] - vertices, directed edges, labels, attributes and
//!   adjacency, all with "soft" semantics
//! - [`MemoryGraphStore`] - adjacency sets in process memory
//! - [`PersistentGraphStore`] - records in a key-value storage engine behind
//!   per-kind write-back caches
//!
//! # Example
//!
//! ```
//! use vert_core::{EdgeId, Label, VertexId};
//! use vert_graph::{GraphId, GraphStore, MemoryGraphStore};
//!
//! let mut store = MemoryGraphStore::new(GraphId::next());
//! store.add_edge(&EdgeId::new("a", "b"))?;
//! store.add_vertex_label(&VertexId::from("a"), &Label::new("person"))?;
//!
//! assert_eq!(store.count_vertices()?, 2);
//! assert!(store.has_sink(&VertexId::from("a"))?);
//! # Ok::<(), vert_graph::GraphError>(())
//! ```
//!
//! # Modules
//!
//! - [`store`] - The store contract, errors and the in-memory backend
//! - [`persistent`] - The key-value backed store and its cache

#![deny(clippy::unwrap_used)]

pub mod persistent;
pub mod store;

pub use persistent::{CacheStats, PersistentConfig, PersistentGraphStore};
pub use store::{GraphError, GraphId, GraphResult, GraphStore, MemoryGraphStore, StoreIter};
