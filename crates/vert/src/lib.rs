//! `vert` - A Pluggable Graph Data Model
//!
//! `vert` stores directed graphs of vertices and edges, each carrying a set
//! of labels and a map of attributes, behind one interface no matter which
//! backend holds the data.
//!
//! # Features
//!
//! - **In-memory graphs**: adjacency sets in process memory
//! - **Persistent graphs**: records in a redb database behind a bounded
//!   write-back cache, with explicit flush and close
//! - **Handles**: vertex and edge handles bound to the graph that made them
//! - **Collection views**: label sets, attribute maps and inbound/outbound
//!   edge sets for any vertex or edge
//!
//! # Quick Start
//!
//! ```
//! use vert::{AttributeMap, Graph, LabelSet, Value};
//!
//! let mut graph = Graph::in_memory();
//!
//! let alice = graph.add_vertex("alice")?;
//! graph.vertex_labels(&alice)?.add("person")?;
//! graph.vertex_data(&alice)?.insert("age", 30i64)?;
//!
//! let edge = graph.add_edge(&alice, "bob")?;
//! graph.edge_data(&edge)?.insert("since", 2017i64)?;
//!
//! assert_eq!(graph.vertex_count()?, 2);
//! assert_eq!(graph.vertex_data(&alice)?.get("age")?, Some(Value::Int(30)));
//! assert!(graph.inbound("bob")?.contains(&edge)?);
//! # Ok::<(), vert::Error>(())
//! ```
//!
//! ## Persistent graphs
//!
//! ```no_run
//! use vert::{Config, Graph};
//!
//! let mut graph = Graph::open_with_config(Config::new("social.redb").cache_size(4096))?;
//! graph.add_edge("alice", "bob")?;
//! graph.close()?;
//! # Ok::<(), vert::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`graph`] - The [`Graph`] handle
//! - [`handle`] - Vertex and edge handles and references
//! - [`views`] - Label, attribute and adjacency views
//! - [`config`] - Persistent graph configuration
//! - [`error`] - Error types

#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod graph;
pub mod handle;
pub mod views;

pub use config::Config;
pub use error::{Error, Result};
pub use graph::{Graph, MemoryGraph, PersistentGraph};
pub use handle::{EdgeHandle, EdgeRef, VertexHandle, VertexRef};
pub use views::{
    AttributeMap, EdgeData, EdgeLabels, InboundEdges, Iter, LabelSet, OutboundEdges, VertexData,
    VertexLabels,
};

pub use vert_core::{EdgeId, Label, Value, VertexId};
pub use vert_graph::persistent::{CacheStats, PersistentConfig, PersistentGraphStore};
pub use vert_graph::{GraphError, GraphId, GraphStore, MemoryGraphStore};
