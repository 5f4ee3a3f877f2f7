//! `vert` Storage
//!
//! This crate provides the key-value storage engine abstraction and backend
//! implementations that persistent graph stores are built on.
//!
//! # Overview
//!
//! The storage layer is a byte-keyed, byte-valued ordered map with
//! transactional access. A persistent graph store only needs point reads and
//! writes, deletes, and ordered scans over a key range; any backend offering
//! those can carry a graph.
//!
//! # Core Traits
//!
//! - [`StorageEngine`] - The main entry point for storage operations
//! - [`Transaction`] - Read/write operations on logical tables
//! - [`Cursor`] - Ordered iteration over key-value pairs
//!
//! # Error Handling
//!
//! All storage operations return [`StorageResult<T>`], which is an alias for
//! `Result<T, StorageError>`.
//!
//! # Example
//!
//! ```
//! use vert_storage::backends::RedbEngine;
//! use vert_storage::{StorageEngine, Transaction};
//!
//! let engine = RedbEngine::in_memory()?;
//!
//! let mut tx = engine.begin_write()?;
//! tx.put("graph", b"v1", b"[[],{},[],[]]")?;
//! tx.commit()?;
//!
//! let tx = engine.begin_read()?;
//! assert!(tx.contains("graph", b"v1")?);
//! # Ok::<(), vert_storage::StorageError>(())
//! ```
//!
//! # Modules
//!
//! - [`engine`] - Storage engine traits and abstractions
//! - [`backends`] - Concrete storage backend implementations

#![deny(clippy::unwrap_used)]

pub mod backends;
pub mod engine;

pub use engine::{
    Cursor, CursorResult, KeyValue, StorageEngine, StorageError, StorageResult, Transaction,
};
