//! `vert` Core
//!
//! This crate provides the identifier, value, and encoding types shared by
//! every `vert` graph store.
//!
//! # Overview
//!
//! - **Identifiers**: [`VertexId`] (integer, string, or byte sequence) and
//!   [`EdgeId`], a directed `(source, sink)` pair of vertex identifiers
//! - **Labels**: [`Label`], a membership-only tag on a vertex or edge
//! - **Values**: [`Value`], the JSON-shaped attribute value model
//! - **Encoding**: tag-prefixed textual keys and JSON records for
//!   key-value backed stores, see [`encoding`]
//!
//! # Example
//!
//! ```
//! use vert_core::{EdgeId, Label, Value, VertexId};
//!
//! let alice = VertexId::from("alice");
//! let bob = VertexId::from(7);
//! let knows = EdgeId::new(alice.clone(), bob.clone());
//!
//! assert_eq!(knows.source, alice);
//! assert_eq!(knows.sink, bob);
//! assert_eq!(Label::from("person").as_str(), "person");
//! assert_eq!(Value::from(30i64).as_int(), Some(30));
//! ```
//!
//! # Modules
//!
//! - [`types`] - Identifier, label and value types
//! - [`encoding`] - Key and record encoding for persistent stores
//! - [`error`] - Error types ([`CoreError`])

#![deny(clippy::unwrap_used)]

pub mod encoding;
pub mod error;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{EdgeId, Label, Value, VertexId};
