//! Key and record encoding for key-value backed graph stores.
//!
//! A persistent graph store keeps every vertex, every edge, and two global
//! counters in one flat byte-keyed map. This module defines how each of those
//! is turned into bytes and back.
//!
//! # Keys
//!
//! The [`keys`] module encodes logical keys as a one-byte tag followed by the
//! JSON text of the identifier:
//!
//! - `v<json vertex id>` - vertex records, e.g. `v"alice"` or `v42`
//! - `e<json [source, sink]>` - edge records, e.g. `e["alice",42]`
//! - `cv` / `ce` - vertex and edge counters, stored as decimal text
//!
//! Because the tag is the first byte, a scan over the range of one tag yields
//! exactly the vertices or exactly the edges.
//!
//! # Records
//!
//! The [`record`] module defines [`VertexRecord`] and [`EdgeRecord`], encoded
//! as the JSON arrays `[labels, data, sources, sinks]` and `[labels, data]`.
//!
//! # Example
//!
//! ```
//! use vert_core::encoding::{Decoder, Encoder, VertexRecord};
//! use vert_core::{Label, VertexId};
//!
//! let mut record = VertexRecord::default();
//! record.labels.insert(Label::new("person"));
//! record.sinks.insert(VertexId::from("bob"));
//!
//! let bytes = record.encode().unwrap();
//! assert_eq!(bytes, br#"[["person"],{},[],["bob"]]"#);
//!
//! let decoded = VertexRecord::decode(&bytes).unwrap();
//! assert_eq!(decoded, record);
//! ```

pub mod keys;
pub mod record;
mod traits;

#[cfg(test)]
mod proptest_tests;

pub use record::{EdgeRecord, VertexRecord};
pub use traits::{Decoder, Encoder};
