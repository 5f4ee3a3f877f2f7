//! Core data types for `vert`.
//!
//! This module defines the identifiers, labels and attribute values that
//! every graph store speaks.

mod id;
mod label;
mod value;

pub use id::{EdgeId, VertexId};
pub use label::Label;
pub use value::Value;
