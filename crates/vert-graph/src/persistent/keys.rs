//! Mapping between graph identifiers and backing-store keys.

use std::fmt;
use std::hash::Hash;

use vert_core::encoding::keys::{
    decode_edge_key, decode_vertex_key, encode_edge_key, encode_vertex_key, EDGE_PREFIX,
    VERTEX_PREFIX,
};
use vert_core::{CoreResult, EdgeId, VertexId};

/// The logical table every graph record and counter lives in.
pub(crate) const GRAPH_TABLE: &str = "graph";

/// An identifier that names one record in the backing store.
pub(crate) trait RecordKey: Clone + Eq + Hash + fmt::Display {
    /// Tag byte shared by every key of this kind.
    const TAG: u8;

    fn to_key(&self) -> CoreResult<Vec<u8>>;

    fn from_key(key: &[u8]) -> CoreResult<Self>;
}

impl RecordKey for VertexId {
    const TAG: u8 = VERTEX_PREFIX;

    fn to_key(&self) -> CoreResult<Vec<u8>> {
        encode_vertex_key(self)
    }

    fn from_key(key: &[u8]) -> CoreResult<Self> {
        decode_vertex_key(key)
    }
}

impl RecordKey for EdgeId {
    const TAG: u8 = EDGE_PREFIX;

    fn to_key(&self) -> CoreResult<Vec<u8>> {
        encode_edge_key(self)
    }

    fn from_key(key: &[u8]) -> CoreResult<Self> {
        decode_edge_key(key)
    }
}
