//! Key encoding for the flat graph keyspace.
//!
//! Every logical key a persistent store writes lives in one byte-keyed map.
//! Record keys are a one-byte tag followed by the JSON text of the identifier,
//! which is reversible and keeps keys of one kind contiguous in byte order.
//!
//! # Key Layout
//!
//! - `v` + JSON vertex id - vertex record
//! - `e` + JSON `[source, sink]` - edge record
//! - `cv` - vertex counter (decimal text)
//! - `ce` - edge counter (decimal text)
//!
//! The counter keys start with `c`, so they never fall inside the vertex or
//! edge ranges returned by [`prefix_range`].

use crate::error::{CoreError, CoreResult};
use crate::types::{EdgeId, VertexId};

/// Key tag for vertex records.
pub const VERTEX_PREFIX: u8 = b'v';
/// Key tag for edge records.
pub const EDGE_PREFIX: u8 = b'e';
/// Key holding the number of vertices.
pub const VERTEX_COUNT_KEY: &[u8] = b"cv";
/// Key holding the number of edges.
pub const EDGE_COUNT_KEY: &[u8] = b"ce";

/// Encode a vertex ID as a storage key.
///
/// # Errors
///
/// Returns [`CoreError::Encoding`] if the identifier cannot be serialized.
pub fn encode_vertex_key(id: &VertexId) -> CoreResult<Vec<u8>> {
    let mut key = vec![VERTEX_PREFIX];
    serde_json::to_writer(&mut key, id)?;
    Ok(key)
}

/// Decode a storage key produced by [`encode_vertex_key`].
///
/// # Errors
///
/// Returns [`CoreError::InvalidKey`] if the key does not carry the vertex tag
/// or its body is not a vertex identifier.
pub fn decode_vertex_key(key: &[u8]) -> CoreResult<VertexId> {
    let body = strip_tag(key, VERTEX_PREFIX)?;
    serde_json::from_slice(body).map_err(|e| CoreError::invalid_key(key, e.to_string()))
}

/// Encode an edge ID as a storage key.
///
/// The body is the two-element JSON array `[source, sink]`.
///
/// # Errors
///
/// Returns [`CoreError::Encoding`] if the identifier cannot be serialized.
pub fn encode_edge_key(id: &EdgeId) -> CoreResult<Vec<u8>> {
    let mut key = vec![EDGE_PREFIX];
    serde_json::to_writer(&mut key, &(&id.source, &id.sink))?;
    Ok(key)
}

/// Decode a storage key produced by [`encode_edge_key`].
///
/// # Errors
///
/// Returns [`CoreError::InvalidKey`] if the key does not carry the edge tag or
/// its body is not a pair of vertex identifiers.
pub fn decode_edge_key(key: &[u8]) -> CoreResult<EdgeId> {
    let body = strip_tag(key, EDGE_PREFIX)?;
    let (source, sink): (VertexId, VertexId) =
        serde_json::from_slice(body).map_err(|e| CoreError::invalid_key(key, e.to_string()))?;
    Ok(EdgeId { source, sink })
}

/// The half-open byte range `[tag, tag + 1)` covering every key with `tag`.
#[must_use]
pub fn prefix_range(tag: u8) -> (Vec<u8>, Vec<u8>) {
    (vec![tag], vec![tag.saturating_add(1)])
}

/// Encode a counter value as decimal text.
#[must_use]
pub fn encode_count(count: u64) -> Vec<u8> {
    count.to_string().into_bytes()
}

/// Decode a counter value written by [`encode_count`].
///
/// # Errors
///
/// Returns [`CoreError::Encoding`] if the bytes are not a decimal number.
pub fn decode_count(bytes: &[u8]) -> CoreResult<u64> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|text| text.trim().parse().ok())
        .ok_or_else(|| {
            CoreError::Encoding(format!(
                "invalid counter value: {:?}",
                String::from_utf8_lossy(bytes)
            ))
        })
}

fn strip_tag(key: &[u8], tag: u8) -> CoreResult<&[u8]> {
    match key.split_first() {
        Some((first, body)) if *first == tag => Ok(body),
        _ => Err(CoreError::invalid_key(key, format!("expected tag {:?}", char::from(tag)))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_key_layout() {
        let key = encode_vertex_key(&VertexId::from("alice")).expect("encode");
        assert_eq!(key, b"v\"alice\"");
        let key = encode_vertex_key(&VertexId::from(42)).expect("encode");
        assert_eq!(key, b"v42");
    }

    #[test]
    fn edge_key_layout() {
        let key = encode_edge_key(&EdgeId::new("a", 7)).expect("encode");
        assert_eq!(key, b"e[\"a\",7]");
    }

    #[test]
    fn vertex_key_roundtrip_all_kinds() {
        for id in [VertexId::from(-9), VertexId::from("x y"), VertexId::from(vec![0u8, 255])] {
            let key = encode_vertex_key(&id).expect("encode");
            assert_eq!(decode_vertex_key(&key).expect("decode"), id);
        }
    }

    #[test]
    fn edge_key_roundtrip() {
        let id = EdgeId::new(vec![1u8], "b");
        let key = encode_edge_key(&id).expect("encode");
        assert_eq!(decode_edge_key(&key).expect("decode"), id);
    }

    #[test]
    fn wrong_tag_is_rejected() {
        let key = encode_edge_key(&EdgeId::new(1, 2)).expect("encode");
        assert!(matches!(decode_vertex_key(&key), Err(CoreError::InvalidKey { .. })));
        assert!(decode_edge_key(b"").is_err());
        assert!(decode_vertex_key(b"vnot json").is_err());
    }

    #[test]
    fn keys_fall_inside_their_prefix_range() {
        let (start, end) = prefix_range(VERTEX_PREFIX);
        let key = encode_vertex_key(&VertexId::from("z")).expect("encode");
        assert!(key.as_slice() >= start.as_slice() && key.as_slice() < end.as_slice());

        let (start, end) = prefix_range(EDGE_PREFIX);
        let key = encode_edge_key(&EdgeId::new("a", "b")).expect("encode");
        assert!(key.as_slice() >= start.as_slice() && key.as_slice() < end.as_slice());
    }

    #[test]
    fn counter_keys_are_outside_record_ranges() {
        for tag in [VERTEX_PREFIX, EDGE_PREFIX] {
            let (start, end) = prefix_range(tag);
            for key in [VERTEX_COUNT_KEY, EDGE_COUNT_KEY] {
                assert!(key < start.as_slice() || key >= end.as_slice());
            }
        }
    }

    #[test]
    fn counter_roundtrip() {
        assert_eq!(encode_count(0), b"0");
        assert_eq!(decode_count(&encode_count(1234)).expect("decode"), 1234);
        assert!(decode_count(b"-1").is_err());
        assert!(decode_count(b"twelve").is_err());
    }
}
