//! Property-based tests for key and record encoding.

#![allow(clippy::expect_used, clippy::float_cmp)]

use proptest::prelude::*;

use super::keys::{decode_edge_key, decode_vertex_key, encode_edge_key, encode_vertex_key};
use super::{Decoder, EdgeRecord, Encoder, VertexRecord};
use crate::types::{EdgeId, Label, Value, VertexId};

/// Strategy for generating arbitrary `VertexId` instances.
fn arb_vertex_id() -> impl Strategy<Value = VertexId> {
    prop_oneof![
        any::<i64>().prop_map(VertexId::Int),
        ".*".prop_map(VertexId::Str),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(VertexId::Bytes),
    ]
}

/// Strategy for generating arbitrary `Value` instances.
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        // JSON has no NaN or infinities
        any::<f64>().prop_filter("finite", |f| f.is_finite()).prop_map(Value::Float),
        ".*".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        3,  // depth
        64, // size
        8,  // items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(Value::List),
                prop::collection::btree_map("[a-z]{0,6}", inner, 0..8).prop_map(Value::Map),
            ]
        },
    )
}

/// Strategy for generating arbitrary `Label` instances.
fn arb_label() -> impl Strategy<Value = Label> {
    "[a-zA-Z][a-zA-Z0-9_]*".prop_map(Label::new)
}

fn arb_vertex_record() -> impl Strategy<Value = VertexRecord> {
    (
        prop::collection::btree_set(arb_label(), 0..5),
        prop::collection::btree_map("[a-zA-Z_][a-zA-Z0-9_]*", arb_value(), 0..6),
        prop::collection::btree_set(arb_vertex_id(), 0..5),
        prop::collection::btree_set(arb_vertex_id(), 0..5),
    )
        .prop_map(|(labels, data, sources, sinks)| VertexRecord { labels, data, sources, sinks })
}

proptest! {
    #[test]
    fn vertex_key_roundtrip(id in arb_vertex_id()) {
        let key = encode_vertex_key(&id).expect("encoding should succeed");
        prop_assert_eq!(decode_vertex_key(&key).expect("decoding should succeed"), id);
    }

    #[test]
    fn edge_key_roundtrip(source in arb_vertex_id(), sink in arb_vertex_id()) {
        let id = EdgeId { source, sink };
        let key = encode_edge_key(&id).expect("encoding should succeed");
        prop_assert_eq!(decode_edge_key(&key).expect("decoding should succeed"), id);
    }

    #[test]
    fn distinct_vertex_ids_get_distinct_keys(a in arb_vertex_id(), b in arb_vertex_id()) {
        let ka = encode_vertex_key(&a).expect("encoding should succeed");
        let kb = encode_vertex_key(&b).expect("encoding should succeed");
        prop_assert_eq!(a == b, ka == kb);
    }

    #[test]
    fn vertex_record_roundtrip(record in arb_vertex_record()) {
        let encoded = record.encode().expect("encoding should succeed");
        let decoded = VertexRecord::decode(&encoded).expect("decoding should succeed");
        prop_assert_eq!(decoded, record);
    }

    #[test]
    fn edge_record_roundtrip(
        labels in prop::collection::btree_set(arb_label(), 0..5),
        data in prop::collection::btree_map("[a-z]+", arb_value(), 0..6),
    ) {
        let record = EdgeRecord { labels, data };
        let encoded = record.encode().expect("encoding should succeed");
        let decoded = EdgeRecord::decode(&encoded).expect("decoding should succeed");
        prop_assert_eq!(decoded, record);
    }
}
