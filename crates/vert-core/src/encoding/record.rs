//! Stored vertex and edge records.
//!
//! A vertex record carries the vertex's labels and attributes together with
//! both halves of its adjacency bookkeeping; an edge record carries only labels
//! and attributes, since its endpoints are its key.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{CoreError, CoreResult};
use crate::types::{Label, Value, VertexId};

use super::traits::{Decoder, Encoder};

/// Everything a persistent store keeps for one vertex.
///
/// Encoded as the JSON array `[labels, data, sources, sinks]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexRecord {
    /// Labels on the vertex.
    pub labels: BTreeSet<Label>,
    /// Attribute map of the vertex.
    pub data: BTreeMap<String, Value>,
    /// Vertices with an edge into this one.
    pub sources: BTreeSet<VertexId>,
    /// Vertices this one has an edge into.
    pub sinks: BTreeSet<VertexId>,
}

/// Everything a persistent store keeps for one edge.
///
/// Encoded as the JSON array `[labels, data]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeRecord {
    /// Labels on the edge.
    pub labels: BTreeSet<Label>,
    /// Attribute map of the edge.
    pub data: BTreeMap<String, Value>,
}

fn check_representable(data: &BTreeMap<String, Value>) -> CoreResult<()> {
    match data.iter().find(|(_, value)| !value.is_representable()) {
        Some((key, value)) => Err(CoreError::Encoding(format!(
            "attribute {key:?} holds a {} with no textual form",
            value.type_name()
        ))),
        None => Ok(()),
    }
}

impl Encoder for VertexRecord {
    fn encode(&self) -> CoreResult<Vec<u8>> {
        check_representable(&self.data)?;
        Ok(serde_json::to_vec(&(&self.labels, &self.data, &self.sources, &self.sinks))?)
    }
}

impl Decoder for VertexRecord {
    fn decode(bytes: &[u8]) -> CoreResult<Self> {
        let (labels, data, sources, sinks): (
            BTreeSet<Label>,
            BTreeMap<String, Value>,
            BTreeSet<VertexId>,
            BTreeSet<VertexId>,
        ) = serde_json::from_slice(bytes)?;
        Ok(Self { labels, data, sources, sinks })
    }
}

impl Encoder for EdgeRecord {
    fn encode(&self) -> CoreResult<Vec<u8>> {
        check_representable(&self.data)?;
        Ok(serde_json::to_vec(&(&self.labels, &self.data))?)
    }
}

impl Decoder for EdgeRecord {
    fn decode(bytes: &[u8]) -> CoreResult<Self> {
        let (labels, data): (BTreeSet<Label>, BTreeMap<String, Value>) =
            serde_json::from_slice(bytes)?;
        Ok(Self { labels, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_records_encode_as_arrays() {
        assert_eq!(VertexRecord::default().encode().expect("encode"), b"[[],{},[],[]]");
        assert_eq!(EdgeRecord::default().encode().expect("encode"), b"[[],{}]");
    }

    #[test]
    fn vertex_record_roundtrip() {
        let mut record = VertexRecord::default();
        record.labels.insert(Label::new("red"));
        record.data.insert("weight".into(), Value::Float(0.5));
        record.data.insert("tags".into(), Value::List(vec!["x".into(), 3i64.into()]));
        record.sources.insert(VertexId::from(1));
        record.sinks.insert(VertexId::from("b"));

        let decoded = VertexRecord::decode(&record.encode().expect("encode")).expect("decode");
        assert_eq!(decoded, record);
    }

    #[test]
    fn edge_record_roundtrip() {
        let mut record = EdgeRecord::default();
        record.labels.insert(Label::new("knows"));
        record.data.insert("since".into(), Value::Int(2017));

        let decoded = EdgeRecord::decode(&record.encode().expect("encode")).expect("decode");
        assert_eq!(decoded, record);
    }

    #[test]
    fn non_finite_attribute_is_rejected() {
        let mut record = EdgeRecord::default();
        record.data.insert("bad".into(), Value::Float(f64::NAN));
        let err = record.encode().expect_err("NaN has no JSON form");
        assert!(err.to_string().contains("bad"));
    }

    #[test]
    fn malformed_bytes_fail_to_decode() {
        assert!(VertexRecord::decode(b"[[],{}]").is_err());
        assert!(EdgeRecord::decode(b"{}").is_err());
    }
}
