//! Identifiers for vertices and edges.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a vertex in the graph.
///
/// Vertex identifiers are opaque lookup keys chosen by the caller. They may be
/// integers, strings, or raw byte sequences. The serialized form is untagged,
/// so an identifier is a JSON number, string, or array of bytes.
///
/// # Example
///
/// ```
/// use vert_core::VertexId;
///
/// let a = VertexId::from(1);
/// let b = VertexId::from("b");
/// let c = VertexId::from(vec![0xde, 0xad]);
///
/// assert_eq!(a.as_int(), Some(1));
/// assert_eq!(b.as_str(), Some("b"));
/// assert_eq!(c.as_bytes(), Some(&[0xde, 0xad][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VertexId {
    /// 64-bit signed integer identifier
    Int(i64),
    /// UTF-8 string identifier
    Str(String),
    /// Raw byte identifier
    Bytes(Vec<u8>),
}

impl VertexId {
    /// Returns the identifier as an integer if it is one.
    #[inline]
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the identifier as a string slice if it is one.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the identifier as a byte slice if it is one.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Bytes(bytes) => {
                f.write_str("0x")?;
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<i64> for VertexId {
    #[inline]
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<i32> for VertexId {
    #[inline]
    fn from(id: i32) -> Self {
        Self::Int(i64::from(id))
    }
}

impl From<&str> for VertexId {
    #[inline]
    fn from(id: &str) -> Self {
        Self::Str(id.to_owned())
    }
}

impl From<String> for VertexId {
    #[inline]
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

impl From<Vec<u8>> for VertexId {
    #[inline]
    fn from(id: Vec<u8>) -> Self {
        Self::Bytes(id)
    }
}

impl From<&[u8]> for VertexId {
    #[inline]
    fn from(id: &[u8]) -> Self {
        Self::Bytes(id.to_vec())
    }
}

/// Identifier of a directed edge: the ordered pair `(source, sink)`.
///
/// `(a, b)` and `(b, a)` name two distinct edges. Loops (`a == b`) are allowed.
///
/// # Example
///
/// ```
/// use vert_core::{EdgeId, VertexId};
///
/// let forward = EdgeId::new("a", "b");
/// let backward = forward.reversed();
///
/// assert_ne!(forward, backward);
/// assert_eq!(backward.source, VertexId::from("b"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId {
    /// The vertex the edge leaves.
    pub source: VertexId,
    /// The vertex the edge enters.
    pub sink: VertexId,
}

impl EdgeId {
    /// Create a new edge identifier from its endpoints.
    #[inline]
    #[must_use]
    pub fn new(source: impl Into<VertexId>, sink: impl Into<VertexId>) -> Self {
        Self { source: source.into(), sink: sink.into() }
    }

    /// The identifier of the edge running the opposite way.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self { source: self.sink.clone(), sink: self.source.clone() }
    }

    /// Whether the edge starts and ends at the same vertex.
    #[inline]
    #[must_use]
    pub fn is_loop(&self) -> bool {
        self.source == self.sink
    }

    /// Whether `vid` is one of the endpoints.
    #[inline]
    #[must_use]
    pub fn touches(&self, vid: &VertexId) -> bool {
        &self.source == vid || &self.sink == vid
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} -> {})", self.source, self.sink)
    }
}

impl<A: Into<VertexId>, B: Into<VertexId>> From<(A, B)> for EdgeId {
    #[inline]
    fn from((source, sink): (A, B)) -> Self {
        Self::new(source, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_ids_of_different_kinds_differ() {
        assert_ne!(VertexId::from(1), VertexId::from("1"));
        assert_ne!(VertexId::from("a"), VertexId::from(b"a".as_slice()));
    }

    #[test]
    fn vertex_id_serializes_untagged() {
        let json = serde_json::to_string(&VertexId::from(5)).expect("serialize");
        assert_eq!(json, "5");
        let json = serde_json::to_string(&VertexId::from("x")).expect("serialize");
        assert_eq!(json, "\"x\"");
        let json = serde_json::to_string(&VertexId::from(vec![1u8, 2])).expect("serialize");
        assert_eq!(json, "[1,2]");
    }

    #[test]
    fn vertex_id_deserializes_by_shape() {
        let id: VertexId = serde_json::from_str("-3").expect("deserialize");
        assert_eq!(id, VertexId::Int(-3));
        let id: VertexId = serde_json::from_str("\"v\"").expect("deserialize");
        assert_eq!(id, VertexId::Str("v".into()));
        let id: VertexId = serde_json::from_str("[255,0]").expect("deserialize");
        assert_eq!(id, VertexId::Bytes(vec![255, 0]));
    }

    #[test]
    fn edge_direction_matters() {
        let ab = EdgeId::new("a", "b");
        assert_ne!(ab, ab.reversed());
        assert_eq!(ab, ab.reversed().reversed());
        assert!(!ab.is_loop());
        assert!(EdgeId::new(1, 1).is_loop());
    }

    #[test]
    fn edge_touches_endpoints() {
        let edge = EdgeId::from(("a", "b"));
        assert!(edge.touches(&"a".into()));
        assert!(edge.touches(&"b".into()));
        assert!(!edge.touches(&"c".into()));
    }

    #[test]
    fn display_forms() {
        assert_eq!(VertexId::from(4).to_string(), "4");
        assert_eq!(VertexId::from("a").to_string(), "\"a\"");
        assert_eq!(VertexId::from(vec![0xab, 0x01]).to_string(), "0xab01");
        assert_eq!(EdgeId::new(1, 2).to_string(), "(1 -> 2)");
    }
}
