//! Identity tokens for the graph that owns a store.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// An opaque token naming the graph a store belongs to.
///
/// Stores are handed their owner's token at construction and return it
/// unchanged from [`GraphStore::owner`](crate::GraphStore::owner); they never
/// inspect it. The façade compares tokens to reject handles that belong to a
/// different graph.
///
/// Tokens are unique within the process.
///
/// ```
/// use vert_graph::GraphId;
///
/// let a = GraphId::next();
/// let b = GraphId::next();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GraphId(u64);

impl GraphId {
    /// Allocate a fresh token.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value of the token.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph#{}", self.0)
    }
}
