//! Edge type and related structures.
//!
//! Edges are the lines of the embedding. Each edge has:
//! - A stable identifier (its position in the construction-time edge list)
//! - A `(start, end)` orientation, kept for rendering only
//! - An unordered [`EdgeKey`] used by every topological query

use std::fmt;

use serde::{Deserialize, Serialize};

use super::vertex::VertexId;

/// Stable edge identifier.
///
/// In a dual graph, dual edge `i` corresponds to primal edge `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Create a new EdgeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({})", self.0)
    }
}

impl From<u32> for EdgeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<EdgeId> for u32 {
    #[inline]
    fn from(id: EdgeId) -> Self {
        id.0
    }
}

/// An edge with its rendering orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub start: VertexId,
    pub end: VertexId,
}

impl Edge {
    #[inline]
    pub fn new(start: VertexId, end: VertexId) -> Self {
        Self { start, end }
    }

    /// Orientation-free key for this edge.
    #[inline]
    pub fn key(self) -> EdgeKey {
        EdgeKey::new(self.start, self.end)
    }

    /// The endpoint opposite `v`, or `None` if `v` is not an endpoint.
    #[inline]
    pub fn opposite(self, v: VertexId) -> Option<VertexId> {
        if v == self.start {
            Some(self.end)
        } else if v == self.end {
            Some(self.start)
        } else {
            None
        }
    }

    #[inline]
    pub fn reversed(self) -> Edge {
        Edge::new(self.end, self.start)
    }
}

impl From<(u32, u32)> for Edge {
    #[inline]
    fn from((start, end): (u32, u32)) -> Self {
        Edge::new(VertexId(start), VertexId(end))
    }
}

/// Unordered vertex pair, normalized so that `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    low: VertexId,
    high: VertexId,
}

impl EdgeKey {
    #[inline]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    #[inline]
    pub fn low(self) -> VertexId {
        self.low
    }

    #[inline]
    pub fn high(self) -> VertexId {
        self.high
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.low.0, self.high.0)
    }
}
