//! Error type shared by every engine component.
//!
//! All errors are precondition failures surfaced to the caller; nothing in the
//! engine retries or repairs its input.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Malformed construction input: out-of-range endpoint, self-loop or
    /// duplicate unordered pair.
    #[error("invalid graph: {reason}")]
    InvalidGraph { reason: String },

    /// Face tracing did not satisfy `V - E + F = 2`.
    #[error(
        "embedding is not planar or not connected: V - E + F = {vertices} - {edges} + {faces} != 2"
    )]
    NonPlanarOrDisconnectedGraph {
        vertices: usize,
        edges: usize,
        faces: usize,
    },

    /// Traversal from the start vertex did not reach every vertex.
    #[error("graph is disconnected: reached {reached} of {total} vertices")]
    DisconnectedGraph { reached: usize, total: usize },

    #[error("vertex {vertex} out of range for graph with {count} vertices")]
    VertexOutOfRange { vertex: u32, count: usize },

    /// An edge subset cannot be a spanning tree (wrong size or contains a cycle).
    #[error("edge set is not a tree: {edges} edges for {vertices} vertices")]
    NotATree { edges: usize, vertices: usize },
}

impl Error {
    pub(crate) fn invalid_graph(reason: impl Into<String>) -> Self {
        Self::InvalidGraph {
            reason: reason.into(),
        }
    }
}
