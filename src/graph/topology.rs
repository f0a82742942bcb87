//! The traversal seam shared by primal and dual graphs.

use super::edge::EdgeId;
use super::vertex::VertexId;

/// Read-only incidence view used by the spanning tree generator.
///
/// Implemented by [`EmbeddedGraph`](super::EmbeddedGraph) and by
/// [`DualGraph`](crate::planar::DualGraph). The dual may carry parallel edges
/// and loops, so edges are addressed by [`EdgeId`] rather than by endpoint pair.
pub trait Topology {
    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Endpoints of `edge` in stored orientation.
    fn endpoints(&self, edge: EdgeId) -> Option<(VertexId, VertexId)>;

    /// `(edge, neighbor)` pairs at `vertex`, ascending by neighbor then edge.
    ///
    /// A loop is listed once. Out-of-range vertices have no incident edges.
    fn incident_edges(&self, vertex: VertexId) -> Vec<(EdgeId, VertexId)>;

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        vertex.index() < self.vertex_count()
    }
}
