//! EmbeddedGraph - the immutable plane graph every derived view is built from.
//!
//! Topology is stored in a petgraph `UnGraph` whose node and edge indices line
//! up with [`VertexId`] and [`EdgeId`]. Positions live in a parallel array, and
//! an unordered-pair lookup answers edge queries in O(1).

use std::collections::HashMap;

use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};

use super::edge::{Edge, EdgeId, EdgeKey};
use super::topology::Topology;
use super::vertex::{Point, VertexId};
use crate::error::{Error, Result};

/// A graph embedded in the plane.
///
/// This struct holds:
/// - Graph topology via petgraph
/// - Vertex positions, indexed by `VertexId`
/// - Edges with their rendering orientation, indexed by `EdgeId`
/// - An unordered-pair lookup from `EdgeKey` to `EdgeId`
/// - Per-vertex incidence lists sorted by neighbor index
///
/// Construction validates the edge list; afterwards the graph is read-only.
#[derive(Debug, Clone)]
pub struct EmbeddedGraph {
    /// Node weights are the vertex's own id, edge weights the edge's own id.
    graph: UnGraph<VertexId, EdgeId>,

    positions: Vec<Point>,

    edges: Vec<Edge>,

    edge_lookup: HashMap<EdgeKey, EdgeId>,

    /// `(edge, neighbor)` per vertex, ascending by neighbor.
    incidence: Vec<Vec<(EdgeId, VertexId)>>,
}

impl EmbeddedGraph {
    /// Build a graph from vertex positions and oriented edges.
    ///
    /// Fails with [`Error::InvalidGraph`] when an edge references a vertex
    /// outside `0..vertices.len()`, joins a vertex to itself, or repeats an
    /// unordered pair already present.
    pub fn new(vertices: Vec<Point>, edges: Vec<Edge>) -> Result<Self> {
        let vertex_count = vertices.len();
        let mut graph = UnGraph::with_capacity(vertex_count, edges.len());
        for i in 0..vertex_count {
            graph.add_node(VertexId(i as u32));
        }

        let mut edge_lookup = HashMap::with_capacity(edges.len());
        let mut incidence = vec![Vec::new(); vertex_count];

        for (i, edge) in edges.iter().enumerate() {
            let id = EdgeId(i as u32);
            if edge.start.index() >= vertex_count || edge.end.index() >= vertex_count {
                return Err(Error::invalid_graph(format!(
                    "edge {i} ({}, {}) references a vertex outside 0..{vertex_count}",
                    edge.start.0, edge.end.0
                )));
            }
            if edge.start == edge.end {
                return Err(Error::invalid_graph(format!(
                    "edge {i} is a self-loop at vertex {}",
                    edge.start.0
                )));
            }
            if let Some(first) = edge_lookup.insert(edge.key(), id) {
                return Err(Error::invalid_graph(format!(
                    "edge {i} repeats {} (first seen as edge {})",
                    edge.key(),
                    first.0
                )));
            }

            graph.add_edge(
                NodeIndex::new(edge.start.index()),
                NodeIndex::new(edge.end.index()),
                id,
            );
            incidence[edge.start.index()].push((id, edge.end));
            incidence[edge.end.index()].push((id, edge.start));
        }

        for list in &mut incidence {
            list.sort_by_key(|&(edge, neighbor)| (neighbor, edge));
        }

        tracing::debug!(
            vertices = vertex_count,
            edges = edges.len(),
            "constructed embedded graph"
        );

        Ok(Self {
            graph,
            positions: vertices,
            edges,
            edge_lookup,
            incidence,
        })
    }

    /// Build a graph from `(x, y)` positions and `(start, end)` index pairs.
    pub fn from_pairs(positions: &[(f32, f32)], edges: &[(u32, u32)]) -> Result<Self> {
        Self::new(
            positions.iter().copied().map(Point::from).collect(),
            edges.iter().copied().map(Edge::from).collect(),
        )
    }

    /// Build a graph from flat buffers.
    ///
    /// `positions` is `[x0, y0, x1, y1, ...]` and `edges` is
    /// `[start0, end0, start1, end1, ...]`. Odd-length buffers are rejected.
    pub fn from_flat(positions: &[f32], edges: &[u32]) -> Result<Self> {
        if positions.len() % 2 != 0 {
            return Err(Error::invalid_graph(format!(
                "position buffer has odd length {}",
                positions.len()
            )));
        }
        if edges.len() % 2 != 0 {
            return Err(Error::invalid_graph(format!(
                "edge buffer has odd length {}",
                edges.len()
            )));
        }

        let vertices = positions
            .chunks_exact(2)
            .map(|xy| Point::new(xy[0], xy[1]))
            .collect();
        let edges = edges
            .chunks_exact(2)
            .map(|pair| Edge::new(VertexId(pair[0]), VertexId(pair[1])))
            .collect();
        Self::new(vertices, edges)
    }

    // =========================================================================
    // Vertex Queries
    // =========================================================================

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get a vertex's position.
    pub fn position(&self, v: VertexId) -> Option<Point> {
        self.positions.get(v.index()).copied()
    }

    /// All positions, indexed by vertex id.
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.positions.len() as u32).map(VertexId)
    }

    /// Neighbors of a vertex in ascending index order.
    pub fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        self.incidence
            .get(v.index())
            .map(|list| list.iter().map(|&(_, n)| n).collect())
            .unwrap_or_default()
    }

    pub fn degree(&self, v: VertexId) -> usize {
        self.incidence.get(v.index()).map_or(0, Vec::len)
    }

    // =========================================================================
    // Edge Queries
    // =========================================================================

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Option<Edge> {
        self.edges.get(id.index()).copied()
    }

    /// Whether `{u, v}` is an edge, regardless of orientation.
    pub fn contains_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.edge_lookup.contains_key(&EdgeKey::new(u, v))
    }

    /// Id of the edge joining `u` and `v`, regardless of orientation.
    pub fn edge_id(&self, u: VertexId, v: VertexId) -> Option<EdgeId> {
        self.edge_lookup.get(&EdgeKey::new(u, v)).copied()
    }

    /// Segment endpoints of an edge, in stored orientation.
    pub fn segment(&self, id: EdgeId) -> Option<(Point, Point)> {
        let edge = self.edge(id)?;
        Some((self.positions[edge.start.index()], self.positions[edge.end.index()]))
    }

    /// Incident `(edge, neighbor)` pairs sorted counterclockwise by the angle
    /// of the edge direction, ties broken by increasing neighbor index.
    pub fn angular_incidence(&self, v: VertexId) -> Vec<(EdgeId, VertexId)> {
        let Some(origin) = self.position(v) else {
            return Vec::new();
        };
        let mut list: Vec<(f32, EdgeId, VertexId)> = self.incidence[v.index()]
            .iter()
            .map(|&(e, n)| (origin.angle_to(self.positions[n.index()]), e, n))
            .collect();
        list.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.2.cmp(&b.2)));
        list.into_iter().map(|(_, e, n)| (e, n)).collect()
    }

    // =========================================================================
    // Utilities
    // =========================================================================

    /// Whether every vertex is reachable from every other.
    ///
    /// The empty graph counts as disconnected.
    pub fn is_connected(&self) -> bool {
        connected_components(&self.graph) == 1
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)`, or None if empty.
    pub fn bounds(&self) -> Option<(f32, f32, f32, f32)> {
        if self.positions.is_empty() {
            return None;
        }

        let mut min_x = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        for p in &self.positions {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }

        Some((min_x, min_y, max_x, max_y))
    }

    /// The underlying petgraph graph, for running petgraph algorithms.
    pub fn as_petgraph(&self) -> &UnGraph<VertexId, EdgeId> {
        &self.graph
    }
}

impl Topology for EmbeddedGraph {
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn endpoints(&self, edge: EdgeId) -> Option<(VertexId, VertexId)> {
        self.edge(edge).map(|e| (e.start, e.end))
    }

    fn incident_edges(&self, vertex: VertexId) -> Vec<(EdgeId, VertexId)> {
        self.incidence.get(vertex.index()).cloned().unwrap_or_default()
    }
}
