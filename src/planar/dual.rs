//! Dual graph construction.
//!
//! Dual vertex `i` stands for face `i` and dual edge `i` crosses primal edge
//! `i`, running from the face on the primal edge's left to the face on its
//! right. Faces that share several edges get parallel dual edges and bridges
//! get loops, which is why the dual is its own type rather than an
//! [`EmbeddedGraph`].

use serde::{Deserialize, Serialize};

use super::faces::{FaceId, FaceSet};
use crate::error::{Error, Result};
use crate::graph::{Edge, EdgeId, EmbeddedGraph, Point, Topology, VertexId};

/// Smallest distance kept between the outer face's vertex and the bounding box.
pub const MIN_OUTER_MARGIN: f32 = 1e-3;

/// Placement options for dual vertices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DualConfig {
    /// Distance of the outer face's vertex above the primal bounding box.
    /// Values below [`MIN_OUTER_MARGIN`] (or NaN) are raised to it.
    pub outer_margin: f32,
}

impl Default for DualConfig {
    fn default() -> Self {
        Self { outer_margin: 1.0 }
    }
}

/// The dual of an embedded graph, with explicit primal/dual correspondences.
#[derive(Debug, Clone, Serialize)]
pub struct DualGraph {
    /// One position per face.
    positions: Vec<Point>,
    /// Dual edge `i` runs from the left face to the right face of primal edge `primal_of[i]`.
    edges: Vec<Edge>,
    dual_of: Vec<EdgeId>,
    primal_of: Vec<EdgeId>,
    /// `(edge, neighbor)` per dual vertex, ascending by neighbor then edge.
    incidence: Vec<Vec<(EdgeId, VertexId)>>,
    outer: VertexId,
}

impl DualGraph {
    /// Build the dual of `graph` from its faces.
    ///
    /// Bounded faces are represented by their centroid. The outer face's
    /// vertex sits `config.outer_margin` above the middle of the top edge of
    /// the primal bounding box; use [`DualGraph::with_outer_position`] to move it.
    pub fn build(graph: &EmbeddedGraph, faces: &FaceSet, config: &DualConfig) -> Self {
        let outer = VertexId(faces.outer().0);
        let exterior = match graph.bounds() {
            Some((min_x, _, max_x, max_y)) => {
                // Far from the origin a tiny margin is lost to rounding.
                let margin = config
                    .outer_margin
                    .max(MIN_OUTER_MARGIN)
                    .max(max_y.abs() * 1e-6);
                Point::new((min_x + max_x) / 2.0, max_y + margin)
            }
            None => Point::default(),
        };

        let positions: Vec<Point> = faces
            .faces()
            .iter()
            .map(|face| {
                if face.is_outer() {
                    exterior
                } else {
                    face.centroid(graph)
                }
            })
            .collect();

        let mut edges = Vec::with_capacity(graph.edge_count());
        let mut incidence = vec![Vec::new(); positions.len()];
        for i in 0..graph.edge_count() {
            let id = EdgeId(i as u32);
            let Some(sides) = faces.sides(id) else {
                continue;
            };
            let (a, b) = (VertexId(sides.left.0), VertexId(sides.right.0));
            edges.push(Edge::new(a, b));
            incidence[a.index()].push((id, b));
            if a != b {
                incidence[b.index()].push((id, a));
            }
        }
        for list in &mut incidence {
            list.sort_by_key(|&(edge, neighbor)| (neighbor, edge));
        }

        // Dual edge i crosses primal edge i.
        let dual_of: Vec<EdgeId> = (0..edges.len() as u32).map(EdgeId).collect();
        let primal_of = dual_of.clone();

        tracing::debug!(
            vertices = positions.len(),
            edges = edges.len(),
            outer = outer.0,
            "built dual graph"
        );

        Self {
            positions,
            edges,
            dual_of,
            primal_of,
            incidence,
            outer,
        }
    }

    /// Replace the outer face vertex's position.
    pub fn with_outer_position(mut self, position: Point) -> Self {
        if let Some(p) = self.positions.get_mut(self.outer.index()) {
            *p = position;
        }
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn position(&self, v: VertexId) -> Option<Point> {
        self.positions.get(v.index()).copied()
    }

    /// Dual edges, oriented left face -> right face of their primal edge.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Option<Edge> {
        self.edges.get(id.index()).copied()
    }

    /// The dual vertex standing for the unbounded face.
    pub fn outer_vertex(&self) -> VertexId {
        self.outer
    }

    /// Dual edge crossing a primal edge.
    pub fn dual_edge(&self, primal: EdgeId) -> Option<EdgeId> {
        self.dual_of.get(primal.index()).copied()
    }

    /// Primal edge crossed by a dual edge.
    pub fn primal_edge(&self, dual: EdgeId) -> Option<EdgeId> {
        self.primal_of.get(dual.index()).copied()
    }

    pub fn dual_vertex(&self, face: FaceId) -> Option<VertexId> {
        (face.index() < self.positions.len()).then_some(VertexId(face.0))
    }

    pub fn face(&self, vertex: VertexId) -> Option<FaceId> {
        (vertex.index() < self.positions.len()).then_some(FaceId(vertex.0))
    }

    /// Dual edges joining `a` and `b`, in id order.
    pub fn edges_between(&self, a: VertexId, b: VertexId) -> Vec<EdgeId> {
        self.incidence
            .get(a.index())
            .map(|list| {
                list.iter()
                    .filter(|&&(_, n)| n == b)
                    .map(|&(e, _)| e)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// No loops and no parallel edges.
    pub fn is_simple(&self) -> bool {
        self.incidence.iter().enumerate().all(|(v, list)| {
            list.windows(2).all(|w| w[0].1 != w[1].1)
                && list.iter().all(|&(_, n)| n.index() != v)
        })
    }

    /// The dual as an [`EmbeddedGraph`], possible only when it is simple.
    ///
    /// Fails with [`Error::InvalidGraph`] if the dual has loops (primal bridges)
    /// or parallel edges (faces sharing more than one edge).
    pub fn to_embedded(&self) -> Result<EmbeddedGraph> {
        if !self.is_simple() {
            return Err(Error::invalid_graph(
                "dual graph has loops or parallel edges",
            ));
        }
        EmbeddedGraph::new(self.positions.clone(), self.edges.clone())
    }
}

impl Topology for DualGraph {
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
