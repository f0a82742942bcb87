//! Face extraction by angular face tracing.
//!
//! Every vertex's incident edges are sorted counterclockwise by direction.
//! Arriving at `v` along `u -> v`, the walk continues along the edge that sits
//! immediately clockwise of `v -> u` in that order. This keeps the face on the
//! left of every directed edge, so bounded faces come out counterclockwise and
//! the single unbounded face comes out clockwise (non-positive signed area).
//!
//! Each directed edge is consumed by exactly one trace, so every undirected edge
//! has a face on its left and a face on its right (the same face for bridges).

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::{EdgeId, EmbeddedGraph, Point, VertexId};

/// Face identifier: position in [`FaceSet::faces`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FaceId(pub u32);

impl FaceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Face({})", self.0)
    }
}

/// One face of the embedding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Face {
    id: FaceId,
    /// Boundary walk; the closing vertex is not repeated.
    vertices: Vec<VertexId>,
    /// `edges[i]` joins `vertices[i]` to `vertices[(i + 1) % len]`.
    edges: Vec<EdgeId>,
    signed_area: f32,
    is_outer: bool,
}

impl Face {
    pub fn id(&self) -> FaceId {
        self.id
    }

    /// The boundary walk, starting at the vertex the trace started from.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// The boundary walk with its first vertex repeated at the end, ready for
    /// [`WalkCheck`](super::WalkCheck).
    pub fn closed_walk(&self) -> Vec<VertexId> {
        let mut walk = self.vertices.clone();
        if let Some(&first) = self.vertices.first() {
            walk.push(first);
        }
        walk
    }

    /// Boundary edges in walk order. A bridge appears twice.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    /// Distinct boundary edges.
    pub fn edge_set(&self) -> BTreeSet<EdgeId> {
        self.edges.iter().copied().collect()
    }

    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edges.contains(&edge)
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Shoelace area of the boundary walk; positive for bounded faces.
    pub fn signed_area(&self) -> f32 {
        self.signed_area
    }

    pub fn is_outer(&self) -> bool {
        self.is_outer
    }

    /// Number of steps in the boundary walk.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Boundary walk as positions.
    pub fn polygon(&self, graph: &EmbeddedGraph) -> Vec<Point> {
        self.vertices
            .iter()
            .filter_map(|&v| graph.position(v))
            .collect()
    }

    /// Average of the distinct boundary vertices.
    pub fn vertex_centroid(&self, graph: &EmbeddedGraph) -> Point {
        let distinct: BTreeSet<VertexId> = self.vertices.iter().copied().collect();
        let mut sum = Point::default();
        let mut count = 0.0f32;
        for p in distinct.into_iter().filter_map(|v| graph.position(v)) {
            sum.x += p.x;
            sum.y += p.y;
            sum.z += p.z;
            count += 1.0;
        }
        if count == 0.0 {
            return sum;
        }
        Point::with_z(sum.x / count, sum.y / count, sum.z / count)
    }

    /// Area centroid of the boundary polygon, or the vertex centroid when the
    /// polygon is degenerate.
    pub fn centroid(&self, graph: &EmbeddedGraph) -> Point {
        const EPS_AREA: f32 = 1e-6;

        let poly = self.polygon(graph);
        let mut cx = 0.0f32;
        let mut cy = 0.0f32;
        let mut a = 0.0f32;
        for i in 0..poly.len() {
            let j = (i + 1) % poly.len();
            let cross = poly[i].x * poly[j].y - poly[j].x * poly[i].y;
            a += cross;
            cx += (poly[i].x + poly[j].x) * cross;
            cy += (poly[i].y + poly[j].y) * cross;
        }
        let a = a * 0.5;
        if a.abs() < EPS_AREA {
            return self.vertex_centroid(graph);
        }
        let z = self.vertex_centroid(graph).z;
        Point::with_z(cx / (6.0 * a), cy / (6.0 * a), z)
    }
}

/// The faces on either side of one edge, relative to its stored orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeSides {
    /// Face traced along `start -> end`.
    pub left: FaceId,
    /// Face traced along `end -> start`.
    pub right: FaceId,
}

impl EdgeSides {
    /// Both sides belong to one face, i.e. the edge is a bridge.
    pub fn is_bridge(self) -> bool {
        self.left == self.right
    }
}

/// All faces of an embedding.
///
/// Bounded faces are listed in trace order (vertices in index order, each
/// vertex's outgoing edges counterclockwise); the outer face is always last.
#[derive(Debug, Clone, Serialize)]
pub struct FaceSet {
    faces: Vec<Face>,
    sides: Vec<EdgeSides>,
}

impl FaceSet {
    /// Trace every face of `graph`.
    ///
    /// Fails with [`Error::NonPlanarOrDisconnectedGraph`] when the traced face
    /// count violates `V - E + F = 2`.
    pub fn extract(graph: &EmbeddedGraph) -> Result<Self> {
        let vertex_count = graph.vertex_count();
        let edge_count = graph.edge_count();

        if vertex_count == 1 && edge_count == 0 {
            return Ok(Self {
                faces: vec![Face {
                    id: FaceId(0),
                    vertices: vec![VertexId(0)],
                    edges: Vec::new(),
                    signed_area: 0.0,
                    is_outer: true,
                }],
                sides: Vec::new(),
            });
        }

        let rotation: Vec<Vec<(EdgeId, VertexId)>> =
            graph.vertices().map(|v| graph.angular_incidence(v)).collect();

        let mut consumed = vec![false; 2 * edge_count];
        let mut traces: Vec<(Vec<VertexId>, Vec<EdgeId>, f32)> = Vec::new();

        for start in graph.vertices() {
            for &(start_edge, start_to) in &rotation[start.index()] {
                let (mut from, mut to, mut edge) = (start, start_to, start_edge);
                let mut vertices = Vec::new();
                let mut edges = Vec::new();
                let mut twice_area = 0.0f32;

                while !consumed[half_edge(graph, edge, from)] {
                    consumed[half_edge(graph, edge, from)] = true;
                    vertices.push(from);
                    edges.push(edge);

                    let a = graph.positions()[from.index()];
                    let b = graph.positions()[to.index()];
                    twice_area += a.x * b.y - b.x * a.y;

                    let around = &rotation[to.index()];
                    let Some(back) = around.iter().position(|&(e, _)| e == edge) else {
                        break;
                    };
                    let (next_edge, next_to) = around[(back + around.len() - 1) % around.len()];
                    from = to;
                    to = next_to;
                    edge = next_edge;
                }

                if !edges.is_empty() {
                    traces.push((vertices, edges, twice_area / 2.0));
                }
            }
        }

        let face_count = traces.len();
        // Isolated vertices contribute no trace, so two of them would balance
        // the formula without being connected.
        let isolated = vertex_count > 1 && graph.vertices().any(|v| graph.degree(v) == 0);
        if isolated || vertex_count as i64 - edge_count as i64 + face_count as i64 != 2 {
            tracing::warn!(
                vertices = vertex_count,
                edges = edge_count,
                faces = face_count,
                "face count violates Euler's formula"
            );
            return Err(Error::NonPlanarOrDisconnectedGraph {
                vertices: vertex_count,
                edges: edge_count,
                faces: face_count,
            });
        }

        // The outer face is the unique trace without positive area.
        let outer_trace = traces
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.2.total_cmp(&b.1.2).then(a.0.cmp(&b.0)))
            .map_or(0, |(i, _)| i);

        let mut order: Vec<usize> = (0..face_count).filter(|&i| i != outer_trace).collect();
        order.push(outer_trace);

        let mut faces = Vec::with_capacity(face_count);
        let mut sides = vec![
            EdgeSides {
                left: FaceId(0),
                right: FaceId(0),
            };
            edge_count
        ];
        for (new_index, &trace_index) in order.iter().enumerate() {
            let (vertices, edges, signed_area) = std::mem::take(&mut traces[trace_index]);
            let id = FaceId(new_index as u32);
            for (&from, &edge) in vertices.iter().zip(&edges) {
                let side = &mut sides[edge.index()];
                if graph.edge(edge).is_some_and(|e| e.start == from) {
                    side.left = id;
                } else {
                    side.right = id;
                }
            }
            faces.push(Face {
                id,
                vertices,
                edges,
                signed_area,
                is_outer: trace_index == outer_trace,
            });
        }

        tracing::debug!(
            faces = faces.len(),
            outer_len = faces.last().map_or(0, Face::len),
            "extracted faces"
        );

        Ok(Self { faces, sides })
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id.index())
    }

    /// Id of the unbounded face.
    pub fn outer(&self) -> FaceId {
        FaceId(self.faces.len().saturating_sub(1) as u32)
    }

    pub fn outer_face(&self) -> &Face {
        &self.faces[self.outer().index()]
    }

    /// Bounded faces, in order.
    pub fn bounded(&self) -> impl Iterator<Item = &Face> {
        self.faces.iter().filter(|f| !f.is_outer)
    }

    /// Faces to the left and right of an edge.
    pub fn sides(&self, edge: EdgeId) -> Option<EdgeSides> {
        self.sides.get(edge.index()).copied()
    }

    /// Face whose distinct boundary edges are exactly `edges`.
    pub fn find_by_edges(&self, edges: &BTreeSet<EdgeId>) -> Option<FaceId> {
        self.faces
            .iter()
            .find(|f| &f.edge_set() == edges)
            .map(Face::id)
    }

    /// Faces whose boundary passes through `vertex`.
    pub fn faces_at(&self, vertex: VertexId) -> Vec<FaceId> {
        self.faces
            .iter()
            .filter(|f| f.contains_vertex(vertex))
            .map(Face::id)
            .collect()
    }
}

/// Index of the directed half of `edge` leaving `from`.
#[inline]
fn half_edge(graph: &EmbeddedGraph, edge: EdgeId, from: VertexId) -> usize {
    let forward = graph.edge(edge).is_some_and(|e| e.start == from);
    2 * edge.index() + usize::from(!forward)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::samples::{complete_graph_k4, cube_graph, octahedron_graph, sample_graph};

    fn ids(raw: &[u32]) -> Vec<VertexId> {
        raw.iter().copied().map(VertexId).collect()
    }

    #[test]
    fn test_triangle() {
        let g = EmbeddedGraph::from_pairs(
            &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)],
            &[(0, 1), (1, 2), (2, 0)],
        )
        .unwrap();
        let faces = FaceSet::extract(&g).unwrap();
        assert_eq!(faces.len(), 2);
        assert_eq!(faces.faces()[0].vertices(), ids(&[0, 1, 2]).as_slice());
        assert!((faces.faces()[0].signed_area() - 0.5).abs() < 1e-6);
        assert!(faces.outer_face().is_outer());
        assert!((faces.outer_face().signed_area() + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_sample_graph_faces() {
        let g = sample_graph();
        let faces = FaceSet::extract(&g).unwrap();
        assert_eq!(faces.len(), 7);
        assert_eq!(g.vertex_count() as i64 - g.edge_count() as i64 + faces.len() as i64, 2);

        let walks: Vec<Vec<VertexId>> =
            faces.faces().iter().map(|f| f.vertices().to_vec()).collect();
        assert_eq!(
            walks,
            vec![
                ids(&[0, 2, 3, 1]),
                ids(&[0, 1, 7]),
                ids(&[1, 3, 2]),
                ids(&[1, 2, 4, 5]),
                ids(&[1, 5, 6, 7]),
                ids(&[4, 6, 5]),
                ids(&[0, 7, 6, 4, 2]),
            ]
        );
        assert_eq!(faces.outer(), FaceId(6));
        assert!((faces.outer_face().signed_area() + 24.0).abs() < 1e-4);
        assert_eq!(faces.bounded().count(), 6);
        for face in faces.bounded() {
            assert!(face.signed_area() > 0.0, "{} should be counterclockwise", face.id());
        }
    }

    #[test]
    fn test_every_edge_has_two_sides() {
        let g = sample_graph();
        let faces = FaceSet::extract(&g).unwrap();
        let mut uses = vec![0usize; g.edge_count()];
        for face in faces.faces() {
            for &e in face.edges() {
                uses[e.index()] += 1;
            }
        }
        assert!(uses.iter().all(|&n| n == 2), "{uses:?}");

        // Edge 0 is (0, 1): 0 -> 1 runs along face 1, 1 -> 0 along face 0.
        let sides = faces.sides(EdgeId(0)).unwrap();
        assert_eq!(sides.left, FaceId(1));
        assert_eq!(sides.right, FaceId(0));
        assert!(!sides.is_bridge());
    }

    #[test]
    fn test_polyhedra_satisfy_euler() {
        for (g, expected) in [(cube_graph(), 6), (octahedron_graph(), 8), (complete_graph_k4(), 4)] {
            let faces = FaceSet::extract(&g).unwrap();
            assert_eq!(faces.len(), expected);
        }
    }

    #[test]
    fn test_tree_has_single_outer_face() {
        // A path 0 - 1 - 2: one face whose walk uses each edge twice.
        let g = EmbeddedGraph::from_pairs(&[(0.0, 0.0), (1.0, 0.0), (2.0, 1.0)], &[(0, 1), (1, 2)])
            .unwrap();
        let faces = FaceSet::extract(&g).unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces.outer_face().edges().len(), 4);
        assert!(faces.sides(EdgeId(1)).unwrap().is_bridge());
    }

    #[test]
    fn test_single_vertex() {
        let g = EmbeddedGraph::from_pairs(&[(0.0, 0.0)], &[]).unwrap();
        let faces = FaceSet::extract(&g).unwrap();
        assert_eq!(faces.len(), 1);
        assert!(faces.outer_face().is_outer());
    }

    #[test]
    fn test_disconnected_rejected() {
        let g = EmbeddedGraph::from_pairs(
            &[(0.0, 0.0), (1.0, 0.0), (5.0, 0.0), (6.0, 0.0)],
            &[(0, 1), (2, 3)],
        )
        .unwrap();
        assert_eq!(
            FaceSet::extract(&g).unwrap_err(),
            Error::NonPlanarOrDisconnectedGraph {
                vertices: 4,
                edges: 2,
                faces: 2,
            }
        );
    }

    #[test]
    fn test_isolated_vertices_rejected() {
        let g = EmbeddedGraph::from_pairs(&[(0.0, 0.0), (1.0, 0.0)], &[]).unwrap();
        assert!(matches!(
            FaceSet::extract(&g),
            Err(Error::NonPlanarOrDisconnectedGraph { vertices: 2, .. })
        ));
    }

    #[test]
    fn test_empty_graph_rejected() {
        let g = EmbeddedGraph::new(Vec::new(), Vec::new()).unwrap();
        assert!(matches!(
            FaceSet::extract(&g),
            Err(Error::NonPlanarOrDisconnectedGraph { faces: 0, .. })
        ));
    }

    #[test]
    fn test_crossing_embedding_rejected() {
        // K4 drawn as a square with both diagonals: the diagonals cross.
        let g = EmbeddedGraph::from_pairs(
            &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)],
            &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2), (1, 3)],
        )
        .unwrap();
        assert!(matches!(
            FaceSet::extract(&g),
            Err(Error::NonPlanarOrDisconnectedGraph { .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let g = sample_graph();
        let a = FaceSet::extract(&g).unwrap();
        let b = FaceSet::extract(&g).unwrap();
        assert_eq!(a.faces(), b.faces());
    }

    #[test]
    fn test_find_by_edges_and_centroid() {
        let g = cube_graph();
        let faces = FaceSet::extract(&g).unwrap();
        let inner: BTreeSet<EdgeId> = [4, 5, 6, 7].into_iter().map(EdgeId).collect();
        let id = faces.find_by_edges(&inner).unwrap();
        let centroid = faces.face(id).unwrap().centroid(&g);
        assert!(centroid.x.abs() < 1e-5 && centroid.y.abs() < 1e-5);
        assert_eq!(faces.faces_at(VertexId(4)).len(), 3);
    }

    #[test]
    fn test_closed_walk_is_region_cycle() {
        use crate::planar::{WalkCheck, WalkKind};

        let g = sample_graph();
        let faces = FaceSet::extract(&g).unwrap();
        assert_eq!(
            faces.face(FaceId(0)).unwrap().closed_walk(),
            ids(&[0, 2, 3, 1, 0])
        );
        for face in faces.faces() {
            let report = WalkCheck::with_faces(&g, &faces, &face.closed_walk());
            assert_eq!(report.kind, WalkKind::RegionCycle, "face {}", face.id());
            assert_eq!(report.face, Some(face.id()));
        }
    }
}
