//! What a cycle encloses.
//!
//! A simple cycle splits the plane in two, and so it splits the dual graph in
//! two: the dual edges crossing the cycle are the only way from the outer face
//! to the faces inside. Searching the dual from the outer face without using
//! those edges leaves exactly the enclosed faces unreached.
//!
//! The same works the other way round. A cycle in the dual crosses a set of
//! primal edges, and cutting them leaves the primal vertices inside the cycle
//! in components of their own.

use std::collections::{BTreeSet, VecDeque};

use petgraph::unionfind::UnionFind;
use serde::Serialize;

use super::dual::DualGraph;
use super::faces::{FaceId, FaceSet};
use super::walk::WalkCheck;
use crate::graph::{EdgeId, EmbeddedGraph, Topology, VertexId};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Enclosure {
    faces: Vec<FaceId>,
    vertices: Vec<VertexId>,
    crossings: Vec<EdgeId>,
}

impl Enclosure {
    /// Faces and vertices inside the closed vertex sequence `cycle`.
    ///
    /// Sequences that are not cycles of `graph` enclose nothing.
    pub fn of(
        graph: &EmbeddedGraph,
        faces: &FaceSet,
        dual: &DualGraph,
        cycle: &[VertexId],
    ) -> Self {
        let report = WalkCheck::of(graph, cycle);
        if !report.is_cycle() {
            tracing::debug!(kind = ?report.kind, "sequence is not a cycle; nothing enclosed");
            return Self::default();
        }

        let blocked: BTreeSet<EdgeId> = report
            .edges
            .iter()
            .filter_map(|&e| dual.dual_edge(e))
            .collect();

        let mut reached = vec![false; dual.vertex_count()];
        let outer = dual.outer_vertex();
        if let Some(r) = reached.get_mut(outer.index()) {
            *r = true;
        }
        let mut queue = VecDeque::from([outer]);
        while let Some(v) = queue.pop_front() {
            for (edge, next) in dual.incident_edges(v) {
                if blocked.contains(&edge) || reached[next.index()] {
                    continue;
                }
                reached[next.index()] = true;
                queue.push_back(next);
            }
        }

        let enclosed: Vec<FaceId> = reached
            .iter()
            .enumerate()
            .filter(|&(_, &r)| !r)
            .filter_map(|(i, _)| dual.face(VertexId(i as u32)))
            .collect();

        let on_cycle: BTreeSet<VertexId> = cycle.iter().copied().collect();
        let vertices: Vec<VertexId> = graph
            .vertices()
            .filter(|v| !on_cycle.contains(v))
            .filter(|&v| {
                let around = faces.faces_at(v);
                !around.is_empty() && around.iter().all(|f| enclosed.binary_search(f).is_ok())
            })
            .collect();

        tracing::debug!(
            faces = enclosed.len(),
            vertices = vertices.len(),
            "computed cycle enclosure"
        );

        Self {
            faces: enclosed,
            vertices,
            crossings: blocked.into_iter().collect(),
        }
    }

    /// Primal vertices and faces trapped inside a cycle of the dual graph,
    /// given as dual edge ids.
    ///
    /// The primal edges the cycle crosses are cut, and every vertex left outside
    /// the outer component is trapped. When the cycle stays clear of the outer
    /// face's dual vertex, the outer component is the one holding the outer
    /// boundary; otherwise it is the largest one, ties going to the component
    /// with the lowest vertex. Enclosed faces are the faces off the cycle whose
    /// boundary vertices are all trapped.
    ///
    /// Edge sequences that are not cycles of `dual` enclose nothing.
    pub fn of_dual_cycle(
        graph: &EmbeddedGraph,
        faces: &FaceSet,
        dual: &DualGraph,
        cycle: &[EdgeId],
    ) -> Self {
        let report = WalkCheck::edge_walk(dual, cycle);
        if !report.is_cycle() {
            tracing::debug!(kind = ?report.kind, "dual sequence is not a cycle; nothing enclosed");
            return Self::default();
        }

        let cut: BTreeSet<EdgeId> = report
            .edges
            .iter()
            .filter_map(|&e| dual.primal_edge(e))
            .collect();
        let on_cycle: BTreeSet<VertexId> = report
            .edges
            .iter()
            .filter_map(|&e| dual.endpoints(e))
            .flat_map(|(a, b)| [a, b])
            .collect();

        let mut components = UnionFind::new(graph.vertex_count());
        for (i, edge) in graph.edges().iter().enumerate() {
            if !cut.contains(&EdgeId(i as u32)) {
                components.union(edge.start.index(), edge.end.index());
            }
        }
        let labels = components.into_labeling();

        let anchor = if on_cycle.contains(&dual.outer_vertex()) {
            None
        } else {
            faces.outer_face().vertices().first().copied()
        };
        let outside = match anchor {
            Some(v) => labels.get(v.index()).copied(),
            None => largest_component(&labels),
        };

        let vertices: Vec<VertexId> = graph
            .vertices()
            .filter(|v| Some(labels[v.index()]) != outside)
            .collect();

        let enclosed: Vec<FaceId> = faces
            .faces()
            .iter()
            .filter(|face| !on_cycle.contains(&VertexId(face.id().0)))
            .filter(|face| {
                !face.is_empty()
                    && face
                        .vertices()
                        .iter()
                        .all(|v| vertices.binary_search(v).is_ok())
            })
            .map(|face| face.id())
            .collect();

        tracing::debug!(
            faces = enclosed.len(),
            vertices = vertices.len(),
            cut = cut.len(),
            "computed dual cycle enclosure"
        );

        Self {
            faces: enclosed,
            vertices,
            crossings: cut.into_iter().collect(),
        }
    }

    /// Enclosed faces, ascending.
    pub fn enclosed_faces(&self) -> &[FaceId] {
        &self.faces
    }

    /// Vertices strictly inside the cycle, ascending.
    pub fn enclosed_vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Edges crossing the cycle, ascending.
    ///
    /// Dual edge `i` crosses primal edge `i`, so these ids name the dual edges
    /// crossing a primal cycle and the primal edges cut by a dual cycle alike.
    pub fn crossing_dual_edges(&self) -> &[EdgeId] {
        &self.crossings
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() && self.vertices.is_empty()
    }

    pub fn encloses_face(&self, face: FaceId) -> bool {
        self.faces.binary_search(&face).is_ok()
    }

    pub fn encloses_vertex(&self, vertex: VertexId) -> bool {
        self.vertices.binary_search(&vertex).is_ok()
    }
}

/// Label of the biggest component; the earliest vertex's wins a tie.
fn largest_component(labels: &[usize]) -> Option<usize> {
    let mut sizes = vec![0usize; labels.len()];
    for &label in labels {
        sizes[label] += 1;
    }
    let mut best: Option<usize> = None;
    for &label in labels {
        if best.is_none_or(|b| sizes[label] > sizes[b]) {
            best = Some(label);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::samples::{cube_graph, sample_graph};
    use crate::planar::DualConfig;

    fn enclose(graph: &EmbeddedGraph, raw: &[u32]) -> Enclosure {
        let faces = FaceSet::extract(graph).unwrap();
        let dual = DualGraph::build(graph, &faces, &DualConfig::default());
        let cycle: Vec<VertexId> = raw.iter().copied().map(VertexId).collect();
        Enclosure::of(graph, &faces, &dual, &cycle)
    }

    #[test]
    fn test_triangle_around_inner_vertex() {
        let g = sample_graph();
        let enclosure = enclose(&g, &[0, 1, 2, 0]);
        assert_eq!(enclosure.enclosed_faces(), &[FaceId(0), FaceId(2)]);
        assert_eq!(enclosure.enclosed_vertices(), &[VertexId(3)]);
        assert_eq!(
            enclosure.crossing_dual_edges(),
            &[EdgeId(0), EdgeId(1), EdgeId(2)]
        );
    }

    #[test]
    fn test_face_cycle_encloses_its_face() {
        let g = sample_graph();
        let enclosure = enclose(&g, &[0, 1, 3, 2, 0]);
        assert_eq!(enclosure.enclosed_faces(), &[FaceId(0)]);
        assert!(enclosure.enclosed_vertices().is_empty());

        let cube = cube_graph();
        let inner = enclose(&cube, &[4, 5, 6, 7, 4]);
        assert_eq!(inner.enclosed_faces().len(), 1);
        assert!(inner.enclosed_vertices().is_empty());
    }

    #[test]
    fn test_outer_boundary_encloses_everything_bounded() {
        let g = sample_graph();
        let enclosure = enclose(&g, &[0, 7, 6, 4, 2, 0]);
        assert_eq!(enclosure.enclosed_faces().len(), 6);
        assert!(!enclosure.encloses_face(FaceId(6)));
        assert_eq!(
            enclosure.enclosed_vertices(),
            &[VertexId(1), VertexId(3), VertexId(5)]
        );
        assert!(enclosure.encloses_vertex(VertexId(5)));
    }

    #[test]
    fn test_non_cycles_enclose_nothing() {
        let g = sample_graph();
        assert!(enclose(&g, &[1, 2, 4, 5, 6]).is_empty());
        assert!(enclose(&g, &[0, 4, 0]).is_empty());
        assert!(enclose(&g, &[]).is_empty());
        assert!(enclose(&g, &[0, 1, 0]).crossing_dual_edges().is_empty());
    }

    fn trap(graph: &EmbeddedGraph, raw: &[u32]) -> Enclosure {
        let faces = FaceSet::extract(graph).unwrap();
        let dual = DualGraph::build(graph, &faces, &DualConfig::default());
        let cycle: Vec<EdgeId> = raw.iter().copied().map(EdgeId).collect();
        Enclosure::of_dual_cycle(graph, &faces, &dual, &cycle)
    }

    #[test]
    fn test_dual_cycle_around_faces_0_and_2_traps_vertex_3() {
        let g = sample_graph();
        // Parallel dual edges crossing 1-3 and 2-3.
        let enclosure = trap(&g, &[3, 4]);
        assert_eq!(enclosure.enclosed_vertices(), &[VertexId(3)]);
        assert!(enclosure.enclosed_faces().is_empty());
        assert_eq!(enclosure.crossing_dual_edges(), &[EdgeId(3), EdgeId(4)]);
        assert!(!enclosure.is_empty());
    }

    #[test]
    fn test_dual_cycle_through_bounded_faces() {
        let g = sample_graph();
        // Faces 1, 0, 2, 3, 4 around the pair {1, 3}.
        let enclosure = trap(&g, &[0, 4, 2, 7, 10]);
        assert_eq!(enclosure.enclosed_vertices(), &[VertexId(1), VertexId(3)]);
        assert!(enclosure.encloses_vertex(VertexId(3)));
    }

    #[test]
    fn test_dual_cycle_through_outer_face() {
        let g = sample_graph();
        // Faces 0, 6, 1 around vertex 0; the small side is trapped.
        let enclosure = trap(&g, &[1, 12, 0]);
        assert_eq!(enclosure.enclosed_vertices(), &[VertexId(0)]);
        assert_eq!(
            enclosure.crossing_dual_edges(),
            &[EdgeId(0), EdgeId(1), EdgeId(12)]
        );
    }

    #[test]
    fn test_dual_cycle_around_cube_inner_square() {
        let g = cube_graph();
        // The four spokes, crossed in turn through the four side faces.
        let enclosure = trap(&g, &[8, 9, 10, 11]);
        assert_eq!(
            enclosure.enclosed_vertices(),
            &[VertexId(4), VertexId(5), VertexId(6), VertexId(7)]
        );
        let faces = FaceSet::extract(&g).unwrap();
        assert_eq!(enclosure.enclosed_faces().len(), 1);
        let inner = faces.face(enclosure.enclosed_faces()[0]).unwrap();
        assert!(inner.vertices().iter().all(|v| v.0 >= 4));
    }

    #[test]
    fn test_dual_non_cycles_trap_nothing() {
        let g = sample_graph();
        assert!(trap(&g, &[3]).is_empty());
        assert!(trap(&g, &[3, 3]).is_empty());
        assert!(trap(&g, &[0, 11]).is_empty());
        assert!(trap(&g, &[]).is_empty());
    }
}
