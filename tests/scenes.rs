//! End-to-end runs of the Euler's formula scenes against the sample graphs.

use euler_duality::graph::samples::{complete_graph_k4, cube_graph, octahedron_graph, sample_graph};
use euler_duality::graph::{EdgeId, EmbeddedGraph, VertexId};
use euler_duality::layout::{BranchLayout, BranchLayoutConfig, CoordinateMode};
use euler_duality::planar::{
    DualConfig, DualGraph, Enclosure, FaceSet, SpanningTree, WalkCheck, WalkKind, WalkViolation,
};
use euler_duality::spatial::SpatialIndex;
use euler_duality::Error;

fn vertices(raw: &[u32]) -> Vec<VertexId> {
    raw.iter().copied().map(VertexId).collect()
}

#[test]
fn euler_formula_on_every_sample() {
    let samples: [(&str, EmbeddedGraph, usize); 4] = [
        ("sample", sample_graph(), 7),
        ("cube", cube_graph(), 6),
        ("octahedron", octahedron_graph(), 8),
        ("k4", complete_graph_k4(), 4),
    ];
    for (name, graph, expected_faces) in samples {
        let faces = FaceSet::extract(&graph).unwrap();
        assert_eq!(faces.len(), expected_faces, "{name}");
        let characteristic =
            graph.vertex_count() as i64 - graph.edge_count() as i64 + faces.len() as i64;
        assert_eq!(characteristic, 2, "{name}");
    }
}

#[test]
fn valid_and_invalid_paths_scene() {
    let graph = sample_graph();
    assert_eq!(
        WalkCheck::of(&graph, &vertices(&[1, 2, 4, 5, 6])).kind,
        WalkKind::Path
    );
    assert_eq!(
        WalkCheck::of(&graph, &vertices(&[6, 7, 1, 3])).kind,
        WalkKind::Path
    );

    let segments: Vec<(VertexId, VertexId)> = [(0, 1), (7, 8), (5, 6)]
        .into_iter()
        .map(|(a, b)| (VertexId(a), VertexId(b)))
        .collect();
    let report = WalkCheck::edge_sequence(&graph, &segments);
    assert_eq!(report.kind, WalkKind::NotAWalk);
    assert_eq!(report.violation, Some(WalkViolation::Disjoint { at: 1 }));
}

#[test]
fn cycles_cut_the_dual_scene() {
    let graph = sample_graph();
    let faces = FaceSet::extract(&graph).unwrap();
    let dual = DualGraph::build(&graph, &faces, &DualConfig::default());

    let cycle = vertices(&[0, 1, 2, 0]);
    let enclosure = Enclosure::of(&graph, &faces, &dual, &cycle);
    assert_eq!(enclosure.enclosed_faces().len(), 2);
    assert_eq!(enclosure.enclosed_vertices(), &[VertexId(3)]);

    // Every crossing dual edge crosses one of the cycle's own edges.
    let report = WalkCheck::of(&graph, &cycle);
    for &crossing in enclosure.crossing_dual_edges() {
        let primal = dual.primal_edge(crossing).unwrap();
        assert!(report.edges.contains(&primal));
    }
}

#[test]
fn dual_cycles_trap_primal_vertices_scene() {
    let graph = sample_graph();
    let faces = FaceSet::extract(&graph).unwrap();
    let dual = DualGraph::build(&graph, &faces, &DualConfig::default());

    // Between faces 0 and 2 and back again, over the parallel dual edges.
    let cycle: Vec<EdgeId> = [3, 4].into_iter().map(EdgeId).collect();
    let report = WalkCheck::edge_walk(&dual, &cycle);
    assert_eq!(report.kind, WalkKind::Cycle);
    for &d in &cycle {
        let edge = dual.edges()[d.index()];
        let between = [edge.start.0, edge.end.0];
        assert!(between.contains(&0) && between.contains(&2));
    }

    let enclosure = Enclosure::of_dual_cycle(&graph, &faces, &dual, &cycle);
    assert_eq!(enclosure.enclosed_vertices(), &[VertexId(3)]);

    // Each dual line is matched to the primal edge it crosses, and cutting
    // those edges leaves vertex 3 with no way out.
    let cut: Vec<EdgeId> = cycle.iter().map(|&d| dual.primal_edge(d).unwrap()).collect();
    assert_eq!(enclosure.crossing_dual_edges(), &cut[..]);
    for edge in graph.edges() {
        let touches_trapped = edge.start == VertexId(3) || edge.end == VertexId(3);
        let id = graph.edge_id(edge.start, edge.end).unwrap();
        assert_eq!(touches_trapped, cut.contains(&id));
    }
}

#[test]
fn dual_of_cube_is_octahedron_scene() {
    let cube = cube_graph();
    let faces = FaceSet::extract(&cube).unwrap();
    let dual = DualGraph::build(&cube, &faces, &DualConfig::default());
    let octahedron = dual.to_embedded().unwrap();

    assert_eq!(octahedron.vertex_count(), octahedron_graph().vertex_count());
    assert_eq!(octahedron.edge_count(), octahedron_graph().edge_count());
    for v in octahedron.vertices() {
        assert_eq!(octahedron.degree(v), 4);
    }
}

#[test]
fn spanning_tree_and_dual_tree_scene() {
    let graph = sample_graph();
    let faces = FaceSet::extract(&graph).unwrap();
    let dual = DualGraph::build(&graph, &faces, &DualConfig::default());

    let tree = SpanningTree::depth_first(&graph, VertexId(0)).unwrap();
    assert_eq!(tree.len(), 7);
    let dual_tree = tree.dual_complement(&dual, dual.outer_vertex()).unwrap();
    assert_eq!(dual_tree.len(), 6);

    // Together the two trees use every edge exactly once.
    let mut used: Vec<EdgeId> = tree
        .edges()
        .iter()
        .copied()
        .chain(dual_tree.edges().iter().filter_map(|&d| dual.primal_edge(d)))
        .collect();
    used.sort();
    let all: Vec<EdgeId> = (0..graph.edge_count() as u32).map(EdgeId).collect();
    assert_eq!(used, all);
}

#[test]
fn treeified_layout_scene() {
    let graph = sample_graph();
    let tree = SpanningTree::depth_first(&graph, VertexId(0)).unwrap();

    for mode in [CoordinateMode::Linear, CoordinateMode::Radial] {
        let layout = BranchLayout::new(BranchLayoutConfig {
            coordinate_mode: mode,
            level_separation: 2.0,
            ..Default::default()
        })
        .compute(&tree);
        assert_eq!(layout.positions().len(), graph.vertex_count());
        assert_eq!(layout.branches().len(), tree.len());
        let root = layout.position(VertexId(0)).unwrap();
        assert!(root.x.abs() < 1e-6 && root.y.abs() < 1e-6, "{mode:?}");
    }
}

#[test]
fn hit_testing_scene() {
    let graph = sample_graph();
    let faces = FaceSet::extract(&graph).unwrap();
    let index = SpatialIndex::build(&graph, &faces);

    // The area centroids of the sample faces all fall inside their own face.
    for face in faces.bounded() {
        let c = face.centroid(&graph);
        assert_eq!(index.face_at(c.x, c.y), face.id());
    }
    assert_eq!(index.nearest_vertex(0.0, 4.2), Some(VertexId(7)));
}

#[test]
fn precondition_failures_surface_as_errors() {
    let bad_edge = EmbeddedGraph::from_pairs(&[(0.0, 0.0), (1.0, 0.0)], &[(0, 5)]);
    assert!(matches!(bad_edge, Err(Error::InvalidGraph { .. })));

    let duplicate = EmbeddedGraph::from_pairs(&[(0.0, 0.0), (1.0, 0.0)], &[(0, 1), (1, 0)]);
    assert!(matches!(duplicate, Err(Error::InvalidGraph { .. })));

    let graph = sample_graph();
    assert!(matches!(
        SpanningTree::depth_first(&graph, VertexId(100)),
        Err(Error::VertexOutOfRange { vertex: 100, .. })
    ));
}
