//! Euler Duality - WASM Module
//!
//! Planar graph duality engine behind the Euler's formula animations. Given a
//! straight-line plane embedding it extracts the faces, builds the dual graph,
//! grows deterministic spanning trees in both, lays trees out as rooted shapes,
//! and classifies vertex sequences as walks, paths and cycles. It is compiled
//! to WebAssembly and exposes a JavaScript-friendly API via wasm-bindgen.
//!
//! # Architecture
//!
//! - `graph`: Immutable embedded graph, backed by petgraph, plus sample graphs
//! - `planar`: Faces, dual graph, spanning trees, walk checks, cycle enclosure
//! - `layout`: Leaf-proportional tree layout (linear or radial)
//! - `spatial`: R-tree hit testing for vertices, edges and faces
//! - `error`: Crate-wide error type

use js_sys::Float32Array;
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod graph;
pub mod layout;
pub mod planar;
pub mod spatial;

pub use error::{Error, Result};

use graph::{EdgeId, EmbeddedGraph, VertexId, samples};
use layout::{BranchLayout, BranchLayoutConfig, CoordinateMode};
use planar::{DualConfig, DualGraph, Enclosure, FaceSet, SpanningTree, WalkCheck};
use spatial::SpatialIndex;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    web_sys::console::debug_1(&JsValue::from_str("euler-duality initialized"));
}

/// Counts shown next to a graph in the Euler's formula scenes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
    /// `V - E + F`; always 2 for a valid embedding.
    pub euler_characteristic: i64,
    pub outer_face: u32,
    pub dual_is_simple: bool,
}

/// Main entry point for the duality engine.
///
/// Holds one embedding together with everything derived from it. All
/// derived structures are computed once at construction.
#[wasm_bindgen]
pub struct EulerDualityWasm {
    graph: EmbeddedGraph,
    faces: FaceSet,
    dual: DualGraph,
    spatial: SpatialIndex,
}

#[wasm_bindgen]
impl EulerDualityWasm {
    /// Build the engine from flat buffers.
    ///
    /// # Arguments
    ///
    /// * `positions` - Vertex positions as [x0, y0, x1, y1, ...]
    /// * `edges` - Undirected edges as [u0, v0, u1, v1, ...]
    #[wasm_bindgen(constructor)]
    pub fn new(positions: &[f32], edges: &[u32]) -> std::result::Result<EulerDualityWasm, JsError> {
        let graph = EmbeddedGraph::from_flat(positions, edges)?;
        Ok(Self::from_graph(graph)?)
    }

    /// Build the engine for a named sample: `sample`, `cube`, `octahedron` or `k4`.
    #[wasm_bindgen(js_name = fromSample)]
    pub fn from_sample(name: &str) -> std::result::Result<EulerDualityWasm, JsError> {
        let graph = match name {
            "sample" => samples::sample_graph(),
            "cube" => samples::cube_graph(),
            "octahedron" => samples::octahedron_graph(),
            "k4" => samples::complete_graph_k4(),
            other => {
                return Err(Error::invalid_graph(format!("unknown sample graph {other:?}")).into());
            }
        };
        Ok(Self::from_graph(graph)?)
    }

    // =========================================================================
    // Graph and Faces
    // =========================================================================

    #[wasm_bindgen(js_name = vertexCount)]
    pub fn vertex_count(&self) -> u32 {
        self.graph.vertex_count() as u32
    }

    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.graph.edge_count() as u32
    }

    /// Number of faces, the outer face included.
    #[wasm_bindgen(js_name = faceCount)]
    pub fn face_count(&self) -> u32 {
        self.faces.len() as u32
    }

    /// Boundary walk of face `index`, or None if out of range.
    ///
    /// The closing vertex is not repeated; use `faceCycle` for a sequence that
    /// `validateWalk` reports as a region cycle.
    #[wasm_bindgen(js_name = faceVertices)]
    pub fn face_vertices(&self, index: u32) -> Option<Vec<u32>> {
        self.faces
            .faces()
            .get(index as usize)
            .map(|face| face.vertices().iter().map(|v| v.0).collect())
    }

    /// Boundary walk of face `index` with its first vertex repeated at the end.
    #[wasm_bindgen(js_name = faceCycle)]
    pub fn face_cycle(&self, index: u32) -> Option<Vec<u32>> {
        self.faces
            .faces()
            .get(index as usize)
            .map(|face| face.closed_walk().iter().map(|v| v.0).collect())
    }

    /// Index of the unbounded face (always the last one).
    #[wasm_bindgen(js_name = outerFace)]
    pub fn outer_face(&self) -> u32 {
        self.faces.outer().0
    }

    // =========================================================================
    // Dual Graph
    // =========================================================================

    /// Dual vertex positions as [x0, y0, x1, y1, ...], one per face.
    #[wasm_bindgen(js_name = dualPositions)]
    pub fn dual_positions(&self) -> Float32Array {
        let flat: Vec<f32> = self
            .dual
            .positions()
            .iter()
            .flat_map(|p| [p.x, p.y])
            .collect();
        Float32Array::from(&flat[..])
    }

    /// Dual edges as [face0, face1, ...]; dual edge `i` crosses primal edge `i`.
    #[wasm_bindgen(js_name = dualEdges)]
    pub fn dual_edges(&self) -> Vec<u32> {
        self.dual
            .edges()
            .iter()
            .flat_map(|e| [e.start.0, e.end.0])
            .collect()
    }

    // =========================================================================
    // Spanning Trees
    // =========================================================================

    /// Depth-first spanning tree as [parent0, child0, parent1, child1, ...] in
    /// the order the edges are added.
    #[wasm_bindgen(js_name = spanningTree)]
    pub fn spanning_tree(&self, start: u32) -> std::result::Result<Vec<u32>, JsError> {
        let tree = SpanningTree::depth_first(&self.graph, VertexId(start))?;
        Ok(flatten_pairs(tree.edge_pairs()))
    }

    /// Edge ids of the depth-first spanning tree, in addition order.
    #[wasm_bindgen(js_name = spanningTreeEdges)]
    pub fn spanning_tree_edges(&self, start: u32) -> std::result::Result<Vec<u32>, JsError> {
        let tree = SpanningTree::depth_first(&self.graph, VertexId(start))?;
        Ok(tree.edges().iter().map(|e| e.0).collect())
    }

    /// The dual spanning tree made of the edges the primal tree from `start`
    /// leaves out, rooted at the outer face, as flat (parent, child) face pairs.
    #[wasm_bindgen(js_name = dualSpanningTree)]
    pub fn dual_spanning_tree(&self, start: u32) -> std::result::Result<Vec<u32>, JsError> {
        let dual_tree = self.dual_tree(VertexId(start))?;
        Ok(flatten_pairs(dual_tree.edge_pairs()))
    }

    /// Rooted layout of the spanning tree from `start`.
    ///
    /// Returns target positions [x0, y0, x1, y1, ...], one pair per vertex.
    #[wasm_bindgen(js_name = treeLayout)]
    pub fn tree_layout(
        &self,
        start: u32,
        radial: bool,
        level_separation: f32,
    ) -> std::result::Result<Vec<f32>, JsError> {
        let tree = SpanningTree::depth_first(&self.graph, VertexId(start))?;
        let layout = BranchLayout::new(BranchLayoutConfig {
            level_separation,
            coordinate_mode: if radial {
                CoordinateMode::Radial
            } else {
                CoordinateMode::Linear
            },
            ..Default::default()
        })
        .compute(&tree);
        Ok(layout.positions().iter().flat_map(|p| [p.x, p.y]).collect())
    }

    // =========================================================================
    // Walks and Cycles
    // =========================================================================

    /// Full walk report for a vertex sequence, as a JS object.
    #[wasm_bindgen(js_name = validateWalk)]
    pub fn validate_walk(&self, sequence: &[u32]) -> std::result::Result<JsValue, JsError> {
        let report = WalkCheck::with_faces(&self.graph, &self.faces, &to_vertices(sequence));
        Ok(serde_wasm_bindgen::to_value(&report)?)
    }

    /// True if the sequence is a path (no repeated vertices).
    #[wasm_bindgen(js_name = isPath)]
    pub fn is_path(&self, sequence: &[u32]) -> bool {
        WalkCheck::of(&self.graph, &to_vertices(sequence)).is_path()
    }

    /// True if the sequence is a cycle, region cycles included.
    #[wasm_bindgen(js_name = isCycle)]
    pub fn is_cycle(&self, sequence: &[u32]) -> bool {
        WalkCheck::of(&self.graph, &to_vertices(sequence)).is_cycle()
    }

    /// Faces enclosed by a cycle; empty if the sequence is not a cycle.
    #[wasm_bindgen(js_name = enclosedFaces)]
    pub fn enclosed_faces(&self, cycle: &[u32]) -> Vec<u32> {
        Enclosure::of(&self.graph, &self.faces, &self.dual, &to_vertices(cycle))
            .enclosed_faces()
            .iter()
            .map(|f| f.0)
            .collect()
    }

    /// Walk report for a sequence of dual edge ids, as a JS object.
    #[wasm_bindgen(js_name = validateDualWalk)]
    pub fn validate_dual_walk(&self, edges: &[u32]) -> std::result::Result<JsValue, JsError> {
        let report = WalkCheck::edge_walk(&self.dual, &to_edges(edges));
        Ok(serde_wasm_bindgen::to_value(&report)?)
    }

    /// Primal vertices trapped inside a dual cycle; empty if it is not a cycle.
    #[wasm_bindgen(js_name = trappedVertices)]
    pub fn trapped_vertices(&self, dual_cycle: &[u32]) -> Vec<u32> {
        Enclosure::of_dual_cycle(&self.graph, &self.faces, &self.dual, &to_edges(dual_cycle))
            .enclosed_vertices()
            .iter()
            .map(|v| v.0)
            .collect()
    }

    // =========================================================================
    // Spatial Queries
    // =========================================================================

    /// Face under a point; the outer face if no bounded face contains it.
    #[wasm_bindgen(js_name = faceAt)]
    pub fn face_at(&self, x: f32, y: f32) -> u32 {
        self.spatial.face_at(x, y).0
    }

    #[wasm_bindgen(js_name = nearestVertex)]
    pub fn nearest_vertex(&self, x: f32, y: f32) -> Option<u32> {
        self.spatial.nearest_vertex(x, y).map(|v| v.0)
    }

    #[wasm_bindgen(js_name = nearestVertexWithin)]
    pub fn nearest_vertex_within(&self, x: f32, y: f32, max_distance: f32) -> Option<u32> {
        self.spatial
            .nearest_vertex_within(x, y, max_distance)
            .map(|v| v.0)
    }

    #[wasm_bindgen(js_name = nearestEdge)]
    pub fn nearest_edge(&self, x: f32, y: f32) -> Option<u32> {
        self.spatial.nearest_edge(x, y).map(|e| e.0)
    }

    /// Vertex, edge and face counts as a JS object.
    pub fn summary(&self) -> std::result::Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.graph_summary())?)
    }
}

impl EulerDualityWasm {
    /// Derive faces, dual and spatial index for an already built graph.
    pub fn from_graph(graph: EmbeddedGraph) -> Result<Self> {
        let faces = FaceSet::extract(&graph)?;
        let dual = DualGraph::build(&graph, &faces, &DualConfig::default());
        let spatial = SpatialIndex::build(&graph, &faces);
        Ok(Self {
            graph,
            faces,
            dual,
            spatial,
        })
    }

    pub fn graph(&self) -> &EmbeddedGraph {
        &self.graph
    }

    pub fn faces(&self) -> &FaceSet {
        &self.faces
    }

    pub fn dual(&self) -> &DualGraph {
        &self.dual
    }

    pub fn graph_summary(&self) -> GraphSummary {
        let (v, e, f) = (self.graph.vertex_count(), self.graph.edge_count(), self.faces.len());
        GraphSummary {
            vertices: v,
            edges: e,
            faces: f,
            euler_characteristic: v as i64 - e as i64 + f as i64,
            outer_face: self.faces.outer().0,
            dual_is_simple: self.dual.is_simple(),
        }
    }

    fn dual_tree(&self, start: VertexId) -> Result<SpanningTree> {
        let tree = SpanningTree::depth_first(&self.graph, start)?;
        tree.dual_complement(&self.dual, self.dual.outer_vertex())
    }
}

fn to_vertices(raw: &[u32]) -> Vec<VertexId> {
    raw.iter().copied().map(VertexId).collect()
}

fn to_edges(raw: &[u32]) -> Vec<EdgeId> {
    raw.iter().copied().map(EdgeId).collect()
}

fn flatten_pairs(pairs: &[(VertexId, VertexId)]) -> Vec<u32> {
    pairs.iter().flat_map(|&(p, c)| [p.0, c.0]).collect()
}
