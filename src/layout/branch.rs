//! Leaf-proportional layered layout for spanning trees.
//!
//! Redraws a [`SpanningTree`] as a literal rooted tree, ignoring where its
//! vertices are drawn in the embedding. The root sits at the origin and owns
//! the whole span. Each node hands its span out to its children in
//! edge-addition order, each child getting a share proportional to the leaves
//! below it, and sits in the middle of its own share.
//!
//! The span is horizontal in linear mode (depth grows downwards) and angular
//! in radial mode (depth grows outwards from the root).

use serde::{Deserialize, Serialize};

use crate::graph::{Point, VertexId};
use crate::planar::SpanningTree;

/// Coordinate mode for the final layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateMode {
    /// Top-down layout: x across the span, y = -depth * level_separation.
    #[default]
    Linear,
    /// Polar layout: angle across the span, radius = depth * level_separation.
    Radial,
}

/// Configuration for the branch layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchLayoutConfig {
    /// Distance between consecutive tree levels.
    pub level_separation: f32,
    /// Width of one leaf's share in linear mode.
    pub leaf_separation: f32,
    /// Total angle shared out among the leaves in radial mode.
    pub angular_span: f32,
    /// Direction of the middle of the span in radial mode.
    pub center_angle: f32,
    pub coordinate_mode: CoordinateMode,
}

impl Default for BranchLayoutConfig {
    fn default() -> Self {
        Self {
            level_separation: 1.0,
            leaf_separation: 1.0,
            angular_span: std::f32::consts::TAU,
            center_angle: -std::f32::consts::FRAC_PI_2,
            coordinate_mode: CoordinateMode::Linear,
        }
    }
}

/// Computed positions for every vertex of a tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeLayout {
    root: VertexId,
    positions: Vec<Point>,
    depths: Vec<u32>,
    /// `(parent, child)` in addition order.
    pairs: Vec<(VertexId, VertexId)>,
}

impl TreeLayout {
    pub fn root(&self) -> VertexId {
        self.root
    }

    /// Positions indexed by vertex.
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn position(&self, v: VertexId) -> Option<Point> {
        self.positions.get(v.index()).copied()
    }

    pub fn depth(&self, v: VertexId) -> Option<u32> {
        self.depths.get(v.index()).copied()
    }

    pub fn max_depth(&self) -> u32 {
        self.depths.iter().copied().max().unwrap_or(0)
    }

    /// Parent and child positions for every tree edge, in addition order.
    pub fn branches(&self) -> Vec<(Point, Point)> {
        self.pairs
            .iter()
            .map(|&(p, c)| (self.positions[p.index()], self.positions[c.index()]))
            .collect()
    }
}

/// The branch layout engine.
pub struct BranchLayout {
    config: BranchLayoutConfig,
}

impl BranchLayout {
    pub fn new(config: BranchLayoutConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(BranchLayoutConfig::default())
    }

    pub fn config(&self) -> &BranchLayoutConfig {
        &self.config
    }

    /// Lay out `tree`. Every vertex of the tree gets a position.
    pub fn compute(&self, tree: &SpanningTree) -> TreeLayout {
        let n = tree.vertex_count();
        let leaves = tree.leaf_counts();
        let root = tree.root();
        let total = leaves.get(root.index()).copied().unwrap_or(1).max(1) as f32;

        // Spans are measured in leaves: [start, start + leaves[v]).
        let mut start = vec![0.0f32; n];
        let mut cursor = vec![0.0f32; n];
        let mut depths = vec![0u32; n];

        for &(parent, child) in tree.edge_pairs() {
            let (p, c) = (parent.index(), child.index());
            start[c] = cursor[p];
            cursor[p] += leaves[c] as f32;
            cursor[c] = start[c];
            depths[c] = depths[p] + 1;
        }

        let positions = (0..n)
            .map(|v| {
                let middle = start[v] + leaves[v] as f32 / 2.0;
                self.place(middle / total, depths[v], total)
            })
            .collect();

        tracing::debug!(
            root = root.0,
            vertices = n,
            leaves = total,
            mode = ?self.config.coordinate_mode,
            "computed branch layout"
        );

        TreeLayout {
            root,
            positions,
            depths,
            pairs: tree.edge_pairs().to_vec(),
        }
    }

    // ========================================================================
    // Coordinate transform
    // ========================================================================

    /// Map a fraction of the root span and a depth to output coordinates.
    fn place(&self, fraction: f32, depth: u32, total_leaves: f32) -> Point {
        let distance = depth as f32 * self.config.level_separation;
        match self.config.coordinate_mode {
            CoordinateMode::Linear => {
                let x = (fraction - 0.5) * total_leaves * self.config.leaf_separation;
                Point::new(x, -distance)
            }
            CoordinateMode::Radial => {
                let angle = self.config.center_angle + (fraction - 0.5) * self.config.angular_span;
                Point::new(distance * angle.cos(), distance * angle.sin())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::samples::{cube_graph, sample_graph};
    use crate::graph::EmbeddedGraph;

    const EPS: f32 = 1e-4;

    fn assert_near(actual: Point, x: f32, y: f32) {
        assert!(
            (actual.x - x).abs() < EPS && (actual.y - y).abs() < EPS,
            "expected ({x}, {y}), got ({}, {})",
            actual.x,
            actual.y
        );
    }

    fn sample_tree() -> SpanningTree {
        SpanningTree::depth_first(&sample_graph(), VertexId(0)).unwrap()
    }

    #[test]
    fn test_single_vertex() {
        let g = EmbeddedGraph::from_pairs(&[(3.0, 4.0)], &[]).unwrap();
        let tree = SpanningTree::depth_first(&g, VertexId(0)).unwrap();
        let layout = BranchLayout::with_defaults().compute(&tree);
        assert_near(layout.positions()[0], 0.0, 0.0);
        assert!(layout.branches().is_empty());
    }

    #[test]
    fn test_linear_sample_tree() {
        let layout = BranchLayout::with_defaults().compute(&sample_tree());
        // Chain 0-1-2, then 2 splits into leaf 3 and the chain 4-5-6-7.
        assert_near(layout.positions()[0], 0.0, 0.0);
        assert_near(layout.positions()[1], 0.0, -1.0);
        assert_near(layout.positions()[2], 0.0, -2.0);
        assert_near(layout.positions()[3], -0.5, -3.0);
        assert_near(layout.positions()[4], 0.5, -3.0);
        assert_near(layout.positions()[7], 0.5, -6.0);
        assert_eq!(layout.max_depth(), 6);
        assert_eq!(layout.depth(VertexId(5)), Some(4));
    }

    #[test]
    fn test_shares_follow_leaf_counts() {
        // 0 -> {1, 2}, 1 -> {3, 4}: vertex 1 gets two leaf widths, vertex 2 one.
        let g = EmbeddedGraph::from_pairs(
            &[(0.0, 0.0), (-1.0, -1.0), (1.0, -1.0), (-2.0, -2.0), (0.0, -2.0)],
            &[(0, 1), (0, 2), (1, 3), (1, 4)],
        )
        .unwrap();
        let tree = SpanningTree::depth_first(&g, VertexId(0)).unwrap();
        let layout = BranchLayout::new(BranchLayoutConfig {
            level_separation: 2.0,
            leaf_separation: 10.0,
            ..Default::default()
        })
        .compute(&tree);

        assert_near(layout.positions()[1], -5.0, -2.0);
        assert_near(layout.positions()[2], 10.0, -2.0);
        assert_near(layout.positions()[3], -10.0, -4.0);
        assert_near(layout.positions()[4], 0.0, -4.0);
    }

    #[test]
    fn test_radial_sample_tree() {
        let layout = BranchLayout::new(BranchLayoutConfig {
            coordinate_mode: CoordinateMode::Radial,
            ..Default::default()
        })
        .compute(&sample_tree());

        assert_near(layout.positions()[0], 0.0, 0.0);
        assert_near(layout.positions()[1], 0.0, -1.0);
        // Leaf 3 takes the first half of the circle, the 4-5-6-7 branch the second.
        assert_near(layout.positions()[3], -3.0, 0.0);
        assert_near(layout.positions()[4], 3.0, 0.0);

        for v in 0..8 {
            let p = layout.positions()[v];
            let radius = (p.x * p.x + p.y * p.y).sqrt();
            let depth = layout.depth(VertexId(v as u32)).unwrap() as f32;
            assert!((radius - depth).abs() < EPS, "vertex {v}: radius {radius}");
        }
    }

    #[test]
    fn test_branches_follow_addition_order() {
        let g = cube_graph();
        let tree = SpanningTree::depth_first(&g, VertexId(0)).unwrap();
        let layout = BranchLayout::with_defaults().compute(&tree);
        let branches = layout.branches();
        assert_eq!(branches.len(), 7);
        for (&(p, c), &(from, to)) in tree.edge_pairs().iter().zip(&branches) {
            assert_eq!(layout.position(p), Some(from));
            assert_eq!(layout.position(c), Some(to));
        }
        assert_eq!(branches[0].0, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_deterministic() {
        let tree = sample_tree();
        let layout = BranchLayout::with_defaults();
        assert_eq!(layout.compute(&tree), layout.compute(&tree));
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config: BranchLayoutConfig =
            serde_json::from_str(r#"{ "coordinate_mode": "Radial", "level_separation": 80.0 }"#)
                .unwrap();
        assert_eq!(config.coordinate_mode, CoordinateMode::Radial);
        assert_eq!(config.level_separation, 80.0);
        assert_eq!(config.leaf_separation, 1.0);
    }
}
