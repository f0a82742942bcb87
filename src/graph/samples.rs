//! Predefined embeddings used by the Euler's formula scenes.
//!
//! Every sample is connected and drawn without crossings, so each one passes
//! face extraction.

use super::edge::Edge;
use super::embedded::EmbeddedGraph;
use super::vertex::Point;
use crate::error::{Error, Result};

fn build(positions: &[(f32, f32)], edges: &[(u32, u32)]) -> EmbeddedGraph {
    // The tables below are fixed and valid; construction cannot fail on them.
    match EmbeddedGraph::from_pairs(positions, edges) {
        Ok(graph) => graph,
        Err(err) => unreachable!("sample graph table is invalid: {err}"),
    }
}

/// The running example: 8 vertices, 13 edges, 6 bounded faces plus the outer one.
///
/// The outer boundary is `0, 2, 4, 6, 7`; vertex 3 sits inside triangle
/// `0, 1, 2` and the chord `1-2` splits the left half from the right half.
pub fn sample_graph() -> EmbeddedGraph {
    build(
        &[
            (-3.0, 0.0),
            (0.0, 2.0),
            (0.0, -2.0),
            (-1.0, 0.0),
            (2.0, -2.0),
            (2.0, 0.0),
            (4.0, 1.0),
            (0.0, 4.0),
        ],
        &[
            (0, 1),
            (0, 2),
            (1, 2),
            (1, 3),
            (2, 3),
            (2, 4),
            (4, 5),
            (1, 5),
            (5, 6),
            (6, 7),
            (1, 7),
            (4, 6),
            (0, 7),
        ],
    )
}

/// Schlegel diagram of the cube: an outer square around an inner square.
pub fn cube_graph() -> EmbeddedGraph {
    build(
        &[
            (-2.0, -2.0),
            (2.0, -2.0),
            (2.0, 2.0),
            (-2.0, 2.0),
            (-1.0, -1.0),
            (1.0, -1.0),
            (1.0, 1.0),
            (-1.0, 1.0),
        ],
        &[
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ],
    )
}

/// Schlegel diagram of the octahedron: two nested, opposed triangles.
pub fn octahedron_graph() -> EmbeddedGraph {
    build(
        &[
            (0.0, 3.0),
            (-2.6, -1.5),
            (2.6, -1.5),
            (0.0, -1.0),
            (0.87, 0.5),
            (-0.87, 0.5),
        ],
        &[
            (0, 1),
            (1, 2),
            (2, 0),
            (3, 4),
            (4, 5),
            (5, 3),
            (0, 4),
            (0, 5),
            (1, 5),
            (1, 3),
            (2, 3),
            (2, 4),
        ],
    )
}

/// The complete graph on four vertices, one vertex at the center.
pub fn complete_graph_k4() -> EmbeddedGraph {
    build(
        &[(0.0, 0.0), (0.0, 2.0), (-1.73, -1.0), (1.73, -1.0)],
        &[(0, 1), (0, 2), (0, 3), (1, 2), (2, 3), (3, 1)],
    )
}

/// A `columns x rows` lattice with unit spacing.
///
/// Vertex `(c, r)` has id `r * columns + c`. Horizontal edges come first, then
/// vertical ones. Both dimensions must be at least 1; a lattice whose vertex
/// count does not fit a `u32` id fails with [`Error::InvalidGraph`].
pub fn grid_graph(columns: u32, rows: u32) -> Result<EmbeddedGraph> {
    let count = columns.checked_mul(rows).ok_or_else(|| {
        Error::invalid_graph(format!("{columns} x {rows} grid has too many vertices"))
    })?;
    let mut vertices = Vec::with_capacity(count as usize);
    for r in 0..rows {
        for c in 0..columns {
            vertices.push(Point::new(c as f32, r as f32));
        }
    }

    let id = |c: u32, r: u32| r * columns + c;
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 1..columns {
            edges.push(Edge::from((id(c - 1, r), id(c, r))));
        }
    }
    for r in 1..rows {
        for c in 0..columns {
            edges.push(Edge::from((id(c, r - 1), id(c, r))));
        }
    }

    EmbeddedGraph::new(vertices, edges)
}
