//! R-tree based hit testing using the rstar crate.
//!
//! Three trees are kept: vertices as points, edges as segments, and bounded
//! faces as bounding boxes refined by an exact point-in-polygon test.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use crate::graph::{EdgeId, EmbeddedGraph, Point, VertexId};
use crate::planar::{FaceId, FaceSet};

/// A vertex position in the index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexPoint {
    pub id: VertexId,
    pub x: f32,
    pub y: f32,
}

impl RTreeObject for VertexPoint {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for VertexPoint {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.x - point[0];
        let dy = self.y - point[1];
        dx * dx + dy * dy
    }
}

/// An edge drawn as a straight segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSegment {
    pub id: EdgeId,
    pub from: [f32; 2],
    pub to: [f32; 2],
}

impl RTreeObject for EdgeSegment {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.from, self.to)
    }
}

impl PointDistance for EdgeSegment {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let (ax, ay) = (self.from[0], self.from[1]);
        let (dx, dy) = (self.to[0] - ax, self.to[1] - ay);
        let length_2 = dx * dx + dy * dy;
        let t = if length_2 > f32::EPSILON {
            (((point[0] - ax) * dx + (point[1] - ay) * dy) / length_2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let (px, py) = (ax + t * dx - point[0], ay + t * dy - point[1]);
        px * px + py * py
    }
}

/// A bounded face's boundary polygon.
#[derive(Debug, Clone, PartialEq)]
struct FacePolygon {
    id: FaceId,
    polygon: Vec<[f32; 2]>,
    area: f32,
    envelope: AABB<[f32; 2]>,
}

impl RTreeObject for FacePolygon {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl FacePolygon {
    /// Even-odd ray casting.
    fn contains(&self, x: f32, y: f32) -> bool {
        let n = self.polygon.len();
        let mut inside = false;
        let mut j = n.wrapping_sub(1);
        for i in 0..n {
            let [xi, yi] = self.polygon[i];
            let [xj, yj] = self.polygon[j];
            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

/// Spatial index over one embedding and its faces.
pub struct SpatialIndex {
    vertices: RTree<VertexPoint>,
    edges: RTree<EdgeSegment>,
    faces: RTree<FacePolygon>,
    outer: FaceId,
}

impl SpatialIndex {
    /// Bulk-load the index for `graph` and its extracted `faces`.
    pub fn build(graph: &EmbeddedGraph, faces: &FaceSet) -> Self {
        let vertices = graph
            .vertices()
            .zip(graph.positions())
            .map(|(id, p)| VertexPoint { id, x: p.x, y: p.y })
            .collect();

        let edges = (0..graph.edge_count() as u32)
            .map(EdgeId)
            .filter_map(|id| {
                graph.segment(id).map(|(a, b)| EdgeSegment {
                    id,
                    from: [a.x, a.y],
                    to: [b.x, b.y],
                })
            })
            .collect();

        let polygons = faces
            .bounded()
            .filter(|face| face.len() >= 3)
            .map(|face| {
                let polygon: Vec<[f32; 2]> = face
                    .polygon(graph)
                    .into_iter()
                    .map(|p: Point| [p.x, p.y])
                    .collect();
                FacePolygon {
                    id: face.id(),
                    envelope: AABB::from_points(polygon.iter()),
                    polygon,
                    area: face.signed_area().abs(),
                }
            })
            .collect();

        Self {
            vertices: RTree::bulk_load(vertices),
            edges: RTree::bulk_load(edges),
            faces: RTree::bulk_load(polygons),
            outer: faces.outer(),
        }
    }

    /// Find the nearest vertex to a point.
    pub fn nearest_vertex(&self, x: f32, y: f32) -> Option<VertexId> {
        self.vertices.nearest_neighbor(&[x, y]).map(|point| point.id)
    }

    /// Find the nearest vertex within a maximum distance.
    pub fn nearest_vertex_within(&self, x: f32, y: f32, max_distance: f32) -> Option<VertexId> {
        let max_distance_sq = max_distance * max_distance;
        self.vertices
            .nearest_neighbor(&[x, y])
            .filter(|point| point.distance_2(&[x, y]) <= max_distance_sq)
            .map(|point| point.id)
    }

    /// Find the edge whose segment passes closest to a point.
    pub fn nearest_edge(&self, x: f32, y: f32) -> Option<EdgeId> {
        self.edges.nearest_neighbor(&[x, y]).map(|segment| segment.id)
    }

    /// The face containing a point: the smallest bounded face whose polygon
    /// contains it, or the outer face.
    pub fn face_at(&self, x: f32, y: f32) -> FaceId {
        self.faces
            .locate_in_envelope_intersecting(&AABB::from_point([x, y]))
            .filter(|face| face.contains(x, y))
            .min_by(|a, b| a.area.total_cmp(&b.area))
            .map_or(self.outer, |face| face.id)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.size()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.size()
    }
}
