//! Vertex identifiers and coordinates.
//!
//! Vertices are the dots of the embedding. Each vertex has:
//! - A stable 0-based identifier assigned at construction
//! - A position (x, y) in the plane, plus an optional z that topology ignores

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable vertex identifier.
///
/// Equal to the vertex's position in the construction-time vertex list. Dual
/// graphs reuse the same type, where vertex `i` stands for face `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Create a new VertexId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Index into per-vertex arrays.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vertex({})", self.0)
    }
}

impl From<u32> for VertexId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<VertexId> for u32 {
    #[inline]
    fn from(id: VertexId) -> Self {
        id.0
    }
}

/// A point in graph space.
///
/// `z` is carried for callers that place graphs in a 3D scene; it never
/// influences faces, duals or trees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Point {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    #[inline]
    pub fn with_z(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Angle of the direction from `self` to `other`, in `(-PI, PI]`.
    #[inline]
    pub fn angle_to(self, other: Point) -> f32 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Squared planar distance.
    #[inline]
    pub fn distance_2(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Midpoint in the plane; z is averaged as well.
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::with_z(
            (self.x + other.x) / 2.0,
            (self.y + other.y) / 2.0,
            (self.z + other.z) / 2.0,
        )
    }
}

impl From<(f32, f32)> for Point {
    #[inline]
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

impl From<(f32, f32, f32)> for Point {
    #[inline]
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Point::with_z(x, y, z)
    }
}
