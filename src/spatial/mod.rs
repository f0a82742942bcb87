//! Spatial indexing for O(log n) hit testing.
//!
//! Maps pointer or scene coordinates back to graph elements: the nearest
//! vertex, the nearest edge, and the face under a point.

mod rtree;

pub use rtree::{EdgeSegment, SpatialIndex, VertexPoint};
