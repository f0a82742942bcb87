//! Embedded graph model.
//!
//! This module provides the immutable plane graph the rest of the engine
//! derives from: vertices with positions, orientation-carrying edges, and the
//! [`Topology`] trait that spanning trees traverse.

mod edge;
mod embedded;
pub mod samples;
mod topology;
mod vertex;

pub use edge::{Edge, EdgeId, EdgeKey};
pub use embedded::EmbeddedGraph;
pub use topology::Topology;
pub use vertex::{Point, VertexId};
