//! Structures derived from a plane embedding.
//!
//! Faces come first; the dual, spanning trees and cycle enclosures are all
//! built from an [`EmbeddedGraph`](crate::graph::EmbeddedGraph) plus its
//! [`FaceSet`].

mod dual;
mod enclosure;
mod faces;
mod spanning;
mod walk;

pub use dual::{DualConfig, DualGraph, MIN_OUTER_MARGIN};
pub use enclosure::Enclosure;
pub use faces::{EdgeSides, Face, FaceId, FaceSet};
pub use spanning::SpanningTree;
pub use walk::{WalkCheck, WalkKind, WalkReport, WalkViolation};
