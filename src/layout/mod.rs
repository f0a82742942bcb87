//! Layout algorithms for redrawing trees.
//!
//! Layouts compute target positions independent of the embedding, so a scene
//! can animate a spanning tree from its drawn position into a rooted shape.

pub mod branch;

pub use branch::{BranchLayout, BranchLayoutConfig, CoordinateMode, TreeLayout};
