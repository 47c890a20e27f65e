//! Engine data structures: scene graphs, materials and textures.
//!
//! - `scene_graph` holds the loaded model as a tree of container and mesh nodes
//! - `material` contains descriptors, swatches and resolved materials
//! - `texture` contains late-arriving texture state and GPU upload

pub mod material;
pub mod scene_graph;
pub mod texture;
