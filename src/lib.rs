//! swatch-ngin
//!
//! Part-based material swapping for loaded 3D models, native and WASM. A
//! model's meshes are grouped into parts by name (`chair_legs_01` belongs to
//! `legs`); clicking a swatch re-materials every mesh of the active part. The
//! crate owns the scene graph, the material bindings and texture loading, and
//! leaves cameras, lights and the render loop to the host.
//!
//! High-level modules
//! - `config`: swatch table and initial part bindings, loadable from TOML
//! - `context`: the session object that owns the scene and the active part
//! - `data_structures`: scene graph nodes, materials and texture slots
//! - `engine`: the material assignment walks and descriptor resolution
//! - `error`: resolution failures
//! - `flow`: typed UI events and how pending texture loads are driven
//! - `resources`: helpers to load scenes, textures and config from assets
//!

pub mod config;
pub mod context;
pub mod data_structures;
pub mod engine;
pub mod error;
pub mod flow;
pub mod resources;
#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-exports commonly used types for convenience in downstream code.
pub use data_structures::material::{MaterialDescriptor, PartId, Swatch};
pub use data_structures::scene_graph::{ContainerNode, MeshNode, SceneNode};
pub use flow::{ConfiguratorEvent, Out};
