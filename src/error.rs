//! Failures that can occur while turning a [`MaterialDescriptor`] into a
//! renderable material.
//!
//! None of these are fatal. The engine reports them through `log` and leaves
//! the scene untouched; retrying with corrected input is always possible.
//!
//! [`MaterialDescriptor`]: crate::data_structures::material::MaterialDescriptor

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("`{value}` is not a hex colour (expected six hex digits such as `66533C`)")]
    MalformedColor { value: String },

    #[error("texture descriptor has an empty texture path")]
    EmptyTexturePath,

    #[error("could not load texture `{path}`: {reason}")]
    TextureLoad { path: String, reason: String },

    #[error("could not decode texture `{path}`: {reason}")]
    TextureDecode { path: String, reason: String },
}
