//! Material assignment.
//!
//! Binding a material to a part happens in two steps that match on different
//! things on purpose:
//!
//! - [`apply_initial`] matches mesh *names* by substring, so compound names such
//!   as `chair_legs_01` land in `legs`, and stamps each match with the part.
//! - [`apply_to_active_part`] matches the *stamp* exactly, so a later swatch
//!   click on `supports` never bleeds into `legs_support`.
//!
//! Both walks are stateless; the only state they leave behind is the stamp.
//! Neither treats "nothing matched" as an error.

use crate::{
    data_structures::{
        material::{DEFAULT_SHININESS, Material, MaterialDescriptor, MaterialHandle, PartId, Rgb},
        scene_graph::{MeshNode, SceneNode, traverse_mut},
    },
    error::ResolutionError,
    resources::{PendingTexture, TextureLoader},
};

/// Calls `f` on every well-formed mesh below `root`.
///
/// Meshes without a name cannot belong to any part and are skipped.
fn for_each_mesh(root: &mut dyn SceneNode, f: &mut dyn FnMut(&str, &mut MeshNode)) {
    traverse_mut(root, &mut |node| {
        let Some(mesh) = node.as_mesh_mut() else {
            return;
        };
        let Some(name) = mesh.name().map(str::to_string) else {
            log::debug!("skipping unnamed mesh");
            return;
        };
        f(&name, mesh);
    });
}

/// Binds `material` to every mesh whose name contains `part` and stamps
/// those meshes with `part`.
///
/// Returns the number of meshes bound. Applying the same binding again leaves
/// the scene as it was.
pub fn apply_initial(root: &mut dyn SceneNode, part: &PartId, material: &MaterialHandle) -> usize {
    let mut matched = 0;
    for_each_mesh(root, &mut |name, mesh| {
        if part.matches_name(name) {
            mesh.set_material(material.clone());
            mesh.stamp(part.clone());
            matched += 1;
        }
    });
    if matched == 0 {
        log::debug!("part {part} matched no mesh");
    }
    matched
}

/// Replaces the material of every mesh stamped with exactly `active`.
///
/// Returns the number of meshes changed.
pub fn apply_to_active_part(
    root: &mut dyn SceneNode,
    active: &PartId,
    material: &MaterialHandle,
) -> usize {
    let mut matched = 0;
    for_each_mesh(root, &mut |_, mesh| {
        if mesh.part() == Some(active) {
            mesh.set_material(material.clone());
            matched += 1;
        }
    });
    if matched == 0 {
        log::debug!("no mesh is stamped with part {active}");
    }
    matched
}

/// A material ready to be applied, plus the texture load it still needs.
#[derive(Debug)]
pub struct ResolvedMaterial {
    pub material: MaterialHandle,
    pub pending: Option<PendingTexture>,
}

fn valid_shininess(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

fn shininess_or_default(shininess: Option<f32>, default_shininess: f32) -> f32 {
    let default_shininess = if valid_shininess(default_shininess) {
        default_shininess
    } else {
        log::warn!("ignoring default shininess {default_shininess}, using {DEFAULT_SHININESS}");
        DEFAULT_SHININESS
    };
    match shininess {
        Some(value) if valid_shininess(value) => value,
        Some(value) => {
            log::warn!("ignoring shininess {value}, using {default_shininess}");
            default_shininess
        }
        None => default_shininess,
    }
}

/// Turns a descriptor into a material.
///
/// Colours resolve completely. Textures resolve to a material whose map is
/// still pending: the returned [`PendingTexture`] must be driven for the image
/// to show up, but the material can be applied right away.
pub fn resolve_material(
    descriptor: &MaterialDescriptor,
    textures: &TextureLoader,
    default_shininess: f32,
) -> Result<ResolvedMaterial, ResolutionError> {
    let shininess = shininess_or_default(descriptor.shininess(), default_shininess);
    match descriptor {
        MaterialDescriptor::Color { color, .. } => {
            let rgb = Rgb::from_hex(color)?;
            let name = format!("#{}", rgb.to_hex());
            Ok(ResolvedMaterial {
                material: Material::solid(&name, rgb, shininess).into_handle(),
                pending: None,
            })
        }
        MaterialDescriptor::Texture { texture, size, .. } => {
            if texture.trim().is_empty() {
                return Err(ResolutionError::EmptyTexturePath);
            }
            let (slot, pending) = textures.request(texture);
            let repeat = cgmath::Vector2::new(size[0], size[1]);
            Ok(ResolvedMaterial {
                material: Material::textured(texture, slot, repeat, shininess).into_handle(),
                pending,
            })
        }
    }
}

/// Resolves `descriptor` and applies it to the meshes stamped `active`.
///
/// A descriptor that cannot be resolved is logged and changes nothing.
pub fn apply_descriptor(
    root: &mut dyn SceneNode,
    active: &PartId,
    descriptor: &MaterialDescriptor,
    textures: &TextureLoader,
    default_shininess: f32,
) -> Option<PendingTexture> {
    match resolve_material(descriptor, textures, default_shininess) {
        Ok(resolved) => {
            let changed = apply_to_active_part(root, active, &resolved.material);
            log::info!(
                "applied {} to {changed} mesh(es) of part {active}",
                resolved.material.name
            );
            resolved.pending
        }
        Err(e) => {
            log::error!("could not resolve material for part {active}: {e}");
            None
        }
    }
}
