//! Texture state shared by materials, and GPU upload of material surfaces.
//!
//! A [`TextureSlot`] is handed out as soon as a texture swatch is picked. The
//! image arrives later (or never); until then the slot is `Pending` and the
//! material renders without its map. [`GpuTexture`] turns a material into a
//! WGPU texture + sampler pair whenever the renderer asks for one.

use std::{cell::RefCell, rc::Rc};

use image::RgbaImage;

use crate::data_structures::material::{Material, Rgb, Surface, WrapMode};

#[derive(Debug)]
pub enum TextureState {
    Pending,
    Ready(Rc<RgbaImage>),
    Failed(String),
}

/// A texture that may not have finished loading.
///
/// Clones share the same state, so every material holding the slot sees the
/// image as soon as the load completes.
#[derive(Clone, Debug)]
pub struct TextureSlot {
    path: String,
    state: Rc<RefCell<TextureState>>,
}

impl TextureSlot {
    pub fn pending(path: &str) -> Self {
        Self {
            path: path.to_string(),
            state: Rc::new(RefCell::new(TextureState::Pending)),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_pending(&self) -> bool {
        matches!(*self.state.borrow(), TextureState::Pending)
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.state.borrow(), TextureState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(*self.state.borrow(), TextureState::Failed(_))
    }

    pub fn image(&self) -> Option<Rc<RgbaImage>> {
        match &*self.state.borrow() {
            TextureState::Ready(image) => Some(image.clone()),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<String> {
        match &*self.state.borrow() {
            TextureState::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    pub(crate) fn fill(&self, image: RgbaImage) {
        *self.state.borrow_mut() = TextureState::Ready(Rc::new(image));
    }

    pub(crate) fn fail(&self, reason: String) {
        *self.state.borrow_mut() = TextureState::Failed(reason);
    }

    /// True if both handles point at the same load.
    pub fn same_load(&self, other: &TextureSlot) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

/// A material surface uploaded to the GPU.
#[derive(Clone, Debug)]
pub struct GpuTexture {
    #[allow(unused)]
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl GpuTexture {
    /// Upload whatever the material currently shows.
    ///
    /// Textured materials whose image has not arrived (or failed) fall back to
    /// a white texel, so the mesh stays drawable and picks up the map on the
    /// next upload.
    pub fn from_material(device: &wgpu::Device, queue: &wgpu::Queue, material: &Material) -> Self {
        match &material.surface {
            Surface::Solid { color } => Self::solid(device, queue, *color, &material.name),
            Surface::Textured {
                texture,
                wrap_s,
                wrap_t,
                ..
            } => match texture.image() {
                Some(image) => {
                    Self::from_rgba(device, queue, &image, &material.name, *wrap_s, *wrap_t)
                }
                None => {
                    log::debug!(
                        "texture {} not available yet, uploading placeholder",
                        texture.path()
                    );
                    Self::solid(device, queue, Rgb::new(255, 255, 255), &material.name)
                }
            },
        }
    }

    /// A 1x1 texture of a single colour.
    pub fn solid(device: &wgpu::Device, queue: &wgpu::Queue, color: Rgb, label: &str) -> Self {
        let image = RgbaImage::from_pixel(1, 1, image::Rgba(color.to_rgba8()));
        Self::from_rgba(
            device,
            queue,
            &image,
            label,
            WrapMode::ClampToEdge,
            WrapMode::ClampToEdge,
        )
    }

    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &RgbaImage,
        label: &str,
        wrap_s: WrapMode,
        wrap_t: WrapMode,
    ) -> Self {
        let dimensions = rgba.dimensions();
        let size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            rgba.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * dimensions.0),
                rows_per_image: Some(dimensions.1),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wrap_s.to_address_mode(),
            address_mode_v: wrap_t.to_address_mode(),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }
}
