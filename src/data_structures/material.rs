//! Material descriptors, swatches and resolved materials.
//!
//! A [`MaterialDescriptor`] is plain data (what the swatch tray shows and what
//! a config file holds). The engine turns it into a [`Material`], which is what
//! mesh nodes actually carry. Materials are shared between all meshes of a
//! part through [`MaterialHandle`].

use std::{fmt, rc::Rc};

use serde::Deserialize;

use crate::{data_structures::texture::TextureSlot, error::ResolutionError};

/// Shininess used when a descriptor does not set one.
pub const DEFAULT_SHININESS: f32 = 10.0;

/// Logical grouping key for a region of a model, e.g. `legs` or `back`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct PartId(String);

impl PartId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Mesh names embed the part as a substring (`chair_legs_01` belongs to `legs`).
    pub fn matches_name(&self, name: &str) -> bool {
        name.contains(self.0.as_str())
    }
}

impl From<&str> for PartId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PartId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses six hex digits. A leading `#` or `0x` is accepted.
    pub fn from_hex(value: &str) -> Result<Self, ResolutionError> {
        let malformed = || ResolutionError::MalformedColor {
            value: value.to_string(),
        };
        let digits = value.trim();
        let digits = digits
            .strip_prefix('#')
            .or_else(|| digits.strip_prefix("0x"))
            .or_else(|| digits.strip_prefix("0X"))
            .unwrap_or(digits);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(malformed());
        }
        let rgb = u32::from_str_radix(digits, 16).map_err(|_| malformed())?;
        Ok(Self {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        })
    }

    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

/// How a texture behaves outside the `[0, 1]` UV range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WrapMode {
    #[default]
    ClampToEdge,
    Repeat,
    MirroredRepeat,
}

impl WrapMode {
    pub fn to_address_mode(self) -> wgpu::AddressMode {
        match self {
            WrapMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
            WrapMode::Repeat => wgpu::AddressMode::Repeat,
            WrapMode::MirroredRepeat => wgpu::AddressMode::MirrorRepeat,
        }
    }
}

fn default_size() -> [f32; 3] {
    [1.0; 3]
}

/// What a swatch stands for: either a flat colour or a tiled texture.
///
/// In config files the variant is picked by which key is present:
///
/// ```toml
/// [[swatches]]
/// texture = "texture/wood.png"
/// size = [3.0, 3.0, 3.0]
/// shininess = 0.0
///
/// [[swatches]]
/// color = "173A2F"
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MaterialDescriptor {
    Texture {
        texture: String,
        #[serde(default = "default_size")]
        size: [f32; 3],
        #[serde(default)]
        shininess: Option<f32>,
    },
    Color {
        color: String,
        #[serde(default)]
        shininess: Option<f32>,
    },
}

impl MaterialDescriptor {
    pub fn color(color: impl Into<String>) -> Self {
        Self::Color {
            color: color.into(),
            shininess: None,
        }
    }

    pub fn texture(texture: impl Into<String>, size: [f32; 3]) -> Self {
        Self::Texture {
            texture: texture.into(),
            size,
            shininess: None,
        }
    }

    pub fn with_shininess(mut self, value: f32) -> Self {
        match &mut self {
            Self::Texture { shininess, .. } | Self::Color { shininess, .. } => {
                *shininess = Some(value)
            }
        }
        self
    }

    pub fn shininess(&self) -> Option<f32> {
        match self {
            Self::Texture { shininess, .. } | Self::Color { shininess, .. } => *shininess,
        }
    }
}

/// A clickable entry of the swatch tray.
#[derive(Clone, Debug, PartialEq)]
pub struct Swatch {
    index: usize,
    descriptor: MaterialDescriptor,
}

impl Swatch {
    pub fn new(index: usize, descriptor: MaterialDescriptor) -> Self {
        Self { index, descriptor }
    }

    /// Numbers the descriptors in order, the way the tray lays them out.
    pub fn table(descriptors: impl IntoIterator<Item = MaterialDescriptor>) -> Vec<Swatch> {
        descriptors
            .into_iter()
            .enumerate()
            .map(|(index, descriptor)| Swatch::new(index, descriptor))
            .collect()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn descriptor(&self) -> &MaterialDescriptor {
        &self.descriptor
    }

    /// CSS `background` value used to preview the swatch in the tray.
    pub fn css_background(&self) -> String {
        match &self.descriptor {
            MaterialDescriptor::Texture { texture, .. } => format!("url({texture})"),
            MaterialDescriptor::Color { color, .. } => match Rgb::from_hex(color) {
                Ok(rgb) => format!("#{}", rgb.to_hex()),
                Err(_) => format!("#{color}"),
            },
        }
    }
}

#[derive(Clone, Debug)]
pub enum Surface {
    Solid {
        color: Rgb,
    },
    Textured {
        texture: TextureSlot,
        repeat: cgmath::Vector2<f32>,
        wrap_s: WrapMode,
        wrap_t: WrapMode,
    },
}

/// A resolved, renderable material.
#[derive(Clone, Debug)]
pub struct Material {
    pub name: String,
    pub surface: Surface,
    pub shininess: f32,
}

/// Materials are shared by every mesh of a part, like the original scene did.
pub type MaterialHandle = Rc<Material>;

impl Material {
    pub fn solid(name: &str, color: Rgb, shininess: f32) -> Self {
        Self {
            name: name.to_string(),
            surface: Surface::Solid { color },
            shininess,
        }
    }

    pub fn textured(
        name: &str,
        texture: TextureSlot,
        repeat: cgmath::Vector2<f32>,
        shininess: f32,
    ) -> Self {
        Self {
            name: name.to_string(),
            surface: Surface::Textured {
                texture,
                repeat,
                wrap_s: WrapMode::Repeat,
                wrap_t: WrapMode::Repeat,
            },
            shininess,
        }
    }

    pub fn into_handle(self) -> MaterialHandle {
        Rc::new(self)
    }

    pub fn color(&self) -> Option<Rgb> {
        match &self.surface {
            Surface::Solid { color } => Some(*color),
            Surface::Textured { .. } => None,
        }
    }

    pub fn texture(&self) -> Option<&TextureSlot> {
        match &self.surface {
            Surface::Textured { texture, .. } => Some(texture),
            Surface::Solid { .. } => None,
        }
    }

    pub fn repeat(&self) -> Option<cgmath::Vector2<f32>> {
        match &self.surface {
            Surface::Textured { repeat, .. } => Some(*repeat),
            Surface::Solid { .. } => None,
        }
    }

    pub fn wrap_modes(&self) -> (WrapMode, WrapMode) {
        match &self.surface {
            Surface::Textured { wrap_s, wrap_t, .. } => (*wrap_s, *wrap_t),
            Surface::Solid { .. } => (WrapMode::ClampToEdge, WrapMode::ClampToEdge),
        }
    }
}
