use std::{
    io::{BufReader, Cursor},
    path::{Path, PathBuf},
};

use crate::data_structures::scene_graph::{SceneNode, scene_from_gltf};

/**
 * This module contains all logic for loading scenes, textures and config from external files.
 */
pub mod texture;

pub use texture::{PendingTexture, TextureLoader, TextureSource, decode_texture};

/// Reads assets below a root directory: `<root>/<file>` on disk (native) or
/// `<origin>/<root>/<file>` over HTTP (wasm).
///
/// The default root is `assets`.
#[derive(Clone, Debug)]
pub struct AssetLoader {
    root: PathBuf,
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new("assets")
    }
}

impl AssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    #[cfg(target_arch = "wasm32")]
    fn format_url(&self, file_name: &str) -> anyhow::Result<reqwest::Url> {
        let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no window available"))?;
        let origin = window
            .location()
            .origin()
            .map_err(|_| anyhow::anyhow!("window has no origin"))?;
        let root = self.root.to_string_lossy();
        let base = reqwest::Url::parse(&format!("{}/{}/", origin, root.trim_matches('/')))?;
        Ok(base.join(file_name)?)
    }

    pub async fn load_string(&self, file_name: &str) -> anyhow::Result<String> {
        #[cfg(target_arch = "wasm32")]
        let txt = {
            let url = self.format_url(file_name)?;
            reqwest::get(url).await?.error_for_status()?.text().await?
        };
        #[cfg(not(target_arch = "wasm32"))]
        let txt = {
            let path = self.root.join(file_name);
            std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?
        };

        Ok(txt)
    }

    pub async fn load_binary(&self, file_name: &str) -> anyhow::Result<Vec<u8>> {
        #[cfg(target_arch = "wasm32")]
        let data = {
            let url = self.format_url(file_name)?;
            reqwest::get(url)
                .await?
                .error_for_status()?
                .bytes()
                .await?
                .to_vec()
        };
        #[cfg(not(target_arch = "wasm32"))]
        let data = {
            let path = self.root.join(file_name);
            std::fs::read(&path).map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?
        };

        Ok(data)
    }

    pub async fn load_scene_gltf(&self, file_name: &str) -> anyhow::Result<Box<dyn SceneNode>> {
        let bytes = self.load_binary(file_name).await?;
        let scene = scene_from_bytes(bytes)?;
        log::info!("loaded scene {file_name}");
        Ok(scene)
    }
}

/// Parses `.gltf` or `.glb` bytes into a scene tree.
pub fn scene_from_bytes(bytes: Vec<u8>) -> anyhow::Result<Box<dyn SceneNode>> {
    let gltf_reader = BufReader::new(Cursor::new(bytes));
    let gltf = gltf::Gltf::from_reader(gltf_reader)?;
    Ok(scene_from_gltf(&gltf))
}
