use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use image::{ImageFormat, RgbaImage};
use instant::Instant;

use crate::{data_structures::texture::TextureSlot, error::ResolutionError, resources::AssetLoader};

pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = anyhow::Result<Vec<u8>>> + 'a>>;

/// Where texture bytes come from.
///
/// The engine never touches the file system or network itself; it asks a
/// `TextureSource` and writes the outcome into a [`TextureSlot`].
pub trait TextureSource {
    fn fetch<'a>(&'a self, path: &'a str) -> FetchFuture<'a>;
}

impl TextureSource for AssetLoader {
    fn fetch<'a>(&'a self, path: &'a str) -> FetchFuture<'a> {
        Box::pin(self.load_binary(path))
    }
}

/// Decodes image bytes. The extension of `path` is used as a format hint;
/// if that fails the format is guessed from the content.
pub fn decode_texture(bytes: &[u8], path: &str) -> Result<RgbaImage, ResolutionError> {
    let hinted = ImageFormat::from_path(path)
        .ok()
        .and_then(|format| image::load_from_memory_with_format(bytes, format).ok());
    let img = match hinted {
        Some(img) => img,
        None => image::load_from_memory(bytes).map_err(|e| ResolutionError::TextureDecode {
            path: path.to_string(),
            reason: e.to_string(),
        })?,
    };
    Ok(img.to_rgba8())
}

/// A texture load that has been requested but not run yet.
///
/// Dropping it before the load finishes marks the slot failed, so the next
/// request for the same path starts a fresh load.
#[must_use = "the texture slot stays empty unless the load is driven"]
pub struct PendingTexture {
    slot: TextureSlot,
    source: Rc<dyn TextureSource>,
}

impl std::fmt::Debug for PendingTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTexture")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

impl PendingTexture {
    pub fn slot(&self) -> &TextureSlot {
        &self.slot
    }

    /// Fetches and decodes the image, then fills the slot.
    ///
    /// The slot is marked failed on error, and the error is returned so the
    /// caller can report it.
    pub async fn resolve(self) -> Result<(), ResolutionError> {
        let path = self.slot.path().to_string();
        let started = Instant::now();
        let outcome = match self.source.fetch(&path).await {
            Ok(bytes) => decode_texture(&bytes, &path),
            Err(e) => Err(ResolutionError::TextureLoad {
                path: path.clone(),
                reason: e.to_string(),
            }),
        };
        match outcome {
            Ok(image) => {
                log::debug!(
                    "texture {} ({}x{}) ready after {:?}",
                    path,
                    image.width(),
                    image.height(),
                    started.elapsed()
                );
                self.slot.fill(image);
                Ok(())
            }
            Err(e) => {
                self.slot.fail(e.to_string());
                Err(e)
            }
        }
    }

    /// The load as a fire-and-forget future. Failures end up in the log.
    pub fn detach(self) -> Pin<Box<dyn Future<Output = ()>>> {
        Box::pin(async move {
            if let Err(e) = self.resolve().await {
                log::warn!("{e}");
            }
        })
    }
}

impl Drop for PendingTexture {
    fn drop(&mut self) {
        if self.slot.is_pending() {
            log::debug!("load of {} dropped before it finished", self.slot.path());
            self.slot.fail("load dropped before it finished".to_string());
        }
    }
}

/// Hands out texture slots and remembers them per path, so picking the same
/// texture swatch twice shares one load.
pub struct TextureLoader {
    source: Rc<dyn TextureSource>,
    cache: RefCell<HashMap<String, TextureSlot>>,
}

impl std::fmt::Debug for TextureLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureLoader")
            .field("cached", &self.cache.borrow().len())
            .finish_non_exhaustive()
    }
}

impl TextureLoader {
    pub fn new(source: Rc<dyn TextureSource>) -> Self {
        Self {
            source,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Returns the slot for `path` and, if a load still has to happen, the
    /// pending load for it. Failed loads are retried.
    pub fn request(&self, path: &str) -> (TextureSlot, Option<PendingTexture>) {
        let mut cache = self.cache.borrow_mut();
        if let Some(slot) = cache.get(path).filter(|slot| !slot.is_failed()) {
            return (slot.clone(), None);
        }
        let slot = TextureSlot::pending(path);
        cache.insert(path.to_string(), slot.clone());
        let pending = PendingTexture {
            slot: slot.clone(),
            source: self.source.clone(),
        };
        (slot, Some(pending))
    }

    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }
}
