use std::rc::Rc;

use crate::{
    config::ConfiguratorConfig,
    data_structures::{
        material::{MaterialDescriptor, PartId, Swatch},
        scene_graph::SceneNode,
    },
    engine::{self, resolve_material},
    flow::{ConfiguratorEvent, Out},
    resources::{TextureLoader, TextureSource},
};

/// Everything a configurator session owns.
///
/// Created once the model has been loaded and dropped when the scene goes
/// away. All commands run through here, on the one thread that owns the
/// scene.
#[derive(Debug)]
pub struct Context {
    root: Box<dyn SceneNode>,
    active_part: Option<PartId>,
    swatches: Vec<Swatch>,
    initial_parts: Vec<PartId>,
    initial_material: MaterialDescriptor,
    default_shininess: f32,
    textures: TextureLoader,
}

impl Context {
    pub fn new(
        root: Box<dyn SceneNode>,
        config: ConfiguratorConfig,
        source: Rc<dyn TextureSource>,
    ) -> Self {
        let swatches = config.swatch_table();
        log::info!(
            "configurator ready with {} swatch(es), active part {:?}",
            swatches.len(),
            config.active_part.as_ref().map(PartId::as_str)
        );
        Self {
            root,
            active_part: config.active_part,
            swatches,
            initial_parts: config.initial_parts,
            initial_material: config.initial_material,
            default_shininess: config.default_shininess,
            textures: TextureLoader::new(source),
        }
    }

    /// Binds the initial material to every configured part.
    ///
    /// One material instance is shared by all parts, as the stock scene does.
    pub fn init(&mut self) -> Out {
        let resolved = match resolve_material(
            &self.initial_material,
            &self.textures,
            self.default_shininess,
        ) {
            Ok(resolved) => resolved,
            Err(e) => {
                log::error!("initial material unusable, parts keep their model materials: {e}");
                return Out::Empty;
            }
        };
        for part in &self.initial_parts {
            let bound = engine::apply_initial(self.root.as_mut(), part, &resolved.material);
            log::debug!("part {part}: {bound} mesh(es)");
        }
        Out::from_loads(resolved.pending.into_iter().map(|p| p.detach()).collect())
    }

    pub fn handle_event(&mut self, event: ConfiguratorEvent) -> Out {
        match event {
            ConfiguratorEvent::SwatchSelected(index) => self.on_swatch_selected(index),
            ConfiguratorEvent::PartTabSelected(part) => {
                self.on_part_tab_selected(part);
                Out::Empty
            }
        }
    }

    pub fn on_part_tab_selected(&mut self, part: PartId) {
        log::debug!("active part is now {part}");
        self.active_part = Some(part);
    }

    /// Applies swatch `index` to the active part.
    ///
    /// Unknown indices and a missing active part are ignored with a warning.
    pub fn on_swatch_selected(&mut self, index: usize) -> Out {
        let Some(swatch) = self.swatches.get(index) else {
            log::warn!(
                "swatch {index} does not exist ({} available)",
                self.swatches.len()
            );
            return Out::Empty;
        };
        let Some(active) = self.active_part.as_ref() else {
            log::warn!("swatch {index} selected before any part was chosen");
            return Out::Empty;
        };
        let pending = engine::apply_descriptor(
            self.root.as_mut(),
            active,
            swatch.descriptor(),
            &self.textures,
            self.default_shininess,
        );
        Out::from_loads(pending.into_iter().map(|p| p.detach()).collect())
    }

    pub fn active_part(&self) -> Option<&PartId> {
        self.active_part.as_ref()
    }

    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    pub fn root(&self) -> &dyn SceneNode {
        self.root.as_ref()
    }

    pub fn textures(&self) -> &TextureLoader {
        &self.textures
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        log::debug!(
            "tearing down configurator ({} cached texture(s))",
            self.textures.cached()
        );
        self.textures.clear();
    }
}
