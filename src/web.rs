//! Browser bindings.
//!
//! The page builds the tray and tabs itself and forwards clicks here:
//!
//! ```js
//! const configurator = await Configurator.load("chair.glb", null);
//! tab.addEventListener("click", () =>
//!     configurator.on_part_tab_selected(tab.dataset.option));
//! swatch.addEventListener("click", () =>
//!     configurator.on_swatch_selected(Number(swatch.dataset.key)));
//! ```

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::{
    config::ConfiguratorConfig,
    context::Context,
    data_structures::material::PartId,
    flow::spawn_out,
    resources::AssetLoader,
};

#[wasm_bindgen]
pub struct Configurator {
    ctx: Context,
}

#[wasm_bindgen]
impl Configurator {
    /// Loads `model` from `/assets/` and applies the initial bindings.
    /// Without `config_toml` the stock chair setup is used.
    pub async fn load(model: String, config_toml: Option<String>) -> Result<Configurator, JsValue> {
        let config = match config_toml {
            Some(text) => ConfiguratorConfig::from_toml_str(&text)
                .map_err(|e| JsValue::from_str(&format!("invalid config: {e}")))?,
            None => ConfiguratorConfig::default(),
        };
        let assets = AssetLoader::default();
        let root = assets
            .load_scene_gltf(&model)
            .await
            .map_err(|e| JsValue::from_str(&format!("could not load {model}: {e}")))?;
        let mut ctx = Context::new(root, config, Rc::new(assets));
        spawn_out(ctx.init());
        Ok(Configurator { ctx })
    }

    pub fn on_swatch_selected(&mut self, index: usize) {
        spawn_out(self.ctx.on_swatch_selected(index));
    }

    pub fn on_part_tab_selected(&mut self, part: String) {
        self.ctx.on_part_tab_selected(PartId::from(part));
    }

    pub fn active_part(&self) -> Option<String> {
        self.ctx.active_part().map(|part| part.to_string())
    }

    /// CSS backgrounds for the tray, in swatch order.
    pub fn swatch_backgrounds(&self) -> Vec<String> {
        self.ctx
            .swatches()
            .iter()
            .map(|swatch| swatch.css_background())
            .collect()
    }
}
