//! Configurator setup: which parts exist, what they start as, and which
//! swatches the tray offers.
//!
//! Loaded once at startup. Every key is optional; missing keys fall back to
//! [`ConfiguratorConfig::default`], which is the stock chair setup.

use serde::{Deserialize, Deserializer};

use crate::{
    data_structures::material::{DEFAULT_SHININESS, MaterialDescriptor, PartId, Swatch},
    resources::AssetLoader,
};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfiguratorConfig {
    pub default_shininess: f32,
    /// Part that swatch clicks go to before any tab is picked. An empty
    /// string means none: swatch clicks are ignored until a tab is picked.
    #[serde(deserialize_with = "blank_as_none")]
    pub active_part: Option<PartId>,
    /// Parts bound to `initial_material` when the scene is set up.
    pub initial_parts: Vec<PartId>,
    pub initial_material: MaterialDescriptor,
    pub swatches: Vec<MaterialDescriptor>,
}

impl Default for ConfiguratorConfig {
    fn default() -> Self {
        Self {
            default_shininess: DEFAULT_SHININESS,
            active_part: Some(PartId::from("legs")),
            initial_parts: ["back", "base", "cushions", "legs", "supports"]
                .into_iter()
                .map(PartId::from)
                .collect(),
            initial_material: MaterialDescriptor::color("F1F1F1").with_shininess(10.0),
            swatches: vec![
                MaterialDescriptor::texture("texture/gold.jpg", [2.0, 2.0, 2.0])
                    .with_shininess(60.0),
                MaterialDescriptor::texture("texture/wood.png", [3.0, 3.0, 3.0])
                    .with_shininess(0.0),
                MaterialDescriptor::color("66533C"),
                MaterialDescriptor::color("173A2F"),
                MaterialDescriptor::color("153944"),
                MaterialDescriptor::color("27548D"),
                MaterialDescriptor::color("438AAC"),
            ],
        }
    }
}

impl ConfiguratorConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a TOML config through `assets`.
    pub async fn load(assets: &AssetLoader, file_name: &str) -> anyhow::Result<Self> {
        let text = assets.load_string(file_name).await?;
        let config = Self::from_toml_str(&text)?;
        log::info!(
            "loaded {file_name}: {} part(s), {} swatch(es)",
            config.initial_parts.len(),
            config.swatches.len()
        );
        Ok(config)
    }

    pub fn swatch_table(&self) -> Vec<Swatch> {
        Swatch::table(self.swatches.iter().cloned())
    }
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<PartId>, D::Error> {
    let part = Option::<String>::deserialize(deserializer)?;
    Ok(part.filter(|part| !part.trim().is_empty()).map(PartId::from))
}
