#![allow(dead_code)]

use std::{cell::Cell, collections::HashMap, io::Cursor, rc::Rc};

use swatch_ngin::{
    ContainerNode, MeshNode, SceneNode,
    data_structures::{
        material::{Material, MaterialHandle, Rgb},
        scene_graph::find_mesh,
    },
    resources::texture::{FetchFuture, TextureSource},
};

/// A buffer-less glTF chair. One mesh node is named only through its mesh.
pub const CHAIR_GLTF: &str = r#"{
    "asset": { "version": "2.0" },
    "scene": 0,
    "scenes": [{ "name": "Scene", "nodes": [0] }],
    "nodes": [
        { "name": "chair", "children": [1, 2, 3] },
        { "name": "chair_legs_a", "mesh": 0 },
        { "mesh": 1 },
        { "name": "chair_back", "mesh": 0, "children": [4] },
        { "name": "chair_legs_b", "mesh": 0 }
    ],
    "meshes": [
        { "name": "leg", "primitives": [{ "attributes": { "POSITION": 0 } }] },
        {
            "name": "chair_base_mesh",
            "primitives": [
                { "attributes": { "POSITION": 0 } },
                { "attributes": { "POSITION": 0 } }
            ]
        }
    ],
    "accessors": [
        {
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": [0.0, 0.0, 0.0],
            "max": [1.0, 1.0, 1.0]
        }
    ]
}"#;

/// A flat chair: one container with one mesh per name.
pub fn scene_of(names: &[&str]) -> Box<dyn SceneNode> {
    let mut root = ContainerNode::named("chair");
    for name in names {
        root.add_child(Box::new(MeshNode::named(name)));
    }
    Box::new(root)
}

pub fn chair_scene() -> Box<dyn SceneNode> {
    scene_of(&["chair_back", "chair_legs_a", "chair_legs_b", "chair_base"])
}

pub fn solid(name: &str, hex: &str) -> MaterialHandle {
    let color = Rgb::from_hex(hex).expect("valid test colour");
    Material::solid(name, color, 10.0).into_handle()
}

pub fn material_of(root: &dyn SceneNode, name: &str) -> Option<MaterialHandle> {
    find_mesh(root, name).and_then(|mesh| mesh.material().cloned())
}

pub fn material_name_of(root: &dyn SceneNode, name: &str) -> Option<String> {
    material_of(root, name).map(|material| material.name.clone())
}

pub fn part_of(root: &dyn SceneNode, name: &str) -> Option<String> {
    find_mesh(root, name).and_then(|mesh| mesh.part().map(|part| part.to_string()))
}

pub fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode png");
    bytes
}

/// Serves textures from memory and counts fetches.
#[derive(Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
    fetches: Cell<usize>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(path.to_string(), bytes);
        self
    }

    pub fn fetches(&self) -> usize {
        self.fetches.get()
    }

    pub fn into_rc(self) -> Rc<Self> {
        Rc::new(self)
    }
}

impl TextureSource for MemorySource {
    fn fetch<'a>(&'a self, path: &'a str) -> FetchFuture<'a> {
        self.fetches.set(self.fetches.get() + 1);
        Box::pin(async move {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("{path} not found"))
        })
    }
}
