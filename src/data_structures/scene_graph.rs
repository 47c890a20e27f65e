//! Scene graph and hierarchical scene organization.
//!
//! A loaded model is a tree of boxed [`SceneNode`]s. Group nodes are
//! [`ContainerNode`]s; renderable leaves are [`MeshNode`]s, which carry the
//! material currently shown and the part they were bound to. Only the engine
//! writes those two fields.

use std::fmt::Debug;

use crate::data_structures::material::{MaterialHandle, PartId};

pub trait SceneNode: Debug {
    fn name(&self) -> Option<&str>;

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>>;

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>>;

    fn add_child(&mut self, child: Box<dyn SceneNode>);

    fn as_mesh(&self) -> Option<&MeshNode> {
        None
    }

    fn as_mesh_mut(&mut self) -> Option<&mut MeshNode> {
        None
    }

    fn is_mesh(&self) -> bool {
        self.as_mesh().is_some()
    }
}

/// Visits `node` and then its subtree, parents before children.
pub fn traverse<'a>(node: &'a dyn SceneNode, visit: &mut dyn FnMut(&'a dyn SceneNode)) {
    visit(node);
    for child in node.get_children() {
        traverse(child.as_ref(), visit);
    }
}

/// Mutable counterpart of [`traverse`].
pub fn traverse_mut(node: &mut dyn SceneNode, visit: &mut dyn FnMut(&mut dyn SceneNode)) {
    visit(&mut *node);
    for child in node.get_children_mut().iter_mut() {
        traverse_mut(child.as_mut(), visit);
    }
}

/// All mesh nodes below (and including) `root`, in traversal order.
pub fn meshes(root: &dyn SceneNode) -> Vec<&MeshNode> {
    let mut found = Vec::new();
    traverse(root, &mut |node| {
        if let Some(mesh) = node.as_mesh() {
            found.push(mesh);
        }
    });
    found
}

/// First mesh named exactly `name`.
pub fn find_mesh<'a>(root: &'a dyn SceneNode, name: &str) -> Option<&'a MeshNode> {
    meshes(root).into_iter().find(|mesh| mesh.name() == Some(name))
}

#[derive(Debug, Default)]
pub struct ContainerNode {
    name: Option<String>,
    pub children: Vec<Box<dyn SceneNode>>,
}

impl ContainerNode {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            children: Vec::new(),
        }
    }

    pub fn named(name: &str) -> Self {
        Self::new(Some(name.to_string()))
    }

    pub fn with_child(mut self, child: impl SceneNode + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }
}

impl SceneNode for ContainerNode {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }
}

/// A renderable node.
///
/// `material` is `None` while the mesh still shows whatever the model file
/// gave it. `part` is set once the mesh has been bound to a part and stays
/// put until a new binding for that part replaces it.
#[derive(Debug, Default)]
pub struct MeshNode {
    name: Option<String>,
    material: Option<MaterialHandle>,
    part: Option<PartId>,
    primitives: usize,
    children: Vec<Box<dyn SceneNode>>,
}

impl MeshNode {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            primitives: 1,
            ..Default::default()
        }
    }

    pub fn named(name: &str) -> Self {
        Self::new(Some(name.to_string()))
    }

    pub fn with_material(mut self, material: MaterialHandle) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_primitives(mut self, primitives: usize) -> Self {
        self.primitives = primitives;
        self
    }

    pub fn material(&self) -> Option<&MaterialHandle> {
        self.material.as_ref()
    }

    pub fn part(&self) -> Option<&PartId> {
        self.part.as_ref()
    }

    pub fn primitives(&self) -> usize {
        self.primitives
    }

    pub(crate) fn set_material(&mut self, material: MaterialHandle) {
        self.material = Some(material);
    }

    pub(crate) fn stamp(&mut self, part: PartId) {
        self.part = Some(part);
    }
}

impl SceneNode for MeshNode {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn get_children(&self) -> &Vec<Box<dyn SceneNode>> {
        &self.children
    }

    fn get_children_mut(&mut self) -> &mut Vec<Box<dyn SceneNode>> {
        &mut self.children
    }

    fn add_child(&mut self, child: Box<dyn SceneNode>) {
        self.children.push(child);
    }

    fn as_mesh(&self) -> Option<&MeshNode> {
        Some(self)
    }

    fn as_mesh_mut(&mut self) -> Option<&mut MeshNode> {
        Some(self)
    }
}

/// Converts a glTF node and its children.
///
/// Nodes referencing a mesh become [`MeshNode`]s named after the node, or
/// after the mesh when the node itself is unnamed.
pub fn to_scene_node(node: gltf::scene::Node) -> Box<dyn SceneNode> {
    let name = node.name().map(str::to_string);
    let mut scene_node: Box<dyn SceneNode> = match node.mesh() {
        Some(mesh) => {
            let name = name.or_else(|| mesh.name().map(str::to_string));
            Box::new(MeshNode::new(name).with_primitives(mesh.primitives().count()))
        }
        None => Box::new(ContainerNode::new(name)),
    };
    for child in node.children() {
        scene_node.add_child(to_scene_node(child));
    }
    scene_node
}

/// Builds one tree from a glTF document: the default scene if there is one,
/// every scene otherwise.
pub fn scene_from_gltf(document: &gltf::Document) -> Box<dyn SceneNode> {
    let mut root = ContainerNode::new(None);
    match document.default_scene() {
        Some(scene) => {
            root.name = scene.name().map(str::to_string);
            scene
                .nodes()
                .for_each(|node| root.add_child(to_scene_node(node)));
        }
        None => document
            .scenes()
            .flat_map(|scene| scene.nodes())
            .for_each(|node| root.add_child(to_scene_node(node))),
    }
    Box::new(root)
}
