use foundation::bounds::Aabb3;

use crate::components::Transform;
use crate::mesh::Mesh;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// Parsed from an asset; carries the container name (`"obj"`, `"gltf"`).
    Asset { format: &'static str, path: String },
    /// Placeholder shown when the asset could not be used.
    Fallback,
}

/// A renderable asset: meshes in model space plus one placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub meshes: Vec<Mesh>,
    pub transform: Transform,
    pub source: ModelSource,
}

impl Model {
    pub fn new(meshes: Vec<Mesh>, source: ModelSource) -> Self {
        Self {
            meshes,
            transform: Transform::identity(),
            source,
        }
    }

    /// Model-space bounds over every mesh.
    pub fn local_bounds(&self) -> Aabb3 {
        self.meshes
            .iter()
            .fold(Aabb3::empty(), |acc, m| acc.union(&m.bounds()))
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ModelSource::Fallback
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(Mesh::vertex_count).sum()
    }
}
