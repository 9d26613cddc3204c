use scene::Model;

/// Interleaved vertex as uploaded to the GPU. Material factors are baked per
/// vertex so a whole model is a single draw.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    /// `[metalness, roughness]`.
    pub pbr: [f32; 2],
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBatch {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshBatch {
    /// Flatten every mesh of `model` into one vertex/index buffer pair.
    pub fn from_model(model: &Model) -> Self {
        let mut batch = MeshBatch {
            vertices: Vec::with_capacity(model.vertex_count()),
            indices: Vec::new(),
        };
        for mesh in &model.meshes {
            let base = batch.vertices.len() as u32;
            let color = mesh.material.color.0;
            let pbr = [mesh.material.metalness, mesh.material.roughness];
            batch.vertices.extend(
                mesh.positions
                    .iter()
                    .zip(mesh.normals.iter())
                    .map(|(p, n)| MeshVertex {
                        position: *p,
                        normal: *n,
                        color,
                        pbr,
                    }),
            );
            batch.indices.extend(mesh.indices.iter().map(|i| base + i));
        }
        batch
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::MeshBatch;
    use scene::components::{Color, StandardMaterial};
    use scene::{Mesh, Model, ModelSource};

    fn triangle(material: StandardMaterial) -> Mesh {
        Mesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            None,
            vec![0, 1, 2],
            material,
        )
    }

    #[test]
    fn indices_are_rebased_per_mesh() {
        let red = StandardMaterial::new(Color([1.0, 0.0, 0.0]), 0.5, 0.25);
        let model = Model::new(
            vec![triangle(StandardMaterial::neutral()), triangle(red)],
            ModelSource::Fallback,
        );
        let batch = MeshBatch::from_model(&model);
        assert_eq!(batch.vertices.len(), 6);
        assert_eq!(batch.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(batch.vertices[3].color, [1.0, 0.0, 0.0]);
        assert_eq!(batch.vertices[3].pbr, [0.5, 0.25]);
        assert_eq!(batch.index_count(), 6);
    }

    #[test]
    fn empty_model_is_empty_batch() {
        let batch = MeshBatch::from_model(&Model::new(Vec::new(), ModelSource::Fallback));
        assert!(batch.is_empty());
    }
}
