//! Wavefront OBJ reader on top of `tobj`.
//!
//! Faces are triangulated and re-indexed to one index per vertex. Materials
//! and texture coordinates are ignored: OBJ meshes are shaded with one
//! neutral material.

use scene::Mesh;
use scene::components::StandardMaterial;

use crate::error::ModelLoadError;
use crate::model_format::ModelFormat;

pub fn parse_obj(contents: &str) -> Result<Vec<Mesh>, ModelLoadError> {
    let load_opts = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj_buf(&mut contents.as_bytes(), &load_opts, |_| {
        Ok((Vec::new(), Default::default()))
    })
    .map_err(|e| ModelLoadError::parse(ModelFormat::Obj, e.to_string()))?;

    let meshes: Vec<Mesh> = models
        .into_iter()
        .filter(|m| !m.mesh.indices.is_empty())
        .map(|m| to_mesh(m.mesh))
        .collect();

    if meshes.is_empty() {
        return Err(ModelLoadError::parse(ModelFormat::Obj, "no faces found"));
    }
    tracing::debug!(meshes = meshes.len(), "parsed obj");
    Ok(meshes)
}

fn to_mesh(mesh: tobj::Mesh) -> Mesh {
    let positions: Vec<[f32; 3]> = triples(&mesh.positions);
    // Partial normals (some faces without `vn`) are recomputed.
    let normals = (mesh.normals.len() == mesh.positions.len()).then(|| triples(&mesh.normals));
    Mesh::new(positions, normals, mesh.indices, StandardMaterial::neutral())
}

fn triples(flat: &[f32]) -> Vec<[f32; 3]> {
    flat.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
}

#[cfg(test)]
mod tests {
    use super::parse_obj;
    use crate::error::ModelLoadError;
    use pretty_assertions::assert_eq;
    use scene::components::StandardMaterial;

    const QUAD: &str = "\
# unit quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";

    #[test]
    fn quad_is_fanned_into_two_triangles() {
        let meshes = parse_obj(QUAD).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(meshes[0].material, StandardMaterial::neutral());
    }

    #[test]
    fn negative_indices_count_from_end() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let meshes = parse_obj(src).unwrap();
        assert_eq!(meshes[0].positions, vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    }

    #[test]
    fn explicit_normals_are_kept() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 -1\nf 1//1 2//1 3//1\n";
        let meshes = parse_obj(src).unwrap();
        assert_eq!(meshes[0].normals, vec![[0.0, 0.0, -1.0]; 3]);
    }

    #[test]
    fn missing_normals_are_computed() {
        let meshes = parse_obj("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(meshes[0].normals, vec![[0.0, 0.0, 1.0]; 3]);
    }

    #[test]
    fn objects_split_meshes() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\no a\nf 1 2 3\no b\nf 3 2 1\n";
        let meshes = parse_obj(src).unwrap();
        assert_eq!(meshes.len(), 2);
    }

    #[test]
    fn out_of_range_index_is_a_parse_error() {
        let err = parse_obj("v 0 0 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(err, ModelLoadError::Parse { .. }));
    }

    #[test]
    fn file_without_faces_is_rejected() {
        assert!(parse_obj("v 0 0 0\nv 1 1 1\n").is_err());
    }
}
