//! glTF 2.0 import (`.gltf` or `.glb`).
//!
//! Buffers come from the GLB binary chunk, base64 data URIs, or sibling
//! files the caller fetched into `ExternalResources`. Images are never
//! decoded. Node transforms are baked into vertex data so the result is a
//! flat list of model-space meshes, one per triangle primitive.

use std::borrow::Cow;

use base64::Engine as _;
use foundation::math::{MAT4_IDENTITY, Mat4, mat4_mul, mat4_transform_point, mat4_transform_vector};
use scene::Mesh;
use scene::components::{Color, StandardMaterial};

use crate::error::ModelLoadError;
use crate::model_format::ModelFormat;
use crate::resources::ExternalResources;

fn gltf_error(message: impl Into<String>) -> ModelLoadError {
    ModelLoadError::parse(ModelFormat::Gltf, message)
}

/// A parsed glTF document whose buffers have not been resolved yet.
pub struct GltfAsset {
    gltf: ::gltf::Gltf,
}

impl GltfAsset {
    pub fn parse(bytes: &[u8]) -> Result<Self, ModelLoadError> {
        let gltf = ::gltf::Gltf::from_slice(bytes).map_err(|e| gltf_error(e.to_string()))?;
        Ok(Self { gltf })
    }

    /// URIs of buffers stored in separate files, in buffer order.
    pub fn external_uris(&self) -> Vec<&str> {
        self.gltf
            .buffers()
            .filter_map(|buffer| match buffer.source() {
                ::gltf::buffer::Source::Uri(uri) if !uri.starts_with("data:") => Some(uri),
                _ => None,
            })
            .collect()
    }

    pub fn into_meshes(self, resources: &ExternalResources) -> Result<Vec<Mesh>, ModelLoadError> {
        let ::gltf::Gltf { document, mut blob } = self.gltf;
        let buffers = resolve_buffers(&document, &mut blob, resources)?;

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or_else(|| gltf_error("document has no scenes"))?;

        let mut meshes = Vec::new();
        for node in scene.nodes() {
            visit_node(&node, MAT4_IDENTITY, &buffers, &mut meshes)?;
        }

        if meshes.is_empty() {
            return Err(gltf_error("scene contains no triangle meshes"));
        }
        tracing::debug!(meshes = meshes.len(), scene = ?scene.name(), "imported gltf");
        Ok(meshes)
    }
}

pub fn import_gltf(bytes: &[u8], resources: &ExternalResources) -> Result<Vec<Mesh>, ModelLoadError> {
    GltfAsset::parse(bytes)?.into_meshes(resources)
}

fn resolve_buffers<'r>(
    document: &::gltf::Document,
    blob: &mut Option<Vec<u8>>,
    resources: &'r ExternalResources,
) -> Result<Vec<Cow<'r, [u8]>>, ModelLoadError> {
    let mut out = Vec::new();
    for buffer in document.buffers() {
        let data = match buffer.source() {
            ::gltf::buffer::Source::Bin => Cow::Owned(
                blob.take()
                    .ok_or_else(|| gltf_error("glb binary chunk missing"))?,
            ),
            ::gltf::buffer::Source::Uri(uri) => match uri.strip_prefix("data:") {
                Some(data_uri) => Cow::Owned(decode_data_uri(data_uri)?),
                None => Cow::Borrowed(
                    resources
                        .get(uri)
                        .ok_or_else(|| gltf_error(format!("external buffer '{uri}' was not fetched")))?,
                ),
            },
        };
        if data.len() < buffer.length() {
            return Err(gltf_error(format!(
                "buffer {} has {} bytes, expected {}",
                buffer.index(),
                data.len(),
                buffer.length()
            )));
        }
        out.push(data);
    }
    Ok(out)
}

/// Decodes the part of a data URI after `data:`. Only base64 payloads occur
/// in practice.
fn decode_data_uri(data_uri: &str) -> Result<Vec<u8>, ModelLoadError> {
    let (header, payload) = data_uri
        .split_once(',')
        .ok_or_else(|| gltf_error("malformed data uri"))?;
    if !header.ends_with(";base64") {
        return Err(gltf_error("data uri is not base64"));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| gltf_error(format!("invalid base64 buffer: {e}")))
}

fn visit_node(
    node: &::gltf::Node,
    parent: Mat4,
    buffers: &[Cow<'_, [u8]>],
    out: &mut Vec<Mesh>,
) -> Result<(), ModelLoadError> {
    let world = mat4_mul(parent, node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != ::gltf::mesh::Mode::Triangles {
                tracing::debug!(mode = ?primitive.mode(), "skipping non-triangle primitive");
                continue;
            }
            out.push(read_primitive(&primitive, &world, buffers)?);
        }
    }

    for child in node.children() {
        visit_node(&child, world, buffers, out)?;
    }
    Ok(())
}

fn read_primitive(
    primitive: &::gltf::Primitive,
    world: &Mat4,
    buffers: &[Cow<'_, [u8]>],
) -> Result<Mesh, ModelLoadError> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.as_ref()));

    let positions: Vec<[f32; 3]> = reader
        .read_positions()
        .ok_or_else(|| gltf_error("primitive without positions"))?
        .map(|p| mat4_transform_point(world, p))
        .collect();

    let normals = reader.read_normals().map(|n| {
        n.map(|v| normalize3(mat4_transform_vector(world, v)))
            .collect::<Vec<_>>()
    });

    let indices: Vec<u32> = match reader.read_indices() {
        Some(idx) => idx.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    if let Some(bad) = indices.iter().find(|i| **i as usize >= positions.len()) {
        return Err(gltf_error(format!(
            "index {bad} out of range for {} vertices",
            positions.len()
        )));
    }

    let pbr = primitive.material().pbr_metallic_roughness();
    let [r, g, b, _a] = pbr.base_color_factor();
    let material = StandardMaterial::new(
        Color([r, g, b]),
        pbr.metallic_factor(),
        pbr.roughness_factor(),
    );

    Ok(Mesh::new(positions, normals, indices, material))
}

fn normalize3(v: [f32; 3]) -> [f32; 3] {
    let n = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if n <= 0.0 {
        [0.0, 1.0, 0.0]
    } else {
        [v[0] / n, v[1] / n, v[2] / n]
    }
}

#[cfg(test)]
mod tests {
    use super::{GltfAsset, import_gltf};
    use crate::error::ModelLoadError;
    use crate::resources::ExternalResources;
    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;

    /// One triangle, node translated by +2 on X. `BUFFER` is replaced by the
    /// buffer object under test.
    const TRIANGLE_GLTF: &str = r#"{
        "asset": {"version": "2.0"},
        "scene": 0,
        "scenes": [{"nodes": [0]}],
        "nodes": [{"mesh": 0, "translation": [2.0, 0.0, 0.0]}],
        "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
        "buffers": [BUFFER],
        "bufferViews": [{"buffer": 0, "byteOffset": 0, "byteLength": 36}],
        "accessors": [{
            "bufferView": 0,
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": [0.0, 0.0, 0.0],
            "max": [1.0, 1.0, 0.0]
        }]
    }"#;

    const EMBEDDED_BUFFER: &str = r#"{
        "byteLength": 36,
        "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
    }"#;

    fn triangle_gltf(buffer: &str) -> String {
        TRIANGLE_GLTF.replace("BUFFER", buffer)
    }

    fn triangle_bin() -> Vec<u8> {
        [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect()
    }

    /// Binary container: 12-byte header, JSON chunk, BIN chunk.
    fn glb(json: &str, bin: &[u8]) -> Vec<u8> {
        let mut json = json.as_bytes().to_vec();
        while json.len() % 4 != 0 {
            json.push(b' ');
        }
        let mut bin = bin.to_vec();
        while bin.len() % 4 != 0 {
            bin.push(0);
        }
        let total = 12 + 8 + json.len() + 8 + bin.len();

        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(b"glTF");
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());
        out.extend_from_slice(&(json.len() as u32).to_le_bytes());
        out.extend_from_slice(b"JSON");
        out.extend_from_slice(&json);
        out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        out.extend_from_slice(b"BIN\0");
        out.extend_from_slice(&bin);
        out
    }

    fn assert_translated_triangle(meshes: &[scene::Mesh]) {
        assert_eq!(meshes.len(), 1);
        let m = &meshes[0];
        assert_eq!(m.indices, vec![0, 1, 2]);
        assert_abs_diff_eq!(m.positions[0][0], 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(m.positions[1][0], 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(m.positions[2][1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn imports_embedded_triangle_with_node_transform() {
        let json = triangle_gltf(EMBEDDED_BUFFER);
        let asset = GltfAsset::parse(json.as_bytes()).unwrap();
        assert!(asset.external_uris().is_empty());
        let meshes = asset.into_meshes(&ExternalResources::new()).unwrap();
        assert_translated_triangle(&meshes);
    }

    #[test]
    fn external_buffer_is_read_from_fetched_resources() {
        let json = triangle_gltf(r#"{"byteLength": 36, "uri": "scene.bin"}"#);
        let asset = GltfAsset::parse(json.as_bytes()).unwrap();
        assert_eq!(asset.external_uris(), vec!["scene.bin"]);

        let mut resources = ExternalResources::new();
        resources.insert("scene.bin", triangle_bin());
        let meshes = asset.into_meshes(&resources).unwrap();
        assert_translated_triangle(&meshes);
    }

    #[test]
    fn unfetched_external_buffer_is_a_parse_error() {
        let json = triangle_gltf(r#"{"byteLength": 36, "uri": "scene.bin"}"#);
        let err = import_gltf(json.as_bytes(), &ExternalResources::new()).unwrap_err();
        assert!(matches!(err, ModelLoadError::Parse { .. }));
        assert!(err.to_string().contains("scene.bin"));
    }

    #[test]
    fn short_external_buffer_is_rejected() {
        let json = triangle_gltf(r#"{"byteLength": 36, "uri": "scene.bin"}"#);
        let mut resources = ExternalResources::new();
        resources.insert("scene.bin", vec![0; 12]);
        assert!(import_gltf(json.as_bytes(), &resources).is_err());
    }

    #[test]
    fn glb_reads_its_binary_chunk() {
        let bytes = glb(&triangle_gltf(r#"{"byteLength": 36}"#), &triangle_bin());
        let meshes = import_gltf(&bytes, &ExternalResources::new()).unwrap();
        assert_translated_triangle(&meshes);
    }

    #[test]
    fn garbage_bytes_are_a_parse_error() {
        let err = import_gltf(b"definitely not gltf", &ExternalResources::new()).unwrap_err();
        assert!(matches!(err, ModelLoadError::Parse { .. }));
    }
}
