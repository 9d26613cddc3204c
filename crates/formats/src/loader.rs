use scene::{Model, ModelSource};

use crate::error::ModelLoadError;
use crate::gltf_import::{GltfAsset, import_gltf};
use crate::model_format::ModelFormat;
use crate::obj::parse_obj;
use crate::resources::{ExternalResource, ExternalResources};

/// Files the asset at `path` needs besides its own bytes, resolved next to
/// it. Empty for OBJ, `.glb` and `.gltf` with embedded buffers.
pub fn external_resources(path: &str, bytes: &[u8]) -> Result<Vec<ExternalResource>, ModelLoadError> {
    match ModelFormat::from_path(path)? {
        ModelFormat::Obj => Ok(Vec::new()),
        ModelFormat::Gltf => Ok(GltfAsset::parse(bytes)?
            .external_uris()
            .into_iter()
            .map(|uri| ExternalResource::new(path, uri))
            .collect()),
    }
}

/// Parse a fetched asset into a model. The format comes from `path`; the
/// returned model still has an identity transform and is not normalized.
pub fn load_model(
    path: &str,
    bytes: &[u8],
    resources: &ExternalResources,
) -> Result<Model, ModelLoadError> {
    let format = ModelFormat::from_path(path)?;
    let meshes = match format {
        ModelFormat::Obj => {
            let text = std::str::from_utf8(bytes)
                .map_err(|e| ModelLoadError::parse(format, format!("not utf-8: {e}")))?;
            parse_obj(text)?
        }
        ModelFormat::Gltf => import_gltf(bytes, resources)?,
    };

    let model = Model::new(
        meshes,
        ModelSource::Asset {
            format: format.name(),
            path: path.to_string(),
        },
    );
    tracing::info!(
        path,
        format = format.name(),
        meshes = model.meshes.len(),
        vertices = model.vertex_count(),
        external = resources.len(),
        "model parsed"
    );
    Ok(model)
}
