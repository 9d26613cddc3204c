use crate::error::ModelLoadError;

/// The two supported containers. `.gltf` and `.glb` are both glTF 2.0.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ModelFormat {
    Obj,
    Gltf,
}

impl ModelFormat {
    /// Picks the format from the path's extension, ignoring case and any
    /// query string or fragment.
    pub fn from_path(path: &str) -> Result<Self, ModelLoadError> {
        let extension = extension_of(path);
        match extension.as_str() {
            "obj" => Ok(ModelFormat::Obj),
            "gltf" | "glb" => Ok(ModelFormat::Gltf),
            _ => Err(ModelLoadError::UnsupportedFormat { extension }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelFormat::Obj => "obj",
            ModelFormat::Gltf => "gltf",
        }
    }
}

fn extension_of(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let file = path.rsplit('/').next().unwrap_or(path);
    match file.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::ModelFormat;
    use crate::error::ModelLoadError;

    #[test]
    fn detects_by_extension_case_insensitively() {
        assert_eq!(ModelFormat::from_path("assets/de rene.OBJ").unwrap(), ModelFormat::Obj);
        assert_eq!(ModelFormat::from_path("assets/le rene glb.glb").unwrap(), ModelFormat::Gltf);
        assert_eq!(ModelFormat::from_path("scene.gltf?v=3#top").unwrap(), ModelFormat::Gltf);
    }

    #[test]
    fn rejects_unknown_and_missing_extensions() {
        match ModelFormat::from_path("assets/model.fbx") {
            Err(ModelLoadError::UnsupportedFormat { extension }) => assert_eq!(extension, "fbx"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(ModelFormat::from_path("assets.v2/model").is_err());
    }
}
