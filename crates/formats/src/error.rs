use scene::NormalizeError;

use crate::model_format::ModelFormat;

/// Everything that can go wrong between a model path and an attached model.
/// Every variant is recoverable: callers fall back to placeholder geometry.
#[derive(Debug)]
pub enum ModelLoadError {
    UnsupportedFormat {
        extension: String,
    },
    Transfer {
        url: String,
        message: String,
    },
    HttpStatus {
        url: String,
        status: u16,
    },
    Parse {
        format: ModelFormat,
        message: String,
    },
    Degenerate(NormalizeError),
}

impl ModelLoadError {
    pub fn parse(format: ModelFormat, message: impl Into<String>) -> Self {
        ModelLoadError::Parse {
            format,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ModelLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelLoadError::UnsupportedFormat { extension } => write!(
                f,
                "unsupported model format '.{extension}' (use .obj, .gltf or .glb)"
            ),
            ModelLoadError::Transfer { url, message } => {
                write!(f, "failed to fetch {url}: {message}")
            }
            ModelLoadError::HttpStatus { url, status } => {
                write!(f, "failed to fetch {url}: HTTP {status}")
            }
            ModelLoadError::Parse { format, message } => {
                write!(f, "failed to parse {} model: {message}", format.name())
            }
            ModelLoadError::Degenerate(e) => write!(f, "unusable model geometry: {e}"),
        }
    }
}

impl std::error::Error for ModelLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelLoadError::Degenerate(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NormalizeError> for ModelLoadError {
    fn from(e: NormalizeError) -> Self {
        ModelLoadError::Degenerate(e)
    }
}
