use wasm_bindgen::JsValue;

#[derive(Debug)]
pub enum SiteError {
    /// A required DOM element is absent.
    MissingElement(String),
    Manifest(serde_json::Error),
    UnsupportedManifestVersion(String),
    Gpu(String),
}

impl SiteError {
    pub fn missing(selector: impl Into<String>) -> Self {
        SiteError::MissingElement(selector.into())
    }
}

impl std::fmt::Display for SiteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteError::MissingElement(selector) => write!(f, "missing element {selector}"),
            SiteError::Manifest(e) => write!(f, "invalid site manifest: {e}"),
            SiteError::UnsupportedManifestVersion(v) => {
                write!(f, "unsupported site manifest version {v}")
            }
            SiteError::Gpu(message) => write!(f, "gpu error: {message}"),
        }
    }
}

impl std::error::Error for SiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SiteError::Manifest(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SiteError {
    fn from(e: serde_json::Error) -> Self {
        SiteError::Manifest(e)
    }
}

impl From<SiteError> for JsValue {
    fn from(e: SiteError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::SiteError;

    #[test]
    fn display_names_the_selector() {
        assert_eq!(
            SiteError::missing("#hero-canvas").to_string(),
            "missing element #hero-canvas"
        );
    }
}
