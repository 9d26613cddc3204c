use page::PageConfig;
use serde::{Deserialize, Serialize};
use viewer::ViewerConfig;

use crate::error::SiteError;

pub const MANIFEST_VERSION: &str = "1.0";

const EMBEDDED_MANIFEST: &str = include_str!("../assets/site.json");

/// Site configuration: viewer variant, project records, page tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteManifest {
    pub version: String,
    /// `EnvFilter` directive for the console logger.
    pub log_filter: String,
    pub viewer: ViewerConfig,
    #[serde(flatten)]
    pub page: PageConfig,
}

impl Default for SiteManifest {
    fn default() -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            log_filter: "info".to_string(),
            viewer: ViewerConfig::standard(),
            page: PageConfig::default(),
        }
    }
}

impl SiteManifest {
    pub fn from_json(json: &str) -> Result<Self, SiteError> {
        let manifest: SiteManifest = serde_json::from_str(json)?;
        if manifest.version != MANIFEST_VERSION {
            return Err(SiteError::UnsupportedManifestVersion(manifest.version));
        }
        Ok(manifest)
    }

    /// The manifest compiled into the module.
    pub fn embedded() -> Result<Self, SiteError> {
        Self::from_json(EMBEDDED_MANIFEST)
    }
}

#[cfg(test)]
mod tests {
    use super::SiteManifest;
    use crate::error::SiteError;
    use page::CategoryFilter;
    use pretty_assertions::assert_eq;
    use scene::Placement;
    use viewer::{LightRigKind, ScrollResponse};

    #[test]
    fn embedded_manifest_parses() {
        let m = SiteManifest::embedded().unwrap();
        assert_eq!(m.page.projects.len(), 3);
        assert_eq!(m.viewer.placement, Placement::Offset([-1.4, -5.9, 4.0]));
        assert_eq!(m.viewer.lights, LightRigKind::Studio);
        assert_eq!(m.viewer.scroll, ScrollResponse::Lift { per_unit: 10.0 });
        assert_eq!(m.viewer.controls, None);
        let design = page::filter_projects(&m.page.projects, &CategoryFilter::parse("design"));
        assert_eq!(design.len(), 2);
    }

    #[test]
    fn minimal_manifest_takes_defaults() {
        let m = SiteManifest::from_json(r#"{"version": "1.0"}"#).unwrap();
        assert_eq!(m.log_filter, "info");
        assert_eq!(m.viewer.target_size, 2.0);
        assert_eq!(m.page.parallax_speeds, vec![0.15, 0.2, 0.12]);
    }

    #[test]
    fn rejects_other_versions() {
        let err = SiteManifest::from_json(r#"{"version": "2.0"}"#).unwrap_err();
        assert!(matches!(err, SiteError::UnsupportedManifestVersion(v) if v == "2.0"));
    }

    #[test]
    fn malformed_json_is_a_manifest_error() {
        assert!(matches!(
            SiteManifest::from_json("{"),
            Err(SiteError::Manifest(_))
        ));
    }
}
