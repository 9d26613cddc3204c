use serde::{Deserialize, Serialize};

use crate::parallax::DEFAULT_PARALLAX_SPEEDS;
use crate::project::Project;
use crate::sections::DEFAULT_SECTIONS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub projects: Vec<Project>,
    /// Section ids in document order, for active-section tracking.
    pub sections: Vec<String>,
    pub parallax_speeds: Vec<f64>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            projects: Vec::new(),
            sections: DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect(),
            parallax_speeds: DEFAULT_PARALLAX_SPEEDS.to_vec(),
        }
    }
}
