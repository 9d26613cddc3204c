use scene::{LightRig, Placement};
use serde::{Deserialize, Serialize};

use crate::scroll::ScrollResponse;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LightRigKind {
    #[default]
    Accent,
    Studio,
}

impl LightRigKind {
    pub fn rig(self) -> LightRig {
        match self {
            LightRigKind::Accent => LightRig::accent(),
            LightRigKind::Studio => LightRig::studio(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// `None` disables auto-rotation.
    pub auto_rotate_speed: Option<f64>,
    pub damping_factor: f64,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            auto_rotate_speed: Some(0.5),
            damping_factor: 0.05,
        }
    }
}

/// Everything that differs between viewer variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub model_path: String,
    pub placement: Placement,
    /// Longest edge of the normalized model, in world units.
    pub target_size: f64,
    pub camera_distance: f64,
    pub fallback_radius: f64,
    pub lights: LightRigKind,
    /// `None` leaves the camera fixed.
    pub controls: Option<ControlsConfig>,
    pub scroll: ScrollResponse,
    pub status_hide_ms: StatusHideDelays,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusHideDelays {
    pub loaded_ms: u32,
    pub fallback_ms: u32,
}

impl Default for StatusHideDelays {
    fn default() -> Self {
        Self {
            loaded_ms: 2000,
            fallback_ms: 3000,
        }
    }
}

impl ViewerConfig {
    /// Centered model, accent lighting, slowly auto-rotating orbit controls.
    pub fn standard() -> Self {
        Self {
            model_path: "assets/model.glb".to_string(),
            placement: Placement::Centered,
            target_size: 2.0,
            camera_distance: 5.0,
            fallback_radius: 1.5,
            lights: LightRigKind::Accent,
            controls: Some(ControlsConfig::default()),
            scroll: ScrollResponse::default(),
            status_hide_ms: StatusHideDelays::default(),
        }
    }

    /// Large model anchored off-center, lifted out of view on scroll.
    pub fn hero_composition() -> Self {
        Self {
            placement: Placement::Offset([-1.4, -5.9, 4.0]),
            target_size: 6.0,
            camera_distance: 6.0,
            fallback_radius: 4.0,
            lights: LightRigKind::Studio,
            controls: None,
            scroll: ScrollResponse::Lift { per_unit: 10.0 },
            ..Self::standard()
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::standard()
    }
}
