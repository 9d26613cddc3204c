use foundation::math::{Vec3, clamp01};
use serde::{Deserialize, Serialize};

/// How the model follows document scroll progress.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollResponse {
    /// Tilt about X and turn about Y proportionally to progress.
    Rotate { x: f64, y: f64 },
    /// Raise the model from its anchor by `per_unit * p`.
    Lift { per_unit: f64 },
}

impl Default for ScrollResponse {
    fn default() -> Self {
        ScrollResponse::Rotate { x: 0.3, y: 0.5 }
    }
}

/// Model pose and canvas opacity for one scroll position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScrollPose {
    pub progress: f64,
    pub rotation: Vec3,
    pub position: Vec3,
    pub opacity: f64,
}

impl ScrollResponse {
    /// Pure function of `progress`; out-of-range input is clamped first.
    pub fn apply(&self, progress: f64, anchor: Vec3) -> ScrollPose {
        let p = clamp01(progress);
        let (rotation, position) = match *self {
            ScrollResponse::Rotate { x, y } => (Vec3::new(x * p, y * p, 0.0), anchor),
            ScrollResponse::Lift { per_unit } => {
                (Vec3::ZERO, anchor + Vec3::new(0.0, per_unit * p, 0.0))
            }
        };
        ScrollPose {
            progress: p,
            rotation,
            position,
            opacity: canvas_opacity(p),
        }
    }
}

/// `max(0, 1 - 2p)`: the canvas is gone by the middle of the document.
pub fn canvas_opacity(progress: f64) -> f64 {
    (1.0 - 2.0 * clamp01(progress)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::{ScrollResponse, canvas_opacity};
    use approx::assert_abs_diff_eq;
    use foundation::math::Vec3;

    #[test]
    fn opacity_fades_over_first_half() {
        assert_eq!(canvas_opacity(0.0), 1.0);
        assert_abs_diff_eq!(canvas_opacity(0.25), 0.5, epsilon = 1e-12);
        assert_eq!(canvas_opacity(0.5), 0.0);
        assert_eq!(canvas_opacity(0.9), 0.0);
        assert_eq!(canvas_opacity(-3.0), 1.0);
        for i in 0..=100 {
            let p = i as f64 / 100.0;
            let o = canvas_opacity(p);
            assert!((0.0..=1.0).contains(&o));
            assert_abs_diff_eq!(o, (1.0 - 2.0 * p).max(0.0), epsilon = 1e-12);
        }
    }

    #[test]
    fn rotate_is_linear_in_progress() {
        let pose = ScrollResponse::default().apply(0.5, Vec3::ZERO);
        assert_abs_diff_eq!(pose.rotation.x, 0.15, epsilon = 1e-12);
        assert_abs_diff_eq!(pose.rotation.y, 0.25, epsilon = 1e-12);
        assert_eq!(pose.position, Vec3::ZERO);
    }

    #[test]
    fn lift_moves_from_anchor() {
        let anchor = Vec3::new(-1.4, -5.9, 4.0);
        let pose = ScrollResponse::Lift { per_unit: 10.0 }.apply(0.3, anchor);
        assert_abs_diff_eq!(pose.position.y, -2.9, epsilon = 1e-9);
        assert_eq!(pose.position.x, -1.4);
        assert_eq!(pose.rotation, Vec3::ZERO);
    }

    #[test]
    fn progress_is_clamped() {
        let pose = ScrollResponse::default().apply(7.0, Vec3::ZERO);
        assert_eq!(pose.progress, 1.0);
        assert_abs_diff_eq!(pose.rotation.y, 0.5, epsilon = 1e-12);
        assert_eq!(pose.opacity, 0.0);
    }
}
