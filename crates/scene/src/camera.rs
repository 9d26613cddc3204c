use foundation::math::Vec3;

/// Perspective camera looking at `target`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_deg: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    pub const DEFAULT_FOV_Y_DEG: f64 = 45.0;
    pub const DEFAULT_NEAR: f64 = 0.1;
    pub const DEFAULT_FAR: f64 = 1000.0;

    /// 45° camera on the +Z axis looking at the origin.
    pub fn looking_at_origin(distance: f64, aspect: f64) -> Self {
        Self {
            fov_y_deg: Self::DEFAULT_FOV_Y_DEG,
            aspect,
            near: Self::DEFAULT_NEAR,
            far: Self::DEFAULT_FAR,
            position: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
        }
    }

    /// Keeps the aspect ratio in step with the viewport. Zero-height
    /// viewports leave the aspect untouched.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if height > 0.0 && width > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn fov_y_rad(&self) -> f64 {
        self.fov_y_deg.to_radians()
    }
}
