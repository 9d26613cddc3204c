use foundation::math::Vec3;

/// Object placement.
///
/// Points map as `position + R(rotation) * (scale * (p - pivot))`, with the
/// rotation applied in X, then Y, then Z order about the pivot. The pivot
/// lets normalization recenter an asset without touching its vertices.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub pivot: Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            pivot: Vec3::ZERO,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn set_uniform_scale(&mut self, s: f64) {
        self.scale = Vec3::splat(s);
    }

    pub fn apply(&self, p: Vec3) -> Vec3 {
        let local = p - self.pivot;
        let scaled = Vec3::new(
            local.x * self.scale.x,
            local.y * self.scale.y,
            local.z * self.scale.z,
        );
        self.position + rotate_xyz(scaled, self.rotation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rotate by intrinsic XYZ Euler angles (matrix `Rx * Ry * Rz`).
pub fn rotate_xyz(v: Vec3, r: Vec3) -> Vec3 {
    let (sz, cz) = r.z.sin_cos();
    let v = Vec3::new(v.x * cz - v.y * sz, v.x * sz + v.y * cz, v.z);
    let (sy, cy) = r.y.sin_cos();
    let v = Vec3::new(v.x * cy + v.z * sy, v.y, -v.x * sy + v.z * cy);
    let (sx, cx) = r.x.sin_cos();
    Vec3::new(v.x, v.y * cx - v.z * sx, v.y * sx + v.z * cx)
}

#[cfg(test)]
mod tests {
    use super::Transform;
    use approx::assert_abs_diff_eq;
    use foundation::math::Vec3;

    #[test]
    fn identity_is_origin() {
        let transform = Transform::identity();
        assert_eq!(transform.position, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(transform.apply(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn pivot_maps_to_position() {
        let mut t = Transform::translate(Vec3::new(1.0, -1.0, 0.0));
        t.pivot = Vec3::new(5.0, 5.0, 5.0);
        t.set_uniform_scale(3.0);
        t.rotation = Vec3::new(0.4, 1.2, -0.3);
        let out = t.apply(Vec3::new(5.0, 5.0, 5.0));
        assert_abs_diff_eq!(out.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.y, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn quarter_turn_about_y() {
        let mut t = Transform::identity();
        t.rotation.y = std::f64::consts::FRAC_PI_2;
        let out = t.apply(Vec3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(out.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out.z, -1.0, epsilon = 1e-12);
    }
}
