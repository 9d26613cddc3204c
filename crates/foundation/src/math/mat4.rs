//! Column-major 4x4 matrices (`m[col][row]`), the layout WGSL and glTF use.

use super::vec::Vec3;

pub type Mat4 = [[f32; 4]; 4];

pub const MAT4_IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// `c = a * b`
pub fn mat4_mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut c = [[0.0f32; 4]; 4];
    for col in 0..4 {
        for row in 0..4 {
            c[col][row] = a[0][row] * b[col][0]
                + a[1][row] * b[col][1]
                + a[2][row] * b[col][2]
                + a[3][row] * b[col][3];
        }
    }
    c
}

pub fn mat4_transform_point(m: &Mat4, p: [f32; 3]) -> [f32; 3] {
    let x = m[0][0] * p[0] + m[1][0] * p[1] + m[2][0] * p[2] + m[3][0];
    let y = m[0][1] * p[0] + m[1][1] * p[1] + m[2][1] * p[2] + m[3][1];
    let z = m[0][2] * p[0] + m[1][2] * p[1] + m[2][2] * p[2] + m[3][2];
    let w = m[0][3] * p[0] + m[1][3] * p[1] + m[2][3] * p[2] + m[3][3];
    if w != 0.0 && w != 1.0 {
        [x / w, y / w, z / w]
    } else {
        [x, y, z]
    }
}

/// Transforms a direction by the upper 3x3 (no translation).
pub fn mat4_transform_vector(m: &Mat4, v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[1][0] * v[1] + m[2][0] * v[2],
        m[0][1] * v[0] + m[1][1] * v[1] + m[2][1] * v[2],
        m[0][2] * v[0] + m[1][2] * v[1] + m[2][2] * v[2],
    ]
}

pub fn mat4_translation(t: Vec3) -> Mat4 {
    let mut m = MAT4_IDENTITY;
    m[3] = [t.x as f32, t.y as f32, t.z as f32, 1.0];
    m
}

pub fn mat4_scale(s: Vec3) -> Mat4 {
    let mut m = MAT4_IDENTITY;
    m[0][0] = s.x as f32;
    m[1][1] = s.y as f32;
    m[2][2] = s.z as f32;
    m
}

/// Rotation `Rx * Ry * Rz` for Euler angles in radians.
pub fn mat4_rotation_xyz(r: Vec3) -> Mat4 {
    let (sx, cx) = r.x.sin_cos();
    let (sy, cy) = r.y.sin_cos();
    let (sz, cz) = r.z.sin_cos();
    let rx: Mat4 = [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, cx as f32, sx as f32, 0.0],
        [0.0, -sx as f32, cx as f32, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
    let ry: Mat4 = [
        [cy as f32, 0.0, -sy as f32, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [sy as f32, 0.0, cy as f32, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
    let rz: Mat4 = [
        [cz as f32, sz as f32, 0.0, 0.0],
        [-sz as f32, cz as f32, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ];
    mat4_mul(rx, mat4_mul(ry, rz))
}

pub fn mat4_perspective_rh_z0(fov_y_rad: f64, aspect: f64, near: f64, far: f64) -> Mat4 {
    let f = 1.0 / (0.5 * fov_y_rad).tan();
    let m00 = (f / aspect) as f32;
    let m11 = f as f32;
    let m22 = (far / (near - far)) as f32;
    let m23 = ((near * far) / (near - far)) as f32;

    // RH, depth range [0, 1]:
    // [ m00,  0,   0,   0 ]
    // [  0,  m11,  0,   0 ]
    // [  0,   0,  m22, m23 ]
    // [  0,   0,  -1,   0 ]
    [
        [m00, 0.0, 0.0, 0.0],
        [0.0, m11, 0.0, 0.0],
        [0.0, 0.0, m22, -1.0],
        [0.0, 0.0, m23, 0.0],
    ]
}

pub fn mat4_look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalize();
    let s = f.cross(up).normalize();
    let u = s.cross(f);

    let ex = -s.dot(eye);
    let ey = -u.dot(eye);
    let ez = f.dot(eye);

    [
        [s.x as f32, u.x as f32, -f.x as f32, 0.0],
        [s.y as f32, u.y as f32, -f.y as f32, 0.0],
        [s.z as f32, u.z as f32, -f.z as f32, 0.0],
        [ex as f32, ey as f32, ez as f32, 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn identity_is_neutral() {
        let t = mat4_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(mat4_mul(MAT4_IDENTITY, t), t);
        assert_eq!(mat4_mul(t, MAT4_IDENTITY), t);
    }

    #[test]
    fn translate_then_scale_order() {
        let m = mat4_mul(mat4_translation(Vec3::new(1.0, 0.0, 0.0)), mat4_scale(Vec3::splat(2.0)));
        assert_eq!(mat4_transform_point(&m, [1.0, 1.0, 1.0]), [3.0, 2.0, 2.0]);
        assert_eq!(mat4_transform_vector(&m, [1.0, 0.0, 0.0]), [2.0, 0.0, 0.0]);
    }

    #[test]
    fn rotation_about_y_matches_right_hand_rule() {
        let m = mat4_rotation_xyz(Vec3::new(0.0, std::f64::consts::FRAC_PI_2, 0.0));
        let p = mat4_transform_point(&m, [1.0, 0.0, 0.0]);
        assert_abs_diff_eq!(p[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(p[2], -1.0, epsilon = 1e-6);
    }

    #[test]
    fn look_at_puts_target_on_negative_z() {
        let view = mat4_look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let p = mat4_transform_point(&view, [0.0, 0.0, 0.0]);
        assert_abs_diff_eq!(p[2], -5.0, epsilon = 1e-6);
    }
}
