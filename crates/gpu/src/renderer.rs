use foundation::math::{
    Mat4, Vec3, mat4_look_at_rh, mat4_mul, mat4_perspective_rh_z0, mat4_rotation_xyz,
    mat4_scale, mat4_translation,
};
use scene::PerspectiveCamera;
use scene::components::Transform;
use scene::world::World;

use crate::lighting::{LightBlock, pack_lights};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_rad: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera3D {
    pub fn from_perspective(camera: &PerspectiveCamera) -> Self {
        Self {
            position: camera.position,
            target: camera.target,
            fov_y_rad: camera.fov_y_rad(),
            aspect: camera.aspect,
            near: camera.near,
            far: camera.far,
        }
    }

    pub fn view(&self) -> Mat4 {
        mat4_look_at_rh(self.position, self.target, Vec3::new(0.0, 1.0, 0.0))
    }

    pub fn projection(&self) -> Mat4 {
        let aspect = if self.aspect > 0.0 { self.aspect } else { 1.0 };
        mat4_perspective_rh_z0(self.fov_y_rad, aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        mat4_mul(self.projection(), self.view())
    }
}

/// `T(position) * R * S * T(-pivot)`, the matrix form of `Transform::apply`.
pub fn model_matrix(transform: &Transform) -> Mat4 {
    let t = mat4_translation(transform.position);
    let r = mat4_rotation_xyz(transform.rotation);
    let s = mat4_scale(transform.scale);
    let p = mat4_translation(-transform.pivot);
    mat4_mul(t, mat4_mul(r, mat4_mul(s, p)))
}

/// Per-frame uniforms. Geometry is uploaded separately, keyed by
/// `model_generation`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub view_proj: Mat4,
    pub model: Mat4,
    pub camera_position: [f32; 3],
    pub lights: LightBlock,
    pub opacity: f32,
    /// `None` when the world has nothing to draw; the frame only clears.
    pub model_generation: Option<u64>,
}

pub struct Renderer;

impl Renderer {
    pub fn collect(world: &World, camera: Camera3D, opacity: f32) -> RenderFrame {
        let (model, model_generation) = match world.model() {
            Some(m) => (model_matrix(&m.transform), Some(world.generation())),
            None => (foundation::math::MAT4_IDENTITY, None),
        };
        RenderFrame {
            view_proj: camera.view_proj(),
            model,
            camera_position: camera.position.to_f32(),
            lights: pack_lights(world.lights()),
            opacity: opacity.clamp(0.0, 1.0),
            model_generation,
        }
    }
}
