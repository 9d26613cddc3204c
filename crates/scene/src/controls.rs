//! Damped orbit controls.
//!
//! The camera sits on a sphere around `target`. Input and auto-rotation
//! accumulate into a pending spherical delta; each `update` applies a
//! `damping_factor` share of it and decays the rest, so motion eases out
//! after the pointer is released. Zoom and pan are not supported.

use std::f64::consts::{PI, TAU};

use foundation::math::{Vec3, clamp};

use crate::camera::PerspectiveCamera;

const POLAR_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f64,
    pub auto_rotate: bool,
    /// 1.0 is one full turn every 60 seconds at 60 fps.
    pub auto_rotate_speed: f64,
    pub rotate_speed: f64,

    radius: f64,
    /// Azimuth around +Y, measured from +Z.
    theta: f64,
    /// Polar angle from +Y.
    phi: f64,
    delta_theta: f64,
    delta_phi: f64,
    drag_last_px: Option<[f64; 2]>,
}

impl OrbitControls {
    /// Starts from the camera's current offset to its target.
    pub fn new(camera: &PerspectiveCamera) -> Self {
        let offset = camera.position - camera.target;
        let radius = offset.length();
        let (theta, phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                clamp(offset.y / radius, -1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };
        Self {
            target: camera.target,
            enable_damping: true,
            damping_factor: 0.05,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            rotate_speed: 1.0,
            radius,
            theta,
            phi,
            delta_theta: 0.0,
            delta_phi: 0.0,
            drag_last_px: None,
        }
    }

    pub fn with_auto_rotate(mut self, speed: f64) -> Self {
        self.auto_rotate = true;
        self.auto_rotate_speed = speed;
        self
    }

    pub fn azimuth(&self) -> f64 {
        self.theta
    }

    pub fn polar(&self) -> f64 {
        self.phi
    }

    fn auto_rotation_angle(&self) -> f64 {
        TAU / 60.0 / 60.0 * self.auto_rotate_speed
    }

    pub fn rotate_left(&mut self, angle: f64) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f64) {
        self.delta_phi -= angle;
    }

    pub fn pointer_down(&mut self, x_px: f64, y_px: f64) {
        self.drag_last_px = Some([x_px, y_px]);
    }

    /// Pointer movement while dragging; `viewport_height_px` normalizes the
    /// drag so a full-height drag is one full turn.
    pub fn pointer_move(&mut self, x_px: f64, y_px: f64, viewport_height_px: f64) {
        let Some([lx, ly]) = self.drag_last_px else {
            return;
        };
        let h = viewport_height_px.max(1.0);
        self.rotate_left(TAU * (x_px - lx) / h * self.rotate_speed);
        self.rotate_up(TAU * (y_px - ly) / h * self.rotate_speed);
        self.drag_last_px = Some([x_px, y_px]);
    }

    pub fn pointer_up(&mut self) {
        self.drag_last_px = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_last_px.is_some()
    }

    /// Applies one frame of motion and writes the camera position.
    /// Returns `true` if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        if self.auto_rotate && !self.is_dragging() {
            self.rotate_left(self.auto_rotation_angle());
        }

        if self.enable_damping {
            self.theta += self.delta_theta * self.damping_factor;
            self.phi += self.delta_phi * self.damping_factor;
        } else {
            self.theta += self.delta_theta;
            self.phi += self.delta_phi;
        }
        self.phi = clamp(self.phi, POLAR_EPSILON, PI - POLAR_EPSILON);

        let before = camera.position;
        let sin_phi = self.phi.sin();
        let offset = Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        );
        camera.position = self.target + offset;
        camera.target = self.target;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }

        (camera.position - before).length() > 1e-9
    }
}
