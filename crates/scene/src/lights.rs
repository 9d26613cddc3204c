use foundation::math::Vec3;

use crate::components::Color;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Light {
    Ambient {
        color: Color,
        intensity: f32,
    },
    Directional {
        color: Color,
        intensity: f32,
        /// Light travels from `position` towards the origin.
        position: Vec3,
    },
    Spot {
        color: Color,
        intensity: f32,
        position: Vec3,
        /// Cone half-angle in radians.
        angle: f32,
        penumbra: f32,
    },
    Point {
        color: Color,
        intensity: f32,
        position: Vec3,
    },
}

/// Fixed set of lights attached at init and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightRig {
    pub lights: Vec<Light>,
}

impl LightRig {
    /// Ambient fill, a white key spot, and a crimson accent from below.
    pub fn accent() -> Self {
        Self {
            lights: vec![
                Light::Ambient {
                    color: Color::WHITE,
                    intensity: 0.5,
                },
                Light::Spot {
                    color: Color::WHITE,
                    intensity: 1.0,
                    position: Vec3::new(10.0, 10.0, 10.0),
                    angle: 0.3,
                    penumbra: 1.0,
                },
                Light::Point {
                    color: Color::CRIMSON,
                    intensity: 0.5,
                    position: Vec3::new(-10.0, -10.0, -10.0),
                },
            ],
        }
    }

    /// Bright, even lighting for the hero composition.
    pub fn studio() -> Self {
        Self {
            lights: vec![
                Light::Ambient {
                    color: Color::WHITE,
                    intensity: 1.5,
                },
                Light::Directional {
                    color: Color::WHITE,
                    intensity: 2.0,
                    position: Vec3::new(0.0, 10.0, 10.0),
                },
                Light::Directional {
                    color: Color::WHITE,
                    intensity: 1.5,
                    position: Vec3::new(0.0, 20.0, 0.0),
                },
                Light::Directional {
                    color: Color::WHITE,
                    intensity: 1.0,
                    position: Vec3::new(0.0, 5.0, -10.0),
                },
                Light::Point {
                    color: Color::WHITE,
                    intensity: 1.0,
                    position: Vec3::new(-15.0, 5.0, 5.0),
                },
                Light::Point {
                    color: Color::WHITE,
                    intensity: 1.0,
                    position: Vec3::new(15.0, 5.0, 5.0),
                },
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Sum of ambient contributions.
    pub fn ambient(&self) -> [f32; 3] {
        let mut out = [0.0f32; 3];
        for light in &self.lights {
            if let Light::Ambient { color, intensity } = light {
                let c = color.scaled(*intensity);
                out[0] += c[0];
                out[1] += c[1];
                out[2] += c[2];
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{Light, LightRig};

    #[test]
    fn accent_rig_has_ambient_spot_and_accent_point() {
        let rig = LightRig::accent();
        assert_eq!(rig.len(), 3);
        assert!(matches!(rig.lights[0], Light::Ambient { .. }));
        assert!(matches!(rig.lights[1], Light::Spot { .. }));
        assert!(matches!(rig.lights[2], Light::Point { .. }));
        assert_eq!(rig.ambient(), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn studio_rig_is_brighter() {
        assert!(LightRig::studio().ambient()[0] > LightRig::accent().ambient()[0]);
    }
}
