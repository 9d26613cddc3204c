use scene::{Light, LightRig};

/// Upper bound of non-ambient lights the shader loops over.
pub const MAX_LIGHTS: usize = 8;

pub const LIGHT_DIRECTIONAL: f32 = 0.0;
pub const LIGHT_POINT: f32 = 1.0;
pub const LIGHT_SPOT: f32 = 2.0;

/// One light in uniform layout (three vec4s).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PackedLight {
    /// xyz position, w kind.
    pub position_kind: [f32; 4],
    /// rgb premultiplied by intensity, w unused.
    pub color: [f32; 4],
    /// x cos(outer cone), y cos(inner cone), zw unused. Spot lights only.
    pub cone: [f32; 4],
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct LightBlock {
    /// rgb ambient sum, w = number of packed lights.
    pub ambient_count: [f32; 4],
    pub lights: [PackedLight; MAX_LIGHTS],
}

impl LightBlock {
    pub fn count(&self) -> usize {
        self.ambient_count[3] as usize
    }
}

/// Pack a rig for the shader. Ambient lights are summed; anything past
/// `MAX_LIGHTS` is dropped.
pub fn pack_lights(rig: &LightRig) -> LightBlock {
    let ambient = rig.ambient();
    let mut block = LightBlock {
        ambient_count: [ambient[0], ambient[1], ambient[2], 0.0],
        ..LightBlock::default()
    };

    let mut n = 0usize;
    for light in &rig.lights {
        let packed = match *light {
            Light::Ambient { .. } => continue,
            Light::Directional {
                color,
                intensity,
                position,
            } => PackedLight {
                position_kind: [
                    position.x as f32,
                    position.y as f32,
                    position.z as f32,
                    LIGHT_DIRECTIONAL,
                ],
                color: rgb4(color.scaled(intensity)),
                cone: [0.0; 4],
            },
            Light::Point {
                color,
                intensity,
                position,
            } => PackedLight {
                position_kind: [
                    position.x as f32,
                    position.y as f32,
                    position.z as f32,
                    LIGHT_POINT,
                ],
                color: rgb4(color.scaled(intensity)),
                cone: [0.0; 4],
            },
            Light::Spot {
                color,
                intensity,
                position,
                angle,
                penumbra,
            } => PackedLight {
                position_kind: [
                    position.x as f32,
                    position.y as f32,
                    position.z as f32,
                    LIGHT_SPOT,
                ],
                color: rgb4(color.scaled(intensity)),
                cone: [angle.cos(), (angle * (1.0 - penumbra)).cos(), 0.0, 0.0],
            },
        };
        if n == MAX_LIGHTS {
            break;
        }
        block.lights[n] = packed;
        n += 1;
    }
    block.ambient_count[3] = n as f32;
    block
}

fn rgb4(c: [f32; 3]) -> [f32; 4] {
    [c[0], c[1], c[2], 0.0]
}

#[cfg(test)]
mod tests {
    use super::{LIGHT_POINT, LIGHT_SPOT, pack_lights};
    use approx::assert_abs_diff_eq;
    use scene::LightRig;

    #[test]
    fn accent_rig_packs_spot_and_point() {
        let block = pack_lights(&LightRig::accent());
        assert_eq!(block.count(), 2);
        assert_abs_diff_eq!(block.ambient_count[0], 0.5, epsilon = 1e-6);
        assert_eq!(block.lights[0].position_kind[3], LIGHT_SPOT);
        assert_eq!(block.lights[1].position_kind[3], LIGHT_POINT);
        // Crimson accent at half intensity.
        assert_abs_diff_eq!(block.lights[1].color[0], 220.0 / 255.0 * 0.5, epsilon = 1e-5);
        // Full penumbra: inner cone collapses to the axis.
        assert_abs_diff_eq!(block.lights[0].cone[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn studio_rig_fits() {
        let block = pack_lights(&LightRig::studio());
        assert_eq!(block.count(), 5);
        assert_abs_diff_eq!(block.ambient_count[1], 1.5, epsilon = 1e-6);
    }
}
