use serde::{Deserialize, Serialize};

/// Linear RGB color.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color(pub [f32; 3]);

impl Color {
    pub const WHITE: Color = Color([1.0, 1.0, 1.0]);
    /// The site's accent red (`#DC143C`).
    pub const CRIMSON: Color = Color([220.0 / 255.0, 20.0 / 255.0, 60.0 / 255.0]);

    pub fn from_hex(rgb: u32) -> Self {
        let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
        let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
        let b = (rgb & 0xff) as f32 / 255.0;
        Color([r, g, b])
    }

    pub fn scaled(self, k: f32) -> [f32; 3] {
        [self.0[0] * k, self.0[1] * k, self.0[2] * k]
    }
}

/// Metal/roughness surface description.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StandardMaterial {
    pub color: Color,
    pub metalness: f32,
    pub roughness: f32,
}

impl StandardMaterial {
    pub fn new(color: Color, metalness: f32, roughness: f32) -> Self {
        Self {
            color,
            metalness,
            roughness,
        }
    }

    /// Uniform material given to meshes from formats without PBR data.
    pub fn neutral() -> Self {
        Self::new(Color::WHITE, 0.3, 0.4)
    }

    pub fn placeholder() -> Self {
        Self::new(Color::CRIMSON, 0.7, 0.2)
    }
}

impl Default for StandardMaterial {
    fn default() -> Self {
        Self::new(Color::WHITE, 0.0, 1.0)
    }
}
