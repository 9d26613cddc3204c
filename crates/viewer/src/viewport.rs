/// Device pixel ratios above this are clamped to keep fill rate bounded.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// CSS-pixel size of the canvas plus the device pixel ratio.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            device_pixel_ratio,
        }
    }

    pub fn pixel_ratio(&self) -> f64 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        }
    }

    /// Backing-store size in physical pixels, at least 1x1.
    pub fn physical_size(&self) -> (u32, u32) {
        let r = self.pixel_ratio();
        (
            ((self.width * r).round() as u32).max(1),
            ((self.height * r).round() as u32).max(1),
        )
    }

    pub fn aspect(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Viewport;

    #[test]
    fn pixel_ratio_is_capped() {
        assert_eq!(Viewport::new(100.0, 100.0, 3.0).pixel_ratio(), 2.0);
        assert_eq!(Viewport::new(100.0, 100.0, 1.5).pixel_ratio(), 1.5);
        assert_eq!(Viewport::new(100.0, 100.0, 0.0).pixel_ratio(), 1.0);
    }

    #[test]
    fn physical_size_never_zero() {
        assert_eq!(Viewport::new(640.0, 360.0, 3.0).physical_size(), (1280, 720));
        assert_eq!(Viewport::new(0.0, 0.0, 1.0).physical_size(), (1, 1));
        assert_eq!(Viewport::new(0.0, 0.0, 1.0).aspect(), 1.0);
    }
}
