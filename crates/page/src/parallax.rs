use foundation::math::clamp01;

/// Per-card speeds, cycled by card index.
pub const DEFAULT_PARALLAX_SPEEDS: [f64; 3] = [0.15, 0.2, 0.12];

/// Inline transition set alongside each card transform.
pub const CARD_TRANSITION: &str = "transform 0.1s ease-out";

/// Hero elements are fully faded after this many pixels of scroll.
pub const HERO_FADE_PX: f64 = 500.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CardParallax {
    /// How far the card has travelled through the viewport, in `[0, 1]`.
    pub progress: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl CardParallax {
    pub fn css_transform(&self) -> String {
        format!("translateY({}px) scale({})", self.translate_y, self.scale)
    }
}

/// Speed for the card at `index`; an empty table means no motion.
pub fn speed_for(speeds: &[f64], index: usize) -> f64 {
    if speeds.is_empty() {
        0.0
    } else {
        speeds[index % speeds.len()]
    }
}

/// `top` is the card's document-space top (bounding rect top + scroll).
pub fn card_parallax(
    top: f64,
    height: f64,
    viewport_height: f64,
    scroll_y: f64,
    speed: f64,
) -> CardParallax {
    let span = viewport_height + height;
    let raw = if span > 0.0 {
        (scroll_y + viewport_height - top) / span
    } else {
        0.0
    };
    let progress = clamp01(raw);
    CardParallax {
        progress,
        translate_y: (progress - 0.5) * -100.0 * speed,
        scale: 1.0 + 0.05 * progress,
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HeroParallax {
    pub translate_y: f64,
    pub opacity: f64,
}

impl HeroParallax {
    pub fn css_transform(&self) -> String {
        format!("translateY({}px)", self.translate_y)
    }
}

pub fn hero_parallax(scroll_y: f64, speed: f64) -> HeroParallax {
    HeroParallax {
        translate_y: scroll_y * speed,
        opacity: (1.0 - scroll_y / HERO_FADE_PX).max(0.0),
    }
}

/// Value of a `data-parallax` attribute. Unparsable input is treated as 0.
pub fn parse_speed(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
