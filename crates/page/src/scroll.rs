use foundation::math::clamp01;

/// The hero scroll hint is gone after this many pixels.
pub const SCROLL_HINT_FADE_PX: f64 = 300.0;

/// Window scroll geometry sampled once per frame.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub scroll_height: f64,
    pub inner_height: f64,
}

impl ScrollMetrics {
    /// Position between top and bottom of the document in `[0, 1]`. A
    /// document that does not scroll reports 0.
    pub fn progress(&self) -> f64 {
        document_scroll_progress(self.scroll_y, self.scroll_height, self.inner_height)
    }
}

pub fn document_scroll_progress(scroll_y: f64, scroll_height: f64, inner_height: f64) -> f64 {
    let scrollable = scroll_height - inner_height;
    if scrollable <= 0.0 || !scrollable.is_finite() {
        return 0.0;
    }
    clamp01((scroll_y / scrollable).min(1.0))
}

pub fn scroll_hint_opacity(scroll_y: f64) -> f64 {
    (1.0 - scroll_y / SCROLL_HINT_FADE_PX).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::{ScrollMetrics, document_scroll_progress, scroll_hint_opacity};
    use approx::assert_abs_diff_eq;

    #[test]
    fn progress_over_scrollable_range() {
        assert_eq!(document_scroll_progress(0.0, 3000.0, 1000.0), 0.0);
        assert_abs_diff_eq!(document_scroll_progress(500.0, 3000.0, 1000.0), 0.25, epsilon = 1e-12);
        assert_eq!(document_scroll_progress(2500.0, 3000.0, 1000.0), 1.0);
    }

    #[test]
    fn overscroll_is_clamped() {
        assert_eq!(document_scroll_progress(-40.0, 3000.0, 1000.0), 0.0);
        assert_eq!(document_scroll_progress(9000.0, 3000.0, 1000.0), 1.0);
    }

    #[test]
    fn non_scrollable_document_is_zero() {
        let m = ScrollMetrics {
            scroll_y: 0.0,
            scroll_height: 800.0,
            inner_height: 800.0,
        };
        assert_eq!(m.progress(), 0.0);
        assert_eq!(document_scroll_progress(10.0, 500.0, 800.0), 0.0);
    }

    #[test]
    fn hint_fades_by_300px() {
        assert_eq!(scroll_hint_opacity(0.0), 1.0);
        assert_eq!(scroll_hint_opacity(150.0), 0.5);
        assert_eq!(scroll_hint_opacity(300.0), 0.0);
        assert_eq!(scroll_hint_opacity(1200.0), 0.0);
    }
}
