//! Page-wide mutable state, owned by the wasm app and passed to handlers.

use runtime::FrameGate;

use crate::parallax::{HeroParallax, hero_parallax};
use crate::project::CategoryFilter;
use crate::scroll::{ScrollMetrics, scroll_hint_opacity};
use crate::sections::{SectionRect, active_section};

#[derive(Debug)]
pub struct PageState {
    scroll_y: f64,
    progress: f64,
    active_section: String,
    filter: CategoryFilter,
    gate: FrameGate,
}

/// Values a scroll frame writes back to the DOM.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScrollUpdate {
    pub scroll_y: f64,
    pub progress: f64,
    pub hint_opacity: f64,
}

impl ScrollUpdate {
    pub fn hero(&self, speed: f64) -> HeroParallax {
        hero_parallax(self.scroll_y, speed)
    }
}

impl PageState {
    pub fn new(initial_section: &str) -> Self {
        Self {
            scroll_y: 0.0,
            progress: 0.0,
            active_section: initial_section.to_string(),
            filter: CategoryFilter::All,
            gate: FrameGate::new(),
        }
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn active_section(&self) -> &str {
        &self.active_section
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    /// A scroll event arrived. `true` means a frame must be scheduled.
    pub fn request_frame(&mut self) -> bool {
        self.gate.request()
    }

    pub fn coalesced_events(&self) -> u64 {
        self.gate.coalesced()
    }

    /// Start of the scheduled frame: re-arm the gate and sample scroll.
    pub fn begin_scroll_frame(&mut self, metrics: ScrollMetrics) -> ScrollUpdate {
        self.gate.begin_frame();
        self.scroll_y = metrics.scroll_y;
        self.progress = metrics.progress();
        ScrollUpdate {
            scroll_y: self.scroll_y,
            progress: self.progress,
            hint_opacity: scroll_hint_opacity(self.scroll_y),
        }
    }

    /// Recompute the active section. Returns the new id only when it
    /// changed; when no section crosses the line the previous one stays.
    pub fn update_active_section(
        &mut self,
        sections: &[(&str, Option<SectionRect>)],
    ) -> Option<String> {
        let current = active_section(sections)?;
        if current == self.active_section {
            return None;
        }
        tracing::debug!(from = %self.active_section, to = current, "active section changed");
        self.active_section = current.to_string();
        Some(self.active_section.clone())
    }

    /// Returns `false` if `filter` was already active.
    pub fn set_filter(&mut self, filter: CategoryFilter) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        true
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new("hero")
    }
}
