/// Horizontal line, in viewport pixels, that decides the active section.
pub const ACTIVE_LINE_PX: f64 = 100.0;

pub const DEFAULT_SECTIONS: [&str; 4] = ["hero", "work", "about", "contact"];

/// Viewport-relative vertical extent of a section element.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SectionRect {
    pub top: f64,
    pub bottom: f64,
}

impl SectionRect {
    pub fn crosses(&self, line: f64) -> bool {
        self.top <= line && self.bottom >= line
    }
}

/// First section, in document order, whose box straddles the active line.
/// `None` entries are sections missing from the page and are skipped.
pub fn active_section<'a>(sections: &[(&'a str, Option<SectionRect>)]) -> Option<&'a str> {
    sections
        .iter()
        .find(|(_, rect)| rect.is_some_and(|r| r.crosses(ACTIVE_LINE_PX)))
        .map(|(id, _)| *id)
}
