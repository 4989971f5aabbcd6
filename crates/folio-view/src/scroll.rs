//! Scroll position → navbar style, back-to-top visibility and current section.

use crate::config::SiteConfig;

/// Layout box of a page section, as read from `offsetTop`/`offsetHeight`.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollView {
    pub scroll_y: f64,
    pub scrolled: bool,
    pub show_back_to_top: bool,
    pub active_section: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ScrollTracker {
    threshold: f64,
    probe_offset: f64,
}

impl ScrollTracker {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            threshold: config.scroll_threshold,
            probe_offset: config.section_probe_offset,
        }
    }

    /// `sections` must be in document order.
    pub fn sample(&self, scroll_y: f64, sections: &[SectionBounds]) -> ScrollView {
        let scrolled = scroll_y > self.threshold;
        ScrollView {
            scroll_y,
            scrolled,
            show_back_to_top: scrolled,
            active_section: self.current_section(scroll_y, sections),
        }
    }

    /// Falls back to the first section when the probe point is outside every
    /// section, including past the last one.
    pub fn current_section(&self, scroll_y: f64, sections: &[SectionBounds]) -> Option<String> {
        let probe = scroll_y + self.probe_offset;
        sections
            .iter()
            .find(|section| section.contains(probe))
            .or_else(|| sections.first())
            .map(|section| section.id.clone())
    }
}
