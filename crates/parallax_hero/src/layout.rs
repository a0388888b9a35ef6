//! Page layout provider
//!
//! The host keeps a [`PageLayout`] up to date with the hero's document bounds, the
//! viewport and the scroll offset; scrubbers read it when resolving their trigger
//! region.

use parallax_animation::TriggerLayout;
use parallax_core::{Rect, Size};
use std::cell::Cell;

/// Mutable view of the page geometry around the hero section
#[derive(Debug)]
pub struct PageLayout {
    section: Cell<Rect>,
    viewport: Cell<Size>,
    scroll_offset: Cell<f32>,
}

impl PageLayout {
    pub fn new(section: Rect, viewport: Size) -> Self {
        Self {
            section: Cell::new(section),
            viewport: Cell::new(viewport),
            scroll_offset: Cell::new(0.0),
        }
    }

    /// Hero at the top of the page, filling one viewport height
    pub fn full_viewport(viewport: Size) -> Self {
        Self::new(
            Rect::new(0.0, 0.0, viewport.width, viewport.height),
            viewport,
        )
    }

    pub fn section(&self) -> Rect {
        self.section.get()
    }

    pub fn set_section(&self, section: Rect) {
        self.section.set(section);
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.viewport.set(viewport);
    }

    pub fn set_scroll_offset(&self, offset: f32) {
        self.scroll_offset.set(offset);
    }
}

impl TriggerLayout for PageLayout {
    fn reference_bounds(&self) -> Rect {
        self.section.get()
    }

    fn viewport(&self) -> Size {
        self.viewport.get()
    }

    fn scroll_offset(&self) -> f32 {
        self.scroll_offset.get()
    }
}
