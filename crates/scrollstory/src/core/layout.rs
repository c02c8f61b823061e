use crate::api::types::SectionId;

/// Size of the visible area in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Vertical extent of one section in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionRect {
    pub top: f64,
    pub height: f64,
}

impl SectionRect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Sections stacked top to bottom, each at least one viewport tall.
#[derive(Debug, Clone)]
pub struct PageLayout {
    viewport: Viewport,
    /// Heights reported by the host; `None` means "one viewport".
    measured: Vec<Option<f64>>,
    rects: Vec<SectionRect>,
}

impl PageLayout {
    pub fn new(section_count: usize, viewport: Viewport) -> Self {
        let mut layout = Self {
            viewport,
            measured: vec![None; section_count],
            rects: Vec::with_capacity(section_count),
        };
        layout.relayout();
        layout
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.relayout();
    }

    /// Record a measured height. Returns false for an unknown section.
    pub fn set_measured_height(&mut self, id: SectionId, height: f64) -> bool {
        match self.measured.get_mut(id.index()) {
            Some(slot) => {
                *slot = Some(height);
                self.relayout();
                true
            }
            None => false,
        }
    }

    pub fn rect(&self, id: SectionId) -> Option<SectionRect> {
        self.rects.get(id.index()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionId, SectionRect)> + '_ {
        self.rects
            .iter()
            .enumerate()
            .map(|(i, r)| (SectionId(i as u32), *r))
    }

    pub fn total_height(&self) -> f64 {
        self.rects.last().map_or(0.0, SectionRect::bottom)
    }

    /// Furthest the page can scroll.
    pub fn scroll_limit(&self) -> f64 {
        (self.total_height() - self.viewport.height).max(0.0)
    }

    fn relayout(&mut self) {
        let min_height = self.viewport.height;
        self.rects.clear();
        let mut top = 0.0;
        for measured in &self.measured {
            let height = measured.map_or(min_height, |h| h.max(min_height));
            self.rects.push(SectionRect { top, height });
            top += height;
        }
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_stack_one_viewport_each() {
        let layout = PageLayout::new(3, Viewport::new(400.0, 800.0));
        assert_eq!(layout.rect(SectionId(1)).unwrap().top, 800.0);
        assert_eq!(layout.total_height(), 2400.0);
        assert_eq!(layout.scroll_limit(), 1600.0);
    }

    #[test]
    fn measured_height_pushes_later_sections_down() {
        let mut layout = PageLayout::new(3, Viewport::new(400.0, 800.0));
        assert!(layout.set_measured_height(SectionId(0), 1200.0));
        assert_eq!(layout.rect(SectionId(1)).unwrap().top, 1200.0);
        assert!(!layout.set_measured_height(SectionId(9), 100.0));
    }

    #[test]
    fn measured_height_never_below_viewport() {
        let mut layout = PageLayout::new(1, Viewport::new(400.0, 800.0));
        layout.set_measured_height(SectionId(0), 300.0);
        assert_eq!(layout.rect(SectionId(0)).unwrap().height, 800.0);
    }

    #[test]
    fn resize_relayouts() {
        let mut layout = PageLayout::new(2, Viewport::new(400.0, 800.0));
        layout.resize(Viewport::new(400.0, 500.0));
        assert_eq!(layout.rect(SectionId(1)).unwrap().top, 500.0);
        assert_eq!(layout.scroll_limit(), 500.0);
    }
}
