use crate::core::layout::{SectionRect, Viewport};
use crate::extensions::easing::lerp;

/// Load state of a section's photograph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageState {
    /// Skeleton shown while the host fetches the file.
    Loading,
    /// Natural aspect ratio (width / height) known.
    Loaded { aspect: f32 },
    /// Placeholder shown instead.
    Failed,
}

impl ImageState {
    pub fn is_portrait(&self) -> bool {
        matches!(self, ImageState::Loaded { aspect } if *aspect < 1.0)
    }

    /// Corner radius in CSS pixels.
    pub fn corner_radius(&self) -> f32 {
        match self {
            ImageState::Loaded { aspect } if *aspect < 1.0 => 28.0,
            ImageState::Loaded { .. } => 20.0,
            ImageState::Loading => 28.0,
            ImageState::Failed => 24.0,
        }
    }

    /// Numeric tag for the frame buffer: 0 loading, 1 loaded, 2 failed.
    pub fn code(&self) -> f32 {
        match self {
            ImageState::Loading => 0.0,
            ImageState::Loaded { .. } => 1.0,
            ImageState::Failed => 2.0,
        }
    }
}

/// A photo section's image reference and load state.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    pub src: String,
    pub alt: String,
    pub state: ImageState,
}

impl ImageBlock {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            state: ImageState::Loading,
        }
    }

    /// Record natural dimensions. Degenerate sizes count as a failure.
    pub fn loaded(&mut self, width: f32, height: f32) -> bool {
        if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
            self.state = ImageState::Loaded {
                aspect: width / height,
            };
            true
        } else {
            self.state = ImageState::Failed;
            false
        }
    }

    pub fn failed(&mut self) {
        self.state = ImageState::Failed;
    }
}

/// Vertical parallax as a percentage of the image's own height.
///
/// Travels from `+strength * 50%` when the section's top meets the
/// viewport bottom to `-strength * 50%` when its bottom meets the top.
pub fn parallax_percent(rect: SectionRect, scroll_y: f64, viewport: Viewport, strength: f32) -> f32 {
    let span = rect.height + viewport.height;
    let progress = if span > 0.0 {
        ((scroll_y + viewport.height - rect.top) / span).clamp(0.0, 1.0) as f32
    } else {
        0.0
    };
    let amplitude = strength * 50.0;
    lerp(amplitude, -amplitude, progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portrait_detection() {
        let mut img = ImageBlock::new("/a.jpg", "a");
        assert_eq!(img.state, ImageState::Loading);
        assert!(img.loaded(600.0, 900.0));
        assert!(img.state.is_portrait());
        assert_eq!(img.state.corner_radius(), 28.0);
        img.loaded(1200.0, 800.0);
        assert!(!img.state.is_portrait());
        assert_eq!(img.state.corner_radius(), 20.0);
    }

    #[test]
    fn zero_size_is_failure() {
        let mut img = ImageBlock::new("/a.jpg", "a");
        assert!(!img.loaded(0.0, 100.0));
        assert_eq!(img.state, ImageState::Failed);
    }

    #[test]
    fn parallax_spans_strength() {
        let vp = Viewport::new(800.0, 1000.0);
        let rect = SectionRect { top: 1000.0, height: 1000.0 };
        assert!((parallax_percent(rect, 0.0, vp, 0.1) - 5.0).abs() < 1e-5);
        assert!(parallax_percent(rect, 1000.0, vp, 0.1).abs() < 1e-5);
        assert!((parallax_percent(rect, 2000.0, vp, 0.1) + 5.0).abs() < 1e-5);
        assert!((parallax_percent(rect, 9000.0, vp, 0.1) + 5.0).abs() < 1e-5);
    }
}
