// section/renderer.rs
//
// One content entry on the page: owns its visibility flags, its reveal
// clock and presets, its background and (for photos) the image block.

use crate::api::types::{SectionId, SectionKind};
use crate::content::manifest::SectionDescriptor;
use crate::core::layout::{SectionRect, Viewport};
use crate::error::Degradation;
use crate::reveal::animator::{RevealAnimator, SectionStyles};
use crate::reveal::preset::PresetBook;
use crate::section::background::Background;
use crate::section::image::{parallax_percent, ImageBlock, ImageState};
use crate::visibility::state::VisibilityState;

/// Everything the presentation layer needs for one section this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionFrame {
    pub id: SectionId,
    pub is_visible: bool,
    pub has_ever_been_visible: bool,
    pub styles: SectionStyles,
    /// Image translation in percent of its height; 0 without an image.
    pub parallax_percent: f32,
    pub image_state: Option<ImageState>,
}

pub struct SectionRenderer {
    id: SectionId,
    kind: SectionKind,
    label: String,
    visibility: VisibilityState,
    animator: RevealAnimator,
    /// Page time at which the section first became visible.
    revealed_at_ms: Option<f64>,
    background: Background,
    image: Option<ImageBlock>,
    ambient_glow: bool,
    mounted: bool,
}

impl SectionRenderer {
    pub fn new(id: SectionId, descriptor: &SectionDescriptor, total: usize, book: &PresetBook) -> Self {
        let index = id.index();
        let image = match (descriptor.kind, &descriptor.image_ref) {
            (SectionKind::Photo, Some(src)) => Some(ImageBlock::new(
                src.clone(),
                descriptor.alt_text.clone().unwrap_or_default(),
            )),
            _ => None,
        };
        Self {
            id,
            kind: descriptor.kind,
            label: format!("Section {} of {}", index + 1, total),
            visibility: VisibilityState::new(),
            animator: RevealAnimator::new(book, descriptor.kind, descriptor.line_count()),
            revealed_at_ms: None,
            background: Background::for_section(
                descriptor.kind,
                index,
                descriptor.background_color(),
            ),
            image,
            ambient_glow: descriptor.kind == SectionKind::Photo,
            mounted: true,
        }
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Accessible label, e.g. "Section 2 of 9".
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn has_ambient_glow(&self) -> bool {
        self.ambient_glow
    }

    pub fn image(&self) -> Option<&ImageBlock> {
        self.image.as_ref()
    }

    pub fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Apply a visibility crossing observed at page time `now_ms`.
    /// Returns true if the live flag changed.
    pub fn on_visibility(&mut self, visible: bool, now_ms: f64) -> bool {
        if !self.mounted {
            return false;
        }
        let changed = self.visibility.apply(visible);
        if changed {
            log::debug!("{} visible={}", self.label, visible);
        }
        if self.visibility.has_ever_been_visible() && self.revealed_at_ms.is_none() {
            self.revealed_at_ms = Some(now_ms);
        }
        self.animator.set_indicator_shown(self.visibility.is_visible());
        changed
    }

    pub fn tick(&mut self, dt_ms: f64) {
        if self.mounted {
            self.animator.tick((dt_ms / 1000.0) as f32);
        }
    }

    pub fn image_loaded(&mut self, width: f32, height: f32) -> Option<Degradation> {
        let image = self.image.as_mut()?;
        if image.loaded(width, height) {
            None
        } else {
            Some(Degradation::AssetMissing(image.src.clone()))
        }
    }

    pub fn image_failed(&mut self) -> Option<Degradation> {
        let image = self.image.as_mut()?;
        image.failed();
        Some(Degradation::AssetMissing(image.src.clone()))
    }

    /// Seconds since the reveal trigger, 0 before it.
    pub fn reveal_elapsed_s(&self, now_ms: f64) -> f32 {
        self.revealed_at_ms
            .map_or(0.0, |at| ((now_ms - at).max(0.0) / 1000.0) as f32)
    }

    pub fn frame(
        &self,
        now_ms: f64,
        rect: Option<SectionRect>,
        scroll_y: f64,
        viewport: Viewport,
        parallax_strength: f32,
    ) -> SectionFrame {
        let styles = self
            .animator
            .sample(self.visibility.revealed(), self.reveal_elapsed_s(now_ms));
        let parallax = match (&self.image, rect) {
            (Some(_), Some(rect)) => parallax_percent(rect, scroll_y, viewport, parallax_strength),
            _ => 0.0,
        };
        SectionFrame {
            id: self.id,
            is_visible: self.visibility.is_visible(),
            has_ever_been_visible: self.visibility.has_ever_been_visible(),
            styles,
            parallax_percent: parallax,
            image_state: self.image.as_ref().map(|i| i.state),
        }
    }

    /// Leave the page: no further visibility or animation updates.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.visibility.release();
        self.animator.set_indicator_shown(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::store::ContentStore;

    fn renderer(index: u32) -> SectionRenderer {
        let store = ContentStore::default_story().unwrap();
        let id = SectionId(index);
        SectionRenderer::new(id, store.get(id).unwrap(), store.len(), &PresetBook::default())
    }

    fn frame(r: &SectionRenderer, now_ms: f64) -> SectionFrame {
        r.frame(now_ms, None, 0.0, Viewport::default(), 0.1)
    }

    #[test]
    fn label_counts_from_one() {
        assert_eq!(renderer(1).label(), "Section 2 of 9");
    }

    #[test]
    fn stays_revealed_after_scrolling_away() {
        let mut r = renderer(1);
        r.on_visibility(true, 1000.0);
        r.on_visibility(false, 1500.0);
        let f = frame(&r, 10_000.0);
        assert!(!f.is_visible);
        assert!(f.has_ever_been_visible);
        assert_eq!(f.styles.text.opacity, 1.0);
        assert_eq!(f.styles.image.unwrap().opacity, 1.0);
    }

    #[test]
    fn reveal_clock_starts_at_first_visibility() {
        let mut r = renderer(0);
        assert_eq!(frame(&r, 5000.0).styles.text.opacity, 0.0);
        r.on_visibility(true, 5000.0);
        r.on_visibility(false, 5100.0);
        r.on_visibility(true, 9000.0);
        assert!((r.reveal_elapsed_s(6000.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn failed_image_degrades() {
        let mut r = renderer(2);
        let d = r.image_failed().unwrap();
        assert_eq!(d, Degradation::AssetMissing("/images/attachments/p-1.jpg".into()));
        assert_eq!(frame(&r, 0.0).image_state, Some(ImageState::Failed));
    }

    #[test]
    fn text_sections_ignore_image_events() {
        let mut r = renderer(0);
        assert!(r.image_failed().is_none());
        assert!(frame(&r, 0.0).image_state.is_none());
    }

    #[test]
    fn unmounted_section_ignores_visibility() {
        let mut r = renderer(8);
        r.unmount();
        assert!(!r.on_visibility(true, 0.0));
        assert!(!r.visibility().has_ever_been_visible());
    }
}
