// reveal/animator.rs
//
// One-shot reveal: a pure function of (revealed, time since reveal, preset).
// Once revealed an element stays in its visible pose; there is no re-hide.

use crate::api::types::SectionKind;
use crate::reveal::preset::{section_delay_s, PresetBook, RevealPreset, TextVariant};
use crate::reveal::style::RevealStyle;
use crate::reveal::transition::{progress, Transition};

/// Sample a preset. Before the reveal trigger (or with `revealed` false)
/// the element sits in its hidden pose.
pub fn sample(preset: &RevealPreset, revealed: bool, elapsed_s: f32) -> RevealStyle {
    if !revealed {
        return preset.hidden;
    }
    let t = progress(elapsed_s, preset);
    preset.hidden.lerp(preset.shown, preset.easing.apply(t))
}

/// Style parameters of every element in one section for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionStyles {
    pub text: RevealStyle,
    pub lines: Vec<RevealStyle>,
    pub image: Option<RevealStyle>,
    pub indicator: Option<RevealStyle>,
}

/// Presets resolved for one section, plus its live indicator.
#[derive(Debug, Clone)]
pub struct RevealAnimator {
    text: RevealPreset,
    lines: Vec<RevealPreset>,
    image: Option<RevealPreset>,
    indicator: Option<Transition>,
}

impl RevealAnimator {
    pub fn new(book: &PresetBook, kind: SectionKind, line_count: usize) -> Self {
        let delay = section_delay_s(kind);
        Self {
            text: book.text(TextVariant::from(kind), delay),
            lines: (0..line_count).map(|i| book.line(i, delay)).collect(),
            image: (kind == SectionKind::Photo).then(|| book.image()),
            indicator: book.indicator(kind).map(Transition::new),
        }
    }

    /// Indicators follow live visibility, not the sticky flag.
    pub fn set_indicator_shown(&mut self, shown: bool) {
        if let Some(indicator) = &mut self.indicator {
            indicator.set_shown(shown);
        }
    }

    /// Advance the time-driven indicator.
    pub fn tick(&mut self, dt_s: f32) {
        if let Some(indicator) = &mut self.indicator {
            indicator.tick(dt_s);
        }
    }

    pub fn sample(&self, revealed: bool, elapsed_s: f32) -> SectionStyles {
        SectionStyles {
            text: sample(&self.text, revealed, elapsed_s),
            lines: self
                .lines
                .iter()
                .map(|p| sample(p, revealed, elapsed_s))
                .collect(),
            image: self.image.as_ref().map(|p| sample(p, revealed, elapsed_s)),
            indicator: self.indicator.as_ref().map(Transition::current),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_until_revealed() {
        let book = PresetBook::default();
        let p = book.text(TextVariant::Opening, 0.5);
        assert_eq!(sample(&p, false, 100.0), p.hidden);
    }

    #[test]
    fn opening_opacity_monotonic_and_bounded() {
        let book = PresetBook::default();
        let p = book.text(TextVariant::Opening, 0.5);
        let mut prev = 0.0;
        let mut t = 0.0;
        while t <= p.settle_time_s() + 0.5 {
            let s = sample(&p, true, t);
            assert!((0.0..=1.0).contains(&s.opacity));
            assert!(s.opacity + 1e-5 >= prev, "opacity fell at t={}", t);
            prev = s.opacity;
            t += 1.0 / 60.0;
        }
        assert_eq!(prev, 1.0);
        assert_eq!(sample(&p, true, p.settle_time_s()), RevealStyle::VISIBLE);
    }

    #[test]
    fn photo_section_has_image_and_staggered_lines() {
        let anim = RevealAnimator::new(&PresetBook::default(), SectionKind::Photo, 2);
        let s = anim.sample(true, 0.8);
        assert!(s.image.is_some());
        assert!(s.indicator.is_none());
        // Line 0 starts at 0.7s, line 1 at 1.0s.
        assert!(s.lines[0].opacity > 0.0);
        assert_eq!(s.lines[1].opacity, 0.0);
    }

    #[test]
    fn indicator_follows_live_visibility() {
        let mut anim = RevealAnimator::new(&PresetBook::default(), SectionKind::Opening, 1);
        anim.set_indicator_shown(true);
        anim.tick(3.5);
        assert!((anim.sample(true, 3.5).indicator.unwrap().opacity - 0.4).abs() < 1e-6);
        anim.set_indicator_shown(false);
        anim.tick(5.0);
        assert_eq!(anim.sample(true, 8.5).indicator.unwrap().opacity, 0.0);
    }
}
