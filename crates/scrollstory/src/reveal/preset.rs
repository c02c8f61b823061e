// reveal/preset.rs
//
// Fixed reveal presets, one family per section kind, derived from the
// content's animation timings.

use crate::api::types::SectionKind;
use crate::content::manifest::AnimationConfig;
use crate::extensions::easing::Easing;
use crate::reveal::style::RevealStyle;

/// Extra stagger per text line, in seconds.
pub const LINE_STAGGER_S: f32 = 0.3;

/// Hidden pose plus how to get from it to the target pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealPreset {
    pub hidden: RevealStyle,
    /// Pose once revealed.
    pub shown: RevealStyle,
    pub duration_s: f32,
    pub delay_s: f32,
    pub easing: Easing,
}

impl RevealPreset {
    /// Seconds from the trigger until the animation is complete.
    pub fn settle_time_s(&self) -> f32 {
        self.delay_s + self.duration_s
    }
}

/// Text treatment, chosen by section kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextVariant {
    Opening,
    Default,
    Closing,
}

impl From<SectionKind> for TextVariant {
    fn from(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Opening => TextVariant::Opening,
            SectionKind::Photo => TextVariant::Default,
            SectionKind::Closing => TextVariant::Closing,
        }
    }
}

/// Base delay each section kind hands its text.
pub fn section_delay_s(kind: SectionKind) -> f32 {
    match kind {
        SectionKind::Opening => 0.5,
        SectionKind::Photo | SectionKind::Closing => 0.3,
    }
}

/// Presets for every animated element of one section.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetBook {
    timings: AnimationConfig,
}

impl PresetBook {
    pub fn new(timings: AnimationConfig) -> Self {
        Self { timings }
    }

    pub fn timings(&self) -> &AnimationConfig {
        &self.timings
    }

    /// The text block as a whole.
    pub fn text(&self, variant: TextVariant, delay_s: f32) -> RevealPreset {
        let t = &self.timings;
        match variant {
            TextVariant::Opening => RevealPreset {
                hidden: RevealStyle::hidden().with_offset_y(30.0).with_blur(4.0),
                shown: RevealStyle::VISIBLE,
                duration_s: t.text_duration * 1.5,
                delay_s: delay_s + 0.5,
                easing: Easing::EMOTIONAL,
            },
            TextVariant::Default => RevealPreset {
                hidden: RevealStyle::hidden().with_offset_y(20.0),
                shown: RevealStyle::VISIBLE,
                duration_s: t.text_duration,
                delay_s: delay_s + t.text_delay,
                easing: Easing::SETTLE,
            },
            TextVariant::Closing => RevealPreset {
                hidden: RevealStyle::hidden().with_scale(0.98).with_blur(2.0),
                shown: RevealStyle::VISIBLE,
                duration_s: t.text_duration * 1.8,
                delay_s: delay_s + 0.8,
                easing: Easing::BREATHE,
            },
        }
    }

    /// One line of a multi-line text, staggered by its index.
    pub fn line(&self, index: usize, delay_s: f32) -> RevealPreset {
        let t = &self.timings;
        RevealPreset {
            hidden: RevealStyle::hidden().with_offset_y(10.0),
            shown: RevealStyle::VISIBLE,
            duration_s: t.text_duration,
            delay_s: delay_s + t.text_delay + index as f32 * LINE_STAGGER_S,
            easing: Easing::SETTLE,
        }
    }

    /// The photograph of a photo section.
    pub fn image(&self) -> RevealPreset {
        let t = &self.timings;
        RevealPreset {
            hidden: RevealStyle::hidden()
                .with_scale(t.image_scale)
                .with_blur(12.0),
            shown: RevealStyle::VISIBLE,
            duration_s: t.image_duration,
            delay_s: 0.0,
            easing: Easing::EMOTIONAL,
        }
    }

    /// Scroll hint on the opening section, end mark on the closing one.
    pub fn indicator(&self, kind: SectionKind) -> Option<RevealPreset> {
        match kind {
            SectionKind::Opening => Some(RevealPreset {
                hidden: RevealStyle::hidden().with_offset_y(-10.0),
                shown: RevealStyle::VISIBLE.with_opacity(0.4),
                duration_s: 1.0,
                delay_s: 2.0,
                easing: Easing::EMOTIONAL,
            }),
            SectionKind::Closing => Some(RevealPreset {
                hidden: RevealStyle::hidden(),
                shown: RevealStyle::VISIBLE.with_opacity(0.2),
                duration_s: 1.5,
                delay_s: 2.5,
                easing: Easing::EASE_IN_OUT,
            }),
            SectionKind::Photo => None,
        }
    }
}

impl Default for PresetBook {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}
