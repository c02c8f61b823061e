use glam::Vec2;

use crate::extensions::easing::{lerp, lerp_vec2};

/// Style parameters handed to the presentation layer for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    /// 0 = transparent, 1 = opaque.
    pub opacity: f32,
    /// Translation in CSS pixels.
    pub offset: Vec2,
    /// Gaussian blur radius in CSS pixels.
    pub blur: f32,
    /// Uniform scale.
    pub scale: f32,
}

impl RevealStyle {
    /// Fully revealed: opaque, in place, sharp, unscaled.
    pub const VISIBLE: RevealStyle = RevealStyle {
        opacity: 1.0,
        offset: Vec2::ZERO,
        blur: 0.0,
        scale: 1.0,
    };

    /// Transparent but otherwise at rest.
    pub const fn hidden() -> Self {
        Self {
            opacity: 0.0,
            offset: Vec2::ZERO,
            blur: 0.0,
            scale: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_offset_y(mut self, y: f32) -> Self {
        self.offset.y = y;
        self
    }

    pub fn with_blur(mut self, blur: f32) -> Self {
        self.blur = blur;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Interpolate every parameter. Opacity and blur stay non-negative,
    /// opacity never exceeds 1.
    pub fn lerp(self, to: RevealStyle, t: f32) -> RevealStyle {
        RevealStyle {
            opacity: lerp(self.opacity, to.opacity, t).clamp(0.0, 1.0),
            offset: lerp_vec2(self.offset, to.offset, t),
            blur: lerp(self.blur, to.blur, t).max(0.0),
            scale: lerp(self.scale, to.scale, t),
        }
    }
}

impl Default for RevealStyle {
    fn default() -> Self {
        Self::hidden()
    }
}
