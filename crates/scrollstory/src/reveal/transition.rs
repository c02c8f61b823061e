// reveal/transition.rs
//
// Reversible transition for elements that follow live visibility
// (indicators). Unlike the one-shot reveal, a target change restarts the
// animation from wherever the element currently is.

use crate::reveal::preset::RevealPreset;
use crate::reveal::style::RevealStyle;

#[derive(Debug, Clone)]
pub struct Transition {
    preset: RevealPreset,
    from: RevealStyle,
    shown: bool,
    elapsed_s: f32,
    current: RevealStyle,
}

impl Transition {
    /// Start at rest in the hidden pose.
    pub fn new(preset: RevealPreset) -> Self {
        Self {
            from: preset.hidden,
            current: preset.hidden,
            preset,
            shown: false,
            elapsed_s: 0.0,
        }
    }

    /// Retarget. A no-op when the target is unchanged.
    pub fn set_shown(&mut self, shown: bool) {
        if shown == self.shown {
            return;
        }
        self.shown = shown;
        self.from = self.current;
        self.elapsed_s = 0.0;
    }

    /// Advance by `dt_s` seconds. Returns the current pose.
    pub fn tick(&mut self, dt_s: f32) -> RevealStyle {
        if self.is_settled() {
            return self.current;
        }
        self.elapsed_s += dt_s.max(0.0);
        let to = if self.shown {
            self.preset.shown
        } else {
            self.preset.hidden
        };
        let t = progress(self.elapsed_s, &self.preset);
        self.current = self.from.lerp(to, self.preset.easing.apply(t));
        self.current
    }

    pub fn current(&self) -> RevealStyle {
        self.current
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed_s >= self.preset.settle_time_s()
    }
}

/// Normalized progress after the preset's delay, in [0, 1].
pub fn progress(elapsed_s: f32, preset: &RevealPreset) -> f32 {
    let active = elapsed_s - preset.delay_s;
    if active <= 0.0 {
        0.0
    } else if preset.duration_s <= 0.0 {
        1.0
    } else {
        (active / preset.duration_s).clamp(0.0, 1.0)
    }
}
