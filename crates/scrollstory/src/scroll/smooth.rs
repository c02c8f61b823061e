// scroll/smooth.rs
//
// Smooth-scroll driver. Raw wheel/touch/key input moves a target offset;
// every animation frame the virtual position eases toward it.

use crate::extensions::easing::expo_out_clamped;

/// DOM key codes the driver maps to scroll targets.
pub mod keys {
    pub const SPACE: u32 = 32;
    pub const PAGE_UP: u32 = 33;
    pub const PAGE_DOWN: u32 = 34;
    pub const END: u32 = 35;
    pub const HOME: u32 = 36;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_DOWN: u32 = 40;
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmoothScrollConfig {
    /// Seconds an ease from the current position to a new target takes.
    pub duration_s: f64,
    /// Scale applied to wheel deltas.
    pub wheel_multiplier: f32,
    /// Scale applied to touch drag distances.
    pub touch_multiplier: f32,
    /// Pixels per arrow key press.
    pub arrow_step: f64,
    /// Fraction of the viewport a page key moves.
    pub page_fraction: f64,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            duration_s: 1.6,
            wheel_multiplier: 0.8,
            touch_multiplier: 1.5,
            arrow_step: 40.0,
            page_fraction: 0.9,
        }
    }
}

/// What the host should do with the raw event after the driver saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    /// The driver handled it; suppress native scrolling.
    Consumed,
    /// The driver is gone; let the browser scroll natively.
    Native,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverState {
    Running,
    /// Input swallowed without moving the page.
    Stopped,
    Destroyed,
}

#[derive(Debug, Clone, Copy)]
struct Ease {
    from: f64,
    to: f64,
    elapsed_s: f64,
}

/// Eased virtual scroll position, decoupled from raw input.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    config: SmoothScrollConfig,
    /// Position the page is rendered at.
    animated: f64,
    /// Where input wants the page to end up.
    target: f64,
    limit: f64,
    ease: Option<Ease>,
    touch_last_y: Option<f32>,
    state: DriverState,
}

impl SmoothScroll {
    pub fn new(config: SmoothScrollConfig, limit: f64) -> Self {
        Self {
            config,
            animated: 0.0,
            target: 0.0,
            limit: limit.max(0.0),
            ease: None,
            touch_last_y: None,
            state: DriverState::Running,
        }
    }

    /// Feed a wheel delta (positive scrolls down).
    pub fn wheel(&mut self, delta_y: f32) -> InputDisposition {
        match self.state {
            DriverState::Destroyed => InputDisposition::Native,
            DriverState::Stopped => InputDisposition::Consumed,
            DriverState::Running => {
                let delta = (delta_y * self.config.wheel_multiplier) as f64;
                self.ease_to(self.target + delta);
                InputDisposition::Consumed
            }
        }
    }

    pub fn touch_start(&mut self, y: f32) -> InputDisposition {
        if self.state == DriverState::Destroyed {
            return InputDisposition::Native;
        }
        self.touch_last_y = Some(y);
        InputDisposition::Consumed
    }

    /// Dragging up scrolls down, scaled by the touch multiplier.
    pub fn touch_move(&mut self, y: f32) -> InputDisposition {
        match self.state {
            DriverState::Destroyed => InputDisposition::Native,
            DriverState::Stopped => InputDisposition::Consumed,
            DriverState::Running => {
                if let Some(last) = self.touch_last_y.replace(y) {
                    let delta = ((last - y) * self.config.touch_multiplier) as f64;
                    self.ease_to(self.target + delta);
                }
                InputDisposition::Consumed
            }
        }
    }

    pub fn touch_end(&mut self) {
        self.touch_last_y = None;
    }

    /// Map navigation keys to scroll targets. Other keys pass through.
    pub fn key(&mut self, key_code: u32, viewport_height: f64) -> InputDisposition {
        if self.state == DriverState::Destroyed {
            return InputDisposition::Native;
        }
        let page = viewport_height * self.config.page_fraction;
        let destination = match key_code {
            keys::ARROW_DOWN => self.target + self.config.arrow_step,
            keys::ARROW_UP => self.target - self.config.arrow_step,
            keys::SPACE | keys::PAGE_DOWN => self.target + page,
            keys::PAGE_UP => self.target - page,
            keys::HOME => 0.0,
            keys::END => self.limit,
            _ => return InputDisposition::Native,
        };
        if self.state == DriverState::Running {
            self.ease_to(destination);
        }
        InputDisposition::Consumed
    }

    /// Move to `target`, either eased or in one jump.
    pub fn scroll_to(&mut self, target: f64, immediate: bool) {
        if self.state != DriverState::Running {
            return;
        }
        if immediate {
            self.target = self.clamp(target);
            self.animated = self.target;
            self.ease = None;
        } else {
            self.ease_to(target);
        }
    }

    /// Advance one animation frame. Returns the virtual position.
    pub fn tick(&mut self, dt_ms: f64) -> f64 {
        if self.state == DriverState::Destroyed {
            return self.animated;
        }
        if let Some(ease) = &mut self.ease {
            ease.elapsed_s += dt_ms.max(0.0) / 1000.0;
            let progress = if self.config.duration_s > 0.0 {
                (ease.elapsed_s / self.config.duration_s).clamp(0.0, 1.0)
            } else {
                1.0
            };
            if progress >= 1.0 {
                self.animated = ease.to;
                self.ease = None;
            } else {
                let eased = expo_out_clamped(progress);
                self.animated = ease.from + (ease.to - ease.from) * eased;
            }
        }
        self.animated
    }

    /// New content height or viewport: clamp everything into range.
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit.max(0.0);
        self.target = self.clamp(self.target);
        self.animated = self.clamp(self.animated);
        if let Some(ease) = &mut self.ease {
            ease.to = self.target;
        }
    }

    /// Swallow input without moving. Reversible with [`start`](Self::start).
    pub fn stop(&mut self) {
        if self.state == DriverState::Running {
            self.state = DriverState::Stopped;
            self.ease = None;
            self.target = self.animated;
        }
    }

    pub fn start(&mut self) {
        if self.state == DriverState::Stopped {
            self.state = DriverState::Running;
        }
    }

    /// Permanent teardown: no more frames, input goes back to native.
    pub fn destroy(&mut self) {
        if self.state != DriverState::Destroyed {
            log::debug!("smooth scroll destroyed at {:.1}", self.animated);
        }
        self.state = DriverState::Destroyed;
        self.ease = None;
        self.touch_last_y = None;
    }

    pub fn position(&self) -> f64 {
        self.animated
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn is_animating(&self) -> bool {
        self.ease.is_some()
    }

    pub fn is_stopped(&self) -> bool {
        self.state == DriverState::Stopped
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == DriverState::Destroyed
    }

    fn clamp(&self, v: f64) -> f64 {
        v.clamp(0.0, self.limit)
    }

    fn ease_to(&mut self, target: f64) {
        self.target = self.clamp(target);
        self.ease = Some(Ease {
            from: self.animated,
            to: self.target,
            elapsed_s: 0.0,
        });
    }
}
