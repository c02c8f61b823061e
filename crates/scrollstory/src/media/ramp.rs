use crate::core::time::Interval;

/// Snap distance when a ramp reaches its end value, absorbing f32 drift.
const RAMP_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampDirection {
    /// Volume rising toward the target.
    In,
    /// Volume falling toward silence.
    Out,
}

/// Outcome of advancing a ramp by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampStep {
    /// Volume after the last tick that fired this frame.
    pub volume: f32,
    /// Ticks that fired this frame.
    pub ticks: u32,
    /// The ramp reached its end value and stopped.
    pub finished: bool,
}

/// A stepped volume ramp on a cancellable interval.
///
/// Volume after `n` ticks is computed from the start value rather than
/// accumulated, so a 0 → 0.5 ramp at 0.02 always takes 25 ticks.
#[derive(Debug, Clone)]
pub struct Ramp {
    direction: RampDirection,
    interval: Interval,
    start: f32,
    end: f32,
    step: f32,
    ticks: u32,
    volume: f32,
}

impl Ramp {
    /// Rise from `from` to `target` by `step` every `period_ms`.
    pub fn fade_in(from: f32, target: f32, step: f32, period_ms: f64) -> Self {
        let target = target.max(0.0);
        Self::new(RampDirection::In, from.clamp(0.0, target), target, step, period_ms)
    }

    /// Fall from `from` to 0 by `step` every `period_ms`.
    pub fn fade_out(from: f32, step: f32, period_ms: f64) -> Self {
        Self::new(RampDirection::Out, from.max(0.0), 0.0, step, period_ms)
    }

    fn new(direction: RampDirection, start: f32, end: f32, step: f32, period_ms: f64) -> Self {
        Self {
            direction,
            interval: Interval::start(period_ms),
            start,
            end,
            step: step.abs().max(f32::EPSILON),
            ticks: 0,
            volume: start,
        }
    }

    pub fn direction(&self) -> RampDirection {
        self.direction
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_active()
    }

    /// Stop the ramp. No tick fires after this.
    pub fn cancel(&mut self) {
        self.interval.cancel();
    }

    /// Fire every tick due in `dt_ms`. `None` when no tick fired.
    pub fn advance(&mut self, dt_ms: f64) -> Option<RampStep> {
        let due = self.interval.advance(dt_ms);
        if due == 0 {
            return None;
        }
        let mut fired = 0;
        let mut finished = false;
        for _ in 0..due {
            fired += 1;
            if self.tick() {
                finished = true;
                self.interval.cancel();
                break;
            }
        }
        Some(RampStep {
            volume: self.volume,
            ticks: fired,
            finished,
        })
    }

    /// One step. Returns true when the end value is reached.
    fn tick(&mut self) -> bool {
        self.ticks += 1;
        let travelled = self.step * self.ticks as f32;
        match self.direction {
            RampDirection::In => {
                let next = self.start + travelled;
                if next >= self.end - RAMP_EPSILON {
                    self.volume = self.end;
                    true
                } else {
                    self.volume = next.min(self.end);
                    false
                }
            }
            RampDirection::Out => {
                let next = self.start - travelled;
                if next <= RAMP_EPSILON {
                    self.volume = 0.0;
                    true
                } else {
                    self.volume = next.max(0.0);
                    false
                }
            }
        }
    }
}
