use glam::Vec2;

use crate::core::time::Interval;
use crate::effects::rng::Rng;

/// Default time a grain frame is held, in milliseconds (8 s over 10 steps).
pub const GRAIN_FRAME_MS: f64 = 800.0;

/// Largest offset in either direction, in percent of the overlay size.
pub const GRAIN_AMPLITUDE_PCT: Vec2 = Vec2::new(15.0, 35.0);

/// Full-viewport film grain overlay. The texture itself lives in the host;
/// the engine only decides where it sits, stepping to a new jittered offset
/// every frame interval.
#[derive(Debug, Clone)]
pub struct FilmGrain {
    rng: Rng,
    timer: Interval,
    amplitude: Vec2,
    offset: Vec2,
    frame_index: u32,
}

impl FilmGrain {
    pub fn new(seed: u64, frame_ms: f64) -> Self {
        Self {
            rng: Rng::new(seed),
            timer: Interval::start(frame_ms),
            amplitude: GRAIN_AMPLITUDE_PCT,
            offset: Vec2::ZERO,
            frame_index: 0,
        }
    }

    /// Advance by `dt_ms`. Returns true if the offset moved.
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let due = self.timer.advance(dt_ms);
        if due == 0 {
            return false;
        }
        for _ in 0..due {
            self.frame_index = self.frame_index.wrapping_add(1);
            self.offset = Vec2::new(self.rng.next_signed(), self.rng.next_signed()) * self.amplitude;
        }
        true
    }

    /// Current translation in percent.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    pub fn stop(&mut self) {
        self.timer.cancel();
    }
}
