/// Most ticks a single frame may release from one interval.
/// A backgrounded tab can hand us a multi-second delta; the remainder is dropped.
pub const MAX_CATCH_UP_TICKS: u32 = 10;

/// Repeating, cancellable timer driven by frame deltas.
///
/// Stands in for a host `setInterval` handle: it is started with a period,
/// advanced by the page loop, and reports how many ticks fell due.
/// Once cancelled it never fires again.
#[derive(Debug, Clone)]
pub struct Interval {
    /// Period between ticks in milliseconds.
    period_ms: f64,
    /// Time accumulated since the last released tick.
    accumulator: f64,
    active: bool,
}

impl Interval {
    pub fn start(period_ms: f64) -> Self {
        Self {
            period_ms: period_ms.max(f64::EPSILON),
            accumulator: 0.0,
            active: true,
        }
    }

    /// Add frame time. Returns the number of ticks that fell due.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !self.active {
            return 0;
        }
        self.accumulator += dt_ms.max(0.0);
        let due = (self.accumulator / self.period_ms).floor();
        if due >= MAX_CATCH_UP_TICKS as f64 {
            self.accumulator = 0.0;
            return MAX_CATCH_UP_TICKS;
        }
        self.accumulator -= due * self.period_ms;
        due as u32
    }

    /// Stop the timer. Pending time is discarded.
    pub fn cancel(&mut self) {
        self.active = false;
        self.accumulator = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }
}

/// Turns absolute animation-frame timestamps into per-frame deltas.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous timestamp. The first frame yields 0.
    /// Timestamps that go backwards are treated as a zero-length frame.
    pub fn delta(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_tick_exact() {
        let mut iv = Interval::start(50.0);
        assert_eq!(iv.advance(50.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut iv = Interval::start(50.0);
        assert_eq!(iv.advance(20.0), 0);
        assert_eq!(iv.advance(20.0), 0);
        assert_eq!(iv.advance(20.0), 1);
        // 10ms carried over
        assert_eq!(iv.advance(40.0), 1);
    }

    #[test]
    fn caps_catch_up() {
        let mut iv = Interval::start(30.0);
        assert_eq!(iv.advance(10_000.0), MAX_CATCH_UP_TICKS);
        assert_eq!(iv.advance(0.0), 0);
    }

    #[test]
    fn cancelled_never_fires() {
        let mut iv = Interval::start(50.0);
        iv.advance(40.0);
        iv.cancel();
        assert!(!iv.is_active());
        assert_eq!(iv.advance(500.0), 0);
    }

    #[test]
    fn frame_clock_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.delta(1000.0), 0.0);
        assert_eq!(clock.delta(1016.0), 16.0);
        assert_eq!(clock.delta(1010.0), 0.0);
    }
}
