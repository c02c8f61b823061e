// extensions/easing.rs
//
// Pure easing functions for reveal and scroll interpolation.
// No dependencies on sections or the page, just math.

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Exponential slow end, clamped so it settles exactly at 1.
    /// `min(1, 1.001 - 2^(-10t))`, the curve used by the smooth-scroll driver.
    ExpoOutClamped,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing curve.
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    /// Smooth, emotional reveal: `cubic-bezier(0.4, 0, 0.2, 1)`.
    pub const EMOTIONAL: Easing = Easing::CubicBezier { x1: 0.4, y1: 0.0, x2: 0.2, y2: 1.0 };
    /// Gentle settle: `cubic-bezier(0.33, 1, 0.68, 1)`.
    pub const SETTLE: Easing = Easing::CubicBezier { x1: 0.33, y1: 1.0, x2: 0.68, y2: 1.0 };
    /// Soft breathe: `cubic-bezier(0.25, 0.1, 0.25, 1)`.
    pub const BREATHE: Easing = Easing::CubicBezier { x1: 0.25, y1: 0.1, x2: 0.25, y2: 1.0 };
    /// Symmetric tween default: `cubic-bezier(0.42, 0, 0.58, 1)`.
    pub const EASE_IN_OUT: Easing = Easing::CubicBezier { x1: 0.42, y1: 0.0, x2: 0.58, y2: 1.0 };

    /// Apply the easing function to a normalized time value `t` in [0, 1].
    /// Inputs outside the range are clamped first.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::ExpoOutClamped => expo_out_clamped(t as f64) as f32,
            Easing::CubicBezier { x1, y1, x2, y2 } => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                UnitBezier::new(x1, y1, x2, y2).solve(t)
            }
        }
    }
}

/// The smooth-scroll curve in double precision, since scroll offsets run
/// into the tens of thousands of pixels.
#[inline]
pub fn expo_out_clamped(t: f64) -> f64 {
    (1.001 - 2.0_f64.powf(-10.0 * t)).min(1.0)
}

/// Cubic bezier with fixed endpoints (0,0) and (1,1).
struct UnitBezier {
    ax: f32,
    bx: f32,
    cx: f32,
    ay: f32,
    by: f32,
    cy: f32,
}

impl UnitBezier {
    const EPSILON: f32 = 1e-6;

    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;
        Self { ax, bx, cx, ay, by, cy }
    }

    fn sample_x(&self, t: f32) -> f32 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f32) -> f32 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_dx(&self, t: f32) -> f32 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Find the curve parameter whose x equals `x`.
    fn solve_x(&self, x: f32) -> f32 {
        // Newton first, it converges in a handful of steps for sane curves.
        let mut t = x;
        for _ in 0..8 {
            let err = self.sample_x(t) - x;
            if err.abs() < Self::EPSILON {
                return t;
            }
            let d = self.sample_dx(t);
            if d.abs() < Self::EPSILON {
                break;
            }
            t -= err / d;
        }

        // Bisection fallback.
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        t = x;
        while lo < hi {
            let sx = self.sample_x(t);
            if (sx - x).abs() < Self::EPSILON {
                return t;
            }
            if x > sx {
                lo = t;
            } else {
                hi = t;
            }
            let next = (lo + hi) * 0.5;
            if next == t {
                break;
            }
            t = next;
        }
        t
    }

    fn solve(&self, x: f32) -> f32 {
        self.sample_y(self.solve_x(x))
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec2 values.
#[inline]
pub fn lerp_vec2(a: glam::Vec2, b: glam::Vec2, t: f32) -> glam::Vec2 {
    a + (b - a) * t
}
