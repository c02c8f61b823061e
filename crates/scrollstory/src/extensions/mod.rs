// extensions/mod.rs
//
// Timing curves shared by the scroll driver and the reveal presets.
// Kept apart from the page so either can be used without the other.

pub mod easing;

pub use easing::{Easing, lerp, lerp_vec2};
