pub mod grain;
pub mod rng;

pub use grain::{FilmGrain, GRAIN_FRAME_MS};
pub use rng::Rng;
