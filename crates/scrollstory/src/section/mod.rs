pub mod background;
pub mod image;
pub mod renderer;

pub use background::{Background, ColorStop};
pub use image::{parallax_percent, ImageBlock, ImageState};
pub use renderer::{SectionFrame, SectionRenderer};
