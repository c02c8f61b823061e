pub mod smooth;

pub use smooth::{InputDisposition, SmoothScroll, SmoothScrollConfig};
