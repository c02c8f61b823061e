pub mod animator;
pub mod preset;
pub mod style;
pub mod transition;

pub use animator::{sample, RevealAnimator, SectionStyles};
pub use preset::{PresetBook, RevealPreset, TextVariant};
pub use style::RevealStyle;
pub use transition::Transition;
