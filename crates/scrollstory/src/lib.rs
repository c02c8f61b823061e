pub mod api;
pub mod bridge;
pub mod content;
pub mod core;
pub mod effects;
pub mod error;
pub mod extensions;
pub mod input;
pub mod media;
pub mod reveal;
pub mod scroll;
pub mod section;
pub mod visibility;

// Re-export key types at crate root for convenience
pub use api::config::PageConfig;
pub use api::page::Page;
pub use api::types::{Rgba, SectionId, SectionKind};
pub use bridge::protocol::{FrameBuffer, FrameHeader, FrameLayout, SectionRecord, StyleRecord};
pub use content::{ContentStore, PageContent, SectionDescriptor};
pub use crate::core::layout::{PageLayout, SectionRect, Viewport};
pub use crate::core::time::{FrameClock, Interval};
pub use effects::FilmGrain;
pub use error::{ContentError, ContentResult, Degradation, DegradationLog};
pub use input::queue::{InputEvent, InputQueue, Interaction};
pub use media::{AudioChannelState, AudioCommand, AudioSink, CommandSink, MediaSynchronizer};
pub use reveal::{RevealAnimator, RevealStyle};
pub use scroll::{InputDisposition, SmoothScroll, SmoothScrollConfig};
pub use section::{Background, SectionFrame, SectionRenderer};
pub use visibility::{GeometryObserver, ReportedObserver, VisibilityObserver, VisibilityState};

// Extensions: easing curves
pub use extensions::{Easing, lerp, lerp_vec2};
