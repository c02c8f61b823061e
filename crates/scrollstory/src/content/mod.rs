pub mod manifest;
pub mod store;

pub use manifest::{AnimationConfig, AudioConfig, PageContent, SectionDescriptor, SiteConfig};
pub use store::ContentStore;
