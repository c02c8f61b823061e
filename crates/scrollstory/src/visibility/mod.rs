pub mod observer;
pub mod state;

pub use observer::{
    intersection_ratio, GeometryObserver, ObserverConfig, ReportedObserver, RootMargin,
    VisibilityChange, VisibilityObserver,
};
pub use state::VisibilityState;
