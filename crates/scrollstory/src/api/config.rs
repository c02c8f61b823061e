use crate::core::layout::Viewport;
use crate::effects::grain::GRAIN_FRAME_MS;
use crate::media::sync::MediaConfig;
use crate::scroll::smooth::SmoothScrollConfig;
use crate::visibility::observer::ObserverConfig;

/// Engine tunables, provided by the host at init.
///
/// Content-level settings (track volume, animation timings) live in the
/// content file; this carries the knobs that shape the engine itself.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Initial viewport until the host reports a resize.
    pub viewport: Viewport,
    /// Visibility threshold and root margin (default: 0.4, 10%).
    pub observer: ObserverConfig,
    pub scroll: SmoothScrollConfig,
    /// Fade timings. `target_volume` is replaced by the content's audio volume.
    pub media: MediaConfig,
    /// Text lines exported per section; longer text is truncated in the
    /// frame buffer (default: longest section in the content, at least 1).
    pub max_lines: Option<usize>,
    /// How long a film grain frame is held (default: 800 ms).
    pub grain_frame_ms: f64,
    pub grain_seed: u64,
    /// Degradations kept for the host to inspect (default: 32).
    pub degradation_capacity: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            observer: ObserverConfig::default(),
            scroll: SmoothScrollConfig::default(),
            media: MediaConfig::default(),
            max_lines: None,
            grain_frame_ms: GRAIN_FRAME_MS,
            grain_seed: 0x5EED,
            degradation_capacity: 32,
        }
    }
}
