// visibility/observer.rs
//
// Visibility observation as a capability: a section is registered with a
// threshold and margin, and the observer yields a stream of crossings.
// Two sources: geometry polling against the page layout, and ratios
// reported by the host (e.g. a browser IntersectionObserver).

use crate::api::types::SectionId;
use crate::core::layout::{PageLayout, SectionRect, Viewport};
use crate::error::Degradation;

/// Fractions of the viewport height the root is shrunk by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: f64,
    pub bottom: f64,
}

impl RootMargin {
    /// Shrink top and bottom by the same fraction.
    pub fn symmetric(fraction: f64) -> Self {
        Self {
            top: fraction,
            bottom: fraction,
        }
    }
}

/// When a section counts as visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverConfig {
    /// Intersection ratio at or above which the section is visible.
    pub threshold: f32,
    pub root_margin: RootMargin,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            root_margin: RootMargin::symmetric(0.10),
        }
    }
}

/// One threshold crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityChange {
    pub section: SectionId,
    pub visible: bool,
}

/// Fraction of `rect` inside the margin-shrunk viewport at `scroll_y`,
/// measured against the section's own height as IntersectionObserver does.
pub fn intersection_ratio(
    rect: SectionRect,
    scroll_y: f64,
    viewport: Viewport,
    margin: RootMargin,
) -> f32 {
    let root_top = scroll_y + margin.top * viewport.height;
    let root_bottom = scroll_y + viewport.height - margin.bottom * viewport.height;
    let overlap = (rect.bottom().min(root_bottom) - rect.top.max(root_top)).max(0.0);
    if rect.height <= 0.0 {
        return 0.0;
    }
    (overlap / rect.height).clamp(0.0, 1.0) as f32
}

/// Observation capability. Implementations must stop yielding changes for
/// a target once it is unobserved, and for everything once stopped.
pub trait VisibilityObserver {
    /// Start tracking a section.
    fn observe(&mut self, target: SectionId, config: ObserverConfig);

    /// Release a section. Unknown targets are ignored.
    fn unobserve(&mut self, target: SectionId);

    /// Collect crossings since the last poll.
    fn poll(&mut self, scroll_y: f64, layout: &PageLayout) -> Vec<VisibilityChange>;

    /// Release every target. No further changes are produced.
    fn stop(&mut self);

    fn is_observing(&self, target: SectionId) -> bool;

    /// Targets that could not be measured since the last call.
    fn drain_missing(&mut self) -> Vec<SectionId> {
        Vec::new()
    }
}

#[derive(Debug, Clone)]
struct Target {
    id: SectionId,
    config: ObserverConfig,
    visible: bool,
}

fn upsert(targets: &mut Vec<Target>, id: SectionId, config: ObserverConfig) {
    match targets.iter_mut().find(|t| t.id == id) {
        Some(t) => t.config = config,
        None => targets.push(Target {
            id,
            config,
            visible: false,
        }),
    }
}

/// Computes visibility from the page layout every poll.
#[derive(Debug, Default)]
pub struct GeometryObserver {
    targets: Vec<Target>,
    missing: Vec<SectionId>,
}

impl GeometryObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VisibilityObserver for GeometryObserver {
    fn observe(&mut self, target: SectionId, config: ObserverConfig) {
        upsert(&mut self.targets, target, config);
    }

    fn unobserve(&mut self, target: SectionId) {
        self.targets.retain(|t| t.id != target);
    }

    fn poll(&mut self, scroll_y: f64, layout: &PageLayout) -> Vec<VisibilityChange> {
        let viewport = layout.viewport();
        let mut changes = Vec::new();
        for target in &mut self.targets {
            let Some(rect) = layout.rect(target.id) else {
                if !self.missing.contains(&target.id) {
                    self.missing.push(target.id);
                }
                continue;
            };
            let ratio = intersection_ratio(rect, scroll_y, viewport, target.config.root_margin);
            let visible = ratio >= target.config.threshold;
            if visible != target.visible {
                target.visible = visible;
                changes.push(VisibilityChange {
                    section: target.id,
                    visible,
                });
            }
        }
        changes
    }

    fn stop(&mut self) {
        self.targets.clear();
        self.missing.clear();
    }

    fn is_observing(&self, target: SectionId) -> bool {
        self.targets.iter().any(|t| t.id == target)
    }

    fn drain_missing(&mut self) -> Vec<SectionId> {
        std::mem::take(&mut self.missing)
    }
}

/// Buffers ratios pushed in by the host and turns them into crossings.
#[derive(Debug, Default)]
pub struct ReportedObserver {
    targets: Vec<Target>,
    pending: Vec<VisibilityChange>,
}

impl ReportedObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed an intersection ratio for a section.
    pub fn report(&mut self, target: SectionId, ratio: f32) -> Result<(), Degradation> {
        let Some(t) = self.targets.iter_mut().find(|t| t.id == target) else {
            return Err(Degradation::ObservationTargetMissing(target));
        };
        let visible = ratio >= t.config.threshold;
        if visible != t.visible {
            t.visible = visible;
            self.pending.push(VisibilityChange {
                section: target,
                visible,
            });
        }
        Ok(())
    }
}

impl VisibilityObserver for ReportedObserver {
    fn observe(&mut self, target: SectionId, config: ObserverConfig) {
        upsert(&mut self.targets, target, config);
    }

    fn unobserve(&mut self, target: SectionId) {
        self.targets.retain(|t| t.id != target);
        self.pending.retain(|c| c.section != target);
    }

    fn poll(&mut self, _scroll_y: f64, _layout: &PageLayout) -> Vec<VisibilityChange> {
        std::mem::take(&mut self.pending)
    }

    fn stop(&mut self) {
        self.targets.clear();
        self.pending.clear();
    }

    fn is_observing(&self, target: SectionId) -> bool {
        self.targets.iter().any(|t| t.id == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VH: f64 = 1000.0;

    fn layout(n: usize) -> PageLayout {
        PageLayout::new(n, Viewport::new(600.0, VH))
    }

    #[test]
    fn ratio_of_section_in_shrunk_root() {
        let rect = SectionRect { top: 0.0, height: VH };
        let r = intersection_ratio(rect, 0.0, Viewport::new(600.0, VH), RootMargin::symmetric(0.1));
        // Root is 800px tall, so 800 of the section's 1000px are inside.
        assert!((r - 0.8).abs() < 1e-6);
    }

    #[test]
    fn ratio_uses_section_height_like_the_browser() {
        let viewport = Viewport::new(600.0, VH);
        let margin = RootMargin::symmetric(0.1);
        let rect = SectionRect { top: VH, height: VH };
        let r = intersection_ratio(rect, 450.0, viewport, margin);
        assert!((r - 0.35).abs() < 1e-6);

        // Filling the root is still under threshold for a three-viewport section.
        let tall = SectionRect { top: 0.0, height: 3.0 * VH };
        let r = intersection_ratio(tall, VH, viewport, margin);
        assert!((r - 0.8 / 3.0).abs() < 1e-6);
        assert!(r < ObserverConfig::default().threshold);
    }

    #[test]
    fn ratio_zero_when_off_screen() {
        let rect = SectionRect { top: 2.0 * VH, height: VH };
        let r = intersection_ratio(rect, 0.0, Viewport::new(600.0, VH), RootMargin::symmetric(0.1));
        assert_eq!(r, 0.0);
    }

    #[test]
    fn geometry_emits_only_crossings() {
        let layout = layout(3);
        let mut obs = GeometryObserver::new();
        for i in 0..3 {
            obs.observe(SectionId(i), ObserverConfig::default());
        }

        let first = obs.poll(0.0, &layout);
        assert_eq!(first, vec![VisibilityChange { section: SectionId(0), visible: true }]);
        assert!(obs.poll(10.0, &layout).is_empty());

        let changes = obs.poll(VH, &layout);
        assert!(changes.contains(&VisibilityChange { section: SectionId(0), visible: false }));
        assert!(changes.contains(&VisibilityChange { section: SectionId(1), visible: true }));
    }

    #[test]
    fn threshold_crossed_in_both_directions() {
        let layout = layout(2);
        let mut obs = GeometryObserver::new();
        obs.observe(SectionId(1), ObserverConfig::default());
        // Section 1 top at 1000; root spans [s+100, s+900]. Overlap = s - 100.
        // Visible once overlap >= 0.4 * 1000 = 400, i.e. s >= 500.
        assert!(obs.poll(490.0, &layout).is_empty());
        assert_eq!(obs.poll(510.0, &layout).len(), 1);
        assert_eq!(
            obs.poll(400.0, &layout),
            vec![VisibilityChange { section: SectionId(1), visible: false }]
        );
    }

    #[test]
    fn unobserved_and_stopped_targets_are_silent() {
        let layout = layout(2);
        let mut obs = GeometryObserver::new();
        obs.observe(SectionId(0), ObserverConfig::default());
        obs.observe(SectionId(1), ObserverConfig::default());
        obs.unobserve(SectionId(0));
        assert!(obs.poll(0.0, &layout).is_empty());
        obs.stop();
        assert!(!obs.is_observing(SectionId(1)));
        assert!(obs.poll(VH, &layout).is_empty());
    }

    #[test]
    fn missing_layout_rect_is_noted_not_fatal() {
        let layout = layout(1);
        let mut obs = GeometryObserver::new();
        obs.observe(SectionId(5), ObserverConfig::default());
        assert!(obs.poll(0.0, &layout).is_empty());
        assert_eq!(obs.drain_missing(), vec![SectionId(5)]);
    }

    #[test]
    fn reported_ratios_become_crossings() {
        let layout = layout(1);
        let mut obs = ReportedObserver::new();
        obs.observe(SectionId(0), ObserverConfig::default());
        obs.report(SectionId(0), 0.2).unwrap();
        obs.report(SectionId(0), 0.5).unwrap();
        obs.report(SectionId(0), 0.9).unwrap();
        assert_eq!(
            obs.poll(0.0, &layout),
            vec![VisibilityChange { section: SectionId(0), visible: true }]
        );
        assert!(obs.poll(0.0, &layout).is_empty());
    }

    #[test]
    fn report_for_unknown_target_degrades() {
        let mut obs = ReportedObserver::new();
        assert_eq!(
            obs.report(SectionId(3), 1.0),
            Err(Degradation::ObservationTargetMissing(SectionId(3)))
        );
    }
}
