use scrollstory::{
    CommandSink, ContentStore, Degradation, FrameClock, InputDisposition, InputEvent, Page,
    PageConfig, ReportedObserver, SectionId,
};

/// Drives one story page from browser callbacks.
///
/// The host forwards DOM events and `requestAnimationFrame` timestamps,
/// measures intersections itself, and after each call replays the queued
/// audio commands against its `<audio>` element.
pub struct PageRunner {
    page: Page<ReportedObserver, CommandSink>,
    clock: FrameClock,
    /// Encoded audio commands, refilled on every read.
    audio_buffer: Vec<f32>,
}

impl PageRunner {
    pub fn new(content: ContentStore, config: PageConfig) -> Self {
        Self {
            page: Page::with_parts(content, config, ReportedObserver::new(), CommandSink::new()),
            clock: FrameClock::new(),
            audio_buffer: Vec::with_capacity(16),
        }
    }

    /// Run one frame at the animation-frame timestamp `now_ms`.
    pub fn tick(&mut self, now_ms: f64) {
        let dt = self.clock.delta(now_ms);
        self.page.tick(dt);
    }

    /// Apply an input event now. Returns true when the host should
    /// suppress the browser's default handling.
    pub fn input(&mut self, event: InputEvent) -> bool {
        self.page.handle_input(event) == InputDisposition::Consumed
    }

    pub fn page(&self) -> &Page<ReportedObserver, CommandSink> {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page<ReportedObserver, CommandSink> {
        &mut self.page
    }

    pub fn report_intersection(&mut self, index: u32, ratio: f32) {
        self.page.report_intersection(SectionId(index), ratio);
    }

    /// Encode pending audio commands and return them as (opcode, arg) pairs.
    pub fn take_audio_commands(&mut self) -> &[f32] {
        self.page.sink_mut().drain_encoded(&mut self.audio_buffer);
        &self.audio_buffer
    }

    pub fn take_degradations(&mut self) -> Vec<Degradation> {
        self.page.drain_degradations()
    }

    pub fn teardown(&mut self) {
        self.page.teardown();
        self.clock.reset();
    }

    // ---- Frame buffer accessors ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.page.frame().as_ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.page.frame().layout().buffer_total_floats as u32
    }

    pub fn section_count(&self) -> u32 {
        self.page.frame().layout().section_count as u32
    }

    pub fn max_lines(&self) -> u32 {
        self.page.frame().layout().max_lines as u32
    }

    pub fn section_data_offset(&self) -> u32 {
        self.page.frame().layout().section_data_offset as u32
    }

    pub fn line_data_offset(&self) -> u32 {
        self.page.frame().layout().line_data_offset as u32
    }

    // ---- Per-section strings ----

    pub fn section_label(&self, index: u32) -> String {
        self.page
            .section(SectionId(index))
            .map(|s| s.label().to_string())
            .unwrap_or_default()
    }

    pub fn section_background_css(&self, index: u32) -> String {
        self.page
            .section(SectionId(index))
            .map(|s| s.background().to_css())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollstory::media::sink::{OP_PLAY, OP_SET_VOLUME};

    fn runner() -> PageRunner {
        PageRunner::new(ContentStore::default_story().unwrap(), PageConfig::default())
    }

    #[test]
    fn first_click_and_visible_opening_start_playback() {
        let mut r = runner();
        r.report_intersection(0, 1.0);
        r.tick(1000.0);
        assert!(r.take_audio_commands().is_empty());

        assert!(!r.input(InputEvent::PointerDown { x: 0.0, y: 0.0 }));
        let commands = r.take_audio_commands().to_vec();
        assert_eq!(commands, vec![OP_SET_VOLUME, 0.0, OP_PLAY, 0.0]);
        assert!(r.take_audio_commands().is_empty());
    }

    #[test]
    fn wheel_is_consumed_until_teardown() {
        let mut r = runner();
        assert!(r.input(InputEvent::Wheel { delta_y: 120.0 }));
        r.teardown();
        assert!(!r.input(InputEvent::Wheel { delta_y: 120.0 }));
    }

    #[test]
    fn frame_clock_feeds_page_time() {
        let mut r = runner();
        r.tick(5000.0);
        r.tick(5016.0);
        assert_eq!(r.page().now_ms(), 16.0);
        assert_eq!(r.page().frame().header().frame_counter, 2.0);
    }

    #[test]
    fn section_strings() {
        let r = runner();
        assert_eq!(r.section_count(), 9);
        assert_eq!(r.section_label(8), "Section 9 of 9");
        assert!(r.section_background_css(0).starts_with("radial-gradient("));
        assert_eq!(r.section_label(42), "");
    }
}
