use crate::api::config::PageConfig;
use crate::api::types::SectionId;
use crate::bridge::protocol::{
    kind_code, FrameBuffer, FrameHeader, FrameLayout, SectionRecord, StyleRecord,
    FLAG_AMBIENT_GLOW, FLAG_HAS_IMAGE, FLAG_HAS_INDICATOR, PROTOCOL_VERSION,
};
use crate::content::store::ContentStore;
use crate::core::layout::{PageLayout, Viewport};
use crate::effects::grain::FilmGrain;
use crate::error::{Degradation, DegradationLog};
use crate::input::queue::{InputEvent, InputQueue};
use crate::media::sink::{AudioSink, CommandSink};
use crate::media::sync::{AudioChannelState, MediaConfig, MediaSynchronizer};
use crate::reveal::preset::PresetBook;
use crate::scroll::smooth::{InputDisposition, SmoothScroll};
use crate::section::image::ImageState;
use crate::section::renderer::SectionRenderer;
use crate::visibility::observer::{GeometryObserver, ReportedObserver, VisibilityObserver};

/// The whole story page: content, scroll driver, visibility, audio and
/// per-section reveal state, stepped once per animation frame by the host.
///
/// Generic over the visibility source and the audio sink so the same page
/// runs against host-reported intersections in the browser and against
/// layout geometry in tests.
pub struct Page<O: VisibilityObserver = GeometryObserver, S: AudioSink = CommandSink> {
    content: ContentStore,
    config: PageConfig,
    layout: PageLayout,
    observer: O,
    scroll: SmoothScroll,
    media: MediaSynchronizer,
    sink: S,
    sections: Vec<SectionRenderer>,
    grain: FilmGrain,
    input: InputQueue,
    degradations: DegradationLog,
    frame: FrameBuffer,
    frame_counter: u64,
    /// Page time in milliseconds, advanced by `tick`.
    now_ms: f64,
    audio_enabled: bool,
    torn_down: bool,
}

impl Page<GeometryObserver, CommandSink> {
    /// Page that derives visibility from its own layout.
    pub fn new(content: ContentStore, config: PageConfig) -> Self {
        Self::with_parts(content, config, GeometryObserver::new(), CommandSink::new())
    }
}

impl<S: AudioSink> Page<ReportedObserver, S> {
    /// Host-measured intersection ratio for a section.
    pub fn report_intersection(&mut self, id: SectionId, ratio: f32) {
        if self.torn_down {
            return;
        }
        if let Err(degradation) = self.observer.report(id, ratio) {
            self.degradations.record(degradation);
        }
    }
}

impl<O: VisibilityObserver, S: AudioSink> Page<O, S> {
    pub fn with_parts(content: ContentStore, config: PageConfig, mut observer: O, sink: S) -> Self {
        let book = PresetBook::new(content.animation().clone());
        let total = content.len();
        let sections: Vec<SectionRenderer> = content
            .iter()
            .map(|(id, descriptor)| SectionRenderer::new(id, descriptor, total, &book))
            .collect();
        for section in &sections {
            observer.observe(section.id(), config.observer);
        }

        let layout = PageLayout::new(total, config.viewport);
        let scroll = SmoothScroll::new(config.scroll.clone(), layout.scroll_limit());
        let audio = &content.site().audio;
        let media = MediaSynchronizer::new(MediaConfig {
            target_volume: audio.volume,
            ..config.media.clone()
        });
        let audio_enabled = audio.enabled;
        let max_lines = config.max_lines.unwrap_or_else(|| content.max_lines()).max(1);
        let frame = FrameBuffer::new(FrameLayout::new(total, max_lines));
        let grain = FilmGrain::new(config.grain_seed, config.grain_frame_ms);
        let degradations = DegradationLog::new(config.degradation_capacity);

        log::info!(
            "page '{}' ready: {} sections, audio {}",
            content.site().title,
            total,
            if audio_enabled { "on" } else { "off" }
        );

        let mut page = Self {
            content,
            config,
            layout,
            observer,
            scroll,
            media,
            sink,
            sections,
            grain,
            input: InputQueue::new(),
            degradations,
            frame,
            frame_counter: 0,
            now_ms: 0.0,
            audio_enabled,
            torn_down: false,
        };
        page.build_frame();
        page
    }

    // ---- Input ----

    /// Queue an event for the next `tick`.
    pub fn push_input(&mut self, event: InputEvent) {
        if !self.torn_down {
            self.input.push(event);
        }
    }

    /// Apply an event now. Hosts that must decide on `preventDefault` or
    /// need `play()` inside the gesture handler call this directly.
    pub fn handle_input(&mut self, event: InputEvent) -> InputDisposition {
        if self.torn_down {
            return InputDisposition::Native;
        }
        let disposition = match event {
            InputEvent::Wheel { delta_y } => self.scroll.wheel(delta_y),
            InputEvent::TouchStart { y } => self.scroll.touch_start(y),
            InputEvent::TouchMove { y } => self.scroll.touch_move(y),
            InputEvent::TouchEnd => {
                self.scroll.touch_end();
                InputDisposition::Native
            }
            InputEvent::KeyDown { key_code } => {
                self.scroll.key(key_code, self.layout.viewport().height)
            }
            InputEvent::PointerDown { .. } => InputDisposition::Native,
            InputEvent::Resize { width, height } => {
                self.resize(Viewport::new(width as f64, height as f64));
                InputDisposition::Native
            }
        };
        if let Some(kind) = event.interaction() {
            if let Some(degradation) = self.media.on_interaction(kind, &mut self.sink) {
                self.degradations.record(degradation);
            }
        }
        disposition
    }

    // ---- Frame ----

    /// Advance the page by `dt_ms` and rebuild the frame buffer.
    pub fn tick(&mut self, dt_ms: f64) {
        if self.torn_down {
            return;
        }
        let dt_ms = dt_ms.max(0.0);
        self.now_ms += dt_ms;

        // Ramps started during this frame begin counting next frame.
        self.media.tick(dt_ms, &mut self.sink);

        for event in self.input.drain() {
            self.handle_input(event);
        }

        let scroll_y = self.scroll.tick(dt_ms);
        for change in self.observer.poll(scroll_y, &self.layout) {
            if let Some(section) = self.sections.get_mut(change.section.index()) {
                section.on_visibility(change.visible, self.now_ms);
            }
        }
        for id in self.observer.drain_missing() {
            self.degradations.record(Degradation::ObservationTargetMissing(id));
        }

        let audible = self.audio_enabled
            && self.sections.iter().any(|s| {
                s.is_mounted()
                    && s.visibility().is_visible()
                    && self.content.is_audio_bearing(s.id())
            });
        if let Some(degradation) = self.media.set_audible(audible, &mut self.sink) {
            self.degradations.record(degradation);
        }

        for section in &mut self.sections {
            section.tick(dt_ms);
        }
        self.grain.tick(dt_ms);

        self.frame_counter += 1;
        self.build_frame();
    }

    fn build_frame(&mut self) {
        let scroll_y = self.scroll.position();
        let viewport = self.layout.viewport();
        let state = self.media.state();
        let grain = self.grain.offset();
        let active = self
            .sections
            .iter()
            .position(|s| s.is_mounted() && s.visibility().is_visible())
            .map_or(-1.0, |i| i as f32);

        self.frame.write_header(&FrameHeader {
            protocol_version: PROTOCOL_VERSION,
            frame_counter: self.frame_counter as f32,
            section_count: self.sections.len() as f32,
            max_lines: self.frame.layout().max_lines as f32,
            scroll_y: scroll_y as f32,
            scroll_limit: self.scroll.limit() as f32,
            viewport_width: viewport.width as f32,
            viewport_height: viewport.height as f32,
            volume: if state.muted { 0.0 } else { state.current_volume },
            target_volume: state.target_volume,
            playing: flag(state.playing),
            muted: flag(state.muted),
            unlocked: flag(state.interaction_observed),
            grain_x: grain.x,
            grain_y: grain.y,
            active_section: active,
        });

        let strength = self.content.animation().parallax_strength;
        let max_lines = self.frame.layout().max_lines;
        for (index, section) in self.sections.iter().enumerate() {
            let rect = self.layout.rect(section.id());
            let frame = section.frame(self.now_ms, rect, scroll_y, viewport, strength);
            let image_state = frame.image_state.unwrap_or(ImageState::Loading);

            let mut flags = 0;
            if frame.image_state.is_some() {
                flags |= FLAG_HAS_IMAGE;
            }
            if frame.styles.indicator.is_some() {
                flags |= FLAG_HAS_INDICATOR;
            }
            if section.has_ambient_glow() {
                flags |= FLAG_AMBIENT_GLOW;
            }

            let line_count = frame.styles.lines.len().min(max_lines);
            self.frame.write_section(
                index,
                &SectionRecord {
                    visible: flag(frame.is_visible),
                    revealed: flag(frame.has_ever_been_visible),
                    kind: kind_code(section.kind()),
                    background: section.background().code(),
                    image_state: image_state.code(),
                    image_aspect: match image_state {
                        ImageState::Loaded { aspect } => aspect,
                        _ => 0.0,
                    },
                    corner_radius: image_state.corner_radius(),
                    parallax: frame.parallax_percent,
                    top: rect.map_or(0.0, |r| r.top as f32),
                    height: rect.map_or(0.0, |r| r.height as f32),
                    line_count: line_count as f32,
                    flags: flags as f32,
                    text: frame.styles.text.into(),
                    image: frame.styles.image.map(StyleRecord::from).unwrap_or_default(),
                    indicator: frame
                        .styles
                        .indicator
                        .map(StyleRecord::from)
                        .unwrap_or_default(),
                },
            );
            for (line, style) in frame.styles.lines.iter().take(line_count).enumerate() {
                self.frame.write_line(index, line, &StyleRecord::from(*style));
            }
        }
    }

    // ---- Host notifications ----

    pub fn resize(&mut self, viewport: Viewport) {
        if self.torn_down {
            return;
        }
        self.layout.resize(viewport);
        self.scroll.set_limit(self.layout.scroll_limit());
        log::debug!("resized to {}x{}", viewport.width, viewport.height);
    }

    /// Rendered height of a section. Returns false for an unknown section.
    pub fn set_section_height(&mut self, id: SectionId, height: f64) -> bool {
        if self.torn_down || !self.layout.set_measured_height(id, height) {
            return false;
        }
        self.scroll.set_limit(self.layout.scroll_limit());
        true
    }

    pub fn image_loaded(&mut self, id: SectionId, width: f32, height: f32) {
        let degradation = self
            .sections
            .get_mut(id.index())
            .and_then(|s| s.image_loaded(width, height));
        if let Some(degradation) = degradation {
            self.degradations.record(degradation);
        }
    }

    pub fn image_failed(&mut self, id: SectionId) {
        let degradation = self.sections.get_mut(id.index()).and_then(|s| s.image_failed());
        if let Some(degradation) = degradation {
            self.degradations.record(degradation);
        }
    }

    /// The host's `play()` promise rejected.
    pub fn playback_rejected(&mut self, reason: &str) {
        if self.torn_down {
            return;
        }
        let degradation = self.media.on_playback_rejected(reason);
        self.degradations.record(degradation);
    }

    /// Flip the mute flag. Returns the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.media.toggle_mute(&mut self.sink)
    }

    // ---- Scroll control ----

    pub fn scroll_to(&mut self, y: f64, immediate: bool) {
        self.scroll.scroll_to(y, immediate);
    }

    /// Scroll so the section's top meets the viewport top.
    pub fn scroll_to_section(&mut self, id: SectionId, immediate: bool) -> bool {
        match self.layout.rect(id) {
            Some(rect) => {
                self.scroll.scroll_to(rect.top, immediate);
                true
            }
            None => false,
        }
    }

    pub fn stop_scroll(&mut self) {
        self.scroll.stop();
    }

    pub fn start_scroll(&mut self) {
        self.scroll.start();
    }

    /// Take one section off the page: its observation is released, it stops
    /// counting as visible and its reveal state stops updating. Returns false for an unknown section.
    pub fn unmount_section(&mut self, id: SectionId) -> bool {
        let Some(section) = self.sections.get_mut(id.index()) else {
            return false;
        };
        self.observer.unobserve(id);
        section.unmount();
        true
    }

    /// Leave the page. Cancels the scroll loop, every observation and any
    /// audio ramp in flight; nothing reaches the sink afterwards.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.scroll.destroy();
        self.observer.stop();
        for section in &mut self.sections {
            section.unmount();
        }
        self.media.teardown(&mut self.sink);
        self.grain.stop();
        self.input.drain();
        self.torn_down = true;
        log::info!("page torn down after {} frames", self.frame_counter);
    }

    // ---- Accessors ----

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn scroll(&self) -> &SmoothScroll {
        &self.scroll
    }

    pub fn audio(&self) -> AudioChannelState {
        self.media.state()
    }

    pub fn media(&self) -> &MediaSynchronizer {
        &self.media
    }

    pub fn section(&self, id: SectionId) -> Option<&SectionRenderer> {
        self.sections.get(id.index())
    }

    pub fn sections(&self) -> &[SectionRenderer] {
        &self.sections
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn degradations(&self) -> &DegradationLog {
        &self.degradations
    }

    pub fn drain_degradations(&mut self) -> Vec<Degradation> {
        self.degradations.drain()
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ramp::RampDirection;
    use crate::media::sink::AudioCommand;

    const VH: f64 = 1000.0;

    /// Opening carries the track; the rest are silent.
    const SHORT_STORY: &str = r#"{
        "site": {
            "title": "Test",
            "description": "",
            "audio": { "src": "/audio/t.mp3", "volume": 0.5 }
        },
        "sections": [
            { "id": "a", "type": "opening", "text": "Hello\nthere", "music": "/audio/t.mp3" },
            { "id": "b", "type": "photo", "text": "A photo", "image": "/img/b.jpg", "alt": "b" },
            { "id": "c", "type": "closing", "text": "Goodbye" }
        ]
    }"#;

    fn config() -> PageConfig {
        PageConfig {
            viewport: Viewport::new(600.0, VH),
            ..PageConfig::default()
        }
    }

    fn short_page() -> Page {
        Page::new(ContentStore::from_json(SHORT_STORY).unwrap(), config())
    }

    fn plays(page: &Page) -> usize {
        page.sink()
            .commands()
            .iter()
            .filter(|c| **c == AudioCommand::Play)
            .count()
    }

    fn unlocked_and_playing() -> Page {
        let mut page = short_page();
        page.handle_input(InputEvent::PointerDown { x: 10.0, y: 10.0 });
        page.tick(16.0);
        assert!(page.audio().playing);
        page
    }

    #[test]
    fn starts_locked_and_silent() {
        let page = short_page();
        let audio = page.audio();
        assert!(!audio.interaction_observed);
        assert_eq!(audio.current_volume, 0.0);
        assert_eq!(page.frame().header().section_count, 3.0);
        assert_eq!(page.scroll().limit(), 2000.0);
    }

    #[test]
    fn never_plays_before_interaction() {
        let mut page = short_page();
        for y in [0.0, 1000.0, 2000.0, 0.0] {
            page.scroll_to(y, true);
            for _ in 0..20 {
                page.tick(50.0);
            }
        }
        assert_eq!(plays(&page), 0);
        assert_eq!(page.media().play_attempts(), 0);
        assert!(page.section(SectionId(0)).unwrap().visibility().is_visible());
    }

    #[test]
    fn resize_is_not_an_interaction() {
        let mut page = short_page();
        page.handle_input(InputEvent::Resize { width: 800.0, height: 600.0 });
        page.tick(16.0);
        assert!(!page.audio().interaction_observed);
        assert_eq!(page.scroll().limit(), 3.0 * 600.0 - 600.0);
    }

    #[test]
    fn has_ever_been_visible_is_sticky() {
        let mut page = short_page();
        page.tick(16.0);
        for y in [1000.0, 2000.0, 0.0, 2000.0] {
            page.scroll_to(y, true);
            page.tick(16.0);
        }
        for section in page.sections() {
            assert!(section.visibility().has_ever_been_visible());
        }
        assert!(!page.section(SectionId(0)).unwrap().visibility().is_visible());
        let record = page.frame().section(0).unwrap();
        assert_eq!(record.visible, 0.0);
        assert_eq!(record.revealed, 1.0);
    }

    #[test]
    fn fade_in_reaches_target_in_25_ticks() {
        let mut page = unlocked_and_playing();
        assert_eq!(page.audio().current_volume, 0.0);
        let mut last = 0.0;
        for tick in 1..=25 {
            page.tick(50.0);
            let volume = page.audio().current_volume;
            assert!(volume >= last, "tick {tick}: {volume} < {last}");
            assert!(volume <= 0.5, "tick {tick}: {volume} overshoots");
            if tick < 25 {
                assert!(volume < 0.5);
            }
            last = volume;
        }
        assert!((page.audio().current_volume - 0.5).abs() < 1e-6);
        assert_eq!(page.audio().ramp, None);
        assert!((page.frame().header().volume - 0.5).abs() < 1e-6);
    }

    #[test]
    fn leaving_audio_section_fades_out_then_pauses_and_rewinds() {
        let mut page = unlocked_and_playing();
        for _ in 0..25 {
            page.tick(50.0);
        }
        page.sink_mut().drain();

        page.scroll_to(2000.0, true);
        page.tick(30.0);
        assert_eq!(page.audio().ramp, Some(RampDirection::Out));
        for _ in 0..24 {
            page.tick(30.0);
            assert!(page.audio().playing);
        }
        page.tick(30.0);

        let audio = page.audio();
        assert_eq!(audio.current_volume, 0.0);
        assert!(!audio.playing);
        assert!(audio.playback_started);
        let tail: Vec<_> = page.sink().commands().iter().rev().take(2).copied().collect();
        assert_eq!(tail, vec![AudioCommand::Rewind, AudioCommand::Pause]);
    }

    #[test]
    fn fade_in_cancels_fade_out_in_flight() {
        let mut page = unlocked_and_playing();
        for _ in 0..25 {
            page.tick(50.0);
        }
        page.scroll_to(2000.0, true);
        for _ in 0..5 {
            page.tick(30.0);
        }
        assert_eq!(page.audio().ramp, Some(RampDirection::Out));

        page.scroll_to(0.0, true);
        page.tick(30.0);
        assert_eq!(page.audio().ramp, Some(RampDirection::In));
        assert_eq!(page.audio().current_volume, 0.0);

        let mut last = 0.0;
        for _ in 0..30 {
            page.tick(50.0);
            let volume = page.audio().current_volume;
            assert!(volume >= last);
            last = volume;
        }
        assert!(page.audio().playing);
        assert!((last - 0.5).abs() < 1e-6);
    }

    #[test]
    fn teardown_mid_ramp_stops_all_writes() {
        let mut page = unlocked_and_playing();
        for _ in 0..10 {
            page.tick(50.0);
        }
        assert_eq!(page.audio().ramp, Some(RampDirection::In));

        page.teardown();
        page.sink_mut().drain();
        let volume = page.audio().current_volume;

        for _ in 0..50 {
            page.tick(50.0);
        }
        page.handle_input(InputEvent::Wheel { delta_y: 100.0 });
        page.toggle_mute();
        page.playback_rejected("late");

        assert!(page.sink().is_empty());
        assert_eq!(page.audio().current_volume, volume);
        assert!(page.scroll().is_destroyed());
        assert!(page.sections().iter().all(|s| !s.is_mounted()));
    }

    #[test]
    fn opening_text_opacity_rises_monotonically() {
        let mut page = Page::new(ContentStore::default_story().unwrap(), config());
        let mut samples = Vec::new();
        for _ in 0..200 {
            page.tick(16.0);
            samples.push(page.frame().section(0).unwrap().text.opacity);
        }
        assert_eq!(samples[0], 0.0);
        assert!(samples.iter().all(|o| (0.0..=1.0).contains(o)));
        assert!(samples.windows(2).all(|w| w[1] >= w[0]));
        assert!(*samples.last().unwrap() > 0.999);
    }

    #[test]
    fn wheel_is_consumed_and_unlocks() {
        let mut page = short_page();
        let disposition = page.handle_input(InputEvent::Wheel { delta_y: 500.0 });
        assert_eq!(disposition, InputDisposition::Consumed);
        assert!(page.audio().interaction_observed);
        for _ in 0..200 {
            page.tick(16.0);
        }
        assert!((page.scroll().position() - 400.0).abs() < 1e-6);
    }

    #[test]
    fn queued_input_applies_on_tick() {
        let mut page = short_page();
        page.push_input(InputEvent::KeyDown { key_code: 35 });
        assert!(!page.audio().interaction_observed);
        page.tick(16.0);
        assert!(page.audio().interaction_observed);
        assert_eq!(page.scroll().target(), 2000.0);
    }

    #[test]
    fn playback_rejection_retries_on_next_interaction() {
        let mut page = unlocked_and_playing();
        page.playback_rejected("NotAllowedError");
        assert!(!page.audio().playing);
        assert!(page.media().is_retry_pending());
        assert_eq!(
            page.drain_degradations(),
            vec![Degradation::PlaybackRejected("NotAllowedError".into())]
        );

        page.handle_input(InputEvent::TouchStart { y: 0.0 });
        assert!(page.audio().playing);
        assert_eq!(plays(&page), 2);
    }

    #[test]
    fn mute_zeroes_exported_volume_only() {
        let mut page = unlocked_and_playing();
        for _ in 0..25 {
            page.tick(50.0);
        }
        assert!(page.toggle_mute());
        page.tick(16.0);
        let header = page.frame().header();
        assert_eq!(header.volume, 0.0);
        assert_eq!(header.muted, 1.0);
        assert!((page.audio().current_volume - 0.5).abs() < 1e-6);
        assert_eq!(page.sink().commands().last(), Some(&AudioCommand::SetVolume(0.0)));
    }

    #[test]
    fn image_events_update_frame_and_log() {
        let mut page = short_page();
        page.image_loaded(SectionId(1), 600.0, 900.0);
        page.tick(16.0);
        let record = page.frame().section(1).unwrap();
        assert_eq!(record.image_state, 1.0);
        assert_eq!(record.corner_radius, 28.0);
        assert_ne!((record.flags as u32) & FLAG_HAS_IMAGE, 0);

        page.image_failed(SectionId(1));
        assert_eq!(
            page.drain_degradations(),
            vec![Degradation::AssetMissing("/img/b.jpg".into())]
        );
    }

    #[test]
    fn lines_are_exported_per_section() {
        let mut page = short_page();
        assert_eq!(page.frame().layout().max_lines, 2);
        page.tick(16.0);
        assert_eq!(page.frame().section(0).unwrap().line_count, 2.0);
        assert_eq!(page.frame().section(2).unwrap().line_count, 1.0);
        assert!(page.frame().line(0, 1).is_some());
    }

    #[test]
    fn measured_height_extends_scroll_limit() {
        let mut page = short_page();
        assert!(page.set_section_height(SectionId(1), 1500.0));
        assert_eq!(page.scroll().limit(), 2500.0);
        assert!(!page.set_section_height(SectionId(9), 1500.0));
        assert!(page.scroll_to_section(SectionId(2), true));
        assert_eq!(page.scroll().position(), 2500.0);
    }

    #[test]
    fn unmounted_section_stops_observing() {
        let mut page = short_page();
        assert!(page.unmount_section(SectionId(0)));
        page.tick(16.0);
        let opening = page.section(SectionId(0)).unwrap();
        assert!(!opening.is_mounted());
        assert!(!opening.visibility().has_ever_been_visible());
        assert!(!page.unmount_section(SectionId(3)));
    }

    #[test]
    fn unmounting_playing_section_fades_audio_out() {
        let mut page = unlocked_and_playing();
        for _ in 0..25 {
            page.tick(50.0);
        }
        assert_eq!(page.frame().header().active_section, 0.0);

        assert!(page.unmount_section(SectionId(0)));
        page.tick(30.0);
        assert_eq!(page.audio().ramp, Some(RampDirection::Out));
        assert_eq!(page.frame().header().active_section, -1.0);

        for _ in 0..25 {
            page.tick(30.0);
        }
        let audio = page.audio();
        assert!(!audio.playing);
        assert_eq!(audio.current_volume, 0.0);

        let opening = page.section(SectionId(0)).unwrap();
        assert!(!opening.visibility().is_visible());
        assert!(opening.visibility().has_ever_been_visible());
        assert_eq!(page.frame().section(0).unwrap().revealed, 1.0);
    }

    #[test]
    fn reported_observer_drives_visibility() {
        let content = ContentStore::from_json(SHORT_STORY).unwrap();
        let mut page =
            Page::with_parts(content, config(), ReportedObserver::new(), CommandSink::new());
        page.report_intersection(SectionId(1), 0.6);
        page.tick(16.0);
        assert!(page.section(SectionId(1)).unwrap().visibility().is_visible());
        assert!(!page.section(SectionId(0)).unwrap().visibility().is_visible());
        assert_eq!(page.frame().header().active_section, 1.0);

        page.report_intersection(SectionId(7), 1.0);
        assert_eq!(
            page.drain_degradations(),
            vec![Degradation::ObservationTargetMissing(SectionId(7))]
        );
    }
}
