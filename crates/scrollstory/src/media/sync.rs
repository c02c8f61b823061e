// media/sync.rs
//
// Media synchronizer: one background track for the whole page.
// Locked until the first user interaction; afterwards fades in while an
// audio-bearing section is visible and fades out (then pauses and rewinds)
// when none is. Only one ramp is ever active.

use crate::error::Degradation;
use crate::input::queue::Interaction;
use crate::media::ramp::{Ramp, RampDirection};
use crate::media::sink::AudioSink;

/// Fade timings and the volume the track settles at.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaConfig {
    pub target_volume: f32,
    pub fade_in_step: f32,
    pub fade_in_interval_ms: f64,
    pub fade_out_step: f32,
    pub fade_out_interval_ms: f64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            target_volume: 0.5,
            fade_in_step: 0.02,
            fade_in_interval_ms: 50.0,
            fade_out_step: 0.02,
            fade_out_interval_ms: 30.0,
        }
    }
}

/// Observable state of the background track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioChannelState {
    /// Audio has engaged at least once. Never reset.
    pub playback_started: bool,
    /// The element is currently playing.
    pub playing: bool,
    /// Always within `[0, target_volume]`.
    pub current_volume: f32,
    pub target_volume: f32,
    /// A qualifying interaction has happened. Never reset.
    pub interaction_observed: bool,
    pub muted: bool,
    /// Direction of the ramp in flight, if any.
    pub ramp: Option<RampDirection>,
}

impl AudioChannelState {
    fn new(target_volume: f32) -> Self {
        Self {
            playback_started: false,
            playing: false,
            current_volume: 0.0,
            target_volume,
            interaction_observed: false,
            muted: false,
            ramp: None,
        }
    }
}

pub struct MediaSynchronizer {
    config: MediaConfig,
    state: AudioChannelState,
    ramp: Option<Ramp>,
    /// Latest visibility verdict: should the track be audible.
    wanted: bool,
    /// A play attempt was rejected; the next interaction retries.
    retry_pending: bool,
    torn_down: bool,
    play_attempts: u32,
}

impl MediaSynchronizer {
    /// Locked, silent, nothing scheduled.
    pub fn new(config: MediaConfig) -> Self {
        let target = config.target_volume.clamp(0.0, 1.0);
        Self {
            state: AudioChannelState::new(target),
            config,
            ramp: None,
            wanted: false,
            retry_pending: false,
            torn_down: false,
            play_attempts: 0,
        }
    }

    pub fn state(&self) -> AudioChannelState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state.interaction_observed
    }

    pub fn is_retry_pending(&self) -> bool {
        self.retry_pending
    }

    /// Number of times `play` was asked of the sink.
    pub fn play_attempts(&self) -> u32 {
        self.play_attempts
    }

    /// A user interaction happened. The first one unlocks audio for good;
    /// any one retries a rejected start.
    pub fn on_interaction<S: AudioSink + ?Sized>(
        &mut self,
        kind: Interaction,
        sink: &mut S,
    ) -> Option<Degradation> {
        if self.torn_down {
            return None;
        }
        if !self.state.interaction_observed {
            self.state.interaction_observed = true;
            log::info!("audio unlocked by {:?}", kind);
            return if self.wanted { self.fade_in(sink) } else { None };
        }
        if self.retry_pending && self.wanted {
            log::debug!("retrying playback after {:?}", kind);
            return self.fade_in(sink);
        }
        None
    }

    /// Visibility verdict for the track. Only changes trigger fades.
    pub fn set_audible<S: AudioSink + ?Sized>(
        &mut self,
        audible: bool,
        sink: &mut S,
    ) -> Option<Degradation> {
        if self.torn_down || audible == self.wanted {
            return None;
        }
        self.wanted = audible;
        if !audible {
            self.fade_out();
            return None;
        }
        if self.state.interaction_observed {
            self.fade_in(sink)
        } else {
            None
        }
    }

    /// Start playback at volume 0 and ramp up to the target.
    fn fade_in<S: AudioSink + ?Sized>(&mut self, sink: &mut S) -> Option<Degradation> {
        self.cancel_ramp();
        if !self.state.interaction_observed {
            return None;
        }
        self.state.current_volume = 0.0;
        self.write_volume(sink);
        self.play_attempts += 1;
        match sink.play() {
            Ok(()) => {
                self.retry_pending = false;
                self.state.playback_started = true;
                self.state.playing = true;
                self.start_ramp(Ramp::fade_in(
                    0.0,
                    self.state.target_volume,
                    self.config.fade_in_step,
                    self.config.fade_in_interval_ms,
                ));
                None
            }
            Err(rejected) => Some(self.on_playback_rejected(rejected.0)),
        }
    }

    /// Ramp down to silence; pause and rewind once there.
    fn fade_out(&mut self) {
        self.cancel_ramp();
        if !self.state.playing {
            return;
        }
        self.start_ramp(Ramp::fade_out(
            self.state.current_volume,
            self.config.fade_out_step,
            self.config.fade_out_interval_ms,
        ));
    }

    /// The environment refused playback. Silence until the next interaction.
    pub fn on_playback_rejected(&mut self, reason: impl Into<String>) -> Degradation {
        self.cancel_ramp();
        self.state.playing = false;
        self.state.current_volume = 0.0;
        self.retry_pending = true;
        Degradation::PlaybackRejected(reason.into())
    }

    /// Advance the active ramp by a frame.
    pub fn tick<S: AudioSink + ?Sized>(&mut self, dt_ms: f64, sink: &mut S) {
        if self.torn_down {
            return;
        }
        let Some(ramp) = &mut self.ramp else {
            return;
        };
        let Some(step) = ramp.advance(dt_ms) else {
            return;
        };
        let direction = ramp.direction();
        self.state.current_volume = step.volume.clamp(0.0, self.state.target_volume);
        self.write_volume(sink);

        if step.finished {
            self.ramp = None;
            self.state.ramp = None;
            if direction == RampDirection::Out {
                sink.pause();
                sink.rewind();
                self.state.playing = false;
                log::debug!("audio faded out");
            } else {
                log::debug!("audio at {:.2}", self.state.current_volume);
            }
        }
    }

    /// Mute without disturbing ramp bookkeeping.
    pub fn set_muted<S: AudioSink + ?Sized>(&mut self, muted: bool, sink: &mut S) {
        if self.torn_down || self.state.muted == muted {
            return;
        }
        self.state.muted = muted;
        self.write_volume(sink);
    }

    pub fn toggle_mute<S: AudioSink + ?Sized>(&mut self, sink: &mut S) -> bool {
        let muted = !self.state.muted;
        self.set_muted(muted, sink);
        self.state.muted
    }

    /// Cancel pending ramp ticks and stop the track. Nothing is written
    /// to the sink after this returns.
    pub fn teardown<S: AudioSink + ?Sized>(&mut self, sink: &mut S) {
        if self.torn_down {
            return;
        }
        self.cancel_ramp();
        if self.state.playing {
            sink.pause();
            self.state.playing = false;
        }
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn start_ramp(&mut self, ramp: Ramp) {
        self.state.ramp = Some(ramp.direction());
        self.ramp = Some(ramp);
    }

    fn cancel_ramp(&mut self) {
        if let Some(mut ramp) = self.ramp.take() {
            ramp.cancel();
        }
        self.state.ramp = None;
    }

    fn write_volume<S: AudioSink + ?Sized>(&self, sink: &mut S) {
        let volume = if self.state.muted {
            0.0
        } else {
            self.state.current_volume
        };
        sink.set_volume(volume);
    }
}
