/// The environment refused to start playback (autoplay policy).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct PlaybackRejected(pub String);

/// The one audio element the page drives.
pub trait AudioSink {
    /// Ask the environment to start playback.
    fn play(&mut self) -> Result<(), PlaybackRejected>;
    fn pause(&mut self);
    fn set_volume(&mut self, volume: f32);
    /// Seek back to the start of the track.
    fn rewind(&mut self);
}

/// Wire opcodes for [`AudioCommand`].
pub const OP_PLAY: f32 = 1.0;
pub const OP_PAUSE: f32 = 2.0;
pub const OP_SET_VOLUME: f32 = 3.0;
pub const OP_REWIND: f32 = 4.0;

/// Floats per encoded command: opcode, argument.
pub const COMMAND_FLOATS: usize = 2;

/// A recorded sink call, replayed by the host against the real element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    Play,
    Pause,
    SetVolume(f32),
    Rewind,
}

impl AudioCommand {
    pub fn encode(self) -> [f32; COMMAND_FLOATS] {
        match self {
            AudioCommand::Play => [OP_PLAY, 0.0],
            AudioCommand::Pause => [OP_PAUSE, 0.0],
            AudioCommand::SetVolume(v) => [OP_SET_VOLUME, v],
            AudioCommand::Rewind => [OP_REWIND, 0.0],
        }
    }
}

/// Sink that queues commands for a host that plays them asynchronously.
///
/// `play` always succeeds here; a rejection arrives later through the
/// synchronizer's `on_playback_rejected`.
#[derive(Debug, Default)]
pub struct CommandSink {
    commands: Vec<AudioCommand>,
}

impl CommandSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[AudioCommand] {
        &self.commands
    }

    pub fn drain(&mut self) -> Vec<AudioCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Encode and clear pending commands into `out`.
    pub fn drain_encoded(&mut self, out: &mut Vec<f32>) {
        out.clear();
        for cmd in self.commands.drain(..) {
            out.extend_from_slice(&cmd.encode());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl AudioSink for CommandSink {
    fn play(&mut self) -> Result<(), PlaybackRejected> {
        self.commands.push(AudioCommand::Play);
        Ok(())
    }

    fn pause(&mut self) {
        self.commands.push(AudioCommand::Pause);
    }

    fn set_volume(&mut self, volume: f32) {
        // Collapse consecutive volume writes within a frame.
        if let Some(AudioCommand::SetVolume(last)) = self.commands.last_mut() {
            *last = volume;
            return;
        }
        self.commands.push(AudioCommand::SetVolume(volume));
    }

    fn rewind(&mut self) {
        self.commands.push(AudioCommand::Rewind);
    }
}
