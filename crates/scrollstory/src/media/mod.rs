pub mod ramp;
pub mod sink;
pub mod sync;

pub use ramp::{Ramp, RampDirection, RampStep};
pub use sink::{AudioCommand, AudioSink, CommandSink, PlaybackRejected};
pub use sync::{AudioChannelState, MediaConfig, MediaSynchronizer};
