use crate::api::types::SectionId;

pub type ContentResult<T> = Result<T, ContentError>;

/// Reasons a content configuration is refused at load time.
#[derive(thiserror::Error, Debug)]
pub enum ContentError {
    #[error("failed to parse content: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("content has no sections")]
    Empty,

    #[error("duplicate section id `{0}`")]
    DuplicateId(String),

    #[error("section `{id}`: {reason}")]
    InvalidSection { id: String, reason: String },

    #[error("audio volume {0} is outside [0, 1]")]
    InvalidVolume(f32),
}

impl ContentError {
    pub fn invalid(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSection {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// A failure the page absorbs by presenting less.
///
/// None of these stop the page: silence replaces music, a placeholder
/// replaces a photo, an untracked section simply never reveals.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Degradation {
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),

    #[error("image missing: {0}")]
    AssetMissing(String),

    #[error("no observation target for section {0}")]
    ObservationTargetMissing(SectionId),
}

/// Bounded record of degradations, oldest dropped first.
#[derive(Debug, Clone)]
pub struct DegradationLog {
    entries: Vec<Degradation>,
    capacity: usize,
}

impl DegradationLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.min(64)),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&mut self, degradation: Degradation) {
        log::warn!("{}", degradation);
        if self.entries.len() == self.capacity {
            self.entries.remove(0);
        }
        self.entries.push(degradation);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Degradation> {
        self.entries.iter()
    }

    /// Take every recorded degradation, leaving the log empty.
    pub fn drain(&mut self) -> Vec<Degradation> {
        std::mem::take(&mut self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(ContentError::Empty.to_string().contains("no sections"));
        assert!(ContentError::invalid("memory-1", "photo needs an image")
            .to_string()
            .starts_with("section `memory-1`"));
        assert!(Degradation::ObservationTargetMissing(SectionId(3))
            .to_string()
            .ends_with("section 3"));
    }

    #[test]
    fn parse_error_converts() {
        let err: ContentError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ContentError::Parse(_)));
    }

    #[test]
    fn log_drops_oldest_when_full() {
        let mut log = DegradationLog::new(2);
        log.record(Degradation::AssetMissing("a.jpg".into()));
        log.record(Degradation::AssetMissing("b.jpg".into()));
        log.record(Degradation::AssetMissing("c.jpg".into()));
        assert_eq!(log.len(), 2);
        let drained = log.drain();
        assert_eq!(drained[0], Degradation::AssetMissing("b.jpg".into()));
        assert!(log.is_empty());
    }
}
