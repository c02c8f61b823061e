/// Live and sticky visibility of one section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisibilityState {
    is_visible: bool,
    has_ever_been_visible: bool,
}

impl VisibilityState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an observed visibility. Returns true if `is_visible` changed.
    pub fn apply(&mut self, visible: bool) -> bool {
        let changed = self.is_visible != visible;
        self.is_visible = visible;
        // Monotonic: never reset once set.
        if visible {
            self.has_ever_been_visible = true;
        }
        changed
    }

    /// Drop the live flag without touching the sticky one.
    pub fn release(&mut self) {
        self.is_visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn has_ever_been_visible(&self) -> bool {
        self.has_ever_been_visible
    }

    /// What reveal animations key off: visible now, or at any point before.
    pub fn revealed(&self) -> bool {
        self.is_visible || self.has_ever_been_visible
    }
}
