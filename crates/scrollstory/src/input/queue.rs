/// Input events the page understands.
/// Coordinates are CSS pixels; wheel deltas follow the DOM sign convention
/// (positive scrolls down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse wheel or trackpad scroll.
    Wheel { delta_y: f32 },
    /// A finger touched the screen at vertical position `y`.
    TouchStart { y: f32 },
    /// A touching finger moved to vertical position `y`.
    TouchMove { y: f32 },
    /// The finger lifted.
    TouchEnd,
    /// A click or tap.
    PointerDown { x: f32, y: f32 },
    /// A key was pressed (DOM `keyCode`).
    KeyDown { key_code: u32 },
    /// The viewport changed size.
    Resize { width: f32, height: f32 },
}

/// Kinds of user input that count as an interaction for the autoplay policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Click,
    Touch,
    Key,
    Scroll,
}

impl InputEvent {
    /// The interaction this event represents, if it unlocks audio.
    pub fn interaction(&self) -> Option<Interaction> {
        match self {
            InputEvent::PointerDown { .. } => Some(Interaction::Click),
            InputEvent::TouchStart { .. } => Some(Interaction::Touch),
            InputEvent::KeyDown { .. } => Some(Interaction::Key),
            InputEvent::Wheel { .. } => Some(Interaction::Scroll),
            InputEvent::TouchMove { .. } | InputEvent::TouchEnd | InputEvent::Resize { .. } => None,
        }
    }
}

/// A queue of input events.
/// The host writes events into the queue; the page drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
