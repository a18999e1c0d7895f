use crate::api::types::PickId;

/// Discrete UI events the simulation understands.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Speed slider moved (simulated seconds per wall second).
    SetSpeed { value: f64 },
    /// Compression slider moved (exponent k, ≥ 1).
    SetCompression { value: f64 },
    /// A body was chosen by name (list widget).
    Select { name: String },
    /// Ray hits from the renderer, nearest first.
    Pick { hits: Vec<PickId> },
    /// The info popup was closed.
    Deselect,
    /// Orbit rings shown or hidden.
    ShowOrbits(bool),
    /// Body labels shown or hidden.
    ShowLabels(bool),
    /// Viewport resized (CSS pixels).
    Resize { width: f64, height: f64 },
    /// The user orbited/panned/zoomed the free camera.
    CameraMoved { position: [f64; 3], target: [f64; 3] },
}

/// A queue of input events.
/// The host pushes events at any time; the runner drains and applies them
/// between frames.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
