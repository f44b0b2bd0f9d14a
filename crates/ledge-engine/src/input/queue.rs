use crate::input::keyboard::KeyCode;

/// Input event types the engine understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key went down.
    KeyDown { key: KeyCode },
    /// A key went up.
    KeyUp { key: KeyCode },
    /// The host lost focus; every key counts as released.
    Blur,
}

/// A queue of input events.
/// JS writes events into the queue between frames; the runner folds them into
/// the polled keyboard state before the frame's ticks run.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Push a DOM `KeyboardEvent.code`. Codes the engine does not bind are dropped.
    pub fn push_dom_key(&mut self, code: &str, down: bool) {
        if let Ok(key) = code.parse::<KeyCode>() {
            self.push(if down {
                InputEvent::KeyDown { key }
            } else {
                InputEvent::KeyUp { key }
            });
        }
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
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
