/// Input events the scene understands.
/// Pointer coordinates are screen pixels; only their frame-to-frame deltas matter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A press began at screen coordinates (x, y). Starts a camera drag.
    PointerDown { x: f32, y: f32 },
    /// The press ended. Stops the drag immediately.
    PointerUp { x: f32, y: f32 },
    /// The pointer moved to screen coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// The speed slider changed. Any finite value, including 0 and negatives.
    SpeedChanged { value: f32 },
    /// The canvas was resized to `width` x `height` pixels.
    Resize { width: u32, height: u32 },
}

/// A queue of input events.
/// JS pushes events between frames; the scene drains them at the start of each tick.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_keeps_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::PointerMove { x: 15.0, y: 20.0 });
        q.push(InputEvent::SpeedChanged { value: -2.0 });
        assert_eq!(q.len(), 3);
        let events = q.drain();
        assert_eq!(events.len(), 3);
        assert_eq!(events[2], InputEvent::SpeedChanged { value: -2.0 });
        assert!(q.is_empty());
    }

    #[test]
    fn iter_does_not_consume() {
        let mut q = InputQueue::default();
        q.push(InputEvent::Resize { width: 1024, height: 768 });
        assert_eq!(q.iter().count(), 1);
        assert_eq!(q.len(), 1);
    }
}
