/// Input events forwarded by the host page.
/// Pointer coordinates are CSS pixels relative to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    /// Mouse wheel; positive `delta` scrolls away from the scene.
    Wheel { delta: f32 },
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    /// The canvas was resized to `width` x `height` CSS pixels.
    Resize { width: f32, height: f32 },
    /// A custom event from the UI layer (buttons, sliders).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS pushes events between frames; the runner drains them each tick.
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

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take all pending events, leaving the queue empty.
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

    /// Drop transient pointer, wheel and key events. Custom commands and the
    /// latest resize survive.
    pub fn retain_deferred(&mut self) {
        let resize = self.last_resize();
        self.events.retain(|e| matches!(e, InputEvent::Custom { .. }));
        if let Some((width, height)) = resize {
            self.events.push(InputEvent::Resize { width, height });
        }
    }

    /// Most recent resize in the queue, if any.
    pub fn last_resize(&self) -> Option<(f32, f32)> {
        self.events.iter().rev().find_map(|e| match *e {
            InputEvent::Resize { width, height } => Some((width, height)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::Wheel { delta: -1.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn custom_event() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 2, a: 3.0, b: 0.01, c: 0.0 });
        assert_eq!(q.drain(), vec![InputEvent::Custom { kind: 2, a: 3.0, b: 0.01, c: 0.0 }]);
    }

    #[test]
    fn retain_deferred_keeps_commands_and_last_resize() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 1.0, y: 1.0 });
        q.push(InputEvent::Resize { width: 800.0, height: 600.0 });
        q.push(InputEvent::Custom { kind: 1, a: 0.0, b: 0.0, c: 0.0 });
        q.push(InputEvent::Wheel { delta: 3.0 });
        q.push(InputEvent::Resize { width: 1024.0, height: 768.0 });
        q.push(InputEvent::KeyDown { key_code: 32 });

        q.retain_deferred();
        assert_eq!(
            q.drain(),
            vec![
                InputEvent::Custom { kind: 1, a: 0.0, b: 0.0, c: 0.0 },
                InputEvent::Resize { width: 1024.0, height: 768.0 },
            ]
        );
    }

    #[test]
    fn last_resize_wins() {
        let mut q = InputQueue::new();
        assert_eq!(q.last_resize(), None);
        q.push(InputEvent::Resize { width: 800.0, height: 600.0 });
        q.push(InputEvent::KeyDown { key_code: 32 });
        q.push(InputEvent::Resize { width: 1024.0, height: 768.0 });
        assert_eq!(q.last_resize(), Some((1024.0, 768.0)));
    }
}
