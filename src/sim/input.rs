//! Input tracking for walking and mouse look
//!
//! The platform layer forwards key and mouse events here. Capture (relative
//! mouse mode) changes are requested, not performed: the platform drains
//! them with [`InputState::take_capture_request`].

use glam::Vec2;

/// Keys the play mode cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
    Other,
}

/// A held button plus how many times it went down this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Button {
    pub downs: u8,
    pub pressed: bool,
}

impl Button {
    fn press(&mut self) {
        self.downs = self.downs.wrapping_add(1);
        self.pressed = true;
    }

    fn release(&mut self) {
        self.pressed = false;
    }
}

/// Mouse capture change the platform should apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRequest {
    Capture,
    Release,
}

#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left: Button,
    pub right: Button,
    pub up: Button,
    pub down: Button,
    captured: bool,
    pending_capture: Option<CaptureRequest>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    fn button_mut(&mut self, key: Key) -> Option<&mut Button> {
        match key {
            Key::Left => Some(&mut self.left),
            Key::Right => Some(&mut self.right),
            Key::Up => Some(&mut self.up),
            Key::Down => Some(&mut self.down),
            Key::Escape | Key::Other => None,
        }
    }

    /// Returns true if the key was consumed
    pub fn on_key_down(&mut self, key: Key) -> bool {
        if key == Key::Escape {
            return self.on_escape();
        }
        match self.button_mut(key) {
            Some(button) => {
                button.press();
                true
            }
            None => false,
        }
    }

    /// Returns true if the key was consumed
    pub fn on_key_up(&mut self, key: Key) -> bool {
        match self.button_mut(key) {
            Some(button) => {
                button.release();
                true
            }
            None => false,
        }
    }

    /// Clicking while the mouse is free asks for capture
    pub fn on_mouse_button_down(&mut self) -> bool {
        if self.captured {
            return false;
        }
        self.captured = true;
        self.pending_capture = Some(CaptureRequest::Capture);
        true
    }

    /// Escape always releases the mouse
    pub fn on_escape(&mut self) -> bool {
        self.captured = false;
        self.pending_capture = Some(CaptureRequest::Release);
        true
    }

    /// Look delta for a motion event; `None` while the mouse is not captured
    pub fn on_mouse_motion(&self, dx: f32, dy: f32) -> Option<Vec2> {
        self.captured.then(|| Vec2::new(dx, dy))
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Adopt the platform's actual capture state (e.g. after focus loss)
    pub fn sync_capture(&mut self, captured: bool) {
        if self.captured != captured {
            log::debug!("Mouse capture synced from platform: {captured}");
        }
        self.captured = captured;
    }

    pub fn take_capture_request(&mut self) -> Option<CaptureRequest> {
        self.pending_capture.take()
    }

    /// Movement axes from held buttons: each axis is +-1 only when exactly
    /// one of its two directions is held
    pub fn move_axes(&self) -> Vec2 {
        let axis = |neg: Button, pos: Button| match (neg.pressed, pos.pressed) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        Vec2::new(axis(self.left, self.right), axis(self.down, self.up))
    }

    /// Reset per-tick down counters
    pub fn end_tick(&mut self) {
        for button in [
            &mut self.left,
            &mut self.right,
            &mut self.up,
            &mut self.down,
        ] {
            button.downs = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_up() {
        let mut input = InputState::new();
        assert!(input.on_key_down(Key::Left));
        assert!(input.on_key_down(Key::Left));
        assert!(input.left.pressed);
        assert_eq!(input.left.downs, 2);
        assert!(input.on_key_up(Key::Left));
        assert!(!input.left.pressed);
        assert_eq!(input.left.downs, 2);

        input.end_tick();
        assert_eq!(input.left.downs, 0);

        assert!(!input.on_key_down(Key::Other));
        assert!(!input.on_key_up(Key::Escape));
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut input = InputState::new();
        input.on_key_down(Key::Left);
        input.on_key_down(Key::Right);
        input.on_key_down(Key::Up);
        assert_eq!(input.move_axes(), Vec2::new(0.0, 1.0));

        input.on_key_up(Key::Right);
        assert_eq!(input.move_axes(), Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_capture_cycle() {
        let mut input = InputState::new();
        assert_eq!(input.on_mouse_motion(0.1, 0.2), None);

        assert!(input.on_mouse_button_down());
        assert_eq!(input.take_capture_request(), Some(CaptureRequest::Capture));
        assert_eq!(input.take_capture_request(), None);
        // Already captured: click is not consumed
        assert!(!input.on_mouse_button_down());
        assert_eq!(input.on_mouse_motion(0.1, 0.2), Some(Vec2::new(0.1, 0.2)));

        assert!(input.on_key_down(Key::Escape));
        assert!(!input.is_captured());
        assert_eq!(input.take_capture_request(), Some(CaptureRequest::Release));
    }
}
