use std::collections::HashSet;

use glsandbox_core::{FrameTimer, MouseInput};
use sdl2::keyboard::Keycode;

/// The current state of the keyboard.
#[derive(Default)]
pub struct KeyboardState {
    pub down: HashSet<Keycode>,
    pub pressed: HashSet<Keycode>,
}

impl KeyboardState {
    /// Clears the keys pressed during the last frame.
    pub fn end_frame(&mut self) {
        self.pressed.clear();
    }

    pub fn is_down(&self, key: Keycode) -> bool {
        self.down.contains(&key)
    }

    pub fn was_pressed(&self, key: Keycode) -> bool {
        self.pressed.contains(&key)
    }
}

/// Context provided to scenes during the update phase.
pub struct UpdateContext<'a> {
    pub keyboard: &'a KeyboardState,
    pub mouse: &'a MouseInput,
    pub timer: &'a FrameTimer,
    /// Whether the mouse is captured for camera control.
    pub mouse_captured: bool,
}

impl<'a> UpdateContext<'a> {
    /// Creates a new `UpdateContext` from the given keyboard, mouse and timer states.
    pub fn new(
        keyboard: &'a KeyboardState,
        mouse: &'a MouseInput,
        timer: &'a FrameTimer,
        mouse_captured: bool,
    ) -> Self {
        Self {
            keyboard,
            mouse,
            timer,
            mouse_captured,
        }
    }

    /// Seconds elapsed since the previous frame.
    pub fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_keys_last_one_frame() {
        let mut keyboard = KeyboardState::default();
        keyboard.down.insert(Keycode::W);
        keyboard.pressed.insert(Keycode::W);
        assert!(keyboard.was_pressed(Keycode::W));

        keyboard.end_frame();
        assert!(!keyboard.was_pressed(Keycode::W));
        assert!(keyboard.is_down(Keycode::W));
    }
}
