//! Keyboard state: held keys plus edge-triggered presses
//!
//! Edge state is cleared by `end_frame()`, which the main loop only calls
//! after at least one simulation step has consumed it. A press on a frame
//! with zero simulation steps is therefore never lost.

use std::collections::HashSet;

use winit::keyboard::KeyCode;

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Space,
    R,
    Escape,
}

impl Key {
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Enter | KeyCode::NumpadEnter => Some(Key::Enter),
            KeyCode::Space => Some(Key::Space),
            KeyCode::KeyR => Some(Key::R),
            KeyCode::Escape => Some(Key::Escape),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Edge-triggered commands for the next simulation tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            start: self.is_just_pressed(Key::Enter),
            jump: self.is_just_pressed(Key::Space),
            restart: self.is_just_pressed(Key::R),
        }
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Forget everything (window lost focus)
    pub fn clear(&mut self) {
        self.held.clear();
        self.end_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_sets_held_and_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        assert!(input.held.contains(&Key::Space));
        assert!(input.is_just_pressed(Key::Space));
    }

    #[test]
    fn test_key_repeat_is_not_a_new_press() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        input.end_frame();
        // OS key repeat delivers another down event while held
        input.key_down(Key::Space);
        assert!(input.held.contains(&Key::Space));
        assert!(!input.is_just_pressed(Key::Space));
    }

    #[test]
    fn test_key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        input.key_up(Key::R);
        assert!(input.held.is_empty());
        assert!(input.just_pressed.is_empty());
    }

    #[test]
    fn test_end_frame_keeps_held() {
        let mut input = InputState::new();
        input.key_down(Key::Enter);
        input.end_frame();
        assert!(!input.is_just_pressed(Key::Enter));
        assert!(input.held.contains(&Key::Enter));

        input.key_up(Key::Enter);
        assert!(!input.held.contains(&Key::Enter));
        // Pressing again after release is a fresh press
        input.key_down(Key::Enter);
        assert!(input.is_just_pressed(Key::Enter));
    }

    #[test]
    fn test_tick_input_mapping() {
        let mut input = InputState::new();
        assert_eq!(input.tick_input(), TickInput::default());

        input.key_down(Key::Enter);
        input.key_down(Key::Space);
        input.key_down(Key::R);
        assert_eq!(
            input.tick_input(),
            TickInput {
                start: true,
                jump: true,
                restart: true,
            }
        );

        // Holding a key does not keep firing
        input.end_frame();
        assert_eq!(input.tick_input(), TickInput::default());
    }

    #[test]
    fn test_key_code_mapping() {
        assert_eq!(Key::from_key_code(KeyCode::Space), Some(Key::Space));
        assert_eq!(Key::from_key_code(KeyCode::NumpadEnter), Some(Key::Enter));
        assert_eq!(Key::from_key_code(KeyCode::KeyR), Some(Key::R));
        assert_eq!(Key::from_key_code(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_clear_drops_held_keys() {
        let mut input = InputState::new();
        input.key_down(Key::Space);
        input.clear();
        assert!(!input.held.contains(&Key::Space));
        assert!(!input.is_just_pressed(Key::Space));
    }
}
