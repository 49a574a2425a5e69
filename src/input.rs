use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keys the demo reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    R,
    Space,
    Digit1,
    Digit2,
    Escape,
}

impl Key {
    /// Maps a physical keyboard key, ignoring keys without a binding.
    pub fn from_physical(key: PhysicalKey) -> Option<Self> {
        let PhysicalKey::Code(code) = key else {
            return None;
        };
        let key = match code {
            KeyCode::KeyW => Self::W,
            KeyCode::KeyA => Self::A,
            KeyCode::KeyS => Self::S,
            KeyCode::KeyD => Self::D,
            KeyCode::KeyQ => Self::Q,
            KeyCode::KeyE => Self::E,
            KeyCode::KeyR => Self::R,
            KeyCode::Space => Self::Space,
            KeyCode::Digit1 | KeyCode::Numpad1 => Self::Digit1,
            KeyCode::Digit2 | KeyCode::Numpad2 => Self::Digit2,
            KeyCode::Escape => Self::Escape,
            _ => return None,
        };
        Some(key)
    }
}

/// One-shot commands triggered on key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    UsePerspective,
    UseOrthographic,
    TogglePoints,
    ResetCamera,
}

impl Action {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Escape => Some(Self::Quit),
            Key::Digit1 => Some(Self::UsePerspective),
            Key::Digit2 => Some(Self::UseOrthographic),
            Key::Space => Some(Self::TogglePoints),
            Key::R => Some(Self::ResetCamera),
            _ => None,
        }
    }
}

/// Movement axes derived from held keys, each in `{-1, 0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveAxes {
    pub forward: f32,
    pub right: f32,
    pub up: f32,
}

impl MoveAxes {
    pub fn is_idle(&self) -> bool {
        self.forward == 0.0 && self.right == 0.0 && self.up == 0.0
    }
}

/// Keyboard state sampled once per frame.
#[derive(Debug, Default)]
pub struct InputState {
    keys: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a press and returns the action it triggers, if any.
    /// Auto-repeat presses of a held key trigger nothing.
    pub fn press(&mut self, key: Key) -> Option<Action> {
        if self.keys.insert(key) {
            Action::from_key(key)
        } else {
            None
        }
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    /// Forgets every held key, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// `1` when only `positive` is held, `-1` when only `negative` is.
    pub fn axis(&self, positive: Key, negative: Key) -> f32 {
        let mut value = 0.0;
        if self.is_key_down(positive) {
            value += 1.0;
        }
        if self.is_key_down(negative) {
            value -= 1.0;
        }
        value
    }

    pub fn move_axes(&self) -> MoveAxes {
        MoveAxes {
            forward: self.axis(Key::W, Key::S),
            right: self.axis(Key::D, Key::A),
            up: self.axis(Key::Q, Key::E),
        }
    }
}

/// Converts absolute cursor positions into look deltas.
#[derive(Debug, Default)]
pub struct MouseLook {
    locked: bool,
    previous: Option<Vec2>,
}

impl MouseLook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts locked, waiting for its first anchor sample.
    pub fn captured() -> Self {
        Self {
            locked: true,
            previous: None,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Flips the lock and returns the new state. The anchor is dropped
    /// either way so the first motion after a relock does not jump.
    pub fn toggle_lock(&mut self) -> bool {
        self.locked = !self.locked;
        self.previous = None;
        self.locked
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Delta since the last cursor position, or `None` while unlocked or
    /// when this is the first sample since the anchor was reset.
    pub fn motion(&mut self, position: Vec2) -> Option<Vec2> {
        if !self.locked {
            return None;
        }
        let previous = self.previous.replace(position)?;
        Some(position - previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_bound_physical_keys() {
        assert_eq!(
            Key::from_physical(PhysicalKey::Code(KeyCode::KeyW)),
            Some(Key::W)
        );
        assert_eq!(
            Key::from_physical(PhysicalKey::Code(KeyCode::Numpad2)),
            Some(Key::Digit2)
        );
        assert_eq!(Key::from_physical(PhysicalKey::Code(KeyCode::KeyZ)), None);
    }

    #[test]
    fn press_triggers_action_once() {
        let mut input = InputState::new();
        assert_eq!(input.press(Key::Space), Some(Action::TogglePoints));
        assert_eq!(input.press(Key::Space), None);
        input.release(Key::Space);
        assert_eq!(input.press(Key::Space), Some(Action::TogglePoints));
        assert_eq!(input.press(Key::W), None);
        assert_eq!(input.press(Key::Escape), Some(Action::Quit));
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut input = InputState::new();
        input.press(Key::W);
        input.press(Key::A);
        input.press(Key::Q);
        input.press(Key::E);
        assert_eq!(
            input.move_axes(),
            MoveAxes {
                forward: 1.0,
                right: -1.0,
                up: 0.0
            }
        );
        input.clear();
        assert!(input.move_axes().is_idle());
    }

    #[test]
    fn mouse_look_needs_lock_and_anchor() {
        let mut look = MouseLook::new();
        assert_eq!(look.motion(Vec2::new(10.0, 10.0)), None);

        assert!(look.toggle_lock());
        assert_eq!(look.motion(Vec2::new(10.0, 10.0)), None);
        assert_eq!(look.motion(Vec2::new(14.0, 7.0)), Some(Vec2::new(4.0, -3.0)));

        look.reset();
        assert_eq!(look.motion(Vec2::new(100.0, 100.0)), None);
        assert_eq!(look.motion(Vec2::new(101.0, 100.0)), Some(Vec2::X));

        assert!(!look.toggle_lock());
        assert_eq!(look.motion(Vec2::new(0.0, 0.0)), None);
    }

    #[test]
    fn captured_look_is_locked_from_the_start() {
        let mut look = MouseLook::captured();
        assert!(look.is_locked());
        assert_eq!(look.motion(Vec2::new(5.0, 5.0)), None);
        assert_eq!(look.motion(Vec2::new(5.0, 7.0)), Some(Vec2::new(0.0, 2.0)));
        assert!(!look.toggle_lock());
    }
}
