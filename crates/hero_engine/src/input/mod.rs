//! Input state tracking
//!
//! The host feeds key, mouse button, and cursor events in through the
//! `handle_*` methods. Systems read held state and per-tick edges. Edges are
//! cleared once at the end of every tick, so a press that lands between two
//! ticks is seen by exactly one tick.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// Keyboard and mouse state shared between the host and the systems
#[derive(Debug, Default, Clone)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    mouse_position: Vec2,
}

impl InputState {
    /// Create an input state with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    ///
    /// Repeated presses of a held key do not produce another edge.
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.keys_down.insert(key) {
                self.keys_pressed.insert(key);
            }
        } else if self.keys_down.remove(&key) {
            self.keys_released.insert(key);
        }
    }

    /// Handle mouse button input
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            if self.buttons_down.insert(button) {
                self.buttons_pressed.insert(button);
            }
        } else if self.buttons_down.remove(&button) {
            self.buttons_released.insert(button);
        }
    }

    /// Handle mouse movement
    pub fn handle_mouse_move(&mut self, x: f32, y: f32) {
        self.mouse_position = Vec2::new(x, y);
    }

    /// Whether a key is held
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Whether a key went down since the last tick
    pub fn was_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Whether a key went up since the last tick
    pub fn was_just_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Last reported cursor position
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Whether a mouse button is held
    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Whether a mouse button went down since the last tick
    pub fn mouse_just_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    /// Whether a mouse button went up since the last tick
    pub fn mouse_just_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    /// Forget per-tick edges; held state is kept
    pub fn clear_edges(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }

    /// Release everything, e.g. when the window loses focus
    pub fn reset(&mut self) {
        *self = Self {
            mouse_position: self.mouse_position,
            ..Self::default()
        };
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}
