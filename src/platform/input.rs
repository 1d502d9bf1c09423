//! Keyboard mapping
//!
//! Arrow keys and WASD (either case) steer, Space launches a torpedo.
//! Anything else is ignored.

use crate::sim::TickInput;

/// Physical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    A,
    D,
    W,
    S,
    Space,
}

impl Key {
    /// Parse a DOM-style key name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "a" | "A" => Some(Key::A),
            "d" | "D" => Some(Key::D),
            "w" | "W" => Some(Key::W),
            "s" | "S" => Some(Key::S),
            " " | "Space" | "Spacebar" => Some(Key::Space),
            _ => None,
        }
    }

    pub fn control(self) -> Control {
        match self {
            Key::ArrowLeft | Key::A => Control::Left,
            Key::ArrowRight | Key::D => Control::Right,
            Key::ArrowUp | Key::W => Control::Up,
            Key::ArrowDown | Key::S => Control::Down,
            Key::Space => Control::FireTorpedo,
        }
    }

    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Logical game controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Up,
    Down,
    FireTorpedo,
}

/// Held keys plus a pending torpedo trigger
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Bitmask of held `Key`s
    held: u16,
    fire_pending: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press; returns false for keys the game ignores
    pub fn key_down(&mut self, name: &str) -> bool {
        let Some(key) = Key::parse(name) else {
            return false;
        };
        // Auto-repeat of a held key is not a new press
        if key.control() == Control::FireTorpedo && self.held & key.bit() == 0 {
            self.fire_pending = true;
        }
        self.held |= key.bit();
        true
    }

    /// Record a key release; returns false for keys the game ignores
    pub fn key_up(&mut self, name: &str) -> bool {
        let Some(key) = Key::parse(name) else {
            return false;
        };
        self.held &= !key.bit();
        true
    }

    /// Whether any key bound to `control` is held
    pub fn is_held(&self, control: Control) -> bool {
        ALL_KEYS
            .iter()
            .any(|k| k.control() == control && self.held & k.bit() != 0)
    }

    /// Drop every held key and pending trigger (e.g. on focus loss)
    pub fn release_all(&mut self) {
        self.held = 0;
        self.fire_pending = false;
    }

    /// Forget a torpedo press that no tick consumed
    pub fn clear_trigger(&mut self) {
        self.fire_pending = false;
    }

    /// Sample input for one tick, consuming the torpedo trigger
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            left: self.is_held(Control::Left),
            right: self.is_held(Control::Right),
            up: self.is_held(Control::Up),
            down: self.is_held(Control::Down),
            fire_torpedo: self.fire_pending,
        };
        self.fire_pending = false;
        input
    }
}

const ALL_KEYS: [Key; 9] = [
    Key::ArrowLeft,
    Key::ArrowRight,
    Key::ArrowUp,
    Key::ArrowDown,
    Key::A,
    Key::D,
    Key::W,
    Key::S,
    Key::Space,
];
