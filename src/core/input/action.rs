//=========================================================================
// Actions & Input Codes
//=========================================================================
//
// Vocabulary shared by bindings and the dispatcher.
//
//   InputCode  what fired (key, button, wheel, motion, or a key class)
//   Trigger    how it fired (press, release, held this tick)
//   Action     what the game makes of it (game-defined enum)
//   InputArgs  payload handed to the scene with the action
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Internal Dependencies ===============================================

use super::event::{KeyCode, Modifiers, MouseButton};
use crate::core::math::Point;

//=== Action Trait ========================================================

/// Marker trait for game-defined action enums.
///
/// ```
/// use little_engine::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum GameAction { Jump, Shoot }
///
/// impl Action for GameAction {}
/// ```
pub trait Action: 'static + Send + Copy + Eq + Hash + Debug {}

//=== KeySet ==============================================================

/// Coarse key classes a scene can bind instead of individual keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySet {
    Alpha,
    Numeric,
    Function,
    Other,
}

impl KeySet {
    pub fn of(key: KeyCode) -> Self {
        if key.is_alpha() {
            Self::Alpha
        } else if key.is_numeric() {
            Self::Numeric
        } else if key.is_function() {
            Self::Function
        } else {
            Self::Other
        }
    }
}

//=== InputCode ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCode {
    Key(KeyCode),
    Mouse(MouseButton),
    Wheel,
    Motion,
    KeySet(KeySet),
}

impl InputCode {
    /// Key-class fallback for key codes.
    pub fn key_set(self) -> Option<InputCode> {
        match self {
            Self::Key(key) => Some(Self::KeySet(KeySet::of(key))),
            _ => None,
        }
    }
}

impl From<KeyCode> for InputCode {
    fn from(key: KeyCode) -> Self {
        Self::Key(key)
    }
}

impl From<MouseButton> for InputCode {
    fn from(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

impl From<KeySet> for InputCode {
    fn from(set: KeySet) -> Self {
        Self::KeySet(set)
    }
}

//=== Trigger =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Press,
    Release,
    /// Fires once per tick while the key or button stays down.
    Hold,
}

//=== InputArgs ===========================================================

/// Payload handed to the scene alongside the resolved action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputArgs {
    /// The concrete code that fired, even when a key set matched.
    pub code: InputCode,
    pub trigger: Trigger,
    pub modifiers: Modifiers,
    /// Cursor position in screen space.
    pub position: Point,
    pub previous_position: Point,
    pub wheel: (f64, f64),
}

impl InputArgs {
    pub fn new(code: InputCode, trigger: Trigger) -> Self {
        Self {
            code,
            trigger,
            modifiers: Modifiers::NONE,
            position: Point::ORIGIN,
            previous_position: Point::ORIGIN,
            wheel: (0.0, 0.0),
        }
    }

    /// Cursor movement since the previous frame.
    pub fn motion(&self) -> Point {
        self.position - self.previous_position
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
