//=========================================================================
// Input Events
//=========================================================================
//
// Platform-independent representation of raw device input.
//
// Event Flow:
// ```text
// Platform Layer (winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    StateTracker  +  Input (command queue)
//         ↓
//    SceneScript::on_action
// ```
//
// Equality is tuned for buffering: discrete events compare by payload,
// continuous events (`MouseMoved`, `MouseWheel`) compare by kind only so
// a buffer keeps just the latest one.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::hash::{Hash, Hasher};

//=== MouseButton =========================================================

/// Physical mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    /// Side, thumb and macro buttons.
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key (location, not the character produced).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Function Keys ----------------------------------------------------
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Arrow Keys -------------------------------------------------------
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------
    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,

    /// Reported by the platform but not mapped.
    Unidentified,
}

impl KeyCode {
    /// `KeyA` to `KeyZ`, alphabetical.
    pub const LETTERS: [KeyCode; 26] = {
        use KeyCode::*;
        [
            KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM,
            KeyN, KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
        ]
    };

    /// `Digit0` to `Digit9`.
    pub const DIGITS: [KeyCode; 10] = {
        use KeyCode::*;
        [Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9]
    };

    /// `F1` to `F12`.
    pub const FUNCTION_KEYS: [KeyCode; 12] = {
        use KeyCode::*;
        [F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12]
    };

    pub fn is_alpha(self) -> bool {
        Self::LETTERS.contains(&self)
    }

    pub fn is_numeric(self) -> bool {
        Self::DIGITS.contains(&self)
    }

    pub fn is_function(self) -> bool {
        Self::FUNCTION_KEYS.contains(&self)
    }
}

//=== Modifiers ===========================================================

/// Modifier key state. Left and right variants are not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    /// Command on macOS.
    pub ctrl: bool,
    /// Option on macOS.
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };

    pub fn any(self) -> bool {
        self.shift || self.ctrl || self.alt
    }
}

//=== InputEvent ==========================================================

/// Low-level input event from the platform layer.
///
/// ```text
/// KeyDown{A, CTRL} == KeyDown{A, CTRL}       ✓
/// KeyDown{A, CTRL} == KeyDown{A, SHIFT}      ✗
/// MouseMoved{..}   == MouseMoved{..}         ✓ (coordinates ignored)
/// MouseWheel{..}   == MouseWheel{..}         ✓ (delta ignored)
/// ```
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown { key: KeyCode, modifiers: Modifiers },
    KeyUp { key: KeyCode, modifiers: Modifiers },
    MouseButtonDown { button: MouseButton, modifiers: Modifiers },
    MouseButtonUp { button: MouseButton, modifiers: Modifiers },
    /// Cursor position in screen pixels, top-left origin.
    MouseMoved { x: f32, y: f32 },
    /// Scroll in lines; positive `y` scrolls up.
    MouseWheel { delta_x: f32, delta_y: f32 },
    Unidentified,
}

impl InputEvent {
    /// Continuous events are coalesced rather than queued.
    pub fn is_continuous(&self) -> bool {
        matches!(self, Self::MouseMoved { .. } | Self::MouseWheel { .. })
    }

    pub fn modifiers(&self) -> Modifiers {
        match self {
            Self::KeyDown { modifiers, .. }
            | Self::KeyUp { modifiers, .. }
            | Self::MouseButtonDown { modifiers, .. }
            | Self::MouseButtonUp { modifiers, .. } => *modifiers,
            _ => Modifiers::NONE,
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for InputEvent {
    fn eq(&self, other: &Self) -> bool {
        use InputEvent::*;
        match (self, other) {
            (KeyDown { key: a, modifiers: ma }, KeyDown { key: b, modifiers: mb })
            | (KeyUp { key: a, modifiers: ma }, KeyUp { key: b, modifiers: mb }) => {
                a == b && ma == mb
            }
            (
                MouseButtonDown { button: a, modifiers: ma },
                MouseButtonDown { button: b, modifiers: mb },
            )
            | (
                MouseButtonUp { button: a, modifiers: ma },
                MouseButtonUp { button: b, modifiers: mb },
            ) => a == b && ma == mb,
            (MouseMoved { .. }, MouseMoved { .. }) => true,
            (MouseWheel { .. }, MouseWheel { .. }) => true,
            (Unidentified, Unidentified) => true,
            _ => false,
        }
    }
}

impl Eq for InputEvent {}

/// Consistent with `PartialEq`: continuous payloads are not hashed.
impl Hash for InputEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::KeyDown { key, modifiers } | Self::KeyUp { key, modifiers } => {
                key.hash(state);
                modifiers.hash(state);
            }
            Self::MouseButtonDown { button, modifiers }
            | Self::MouseButtonUp { button, modifiers } => {
                button.hash(state);
                modifiers.hash(state);
            }
            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn key_down(key: KeyCode, modifiers: Modifiers) -> InputEvent {
        InputEvent::KeyDown { key, modifiers }
    }

    #[test]
    fn discrete_events_compare_by_payload() {
        assert_eq!(key_down(KeyCode::KeyA, Modifiers::NONE), key_down(KeyCode::KeyA, Modifiers::NONE));
        assert_ne!(key_down(KeyCode::KeyA, Modifiers::NONE), key_down(KeyCode::KeyA, Modifiers::CTRL));
        assert_ne!(
            key_down(KeyCode::KeyA, Modifiers::NONE),
            InputEvent::KeyUp { key: KeyCode::KeyA, modifiers: Modifiers::NONE }
        );
    }

    #[test]
    fn continuous_events_ignore_payload() {
        let a = InputEvent::MouseMoved { x: 1.0, y: 2.0 };
        let b = InputEvent::MouseMoved { x: 300.0, y: 400.0 };
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let w1 = InputEvent::MouseWheel { delta_x: 0.0, delta_y: 1.0 };
        let w2 = InputEvent::MouseWheel { delta_x: 0.0, delta_y: -3.0 };
        assert_eq!(w1, w2);
        assert_ne!(w1, a);
    }

    #[test]
    fn hash_set_coalesces_continuous() {
        let mut set = HashSet::new();
        set.replace(InputEvent::MouseMoved { x: 1.0, y: 1.0 });
        set.replace(InputEvent::MouseMoved { x: 9.0, y: 9.0 });
        set.replace(InputEvent::MouseWheel { delta_x: 0.0, delta_y: 1.0 });
        assert_eq!(set.len(), 2);
        assert!(set.iter().any(|e| matches!(e, InputEvent::MouseMoved { x, .. } if *x == 9.0)));
    }

    #[test]
    fn key_classification() {
        assert!(KeyCode::KeyQ.is_alpha());
        assert!(!KeyCode::KeyQ.is_numeric());
        assert!(KeyCode::Digit7.is_numeric());
        assert!(KeyCode::F11.is_function());
        assert!(!KeyCode::Space.is_alpha());
        assert!(!KeyCode::Space.is_function());
    }

    #[test]
    fn modifiers_accessor() {
        let e = key_down(KeyCode::KeyS, Modifiers::CTRL);
        assert_eq!(e.modifiers(), Modifiers::CTRL);
        assert!(e.modifiers().any());
        assert_eq!(InputEvent::MouseMoved { x: 0.0, y: 0.0 }.modifiers(), Modifiers::NONE);
        assert!(InputEvent::MouseWheel { delta_x: 0.0, delta_y: 0.0 }.is_continuous());
        assert!(!e.is_continuous());
    }
}
