//=========================================================================
// Input Processor
//=========================================================================
//
// Turns winit window events into `InputEvent`s for the input buffer.
//
// Keys are matched by class: letters, digits and function keys line up
// index for index with `KeyCode::LETTERS`, `DIGITS` and `FUNCTION_KEYS`,
// so the class a key lands in is the `KeySet` it binds under. Arrows and
// the few named keys are matched directly. Anything else is dropped.
//
// The latest `ModifiersChanged` state is stamped onto key and button
// events; cursor and wheel events carry none.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitButton, MouseScrollDelta},
    keyboard::{KeyCode as Physical, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== Key Classes =========================================================

const LETTERS: [Physical; 26] = {
    use winit::keyboard::KeyCode::*;
    [
        KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM,
        KeyN, KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
    ]
};

const DIGITS: [Physical; 10] = {
    use winit::keyboard::KeyCode::*;
    [Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9]
};

/// F13 and up have no engine key.
const FUNCTION_KEYS: [Physical; 12] = {
    use winit::keyboard::KeyCode::*;
    [F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12]
};

/// Engine key for a physical key, or `None` if the engine has no such key.
fn translate_key(code: Physical) -> Option<KeyCode> {
    let named = match code {
        Physical::ArrowUp => Some(KeyCode::ArrowUp),
        Physical::ArrowDown => Some(KeyCode::ArrowDown),
        Physical::ArrowLeft => Some(KeyCode::ArrowLeft),
        Physical::ArrowRight => Some(KeyCode::ArrowRight),
        Physical::Space => Some(KeyCode::Space),
        Physical::Enter | Physical::NumpadEnter => Some(KeyCode::Enter),
        Physical::Escape => Some(KeyCode::Escape),
        Physical::Tab => Some(KeyCode::Tab),
        Physical::Backspace => Some(KeyCode::Backspace),
        Physical::Delete => Some(KeyCode::Delete),
        _ => None,
    };

    named
        .or_else(|| in_class(code, &LETTERS, &KeyCode::LETTERS))
        .or_else(|| in_class(code, &DIGITS, &KeyCode::DIGITS))
        .or_else(|| in_class(code, &FUNCTION_KEYS, &KeyCode::FUNCTION_KEYS))
}

fn in_class<const N: usize>(
    code: Physical,
    physical: &[Physical; N],
    engine: &[KeyCode; N],
) -> Option<KeyCode> {
    physical.iter().position(|&k| k == code).map(|i| engine[i])
}

fn translate_modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
    }
}

fn translate_button(button: WinitButton) -> MouseButton {
    match button {
        WinitButton::Left => MouseButton::Left,
        WinitButton::Right => MouseButton::Right,
        WinitButton::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

//=== InputProcessor ======================================================

/// Stateful winit-to-engine translator; the only state is the modifier
/// set.
pub(crate) struct InputProcessor {
    modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self { modifiers: Modifiers::NONE }
    }

    pub(crate) fn update_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = translate_modifiers(state);
    }

    /// `None` for keys the engine does not know.
    pub(crate) fn process_key_event(&self, event: &KeyEvent) -> Option<InputEvent> {
        match event.physical_key {
            PhysicalKey::Code(code) => self.key(code, event.state),
            PhysicalKey::Unidentified(_) => None,
        }
    }

    pub(crate) fn process_mouse_button(&self, button: WinitButton, state: ElementState) -> InputEvent {
        let (button, modifiers) = (translate_button(button), self.modifiers);
        if state.is_pressed() {
            InputEvent::MouseButtonDown { button, modifiers }
        } else {
            InputEvent::MouseButtonUp { button, modifiers }
        }
    }

    pub(crate) fn process_mouse_move(&self, x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMoved { x, y }
    }

    /// Wheel motion in lines; touchpad pixel deltas are scaled down.
    pub(crate) fn process_mouse_wheel(&self, delta: MouseScrollDelta) -> InputEvent {
        const PIXELS_PER_LINE: f64 = 20.0;

        let (delta_x, delta_y) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (x, y),
            MouseScrollDelta::PixelDelta(pos) => {
                ((pos.x / PIXELS_PER_LINE) as f32, (pos.y / PIXELS_PER_LINE) as f32)
            }
        };
        InputEvent::MouseWheel { delta_x, delta_y }
    }

    fn key(&self, code: Physical, state: ElementState) -> Option<InputEvent> {
        let key = translate_key(code)?;
        let modifiers = self.modifiers;
        Some(if state.is_pressed() {
            InputEvent::KeyDown { key, modifiers }
        } else {
            InputEvent::KeyUp { key, modifiers }
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
