//=========================================================================
// State Tracker
//=========================================================================
//
// Persistent device state plus per-frame deltas.
//
// Frame lifecycle: begin_frame() → process_events() → finalize_frame() → query
//
// Held keys/buttons survive frame boundaries; pressed/released sets and
// the wheel delta only describe the current frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers, MouseButton};

//=== StateTracker ========================================================

#[derive(Debug, Default)]
pub struct StateTracker {
    //--- Persistent State -------------------------------------------------
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_position: (f32, f32),
    modifiers: Modifiers,
    wheel_total: (f32, f32),

    //--- Frame Deltas -----------------------------------------------------
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    wheel_delta: (f32, f32),

    //--- Derived ----------------------------------------------------------
    mouse_delta: (f32, f32),
    last_mouse_position: (f32, f32),
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears the per-frame deltas.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.wheel_delta = (0.0, 0.0);
        self.last_mouse_position = self.mouse_position;
    }

    pub fn process_events(&mut self, events: &[InputEvent]) {
        for event in events {
            self.process_event(event);
        }
    }

    /// Derives the mouse delta for the frame.
    pub fn finalize_frame(&mut self) {
        self.mouse_delta = (
            self.mouse_position.0 - self.last_mouse_position.0,
            self.mouse_position.1 - self.last_mouse_position.1,
        );
    }

    /// Whole frame in one call: begin, every batch, finalize.
    pub fn update_frame<'a, I>(&mut self, batches: I)
    where
        I: IntoIterator<Item = &'a [InputEvent]>,
    {
        self.begin_frame();
        for batch in batches {
            self.process_events(batch);
        }
        self.finalize_frame();
    }

    fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.insert(*key) {
                    self.keys_pressed.insert(*key);
                }
            }
            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = *modifiers;
                if self.keys_down.remove(key) {
                    self.keys_released.insert(*key);
                }
            }
            InputEvent::MouseButtonDown { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.buttons_down.insert(*button) {
                    self.buttons_pressed.insert(*button);
                }
            }
            InputEvent::MouseButtonUp { button, modifiers } => {
                self.modifiers = *modifiers;
                if self.buttons_down.remove(button) {
                    self.buttons_released.insert(*button);
                }
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (*x, *y);
            }
            InputEvent::MouseWheel { delta_x, delta_y } => {
                self.wheel_delta.0 += delta_x;
                self.wheel_delta.1 += delta_y;
                self.wheel_total.0 += delta_x;
                self.wheel_total.1 += delta_y;
            }
            InputEvent::Unidentified => {}
        }
    }

    //=====================================================================
    // Query API - Keyboard
    //=====================================================================

    /// UP → DOWN this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// DOWN → UP this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    //=====================================================================
    // Query API - Mouse
    //=====================================================================

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Position at the start of the frame.
    pub fn previous_mouse_position(&self) -> (f32, f32) {
        self.last_mouse_position
    }

    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Scroll accumulated this frame.
    pub fn wheel_delta(&self) -> (f32, f32) {
        self.wheel_delta
    }

    /// Scroll accumulated since creation.
    pub fn wheel_total(&self) -> (f32, f32) {
        self.wheel_total
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    //=====================================================================
    // Query API - Iteration
    //=====================================================================

    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }

    pub fn buttons_down(&self) -> impl Iterator<Item = &MouseButton> {
        self.buttons_down.iter()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    fn key_up(key: KeyCode) -> InputEvent {
        InputEvent::KeyUp { key, modifiers: Modifiers::NONE }
    }

    fn frame(tracker: &mut StateTracker, events: &[InputEvent]) {
        tracker.update_frame([events]);
    }

    #[test]
    fn key_pressed_only_on_transition_frame() {
        let mut tracker = StateTracker::new();

        frame(&mut tracker, &[key_down(KeyCode::KeyA)]);
        assert!(tracker.is_key_pressed(KeyCode::KeyA));
        assert!(tracker.is_key_down(KeyCode::KeyA));

        frame(&mut tracker, &[]);
        assert!(!tracker.is_key_pressed(KeyCode::KeyA));
        assert!(tracker.is_key_down(KeyCode::KeyA));

        frame(&mut tracker, &[key_up(KeyCode::KeyA)]);
        assert!(!tracker.is_key_down(KeyCode::KeyA));
        assert!(tracker.is_key_released(KeyCode::KeyA));
    }

    #[test]
    fn fast_tap_captures_both_transitions() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[key_down(KeyCode::Space), key_up(KeyCode::Space)]);

        assert!(tracker.is_key_pressed(KeyCode::Space));
        assert!(tracker.is_key_released(KeyCode::Space));
        assert!(!tracker.is_key_down(KeyCode::Space));
    }

    #[test]
    fn spurious_release_is_ignored() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[key_up(KeyCode::KeyZ)]);
        assert!(!tracker.is_key_released(KeyCode::KeyZ));
    }

    #[test]
    fn mouse_buttons_track_like_keys() {
        let mut tracker = StateTracker::new();
        frame(
            &mut tracker,
            &[InputEvent::MouseButtonDown { button: MouseButton::Left, modifiers: Modifiers::SHIFT }],
        );
        assert!(tracker.is_button_pressed(MouseButton::Left));
        assert!(tracker.is_button_down(MouseButton::Left));
        assert_eq!(tracker.modifiers(), Modifiers::SHIFT);

        frame(
            &mut tracker,
            &[InputEvent::MouseButtonUp { button: MouseButton::Left, modifiers: Modifiers::NONE }],
        );
        assert!(tracker.is_button_released(MouseButton::Left));
        assert_eq!(tracker.buttons_down().count(), 0);
    }

    #[test]
    fn mouse_delta_and_previous_position() {
        let mut tracker = StateTracker::new();
        frame(&mut tracker, &[InputEvent::MouseMoved { x: 10.0, y: 20.0 }]);
        frame(&mut tracker, &[InputEvent::MouseMoved { x: 15.0, y: 18.0 }]);

        assert_eq!(tracker.mouse_position(), (15.0, 18.0));
        assert_eq!(tracker.previous_mouse_position(), (10.0, 20.0));
        assert_eq!(tracker.mouse_delta(), (5.0, -2.0));

        frame(&mut tracker, &[]);
        assert_eq!(tracker.mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn wheel_accumulates_per_frame_and_total() {
        let mut tracker = StateTracker::new();
        frame(
            &mut tracker,
            &[
                InputEvent::MouseWheel { delta_x: 0.0, delta_y: 1.0 },
                InputEvent::MouseWheel { delta_x: 0.0, delta_y: 2.0 },
            ],
        );
        assert_eq!(tracker.wheel_delta(), (0.0, 3.0));

        frame(&mut tracker, &[InputEvent::MouseWheel { delta_x: 1.0, delta_y: -1.0 }]);
        assert_eq!(tracker.wheel_delta(), (1.0, -1.0));
        assert_eq!(tracker.wheel_total(), (1.0, 2.0));

        frame(&mut tracker, &[]);
        assert_eq!(tracker.wheel_delta(), (0.0, 0.0));
    }

    #[test]
    fn update_frame_processes_every_batch() {
        let mut tracker = StateTracker::new();
        let first = vec![key_down(KeyCode::KeyW)];
        let second = vec![key_down(KeyCode::KeyD)];
        tracker.update_frame([first.as_slice(), second.as_slice()]);

        assert_eq!(tracker.keys_down().count(), 2);
    }
}
