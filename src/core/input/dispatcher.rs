//=========================================================================
// Input Dispatcher
//=========================================================================
//
// FIFO command queue routing raw input to the connected scene.
//
// Architecture:
//   InputEvent ─ add_event() ─> Command{generation, code, trigger, args}
//                                   ↓ (queue)
//   execute(handler) ─ resolve via handler.input_map() ─> handler.handle()
//
// Every command is stamped with the generation current when it was
// queued. `connect()` starts a new generation, so commands that were
// meant for the previous scene are dropped instead of leaking into the
// next one.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::VecDeque;

use log::{debug, trace};

//=== Internal Dependencies ===============================================

use super::action::{Action, InputArgs, InputCode, Trigger};
use super::event::InputEvent;
use super::input_map::InputMap;
use super::state_tracker::StateTracker;
use crate::core::math::Point;

//=== ActionHandler =======================================================

/// Receiver of resolved actions; usually the active scene.
pub trait ActionHandler<A: Action> {
    fn input_map(&self) -> &InputMap<A>;

    fn handle(&mut self, action: A, args: &InputArgs);
}

//=== Execution ===========================================================

/// Outcome of executing one queued command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Execution<A> {
    /// Nothing was queued.
    Empty,
    Dispatched(A),
    /// The command was consumed without effect (stale or unmapped).
    Ignored,
}

//=== Command =============================================================

#[derive(Debug, Clone, Copy)]
struct Command {
    generation: u64,
    args: InputArgs,
}

//=== Input ===============================================================

#[derive(Debug)]
pub struct Input<A: Action> {
    queue: VecDeque<Command>,
    generation: u64,
    _action: std::marker::PhantomData<A>,
}

impl<A: Action> Input<A> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::with_capacity(32),
            generation: 0,
            _action: std::marker::PhantomData,
        }
    }

    //--- Connection -------------------------------------------------------

    /// Starts a new scene generation; returns it.
    pub fn connect(&mut self) -> u64 {
        self.generation += 1;
        debug!(target: "little::input", "Input connected (generation {})", self.generation);
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    //--- Queueing ---------------------------------------------------------

    pub fn add(&mut self, args: InputArgs) {
        self.queue.push_back(Command {
            generation: self.generation,
            args,
        });
    }

    /// Queues the command for a raw event, filling positions, modifiers
    /// and wheel deltas from `tracker`.
    pub fn add_event(&mut self, event: &InputEvent, tracker: &StateTracker) {
        let (code, trigger, wheel) = match event {
            InputEvent::KeyDown { key, .. } => (InputCode::Key(*key), Trigger::Press, (0.0, 0.0)),
            InputEvent::KeyUp { key, .. } => (InputCode::Key(*key), Trigger::Release, (0.0, 0.0)),
            InputEvent::MouseButtonDown { button, .. } => {
                (InputCode::Mouse(*button), Trigger::Press, (0.0, 0.0))
            }
            InputEvent::MouseButtonUp { button, .. } => {
                (InputCode::Mouse(*button), Trigger::Release, (0.0, 0.0))
            }
            InputEvent::MouseMoved { .. } => (InputCode::Motion, Trigger::Press, (0.0, 0.0)),
            InputEvent::MouseWheel { delta_x, delta_y } => (
                InputCode::Wheel,
                Trigger::Press,
                (f64::from(*delta_x), f64::from(*delta_y)),
            ),
            InputEvent::Unidentified => return,
        };

        let mut args = args_from(code, trigger, tracker);
        args.wheel = wheel;
        if !event.is_continuous() {
            args.modifiers = event.modifiers();
        }
        self.add(args);
    }

    //--- Execution --------------------------------------------------------

    /// Pops and runs the oldest command.
    pub fn execute<H: ActionHandler<A>>(&mut self, handler: &mut H) -> Execution<A> {
        let Some(command) = self.queue.pop_front() else {
            return Execution::Empty;
        };

        if command.generation != self.generation {
            trace!(
                target: "little::input",
                "Dropping stale {:?} from generation {}",
                command.args.code,
                command.generation
            );
            return Execution::Ignored;
        }

        match handler.input_map().resolve(command.args.code, command.args.trigger) {
            Some(action) => {
                trace!(target: "little::input", "{:?} → {:?}", command.args.code, action);
                handler.handle(action, &command.args);
                Execution::Dispatched(action)
            }
            None => Execution::Ignored,
        }
    }

    /// Runs every queued command; returns how many were dispatched.
    pub fn drain<H: ActionHandler<A>>(&mut self, handler: &mut H) -> usize {
        let mut dispatched = 0;
        loop {
            match self.execute(handler) {
                Execution::Empty => return dispatched,
                Execution::Dispatched(_) => dispatched += 1,
                Execution::Ignored => {}
            }
        }
    }

    /// Fires every `Hold` binding whose key or button is down.
    ///
    /// Keys go first, then buttons, each in a stable order.
    pub fn execute_held<H: ActionHandler<A>>(
        &mut self,
        handler: &mut H,
        tracker: &StateTracker,
    ) -> usize {
        let mut codes: Vec<InputCode> = {
            let mut keys: Vec<_> = tracker.keys_down().copied().collect();
            keys.sort();
            keys.into_iter().map(InputCode::Key).collect()
        };
        let mut buttons: Vec<_> = tracker.buttons_down().copied().collect();
        buttons.sort();
        codes.extend(buttons.into_iter().map(InputCode::Mouse));

        let mut fired = 0;
        for code in codes {
            if let Some(action) = handler.input_map().resolve(code, Trigger::Hold) {
                let mut args = args_from(code, Trigger::Hold, tracker);
                args.modifiers = tracker.modifiers();
                handler.handle(action, &args);
                fired += 1;
            }
        }
        fired
    }

    //--- Utilities --------------------------------------------------------

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl<A: Action> Default for Input<A> {
    fn default() -> Self {
        Self::new()
    }
}

fn args_from(code: InputCode, trigger: Trigger, tracker: &StateTracker) -> InputArgs {
    let (x, y) = tracker.mouse_position();
    let (px, py) = tracker.previous_mouse_position();
    InputArgs {
        position: Point::xy(f64::from(x), f64::from(y)),
        previous_position: Point::xy(f64::from(px), f64::from(py)),
        ..InputArgs::new(code, trigger)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{KeyCode, KeySet, Modifiers, MouseButton};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Jump,
        Type,
        Walk,
        Zoom,
        Click,
    }

    impl Action for TestAction {}

    #[derive(Default)]
    struct Recorder {
        map: InputMap<TestAction>,
        seen: Vec<(TestAction, InputArgs)>,
    }

    impl ActionHandler<TestAction> for Recorder {
        fn input_map(&self) -> &InputMap<TestAction> {
            &self.map
        }

        fn handle(&mut self, action: TestAction, args: &InputArgs) {
            self.seen.push((action, *args));
        }
    }

    fn key_down(key: KeyCode) -> InputEvent {
        InputEvent::KeyDown { key, modifiers: Modifiers::NONE }
    }

    #[test]
    fn empty_queue_reports_empty() {
        let mut input = Input::<TestAction>::new();
        let mut handler = Recorder::default();
        assert_eq!(input.execute(&mut handler), Execution::Empty);
    }

    #[test]
    fn dispatches_in_fifo_order() {
        let mut input = Input::new();
        input.connect();
        let mut handler = Recorder::default();
        handler.map.bind(KeyCode::Space, TestAction::Jump);
        handler.map.bind(KeySet::Alpha, TestAction::Type);

        let tracker = StateTracker::new();
        input.add_event(&key_down(KeyCode::KeyA), &tracker);
        input.add_event(&key_down(KeyCode::Space), &tracker);

        assert_eq!(input.execute(&mut handler), Execution::Dispatched(TestAction::Type));
        assert_eq!(input.execute(&mut handler), Execution::Dispatched(TestAction::Jump));
        assert_eq!(handler.seen[0].1.code, InputCode::Key(KeyCode::KeyA));
    }

    #[test]
    fn unmapped_command_does_not_stall_queue() {
        let mut input = Input::new();
        input.connect();
        let mut handler = Recorder::default();
        handler.map.bind(KeyCode::Space, TestAction::Jump);

        let tracker = StateTracker::new();
        input.add_event(&key_down(KeyCode::Digit1), &tracker);
        input.add_event(&key_down(KeyCode::Space), &tracker);

        assert_eq!(input.drain(&mut handler), 1);
        assert!(input.is_empty());
        assert_eq!(handler.seen.len(), 1);
    }

    #[test]
    fn reconnect_drops_stale_commands() {
        let mut input = Input::new();
        input.connect();
        let mut handler = Recorder::default();
        handler.map.bind(KeyCode::Space, TestAction::Jump);

        let tracker = StateTracker::new();
        input.add_event(&key_down(KeyCode::Space), &tracker);
        input.connect();
        input.add_event(&key_down(KeyCode::Space), &tracker);

        assert_eq!(input.execute(&mut handler), Execution::Ignored);
        assert_eq!(input.execute(&mut handler), Execution::Dispatched(TestAction::Jump));
        assert_eq!(input.generation(), 2);
    }

    #[test]
    fn release_and_wheel_carry_payload() {
        let mut input = Input::new();
        input.connect();
        let mut handler = Recorder::default();
        handler.map.bind_release(MouseButton::Left, TestAction::Click);
        handler.map.bind(InputCode::Wheel, TestAction::Zoom);

        let mut tracker = StateTracker::new();
        tracker.update_frame([[InputEvent::MouseMoved { x: 4.0, y: 8.0 }].as_slice()]);

        input.add_event(
            &InputEvent::MouseButtonUp { button: MouseButton::Left, modifiers: Modifiers::CTRL },
            &tracker,
        );
        input.add_event(&InputEvent::MouseWheel { delta_x: 0.0, delta_y: -2.0 }, &tracker);
        input.add_event(&InputEvent::Unidentified, &tracker);
        assert_eq!(input.len(), 2);

        assert_eq!(input.drain(&mut handler), 2);
        let (click, args) = handler.seen[0];
        assert_eq!(click, TestAction::Click);
        assert_eq!(args.trigger, Trigger::Release);
        assert_eq!(args.modifiers, Modifiers::CTRL);
        assert_eq!(args.position, Point::xy(4.0, 8.0));

        let (zoom, args) = handler.seen[1];
        assert_eq!(zoom, TestAction::Zoom);
        assert_eq!(args.wheel, (0.0, -2.0));
    }

    #[test]
    fn held_keys_fire_hold_bindings_once() {
        let mut input = Input::<TestAction>::new();
        input.connect();
        let mut handler = Recorder::default();
        handler.map.bind_hold(KeyCode::KeyD, TestAction::Walk);
        handler.map.bind(KeyCode::Space, TestAction::Jump);

        let mut tracker = StateTracker::new();
        let events = [key_down(KeyCode::KeyD), key_down(KeyCode::Space)];
        tracker.update_frame([events.as_slice()]);

        assert_eq!(input.execute_held(&mut handler, &tracker), 1);
        assert_eq!(handler.seen[0].0, TestAction::Walk);
        assert_eq!(handler.seen[0].1.trigger, Trigger::Hold);
        // holds are not queued
        assert!(input.is_empty());
    }

    #[test]
    fn clear_empties_queue() {
        let mut input = Input::<TestAction>::new();
        input.add(InputArgs::new(InputCode::Motion, Trigger::Press));
        assert_eq!(input.len(), 1);
        input.clear();
        assert!(input.is_empty());
    }
}
