//=========================================================================
// Input System
//=========================================================================
//
// Raw device events in, game actions out.
//
// Architecture:
//   InputEvent ──> StateTracker (held state, per-frame deltas)
//        │
//        └──> Input (command queue) ── InputMap ──> ActionHandler
//
//=========================================================================

//=== Module Declarations =================================================

pub mod action;
pub mod dispatcher;
pub mod event;
pub mod input_map;
pub mod state_tracker;

//=== Public API ==========================================================

pub use action::{Action, InputArgs, InputCode, KeySet, Trigger};
pub use dispatcher::{ActionHandler, Execution, Input};
pub use event::{InputEvent, KeyCode, Modifiers, MouseButton};
pub use input_map::InputMap;
pub use state_tracker::StateTracker;
