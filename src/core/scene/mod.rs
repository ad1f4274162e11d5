//=========================================================================
// Scene System
//=========================================================================
//
// Scenes, their groups of game objects and the deferred request queue.
//
// Architecture:
//   Scene
//     ├─ groups: Groups (GroupKey → Group → Box<dyn GameObject>)
//     ├─ input_map: InputMap<A>
//     ├─ requests: RequestQueue
//     └─ script: Box<dyn SceneScript<S, A>>
//
// Flow (one tick):
//   update() ─ fork: one thread per group ─ join ─ process requests
//            ─ prune removed groups
//   draw()   ─ groups ascending by order
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

use log::debug;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::camera::Camera;
use crate::core::input::{Action, InputArgs, InputMap};

//=== Module Declarations =================================================

mod group;
mod groups;
mod object;
mod registry;
mod request_queue;
#[allow(clippy::module_inception)]
mod scene;

//=== Public API ==========================================================

pub use group::{Group, GroupKey};
pub use groups::{Groups, MAX_ORDER};
pub use object::{AsAny, GameObject, ObjectId, UpdateContext};
pub use registry::{SceneFactory, SceneRegistry};
pub use request_queue::{
    Request, RequestError, RequestQueue, RequestStatus, DEFAULT_REQUEST_CAPACITY,
};
pub use scene::{Scene, SceneDispatch};
pub(crate) use scene::panic_message;

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Typically implemented by a game-specific enum.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== SceneScript =========================================================

/// Game-specific behaviour of a scene.
///
/// All hooks default to doing nothing:
///
/// ```
/// use little_engine::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Level { One }
/// impl SceneKey for Level {}
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Act { Quit }
/// impl Action for Act {}
///
/// struct LevelOne;
///
/// impl SceneScript<Level, Act> for LevelOne {
///     fn on_enter(&mut self, ctx: &mut SceneContext<'_, Level, Act>) {
///         ctx.input_map.bind(KeyCode::Escape, Act::Quit);
///     }
///
///     fn on_action(&mut self, action: Act, _args: &InputArgs, ctx: &mut SceneContext<'_, Level, Act>) {
///         if action == Act::Quit {
///             ctx.control.end_game();
///         }
///     }
/// }
/// ```
pub trait SceneScript<S: SceneKey, A: Action>: Send {
    /// Called when the scene becomes current. Populate groups and bind
    /// input here.
    fn on_enter(&mut self, _ctx: &mut SceneContext<'_, S, A>) {}

    fn on_action(&mut self, _action: A, _args: &InputArgs, _ctx: &mut SceneContext<'_, S, A>) {}

    /// Called before the scene's objects are closed.
    fn on_exit(&mut self, _ctx: &mut SceneContext<'_, S, A>) {}
}

//=== SceneContext ========================================================

/// What a scene script can reach from its hooks.
pub struct SceneContext<'a, S: SceneKey, A: Action> {
    pub key: S,
    pub groups: &'a mut Groups,
    pub input_map: &'a mut InputMap<A>,
    pub camera: &'a mut Camera,
    pub control: &'a mut GameControl<S>,
}

//=== GameControl =========================================================

/// Scene switching and shutdown requests, applied by the game loop at
/// the start of the next step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameControl<S: SceneKey> {
    next_scene: Option<S>,
    end_game: bool,
}

impl<S: SceneKey> GameControl<S> {
    pub fn new() -> Self {
        Self {
            next_scene: None,
            end_game: false,
        }
    }

    /// Switches to `key` on the next step. A later call wins.
    pub fn change_scene(&mut self, key: S) {
        debug!(target: "little::scene", "Scene change to {:?} requested", key);
        self.next_scene = Some(key);
    }

    pub fn end_game(&mut self) {
        debug!(target: "little::game", "End of game requested");
        self.end_game = true;
    }

    pub fn is_ending(&self) -> bool {
        self.end_game
    }

    pub fn pending_scene(&self) -> Option<S> {
        self.next_scene
    }

    pub(crate) fn take_next_scene(&mut self) -> Option<S> {
        self.next_scene.take()
    }
}

impl<S: SceneKey> Default for GameControl<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== SceneError ==========================================================

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("group `{group}` panicked during update: {message}")]
    GroupPanicked { group: GroupKey, message: String },
    #[error("request from {sender} panicked: {message}")]
    RequestPanicked { sender: ObjectId, message: String },
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Level {
        Menu,
        Play,
    }

    impl SceneKey for Level {}

    #[test]
    fn control_keeps_latest_scene_change() {
        let mut control = GameControl::new();
        assert_eq!(control.pending_scene(), None);

        control.change_scene(Level::Menu);
        control.change_scene(Level::Play);
        assert_eq!(control.pending_scene(), Some(Level::Play));
        assert_eq!(control.take_next_scene(), Some(Level::Play));
        assert_eq!(control.take_next_scene(), None);
    }

    #[test]
    fn end_game_is_sticky() {
        let mut control = GameControl::<Level>::default();
        assert!(!control.is_ending());
        control.end_game();
        control.change_scene(Level::Menu);
        assert!(control.is_ending());
    }

    #[test]
    fn group_panic_message() {
        let err = SceneError::GroupPanicked {
            group: GroupKey::new("enemies"),
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "group `enemies` panicked during update: boom");
    }

    #[test]
    fn request_panic_message() {
        let sender = ObjectId::next();
        let err = SceneError::RequestPanicked { sender, message: "boom".into() };
        assert_eq!(err.to_string(), format!("request from {} panicked: boom", sender));
    }
}
