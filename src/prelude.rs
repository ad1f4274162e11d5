//=========================================================================
// Prelude
//=========================================================================
//
// Re-exports the types most games touch.
//
// Usage:
//   use little_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::core::config::GameConfig;
pub use crate::core::game::{EngineError, Game, TickControl};

// Math and camera
pub use crate::core::camera::{Camera, FocusAnchor};
pub use crate::core::math::{Corner, Path, Point, Shape};

// Graphics
pub use crate::core::graphics::{Color, DrawOptions, Graphics, Renderer};

// Input
pub use crate::core::input::{Action, InputArgs, KeyCode, Modifiers, MouseButton, Trigger};

// Scenes
pub use crate::core::scene::{
    GameControl, GameObject, GroupKey, ObjectId, RequestStatus, SceneContext, SceneKey,
    SceneScript, UpdateContext,
};

// Animation
pub use crate::core::animation::Animation;
