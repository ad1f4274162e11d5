//=========================================================================
// Little Engine — Library Root
//
// Public API surface of the engine.
//
// Responsibilities:
// - Expose the engine facade (`Engine`, `EngineBuilder`)
// - Expose the headless core (`core`) for games, tools and tests
// - Keep the winit platform layer private
//
// Typical usage:
// ```no_run
// use little_engine::prelude::*;
//
// fn main() -> Result<(), EngineError> {
//     EngineBuilder::<MyScene, MyAction>::new()
//         .build()
//         .init(|game| { /* register scenes */ })
//         .run()
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds everything that runs on the logic thread: math, camera,
// graphics, input, scenes, animation, configuration and the game loop.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window and the winit event loop. `engine` wires
// platform and core together.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
