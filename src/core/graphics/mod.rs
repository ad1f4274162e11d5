//=========================================================================
// Graphics
//=========================================================================
//
// Headless drawing: game objects record draw commands in screen space,
// a pluggable renderer presents the finished frame.
//
// Architecture:
//   GameObject::draw() → Graphics (camera offset, group order)
//                           ↓ finish()
//                         Frame → Renderer::present()
//
//=========================================================================

//=== Module Declarations =================================================

mod draw;
mod recorder;
mod renderer;

//=== Public API ==========================================================

pub use draw::{Color, DrawCommand, DrawOptions};
pub use recorder::{Frame, Graphics, DEFAULT_ORDER};
pub use renderer::{NullRenderer, RecordingRenderer, Renderer};
