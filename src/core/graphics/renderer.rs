//=========================================================================
// Renderer
//=========================================================================
//
// Backend seam: the game loop hands each finished frame to a renderer.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::Frame;

//=== Renderer Trait ======================================================

/// Consumes finished frames.
///
/// Runs on the core logic thread, so implementations must be `Send`.
pub trait Renderer: Send {
    fn present(&mut self, frame: &Frame);
}

//=== NullRenderer ========================================================

/// Discards every frame.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn present(&mut self, frame: &Frame) {
        trace!(target: "little::game", "Discarding frame ({} commands)", frame.len());
    }
}

//=== RecordingRenderer ===================================================

/// Keeps the most recent frame and counts presented frames.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    last: Option<Frame>,
    presented: u64,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last.as_ref()
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Renderer for RecordingRenderer {
    fn present(&mut self, frame: &Frame) {
        self.last = Some(frame.clone());
        self.presented += 1;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graphics::{DrawOptions, Graphics};
    use crate::core::math::Point;

    #[test]
    fn recording_renderer_keeps_last_frame() {
        let mut renderer = RecordingRenderer::new();
        assert!(renderer.last_frame().is_none());

        let mut gfx = Graphics::new();
        gfx.pixel(&Point::ORIGIN, &DrawOptions::default());
        renderer.present(&gfx.finish());
        renderer.present(&gfx.finish());

        assert_eq!(renderer.presented(), 2);
        assert!(renderer.last_frame().is_some_and(|f| f.is_empty()));
    }

    #[test]
    fn renderers_are_object_safe() {
        let mut renderers: Vec<Box<dyn Renderer>> =
            vec![Box::new(NullRenderer), Box::new(RecordingRenderer::new())];
        for renderer in renderers.iter_mut() {
            renderer.present(&Frame::default());
        }
    }
}
