//=========================================================================
// Event Collector
//=========================================================================
//
// Core-side draining of the platform channel, once per tick.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → FrameInput → Game::step
//
// Polling is bounded per frame so a flood of events cannot starve the
// update; whatever is left is picked up on the next tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::game::TickControl;
use crate::core::input::InputEvent;

//=== Constants ===========================================================

const MAX_EVENTS_PER_FRAME: usize = 100;

//=== FrameInput ==========================================================

/// Everything the platform reported during one tick.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct FrameInput {
    pub batches: Vec<Vec<InputEvent>>,
    /// Latest window size, if it changed.
    pub resize: Option<(u32, u32)>,
}

//=== EventCollector ======================================================

pub(crate) struct EventCollector {
    receiver: Receiver<PlatformEvent>,
    frame: FrameInput,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>) -> Self {
        Self {
            receiver,
            frame: FrameInput {
                batches: Vec::with_capacity(4),
                resize: None,
            },
        }
    }

    /// Drains pending platform events into this frame's input.
    pub(crate) fn collect_frame(&mut self) -> TickControl {
        self.frame.batches.clear();
        self.frame.resize = None;
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.handle_event(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!(target: "platform", "Event queue backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }

    pub(crate) fn batches(&self) -> &[Vec<InputEvent>] {
        &self.frame.batches
    }

    /// Hands over this frame's input, leaving an empty one behind.
    pub(crate) fn take_frame(&mut self) -> FrameInput {
        std::mem::take(&mut self.frame)
    }

    fn handle_event(&mut self, event: PlatformEvent) -> TickControl {
        match event {
            PlatformEvent::Inputs { discrete, continuous } => {
                if !discrete.is_empty() {
                    self.frame.batches.push(discrete);
                }
                if !continuous.is_empty() {
                    self.frame.batches.push(continuous);
                }
                TickControl::Continue
            }
            PlatformEvent::WindowResized { width, height } => {
                trace!(target: "platform", "Window resized to {}x{}", width, height);
                self.frame.resize = Some((width, height));
                TickControl::Continue
            }
            PlatformEvent::WindowClosed => TickControl::Exit,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
