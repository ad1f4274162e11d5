//=========================================================================
// Core
//=========================================================================
//
// Everything that runs on the logic (non-platform) thread, plus the loop
// that drives it.
//
// Responsibilities:
// - Receive platform events over the channel, once per tick
// - Step the `Game` at a fixed tick rate (TPS)
// - Shut down when the window closes, the channel disconnects or the
//   game ends
//
// The core thread owns the `Game` outright; the platform thread only
// talks to it through `PlatformEvent` messages.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use log::info;

//=== Module Declarations =================================================

pub mod animation;
pub mod camera;
pub mod config;
pub mod game;
pub mod graphics;
pub mod input;
pub mod math;
pub mod platform_bridge;
pub mod scene;

//=== Internal Dependencies ===============================================

use game::{Game, TickControl};
use input::Action;
use platform_bridge::{EventCollector, PlatformEvent};
use scene::SceneKey;

//=== Core Thread =========================================================

/// Spawns the logic thread stepping `game` at `tps` ticks per second.
///
/// Each tick:
///  1. Drains platform events (exit on close or disconnect)
///  2. Applies a window resize to the camera
///  3. Steps the game with the wall time since the previous tick
///  4. Sleeps out the rest of the tick
///
/// The game is closed before the thread returns.
pub(crate) fn spawn_core_thread<S: SceneKey, A: Action>(
    mut game: Game<S, A>,
    receiver: Receiver<PlatformEvent>,
    tps: f64,
) -> thread::JoinHandle<()> {
    let frame_duration = Duration::from_secs_f64(1.0 / tps);

    thread::spawn(move || {
        let mut collector = EventCollector::new(receiver);
        let mut last_tick = Instant::now();

        loop {
            let frame_start = Instant::now();

            //--- Step 1: Gather platform events ----------------------------
            if collector.collect_frame() == TickControl::Exit {
                info!(target: "little::game", "Platform gone, core thread exiting");
                break;
            }
            let frame = collector.take_frame();

            //--- Step 2: Window size ---------------------------------------
            if let Some((width, height)) = frame.resize {
                game.camera_mut().resize(f64::from(width), f64::from(height));
            }

            //--- Step 3: Step the game -------------------------------------
            let elapsed = frame_start.duration_since(last_tick);
            last_tick = frame_start;
            if game.step(&frame.batches, elapsed) == TickControl::Exit {
                info!(target: "little::game", "Game ended, core thread exiting");
                break;
            }

            //--- Step 4: Maintain fixed pacing -----------------------------
            let spent = frame_start.elapsed();
            if spent < frame_duration {
                thread::sleep(frame_duration - spent);
            }
        }

        game.close();
    })
}

//=========================================================================
// Unit Tests
//=========================================================================
