//=========================================================================
// Game
//=========================================================================
//
// Loop driver: owns the current scene, input, camera and renderer, and
// advances everything one step at a time.
//
// One step:
//   1. end-game flag set        → close the scene, Exit
//   2. scene change pending     → close old, create new, connect input,
//                                 on_enter
//   3. tick = elapsed ms / tick divisor
//   4. FPS bookkeeping (logged once a second with `show_fps`)
//   5. input: tracker frame, queue commands, hold bindings, drain queue
//   6. scene update (an error ends the game on the next step)
//   7. draw into Graphics, present the frame
//
// `Game` is headless: the engine drives it from the core thread, tests
// and tools drive it directly with `step` or `run_frames`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

use log::{error, info, trace};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::camera::Camera;
use crate::core::config::{GameConfig, SettingsError};
use crate::core::graphics::{Graphics, NullRenderer, Renderer};
use crate::core::input::{Action, Input, InputEvent, StateTracker};
use crate::core::platform_bridge::PlatformError;
use crate::core::scene::{GameControl, Scene, SceneError, SceneKey, SceneRegistry, SceneScript};

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EngineError =========================================================

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("scene {0} is not registered")]
    UnknownScene(String),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("core thread panicked: {0}")]
    CoreThreadPanicked(String),
}

//=== FrameStats ==========================================================

/// Frames-per-second counter fed with per-step elapsed time.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameStats {
    frames: u32,
    accumulated_ms: f64,
    fps: Option<u32>,
}

impl FrameStats {
    /// Counts one frame; returns the frame count once a second has
    /// accumulated.
    pub fn record(&mut self, elapsed_ms: f64) -> Option<u32> {
        self.frames += 1;
        self.accumulated_ms += elapsed_ms;
        if self.accumulated_ms < 1000.0 {
            return None;
        }

        let fps = self.frames;
        self.fps = Some(fps);
        self.frames = 0;
        self.accumulated_ms = 0.0;
        Some(fps)
    }

    /// Most recent full-second count.
    pub fn fps(&self) -> Option<u32> {
        self.fps
    }
}

//=== Game ================================================================

pub struct Game<S: SceneKey, A: Action> {
    config: GameConfig,
    registry: SceneRegistry<S, A>,
    scene: Option<Scene<S, A>>,
    control: GameControl<S>,
    camera: Camera,
    graphics: Graphics,
    renderer: Box<dyn Renderer>,
    input: Input<A>,
    tracker: StateTracker,
    stats: FrameStats,
    tick: f64,
    running: bool,
}

impl<S: SceneKey, A: Action> Game<S, A> {
    pub fn new(config: GameConfig) -> Self {
        info!(
            target: "little::game",
            "Game initialized ({}x{}, \"{}\")", config.width, config.height, config.title
        );
        Self {
            camera: Camera::new(f64::from(config.width), f64::from(config.height)),
            config,
            registry: SceneRegistry::new(),
            scene: None,
            control: GameControl::new(),
            graphics: Graphics::new(),
            renderer: Box::new(NullRenderer),
            input: Input::new(),
            tracker: StateTracker::new(),
            stats: FrameStats::default(),
            tick: 0.0,
            running: true,
        }
    }

    //--- Setup ------------------------------------------------------------

    pub fn register_scene<F>(&mut self, key: S, factory: F)
    where
        F: Fn() -> Box<dyn SceneScript<S, A>> + Send + 'static,
    {
        self.registry.register(key, factory);
    }

    pub fn set_renderer<R: Renderer + 'static>(&mut self, renderer: R) {
        self.renderer = Box::new(renderer);
    }

    /// Switches to `key` at the start of the next step.
    pub fn change_scene(&mut self, key: S) {
        self.control.change_scene(key);
    }

    /// Closes the game at the start of the next step.
    pub fn end_game(&mut self) {
        self.control.end_game();
    }

    //--- Accessors --------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn scene(&self) -> Option<&Scene<S, A>> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene<S, A>> {
        self.scene.as_mut()
    }

    pub fn control(&self) -> &GameControl<S> {
        &self.control
    }

    pub fn input_state(&self) -> &StateTracker {
        &self.tracker
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Tick handed to objects on the last step.
    pub fn last_tick(&self) -> f64 {
        self.tick
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    //--- Loop -------------------------------------------------------------

    /// Advances the game by one step of `elapsed` wall time.
    pub fn step(&mut self, events: &[Vec<InputEvent>], elapsed: Duration) -> TickControl {
        if !self.running {
            return TickControl::Exit;
        }
        if self.control.is_ending() {
            self.close();
            return TickControl::Exit;
        }
        if let Some(key) = self.control.take_next_scene() {
            self.switch_scene(key);
        }

        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        self.tick = elapsed_ms / self.config.tick_divisor;
        if let Some(fps) = self.stats.record(elapsed_ms) {
            if self.config.show_fps {
                info!(target: "little::game", "FPS: {} TICK: {:.3}", fps, self.tick);
            }
        }

        self.handle_input(events);

        if let Some(scene) = self.scene.as_mut() {
            match scene.update(self.tick) {
                Ok(updated) => {
                    if self.config.verbose {
                        trace!(target: "little::game", "Updated {} objects (tick {:.3})", updated, self.tick);
                    }
                }
                Err(err) => {
                    error!(target: "little::game", "Scene update failed: {}", err);
                    self.control.end_game();
                }
            }
        }

        self.draw();
        TickControl::Continue
    }

    /// Runs up to `frames` steps without input, each `frame_duration`
    /// long. Returns how many steps ran before the game exited.
    pub fn run_frames(&mut self, frames: usize, frame_duration: Duration) -> usize {
        for ran in 0..frames {
            if self.step(&[], frame_duration) == TickControl::Exit {
                return ran;
            }
        }
        frames
    }

    /// Closes the current scene and stops the game. Idempotent.
    pub fn close(&mut self) {
        if !self.running {
            return;
        }
        if let Some(mut scene) = self.scene.take() {
            scene.close(&mut self.camera, &mut self.control);
        }
        self.input.clear();
        self.running = false;
        info!(target: "little::game", "Game closed");
    }

    //--- Internal Helpers -------------------------------------------------

    fn switch_scene(&mut self, key: S) {
        let mut scene = match self.registry.create(key, self.config.request_capacity) {
            Ok(scene) => scene,
            Err(err) => {
                error!(target: "little::game", "Cannot change scene: {}", err);
                self.control.end_game();
                return;
            }
        };

        if let Some(mut old) = self.scene.take() {
            old.close(&mut self.camera, &mut self.control);
        }
        self.input.connect();
        scene.enter(&mut self.camera, &mut self.control);
        info!(target: "little::game", "Scene {:?} started", key);
        self.scene = Some(scene);
    }

    fn handle_input(&mut self, events: &[Vec<InputEvent>]) {
        self.tracker.update_frame(events.iter().map(Vec::as_slice));
        for event in events.iter().flatten() {
            self.input.add_event(event, &self.tracker);
        }

        let Some(scene) = self.scene.as_mut() else {
            self.input.clear();
            return;
        };

        let mut handler = scene.handler(&mut self.camera, &mut self.control);
        let held = self.input.execute_held(&mut handler, &self.tracker);
        let dispatched = self.input.drain(&mut handler);
        if self.config.verbose && held + dispatched > 0 {
            trace!(target: "little::input", "{} held and {} queued actions dispatched", held, dispatched);
        }
    }

    fn draw(&mut self) {
        self.graphics.begin_frame(&mut self.camera);
        if let Some(scene) = self.scene.as_ref() {
            scene.draw(&mut self.graphics);
        }
        let frame = self.graphics.finish();
        self.renderer.present(&frame);
    }
}

impl<S: SceneKey, A: Action> fmt::Debug for Game<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("scene", &self.scene.as_ref().map(Scene::key))
            .field("running", &self.running)
            .field("tick", &self.tick)
            .field("scenes", &self.registry)
            .finish_non_exhaustive()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
