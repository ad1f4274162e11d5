//=========================================================================
// Little Engine
//=========================================================================
//
// Main entry point: configures a `Game`, then runs it on a core thread
// while the platform owns the main thread.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──init()──>  Engine  ──run()──>  [Runtime]
//         │                          │                                      │
//         ├─ with_tps()              └─ owns Game                           ├─ core thread
//         ├─ with_window_size()                                             ├─ platform loop
//         └─ with_config()                                                  └─ join + report
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::bounded;
use log::{error, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::config::GameConfig;
use crate::core::game::{EngineError, Game};
use crate::core::input::Action;
use crate::core::scene::{panic_message, SceneKey};
use crate::core::spawn_core_thread;
use crate::platform::{Platform, WindowOptions};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// Starts from [`GameConfig::default`]: 60 TPS, a 128-event channel and
/// a 640x480 window.
///
/// # Examples
///
/// ```no_run
/// use little_engine::prelude::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Level { Main }
/// impl SceneKey for Level {}
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Act { Jump }
/// impl Action for Act {}
///
/// struct MainLevel;
/// impl SceneScript<Level, Act> for MainLevel {}
///
/// EngineBuilder::<Level, Act>::new()
///     .with_tps(120.0)
///     .with_window_size(800, 600)
///     .with_title("Jumper")
///     .build()
///     .init(|game| {
///         game.register_scene(Level::Main, || Box::new(MainLevel));
///         game.change_scene(Level::Main);
///     })
///     .run()?;
/// # Ok::<(), EngineError>(())
/// ```
pub struct EngineBuilder<S: SceneKey, A: Action> {
    config: GameConfig,
    _phantom: std::marker::PhantomData<(S, A)>,
}

impl<S: SceneKey, A: Action> EngineBuilder<S, A> {
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Replaces the whole configuration, e.g. one loaded with
    /// [`GameConfig::load`].
    ///
    /// # Panics
    ///
    /// Panics if TPS or channel capacity are not positive.
    pub fn with_config(mut self, config: GameConfig) -> Self {
        assert!(config.tps > 0.0, "TPS must be positive, got {}", config.tps);
        assert!(config.channel_capacity > 0, "Channel capacity must be positive");
        self.config = config;
        self
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.config.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → core communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.config.channel_capacity = capacity;
        self
    }

    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Logs the frame rate once per second.
    pub fn with_show_fps(mut self, show_fps: bool) -> Self {
        self.config.show_fps = show_fps;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn build(self) -> Engine<S, A> {
        info!(
            "Building engine (TPS: {}, channel: {})",
            self.config.tps, self.config.channel_capacity
        );
        if self.config.verbose {
            trace!("Engine configuration: {:?}", self.config);
        }

        Engine {
            game: Game::new(self.config),
        }
    }
}

impl<S: SceneKey, A: Action> Default for EngineBuilder<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Little Engine runtime.
///
/// ```text
/// Engine (Main Thread)
///   ├─► Game (Core Thread @ TPS)
///   │     └─► Input, Scene update, Draw
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling
///
/// Communication: crossbeam channel (PlatformEvent)
/// ```
pub struct Engine<S: SceneKey, A: Action> {
    game: Game<S, A>,
}

impl<S: SceneKey, A: Action> Engine<S, A> {
    //--- Initialization ---------------------------------------------------

    /// Gives setup code the game before it starts: register scenes, pick
    /// the first one, swap the renderer.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut Game<S, A>),
    {
        info!("Initializing game");
        init_fn(&mut self.game);
        info!("Game initialization complete");
        self
    }

    pub fn game(&self) -> &Game<S, A> {
        &self.game
    }

    //--- Execution --------------------------------------------------------

    /// Starts the runtime and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded platform → core channel
    /// 2. Spawns the core thread stepping the game at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. Platform exit drops the sender, the core thread sees the
    ///    disconnect, closes the game and is joined
    ///
    /// # Errors
    ///
    /// [`EngineError::Platform`] if the window or event loop fails,
    /// [`EngineError::CoreThreadPanicked`] if the logic thread panicked.
    /// A platform error takes precedence.
    pub fn run(self) -> Result<(), EngineError> {
        let config = self.game.config().clone();
        info!("Starting engine runtime (TPS: {})", config.tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx) = bounded(config.channel_capacity);
        info!("Channel created (capacity: {})", config.channel_capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = spawn_core_thread(self.game, rx, config.tps);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, WindowOptions::from(&config));
        let platform_result = platform.run();
        if let Err(e) = &platform_result {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        //--- 4. Cleanup: wait for the core thread -------------------------
        let core_result = match core_handle.join() {
            Ok(()) => {
                info!("Core thread terminated cleanly");
                Ok(())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("Core thread panicked: {}", message);
                Err(EngineError::CoreThreadPanicked(message))
            }
        };

        info!("Engine shutdown complete");
        platform_result?;
        core_result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::SceneScript;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
    }

    impl SceneKey for TestScene {}

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestAction {
        Jump,
    }

    impl Action for TestAction {}

    struct Idle;

    impl SceneScript<TestScene, TestAction> for Idle {}

    fn builder() -> EngineBuilder<TestScene, TestAction> {
        EngineBuilder::new()
    }

    //=====================================================================
    // EngineBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = builder();
        assert_eq!(builder.config, GameConfig::default());
        assert_eq!(builder.config.tps, 60.0);
        assert_eq!(builder.config.channel_capacity, 128);
    }

    #[test]
    fn builder_with_tps() {
        assert_eq!(builder().with_tps(120.0).config.tps, 120.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_zero() {
        builder().with_tps(0.0);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_tps_panics_on_negative() {
        builder().with_tps(-60.0);
    }

    #[test]
    fn builder_with_channel_capacity() {
        assert_eq!(builder().with_channel_capacity(256).config.channel_capacity, 256);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_with_channel_capacity_panics_on_zero() {
        builder().with_channel_capacity(0);
    }

    #[test]
    #[should_panic(expected = "Window size must be positive")]
    fn builder_with_window_size_panics_on_zero() {
        builder().with_window_size(0, 480);
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn builder_with_config_validates() {
        builder().with_config(GameConfig { tps: 0.0, ..GameConfig::default() });
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let engine = builder()
            .with_tps(120.0)
            .with_channel_capacity(256)
            .with_window_size(800, 600)
            .with_title("Chained")
            .with_show_fps(true)
            .with_verbose(true)
            .build();

        let config = engine.game().config();
        assert_eq!(config.tps, 120.0);
        assert_eq!(config.channel_capacity, 256);
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.title, "Chained");
        assert!(config.show_fps && config.verbose);
        assert_eq!(engine.game().camera().width(), 800.0);
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn init_configures_game() {
        let engine = builder().build().init(|game| {
            game.register_scene(TestScene::Main, || Box::new(Idle));
            game.change_scene(TestScene::Main);
        });

        assert_eq!(engine.game().control().pending_scene(), Some(TestScene::Main));
        assert!(engine.game().scene().is_none());
    }
}
