//=========================================================================
// Configuration
//=========================================================================
//
// Settings files and the engine/game configuration built from them.
//
//=========================================================================

//=== Module Declarations =================================================

mod game_config;
mod settings;

//=== Public API ==========================================================

pub use game_config::GameConfig;
pub use settings::{Settings, SettingsError, DEFAULT_SECTION};
