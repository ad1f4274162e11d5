//=========================================================================
// Game Configuration
//=========================================================================
//
// Runtime parameters shared by the engine builder, the game loop and the
// platform window. Every field has a default; a settings file only needs
// to name what it changes.
//
// Settings keys (default section):
//   width, height, title, tps, tick_divisor, show_fps, verbose,
//   request_capacity, channel_capacity
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

//=== Internal Dependencies ===============================================

use super::settings::{Settings, SettingsError, DEFAULT_SECTION};
use crate::core::scene::DEFAULT_REQUEST_CAPACITY;

//=== GameConfig ==========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Logic ticks per second.
    pub tps: f64,
    /// Elapsed milliseconds are divided by this to get the object tick.
    pub tick_divisor: f64,
    pub show_fps: bool,
    /// Emit verbose diagnostics at trace level.
    pub verbose: bool,
    pub request_capacity: usize,
    /// Platform → core event channel.
    pub channel_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: String::from("Little Engine"),
            tps: 60.0,
            tick_divisor: 100.0,
            show_fps: false,
            verbose: false,
            request_capacity: DEFAULT_REQUEST_CAPACITY,
            channel_capacity: 128,
        }
    }
}

impl GameConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        Self::from_settings(&Settings::load(path)?)
    }

    /// Overrides the defaults with whatever `settings` defines.
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        let mut config = Self::default();
        let section = DEFAULT_SECTION;

        if let Some(width) = positive_int(settings, "width")? {
            config.width = width;
        }
        if let Some(height) = positive_int(settings, "height")? {
            config.height = height;
        }
        if let Some(title) = settings.get_str(section, "title") {
            config.title = title.to_owned();
        }
        if let Some(tps) = positive_float(settings, "tps")? {
            config.tps = tps;
        }
        if let Some(divisor) = positive_float(settings, "tick_divisor")? {
            config.tick_divisor = divisor;
        }
        if let Some(capacity) = positive_int(settings, "request_capacity")? {
            config.request_capacity = capacity;
        }
        if let Some(capacity) = positive_int(settings, "channel_capacity")? {
            config.channel_capacity = capacity;
        }
        config.show_fps = settings.get_bool(section, "show_fps");
        config.verbose = settings.get_bool(section, "verbose");

        Ok(config)
    }
}

//--- Helpers -------------------------------------------------------------

fn positive_int<T: TryFrom<i64>>(settings: &Settings, key: &str) -> Result<Option<T>, SettingsError> {
    match settings.get_int(DEFAULT_SECTION, key)? {
        None => Ok(None),
        Some(value) if value > 0 => T::try_from(value)
            .map(Some)
            .map_err(|_| invalid(key, value.to_string(), "positive integer")),
        Some(value) => Err(invalid(key, value.to_string(), "positive integer")),
    }
}

fn positive_float(settings: &Settings, key: &str) -> Result<Option<f64>, SettingsError> {
    match settings.get_float(DEFAULT_SECTION, key)? {
        Some(value) if !(value.is_finite() && value > 0.0) => {
            Err(invalid(key, value.to_string(), "positive number"))
        }
        other => Ok(other),
    }
}

fn invalid(key: &str, value: String, expected: &'static str) -> SettingsError {
    SettingsError::InvalidValue {
        section: DEFAULT_SECTION.to_owned(),
        key: key.to_owned(),
        value,
        expected,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GameConfig::default();
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.tps, 60.0);
        assert_eq!(config.tick_divisor, 100.0);
        assert_eq!(config.request_capacity, 1024);
        assert_eq!(config.channel_capacity, 128);
        assert!(!config.show_fps);
    }

    #[test]
    fn settings_override_defaults() {
        let settings = Settings::parse(
            "width=800\nheight=600\ntitle=Robot Trial\ntps=30\nshow_fps=yes\nrequest_capacity=64\n",
        )
        .unwrap();
        let config = GameConfig::from_settings(&settings).unwrap();

        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.title, "Robot Trial");
        assert_eq!(config.tps, 30.0);
        assert!(config.show_fps);
        assert!(!config.verbose);
        assert_eq!(config.request_capacity, 64);
        assert_eq!(config.tick_divisor, 100.0);
    }

    #[test]
    fn rejects_non_positive_values() {
        for text in ["width=0\n", "tps=-5\n", "request_capacity=0\n", "tick_divisor=0\n"] {
            let settings = Settings::parse(text).unwrap();
            assert!(
                matches!(
                    GameConfig::from_settings(&settings),
                    Err(SettingsError::InvalidValue { .. })
                ),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn sectioned_keys_are_ignored() {
        let settings = Settings::parse("[other]\nwidth=10\n").unwrap();
        assert_eq!(GameConfig::from_settings(&settings).unwrap().width, 640);
    }
}
