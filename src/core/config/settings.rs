//=========================================================================
// Settings
//=========================================================================
//
// Sectioned `key=value` settings file.
//
// Format:
//   # comment            ; also a comment
//   show_fps=yes         (default section)
//   [window]
//   width = 800
//   title = Little Game
//
//   tps=60               (a blank line returns to the default section)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, trace};
use thiserror::Error;

//=== SettingsError =======================================================

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected `[section]` or `key=value`, found `{content}`")]
    MalformedLine { line: usize, content: String },

    #[error("[{section}] {key}: `{value}` is not a valid {expected}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        expected: &'static str,
    },
}

//=== Settings ============================================================

pub const DEFAULT_SECTION: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    sections: HashMap<String, HashMap<String, String>>,
}

impl Settings {
    pub fn new() -> Self {
        let mut sections = HashMap::new();
        sections.insert(DEFAULT_SECTION.to_owned(), HashMap::new());
        Self { sections }
    }

    //--- Loading ----------------------------------------------------------

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::parse(&text)?;
        debug!(
            target: "little::game",
            "Loaded {} settings sections from {}",
            settings.sections.len(),
            path.display()
        );
        Ok(settings)
    }

    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        let mut settings = Self::new();
        let mut current = DEFAULT_SECTION.to_owned();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();

            if line.is_empty() {
                current = DEFAULT_SECTION.to_owned();
                continue;
            }
            if line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let name = name.trim();
                if name.is_empty() {
                    return Err(malformed(index, raw));
                }
                current = name.to_owned();
                settings.sections.entry(current.clone()).or_default();
                continue;
            }

            match line.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    trace!(target: "little::game", "[{}] {} = {}", current, key.trim(), value.trim());
                    settings.set(&current, key.trim(), value.trim());
                }
                _ => return Err(malformed(index, raw)),
            }
        }

        Ok(settings)
    }

    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.sections
            .entry(section.to_owned())
            .or_default()
            .insert(key.to_owned(), value.into());
    }

    //--- Lookup -----------------------------------------------------------

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    pub fn get_str(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key).map(String::as_str)
    }

    /// `true`, `1` and `yes` are true; anything else, or a missing key,
    /// is false.
    pub fn get_bool(&self, section: &str, key: &str) -> bool {
        matches!(self.get_str(section, key), Some("true" | "1" | "yes"))
    }

    pub fn get_int(&self, section: &str, key: &str) -> Result<Option<i64>, SettingsError> {
        self.get_parsed(section, key, "integer")
    }

    pub fn get_float(&self, section: &str, key: &str) -> Result<Option<f64>, SettingsError> {
        self.get_parsed(section, key, "number")
    }

    /// Splits the value on whitespace, then `,`, `;` and tab, taking the
    /// first delimiter that yields more than one item. A value with none
    /// of them is a one-item list.
    pub fn get_list(&self, section: &str, key: &str) -> Option<Vec<String>> {
        let value = self.get_str(section, key)?;

        let by_space: Vec<&str> = value.split_whitespace().collect();
        if by_space.len() > 1 {
            return Some(by_space.into_iter().map(str::to_owned).collect());
        }

        for delimiter in [',', ';', '\t'] {
            let items: Vec<&str> = value.split(delimiter).collect();
            if items.len() > 1 {
                return Some(items.into_iter().map(|s| s.trim().to_owned()).collect());
            }
        }

        Some(vec![value.to_owned()])
    }

    fn get_parsed<T: FromStr>(
        &self,
        section: &str,
        key: &str,
        expected: &'static str,
    ) -> Result<Option<T>, SettingsError> {
        let Some(value) = self.get_str(section, key) else {
            return Ok(None);
        };
        value
            .parse()
            .map(Some)
            .map_err(|_| SettingsError::InvalidValue {
                section: section.to_owned(),
                key: key.to_owned(),
                value: value.to_owned(),
                expected,
            })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

fn malformed(index: usize, raw: &str) -> SettingsError {
    SettingsError::MalformedLine {
        line: index + 1,
        content: raw.to_owned(),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
