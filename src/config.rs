//! Persisted settings
//!
//! One value survives between sessions: the victory threshold. Read at
//! startup, written back whenever it changes. A missing file means defaults;
//! a corrupt file is an error rather than a silent reset.

use crate::game::state::GameConfig;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub victory_threshold: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            victory_threshold: GameConfig::default().victory_threshold,
        }
    }
}

impl Settings {
    /// Load settings, falling back to defaults when no file exists yet.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Change the threshold and persist it in one step.
    pub fn set_victory_threshold(&mut self, threshold: u32, path: &Path) -> Result<()> {
        self.victory_threshold = threshold;
        self.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.victory_threshold, 40);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.set_victory_threshold(55, &path).unwrap();

        let reloaded = Settings::load(&path).unwrap();
        assert_eq!(reloaded.victory_threshold, 55);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        assert!(Settings::load(&path).is_err());
    }
}
