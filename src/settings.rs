//! Settings persistence using TOML
//!
//! Stored in ~/.config/tetris-srs/settings.toml (or platform equivalent)

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::board::{COLUMNS, VISIBLE_ROWS};

/// Engine and runner settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playfield size
    pub board: BoardSettings,
    /// Piece randomizer
    pub randomizer: RandomizerSettings,
    /// Headless autoplay run
    pub autoplay: AutoplaySettings,
    /// Log output
    pub logging: LoggingSettings,
}

/// Playfield size (the spawn buffer is always added on top)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub visible_rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomizerSettings {
    /// Fixed bag seed; random when absent
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplaySettings {
    /// Pieces to drop before stopping
    pub pieces: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive used when RUST_LOG is unset
    pub filter: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            visible_rows: VISIBLE_ROWS,
            columns: COLUMNS,
        }
    }
}

impl Default for AutoplaySettings {
    fn default() -> Self {
        Self { pieces: 200 }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "tetris_srs=debug".to_string(),
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "tetris-srs", "tetris-srs")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the default settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from the default location, or fall back to defaults
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a file. Missing or malformed files give defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Parse and validate settings text
    pub fn parse(contents: &str) -> Result<Self, String> {
        let settings: Settings =
            toml::from_str(contents).map_err(|e| format!("Failed to parse: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject board sizes the engine cannot play on
    pub fn validate(&self) -> Result<(), String> {
        if self.board.visible_rows < 4 || self.board.columns < 4 {
            return Err(format!(
                "Board must be at least 4x4, got {}x{}",
                self.board.visible_rows, self.board.columns
            ));
        }
        Ok(())
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), String> {
        let Some(path) = Self::settings_path() else {
            return Err("Could not determine settings path".to_string());
        };
        self.save_to(&path)
    }

    /// Save settings to a file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| format!("Failed to create config dir: {}", e))?;
        }

        let contents =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize: {}", e))?;

        fs::write(path, contents).map_err(|e| format!("Failed to write settings: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.board.visible_rows, 20);
        assert_eq!(settings.board.columns, 10);
        assert_eq!(settings.randomizer.seed, None);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::parse("[randomizer]\nseed = 12\n").unwrap();
        assert_eq!(settings.randomizer.seed, Some(12));
        assert_eq!(settings.board, BoardSettings::default());
        assert_eq!(settings.autoplay.pieces, 200);
    }

    #[test]
    fn test_rejects_tiny_board() {
        let err = Settings::parse("[board]\nvisible_rows = 3\n").unwrap_err();
        assert!(err.contains("4x4"), "{err}");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let mut settings = Settings::default();
        settings.board.columns = 12;
        settings.randomizer.seed = Some(5);
        settings.save_to(&path).unwrap();

        assert_eq!(Settings::load_from(&path), settings);
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "board = [").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());
        assert_eq!(
            Settings::load_from(&dir.path().join("missing.toml")),
            Settings::default()
        );
    }
}
