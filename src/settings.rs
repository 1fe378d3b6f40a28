//! Game settings and preferences
//!
//! Persisted as JSON next to the unlock file. Missing fields fall back to
//! their defaults, so a partial file only overrides what it names.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::sim::state::MAX_PARTICLES;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed (random per launch when unset)
    pub seed: Option<u64>,

    // === Visual Effects ===
    /// Screen shake on player hits
    pub screen_shake: bool,
    /// Blood particles
    pub particles: bool,
    /// Particle cap (oldest evicted first)
    pub max_particles: usize,

    // === Accessibility ===
    /// Reduced motion (disables shake)
    pub reduced_motion: bool,

    // === Storage ===
    /// Where unlocked weapons are kept
    pub unlocks_path: String,

    // === Native demo ===
    /// Frames the headless attract mode runs for
    pub demo_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            screen_shake: true,
            particles: true,
            max_particles: MAX_PARTICLES,
            reduced_motion: false,
            unlocks_path: "zombie_survivor_unlocks.json".to_string(),
            demo_frames: 60 * 60 * 3,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.max_particles
        }
    }

    /// Read settings from a JSON file
    pub fn read(path: &Path) -> Result<Self, StorageError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load settings, using defaults when the file is absent or unreadable
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(StorageError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring settings at {} ({err})", path.display());
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(self).map_err(StorageError::Encode)?;
        fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"seed": 42, "particles": false}"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert!(settings.screen_shake);
        assert_eq!(settings.max_particles(), 0);
        assert_eq!(settings.unlocks_path, Settings::default().unlocks_path);
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("zombie_survivor_no_such_settings.json");
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn test_garbage_file_reads_as_corrupt() {
        let path = std::env::temp_dir().join(format!(
            "zombie_survivor_bad_settings_{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ seed: ").unwrap();
        assert!(matches!(Settings::read(&path), Err(StorageError::Corrupt(_))));
        assert_eq!(Settings::load(&path), Settings::default());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "zombie_survivor_settings_{}.json",
            std::process::id()
        ));
        let settings = Settings {
            seed: Some(7),
            max_particles: 64,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = fs::remove_file(&path);
    }
}
