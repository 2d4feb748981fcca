//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// MissionConfig
// ---------------------------------------------------------------------------

/// Default mission parameters, overridable per run from the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionConfig {
    /// Crew size (4 or 5).  Unconfirmed reports only play with five.
    pub players: u8,
    /// Threat-deck colour letters (`"w"`, `"y"`, `"r"` or a two-letter mix
    /// such as `"wy"`).
    pub difficulty: String,
    /// Mission started when none is named on the command line.
    pub default_mission: String,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            players: 4,
            difficulty: "w".into(),
            default_mission: "mission1".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AudioConfig
// ---------------------------------------------------------------------------

/// Settings for the audio playback stand-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Nominal length in seconds assumed for every narration track.
    pub track_secs: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { track_secs: 3 }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use mission_player::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default mission parameters.
    pub mission: MissionConfig,
    /// Audio playback settings.
    pub audio: AudioConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
