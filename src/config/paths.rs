//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings + custom missions):
//!   Windows: %APPDATA%\mission-player\
//!   macOS:   ~/Library/Application Support/mission-player/
//!   Linux:   ~/.config/mission-player/

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml` and the `missions/` folder.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Directory scanned for custom mission script files.
    pub missions_dir: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "mission-player";

    /// Resolves all paths using the `dirs` crate.
    ///
    /// Falls back to the current directory if the platform cannot provide a
    /// standard path (should be extremely rare in practice).
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let missions_dir = config_dir.join("missions");

        Self {
            config_dir,
            settings_file,
            missions_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
