//! Configuration module for the mission player.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for mission and
//! audio defaults, `AppPaths` for cross-platform data directories, and TOML
//! persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, AudioConfig, MissionConfig};
