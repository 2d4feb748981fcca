//! Application entry point — console mission player.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Resolve the mission: built-in name, explicit file path, or a file in
//!    the user missions directory.
//! 4. Parse the script into a timeline.
//! 5. Either print the mission log (`--log`) or build a
//!    [`MissionPlayer`] with console collaborators and drive it to the end
//!    of the mission on a current-thread tokio runtime.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;

use mission_player::{
    audio::SilentProvider,
    config::{AppConfig, AppPaths},
    player::driver,
    script::{self, missions, DifficultyMix},
    ui::{ConsoleDisplay, ConsoleView, LogWidgetHost},
    MissionPlayer,
};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Play a scripted mission timeline in the console.
#[derive(Debug, Parser)]
#[command(name = "mission-player", version, about)]
struct Cli {
    /// Built-in mission name (see --list) or path to a mission script file.
    mission: Option<String>,

    /// Crew size; unconfirmed reports only play with 5.
    #[arg(short, long)]
    players: Option<u8>,

    /// Threat-deck colours: w, y, r, or a two-letter mix such as wy.
    #[arg(short, long)]
    difficulty: Option<String>,

    /// Print the mission log instead of playing.
    #[arg(long)]
    log: bool,

    /// List the built-in missions and exit.
    #[arg(long)]
    list: bool,
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.list {
        for name in missions::names() {
            println!("{name}");
        }
        return Ok(());
    }

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    let players = cli.players.unwrap_or(config.mission.players);
    if !(4..=5).contains(&players) {
        bail!("crew size must be 4 or 5, got {players}");
    }
    let difficulty: DifficultyMix = cli
        .difficulty
        .as_deref()
        .unwrap_or(&config.mission.difficulty)
        .parse()?;

    let name = cli
        .mission
        .unwrap_or_else(|| config.mission.default_mission.clone());
    let text = mission_text(&name)?;
    let timeline = script::parse_script(&text, players, difficulty)
        .with_context(|| format!("failed to parse mission {name:?}"))?;

    if cli.log {
        let end = timeline.last_end().unwrap_or(0);
        println!("{}", timeline.transcript_at(i64::from(end)));
        return Ok(());
    }

    log::info!(
        "playing {name} ({players} players, {} events)",
        timeline.len()
    );
    let mut player = MissionPlayer::new(
        timeline,
        Box::new(SilentProvider::new(config.audio.track_secs)),
        Box::new(LogWidgetHost),
        Box::new(ConsoleDisplay::new()),
        Box::new(ConsoleView),
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;
    rt.block_on(driver::run(&mut player));

    Ok(())
}

/// Resolve a mission argument to script text: a built-in name first, then a
/// filesystem path, then a file in the user missions directory.
fn mission_text(name: &str) -> Result<String> {
    if let Some(text) = missions::builtin(name) {
        return Ok(text.to_string());
    }
    let path = Path::new(name);
    if path.exists() {
        return fs::read_to_string(path).with_context(|| format!("failed to read {name}"));
    }
    let user_path = AppPaths::new().missions_dir.join(name);
    if user_path.exists() {
        return fs::read_to_string(&user_path)
            .with_context(|| format!("failed to read {}", user_path.display()));
    }
    bail!("unknown mission {name:?} (try --list, or pass a script file path)");
}
