//! Mission playback — state machine, tick scheduler and clock driver.

pub mod driver;
pub mod scheduler;
pub mod state;

pub use scheduler::MissionPlayer;
pub use state::PlayerState;
