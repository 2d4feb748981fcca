//! Playback state machine.
//!
//! The transitions are:
//!
//! ```text
//! Stopped ──play()──▶ Running ──pause()──▶ Paused ──play()──▶ Running
//! Running ──tick() terminal condition / stop()──▶ Ended
//! Ended   ──replay()──▶ Stopped ──▶ Running
//! ```
//!
//! `tick()` only executes while `Running`; the once-per-second driver
//! checks [`PlayerState::is_running`] before every tick.

// ---------------------------------------------------------------------------
// PlayerState
// ---------------------------------------------------------------------------

/// States of mission playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Before the first tick (`elapsed_seconds == -1`).
    Stopped,

    /// The once-per-second driver is ticking the clock.
    Running,

    /// Driver cancelled; all state retained for exact resumption.
    Paused,

    /// Terminal: the clock reached the last event's end, or `stop()` was
    /// called explicitly.  Only `replay()` leaves this state.
    Ended,
}

impl PlayerState {
    /// `true` while the tick driver should keep running.
    pub fn is_running(&self) -> bool {
        matches!(self, PlayerState::Running)
    }

    /// `true` once playback has terminally finished.
    pub fn is_ended(&self) -> bool {
        matches!(self, PlayerState::Ended)
    }

    /// A short human-readable label for status displays.
    pub fn label(&self) -> &'static str {
        match self {
            PlayerState::Stopped => "Stopped",
            PlayerState::Running => "Running",
            PlayerState::Paused => "Paused",
            PlayerState::Ended => "Ended",
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        PlayerState::Stopped
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
