//! Once-per-second tick driver.
//!
//! The scheduler is deliberately synchronous; this is the one place the
//! mission clock meets wall-clock time.  [`run`] ticks the player on a
//! one-second [`tokio::time::interval`] until playback leaves the
//! `Running` state, so pausing the player from elsewhere simply ends the
//! loop and resuming starts a fresh one.

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};

use super::scheduler::MissionPlayer;

/// Drive `player` from its current state to the end of the mission (or
/// until it is paused externally).
///
/// Calls [`MissionPlayer::play`] first, which performs the initial tick
/// synchronously; every subsequent tick waits one second.  Missed ticks
/// are skipped rather than bursted, keeping the mission clock aligned
/// with wall time under scheduling delay.
pub async fn run(player: &mut MissionPlayer) {
    player.play();
    let mut interval = time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first interval tick completes immediately; play() already ticked.
    interval.tick().await;
    while player.state().is_running() {
        interval.tick().await;
        if player.state().is_running() {
            player.tick();
        }
    }
    log::debug!("driver: loop ended in state {}", player.state().label());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentProvider;
    use crate::event::{Event, Timeline};
    use crate::player::PlayerState;
    use crate::ui::{ConsoleDisplay, ConsoleView, LogWidgetHost};

    fn player(events: Vec<Event>) -> MissionPlayer {
        MissionPlayer::new(
            Timeline::new(events),
            Box::new(SilentProvider::default()),
            Box::new(LogWidgetHost),
            Box::new(ConsoleDisplay::new()),
            Box::new(ConsoleView),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn drives_a_short_mission_to_its_end() {
        // Timeline ends at 00:08 (incoming data at 00:03 + 5 seconds).
        let mut p = player(vec![Event::IncomingData { start: 3 }]);

        run(&mut p).await;

        assert_eq!(p.state(), PlayerState::Ended);
        assert_eq!(p.elapsed_seconds(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn returns_immediately_when_playback_ends_on_the_first_tick() {
        // An empty event list still carries the start marker; the clock
        // runs through its 7-second window.
        let mut p = player(Vec::new());

        run(&mut p).await;

        assert_eq!(p.state(), PlayerState::Ended);
        assert_eq!(p.elapsed_seconds(), 7);
    }
}
