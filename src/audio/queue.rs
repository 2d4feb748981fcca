//! The multi-track audio queue — sequences exactly one resource at a time.
//!
//! # Lifecycle
//!
//! ```text
//! set_tracks([a, noise5, b])
//!   └─▶ resolve "a", play                       (pending: [noise5, b])
//! tick_second × duration(a)
//!   └─▶ "a" finished → resolve "noise", play,
//!       forced countdown = 5                    (pending: [b])
//! tick_second × 5
//!   └─▶ countdown hits 0 → force_to_end →
//!       finished → resolve "b", play            (pending: [])
//! tick_second × duration(b)
//!   └─▶ "b" finished → pending empty →
//!       looping alarm engaged                   (terminal until set_tracks/stop)
//! ```
//!
//! Completion is polled at tick resolution rather than delivered through
//! backend callbacks: [`AudioQueue::tick_second`] runs on the scheduler's
//! injected clock, so the whole sequence above is deterministic in tests
//! and the forced `noise` countdown freezes while the mission is paused.

use std::collections::VecDeque;

use super::provider::{noise_duration, AudioHandle, AudioResourceProvider, ALARM_TRACK, NOISE_TRACK};

// ---------------------------------------------------------------------------
// AudioQueue
// ---------------------------------------------------------------------------

/// FIFO track sequencer owned by the scheduler.
///
/// At most one resource is attached at a time.  When the pending list runs
/// dry the queue engages the looping alarm fallback, which is terminal:
/// only [`set_tracks`](Self::set_tracks) or [`stop`](Self::stop) replace
/// it.
pub struct AudioQueue {
    provider: Box<dyn AudioResourceProvider>,
    pending: VecDeque<String>,
    current: Option<Current>,
    alarm: bool,
}

/// The currently attached resource, plus the remaining forced duration of
/// a `noise<N>` segment.
struct Current {
    handle: Box<dyn AudioHandle>,
    forced_left: Option<u32>,
}

impl AudioQueue {
    pub fn new(provider: Box<dyn AudioResourceProvider>) -> Self {
        Self {
            provider,
            pending: VecDeque::new(),
            current: None,
            alarm: false,
        }
    }

    /// Replace the queue's contents with `tracks` and immediately start the
    /// first entry (or the alarm fallback if `tracks` is empty).
    ///
    /// The caller's list is copied; consumption never touches it.
    pub fn set_tracks(&mut self, tracks: &[String]) {
        self.detach_current();
        self.alarm = false;
        self.pending = tracks.iter().cloned().collect();
        self.advance();
    }

    /// Pop and start the next pending track; engage the looping alarm when
    /// none remain.
    ///
    /// A track that fails to resolve is logged and skipped — resource
    /// readiness is the provider's concern, never fatal here.
    pub fn advance(&mut self) {
        loop {
            let Some(track) = self.pending.pop_front() else {
                self.engage_alarm();
                return;
            };
            // "noise<N>" shares one resource and carries a forced duration.
            let (resource, forced_left) = match noise_duration(&track) {
                Some(secs) => (NOISE_TRACK, Some(secs)),
                None => (track.as_str(), None),
            };
            match self.provider.resolve(resource) {
                Ok(mut handle) => {
                    handle.play();
                    self.current = Some(Current {
                        handle,
                        forced_left,
                    });
                    return;
                }
                Err(e) => {
                    log::warn!("audio: skipping track {track:?}: {e}");
                }
            }
        }
    }

    /// Resume the attached resource (whole-mission resume, not track
    /// advancement).
    pub fn play(&mut self) {
        if let Some(current) = &mut self.current {
            current.handle.play();
        }
    }

    /// Suspend the attached resource without changing queue position.
    pub fn pause(&mut self) {
        if let Some(current) = &mut self.current {
            current.handle.pause();
        }
    }

    /// Suspend and reset the attached resource and clear the pending list.
    ///
    /// Does *not* engage the alarm — the alarm is purely an "exhausted
    /// while ticking" behaviour.
    pub fn stop(&mut self) {
        self.detach_current();
        self.pending.clear();
        self.alarm = false;
    }

    /// Advance playback by one whole second of mission clock.
    ///
    /// Drives the forced-duration countdown of a noise segment and advances
    /// past any finished resource.  The engaged alarm is never replaced
    /// here.
    pub fn tick_second(&mut self) {
        if self.alarm {
            return;
        }
        let Some(current) = &mut self.current else {
            return;
        };
        current.handle.tick_second();
        if let Some(left) = &mut current.forced_left {
            *left = left.saturating_sub(1);
            if *left == 0 {
                // Forcing the position to the end triggers the same
                // completion path as natural playback; the noise resource's
                // true duration is assumed to be longer, so this is the one
                // completion the segment sees.
                current.handle.force_to_end();
                current.forced_left = None;
            }
        }
        if current.handle.is_finished() {
            self.advance();
        }
    }

    /// `true` while the terminal looping alarm is engaged.
    pub fn is_alarm_engaged(&self) -> bool {
        self.alarm
    }

    /// Number of tracks still waiting behind the attached one.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Suspend and rewind the attached resource, leaving it attached but
    /// inert: a reset resource is not finished, so ticking never advances
    /// past it.
    fn detach_current(&mut self) {
        if let Some(current) = &mut self.current {
            current.handle.pause();
            current.handle.reset();
            current.forced_left = None;
        }
    }

    fn engage_alarm(&mut self) {
        match self.provider.resolve(ALARM_TRACK) {
            Ok(mut handle) => {
                handle.set_looping(true);
                handle.play();
                self.current = Some(Current {
                    handle,
                    forced_left: None,
                });
            }
            Err(e) => {
                log::warn!("audio: alarm fallback unavailable: {e}");
                self.current = None;
            }
        }
        self.alarm = true;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
