//! Audio resource resolution — the seam between the queue and a real
//! audio backend.
//!
//! [`AudioResourceProvider`] resolves a track identifier to an
//! [`AudioHandle`], the single playable resource the queue owns at a time.
//! Handles are tick-driven: the queue advances their notion of time by
//! calling [`AudioHandle::tick_second`] once per scheduler tick, so
//! playback sequencing is deterministic under a virtual clock.
//!
//! [`SilentProvider`] is the production stand-in used by the console
//! player: it honours the full handle contract (looping, forced
//! completion, pause/reset) without producing sound.  Mock handles for
//! tests live in [`mock`].

use thiserror::Error;

// ---------------------------------------------------------------------------
// Track naming conventions
// ---------------------------------------------------------------------------

/// Shared resource behind every `noise<N>` pseudo-track.
pub const NOISE_TRACK: &str = "noise";

/// Terminal looping fallback engaged when the queue runs dry.
pub const ALARM_TRACK: &str = "alarm5";

/// Parse the forced duration out of a `noise<N>` pseudo-track identifier.
///
/// Returns `None` for every other identifier (including a bare `"noise"`),
/// which is then resolved as a regular named track.
pub fn noise_duration(track: &str) -> Option<u32> {
    track
        .strip_prefix(NOISE_TRACK)
        .filter(|rest| !rest.is_empty())
        .and_then(|rest| rest.parse().ok())
}

// ---------------------------------------------------------------------------
// AudioError
// ---------------------------------------------------------------------------

/// Errors from track resolution.
///
/// Resolution failures are never fatal to playback — the queue logs them
/// and skips to the next pending track.
#[derive(Debug, Clone, Error)]
pub enum AudioError {
    /// No resource is registered under the given identifier.
    #[error("unknown audio track: {0}")]
    UnknownTrack(String),

    /// The backend exists but cannot play right now (device lost, resource
    /// not yet loaded, …).
    #[error("audio backend unavailable: {0}")]
    Backend(String),
}

// ---------------------------------------------------------------------------
// AudioHandle
// ---------------------------------------------------------------------------

/// A single attached audio resource.
///
/// # Contract
///
/// - [`tick_second`](Self::tick_second) advances playback time by one whole
///   second while the handle is playing; it is the only clock the handle
///   sees.
/// - [`force_to_end`](Self::force_to_end) seeks to the end position, after
///   which [`is_finished`](Self::is_finished) reports `true` — the same
///   observable outcome as natural completion.
/// - A looping handle never finishes.
pub trait AudioHandle {
    /// Start or resume playback.
    fn play(&mut self);

    /// Suspend playback; position is retained.
    fn pause(&mut self);

    /// Seek back to the start position and clear a forced completion.
    fn reset(&mut self);

    /// Seek to the end position, triggering completion.
    fn force_to_end(&mut self);

    /// Loop indefinitely instead of completing.
    fn set_looping(&mut self, looping: bool);

    /// `true` once playback has run (or been forced) to the end.
    fn is_finished(&self) -> bool;

    /// Advance playback time by one second while playing.
    fn tick_second(&mut self);
}

// ---------------------------------------------------------------------------
// AudioResourceProvider
// ---------------------------------------------------------------------------

/// Resolves track identifiers to playable handles.
///
/// Object-safe so the queue can hold it behind a `Box<dyn …>`.
pub trait AudioResourceProvider {
    /// Resolve `track` to a fresh handle, positioned at the start and
    /// paused.
    fn resolve(&self, track: &str) -> Result<Box<dyn AudioHandle>, AudioError>;
}

// Compile-time assertion: Box<dyn AudioResourceProvider> must be
// constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn AudioResourceProvider>, _: Box<dyn AudioHandle>) {}
};

// ---------------------------------------------------------------------------
// SilentProvider
// ---------------------------------------------------------------------------

/// Production stand-in that "plays" every track silently for a nominal
/// number of seconds.
///
/// Lets the console player sequence a whole mission with correct timing
/// until a real audio backend is wired in.  The shared noise resource gets
/// a long nominal duration so the forced-completion timer always wins, as
/// the queue assumes.
#[derive(Debug, Clone)]
pub struct SilentProvider {
    /// Nominal duration of every named track, in seconds.
    pub track_secs: u32,
}

/// Nominal duration of the shared noise resource.  Must exceed any forced
/// duration a mission script can produce.
const NOISE_NOMINAL_SECS: u32 = 120;

impl SilentProvider {
    pub fn new(track_secs: u32) -> Self {
        Self { track_secs }
    }
}

impl Default for SilentProvider {
    fn default() -> Self {
        Self::new(3)
    }
}

impl AudioResourceProvider for SilentProvider {
    fn resolve(&self, track: &str) -> Result<Box<dyn AudioHandle>, AudioError> {
        let duration = if track == NOISE_TRACK {
            NOISE_NOMINAL_SECS
        } else {
            self.track_secs
        };
        Ok(Box::new(SilentHandle {
            track: track.to_string(),
            duration,
            remaining: duration,
            playing: false,
            looping: false,
            forced: false,
        }))
    }
}

/// Handle returned by [`SilentProvider`]; counts down whole seconds.
#[derive(Debug)]
struct SilentHandle {
    track: String,
    duration: u32,
    remaining: u32,
    playing: bool,
    looping: bool,
    forced: bool,
}

impl AudioHandle for SilentHandle {
    fn play(&mut self) {
        if !self.playing {
            log::debug!("audio: playing {:?}", self.track);
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn reset(&mut self) {
        self.remaining = self.duration;
        self.forced = false;
    }

    fn force_to_end(&mut self) {
        self.remaining = 0;
        self.forced = true;
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn is_finished(&self) -> bool {
        !self.looping && (self.forced || self.remaining == 0)
    }

    fn tick_second(&mut self) {
        if self.playing && !self.looping {
            self.remaining = self.remaining.saturating_sub(1);
        }
    }
}

// ---------------------------------------------------------------------------
// Mock provider (test-only)
// ---------------------------------------------------------------------------


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
