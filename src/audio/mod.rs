//! Audio sequencing — track queue → resource provider → playable handle.
//!
//! # Pipeline
//!
//! ```text
//! Event activation → AudioQueue::set_tracks([...])
//!                  → AudioResourceProvider::resolve(track) → AudioHandle
//!                  → scheduler tick → AudioQueue::tick_second()
//!                  → (queue exhausted) → looping alarm fallback
//! ```
//!
//! The queue owns the single attached resource; the scheduler and widgets
//! never touch it directly.  Real sound output is a provider concern — the
//! crate ships [`SilentProvider`] for timing-faithful silent playback.

pub mod provider;
pub mod queue;

pub use provider::{
    noise_duration, AudioError, AudioHandle, AudioResourceProvider, SilentProvider, ALARM_TRACK,
    NOISE_TRACK,
};
pub use queue::AudioQueue;
