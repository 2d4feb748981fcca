//! Timed playback of board-game mission timelines.
//!
//! A mission is an ordered list of [`event::Event`]s over a whole-second
//! clock.  [`player::MissionPlayer`] schedules them: it advances the clock
//! once per second, activates and expires events, sequences their narration
//! tracks through [`audio::AudioQueue`], and keeps the time/phase/
//! announcement texts and the cumulative transcript current on its display
//! collaborators.
//!
//! The crate draws nothing and produces no real sound itself; presentation
//! and audio output sit behind the trait seams in [`ui`] and
//! [`audio::AudioResourceProvider`].

pub mod audio;
pub mod config;
pub mod event;
pub mod player;
pub mod script;
pub mod ui;

pub use event::{Event, Timeline};
pub use player::{MissionPlayer, PlayerState};
