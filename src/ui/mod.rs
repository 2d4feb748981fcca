//! Presentation seams — the collaborator traits the scheduler drives.
//!
//! The player core never draws, loads assets or looks up screen elements;
//! it talks to three small interfaces instead:
//!
//! - [`WidgetHost`] instantiates a [`Widget`] for an event's
//!   [`WidgetKind`] and the core drives its play/pause/hide lifecycle.
//! - [`DisplaySink`] receives the four text channels (time, phase,
//!   announcement, transcript).
//! - [`ViewSink`] receives fire-and-forget view transitions (mission end,
//!   replay).
//!
//! [`ConsoleDisplay`], [`ConsoleView`] and [`LogWidgetHost`] are the
//! production console implementations; tests use recording doubles
//! defined next to the scheduler tests.

use crate::event::{Event, WidgetKind};

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// A live visual presenter created by the [`WidgetHost`].
///
/// Widgets may own a faster internal animation timer; the core only
/// starts/suspends it via `play`/`pause` and never depends on it for
/// scheduling.
pub trait Widget {
    /// Show the widget and start its animation.
    fn play(&mut self);

    /// Suspend the animation, retaining state for resumption.
    fn pause(&mut self);

    /// Remove the widget from the display.
    fn hide(&mut self);

    /// `true` when the widget must be redrawn on every whole-second tick
    /// (countdown banners) rather than only on its own animation cadence.
    fn draws_each_second(&self) -> bool {
        false
    }

    /// Immediate redraw, invoked once per tick when
    /// [`draws_each_second`](Self::draws_each_second) is `true`.
    fn redraw(&mut self) {}
}

// ---------------------------------------------------------------------------
// WidgetHost
// ---------------------------------------------------------------------------

/// Factory for visual presenters.
///
/// `event` is the activation context (`None` for the ambient radar, which
/// belongs to no event).
pub trait WidgetHost {
    fn create(&self, kind: WidgetKind, event: Option<&Event>) -> Box<dyn Widget>;
}

// ---------------------------------------------------------------------------
// DisplaySink
// ---------------------------------------------------------------------------

/// Receiver for the four text channels the scheduler keeps current.
pub trait DisplaySink {
    /// Mission clock as `mm:ss`, updated every tick.
    fn set_time_text(&mut self, text: &str);

    /// `"Phase N"`, updated while a phase-indicating event is active.
    fn set_phase_text(&mut self, text: &str);

    /// Headline of the active event; cleared on deactivation.
    fn set_announcement_text(&mut self, text: &str);

    /// Cumulative announcement log, recomputed on every activation.
    fn set_transcript_text(&mut self, text: &str);
}

// ---------------------------------------------------------------------------
// ViewSink
// ---------------------------------------------------------------------------

/// Fire-and-forget view-transition signals.
pub trait ViewSink {
    /// The mission reached its end (terminal stop).
    fn mission_ended(&mut self);

    /// Playback was reset back to the in-progress view.
    fn mission_restarted(&mut self);
}

// ---------------------------------------------------------------------------
// ConsoleDisplay
// ---------------------------------------------------------------------------

/// Prints text-channel changes to stdout, deduplicating unchanged values
/// so the once-per-second time update does not drown the announcements.
#[derive(Debug, Default)]
pub struct ConsoleDisplay {
    time: String,
    phase: String,
    announcement: String,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplaySink for ConsoleDisplay {
    fn set_time_text(&mut self, text: &str) {
        if text != self.time {
            self.time = text.to_string();
            log::debug!("clock {text}");
        }
    }

    fn set_phase_text(&mut self, text: &str) {
        if text != self.phase {
            self.phase = text.to_string();
            println!("[{}] === {text} ===", self.time);
        }
    }

    fn set_announcement_text(&mut self, text: &str) {
        if text != self.announcement {
            self.announcement = text.to_string();
            if !text.is_empty() {
                println!("[{}] {text}", self.time);
            }
        }
    }

    fn set_transcript_text(&mut self, _text: &str) {
        // The console player prints announcements as they happen; the full
        // transcript is available up front via `--log`.
    }
}

// ---------------------------------------------------------------------------
// ConsoleView
// ---------------------------------------------------------------------------

/// Console view transitions.
#[derive(Debug, Default)]
pub struct ConsoleView;

impl ViewSink for ConsoleView {
    fn mission_ended(&mut self) {
        println!("=== Mission complete ===");
    }

    fn mission_restarted(&mut self) {
        println!("=== Mission restarted ===");
    }
}

// ---------------------------------------------------------------------------
// LogWidgetHost
// ---------------------------------------------------------------------------

/// Widget host whose widgets only log their lifecycle.
///
/// Stands in for a real drawing surface; the phase banner keeps its
/// redraw-every-second flag so the scheduler's per-tick redraw path stays
/// exercised in production.
#[derive(Debug, Default)]
pub struct LogWidgetHost;

impl WidgetHost for LogWidgetHost {
    fn create(&self, kind: WidgetKind, event: Option<&Event>) -> Box<dyn Widget> {
        log::debug!("widget: create {kind:?} for {event:?}");
        Box::new(LogWidget { kind })
    }
}

struct LogWidget {
    kind: WidgetKind,
}

impl Widget for LogWidget {
    fn play(&mut self) {
        log::debug!("widget: play {:?}", self.kind);
    }

    fn pause(&mut self) {
        log::debug!("widget: pause {:?}", self.kind);
    }

    fn hide(&mut self) {
        log::debug!("widget: hide {:?}", self.kind);
    }

    fn draws_each_second(&self) -> bool {
        self.kind == WidgetKind::PhaseBanner
    }

    fn redraw(&mut self) {
        log::trace!("widget: redraw {:?}", self.kind);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
