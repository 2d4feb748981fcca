//! The immutable event timeline and the cumulative transcript builder.
//!
//! [`Timeline`] wraps the generator's ordered event list with a synthetic
//! [`Event::Start`] marker prepended.  It is read-only for the whole
//! session; the scheduler refers to events by index.

use super::Event;

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// Ordered, read-only list of mission events.
///
/// Construction prepends the synthetic start marker, so even an empty input
/// produces a playable 7-second "mission".  Events must be sorted ascending
/// by start second; colliding start seconds are a violated generator
/// precondition and activation will silently pick the first in list order.
#[derive(Debug, Clone)]
pub struct Timeline {
    events: Vec<Event>,
}

impl Timeline {
    /// Wrap `events` (sorted by start) with the start marker prepended.
    pub fn new(mut events: Vec<Event>) -> Self {
        events.insert(0, Event::start_marker());
        Self { events }
    }

    /// Number of events, including the start marker.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Index of the first event (in list order) whose start equals `t`.
    ///
    /// Linear scan — adequate at tens-of-events scale, and the first-in-list
    /// tie-break is part of the activation contract.
    pub fn event_starting_at(&self, t: u32) -> Option<usize> {
        self.events.iter().position(|e| e.start() == t)
    }

    /// End second of the final event; `None` only for an (unconstructable
    /// via [`Timeline::new`]) empty timeline.  The mission is over once the
    /// clock reaches this value.
    pub fn last_end(&self) -> Option<u32> {
        self.events.last().map(Event::end)
    }

    /// Cumulative announcement log at clock second `t`: the transcript
    /// lines of every event with `start <= t`, in timeline order, joined by
    /// newlines.  Events without a line contribute nothing.
    ///
    /// Linear in event count; recomputed on every activation.
    pub fn transcript_at(&self, t: i64) -> String {
        self.events
            .iter()
            .filter(|e| i64::from(e.start()) <= t)
            .filter_map(Event::transcript_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
