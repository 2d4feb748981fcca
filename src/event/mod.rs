//! Mission event model — the tagged records that make up a mission timeline.
//!
//! A mission is an ordered list of [`Event`]s produced by an external
//! generator (or parsed from a script, see [`crate::script`]).  Each event
//! carries everything the player needs to present it: a start/end second
//! window, a headline text, an ordered audio track sequence, an optional
//! transcript line and a [`WidgetKind`] selecting its visual presenter.
//!
//! Events are constructed once and never mutated; all projections
//! (`end()`, `tracks()`, `transcript_line()`, …) are derived on demand from
//! the variant's fields.

pub mod timeline;

pub use timeline::Timeline;

// ---------------------------------------------------------------------------
// Time formatting
// ---------------------------------------------------------------------------

/// Format a whole-second offset as `mm:ss` (e.g. `125` → `"02:05"`).
///
/// Shared by the scheduler's time display and the transcript lines.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

// ---------------------------------------------------------------------------
// Zone
// ---------------------------------------------------------------------------

/// One of the three ship zones an external threat can appear on.
///
/// Internal threats have no zone — they are modelled as `Option<Zone>` being
/// `None` on [`Event::Alert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Red,
    White,
    Blue,
}

impl Zone {
    /// Capitalised display name, as used in transcript lines.
    pub fn name(&self) -> &'static str {
        match self {
            Zone::Red => "Red",
            Zone::White => "White",
            Zone::Blue => "Blue",
        }
    }

    /// Lower-case suffix of the `zone_*` audio tracks.
    pub fn track_suffix(&self) -> &'static str {
        match self {
            Zone::Red => "red",
            Zone::White => "white",
            Zone::Blue => "blue",
        }
    }
}

impl std::str::FromStr for Zone {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Red" | "red" => Ok(Zone::Red),
            "White" | "white" => Ok(Zone::White),
            "Blue" | "blue" => Ok(Zone::Blue),
            _ => Err(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Threat card colour announced with each alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    White,
    Yellow,
    Red,
}

impl Difficulty {
    /// Capitalised display name, as used in transcript lines.
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::White => "White",
            Difficulty::Yellow => "Yellow",
            Difficulty::Red => "Red",
        }
    }

    /// Parse the single-letter code used by mission options (`w`/`y`/`r`).
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'w' => Some(Difficulty::White),
            'y' => Some(Difficulty::Yellow),
            'r' => Some(Difficulty::Red),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// PhaseMarker
// ---------------------------------------------------------------------------

/// How far ahead of the phase boundary a [`Event::Phase`] announcement runs.
///
/// Only [`PhaseMarker::Seven`] marks the actual boundary: the phase ends
/// seven seconds after that announcement begins.  `Sixty` and `Twenty` are
/// pure advance warnings and never move the phase counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseMarker {
    Sixty,
    Twenty,
    Seven,
}

impl PhaseMarker {
    /// Seconds between the announcement start and the phase boundary.
    pub fn seconds(&self) -> u32 {
        match self {
            PhaseMarker::Sixty => 60,
            PhaseMarker::Twenty => 20,
            PhaseMarker::Seven => 7,
        }
    }
}

// ---------------------------------------------------------------------------
// WidgetKind
// ---------------------------------------------------------------------------

/// Tag selecting the visual presenter for an event.
///
/// The player never draws anything itself; it asks its
/// [`WidgetHost`](crate::ui::WidgetHost) to instantiate a widget of this
/// kind and only drives its play/pause/hide lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Continuous ambient display shown whenever no event is active.
    Radar,
    Alert,
    IncomingData,
    DataTransfer,
    CommunicationsDown,
    /// Circular phase banner; flagged to redraw once per second so its
    /// countdown text can track the clock.
    PhaseBanner,
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A single timeline entry.
///
/// | Variant              | Window              | Tracks                                   |
/// |----------------------|---------------------|------------------------------------------|
/// | `Start`              | `0..7`              | `begin`                                  |
/// | `Alert`              | `start..start+15`   | `alert`, announcement, `repeat`, announcement |
/// | `IncomingData`       | `start..start+5`    | `incoming_data`                          |
/// | `DataTransfer`       | `start..start+13`   | `data_transfer`                          |
/// | `CommunicationsDown` | `start..start+len+2`| `comm_down`, `noise<len-3>`, `comm_restored` |
/// | `Phase`              | see [`Event::end`]  | `phase<n>_<marker>`                      |
///
/// The timeline invariants (sorted ascending by start, no colliding starts)
/// are preconditions of the generator and not enforced here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Synthetic marker prepended to every timeline; announces "begin".
    Start,
    /// Threat alert.  `zone` is `None` for internal threats.
    Alert {
        start: u32,
        turn: u8,
        serious: bool,
        zone: Option<Zone>,
        difficulty: Difficulty,
    },
    IncomingData {
        start: u32,
    },
    DataTransfer {
        start: u32,
    },
    /// Communication outage of `length` seconds (at least 5).
    CommunicationsDown {
        start: u32,
        length: u32,
    },
    /// Phase-end announcement.  `last_phase` selects the longer "operation
    /// has ended" narration for the final boundary.
    Phase {
        start: u32,
        phase: u8,
        marker: PhaseMarker,
        last_phase: bool,
    },
}

impl Event {
    /// The synthetic start-of-mission marker (fixed window `0..7`).
    pub fn start_marker() -> Self {
        Event::Start
    }

    /// Communication outage; `length` is clamped to the 5-second minimum the
    /// narration needs (`comm_down` + at least 2 seconds of noise +
    /// `comm_restored`).
    pub fn communications_down(start: u32, length: u32) -> Self {
        Event::CommunicationsDown {
            start,
            length: length.max(5),
        }
    }

    /// First second of the event window.
    pub fn start(&self) -> u32 {
        match self {
            Event::Start => 0,
            Event::Alert { start, .. }
            | Event::IncomingData { start }
            | Event::DataTransfer { start }
            | Event::CommunicationsDown { start, .. }
            | Event::Phase { start, .. } => *start,
        }
    }

    /// First second *after* the event window; the event deactivates once the
    /// clock reaches this value.
    pub fn end(&self) -> u32 {
        match self {
            Event::Start => 7,
            Event::Alert { start, .. } => start + 15,
            Event::IncomingData { start } => start + 5,
            Event::DataTransfer { start } => start + 13,
            Event::CommunicationsDown { start, length } => start + length + 2,
            Event::Phase {
                start,
                marker,
                last_phase,
                ..
            } => {
                // The narration length depends on the marker: the boundary
                // announcement keeps talking through the countdown.
                let length = match marker {
                    PhaseMarker::Seven => {
                        if *last_phase {
                            14
                        } else {
                            13
                        }
                    }
                    _ => 5,
                };
                start + length
            }
        }
    }

    /// Headline shown while the event is active; empty for events whose
    /// widget carries its own text.
    pub fn display_text(&self) -> &'static str {
        match self {
            Event::Alert { serious: true, .. } => "Serious Threat",
            Event::Alert { serious: false, .. } => "Threat",
            Event::IncomingData { .. } => "Incoming Data",
            Event::DataTransfer { .. } => "Data Transfer",
            Event::Start | Event::CommunicationsDown { .. } | Event::Phase { .. } => "",
        }
    }

    /// Ordered audio track sequence fed to the
    /// [`AudioQueue`](crate::audio::AudioQueue) when the event activates.
    pub fn tracks(&self) -> Vec<String> {
        match self {
            Event::Start => vec!["begin".into()],
            Event::Alert {
                turn,
                serious,
                zone,
                ..
            } => {
                // The announcement proper, spoken twice with "repeat" between.
                let mut announcement = vec![format!("time{turn}")];
                match zone {
                    Some(zone) => {
                        announcement.push(
                            if *serious { "serious_threat" } else { "threat" }.to_string(),
                        );
                        announcement.push(format!("zone_{}", zone.track_suffix()));
                    }
                    None => {
                        announcement.push(
                            if *serious {
                                "serious_internal"
                            } else {
                                "internal_threat"
                            }
                            .to_string(),
                        );
                    }
                }
                let mut tracks = vec!["alert".to_string()];
                tracks.extend(announcement.iter().cloned());
                tracks.push("repeat".into());
                tracks.extend(announcement);
                tracks
            }
            Event::IncomingData { .. } => vec!["incoming_data".into()],
            Event::DataTransfer { .. } => vec!["data_transfer".into()],
            Event::CommunicationsDown { length, .. } => vec![
                "comm_down".into(),
                format!("noise{}", length - 3),
                "comm_restored".into(),
            ],
            Event::Phase { phase, marker, .. } => {
                vec![format!("phase{phase}_{}", marker.seconds())]
            }
        }
    }

    /// Cumulative-log line for this event, or `None` for events that are not
    /// announced (the start marker, plain advance warnings).
    pub fn transcript_line(&self) -> Option<String> {
        match self {
            Event::Start => None,
            Event::Alert {
                start,
                turn,
                serious,
                zone,
                difficulty,
            } => {
                let mut line = format!(
                    "{} - Time T+{turn} {} ",
                    format_time(*start),
                    difficulty.name()
                );
                if *serious {
                    line.push_str("Serious ");
                }
                if zone.is_none() {
                    line.push_str("Internal ");
                }
                line.push_str("Threat");
                if let Some(zone) = zone {
                    line.push_str(&format!(" on Zone {}", zone.name()));
                }
                Some(line)
            }
            Event::IncomingData { start } => {
                Some(format!("{} - Incoming Data", format_time(*start)))
            }
            Event::DataTransfer { start } => {
                Some(format!("{} - Data Transfer", format_time(*start)))
            }
            Event::CommunicationsDown { start, length } => Some(format!(
                "{} - Communications Down ({length} seconds)",
                format_time(*start)
            )),
            Event::Phase {
                start,
                phase,
                marker: PhaseMarker::Seven,
                ..
            } => Some(format!(
                "{} - Phase {phase} ends",
                format_time(start + 7)
            )),
            Event::Phase { .. } => None,
        }
    }

    /// The visual presenter for this event.
    pub fn widget_kind(&self) -> WidgetKind {
        match self {
            Event::Start | Event::Phase { .. } => WidgetKind::PhaseBanner,
            Event::Alert { .. } => WidgetKind::Alert,
            Event::IncomingData { .. } => WidgetKind::IncomingData,
            Event::DataTransfer { .. } => WidgetKind::DataTransfer,
            Event::CommunicationsDown { .. } => WidgetKind::CommunicationsDown,
        }
    }

    /// Current mission phase as seen from this event at clock second `t`, or
    /// `None` for events that carry no phase information.
    ///
    /// A boundary announcement ([`PhaseMarker::Seven`]) flips to the next
    /// phase once the clock passes seven seconds into its window; advance
    /// warnings never advance the phase.
    pub fn phase_at(&self, t: i64) -> Option<u8> {
        match self {
            Event::Start => Some(1),
            Event::Phase {
                start,
                phase,
                marker,
                ..
            } => {
                if *marker == PhaseMarker::Seven && t >= i64::from(start + 7) {
                    Some(phase + 1)
                } else {
                    Some(*phase)
                }
            }
            _ => None,
        }
    }

    /// Clock second at which the announced phase actually ends, or `None`
    /// for non-phase events.
    pub fn phase_end(&self) -> Option<u32> {
        match self {
            Event::Phase { start, marker, .. } => Some(start + marker.seconds()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
