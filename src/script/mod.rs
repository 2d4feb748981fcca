//! Mission script parsing.
//!
//! A script is a small line-oriented text format:
//!
//! ```text
//! 3:45 - 7:30 - 10:00
//! AL 0:10 T+2 ST White
//! UA 0:55 T+3 IT
//! ID 2:20
//! CD 2:50 - 3:00
//! DT 3:05
//! ```
//!
//! The first line lists the end times of the two or three mission phases;
//! every following line is one event.  Alert lines carry the threat turn
//! (`T+2`), the threat type (`T`, `IT`, `ST`, `SIT`) and, for external
//! threats, a zone.  `UA` lines are unconfirmed reports and only apply to
//! five-player crews.
//!
//! Parsing produces a [`Timeline`] with the phase-boundary announcements
//! generated at fixed offsets before each phase end.  Malformed input is a
//! [`ScriptError`]; the timeline invariants themselves (ordering, window
//! shapes) hold by construction here.

pub mod missions;

use std::str::FromStr;

use thiserror::Error;

use crate::event::{Difficulty, Event, PhaseMarker, Timeline, Zone};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Mission script parse failures.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script has no lines at all.
    #[error("mission script is empty")]
    Empty,

    /// A time field is not `m:ss`.
    #[error("invalid time {0:?} (expected m:ss)")]
    InvalidTime(String),

    /// The phase line must list two or three end times.
    #[error("expected 2 or 3 phase end times, found {0}")]
    BadPhaseCount(usize),

    /// Phase end times must be strictly increasing.
    #[error("phase end times must be strictly increasing")]
    NonIncreasingPhases,

    /// A difficulty specifier contains letters other than w/y/r.
    #[error("invalid difficulty {0:?} (expected letters w, y, r)")]
    InvalidDifficulty(String),

    /// An event line could not be parsed.  `line` is 1-based within the
    /// script.
    #[error("line {line}: {reason}")]
    BadEventLine { line: usize, reason: String },
}

// ---------------------------------------------------------------------------
// parse_time
// ---------------------------------------------------------------------------

/// Parse a `m:ss` time field (e.g. `"7:30"` → 450).
pub fn parse_time(text: &str) -> Result<u32, ScriptError> {
    let invalid = || ScriptError::InvalidTime(text.to_string());
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    let (minutes, seconds) = text.trim().split_once(':').ok_or_else(invalid)?;
    // u32::from_str would accept a leading '+'; the format is digits only.
    if !digits(minutes) || seconds.len() != 2 || !digits(seconds) {
        return Err(invalid());
    }
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    let seconds: u32 = seconds.parse().map_err(|_| invalid())?;
    if seconds >= 60 {
        return Err(invalid());
    }
    Ok(minutes * 60 + seconds)
}

// ---------------------------------------------------------------------------
// DifficultyMix
// ---------------------------------------------------------------------------

/// The threat-deck colours in play, e.g. `"w"` or `"wy"`.
///
/// With a two-letter mix, normal alerts draw from the first colour and
/// unconfirmed reports from the second, giving a mission of intermediate
/// difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyMix {
    pub normal: Difficulty,
    pub unconfirmed: Difficulty,
}

impl FromStr for DifficultyMix {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScriptError::InvalidDifficulty(s.to_string());
        let mut letters = s.trim().chars();
        let first = letters.next().ok_or_else(invalid)?;
        let last = letters.next_back().unwrap_or(first);
        Ok(DifficultyMix {
            normal: Difficulty::from_letter(first).ok_or_else(invalid)?,
            unconfirmed: Difficulty::from_letter(last).ok_or_else(invalid)?,
        })
    }
}

// ---------------------------------------------------------------------------
// parse_script
// ---------------------------------------------------------------------------

/// Offsets before each phase end at which boundary announcements play.
const PHASE_MARKERS: [PhaseMarker; 3] =
    [PhaseMarker::Sixty, PhaseMarker::Twenty, PhaseMarker::Seven];

/// Parse a full mission script into a playable [`Timeline`].
///
/// `players` selects whether unconfirmed reports (`UA` lines) are part of
/// the mission; they only apply to five-player crews.
pub fn parse_script(
    text: &str,
    players: u8,
    difficulty: DifficultyMix,
) -> Result<Timeline, ScriptError> {
    let mut lines = text.lines().map(str::trim).enumerate().filter(|(_, l)| !l.is_empty());

    let (_, phase_line) = lines.next().ok_or(ScriptError::Empty)?;
    let mut events = phase_events(phase_line)?;

    for (index, line) in lines {
        if let Some(event) = parse_event_line(line, index + 1, players, difficulty)? {
            events.push(event);
        }
    }

    events.sort_by_key(Event::start);
    Ok(Timeline::new(events))
}

/// Expand the phase line (`"3:45 - 7:30 - 10:00"`) into boundary
/// announcements at 60, 20 and 7 seconds before each phase end.
fn phase_events(line: &str) -> Result<Vec<Event>, ScriptError> {
    let ends: Vec<u32> = line
        .split(" - ")
        .map(parse_time)
        .collect::<Result<_, _>>()?;
    if !(2..=3).contains(&ends.len()) {
        return Err(ScriptError::BadPhaseCount(ends.len()));
    }

    let mut events = Vec::new();
    let mut start = 0;
    for (i, &end) in ends.iter().enumerate() {
        if end <= start {
            return Err(ScriptError::NonIncreasingPhases);
        }
        let number = (i + 1) as u8;
        let last = i + 1 == ends.len();
        for marker in PHASE_MARKERS {
            // A marker further out than the phase is long has no moment to
            // play at.
            if marker.seconds() > end - start {
                continue;
            }
            events.push(Event::Phase {
                start: end - marker.seconds(),
                phase: number,
                marker,
                last_phase: last && marker == PhaseMarker::Seven,
            });
        }
        start = end;
    }
    Ok(events)
}

/// Parse one event line; `None` for lines that do not apply to this crew
/// size.
fn parse_event_line(
    line: &str,
    number: usize,
    players: u8,
    difficulty: DifficultyMix,
) -> Result<Option<Event>, ScriptError> {
    let bad = |reason: &str| ScriptError::BadEventLine {
        line: number,
        reason: reason.to_string(),
    };

    // Byte slicing would panic on a multi-byte first character; scripts are
    // user-supplied files, so malformed lines must come back as errors.
    let code = line.get(..2).ok_or_else(|| bad("unknown event code"))?;
    let rest = line[2..].trim();
    match code {
        "AL" => Ok(Some(parse_alert(rest, number, difficulty.normal)?)),
        "UA" => {
            if players == 5 {
                Ok(Some(parse_alert(rest, number, difficulty.unconfirmed)?))
            } else {
                Ok(None)
            }
        }
        "ID" => Ok(Some(Event::IncomingData {
            start: parse_time(rest)?,
        })),
        "DT" => Ok(Some(Event::DataTransfer {
            start: parse_time(rest)?,
        })),
        "CD" => {
            let (from, to) = rest
                .split_once(" - ")
                .ok_or_else(|| bad("expected 'CD m:ss - m:ss'"))?;
            let start = parse_time(from)?;
            let end = parse_time(to)?;
            if end <= start {
                return Err(bad("outage ends before it starts"));
            }
            Ok(Some(Event::communications_down(start, end - start)))
        }
        _ => Err(bad("unknown event code")),
    }
}

/// Parse the tail of an alert line: `0:10 T+2 ST White`.
fn parse_alert(rest: &str, number: usize, difficulty: Difficulty) -> Result<Event, ScriptError> {
    let bad = |reason: &str| ScriptError::BadEventLine {
        line: number,
        reason: reason.to_string(),
    };

    let mut fields = rest.split_whitespace();
    let start = parse_time(fields.next().ok_or_else(|| bad("missing time"))?)?;
    let turn = fields
        .next()
        .and_then(|f| f.strip_prefix("T+"))
        .and_then(|n| n.parse::<u8>().ok())
        .ok_or_else(|| bad("expected turn 'T+<n>'"))?;
    let threat_type = fields.next().ok_or_else(|| bad("missing threat type"))?;
    let (serious, internal) = match threat_type {
        "T" => (false, false),
        "ST" => (true, false),
        "IT" => (false, true),
        "SIT" => (true, true),
        _ => return Err(bad("unknown threat type")),
    };
    let zone = match (internal, fields.next()) {
        (true, None) => None,
        (false, Some(name)) => Some(
            Zone::from_str(name).map_err(|_| bad("unknown zone"))?,
        ),
        (true, Some(_)) => return Err(bad("internal threats take no zone")),
        (false, None) => return Err(bad("external threats need a zone")),
    };
    if fields.next().is_some() {
        return Err(bad("trailing fields"));
    }
    Ok(Event::Alert {
        start,
        turn,
        serious,
        zone,
        difficulty,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
