//! The playback core — a tick-driven scheduler over an immutable timeline.
//!
//! [`MissionPlayer`] owns the mission clock (`elapsed_seconds`, starting
//! at -1 so the first tick lands on second 0), the [`AudioQueue`], and the
//! boxed presentation collaborators.  Everything it does happens inside
//! [`tick`](MissionPlayer::tick), on the driver's clock; no collaborator
//! callback ever mutates player state, so there is exactly one writer and
//! re-entrancy cannot occur.
//!
//! # Tick contract
//!
//! Each tick, in order:
//!
//! 1. advance the clock and publish the `mm:ss` time text,
//! 2. advance audio by one second ([`AudioQueue::tick_second`]),
//! 3. deactivate the active event once the clock reaches its end,
//! 4. stop terminally when the clock reaches the last event's end,
//! 5. activate the event starting at this exact second, if any,
//! 6. fall back to the ambient radar when nothing is active,
//! 7. redraw per-second widgets and publish the phase text.
//!
//! Activation (step 5) replaces whatever was active: at most one event is
//! active at any time, even on overlapping timelines.

use crate::audio::{AudioQueue, AudioResourceProvider};
use crate::event::{format_time, Event, Timeline, WidgetKind};
use crate::ui::{DisplaySink, ViewSink, Widget, WidgetHost};

use super::state::PlayerState;

// ---------------------------------------------------------------------------
// MissionPlayer
// ---------------------------------------------------------------------------

/// Tick-driven mission playback over a fixed [`Timeline`].
pub struct MissionPlayer {
    timeline: Timeline,
    audio: AudioQueue,
    widgets: Box<dyn WidgetHost>,
    display: Box<dyn DisplaySink>,
    view: Box<dyn ViewSink>,

    /// The ambient radar shown whenever no event is active.  Created once
    /// and reused across its show/hide cycles.
    radar: Box<dyn Widget>,
    radar_active: bool,

    state: PlayerState,
    /// Whole seconds of mission time; -1 before the first tick.
    elapsed: i64,
    /// Index into the timeline of the active event, if any.
    active_event: Option<usize>,
    active_widget: Option<Box<dyn Widget>>,
}

impl MissionPlayer {
    pub fn new(
        timeline: Timeline,
        provider: Box<dyn AudioResourceProvider>,
        widgets: Box<dyn WidgetHost>,
        display: Box<dyn DisplaySink>,
        view: Box<dyn ViewSink>,
    ) -> Self {
        let radar = widgets.create(WidgetKind::Radar, None);
        Self {
            timeline,
            audio: AudioQueue::new(provider),
            widgets,
            display,
            view,
            radar,
            radar_active: false,
            state: PlayerState::default(),
            elapsed: -1,
            active_event: None,
            active_widget: None,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Mission clock in whole seconds; -1 before the first tick.
    pub fn elapsed_seconds(&self) -> i64 {
        self.elapsed
    }

    pub fn active_event(&self) -> Option<&Event> {
        self.active_event.and_then(|i| self.timeline.get(i))
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[cfg(test)]
    pub(crate) fn audio(&self) -> &AudioQueue {
        &self.audio
    }

    // -----------------------------------------------------------------------
    // Transport controls
    // -----------------------------------------------------------------------

    /// Start or resume playback.  Ticks once immediately so a fresh mission
    /// activates its start marker without waiting a second.
    pub fn play(&mut self) {
        if self.state.is_running() {
            return;
        }
        log::debug!("player: play ({} -> Running)", self.state.label());
        self.state = PlayerState::Running;
        self.tick();
        // tick() may have reached the mission end and stopped again.
        if self.state.is_running() {
            if let Some(widget) = self.current_widget_mut() {
                widget.play();
            }
            self.audio.play();
        }
    }

    /// Suspend playback, retaining every position (clock, audio, widget
    /// animation) for exact resumption.
    pub fn pause(&mut self) {
        if !self.state.is_running() {
            return;
        }
        log::debug!("player: pause at {}", format_time(self.elapsed.max(0) as u32));
        self.state = PlayerState::Paused;
        if let Some(widget) = self.current_widget_mut() {
            widget.pause();
        }
        self.audio.pause();
    }

    /// Terminal stop: deactivate, silence the audio queue, signal the end
    /// transition.  Only [`replay`](Self::replay) leaves the `Ended` state.
    pub fn stop(&mut self) {
        self.pause();
        self.clear_active();
        self.audio.stop();
        self.state = PlayerState::Ended;
        log::info!(
            "player: mission ended at {}",
            format_time(self.elapsed.max(0) as u32)
        );
        self.view.mission_ended();
    }

    /// Jump forward to the next event after the current clock position, or
    /// stop if none remains.
    pub fn next(&mut self) {
        let target = self
            .timeline
            .iter()
            .map(Event::start)
            .find(|s| i64::from(*s) > self.elapsed);
        match target {
            Some(start) => self.seek_to(start),
            None => self.stop(),
        }
    }

    /// Jump back to the most recent event that already finished, or do
    /// nothing when still inside the first event.
    pub fn previous(&mut self) {
        let target = self
            .timeline
            .iter()
            .rev()
            .find(|e| i64::from(e.end()) <= self.elapsed)
            .map(Event::start);
        match target {
            Some(start) => self.seek_to(start),
            None => log::debug!("player: previous() before any finished event"),
        }
    }

    /// Reset to the pre-mission state and start over.
    pub fn replay(&mut self) {
        log::debug!("player: replay");
        self.pause();
        self.clear_active();
        self.elapsed = -1;
        self.state = PlayerState::Stopped;
        self.view.mission_restarted();
        self.play();
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Advance the mission clock by one whole second.
    ///
    /// Called once per second by the driver while running, and once
    /// synchronously from [`play`](Self::play) and seeks.  A no-op in any
    /// other state, so the clock can only move while `Running`.
    pub fn tick(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.elapsed += 1;
        let now = self.elapsed as u32;
        self.display.set_time_text(&format_time(now));

        self.audio.tick_second();

        // Deactivate once the clock reaches the active event's end.
        if let Some(idx) = self.active_event {
            let over = self
                .timeline
                .get(idx)
                .map_or(true, |e| self.elapsed >= i64::from(e.end()));
            if over {
                self.clear_active();
            }
        }

        // Terminal condition: nothing left to play.
        match self.timeline.last_end() {
            Some(end) if self.elapsed < i64::from(end) => {}
            _ => {
                self.stop();
                return;
            }
        }

        if let Some(idx) = self.timeline.event_starting_at(now) {
            self.activate(idx);
        }

        // Ambient radar whenever no event holds the display.
        if self.active_widget.is_none() && !self.radar_active {
            self.radar_active = true;
            self.radar.play();
        }

        if let Some(widget) = self.current_widget_mut() {
            if widget.draws_each_second() {
                widget.redraw();
            }
        }

        let phase = self
            .active_event
            .and_then(|idx| self.timeline.get(idx))
            .and_then(|event| event.phase_at(self.elapsed));
        if let Some(phase) = phase {
            self.display.set_phase_text(&format!("Phase {phase}"));
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Pause, rewind the clock to one second before `start`, and resume —
    /// the resume's immediate tick lands exactly on `start` and activates
    /// the event there through the ordinary tick path.
    fn seek_to(&mut self, start: u32) {
        self.pause();
        self.elapsed = i64::from(start) - 1;
        self.play();
    }

    /// Make the event at `index` the single active event, replacing the
    /// previous one (or the radar).
    fn activate(&mut self, index: usize) {
        let Some(event) = self.timeline.get(index).cloned() else {
            return;
        };
        log::debug!(
            "player: activate {:?} at {}",
            event.widget_kind(),
            format_time(event.start())
        );
        self.clear_active();

        self.display.set_announcement_text(event.display_text());
        self.active_event = Some(index);

        let mut widget = self.widgets.create(event.widget_kind(), Some(&event));
        widget.play();
        self.active_widget = Some(widget);

        self.audio.set_tracks(&event.tracks());
        let transcript = self.timeline.transcript_at(self.elapsed);
        self.display.set_transcript_text(&transcript);
    }

    /// Tear down whatever currently holds the display (event widget or
    /// radar) and clear the announcement.
    fn clear_active(&mut self) {
        self.display.set_announcement_text("");
        self.active_event = None;
        if let Some(mut widget) = self.active_widget.take() {
            widget.pause();
            widget.hide();
        }
        if self.radar_active {
            self.radar.pause();
            self.radar.hide();
            self.radar_active = false;
        }
    }

    fn current_widget_mut(&mut self) -> Option<&mut dyn Widget> {
        if let Some(widget) = self.active_widget.as_mut() {
            Some(widget.as_mut())
        } else if self.radar_active {
            Some(self.radar.as_mut())
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::provider::mock::MockProvider;
    use crate::audio::ALARM_TRACK;
    use crate::event::{Difficulty, PhaseMarker};
    use std::cell::RefCell;
    use std::rc::Rc;

    // -- recording doubles --------------------------------------------------

    #[derive(Default)]
    struct Channels {
        times: Vec<String>,
        phases: Vec<String>,
        announcements: Vec<String>,
        transcripts: Vec<String>,
        ended: u32,
        restarted: u32,
        widget_log: Vec<String>,
    }

    struct RecordingDisplay(Rc<RefCell<Channels>>);

    impl DisplaySink for RecordingDisplay {
        fn set_time_text(&mut self, text: &str) {
            self.0.borrow_mut().times.push(text.to_string());
        }
        fn set_phase_text(&mut self, text: &str) {
            self.0.borrow_mut().phases.push(text.to_string());
        }
        fn set_announcement_text(&mut self, text: &str) {
            self.0.borrow_mut().announcements.push(text.to_string());
        }
        fn set_transcript_text(&mut self, text: &str) {
            self.0.borrow_mut().transcripts.push(text.to_string());
        }
    }

    struct RecordingView(Rc<RefCell<Channels>>);

    impl ViewSink for RecordingView {
        fn mission_ended(&mut self) {
            self.0.borrow_mut().ended += 1;
        }
        fn mission_restarted(&mut self) {
            self.0.borrow_mut().restarted += 1;
        }
    }

    struct RecordingHost(Rc<RefCell<Channels>>);

    impl WidgetHost for RecordingHost {
        fn create(&self, kind: WidgetKind, _event: Option<&Event>) -> Box<dyn Widget> {
            self.0
                .borrow_mut()
                .widget_log
                .push(format!("create {kind:?}"));
            Box::new(RecordingWidget {
                kind,
                log: self.0.clone(),
            })
        }
    }

    struct RecordingWidget {
        kind: WidgetKind,
        log: Rc<RefCell<Channels>>,
    }

    impl Widget for RecordingWidget {
        fn play(&mut self) {
            self.log
                .borrow_mut()
                .widget_log
                .push(format!("play {:?}", self.kind));
        }
        fn pause(&mut self) {
            self.log
                .borrow_mut()
                .widget_log
                .push(format!("pause {:?}", self.kind));
        }
        fn hide(&mut self) {
            self.log
                .borrow_mut()
                .widget_log
                .push(format!("hide {:?}", self.kind));
        }
        fn draws_each_second(&self) -> bool {
            self.kind == WidgetKind::PhaseBanner
        }
        fn redraw(&mut self) {
            self.log
                .borrow_mut()
                .widget_log
                .push(format!("redraw {:?}", self.kind));
        }
    }

    struct Rig {
        player: MissionPlayer,
        provider: Rc<MockProvider>,
        channels: Rc<RefCell<Channels>>,
    }

    fn rig(events: Vec<Event>) -> Rig {
        rig_with(events, MockProvider::new())
    }

    fn rig_with(events: Vec<Event>, provider: MockProvider) -> Rig {
        let provider = Rc::new(provider);
        let channels = Rc::new(RefCell::new(Channels::default()));
        let player = MissionPlayer::new(
            Timeline::new(events),
            Box::new(provider.clone()),
            Box::new(RecordingHost(channels.clone())),
            Box::new(RecordingDisplay(channels.clone())),
            Box::new(RecordingView(channels.clone())),
        );
        Rig {
            player,
            provider,
            channels,
        }
    }

    fn incoming(start: u32) -> Event {
        Event::IncomingData { start }
    }

    // -- tests --------------------------------------------------------------

    #[test]
    fn first_tick_lands_on_second_zero_and_activates_the_start_marker() {
        let mut r = rig(vec![incoming(10)]);

        r.player.play();

        assert_eq!(r.player.elapsed_seconds(), 0);
        assert_eq!(r.player.state(), PlayerState::Running);
        assert_eq!(r.player.active_event(), Some(&Event::Start));
        assert_eq!(r.channels.borrow().times.last().map(String::as_str), Some("00:00"));
        assert_eq!(r.channels.borrow().phases.last().map(String::as_str), Some("Phase 1"));
        assert_eq!(r.provider.resolved_tracks(), vec!["begin"]);
    }

    #[test]
    fn clock_advances_one_second_per_tick_until_the_last_event_ends() {
        // Timeline: start marker (end 7) + incoming data at 10 (end 15).
        let mut r = rig(vec![incoming(10)]);

        r.player.play();
        while r.player.state().is_running() {
            r.player.tick();
        }

        assert_eq!(r.player.state(), PlayerState::Ended);
        assert_eq!(r.player.elapsed_seconds(), 15);
        assert_eq!(r.channels.borrow().ended, 1);
        // One time update per tick, 00:00 through 00:15.
        assert_eq!(r.channels.borrow().times.len(), 16);
    }

    #[test]
    fn active_event_expires_at_its_end_and_the_radar_takes_over() {
        let mut r = rig(vec![incoming(10)]);

        r.player.play();
        for _ in 0..6 {
            r.player.tick(); // through 00:06, start marker still active
        }
        assert_eq!(r.player.active_event(), Some(&Event::Start));
        r.player.tick(); // 00:07, start marker end
        assert!(r.player.active_event().is_none());

        // The start marker's banner is torn down and the radar shows in the
        // gap between events.
        let log = r.channels.borrow().widget_log.clone();
        assert!(log.contains(&"hide PhaseBanner".to_string()));
        assert_eq!(log.last().map(String::as_str), Some("play Radar"));
    }

    #[test]
    fn activation_replaces_the_previous_event_so_only_one_is_active() {
        // Overlapping windows: the alert at 5 runs to 20, incoming data
        // starts at 10 inside it.
        let alert = Event::Alert {
            start: 5,
            turn: 1,
            serious: false,
            zone: None,
            difficulty: Difficulty::White,
        };
        let mut r = rig(vec![alert.clone(), incoming(10)]);

        r.player.play();
        for _ in 0..10 {
            r.player.tick();
        }

        assert_eq!(r.player.elapsed_seconds(), 10);
        assert_eq!(r.player.active_event(), Some(&incoming(10)));
        let log = r.channels.borrow().widget_log.clone();
        let hidden_alert = log.iter().filter(|l| *l == "hide Alert").count();
        assert_eq!(hidden_alert, 1);
    }

    #[test]
    fn activation_publishes_announcement_tracks_and_transcript() {
        // "begin" outlasts the gap so the queue never falls to the alarm.
        let provider = MockProvider::new().with_duration("begin", 30);
        let mut r = rig_with(vec![incoming(10)], provider);

        r.player.play();
        for _ in 0..10 {
            r.player.tick();
        }

        let ch = r.channels.borrow();
        assert_eq!(
            ch.announcements.last().map(String::as_str),
            Some("Incoming Data")
        );
        assert_eq!(
            ch.transcripts.last().map(String::as_str),
            Some("00:10 - Incoming Data")
        );
        drop(ch);
        assert_eq!(r.provider.resolved_tracks(), vec!["begin", "incoming_data"]);
    }

    #[test]
    fn next_jumps_to_the_following_event() {
        let mut r = rig(vec![incoming(30), Event::DataTransfer { start: 60 }]);

        r.player.play();
        r.player.next();

        assert_eq!(r.player.elapsed_seconds(), 30);
        assert_eq!(r.player.active_event(), Some(&incoming(30)));
        assert_eq!(r.player.state(), PlayerState::Running);

        r.player.next();
        assert_eq!(r.player.elapsed_seconds(), 60);
        assert_eq!(
            r.player.active_event(),
            Some(&Event::DataTransfer { start: 60 })
        );
    }

    #[test]
    fn previous_jumps_back_to_the_last_finished_event() {
        let mut r = rig(vec![incoming(30), Event::DataTransfer { start: 60 }]);

        r.player.play();
        r.player.next(); // 00:30
        r.player.next(); // 01:00

        r.player.previous();
        // The incoming-data event (end 35) is the latest one finished by
        // 01:00; playback lands back on its start.
        assert_eq!(r.player.elapsed_seconds(), 30);
        assert_eq!(r.player.active_event(), Some(&incoming(30)));
        assert_eq!(r.player.state(), PlayerState::Running);
    }

    #[test]
    fn previous_inside_the_first_event_is_a_no_op() {
        let mut r = rig(vec![incoming(30)]);

        r.player.play();
        for _ in 0..3 {
            r.player.tick(); // 00:03, inside the start marker window
        }
        r.player.previous();

        assert_eq!(r.player.elapsed_seconds(), 3);
        assert_eq!(r.player.state(), PlayerState::Running);
    }

    #[test]
    fn next_with_nothing_ahead_stops_terminally() {
        let mut r = rig(vec![incoming(10)]);

        r.player.play();
        r.player.next(); // jump to 00:10
        r.player.next(); // nothing ahead

        assert_eq!(r.player.state(), PlayerState::Ended);
        assert_eq!(r.channels.borrow().ended, 1);
    }

    #[test]
    fn pause_suspends_audio_and_widget_and_play_resumes() {
        let provider = MockProvider::new().with_duration("begin", 30);
        let mut r = rig_with(vec![incoming(60)], provider);

        r.player.play();
        r.player.pause();

        assert_eq!(r.player.state(), PlayerState::Paused);
        assert!(!r.provider.last().borrow().playing);
        // The start marker's banner widget was suspended.
        assert!(r
            .channels
            .borrow()
            .widget_log
            .iter()
            .any(|l| l == "pause PhaseBanner"));

        let before = r.player.elapsed_seconds();
        r.player.play();
        assert_eq!(r.player.state(), PlayerState::Running);
        assert!(r.provider.last().borrow().playing);
        // Resume ticks once immediately.
        assert_eq!(r.player.elapsed_seconds(), before + 1);
    }

    #[test]
    fn tick_is_a_no_op_unless_running() {
        let mut r = rig(vec![incoming(30)]);

        // Stopped: the clock must not move before play().
        r.player.tick();
        assert_eq!(r.player.elapsed_seconds(), -1);

        r.player.play();
        r.player.pause();
        r.player.tick();
        assert_eq!(r.player.elapsed_seconds(), 0);
        assert_eq!(r.player.state(), PlayerState::Paused);

        r.player.stop();
        r.player.tick();
        assert_eq!(r.player.state(), PlayerState::Ended);
        assert_eq!(r.player.elapsed_seconds(), 0);
    }

    #[test]
    fn ticking_while_the_queue_is_exhausted_keeps_the_alarm_looping() {
        // "begin" lasts 1 second and nothing follows it until 00:30, so the
        // queue exhausts and engages the alarm.
        let provider = MockProvider::new().with_duration("begin", 1);
        let mut r = rig_with(vec![incoming(30)], provider);

        r.player.play();
        for _ in 0..5 {
            r.player.tick();
        }

        assert!(r.player.audio().is_alarm_engaged());
        assert_eq!(r.provider.resolved_tracks(), vec!["begin", ALARM_TRACK]);

        // The next activation replaces the alarm with real tracks.
        r.player.next();
        assert!(!r.player.audio().is_alarm_engaged());
        assert_eq!(
            r.provider.resolved_tracks(),
            vec!["begin", ALARM_TRACK, "incoming_data"]
        );
    }

    #[test]
    fn stop_leaves_the_audio_queue_empty_and_the_resource_reset() {
        let provider = MockProvider::new().with_duration("begin", 30);
        let mut r = rig_with(vec![incoming(60)], provider);

        r.player.play();
        r.player.tick();
        r.player.stop();

        assert_eq!(r.player.state(), PlayerState::Ended);
        assert_eq!(r.player.audio().pending_len(), 0);
        assert!(!r.player.audio().is_alarm_engaged());
        let begin = r.provider.last();
        assert!(!begin.borrow().playing);
        assert_eq!(begin.borrow().remaining, begin.borrow().duration);
    }

    #[test]
    fn replay_resets_the_clock_and_restarts_from_the_start_marker() {
        let mut r = rig(vec![incoming(10)]);

        r.player.play();
        while r.player.state().is_running() {
            r.player.tick();
        }
        assert_eq!(r.player.state(), PlayerState::Ended);

        r.player.replay();

        assert_eq!(r.player.state(), PlayerState::Running);
        assert_eq!(r.player.elapsed_seconds(), 0);
        assert_eq!(r.player.active_event(), Some(&Event::Start));
        assert_eq!(r.channels.borrow().restarted, 1);
        // "begin" resolved twice: once per run.
        let begins = r
            .provider
            .resolved_tracks()
            .iter()
            .filter(|t| *t == "begin")
            .count();
        assert_eq!(begins, 2);
    }

    #[test]
    fn phase_text_steps_at_the_phase_boundary() {
        // Phase 1 boundary announcement at 01:00; the boundary itself is
        // seven seconds in.
        let phase = Event::Phase {
            start: 60,
            phase: 1,
            marker: PhaseMarker::Seven,
            last_phase: false,
        };
        let mut r = rig(vec![phase]);

        r.player.play();
        while r.player.elapsed_seconds() < 66 {
            r.player.tick();
        }
        assert_eq!(r.channels.borrow().phases.last().map(String::as_str), Some("Phase 1"));

        r.player.tick(); // 01:07 — boundary
        assert_eq!(r.channels.borrow().phases.last().map(String::as_str), Some("Phase 2"));
    }

    #[test]
    fn phase_banner_redraws_every_second_while_active() {
        let phase = Event::Phase {
            start: 10,
            phase: 1,
            marker: PhaseMarker::Sixty,
            last_phase: false,
        };
        let mut r = rig(vec![phase]);

        r.player.play();
        for _ in 0..12 {
            r.player.tick(); // banner active from 00:10
        }

        // The start marker's banner redraws on its 7 active ticks (00:00
        // through 00:06), the phase banner on 00:10 through 00:12.
        let log = r.channels.borrow().widget_log.clone();
        let redraws = log.iter().filter(|l| *l == "redraw PhaseBanner").count();
        assert_eq!(redraws, 10);
    }
}
