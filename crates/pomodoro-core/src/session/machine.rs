//! Session state machine.
//!
//! Translates user intents and engine events into [`TimerState`]
//! transitions. It is the only writer of the timer state.
//!
//! ## Transitions
//!
//! ```text
//! Idle(pending?) --start--> Focus | ShortBreak | LongBreak
//! running --pause--> paused --resume--> running
//! any --reset--> Idle
//! Focus --complete/skip--> ShortBreak | LongBreak   (or Idle + pending)
//! Break --complete/skip--> Focus                    (or Idle + pending)
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, trace, warn};

use super::recorder::{History, SessionRecorder};
use crate::clock::Clock;
use crate::error::CoreError;
use crate::notify::Notifier;
use crate::storage::PomodoroSettings;
use crate::timer::{TimerMode, TimerState};
use crate::worker::{EngineControlMessage, EngineEvent, EngineSink};

pub struct SessionMachine {
    state: TimerState,
    settings: PomodoroSettings,
    engine: Box<dyn EngineSink>,
    notifier: Box<dyn Notifier>,
    clock: Arc<dyn Clock>,
    recorder: SessionRecorder,
    history: History,
    /// When the current focus session began; set on focus entry.
    session_start: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

impl SessionMachine {
    pub fn new(
        settings: PomodoroSettings,
        engine: Box<dyn EngineSink>,
        notifier: Box<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_history(settings, engine, notifier, clock, History::new())
    }

    /// Resume with previously persisted records.
    pub fn with_history(
        settings: PomodoroSettings,
        engine: Box<dyn EngineSink>,
        mut notifier: Box<dyn Notifier>,
        clock: Arc<dyn Clock>,
        history: History,
    ) -> Self {
        notifier.apply_settings(&settings);
        Self {
            state: TimerState::new(),
            settings,
            engine,
            notifier,
            recorder: SessionRecorder::continuing(Arc::clone(&clock), &history),
            clock,
            history,
            session_start: None,
            last_error: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Most recent engine failure, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Settings-derived length of the current mode, or of the pending mode
    /// while idle.
    pub fn nominal_duration(&self) -> u64 {
        match self.state.mode {
            TimerMode::Idle => self
                .state
                .pending_next_mode
                .map(|mode| self.settings.duration_secs(mode))
                .unwrap_or(0),
            mode => self.settings.duration_secs(mode),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start `mode`, else the pending mode, else a focus session.
    pub fn start_timer(&mut self, mode: Option<TimerMode>) {
        if self.state.is_running {
            debug!(mode = %self.state.mode, "start ignored, timer already running");
            return;
        }
        if self.state.is_paused() {
            if let Some(requested) = mode.filter(|m| *m != self.state.mode) {
                debug!(%requested, current = %self.state.mode, "timer paused, resuming current mode instead");
            }
            self.resume_timer();
            return;
        }

        let target = mode
            .or(self.state.pending_next_mode)
            .unwrap_or(TimerMode::Focus);
        if target == TimerMode::Idle {
            warn!("cannot start the idle mode");
            return;
        }

        let duration = self.settings.duration_secs(target);
        if target == TimerMode::Focus && self.session_start.is_none() {
            self.session_start = Some(self.clock.now());
        }

        self.state.mode = target;
        self.state.time_remaining_seconds = duration;
        self.state.is_running = true;
        self.state.pending_next_mode = None;
        info!(mode = %target, duration, "timer started");

        self.engine.send(EngineControlMessage::Start {
            duration_seconds: duration,
        });
    }

    pub fn pause_timer(&mut self) {
        if !self.state.is_running {
            return;
        }
        self.state.is_running = false;
        debug!(mode = %self.state.mode, remaining = self.state.time_remaining_seconds, "timer paused");
        self.engine.send(EngineControlMessage::Pause);
    }

    pub fn resume_timer(&mut self) {
        if !self.state.is_paused() {
            return;
        }
        self.state.is_running = true;
        debug!(mode = %self.state.mode, remaining = self.state.time_remaining_seconds, "timer resumed");
        self.engine.send(EngineControlMessage::Resume);
    }

    /// Abandon the current interval. An unfinished focus session is recorded
    /// as incomplete.
    pub fn reset_timer(&mut self) {
        if self.state.mode == TimerMode::Focus {
            if let Some(start) = self.session_start {
                self.record_session(start, false, self.state.completed_focus_count);
            }
        }
        self.session_start = None;

        self.engine.send(EngineControlMessage::Reset);

        self.state.mode = TimerMode::Idle;
        self.state.time_remaining_seconds = 0;
        self.state.is_running = false;
        self.state.pending_next_mode = None;
        debug!("timer reset");
    }

    /// Finish the current interval and move to the next one. Used both for
    /// an explicit skip and for engine completion.
    pub fn skip_to_next(&mut self) {
        let ending = self.state.mode;
        if ending == TimerMode::Idle {
            debug!("skip ignored, nothing to finish while idle");
            return;
        }

        self.engine.send(EngineControlMessage::Reset);

        let next = if ending == TimerMode::Focus {
            self.state.completed_focus_count += 1;
            self.state.current_cycle_index += 1;
            self.session_start = None;

            if self.state.current_cycle_index >= self.settings.long_break_interval {
                self.state.current_cycle_index = 0;
                TimerMode::LongBreak
            } else {
                TimerMode::ShortBreak
            }
        } else {
            self.session_start = Some(self.clock.now());
            TimerMode::Focus
        };

        let duration = self.settings.duration_secs(next);
        let auto_start = if next == TimerMode::Focus {
            self.settings.auto_start_work
        } else {
            self.settings.auto_start_break
        };

        self.state.time_remaining_seconds = duration;
        if auto_start {
            self.state.mode = next;
            self.state.is_running = true;
            self.state.pending_next_mode = None;
            info!(from = %ending, to = %next, duration, "advanced, auto-starting");
            self.engine.send(EngineControlMessage::Start {
                duration_seconds: duration,
            });
        } else {
            self.state.mode = TimerMode::Idle;
            self.state.is_running = false;
            self.state.pending_next_mode = Some(next);
            info!(from = %ending, pending = %next, "advanced, waiting for start");
        }
    }

    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Tick {
                time_remaining_seconds,
            } => {
                if self.state.is_idle() {
                    trace!(time_remaining_seconds, "tick ignored while idle");
                    return;
                }
                self.state.time_remaining_seconds =
                    time_remaining_seconds.min(self.nominal_duration());
            }
            EngineEvent::Complete => {
                // A pause that crossed an in-flight COMPLETE still owns that
                // countdown; only idle means it was reset or replaced.
                if self.state.is_idle() {
                    debug!("stale completion ignored while idle");
                    return;
                }
                if self.state.mode == TimerMode::Focus {
                    if let Some(start) = self.session_start {
                        self.record_session(start, true, self.state.completed_focus_count + 1);
                    }
                }
                if let Err(e) = self.notifier.play_sound() {
                    warn!("failed to play notification: {e}");
                }
                self.skip_to_next();
            }
            EngineEvent::Error { message } => {
                error!("timer engine error: {message}");
                self.last_error = Some(message);
            }
        }
    }

    /// Replace the settings. Invalid settings are rejected and the previous
    /// ones stay in effect. A running countdown keeps its deadline, but the
    /// displayed remaining time never exceeds the new nominal duration.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the offending field.
    pub fn update_settings(&mut self, settings: PomodoroSettings) -> Result<(), CoreError> {
        settings.validate()?;
        self.notifier.apply_settings(&settings);
        self.settings = settings;

        let nominal = self.nominal_duration();
        self.state.time_remaining_seconds = if self.state.is_idle() {
            nominal
        } else {
            self.state.time_remaining_seconds.min(nominal)
        };
        debug!(remaining = self.state.time_remaining_seconds, "settings updated");
        Ok(())
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn record_session(&mut self, start: DateTime<Utc>, completed: bool, session_number: u64) {
        let record = self.recorder.record(start, completed, session_number);
        info!(id = %record.id, completed, session_number, "focus session recorded");
        self.history.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::NotifyError;
    use crate::worker::CountdownEngine;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct RecordingSink {
        sent: Arc<Mutex<Vec<EngineControlMessage>>>,
    }

    impl RecordingSink {
        fn take(&self) -> Vec<EngineControlMessage> {
            std::mem::take(&mut *self.sent.lock().unwrap())
        }
    }

    impl EngineSink for RecordingSink {
        fn send(&self, message: EngineControlMessage) {
            self.sent.lock().unwrap().push(message);
        }
    }

    #[derive(Clone, Default)]
    struct CountingNotifier {
        plays: Arc<AtomicUsize>,
        fail: bool,
    }

    impl Notifier for CountingNotifier {
        fn play_sound(&self) -> Result<(), NotifyError> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(NotifyError::Playback("autoplay rejected".into()));
            }
            Ok(())
        }
    }

    struct Harness {
        machine: SessionMachine,
        sink: RecordingSink,
        plays: Arc<AtomicUsize>,
        clock: ManualClock,
    }

    fn harness(settings: PomodoroSettings) -> Harness {
        let sink = RecordingSink::default();
        let notifier = CountingNotifier::default();
        let plays = Arc::clone(&notifier.plays);
        let clock = ManualClock::new(1_700_000_000_000);
        let machine = SessionMachine::new(
            settings,
            Box::new(sink.clone()),
            Box::new(notifier),
            Arc::new(clock.clone()),
        );
        Harness {
            machine,
            sink,
            plays,
            clock,
        }
    }

    fn start(seconds: u64) -> EngineControlMessage {
        EngineControlMessage::Start {
            duration_seconds: seconds,
        }
    }

    fn auto(break_: bool, work: bool) -> PomodoroSettings {
        PomodoroSettings {
            auto_start_break: break_,
            auto_start_work: work,
            ..PomodoroSettings::default()
        }
    }

    #[test]
    fn focus_completion_waits_for_user_by_default() {
        let mut h = harness(PomodoroSettings::default());

        h.machine.start_timer(Some(TimerMode::Focus));
        assert_eq!(h.sink.take(), vec![start(1500)]);

        h.clock.advance_ms(1_500_000);
        h.machine.handle_event(EngineEvent::Tick {
            time_remaining_seconds: 0,
        });
        h.machine.handle_event(EngineEvent::Complete);

        let state = h.machine.state();
        assert_eq!(state.mode, TimerMode::Idle);
        assert_eq!(state.pending_next_mode, Some(TimerMode::ShortBreak));
        assert!(!state.is_running);
        assert_eq!(state.completed_focus_count, 1);
        assert_eq!(state.time_remaining_seconds, 300);

        let records = h.machine.history().records();
        assert_eq!(records.len(), 1);
        assert!(records[0].completed);
        assert_eq!(records[0].session_number, 1);

        assert_eq!(h.sink.take(), vec![EngineControlMessage::Reset]);
        assert_eq!(h.plays.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn auto_start_break_sends_exactly_one_start() {
        let mut h = harness(auto(true, false));
        h.machine.start_timer(None);
        h.sink.take();

        h.machine.handle_event(EngineEvent::Complete);

        let state = h.machine.state();
        assert_eq!(state.mode, TimerMode::ShortBreak);
        assert!(state.is_running);
        assert_eq!(state.pending_next_mode, None);
        assert_eq!(state.time_remaining_seconds, 300);
        assert_eq!(h.sink.take(), vec![EngineControlMessage::Reset, start(300)]);
    }

    #[test]
    fn auto_start_work_after_break() {
        let mut h = harness(auto(false, true));
        h.machine.start_timer(Some(TimerMode::ShortBreak));
        h.sink.take();

        h.machine.handle_event(EngineEvent::Complete);

        assert_eq!(h.machine.state().mode, TimerMode::Focus);
        assert!(h.machine.state().is_running);
        assert_eq!(h.sink.take(), vec![EngineControlMessage::Reset, start(1500)]);
        assert!(h.machine.history().is_empty());
    }

    #[test]
    fn four_focus_sessions_end_in_a_long_break() {
        let mut h = harness(PomodoroSettings::default());
        let mut breaks = Vec::new();

        for _ in 0..4 {
            h.machine.start_timer(None);
            assert_eq!(h.machine.state().mode, TimerMode::Focus);
            h.machine.handle_event(EngineEvent::Complete);
            let pending = h.machine.state().pending_next_mode.unwrap();
            breaks.push(pending);

            h.machine.start_timer(None);
            assert_eq!(h.machine.state().mode, pending);
            h.machine.handle_event(EngineEvent::Complete);
            assert_eq!(h.machine.state().pending_next_mode, Some(TimerMode::Focus));
        }

        assert_eq!(
            breaks,
            vec![
                TimerMode::ShortBreak,
                TimerMode::ShortBreak,
                TimerMode::ShortBreak,
                TimerMode::LongBreak
            ]
        );
        assert_eq!(h.machine.state().completed_focus_count, 4);
        assert_eq!(h.machine.history().len(), 4);
        assert_eq!(h.plays.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn cycle_index_resets_on_long_break() {
        let mut h = harness(auto(true, true));
        h.machine.start_timer(None);
        for completed in 1..=4 {
            h.machine.skip_to_next(); // focus -> break
            if completed < 4 {
                assert_eq!(h.machine.state().current_cycle_index, completed);
                h.machine.skip_to_next(); // break -> focus
            }
        }
        assert_eq!(h.machine.state().mode, TimerMode::LongBreak);
        assert_eq!(h.machine.state().current_cycle_index, 0);
    }

    #[test]
    fn reset_mid_focus_records_one_incomplete_session() {
        let mut h = harness(PomodoroSettings::default());
        h.machine.start_timer(None);
        h.clock.advance_ms(600_000);

        h.machine.reset_timer();
        let after_first = h.machine.state().clone();
        h.machine.reset_timer();

        assert_eq!(h.machine.state(), &after_first);
        assert_eq!(after_first.mode, TimerMode::Idle);
        assert_eq!(after_first.time_remaining_seconds, 0);
        let records = h.machine.history().records();
        assert_eq!(records.len(), 1);
        assert!(!records[0].completed);
        assert_eq!(records[0].session_number, 0);
        assert_eq!(
            h.sink.take(),
            vec![start(1500), EngineControlMessage::Reset, EngineControlMessage::Reset]
        );
    }

    #[test]
    fn breaks_are_never_recorded() {
        let mut h = harness(PomodoroSettings::default());
        h.machine.start_timer(Some(TimerMode::ShortBreak));
        h.machine.reset_timer();
        h.machine.start_timer(Some(TimerMode::LongBreak));
        h.machine.handle_event(EngineEvent::Complete);
        assert!(h.machine.history().is_empty());
    }

    #[test]
    fn skip_does_not_record_or_notify() {
        let mut h = harness(PomodoroSettings::default());
        h.machine.start_timer(None);
        h.machine.skip_to_next();

        assert_eq!(h.machine.state().completed_focus_count, 1);
        assert_eq!(
            h.machine.state().pending_next_mode,
            Some(TimerMode::ShortBreak)
        );
        assert!(h.machine.history().is_empty());
        assert_eq!(h.plays.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn skip_while_idle_is_a_noop() {
        let mut h = harness(PomodoroSettings::default());
        h.machine.skip_to_next();
        assert_eq!(h.machine.state(), &TimerState::new());
        assert!(h.sink.take().is_empty());
    }

    #[test]
    fn focus_after_break_is_timed_from_mode_entry() {
        let mut h = harness(PomodoroSettings::default());
        h.machine.start_timer(Some(TimerMode::ShortBreak));
        h.machine.handle_event(EngineEvent::Complete);
        let entered = h.clock.now();

        h.clock.advance_ms(120_000);
        h.machine.start_timer(None);
        assert_eq!(h.machine.state().mode, TimerMode::Focus);
        h.machine.handle_event(EngineEvent::Complete);

        assert_eq!(h.machine.history().records()[0].start_time, entered);
    }

    #[test]
    fn pause_and_resume_forward_to_engine() {
        let mut h = harness(PomodoroSettings::default());
        h.machine.pause_timer();
        h.machine.resume_timer();
        assert!(h.sink.take().is_empty());

        h.machine.start_timer(None);
        h.machine.pause_timer();
        h.machine.pause_timer();
        assert!(h.machine.state().is_paused());
        h.machine.resume_timer();
        h.machine.resume_timer();
        assert!(h.machine.state().is_running);

        assert_eq!(
            h.sink.take(),
            vec![
                start(1500),
                EngineControlMessage::Pause,
                EngineControlMessage::Resume
            ]
        );
    }

    #[test]
    fn start_while_paused_resumes() {
        let mut h = harness(PomodoroSettings::default());
        h.machine.start_timer(None);
        h.machine.pause_timer();
        h.sink.take();

        h.machine.start_timer(Some(TimerMode::LongBreak));

        assert_eq!(h.machine.state().mode, TimerMode::Focus);
        assert_eq!(h.sink.take(), vec![EngineControlMessage::Resume]);
    }

    #[test]
    fn start_while_running_is_ignored() {
        let mut h = harness(PomodoroSettings::default());
        h.machine.start_timer(None);
        h.machine.start_timer(Some(TimerMode::ShortBreak));
        assert_eq!(h.machine.state().mode, TimerMode::Focus);
        assert_eq!(h.sink.take(), vec![start(1500)]);
    }

    #[test]
    fn idle_cannot_be_started() {
        let mut h = harness(PomodoroSettings::default());
        h.machine.start_timer(Some(TimerMode::Idle));
        assert!(!h.machine.state().is_running);
        assert!(h.sink.take().is_empty());
    }

    #[test]
    fn ticks_update_remaining_time() {
        let mut h = harness(PomodoroSettings::default());
        h.machine.start_timer(None);
        h.machine.handle_event(EngineEvent::Tick {
            time_remaining_seconds: 1499,
        });
        assert_eq!(h.machine.state().time_remaining_seconds, 1499);
    }

    #[test]
    fn stale_events_after_reset_are_ignored() {
        let mut h = harness(PomodoroSettings::default());
        h.machine.start_timer(None);
        h.machine.reset_timer();

        h.machine.handle_event(EngineEvent::Tick {
            time_remaining_seconds: 12,
        });
        h.machine.handle_event(EngineEvent::Complete);

        assert_eq!(h.machine.state().time_remaining_seconds, 0);
        assert_eq!(h.machine.state().completed_focus_count, 0);
        assert_eq!(h.plays.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn engine_error_leaves_session_unresolved() {
        let mut h = harness(PomodoroSettings::default());
        h.machine.start_timer(None);
        let before = h.machine.state().clone();

        h.machine.handle_event(EngineEvent::Error {
            message: "timers unavailable".into(),
        });

        assert_eq!(h.machine.state(), &before);
        assert_eq!(h.machine.last_error(), Some("timers unavailable"));
    }

    #[test]
    fn notification_failure_is_not_fatal() {
        let sink = RecordingSink::default();
        let notifier = CountingNotifier {
            fail: true,
            ..CountingNotifier::default()
        };
        let plays = Arc::clone(&notifier.plays);
        let mut machine = SessionMachine::new(
            PomodoroSettings::default(),
            Box::new(sink),
            Box::new(notifier),
            Arc::new(ManualClock::new(0)),
        );

        machine.start_timer(None);
        machine.handle_event(EngineEvent::Complete);

        assert_eq!(plays.load(Ordering::SeqCst), 1);
        assert_eq!(
            machine.state().pending_next_mode,
            Some(TimerMode::ShortBreak)
        );
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let mut h = harness(PomodoroSettings::default());
        let bad = PomodoroSettings {
            long_break_interval: 0,
            ..PomodoroSettings::default()
        };
        assert!(h.machine.update_settings(bad).is_err());
        assert_eq!(h.machine.settings(), &PomodoroSettings::default());
    }

    #[test]
    fn idle_preview_follows_new_settings() {
        let mut h = harness(PomodoroSettings::default());
        h.machine.start_timer(None);
        h.machine.skip_to_next();
        assert_eq!(h.machine.state().time_remaining_seconds, 300);

        h.machine
            .update_settings(PomodoroSettings {
                short_break_time: 1,
                ..PomodoroSettings::default()
            })
            .unwrap();

        assert_eq!(h.machine.state().time_remaining_seconds, 60);
        assert_eq!(h.machine.nominal_duration(), 60);
    }

    #[test]
    fn paused_remaining_is_clamped_to_shorter_settings() {
        let mut h = harness(PomodoroSettings::default());
        h.machine.start_timer(None);
        h.machine.pause_timer();

        h.machine
            .update_settings(PomodoroSettings {
                work_time: 10,
                ..PomodoroSettings::default()
            })
            .unwrap();
        assert_eq!(h.machine.state().time_remaining_seconds, 600);

        h.machine
            .update_settings(PomodoroSettings {
                work_time: 45,
                ..PomodoroSettings::default()
            })
            .unwrap();
        assert_eq!(h.machine.state().time_remaining_seconds, 600);
    }

    /// Apply recorded control messages to a real engine.
    fn deliver(
        engine: &mut CountdownEngine,
        messages: Vec<EngineControlMessage>,
    ) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        for message in messages {
            match message {
                EngineControlMessage::Start { duration_seconds } => {
                    events.extend(engine.start(duration_seconds));
                }
                EngineControlMessage::Pause => engine.pause(),
                EngineControlMessage::Resume => engine.resume(),
                EngineControlMessage::Reset => engine.reset(),
            }
        }
        events
    }

    #[test]
    fn completion_racing_a_pause_still_finishes_the_session() {
        let mut h = harness(PomodoroSettings {
            work_time: 1,
            short_break_time: 1,
            ..PomodoroSettings::default()
        });
        let mut engine = CountdownEngine::new(Arc::new(h.clock.clone()));

        h.machine.start_timer(None);
        deliver(&mut engine, h.sink.take());

        h.clock.advance_ms(60_000);
        let in_flight = engine.poll();
        assert_eq!(
            in_flight,
            vec![
                EngineEvent::Tick {
                    time_remaining_seconds: 0
                },
                EngineEvent::Complete
            ]
        );

        h.machine.pause_timer();
        for event in in_flight {
            h.machine.handle_event(event);
        }
        let sent = h.sink.take();
        assert_eq!(
            sent,
            vec![EngineControlMessage::Pause, EngineControlMessage::Reset]
        );
        assert!(deliver(&mut engine, sent).is_empty());

        let state = h.machine.state();
        assert_eq!(state.mode, TimerMode::Idle);
        assert_eq!(state.pending_next_mode, Some(TimerMode::ShortBreak));
        assert_eq!(state.completed_focus_count, 1);
        let records = h.machine.history().records();
        assert_eq!(records.len(), 1);
        assert!(records[0].completed);
        assert_eq!(h.plays.load(Ordering::SeqCst), 1);

        // The next interval counts down normally.
        h.machine.start_timer(None);
        deliver(&mut engine, h.sink.take());
        h.clock.advance_ms(60_000);
        assert!(engine.poll().contains(&EngineEvent::Complete));
    }

    #[test]
    fn new_settings_apply_to_next_interval_only() {
        let mut h = harness(PomodoroSettings::default());
        h.machine.start_timer(None);
        h.machine
            .update_settings(PomodoroSettings {
                short_break_time: 10,
                ..PomodoroSettings::default()
            })
            .unwrap();
        assert_eq!(h.sink.take(), vec![start(1500)]);

        h.machine.handle_event(EngineEvent::Complete);
        assert_eq!(h.machine.state().time_remaining_seconds, 600);
    }
}
