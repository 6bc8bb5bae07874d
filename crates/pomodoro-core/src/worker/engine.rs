//! Countdown engine.
//!
//! The engine is anchored to an absolute deadline. Every poll recomputes the
//! remaining time as `target - now`, so a poll that fires late (throttled
//! host, busy runtime) reports the correct value instead of drifting. It owns
//! no thread: the channel task calls [`CountdownEngine::poll`] on a short
//! interval while [`CountdownEngine::is_polling`] is true.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped -> Running -> (Paused -> Running)* -> Stopped
//! ```

use std::sync::Arc;

use super::protocol::EngineEvent;
use crate::clock::Clock;

pub struct CountdownEngine {
    clock: Arc<dyn Clock>,
    /// Epoch ms at which the countdown reaches zero (set while running).
    target_end_ms: Option<u64>,
    /// Remaining ms captured by `pause()`.
    remaining_ms_at_pause: Option<u64>,
    /// Last value sent in a TICK; suppresses duplicates under jitter.
    last_reported_seconds: u64,
    initial_duration_seconds: u64,
    running: bool,
}

impl CountdownEngine {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            target_end_ms: None,
            remaining_ms_at_pause: None,
            last_reported_seconds: 0,
            initial_duration_seconds: 0,
            running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_polling(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        !self.running && self.remaining_ms_at_pause.is_some()
    }

    pub fn last_reported_seconds(&self) -> u64 {
        self.last_reported_seconds
    }

    /// Milliseconds left, measured against the wall clock right now.
    pub fn remaining_ms(&self) -> u64 {
        match (self.target_end_ms, self.remaining_ms_at_pause) {
            (Some(target), _) if self.running => target.saturating_sub(self.clock.now_ms()),
            (_, Some(snapshot)) => snapshot,
            _ => 0,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a new countdown, cancelling whatever was in progress.
    pub fn start(&mut self, duration_seconds: u64) -> Vec<EngineEvent> {
        self.stop();
        self.remaining_ms_at_pause = None;
        self.initial_duration_seconds = duration_seconds;

        let target = duration_seconds
            .checked_mul(1000)
            .and_then(|ms| self.clock.now_ms().checked_add(ms));
        let Some(target) = target else {
            return vec![EngineEvent::Error {
                message: format!("cannot schedule a countdown of {duration_seconds} seconds"),
            }];
        };

        self.target_end_ms = Some(target);
        self.last_reported_seconds = duration_seconds;
        self.running = true;
        vec![EngineEvent::Tick {
            time_remaining_seconds: duration_seconds,
        }]
    }

    pub fn pause(&mut self) {
        if !self.running {
            return;
        }
        self.remaining_ms_at_pause = Some(self.remaining_ms());
        self.stop();
    }

    pub fn resume(&mut self) {
        if self.running {
            return;
        }
        let Some(remaining) = self.remaining_ms_at_pause.take() else {
            return;
        };
        self.target_end_ms = Some(self.clock.now_ms().saturating_add(remaining));
        self.running = true;
    }

    pub fn reset(&mut self) {
        self.stop();
        self.remaining_ms_at_pause = None;
        self.last_reported_seconds = self.initial_duration_seconds;
    }

    /// Call periodically while polling. Emits a TICK when the rounded second
    /// changes and COMPLETE once the deadline has passed.
    pub fn poll(&mut self) -> Vec<EngineEvent> {
        if !self.running {
            return Vec::new();
        }

        let remaining_ms = self.remaining_ms();
        // Half up, without adding to a value that may sit near u64::MAX.
        let remaining_seconds = remaining_ms / 1000 + u64::from(remaining_ms % 1000 >= 500);
        let mut events = Vec::new();

        if remaining_seconds != self.last_reported_seconds {
            self.last_reported_seconds = remaining_seconds;
            events.push(EngineEvent::Tick {
                time_remaining_seconds: remaining_seconds,
            });
        }

        if remaining_ms == 0 {
            self.stop();
            events.push(EngineEvent::Complete);
        }

        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn stop(&mut self) {
        self.running = false;
        self.target_end_ms = None;
    }
}
